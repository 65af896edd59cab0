//! # Dashboard View
//!
//! View model behind the analytics tabs. It owns the last successfully
//! derived [`Dashboard`] and a transient notice, and a [`CancelToken`] that
//! fires when the view is closed or dropped.
//!
//! ## Refresh rules
//!
//! - Every refresh drops the baby's cached records first, so it reads the
//!   backend and sees writes made by other clients
//! - A successful refresh replaces the dashboard and clears the notice
//! - A failed refresh keeps the previous dashboard and sets the notice
//! - A cancelled refresh changes nothing

use chrono::NaiveDateTime;
use log::{debug, error};
use shared::Dashboard;

use super::insights_service::InsightsService;
use super::record_service::{describe_error, is_cancelled};
use crate::backend::storage::CancelToken;

pub struct DashboardView {
    insights: InsightsService,
    baby_id: String,
    cancel: CancelToken,
    dashboard: Option<Dashboard>,
    notice: Option<String>,
}

impl DashboardView {
    pub fn new(insights: InsightsService, baby_id: impl Into<String>) -> Self {
        Self {
            insights,
            baby_id: baby_id.into(),
            cancel: CancelToken::new(),
            dashboard: None,
            notice: None,
        }
    }

    pub fn baby_id(&self) -> &str {
        &self.baby_id
    }

    /// Last successfully derived dashboard
    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.dashboard.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Take the notice so it is shown once
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Token that cancels this view's reads; clones share the signal
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Recompute from a snapshot read fresh from the backend. Returns whether
    /// the dashboard changed.
    pub async fn refresh(&mut self, now: NaiveDateTime) -> bool {
        if self.is_closed() {
            debug!("Skipping refresh of closed view for baby {}", self.baby_id);
            return false;
        }

        self.insights.invalidate(&self.baby_id).await;
        match self.insights.dashboard(&self.baby_id, now, &self.cancel).await {
            Ok(dashboard) => {
                let changed = self.dashboard.as_ref() != Some(&dashboard);
                self.dashboard = Some(dashboard);
                self.notice = None;
                changed
            }
            Err(e) if is_cancelled(&e) => {
                debug!("Discarding cancelled refresh for baby {}", self.baby_id);
                false
            }
            Err(e) => {
                error!("Dashboard refresh failed for baby {}: {:#}", self.baby_id, e);
                self.notice = Some(describe_error(&e));
                false
            }
        }
    }

    /// Cancel in-flight reads; later refreshes are no-ops
    pub fn close(&self) {
        self.cancel.cancel();
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
