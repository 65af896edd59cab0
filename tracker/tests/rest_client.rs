//! REST client against a fake tracker backend served by axum on an
//! ephemeral port.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use shared::{
    ActivityListQuery, BabyProfile, FeedingSession, FeedingSessionCreate, FeedingSessionUpdate,
    FeedingType, MeasurementContext, RecordKind,
};
use tokio::net::TcpListener;
use uuid::Uuid;

use baby_tracker::backend::domain::models::ActivityRecord;
use baby_tracker::backend::io::rest::{ApiError, RestClient};
use baby_tracker::backend::storage::{ActivityStorage, BabyStorage, CancelToken};

const CREATED_AT: &str = "2025-01-05T12:00:00.123456";

#[derive(Clone, Default)]
struct FakeBackend {
    feedings: Arc<Mutex<Vec<FeedingSession>>>,
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "Feeding session not found" })),
    )
        .into_response()
}

async fn list_feedings(
    State(backend): State<FakeBackend>,
    Query(query): Query<ActivityListQuery>,
) -> Json<Vec<FeedingSession>> {
    let mut feedings: Vec<FeedingSession> = backend
        .feedings
        .lock()
        .unwrap()
        .iter()
        .filter(|f| query.baby_id.as_ref().map_or(true, |id| &f.baby_id == id))
        .cloned()
        .collect();
    feedings.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    let skip = query.skip.unwrap_or(0) as usize;
    let limit = query.limit.unwrap_or(100) as usize;
    Json(feedings.into_iter().skip(skip).take(limit).collect())
}

async fn create_feeding(State(backend): State<FakeBackend>, Json(create): Json<FeedingSessionCreate>) -> Response {
    if create.baby_id.is_empty() {
        let detail = json!({
            "detail": [
                { "loc": ["body", "baby_id"], "msg": "baby_id must not be empty", "type": "value_error" },
                { "loc": ["body", "start_time"], "msg": "invalid datetime", "type": "value_error" }
            ]
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(detail)).into_response();
    }
    let session = FeedingSession {
        id: Uuid::new_v4().to_string(),
        baby_id: create.baby_id,
        start_time: create.start_time.unwrap_or_else(|| CREATED_AT.to_string()),
        end_time: create.end_time,
        feeding_type: create.feeding_type,
        breast_started: create.breast_started,
        left_breast_duration: create.left_breast_duration,
        right_breast_duration: create.right_breast_duration,
        volume_offered_ml: create.volume_offered_ml,
        volume_consumed_ml: create.volume_consumed_ml,
        formula_type: create.formula_type,
        food_items: create.food_items,
        appetite: create.appetite,
        notes: create.notes,
        created_at: CREATED_AT.to_string(),
        duration_minutes: None,
    };
    backend.feedings.lock().unwrap().push(session.clone());
    (StatusCode::CREATED, Json(session)).into_response()
}

async fn get_feeding(State(backend): State<FakeBackend>, Path(id): Path<String>) -> Response {
    match backend.feedings.lock().unwrap().iter().find(|f| f.id == id) {
        Some(session) => Json(session.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_feeding(
    State(backend): State<FakeBackend>,
    Path(id): Path<String>,
    Json(update): Json<FeedingSessionUpdate>,
) -> Response {
    let mut feedings = backend.feedings.lock().unwrap();
    let Some(session) = feedings.iter_mut().find(|f| f.id == id) else {
        return not_found();
    };
    if let Some(notes) = update.notes {
        session.notes = Some(notes);
    }
    if let Some(consumed) = update.volume_consumed_ml {
        session.volume_consumed_ml = Some(consumed);
    }
    Json(session.clone()).into_response()
}

async fn delete_feeding(State(backend): State<FakeBackend>, Path(id): Path<String>) -> Response {
    let mut feedings = backend.feedings.lock().unwrap();
    let before = feedings.len();
    feedings.retain(|f| f.id != id);
    if feedings.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_babies() -> Json<Vec<BabyProfile>> {
    Json(vec![
        BabyProfile {
            id: "baby-1".to_string(),
            name: "Ada".to_string(),
            date_of_birth: "2024-12-01".to_string(),
            birth_weight: Some(3.3),
            birth_length: Some(50.0),
            birth_head_circumference: None,
            gender: None,
            timezone: "Australia/Sydney".to_string(),
            notes: None,
            created_at: "2024-12-02T08:00:00".to_string(),
            updated_at: "2024-12-02T08:00:00".to_string(),
            is_active: true,
        },
        BabyProfile {
            id: "baby-2".to_string(),
            name: "Broken".to_string(),
            date_of_birth: "not a date".to_string(),
            birth_weight: None,
            birth_length: None,
            birth_head_circumference: None,
            gender: None,
            timezone: "Australia/Sydney".to_string(),
            notes: None,
            created_at: "2024-12-02T08:00:00".to_string(),
            updated_at: "2024-12-02T08:00:00".to_string(),
            is_active: true,
        },
    ])
}

async fn list_growth() -> Json<serde_json::Value> {
    Json(json!([
        {
            "id": "g1",
            "baby_id": "baby-1",
            "measurement_date": "2025-01-06",
            "weight_kg": 4.2,
            "length_cm": 54.0,
            "measurement_context": "clinic",
            "created_at": CREATED_AT
        },
        {
            "id": "g2",
            "baby_id": "baby-1",
            "measurement_date": "2025-01-01",
            "weight_kg": 3.9,
            "measurement_context": "tele_visit",
            "created_at": CREATED_AT
        },
        {
            "id": "g3",
            "baby_id": "baby-1",
            "measurement_date": "2024-12-20",
            "weight_kg": 3.6,
            "measurement_context": "home",
            "created_at": CREATED_AT
        }
    ]))
}

async fn slow_feedings() -> Json<Vec<FeedingSession>> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(Vec::new())
}

async fn spawn_backend() -> (RestClient, FakeBackend) {
    let backend = FakeBackend::default();
    let app = Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "healthy", "version": "1.0.0" })) }))
        .route("/slow/api/v1/feeding/", get(slow_feedings))
        .route("/api/v1/babies/", get(list_babies))
        .route("/api/v1/growth/", get(list_growth))
        .route("/api/v1/feeding/", get(list_feedings).post(create_feeding))
        .route(
            "/api/v1/feeding/:id",
            get(get_feeding).put(update_feeding).delete(delete_feeding),
        )
        .with_state(backend.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = RestClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    (client, backend)
}

fn bottle_for(baby_id: &str, start: &str) -> FeedingSessionCreate {
    FeedingSessionCreate {
        baby_id: baby_id.to_string(),
        start_time: Some(start.to_string()),
        end_time: None,
        feeding_type: FeedingType::Bottle,
        breast_started: None,
        left_breast_duration: None,
        right_breast_duration: None,
        volume_offered_ml: Some(120),
        volume_consumed_ml: Some(95),
        formula_type: Some("Standard".to_string()),
        food_items: None,
        appetite: None,
        notes: Some("sleepy".to_string()),
    }
}

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let (client, _) = spawn_backend().await;
    let submitted = bottle_for("baby-1", "2025-01-05T08:00:00");
    let created = client.create_feeding(&submitted).await.unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.created_at, CREATED_AT);

    let listed = client
        .list_feedings(&ActivityListQuery::for_baby("baby-1", None), &CancelToken::new())
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    let stored = &listed[0];
    assert_eq!(stored.id, created.id);
    assert_eq!(stored.baby_id, submitted.baby_id);
    assert_eq!(stored.start_time, "2025-01-05T08:00:00");
    assert_eq!(stored.feeding_type, FeedingType::Bottle);
    assert_eq!(stored.volume_offered_ml, Some(120));
    assert_eq!(stored.volume_consumed_ml, Some(95));
    assert_eq!(stored.formula_type.as_deref(), Some("Standard"));
    assert_eq!(stored.notes.as_deref(), Some("sleepy"));

    let fetched = client.get_feeding(&created.id, &CancelToken::new()).await.unwrap();
    assert_eq!(&fetched, stored);
}

#[tokio::test]
async fn test_list_filters_by_baby_and_limit() {
    let (client, _) = spawn_backend().await;
    for start in ["2025-01-05T08:00:00", "2025-01-05T11:00:00", "2025-01-05T14:30:00"] {
        client.create_feeding(&bottle_for("baby-1", start)).await.unwrap();
    }
    client
        .create_feeding(&bottle_for("baby-2", "2025-01-05T09:00:00"))
        .await
        .unwrap();

    let cancel = CancelToken::new();
    let capped = client
        .list_feedings(&ActivityListQuery::for_baby("baby-1", Some(2)), &cancel)
        .await
        .unwrap();
    let starts: Vec<&str> = capped.iter().map(|f| f.start_time.as_str()).collect();
    assert_eq!(starts, vec!["2025-01-05T14:30:00", "2025-01-05T11:00:00"]);

    let other = client
        .list_feedings(&ActivityListQuery::for_baby("baby-2", None), &cancel)
        .await
        .unwrap();
    assert_eq!(other.len(), 1);
}

#[tokio::test]
async fn test_storage_trait_maps_records() {
    let (client, _) = spawn_backend().await;
    client
        .create_feeding(&bottle_for("baby-1", "2025-01-05T08:00:00"))
        .await
        .unwrap();

    let records = client
        .list_records(RecordKind::Feeding, "baby-1", Some(100), &CancelToken::new())
        .await
        .unwrap();
    let [ActivityRecord::Feeding(feeding)] = records.as_slice() else {
        panic!("expected one feeding, got {:?}", records);
    };
    assert_eq!(feeding.bottle_volume_ml(), Some(95.0));
    assert_eq!(feeding.start_time.to_string(), "2025-01-05 08:00:00");
}

#[tokio::test]
async fn test_growth_list_keeps_clinic_and_skips_unknown_context() {
    let (client, _) = spawn_backend().await;
    let records = client
        .list_records(RecordKind::Growth, "baby-1", Some(100), &CancelToken::new())
        .await
        .unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["g1", "g3"]);
    let ActivityRecord::Growth(clinic) = &records[0] else {
        panic!("expected a growth record, got {:?}", records[0]);
    };
    assert_eq!(clinic.context, MeasurementContext::Clinic);
    assert_eq!(clinic.weight_kg, Some(4.2));
}

#[tokio::test]
async fn test_update_and_delete() {
    let (client, backend) = spawn_backend().await;
    let created = client
        .create_feeding(&bottle_for("baby-1", "2025-01-05T08:00:00"))
        .await
        .unwrap();

    let update = FeedingSessionUpdate {
        volume_consumed_ml: Some(110),
        ..Default::default()
    };
    let updated = client.update_feeding(&created.id, &update).await.unwrap();
    assert_eq!(updated.volume_consumed_ml, Some(110));
    assert_eq!(updated.notes.as_deref(), Some("sleepy"));

    client.delete_feeding(&created.id).await.unwrap();
    assert!(backend.feedings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_not_found_detail_propagates() {
    let (client, _) = spawn_backend().await;
    let err = client
        .get_feeding("missing", &CancelToken::new())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "Feeding session not found");

    let err = client.delete_feeding("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_validation_detail_propagates() {
    let (client, _) = spawn_backend().await;
    let err = client
        .create_feeding(&bottle_for("", "2025-01-05T08:00:00"))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.user_message(), "baby_id must not be empty; invalid datetime");
}

#[tokio::test]
async fn test_babies_skip_malformed_profiles() {
    let (client, _) = spawn_backend().await;
    let babies = BabyStorage::list_babies(&client, &CancelToken::new()).await.unwrap();
    assert_eq!(babies.len(), 1);
    assert_eq!(babies[0].name, "Ada");
}

#[tokio::test]
async fn test_health_check() {
    let (client, _) = spawn_backend().await;
    let health = client.health_check().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, "1.0.0");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RestClient::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let err = client.health_check().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn test_cancel_interrupts_read() {
    let (client, _) = spawn_backend().await;
    let slow = RestClient::new(&format!("{}/slow", client.base_url()), Duration::from_secs(5)).unwrap();
    let cancel = CancelToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let query = ActivityListQuery::default();
    let pending = slow.list_feedings(&query, &cancel);
    let err = tokio::time::timeout(Duration::from_secs(1), pending)
        .await
        .expect("cancellation should end the read before the backend answers")
        .unwrap_err();
    assert!(err.is_cancelled());
}
