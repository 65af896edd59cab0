//! # IO Layer
//!
//! Everything that talks to the outside world. The tracker owns no server
//! and no files of its own; its only peer is the backend's REST API.

pub mod rest;
