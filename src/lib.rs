//! Client library for the crop recommendation service.
//!
//! - `form`: text form fields to a validated `FeatureVector`.
//! - `api`: blocking HTTP client (predict, feedback, health, farms, pass-through).
//! - `crops`: static per-crop metadata used for enrichment and chat replies.
//! - `chat`: canned farming assistant.
//! - `session`: form/results hand-off with stale-response protection.

pub mod api;
pub mod chat;
pub mod config;
pub mod crops;
pub mod form;
pub mod logging;
pub mod model;
pub mod session;
