#![forbid(unsafe_code)]
//! Client-side state controller for the competency API.
//!
//! Sub-item mutations are optimistic: local state changes first, the server
//! is synced after, and a failed sync falls back to a full reload of the
//! authoritative list. Evaluations and statistics are always recomputed
//! locally with the shared calculator, never trusted from cached state.

mod api;
mod controller;
mod fake;

pub use api::{ApiClientError, CompetencyApi, HttpCompetencyApi};
pub use controller::{
    CompetencyController, CompetencyView, CreateForm, FormState, ListState, Notice, NoticeLevel,
};
pub use fake::FakeApi;

pub const CRATE_NAME: &str = "skilldeck-client";
