//! Liveness and readiness probes.
//!
//! The process moves through [`Phase::Starting`], [`Phase::Serving`] and
//! [`Phase::Draining`] in that order. Readiness holds only while serving;
//! liveness holds until draining begins. Probes answer with an empty body
//! and `Cache-Control: no-store`.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Lifecycle stage of the server process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Phase {
    Starting = 0,
    Serving = 1,
    Draining = 2,
}

impl Phase {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Serving,
            _ => Self::Draining,
        }
    }
}

/// Current [`Phase`], shared between the server and its probes.
#[derive(Debug, Default)]
pub struct HealthState {
    phase: AtomicU8,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        Phase::from_raw(self.phase.load(Ordering::Acquire))
    }

    /// Advance to `next`. Phases never move backwards.
    pub fn advance(&self, next: Phase) {
        self.phase.fetch_max(next as u8, Ordering::AcqRel);
    }

    /// Called once the listener is bound.
    pub fn mark_ready(&self) {
        self.advance(Phase::Serving);
    }

    /// Called when shutdown starts.
    pub fn mark_unhealthy(&self) {
        self.advance(Phase::Draining);
    }
}

fn probe_response(passing: bool) -> HttpResponse {
    let mut builder = if passing {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Serving collection requests"),
        (status = 503, description = "Starting or draining")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.phase() == Phase::Serving)
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Starting or serving"),
        (status = 503, description = "Draining before shutdown")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.phase() < Phase::Draining)
}
