//! Route handlers.
//!
//! One thin handler per action endpoint; each forwards to the engine and
//! returns the projected resource. The handler for `PUT /turntable/vinyl`
//! does not pick between put and change itself; the engine decides under
//! its own lock.

use crate::error::ApiError;
use axum::extract::State;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use turntabled_core::{ActionLink, TurntableEngine, TurntableResource};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TurntableEngine>,
}

/// API entry point resource, for HATEOAS discovery.
#[derive(Debug, Serialize)]
pub struct EntryPoint {
    #[serde(rename = "_links")]
    links: EntryPointLinks,
}

#[derive(Debug, Serialize)]
struct EntryPointLinks {
    #[serde(rename = "self")]
    self_link: ActionLink,
    turntable: ActionLink,
}

/// Builds the API router around a shared engine.
pub fn router(engine: Arc<TurntableEngine>) -> Router {
    Router::new()
        .route("/", get(entry_point))
        .route("/turntable", get(get_state))
        .route("/turntable/power/on", post(power_on))
        .route("/turntable/power/off", post(power_off))
        .route("/turntable/vinyl", put(load_vinyl).delete(remove_vinyl))
        .route("/turntable/play", post(play))
        .route("/turntable/stop", post(stop))
        .with_state(AppState { engine })
}

/// GET / - entry point with links to the available resources.
async fn entry_point() -> Json<EntryPoint> {
    Json(EntryPoint {
        links: EntryPointLinks {
            self_link: ActionLink {
                href: "/",
                method: "GET",
            },
            turntable: ActionLink {
                href: "/turntable",
                method: "GET",
            },
        },
    })
}

/// GET /turntable - current state with hypermedia links.
async fn get_state(State(st): State<AppState>) -> Json<TurntableResource> {
    Json(st.engine.snapshot())
}

/// POST /turntable/power/on
async fn power_on(State(st): State<AppState>) -> Result<Json<TurntableResource>, ApiError> {
    Ok(Json(st.engine.power_on()?))
}

/// POST /turntable/power/off
async fn power_off(State(st): State<AppState>) -> Result<Json<TurntableResource>, ApiError> {
    Ok(Json(st.engine.power_off()?))
}

/// PUT /turntable/vinyl - mount a random track; put or change depending
/// on whether a vinyl is already loaded. No request body.
async fn load_vinyl(State(st): State<AppState>) -> Result<Json<TurntableResource>, ApiError> {
    Ok(Json(st.engine.load_vinyl()?))
}

/// DELETE /turntable/vinyl
async fn remove_vinyl(State(st): State<AppState>) -> Result<Json<TurntableResource>, ApiError> {
    Ok(Json(st.engine.remove_vinyl()?))
}

/// POST /turntable/play
async fn play(State(st): State<AppState>) -> Result<Json<TurntableResource>, ApiError> {
    Ok(Json(st.engine.play()?))
}

/// POST /turntable/stop
async fn stop(State(st): State<AppState>) -> Result<Json<TurntableResource>, ApiError> {
    Ok(Json(st.engine.stop()?))
}
