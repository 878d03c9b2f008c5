pub mod handlers;
mod services;

use crate::state::AppState;
use axum::Router;

pub fn router(max_bytes: usize) -> Router<AppState> {
    handlers::upload_routes(max_bytes)
}
