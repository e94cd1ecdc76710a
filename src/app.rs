use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::employees_index))
        .route("/employees", post(handlers::create_employee))
        .route(
            "/employees/:id/delete",
            get(handlers::confirm_delete).post(handlers::delete_employee),
        )
        .route(
            "/attendance",
            get(handlers::attendance_index).post(handlers::mark_attendance),
        )
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
