pub mod api;
pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod ui;
pub mod view;

pub use api::{ApiClient, HrmsApi};
pub use app::router;
pub use config::Config;
pub use errors::ApiError;
pub use state::AppState;
