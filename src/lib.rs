pub mod app;
pub mod calendar;
pub mod config;
pub mod context;
pub mod errors;
pub mod glucose;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod state;
pub mod storage;
pub mod streak;
pub mod ui;

pub use app::router;
pub use config::{Clock, Config};
pub use repository::AdherenceRepository;
pub use state::AppState;
pub use storage::load_data;
pub use streak::{compute_streak, StreakResult};
