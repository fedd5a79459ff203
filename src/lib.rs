pub mod analytics;
pub mod api;
pub mod app;
pub mod config;
pub mod gating;
pub mod intake;
pub mod notify;
pub mod plan;
pub mod preferences;
pub mod storage;
pub mod telemetry;

pub use app::AppContext;
