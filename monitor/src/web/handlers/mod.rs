// Status endpoint handlers

pub mod common;
pub mod health;

pub use common::{ApiResponse, ApiResult};
pub use health::{get_liveness, get_monitor_status};
