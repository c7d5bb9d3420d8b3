pub mod handlers;
pub mod server;

pub use server::{create_router, start_status_server};

use crate::monitor::SharedReport;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub report: SharedReport,
}

impl AppState {
    pub fn new(report: SharedReport) -> Self {
        Self { report }
    }
}
