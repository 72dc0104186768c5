//! Application state shared across handlers.

use std::sync::Arc;

use utsav_core::Config;

use crate::services::SubmissionWorkflow;

/// Main application state: configuration plus the submission workflow,
/// which owns the storage, remote, and summary services.
pub struct AppState {
    pub config: Config,
    pub workflow: SubmissionWorkflow,
}

impl AppState {
    pub fn new(config: Config, workflow: SubmissionWorkflow) -> Arc<Self> {
        Arc::new(Self { config, workflow })
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
