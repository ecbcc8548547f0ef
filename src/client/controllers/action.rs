use std::path::{Path, PathBuf};

use crate::client::models::types::UploadOutcome;
use crate::client::services::api_client::ApiError;

/// Lifecycle of one user-triggered workflow invocation. Re-invocation from
/// a settled state goes straight back to `Running`; there is no auto-reset
/// timer, a `Failed` state stays until the user acts again.
#[derive(Debug, Clone)]
pub enum ActionState<T> {
    Idle,
    Running,
    Succeeded(T),
    Failed(ApiError),
}

// Manual impl: the derive would demand T: Default, which result payloads
// do not carry.
impl<T> Default for ActionState<T> {
    fn default() -> Self {
        ActionState::Idle
    }
}

/// At-most-once-concurrent action state machine. `try_begin` rejects
/// re-entry while `Running` so a workflow can never race itself.
#[derive(Debug)]
pub struct ActionController<T> {
    state: ActionState<T>,
}

impl<T> Default for ActionController<T> {
    fn default() -> Self {
        Self {
            state: ActionState::Idle,
        }
    }
}

impl<T> ActionController<T> {
    pub fn new() -> Self {
        Self {
            state: ActionState::Idle,
        }
    }

    pub fn state(&self) -> &ActionState<T> {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ActionState::Running)
    }

    /// Transitions to `Running` synchronously, before any network call is
    /// issued, so a view can disable duplicate submission. Returns false
    /// (no transition, no call) when already running.
    pub fn try_begin(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = ActionState::Running;
        true
    }

    pub fn finish(&mut self, result: Result<T, ApiError>) {
        self.state = match result {
            Ok(value) => ActionState::Succeeded(value),
            Err(err) => ActionState::Failed(err),
        };
    }

    /// Like `finish`, but runs `on_success` exactly once when the workflow
    /// succeeded. Used to notify dependent data sources to refresh.
    pub fn finish_with(&mut self, result: Result<T, ApiError>, on_success: impl FnOnce(&T)) {
        if let Ok(value) = &result {
            on_success(value);
        }
        self.finish(result);
    }
}

/// Upload workflow: requires a selected file. Invoking without one is a
/// validation precondition, silently ignored rather than surfaced as an
/// error; no content validation happens client-side.
#[derive(Debug, Default)]
pub struct UploadController {
    pub inner: ActionController<UploadOutcome>,
}

impl UploadController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ActionState<UploadOutcome> {
        self.inner.state()
    }

    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    /// No file selected: no-op, state untouched. Otherwise behaves like
    /// [`ActionController::try_begin`].
    pub fn try_begin(&mut self, file: Option<&Path>) -> bool {
        if file.is_none() {
            return false;
        }
        self.inner.try_begin()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Csv,
    Pdf,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Export workflow, serialized per format: a second invocation for a format
/// that is already downloading is rejected; different formats may run
/// concurrently. The success value is the locally saved file path.
#[derive(Debug, Default)]
pub struct ExportController {
    csv: ActionController<PathBuf>,
    pdf: ActionController<PathBuf>,
}

impl ExportController {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, format: ReportFormat) -> &mut ActionController<PathBuf> {
        match format {
            ReportFormat::Csv => &mut self.csv,
            ReportFormat::Pdf => &mut self.pdf,
        }
    }

    pub fn state(&self, format: ReportFormat) -> &ActionState<PathBuf> {
        match format {
            ReportFormat::Csv => self.csv.state(),
            ReportFormat::Pdf => self.pdf.state(),
        }
    }

    pub fn is_running(&self, format: ReportFormat) -> bool {
        matches!(self.state(format), ActionState::Running)
    }

    pub fn try_begin(&mut self, format: ReportFormat) -> bool {
        self.slot_mut(format).try_begin()
    }

    pub fn finish(&mut self, format: ReportFormat, result: Result<PathBuf, ApiError>) {
        self.slot_mut(format).finish(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn err(status: u16, message: &str) -> ApiError {
        ApiError {
            message: message.to_string(),
            status,
            payload: Value::Null,
        }
    }

    #[test]
    fn default_controller_starts_idle() {
        // UploadOutcome has no Default; the controller must not require one
        let ctl = ActionController::<UploadOutcome>::default();
        assert!(matches!(ctl.state(), ActionState::Idle));
    }

    #[test]
    fn begin_while_running_is_rejected() {
        let mut ctl = ActionController::<u32>::new();
        assert!(ctl.try_begin());
        assert!(ctl.is_running());
        // second invocation while running: no-op
        assert!(!ctl.try_begin());
        assert!(ctl.is_running());
    }

    #[test]
    fn reinvocation_from_settled_state_restarts() {
        let mut ctl = ActionController::<u32>::new();
        ctl.try_begin();
        ctl.finish(Err(err(500, "boom")));
        assert!(matches!(ctl.state(), ActionState::Failed(_)));

        // failed state persists until the user re-invokes
        assert!(ctl.try_begin());
        assert!(ctl.is_running());
    }

    #[test]
    fn success_notification_fires_exactly_once() {
        let mut ctl = ActionController::<u32>::new();
        let mut notified = 0;
        ctl.try_begin();
        ctl.finish_with(Ok(42), |_| notified += 1);
        assert_eq!(notified, 1);
        assert!(matches!(ctl.state(), ActionState::Succeeded(42)));
    }

    #[test]
    fn failure_does_not_notify() {
        let mut ctl = ActionController::<u32>::new();
        let mut notified = 0;
        ctl.try_begin();
        ctl.finish_with(Err(err(500, "boom")), |_| notified += 1);
        assert_eq!(notified, 0);
    }

    #[test]
    fn upload_without_file_is_a_noop() {
        let mut ctl = UploadController::new();
        assert!(!ctl.try_begin(None));
        assert!(matches!(ctl.state(), ActionState::Idle));
    }

    #[test]
    fn upload_with_file_runs() {
        let mut ctl = UploadController::new();
        assert!(ctl.try_begin(Some(Path::new("transactions.csv"))));
        assert!(ctl.is_running());
    }

    #[test]
    fn upload_success_carries_row_count() {
        let mut ctl = UploadController::new();
        ctl.try_begin(Some(Path::new("transactions.csv")));
        let outcome = UploadOutcome {
            message: "ok".to_string(),
            rows: 42,
            total_rows: 42,
        };
        let mut refreshed = 0;
        ctl.inner.finish_with(Ok(outcome), |_| refreshed += 1);
        assert_eq!(refreshed, 1);
        match ctl.state() {
            ActionState::Succeeded(o) => {
                assert_eq!(o.message, "ok");
                assert_eq!(o.rows, 42);
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn export_is_serialized_per_format() {
        let mut ctl = ExportController::new();
        assert!(ctl.try_begin(ReportFormat::Csv));
        // same format while running: rejected
        assert!(!ctl.try_begin(ReportFormat::Csv));
        // a different format may run concurrently
        assert!(ctl.try_begin(ReportFormat::Pdf));

        ctl.finish(ReportFormat::Csv, Ok(PathBuf::from("exports/report.csv")));
        assert!(matches!(
            ctl.state(ReportFormat::Csv),
            ActionState::Succeeded(_)
        ));
        assert!(ctl.is_running(ReportFormat::Pdf));
    }
}
