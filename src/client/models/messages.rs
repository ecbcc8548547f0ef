use std::path::PathBuf;

use crate::client::controllers::action::ReportFormat;
use crate::client::models::app_state::Screen;
use crate::client::models::types::{
    AuditEntry, CleansingOutcome, CleansingStats, DashboardData, DetectionOutcome, UploadOutcome,
};
use crate::client::services::api_client::ApiError;

#[derive(Debug, Clone)]
pub enum Message {
    None,
    ClearLog,
    Navigate(Screen),

    // session lifecycle
    SessionChecked {
        authenticated: bool,
        email: Option<String>,
    },
    SessionExpired,
    Logout,
    LogoutCompleted,

    // login / register form
    EmailChanged(String),
    PasswordChanged(String),
    ConfirmPasswordChanged(String),
    ToggleLoginRegister,
    ToggleShowPassword,
    SubmitAuth,
    AuthCompleted {
        result: Result<String, ApiError>,
    },

    // onboarding gate
    ProfileNameChanged(String),
    ProfilePhoneChanged(String),
    ProfileCountryChanged(String),
    ProfileJobChanged(String),
    ProfileIndustryChanged(String),
    CompleteOnboarding,

    // data sources (ticket = fetch sequence number, stale ones are dropped)
    RefreshDashboard,
    DashboardLoaded {
        ticket: u64,
        result: Result<DashboardData, ApiError>,
    },
    RefreshAuditLog,
    AuditLogLoaded {
        ticket: u64,
        result: Result<Vec<AuditEntry>, ApiError>,
    },
    RefreshCleansingStats,
    CleansingStatsLoaded {
        ticket: u64,
        result: Result<CleansingStats, ApiError>,
    },

    // action workflows
    UploadPathChanged(String),
    SubmitUpload,
    UploadFinished {
        result: Result<UploadOutcome, ApiError>,
    },
    RunDetection,
    DetectionFinished {
        result: Result<DetectionOutcome, ApiError>,
    },
    RunCleansing,
    CleansingFinished {
        result: Result<CleansingOutcome, ApiError>,
    },
    ExportReport(ReportFormat),
    ExportFinished {
        format: ReportFormat,
        result: Result<PathBuf, ApiError>,
    },
}
