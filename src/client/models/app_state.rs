use std::path::PathBuf;
use std::sync::Arc;

use iced::Command;
use log::debug;
use tokio::sync::Mutex;

use crate::client::controllers::action::{ActionController, ExportController, UploadController};
use crate::client::controllers::fetch::FetchController;
use crate::client::gui::views::logger::{LogLevel, LogMessage};
use crate::client::models::messages::Message;
use crate::client::models::types::{
    AuditEntry, CleansingOutcome, CleansingStats, DashboardData, DetectionOutcome, UserProfile,
};
use crate::client::services::api_client::{ApiClient, ApiError};
use crate::client::services::session::SessionManager;
use crate::client::services::{resources, workflows};
use crate::client::utils::prefs;
use crate::config::ClientConfig;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    CheckingSession,
    Login,
    Onboarding,
    Dashboard,
    AuditLog,
    Operations,
}

/// Whole-application state: the session/form fields, the onboarding gate,
/// one fetch controller per data source and one action controller per
/// workflow. Views read this; only `update` mutates it.
pub struct DashAppState {
    pub config: ClientConfig,
    pub screen: Screen,

    // login / register form
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub is_login: bool,
    pub show_password: bool,
    pub auth_loading: bool,
    pub error_message: Option<String>,
    pub current_user: Option<String>,

    // onboarding gate, read once at startup and never re-read in session
    pub onboarding_complete: bool,
    pub profile: UserProfile,

    pub logger: Vec<LogMessage>,

    // data sources
    pub dashboard: FetchController<DashboardData>,
    pub audit: FetchController<Vec<AuditEntry>>,
    pub cleansing_stats: FetchController<CleansingStats>,

    // action workflows
    pub upload: UploadController,
    pub upload_path: String,
    pub detection: ActionController<DetectionOutcome>,
    pub cleansing: ActionController<CleansingOutcome>,
    pub exports: ExportController,
}

impl DashAppState {
    pub fn new(config: ClientConfig) -> Self {
        let onboarding_complete = prefs::onboarding_complete(&config.data_dir);
        let profile = prefs::load_profile(&config.data_dir).unwrap_or_default();
        Self {
            config,
            screen: Screen::CheckingSession,
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            is_login: true,
            show_password: false,
            auth_loading: false,
            error_message: None,
            current_user: None,
            onboarding_complete,
            profile,
            logger: Vec::new(),
            dashboard: FetchController::new(),
            audit: FetchController::new(),
            cleansing_stats: FetchController::new(),
            upload: UploadController::new(),
            upload_path: String::new(),
            detection: ActionController::new(),
            cleansing: ActionController::new(),
            exports: ExportController::new(),
        }
    }

    fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.logger.push(LogMessage {
            level,
            message: message.into(),
        });
    }

    /// Auto-clear the alert bar after a short delay, same rhythm everywhere.
    fn clear_log_later() -> Command<Message> {
        Command::perform(
            async {
                tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;
                Message::ClearLog
            },
            |msg| msg,
        )
    }

    fn dispatch(message: Message) -> Command<Message> {
        Command::perform(async move { message }, |msg| msg)
    }

    /// The session manager is the only component reacting to auth-class
    /// errors; everyone else just hands them over.
    fn auth_guard(
        &self,
        err: Option<&ApiError>,
        session: &Arc<Mutex<SessionManager>>,
    ) -> Option<Command<Message>> {
        let err = err?;
        if !err.is_auth_error() {
            return None;
        }
        let session = session.clone();
        Some(Command::perform(
            async move {
                let mut guard = session.lock().await;
                guard.handle_auth_loss();
                Message::SessionExpired
            },
            |msg| msg,
        ))
    }

    /// Screen to land on once authenticated: the onboarding gate blocks
    /// everything else until the flag has been written.
    fn post_auth_screen(&self) -> Screen {
        if self.onboarding_complete {
            Screen::Dashboard
        } else {
            Screen::Onboarding
        }
    }

    pub fn update(
        &mut self,
        message: Message,
        session: &Arc<Mutex<SessionManager>>,
        api: &Arc<ApiClient>,
    ) -> Command<Message> {
        match message {
            Message::None => Command::none(),
            Message::ClearLog => {
                self.logger.clear();
                Command::none()
            }
            Message::Navigate(screen) => {
                self.screen = screen.clone();
                // first activation of a data source issues its fetch
                match screen {
                    Screen::Dashboard if self.dashboard.is_untouched() => {
                        Self::dispatch(Message::RefreshDashboard)
                    }
                    Screen::AuditLog if self.audit.is_untouched() => {
                        Self::dispatch(Message::RefreshAuditLog)
                    }
                    Screen::Operations if self.cleansing_stats.is_untouched() => {
                        Self::dispatch(Message::RefreshCleansingStats)
                    }
                    _ => Command::none(),
                }
            }

            // ---- session lifecycle ----
            Message::SessionChecked {
                authenticated,
                email,
            } => {
                if authenticated {
                    self.current_user = email;
                    self.screen = self.post_auth_screen();
                    if self.screen == Screen::Dashboard {
                        return Self::dispatch(Message::RefreshDashboard);
                    }
                } else {
                    self.screen = Screen::Login;
                }
                Command::none()
            }
            Message::SessionExpired => {
                self.current_user = None;
                self.password.clear();
                self.dashboard = FetchController::new();
                self.audit = FetchController::new();
                self.cleansing_stats = FetchController::new();
                self.screen = Screen::Login;
                self.log(LogLevel::Warning, "Session expired, please log in again");
                Command::none()
            }
            Message::Logout => {
                let session = session.clone();
                Command::perform(
                    async move {
                        let mut guard = session.lock().await;
                        guard.logout().await;
                        Message::LogoutCompleted
                    },
                    |msg| msg,
                )
            }
            Message::LogoutCompleted => {
                self.current_user = None;
                self.email.clear();
                self.password.clear();
                self.confirm_password.clear();
                self.error_message = None;
                // per-user data must not survive the session
                self.dashboard = FetchController::new();
                self.audit = FetchController::new();
                self.cleansing_stats = FetchController::new();
                self.screen = Screen::Login;
                self.log(LogLevel::Info, "Logged out");
                Self::clear_log_later()
            }

            // ---- login / register form ----
            Message::EmailChanged(email) => {
                self.email = email;
                Command::none()
            }
            Message::PasswordChanged(password) => {
                self.password = password;
                Command::none()
            }
            Message::ConfirmPasswordChanged(confirm) => {
                self.confirm_password = confirm;
                Command::none()
            }
            Message::ToggleLoginRegister => {
                self.is_login = !self.is_login;
                self.error_message = None;
                Command::none()
            }
            Message::ToggleShowPassword => {
                self.show_password = !self.show_password;
                Command::none()
            }
            Message::SubmitAuth => {
                if self.auth_loading {
                    return Command::none();
                }
                self.auth_loading = true;
                self.error_message = None;
                let session = session.clone();
                let email = self.email.trim().to_string();
                let password = self.password.clone();
                let confirm = self.confirm_password.clone();
                let is_login = self.is_login;
                Command::perform(
                    async move {
                        let mut guard = session.lock().await;
                        let result = if is_login {
                            guard.login(&email, &password).await
                        } else {
                            guard.register(&email, &password, &confirm).await
                        };
                        Message::AuthCompleted {
                            result: result.map(|_| email),
                        }
                    },
                    |msg| msg,
                )
            }
            Message::AuthCompleted { result } => {
                self.auth_loading = false;
                match result {
                    Ok(email) => {
                        self.current_user = Some(email);
                        self.password.clear();
                        self.confirm_password.clear();
                        self.log(LogLevel::Success, "Login successful");
                        self.screen = self.post_auth_screen();
                        let mut commands = vec![Self::clear_log_later()];
                        if self.screen == Screen::Dashboard {
                            commands.push(Self::dispatch(Message::RefreshDashboard));
                        }
                        Command::batch(commands)
                    }
                    Err(err) => {
                        // the view decides how to render it; nothing is thrown
                        self.error_message = Some(err.message.clone());
                        self.log(LogLevel::Error, err.message);
                        Command::none()
                    }
                }
            }

            // ---- onboarding gate ----
            Message::ProfileNameChanged(v) => {
                self.profile.name = v;
                Command::none()
            }
            Message::ProfilePhoneChanged(v) => {
                self.profile.phone = v;
                Command::none()
            }
            Message::ProfileCountryChanged(v) => {
                self.profile.country = v;
                Command::none()
            }
            Message::ProfileJobChanged(v) => {
                self.profile.job = v;
                Command::none()
            }
            Message::ProfileIndustryChanged(v) => {
                self.profile.industry = v;
                Command::none()
            }
            Message::CompleteOnboarding => {
                match prefs::complete_onboarding(&self.config.data_dir, &self.profile) {
                    Ok(()) => {
                        // flips once, never re-blocks for this session
                        self.onboarding_complete = true;
                        self.screen = Screen::Dashboard;
                        self.log(LogLevel::Success, "Profile saved");
                        Command::batch([
                            Self::clear_log_later(),
                            Self::dispatch(Message::RefreshDashboard),
                        ])
                    }
                    Err(err) => {
                        self.log(LogLevel::Error, format!("Could not save profile: {}", err));
                        Command::none()
                    }
                }
            }

            // ---- data sources ----
            Message::RefreshDashboard => {
                let ticket = self.dashboard.begin();
                let api = api.clone();
                let page_size = self.config.dashboard_page_size;
                Command::perform(
                    async move {
                        let result = resources::load_dashboard(&api, page_size).await;
                        Message::DashboardLoaded { ticket, result }
                    },
                    |msg| msg,
                )
            }
            Message::DashboardLoaded { ticket, result } => {
                let auth_cmd = self.auth_guard(result.as_ref().err(), session);
                if !self.dashboard.complete(ticket, result) {
                    debug!("discarded stale dashboard response (ticket {})", ticket);
                }
                auth_cmd.unwrap_or_else(Command::none)
            }
            Message::RefreshAuditLog => {
                let ticket = self.audit.begin();
                let api = api.clone();
                let page_size = self.config.audit_page_size;
                Command::perform(
                    async move {
                        let result = resources::load_audit_logs(&api, page_size).await;
                        Message::AuditLogLoaded { ticket, result }
                    },
                    |msg| msg,
                )
            }
            Message::AuditLogLoaded { ticket, result } => {
                let auth_cmd = self.auth_guard(result.as_ref().err(), session);
                if !self.audit.complete(ticket, result) {
                    debug!("discarded stale audit-log response (ticket {})", ticket);
                }
                auth_cmd.unwrap_or_else(Command::none)
            }
            Message::RefreshCleansingStats => {
                let ticket = self.cleansing_stats.begin();
                let api = api.clone();
                Command::perform(
                    async move {
                        let result = resources::load_cleansing_stats(&api).await;
                        Message::CleansingStatsLoaded { ticket, result }
                    },
                    |msg| msg,
                )
            }
            Message::CleansingStatsLoaded { ticket, result } => {
                let auth_cmd = self.auth_guard(result.as_ref().err(), session);
                if !self.cleansing_stats.complete(ticket, result) {
                    debug!("discarded stale cleansing-stats response (ticket {})", ticket);
                }
                auth_cmd.unwrap_or_else(Command::none)
            }

            // ---- action workflows ----
            Message::UploadPathChanged(path) => {
                self.upload_path = path;
                Command::none()
            }
            Message::SubmitUpload => {
                let trimmed = self.upload_path.trim();
                let file = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
                match file {
                    Some(path) if self.upload.try_begin(Some(&path)) => {
                        let api = api.clone();
                        Command::perform(
                            async move {
                                let result = workflows::upload_csv(&api, &path).await;
                                Message::UploadFinished { result }
                            },
                            |msg| msg,
                        )
                    }
                    // already running, or no file selected (silently ignored)
                    _ => Command::none(),
                }
            }
            Message::UploadFinished { result } => {
                let auth_cmd = self.auth_guard(result.as_ref().err(), session);
                match &result {
                    Ok(outcome) => {
                        self.log(LogLevel::Success, outcome.message.clone());
                        self.upload_path.clear();
                    }
                    Err(err) => self.log(LogLevel::Error, err.message.clone()),
                }
                let mut refresh = false;
                self.upload.inner.finish_with(result, |_| refresh = true);
                let mut commands = vec![Self::clear_log_later()];
                if refresh {
                    commands.push(Self::dispatch(Message::RefreshDashboard));
                }
                if let Some(cmd) = auth_cmd {
                    commands.push(cmd);
                }
                Command::batch(commands)
            }
            Message::RunDetection => {
                if !self.detection.try_begin() {
                    return Command::none();
                }
                let api = api.clone();
                Command::perform(
                    async move {
                        let result = workflows::run_detection(&api).await;
                        Message::DetectionFinished { result }
                    },
                    |msg| msg,
                )
            }
            Message::DetectionFinished { result } => {
                let auth_cmd = self.auth_guard(result.as_ref().err(), session);
                match &result {
                    Ok(outcome) => self.log(
                        LogLevel::Success,
                        format!(
                            "Scored {} transactions, {} flagged ({}s)",
                            outcome.transactions_processed,
                            outcome.fraud_detected,
                            outcome.duration_seconds
                        ),
                    ),
                    Err(err) => self.log(LogLevel::Error, err.message.clone()),
                }
                let mut refresh = false;
                self.detection.finish_with(result, |_| refresh = true);
                let mut commands = vec![Self::clear_log_later()];
                if refresh {
                    commands.push(Self::dispatch(Message::RefreshDashboard));
                }
                if let Some(cmd) = auth_cmd {
                    commands.push(cmd);
                }
                Command::batch(commands)
            }
            Message::RunCleansing => {
                if !self.cleansing.try_begin() {
                    return Command::none();
                }
                let api = api.clone();
                Command::perform(
                    async move {
                        let result = workflows::run_cleansing(&api).await;
                        Message::CleansingFinished { result }
                    },
                    |msg| msg,
                )
            }
            Message::CleansingFinished { result } => {
                let auth_cmd = self.auth_guard(result.as_ref().err(), session);
                match &result {
                    Ok(outcome) => self.log(LogLevel::Success, outcome.message.clone()),
                    Err(err) => self.log(LogLevel::Error, err.message.clone()),
                }
                let mut refresh = false;
                self.cleansing.finish_with(result, |_| refresh = true);
                let mut commands = vec![Self::clear_log_later()];
                if refresh {
                    commands.push(Self::dispatch(Message::RefreshDashboard));
                    commands.push(Self::dispatch(Message::RefreshCleansingStats));
                }
                if let Some(cmd) = auth_cmd {
                    commands.push(cmd);
                }
                Command::batch(commands)
            }
            Message::ExportReport(format) => {
                if !self.exports.try_begin(format) {
                    return Command::none();
                }
                let api = api.clone();
                let export_dir = self.config.export_dir.clone();
                Command::perform(
                    async move {
                        let result = workflows::export_report(&api, format, &export_dir).await;
                        Message::ExportFinished { format, result }
                    },
                    |msg| msg,
                )
            }
            Message::ExportFinished { format, result } => {
                let auth_cmd = self.auth_guard(result.as_ref().err(), session);
                match &result {
                    Ok(path) => self.log(
                        LogLevel::Success,
                        format!("{} report saved to {}", format, path.display()),
                    ),
                    Err(err) => self.log(LogLevel::Error, err.message.clone()),
                }
                self.exports.finish(format, result);
                match auth_cmd {
                    Some(cmd) => Command::batch([Self::clear_log_later(), cmd]),
                    None => Self::clear_log_later(),
                }
            }
        }
    }
}
