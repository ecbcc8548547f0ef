use std::env;
use std::path::PathBuf;

/// Client-side configuration, loaded from the environment with defaults
/// matching the backend's development setup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub dashboard_page_size: u32,
    pub audit_page_size: u32,
    pub request_timeout_secs: u64,
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string()),
            dashboard_page_size: env::var("DASHBOARD_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            audit_page_size: env::var("AUDIT_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            data_dir: env::var("FRAUDLENS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            export_dir: env::var("FRAUDLENS_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("exports")),
        }
    }
}
