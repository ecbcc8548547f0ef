use serde::{Deserialize, Serialize};

/// Authenticated user as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response of `/auth/login` and `/auth/register`. The access token may be
/// absent when the server relies on the httpOnly cookie alone.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardStats {
    pub total_transactions: u64,
    pub fraud_detected: u64,
    pub pending_review: u64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub amount: f64,
    pub merchant: String,
    pub status: String,
    #[serde(default)]
    pub fraud_score: f64,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default)]
    pub is_fraud: bool,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionsPage {
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub total: u64,
}

/// Combined dashboard payload: only materialized once both underlying
/// requests have resolved.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditEntry {
    pub action: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditPage {
    pub logs: Vec<AuditEntry>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadOutcome {
    pub message: String,
    pub rows: u64,
    #[serde(default)]
    pub total_rows: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectionOutcome {
    #[serde(default)]
    pub status: Option<String>,
    pub message: String,
    pub transactions_processed: u64,
    pub fraud_detected: u64,
    #[serde(default)]
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CleansingOutcome {
    pub message: String,
    pub duplicates_removed: u64,
    pub records_normalized: u64,
    #[serde(default)]
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CleansingStats {
    pub total_transactions: u64,
    pub duplicates_count: u64,
    #[serde(default)]
    pub last_cleansed: Option<String>,
}

/// Profile collected by the first-run onboarding form; persisted locally,
/// never sent to the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub industry: String,
}
