pub mod audit_log;
pub mod dashboard;
pub mod logger;
pub mod login;
pub mod onboarding;
pub mod operations;
