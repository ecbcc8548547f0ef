use crate::client::models::types::{
    AuditEntry, AuditPage, CleansingStats, DashboardData, DashboardStats, TransactionsPage,
};
use crate::client::services::api_client::{ApiClient, ApiError};

/// Dashboard payload: aggregate stats and the first transactions page,
/// fetched as two independent calls. The result only materializes when both
/// resolve; either failure fails the whole load, so a fully empty dashboard
/// is shown instead of a misleading partial one.
pub async fn load_dashboard(api: &ApiClient, page_size: u32) -> Result<DashboardData, ApiError> {
    let transactions_path = format!("/dashboard/transactions?page=1&page_size={}", page_size);
    let stats = api.get::<DashboardStats>("/dashboard/stats");
    let transactions = api.get::<TransactionsPage>(&transactions_path);
    let (stats, page) = tokio::try_join!(stats, transactions)?;
    Ok(DashboardData {
        stats,
        transactions: page.transactions,
    })
}

pub async fn load_audit_logs(api: &ApiClient, page_size: u32) -> Result<Vec<AuditEntry>, ApiError> {
    let page: AuditPage = api
        .get(&format!("/audit-log?page=1&page_size={}", page_size))
        .await?;
    Ok(page.logs)
}

pub async fn load_cleansing_stats(api: &ApiClient) -> Result<CleansingStats, ApiError> {
    api.get("/cleansing/stats").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::time::Duration;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(5)).unwrap()
    }

    const STATS_BODY: &str = r#"{
        "total_transactions": 120,
        "fraud_detected": 4,
        "pending_review": 9,
        "total_amount": 15000.5
    }"#;

    #[tokio::test]
    async fn dashboard_combines_stats_and_first_page() {
        let mut server = Server::new_async().await;
        let _stats = server
            .mock("GET", "/dashboard/stats")
            .with_status(200)
            .with_body(STATS_BODY)
            .create_async()
            .await;
        let _txns = server
            .mock("GET", "/dashboard/transactions?page=1&page_size=10")
            .with_status(200)
            .with_body(
                r#"{"transactions":[{"transaction_id":"t1","amount":12.5,"merchant":"Acme",
                    "status":"pending","fraud_score":0.1,"risk_score":0.2,"is_fraud":false,
                    "date":"2026-01-01T00:00:00"}],"total":1}"#,
            )
            .create_async()
            .await;

        let api = client(&server.url());
        let data = load_dashboard(&api, 10).await.unwrap();
        assert_eq!(data.stats.total_transactions, 120);
        assert_eq!(data.transactions.len(), 1);
        assert_eq!(data.transactions[0].merchant, "Acme");
    }

    #[tokio::test]
    async fn dashboard_fails_whole_when_one_call_fails() {
        let mut server = Server::new_async().await;
        let _stats = server
            .mock("GET", "/dashboard/stats")
            .with_status(200)
            .with_body(STATS_BODY)
            .create_async()
            .await;
        let _txns = server
            .mock("GET", "/dashboard/transactions?page=1&page_size=10")
            .with_status(500)
            .with_body(r#"{"error":"Failed to fetch transactions"}"#)
            .create_async()
            .await;

        let api = client(&server.url());
        let err = load_dashboard(&api, 10).await.unwrap_err();
        assert_eq!(err.message, "Failed to fetch transactions");
        assert_eq!(err.status, 500);
    }

    #[tokio::test]
    async fn audit_logs_unwrap_the_page() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/audit-log?page=1&page_size=20")
            .with_status(200)
            .with_body(
                r#"{"logs":[{"action":"File Upload Success: a.csv","transaction_id":null,
                    "details":"Successfully uploaded 42 new transaction records.",
                    "user":"a@b.com","timestamp":"2026-01-02 10:00:00"}],"total":1}"#,
            )
            .create_async()
            .await;

        let api = client(&server.url());
        let logs = load_audit_logs(&api, 20).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].action.starts_with("File Upload Success"));
    }

    #[tokio::test]
    async fn cleansing_stats_decode() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/cleansing/stats")
            .with_status(200)
            .with_body(
                r#"{"total_transactions":120,"duplicates_count":3,"last_cleansed":null}"#,
            )
            .create_async()
            .await;

        let api = client(&server.url());
        let stats = load_cleansing_stats(&api).await.unwrap();
        assert_eq!(stats.duplicates_count, 3);
        assert!(stats.last_cleansed.is_none());
    }
}
