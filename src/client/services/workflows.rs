use std::path::{Path, PathBuf};

use chrono::Local;
use log::info;

use crate::client::controllers::action::ReportFormat;
use crate::client::models::types::{CleansingOutcome, DetectionOutcome, UploadOutcome};
use crate::client::services::api_client::{ApiClient, ApiError};

/// Reads the selected CSV and posts it as multipart. Malformed or non-CSV
/// content is a server-detected failure surfaced verbatim; the only
/// client-side precondition (a file being selected) is enforced by the
/// upload controller before this is called.
pub async fn upload_csv(api: &ApiClient, path: &Path) -> Result<UploadOutcome, ApiError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::network(format!("could not read {}: {}", path.display(), e)))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.csv".to_string());
    api.upload("/upload", "file", file_name, bytes).await
}

pub async fn run_detection(api: &ApiClient) -> Result<DetectionOutcome, ApiError> {
    api.post_empty("/detect-fraud").await
}

/// Safe to re-invoke: running on already-clean data succeeds with
/// zero-count results rather than erroring.
pub async fn run_cleansing(api: &ApiClient) -> Result<CleansingOutcome, ApiError> {
    api.post_empty("/cleansing/run").await
}

/// Downloads the report through the same authenticated client as every
/// other call (cookie jar + bearer header; no token-in-URL variant) and
/// saves it under the export directory. Success is the saved path.
pub async fn export_report(
    api: &ApiClient,
    format: ReportFormat,
    export_dir: &Path,
) -> Result<PathBuf, ApiError> {
    let bytes = api.download(&format!("/export/{}", format.as_str())).await?;
    tokio::fs::create_dir_all(export_dir)
        .await
        .map_err(|e| ApiError::network(format!("could not create export dir: {}", e)))?;
    let file_name = format!(
        "fraud_report_{}.{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        format.as_str()
    );
    let dest = export_dir.join(file_name);
    tokio::fs::write(&dest, bytes)
        .await
        .map_err(|e| ApiError::network(format!("could not save report: {}", e)))?;
    info!("report saved to {}", dest.display());
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::time::Duration;
    use tempfile::TempDir;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn upload_sends_file_and_decodes_outcome() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/upload")
            .with_status(200)
            .with_body(r#"{"message":"File processed. 42 new records added!","rows":42,"total_rows":50}"#)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("transactions.csv");
        std::fs::write(&csv, "transaction_id,amount\nt1,10.0\n").unwrap();

        let api = client(&server.url());
        let outcome = upload_csv(&api, &csv).await.unwrap();
        assert_eq!(outcome.rows, 42);
        assert_eq!(outcome.total_rows, 50);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn upload_of_missing_file_is_a_local_failure() {
        let api = client("http://127.0.0.1:9");
        let err = upload_csv(&api, Path::new("/no/such/file.csv"))
            .await
            .unwrap_err();
        assert_eq!(err.status, 0);
        assert!(err.message.contains("could not read"));
    }

    #[tokio::test]
    async fn rejected_upload_surfaces_server_error_verbatim() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/upload")
            .with_status(400)
            .with_body(r#"{"error":"Only CSV files are supported"}"#)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("notes.txt");
        std::fs::write(&csv, "not a csv").unwrap();

        let api = client(&server.url());
        let err = upload_csv(&api, &csv).await.unwrap_err();
        assert_eq!(err.message, "Only CSV files are supported");
        assert_eq!(err.status, 400);
    }

    #[tokio::test]
    async fn detection_decodes_counts() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/detect-fraud")
            .with_status(200)
            .with_body(
                r#"{"status":"completed","message":"done","transactions_processed":120,
                    "fraud_detected":4,"duration_seconds":1.25}"#,
            )
            .create_async()
            .await;

        let api = client(&server.url());
        let outcome = run_detection(&api).await.unwrap();
        assert_eq!(outcome.transactions_processed, 120);
        assert_eq!(outcome.fraud_detected, 4);
    }

    #[tokio::test]
    async fn cleansing_on_clean_data_succeeds_with_zero_counts() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/cleansing/run")
            .with_status(200)
            .with_body(
                r#"{"message":"No transactions to cleanse","duplicates_removed":0,
                    "records_normalized":0,"duration_seconds":0}"#,
            )
            .create_async()
            .await;

        let api = client(&server.url());
        let outcome = run_cleansing(&api).await.unwrap();
        assert_eq!(outcome.duplicates_removed, 0);
        assert_eq!(outcome.records_normalized, 0);
    }

    #[tokio::test]
    async fn export_saves_binary_body_locally() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/export/csv")
            .with_status(200)
            .with_body("id,amount\n1,2.0\n")
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let api = client(&server.url());
        let path = export_report(&api, ReportFormat::Csv, dir.path())
            .await
            .unwrap();
        assert!(path.extension().is_some_and(|e| e == "csv"));
        let saved = std::fs::read_to_string(&path).unwrap();
        assert_eq!(saved, "id,amount\n1,2.0\n");
    }

    #[tokio::test]
    async fn export_failure_is_normalized_not_saved() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/export/pdf")
            .with_status(500)
            .with_body(r#"{"error":"Report generation failed"}"#)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let api = client(&server.url());
        let err = export_report(&api, ReportFormat::Pdf, dir.path())
            .await
            .unwrap_err();
        assert_eq!(err.message, "Report generation failed");
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
