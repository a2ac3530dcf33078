//! Node REST Client
//!
//! [`LedgerClient`] over the fullnode REST API: `/view` for reads and
//! `/transactions/wait_by_hash` for confirmation.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::GatewayConfig;
use crate::error::TransportError;
use crate::payload::ViewRequest;
use crate::transport::LedgerClient;

/// Long-poll rounds before a confirmation wait gives up
pub const DEFAULT_MAX_WAIT_POLLS: usize = 20;

/// Pause before re-polling a transaction the node does not report as final
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct AptosRestClient {
    base_url: String,
    max_wait_polls: usize,
    poll_interval: Duration,
    http: reqwest::Client,
}

/// Where a submitted transaction stands, according to the node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Committed,
    Failed { vm_status: String },
}

impl AptosRestClient {
    pub fn new(node_url: &str) -> Result<Self, TransportError> {
        let base_url = normalize_base_url(node_url)?;
        Ok(Self {
            base_url,
            max_wait_polls: DEFAULT_MAX_WAIT_POLLS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            http: reqwest::Client::new(),
        })
    }

    /// Client for the node named in a validated config
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            base_url: config.node_url().trim_end_matches('/').to_string(),
            max_wait_polls: DEFAULT_MAX_WAIT_POLLS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_max_wait_polls(mut self, polls: usize) -> Self {
        self.max_wait_polls = polls.max(1);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        let trimmed = path.trim();
        if trimmed.starts_with('/') {
            format!("{}{}", self.base_url, trimmed)
        } else {
            format!("{}/{}", self.base_url, trimmed)
        }
    }

    pub fn view_path() -> &'static str {
        "/view"
    }

    pub fn wait_path(hash: &str) -> String {
        format!("/transactions/wait_by_hash/{}", hash)
    }
}

#[async_trait(?Send)]
impl LedgerClient for AptosRestClient {
    async fn view(&self, request: &ViewRequest) -> Result<Vec<Value>, TransportError> {
        let url = self.endpoint(Self::view_path());
        log::debug!("view {} args={:?}", request.function, request.arguments);

        let response = self
            .http
            .post(url.as_str())
            .json(request)
            .send()
            .await
            .map_err(|error| TransportError::Request { message: error.to_string() })?;

        decode_json_response(response).await
    }

    async fn wait_for_transaction(&self, hash: &str) -> Result<(), TransportError> {
        let url = self.endpoint(&Self::wait_path(hash));

        for attempt in 0..self.max_wait_polls {
            if attempt > 0 {
                sleep(self.poll_interval).await;
            }

            let response = self
                .http
                .get(url.as_str())
                .send()
                .await
                .map_err(|error| TransportError::Request { message: error.to_string() })?;

            if response.status().as_u16() == 404 {
                log::debug!("transaction {} not visible yet (poll {})", hash, attempt + 1);
                continue;
            }

            let body: Value = decode_json_response(response).await?;
            match transaction_status(&body) {
                TransactionStatus::Pending => {
                    log::debug!("transaction {} still pending (poll {})", hash, attempt + 1);
                }
                TransactionStatus::Committed => return Ok(()),
                TransactionStatus::Failed { vm_status } => {
                    return Err(TransportError::Rejected {
                        hash: hash.to_string(),
                        vm_status,
                    });
                }
            }
        }

        Err(TransportError::Timeout { hash: hash.to_string() })
    }
}

// The node answers 404 at once for a hash it has not seen yet.
#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Classify a transaction object returned by the node.
pub fn transaction_status(body: &Value) -> TransactionStatus {
    if body.get("type").and_then(Value::as_str) == Some("pending_transaction") {
        return TransactionStatus::Pending;
    }
    match body.get("success").and_then(Value::as_bool) {
        Some(true) => TransactionStatus::Committed,
        Some(false) => TransactionStatus::Failed {
            vm_status: body
                .get("vm_status")
                .and_then(Value::as_str)
                .unwrap_or("unknown vm status")
                .to_string(),
        },
        None => TransactionStatus::Pending,
    }
}

pub fn format_http_error(status: u16, body: &[u8]) -> TransportError {
    let body = String::from_utf8_lossy(body).trim().to_string();
    let body = if body.is_empty() { "<empty>".to_string() } else { body };
    TransportError::Http { status, body }
}

fn normalize_base_url(base_url: &str) -> Result<String, TransportError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(TransportError::Request {
            message: "node url is empty".to_string(),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

async fn decode_json_response<T>(response: reqwest::Response) -> Result<T, TransportError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|error| TransportError::Request { message: error.to_string() })?;

    if !status.is_success() {
        return Err(format_http_error(status.as_u16(), &bytes));
    }

    serde_json::from_slice::<T>(&bytes).map_err(|error| TransportError::Decode {
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{FunctionId, TodoFunction};
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> AptosRestClient {
        AptosRestClient::new(&format!("{}/v1/", server.url()))
            .expect("rest client")
            .with_max_wait_polls(3)
            .with_poll_interval(Duration::from_millis(1))
    }

    #[test]
    fn endpoint_builder_normalizes_paths() {
        let client = AptosRestClient::new("https://fullnode.testnet.aptoslabs.com/v1/").unwrap();
        assert_eq!(client.endpoint("/view"), "https://fullnode.testnet.aptoslabs.com/v1/view");
        assert_eq!(
            client.endpoint("transactions/wait_by_hash/0x1"),
            "https://fullnode.testnet.aptoslabs.com/v1/transactions/wait_by_hash/0x1"
        );
        assert!(AptosRestClient::new("  ").is_err());
    }

    #[test]
    fn transaction_status_classification() {
        assert_eq!(
            transaction_status(&json!({"type": "pending_transaction", "hash": "0x1"})),
            TransactionStatus::Pending
        );
        assert_eq!(
            transaction_status(&json!({"type": "user_transaction", "success": true})),
            TransactionStatus::Committed
        );
        assert_eq!(
            transaction_status(&json!({"type": "user_transaction", "success": false, "vm_status": "Move abort"})),
            TransactionStatus::Failed { vm_status: "Move abort".into() }
        );
    }

    #[test]
    fn http_error_mapping_preserves_shape() {
        assert_eq!(
            format_http_error(400, b" bad function "),
            TransportError::Http { status: 400, body: "bad function".into() }
        );
        assert_eq!(
            format_http_error(503, b""),
            TransportError::Http { status: 503, body: "<empty>".into() }
        );
    }

    #[tokio::test]
    async fn view_posts_function_and_arguments() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/view")
            .match_body(Matcher::Json(json!({
                "function": "0xabc::todo_list::get_todo_count",
                "type_arguments": [],
                "arguments": ["0x1"],
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"["3"]"#)
            .create_async()
            .await;

        let request = ViewRequest::new(
            FunctionId::todo("0xabc", TodoFunction::GetTodoCount),
            vec![json!("0x1")],
        );
        let result = client_for(&server).view(&request).await.unwrap();

        assert_eq!(result, vec![json!("3")]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn view_surfaces_http_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/view")
            .with_status(400)
            .with_body(r#"{"message":"function not found"}"#)
            .create_async()
            .await;

        let request = ViewRequest::new(FunctionId::todo("0xabc", TodoFunction::GetTodos), vec![]);
        let err = client_for(&server).view(&request).await.unwrap_err();
        assert!(matches!(err, TransportError::Http { status: 400, .. }));
    }

    #[tokio::test]
    async fn wait_resolves_on_committed_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/transactions/wait_by_hash/0xfeed")
            .with_status(200)
            .with_body(r#"{"type":"user_transaction","hash":"0xfeed","success":true,"vm_status":"Executed successfully"}"#)
            .expect(1)
            .create_async()
            .await;

        client_for(&server).wait_for_transaction("0xfeed").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn wait_reports_vm_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/transactions/wait_by_hash/0xbad")
            .with_status(200)
            .with_body(r#"{"type":"user_transaction","success":false,"vm_status":"Move abort in 0xabc::todo_list: E_TODO_NOT_FOUND"}"#)
            .create_async()
            .await;

        let err = client_for(&server).wait_for_transaction("0xbad").await.unwrap_err();
        assert_eq!(
            err,
            TransportError::Rejected {
                hash: "0xbad".into(),
                vm_status: "Move abort in 0xabc::todo_list: E_TODO_NOT_FOUND".into(),
            }
        );
    }

    #[tokio::test]
    async fn wait_times_out_while_pending() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/transactions/wait_by_hash/0xslow")
            .with_status(200)
            .with_body(r#"{"type":"pending_transaction","hash":"0xslow"}"#)
            .expect(3)
            .create_async()
            .await;

        let err = client_for(&server).wait_for_transaction("0xslow").await.unwrap_err();
        assert_eq!(err, TransportError::Timeout { hash: "0xslow".into() });
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn wait_survives_lagging_node() {
        let mut server = mockito::Server::new_async().await;
        let path = "/v1/transactions/wait_by_hash/0xlag";
        let not_found = server.mock("GET", path).with_status(404).expect(2).create_async().await;
        let committed = server
            .mock("GET", path)
            .with_status(200)
            .with_body(r#"{"type":"user_transaction","hash":"0xlag","success":true,"vm_status":"Executed successfully"}"#)
            .expect(1)
            .create_async()
            .await;

        let interval = Duration::from_millis(40);
        let client = client_for(&server).with_poll_interval(interval);
        let started = std::time::Instant::now();

        client.wait_for_transaction("0xlag").await.unwrap();

        assert!(started.elapsed() >= interval * 2, "re-polls were not paced");
        not_found.assert_async().await;
        committed.assert_async().await;
    }

    #[tokio::test]
    async fn wait_treats_not_found_as_pending() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/transactions/wait_by_hash/0xgone")
            .with_status(404)
            .expect(3)
            .create_async()
            .await;

        let err = client_for(&server).wait_for_transaction("0xgone").await.unwrap_err();
        assert!(matches!(err, TransportError::Timeout { .. }));
        mock.assert_async().await;
    }
}
