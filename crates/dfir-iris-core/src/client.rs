//! HTTP client for the DFIR-IRIS REST API
//!
//! `get` and `post` share one pipeline: build the URL, attach the bearer
//! credential, send, read the whole body, then apply the envelope contract.
//! Nothing is retried; several endpoints mutate state.

use crate::config::Config;
use crate::envelope;
use crate::error::{ApiError, Error, Result};
use crate::mapper::Query;
use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde_json::value::RawValue;
use serde_json::Value;

/// Result of a successful call
#[derive(Debug, Clone)]
pub enum Payload {
    /// `data` of a success envelope exactly as the server wrote it
    /// (`null` when the server sent none)
    Json(Box<RawValue>),
    /// Body of a success response that was not an envelope, verbatim
    Raw(Bytes),
}

impl Payload {
    /// Text form handed back to tool callers
    pub fn to_text(&self) -> String {
        match self {
            Payload::Json(raw) => raw.get().to_string(),
            Payload::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    pub fn as_raw_json(&self) -> Option<&RawValue> {
        match self {
            Payload::Json(raw) => Some(raw),
            Payload::Raw(_) => None,
        }
    }

    /// Parse the payload into a generic JSON value
    pub fn to_value(&self) -> serde_json::Result<Value> {
        match self {
            Payload::Json(raw) => serde_json::from_str(raw.get()),
            Payload::Raw(bytes) => serde_json::from_slice(bytes),
        }
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Payload::Json(a), Payload::Json(b)) => a.get() == b.get(),
            (Payload::Raw(a), Payload::Raw(b)) => a == b,
            _ => false,
        }
    }
}

/// Stateless DFIR-IRIS client
///
/// Cloning is cheap and clones share the connection pool. Dropping a pending
/// `get`/`post` future aborts the request, so callers bound latency with
/// `tokio::time::timeout` or `tokio::select!`.
#[derive(Clone)]
pub struct IrisClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IrisClient {
    /// Build the client and its transport once; the transport is never mutated afterwards
    pub fn new(config: &Config) -> Result<Self> {
        if !config.verify_tls {
            tracing::warn!(
                base_url = %config.base_url,
                "TLS certificate verification is disabled"
            );
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("dfir-iris-mcp/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| Error::config(format!("building HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with optional query parameters
    pub async fn get(&self, path: &str, query: &Query) -> Result<Payload> {
        self.execute(Method::GET, path, query, None).await
    }

    /// POST `path` with an optional JSON body
    pub async fn post<B>(&self, path: &str, query: &Query, body: Option<&B>) -> Result<Payload>
    where
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| Error::request(format!("serializing request body: {}", e)))?;
        self.execute(Method::POST, path, query, body).await
    }

    /// POST `path` without a body
    pub async fn post_empty(&self, path: &str, query: &Query) -> Result<Payload> {
        self.execute(Method::POST, path, query, None).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<Vec<u8>>,
    ) -> Result<Payload> {
        let url = self.build_url(path, query)?;
        tracing::debug!(%method, path, "sending DFIR-IRIS request");

        let mut request = self
            .http
            .request(method.clone(), url)
            .bearer_auth(&self.api_key);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(%method, path, status = status.as_u16(), len = bytes.len(), "DFIR-IRIS response");

        interpret(status, bytes)
    }

    fn build_url(&self, path: &str, query: &Query) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url =
            Url::parse(&raw).map_err(|e| Error::request(format!("invalid URL {:?}: {}", raw, e)))?;

        if !query.is_empty() {
            // Pairs already in the path are kept unless the caller sets the same key.
            let mut merged: Query = url.query_pairs().into_owned().collect();
            merged.extend(query.iter().map(|(k, v)| (k.clone(), v.clone())));
            url.query_pairs_mut().clear().extend_pairs(&merged);
        }

        Ok(url)
    }
}

/// Apply the envelope contract to a complete response
fn interpret(status: StatusCode, body: Bytes) -> Result<Payload> {
    let http_status = status.as_u16();

    let envelope = match envelope::decode(&body) {
        Ok(envelope) => envelope,
        Err(err) if http_status >= 400 => {
            tracing::debug!(error = %err, http_status, "error response is not an envelope");
            return Err(ApiError {
                http_status,
                status: String::new(),
                message: String::from_utf8_lossy(&body).into_owned(),
            }
            .into());
        }
        Err(err) => {
            tracing::debug!(error = %err, http_status, "passing non-envelope body through");
            return Ok(Payload::Raw(body));
        }
    };

    if !envelope.is_success() {
        let message = envelope.failure_message();
        tracing::warn!(http_status, status = %envelope.status, %message, "DFIR-IRIS reported failure");
        return Err(ApiError {
            http_status,
            status: envelope.status,
            message,
        }
        .into());
    }

    Ok(Payload::Json(
        envelope.data.unwrap_or_else(|| RawValue::NULL.to_owned()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{cid_query, to_body};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> IrisClient {
        IrisClient::new(&Config::new(server.uri(), "test-api-key")).unwrap()
    }

    async fn mount(server: &MockServer, verb: &str, route: &str, response: ResponseTemplate) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_success_envelope_returns_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/case/ioc/list"))
            .and(query_param("cid", "1"))
            .and(header("Authorization", "Bearer test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "",
                "data": {"id": 1}
            })))
            .mount(&server)
            .await;

        let payload = client_for(&server)
            .get("/case/ioc/list", &cid_query(1))
            .await
            .unwrap();
        assert_eq!(payload.to_text(), r#"{"id":1}"#);
    }

    #[tokio::test]
    async fn test_error_envelope_with_null_data() {
        let server = MockServer::start().await;
        mount(
            &server,
            "GET",
            "/alerts/99",
            ResponseTemplate::new(404).set_body_json(json!({
                "status": "error",
                "message": "not found",
                "data": null
            })),
        )
        .await;

        let err = client_for(&server)
            .get("/alerts/99", &Query::new())
            .await
            .unwrap_err();
        let api = err.as_api().expect("api error");
        assert_eq!(api.http_status, 404);
        assert_eq!(api.status, "error");
        assert_eq!(api.message, "not found");
    }

    #[tokio::test]
    async fn test_error_envelope_on_200_appends_data() {
        let server = MockServer::start().await;
        mount(
            &server,
            "POST",
            "/case/ioc/add",
            ResponseTemplate::new(200).set_body_json(json!({
                "status": "error",
                "message": "bad input",
                "data": "field X required"
            })),
        )
        .await;

        let err = client_for(&server)
            .post("/case/ioc/add", &Query::new(), Some(&json!({"ioc_value": "x"})))
            .await
            .unwrap_err();
        let api = err.as_api().expect("api error");
        assert_eq!(api.http_status, 200);
        assert_eq!(api.message, "bad input - field X required");
    }

    #[tokio::test]
    async fn test_non_json_error_page_is_api_error() {
        let server = MockServer::start().await;
        let page = "<html><body>502 Bad Gateway</body></html>";
        mount(
            &server,
            "GET",
            "/api/ping",
            ResponseTemplate::new(502).set_body_string(page),
        )
        .await;

        let err = client_for(&server)
            .get("/api/ping", &Query::new())
            .await
            .unwrap_err();
        let api = err.as_api().expect("api error");
        assert_eq!(api.http_status, 502);
        assert_eq!(api.status, "");
        assert_eq!(api.message, page);
    }

    #[tokio::test]
    async fn test_non_json_success_is_raw_payload() {
        let server = MockServer::start().await;
        mount(
            &server,
            "GET",
            "/case/export",
            ResponseTemplate::new(200).set_body_string("plain text export"),
        )
        .await;

        let payload = client_for(&server)
            .get("/case/export", &Query::new())
            .await
            .unwrap();
        assert_eq!(payload, Payload::Raw(Bytes::from_static(b"plain text export")));
        assert_eq!(payload.to_text(), "plain text export");
    }

    #[tokio::test]
    async fn test_post_sends_json_body_with_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/manage/cases/update/4"))
            .and(header("Content-Type", "application/json"))
            .and(header("Authorization", "Bearer test-api-key"))
            .and(body_json(json!({"case_name": "renamed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "Case updated",
                "data": {"case_id": 4}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let args = json!({"case_id": 4, "case_name": "renamed", "case_soc_id": null});
        let body = to_body(&args, &["case_id"]).unwrap();
        let payload = client_for(&server)
            .post("/manage/cases/update/4", &Query::new(), Some(&body))
            .await
            .unwrap();
        assert_eq!(payload.to_value().unwrap(), json!({"case_id": 4}));
    }

    #[tokio::test]
    async fn test_bodyless_requests_omit_content_type() {
        let server = MockServer::start().await;
        mount(
            &server,
            "POST",
            "/manage/cases/close/2",
            ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "",
                "data": null
            })),
        )
        .await;

        let payload = client_for(&server)
            .post_empty("/manage/cases/close/2", &Query::new())
            .await
            .unwrap();
        assert_eq!(payload.to_text(), "null");

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(received[0].headers.get("content-type").is_none());
        assert!(received[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_query_is_form_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/manage/cases/filter"))
            .and(query_param("case_name", "phishing & co/2024"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "",
                "data": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = Query::from([
            ("case_name".to_string(), "phishing & co/2024".to_string()),
            ("page".to_string(), "1".to_string()),
        ]);
        let payload = client_for(&server)
            .get("/manage/cases/filter", &query)
            .await
            .unwrap();
        assert_eq!(payload.to_value().unwrap(), json!([]));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Nothing listens on the discard port.
        let client = IrisClient::new(&Config::new("http://127.0.0.1:9", "k")).unwrap();
        let err = client.get("/api/ping", &Query::new()).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn test_malformed_url_is_request_error() {
        let client = IrisClient::new(&Config::new("not a url", "k")).unwrap();
        let err = client.get("/api/ping", &Query::new()).await.unwrap_err();
        assert!(matches!(err, Error::Request(_)));
    }

    #[tokio::test]
    async fn test_dropping_future_aborts_request() {
        let server = MockServer::start().await;
        mount(
            &server,
            "GET",
            "/api/versions",
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(10))
                .set_body_json(json!({"status": "success", "message": "", "data": {}})),
        )
        .await;

        let client = client_for(&server);
        let started = std::time::Instant::now();
        let outcome = tokio::time::timeout(
            Duration::from_millis(200),
            client.get("/api/versions", &Query::new()),
        )
        .await;
        assert!(outcome.is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_concurrent_calls_do_not_interfere() {
        let server = MockServer::start().await;
        for id in 0..16 {
            mount(
                &server,
                "GET",
                &format!("/case/assets/{}", id),
                ResponseTemplate::new(200).set_body_json(json!({
                    "status": "success",
                    "message": "",
                    "data": {"asset_id": id}
                })),
            )
            .await;
        }

        let client = client_for(&server);
        let handles: Vec<_> = (0..16)
            .map(|id| {
                let client = client.clone();
                tokio::spawn(async move {
                    let payload = client
                        .get(&format!("/case/assets/{}", id), &cid_query(1))
                        .await
                        .unwrap();
                    (id, payload)
                })
            })
            .collect();

        for handle in handles {
            let (id, payload) = handle.await.unwrap();
            assert_eq!(payload.to_value().unwrap(), json!({"asset_id": id}));
        }
    }

    #[test]
    fn test_build_url_merges_existing_query() {
        let client = IrisClient::new(&Config::new("https://iris.local/", "k")).unwrap();
        let url = client
            .build_url("/case/ioc/list?cid=1&x=y", &cid_query(5))
            .unwrap();
        assert_eq!(url.as_str(), "https://iris.local/case/ioc/list?cid=5&x=y");

        let url = client.build_url("/api/ping", &Query::new()).unwrap();
        assert_eq!(url.as_str(), "https://iris.local/api/ping");
    }

    #[test]
    fn test_interpret_success_without_data() {
        let payload = interpret(
            StatusCode::OK,
            Bytes::from_static(br#"{"status":"success","message":"pong"}"#),
        )
        .unwrap();
        assert_eq!(payload.as_raw_json().map(RawValue::get), Some("null"));
    }

    #[test]
    fn test_success_data_is_relayed_verbatim() {
        let body = br#"{"status":"success","message":"","data":{"n":123456789012345678901234567890,"f":1.10}}"#;
        let payload = interpret(StatusCode::OK, Bytes::from_static(body)).unwrap();
        assert_eq!(
            payload.to_text(),
            r#"{"n":123456789012345678901234567890,"f":1.10}"#
        );
    }

    #[test]
    fn test_non_json_body_above_599_is_api_error() {
        let status = StatusCode::from_u16(600).unwrap();
        let err = interpret(status, Bytes::from_static(b"gateway exploded")).unwrap_err();
        let api = err.as_api().expect("api error");
        assert_eq!(api.http_status, 600);
        assert_eq!(api.message, "gateway exploded");
    }

    #[test]
    fn test_client_builds_with_tls_verification_disabled() {
        let config = Config::new("https://iris.internal:8443", "k").with_verify_tls(false);
        assert!(!config.verify_tls);

        let client = IrisClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "https://iris.internal:8443");
        let url = client.build_url("/api/ping", &Query::new()).unwrap();
        assert_eq!(url.as_str(), "https://iris.internal:8443/api/ping");
    }
}
