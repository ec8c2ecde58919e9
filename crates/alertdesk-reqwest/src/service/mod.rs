//! Alert provider implementation.
//!
//! This module implements the [`AlertProvider`] trait for [`ReqwestClient`].

use alertdesk_core::{
    ActionReply, Alert, AlertFilter, AlertId, AlertProvider, AutomatedResponse, NewAlert,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::connect::{ReqwestClient, TRACING_TARGET};
use crate::error::Error;

impl ReqwestClient {
    /// Sends a request and decodes a JSON body from a success response.
    async fn send_json<T>(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> alertdesk_core::Result<T>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(
            target: TRACING_TARGET,
            method = %method,
            url = %url,
            has_body = body.is_some(),
            "Sending request"
        );

        let mut request: RequestBuilder = self.http().request(method, url);
        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response = request.send().await.map_err(Error::from)?;
        decode_json(response).await
    }

    /// Triggers a per-alert action endpoint.
    async fn post_action(
        &self,
        prefix: &str,
        alert_id: AlertId,
    ) -> alertdesk_core::Result<ActionReply> {
        let url = self.alert_url(prefix, alert_id)?;
        self.send_json(Method::POST, url, None).await
    }
}

/// Rejects non-success statuses, then decodes the body.
async fn decode_json<T>(response: Response) -> alertdesk_core::Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        tracing::debug!(
            target: TRACING_TARGET,
            status_code = status.as_u16(),
            url = %response.url(),
            "Backend returned non-success status"
        );
        return Err(alertdesk_core::Error::from_status(status.as_u16()));
    }

    let bytes = response.bytes().await.map_err(Error::from)?;
    let value = serde_json::from_slice(&bytes).map_err(Error::from)?;
    Ok(value)
}

#[async_trait::async_trait]
impl AlertProvider for ReqwestClient {
    async fn process_alert(&self, alert: &NewAlert) -> alertdesk_core::Result<Alert> {
        let url = self.endpoint("process_alert/")?;
        let body = serde_json::to_vec(alert).map_err(Error::Serde)?;
        self.send_json(Method::POST, url, Some(body)).await
    }

    async fn automated_response(
        &self,
        alert_id: AlertId,
    ) -> alertdesk_core::Result<AutomatedResponse> {
        let url = self.alert_url("automated_response", alert_id)?;
        self.send_json(Method::GET, url, None).await
    }

    async fn list_alerts(&self, filter: &AlertFilter) -> alertdesk_core::Result<Vec<Alert>> {
        let url = self.alerts_url(filter)?;
        self.send_json(Method::GET, url, None).await
    }

    async fn fetch_alert(&self, alert_id: AlertId) -> alertdesk_core::Result<Alert> {
        let url = self.alert_url("alert", alert_id)?;
        self.send_json(Method::GET, url, None).await
    }

    async fn create_ticket(&self, alert_id: AlertId) -> alertdesk_core::Result<ActionReply> {
        self.post_action("create_ticket", alert_id).await
    }

    async fn send_slack_alert(&self, alert_id: AlertId) -> alertdesk_core::Result<ActionReply> {
        self.post_action("slack_alert", alert_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use alertdesk_core::{ErrorKind, Severity};
    use axum::extract::{Path, Query, State};
    use axum::http::{StatusCode, Uri};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use super::*;
    use crate::ReqwestConfig;

    /// Requests seen by the stub backend, as `METHOD path?query`.
    type RequestLog = Arc<Mutex<Vec<String>>>;

    fn record(log: &RequestLog, method: &str, uri: &Uri) {
        let target = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_owned())
            .unwrap_or_default();
        log.lock().unwrap().push(format!("{method} {target}"));
    }

    async fn process_alert(
        State(log): State<RequestLog>,
        uri: Uri,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        record(&log, "POST", &uri);
        let message = body["message"].as_str().unwrap_or_default().to_owned();
        let (severity, ticket) = if message.contains("breach") {
            ("Critical", json!("SEC-7"))
        } else {
            ("Low", Value::Null)
        };

        Json(json!({
            "id": 7,
            "source": body["source"],
            "severity": severity,
            "message": message,
            "created_at": "2024-03-01T10:00:00",
            "jira_ticket_id": ticket,
        }))
    }

    async fn automated_response(
        State(log): State<RequestLog>,
        uri: Uri,
        Path(id): Path<i64>,
    ) -> Json<Value> {
        record(&log, "GET", &uri);
        Json(json!({ "response": format!("Isolate the host behind alert {id}") }))
    }

    async fn list_alerts(
        State(log): State<RequestLog>,
        uri: Uri,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        record(&log, "GET", &uri);
        let severity = params
            .get("severity")
            .cloned()
            .unwrap_or_else(|| "Medium".to_owned());

        Json(json!([
            { "id": 1, "source": "web_interface", "severity": severity, "message": "first" },
            { "id": 2, "source": "web_interface", "severity": severity, "message": "second",
              "jira_ticket_id": "SEC-2" },
        ]))
    }

    async fn fetch_alert(
        State(log): State<RequestLog>,
        uri: Uri,
        Path(id): Path<i64>,
    ) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
        record(&log, "GET", &uri);
        if id == 404 {
            return Err((
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Alert not found" })),
            ));
        }
        Ok(Json(json!({ "id": id, "severity": "High", "message": "stored" })))
    }

    async fn create_ticket(
        State(log): State<RequestLog>,
        uri: Uri,
        Path(id): Path<i64>,
    ) -> Json<Value> {
        record(&log, "POST", &uri);
        Json(json!({ "message": format!("JIRA ticket created: SEC-{id}") }))
    }

    async fn slack_alert(State(log): State<RequestLog>, uri: Uri) -> (StatusCode, &'static str) {
        record(&log, "POST", &uri);
        (StatusCode::INTERNAL_SERVER_ERROR, "slack is down")
    }

    async fn garbage(State(log): State<RequestLog>, uri: Uri) -> &'static str {
        record(&log, "GET", &uri);
        "<html>not json</html>"
    }

    /// Starts a stub backend on an ephemeral port.
    async fn spawn_backend() -> (ReqwestClient, RequestLog) {
        let log = RequestLog::default();
        let router = Router::new()
            .route("/process_alert/", post(process_alert))
            .route("/automated_response/{id}", get(automated_response))
            .route("/alerts/", get(list_alerts))
            .route("/alert/{id}", get(fetch_alert))
            .route("/create_ticket/{id}", post(create_ticket))
            .route("/slack_alert/{id}", post(slack_alert))
            .route("/garbage/alert/{id}", get(garbage))
            .with_state(log.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let base_url = Url::parse(&format!("http://{addr}/")).unwrap();
        let client = ReqwestClient::new(ReqwestConfig::new(base_url)).unwrap();
        (client, log)
    }

    #[tokio::test]
    async fn process_alert_posts_json_body() {
        let (client, log) = spawn_backend().await;

        let alert = client
            .process_alert(&NewAlert::new("possible data breach on db-2"))
            .await
            .unwrap();

        assert_eq!(alert.id, AlertId::new(7));
        assert_eq!(alert.severity, Severity::Critical);
        assert_eq!(alert.source, "web_interface");
        assert_eq!(alert.ticket(), Some("SEC-7"));
        assert_eq!(log.lock().unwrap().as_slice(), ["POST /process_alert/"]);
    }

    #[tokio::test]
    async fn automated_response_uses_alert_path() {
        let (client, log) = spawn_backend().await;

        let reply = client.automated_response(AlertId::new(7)).await.unwrap();

        assert_eq!(reply.response, "Isolate the host behind alert 7");
        assert_eq!(log.lock().unwrap().as_slice(), ["GET /automated_response/7"]);
    }

    #[tokio::test]
    async fn list_alerts_sends_filter_as_query() {
        let (client, log) = spawn_backend().await;

        let alerts = client.list_alerts(&AlertFilter::new()).await.unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].severity, Severity::Medium);

        let filter = AlertFilter::new().with_severity(Severity::High);
        let alerts = client.list_alerts(&filter).await.unwrap();
        assert!(alerts.iter().all(|alert| alert.severity == Severity::High));
        assert_eq!(alerts[1].ticket(), Some("SEC-2"));

        let log = log.lock().unwrap();
        assert_eq!(log[0], "GET /alerts/?");
        assert_eq!(log[1], "GET /alerts/?severity=High");
    }

    #[tokio::test]
    async fn fetch_alert_maps_not_found() {
        let (client, _log) = spawn_backend().await;

        let alert = client.fetch_alert(AlertId::new(5)).await.unwrap();
        assert_eq!(alert.message, "stored");

        let error = client.fetch_alert(AlertId::new(404)).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::NotFound);
        assert_eq!(error.status_code, Some(404));
    }

    #[tokio::test]
    async fn actions_return_display_messages() {
        let (client, log) = spawn_backend().await;

        let reply = client.create_ticket(AlertId::new(3)).await.unwrap();
        assert_eq!(reply.message, "JIRA ticket created: SEC-3");

        let error = client.send_slack_alert(AlertId::new(3)).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::ExternalError);
        assert_eq!(error.status_code, Some(500));

        assert_eq!(
            log.lock().unwrap().as_slice(),
            ["POST /create_ticket/3", "POST /slack_alert/3"]
        );
    }

    #[tokio::test]
    async fn invalid_json_is_a_serialization_error() {
        let (client, _log) = spawn_backend().await;

        let url = client.alert_url("garbage/alert", AlertId::new(1)).unwrap();
        let error = client
            .send_json::<Alert>(Method::GET, url, None)
            .await
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::Serialization);
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base_url = Url::parse(&format!("http://{addr}/")).unwrap();
        let client = ReqwestClient::new(ReqwestConfig::new(base_url)).unwrap();

        let error = client.create_ticket(AlertId::new(1)).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::NetworkError);
    }
}
