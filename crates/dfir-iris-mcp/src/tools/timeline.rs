//! Case timeline event tools

use super::{IrisCall, IrisTool, Tool};
use async_trait::async_trait;
use dfir_iris_core::{cid_query, to_body, IrisClient, Payload, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

case_scoped_reads! {
    base: "/case/timeline/events",
    noun: "Event",
    id: event_id,
    list: ListEvents,
    get: GetEvent,
    delete: DeleteEvent,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddEvent {
    /// Case ID
    pub case_id: i64,
    /// Title of the event
    pub event_title: String,
    /// Date/time of the event (format: YYYY-MM-DDTHH:MM:SS.000)
    pub event_date: String,
    /// Timezone offset (e.g. +00:00, -05:00, +02:00)
    pub event_tz: String,
    /// Event category ID (use dfir_iris_settings_event_categories to list)
    pub event_category_id: i64,
    /// List of asset IDs linked to this event (use empty list [] if none)
    pub event_assets: Vec<i64>,
    /// List of IOC IDs linked to this event (use empty list [] if none)
    pub event_iocs: Vec<i64>,
    /// Event content/description
    pub event_content: Option<String>,
    /// Raw event data
    pub event_raw: Option<String>,
    /// Source of the event
    pub event_source: Option<String>,
    /// Color hex code for display
    pub event_color: Option<String>,
}

#[async_trait]
impl IrisCall for AddEvent {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let body = to_body(self, &["case_id"])?;
        client
            .post(
                "/case/timeline/events/add",
                &cid_query(self.case_id),
                Some(&body),
            )
            .await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateEvent {
    /// Case ID
    pub case_id: i64,
    /// Event ID to update
    pub event_id: i64,
    /// New event title
    pub event_title: Option<String>,
    /// New date/time
    pub event_date: Option<String>,
    /// New content
    pub event_content: Option<String>,
    /// New raw data
    pub event_raw: Option<String>,
    /// New source
    pub event_source: Option<String>,
    /// New category ID
    pub event_category_id: Option<i64>,
}

#[async_trait]
impl IrisCall for UpdateEvent {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/case/timeline/events/update/{}", self.event_id);
        let body = to_body(self, &["case_id", "event_id"])?;
        client.post(&path, &cid_query(self.case_id), Some(&body)).await
    }
}

pub(super) fn tools(client: &IrisClient) -> Vec<Box<dyn Tool>> {
    vec![
        IrisTool::<ListEvents>::boxed(
            client,
            "dfir_iris_timeline_list",
            "List all timeline events in a case",
        ),
        IrisTool::<GetEvent>::boxed(
            client,
            "dfir_iris_timeline_get",
            "Get details of a specific timeline event",
        ),
        IrisTool::<AddEvent>::boxed(
            client,
            "dfir_iris_timeline_add",
            "Add a new event to the case timeline",
        ),
        IrisTool::<UpdateEvent>::boxed(
            client,
            "dfir_iris_timeline_update",
            "Update an existing timeline event",
        ),
        IrisTool::<DeleteEvent>::boxed(
            client,
            "dfir_iris_timeline_delete",
            "Delete a timeline event",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfir_iris_core::Config;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_add_keeps_empty_link_lists() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/case/timeline/events/add"))
            .and(query_param("cid", "1"))
            .and(body_json(json!({
                "event_title": "Initial access",
                "event_date": "2024-03-01T08:15:00.000",
                "event_tz": "+00:00",
                "event_category_id": 5,
                "event_assets": [],
                "event_iocs": [12]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "",
                "data": {"event_id": 3}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = IrisClient::new(&Config::new(server.uri(), "k")).unwrap();
        let args = AddEvent {
            case_id: 1,
            event_title: "Initial access".to_string(),
            event_date: "2024-03-01T08:15:00.000".to_string(),
            event_tz: "+00:00".to_string(),
            event_category_id: 5,
            event_assets: vec![],
            event_iocs: vec![12],
            event_content: None,
            event_raw: None,
            event_source: None,
            event_color: None,
        };

        args.call(&client).await.unwrap();
    }
}
