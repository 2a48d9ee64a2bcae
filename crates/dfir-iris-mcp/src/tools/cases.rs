//! Case management tools

use super::{IrisCall, IrisTool, StaticGetTool, Tool};
use async_trait::async_trait;
use dfir_iris_core::{cid_query, to_body, to_query, IrisClient, Payload, Query, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FilterCases {
    /// Filter by case name (substring match)
    pub case_name: Option<String>,
    /// Filter by customer ID
    pub case_customer: Option<i64>,
    /// Filter by case state ID
    pub case_state: Option<i64>,
    /// Page number for pagination
    pub page: Option<i64>,
    /// Results per page
    pub per_page: Option<i64>,
    /// Sort field
    pub sort: Option<String>,
}

#[async_trait]
impl IrisCall for FilterCases {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        client.get("/manage/cases/filter", &to_query(self, &[])?).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddCase {
    /// Name of the case
    pub case_name: String,
    /// Customer ID to associate with the case
    pub case_customer: i64,
    /// Case description
    pub case_description: Option<String>,
    /// SOC ticket ID
    pub case_soc_id: Option<String>,
    /// Classification ID
    pub classification_id: Option<i64>,
    /// Case template ID to apply
    pub case_template_id: Option<i64>,
}

#[async_trait]
impl IrisCall for AddCase {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let body = to_body(self, &[])?;
        client.post("/manage/cases/add", &Query::new(), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateCase {
    /// ID of the case to update
    pub case_id: i64,
    /// New case name
    pub case_name: Option<String>,
    /// New case description
    pub case_description: Option<String>,
    /// New customer ID
    pub case_customer: Option<i64>,
    /// New SOC ticket ID
    pub case_soc_id: Option<String>,
    /// New classification ID
    pub classification_id: Option<i64>,
    /// New state ID
    pub state_id: Option<i64>,
}

#[async_trait]
impl IrisCall for UpdateCase {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/manage/cases/update/{}", self.case_id);
        let body = to_body(self, &["case_id"])?;
        client.post(&path, &Query::new(), Some(&body)).await
    }
}

/// Case lifecycle transition addressed only by ID
#[derive(Debug, Clone, Copy)]
pub enum CaseAction {
    Delete,
    Close,
    Reopen,
}

impl CaseAction {
    fn segment(self) -> &'static str {
        match self {
            CaseAction::Delete => "delete",
            CaseAction::Close => "close",
            CaseAction::Reopen => "reopen",
        }
    }
}

macro_rules! case_action {
    ($name:ident, $action:expr, $doc:literal) => {
        #[derive(Debug, Serialize, Deserialize, JsonSchema)]
        pub struct $name {
            #[doc = $doc]
            pub case_id: i64,
        }

        #[async_trait]
        impl IrisCall for $name {
            async fn call(&self, client: &IrisClient) -> Result<Payload> {
                let path = format!("/manage/cases/{}/{}", $action.segment(), self.case_id);
                client.post_empty(&path, &Query::new()).await
            }
        }
    };
}

case_action!(DeleteCase, CaseAction::Delete, "ID of the case to delete");
case_action!(CloseCase, CaseAction::Close, "ID of the case to close");
case_action!(ReopenCase, CaseAction::Reopen, "ID of the case to reopen");

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateCaseSummary {
    /// Case ID
    pub case_id: i64,
    /// New case summary text (supports markdown)
    pub case_summary: String,
}

#[async_trait]
impl IrisCall for UpdateCaseSummary {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let body = json!({ "case_summary": self.case_summary });
        client
            .post("/case/summary/update", &cid_query(self.case_id), Some(&body))
            .await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExportCase {
    /// Case ID to export
    pub case_id: i64,
}

#[async_trait]
impl IrisCall for ExportCase {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        client.get("/case/export", &cid_query(self.case_id)).await
    }
}

pub(super) fn tools(client: &IrisClient) -> Vec<Box<dyn Tool>> {
    vec![
        StaticGetTool::boxed(
            client,
            "dfir_iris_cases_list",
            "List all cases in DFIR-IRIS",
            "/manage/cases/list",
        ),
        IrisTool::<FilterCases>::boxed(
            client,
            "dfir_iris_cases_filter",
            "Filter cases with optional search criteria",
        ),
        IrisTool::<AddCase>::boxed(client, "dfir_iris_cases_add", "Create a new case"),
        IrisTool::<UpdateCase>::boxed(client, "dfir_iris_cases_update", "Update an existing case"),
        IrisTool::<DeleteCase>::boxed(
            client,
            "dfir_iris_cases_delete",
            "Delete a case (irreversible)",
        ),
        IrisTool::<CloseCase>::boxed(client, "dfir_iris_cases_close", "Close a case"),
        IrisTool::<ReopenCase>::boxed(
            client,
            "dfir_iris_cases_reopen",
            "Reopen a previously closed case",
        ),
        IrisTool::<UpdateCaseSummary>::boxed(
            client,
            "dfir_iris_cases_summary_update",
            "Update the summary/description of a case",
        ),
        IrisTool::<ExportCase>::boxed(client, "dfir_iris_cases_export", "Export a case as JSON"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfir_iris_core::Config;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ok(data: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "",
            "data": data
        }))
    }

    #[tokio::test]
    async fn test_update_keeps_case_id_out_of_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/manage/cases/update/12"))
            .and(body_json(json!({"case_description": "", "state_id": 0})))
            .respond_with(ok(json!({"case_id": 12})))
            .expect(1)
            .mount(&server)
            .await;

        let client = IrisClient::new(&Config::new(server.uri(), "k")).unwrap();
        let args: UpdateCase = serde_json::from_value(json!({
            "case_id": 12,
            "case_description": "",
            "state_id": 0
        }))
        .unwrap();

        let payload = args.call(&client).await.unwrap();
        assert_eq!(payload.to_text(), r#"{"case_id":12}"#);
    }

    #[tokio::test]
    async fn test_filter_sends_only_present_criteria() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/manage/cases/filter"))
            .and(query_param("case_name", "ransomware"))
            .and(query_param("per_page", "25"))
            .respond_with(ok(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = IrisClient::new(&Config::new(server.uri(), "k")).unwrap();
        let args: FilterCases =
            serde_json::from_value(json!({"case_name": "ransomware", "per_page": 25})).unwrap();
        args.call(&client).await.unwrap();

        let received = server.received_requests().await.unwrap();
        let keys: Vec<String> = received[0]
            .url
            .query_pairs()
            .map(|(key, _)| key.into_owned())
            .collect();
        assert_eq!(keys, vec!["case_name".to_string(), "per_page".to_string()]);
    }

    #[tokio::test]
    async fn test_close_posts_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/manage/cases/close/3"))
            .respond_with(ok(json!({"case_id": 3, "close_date": "2024-05-01"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = IrisClient::new(&Config::new(server.uri(), "k")).unwrap();
        CloseCase { case_id: 3 }.call(&client).await.unwrap();
    }
}
