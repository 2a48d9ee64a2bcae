//! Alert triage tools

use super::{IrisCall, IrisTool, Tool};
use async_trait::async_trait;
use dfir_iris_core::{to_body, to_query, IrisClient, Payload, Query, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FilterAlerts {
    /// Filter by alert title
    pub alert_title: Option<String>,
    /// Filter by severity ID
    pub alert_severity_id: Option<i64>,
    /// Filter by status ID
    pub alert_status_id: Option<i64>,
    /// Filter by customer ID
    pub alert_customer_id: Option<i64>,
    /// Filter by alert source
    pub alert_source: Option<String>,
    /// Filter by classification ID
    pub alert_classification_id: Option<i64>,
    /// Page number
    pub page: Option<i64>,
    /// Results per page
    pub per_page: Option<i64>,
    /// Sort field
    pub sort: Option<String>,
}

#[async_trait]
impl IrisCall for FilterAlerts {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        client.get("/alerts/filter", &to_query(self, &[])?).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetAlert {
    /// Alert ID to retrieve
    pub alert_id: i64,
}

#[async_trait]
impl IrisCall for GetAlert {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        client
            .get(&format!("/alerts/{}", self.alert_id), &Query::new())
            .await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddAlert {
    /// Title of the alert
    pub alert_title: String,
    /// Severity ID
    pub alert_severity_id: i64,
    /// Status ID
    pub alert_status_id: i64,
    /// Customer ID
    pub alert_customer_id: i64,
    /// Alert description
    pub alert_description: Option<String>,
    /// Source of the alert (e.g. SIEM name)
    pub alert_source: Option<String>,
    /// Source reference ID
    pub alert_source_ref: Option<String>,
    /// Link to alert in source system
    pub alert_source_link: Option<String>,
    /// Classification ID
    pub alert_classification_id: Option<i64>,
    /// Alert note
    pub alert_note: Option<String>,
    /// Comma-separated tags
    pub alert_tags: Option<String>,
}

#[async_trait]
impl IrisCall for AddAlert {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let body = to_body(self, &[])?;
        client.post("/alerts/add", &Query::new(), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateAlert {
    /// ID of the alert to update
    pub alert_id: i64,
    /// New alert title
    pub alert_title: Option<String>,
    /// New severity ID
    pub alert_severity_id: Option<i64>,
    /// New status ID
    pub alert_status_id: Option<i64>,
    /// New customer ID
    pub alert_customer_id: Option<i64>,
    /// New description
    pub alert_description: Option<String>,
    /// New source
    pub alert_source: Option<String>,
    /// New classification ID
    pub alert_classification_id: Option<i64>,
    /// New note
    pub alert_note: Option<String>,
    /// New comma-separated tags
    pub alert_tags: Option<String>,
}

#[async_trait]
impl IrisCall for UpdateAlert {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/alerts/update/{}", self.alert_id);
        let body = to_body(self, &["alert_id"])?;
        client.post(&path, &Query::new(), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteAlert {
    /// ID of the alert to delete
    pub alert_id: i64,
}

#[async_trait]
impl IrisCall for DeleteAlert {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/alerts/delete/{}", self.alert_id);
        client.post_empty(&path, &Query::new()).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EscalateAlert {
    /// ID of the alert to escalate
    pub alert_id: i64,
    /// Import IOCs from the alert into the case
    pub iocs_import: Option<bool>,
    /// Import assets from the alert into the case
    pub assets_import: Option<bool>,
    /// Existing case ID to escalate into (creates new case if omitted)
    pub case_id: Option<i64>,
    /// Case template ID for the new case
    pub case_template_id: Option<i64>,
}

#[async_trait]
impl IrisCall for EscalateAlert {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/alerts/escalate/{}", self.alert_id);
        let body = to_body(self, &["alert_id"])?;
        client.post(&path, &Query::new(), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MergeAlert {
    /// ID of the alert to merge
    pub alert_id: i64,
    /// Case ID to merge the alert into
    pub target_case_id: i64,
}

#[async_trait]
impl IrisCall for MergeAlert {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/alerts/merge/{}", self.alert_id);
        let body = json!({ "target_case_id": self.target_case_id });
        client.post(&path, &Query::new(), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UnmergeAlert {
    /// ID of the alert to unmerge from its case
    pub alert_id: i64,
}

#[async_trait]
impl IrisCall for UnmergeAlert {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/alerts/unmerge/{}", self.alert_id);
        client.post_empty(&path, &Query::new()).await
    }
}

pub(super) fn tools(client: &IrisClient) -> Vec<Box<dyn Tool>> {
    vec![
        IrisTool::<FilterAlerts>::boxed(
            client,
            "dfir_iris_alerts_filter",
            "Filter alerts with optional search criteria",
        ),
        IrisTool::<GetAlert>::boxed(
            client,
            "dfir_iris_alerts_get",
            "Get details of a specific alert",
        ),
        IrisTool::<AddAlert>::boxed(client, "dfir_iris_alerts_add", "Create a new alert"),
        IrisTool::<UpdateAlert>::boxed(
            client,
            "dfir_iris_alerts_update",
            "Update an existing alert",
        ),
        IrisTool::<DeleteAlert>::boxed(
            client,
            "dfir_iris_alerts_delete",
            "Delete an alert (irreversible)",
        ),
        IrisTool::<EscalateAlert>::boxed(
            client,
            "dfir_iris_alerts_escalate",
            "Escalate an alert to a new or existing case",
        ),
        IrisTool::<MergeAlert>::boxed(
            client,
            "dfir_iris_alerts_merge",
            "Merge an alert into an existing case",
        ),
        IrisTool::<UnmergeAlert>::boxed(
            client,
            "dfir_iris_alerts_unmerge",
            "Unmerge an alert from its associated case",
        ),
    ]
}
