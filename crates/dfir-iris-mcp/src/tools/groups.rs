//! Group administration tools

use super::{IrisCall, IrisTool, StaticGetTool, Tool};
use async_trait::async_trait;
use dfir_iris_core::{to_body, IrisClient, Payload, Query, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddGroup {
    /// Name of the group
    pub group_name: String,
    /// Group description
    pub group_description: Option<String>,
    /// Permission bitmask
    pub group_permissions: Option<i64>,
}

#[async_trait]
impl IrisCall for AddGroup {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let body = to_body(self, &[])?;
        client.post("/manage/groups/add", &Query::new(), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateGroup {
    /// Group ID to update
    pub group_id: i64,
    /// New group name
    pub group_name: Option<String>,
    /// New description
    pub group_description: Option<String>,
    /// New permission bitmask
    pub group_permissions: Option<i64>,
}

#[async_trait]
impl IrisCall for UpdateGroup {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/manage/groups/update/{}", self.group_id);
        let body = to_body(self, &["group_id"])?;
        client.post(&path, &Query::new(), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteGroup {
    /// Group ID to delete
    pub group_id: i64,
}

#[async_trait]
impl IrisCall for DeleteGroup {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/manage/groups/delete/{}", self.group_id);
        client.post_empty(&path, &Query::new()).await
    }
}

pub(super) fn tools(client: &IrisClient) -> Vec<Box<dyn Tool>> {
    vec![
        StaticGetTool::boxed(
            client,
            "dfir_iris_groups_list",
            "List all groups in DFIR-IRIS",
            "/manage/groups/list",
        ),
        IrisTool::<AddGroup>::boxed(
            client,
            "dfir_iris_groups_add",
            "Create a new group (admin operation)",
        ),
        IrisTool::<UpdateGroup>::boxed(
            client,
            "dfir_iris_groups_update",
            "Update a group (admin operation)",
        ),
        IrisTool::<DeleteGroup>::boxed(
            client,
            "dfir_iris_groups_delete",
            "Delete a group (admin operation, irreversible)",
        ),
    ]
}
