//! Indicator of compromise tools

use super::{IrisCall, IrisTool, Tool};
use async_trait::async_trait;
use dfir_iris_core::{cid_query, to_body, IrisClient, Payload, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

case_scoped_reads! {
    base: "/case/ioc",
    noun: "IOC",
    id: ioc_id,
    list: ListIocs,
    get: GetIoc,
    delete: DeleteIoc,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddIoc {
    /// Case ID
    pub case_id: i64,
    /// IOC value (e.g. IP, hash, domain)
    pub ioc_value: String,
    /// IOC type ID (use dfir_iris_settings_ioc_types to list)
    pub ioc_type_id: i64,
    /// Description of the IOC
    pub ioc_description: Option<String>,
    /// TLP level ID
    pub ioc_tlp_id: Option<i64>,
    /// Comma-separated tags
    pub ioc_tags: Option<String>,
}

#[async_trait]
impl IrisCall for AddIoc {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let body = to_body(self, &["case_id"])?;
        client
            .post("/case/ioc/add", &cid_query(self.case_id), Some(&body))
            .await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateIoc {
    /// Case ID
    pub case_id: i64,
    /// IOC ID to update
    pub ioc_id: i64,
    /// New IOC value
    pub ioc_value: Option<String>,
    /// New IOC type ID
    pub ioc_type_id: Option<i64>,
    /// New description
    pub ioc_description: Option<String>,
    /// New TLP level ID
    pub ioc_tlp_id: Option<i64>,
    /// New comma-separated tags
    pub ioc_tags: Option<String>,
}

#[async_trait]
impl IrisCall for UpdateIoc {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/case/ioc/update/{}", self.ioc_id);
        let body = to_body(self, &["case_id", "ioc_id"])?;
        client.post(&path, &cid_query(self.case_id), Some(&body)).await
    }
}

pub(super) fn tools(client: &IrisClient) -> Vec<Box<dyn Tool>> {
    vec![
        IrisTool::<ListIocs>::boxed(client, "dfir_iris_iocs_list", "List all IOCs in a case"),
        IrisTool::<GetIoc>::boxed(
            client,
            "dfir_iris_iocs_get",
            "Get details of a specific IOC in a case",
        ),
        IrisTool::<AddIoc>::boxed(client, "dfir_iris_iocs_add", "Add a new IOC to a case"),
        IrisTool::<UpdateIoc>::boxed(
            client,
            "dfir_iris_iocs_update",
            "Update an existing IOC in a case",
        ),
        IrisTool::<DeleteIoc>::boxed(client, "dfir_iris_iocs_delete", "Delete an IOC from a case"),
    ]
}
