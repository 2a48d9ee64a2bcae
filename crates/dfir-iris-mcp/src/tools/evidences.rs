//! Case evidence registry tools

use super::{IrisCall, IrisTool, Tool};
use async_trait::async_trait;
use dfir_iris_core::{cid_query, to_body, IrisClient, Payload, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

case_scoped_reads! {
    base: "/case/evidences",
    noun: "Evidence",
    id: evidence_id,
    list: ListEvidences,
    get: GetEvidence,
    delete: DeleteEvidence,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddEvidence {
    /// Case ID
    pub case_id: i64,
    /// Filename of the evidence
    pub filename: String,
    /// File size in bytes
    pub file_size: Option<i64>,
    /// File hash (MD5, SHA1, or SHA256)
    pub file_hash: Option<String>,
    /// Description of the evidence
    pub file_description: Option<String>,
    /// Evidence type ID
    pub type_id: Option<i64>,
}

#[async_trait]
impl IrisCall for AddEvidence {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let body = to_body(self, &["case_id"])?;
        client
            .post("/case/evidences/add", &cid_query(self.case_id), Some(&body))
            .await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateEvidence {
    /// Case ID
    pub case_id: i64,
    /// Evidence ID to update
    pub evidence_id: i64,
    /// New filename
    pub filename: Option<String>,
    /// New file size
    pub file_size: Option<i64>,
    /// New file hash
    pub file_hash: Option<String>,
    /// New description
    pub file_description: Option<String>,
    /// New evidence type ID
    pub type_id: Option<i64>,
}

#[async_trait]
impl IrisCall for UpdateEvidence {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/case/evidences/update/{}", self.evidence_id);
        let body = to_body(self, &["case_id", "evidence_id"])?;
        client.post(&path, &cid_query(self.case_id), Some(&body)).await
    }
}

pub(super) fn tools(client: &IrisClient) -> Vec<Box<dyn Tool>> {
    vec![
        IrisTool::<ListEvidences>::boxed(
            client,
            "dfir_iris_evidences_list",
            "List all evidences in a case",
        ),
        IrisTool::<GetEvidence>::boxed(
            client,
            "dfir_iris_evidences_get",
            "Get details of a specific evidence in a case",
        ),
        IrisTool::<AddEvidence>::boxed(
            client,
            "dfir_iris_evidences_add",
            "Register a new evidence in a case",
        ),
        IrisTool::<UpdateEvidence>::boxed(
            client,
            "dfir_iris_evidences_update",
            "Update an existing evidence in a case",
        ),
        IrisTool::<DeleteEvidence>::boxed(
            client,
            "dfir_iris_evidences_delete",
            "Delete an evidence from a case",
        ),
    ]
}
