//! Case datastore tools
//!
//! File entries are metadata only; uploading file contents needs a multipart
//! request that a tool call cannot carry.

use super::{IrisCall, IrisTool, Tool};
use async_trait::async_trait;
use dfir_iris_core::{cid_query, to_body, IrisClient, Payload, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DatastoreTree {
    /// Case ID
    pub case_id: i64,
}

#[async_trait]
impl IrisCall for DatastoreTree {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        client
            .get("/datastore/list/tree", &cid_query(self.case_id))
            .await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetFile {
    /// Case ID
    pub case_id: i64,
    /// Datastore file ID
    pub file_id: i64,
}

#[async_trait]
impl IrisCall for GetFile {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/datastore/file/info/{}", self.file_id);
        client.get(&path, &cid_query(self.case_id)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddFile {
    /// Case ID
    pub case_id: i64,
    /// Parent folder ID
    pub parent_id: i64,
    /// Original filename
    pub file_original_name: String,
    /// File description
    pub file_description: Option<String>,
    /// Password if file is encrypted
    pub file_password: Option<String>,
    /// Whether file is an IOC
    pub file_is_ioc: Option<bool>,
    /// Whether file is evidence
    pub file_is_evidence: Option<bool>,
}

#[async_trait]
impl IrisCall for AddFile {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/datastore/file/add/{}", self.parent_id);
        let body = to_body(self, &["case_id", "parent_id"])?;
        client.post(&path, &cid_query(self.case_id), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateFile {
    /// Case ID
    pub case_id: i64,
    /// File ID to update
    pub file_id: i64,
    /// New filename
    pub file_original_name: Option<String>,
    /// New description
    pub file_description: Option<String>,
}

#[async_trait]
impl IrisCall for UpdateFile {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/datastore/file/update/{}", self.file_id);
        let body = to_body(self, &["case_id", "file_id"])?;
        client.post(&path, &cid_query(self.case_id), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteFile {
    /// Case ID
    pub case_id: i64,
    /// File ID to delete
    pub file_id: i64,
}

#[async_trait]
impl IrisCall for DeleteFile {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/datastore/file/delete/{}", self.file_id);
        client.post_empty(&path, &cid_query(self.case_id)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MoveFile {
    /// Case ID
    pub case_id: i64,
    /// File ID to move
    pub file_id: i64,
    /// Destination folder ID
    pub destination_folder_id: i64,
}

#[async_trait]
impl IrisCall for MoveFile {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/datastore/file/move/{}", self.file_id);
        let body = json!({ "destination_folder_id": self.destination_folder_id });
        client.post(&path, &cid_query(self.case_id), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddFolder {
    /// Case ID
    pub case_id: i64,
    /// Name of the new folder
    pub folder_name: String,
    /// Parent folder ID (0 for root)
    pub parent_id: i64,
}

#[async_trait]
impl IrisCall for AddFolder {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let body = to_body(self, &["case_id"])?;
        client
            .post("/datastore/folder/add", &cid_query(self.case_id), Some(&body))
            .await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteFolder {
    /// Case ID
    pub case_id: i64,
    /// Folder ID to delete
    pub folder_id: i64,
}

#[async_trait]
impl IrisCall for DeleteFolder {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/datastore/folder/delete/{}", self.folder_id);
        client.post_empty(&path, &cid_query(self.case_id)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RenameFolder {
    /// Case ID
    pub case_id: i64,
    /// Folder ID to rename
    pub folder_id: i64,
    /// New folder name
    pub folder_name: String,
}

#[async_trait]
impl IrisCall for RenameFolder {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/datastore/folder/rename/{}", self.folder_id);
        let body = json!({ "folder_name": self.folder_name });
        client.post(&path, &cid_query(self.case_id), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MoveFolder {
    /// Case ID
    pub case_id: i64,
    /// Folder ID to move
    pub folder_id: i64,
    /// Destination parent folder ID
    pub destination_folder_id: i64,
}

#[async_trait]
impl IrisCall for MoveFolder {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/datastore/folder/move/{}", self.folder_id);
        let body = json!({ "destination_folder_id": self.destination_folder_id });
        client.post(&path, &cid_query(self.case_id), Some(&body)).await
    }
}

pub(super) fn tools(client: &IrisClient) -> Vec<Box<dyn Tool>> {
    vec![
        IrisTool::<DatastoreTree>::boxed(
            client,
            "dfir_iris_datastore_tree",
            "Get the datastore folder/file tree for a case",
        ),
        IrisTool::<GetFile>::boxed(
            client,
            "dfir_iris_datastore_file_get",
            "Get metadata of a file in the datastore",
        ),
        IrisTool::<AddFile>::boxed(
            client,
            "dfir_iris_datastore_file_add",
            "Add a file entry to the datastore (metadata only, no binary upload)",
        ),
        IrisTool::<UpdateFile>::boxed(
            client,
            "dfir_iris_datastore_file_update",
            "Update a file's metadata in the datastore",
        ),
        IrisTool::<DeleteFile>::boxed(
            client,
            "dfir_iris_datastore_file_delete",
            "Delete a file from the datastore",
        ),
        IrisTool::<MoveFile>::boxed(
            client,
            "dfir_iris_datastore_file_move",
            "Move a file to a different folder in the datastore",
        ),
        IrisTool::<AddFolder>::boxed(
            client,
            "dfir_iris_datastore_folder_add",
            "Create a new folder in the datastore",
        ),
        IrisTool::<DeleteFolder>::boxed(
            client,
            "dfir_iris_datastore_folder_delete",
            "Delete a folder from the datastore (and all contents)",
        ),
        IrisTool::<RenameFolder>::boxed(
            client,
            "dfir_iris_datastore_folder_rename",
            "Rename a folder in the datastore",
        ),
        IrisTool::<MoveFolder>::boxed(
            client,
            "dfir_iris_datastore_folder_move",
            "Move a folder to a different parent folder in the datastore",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfir_iris_core::Config;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_add_file_uses_parent_in_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/datastore/file/add/11"))
            .and(query_param("cid", "6"))
            .and(body_json(json!({
                "file_original_name": "memdump.raw",
                "file_is_evidence": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "",
                "data": {"file_id": 70}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = IrisClient::new(&Config::new(server.uri(), "k")).unwrap();
        let args: AddFile = serde_json::from_value(json!({
            "case_id": 6,
            "parent_id": 11,
            "file_original_name": "memdump.raw",
            "file_is_evidence": true
        }))
        .unwrap();

        args.call(&client).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_folder_at_root_keeps_zero_parent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/datastore/folder/add"))
            .and(body_json(json!({"folder_name": "Triage", "parent_id": 0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "",
                "data": {"path_id": 12}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = IrisClient::new(&Config::new(server.uri(), "k")).unwrap();
        let args = AddFolder {
            case_id: 6,
            folder_name: "Triage".to_string(),
            parent_id: 0,
        };

        args.call(&client).await.unwrap();
    }
}
