//! Case notes and note directories

use super::{IrisCall, IrisTool, Tool};
use async_trait::async_trait;
use dfir_iris_core::{cid_query, to_body, IrisClient, Payload, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListNoteDirectories {
    /// Case ID
    pub case_id: i64,
}

#[async_trait]
impl IrisCall for ListNoteDirectories {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        client
            .get("/case/notes/directories/filter", &cid_query(self.case_id))
            .await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddNoteDirectory {
    /// Case ID
    pub case_id: i64,
    /// Name of the note directory
    pub name: String,
}

#[async_trait]
impl IrisCall for AddNoteDirectory {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let body = json!({ "name": self.name });
        client
            .post(
                "/case/notes/directories/add",
                &cid_query(self.case_id),
                Some(&body),
            )
            .await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateNoteDirectory {
    /// Case ID
    pub case_id: i64,
    /// Note directory ID to update
    pub directory_id: i64,
    /// New directory name
    pub name: String,
}

#[async_trait]
impl IrisCall for UpdateNoteDirectory {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/case/notes/directories/update/{}", self.directory_id);
        let body = json!({ "name": self.name });
        client.post(&path, &cid_query(self.case_id), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteNoteDirectory {
    /// Case ID
    pub case_id: i64,
    /// Note directory ID to delete
    pub directory_id: i64,
}

#[async_trait]
impl IrisCall for DeleteNoteDirectory {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/case/notes/directories/delete/{}", self.directory_id);
        client.post_empty(&path, &cid_query(self.case_id)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetNote {
    /// Case ID
    pub case_id: i64,
    /// Note ID
    pub note_id: i64,
}

#[async_trait]
impl IrisCall for GetNote {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/case/notes/{}", self.note_id);
        client.get(&path, &cid_query(self.case_id)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddNote {
    /// Case ID
    pub case_id: i64,
    /// Title of the note
    pub note_title: String,
    /// Content of the note (supports markdown)
    pub note_content: String,
    /// Note directory ID to add the note to
    pub directory_id: i64,
}

#[async_trait]
impl IrisCall for AddNote {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let body = to_body(self, &["case_id"])?;
        client
            .post("/case/notes/add", &cid_query(self.case_id), Some(&body))
            .await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateNote {
    /// Case ID
    pub case_id: i64,
    /// Note ID to update
    pub note_id: i64,
    /// New note title
    pub note_title: Option<String>,
    /// New note content
    pub note_content: Option<String>,
    /// Move note to a different directory
    pub directory_id: Option<i64>,
}

#[async_trait]
impl IrisCall for UpdateNote {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/case/notes/update/{}", self.note_id);
        let body = to_body(self, &["case_id", "note_id"])?;
        client.post(&path, &cid_query(self.case_id), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteNote {
    /// Case ID
    pub case_id: i64,
    /// Note ID to delete
    pub note_id: i64,
}

#[async_trait]
impl IrisCall for DeleteNote {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/case/notes/delete/{}", self.note_id);
        client.post_empty(&path, &cid_query(self.case_id)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchNotes {
    /// Case ID
    pub case_id: i64,
    /// Text to search for in notes
    pub search_term: String,
}

#[async_trait]
impl IrisCall for SearchNotes {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let body = to_body(self, &["case_id"])?;
        client
            .post("/case/notes/search", &cid_query(self.case_id), Some(&body))
            .await
    }
}

pub(super) fn tools(client: &IrisClient) -> Vec<Box<dyn Tool>> {
    vec![
        IrisTool::<ListNoteDirectories>::boxed(
            client,
            "dfir_iris_notes_groups_list",
            "List all note directories (groups) in a case",
        ),
        IrisTool::<AddNoteDirectory>::boxed(
            client,
            "dfir_iris_notes_groups_add",
            "Create a new note directory (group) in a case",
        ),
        IrisTool::<UpdateNoteDirectory>::boxed(
            client,
            "dfir_iris_notes_groups_update",
            "Update a note directory (group) in a case",
        ),
        IrisTool::<DeleteNoteDirectory>::boxed(
            client,
            "dfir_iris_notes_groups_delete",
            "Delete a note directory from a case (deletes all notes in it)",
        ),
        IrisTool::<GetNote>::boxed(client, "dfir_iris_notes_get", "Get details of a specific note"),
        IrisTool::<AddNote>::boxed(client, "dfir_iris_notes_add", "Add a new note to a case"),
        IrisTool::<UpdateNote>::boxed(
            client,
            "dfir_iris_notes_update",
            "Update an existing note in a case",
        ),
        IrisTool::<DeleteNote>::boxed(client, "dfir_iris_notes_delete", "Delete a note from a case"),
        IrisTool::<SearchNotes>::boxed(
            client,
            "dfir_iris_notes_search",
            "Search notes in a case by keyword",
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
    async fn test_update_moves_note_without_touching_title() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/case/notes/update/14"))
            .and(query_param("cid", "2"))
            .and(body_json(json!({"directory_id": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "Note updated",
                "data": {"note_id": 14, "directory_id": 5}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = IrisClient::new(&Config::new(server.uri(), "k")).unwrap();
        let args: UpdateNote =
            serde_json::from_value(json!({"case_id": 2, "note_id": 14, "directory_id": 5}))
                .unwrap();

        let payload = args.call(&client).await.unwrap();
        assert_eq!(payload.to_text(), r#"{"note_id":14,"directory_id":5}"#);
    }
}
