//! Comments attached to case objects

use super::{IrisCall, IrisTool, Tool};
use async_trait::async_trait;
use dfir_iris_core::{cid_query, Error, IrisClient, Payload, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// `object_type` is spliced into the path, so it may only name a route segment.
fn comments_base(object_type: &str, object_id: i64) -> Result<String> {
    let valid = !object_type.is_empty()
        && !object_type.starts_with('/')
        && !object_type.ends_with('/')
        && object_type
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '/');
    if !valid {
        return Err(Error::request(format!(
            "invalid object type {:?}",
            object_type
        )));
    }
    Ok(format!("/case/{}/{}/comments", object_type, object_id))
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListComments {
    /// Case ID
    pub case_id: i64,
    /// Object type (e.g. cases, assets, ioc, timeline_events, tasks, evidences)
    pub object_type: String,
    /// Object ID to list comments for
    pub object_id: i64,
}

#[async_trait]
impl IrisCall for ListComments {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("{}/list", comments_base(&self.object_type, self.object_id)?);
        client.get(&path, &cid_query(self.case_id)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddComment {
    /// Case ID
    pub case_id: i64,
    /// Object type (e.g. cases, assets, ioc, timeline_events, tasks, evidences)
    pub object_type: String,
    /// Object ID to comment on
    pub object_id: i64,
    /// Comment text
    pub comment_text: String,
}

#[async_trait]
impl IrisCall for AddComment {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("{}/add", comments_base(&self.object_type, self.object_id)?);
        let body = json!({ "comment_text": self.comment_text });
        client.post(&path, &cid_query(self.case_id), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EditComment {
    /// Case ID
    pub case_id: i64,
    /// Object type
    pub object_type: String,
    /// Object ID
    pub object_id: i64,
    /// Comment ID to edit
    pub comment_id: i64,
    /// New comment text
    pub comment_text: String,
}

#[async_trait]
impl IrisCall for EditComment {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!(
            "{}/{}/edit",
            comments_base(&self.object_type, self.object_id)?,
            self.comment_id
        );
        let body = json!({ "comment_text": self.comment_text });
        client.post(&path, &cid_query(self.case_id), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteComment {
    /// Case ID
    pub case_id: i64,
    /// Object type
    pub object_type: String,
    /// Object ID
    pub object_id: i64,
    /// Comment ID to delete
    pub comment_id: i64,
}

#[async_trait]
impl IrisCall for DeleteComment {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!(
            "{}/{}/delete",
            comments_base(&self.object_type, self.object_id)?,
            self.comment_id
        );
        client.post_empty(&path, &cid_query(self.case_id)).await
    }
}

pub(super) fn tools(client: &IrisClient) -> Vec<Box<dyn Tool>> {
    vec![
        IrisTool::<ListComments>::boxed(
            client,
            "dfir_iris_comments_list",
            "List comments on a case object (asset, IOC, event, task, etc.)",
        ),
        IrisTool::<AddComment>::boxed(
            client,
            "dfir_iris_comments_add",
            "Add a comment to a case object",
        ),
        IrisTool::<EditComment>::boxed(client, "dfir_iris_comments_edit", "Edit an existing comment"),
        IrisTool::<DeleteComment>::boxed(client, "dfir_iris_comments_delete", "Delete a comment"),
    ]
}
