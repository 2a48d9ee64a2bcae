//! User administration tools

use super::{IrisCall, IrisTool, StaticGetTool, Tool};
use async_trait::async_trait;
use dfir_iris_core::{to_body, IrisClient, Payload, Query, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetUser {
    /// User ID
    pub user_id: i64,
}

#[async_trait]
impl IrisCall for GetUser {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/manage/users/{}", self.user_id);
        client.get(&path, &Query::new()).await
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
pub struct AddUser {
    /// Full name of the user
    pub user_name: String,
    /// Login username
    pub user_login: String,
    /// Email address
    pub user_email: String,
    /// Password for the user
    pub user_password: String,
    /// Whether the user is an admin
    pub user_isadmin: Option<bool>,
}

#[async_trait]
impl IrisCall for AddUser {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let body = to_body(self, &[])?;
        client.post("/manage/users/add", &Query::new(), Some(&body)).await
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
pub struct UpdateUser {
    /// User ID to update
    pub user_id: i64,
    /// New full name
    pub user_name: Option<String>,
    /// New email address
    pub user_email: Option<String>,
    /// New password
    pub user_password: Option<String>,
    /// New admin status
    pub user_isadmin: Option<bool>,
}

#[async_trait]
impl IrisCall for UpdateUser {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/manage/users/update/{}", self.user_id);
        let body = to_body(self, &["user_id"])?;
        client.post(&path, &Query::new(), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteUser {
    /// User ID to delete
    pub user_id: i64,
}

#[async_trait]
impl IrisCall for DeleteUser {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/manage/users/delete/{}", self.user_id);
        client.post_empty(&path, &Query::new()).await
    }
}

pub(super) fn tools(client: &IrisClient) -> Vec<Box<dyn Tool>> {
    vec![
        StaticGetTool::boxed(
            client,
            "dfir_iris_users_list",
            "List all users in DFIR-IRIS",
            "/manage/users/list",
        ),
        IrisTool::<GetUser>::boxed(client, "dfir_iris_users_get", "Get details of a specific user"),
        IrisTool::<AddUser>::boxed(
            client,
            "dfir_iris_users_add",
            "Create a new user (admin operation)",
        ),
        IrisTool::<UpdateUser>::boxed(
            client,
            "dfir_iris_users_update",
            "Update a user (admin operation)",
        ),
        IrisTool::<DeleteUser>::boxed(
            client,
            "dfir_iris_users_delete",
            "Delete a user (admin operation, irreversible)",
        ),
    ]
}
