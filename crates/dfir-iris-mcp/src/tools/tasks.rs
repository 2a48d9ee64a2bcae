//! Case task tools

use super::{IrisCall, IrisTool, Tool};
use async_trait::async_trait;
use dfir_iris_core::{cid_query, to_body, IrisClient, Payload, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

case_scoped_reads! {
    base: "/case/tasks",
    noun: "Task",
    id: task_id,
    list: ListTasks,
    get: GetTask,
    delete: DeleteTask,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddTask {
    /// Case ID
    pub case_id: i64,
    /// Title of the task
    pub task_title: String,
    /// Task description
    pub task_description: Option<String>,
    /// List of user IDs to assign
    pub task_assignees_id: Option<Vec<i64>>,
    /// Task status ID
    pub task_status_id: Option<i64>,
    /// Comma-separated tags
    pub task_tags: Option<String>,
}

#[async_trait]
impl IrisCall for AddTask {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let body = to_body(self, &["case_id"])?;
        client
            .post("/case/tasks/add", &cid_query(self.case_id), Some(&body))
            .await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTask {
    /// Case ID
    pub case_id: i64,
    /// Task ID to update
    pub task_id: i64,
    /// New task title
    pub task_title: Option<String>,
    /// New description
    pub task_description: Option<String>,
    /// New list of assignee user IDs
    pub task_assignees_id: Option<Vec<i64>>,
    /// New status ID
    pub task_status_id: Option<i64>,
    /// New comma-separated tags
    pub task_tags: Option<String>,
}

#[async_trait]
impl IrisCall for UpdateTask {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/case/tasks/update/{}", self.task_id);
        let body = to_body(self, &["case_id", "task_id"])?;
        client.post(&path, &cid_query(self.case_id), Some(&body)).await
    }
}

pub(super) fn tools(client: &IrisClient) -> Vec<Box<dyn Tool>> {
    vec![
        IrisTool::<ListTasks>::boxed(client, "dfir_iris_tasks_list", "List all tasks in a case"),
        IrisTool::<GetTask>::boxed(
            client,
            "dfir_iris_tasks_get",
            "Get details of a specific task in a case",
        ),
        IrisTool::<AddTask>::boxed(client, "dfir_iris_tasks_add", "Add a new task to a case"),
        IrisTool::<UpdateTask>::boxed(
            client,
            "dfir_iris_tasks_update",
            "Update an existing task in a case",
        ),
        IrisTool::<DeleteTask>::boxed(client, "dfir_iris_tasks_delete", "Delete a task from a case"),
    ]
}
