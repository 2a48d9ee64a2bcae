//! Customer management tools

use super::{IrisCall, IrisTool, StaticGetTool, Tool};
use async_trait::async_trait;
use dfir_iris_core::{to_body, IrisClient, Payload, Query, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddCustomer {
    /// Customer name
    pub customer_name: String,
    /// Customer description
    pub customer_description: Option<String>,
    /// SLA terms
    pub customer_sla: Option<String>,
}

#[async_trait]
impl IrisCall for AddCustomer {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let body = to_body(self, &[])?;
        client
            .post("/manage/customers/add", &Query::new(), Some(&body))
            .await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateCustomer {
    /// Customer ID to update
    pub customer_id: i64,
    /// New customer name
    pub customer_name: Option<String>,
    /// New description
    pub customer_description: Option<String>,
    /// New SLA terms
    pub customer_sla: Option<String>,
}

#[async_trait]
impl IrisCall for UpdateCustomer {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/manage/customers/update/{}", self.customer_id);
        let body = to_body(self, &["customer_id"])?;
        client.post(&path, &Query::new(), Some(&body)).await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteCustomer {
    /// Customer ID to delete
    pub customer_id: i64,
}

#[async_trait]
impl IrisCall for DeleteCustomer {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/manage/customers/delete/{}", self.customer_id);
        client.post_empty(&path, &Query::new()).await
    }
}

pub(super) fn tools(client: &IrisClient) -> Vec<Box<dyn Tool>> {
    vec![
        StaticGetTool::boxed(
            client,
            "dfir_iris_customers_list",
            "List all customers in DFIR-IRIS",
            "/manage/customers/list",
        ),
        IrisTool::<AddCustomer>::boxed(client, "dfir_iris_customers_add", "Create a new customer"),
        IrisTool::<UpdateCustomer>::boxed(client, "dfir_iris_customers_update", "Update a customer"),
        IrisTool::<DeleteCustomer>::boxed(
            client,
            "dfir_iris_customers_delete",
            "Delete a customer (irreversible)",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfir_iris_core::Config;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_update_can_blank_sla() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/manage/customers/update/2"))
            .and(body_json(json!({"customer_sla": ""})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "Customer updated",
                "data": {"customer_id": 2}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = IrisClient::new(&Config::new(server.uri(), "k")).unwrap();
        let args: UpdateCustomer =
            serde_json::from_value(json!({"customer_id": 2, "customer_sla": ""})).unwrap();

        args.call(&client).await.unwrap();
    }
}
