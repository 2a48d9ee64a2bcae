//! Case asset tools

use super::{IrisCall, IrisTool, Tool};
use async_trait::async_trait;
use dfir_iris_core::{cid_query, to_body, IrisClient, Payload, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

case_scoped_reads! {
    base: "/case/assets",
    noun: "Asset",
    id: asset_id,
    list: ListAssets,
    get: GetAsset,
    delete: DeleteAsset,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddAsset {
    /// Case ID
    pub case_id: i64,
    /// Name of the asset (e.g. hostname or IP)
    pub asset_name: String,
    /// Asset type ID (use dfir_iris_settings_asset_types to list)
    pub asset_type_id: i64,
    /// Description of the asset
    pub asset_description: Option<String>,
    /// IP address of the asset
    pub asset_ip: Option<String>,
    /// Domain of the asset
    pub asset_domain: Option<String>,
    /// Comma-separated tags
    pub asset_tags: Option<String>,
    /// Analysis status ID
    pub analysis_status: Option<i64>,
    /// Compromise status ID
    pub compromise_status_id: Option<i64>,
    /// Custom attributes as key-value pairs (e.g. {"limacharlie_sid": "uuid"})
    pub custom_attributes: Option<Map<String, Value>>,
}

#[async_trait]
impl IrisCall for AddAsset {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let body = to_body(self, &["case_id"])?;
        client
            .post("/case/assets/add", &cid_query(self.case_id), Some(&body))
            .await
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateAsset {
    /// Case ID
    pub case_id: i64,
    /// Asset ID to update
    pub asset_id: i64,
    /// New asset name
    pub asset_name: Option<String>,
    /// New asset type ID
    pub asset_type_id: Option<i64>,
    /// New description
    pub asset_description: Option<String>,
    /// New IP address
    pub asset_ip: Option<String>,
    /// New domain
    pub asset_domain: Option<String>,
    /// New comma-separated tags
    pub asset_tags: Option<String>,
    /// New analysis status ID
    pub analysis_status: Option<i64>,
    /// New compromise status ID
    pub compromise_status_id: Option<i64>,
    /// Custom attributes as key-value pairs
    pub custom_attributes: Option<Map<String, Value>>,
}

#[async_trait]
impl IrisCall for UpdateAsset {
    async fn call(&self, client: &IrisClient) -> Result<Payload> {
        let path = format!("/case/assets/update/{}", self.asset_id);
        let body = to_body(self, &["case_id", "asset_id"])?;
        client.post(&path, &cid_query(self.case_id), Some(&body)).await
    }
}

pub(super) fn tools(client: &IrisClient) -> Vec<Box<dyn Tool>> {
    vec![
        IrisTool::<ListAssets>::boxed(client, "dfir_iris_assets_list", "List all assets in a case"),
        IrisTool::<GetAsset>::boxed(
            client,
            "dfir_iris_assets_get",
            "Get details of a specific asset in a case",
        ),
        IrisTool::<AddAsset>::boxed(client, "dfir_iris_assets_add", "Add a new asset to a case"),
        IrisTool::<UpdateAsset>::boxed(
            client,
            "dfir_iris_assets_update",
            "Update an existing asset in a case",
        ),
        IrisTool::<DeleteAsset>::boxed(
            client,
            "dfir_iris_assets_delete",
            "Delete an asset from a case",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfir_iris_core::Config;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_update_passes_custom_attributes_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/case/assets/update/17"))
            .and(query_param("cid", "5"))
            .and(body_json(json!({
                "asset_ip": "",
                "custom_attributes": {"EDR": {"sensor_id": "abc-123", "isolated": false}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "Updated",
                "data": {"asset_id": 17}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = IrisClient::new(&Config::new(server.uri(), "k")).unwrap();
        let args: UpdateAsset = serde_json::from_value(json!({
            "case_id": 5,
            "asset_id": 17,
            "asset_ip": "",
            "custom_attributes": {"EDR": {"sensor_id": "abc-123", "isolated": false}}
        }))
        .unwrap();

        args.call(&client).await.unwrap();
    }
}
