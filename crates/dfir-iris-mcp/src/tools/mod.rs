//! MCP tool registrations for the DFIR-IRIS API
//!
//! Every tool is a typed argument struct plus one call into
//! [`IrisClient`]. The argument struct drives three things: the JSON
//! schema advertised in `tools/list`, deserialization of `tools/call`
//! arguments, and (through the mapper) the query or body sent upstream.

/// List, get and delete argument types for an object that lives inside a
/// case. All three carry the case through the `cid` query parameter.
macro_rules! case_scoped_reads {
    (
        base: $base:literal,
        noun: $noun:literal,
        id: $id:ident,
        list: $list:ident,
        get: $get:ident,
        delete: $delete:ident $(,)?
    ) => {
        #[derive(Debug, Serialize, Deserialize, JsonSchema)]
        pub struct $list {
            /// Case ID
            pub case_id: i64,
        }

        #[async_trait]
        impl IrisCall for $list {
            async fn call(&self, client: &IrisClient) -> Result<Payload> {
                client
                    .get(concat!($base, "/list"), &cid_query(self.case_id))
                    .await
            }
        }

        #[derive(Debug, Serialize, Deserialize, JsonSchema)]
        pub struct $get {
            /// Case ID
            pub case_id: i64,
            #[doc = concat!($noun, " ID")]
            pub $id: i64,
        }

        #[async_trait]
        impl IrisCall for $get {
            async fn call(&self, client: &IrisClient) -> Result<Payload> {
                let path = format!(concat!($base, "/{}"), self.$id);
                client.get(&path, &cid_query(self.case_id)).await
            }
        }

        #[derive(Debug, Serialize, Deserialize, JsonSchema)]
        pub struct $delete {
            /// Case ID
            pub case_id: i64,
            #[doc = concat!($noun, " ID to delete")]
            pub $id: i64,
        }

        #[async_trait]
        impl IrisCall for $delete {
            async fn call(&self, client: &IrisClient) -> Result<Payload> {
                let path = format!(concat!($base, "/delete/{}"), self.$id);
                client.post_empty(&path, &cid_query(self.case_id)).await
            }
        }
    };
}

mod alerts;
mod assets;
mod cases;
mod comments;
mod customers;
mod datastore;
mod evidences;
mod groups;
mod iocs;
mod notes;
mod system;
mod tasks;
mod timeline;
mod users;

use crate::protocol::{MCPError, ToolDefinition, ToolResult};
use async_trait::async_trait;
use dfir_iris_core::{IrisClient, Payload, Query};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::marker::PhantomData;

/// Tool trait for MCP tools
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (e.g., "dfir_iris_cases_list")
    fn name(&self) -> &str;

    /// Tool description
    fn description(&self) -> &str;

    /// JSON schema for tool parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool with given arguments.
    ///
    /// Upstream failures are reported as error results; `Err` is reserved
    /// for arguments that do not match the schema.
    async fn execute(&self, args: Option<Value>) -> Result<ToolResult, MCPError>;

    /// Get tool definition for tools/list response
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Typed arguments that know which DFIR-IRIS endpoint they call
#[async_trait]
pub trait IrisCall: DeserializeOwned + JsonSchema + Send + Sync + 'static {
    async fn call(&self, client: &IrisClient) -> dfir_iris_core::Result<Payload>;
}

/// Tool backed by an [`IrisCall`] argument type
pub struct IrisTool<A> {
    name: &'static str,
    description: &'static str,
    client: IrisClient,
    _args: PhantomData<fn() -> A>,
}

impl<A: IrisCall> IrisTool<A> {
    pub fn boxed(client: &IrisClient, name: &'static str, description: &'static str) -> Box<dyn Tool> {
        Box::new(Self {
            name,
            description,
            client: client.clone(),
            _args: PhantomData,
        })
    }
}

#[async_trait]
impl<A: IrisCall> Tool for IrisTool<A> {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn input_schema(&self) -> Value {
        schema_of::<A>()
    }

    async fn execute(&self, args: Option<Value>) -> Result<ToolResult, MCPError> {
        let args: A = parse_args(self.name, args)?;
        Ok(render(self.name, args.call(&self.client).await))
    }
}

/// Argument-less GET of a fixed path (listings, settings, health checks)
pub struct StaticGetTool {
    name: &'static str,
    description: &'static str,
    path: &'static str,
    client: IrisClient,
}

/// Empty argument object
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoArgs {}

impl StaticGetTool {
    pub fn boxed(
        client: &IrisClient,
        name: &'static str,
        description: &'static str,
        path: &'static str,
    ) -> Box<dyn Tool> {
        Box::new(Self {
            name,
            description,
            path,
            client: client.clone(),
        })
    }
}

#[async_trait]
impl Tool for StaticGetTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn input_schema(&self) -> Value {
        schema_of::<NoArgs>()
    }

    async fn execute(&self, args: Option<Value>) -> Result<ToolResult, MCPError> {
        let _: NoArgs = parse_args(self.name, args)?;
        Ok(render(self.name, self.client.get(self.path, &Query::new()).await))
    }
}

/// Every DFIR-IRIS tool, in registration order
pub fn all_tools(client: &IrisClient) -> Vec<Box<dyn Tool>> {
    let mut tools = Vec::new();
    tools.extend(system::tools(client));
    tools.extend(cases::tools(client));
    tools.extend(alerts::tools(client));
    tools.extend(assets::tools(client));
    tools.extend(iocs::tools(client));
    tools.extend(timeline::tools(client));
    tools.extend(tasks::tools(client));
    tools.extend(evidences::tools(client));
    tools.extend(notes::tools(client));
    tools.extend(comments::tools(client));
    tools.extend(datastore::tools(client));
    tools.extend(customers::tools(client));
    tools.extend(users::tools(client));
    tools.extend(groups::tools(client));
    tools
}

fn schema_of<A: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(A)).unwrap_or_else(|_| json!({"type": "object"}))
}

fn parse_args<A: DeserializeOwned>(tool: &str, args: Option<Value>) -> Result<A, MCPError> {
    let args = match args {
        None | Some(Value::Null) => json!({}),
        Some(args) => args,
    };
    serde_json::from_value(args)
        .map_err(|e| MCPError::invalid_params(format!("Invalid arguments for {}: {}", tool, e)))
}

fn render(tool: &str, outcome: dfir_iris_core::Result<Payload>) -> ToolResult {
    match outcome {
        Ok(payload) => ToolResult::text(payload.to_text()),
        Err(err) => {
            tracing::warn!(tool, kind = ?err.kind(), "tool call failed: {}", err);
            ToolResult::error(err.to_string())
        }
    }
}
