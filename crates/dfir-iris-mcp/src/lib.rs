//! DFIR-IRIS MCP Server - Model Context Protocol access to DFIR-IRIS case management
//!
//! Exposes the DFIR-IRIS REST API as MCP tools over stdio. Each tool maps its
//! arguments onto one upstream endpoint through [`dfir_iris_core::IrisClient`]
//! and returns the unwrapped `data` as JSON text.
//!
//! # Features
//!
//! - **Cases & alerts**: filtering, creation, updates, escalation, merging
//! - **Case objects**: IOCs, assets, timeline events, tasks, evidences, notes,
//!   comments and the datastore
//! - **Administration**: customers, users and groups
//! - **Reference data**: the settings listings needed to pick type and status IDs
//!
//! # Usage
//!
//! ```bash
//! DFIR_IRIS_URL=https://iris.example.org DFIR_IRIS_API_KEY=... dfir-iris-mcp
//! ```

pub mod protocol;
pub mod tools;
mod server;

pub use protocol::{
    CallToolParams, Content, MCPError, MCPErrorCode, MCPRequest, MCPResponse, RequestId,
    ToolResult,
};
pub use server::{MCPServer, SERVER_NAME};
pub use tools::{all_tools, Tool};

pub use anyhow::Result;
