//! # DFIR-IRIS Core
//!
//! Request/response translation layer for the DFIR-IRIS case-management API.
//!
//! - **Config**: base URL, credential and TLS toggle from the environment
//! - **Envelope**: the `{status, message, data}` wrapper every endpoint returns
//! - **IrisClient**: `get`/`post` primitives that sign requests and unify
//!   transport and application errors
//! - **Mapper**: typed argument structs to query strings or JSON bodies,
//!   omitting unset optionals and excluded fields
//!
//! ## Example
//!
//! ```rust,no_run
//! use dfir_iris_core::{cid_query, to_body, Config, IrisClient, Result};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct AddIoc {
//!     case_id: i64,
//!     ioc_value: String,
//!     ioc_type_id: i64,
//!     ioc_tags: Option<String>,
//! }
//!
//! async fn add_ioc(client: &IrisClient, args: &AddIoc) -> Result<String> {
//!     let body = to_body(args, &["case_id"])?;
//!     let payload = client
//!         .post("/case/ioc/add", &cid_query(args.case_id), Some(&body))
//!         .await?;
//!     Ok(payload.to_text())
//! }
//!
//! # async fn run() -> Result<()> {
//! let client = IrisClient::new(&Config::load()?)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod mapper;

// Re-export commonly used items
pub use client::{IrisClient, Payload};
pub use config::Config;
pub use envelope::Envelope;
pub use error::{ApiError, Error, ErrorKind, Result};
pub use mapper::{cid_query, to_body, to_query, Body, Query};
