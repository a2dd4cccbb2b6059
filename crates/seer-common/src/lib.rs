//! Seer Common Library
//!
//! Shared error handling and logging setup for the Seer workspace members.
//!
//! - **Error Handling**: [`SeerError`] and the [`Result`] alias
//! - **Logging**: tracing subscriber configuration, see [`logging`]
//!
//! # Example
//!
//! ```no_run
//! use seer_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     init_logging(&config)?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod logging;

pub use error::{Result, SeerError};
