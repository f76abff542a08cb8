//! Common types and utilities for gnbsim
//!
//! Identifier value types, the gNB profile used to derive NGAP builder
//! inputs, and the tracing-based logging helpers shared by the workspace.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{GnbConfig, DEFAULT_NR_CELL_IDENTITY, EMPTY_RELEASE_RESPONSE_TRANSFER};
pub use error::Error;
pub use logging::{
    init_logging, init_logging_with_filter, log_ngap_message, log_protocol_message, Direction,
    HexDump, LogLevel,
};
pub use types::{Plmn, SNssai, Tai};
