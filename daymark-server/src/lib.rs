//! Daymark Server — the MCP boundary of the holiday lookup service.
//!
//! Exposes the classifier over the MCP resource protocol (JSON-RPC 2.0 over
//! stdio, one message per line). Read-only resources:
//!
//! - `date://is_holiday/{date}` — boolean
//! - `date://is_workday/{date}` — boolean
//! - `date://get_holiday_info/{date}` — full classification object
//!
//! An omitted or empty date segment means today. The transport is
//! synchronous: requests are served one at a time off stdin, and all
//! diagnostics go to stderr because stdout carries the protocol stream.

pub mod config;
pub mod protocol;
pub mod server;

pub use config::ServerConfig;
pub use protocol::{ErrorCode, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::McpServer;
