//! Agent boundary: snapshot ingestion, command egress, and the stdin
//! command parser used by the agent binary.

pub mod command;
pub mod parser;
pub mod snapshot;

pub use command::format_commands;
pub use parser::{parse_command, Command};
pub use snapshot::{parse_snapshot, Snapshot, SnapshotError};
