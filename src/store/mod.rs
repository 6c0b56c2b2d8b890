//! Persistence: one binary blob per named agent, plus a versioned JSON
//! record of the last-used training options.

mod options;
mod roster;

pub use options::{OptionsRecord, OPTIONS_SCHEMA_VERSION};
pub use roster::RosterStore;
