use serde::{Deserialize, Serialize};

use crate::game::TrainingCycleOptions;

/// Bumped whenever the persisted options layout changes incompatibly. A
/// record written under a different version is discarded on load rather
/// than migrated.
pub const OPTIONS_SCHEMA_VERSION: u32 = 1;

/// Snapshot of the training options in effect when a run was saved.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptionsRecord {
    pub schema_version: u32,
    pub cycles: usize,
    pub options: TrainingCycleOptions,
}

impl OptionsRecord {
    pub fn new(cycles: usize, options: TrainingCycleOptions) -> Self {
        OptionsRecord {
            schema_version: OPTIONS_SCHEMA_VERSION,
            cycles,
            options,
        }
    }

    /// Parses a persisted record. Unparseable input and version skew both
    /// yield `None`; the caller falls back to defaults.
    pub fn from_json(json: &str) -> Option<Self> {
        let record: OptionsRecord = serde_json::from_str(json).ok()?;
        if record.schema_version != OPTIONS_SCHEMA_VERSION {
            return None;
        }
        Some(record)
    }
}
