use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::codec;
use crate::error::StoreError;
use crate::game::NamedAgent;
use crate::store::options::OptionsRecord;

const AGENT_EXTENSION: &str = "agent";
const OPTIONS_FILE: &str = "options.json";

/// Directory-backed store of named agents.
///
/// Each agent lives in `<name>.agent` as its wire encoding; the last-used
/// training options live alongside in `options.json`. Writes go through a
/// temporary file and a rename so a crash never leaves a half-written
/// blob behind.
pub struct RosterStore {
    dir: PathBuf,
}

impl RosterStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        RosterStore { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persists the agent under its name, replacing any previous blob.
    pub fn save_agent(&self, agent: &NamedAgent) -> Result<PathBuf, StoreError> {
        validate_name(&agent.name)?;
        let path = self.agent_path(&agent.name);
        self.write_atomic(&path, &codec::encode(agent.agent.as_ref()))?;
        Ok(path)
    }

    pub fn load_agent(&self, name: &str) -> Result<NamedAgent, StoreError> {
        validate_name(name)?;
        let path = self.agent_path(name);
        let bytes = fs::read(&path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                StoreError::AgentNotFound(name.to_string())
            } else {
                StoreError::Io(err)
            }
        })?;
        let agent = codec::decode(&bytes)
            .map_err(|source| StoreError::BlobDecode { path, source })?;
        Ok(NamedAgent {
            name: name.to_string(),
            agent,
        })
    }

    /// Loads every stored agent, sorted by name.
    pub fn load_all(&self) -> Result<Vec<NamedAgent>, StoreError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(AGENT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();

        names
            .iter()
            .map(|name| self.load_agent(name))
            .collect()
    }

    pub fn delete_agent(&self, name: &str) -> Result<(), StoreError> {
        validate_name(name)?;
        fs::remove_file(self.agent_path(name)).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                StoreError::AgentNotFound(name.to_string())
            } else {
                StoreError::Io(err)
            }
        })
    }

    pub fn save_options(&self, record: &OptionsRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(record)?;
        self.write_atomic(&self.dir.join(OPTIONS_FILE), json.as_bytes())
    }

    /// `None` when no record exists or the stored one is unusable (garbage
    /// or written under a different schema version).
    pub fn load_options(&self) -> Result<Option<OptionsRecord>, StoreError> {
        let path = self.dir.join(OPTIONS_FILE);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };
        Ok(OptionsRecord::from_json(&json))
    }

    fn agent_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{AGENT_EXTENSION}"))
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let mut tmp = path.to_path_buf();
        tmp.set_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

/// A stored name doubles as a file stem, so it must be a single plain
/// path component.
fn validate_name(name: &str) -> Result<(), StoreError> {
    let usable = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0');
    if usable {
        Ok(())
    } else {
        Err(StoreError::InvalidAgentName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{AgentBox, ConstantAgent, NeuralAgent, ThresholdAgent};
    use crate::game::{EvaluationOptions, TrainingCycleOptions};
    use crate::store::options::OPTIONS_SCHEMA_VERSION;

    fn named(name: &str, agent: AgentBox) -> NamedAgent {
        NamedAgent {
            name: name.to_string(),
            agent,
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path());

        let original = named("trainee", Box::new(NeuralAgent::new(8)));
        let path = store.save_agent(&original).unwrap();
        assert!(path.exists());
        assert_eq!(path.file_name().unwrap(), "trainee.agent");

        let restored = store.load_agent("trainee").unwrap();
        assert_eq!(restored.name, "trainee");
        assert_eq!(
            codec::encode(restored.agent.as_ref()),
            codec::encode(original.agent.as_ref())
        );
    }

    #[test]
    fn test_save_replaces_existing_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path());

        store.save_agent(&named("bot", Box::new(ConstantAgent::new(0.1)))).unwrap();
        store.save_agent(&named("bot", Box::new(ConstantAgent::new(0.9)))).unwrap();

        let restored = store.load_agent("bot").unwrap();
        let expected = codec::encode(&ConstantAgent::new(0.9));
        assert_eq!(codec::encode(restored.agent.as_ref()), expected);
    }

    #[test]
    fn test_load_all_is_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path());

        store.save_agent(&named("charlie", Box::new(ConstantAgent::new(0.3)))).unwrap();
        store.save_agent(&named("alice", Box::new(ThresholdAgent::new()))).unwrap();
        store.save_agent(&named("bob", Box::new(ConstantAgent::new(0.2)))).unwrap();

        let roster = store.load_all().unwrap();
        let names: Vec<&str> = roster.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["alice", "bob", "charlie"]);
    }

    #[test]
    fn test_load_all_ignores_unrelated_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path());

        store.save_agent(&named("only", Box::new(ConstantAgent::new(0.5)))).unwrap();
        fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        fs::write(dir.path().join(OPTIONS_FILE), b"{}").unwrap();

        let roster = store.load_all().unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "only");
    }

    #[test]
    fn test_missing_agent_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path());
        assert!(matches!(
            store.load_agent("ghost"),
            Err(StoreError::AgentNotFound(name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_corrupt_blob_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path());
        fs::write(dir.path().join("broken.agent"), [1u8, 2, 3]).unwrap();

        assert!(matches!(
            store.load_agent("broken"),
            Err(StoreError::BlobDecode { .. })
        ));
    }

    #[test]
    fn test_rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path());

        for name in ["", ".", "..", "a/b", "a\\b"] {
            assert!(
                matches!(
                    store.load_agent(name),
                    Err(StoreError::InvalidAgentName(_))
                ),
                "name {name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_delete_agent() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path());

        store.save_agent(&named("gone", Box::new(ConstantAgent::new(0.4)))).unwrap();
        store.delete_agent("gone").unwrap();
        assert!(matches!(
            store.load_agent("gone"),
            Err(StoreError::AgentNotFound(_))
        ));
        assert!(matches!(
            store.delete_agent("gone"),
            Err(StoreError::AgentNotFound(_))
        ));
    }

    #[test]
    fn test_options_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path());
        assert!(store.load_options().unwrap().is_none());

        let record = OptionsRecord::new(
            12,
            TrainingCycleOptions {
                derivative_step: 0.002,
                learning_rate: 0.05,
                evaluation: EvaluationOptions {
                    hands: 500,
                    ante: 0.01,
                },
            },
        );
        store.save_options(&record).unwrap();

        let restored = store.load_options().unwrap().unwrap();
        assert_eq!(restored.cycles, 12);
        assert_eq!(restored.options.evaluation.hands, 500);
    }

    #[test]
    fn test_stale_options_record_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path());

        let json = format!(
            r#"{{"schema_version": {}, "cycles": 3, "options": {{"derivative_step": 0.001, "learning_rate": 0.1, "evaluation": {{"hands": 10, "ante": 0.01}}}}}}"#,
            OPTIONS_SCHEMA_VERSION + 1
        );
        fs::write(dir.path().join(OPTIONS_FILE), json).unwrap();

        assert!(store.load_options().unwrap().is_none());
    }
}
