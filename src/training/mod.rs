//! Training infrastructure: the multi-opponent self-play orchestrator,
//! worker message types, and the layer that runs operations either
//! in-process or on a background worker.

pub mod messages;
pub mod offload;
pub mod trainer;

pub use messages::{AgentBlob, EvaluationRequest, TrainingRequest, TrainingUpdate};
pub use offload::{evaluate_in_mode, spawn_evaluation, train_in_mode, EvaluationJob,
    ExecutionMode, TrainingSession};
pub use trainer::{CycleReport, CycleSignal, Trainer, TrainingOutcome};
