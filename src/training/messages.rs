//! Message types exchanged with offloaded workers.
//!
//! Agents cross the worker boundary as encoded byte blobs rather than live
//! instances. A worker always decodes its own private copy, so a training
//! run never mutates the caller's agent; the trained result comes back as a
//! fresh blob in each [`TrainingUpdate::CycleComplete`].

use crate::codec;
use crate::error::CodecError;
use crate::game::{EvaluationOptions, NamedAgent, RelativeReward, TrainingCycleOptions};

/// A named agent in wire form, safe to move across thread boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentBlob {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl AgentBlob {
    pub fn from_agent(agent: &NamedAgent) -> Self {
        Self {
            name: agent.name.clone(),
            bytes: codec::encode(agent.agent.as_ref()),
        }
    }

    /// Decodes a private live copy of the agent.
    pub fn to_agent(&self) -> Result<NamedAgent, CodecError> {
        Ok(NamedAgent {
            name: self.name.clone(),
            agent: codec::decode(&self.bytes)?,
        })
    }
}

/// A full training run, described entirely by value.
#[derive(Debug, Clone)]
pub struct TrainingRequest {
    pub trainee: AgentBlob,
    pub opponents: Vec<AgentBlob>,
    pub cycles: usize,
    pub options: TrainingCycleOptions,
}

impl TrainingRequest {
    pub fn new(
        trainee: &NamedAgent,
        opponents: &[NamedAgent],
        cycles: usize,
        options: TrainingCycleOptions,
    ) -> Self {
        Self {
            trainee: AgentBlob::from_agent(trainee),
            opponents: opponents.iter().map(AgentBlob::from_agent).collect(),
            cycles,
            options,
        }
    }
}

/// A one-shot evaluation batch, described entirely by value.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub agent_a: AgentBlob,
    pub agent_b: AgentBlob,
    pub options: EvaluationOptions,
}

impl EvaluationRequest {
    pub fn new(agent_a: &NamedAgent, agent_b: &NamedAgent, options: EvaluationOptions) -> Self {
        Self {
            agent_a: AgentBlob::from_agent(agent_a),
            agent_b: AgentBlob::from_agent(agent_b),
            options,
        }
    }
}

/// Updates sent from a training worker back to the caller, strictly in
/// cycle order.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingUpdate {
    /// One cycle finished: the trainee as of the end of the cycle, plus
    /// its post-training reward against every opponent.
    CycleComplete {
        cycle: usize,
        trainee: AgentBlob,
        rewards: Vec<RelativeReward>,
    },
    /// All requested cycles ran to completion. Not sent after
    /// cancellation.
    Finished,
    /// The run could not start or aborted, e.g. on a blob that fails to
    /// decode.
    Failed { message: String },
}
