//! Agent abstraction and concrete playing strategies.

mod constant;
mod gated;
mod mirror;
mod network;
mod neural;
mod random;
mod solo;
mod threshold;

pub use constant::ConstantAgent;
pub use gated::GatedRandomAgent;
pub use mirror::MirrorAgent;
pub use network::FeedforwardNetwork;
pub use neural::NeuralAgent;
pub use random::RandomAgent;
pub use solo::SoloNeuralAgent;
pub use threshold::ThresholdAgent;

use crate::game::{LeadBets, TrainingCycleOptions};

/// Boxed agent as it travels through rosters, sessions, and the codec.
pub type AgentBox = Box<dyn Agent + Send>;

/// Universal interface for all playing strategies.
///
/// Bet values returned by `lead` and `follow` are expected to lie in
/// `[0, 1]`; the simulator clamps them against the ante, so agents do not
/// clamp themselves.
pub trait Agent {
    /// The variant discriminator, which doubles as the wire-format tag.
    fn kind(&self) -> AgentKind;

    /// Acting first: commit an initial bet and a raw bet cap.
    fn lead(&mut self, strength: f64, noise: f64) -> LeadBets;

    /// Acting second: choose a following bet given the leader's initial bet.
    fn follow(&mut self, strength: f64, initial_bet: f64, noise: f64) -> f64;

    /// One finite-difference training pass against `opponent`.
    /// Strategies without trainable parameters ignore this.
    fn train(&mut self, _opponent: &mut dyn Agent, _options: &TrainingCycleOptions) {}

    /// Flat float encoding of this agent's persistent state, starting with
    /// the type tag. The codec owns the byte-level framing.
    fn encode_floats(&self) -> Vec<f64>;
}

/// Agent variant discriminator.
///
/// The numeric values are the wire-format tags; this enum is the single
/// source of truth mapping tag to variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Neural = 1,
    SoloNeural = 2,
    Constant = 3,
    Mirror = 4,
    Threshold = 5,
    Random = 6,
    GatedRandom = 7,
}

impl AgentKind {
    pub const ALL: [AgentKind; 7] = [
        AgentKind::Neural,
        AgentKind::SoloNeural,
        AgentKind::Constant,
        AgentKind::Mirror,
        AgentKind::Threshold,
        AgentKind::Random,
        AgentKind::GatedRandom,
    ];

    /// Wire tag for this variant: an integer-valued float.
    pub fn tag(self) -> f64 {
        self as u8 as f64
    }

    /// Inverse of [`AgentKind::tag`]. Returns `None` for unknown tags.
    pub fn from_tag(tag: f64) -> Option<AgentKind> {
        AgentKind::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AgentKind::Neural => "Neural",
            AgentKind::SoloNeural => "SoloNeural",
            AgentKind::Constant => "Constant",
            AgentKind::Mirror => "Mirror",
            AgentKind::Threshold => "Threshold",
            AgentKind::Random => "Random",
            AgentKind::GatedRandom => "GatedRandom",
        }
    }
}

/// Declarative agent description, used by the TOML roster and the CLI.
///
/// Building a spec always yields a freshly initialized agent; trained state
/// only ever comes back through the codec.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentSpec {
    Neural { hidden_size: usize },
    SoloNeural { hidden_size: usize },
    Constant { bet: f64 },
    Mirror,
    Threshold,
    Random,
    GatedRandom { min_strength: f64 },
}

impl AgentSpec {
    pub fn kind(&self) -> AgentKind {
        match self {
            AgentSpec::Neural { .. } => AgentKind::Neural,
            AgentSpec::SoloNeural { .. } => AgentKind::SoloNeural,
            AgentSpec::Constant { .. } => AgentKind::Constant,
            AgentSpec::Mirror => AgentKind::Mirror,
            AgentSpec::Threshold => AgentKind::Threshold,
            AgentSpec::Random => AgentKind::Random,
            AgentSpec::GatedRandom { .. } => AgentKind::GatedRandom,
        }
    }

    pub fn build(&self) -> AgentBox {
        match *self {
            AgentSpec::Neural { hidden_size } => Box::new(NeuralAgent::new(hidden_size)),
            AgentSpec::SoloNeural { hidden_size } => Box::new(SoloNeuralAgent::new(hidden_size)),
            AgentSpec::Constant { bet } => Box::new(ConstantAgent::new(bet)),
            AgentSpec::Mirror => Box::new(MirrorAgent::new()),
            AgentSpec::Threshold => Box::new(ThresholdAgent::new()),
            AgentSpec::Random => Box::new(RandomAgent::new()),
            AgentSpec::GatedRandom { min_strength } => {
                Box::new(GatedRandomAgent::new(min_strength))
            }
        }
    }
}
