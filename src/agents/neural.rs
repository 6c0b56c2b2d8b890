use crate::agents::network::FeedforwardNetwork;
use crate::agents::{Agent, AgentKind};
use crate::game::{evaluate, EvaluationOptions, LeadBets, TrainingCycleOptions};

const LEADER_INPUTS: usize = 2;
const LEADER_OUTPUTS: usize = 2;
const FOLLOWER_INPUTS: usize = 3;
const FOLLOWER_OUTPUTS: usize = 1;

/// Which of the agent's two sub-networks a training pass targets.
#[derive(Clone, Copy)]
enum NetworkSlot {
    Leader,
    Follower,
}

/// Neural-network agent with one sub-network per role: a leader network
/// mapping `(strength, noise)` to `(initial bet, bet cap)` and a follower
/// network mapping `(strength, initial bet, noise)` to a following bet.
pub struct NeuralAgent {
    leader: FeedforwardNetwork,
    follower: FeedforwardNetwork,
}

impl NeuralAgent {
    /// Fresh agent with randomly initialized weights.
    pub fn new(hidden_size: usize) -> Self {
        NeuralAgent {
            leader: FeedforwardNetwork::new(LEADER_INPUTS, hidden_size, LEADER_OUTPUTS),
            follower: FeedforwardNetwork::new(FOLLOWER_INPUTS, hidden_size, FOLLOWER_OUTPUTS),
        }
    }

    /// Rebuilds the agent from decoded sub-networks. Used by the codec.
    pub fn from_networks(leader: FeedforwardNetwork, follower: FeedforwardNetwork) -> Self {
        NeuralAgent { leader, follower }
    }

    pub fn leader_network(&self) -> &FeedforwardNetwork {
        &self.leader
    }

    pub fn follower_network(&self) -> &FeedforwardNetwork {
        &self.follower
    }

    fn network(&self, slot: NetworkSlot) -> &FeedforwardNetwork {
        match slot {
            NetworkSlot::Leader => &self.leader,
            NetworkSlot::Follower => &self.follower,
        }
    }

    fn network_mut(&mut self, slot: NetworkSlot) -> &mut FeedforwardNetwork {
        match slot {
            NetworkSlot::Leader => &mut self.leader,
            NetworkSlot::Follower => &mut self.follower,
        }
    }

    /// One finite-difference pass over a single sub-network.
    ///
    /// Every parameter is probed against the same baseline with every other
    /// parameter at its original value; the candidate updates are buffered
    /// and committed in one batch afterwards. This is gradient ascent on
    /// the evaluation score.
    fn train_network(
        &mut self,
        slot: NetworkSlot,
        opponent: &mut dyn Agent,
        options: &TrainingCycleOptions,
        evaluator: &mut impl FnMut(&mut dyn Agent, &mut dyn Agent, &EvaluationOptions) -> f64,
    ) {
        let baseline = evaluator(self, opponent, &options.evaluation);

        let count = self.network(slot).parameter_count();
        let mut updated = Vec::with_capacity(count);
        for index in 0..count {
            let original = self.network(slot).parameter(index);
            self.network_mut(slot)
                .set_parameter(index, original + options.derivative_step);
            let probe = evaluator(self, opponent, &options.evaluation);
            self.network_mut(slot).set_parameter(index, original);

            let derivative = (probe - baseline) / options.derivative_step;
            updated.push(original + derivative * options.learning_rate);
        }

        let network = self.network_mut(slot);
        for (index, value) in updated.into_iter().enumerate() {
            network.set_parameter(index, value);
        }
    }

    /// Full training pass with the evaluation function injected, so tests
    /// can observe exactly which parameter values every probe sees.
    pub(crate) fn train_with_evaluator(
        &mut self,
        opponent: &mut dyn Agent,
        options: &TrainingCycleOptions,
        mut evaluator: impl FnMut(&mut dyn Agent, &mut dyn Agent, &EvaluationOptions) -> f64,
    ) {
        assert!(
            options.derivative_step > 0.0,
            "derivative_step must be positive, got {}",
            options.derivative_step
        );
        self.train_network(NetworkSlot::Leader, opponent, options, &mut evaluator);
        self.train_network(NetworkSlot::Follower, opponent, options, &mut evaluator);
    }
}

impl Agent for NeuralAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Neural
    }

    fn lead(&mut self, strength: f64, noise: f64) -> LeadBets {
        let out = self.leader.forward(&[strength, noise]);
        LeadBets {
            initial_bet: out[0],
            max_bet: out[1],
        }
    }

    fn follow(&mut self, strength: f64, initial_bet: f64, noise: f64) -> f64 {
        self.follower.forward(&[strength, initial_bet, noise])[0]
    }

    fn train(&mut self, opponent: &mut dyn Agent, options: &TrainingCycleOptions) {
        self.train_with_evaluator(opponent, options, |a, b, evaluation| {
            evaluate(a, b, evaluation)
        });
    }

    fn encode_floats(&self) -> Vec<f64> {
        let leader = self.leader.encode_floats();
        let follower = self.follower.encode_floats();

        let mut floats = Vec::with_capacity(3 + leader.len() + follower.len());
        floats.push(AgentKind::Neural.tag());
        floats.push(leader.len() as f64);
        floats.push(follower.len() as f64);
        floats.extend_from_slice(&leader);
        floats.extend_from_slice(&follower);
        floats
    }
}
