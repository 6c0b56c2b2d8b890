use crate::agents::network::FeedforwardNetwork;
use crate::agents::{Agent, AgentKind};
use crate::game::{evaluate, EvaluationOptions, LeadBets, TrainingCycleOptions};

const INPUTS: usize = 3;
const OUTPUTS: usize = 2;

/// Neural-network agent that shares a single network between both roles.
///
/// Leading feeds `(strength, noise, 0)` and reads both outputs as the
/// initial bet and cap; following feeds `(strength, initial bet, noise)`
/// and reads only the first output.
pub struct SoloNeuralAgent {
    network: FeedforwardNetwork,
}

impl SoloNeuralAgent {
    pub fn new(hidden_size: usize) -> Self {
        SoloNeuralAgent {
            network: FeedforwardNetwork::new(INPUTS, hidden_size, OUTPUTS),
        }
    }

    /// Rebuilds the agent from a decoded network. Used by the codec.
    pub fn from_network(network: FeedforwardNetwork) -> Self {
        SoloNeuralAgent { network }
    }

    pub fn network(&self) -> &FeedforwardNetwork {
        &self.network
    }

    /// Training pass with the evaluation function injected; see
    /// [`crate::agents::NeuralAgent::train_with_evaluator`].
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

        let baseline = evaluator(self, opponent, &options.evaluation);

        let count = self.network.parameter_count();
        let mut updated = Vec::with_capacity(count);
        for index in 0..count {
            let original = self.network.parameter(index);
            self.network
                .set_parameter(index, original + options.derivative_step);
            let probe = evaluator(self, opponent, &options.evaluation);
            self.network.set_parameter(index, original);

            let derivative = (probe - baseline) / options.derivative_step;
            updated.push(original + derivative * options.learning_rate);
        }

        for (index, value) in updated.into_iter().enumerate() {
            self.network.set_parameter(index, value);
        }
    }
}

impl Agent for SoloNeuralAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::SoloNeural
    }

    fn lead(&mut self, strength: f64, noise: f64) -> LeadBets {
        let out = self.network.forward(&[strength, noise, 0.0]);
        LeadBets {
            initial_bet: out[0],
            max_bet: out[1],
        }
    }

    fn follow(&mut self, strength: f64, initial_bet: f64, noise: f64) -> f64 {
        self.network.forward(&[strength, initial_bet, noise])[0]
    }

    /// Same finite-difference scheme as [`crate::agents::NeuralAgent`],
    /// over the single shared network.
    fn train(&mut self, opponent: &mut dyn Agent, options: &TrainingCycleOptions) {
        self.train_with_evaluator(opponent, options, |a, b, evaluation| {
            evaluate(a, b, evaluation)
        });
    }

    fn encode_floats(&self) -> Vec<f64> {
        let payload = self.network.encode_floats();
        let mut floats = Vec::with_capacity(1 + payload.len());
        floats.push(AgentKind::SoloNeural.tag());
        floats.extend_from_slice(&payload);
        floats
    }
}
