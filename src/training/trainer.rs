use crate::agents::Agent;
use crate::game::{
    evaluate, EvaluationOptions, NamedAgent, RelativeReward, TrainingCycleOptions,
};

/// Result of one completed training cycle: the trainee's post-update
/// standing against every opponent in the roster.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle: usize,
    pub rewards: Vec<RelativeReward>,
}

/// What the cycle callback wants the trainer to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleSignal {
    Continue,
    Terminate,
}

/// How a training run ended. Termination is a normal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingOutcome {
    Done,
    Terminated,
}

/// Multi-cycle, multi-opponent curriculum loop.
///
/// Each cycle evaluates the trainee against the whole roster, trains it
/// against the opponent it currently scores lowest against, then
/// re-evaluates and reports. Early termination takes effect between
/// cycles; the in-flight cycle always finishes.
pub struct Trainer {
    pub cycles: usize,
    pub options: TrainingCycleOptions,
}

impl Trainer {
    pub fn new(cycles: usize, options: TrainingCycleOptions) -> Self {
        Trainer { cycles, options }
    }

    /// Run the full training loop, mutating `trainee` in place.
    ///
    /// `on_cycle` receives the updated trainee and the cycle's report, and
    /// can request cooperative termination.
    pub fn train(
        &self,
        trainee: &mut NamedAgent,
        opponents: &mut [NamedAgent],
        on_cycle: impl FnMut(&NamedAgent, CycleReport) -> CycleSignal,
    ) -> TrainingOutcome {
        self.train_with_evaluator(trainee, opponents, on_cycle, |a, b, options| {
            evaluate(a, b, options)
        })
    }

    /// Same loop with the evaluation function injected, so tests can pin
    /// down curriculum selection with deterministic rewards.
    pub(crate) fn train_with_evaluator(
        &self,
        trainee: &mut NamedAgent,
        opponents: &mut [NamedAgent],
        mut on_cycle: impl FnMut(&NamedAgent, CycleReport) -> CycleSignal,
        mut evaluator: impl FnMut(&mut dyn Agent, &mut dyn Agent, &EvaluationOptions) -> f64,
    ) -> TrainingOutcome {
        assert!(!opponents.is_empty(), "opponent roster must not be empty");
        assert!(
            self.options.derivative_step > 0.0,
            "derivative_step must be positive, got {}",
            self.options.derivative_step
        );

        for cycle in 0..self.cycles {
            // The toughest matchup is the one with the lowest relative
            // reward; ties go to the earliest roster entry.
            let mut toughest = 0;
            let mut lowest = f64::INFINITY;
            for (index, opponent) in opponents.iter_mut().enumerate() {
                let reward = evaluator(
                    trainee.agent.as_mut(),
                    opponent.agent.as_mut(),
                    &self.options.evaluation,
                );
                if reward < lowest {
                    lowest = reward;
                    toughest = index;
                }
            }

            trainee
                .agent
                .train(opponents[toughest].agent.as_mut(), &self.options);

            let rewards = opponents
                .iter_mut()
                .map(|opponent| RelativeReward {
                    opponent: opponent.name.clone(),
                    reward: evaluator(
                        trainee.agent.as_mut(),
                        opponent.agent.as_mut(),
                        &self.options.evaluation,
                    ),
                })
                .collect();

            if on_cycle(trainee, CycleReport { cycle, rewards }) == CycleSignal::Terminate {
                return TrainingOutcome::Terminated;
            }
        }

        TrainingOutcome::Done
    }
}
