//! Runs training and evaluation either on the calling thread or on a
//! dedicated background worker.
//!
//! Both modes produce identical update sequences: in-process execution
//! buffers every update in the channel before the session is returned,
//! while background execution streams them from a `std::thread` worker.
//! Cancellation is cooperative; the in-flight cycle finishes, the stop
//! flag ends the run at the next cycle boundary, and the session stops
//! delivering updates immediately, including ones already in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use crate::error::OffloadError;
use crate::game::evaluate;
use crate::training::messages::{
    AgentBlob, EvaluationRequest, TrainingRequest, TrainingUpdate,
};
use crate::training::trainer::{CycleSignal, Trainer, TrainingOutcome};

/// Where an offloaded operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Run synchronously on the calling thread.
    InProcess,
    /// Run on a freshly spawned worker thread.
    Background,
}

/// Caller handle for a training run.
///
/// Dropping the session cancels the run and joins the worker.
pub struct TrainingSession {
    updates: mpsc::Receiver<TrainingUpdate>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    cancelled: bool,
}

impl TrainingSession {
    /// Blocks for the next update. `None` once the run has ended or the
    /// session was cancelled.
    pub fn next_update(&mut self) -> Option<TrainingUpdate> {
        if self.cancelled {
            return None;
        }
        self.updates.recv().ok()
    }

    /// Non-blocking variant of [`next_update`](Self::next_update).
    pub fn try_next_update(&mut self) -> Option<TrainingUpdate> {
        if self.cancelled {
            return None;
        }
        self.updates.try_recv().ok()
    }

    /// Requests cooperative termination and stops delivering updates,
    /// including any already queued.
    pub fn cancel(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.cancelled = true;
    }

    /// Drains the remaining updates in order.
    pub fn collect_updates(mut self) -> Vec<TrainingUpdate> {
        let mut updates = Vec::new();
        while let Some(update) = self.next_update() {
            updates.push(update);
        }
        updates
    }
}

impl Drop for TrainingSession {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Starts a training run in the given mode.
///
/// The request carries agents by value, so the run never touches the
/// caller's instances; the evolving trainee comes back inside each
/// [`TrainingUpdate::CycleComplete`].
pub fn train_in_mode(mode: ExecutionMode, request: TrainingRequest) -> TrainingSession {
    let (tx, rx) = mpsc::channel();
    let stop = Arc::new(AtomicBool::new(false));

    let worker = match mode {
        ExecutionMode::InProcess => {
            run_training(request, &tx, &stop);
            None
        }
        ExecutionMode::Background => {
            let worker_stop = Arc::clone(&stop);
            Some(thread::spawn(move || {
                run_training(request, &tx, &worker_stop);
            }))
        }
    };

    TrainingSession {
        updates: rx,
        stop,
        worker,
        cancelled: false,
    }
}

fn run_training(
    request: TrainingRequest,
    tx: &mpsc::Sender<TrainingUpdate>,
    stop: &AtomicBool,
) {
    let mut trainee = match request.trainee.to_agent() {
        Ok(agent) => agent,
        Err(err) => {
            let _ = tx.send(TrainingUpdate::Failed {
                message: format!("trainee '{}': {err}", request.trainee.name),
            });
            return;
        }
    };

    let mut opponents = Vec::with_capacity(request.opponents.len());
    for blob in &request.opponents {
        match blob.to_agent() {
            Ok(agent) => opponents.push(agent),
            Err(err) => {
                let _ = tx.send(TrainingUpdate::Failed {
                    message: format!("opponent '{}': {err}", blob.name),
                });
                return;
            }
        }
    }

    let trainer = Trainer::new(request.cycles, request.options);
    let outcome = trainer.train(&mut trainee, &mut opponents, |trainee, report| {
        let _ = tx.send(TrainingUpdate::CycleComplete {
            cycle: report.cycle,
            trainee: AgentBlob::from_agent(trainee),
            rewards: report.rewards,
        });
        if stop.load(Ordering::Relaxed) {
            CycleSignal::Terminate
        } else {
            CycleSignal::Continue
        }
    });

    // A terminated run ends silently; `Finished` means all cycles ran.
    if outcome == TrainingOutcome::Done {
        let _ = tx.send(TrainingUpdate::Finished);
    }
}

/// Handle for a background evaluation batch.
pub struct EvaluationJob {
    result: mpsc::Receiver<Result<f64, OffloadError>>,
    worker: Option<JoinHandle<()>>,
}

impl EvaluationJob {
    /// Blocks for the batch result.
    pub fn wait(mut self) -> Result<f64, OffloadError> {
        let outcome = self
            .result
            .recv()
            .map_err(|_| OffloadError::Disconnected)?;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        outcome
    }
}

/// Spawns a worker running one evaluation batch.
pub fn spawn_evaluation(request: EvaluationRequest) -> EvaluationJob {
    let (tx, rx) = mpsc::channel();
    let worker = thread::spawn(move || {
        let _ = tx.send(run_evaluation(&request));
    });
    EvaluationJob {
        result: rx,
        worker: Some(worker),
    }
}

/// Runs one evaluation batch in the given mode, returning the relative
/// reward of the request's first agent.
pub fn evaluate_in_mode(
    mode: ExecutionMode,
    request: EvaluationRequest,
) -> Result<f64, OffloadError> {
    match mode {
        ExecutionMode::InProcess => run_evaluation(&request),
        ExecutionMode::Background => spawn_evaluation(request).wait(),
    }
}

fn run_evaluation(request: &EvaluationRequest) -> Result<f64, OffloadError> {
    let mut agent_a = request
        .agent_a
        .to_agent()
        .map_err(|err| OffloadError::Worker(format!("'{}': {err}", request.agent_a.name)))?;
    let mut agent_b = request
        .agent_b
        .to_agent()
        .map_err(|err| OffloadError::Worker(format!("'{}': {err}", request.agent_b.name)))?;
    Ok(evaluate(
        agent_a.agent.as_mut(),
        agent_b.agent.as_mut(),
        &request.options,
    ))
}
