/// Deadline-Bounded Execution Engine
///
/// **Core Responsibility:**
/// Invoke the candidate exactly once per case under a wall-clock deadline and
/// sample process resources around the call.
///
/// **Critical Architectural Boundary:**
/// - Engine knows HOW to run and bound the candidate
/// - Engine does NOT compare outputs or assign statuses
/// - Engine returns raw invocations for the evaluator to judge
///
/// **Interruption Model:**
/// A candidate may spin forever with no yield points, so a cooperative flag
/// cannot bound it. Each invocation runs on its own named OS thread
/// (`candidate-<n>`). The engine awaits the result with `tokio::time::timeout`;
/// on expiry the thread is detached, never joined, and counted as abandoned.
/// An abandoned worker keeps consuming CPU and memory until the process exits,
/// which later cases' measurements will include.
///
/// Candidate threads get a `CANDIDATE_STACK_BYTES` stack, well above the
/// 2 MiB Rust default, so deep recursion does not abort the judge.
///
/// **Resource Accounting:**
/// `peak_memory_kb` is `ru_maxrss` of the whole process, a high-water mark
/// since process start. It never decreases between cases.
use crate::evaluator::{CaseExecution, Invocation, UNKNOWN_ERROR};
use crate::problem::Problem;
use nix::sys::resource::{getrusage, UsageWho};
use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{debug, warn};

type WorkerOutcome<T> = Result<T, String>;

/// Stack reserved for each candidate thread (256 MiB, committed lazily)
pub const CANDIDATE_STACK_BYTES: usize = 256 * 1024 * 1024;

/// Point-in-time resource usage of this process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceSnapshot {
    /// Peak resident set size in KiB (Linux `ru_maxrss` units)
    pub max_rss_kb: u64,
}

impl ResourceSnapshot {
    pub fn capture() -> Self {
        match getrusage(UsageWho::RUSAGE_SELF) {
            Ok(usage) => Self {
                max_rss_kb: usage.max_rss().max(0) as u64,
            },
            Err(e) => {
                warn!(error = %e, "getrusage failed; memory sample unavailable");
                Self::default()
            }
        }
    }
}

pub struct DeadlineEngine {
    deadline: Duration,
    peak_memory_kb: u64,
    launched: u64,
    abandoned: u64,
}

impl DeadlineEngine {
    pub fn new(deadline: Duration) -> Self {
        Self {
            deadline,
            peak_memory_kb: 0,
            launched: 0,
            abandoned: 0,
        }
    }

    /// Workers left running after their deadline expired
    pub fn abandoned_workers(&self) -> u64 {
        self.abandoned
    }

    /// Run one candidate invocation and measure it
    ///
    /// 1. Record start time and a baseline snapshot
    /// 2. Start the worker and arm the deadline
    /// 3. Wait for the worker's outcome or the deadline, whichever is first
    /// 4. Disarm (the timer is owned by the awaited future and dropped with it)
    /// 5. Record end time and snapshot
    ///
    /// Never fails: a worker that cannot be started is reported as a raised error.
    pub async fn execute<P: Problem>(
        &mut self,
        problem: &Arc<P>,
        args: P::Args,
    ) -> CaseExecution<P::Output> {
        self.launched += 1;
        let worker_id = self.launched;

        let start_time = Instant::now();
        let baseline = ResourceSnapshot::capture();

        let invocation = match spawn_candidate(Arc::clone(problem), args, worker_id) {
            Ok(receiver) => self.await_with_deadline(receiver, worker_id).await,
            Err(e) => {
                warn!(worker_id, error = %e, "Failed to start candidate worker");
                Invocation::Raised(format!("failed to start candidate: {}", e))
            }
        };

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        let end = ResourceSnapshot::capture();

        // Monotonic even if the platform counter regresses
        self.peak_memory_kb = self.peak_memory_kb.max(end.max_rss_kb);

        debug!(
            worker_id,
            elapsed_ms,
            peak_memory_kb = self.peak_memory_kb,
            rss_growth_kb = end.max_rss_kb.saturating_sub(baseline.max_rss_kb),
            "Candidate invocation finished"
        );

        CaseExecution {
            invocation,
            elapsed_ms,
            peak_memory_kb: self.peak_memory_kb,
        }
    }

    async fn await_with_deadline<T>(
        &mut self,
        receiver: oneshot::Receiver<WorkerOutcome<T>>,
        worker_id: u64,
    ) -> Invocation<T> {
        match tokio::time::timeout(self.deadline, receiver).await {
            Ok(Ok(Ok(output))) => Invocation::Returned(output),
            Ok(Ok(Err(message))) => Invocation::Raised(message),
            // Sender dropped without reporting
            Ok(Err(_)) => Invocation::Raised(UNKNOWN_ERROR.to_string()),
            Err(_) => {
                self.abandoned += 1;
                warn!(
                    worker_id,
                    deadline_ms = self.deadline.as_millis() as u64,
                    abandoned_workers = self.abandoned,
                    "Candidate exceeded deadline; worker abandoned and may still be running"
                );
                Invocation::TimedOut
            }
        }
    }
}

/// Start the candidate on a detached worker thread
///
/// The thread reports exactly once; if the receiver is gone (deadline fired)
/// the report is discarded.
fn spawn_candidate<P: Problem>(
    problem: Arc<P>,
    args: P::Args,
    worker_id: u64,
) -> io::Result<oneshot::Receiver<WorkerOutcome<P::Output>>> {
    let (sender, receiver) = oneshot::channel();

    thread::Builder::new()
        .name(format!("candidate-{}", worker_id))
        .stack_size(CANDIDATE_STACK_BYTES)
        .spawn(move || {
            let outcome = match panic::catch_unwind(AssertUnwindSafe(|| problem.invoke(args))) {
                Ok(Ok(output)) => Ok(output),
                Ok(Err(e)) => Err(format!("{:#}", e)),
                Err(payload) => Err(panic_message(payload.as_ref())),
            };
            let _ = sender.send(outcome);
        })?;

    Ok(receiver)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        UNKNOWN_ERROR.to_string()
    }
}
