/// Verdict Engine - Case Classification and Submission Fold
///
/// **Core Responsibility:**
/// Turn raw candidate invocations into per-case statuses and fold them into
/// one submission verdict.
///
/// **Critical Properties:**
/// - Knows nothing about threads or deadlines
/// - Knows nothing about the input format
/// - Pure functions: (invocation, expected) → CaseResult, [CaseResult] → SubmissionReport
///
/// **Classification Rules:**
/// - Deadline expired → `timeout`
/// - Candidate raised (error or panic) → `runtime_error`
/// - Returned value equal to expected → `passed`, otherwise `failed`
///
/// **Verdict Rules:**
/// - Starts at ACCEPTED
/// - The FIRST non-passing case in battery order fixes the verdict
///   (timeout → TLE, runtime_error → RUNTIME_ERROR, failed → WRONG_ANSWER)
/// - Later cases never change it, even if they look worse
/// - max runtime / max memory cover every case, passing or not
use crate::problem::Answer;
use arbiter_common::{CaseResult, CaseStatus, Comparison, SubmissionReport, Verdict};

pub const UNKNOWN_ERROR: &str = "Unknown error";

/// How one candidate invocation ended
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation<T> {
    Returned(T),
    Raised(String),
    TimedOut,
}

/// Raw execution output for a single test case
/// Produced by DeadlineEngine, consumed by the evaluator
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExecution<T> {
    pub invocation: Invocation<T>,
    pub elapsed_ms: u64,
    /// Process-wide peak so far, not case-exclusive
    pub peak_memory_kb: u64,
}

pub fn outputs_match<A: Answer>(actual: &A, expected: &A, comparison: Comparison) -> bool {
    match comparison {
        Comparison::Exact => actual == expected,
        Comparison::Unordered => actual.unordered() == expected.unordered(),
    }
}

/// Evaluate a single case execution against its oracle output
pub fn evaluate_case<A: Answer>(
    execution: CaseExecution<A>,
    expected: &A,
    comparison: Comparison,
    input_description: String,
) -> CaseResult {
    let (status, actual_output, error_message) = match execution.invocation {
        Invocation::TimedOut => (CaseStatus::Timeout, String::new(), String::new()),
        Invocation::Raised(message) => (CaseStatus::RuntimeError, String::new(), message),
        Invocation::Returned(actual) => {
            let status = if outputs_match(&actual, expected, comparison) {
                CaseStatus::Passed
            } else {
                CaseStatus::Failed
            };
            (status, actual.render(), String::new())
        }
    };

    CaseResult {
        status,
        elapsed_ms: execution.elapsed_ms,
        peak_memory_kb: execution.peak_memory_kb,
        actual_output,
        error_message,
        input_description,
    }
}

/// Fold per-case results, in battery order, into the submission report
pub fn aggregate(results: Vec<CaseResult>) -> SubmissionReport {
    let mut verdict = Verdict::Accepted;
    let mut max_runtime_ms = 0u64;
    let mut max_memory_kb = 0u64;

    for result in &results {
        if verdict == Verdict::Accepted && !result.status.is_passed() {
            verdict = Verdict::from(result.status);
        }
        max_runtime_ms = max_runtime_ms.max(result.elapsed_ms);
        max_memory_kb = max_memory_kb.max(result.peak_memory_kb);
    }

    SubmissionReport {
        verdict,
        max_runtime_ms,
        max_memory_kb,
        results,
    }
}
