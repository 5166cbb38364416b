use serde::Deserialize;
use std::fmt;

/// Per-Case Status
/// Distinguishes the failure modes of a single candidate invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseStatus {
    Passed,
    Failed,
    RuntimeError,
    Timeout,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Passed => "passed",
            CaseStatus::Failed => "failed",
            CaseStatus::RuntimeError => "runtime_error",
            CaseStatus::Timeout => "timeout",
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, CaseStatus::Passed)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Submission Verdict
/// One per run, fixed by the first non-passing case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Accepted,
    WrongAnswer,
    RuntimeError,
    TimeLimitExceeded,
}

impl Verdict {
    /// Wire name used in the report
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Accepted => "ACCEPTED",
            Verdict::WrongAnswer => "WRONG_ANSWER",
            Verdict::RuntimeError => "RUNTIME_ERROR",
            Verdict::TimeLimitExceeded => "TLE",
        }
    }
}

impl From<CaseStatus> for Verdict {
    fn from(status: CaseStatus) -> Self {
        match status {
            CaseStatus::Passed => Verdict::Accepted,
            CaseStatus::Failed => Verdict::WrongAnswer,
            CaseStatus::RuntimeError => Verdict::RuntimeError,
            CaseStatus::Timeout => Verdict::TimeLimitExceeded,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output comparison policy
///
/// - `Exact`: order-sensitive equality
/// - `Unordered`: sequences are sorted on both sides before comparing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Comparison {
    #[default]
    Exact,
    Unordered,
}

impl Comparison {
    /// Parse a comparison mode from string (case-insensitive)
    pub fn from_name(s: &str) -> Option<Comparison> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Some(Comparison::Exact),
            "unordered" => Some(Comparison::Unordered),
            _ => None,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Exact => write!(f, "EXACT"),
            Comparison::Unordered => write!(f, "UNORDERED"),
        }
    }
}

/// Per-Case Result
/// Created once by the worker, never mutated afterwards
///
/// `peak_memory_kb` is the process-wide high-water mark at the end of the
/// case, not memory used by this case alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub status: CaseStatus,
    pub elapsed_ms: u64,
    pub peak_memory_kb: u64,
    pub actual_output: String,
    pub error_message: String,
    pub input_description: String,
}

/// Submission Report
/// Written once to stdout, then the process exits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub verdict: Verdict,
    pub max_runtime_ms: u64,
    pub max_memory_kb: u64,
    pub results: Vec<CaseResult>,
}
