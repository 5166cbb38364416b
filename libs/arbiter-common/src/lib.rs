pub mod types;
pub mod value;
pub mod access;
pub mod render;
pub mod report;

// Re-export commonly used types for convenience
pub use access::AccessError;
pub use render::Render;
pub use types::{CaseResult, CaseStatus, Comparison, SubmissionReport, Verdict};
pub use value::{parse, ParseError, SequenceKind, Value};
