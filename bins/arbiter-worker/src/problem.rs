/// Candidate Binding
///
/// **Core Responsibility:**
/// Describe how one problem's candidate is fed and judged, without knowing
/// which submission is linked in.
///
/// - `decode_args` / `decode_expected` pull typed values out of a case grouping
/// - `invoke` calls the candidate exactly once
/// - An `Err` from `invoke` or a panic unwinding out of it is a runtime error
///
/// Implementors are shared with the worker thread through `Arc`.
use arbiter_common::{AccessError, Render, Value};

/// Candidate output that can be compared against the oracle and echoed in the report
pub trait Answer: Clone + PartialEq + Render + Send + 'static {
    /// Canonical form for order-insensitive comparison
    fn unordered(&self) -> Self {
        self.clone()
    }
}

impl Answer for i32 {}
impl Answer for i64 {}
impl Answer for bool {}
impl Answer for String {}

impl<T: Answer + Ord> Answer for Vec<T> {
    fn unordered(&self) -> Self {
        let mut sorted = self.clone();
        sorted.sort();
        sorted
    }
}

pub trait Problem: Send + Sync + 'static {
    type Args: Send + 'static;
    type Output: Answer;

    fn name(&self) -> &'static str;

    fn decode_args(&self, input: &Value) -> Result<Self::Args, AccessError>;

    fn decode_expected(&self, expected: &Value) -> Result<Self::Output, AccessError>;

    /// Human-readable echo of the arguments, e.g. `[[2,7,11,15], 9]`
    fn describe_args(&self, args: &Self::Args) -> String;

    fn invoke(&self, args: Self::Args) -> anyhow::Result<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unordered_sorts_sequences() {
        assert_eq!(vec![3i64, 1, 2].unordered(), vec![1, 2, 3]);
        assert_eq!(
            vec!["b".to_string(), "a".to_string()].unordered(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_unordered_is_identity_for_scalars() {
        assert_eq!(7i64.unordered(), 7);
        assert!(true.unordered());
    }
}
