// Shared fixtures for worker tests
use crate::problem::Problem;
use arbiter_common::render::describe_args;
use arbiter_common::{AccessError, Render, Value};

/// A two-sum shaped problem whose candidate is an arbitrary closure
pub struct FnProblem<F> {
    candidate: F,
}

impl<F> FnProblem<F>
where
    F: Fn(Vec<i64>, i64) -> anyhow::Result<Vec<i64>> + Send + Sync + 'static,
{
    pub fn new(candidate: F) -> Self {
        Self { candidate }
    }
}

impl<F> Problem for FnProblem<F>
where
    F: Fn(Vec<i64>, i64) -> anyhow::Result<Vec<i64>> + Send + Sync + 'static,
{
    type Args = (Vec<i64>, i64);
    type Output = Vec<i64>;

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn decode_args(&self, input: &Value) -> Result<Self::Args, AccessError> {
        Ok((input.at(0)?.as_int_seq()?, input.at(1)?.as_int()?))
    }

    fn decode_expected(&self, expected: &Value) -> Result<Self::Output, AccessError> {
        expected.as_int_seq()
    }

    fn describe_args(&self, (nums, target): &Self::Args) -> String {
        describe_args(&[nums as &dyn Render, target])
    }

    fn invoke(&self, (nums, target): Self::Args) -> anyhow::Result<Self::Output> {
        (self.candidate)(nums, target)
    }
}
