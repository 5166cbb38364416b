/// Embedded Submission
///
/// This file is regenerated per submission by the build step: it links the
/// candidate `Solution` and binds it to the problem's argument shape.
/// Nothing else in the worker depends on what lives here beyond `Problem`.
use crate::problem::Problem;
use arbiter_common::render::describe_args;
use arbiter_common::{AccessError, Render, Value};
use std::collections::HashMap;

pub struct Solution;

impl Solution {
    pub fn two_sum(&self, nums: Vec<i64>, target: i64) -> Vec<i64> {
        let mut index_by_value: HashMap<i64, i64> = HashMap::new();

        for (i, &num) in nums.iter().enumerate() {
            let complement = target - num;
            if let Some(&j) = index_by_value.get(&complement) {
                return vec![j, i as i64];
            }
            index_by_value.insert(num, i as i64);
        }

        Vec::new()
    }
}

/// `(nums: Vec<i64>, target: i64) -> Vec<i64>`
pub struct TwoSum {
    solution: Solution,
}

impl Default for TwoSum {
    fn default() -> Self {
        Self { solution: Solution }
    }
}

impl Problem for TwoSum {
    type Args = (Vec<i64>, i64);
    type Output = Vec<i64>;

    fn name(&self) -> &'static str {
        "two-sum"
    }

    fn decode_args(&self, input: &Value) -> Result<Self::Args, AccessError> {
        let nums = input.at(0)?.as_int_seq()?;
        let target = input.at(1)?.as_int()?;
        Ok((nums, target))
    }

    fn decode_expected(&self, expected: &Value) -> Result<Self::Output, AccessError> {
        expected.as_int_seq()
    }

    fn describe_args(&self, (nums, target): &Self::Args) -> String {
        describe_args(&[nums as &dyn Render, target])
    }

    fn invoke(&self, (nums, target): Self::Args) -> anyhow::Result<Self::Output> {
        Ok(self.solution.two_sum(nums, target))
    }
}
