/// Battery Executor - High-Level Orchestration
///
/// **Responsibility:**
/// Walk the battery in order and produce the submission report.
///
/// **Architecture:**
/// 1. Decode each case grouping (`input`, `expected`) through the problem binding
/// 2. Run the candidate once with DeadlineEngine (engine.rs)
/// 3. Classify the case with the evaluator (evaluator.rs)
/// 4. Fold all cases into one SubmissionReport
///
/// Cases run strictly one after another; the verdict depends on that order.
/// No candidate outcome stops the battery. A case grouping that cannot be
/// decoded is malformed input and aborts the run before any report exists.
use crate::config::JudgeConfig;
use crate::engine::DeadlineEngine;
use crate::evaluator::{self, Invocation};
use crate::problem::Problem;
use anyhow::{bail, Context, Result};
use arbiter_common::{parse, SubmissionReport, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Parse battery text and judge it
///
/// Any `Err` here is malformed input: the caller exits 1 without a report.
/// Every candidate outcome, including WRONG_ANSWER and TLE, is `Ok`.
pub async fn judge_input<P: Problem>(
    text: &str,
    problem: Arc<P>,
    config: &JudgeConfig,
) -> Result<SubmissionReport> {
    let battery = parse(text).context("Failed to parse battery")?;
    judge_battery(&battery, problem, config).await
}

pub async fn judge_battery<P: Problem>(
    battery: &Value,
    problem: Arc<P>,
    config: &JudgeConfig,
) -> Result<SubmissionReport> {
    if !battery.is_positional() {
        bail!("Battery must be a positional sequence of test cases");
    }
    let cases = battery.items().unwrap_or_default();

    info!(
        problem = problem.name(),
        test_cases = cases.len(),
        timeout_ms = config.timeout_ms,
        comparison = %config.comparison,
        "Starting battery"
    );

    let mut engine = DeadlineEngine::new(config.deadline());
    let mut results = Vec::with_capacity(cases.len());

    for (idx, case) in cases.iter().enumerate() {
        let test_num = idx + 1;

        let input = case
            .get("input")
            .with_context(|| format!("Test case {} is malformed", test_num))?;
        let expected = case
            .get("expected")
            .with_context(|| format!("Test case {} is malformed", test_num))?;

        let args = problem
            .decode_args(input)
            .with_context(|| format!("Test case {} has an invalid input", test_num))?;
        let expected = problem
            .decode_expected(expected)
            .with_context(|| format!("Test case {} has an invalid expected output", test_num))?;
        let input_description = problem.describe_args(&args);

        let execution = engine.execute(&problem, args).await;

        match &execution.invocation {
            Invocation::TimedOut => warn!(
                test_num,
                execution_ms = execution.elapsed_ms,
                "Execution timed out; test cannot pass"
            ),
            Invocation::Raised(message) => warn!(
                test_num,
                execution_ms = execution.elapsed_ms,
                error = %message,
                "Execution failed with runtime error; test cannot pass"
            ),
            Invocation::Returned(_) => {}
        }

        let result =
            evaluator::evaluate_case(execution, &expected, config.comparison, input_description);

        debug!(
            test_num,
            status = %result.status,
            execution_ms = result.elapsed_ms,
            memory_kb = result.peak_memory_kb,
            "Test result"
        );

        results.push(result);
    }

    let report = evaluator::aggregate(results);

    info!(
        verdict = %report.verdict,
        runtime_ms = report.max_runtime_ms,
        memory_kb = report.max_memory_kb,
        abandoned_workers = engine.abandoned_workers(),
        "Battery complete"
    );

    Ok(report)
}
