/// Report Serializer
///
/// Renders a `SubmissionReport` as a single line:
///
/// `{"verdict":..,"runtime":..,"memory":..,"test_results":[{"passed":..,"input":..,"actual":..,"error":..},..]}`
///
/// Field order is fixed and only `"` and `\` are escaped, so the same report
/// always produces the same bytes.
use crate::render::escape;
use crate::types::{CaseResult, SubmissionReport};
use std::fmt::Write as _;
use std::io;

pub fn render_report(report: &SubmissionReport) -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        "{{\"verdict\":\"{}\",\"runtime\":{},\"memory\":{},\"test_results\":[",
        report.verdict, report.max_runtime_ms, report.max_memory_kb
    );

    for (idx, result) in report.results.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        render_case(&mut out, result);
    }

    out.push_str("]}");
    out
}

fn render_case(out: &mut String, result: &CaseResult) {
    let _ = write!(
        out,
        "{{\"passed\":{},\"input\":\"{}\",\"actual\":\"{}\",\"error\":\"{}\"}}",
        result.status.is_passed(),
        escape(&result.input_description),
        escape(&result.actual_output),
        escape(&result.error_message)
    );
}

/// Write the report followed by a newline and flush
pub fn write_report<W: io::Write>(writer: &mut W, report: &SubmissionReport) -> io::Result<()> {
    writeln!(writer, "{}", render_report(report))?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CaseStatus, Verdict};

    fn case(status: CaseStatus, input: &str, actual: &str, error: &str) -> CaseResult {
        CaseResult {
            status,
            elapsed_ms: 1,
            peak_memory_kb: 2048,
            actual_output: actual.to_string(),
            error_message: error.to_string(),
            input_description: input.to_string(),
        }
    }

    #[test]
    fn test_render_accepted_report() {
        let report = SubmissionReport {
            verdict: Verdict::Accepted,
            max_runtime_ms: 0,
            max_memory_kb: 3456,
            results: vec![case(CaseStatus::Passed, "[[2,7,11,15], 9]", "[0,1]", "")],
        };

        assert_eq!(
            render_report(&report),
            r#"{"verdict":"ACCEPTED","runtime":0,"memory":3456,"test_results":[{"passed":true,"input":"[[2,7,11,15], 9]","actual":"[0,1]","error":""}]}"#
        );
    }

    #[test]
    fn test_render_multiple_cases() {
        let report = SubmissionReport {
            verdict: Verdict::TimeLimitExceeded,
            max_runtime_ms: 5001,
            max_memory_kb: 4000,
            results: vec![
                case(CaseStatus::Timeout, "[[1], 1]", "", ""),
                case(CaseStatus::RuntimeError, "[[2], 2]", "", "boom"),
            ],
        };

        assert_eq!(
            render_report(&report),
            r#"{"verdict":"TLE","runtime":5001,"memory":4000,"test_results":[{"passed":false,"input":"[[1], 1]","actual":"","error":""},{"passed":false,"input":"[[2], 2]","actual":"","error":"boom"}]}"#
        );
    }

    #[test]
    fn test_render_empty_battery() {
        let report = SubmissionReport {
            verdict: Verdict::Accepted,
            max_runtime_ms: 0,
            max_memory_kb: 0,
            results: vec![],
        };

        assert_eq!(
            render_report(&report),
            r#"{"verdict":"ACCEPTED","runtime":0,"memory":0,"test_results":[]}"#
        );
    }

    #[test]
    fn test_escaping_round_trip() {
        let input = r#"["quote \" and backslash \\"]"#;
        let error = r#"C:\tmp\"x""#;
        let report = SubmissionReport {
            verdict: Verdict::RuntimeError,
            max_runtime_ms: 3,
            max_memory_kb: 10,
            results: vec![case(CaseStatus::RuntimeError, input, "\"out\"", error)],
        };

        let parsed: serde_json::Value = serde_json::from_str(&render_report(&report)).unwrap();
        let first = &parsed["test_results"][0];

        assert_eq!(parsed["verdict"], "RUNTIME_ERROR");
        assert_eq!(parsed["runtime"], 3);
        assert_eq!(first["passed"], false);
        assert_eq!(first["input"], input);
        assert_eq!(first["actual"], "\"out\"");
        assert_eq!(first["error"], error);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let report = SubmissionReport {
            verdict: Verdict::WrongAnswer,
            max_runtime_ms: 12,
            max_memory_kb: 99,
            results: vec![
                case(CaseStatus::Failed, "[[3,3], 6]", "[1,0]", ""),
                case(CaseStatus::Passed, "[[1,2], 3]", "[0,1]", ""),
            ],
        };

        assert_eq!(render_report(&report), render_report(&report.clone()));
    }

    #[test]
    fn test_write_report_appends_newline() {
        let report = SubmissionReport {
            verdict: Verdict::Accepted,
            max_runtime_ms: 0,
            max_memory_kb: 0,
            results: vec![],
        };

        let mut buffer = Vec::new();
        write_report(&mut buffer, &report).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with("]}\n"));
        assert_eq!(text.lines().count(), 1);
    }
}
