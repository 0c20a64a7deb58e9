use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::ScenarioResult;

fn success_rate(results: &[ScenarioResult]) -> (usize, usize, f64) {
    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    #[allow(clippy::cast_precision_loss)]
    let rate = if total == 0 {
        0.0
    } else {
        (passed as f64 / total as f64) * 100.0
    };
    (total, passed, rate)
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Wheel Test Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==============================".cyan())?;

    let (total, passed, rate) = success_rate(results);
    writeln!(out, "Total runs: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Success rate: {rate:.1}%")?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            out,
            "{} {} (seed {})",
            status,
            result.scenario_name.bold(),
            result.seed
        )?;
        writeln!(out, "   Checks: {}", result.checks_run)?;
        writeln!(out, "   Time: {:?}", result.duration)?;

        if !result.frequencies.is_empty() {
            writeln!(out, "   Frequencies:")?;
            for f in &result.frequencies {
                writeln!(
                    out,
                    "     #{:<3} {:<18} expected {:>6.2}%  observed {:>6.2}%  ({} hits)",
                    f.prize_id,
                    f.name,
                    f.expected * 100.0,
                    f.observed * 100.0,
                    f.hits
                )?;
            }
        }

        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Prize Wheel Test Results\n")?;
    writeln!(out, "_Generated {}_\n", Utc::now().format("%Y-%m-%dT%H:%M:%SZ"))?;

    let (total, passed, rate) = success_rate(results);
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total runs**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(out, "- **Success rate**: {rate:.1}%\n")?;

    writeln!(out, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(
            out,
            "### {} {} (seed {})\n",
            status, result.scenario_name, result.seed
        )?;
        writeln!(out, "- **Checks**: {}", result.checks_run)?;
        writeln!(out, "- **Time**: {:?}", result.duration)?;

        if !result.frequencies.is_empty() {
            writeln!(out, "\n| Prize | Name | Expected | Observed | Hits |")?;
            writeln!(out, "| --- | --- | --- | --- | --- |")?;
            for f in &result.frequencies {
                writeln!(
                    out,
                    "| {} | {} | {:.2}% | {:.2}% | {} |",
                    f.prize_id,
                    f.name,
                    f.expected * 100.0,
                    f.observed * 100.0,
                    f.hits
                )?;
            }
        }

        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::PrizeFrequency;

    fn sample() -> Vec<ScenarioResult> {
        vec![
            ScenarioResult {
                scenario_name: "distribution".to_string(),
                seed: 7,
                passed: true,
                checks_run: 1,
                failures: Vec::new(),
                frequencies: vec![PrizeFrequency {
                    prize_id: 1,
                    name: "Corte Grátis".to_string(),
                    expected: 0.05,
                    observed: 0.0497,
                    hits: 497,
                }],
                duration: Duration::from_millis(3),
            },
            ScenarioResult {
                scenario_name: "gating".to_string(),
                seed: 7,
                passed: false,
                checks_run: 4,
                failures: vec!["replay was not blocked".to_string()],
                frequencies: Vec::new(),
                duration: Duration::from_millis(1),
            },
        ]
    }

    #[test]
    fn markdown_lists_frequencies_and_failures() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("| 1 | Corte Grátis | 5.00% | 4.97% | 497 |"));
        assert!(text.contains("- **Success rate**: 50.0%"));
        assert!(text.contains("replay was not blocked"));
    }

    #[test]
    fn json_round_trips() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &sample()).unwrap();
        let parsed: Vec<ScenarioResult> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(!parsed[1].passed);
    }

    #[test]
    fn console_report_counts_results() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &sample(), Duration::from_millis(5)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Total runs: 2"));
        assert!(text.contains("Failed: 1"));
    }
}
