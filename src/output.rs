use crate::aggregator::ImportReport;
use crate::error::{LbError, Result};
use crate::orchestrator::{DeleteOutcome, WorkerOutcome};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// スピナーの更新間隔
pub const TICK: Duration = Duration::from_millis(120);

pub struct CommandSummary {
    pub prefix: String,
    pub message: String,
}

impl CommandSummary {
    pub fn format(success: usize, failure: usize, written: usize) -> Self {
        match (success, failure) {
            (_, f) if f > 0 => Self {
                prefix: "✗".red().to_string(),
                message: format!(
                    "{} source(s) succeeded, {} failed",
                    success.green(),
                    f.red()
                ),
            },
            (s, _) if s > 0 => Self {
                prefix: "✓".green().to_string(),
                message: format!("{} item set(s) written", written.green()),
            },
            _ => Self {
                prefix: "•".yellow().to_string(),
                message: "No sources selected".to_string(),
            },
        }
    }

    pub fn print(&self) {
        println!("{} {}", self.prefix, self.message);
    }
}

/// 取り込み結果を表示
pub fn print_import_summary(outcomes: &[WorkerOutcome]) {
    let mut success = 0;
    let mut failure = 0;
    let mut written = 0;

    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => {
                success += 1;
                written += report.written;
                println!(
                    "  {} {} {} ({} champions, {} item sets{})",
                    "✓".green(),
                    outcome.source,
                    report.version.cyan(),
                    report.champions,
                    report.written,
                    if report.failed > 0 {
                        format!(", {} failed", report.failed.red())
                    } else {
                        String::new()
                    }
                );
            }
            Err(e) => {
                failure += 1;
                println!("  {} {}: {}", "✗".red(), outcome.source, e);
            }
        }
    }

    CommandSummary::format(success, failure, written).print();
}

/// 削除結果を表示
pub fn print_delete_summary(outcomes: &[DeleteOutcome]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(removed) => println!(
                "  {} {}: {} item set(s) removed",
                "✓".green(),
                outcome.source,
                removed
            ),
            Err(e) => println!("  {} {}: {}", "✗".red(), outcome.source, e),
        }
    }

    if outcomes.iter().all(|o| o.result.is_ok()) {
        println!("{} Done!", "✓".green());
    }
}

pub fn print_invalid_choice(err: &LbError) {
    println!("{} {}, try again", "✗".red(), err);
}

/// ソースごとのスピナー
pub fn source_spinner(display_name: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} {prefix:.bold} [{pos}/{len}] {msg}")
    {
        pb.set_style(style);
    }
    pb.set_prefix(display_name.to_string());
    pb.set_message("waiting...");
    pb
}

/// スピナーを結果表示で終える
pub fn finish_spinner(pb: &ProgressBar, result: &Result<ImportReport>) {
    let message = match result {
        Ok(report) => format!("{} done ({} item sets)", "✓".green(), report.written),
        Err(e) => format!("{} failed: {}", "✗".red(), e),
    };
    pb.finish_with_message(message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_with_failure() {
        let summary = CommandSummary::format(2, 1, 300);
        assert!(summary.message.contains("failed"));
    }

    #[test]
    fn test_summary_all_succeeded() {
        let summary = CommandSummary::format(3, 0, 300);
        assert!(summary.message.contains("300"));
        assert!(summary.message.contains("item set(s) written"));
    }

    #[test]
    fn test_summary_nothing() {
        let summary = CommandSummary::format(0, 0, 0);
        assert_eq!(summary.message, "No sources selected");
    }
}
