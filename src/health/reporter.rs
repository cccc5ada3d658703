//! Formatting and reporting for health check results

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::runner::HealthCheckReport;

/// Formats a health check report as a table plus summary
pub fn format_report(report: &HealthCheckReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["System", "Status", "Duration", "Message"]);

    for (name, result) in &report.results {
        builder.push_record([
            name.as_str(),
            &result.status.as_colored_str(),
            &format!("{:.2?}", result.duration),
            &result.message,
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    let mut output = table.to_string();
    output.push('\n');
    output.push_str(&format!("\n{}\n", "Summary".bold().underline()));
    output.push_str(&format!("  Total checks: {}\n", report.total));
    output.push_str(&format!("  {} Passed: {}\n", "✓".green(), report.passed));
    if report.warned > 0 {
        output.push_str(&format!("  {} Warned: {}\n", "⚠".yellow(), report.warned));
    }
    if report.failed > 0 {
        output.push_str(&format!("  {} Failed: {}\n", "✗".red(), report.failed));
    }

    output.push('\n');
    let overall = if !report.is_healthy() {
        "Overall: UNHEALTHY".red().bold()
    } else if report.has_warnings() {
        "Overall: HEALTHY (with warnings)".yellow().bold()
    } else {
        "Overall: HEALTHY".green().bold()
    };
    output.push_str(&format!("  {}\n", overall));

    output
}

/// Prints a health check report to stdout, including per-check details
pub fn print_report(report: &HealthCheckReport) {
    println!("{}", format_report(report));

    for (name, result) in &report.results {
        if let Some(details) = &result.details {
            println!("\n{} Details:", name.bold());
            println!("{}", details);
        }
    }
}
