use crate::OutputFormat;
use anyhow::Result;
use colored::*;
use rowcheck_validator::RunSummary;

pub fn print_summary(summary: &RunSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json_summary(summary),
        OutputFormat::Text => {
            print_text_summary(summary);
            Ok(())
        }
    }
}

fn print_text_summary(summary: &RunSummary) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  Results:".bold());
    println!("{}", "═".repeat(60));

    println!("  Rule set:       {}", summary.rule_set);
    println!("  Total rows:     {}", summary.total_rows);
    println!(
        "  Accepted rows:  {}",
        summary.accepted_rows.to_string().green()
    );
    if summary.rejected_rows > 0 {
        println!(
            "  Rejected rows:  {}",
            summary.rejected_rows.to_string().red()
        );
    } else {
        println!("  Rejected rows:  {}", summary.rejected_rows);
    }

    if !summary.field_failures.is_empty() {
        println!("\n{}", "Failures by field:".bold());
        for field in &summary.field_failures {
            let marker = if field.failures > 0 {
                "!".yellow().bold()
            } else {
                " ".normal()
            };
            println!("{} Field: {}  Count: {}", marker, field.name, field.failures);
        }
    }

    println!("\n  Completed in {} ms", summary.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_summary(summary: &RunSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}
