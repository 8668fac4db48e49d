//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use dualtem_analytics::report::TemReport;

use crate::cli::OutputFormat;

/// Prints a report in the requested format.
pub fn print_report(report: &TemReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => {
            let value = serde_json::to_value(report)?;
            for (title, key) in [("Inputs", "inputs"), ("Prospectus", "prospectus"), ("Market", "market")] {
                print_header(title);
                print_section(&value[key]);
            }
            Ok(())
        }
    }
}

/// Prints rows as a table, or the same rows as JSON.
pub fn print_rows<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Table => {
            println!("{}", styled(Table::new(rows)));
            Ok(())
        }
    }
}

/// Prints any value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

fn print_section(section: &Value) {
    match section {
        Value::Object(map) => {
            if let Some(error) = map.get("error").and_then(Value::as_str) {
                println!("{} {}", "✗".red(), error);
                return;
            }
            let rows: Vec<KeyValue> = map
                .iter()
                .map(|(key, value)| KeyValue::new(key.as_str(), render(value)))
                .collect();
            println!("{}", styled(Table::new(rows)));
        }
        Value::Null => println!("{}", "not applicable".dimmed()),
        other => println!("{}", render(other)),
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string()
}

/// Scalar rendering for table cells.
fn render(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(", "),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{k}: {}", render(v)))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Field")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
