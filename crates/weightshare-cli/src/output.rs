//! Terminal output for admin commands.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use weightshare_core::result::AppResult;

/// How command results are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned table for people
    #[default]
    Table,
    /// Pretty-printed JSON for scripts
    Json,
}

/// Render rows as a table, or as a JSON array.
///
/// `empty` is printed instead of an empty table.
pub fn print_list<T: Serialize + Tabled>(
    rows: &[T],
    format: OutputFormat,
    empty: &str,
) -> AppResult<()> {
    match format {
        OutputFormat::Table if rows.is_empty() => println!("{empty}"),
        OutputFormat::Table => println!("{}", render_table(rows)),
        OutputFormat::Json => print_json(rows)?,
    }
    Ok(())
}

/// Pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_success(msg: &str) {
    println!("ok: {msg}");
}

pub fn print_warning(msg: &str) {
    eprintln!("warning: {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("error: {msg}");
}

/// One `label: value` line of a share summary.
pub fn print_field(label: &str, value: &str) {
    println!("{:<14}{value}", format!("{label}:"));
}

fn render_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows).with(Style::sharp()).to_string()
}
