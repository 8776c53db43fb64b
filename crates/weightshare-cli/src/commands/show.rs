//! Print a single live share.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use weightshare_core::error::AppError;
use weightshare_core::traits::SystemClock;
use weightshare_entity::ShareRecord;
use weightshare_service::AccessService;

use crate::output::{self, OutputFormat};

/// Arguments for the show command
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Share identifier, as it appears at the end of a share link
    pub share_id: String,
}

/// One weigh-in row
#[derive(Debug, Serialize, Tabled)]
struct EntryRow {
    /// Date
    date: String,
    /// Weight
    weight: String,
}

/// Execute the show command
pub async fn execute(
    args: &ShowArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config)?;
    let access = AccessService::new(store.store(), Arc::new(SystemClock));

    let record = access
        .get_share(&args.share_id)
        .await
        .map_err(super::share_error)?;
    store.close().await;

    match format {
        OutputFormat::Json => output::print_json(&record),
        OutputFormat::Table => print_record(&record),
    }
}

fn print_record(record: &ShareRecord) -> Result<(), AppError> {
    output::print_field("Share ID", record.share_id.as_str());
    output::print_field("Shared by", record.shared_by.as_deref().unwrap_or("-"));
    output::print_field("Start weight", &optional(record.start_weight));
    output::print_field("Goal weight", &optional(record.goal_weight));
    output::print_field("Height", &optional(record.height));
    output::print_field("Theme", record.theme.as_deref().unwrap_or("-"));
    output::print_field("Created", &record.created_at.to_rfc3339());
    output::print_field("Expires", &record.expires_at().to_rfc3339());
    println!();

    let rows: Vec<EntryRow> = record
        .entries
        .iter()
        .map(|e| EntryRow {
            date: e.date.format("%Y-%m-%d %H:%M").to_string(),
            weight: e.weight.to_string(),
        })
        .collect();
    output::print_list(&rows, OutputFormat::Table, "No weigh-ins recorded.")
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
