//! List the newest live shares.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use weightshare_core::error::AppError;
use weightshare_core::traits::SystemClock;
use weightshare_entity::ShareRecord;
use weightshare_service::{LinkService, ShareService};

use crate::output::{self, OutputFormat};

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Maximum number of shares to show
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,
}

/// Share display row
#[derive(Debug, Serialize, Tabled)]
struct ShareRow {
    /// Share ID
    #[tabled(rename = "share id")]
    share_id: String,
    /// Shared by
    #[tabled(rename = "shared by")]
    shared_by: String,
    /// Entry count
    entries: usize,
    /// Created
    created: String,
    /// Expires
    expires: String,
}

impl From<&ShareRecord> for ShareRow {
    fn from(record: &ShareRecord) -> Self {
        Self {
            share_id: record.share_id.to_string(),
            shared_by: record.shared_by.clone().unwrap_or_else(|| "-".to_string()),
            entries: record.entries.len(),
            created: record.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            expires: record.expires_at().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Execute the list command
pub async fn execute(
    args: &ListArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config)?;
    let shares = ShareService::new(
        store.store(),
        Arc::new(LinkService::new(config.share.base_url.clone())),
        Arc::new(SystemClock),
    );

    let records = shares
        .list_live(args.limit)
        .await
        .map_err(super::share_error)?;
    store.close().await;

    let rows: Vec<ShareRow> = records.iter().map(ShareRow::from).collect();
    output::print_list(&rows, format, "No live shares.")
}
