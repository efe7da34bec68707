//! Handler for `walletlens history`.

use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output::{self, Mode};
use crate::application::AccountService;
use crate::domain::{HistoryEntry, Subject};
use crate::error::Result;

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Queried at")]
    queried_at: String,
    #[tabled(rename = "Total value")]
    total_value: String,
    #[tabled(rename = "Tokens")]
    tokens: usize,
    #[tabled(rename = "NFTs")]
    nfts: usize,
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            queried_at: entry.queried_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            total_value: format!("${}", entry.snapshot.total_value().round_dp(2)),
            tokens: entry.snapshot.fungibles().len(),
            nfts: entry.snapshot.collectibles().len(),
        }
    }
}

/// Execute `history <address>`.
pub async fn execute(service: &AccountService, subject: &Subject, limit: Option<usize>) -> Result<()> {
    let entries = service.history(subject, limit).await?;

    let mode = output::mode();
    if mode == Mode::Json {
        output::json_output(json!({
            "command": "history",
            "address": subject,
            "entries": entries,
        }));
        return Ok(());
    }
    if mode == Mode::Quiet {
        return Ok(());
    }

    output::header(subject);
    output::section("History");
    if entries.is_empty() {
        output::note("(no recorded queries)");
        return Ok(());
    }
    let mut table = Table::new(entries.iter().map(HistoryRow::from));
    table.with(Style::rounded());
    output::block(table);
    Ok(())
}
