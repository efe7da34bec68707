//! Handler for `walletlens summary`.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output::{self, Mode};
use crate::application::{AccountService, QueryOptions};
use crate::domain::{AssetSummary, Subject};
use crate::error::Result;

#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "Asset")]
    symbol: String,
    #[tabled(rename = "Balance")]
    balance: Decimal,
    #[tabled(rename = "Price")]
    price: Decimal,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct CollectibleRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Token")]
    token_id: String,
    #[tabled(rename = "Contract")]
    contract: String,
}

fn money(value: Decimal) -> String {
    format!("${}", value.round_dp(2))
}

fn asset_rows(summary: &AssetSummary, native_symbol: &str) -> Vec<AssetRow> {
    let native = summary.native();
    let mut rows = vec![AssetRow {
        symbol: native_symbol.to_string(),
        balance: native.balance(),
        price: native.price(),
        value: money(native.value()),
    }];
    rows.extend(summary.fungibles().iter().map(|f| AssetRow {
        symbol: f.symbol().to_string(),
        balance: f.balance(),
        price: f.price(),
        value: money(f.value()),
    }));
    rows
}

/// Execute `summary <address>`.
pub async fn execute(
    service: &AccountService,
    subject: &Subject,
    options: QueryOptions,
) -> Result<()> {
    let summary = service.query_with(subject, options).await?;
    service.flush().await;

    let mode = output::mode();
    if mode == Mode::Json {
        output::json_output(json!({
            "command": "summary",
            "recorded": options.record,
            "summary": summary,
        }));
        return Ok(());
    }
    if mode == Mode::Quiet {
        return Ok(());
    }

    render(&summary, &service.summarizer().policy().native_symbol);
    Ok(())
}

fn render(summary: &AssetSummary, native_symbol: &str) {
    output::header(summary.subject());
    output::field("Total value", money(summary.total_value()));

    output::section("Tokens");
    let mut table = Table::new(asset_rows(summary, native_symbol));
    table.with(Style::rounded());
    output::block(table);

    output::section("NFTs");
    if summary.collectibles().is_empty() {
        output::note("(none)");
        return;
    }
    let rows = summary.collectibles().iter().map(|c| CollectibleRow {
        name: c.name.clone(),
        token_id: c.token_id.clone(),
        contract: c.contract.clone(),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    output::block(table);
}
