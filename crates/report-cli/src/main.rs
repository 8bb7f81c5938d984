//! report-cli: Fetch fundamentals from Financial Modeling Prep and export the
//! metrics report, one CSV per watchlist sheet.
//!
//! Usage:
//!   cargo run -p report-cli -- --value-us AAPL,MSFT --value-cn BABA
//!   cargo run -p report-cli -- --symbols AAPL MSFT GOOGL --dry-run
//!   cargo run -p report-cli -- --formulas

mod config;
mod export;

use anyhow::Context;
use config::ReportConfig;
use export::CsvSheetWriter;
use fmp_client::FmpClient;
use metric_engine::{build_workbook, populate_store, Region, ReportAssembler, WatchlistGroup, WatchlistSet};
use metrics_core::{Metric, ReportError, Section, SheetWriter, StatementSource};
use std::path::Path;
use std::sync::Arc;

fn group_flag(group: WatchlistGroup) -> &'static str {
    match group {
        WatchlistGroup::Value => "value",
        WatchlistGroup::Growth => "growth",
        WatchlistGroup::Theme => "theme",
        WatchlistGroup::Watchlist => "watchlist",
    }
}

fn region_flag(region: Region) -> &'static str {
    match region {
        Region::UnitedStates => "us",
        Region::China => "cn",
        Region::Japan => "jp",
    }
}

/// Every token after `flag` up to the next `--` option, joined by commas.
fn flag_values(args: &[String], flag: &str) -> Option<String> {
    let idx = args.iter().position(|a| a == flag)?;
    let values: Vec<&str> = args[idx + 1..]
        .iter()
        .take_while(|a| !a.starts_with("--"))
        .map(|a| a.as_str())
        .collect();
    Some(values.join(","))
}

/// Builds the watchlists from `--<group>-<region>` options. `--symbols`
/// feeds the US watchlist.
fn parse_watchlists(args: &[String]) -> Result<WatchlistSet, ReportError> {
    let mut lists = WatchlistSet::new();

    for group in WatchlistGroup::ALL {
        for region in Region::SHEET_ORDER {
            let flag = format!("--{}-{}", group_flag(group), region_flag(region));
            if let Some(text) = flag_values(args, &flag) {
                lists.add(group, region, &text)?;
            }
        }
    }
    if let Some(text) = flag_values(args, "--symbols") {
        lists.add(WatchlistGroup::Watchlist, Region::UnitedStates, &text)?;
    }

    Ok(lists)
}

fn print_formulas() {
    let sections = [
        Section::BasicInfo,
        Section::InvestmentMetrics,
        Section::InvestmentRisks,
        Section::Valuation,
        Section::FinancialRatios,
    ];
    for section in sections {
        println!("{}", section.label());
        for metric in Metric::ALL.iter().filter(|m| m.section() == section) {
            println!("  {:<36} {}", metric.label(), metric.formula());
        }
        println!();
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  report-cli --value-us AAPL,MSFT --growth-jp 7203.T ...");
    eprintln!("  report-cli --symbols AAPL MSFT ...       Tickers for the US watchlist sheet");
    eprintln!("  report-cli --formulas                    Print how every metric is derived");
    eprintln!();
    eprintln!("Watchlist options (comma separated tickers):");
    eprintln!("  --value-{{us,cn,jp}}  --growth-{{us,cn,jp}}  --theme-{{us,cn,jp}}  --watchlist-{{us,cn,jp}}");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --dry-run          Print the metrics table as JSON instead of writing files");
    eprintln!("  --raw              Write numbers unformatted at full precision");
    eprintln!("  --out DIR          Output directory (default: REPORT_OUTPUT_DIR or .)");
    eprintln!("  --concurrency N    Max tickers fetched in parallel");
}

fn sheet_file_name(sheet_name: &str, extension: &str) -> String {
    let date = chrono::Local::now().date_naive().format("%Y-%m-%d");
    format!(
        "financial_data_formatted__{}__{}.{}",
        date,
        sheet_name.replace(' ', "_"),
        extension
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let default_filter = "report_cli=info,metric_engine=info,fmp_client=warn";
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .init();
    }

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--formulas") {
        print_formulas();
        return Ok(());
    }
    let dry_run = args.iter().any(|a| a == "--dry-run");

    let watchlists = match parse_watchlists(&args) {
        Ok(lists) => lists,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let tickers = match watchlists.master_list() {
        Ok(tickers) => tickers,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    let mut config = ReportConfig::from_env()?;
    if let Some(n) = args
        .iter()
        .position(|a| a == "--concurrency")
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse::<usize>().ok())
    {
        config.concurrency = n.max(1);
    }
    if let Some(dir) = args.iter().position(|a| a == "--out").and_then(|i| args.get(i + 1)) {
        config.output_dir = dir.into();
    }

    tracing::info!(
        "report-cli: {} tickers, {} sheets, dry_run={}, concurrency={}",
        tickers.len(),
        watchlists.groups().len(),
        dry_run,
        config.concurrency
    );

    let source: Arc<dyn StatementSource> =
        Arc::new(FmpClient::with_settings(config.fmp_key.clone(), config.fmp_settings()));
    let store = populate_store(source, &tickers, config.concurrency).await;

    let report = ReportAssembler::new().assemble(&tickers, &store);
    if let Some(warning) = report.warning() {
        tracing::warn!("{}", warning);
        eprintln!("{}", warning);
    }

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&report.table)?);
        tracing::info!(
            "Done! {} rows across {} tickers ({} not found), dry run",
            report.table.len(),
            tickers.len(),
            report.not_found.len()
        );
        return Ok(());
    }

    let workbook = build_workbook(&report, &watchlists);
    let writer = if args.iter().any(|a| a == "--raw") {
        CsvSheetWriter::raw()
    } else {
        CsvSheetWriter::new()
    };
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    for sheet in &workbook.sheets {
        let bytes = writer.write_sheet(sheet)?;
        let path = Path::new(&config.output_dir).join(sheet_file_name(&sheet.name, writer.extension()));
        std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("Wrote {} ({} rows)", path.display(), sheet.row_count());
    }

    tracing::info!(
        "Done! {} rows across {} tickers ({} not found), {} sheets written",
        report.table.len(),
        tickers.len(),
        report.not_found.len(),
        workbook.sheets.len()
    );
    Ok(())
}
