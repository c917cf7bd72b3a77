use anyhow::{Context, bail};
use shift_ledger::utils::time::parse_date;
use shift_ledger::{
    AppError, Config, ShiftLedger, TaxSummaryAggregator, cleanup_old_logs, init_logger_with_file,
};

const USAGE: &str = "Usage: shift-ledger <command>

Commands:
  summary <year>       Tax summary for one calendar year
  summary              Tax summary for every year with completed shifts
  years                Years that have shifts
  week <YYYY-MM-DD>    Totals for the week containing the date
  shifts               All shifts, oldest first";

fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, then logging)
    dotenv::dotenv().ok();
    let config = Config::try_from_env().map_err(AppError::from)?;
    let log_dir = config.is_production().then(|| config.log_dir());
    init_logger_with_file(&config.log_level, config.log_json, log_dir.as_deref())?;
    if let Some(dir) = &log_dir {
        cleanup_old_logs(dir)?;
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{USAGE}");
        return Ok(());
    };

    // 2. Open the ledger
    let db_path = config.database_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create work dir {}", parent.display()))?;
    }
    let ledger = ShiftLedger::open(config.ledger_config(), &db_path)
        .with_context(|| format!("Cannot open ledger at {}", db_path.display()))?;
    tracing::info!(path = %db_path.display(), shifts = ledger.len(), "Ledger opened");

    let aggregator = TaxSummaryAggregator::new(ledger.clone(), config.mileage_rates.clone());

    // 3. Run the command
    let output = match (command.as_str(), args.get(1)) {
        ("summary", Some(year)) => {
            let year: i32 = year
                .parse()
                .with_context(|| format!("Invalid year {year:?}"))?;
            let summary = aggregator.summarize(year);
            serde_json::json!({
                "summary": summary,
                "preferred_method": summary.preferred_method(),
            })
        }
        ("summary", None) => serde_json::to_value(aggregator.summarize_all())?,
        ("years", None) => serde_json::to_value(ledger.years())?,
        ("week", Some(date)) => {
            let date = parse_date(date)?;
            serde_json::json!({
                "week_start": ledger.week_start_for(date),
                "totals": aggregator.week_totals(date),
            })
        }
        ("shifts", None) => serde_json::to_value(ledger.shifts())?,
        _ => bail!("Unknown command\n\n{USAGE}"),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
