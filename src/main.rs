use anyhow::{Context, Result, anyhow};
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use std::{env, ffi::OsString};
use transaction_insights::{Ledger, load_transactions_from_filepath};

fn main() -> Result<()> {
    SimpleLogger::new().env().init()?;

    log::debug!("Application started");

    log::debug!("Loading transactions: Starting");
    let ledger = load_ledger()?;
    log::debug!("Loading transactions: Done");

    let client = get_client_arg()?;

    log::debug!("Exporting report to stdout: Started");
    write_to_std_out(&ledger, client.as_deref())?;
    log::debug!("Exporting report to stdout: Done");

    log::debug!("Application finished");

    Ok(())
}

fn get_first_arg() -> Result<OsString> {
    env::args_os()
        .nth(1)
        .ok_or_else(|| anyhow!("expected a transactions file argument, but got none"))
}

fn get_client_arg() -> Result<Option<String>> {
    match env::args_os().nth(2) {
        None => Ok(None),
        Some(client) => client
            .into_string()
            .map(Some)
            .map_err(|arg| anyhow!("client name is not valid UTF-8: {arg:?}")),
    }
}

fn load_ledger() -> Result<Ledger> {
    let path = PathBuf::from(get_first_arg()?);
    log::debug!("Extracted filepath fom args: {path:?}");

    let transactions = load_transactions_from_filepath(&path)
        .with_context(|| format!("failed to load transactions from {}", path.display()))?;

    Ok(Ledger::new(transactions))
}

fn write_to_std_out(ledger: &Ledger, client: Option<&str>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());

    log::debug!("Starting report serialisation");
    for row in ledger.report_rows(client) {
        log::debug!("Serialising report row: {row:?}");
        wtr.serialize(row)?;
    }

    log::debug!("Report serialisation done -> Flushing to stdout");
    wtr.flush()?;

    Ok(())
}
