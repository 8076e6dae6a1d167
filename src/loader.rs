use crate::engine::{InputRecord, Transaction};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot read transactions: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transactions must be a JSON array: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_transactions_from_filepath(filepath: &Path) -> Result<Vec<Transaction>, LoadError> {
    log::debug!("Opening transactions file: {filepath:?}");
    let file = File::open(filepath)?;
    load_transactions(BufReader::new(file))
}

/// Reads a JSON array of transactions.
/// Elements that are not valid transactions are skipped with a warning,
/// the order of the remaining ones is kept.
pub fn load_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>, LoadError> {
    let values: Vec<Value> = serde_json::from_reader(reader)?;
    let mut transactions = Vec::with_capacity(values.len());

    log::debug!("Started deserialising {} records", values.len());
    for (index, value) in values.into_iter().enumerate() {
        let record = match serde_json::from_value::<InputRecord>(value) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Error deserializing record #{index}: {e}");
                continue;
            }
        };
        log::debug!("Converting InputRecord into Transaction: {record:?}");
        match record.to_transaction() {
            Ok(tx) => transactions.push(tx),
            Err(e) => log::warn!("Error converting record #{index}: {e}"),
        }
    }
    log::debug!("Loaded {} transactions", transactions.len());

    Ok(transactions)
}
