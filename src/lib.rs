//! In-memory analytics over a fixed collection of transaction records.
//!
//! Transactions are loaded once (see [`loader`]) and queried through a [`Ledger`],
//! which never mutates them.

pub mod engine;
pub mod loader;

pub use engine::{
    AmountTotal, InputRecord, Ledger, LedgerError, RecordError, ReportRow, Transaction,
};
pub use loader::{LoadError, load_transactions, load_transactions_from_filepath};
