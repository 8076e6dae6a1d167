mod amount;
mod ledger;
mod record;
mod report_row;
mod transaction;

pub use amount::AmountTotal;
pub use ledger::{Ledger, LedgerError};
pub use record::{InputRecord, RecordError};
pub use report_row::ReportRow;
pub use transaction::Transaction;
