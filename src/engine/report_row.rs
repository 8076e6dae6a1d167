use serde::{Deserialize, Serialize};

/// A single query result of a Ledger, flattened to text
/// It is used for decoupling ledger output from the query API and easy serialisation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReportRow {
    pub query: String,
    pub value: String,
}

impl ReportRow {
    pub fn new(query: &str, value: impl ToString) -> Self {
        ReportRow {
            query: query.to_owned(),
            value: value.to_string(),
        }
    }
}
