use std::hash::{Hash, Hasher};

/// A single raw transaction record.
/// Several records may share the same `mtn` when a transfer was retransmitted,
/// they then describe the same logical transaction.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub mtn: i64,
    pub amount: f64,
    pub sender_full_name: String,
    pub sender_age: i64,
    pub beneficiary_full_name: String,
    pub beneficiary_age: i64,
    pub issue_id: Option<i64>,
    pub issue_solved: bool,
    pub issue_message: Option<String>,
}

type TransactionKey<'a> = (
    i64,
    u64,
    &'a str,
    i64,
    &'a str,
    i64,
    Option<i64>,
    bool,
    Option<&'a str>,
);

impl Transaction {
    // Amounts are compared bit for bit so that Eq and Hash agree
    fn key(&self) -> TransactionKey<'_> {
        (
            self.mtn,
            self.amount.to_bits(),
            self.sender_full_name.as_str(),
            self.sender_age,
            self.beneficiary_full_name.as_str(),
            self.beneficiary_age,
            self.issue_id,
            self.issue_solved,
            self.issue_message.as_deref(),
        )
    }

    /// An issue is open when it exists and has not been solved.
    pub fn has_open_issue(&self) -> bool {
        self.issue_id.is_some() && !self.issue_solved
    }

    pub fn is_sent_by(&self, client_full_name: &str) -> bool {
        names_match(&self.sender_full_name, client_full_name)
    }

    /// True when the client is either the sender or the beneficiary.
    pub fn involves(&self, client_full_name: &str) -> bool {
        self.is_sent_by(client_full_name)
            || names_match(&self.beneficiary_full_name, client_full_name)
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Transaction {}

impl Hash for Transaction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

// Case-insensitive, stored names keep their casing
fn names_match(stored: &str, requested: &str) -> bool {
    stored == requested || stored.to_lowercase() == requested.to_lowercase()
}
