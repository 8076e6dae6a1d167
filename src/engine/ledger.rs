use crate::engine::{AmountTotal, ReportRow, Transaction};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors of queries that need at least one transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Ledger holds no transactions")]
    EmptyDataset,
}

/// Read-only query engine over a fixed collection of transactions.
///
/// Amount based queries only look at one representative record per `mtn`
/// (the first one encountered), every other query looks at all raw records.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        log::debug!("Ledger created with {} transactions", transactions.len());
        Ledger { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// First record of every distinct `mtn`, in the order they were first seen.
    pub fn representatives(&self) -> impl Iterator<Item = &Transaction> {
        let mut seen = HashSet::new();
        self.transactions.iter().filter(move |tx| seen.insert(tx.mtn))
    }

    pub fn total_amount(&self) -> AmountTotal {
        self.representatives().map(|tx| tx.amount).collect()
    }

    /// Sum of the amounts of all distinct transactions
    pub fn total_transaction_amount(&self) -> f64 {
        self.total_amount().value()
    }

    pub fn total_amount_sent_by(&self, sender_full_name: &str) -> AmountTotal {
        self.representatives()
            .filter(|tx| tx.is_sent_by(sender_full_name))
            .map(|tx| tx.amount)
            .collect()
    }

    /// Sum of the amounts of all distinct transactions sent by the client.
    /// The name is compared ignoring case, an unknown sender gives 0.
    pub fn total_transaction_amount_sent_by(&self, sender_full_name: &str) -> f64 {
        self.total_amount_sent_by(sender_full_name).value()
    }

    pub fn max_transaction_amount(&self) -> Result<f64, LedgerError> {
        self.representatives()
            .map(|tx| tx.amount)
            .max_by(f64::total_cmp)
            .ok_or(LedgerError::EmptyDataset)
    }

    /// Number of distinct names that sent or received a transaction.
    /// Names are compared as stored, with their case.
    pub fn count_unique_clients(&self) -> usize {
        self.transactions
            .iter()
            .flat_map(|tx| [tx.sender_full_name.as_str(), tx.beneficiary_full_name.as_str()])
            .collect::<HashSet<_>>()
            .len()
    }

    /// Whether the client (sender or beneficiary) has at least one transaction
    /// with an issue that has not been solved
    pub fn has_open_compliance_issues(&self, client_full_name: &str) -> bool {
        self.transactions
            .iter()
            .filter(|tx| tx.involves(client_full_name))
            .any(Transaction::has_open_issue)
    }

    pub fn transactions_by_beneficiary_name(&self) -> HashMap<String, HashSet<Transaction>> {
        let mut by_beneficiary: HashMap<String, HashSet<Transaction>> = HashMap::new();

        for tx in &self.transactions {
            by_beneficiary
                .entry(tx.beneficiary_full_name.clone())
                .or_default()
                .insert(tx.clone());
        }

        by_beneficiary
    }

    pub fn unsolved_issue_ids(&self) -> HashSet<i64> {
        self.transactions
            .iter()
            .filter(|tx| !tx.issue_solved)
            .filter_map(|tx| tx.issue_id)
            .collect()
    }

    /// Messages of solved issues in record order, duplicates included.
    pub fn all_solved_issue_messages(&self) -> Vec<String> {
        self.transactions
            .iter()
            .filter(|tx| tx.issue_solved)
            .filter_map(|tx| tx.issue_message.clone())
            .collect()
    }

    /// The 3 distinct transactions with the highest amount, highest first.
    /// Equal amounts keep the order in which their `mtn` was first seen.
    pub fn top_3_transactions_by_amount(&self) -> Vec<Transaction> {
        let mut ranked: Vec<&Transaction> = self.representatives().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        ranked.into_iter().take(3).cloned().collect()
    }

    /// Sender with the highest total sent, with that total.
    /// On equal totals the sender seen first wins.
    pub fn top_sender_with_total(&self) -> Option<(String, f64)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut totals: Vec<(&str, AmountTotal)> = Vec::new();

        for tx in self.representatives() {
            let name = tx.sender_full_name.as_str();
            let slot = *index.entry(name).or_insert_with(|| {
                totals.push((name, AmountTotal::new()));
                totals.len() - 1
            });
            totals[slot].1.add(tx.amount);
        }

        totals
            .into_iter()
            .map(|(name, total)| (name, total.value()))
            .reduce(|best, current| if current.1 > best.1 { current } else { best })
            .map(|(name, total)| (name.to_owned(), total))
    }

    pub fn top_sender(&self) -> Option<String> {
        self.top_sender_with_total().map(|(name, _)| name)
    }

    /// Runs every query and flattens the results for output.
    /// Client specific rows are only added when a client is given.
    pub fn report_rows(&self, client: Option<&str>) -> Vec<ReportRow> {
        log::debug!("Building report rows for client={client:?}");
        let mut rows = vec![
            ReportRow::new("transaction_count", self.len()),
            ReportRow::new("total_transaction_amount", self.total_amount()),
        ];

        match self.max_transaction_amount() {
            Ok(max) => rows.push(ReportRow::new(
                "max_transaction_amount",
                format!("{max:.4}"),
            )),
            Err(e) => log::warn!("Skipping max_transaction_amount: {e}"),
        }

        rows.push(ReportRow::new("unique_clients", self.count_unique_clients()));
        rows.push(ReportRow::new(
            "beneficiary_count",
            self.transactions_by_beneficiary_name().len(),
        ));

        let mut unsolved = self.unsolved_issue_ids().into_iter().collect::<Vec<_>>();
        unsolved.sort_unstable();
        let unsolved = unsolved
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(";");
        rows.push(ReportRow::new("unsolved_issue_ids", unsolved));

        for message in self.all_solved_issue_messages() {
            rows.push(ReportRow::new("solved_issue_message", message));
        }

        for tx in self.top_3_transactions_by_amount() {
            rows.push(ReportRow::new(
                "top_transaction",
                format!("{}:{:.4}", tx.mtn, tx.amount),
            ));
        }

        if let Some(name) = self.top_sender() {
            rows.push(ReportRow::new("top_sender", name));
        }

        if let Some(client) = client {
            rows.push(ReportRow::new(
                "total_sent_by",
                self.total_amount_sent_by(client),
            ));
            rows.push(ReportRow::new(
                "open_compliance_issues",
                self.has_open_compliance_issues(client),
            ));
        }

        rows
    }
}
