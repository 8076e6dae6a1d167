use serde::Deserialize;
use thiserror::Error;

use crate::engine::Transaction;

/// A transaction as found in the JSON input.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InputRecord {
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

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Amount of mtn {mtn} is not a finite number: {amount}")]
    NonFiniteAmount { mtn: i64, amount: f64 },
}

impl InputRecord {
    pub fn to_transaction(&self) -> Result<Transaction, RecordError> {
        if !self.amount.is_finite() {
            Err(RecordError::NonFiniteAmount {
                mtn: self.mtn,
                amount: self.amount,
            })?
        }

        Ok(Transaction {
            mtn: self.mtn,
            amount: self.amount,
            sender_full_name: self.sender_full_name.clone(),
            sender_age: self.sender_age,
            beneficiary_full_name: self.beneficiary_full_name.clone(),
            beneficiary_age: self.beneficiary_age,
            issue_id: self.issue_id,
            issue_solved: self.issue_solved,
            issue_message: self.issue_message.clone(),
        })
    }
}
