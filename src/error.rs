// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejected input on a store mutation.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Description must not be empty")]
    EmptyDescription,

    #[error("Person name must not be empty")]
    EmptyPersonName,

    #[error("Budget category must not be empty")]
    EmptyCategory,

    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("Amount {0} needs at most 2 decimal places and 13 integer digits")]
    UnstorableAmount(Decimal),
}

/// Reasons a backup document is refused. State is never touched when one of
/// these is returned.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid backup file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Backup contains none of transactions, debts or budgets")]
    NoCollections,

    #[error("Duplicate {collection} id '{id}' in backup")]
    DuplicateId { collection: &'static str, id: String },

    #[error("Duplicate budget for category '{0}' in backup")]
    DuplicateBudget(String),

    #[error("Negative amount {amount} in {collection} '{key}'")]
    NegativeAmount {
        collection: &'static str,
        key: String,
        amount: Decimal,
    },

    #[error("Amount {amount} in {collection} '{key}' is out of range or too precise")]
    UnstorableAmount {
        collection: &'static str,
        key: String,
        amount: Decimal,
    },

    #[error("Backup must be a JSON object")]
    NotAnObject,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt blob '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of a persisted store operation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Import(#[from] ImportError),
}

pub type Result<T> = std::result::Result<T, Error>;
