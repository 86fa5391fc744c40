// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed, ordered category labels offered by the transaction form.
pub const TRANSACTION_CATEGORIES: [&str; 11] = [
    "Food",
    "Transport",
    "Rent",
    "Utilities",
    "Entertainment",
    "Shopping",
    "Healthcare",
    "Education",
    "Salary",
    "Freelance",
    "Other",
];

/// Labels that only ever carry income and are left out of budget planning.
pub const INCOME_ONLY_CATEGORIES: [&str; 2] = ["Salary", "Freelance"];

/// Paise precision.
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Amounts must stay below ten trillion rupees.
const AMOUNT_CEILING: i64 = 10_000_000_000_000;

/// Whether `amount` survives the JSON number encoding unchanged.
///
/// Stored amounts are written as `f64`, which holds at most 15 significant
/// decimal digits exactly: two decimal places plus thirteen integer digits.
pub fn is_storable_amount(amount: Decimal) -> bool {
    amount.normalize().scale() <= AMOUNT_DECIMAL_PLACES
        && amount.abs() < Decimal::from(AMOUNT_CEILING)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a debt. `OweMe` means someone took money from me,
/// `IOwe` means I have to pay someone back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtType {
    IOwe,
    OweMe,
}

impl DebtType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtType::IOwe => "i_owe",
            DebtType::OweMe => "owe_me",
        }
    }
}

impl fmt::Display for DebtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub r#type: TransactionType,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    pub person_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub r#type: DebtType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_paid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub limit: Decimal,
}

/// Fields of a transaction supplied by the caller; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category: String,
}

/// Fields of a debt supplied by the caller; the store assigns the id and
/// starts every debt unpaid.
#[derive(Debug, Clone)]
pub struct NewDebt {
    pub person_name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub r#type: DebtType,
    pub due_date: Option<NaiveDate>,
}

/// Partial edit of a debt. `None` leaves the attribute untouched.
#[derive(Debug, Clone, Default)]
pub struct DebtUpdate {
    pub amount: Option<Decimal>,
    pub r#type: Option<DebtType>,
    pub description: Option<String>,
    /// `Some(None)` clears the due date.
    pub due_date: Option<Option<NaiveDate>>,
}

impl DebtUpdate {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.r#type.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
    }
}
