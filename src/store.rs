// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory record store for transactions, debts and budgets.
//!
//! Mutators never touch storage. They report the collection they changed as
//! a [`Change`] so the caller can mirror it; a no-op (unknown id) reports
//! nothing.

use crate::error::ValidationError;
use crate::models::{
    Budget, Debt, DebtUpdate, NewDebt, NewTransaction, Transaction, is_storable_amount,
};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    Transactions,
    Debts,
    Budgets,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    transactions: Vec<Transaction>,
    debts: Vec<Debt>,
    budgets: Vec<Budget>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn require_storable(amount: Decimal) -> Result<(), ValidationError> {
    if !is_storable_amount(amount) {
        return Err(ValidationError::UnstorableAmount(amount));
    }
    Ok(())
}

fn require_positive(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    require_storable(amount)
}

fn require_non_negative(amount: Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::NegativeAmount(amount));
    }
    require_storable(amount)
}

fn clean_optional(text: Option<String>) -> Option<String> {
    text.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from previously persisted collections.
    pub fn from_parts(
        transactions: Vec<Transaction>,
        debts: Vec<Debt>,
        budgets: Vec<Budget>,
    ) -> Self {
        Self {
            transactions,
            debts,
            budgets,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn add_transaction(
        &mut self,
        fields: NewTransaction,
    ) -> Result<(Transaction, Change), ValidationError> {
        let description = fields.description.trim().to_string();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        require_positive(fields.amount)?;
        let t = Transaction {
            id: new_id(),
            date: fields.date,
            description,
            amount: fields.amount,
            r#type: fields.r#type,
            category: fields.category,
        };
        self.transactions.push(t.clone());
        Ok((t, Change::Transactions))
    }

    pub fn delete_transaction(&mut self, id: &str) -> Option<Change> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        (self.transactions.len() != before).then_some(Change::Transactions)
    }

    pub fn add_debt(&mut self, fields: NewDebt) -> Result<(Debt, Change), ValidationError> {
        if fields.person_name.trim().is_empty() {
            return Err(ValidationError::EmptyPersonName);
        }
        require_positive(fields.amount)?;
        // The name is stored as typed; grouping trims it.
        let d = Debt {
            id: new_id(),
            person_name: fields.person_name,
            description: clean_optional(fields.description),
            amount: fields.amount,
            r#type: fields.r#type,
            due_date: fields.due_date,
            is_paid: false,
        };
        self.debts.push(d.clone());
        Ok((d, Change::Debts))
    }

    pub fn toggle_debt_paid(&mut self, id: &str) -> Option<Change> {
        let debt = self.debts.iter_mut().find(|d| d.id == id)?;
        debt.is_paid = !debt.is_paid;
        Some(Change::Debts)
    }

    pub fn delete_debt(&mut self, id: &str) -> Option<Change> {
        let before = self.debts.len();
        self.debts.retain(|d| d.id != id);
        (self.debts.len() != before).then_some(Change::Debts)
    }

    /// Merge the provided fields into the debt with `id`.
    ///
    /// Returns `Ok(None)` when no such debt exists or the update is empty.
    pub fn edit_debt(
        &mut self,
        id: &str,
        update: DebtUpdate,
    ) -> Result<Option<Change>, ValidationError> {
        if let Some(amount) = update.amount {
            require_non_negative(amount)?;
        }
        if update.is_empty() {
            return Ok(None);
        }
        let Some(debt) = self.debts.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        if let Some(amount) = update.amount {
            debt.amount = amount;
        }
        if let Some(kind) = update.r#type {
            debt.r#type = kind;
        }
        if let Some(description) = update.description {
            debt.description = clean_optional(Some(description));
        }
        if let Some(due) = update.due_date {
            debt.due_date = due;
        }
        Ok(Some(Change::Debts))
    }

    /// Set the limit for `category`, replacing any existing one.
    pub fn upsert_budget(
        &mut self,
        category: &str,
        limit: Decimal,
    ) -> Result<Change, ValidationError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        require_non_negative(limit)?;
        match self.budgets.iter_mut().find(|b| b.category == category) {
            Some(existing) => existing.limit = limit,
            None => self.budgets.push(Budget {
                category: category.to_string(),
                limit,
            }),
        }
        Ok(Change::Budgets)
    }

    pub fn budget_limit(&self, category: &str) -> Option<Decimal> {
        self.budgets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.limit)
    }

    pub fn replace_transactions(&mut self, transactions: Vec<Transaction>) -> Change {
        self.transactions = transactions;
        Change::Transactions
    }

    pub fn replace_debts(&mut self, debts: Vec<Debt>) -> Change {
        self.debts = debts;
        Change::Debts
    }

    pub fn replace_budgets(&mut self, budgets: Vec<Budget>) -> Change {
        self.budgets = budgets;
        Change::Budgets
    }
}
