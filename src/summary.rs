// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over a snapshot of the record store.
//!
//! Every function here is total: empty input gives zeroed or empty output,
//! nothing is mutated and nothing can fail.

use crate::models::{
    Budget, Debt, DebtType, INCOME_ONLY_CATEGORIES, TRANSACTION_CATEGORIES, Transaction,
    TransactionType,
};
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    /// Balance as a percentage of income; zero when there is no income.
    pub savings_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutstandingDebts {
    pub total_i_owe: Decimal,
    pub total_owed_to_me: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub savings: Decimal,
    pub expenses_by_category: BTreeMap<String, Decimal>,
    /// Debts are a running ledger and are never filtered by month.
    pub debts: OutstandingDebts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonBalance {
    pub person: String,
    pub i_owe: Decimal,
    pub owes_me: Decimal,
    pub is_settled: bool,
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    /// Share of the limit used, capped at 100.
    pub percentage: Decimal,
    pub is_over_budget: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewBar {
    pub name: &'static str,
    pub value: Decimal,
}

fn sum_by_type(transactions: &[&Transaction], kind: TransactionType) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.r#type == kind)
        .map(|t| t.amount)
        .sum()
}

fn summarize(transactions: &[&Transaction]) -> GlobalSummary {
    let total_income = sum_by_type(transactions, TransactionType::Income);
    let total_expense = sum_by_type(transactions, TransactionType::Expense);
    let balance = total_income - total_expense;
    let savings_rate = if total_income > Decimal::ZERO {
        balance / total_income * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    GlobalSummary {
        total_income,
        total_expense,
        balance,
        savings_rate,
    }
}

pub fn global_summary(transactions: &[Transaction]) -> GlobalSummary {
    let all: Vec<&Transaction> = transactions.iter().collect();
    summarize(&all)
}

/// Expense totals per category, in order of each category's first
/// appearance. Categories without expenses are not listed.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut out: Vec<CategoryTotal> = Vec::new();
    for t in transactions
        .iter()
        .filter(|t| t.r#type == TransactionType::Expense)
    {
        match out.iter_mut().find(|c| c.category == t.category) {
            Some(entry) => entry.total_amount += t.amount,
            None => out.push(CategoryTotal {
                category: t.category.clone(),
                total_amount: t.amount,
            }),
        }
    }
    out
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn in_month(t: &Transaction, month: &str) -> bool {
    month_key(t.date) == month
}

pub fn outstanding_debts(debts: &[Debt]) -> OutstandingDebts {
    let unpaid = |kind: DebtType| -> Decimal {
        debts
            .iter()
            .filter(|d| d.r#type == kind && !d.is_paid)
            .map(|d| d.amount)
            .sum()
    };
    OutstandingDebts {
        total_i_owe: unpaid(DebtType::IOwe),
        total_owed_to_me: unpaid(DebtType::OweMe),
    }
}

pub fn month_view(transactions: &[Transaction], debts: &[Debt], month: &str) -> MonthView {
    let scoped: Vec<&Transaction> = transactions.iter().filter(|t| in_month(t, month)).collect();
    let totals = summarize(&scoped);

    let mut expenses_by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in scoped
        .iter()
        .filter(|t| t.r#type == TransactionType::Expense)
    {
        *expenses_by_category
            .entry(t.category.clone())
            .or_insert(Decimal::ZERO) += t.amount;
    }

    MonthView {
        month: month.to_string(),
        income: totals.total_income,
        expense: totals.total_expense,
        savings: totals.balance,
        expenses_by_category,
        debts: outstanding_debts(debts),
    }
}

/// Outstanding balances per person, sorted by name.
///
/// People are grouped on the trimmed name with exact, case-sensitive
/// comparison. Paid debts stay in the list of people but add nothing.
pub fn person_netting(debts: &[Debt]) -> Vec<PersonBalance> {
    let mut groups: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for d in debts {
        let entry = groups
            .entry(d.person_name.trim().to_string())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        if d.is_paid {
            continue;
        }
        match d.r#type {
            DebtType::IOwe => entry.0 += d.amount,
            DebtType::OweMe => entry.1 += d.amount,
        }
    }
    groups
        .into_iter()
        .map(|(person, (i_owe, owes_me))| PersonBalance {
            person,
            is_settled: i_owe.is_zero() && owes_me.is_zero(),
            net: owes_me - i_owe,
            i_owe,
            owes_me,
        })
        .collect()
}

pub fn budget_progress(
    category: &str,
    budgets: &[Budget],
    expenses_by_category: &BTreeMap<String, Decimal>,
) -> BudgetProgress {
    let limit = budgets
        .iter()
        .find(|b| b.category == category)
        .map(|b| b.limit)
        .unwrap_or(Decimal::ZERO);
    let spent = expenses_by_category
        .get(category)
        .copied()
        .unwrap_or(Decimal::ZERO);
    let percentage = if limit > Decimal::ZERO {
        (spent / limit * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };
    BudgetProgress {
        category: category.to_string(),
        limit,
        spent,
        percentage,
        is_over_budget: limit > Decimal::ZERO && spent > limit,
    }
}

/// Categories that make sense to budget for: everything but income labels.
pub fn budgetable_categories() -> Vec<&'static str> {
    TRANSACTION_CATEGORIES
        .iter()
        .copied()
        .filter(|c| !INCOME_ONLY_CATEGORIES.contains(c))
        .collect()
}

/// Progress of every budgetable category for one month.
pub fn budget_report(view: &MonthView, budgets: &[Budget]) -> Vec<BudgetProgress> {
    budgetable_categories()
        .into_iter()
        .map(|c| budget_progress(c, budgets, &view.expenses_by_category))
        .collect()
}

/// Transactions dated within `[from, to]`; either bound may be open.
pub fn filter_by_date_range(
    transactions: &[Transaction],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| from.is_none_or(|f| t.date >= f))
        .filter(|t| to.is_none_or(|e| t.date <= e))
        .collect()
}

pub fn overview_bars(summary: &GlobalSummary) -> [OverviewBar; 3] {
    [
        OverviewBar {
            name: "Income",
            value: summary.total_income,
        },
        OverviewBar {
            name: "Expense",
            value: summary.total_expense,
        },
        OverviewBar {
            name: "Savings",
            value: summary.balance.max(Decimal::ZERO),
        },
    ]
}

/// The `YYYY-MM` key `offset` months away from `month`.
pub fn shift_month(month: &str, offset: i32) -> Option<String> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d").ok()?;
    let step = Months::new(offset.unsigned_abs());
    let moved = if offset >= 0 {
        first.checked_add_months(step)?
    } else {
        first.checked_sub_months(step)?
    };
    Some(month_key(moved))
}

/// Text a user can send to `balance.person` to settle up.
pub fn settlement_message(balance: &PersonBalance) -> String {
    let mut msg = format!(
        "Hi {},\n\nHere's our current debt summary:\n",
        balance.person
    );
    if balance.is_settled {
        msg.push_str("We're all settled up!");
    } else {
        if balance.i_owe > Decimal::ZERO {
            msg.push_str(&format!(
                "I currently owe you ₹{}\n",
                balance.i_owe.normalize()
            ));
        }
        if balance.owes_me > Decimal::ZERO {
            msg.push_str(&format!(
                "You currently owe me ₹{}\n",
                balance.owes_me.normalize()
            ));
        }
        if balance.net > Decimal::ZERO {
            msg.push_str(&format!(
                "\nNet: You owe me ₹{}",
                balance.net.abs().normalize()
            ));
        } else if balance.net < Decimal::ZERO {
            msg.push_str(&format!(
                "\nNet: I owe you ₹{}",
                balance.net.abs().normalize()
            ));
        }
    }
    msg.push_str("\n\nLet's settle this soon!");
    msg
}
