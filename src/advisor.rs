// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Free-text financial advice from a remote language model.
//!
//! Nothing else depends on the result. [`analyze_finances`] always returns
//! a string: the advice, or a fixed message when the call did not work out.

use crate::models::{Debt, DebtType, Transaction};
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

pub const EMPTY_ANALYSIS: &str = "Unable to generate analysis at this time.";
pub const ADVISOR_ERROR: &str = "Error connecting to AI advisor. Please check your API key.";

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Something that turns a prompt into model output.
pub trait AdviceBackend {
    /// `Ok(None)` means the model answered with no text.
    fn generate(&self, prompt: &str) -> Result<Option<String>>;
}

pub fn transaction_lines(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .map(|t| {
            format!(
                "{}: {} ({}) - ₹{} [{}]",
                t.date,
                t.description,
                t.r#type,
                t.amount.normalize(),
                t.category
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Unpaid debts only; settled ones say nothing about what to do next.
pub fn debt_lines(debts: &[Debt]) -> String {
    debts
        .iter()
        .filter(|d| !d.is_paid)
        .map(|d| {
            let who = match d.r#type {
                DebtType::IOwe => "I owe",
                DebtType::OweMe => "Owes me",
            };
            format!(
                "{} {}: ₹{} ({})",
                who,
                d.person_name,
                d.amount.normalize(),
                d.description.as_deref().unwrap_or("No desc")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(transactions: &[Transaction], debts: &[Debt], period: &str) -> String {
    format!(
        "Act as a strict but helpful financial advisor.\n\
         Current Month Context: {period}\n\
         Currency: INR (₹)\n\
         \n\
         Here is my financial data:\n\
         \n\
         --- TRANSACTIONS ---\n\
         {txs}\n\
         \n\
         --- OUTSTANDING DEBTS/LOANS ---\n\
         {debts}\n\
         \n\
         Please provide a brief, actionable financial analysis in Markdown format.\n\
         1. Summarize my spending habits this month.\n\
         2. Identify the biggest money drain.\n\
         3. Give specific advice on how to save more rupees based on the categories.\n\
         4. Comment on my debt situation (who I need to pay back urgently or collect from).\n\
         5. Keep it concise, under 200 words. Use bullet points.\n",
        period = period,
        txs = transaction_lines(transactions),
        debts = debt_lines(debts),
    )
}

pub fn analyze_finances(
    backend: &dyn AdviceBackend,
    transactions: &[Transaction],
    debts: &[Debt],
    period: &str,
) -> String {
    let prompt = build_prompt(transactions, debts, period);
    debug!(prompt_len = prompt.len(), "Requesting financial analysis");
    match backend.generate(&prompt) {
        Ok(Some(text)) if !text.trim().is_empty() => text,
        Ok(_) => EMPTY_ANALYSIS.to_string(),
        Err(e) => {
            warn!(error = %e, "Error analyzing finances");
            ADVISOR_ERROR.to_string()
        }
    }
}

/// Google Gemini `generateContent` over HTTPS.
pub struct GeminiBackend {
    api_key: Option<String>,
    model: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiBackend {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            api_key,
            model: model.into(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn response_text(resp: GenerateResponse) -> Option<String> {
    let text: String = resp
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    (!text.is_empty()).then_some(text)
}

impl AdviceBackend for GeminiBackend {
    fn generate(&self, prompt: &str) -> Result<Option<String>> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("No API key configured (set GEMINI_API_KEY)"))?;
        let url = format!("{}/{}:generateContent", GEMINI_BASE, self.model);
        let client = crate::utils::http_client(self.timeout)?;
        let resp: GenerateResponse = client
            .post(url)
            .query(&[("key", key)])
            .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .send()
            .context("Send request to Gemini")?
            .error_for_status()?
            .json()
            .context("Decode Gemini response")?;
        Ok(response_text(resp))
    }
}
