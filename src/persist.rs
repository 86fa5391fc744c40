// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local snapshot persistence and whole-state backups.
//!
//! Each collection lives under its own key as a JSON array. Durability is
//! best effort: a blob is rewritten in full on every change.

use crate::error::{ImportError, StorageError};
use crate::models::{Budget, Debt, Transaction, is_storable_amount};
use crate::store::{Change, RecordStore};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const TRANSACTIONS_KEY: &str = "rupeeWise_transactions";
pub const DEBTS_KEY: &str = "rupeeWise_debts";
pub const BUDGETS_KEY: &str = "rupeeWise_budgets";

pub fn key_for(change: Change) -> &'static str {
    match change {
        Change::Transactions => TRANSACTIONS_KEY,
        Change::Debts => DEBTS_KEY,
        Change::Budgets => BUDGETS_KEY,
    }
}

/// Durable string-valued key-value storage.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn load_collection<T: DeserializeOwned>(
    blobs: &impl BlobStore,
    key: &str,
) -> Result<Vec<T>, StorageError> {
    match blobs.get(key)? {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        }),
        None => Ok(Vec::new()),
    }
}

/// Rebuild the record store from storage. Missing keys load as empty.
pub fn load_store(blobs: &impl BlobStore) -> Result<RecordStore, StorageError> {
    let transactions = load_collection(blobs, TRANSACTIONS_KEY)?;
    let debts = load_collection(blobs, DEBTS_KEY)?;
    let budgets = load_collection(blobs, BUDGETS_KEY)?;
    Ok(RecordStore::from_parts(transactions, debts, budgets))
}

fn encode<T: Serialize>(key: &str, items: &[T]) -> Result<String, StorageError> {
    serde_json::to_string(items).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })
}

/// Write the collection named by `change` back to storage.
pub fn save_collection(
    blobs: &mut impl BlobStore,
    store: &RecordStore,
    change: Change,
) -> Result<(), StorageError> {
    let key = key_for(change);
    let raw = match change {
        Change::Transactions => encode(key, store.transactions())?,
        Change::Debts => encode(key, store.debts())?,
        Change::Budgets => encode(key, store.budgets())?,
    };
    blobs.put(key, &raw)?;
    debug!(key, bytes = raw.len(), "Saved collection");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupOut<'a> {
    transactions: &'a [Transaction],
    debts: &'a [Debt],
    budgets: &'a [Budget],
    export_date: DateTime<Utc>,
}

/// A parsed backup. Absent (or null) collections are left alone on import.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackupDocument {
    pub transactions: Option<Vec<Transaction>>,
    pub debts: Option<Vec<Debt>>,
    pub budgets: Option<Vec<Budget>>,
}

pub fn export_backup(store: &RecordStore, now: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&BackupOut {
        transactions: store.transactions(),
        debts: store.debts(),
        budgets: store.budgets(),
        export_date: now,
    })
}

pub fn backup_file_name(day: NaiveDate) -> String {
    format!("rupeewise_backup_{}.json", day.format("%Y-%m-%d"))
}

fn check_unique_ids<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ImportError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ImportError::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn check_amount(
    collection: &'static str,
    key: &str,
    amount: rust_decimal::Decimal,
) -> Result<(), ImportError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ImportError::NegativeAmount {
            collection,
            key: key.to_string(),
            amount,
        });
    }
    if !is_storable_amount(amount) {
        return Err(ImportError::UnstorableAmount {
            collection,
            key: key.to_string(),
            amount,
        });
    }
    Ok(())
}

/// Parse and check a backup without touching any state.
pub fn parse_backup(raw: &str) -> Result<BackupDocument, ImportError> {
    // A derived struct also deserializes from a JSON array; only objects count.
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err(ImportError::NotAnObject);
    }
    let doc: BackupDocument = serde_json::from_value(value)?;
    if doc.transactions.is_none() && doc.debts.is_none() && doc.budgets.is_none() {
        return Err(ImportError::NoCollections);
    }
    if let Some(ts) = &doc.transactions {
        check_unique_ids("transaction", ts.iter().map(|t| t.id.as_str()))?;
        for t in ts {
            check_amount("transaction", &t.id, t.amount)?;
        }
    }
    if let Some(ds) = &doc.debts {
        check_unique_ids("debt", ds.iter().map(|d| d.id.as_str()))?;
        for d in ds {
            check_amount("debt", &d.id, d.amount)?;
        }
    }
    if let Some(bs) = &doc.budgets {
        let mut seen = HashSet::new();
        for b in bs {
            if !seen.insert(b.category.as_str()) {
                return Err(ImportError::DuplicateBudget(b.category.clone()));
            }
            check_amount("budget", &b.category, b.limit)?;
        }
    }
    Ok(doc)
}

/// Replace every collection present in `doc`, returning what changed.
pub fn apply_backup(store: &mut RecordStore, doc: BackupDocument) -> Vec<Change> {
    let mut changes = Vec::new();
    if let Some(ts) = doc.transactions {
        changes.push(store.replace_transactions(ts));
    }
    if let Some(ds) = doc.debts {
        changes.push(store.replace_debts(ds));
    }
    if let Some(bs) = doc.budgets {
        changes.push(store.replace_budgets(bs));
    }
    info!(collections = changes.len(), "Backup applied");
    changes
}

pub fn import_backup(store: &mut RecordStore, raw: &str) -> Result<Vec<Change>, ImportError> {
    let doc = parse_backup(raw)?;
    Ok(apply_backup(store, doc))
}
