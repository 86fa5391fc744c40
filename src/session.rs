// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! A record store paired with the storage that mirrors it.

use crate::error::Result;
use crate::models::{Debt, DebtUpdate, NewDebt, NewTransaction, Transaction};
use crate::persist::{self, BlobStore};
use crate::store::{Change, RecordStore};
use rust_decimal::Decimal;

pub struct Session<B: BlobStore> {
    store: RecordStore,
    blobs: B,
}

impl<B: BlobStore> Session<B> {
    /// Load the current snapshot from `blobs`.
    pub fn open(blobs: B) -> Result<Self> {
        let store = persist::load_store(&blobs)?;
        Ok(Self { store, blobs })
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    fn sync(&mut self, change: Option<Change>) -> Result<bool> {
        match change {
            Some(c) => {
                persist::save_collection(&mut self.blobs, &self.store, c)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn add_transaction(&mut self, fields: NewTransaction) -> Result<Transaction> {
        let (t, change) = self.store.add_transaction(fields)?;
        self.sync(Some(change))?;
        Ok(t)
    }

    /// Returns whether anything was removed.
    pub fn delete_transaction(&mut self, id: &str) -> Result<bool> {
        let change = self.store.delete_transaction(id);
        self.sync(change)
    }

    pub fn add_debt(&mut self, fields: NewDebt) -> Result<Debt> {
        let (d, change) = self.store.add_debt(fields)?;
        self.sync(Some(change))?;
        Ok(d)
    }

    pub fn toggle_debt_paid(&mut self, id: &str) -> Result<bool> {
        let change = self.store.toggle_debt_paid(id);
        self.sync(change)
    }

    pub fn delete_debt(&mut self, id: &str) -> Result<bool> {
        let change = self.store.delete_debt(id);
        self.sync(change)
    }

    pub fn edit_debt(&mut self, id: &str, update: DebtUpdate) -> Result<bool> {
        let change = self.store.edit_debt(id, update)?;
        self.sync(change)
    }

    pub fn upsert_budget(&mut self, category: &str, limit: Decimal) -> Result<()> {
        let change = self.store.upsert_budget(category, limit)?;
        self.sync(Some(change))?;
        Ok(())
    }

    /// Restore from a backup document; nothing changes if it is rejected.
    pub fn import_backup(&mut self, raw: &str) -> Result<Vec<Change>> {
        let changes = persist::import_backup(&mut self.store, raw)?;
        for c in &changes {
            persist::save_collection(&mut self.blobs, &self.store, *c)?;
        }
        Ok(changes)
    }
}
