//! Financial record mutations: chart of accounts and the general journal.
//!
//! Reads go straight through [`Shamba::store`]; these methods exist to
//! generate ids, apply defaults, persist the full document and publish the
//! change event.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use shamba_events::ChangeKind;
use shamba_ledger::entry_imbalance;
use shamba_storage::{
    Account, AccountId, AccountType, EntrySide, JournalEntry, JournalEntryId, JournalEntryLine,
    SaleId, Store, StoreError, WorkspaceId,
};

use crate::{CoreError, Shamba};

/// Parameters for creating an account.
#[derive(Clone, Debug)]
pub struct NewAccount {
    pub name: String,
    pub account_type: AccountType,
    pub initial_balance: Decimal,
    /// Defaults to the configured currency.
    pub currency: Option<String>,
}

/// Parameters for creating a journal entry.
#[derive(Clone, Debug)]
pub struct NewJournalEntry {
    pub date: NaiveDate,
    pub description: String,
    /// Defaults to the configured currency.
    pub currency: Option<String>,
    pub category: Option<String>,
    pub lines: Vec<JournalEntryLine>,
}

impl<S: Store> Shamba<S> {
    fn currency_or_default(&self, currency: Option<String>) -> String {
        currency.unwrap_or_else(|| self.config.default_currency.clone())
    }

    fn build_entry(&self, new: NewJournalEntry) -> JournalEntry {
        let entry = JournalEntry {
            id: JournalEntryId::generate(),
            date: new.date,
            description: new.description,
            currency: self.currency_or_default(new.currency),
            category: new.category,
            lines: new.lines,
        };
        // Unbalanced entries are accepted (manual adjusting entries exist),
        // but logged so the discrepancy has a trail before it surfaces as a
        // report warning.
        let residual = entry_imbalance(&entry);
        if !residual.is_zero() {
            warn!(entry_id = %entry.id, %residual, "accepting unbalanced journal entry");
        }
        entry
    }

    // ───────────────────────────────────── Accounts ───────────────────────────────────────

    pub async fn add_account(
        &self,
        ws: &WorkspaceId,
        new: NewAccount,
    ) -> Result<Account, CoreError> {
        self.active_workspace(ws).await?;
        let account = Account {
            id: AccountId::generate(),
            name: new.name,
            account_type: new.account_type,
            initial_balance: new.initial_balance,
            currency: self.currency_or_default(new.currency),
        };
        self.store.create_account(ws, &account).await?;
        self.emit(ws, ChangeKind::Created, "accounts", account.id.as_str())
            .await;
        Ok(account)
    }

    pub async fn update_account(
        &self,
        ws: &WorkspaceId,
        account: Account,
    ) -> Result<Account, CoreError> {
        self.active_workspace(ws).await?;
        self.store.replace_account(ws, &account).await?;
        self.emit(ws, ChangeKind::Updated, "accounts", account.id.as_str())
            .await;
        Ok(account)
    }

    /// Delete an account by id. Journal lines that reference it are left in
    /// place; reports exclude them and flag the orphaned reference.
    pub async fn delete_account(&self, ws: &WorkspaceId, id: &AccountId) -> Result<(), CoreError> {
        self.active_workspace(ws).await?;
        self.store.delete_account(ws, id).await?;
        self.emit(ws, ChangeKind::Deleted, "accounts", id.as_str())
            .await;
        Ok(())
    }

    // ───────────────────────────────────── Journal entries ────────────────────────────────

    pub async fn add_journal_entry(
        &self,
        ws: &WorkspaceId,
        new: NewJournalEntry,
    ) -> Result<JournalEntry, CoreError> {
        self.active_workspace(ws).await?;
        let entry = self.build_entry(new);
        self.store.create_journal_entry(ws, &entry).await?;
        self.emit(ws, ChangeKind::Created, "journal_entries", entry.id.as_str())
            .await;
        Ok(entry)
    }

    /// Bulk import (spreadsheet upload). All-or-nothing.
    pub async fn import_journal_entries(
        &self,
        ws: &WorkspaceId,
        new_entries: Vec<NewJournalEntry>,
    ) -> Result<Vec<JournalEntry>, CoreError> {
        self.active_workspace(ws).await?;
        let entries: Vec<JournalEntry> = new_entries
            .into_iter()
            .map(|n| self.build_entry(n))
            .collect();
        self.store.create_journal_entries(ws, &entries).await?;
        for entry in &entries {
            self.emit(ws, ChangeKind::Created, "journal_entries", entry.id.as_str())
                .await;
        }
        Ok(entries)
    }

    pub async fn update_journal_entry(
        &self,
        ws: &WorkspaceId,
        entry: JournalEntry,
    ) -> Result<JournalEntry, CoreError> {
        self.active_workspace(ws).await?;
        self.store.replace_journal_entry(ws, &entry).await?;
        self.emit(ws, ChangeKind::Updated, "journal_entries", entry.id.as_str())
            .await;
        Ok(entry)
    }

    pub async fn delete_journal_entry(
        &self,
        ws: &WorkspaceId,
        id: &JournalEntryId,
    ) -> Result<(), CoreError> {
        self.active_workspace(ws).await?;
        self.store.delete_journal_entry(ws, id).await?;
        self.emit(ws, ChangeKind::Deleted, "journal_entries", id.as_str())
            .await;
        Ok(())
    }

    /// Post a recorded sale to the ledger: debit the cash account, credit
    /// the income account, link the entry back to the sale.
    pub async fn post_sale_to_ledger(
        &self,
        ws: &WorkspaceId,
        sale_id: &SaleId,
        cash_account: &AccountId,
        income_account: &AccountId,
    ) -> Result<JournalEntry, CoreError> {
        self.active_workspace(ws).await?;
        let mut sale = self
            .store
            .list_sales(ws)
            .await?
            .into_iter()
            .find(|s| &s.id == sale_id)
            .ok_or(StoreError::NotFound)?;

        let total = sale.total();
        let entry = JournalEntry {
            id: JournalEntryId::generate(),
            date: sale.date,
            description: format!("Sale {}", sale.id),
            currency: self.config.default_currency.clone(),
            category: Some("Sales".to_string()),
            lines: vec![
                JournalEntryLine {
                    account_id: cash_account.clone(),
                    side: EntrySide::Debit,
                    amount: total,
                    plot_id: None,
                    season_id: None,
                },
                JournalEntryLine {
                    account_id: income_account.clone(),
                    side: EntrySide::Credit,
                    amount: total,
                    plot_id: None,
                    season_id: None,
                },
            ],
        };
        self.store.create_journal_entry(ws, &entry).await?;

        sale.journal_entry_id = Some(entry.id.clone());
        self.store.replace_sale(ws, &sale).await?;

        self.emit(ws, ChangeKind::Created, "journal_entries", entry.id.as_str())
            .await;
        self.emit(ws, ChangeKind::Updated, "sales", sale.id.as_str())
            .await;
        Ok(entry)
    }
}
