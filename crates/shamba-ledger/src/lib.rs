//! Ledger aggregation: financial reports derived from flat `Account` and
//! `JournalEntry` collections.
//!
//! Everything here is a pure function over an already-fetched snapshot.
//! Reports never fail: empty input produces zeroed structures, and
//! data-quality issues (lines against deleted accounts, entries whose debits
//! and credits don't balance) are skipped or flagged via [`ReportWarning`]
//! rather than raised. No aggregation state is cached between calls; a
//! fresh snapshot always produces a report consistent with that snapshot.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use shamba_storage::{Account, AccountId, JournalEntry, JournalEntryId};

mod balance;
mod reports;

pub use balance::{account_balance, trial_balance, TrialBalance, TrialBalanceRow};
pub use reports::{
    balance_sheet, expense_by_category, income_statement, profitability, AccountBalance,
    BalanceSheet, CategoryTotal, ExpenseByCategory, IncomeStatement,
};

/// Non-fatal data-quality findings surfaced alongside report totals.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ReportWarning {
    /// A journal line references an account that no longer exists; the
    /// line's amount is excluded from all totals.
    OrphanedReference {
        entry_id: JournalEntryId,
        account_id: AccountId,
    },
    /// An entry's debits and credits don't balance. `residual` is
    /// debits − credits (the suspense amount).
    UnbalancedEntry {
        entry_id: JournalEntryId,
        residual: Decimal,
    },
}

/// Inclusive reporting period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Debits minus credits for one entry; zero for a balanced entry.
///
/// Write paths that want to validate entries before accepting them can use
/// this; the report functions themselves stay tolerant regardless.
pub fn entry_imbalance(entry: &JournalEntry) -> Decimal {
    entry.debit_total() - entry.credit_total()
}

pub(crate) fn index_accounts(accounts: &[Account]) -> HashMap<&AccountId, &Account> {
    accounts.iter().map(|a| (&a.id, a)).collect()
}

/// Scan a snapshot for orphaned references and unbalanced entries.
pub(crate) fn collect_warnings<'a>(
    accounts: &HashMap<&AccountId, &Account>,
    entries: impl Iterator<Item = &'a JournalEntry>,
) -> Vec<ReportWarning> {
    let mut warnings = Vec::new();
    let mut seen_orphans = BTreeSet::new();
    for entry in entries {
        let residual = entry_imbalance(entry);
        if !residual.is_zero() {
            warnings.push(ReportWarning::UnbalancedEntry {
                entry_id: entry.id.clone(),
                residual,
            });
        }
        for line in &entry.lines {
            if !accounts.contains_key(&line.account_id)
                && seen_orphans.insert((entry.id.clone(), line.account_id.clone()))
            {
                warnings.push(ReportWarning::OrphanedReference {
                    entry_id: entry.id.clone(),
                    account_id: line.account_id.clone(),
                });
            }
        }
    }
    warnings
}
