//! Account balances and the trial balance.

use rust_decimal::Decimal;
use serde::Serialize;

use shamba_storage::{Account, AccountId, EntrySide, JournalEntry};

use crate::{collect_warnings, index_accounts, ReportWarning};

/// Raw debit/credit movement on one account across a set of entries.
pub(crate) fn movements<'a>(
    account_id: &AccountId,
    entries: impl Iterator<Item = &'a JournalEntry>,
) -> (Decimal, Decimal) {
    let mut debits = Decimal::ZERO;
    let mut credits = Decimal::ZERO;
    for entry in entries {
        for line in entry.lines.iter().filter(|l| &l.account_id == account_id) {
            match line.side {
                EntrySide::Debit => debits += line.amount,
                EntrySide::Credit => credits += line.amount,
            }
        }
    }
    (debits, credits)
}

pub(crate) fn balance_over<'a>(
    account: &Account,
    entries: impl Iterator<Item = &'a JournalEntry>,
) -> Decimal {
    let (debits, credits) = movements(&account.id, entries);
    if account.account_type.is_debit_normal() {
        account.initial_balance + debits - credits
    } else {
        account.initial_balance + credits - debits
    }
}

/// Balance of one account: initial balance plus signed movement.
///
/// The sign convention flips with the account type: debits increase
/// Asset/Expense accounts and decrease the rest. Getting this backwards
/// silently produces a balance sheet that fails to balance, so it lives in
/// exactly one place.
pub fn account_balance(account: &Account, entries: &[JournalEntry]) -> Decimal {
    balance_over(account, entries.iter())
}

/// One account's row in the trial balance: raw totals, no sign conversion.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrialBalanceRow {
    pub account_id: AccountId,
    pub account_name: String,
    pub debit_total: Decimal,
    pub credit_total: Decimal,
}

/// Trial balance over every account.
///
/// When every entry balances, `total_debits == total_credits`; this is the defining
/// correctness property of the ledger. Lines referencing deleted accounts
/// are excluded from the rows and flagged in `warnings`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrialBalance {
    pub rows: Vec<TrialBalanceRow>,
    pub total_debits: Decimal,
    pub total_credits: Decimal,
    pub warnings: Vec<ReportWarning>,
}

pub fn trial_balance(accounts: &[Account], entries: &[JournalEntry]) -> TrialBalance {
    let rows: Vec<TrialBalanceRow> = accounts
        .iter()
        .map(|account| {
            let (debit_total, credit_total) = movements(&account.id, entries.iter());
            TrialBalanceRow {
                account_id: account.id.clone(),
                account_name: account.name.clone(),
                debit_total,
                credit_total,
            }
        })
        .collect();

    let total_debits = rows.iter().map(|r| r.debit_total).sum();
    let total_credits = rows.iter().map(|r| r.credit_total).sum();
    let index = index_accounts(accounts);

    TrialBalance {
        rows,
        total_debits,
        total_credits,
        warnings: collect_warnings(&index, entries.iter()),
    }
}
