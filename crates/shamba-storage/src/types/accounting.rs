//! Double-entry accounting types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AccountId, JournalEntryId, PlotId, SeasonId};

/// Ledger account classification.
///
/// The type decides the account's normal balance side: Asset and Expense are
/// debit-normal, Liability, Equity and Income are credit-normal. Reports
/// assume the type is stable once the account has entries against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Income,
    Expense,
}

impl AccountType {
    /// True when debits increase this account's balance.
    pub fn is_debit_normal(&self) -> bool {
        matches!(self, AccountType::Asset | AccountType::Expense)
    }
}

/// Chart-of-accounts entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub account_type: AccountType,
    pub initial_balance: Decimal,
    pub currency: String,
}

/// Which side of an entry a line posts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    Debit,
    Credit,
}

/// One line of a journal entry. `amount` is always non-negative; the side
/// carries the sign. Lines may be tagged with a plot and/or season for
/// profitability reporting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JournalEntryLine {
    pub account_id: AccountId,
    pub side: EntrySide,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_id: Option<PlotId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_id: Option<SeasonId>,
}

/// Journal entry: a dated set of debit/credit lines.
///
/// Balance (debits == credits) is not enforced at write time; the ledger
/// layer tolerates unbalanced entries and surfaces the residual as a warning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: JournalEntryId,
    pub date: NaiveDate,
    pub description: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub lines: Vec<JournalEntryLine>,
}

impl JournalEntry {
    /// Sum of the entry's debit line amounts.
    pub fn debit_total(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|l| l.side == EntrySide::Debit)
            .map(|l| l.amount)
            .sum()
    }

    /// Sum of the entry's credit line amounts.
    pub fn credit_total(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|l| l.side == EntrySide::Credit)
            .map(|l| l.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(account: &str, side: EntrySide, amount: i64) -> JournalEntryLine {
        JournalEntryLine {
            account_id: AccountId::from(account),
            side,
            amount: Decimal::from(amount),
            plot_id: None,
            season_id: None,
        }
    }

    #[test]
    fn normal_balance_side_by_type() {
        assert!(AccountType::Asset.is_debit_normal());
        assert!(AccountType::Expense.is_debit_normal());
        assert!(!AccountType::Liability.is_debit_normal());
        assert!(!AccountType::Equity.is_debit_normal());
        assert!(!AccountType::Income.is_debit_normal());
    }

    #[test]
    fn entry_side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&EntrySide::Debit).unwrap(), "\"debit\"");
        assert_eq!(
            serde_json::to_string(&EntrySide::Credit).unwrap(),
            "\"credit\""
        );
    }

    #[test]
    fn entry_totals() {
        let entry = JournalEntry {
            id: JournalEntryId::from("je_1"),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            description: "Sold maize".to_string(),
            currency: "GHS".to_string(),
            category: Some("Sales".to_string()),
            lines: vec![
                line("acc_cash", EntrySide::Debit, 500),
                line("acc_sales", EntrySide::Credit, 300),
                line("acc_sales", EntrySide::Credit, 200),
            ],
        };
        assert_eq!(entry.debit_total(), Decimal::from(500));
        assert_eq!(entry.credit_total(), Decimal::from(500));
    }

    #[test]
    fn entry_serde_roundtrip() {
        let entry = JournalEntry {
            id: JournalEntryId::from("je_1"),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            description: "Fertilizer purchase".to_string(),
            currency: "GHS".to_string(),
            category: None,
            lines: vec![line("acc_fert", EntrySide::Debit, 120)],
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: JournalEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
