//! Income statement, balance sheet, expense and profitability reports.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use shamba_storage::{Account, AccountId, AccountType, EntrySide, JournalEntry, PlotId, SeasonId};

use crate::balance::balance_over;
use crate::{collect_warnings, index_accounts, DateRange, ReportWarning};

/// One account's computed balance, as rendered in a report section.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AccountBalance {
    pub account_id: AccountId,
    pub name: String,
    pub balance: Decimal,
}

fn section<'a>(
    accounts: &[Account],
    entries: &[&'a JournalEntry],
    account_type: AccountType,
) -> (Vec<AccountBalance>, Decimal) {
    let rows: Vec<AccountBalance> = accounts
        .iter()
        .filter(|a| a.account_type == account_type)
        .map(|a| AccountBalance {
            account_id: a.id.clone(),
            name: a.name.clone(),
            balance: balance_over(a, entries.iter().copied()),
        })
        .collect();
    let total = rows.iter().map(|r| r.balance).sum();
    (rows, total)
}

/// Income statement over an optional period.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IncomeStatement {
    pub income: Vec<AccountBalance>,
    pub expenses: Vec<AccountBalance>,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_income: Decimal,
    pub warnings: Vec<ReportWarning>,
}

pub fn income_statement(
    accounts: &[Account],
    entries: &[JournalEntry],
    period: Option<&DateRange>,
) -> IncomeStatement {
    let in_period: Vec<&JournalEntry> = entries
        .iter()
        .filter(|e| period.map(|p| p.contains(e.date)).unwrap_or(true))
        .collect();

    let (income, total_income) = section(accounts, &in_period, AccountType::Income);
    let (expenses, total_expenses) = section(accounts, &in_period, AccountType::Expense);
    let index = index_accounts(accounts);

    IncomeStatement {
        income,
        expenses,
        net_income: total_income - total_expenses,
        total_income,
        total_expenses,
        warnings: collect_warnings(&index, in_period.into_iter()),
    }
}

/// Balance sheet as of an optional date.
///
/// Equity carries current earnings (`net_income`) as its own line so that
/// `total_assets == total_liabilities_and_equity` whenever the initial
/// balances balance and every entry is balanced.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BalanceSheet {
    pub assets: Vec<AccountBalance>,
    pub liabilities: Vec<AccountBalance>,
    pub equity: Vec<AccountBalance>,
    pub net_income: Decimal,
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    /// Equity account balances plus `net_income`.
    pub total_equity: Decimal,
    pub total_liabilities_and_equity: Decimal,
    pub warnings: Vec<ReportWarning>,
}

pub fn balance_sheet(
    accounts: &[Account],
    entries: &[JournalEntry],
    as_of: Option<NaiveDate>,
) -> BalanceSheet {
    let in_scope: Vec<&JournalEntry> = entries
        .iter()
        .filter(|e| as_of.map(|d| e.date <= d).unwrap_or(true))
        .collect();

    let (assets, total_assets) = section(accounts, &in_scope, AccountType::Asset);
    let (liabilities, total_liabilities) = section(accounts, &in_scope, AccountType::Liability);
    let (equity, equity_accounts_total) = section(accounts, &in_scope, AccountType::Equity);
    let (_, total_income) = section(accounts, &in_scope, AccountType::Income);
    let (_, total_expenses) = section(accounts, &in_scope, AccountType::Expense);

    let net_income = total_income - total_expenses;
    let total_equity = equity_accounts_total + net_income;
    let index = index_accounts(accounts);

    BalanceSheet {
        assets,
        liabilities,
        equity,
        net_income,
        total_assets,
        total_liabilities,
        total_equity,
        total_liabilities_and_equity: total_liabilities + total_equity,
        warnings: collect_warnings(&index, in_scope.into_iter()),
    }
}

/// One expense category's total.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Expense totals grouped by entry category, largest first.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpenseByCategory {
    pub rows: Vec<CategoryTotal>,
    pub total: Decimal,
    pub warnings: Vec<ReportWarning>,
}

const UNCATEGORIZED: &str = "Uncategorized";

/// Sum debit amounts on Expense accounts, grouped by the entry's category.
/// Entries without a category land in the `"Uncategorized"` bucket.
pub fn expense_by_category(accounts: &[Account], entries: &[JournalEntry]) -> ExpenseByCategory {
    let index = index_accounts(accounts);
    let mut buckets: BTreeMap<&str, Decimal> = BTreeMap::new();

    for entry in entries {
        let category = entry.category.as_deref().unwrap_or(UNCATEGORIZED);
        for line in &entry.lines {
            let Some(account) = index.get(&line.account_id) else {
                continue;
            };
            if account.account_type == AccountType::Expense && line.side == EntrySide::Debit {
                *buckets.entry(category).or_default() += line.amount;
            }
        }
    }

    let mut rows: Vec<CategoryTotal> = buckets
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));
    let total = rows.iter().map(|r| r.total).sum();

    ExpenseByCategory {
        rows,
        total,
        warnings: collect_warnings(&index, entries.iter()),
    }
}

/// Net result (income minus expenses) for journal lines tagged with the
/// given plot and/or season. With no filters this is the net over every
/// tagged and untagged line. Lines against deleted accounts are skipped.
pub fn profitability(
    accounts: &[Account],
    entries: &[JournalEntry],
    plot: Option<&PlotId>,
    season: Option<&SeasonId>,
) -> Decimal {
    let index = index_accounts(accounts);
    let mut net = Decimal::ZERO;

    for entry in entries {
        for line in &entry.lines {
            if let Some(plot) = plot {
                if line.plot_id.as_ref() != Some(plot) {
                    continue;
                }
            }
            if let Some(season) = season {
                if line.season_id.as_ref() != Some(season) {
                    continue;
                }
            }
            let Some(account) = index.get(&line.account_id) else {
                continue;
            };
            let signed = match line.side {
                EntrySide::Credit => line.amount,
                EntrySide::Debit => -line.amount,
            };
            match account.account_type {
                // Income grows with credits, expenses grow with debits;
                // both contribute to net as credit-minus-debit.
                AccountType::Income | AccountType::Expense => net += signed,
                _ => {}
            }
        }
    }

    net
}
