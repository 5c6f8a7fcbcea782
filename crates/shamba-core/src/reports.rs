//! Financial report service: one snapshot in, every report out.

use rust_decimal::Decimal;
use serde::Serialize;

use shamba_ledger::{
    balance_sheet, expense_by_category, income_statement, trial_balance, BalanceSheet, DateRange,
    ExpenseByCategory, IncomeStatement, TrialBalance,
};
use shamba_storage::{PlotId, SeasonId, Store, WorkspaceId};

use crate::{CoreError, Shamba};

/// Every financial report, computed from a single snapshot of the
/// workspace's accounts and journal so the numbers agree with each other.
#[derive(Clone, Debug, Serialize)]
pub struct FinancialReports {
    pub trial_balance: TrialBalance,
    pub income_statement: IncomeStatement,
    pub balance_sheet: BalanceSheet,
    pub expense_by_category: ExpenseByCategory,
}

impl<S: Store> Shamba<S> {
    /// Compute all financial reports for a workspace. `period` restricts the
    /// income statement; the balance sheet and trial balance always cover
    /// the full journal.
    pub async fn financials(
        &self,
        ws: &WorkspaceId,
        period: Option<&DateRange>,
    ) -> Result<FinancialReports, CoreError> {
        self.active_workspace(ws).await?;
        let accounts = self.store.list_accounts(ws).await?;
        let entries = self.store.list_journal_entries(ws).await?;

        Ok(FinancialReports {
            trial_balance: trial_balance(&accounts, &entries),
            income_statement: income_statement(&accounts, &entries, period),
            balance_sheet: balance_sheet(&accounts, &entries, None),
            expense_by_category: expense_by_category(&accounts, &entries),
        })
    }

    /// Net profitability of an optional plot/season slice.
    pub async fn profitability(
        &self,
        ws: &WorkspaceId,
        plot: Option<&PlotId>,
        season: Option<&SeasonId>,
    ) -> Result<Decimal, CoreError> {
        self.active_workspace(ws).await?;
        let accounts = self.store.list_accounts(ws).await?;
        let entries = self.store.list_journal_entries(ws).await?;
        Ok(shamba_ledger::profitability(
            &accounts, &entries, plot, season,
        ))
    }
}
