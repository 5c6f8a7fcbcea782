//! Starter data for newly created workspaces.

use chrono::{Datelike, Duration, Utc};
use rust_decimal::Decimal;
use tracing::info;

use shamba_storage::{
    Account, AccountId, AccountType, Employee, EmployeeId, Plot, PlotId, Season, SeasonId, Store,
    Timesheet, TimesheetId, WorkspaceId,
};

use crate::{CoreError, Shamba};

fn starter_accounts(currency: &str) -> Vec<Account> {
    let acc = |name: &str, account_type, initial: i64| Account {
        id: AccountId::generate(),
        name: name.to_string(),
        account_type,
        initial_balance: Decimal::from(initial),
        currency: currency.to_string(),
    };
    vec![
        acc("Cash at Bank", AccountType::Asset, 50_000),
        acc("Accounts Receivable", AccountType::Asset, 0),
        acc("Farm Equipment", AccountType::Asset, 25_000),
        acc("Land", AccountType::Asset, 100_000),
        acc("Accounts Payable", AccountType::Liability, 5_000),
        acc("Owner's Equity", AccountType::Equity, 170_000),
        acc("Crop Sales", AccountType::Income, 0),
        acc("Seed Costs", AccountType::Expense, 0),
        acc("Fertilizer Costs", AccountType::Expense, 0),
        acc("Labor Wages", AccountType::Expense, 0),
    ]
}

impl<S: Store> Shamba<S> {
    /// Seed a fresh workspace with a starter chart of accounts (whose
    /// initial balances balance: assets 175 000 = liabilities 5 000 +
    /// equity 170 000), two plots, the year's two seasons, two employees
    /// and their first timesheets.
    pub(crate) async fn seed_workspace(&self, ws: &WorkspaceId) -> Result<(), CoreError> {
        for account in starter_accounts(&self.config.default_currency) {
            self.store.create_account(ws, &account).await?;
        }

        let plots = [
            Plot {
                id: PlotId::generate(),
                name: "North Field".to_string(),
                crop: "Maize".to_string(),
                area: 50.0,
                soil_type: "Loam".to_string(),
            },
            Plot {
                id: PlotId::generate(),
                name: "West Valley".to_string(),
                crop: "Soybean".to_string(),
                area: 75.0,
                soil_type: "Clay Loam".to_string(),
            },
        ];
        for plot in &plots {
            self.store.create_plot(ws, plot).await?;
        }

        let year = Utc::now().year();
        for name in ["Main Season", "Minor Season"] {
            self.store
                .create_season(
                    ws,
                    &Season {
                        id: SeasonId::generate(),
                        name: name.to_string(),
                        year,
                    },
                )
                .await?;
        }

        let employees = [
            Employee {
                id: EmployeeId::generate(),
                name: "Kofi Mensah".to_string(),
                role: "Farm Manager".to_string(),
                pay_rate: Decimal::from(25),
                contact: "kofi@farm.com".to_string(),
            },
            Employee {
                id: EmployeeId::generate(),
                name: "Ama Serwaa".to_string(),
                role: "Field Hand".to_string(),
                pay_rate: Decimal::from(15),
                contact: "ama@farm.com".to_string(),
            },
        ];
        for employee in &employees {
            self.store.create_employee(ws, employee).await?;
        }

        let today = Utc::now().date_naive();
        let timesheets = [
            Timesheet {
                id: TimesheetId::generate(),
                employee_id: employees[0].id.clone(),
                date: today - Duration::days(3),
                hours_worked: 8.0,
            },
            Timesheet {
                id: TimesheetId::generate(),
                employee_id: employees[1].id.clone(),
                date: today - Duration::days(2),
                hours_worked: 7.5,
            },
        ];
        for timesheet in &timesheets {
            self.store.create_timesheet(ws, timesheet).await?;
        }

        info!(workspace_id = %ws, "starter data seeded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{core, owner};

    #[tokio::test]
    async fn seeded_books_balance() {
        let core = core();
        let user = owner(&core).await;
        let ws = core.create_workspace("Seeded", &user).await.unwrap();

        let accounts = core.store().list_accounts(&ws.id).await.unwrap();
        let assets: Decimal = accounts
            .iter()
            .filter(|a| a.account_type == AccountType::Asset)
            .map(|a| a.initial_balance)
            .sum();
        let liabilities_and_equity: Decimal = accounts
            .iter()
            .filter(|a| {
                matches!(
                    a.account_type,
                    AccountType::Liability | AccountType::Equity
                )
            })
            .map(|a| a.initial_balance)
            .sum();
        assert_eq!(assets, liabilities_and_equity);
        assert_eq!(assets, Decimal::from(175_000));
    }

    #[tokio::test]
    async fn seeded_timesheets_reference_seeded_employees() {
        let core = core();
        let user = owner(&core).await;
        let ws = core.create_workspace("Seeded", &user).await.unwrap();

        let employees = core.store().list_employees(&ws.id).await.unwrap();
        let timesheets = core.store().list_timesheets(&ws.id).await.unwrap();
        assert_eq!(timesheets.len(), 2);
        for ts in timesheets {
            assert!(employees.iter().any(|e| e.id == ts.employee_id));
        }
    }
}
