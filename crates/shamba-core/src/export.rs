//! Lossless JSON export of one workspace's collections.

use serde::{Deserialize, Serialize};

use shamba_storage::{
    Account, Customer, Employee, Farmer, Harvest, Interaction, InventoryItem, JournalEntry,
    KnowledgeBaseArticle, Plot, Sale, Season, Store, Supplier, Task, Timesheet, Workspace,
    WorkspaceId,
};

use crate::{CoreError, Shamba};

/// Full dump of a workspace: the record itself plus every collection.
/// Round-trips through JSON without loss.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkspaceExport {
    pub workspace: Workspace,
    pub accounts: Vec<Account>,
    pub journal_entries: Vec<JournalEntry>,
    pub plots: Vec<Plot>,
    pub seasons: Vec<Season>,
    pub tasks: Vec<Task>,
    pub employees: Vec<Employee>,
    pub timesheets: Vec<Timesheet>,
    pub inventory: Vec<InventoryItem>,
    pub farmers: Vec<Farmer>,
    pub interactions: Vec<Interaction>,
    pub kb_articles: Vec<KnowledgeBaseArticle>,
    pub suppliers: Vec<Supplier>,
    pub customers: Vec<Customer>,
    pub harvests: Vec<Harvest>,
    pub sales: Vec<Sale>,
}

impl<S: Store> Shamba<S> {
    /// Dump every collection of one workspace for backup or offline use.
    pub async fn export_workspace(&self, ws: &WorkspaceId) -> Result<WorkspaceExport, CoreError> {
        let workspace = self.load_workspace(ws).await?;
        Ok(WorkspaceExport {
            workspace,
            accounts: self.store.list_accounts(ws).await?,
            journal_entries: self.store.list_journal_entries(ws).await?,
            plots: self.store.list_plots(ws).await?,
            seasons: self.store.list_seasons(ws).await?,
            tasks: self.store.list_tasks(ws).await?,
            employees: self.store.list_employees(ws).await?,
            timesheets: self.store.list_timesheets(ws).await?,
            inventory: self.store.list_inventory(ws).await?,
            farmers: self.store.list_farmers(ws).await?,
            interactions: self.store.list_interactions(ws).await?,
            kb_articles: self.store.list_articles(ws).await?,
            suppliers: self.store.list_suppliers(ws).await?,
            customers: self.store.list_customers(ws).await?,
            harvests: self.store.list_harvests(ws).await?,
            sales: self.store.list_sales(ws).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{core, owner};

    #[tokio::test]
    async fn export_roundtrips_through_json() {
        let core = core();
        let user = owner(&core).await;
        let ws = core.create_workspace("Exported Farm", &user).await.unwrap();

        let export = core.export_workspace(&ws.id).await.unwrap();
        assert_eq!(export.accounts.len(), 10);
        assert_eq!(export.plots.len(), 2);

        let json = serde_json::to_string_pretty(&export).unwrap();
        let back: WorkspaceExport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.workspace, export.workspace);
        assert_eq!(back.accounts, export.accounts);
        assert_eq!(back.timesheets, export.timesheets);
        assert_eq!(back.employees, export.employees);
    }
}
