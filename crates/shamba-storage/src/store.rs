//! The Store trait that backends implement.

use crate::types::*;
use crate::StoreError;

/// The storage trait the service layer depends on.
///
/// All collection methods are **scoped by workspace**. Mutations are
/// full-document operations: `create_*` rejects an existing id with
/// [`StoreError::AlreadyExists`], `replace_*` rejects a missing id with
/// [`StoreError::NotFound`], and `delete_*` is by id with no cascade.
/// Dangling references left behind by a delete are tolerated by the report
/// layer, not prevented here.
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    // ───────────────────────────────────── Users ──────────────────────────────────────────

    /// Create a new user.
    async fn create_user(&self, user: &User) -> Result<(), StoreError>;

    /// Get user by ID.
    async fn get_user(&self, user_id: &UserId) -> Result<User, StoreError>;

    /// Get user by email.
    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError>;

    /// List all users (platform console).
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Replace a user record.
    async fn replace_user(&self, user: &User) -> Result<(), StoreError>;

    // ───────────────────────────────────── Workspaces ─────────────────────────────────────

    /// Create a new workspace.
    async fn create_workspace(&self, workspace: &Workspace) -> Result<(), StoreError>;

    /// Get workspace by ID.
    async fn get_workspace(&self, ws: &WorkspaceId) -> Result<Workspace, StoreError>;

    /// List workspaces the given user is a member of.
    async fn list_workspaces_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Workspace>, StoreError>;

    /// List all workspaces (platform console).
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, StoreError>;

    /// Replace a workspace record (full-document write).
    async fn replace_workspace(&self, workspace: &Workspace) -> Result<(), StoreError>;

    /// Delete a workspace and all of its collections.
    async fn delete_workspace(&self, ws: &WorkspaceId) -> Result<(), StoreError>;

    // ───────────────────────────────────── Platform config ────────────────────────────────

    /// Get the platform configuration, if one has been stored.
    async fn get_platform_config(&self) -> Result<Option<PlatformConfig>, StoreError>;

    /// Store the platform configuration (upsert).
    async fn set_platform_config(&self, config: &PlatformConfig) -> Result<(), StoreError>;

    // ───────────────────────────────────── Accounts ───────────────────────────────────────

    async fn create_account(&self, ws: &WorkspaceId, account: &Account) -> Result<(), StoreError>;
    async fn replace_account(&self, ws: &WorkspaceId, account: &Account) -> Result<(), StoreError>;
    async fn delete_account(&self, ws: &WorkspaceId, id: &AccountId) -> Result<(), StoreError>;
    async fn list_accounts(&self, ws: &WorkspaceId) -> Result<Vec<Account>, StoreError>;

    // ───────────────────────────────────── Journal entries ────────────────────────────────

    async fn create_journal_entry(
        &self,
        ws: &WorkspaceId,
        entry: &JournalEntry,
    ) -> Result<(), StoreError>;

    /// Bulk insert (file import). Fails atomically if any id already exists.
    async fn create_journal_entries(
        &self,
        ws: &WorkspaceId,
        entries: &[JournalEntry],
    ) -> Result<(), StoreError>;

    async fn replace_journal_entry(
        &self,
        ws: &WorkspaceId,
        entry: &JournalEntry,
    ) -> Result<(), StoreError>;
    async fn delete_journal_entry(
        &self,
        ws: &WorkspaceId,
        id: &JournalEntryId,
    ) -> Result<(), StoreError>;
    async fn list_journal_entries(&self, ws: &WorkspaceId)
        -> Result<Vec<JournalEntry>, StoreError>;

    // ───────────────────────────────────── Plots & seasons ────────────────────────────────

    async fn create_plot(&self, ws: &WorkspaceId, plot: &Plot) -> Result<(), StoreError>;
    async fn replace_plot(&self, ws: &WorkspaceId, plot: &Plot) -> Result<(), StoreError>;
    async fn delete_plot(&self, ws: &WorkspaceId, id: &PlotId) -> Result<(), StoreError>;
    async fn list_plots(&self, ws: &WorkspaceId) -> Result<Vec<Plot>, StoreError>;

    async fn create_season(&self, ws: &WorkspaceId, season: &Season) -> Result<(), StoreError>;
    async fn replace_season(&self, ws: &WorkspaceId, season: &Season) -> Result<(), StoreError>;
    async fn delete_season(&self, ws: &WorkspaceId, id: &SeasonId) -> Result<(), StoreError>;
    async fn list_seasons(&self, ws: &WorkspaceId) -> Result<Vec<Season>, StoreError>;

    // ───────────────────────────────────── Tasks ──────────────────────────────────────────

    async fn create_task(&self, ws: &WorkspaceId, task: &Task) -> Result<(), StoreError>;
    async fn replace_task(&self, ws: &WorkspaceId, task: &Task) -> Result<(), StoreError>;
    async fn get_task(&self, ws: &WorkspaceId, id: &TaskId) -> Result<Task, StoreError>;
    async fn list_tasks(&self, ws: &WorkspaceId) -> Result<Vec<Task>, StoreError>;

    // ───────────────────────────────────── HR ─────────────────────────────────────────────

    async fn create_employee(&self, ws: &WorkspaceId, employee: &Employee)
        -> Result<(), StoreError>;
    async fn list_employees(&self, ws: &WorkspaceId) -> Result<Vec<Employee>, StoreError>;

    async fn create_timesheet(
        &self,
        ws: &WorkspaceId,
        timesheet: &Timesheet,
    ) -> Result<(), StoreError>;
    async fn replace_timesheet(
        &self,
        ws: &WorkspaceId,
        timesheet: &Timesheet,
    ) -> Result<(), StoreError>;
    async fn delete_timesheet(&self, ws: &WorkspaceId, id: &TimesheetId)
        -> Result<(), StoreError>;
    async fn list_timesheets(&self, ws: &WorkspaceId) -> Result<Vec<Timesheet>, StoreError>;

    // ───────────────────────────────────── Inventory ──────────────────────────────────────

    async fn create_inventory_item(
        &self,
        ws: &WorkspaceId,
        item: &InventoryItem,
    ) -> Result<(), StoreError>;
    async fn replace_inventory_item(
        &self,
        ws: &WorkspaceId,
        item: &InventoryItem,
    ) -> Result<(), StoreError>;
    async fn delete_inventory_item(
        &self,
        ws: &WorkspaceId,
        id: &InventoryItemId,
    ) -> Result<(), StoreError>;
    async fn list_inventory(&self, ws: &WorkspaceId) -> Result<Vec<InventoryItem>, StoreError>;

    // ───────────────────────────────────── Extension (AEO) ────────────────────────────────

    async fn create_farmer(&self, ws: &WorkspaceId, farmer: &Farmer) -> Result<(), StoreError>;
    async fn replace_farmer(&self, ws: &WorkspaceId, farmer: &Farmer) -> Result<(), StoreError>;
    async fn delete_farmer(&self, ws: &WorkspaceId, id: &FarmerId) -> Result<(), StoreError>;
    async fn list_farmers(&self, ws: &WorkspaceId) -> Result<Vec<Farmer>, StoreError>;

    async fn create_interaction(
        &self,
        ws: &WorkspaceId,
        interaction: &Interaction,
    ) -> Result<(), StoreError>;
    async fn list_interactions(&self, ws: &WorkspaceId) -> Result<Vec<Interaction>, StoreError>;

    async fn create_article(
        &self,
        ws: &WorkspaceId,
        article: &KnowledgeBaseArticle,
    ) -> Result<(), StoreError>;
    async fn replace_article(
        &self,
        ws: &WorkspaceId,
        article: &KnowledgeBaseArticle,
    ) -> Result<(), StoreError>;
    async fn delete_article(&self, ws: &WorkspaceId, id: &ArticleId) -> Result<(), StoreError>;
    async fn list_articles(&self, ws: &WorkspaceId)
        -> Result<Vec<KnowledgeBaseArticle>, StoreError>;

    // ───────────────────────────────────── Trade ──────────────────────────────────────────

    async fn create_supplier(&self, ws: &WorkspaceId, supplier: &Supplier)
        -> Result<(), StoreError>;
    async fn replace_supplier(
        &self,
        ws: &WorkspaceId,
        supplier: &Supplier,
    ) -> Result<(), StoreError>;
    async fn delete_supplier(&self, ws: &WorkspaceId, id: &SupplierId) -> Result<(), StoreError>;
    async fn list_suppliers(&self, ws: &WorkspaceId) -> Result<Vec<Supplier>, StoreError>;

    async fn create_customer(&self, ws: &WorkspaceId, customer: &Customer)
        -> Result<(), StoreError>;
    async fn replace_customer(
        &self,
        ws: &WorkspaceId,
        customer: &Customer,
    ) -> Result<(), StoreError>;
    async fn delete_customer(&self, ws: &WorkspaceId, id: &CustomerId) -> Result<(), StoreError>;
    async fn list_customers(&self, ws: &WorkspaceId) -> Result<Vec<Customer>, StoreError>;

    async fn create_harvest(&self, ws: &WorkspaceId, harvest: &Harvest) -> Result<(), StoreError>;
    async fn replace_harvest(&self, ws: &WorkspaceId, harvest: &Harvest)
        -> Result<(), StoreError>;
    async fn delete_harvest(&self, ws: &WorkspaceId, id: &HarvestId) -> Result<(), StoreError>;
    async fn list_harvests(&self, ws: &WorkspaceId) -> Result<Vec<Harvest>, StoreError>;

    async fn create_sale(&self, ws: &WorkspaceId, sale: &Sale) -> Result<(), StoreError>;
    async fn replace_sale(&self, ws: &WorkspaceId, sale: &Sale) -> Result<(), StoreError>;
    async fn delete_sale(&self, ws: &WorkspaceId, id: &SaleId) -> Result<(), StoreError>;
    async fn list_sales(&self, ws: &WorkspaceId) -> Result<Vec<Sale>, StoreError>;
}
