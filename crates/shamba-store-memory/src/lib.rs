//! In-memory [`Store`] backend.
//!
//! Holds every collection in per-workspace maps behind a single
//! `tokio::sync::RwLock`. Writes are last-write-wins per document, matching
//! the external document store's semantics. The reference backend for tests
//! and single-process deployments; durable persistence is a different
//! backend's job.

use std::collections::HashMap;
use std::hash::Hash;

use tokio::sync::RwLock;

use shamba_storage::*;

#[derive(Default)]
struct WorkspaceData {
    accounts: HashMap<AccountId, Account>,
    journal_entries: HashMap<JournalEntryId, JournalEntry>,
    plots: HashMap<PlotId, Plot>,
    seasons: HashMap<SeasonId, Season>,
    tasks: HashMap<TaskId, Task>,
    employees: HashMap<EmployeeId, Employee>,
    timesheets: HashMap<TimesheetId, Timesheet>,
    inventory: HashMap<InventoryItemId, InventoryItem>,
    farmers: HashMap<FarmerId, Farmer>,
    interactions: HashMap<InteractionId, Interaction>,
    articles: HashMap<ArticleId, KnowledgeBaseArticle>,
    suppliers: HashMap<SupplierId, Supplier>,
    customers: HashMap<CustomerId, Customer>,
    harvests: HashMap<HarvestId, Harvest>,
    sales: HashMap<SaleId, Sale>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, User>,
    workspaces: HashMap<WorkspaceId, Workspace>,
    platform_config: Option<PlatformConfig>,
    data: HashMap<WorkspaceId, WorkspaceData>,
}

impl Inner {
    fn scoped_mut(&mut self, ws: &WorkspaceId) -> Result<&mut WorkspaceData, StoreError> {
        if !self.workspaces.contains_key(ws) {
            return Err(StoreError::NotFound);
        }
        Ok(self.data.entry(ws.clone()).or_default())
    }

    fn scoped(&self, ws: &WorkspaceId) -> Result<Option<&WorkspaceData>, StoreError> {
        if !self.workspaces.contains_key(ws) {
            return Err(StoreError::NotFound);
        }
        Ok(self.data.get(ws))
    }
}

fn insert_new<K, V>(map: &mut HashMap<K, V>, key: &K, value: &V) -> Result<(), StoreError>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    if map.contains_key(key) {
        return Err(StoreError::AlreadyExists);
    }
    map.insert(key.clone(), value.clone());
    Ok(())
}

fn replace_existing<K, V>(map: &mut HashMap<K, V>, key: &K, value: &V) -> Result<(), StoreError>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    match map.get_mut(key) {
        Some(slot) => {
            *slot = value.clone();
            Ok(())
        }
        None => Err(StoreError::NotFound),
    }
}

fn remove_existing<K, V>(map: &mut HashMap<K, V>, key: &K) -> Result<(), StoreError>
where
    K: Eq + Hash,
{
    map.remove(key).map(|_| ()).ok_or(StoreError::NotFound)
}

fn listed<V, K>(
    data: Option<&WorkspaceData>,
    pick: fn(&WorkspaceData) -> &HashMap<K, V>,
    id_of: fn(&V) -> &K,
) -> Vec<V>
where
    V: Clone,
    K: Ord + Eq + Hash,
{
    let mut out: Vec<V> = data
        .map(|d| pick(d).values().cloned().collect())
        .unwrap_or_default();
    out.sort_by(|a, b| id_of(a).cmp(id_of(b)));
    out
}

/// In-memory store; cheap to construct per test.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    // ───────────────────────────────────── Users ──────────────────────────────────────────

    async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        if g.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::AlreadyExists);
        }
        insert_new(&mut g.users, &user.id, user)
    }

    async fn get_user(&self, user_id: &UserId) -> Result<User, StoreError> {
        let g = self.inner.read().await;
        g.users.get(user_id).cloned().ok_or(StoreError::NotFound)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let g = self.inner.read().await;
        g.users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let g = self.inner.read().await;
        let mut users: Vec<User> = g.users.values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }

    async fn replace_user(&self, user: &User) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        replace_existing(&mut g.users, &user.id, user)
    }

    // ───────────────────────────────────── Workspaces ─────────────────────────────────────

    async fn create_workspace(&self, workspace: &Workspace) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(&mut g.workspaces, &workspace.id, workspace)?;
        g.data.insert(workspace.id.clone(), WorkspaceData::default());
        Ok(())
    }

    async fn get_workspace(&self, ws: &WorkspaceId) -> Result<Workspace, StoreError> {
        let g = self.inner.read().await;
        g.workspaces.get(ws).cloned().ok_or(StoreError::NotFound)
    }

    async fn list_workspaces_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Workspace>, StoreError> {
        let g = self.inner.read().await;
        let mut out: Vec<Workspace> = g
            .workspaces
            .values()
            .filter(|w| w.members.contains_key(user_id))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(out)
    }

    async fn list_workspaces(&self) -> Result<Vec<Workspace>, StoreError> {
        let g = self.inner.read().await;
        let mut out: Vec<Workspace> = g.workspaces.values().cloned().collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(out)
    }

    async fn replace_workspace(&self, workspace: &Workspace) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        replace_existing(&mut g.workspaces, &workspace.id, workspace)
    }

    async fn delete_workspace(&self, ws: &WorkspaceId) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        remove_existing(&mut g.workspaces, ws)?;
        g.data.remove(ws);
        Ok(())
    }

    // ───────────────────────────────────── Platform config ────────────────────────────────

    async fn get_platform_config(&self) -> Result<Option<PlatformConfig>, StoreError> {
        let g = self.inner.read().await;
        Ok(g.platform_config.clone())
    }

    async fn set_platform_config(&self, config: &PlatformConfig) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        g.platform_config = Some(config.clone());
        Ok(())
    }

    // ───────────────────────────────────── Accounts ───────────────────────────────────────

    async fn create_account(&self, ws: &WorkspaceId, account: &Account) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(&mut g.scoped_mut(ws)?.accounts, &account.id, account)
    }

    async fn replace_account(&self, ws: &WorkspaceId, account: &Account) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        replace_existing(&mut g.scoped_mut(ws)?.accounts, &account.id, account)
    }

    async fn delete_account(&self, ws: &WorkspaceId, id: &AccountId) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        remove_existing(&mut g.scoped_mut(ws)?.accounts, id)
    }

    async fn list_accounts(&self, ws: &WorkspaceId) -> Result<Vec<Account>, StoreError> {
        let g = self.inner.read().await;
        Ok(listed(g.scoped(ws)?, |d| &d.accounts, |a: &Account| &a.id))
    }

    // ───────────────────────────────────── Journal entries ────────────────────────────────

    async fn create_journal_entry(
        &self,
        ws: &WorkspaceId,
        entry: &JournalEntry,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(&mut g.scoped_mut(ws)?.journal_entries, &entry.id, entry)
    }

    async fn create_journal_entries(
        &self,
        ws: &WorkspaceId,
        entries: &[JournalEntry],
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        let data = g.scoped_mut(ws)?;
        // All-or-nothing: reject the batch before touching the map.
        if entries
            .iter()
            .any(|e| data.journal_entries.contains_key(&e.id))
        {
            return Err(StoreError::AlreadyExists);
        }
        for entry in entries {
            data.journal_entries.insert(entry.id.clone(), entry.clone());
        }
        Ok(())
    }

    async fn replace_journal_entry(
        &self,
        ws: &WorkspaceId,
        entry: &JournalEntry,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        replace_existing(&mut g.scoped_mut(ws)?.journal_entries, &entry.id, entry)
    }

    async fn delete_journal_entry(
        &self,
        ws: &WorkspaceId,
        id: &JournalEntryId,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        remove_existing(&mut g.scoped_mut(ws)?.journal_entries, id)
    }

    async fn list_journal_entries(
        &self,
        ws: &WorkspaceId,
    ) -> Result<Vec<JournalEntry>, StoreError> {
        let g = self.inner.read().await;
        Ok(listed(
            g.scoped(ws)?,
            |d| &d.journal_entries,
            |e: &JournalEntry| &e.id,
        ))
    }

    // ───────────────────────────────────── Plots & seasons ────────────────────────────────

    async fn create_plot(&self, ws: &WorkspaceId, plot: &Plot) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(&mut g.scoped_mut(ws)?.plots, &plot.id, plot)
    }

    async fn replace_plot(&self, ws: &WorkspaceId, plot: &Plot) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        replace_existing(&mut g.scoped_mut(ws)?.plots, &plot.id, plot)
    }

    async fn delete_plot(&self, ws: &WorkspaceId, id: &PlotId) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        remove_existing(&mut g.scoped_mut(ws)?.plots, id)
    }

    async fn list_plots(&self, ws: &WorkspaceId) -> Result<Vec<Plot>, StoreError> {
        let g = self.inner.read().await;
        Ok(listed(g.scoped(ws)?, |d| &d.plots, |p: &Plot| &p.id))
    }

    async fn create_season(&self, ws: &WorkspaceId, season: &Season) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(&mut g.scoped_mut(ws)?.seasons, &season.id, season)
    }

    async fn replace_season(&self, ws: &WorkspaceId, season: &Season) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        replace_existing(&mut g.scoped_mut(ws)?.seasons, &season.id, season)
    }

    async fn delete_season(&self, ws: &WorkspaceId, id: &SeasonId) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        remove_existing(&mut g.scoped_mut(ws)?.seasons, id)
    }

    async fn list_seasons(&self, ws: &WorkspaceId) -> Result<Vec<Season>, StoreError> {
        let g = self.inner.read().await;
        Ok(listed(g.scoped(ws)?, |d| &d.seasons, |s: &Season| &s.id))
    }

    // ───────────────────────────────────── Tasks ──────────────────────────────────────────

    async fn create_task(&self, ws: &WorkspaceId, task: &Task) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(&mut g.scoped_mut(ws)?.tasks, &task.id, task)
    }

    async fn replace_task(&self, ws: &WorkspaceId, task: &Task) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        replace_existing(&mut g.scoped_mut(ws)?.tasks, &task.id, task)
    }

    async fn get_task(&self, ws: &WorkspaceId, id: &TaskId) -> Result<Task, StoreError> {
        let g = self.inner.read().await;
        g.scoped(ws)?
            .and_then(|d| d.tasks.get(id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_tasks(&self, ws: &WorkspaceId) -> Result<Vec<Task>, StoreError> {
        let g = self.inner.read().await;
        Ok(listed(g.scoped(ws)?, |d| &d.tasks, |t: &Task| &t.id))
    }

    // ───────────────────────────────────── HR ─────────────────────────────────────────────

    async fn create_employee(
        &self,
        ws: &WorkspaceId,
        employee: &Employee,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(&mut g.scoped_mut(ws)?.employees, &employee.id, employee)
    }

    async fn list_employees(&self, ws: &WorkspaceId) -> Result<Vec<Employee>, StoreError> {
        let g = self.inner.read().await;
        Ok(listed(g.scoped(ws)?, |d| &d.employees, |e: &Employee| &e.id))
    }

    async fn create_timesheet(
        &self,
        ws: &WorkspaceId,
        timesheet: &Timesheet,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(&mut g.scoped_mut(ws)?.timesheets, &timesheet.id, timesheet)
    }

    async fn replace_timesheet(
        &self,
        ws: &WorkspaceId,
        timesheet: &Timesheet,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        replace_existing(&mut g.scoped_mut(ws)?.timesheets, &timesheet.id, timesheet)
    }

    async fn delete_timesheet(
        &self,
        ws: &WorkspaceId,
        id: &TimesheetId,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        remove_existing(&mut g.scoped_mut(ws)?.timesheets, id)
    }

    async fn list_timesheets(&self, ws: &WorkspaceId) -> Result<Vec<Timesheet>, StoreError> {
        let g = self.inner.read().await;
        Ok(listed(
            g.scoped(ws)?,
            |d| &d.timesheets,
            |t: &Timesheet| &t.id,
        ))
    }

    // ───────────────────────────────────── Inventory ──────────────────────────────────────

    async fn create_inventory_item(
        &self,
        ws: &WorkspaceId,
        item: &InventoryItem,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(&mut g.scoped_mut(ws)?.inventory, &item.id, item)
    }

    async fn replace_inventory_item(
        &self,
        ws: &WorkspaceId,
        item: &InventoryItem,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        replace_existing(&mut g.scoped_mut(ws)?.inventory, &item.id, item)
    }

    async fn delete_inventory_item(
        &self,
        ws: &WorkspaceId,
        id: &InventoryItemId,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        remove_existing(&mut g.scoped_mut(ws)?.inventory, id)
    }

    async fn list_inventory(&self, ws: &WorkspaceId) -> Result<Vec<InventoryItem>, StoreError> {
        let g = self.inner.read().await;
        Ok(listed(
            g.scoped(ws)?,
            |d| &d.inventory,
            |i: &InventoryItem| &i.id,
        ))
    }

    // ───────────────────────────────────── Extension (AEO) ────────────────────────────────

    async fn create_farmer(&self, ws: &WorkspaceId, farmer: &Farmer) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(&mut g.scoped_mut(ws)?.farmers, &farmer.id, farmer)
    }

    async fn replace_farmer(&self, ws: &WorkspaceId, farmer: &Farmer) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        replace_existing(&mut g.scoped_mut(ws)?.farmers, &farmer.id, farmer)
    }

    async fn delete_farmer(&self, ws: &WorkspaceId, id: &FarmerId) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        remove_existing(&mut g.scoped_mut(ws)?.farmers, id)
    }

    async fn list_farmers(&self, ws: &WorkspaceId) -> Result<Vec<Farmer>, StoreError> {
        let g = self.inner.read().await;
        Ok(listed(g.scoped(ws)?, |d| &d.farmers, |f: &Farmer| &f.id))
    }

    async fn create_interaction(
        &self,
        ws: &WorkspaceId,
        interaction: &Interaction,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(
            &mut g.scoped_mut(ws)?.interactions,
            &interaction.id,
            interaction,
        )
    }

    async fn list_interactions(&self, ws: &WorkspaceId) -> Result<Vec<Interaction>, StoreError> {
        let g = self.inner.read().await;
        Ok(listed(
            g.scoped(ws)?,
            |d| &d.interactions,
            |i: &Interaction| &i.id,
        ))
    }

    async fn create_article(
        &self,
        ws: &WorkspaceId,
        article: &KnowledgeBaseArticle,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(&mut g.scoped_mut(ws)?.articles, &article.id, article)
    }

    async fn replace_article(
        &self,
        ws: &WorkspaceId,
        article: &KnowledgeBaseArticle,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        replace_existing(&mut g.scoped_mut(ws)?.articles, &article.id, article)
    }

    async fn delete_article(&self, ws: &WorkspaceId, id: &ArticleId) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        remove_existing(&mut g.scoped_mut(ws)?.articles, id)
    }

    async fn list_articles(
        &self,
        ws: &WorkspaceId,
    ) -> Result<Vec<KnowledgeBaseArticle>, StoreError> {
        let g = self.inner.read().await;
        Ok(listed(
            g.scoped(ws)?,
            |d| &d.articles,
            |a: &KnowledgeBaseArticle| &a.id,
        ))
    }

    // ───────────────────────────────────── Trade ──────────────────────────────────────────

    async fn create_supplier(
        &self,
        ws: &WorkspaceId,
        supplier: &Supplier,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(&mut g.scoped_mut(ws)?.suppliers, &supplier.id, supplier)
    }

    async fn replace_supplier(
        &self,
        ws: &WorkspaceId,
        supplier: &Supplier,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        replace_existing(&mut g.scoped_mut(ws)?.suppliers, &supplier.id, supplier)
    }

    async fn delete_supplier(&self, ws: &WorkspaceId, id: &SupplierId) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        remove_existing(&mut g.scoped_mut(ws)?.suppliers, id)
    }

    async fn list_suppliers(&self, ws: &WorkspaceId) -> Result<Vec<Supplier>, StoreError> {
        let g = self.inner.read().await;
        Ok(listed(g.scoped(ws)?, |d| &d.suppliers, |s: &Supplier| &s.id))
    }

    async fn create_customer(
        &self,
        ws: &WorkspaceId,
        customer: &Customer,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(&mut g.scoped_mut(ws)?.customers, &customer.id, customer)
    }

    async fn replace_customer(
        &self,
        ws: &WorkspaceId,
        customer: &Customer,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        replace_existing(&mut g.scoped_mut(ws)?.customers, &customer.id, customer)
    }

    async fn delete_customer(&self, ws: &WorkspaceId, id: &CustomerId) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        remove_existing(&mut g.scoped_mut(ws)?.customers, id)
    }

    async fn list_customers(&self, ws: &WorkspaceId) -> Result<Vec<Customer>, StoreError> {
        let g = self.inner.read().await;
        Ok(listed(g.scoped(ws)?, |d| &d.customers, |c: &Customer| &c.id))
    }

    async fn create_harvest(&self, ws: &WorkspaceId, harvest: &Harvest) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(&mut g.scoped_mut(ws)?.harvests, &harvest.id, harvest)
    }

    async fn replace_harvest(
        &self,
        ws: &WorkspaceId,
        harvest: &Harvest,
    ) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        replace_existing(&mut g.scoped_mut(ws)?.harvests, &harvest.id, harvest)
    }

    async fn delete_harvest(&self, ws: &WorkspaceId, id: &HarvestId) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        remove_existing(&mut g.scoped_mut(ws)?.harvests, id)
    }

    async fn list_harvests(&self, ws: &WorkspaceId) -> Result<Vec<Harvest>, StoreError> {
        let g = self.inner.read().await;
        Ok(listed(g.scoped(ws)?, |d| &d.harvests, |h: &Harvest| &h.id))
    }

    async fn create_sale(&self, ws: &WorkspaceId, sale: &Sale) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        insert_new(&mut g.scoped_mut(ws)?.sales, &sale.id, sale)
    }

    async fn replace_sale(&self, ws: &WorkspaceId, sale: &Sale) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        replace_existing(&mut g.scoped_mut(ws)?.sales, &sale.id, sale)
    }

    async fn delete_sale(&self, ws: &WorkspaceId, id: &SaleId) -> Result<(), StoreError> {
        let mut g = self.inner.write().await;
        remove_existing(&mut g.scoped_mut(ws)?.sales, id)
    }

    async fn list_sales(&self, ws: &WorkspaceId) -> Result<Vec<Sale>, StoreError> {
        let g = self.inner.read().await;
        Ok(listed(g.scoped(ws)?, |d| &d.sales, |s: &Sale| &s.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn user(id: &str, email: &str) -> User {
        User {
            id: UserId::from(id),
            email: email.to_string(),
            name: "Test User".to_string(),
            status: UserStatus::Active,
        }
    }

    fn workspace(id: &str, owner: &str) -> Workspace {
        Workspace {
            id: WorkspaceId::from(id),
            name: "Test Farm".to_string(),
            members: [(
                UserId::from(owner),
                WorkspaceMember { role: Role::Owner },
            )]
            .into_iter()
            .collect(),
            feature_permissions: BTreeMap::new(),
            status: WorkspaceStatus::Active,
            logo_url: None,
            created_at: Utc::now(),
        }
    }

    fn cash_account(id: &str) -> Account {
        Account {
            id: AccountId::from(id),
            name: "Cash".to_string(),
            account_type: AccountType::Asset,
            initial_balance: Decimal::from(1000),
            currency: "GHS".to_string(),
        }
    }

    #[tokio::test]
    async fn user_create_get_and_duplicate_email() {
        let store = MemoryStore::new();
        store.create_user(&user("user_1", "a@farm.test")).await.unwrap();

        let fetched = store.get_user(&UserId::from("user_1")).await.unwrap();
        assert_eq!(fetched.email, "a@farm.test");
        let by_email = store.get_user_by_email("a@farm.test").await.unwrap();
        assert_eq!(by_email.id, UserId::from("user_1"));

        // Same id or same email both collide.
        assert!(matches!(
            store.create_user(&user("user_1", "b@farm.test")).await,
            Err(StoreError::AlreadyExists)
        ));
        assert!(matches!(
            store.create_user(&user("user_2", "a@farm.test")).await,
            Err(StoreError::AlreadyExists)
        ));
    }

    #[tokio::test]
    async fn workspace_lists_scope_to_membership() {
        let store = MemoryStore::new();
        store.create_workspace(&workspace("ws_1", "user_a")).await.unwrap();
        store.create_workspace(&workspace("ws_2", "user_b")).await.unwrap();

        let for_a = store
            .list_workspaces_for_user(&UserId::from("user_a"))
            .await
            .unwrap();
        assert_eq!(for_a.len(), 1);
        assert_eq!(for_a[0].id, WorkspaceId::from("ws_1"));

        assert_eq!(store.list_workspaces().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn collection_ops_require_existing_workspace() {
        let store = MemoryStore::new();
        let ws = WorkspaceId::from("ws_missing");
        assert!(matches!(
            store.create_account(&ws, &cash_account("acc_1")).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.list_accounts(&ws).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn account_crud_semantics() {
        let store = MemoryStore::new();
        let ws = WorkspaceId::from("ws_1");
        store.create_workspace(&workspace("ws_1", "user_a")).await.unwrap();

        store.create_account(&ws, &cash_account("acc_1")).await.unwrap();
        assert!(matches!(
            store.create_account(&ws, &cash_account("acc_1")).await,
            Err(StoreError::AlreadyExists)
        ));

        let mut renamed = cash_account("acc_1");
        renamed.name = "Cash at Bank".to_string();
        store.replace_account(&ws, &renamed).await.unwrap();
        assert_eq!(store.list_accounts(&ws).await.unwrap()[0].name, "Cash at Bank");

        assert!(matches!(
            store.replace_account(&ws, &cash_account("acc_nope")).await,
            Err(StoreError::NotFound)
        ));

        store.delete_account(&ws, &AccountId::from("acc_1")).await.unwrap();
        assert!(store.list_accounts(&ws).await.unwrap().is_empty());
        assert!(matches!(
            store.delete_account(&ws, &AccountId::from("acc_1")).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn deleting_account_leaves_journal_entries_dangling() {
        let store = MemoryStore::new();
        let ws = WorkspaceId::from("ws_1");
        store.create_workspace(&workspace("ws_1", "user_a")).await.unwrap();
        store.create_account(&ws, &cash_account("acc_1")).await.unwrap();

        let entry = JournalEntry {
            id: JournalEntryId::from("je_1"),
            date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            description: "cash in".to_string(),
            currency: "GHS".to_string(),
            category: None,
            lines: vec![JournalEntryLine {
                account_id: AccountId::from("acc_1"),
                side: EntrySide::Debit,
                amount: Decimal::from(10),
                plot_id: None,
                season_id: None,
            }],
        };
        store.create_journal_entry(&ws, &entry).await.unwrap();

        // No cascade: the entry survives its account.
        store.delete_account(&ws, &AccountId::from("acc_1")).await.unwrap();
        assert_eq!(store.list_journal_entries(&ws).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bulk_journal_import_is_atomic() {
        let store = MemoryStore::new();
        let ws = WorkspaceId::from("ws_1");
        store.create_workspace(&workspace("ws_1", "user_a")).await.unwrap();

        let mk = |id: &str| JournalEntry {
            id: JournalEntryId::from(id),
            date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            description: id.to_string(),
            currency: "GHS".to_string(),
            category: None,
            lines: vec![],
        };

        store.create_journal_entry(&ws, &mk("je_1")).await.unwrap();
        let result = store
            .create_journal_entries(&ws, &[mk("je_2"), mk("je_1")])
            .await;
        assert!(matches!(result, Err(StoreError::AlreadyExists)));
        // Nothing from the failed batch landed.
        assert_eq!(store.list_journal_entries(&ws).await.unwrap().len(), 1);

        store
            .create_journal_entries(&ws, &[mk("je_2"), mk("je_3")])
            .await
            .unwrap();
        assert_eq!(store.list_journal_entries(&ws).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn delete_workspace_drops_collections() {
        let store = MemoryStore::new();
        let ws = WorkspaceId::from("ws_1");
        store.create_workspace(&workspace("ws_1", "user_a")).await.unwrap();
        store.create_account(&ws, &cash_account("acc_1")).await.unwrap();

        store.delete_workspace(&ws).await.unwrap();
        assert!(matches!(
            store.list_accounts(&ws).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn lists_are_sorted_by_id() {
        let store = MemoryStore::new();
        let ws = WorkspaceId::from("ws_1");
        store.create_workspace(&workspace("ws_1", "user_a")).await.unwrap();
        for id in ["acc_c", "acc_a", "acc_b"] {
            store.create_account(&ws, &cash_account(id)).await.unwrap();
        }
        let ids: Vec<String> = store
            .list_accounts(&ws)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id.0)
            .collect();
        assert_eq!(ids, ["acc_a", "acc_b", "acc_c"]);
    }

    #[tokio::test]
    async fn platform_config_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get_platform_config().await.unwrap().is_none());

        let mut config = PlatformConfig::default();
        config.feature_flags.insert(Feature::AiInsights, false);
        store.set_platform_config(&config).await.unwrap();

        let loaded = store.get_platform_config().await.unwrap().unwrap();
        assert!(!loaded.feature_enabled(Feature::AiInsights));
    }
}
