//! Operational record mutations: plots, seasons, tasks, HR, inventory,
//! extension records and trade.
//!
//! Same shape throughout: gate on an active workspace, generate the id,
//! stamp server-side fields, persist the full document, publish the change.
//! Reads go straight through [`Shamba::store`].

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use shamba_events::ChangeKind;
use shamba_storage::{
    ArticleId, Comment, CommentId, Customer, CustomerId, Employee, EmployeeId, Farmer, FarmerId,
    Harvest, HarvestId, Interaction, InteractionId, InteractionKind, InventoryCategory,
    InventoryConsumption, InventoryItem, InventoryItemId, KnowledgeBaseArticle, Plot, PlotId,
    Sale, SaleId, Season, SeasonId, Store, Supplier, SupplierId, Task, TaskId, TaskPriority,
    TaskStatus, Timesheet, TimesheetId, UserId, WorkspaceId,
};

use crate::{CoreError, Shamba};

#[derive(Clone, Debug)]
pub struct NewPlot {
    pub name: String,
    pub crop: String,
    pub area: f64,
    pub soil_type: String,
}

#[derive(Clone, Debug)]
pub struct NewSeason {
    pub name: String,
    pub year: i32,
}

#[derive(Clone, Debug)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub plot_id: PlotId,
    pub assignee_id: UserId,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    pub cost: Decimal,
    pub priority: TaskPriority,
    pub category: String,
    pub reminder_date: Option<NaiveDate>,
    pub inventory_consumed: Vec<InventoryConsumption>,
}

#[derive(Clone, Debug)]
pub struct NewEmployee {
    pub name: String,
    pub role: String,
    pub pay_rate: Decimal,
    pub contact: String,
}

#[derive(Clone, Debug)]
pub struct NewTimesheet {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub hours_worked: f64,
}

#[derive(Clone, Debug)]
pub struct NewInventoryItem {
    pub name: String,
    pub category: InventoryCategory,
    pub quantity: f64,
    pub unit: String,
    pub supplier: String,
    pub purchase_date: NaiveDate,
    pub cost_per_unit: Decimal,
    pub reorder_point: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct NewFarmer {
    pub name: String,
    pub location: String,
    pub contact: String,
    pub farm_size: f64,
    pub crops: Vec<String>,
    pub notes: String,
}

#[derive(Clone, Debug)]
pub struct NewInteraction {
    pub farmer_id: FarmerId,
    pub date: NaiveDate,
    pub kind: InteractionKind,
    pub summary: String,
    pub aeo_id: UserId,
}

#[derive(Clone, Debug)]
pub struct NewArticle {
    pub title: String,
    pub category: String,
    pub content: String,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct NewSupplier {
    pub name: String,
    pub contact: String,
    pub phone: String,
    pub notes: String,
}

#[derive(Clone, Debug)]
pub struct NewCustomer {
    pub name: String,
    pub contact: String,
    pub phone: String,
    pub notes: String,
}

#[derive(Clone, Debug)]
pub struct NewHarvest {
    pub plot_id: PlotId,
    pub season_id: SeasonId,
    pub crop: String,
    pub quantity: f64,
    pub unit: String,
    pub date: NaiveDate,
}

#[derive(Clone, Debug)]
pub struct NewSale {
    pub customer_id: CustomerId,
    pub harvest_id: HarvestId,
    pub quantity: f64,
    pub unit_price: Decimal,
    pub date: NaiveDate,
}

impl<S: Store> Shamba<S> {
    // ───────────────────────────────────── Plots & seasons ────────────────────────────────

    pub async fn add_plot(&self, ws: &WorkspaceId, new: NewPlot) -> Result<Plot, CoreError> {
        self.active_workspace(ws).await?;
        let plot = Plot {
            id: PlotId::generate(),
            name: new.name,
            crop: new.crop,
            area: new.area,
            soil_type: new.soil_type,
        };
        self.store.create_plot(ws, &plot).await?;
        self.emit(ws, ChangeKind::Created, "plots", plot.id.as_str()).await;
        Ok(plot)
    }

    pub async fn update_plot(&self, ws: &WorkspaceId, plot: Plot) -> Result<Plot, CoreError> {
        self.active_workspace(ws).await?;
        self.store.replace_plot(ws, &plot).await?;
        self.emit(ws, ChangeKind::Updated, "plots", plot.id.as_str()).await;
        Ok(plot)
    }

    pub async fn delete_plot(&self, ws: &WorkspaceId, id: &PlotId) -> Result<(), CoreError> {
        self.active_workspace(ws).await?;
        self.store.delete_plot(ws, id).await?;
        self.emit(ws, ChangeKind::Deleted, "plots", id.as_str()).await;
        Ok(())
    }

    pub async fn add_season(&self, ws: &WorkspaceId, new: NewSeason) -> Result<Season, CoreError> {
        self.active_workspace(ws).await?;
        let season = Season {
            id: SeasonId::generate(),
            name: new.name,
            year: new.year,
        };
        self.store.create_season(ws, &season).await?;
        self.emit(ws, ChangeKind::Created, "seasons", season.id.as_str()).await;
        Ok(season)
    }

    pub async fn update_season(
        &self,
        ws: &WorkspaceId,
        season: Season,
    ) -> Result<Season, CoreError> {
        self.active_workspace(ws).await?;
        self.store.replace_season(ws, &season).await?;
        self.emit(ws, ChangeKind::Updated, "seasons", season.id.as_str()).await;
        Ok(season)
    }

    pub async fn delete_season(&self, ws: &WorkspaceId, id: &SeasonId) -> Result<(), CoreError> {
        self.active_workspace(ws).await?;
        self.store.delete_season(ws, id).await?;
        self.emit(ws, ChangeKind::Deleted, "seasons", id.as_str()).await;
        Ok(())
    }

    // ───────────────────────────────────── Tasks ──────────────────────────────────────────

    pub async fn add_task(&self, ws: &WorkspaceId, new: NewTask) -> Result<Task, CoreError> {
        self.active_workspace(ws).await?;
        let task = Task {
            id: TaskId::generate(),
            title: new.title,
            description: new.description,
            plot_id: new.plot_id,
            assignee_id: new.assignee_id,
            due_date: new.due_date,
            status: new.status,
            cost: new.cost,
            priority: new.priority,
            category: new.category,
            created_at: Utc::now(),
            comments: Vec::new(),
            reminder_date: new.reminder_date,
            inventory_consumed: new.inventory_consumed,
        };
        self.store.create_task(ws, &task).await?;
        self.emit(ws, ChangeKind::Created, "tasks", task.id.as_str()).await;
        Ok(task)
    }

    pub async fn update_task(&self, ws: &WorkspaceId, task: Task) -> Result<Task, CoreError> {
        self.active_workspace(ws).await?;
        self.store.replace_task(ws, &task).await?;
        self.emit(ws, ChangeKind::Updated, "tasks", task.id.as_str()).await;
        Ok(task)
    }

    /// Append a comment to a task.
    pub async fn add_task_comment(
        &self,
        ws: &WorkspaceId,
        task_id: &TaskId,
        author_id: &UserId,
        content: &str,
    ) -> Result<Task, CoreError> {
        self.active_workspace(ws).await?;
        let mut task = self.store.get_task(ws, task_id).await?;
        task.comments.push(Comment {
            id: CommentId::generate(),
            author_id: author_id.clone(),
            content: content.to_string(),
            created_at: Utc::now(),
        });
        self.store.replace_task(ws, &task).await?;
        self.emit(ws, ChangeKind::Updated, "tasks", task.id.as_str()).await;
        Ok(task)
    }

    // ───────────────────────────────────── HR ─────────────────────────────────────────────

    pub async fn add_employee(
        &self,
        ws: &WorkspaceId,
        new: NewEmployee,
    ) -> Result<Employee, CoreError> {
        self.active_workspace(ws).await?;
        let employee = Employee {
            id: EmployeeId::generate(),
            name: new.name,
            role: new.role,
            pay_rate: new.pay_rate,
            contact: new.contact,
        };
        self.store.create_employee(ws, &employee).await?;
        self.emit(ws, ChangeKind::Created, "employees", employee.id.as_str()).await;
        Ok(employee)
    }

    pub async fn add_timesheet(
        &self,
        ws: &WorkspaceId,
        new: NewTimesheet,
    ) -> Result<Timesheet, CoreError> {
        self.active_workspace(ws).await?;
        let timesheet = Timesheet {
            id: TimesheetId::generate(),
            employee_id: new.employee_id,
            date: new.date,
            hours_worked: new.hours_worked,
        };
        self.store.create_timesheet(ws, &timesheet).await?;
        self.emit(ws, ChangeKind::Created, "timesheets", timesheet.id.as_str()).await;
        Ok(timesheet)
    }

    pub async fn update_timesheet(
        &self,
        ws: &WorkspaceId,
        timesheet: Timesheet,
    ) -> Result<Timesheet, CoreError> {
        self.active_workspace(ws).await?;
        self.store.replace_timesheet(ws, &timesheet).await?;
        self.emit(ws, ChangeKind::Updated, "timesheets", timesheet.id.as_str()).await;
        Ok(timesheet)
    }

    pub async fn delete_timesheet(
        &self,
        ws: &WorkspaceId,
        id: &TimesheetId,
    ) -> Result<(), CoreError> {
        self.active_workspace(ws).await?;
        self.store.delete_timesheet(ws, id).await?;
        self.emit(ws, ChangeKind::Deleted, "timesheets", id.as_str()).await;
        Ok(())
    }

    // ───────────────────────────────────── Inventory ──────────────────────────────────────

    pub async fn add_inventory_item(
        &self,
        ws: &WorkspaceId,
        new: NewInventoryItem,
    ) -> Result<InventoryItem, CoreError> {
        self.active_workspace(ws).await?;
        let item = InventoryItem {
            id: InventoryItemId::generate(),
            name: new.name,
            category: new.category,
            quantity: new.quantity,
            unit: new.unit,
            supplier: new.supplier,
            purchase_date: new.purchase_date,
            cost_per_unit: new.cost_per_unit,
            reorder_point: new.reorder_point,
        };
        self.store.create_inventory_item(ws, &item).await?;
        self.emit(ws, ChangeKind::Created, "inventory", item.id.as_str()).await;
        Ok(item)
    }

    pub async fn update_inventory_item(
        &self,
        ws: &WorkspaceId,
        item: InventoryItem,
    ) -> Result<InventoryItem, CoreError> {
        self.active_workspace(ws).await?;
        self.store.replace_inventory_item(ws, &item).await?;
        self.emit(ws, ChangeKind::Updated, "inventory", item.id.as_str()).await;
        Ok(item)
    }

    pub async fn delete_inventory_item(
        &self,
        ws: &WorkspaceId,
        id: &InventoryItemId,
    ) -> Result<(), CoreError> {
        self.active_workspace(ws).await?;
        self.store.delete_inventory_item(ws, id).await?;
        self.emit(ws, ChangeKind::Deleted, "inventory", id.as_str()).await;
        Ok(())
    }

    // ───────────────────────────────────── Extension (AEO) ────────────────────────────────

    pub async fn add_farmer(&self, ws: &WorkspaceId, new: NewFarmer) -> Result<Farmer, CoreError> {
        self.active_workspace(ws).await?;
        let farmer = Farmer {
            id: FarmerId::generate(),
            name: new.name,
            location: new.location,
            contact: new.contact,
            farm_size: new.farm_size,
            crops: new.crops,
            notes: new.notes,
        };
        self.store.create_farmer(ws, &farmer).await?;
        self.emit(ws, ChangeKind::Created, "farmers", farmer.id.as_str()).await;
        Ok(farmer)
    }

    pub async fn update_farmer(
        &self,
        ws: &WorkspaceId,
        farmer: Farmer,
    ) -> Result<Farmer, CoreError> {
        self.active_workspace(ws).await?;
        self.store.replace_farmer(ws, &farmer).await?;
        self.emit(ws, ChangeKind::Updated, "farmers", farmer.id.as_str()).await;
        Ok(farmer)
    }

    pub async fn delete_farmer(&self, ws: &WorkspaceId, id: &FarmerId) -> Result<(), CoreError> {
        self.active_workspace(ws).await?;
        self.store.delete_farmer(ws, id).await?;
        self.emit(ws, ChangeKind::Deleted, "farmers", id.as_str()).await;
        Ok(())
    }

    pub async fn add_interaction(
        &self,
        ws: &WorkspaceId,
        new: NewInteraction,
    ) -> Result<Interaction, CoreError> {
        self.active_workspace(ws).await?;
        let interaction = Interaction {
            id: InteractionId::generate(),
            farmer_id: new.farmer_id,
            date: new.date,
            kind: new.kind,
            summary: new.summary,
            aeo_id: new.aeo_id,
        };
        self.store.create_interaction(ws, &interaction).await?;
        self.emit(ws, ChangeKind::Created, "interactions", interaction.id.as_str()).await;
        Ok(interaction)
    }

    pub async fn add_article(
        &self,
        ws: &WorkspaceId,
        new: NewArticle,
    ) -> Result<KnowledgeBaseArticle, CoreError> {
        self.active_workspace(ws).await?;
        let now = Utc::now();
        let article = KnowledgeBaseArticle {
            id: ArticleId::generate(),
            title: new.title,
            category: new.category,
            content: new.content,
            tags: new.tags,
            created_at: now,
            updated_at: now,
        };
        self.store.create_article(ws, &article).await?;
        self.emit(ws, ChangeKind::Created, "kb_articles", article.id.as_str()).await;
        Ok(article)
    }

    /// Replace an article, restamping `updated_at`.
    pub async fn update_article(
        &self,
        ws: &WorkspaceId,
        mut article: KnowledgeBaseArticle,
    ) -> Result<KnowledgeBaseArticle, CoreError> {
        self.active_workspace(ws).await?;
        article.updated_at = Utc::now();
        self.store.replace_article(ws, &article).await?;
        self.emit(ws, ChangeKind::Updated, "kb_articles", article.id.as_str()).await;
        Ok(article)
    }

    pub async fn delete_article(&self, ws: &WorkspaceId, id: &ArticleId) -> Result<(), CoreError> {
        self.active_workspace(ws).await?;
        self.store.delete_article(ws, id).await?;
        self.emit(ws, ChangeKind::Deleted, "kb_articles", id.as_str()).await;
        Ok(())
    }

    // ───────────────────────────────────── Trade ──────────────────────────────────────────

    pub async fn add_supplier(
        &self,
        ws: &WorkspaceId,
        new: NewSupplier,
    ) -> Result<Supplier, CoreError> {
        self.active_workspace(ws).await?;
        let supplier = Supplier {
            id: SupplierId::generate(),
            name: new.name,
            contact: new.contact,
            phone: new.phone,
            notes: new.notes,
        };
        self.store.create_supplier(ws, &supplier).await?;
        self.emit(ws, ChangeKind::Created, "suppliers", supplier.id.as_str()).await;
        Ok(supplier)
    }

    pub async fn update_supplier(
        &self,
        ws: &WorkspaceId,
        supplier: Supplier,
    ) -> Result<Supplier, CoreError> {
        self.active_workspace(ws).await?;
        self.store.replace_supplier(ws, &supplier).await?;
        self.emit(ws, ChangeKind::Updated, "suppliers", supplier.id.as_str()).await;
        Ok(supplier)
    }

    pub async fn delete_supplier(
        &self,
        ws: &WorkspaceId,
        id: &SupplierId,
    ) -> Result<(), CoreError> {
        self.active_workspace(ws).await?;
        self.store.delete_supplier(ws, id).await?;
        self.emit(ws, ChangeKind::Deleted, "suppliers", id.as_str()).await;
        Ok(())
    }

    pub async fn add_customer(
        &self,
        ws: &WorkspaceId,
        new: NewCustomer,
    ) -> Result<Customer, CoreError> {
        self.active_workspace(ws).await?;
        let customer = Customer {
            id: CustomerId::generate(),
            name: new.name,
            contact: new.contact,
            phone: new.phone,
            notes: new.notes,
        };
        self.store.create_customer(ws, &customer).await?;
        self.emit(ws, ChangeKind::Created, "customers", customer.id.as_str()).await;
        Ok(customer)
    }

    pub async fn update_customer(
        &self,
        ws: &WorkspaceId,
        customer: Customer,
    ) -> Result<Customer, CoreError> {
        self.active_workspace(ws).await?;
        self.store.replace_customer(ws, &customer).await?;
        self.emit(ws, ChangeKind::Updated, "customers", customer.id.as_str()).await;
        Ok(customer)
    }

    pub async fn delete_customer(
        &self,
        ws: &WorkspaceId,
        id: &CustomerId,
    ) -> Result<(), CoreError> {
        self.active_workspace(ws).await?;
        self.store.delete_customer(ws, id).await?;
        self.emit(ws, ChangeKind::Deleted, "customers", id.as_str()).await;
        Ok(())
    }

    /// Record a harvest lot; the remaining quantity starts at the full
    /// harvested quantity.
    pub async fn add_harvest(
        &self,
        ws: &WorkspaceId,
        new: NewHarvest,
    ) -> Result<Harvest, CoreError> {
        self.active_workspace(ws).await?;
        let harvest = Harvest {
            id: HarvestId::generate(),
            plot_id: new.plot_id,
            season_id: new.season_id,
            crop: new.crop,
            quantity: new.quantity,
            unit: new.unit,
            date: new.date,
            quantity_remaining: new.quantity,
        };
        self.store.create_harvest(ws, &harvest).await?;
        self.emit(ws, ChangeKind::Created, "harvests", harvest.id.as_str()).await;
        Ok(harvest)
    }

    pub async fn update_harvest(
        &self,
        ws: &WorkspaceId,
        harvest: Harvest,
    ) -> Result<Harvest, CoreError> {
        self.active_workspace(ws).await?;
        self.store.replace_harvest(ws, &harvest).await?;
        self.emit(ws, ChangeKind::Updated, "harvests", harvest.id.as_str()).await;
        Ok(harvest)
    }

    pub async fn delete_harvest(&self, ws: &WorkspaceId, id: &HarvestId) -> Result<(), CoreError> {
        self.active_workspace(ws).await?;
        self.store.delete_harvest(ws, id).await?;
        self.emit(ws, ChangeKind::Deleted, "harvests", id.as_str()).await;
        Ok(())
    }

    /// Record a sale and draw down the harvest lot it sells from. The sale
    /// is not posted to the ledger until [`Shamba::post_sale_to_ledger`].
    pub async fn record_sale(&self, ws: &WorkspaceId, new: NewSale) -> Result<Sale, CoreError> {
        self.active_workspace(ws).await?;
        let sale = Sale {
            id: SaleId::generate(),
            customer_id: new.customer_id,
            harvest_id: new.harvest_id.clone(),
            quantity: new.quantity,
            unit_price: new.unit_price,
            date: new.date,
            journal_entry_id: None,
        };
        self.store.create_sale(ws, &sale).await?;

        // Draw down the lot; a missing harvest is a dangling reference the
        // same way deleted accounts are, so the sale still stands.
        let harvests = self.store.list_harvests(ws).await?;
        if let Some(mut harvest) = harvests.into_iter().find(|h| h.id == new.harvest_id) {
            harvest.quantity_remaining = (harvest.quantity_remaining - new.quantity).max(0.0);
            self.store.replace_harvest(ws, &harvest).await?;
            self.emit(ws, ChangeKind::Updated, "harvests", harvest.id.as_str()).await;
        }

        self.emit(ws, ChangeKind::Created, "sales", sale.id.as_str()).await;
        Ok(sale)
    }

    pub async fn delete_sale(&self, ws: &WorkspaceId, id: &SaleId) -> Result<(), CoreError> {
        self.active_workspace(ws).await?;
        self.store.delete_sale(ws, id).await?;
        self.emit(ws, ChangeKind::Deleted, "sales", id.as_str()).await;
        Ok(())
    }
}
