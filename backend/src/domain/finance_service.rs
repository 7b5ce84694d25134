//! Personal finance: one-off transactions, derived balance, and recurring
//! entries pinned to calendar days.
//!
//! Transactions are kept newest first under `transactions_<userId>`.
//! Recurring entries live under `recurring_<userId>` keyed by date and only
//! feed the monthly projection; they are never expanded into transactions.

use chrono::{NaiveDate, Utc};
use shared::{
    CalendarMonth, CategoryLists, CategoryTotal, CreateFinanceTransactionRequest,
    CreateRecurringRequest, DaySummary, FinanceSummary, FinanceTransaction, MonthlyProjection,
    RecurringTransaction, TransactionKind,
};
use std::collections::BTreeMap;
use tracing::info;

use crate::domain::calendar::CalendarService;
use crate::domain::{new_id, validation};
use crate::error::{AppError, AppResult};
use crate::storage::{JsonStore, StorageKey};

pub const EXPENSE_CATEGORIES: [&str; 7] = [
    "Food",
    "Transportation",
    "Entertainment",
    "Bills",
    "Shopping",
    "Healthcare",
    "Other",
];
pub const INCOME_CATEGORIES: [&str; 5] = ["Salary", "Freelance", "Investment", "Gift", "Other"];

const UNCATEGORIZED: &str = "Other";

type RecurringMap = BTreeMap<String, Vec<RecurringTransaction>>;

pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => &INCOME_CATEGORIES,
        TransactionKind::Expense => &EXPENSE_CATEGORIES,
    }
}

/// Format amount for display
pub fn format_amount(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

/// Signed contribution of an entry to a balance
fn signed(kind: TransactionKind, amount: f64) -> f64 {
    match kind {
        TransactionKind::Income => amount,
        TransactionKind::Expense => -amount,
    }
}

#[derive(Clone)]
pub struct FinanceService {
    store: JsonStore,
    calendar_service: CalendarService,
}

impl FinanceService {
    pub fn new(store: JsonStore, calendar_service: CalendarService) -> Self {
        Self {
            store,
            calendar_service,
        }
    }

    pub fn categories(&self) -> CategoryLists {
        CategoryLists {
            income: INCOME_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            expense: EXPENSE_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    // Transactions

    pub fn list_transactions(&self, user_id: u64) -> AppResult<Vec<FinanceTransaction>> {
        Ok(self.store.load(&StorageKey::transactions(user_id))?)
    }

    pub fn add_transaction(
        &self,
        user_id: u64,
        request: CreateFinanceTransactionRequest,
    ) -> AppResult<FinanceTransaction> {
        let description = validation::required(&request.description, "Please enter a description")?;
        let amount = validation::positive_amount(&request.amount, "Amount")?;

        let category = request.category.trim().to_string();
        if !category.is_empty() && !categories_for(request.kind).contains(&category.as_str()) {
            return Err(AppError::validation(format!(
                "'{}' is not a valid {} category",
                category,
                match request.kind {
                    TransactionKind::Income => "income",
                    TransactionKind::Expense => "expense",
                }
            )));
        }

        let transaction = FinanceTransaction {
            id: new_id("txn"),
            description,
            amount,
            kind: request.kind,
            category,
            date: request.date.unwrap_or_else(|| self.calendar_service.today()),
            created_at: Utc::now(),
        };

        let mut transactions = self.list_transactions(user_id)?;
        transactions.insert(0, transaction.clone());
        self.store.save(&StorageKey::transactions(user_id), &transactions)?;

        info!(
            "Recorded {:?} of {} for user {}",
            transaction.kind,
            format_amount(transaction.amount),
            user_id
        );
        Ok(transaction)
    }

    pub fn delete_transaction(&self, user_id: u64, transaction_id: &str) -> AppResult<()> {
        let mut transactions = self.list_transactions(user_id)?;
        let before = transactions.len();
        transactions.retain(|t| t.id != transaction_id);

        if transactions.len() == before {
            return Err(AppError::not_found(format!("Transaction {} not found", transaction_id)));
        }
        self.store.save(&StorageKey::transactions(user_id), &transactions)?;
        info!("Deleted transaction {} for user {}", transaction_id, user_id);
        Ok(())
    }

    pub fn summary(&self, user_id: u64) -> AppResult<FinanceSummary> {
        let transactions = self.list_transactions(user_id)?;

        let total_of = |kind: TransactionKind| -> f64 {
            transactions
                .iter()
                .filter(|t| t.kind == kind)
                .map(|t| t.amount)
                .sum()
        };
        let total_income = total_of(TransactionKind::Income);
        let total_expenses = total_of(TransactionKind::Expense);

        Ok(FinanceSummary {
            balance: total_income - total_expenses,
            total_income,
            total_expenses,
        })
    }

    /// Expense totals per category, largest first
    pub fn spending_by_category(&self, user_id: u64) -> AppResult<Vec<CategoryTotal>> {
        let mut totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();

        for transaction in self.list_transactions(user_id)? {
            if transaction.kind != TransactionKind::Expense {
                continue;
            }
            let category = if transaction.category.is_empty() {
                UNCATEGORIZED.to_string()
            } else {
                transaction.category
            };
            let entry = totals.entry(category).or_insert((0.0, 0));
            entry.0 += transaction.amount;
            entry.1 += 1;
        }

        let mut result: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, (total, count))| CategoryTotal { category, total, count })
            .collect();
        result.sort_by(|a, b| b.total.total_cmp(&a.total));
        Ok(result)
    }

    // Recurring transactions

    fn load_recurring(&self, user_id: u64) -> AppResult<RecurringMap> {
        Ok(self.store.load(&StorageKey::recurring(user_id))?)
    }

    fn save_recurring(&self, user_id: u64, mut recurring: RecurringMap) -> AppResult<()> {
        recurring.retain(|_, entries| !entries.is_empty());
        Ok(self.store.save(&StorageKey::recurring(user_id), &recurring)?)
    }

    pub fn recurring_for_date(&self, user_id: u64, date: NaiveDate) -> AppResult<Vec<RecurringTransaction>> {
        let key = CalendarService::format_date_key(date);
        Ok(self.load_recurring(user_id)?.remove(&key).unwrap_or_default())
    }

    pub fn add_recurring(
        &self,
        user_id: u64,
        date: NaiveDate,
        request: CreateRecurringRequest,
    ) -> AppResult<RecurringTransaction> {
        let description = validation::required(&request.description, "Please enter a description")?;
        let amount = validation::positive_amount(&request.amount, "Amount")?;

        let entry = RecurringTransaction {
            id: new_id("recurring"),
            description,
            amount,
            kind: request.kind,
            frequency: request.frequency,
            created_at: Utc::now(),
        };

        let key = CalendarService::format_date_key(date);
        let mut recurring = self.load_recurring(user_id)?;
        recurring.entry(key.clone()).or_default().push(entry.clone());
        self.save_recurring(user_id, recurring)?;

        info!(
            "Added {:?} recurring entry '{}' on {} for user {}",
            entry.frequency, entry.description, key, user_id
        );
        Ok(entry)
    }

    pub fn delete_recurring(&self, user_id: u64, date: NaiveDate, entry_id: &str) -> AppResult<()> {
        let key = CalendarService::format_date_key(date);
        let mut recurring = self.load_recurring(user_id)?;

        let entries = recurring
            .get_mut(&key)
            .ok_or_else(|| AppError::not_found(format!("No recurring entries on {}", key)))?;
        let before = entries.len();
        entries.retain(|e| e.id != entry_id);
        if entries.len() == before {
            return Err(AppError::not_found(format!("Recurring entry {} not found", entry_id)));
        }

        self.save_recurring(user_id, recurring)
    }

    /// Income minus expenses over every recurring entry, whatever its
    /// frequency or date
    pub fn monthly_projection(&self, user_id: u64) -> AppResult<MonthlyProjection> {
        let recurring = self.load_recurring(user_id)?;
        let mut projection = MonthlyProjection {
            projected_income: 0.0,
            projected_expenses: 0.0,
            net: 0.0,
        };

        for entry in recurring.values().flatten() {
            match entry.kind {
                TransactionKind::Income => projection.projected_income += entry.amount,
                TransactionKind::Expense => projection.projected_expenses += entry.amount,
            }
        }
        projection.net = projection.projected_income - projection.projected_expenses;
        Ok(projection)
    }

    /// Month grid with the recurring entries of each day and their net amount
    pub fn calendar(
        &self,
        user_id: u64,
        month: u32,
        year: i32,
        selected: NaiveDate,
    ) -> AppResult<CalendarMonth> {
        let recurring = self.load_recurring(user_id)?;
        let today = self.calendar_service.today();

        self.calendar_service
            .generate_calendar_month(month, year, today, selected, |date| {
                let entries = recurring
                    .get(&CalendarService::format_date_key(date))
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                DaySummary {
                    item_count: entries.len(),
                    net_amount: entries.iter().map(|e| signed(e.kind, e.amount)).sum(),
                    ..DaySummary::default()
                }
            })
    }
}
