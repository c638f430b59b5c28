//! In-memory backend used by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};

use crate::api::ExpenseApi;
use crate::error::ApiError;
use crate::models::{Category, Credentials, Expense, NewCategory, NewExpense};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Register,
    ListCategories,
    CreateCategory,
    ListExpenses,
    CreateExpense,
    FilterExpenses,
}

#[derive(Default)]
pub struct FakeBackend {
    users: RefCell<HashMap<String, String>>,
    categories: RefCell<Vec<Category>>,
    expenses: RefCell<Vec<Expense>>,
    failures: RefCell<HashMap<Endpoint, ApiError>>,
    calls: RefCell<Vec<Endpoint>>,
    filter_paths: RefCell<Vec<String>>,
    next_id: Cell<u32>,
}

impl FakeBackend {
    pub fn add_user(&self, email: &str, password: &str) {
        self.users
            .borrow_mut()
            .insert(email.to_string(), password.to_string());
    }

    pub fn token_for(&self, email: &str) -> String {
        format!("token-{email}")
    }

    pub fn add_category(&self, id: &str, name: &str) {
        self.categories.borrow_mut().push(Category {
            id: id.to_string(),
            name: name.to_string(),
        });
    }

    pub fn add_expense(&self, title: &str, amount: &str, date: &str, category_id: &str) {
        let id = self.fresh_id("e");
        self.expenses.borrow_mut().push(Expense {
            id: Some(id),
            title: title.to_string(),
            amount: amount.to_string(),
            date: date.to_string(),
            category_id: Some(category_id.to_string()),
        });
    }

    pub fn fail(&self, endpoint: Endpoint, err: ApiError) {
        self.failures.borrow_mut().insert(endpoint, err);
    }

    pub fn calls(&self) -> Vec<Endpoint> {
        self.calls.borrow().clone()
    }

    pub fn filter_paths(&self) -> Vec<String> {
        self.filter_paths.borrow().clone()
    }

    fn fresh_id(&self, prefix: &str) -> String {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        format!("{prefix}{id}")
    }

    fn enter(&self, endpoint: Endpoint) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(endpoint);
        match self.failures.borrow().get(&endpoint) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn authorize(&self, token: &str) -> Result<(), ApiError> {
        let known = self
            .users
            .borrow()
            .keys()
            .any(|email| self.token_for(email) == token);
        if known {
            Ok(())
        } else {
            Err(ApiError::Status(401))
        }
    }
}

fn calendar_day(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.date_naive())
        .ok()
        .or_else(|| raw.get(..10).and_then(|day| day.parse().ok()))
}

#[async_trait(?Send)]
impl ExpenseApi for FakeBackend {
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        self.enter(Endpoint::Login)?;
        match self.users.borrow().get(&credentials.email) {
            Some(password) if *password == credentials.password => {
                Ok(self.token_for(&credentials.email))
            }
            _ => Err(ApiError::Status(401)),
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        self.enter(Endpoint::Register)?;
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(ApiError::Status(400));
        }
        if self.users.borrow().contains_key(&credentials.email) {
            return Err(ApiError::Status(409));
        }
        self.add_user(&credentials.email, &credentials.password);
        Ok(())
    }

    async fn list_categories(&self, token: &str) -> Result<Vec<Category>, ApiError> {
        self.enter(Endpoint::ListCategories)?;
        self.authorize(token)?;
        Ok(self.categories.borrow().clone())
    }

    async fn create_category(&self, token: &str, category: &NewCategory) -> Result<(), ApiError> {
        self.enter(Endpoint::CreateCategory)?;
        self.authorize(token)?;
        let id = self.fresh_id("c");
        self.add_category(&id, &category.name);
        Ok(())
    }

    async fn list_expenses(&self, token: &str) -> Result<Vec<Expense>, ApiError> {
        self.enter(Endpoint::ListExpenses)?;
        self.authorize(token)?;
        Ok(self.expenses.borrow().clone())
    }

    async fn create_expense(&self, token: &str, expense: &NewExpense) -> Result<(), ApiError> {
        self.enter(Endpoint::CreateExpense)?;
        self.authorize(token)?;
        let date = expense.date.to_rfc3339();
        self.add_expense(&expense.title, &expense.amount, &date, &expense.category_id);
        Ok(())
    }

    async fn filter_expenses(
        &self,
        token: &str,
        from: &str,
        to: &str,
        category_id: &str,
    ) -> Result<Vec<Expense>, ApiError> {
        self.enter(Endpoint::FilterExpenses)?;
        self.authorize(token)?;
        self.filter_paths
            .borrow_mut()
            .push(format!("/expenses/{from}/{to}/{category_id}"));
        let (Some(from), Some(to)) = (calendar_day(from), calendar_day(to)) else {
            return Err(ApiError::Status(400));
        };
        Ok(self
            .expenses
            .borrow()
            .iter()
            .filter(|e| category_id == "all" || e.category_id.as_deref() == Some(category_id))
            .filter(|e| calendar_day(&e.date).is_some_and(|day| from <= day && day <= to))
            .cloned()
            .collect())
    }
}
