use std::rc::Rc;

use chrono::{DateTime, NaiveDate, Utc};
use yew::Reducible;

use crate::api::ExpenseApi;
use crate::error::{ApiError, DashboardError};
use crate::guard::Ticket;
use crate::models::{Category, Expense, NewCategory, NewExpense};
use crate::router::Route;
use crate::session::SessionStore;

/// Filter category id meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

pub const EXPENSE_SAVE_FAILED: &str = "Could not save expense. Try again.";
pub const CATEGORY_SAVE_FAILED: &str = "Could not save category. Try again.";

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardData {
    pub categories: Vec<Category>,
    pub expenses: Vec<Expense>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseForm {
    pub title: String,
    pub amount: String,
    pub category_id: String,
}

impl ExpenseForm {
    pub fn to_request(&self, now: DateTime<Utc>) -> NewExpense {
        NewExpense {
            title: self.title.clone(),
            amount: self.amount.clone(),
            date: now,
            category_id: self.category_id.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterForm {
    pub from_date: String,
    pub to_date: String,
    pub category_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub from: String,
    pub to: String,
    pub category_id: String,
}

impl FilterForm {
    /// `None` when any field is empty or a date is not `YYYY-MM-DD`.
    pub fn query(&self) -> Option<ExpenseFilter> {
        let category_id = self.category_id.trim();
        let missing = [self.from_date.trim(), self.to_date.trim(), category_id]
            .iter()
            .any(|field| field.is_empty());
        if missing {
            return None;
        }
        let from = normalize_date(&self.from_date);
        let to = normalize_date(&self.to_date);
        match (from, to) {
            (Some(from), Some(to)) => Some(ExpenseFilter {
                from,
                to,
                category_id: category_id.to_string(),
            }),
            _ => {
                log::warn!(
                    "ignoring filter with invalid dates {:?}..{:?}",
                    self.from_date,
                    self.to_date
                );
                None
            }
        }
    }
}

/// `2024-01-31` becomes `2024-01-31T00:00:00.000Z`.
pub fn normalize_date(raw: &str) -> Option<String> {
    let day = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()?;
    let midnight = day.and_hms_opt(0, 0, 0)?;
    Some(midnight.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

pub fn first_category_id(categories: &[Category]) -> Option<String> {
    categories.first().map(|category| category.id.clone())
}

/// Reads the token from the store on every call, so a logout in another
/// tab is seen by the next action.
pub fn session_token(session: &dyn SessionStore) -> Result<String, DashboardError> {
    session.get().ok_or(DashboardError::NoSession)
}

/// Where a failed load sends the viewer. `None` once the dashboard has
/// been left or reloaded since the load started.
pub fn exit_route(err: &DashboardError, ticket: &Ticket) -> Option<Route> {
    if !ticket.is_current() {
        log::debug!("ignoring stale load failure: {err}");
        return None;
    }
    log::warn!("leaving dashboard: {err}");
    Some(Route::Login)
}

/// Form field bound to an input on the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Title,
    Amount,
    Category,
    NewCategory,
    FromDate,
    ToDate,
    FilterCategory,
}

/// Everything the dashboard view renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    pub categories: Vec<Category>,
    pub expenses: Vec<Expense>,
    pub form: ExpenseForm,
    pub new_category: String,
    pub filter: FilterForm,
    pub notice: Option<&'static str>,
    pub saving_expense: bool,
    pub saving_category: bool,
    pub filtering: bool,
}

/// Results that land after an `await` carry the ticket issued when the
/// request started; a stale ticket leaves the lists alone.
pub enum DashboardAction {
    Edit(Field, String),
    DismissNotice,
    Loaded {
        data: DashboardData,
        category_ticket: Ticket,
        expense_ticket: Ticket,
    },
    ExpenseSubmitting,
    ExpenseSaved {
        ticket: Ticket,
        refreshed: Option<Vec<Expense>>,
    },
    ExpenseFailed,
    CategorySubmitting,
    CategorySaved {
        ticket: Ticket,
        refreshed: Option<Vec<Category>>,
    },
    CategoryFailed,
    Filtering,
    Filtered {
        ticket: Ticket,
        expenses: Option<Vec<Expense>>,
    },
}

impl DashboardState {
    pub fn apply(mut self, action: DashboardAction) -> Self {
        match action {
            DashboardAction::Edit(field, value) => *self.field_mut(field) = value,
            DashboardAction::DismissNotice => self.notice = None,
            DashboardAction::Loaded {
                data,
                category_ticket,
                expense_ticket,
            } => {
                if category_ticket.is_current() {
                    self.set_categories(data.categories);
                }
                if expense_ticket.is_current() {
                    self.expenses = data.expenses;
                }
            }
            DashboardAction::ExpenseSubmitting => {
                self.saving_expense = true;
                self.notice = None;
            }
            DashboardAction::ExpenseSaved { ticket, refreshed } => {
                self.saving_expense = false;
                self.form.title.clear();
                self.form.amount.clear();
                match refreshed {
                    Some(list) if ticket.is_current() => self.expenses = list,
                    Some(_) => log::debug!("discarding stale expense list"),
                    None => {}
                }
            }
            DashboardAction::ExpenseFailed => {
                self.saving_expense = false;
                self.notice = Some(EXPENSE_SAVE_FAILED);
            }
            DashboardAction::CategorySubmitting => {
                self.saving_category = true;
                self.notice = None;
            }
            DashboardAction::CategorySaved { ticket, refreshed } => {
                self.saving_category = false;
                self.new_category.clear();
                match refreshed {
                    Some(list) if ticket.is_current() => self.set_categories(list),
                    Some(_) => log::debug!("discarding stale category list"),
                    None => {}
                }
            }
            DashboardAction::CategoryFailed => {
                self.saving_category = false;
                self.notice = Some(CATEGORY_SAVE_FAILED);
            }
            DashboardAction::Filtering => self.filtering = true,
            DashboardAction::Filtered { ticket, expenses } => {
                self.filtering = false;
                match expenses {
                    Some(list) if ticket.is_current() => self.expenses = list,
                    Some(_) => log::debug!("discarding stale filter result"),
                    None => {}
                }
            }
        }
        self
    }

    // A fresh category list always resets the selection to its first entry.
    fn set_categories(&mut self, categories: Vec<Category>) {
        self.form.category_id = first_category_id(&categories).unwrap_or_default();
        self.categories = categories;
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.form.title,
            Field::Amount => &mut self.form.amount,
            Field::Category => &mut self.form.category_id,
            Field::NewCategory => &mut self.new_category,
            Field::FromDate => &mut self.filter.from_date,
            Field::ToDate => &mut self.filter.to_date,
            Field::FilterCategory => &mut self.filter.category_id,
        }
    }
}

impl Reducible for DashboardState {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).clone().apply(action))
    }
}

/// Everything the dashboard needs on entry.
///
/// Without a stored token no request is made. Any failed fetch clears the
/// token: an expired session and a network fault look the same here.
pub async fn load(
    api: &dyn ExpenseApi,
    session: &dyn SessionStore,
) -> Result<DashboardData, DashboardError> {
    let token = session_token(session)?;

    let fetched = async {
        let categories = api.list_categories(&token).await?;
        let expenses = api.list_expenses(&token).await?;
        Ok::<_, ApiError>((categories, expenses))
    }
    .await;

    match fetched {
        Ok((categories, expenses)) => Ok(DashboardData {
            categories,
            expenses,
        }),
        Err(err) => {
            log::warn!("dashboard load failed, signing out: {err}");
            session.clear();
            Err(DashboardError::SessionRejected(err))
        }
    }
}

/// Creates the expense, then re-reads the list.
///
/// `Ok(None)` means the expense was saved but the list could not be
/// refreshed.
pub async fn add_expense(
    api: &dyn ExpenseApi,
    token: &str,
    form: &ExpenseForm,
    now: DateTime<Utc>,
) -> Result<Option<Vec<Expense>>, ApiError> {
    api.create_expense(token, &form.to_request(now)).await?;
    match api.list_expenses(token).await {
        Ok(expenses) => Ok(Some(expenses)),
        Err(err) => {
            log::warn!("expense saved but list refresh failed: {err}");
            Ok(None)
        }
    }
}

/// Same contract as [`add_expense`], for categories.
pub async fn add_category(
    api: &dyn ExpenseApi,
    token: &str,
    name: &str,
) -> Result<Option<Vec<Category>>, ApiError> {
    let category = NewCategory {
        name: name.to_string(),
    };
    api.create_category(token, &category).await?;
    match api.list_categories(token).await {
        Ok(categories) => Ok(Some(categories)),
        Err(err) => {
            log::warn!("category saved but list refresh failed: {err}");
            Ok(None)
        }
    }
}

pub async fn apply_filter(
    api: &dyn ExpenseApi,
    token: &str,
    filter: &ExpenseFilter,
) -> Result<Vec<Expense>, ApiError> {
    api.filter_expenses(token, &filter.from, &filter.to, &filter.category_id)
        .await
}
