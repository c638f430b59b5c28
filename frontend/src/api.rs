use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{Category, Credentials, Expense, NewCategory, NewExpense, TokenResponse};

/// The REST backend, as seen by the views.
#[async_trait(?Send)]
pub trait ExpenseApi {
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError>;
    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError>;
    async fn list_categories(&self, token: &str) -> Result<Vec<Category>, ApiError>;
    async fn create_category(&self, token: &str, category: &NewCategory) -> Result<(), ApiError>;
    async fn list_expenses(&self, token: &str) -> Result<Vec<Expense>, ApiError>;
    async fn create_expense(&self, token: &str, expense: &NewExpense) -> Result<(), ApiError>;
    /// `from` and `to` are already normalized timestamps.
    async fn filter_expenses(
        &self,
        token: &str,
        from: &str,
        to: &str,
        category_id: &str,
    ) -> Result<Vec<Expense>, ApiError>;
}

pub struct HttpApi {
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", &format!("Bearer {}", token))
    }

    async fn fetch_json<T: DeserializeOwned>(req: Request) -> Result<T, ApiError> {
        let resp = ensure_ok(req.send().await?)?;
        Ok(resp.json::<T>().await?)
    }
}

fn ensure_ok(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        Ok(resp)
    } else {
        Err(ApiError::Status(resp.status()))
    }
}

fn encode<T: serde::Serialize>(builder: RequestBuilder, body: &T) -> Result<Request, ApiError> {
    builder
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))
}

#[async_trait(?Send)]
impl ExpenseApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        log::debug!("POST /users/login");
        let req = encode(Request::post(&self.url("/users/login")), credentials)?;
        let body = Self::fetch_json::<TokenResponse>(req).await?;
        Ok(body.token)
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        log::debug!("POST /users/register");
        let req = encode(Request::post(&self.url("/users/register")), credentials)?;
        ensure_ok(req.send().await?)?;
        Ok(())
    }

    async fn list_categories(&self, token: &str) -> Result<Vec<Category>, ApiError> {
        log::debug!("GET /categories");
        let builder = Self::authorized(Request::get(&self.url("/categories")), token);
        Self::fetch_json(builder.build()?).await
    }

    async fn create_category(&self, token: &str, category: &NewCategory) -> Result<(), ApiError> {
        log::debug!("POST /categories");
        let builder = Self::authorized(Request::post(&self.url("/categories")), token);
        ensure_ok(encode(builder, category)?.send().await?)?;
        Ok(())
    }

    async fn list_expenses(&self, token: &str) -> Result<Vec<Expense>, ApiError> {
        log::debug!("GET /expenses");
        let builder = Self::authorized(Request::get(&self.url("/expenses")), token);
        Self::fetch_json(builder.build()?).await
    }

    async fn create_expense(&self, token: &str, expense: &NewExpense) -> Result<(), ApiError> {
        log::debug!("POST /expenses");
        let builder = Self::authorized(Request::post(&self.url("/expenses")), token);
        ensure_ok(encode(builder, expense)?.send().await?)?;
        Ok(())
    }

    async fn filter_expenses(
        &self,
        token: &str,
        from: &str,
        to: &str,
        category_id: &str,
    ) -> Result<Vec<Expense>, ApiError> {
        let path = format!("/expenses/{}/{}/{}", from, to, category_id);
        log::debug!("GET {}", path);
        let builder = Self::authorized(Request::get(&self.url(&path)), token);
        Self::fetch_json(builder.build()?).await
    }
}
