use crate::api::ExpenseApi;
use crate::error::AuthError;
use crate::models::Credentials;
use crate::router::Route;
use crate::session::SessionStore;

pub const LOGIN_FAILED_MESSAGE: &str = "Invalid credentials";
pub const SIGNUP_FAILED_MESSAGE: &str = "Signup failed";

/// Exchanges credentials for a token and stores it.
///
/// Returns the route to show next. Nothing is stored when the backend
/// rejects the credentials or cannot be reached.
pub async fn submit_login(
    api: &dyn ExpenseApi,
    session: &dyn SessionStore,
    credentials: &Credentials,
) -> Result<Route, AuthError> {
    let token = api
        .login(credentials)
        .await
        .map_err(AuthError::Rejected)?;
    session.set(&token);
    log::info!("signed in");
    Ok(Route::Dashboard)
}

/// Registers the account. The user still has to sign in afterwards.
pub async fn submit_signup(
    api: &dyn ExpenseApi,
    credentials: &Credentials,
) -> Result<Route, AuthError> {
    api.register(credentials)
        .await
        .map_err(AuthError::RegistrationFailed)?;
    log::info!("account registered");
    Ok(Route::Login)
}

pub fn logout(session: &dyn SessionStore) -> Route {
    session.clear();
    log::info!("signed out");
    Route::Login
}
