use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{DashboardPage, LoginPage, SignupPage};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Routable)]
pub enum Route {
    #[at("/")]
    Login,
    #[at("/signup")]
    Signup,
    #[at("/dashboard")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Unknown paths go back to the login view.
pub fn switch(route: Route) -> Html {
    match route {
        Route::Login => html! { <LoginPage /> },
        Route::Signup => html! { <SignupPage /> },
        Route::Dashboard => html! { <DashboardPage /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Login} /> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", Route::Login)]
    #[case("/signup", Route::Signup)]
    #[case("/signup/", Route::Signup)]
    #[case("/dashboard", Route::Dashboard)]
    #[case("/settings", Route::NotFound)]
    #[case("/dashboard/extra", Route::NotFound)]
    fn recognizes_paths(#[case] path: &str, #[case] expected: Route) {
        assert_eq!(Route::recognize(path), Some(expected));
    }

    #[rstest]
    fn path_round_trips(#[values(Route::Login, Route::Signup, Route::Dashboard)] route: Route) {
        assert_eq!(Route::recognize(&route.to_path()), Some(route));
    }
}
