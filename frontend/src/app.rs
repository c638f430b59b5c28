use std::rc::Rc;

use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::{ExpenseApi, HttpApi};
use crate::config::AppConfig;
use crate::router::{switch, Route};
use crate::session::{LocalStorageSession, MemorySession, SessionStore};

/// Services handed down to every view.
#[derive(Clone)]
pub struct AppContext {
    pub api: Rc<dyn ExpenseApi>,
    pub session: Rc<dyn SessionStore>,
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api) && Rc::ptr_eq(&self.session, &other.session)
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<AppConfig>,
}

fn session_store() -> Rc<dyn SessionStore> {
    if LocalStorageSession::available() {
        Rc::new(LocalStorageSession)
    } else {
        log::warn!("local storage unavailable, session will not survive a reload");
        Rc::new(MemorySession::default())
    }
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let api = {
        let base_url = props.config.api_base_url.clone();
        use_state(move || Rc::new(HttpApi::new(&base_url)) as Rc<dyn ExpenseApi>)
    };
    let session = use_state(session_store);

    let context = AppContext {
        api: (*api).clone(),
        session: (*session).clone(),
    };

    html! {
        <ContextProvider<AppContext> context={context}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<AppContext>>
    }
}
