mod api;
mod app;
mod auth;
mod config;
mod dashboard;
mod error;
mod format;
mod guard;
mod models;
mod pages;
mod router;
mod session;
#[cfg(test)]
mod test_support;

use std::rc::Rc;

use app::{App, AppProps};
use config::AppConfig;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::resolve();
    wasm_logger::init(wasm_logger::Config::new(config.log_level));
    log::info!("using expense backend at {}", config.api_base_url);

    yew::Renderer::<App>::with_props(AppProps {
        config: Rc::new(config),
    })
    .render();
}
