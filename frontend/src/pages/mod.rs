mod dashboard;
mod login;
mod signup;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use signup::SignupPage;

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

fn on_input(on_value: impl Fn(String) + 'static) -> Callback<InputEvent> {
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_value(input.value());
    })
}

fn on_select(on_value: impl Fn(String) + 'static) -> Callback<Event> {
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        on_value(select.value());
    })
}

fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    on_input(move |value| state.set(value))
}

/// Blocking browser alert.
fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[derive(Properties, PartialEq)]
struct CredentialsFormProps {
    title: &'static str,
    submit_label: &'static str,
    busy: bool,
    email: UseStateHandle<String>,
    password: UseStateHandle<String>,
    on_submit: Callback<SubmitEvent>,
    children: Children,
}

#[function_component(CredentialsForm)]
fn credentials_form(props: &CredentialsFormProps) -> Html {
    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <h1 class="text-2xl font-bold text-foreground mb-6">{ props.title }</h1>
                <form class="space-y-4" onsubmit={props.on_submit.clone()}>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Email"}</label>
                        <input
                            type="text"
                            class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground"
                            value={(*props.email).clone()}
                            oninput={bind_input(&props.email)}
                        />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Password"}</label>
                        <input
                            type="password"
                            class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground"
                            value={(*props.password).clone()}
                            oninput={bind_input(&props.password)}
                        />
                    </div>
                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={props.busy}
                    >
                        { if props.busy { "Please wait..." } else { props.submit_label } }
                    </button>
                </form>
                { for props.children.iter() }
            </div>
        </div>
    }
}
