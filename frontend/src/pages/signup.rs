use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use super::{alert, CredentialsForm};
use crate::app::AppContext;
use crate::auth::{self, SIGNUP_FAILED_MESSAGE};
use crate::guard::InFlight;
use crate::models::Credentials;
use crate::router::Route;

#[function_component(SignupPage)]
pub fn signup_page() -> Html {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let loading = use_state(|| false);
    let in_flight = use_state(InFlight::default);

    let on_submit = {
        let ctx = ctx.clone();
        let navigator = navigator.clone();
        let email = email.clone();
        let password = password.clone();
        let loading = loading.clone();
        let in_flight = (*in_flight).clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (Some(ctx), Some(navigator)) = (ctx.clone(), navigator.clone()) else {
                return;
            };
            let Some(guard) = in_flight.try_begin() else {
                log::debug!("signup already in progress");
                return;
            };
            let credentials = Credentials {
                email: (*email).clone(),
                password: (*password).clone(),
            };
            loading.set(true);
            let loading = loading.clone();
            spawn_local(async move {
                let result = auth::submit_signup(ctx.api.as_ref(), &credentials).await;
                drop(guard);
                loading.set(false);
                match result {
                    Ok(next) => navigator.push(&next),
                    Err(err) => {
                        log::warn!("{err}");
                        alert(SIGNUP_FAILED_MESSAGE);
                    }
                }
            });
        })
    };

    let to_login = Callback::from(move |_| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Login);
        }
    });

    html! {
        <CredentialsForm
            title="Sign Up"
            submit_label="Sign Up"
            busy={*loading}
            email={email}
            password={password}
            on_submit={on_submit}
        >
            <div class="mt-6 text-center text-sm text-muted-foreground">
                {"Already have an account?"}
                <button class="ml-2 text-primary font-semibold" onclick={to_login}>{"Login"}</button>
            </div>
        </CredentialsForm>
    }
}
