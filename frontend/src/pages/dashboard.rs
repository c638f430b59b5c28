use chrono::Utc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use super::{on_input, on_select};
use crate::app::AppContext;
use crate::auth;
use crate::dashboard::{
    self, exit_route, DashboardAction, DashboardState, Field, ALL_CATEGORIES,
};
use crate::format;
use crate::guard::{InFlight, RequestGeneration};
use crate::router::Route;

fn edit_input(state: &UseReducerHandle<DashboardState>, field: Field) -> Callback<InputEvent> {
    let dispatcher = state.dispatcher();
    on_input(move |value| dispatcher.dispatch(DashboardAction::Edit(field, value)))
}

fn edit_select(state: &UseReducerHandle<DashboardState>, field: Field) -> Callback<Event> {
    let dispatcher = state.dispatcher();
    on_select(move |value| dispatcher.dispatch(DashboardAction::Edit(field, value)))
}

// The token comes straight from the session store; without one the viewer
// is sent back to login.
fn signed_in(
    ctx: &Option<AppContext>,
    navigator: &Option<Navigator>,
) -> Option<(AppContext, String)> {
    let ctx = ctx.clone()?;
    match dashboard::session_token(ctx.session.as_ref()) {
        Ok(token) => Some((ctx, token)),
        Err(err) => {
            log::warn!("leaving dashboard: {err}");
            if let Some(navigator) = navigator {
                navigator.push(&Route::Login);
            }
            None
        }
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let state = use_reducer(DashboardState::default);

    let expense_form = use_state(InFlight::default);
    let category_form = use_state(InFlight::default);
    let filter_form = use_state(InFlight::default);
    let expense_generation = use_state(RequestGeneration::default);
    let category_generation = use_state(RequestGeneration::default);

    {
        let ctx = ctx.clone();
        let navigator = navigator.clone();
        let dispatcher = state.dispatcher();
        let expense_generation = (*expense_generation).clone();
        let category_generation = (*category_generation).clone();
        use_effect_with_deps(
            move |_| {
                let expense_ticket = expense_generation.issue();
                let category_ticket = category_generation.issue();
                if let Some(ctx) = ctx {
                    spawn_local(async move {
                        match dashboard::load(ctx.api.as_ref(), ctx.session.as_ref()).await {
                            Ok(data) => dispatcher.dispatch(DashboardAction::Loaded {
                                data,
                                category_ticket,
                                expense_ticket,
                            }),
                            Err(err) => {
                                let next = exit_route(&err, &expense_ticket);
                                if let (Some(route), Some(navigator)) = (next, navigator) {
                                    navigator.push(&route);
                                }
                            }
                        }
                    });
                }
                move || {
                    expense_generation.invalidate();
                    category_generation.invalidate();
                }
            },
            (),
        );
    }

    let on_add_expense = {
        let ctx = ctx.clone();
        let navigator = navigator.clone();
        let state = state.clone();
        let in_flight = (*expense_form).clone();
        let generation = (*expense_generation).clone();
        Callback::from(move |_| {
            let Some((ctx, token)) = signed_in(&ctx, &navigator) else {
                return;
            };
            let Some(guard) = in_flight.try_begin() else {
                log::debug!("expense submission already in progress");
                return;
            };
            let form = state.form.clone();
            let ticket = generation.issue();
            state.dispatch(DashboardAction::ExpenseSubmitting);

            let dispatcher = state.dispatcher();
            spawn_local(async move {
                let result = dashboard::add_expense(ctx.api.as_ref(), &token, &form, Utc::now()).await;
                drop(guard);
                match result {
                    Ok(refreshed) => {
                        dispatcher.dispatch(DashboardAction::ExpenseSaved { ticket, refreshed })
                    }
                    Err(err) => {
                        log::warn!("creating expense failed: {err}");
                        dispatcher.dispatch(DashboardAction::ExpenseFailed);
                    }
                }
            });
        })
    };

    let on_add_category = {
        let ctx = ctx.clone();
        let navigator = navigator.clone();
        let state = state.clone();
        let in_flight = (*category_form).clone();
        let generation = (*category_generation).clone();
        Callback::from(move |_| {
            let Some((ctx, token)) = signed_in(&ctx, &navigator) else {
                return;
            };
            let Some(guard) = in_flight.try_begin() else {
                log::debug!("category submission already in progress");
                return;
            };
            let name = state.new_category.clone();
            let ticket = generation.issue();
            state.dispatch(DashboardAction::CategorySubmitting);

            let dispatcher = state.dispatcher();
            spawn_local(async move {
                let result = dashboard::add_category(ctx.api.as_ref(), &token, &name).await;
                drop(guard);
                match result {
                    Ok(refreshed) => {
                        dispatcher.dispatch(DashboardAction::CategorySaved { ticket, refreshed })
                    }
                    Err(err) => {
                        log::warn!("creating category failed: {err}");
                        dispatcher.dispatch(DashboardAction::CategoryFailed);
                    }
                }
            });
        })
    };

    let on_filter = {
        let ctx = ctx.clone();
        let navigator = navigator.clone();
        let state = state.clone();
        let in_flight = (*filter_form).clone();
        let generation = (*expense_generation).clone();
        Callback::from(move |_| {
            let Some(query) = state.filter.query() else {
                return;
            };
            let Some((ctx, token)) = signed_in(&ctx, &navigator) else {
                return;
            };
            let Some(guard) = in_flight.try_begin() else {
                log::debug!("filter already in progress");
                return;
            };
            let ticket = generation.issue();
            state.dispatch(DashboardAction::Filtering);

            let dispatcher = state.dispatcher();
            spawn_local(async move {
                let result = dashboard::apply_filter(ctx.api.as_ref(), &token, &query).await;
                drop(guard);
                let expenses = match result {
                    Ok(list) => Some(list),
                    Err(err) => {
                        log::warn!("filtering expenses failed: {err}");
                        None
                    }
                };
                dispatcher.dispatch(DashboardAction::Filtered { ticket, expenses });
            });
        })
    };

    let on_logout = {
        let navigator = navigator.clone();
        Callback::from(move |_| {
            if let (Some(ctx), Some(navigator)) = (&ctx, &navigator) {
                let next = auth::logout(ctx.session.as_ref());
                navigator.push(&next);
            }
        })
    };

    let on_dismiss = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(DashboardAction::DismissNotice))
    };

    let input_class = "bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none";

    html! {
        <div class="max-w-5xl mx-auto mt-8 px-6 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold text-[#173E63]">{"Dashboard"}</h1>
                <button onclick={on_logout} class="px-4 py-2 rounded-[10px] border border-red-500 text-red-500 text-sm font-bold">
                    {"Logout"}
                </button>
            </div>

            if let Some(msg) = state.notice {
                <div class="flex items-center justify-between bg-red-50 text-red-600 text-sm rounded-[10px] px-4 py-3">
                    <span>{ msg }</span>
                    <button onclick={on_dismiss} class="font-bold">{"Dismiss"}</button>
                </div>
            }

            <div class="flex gap-3 items-end">
                <input type="text" placeholder="Title" class={input_class}
                    value={state.form.title.clone()} oninput={edit_input(&state, Field::Title)} />
                <input type="number" placeholder="Amount" class={input_class}
                    value={state.form.amount.clone()} oninput={edit_input(&state, Field::Amount)} />
                <select class={input_class} onchange={edit_select(&state, Field::Category)}>
                    { for state.categories.iter().map(|cat| html! {
                        <option key={cat.id.clone()} value={cat.id.clone()} selected={cat.id == state.form.category_id}>
                            { cat.name.clone() }
                        </option>
                    }) }
                </select>
                <button onclick={on_add_expense} disabled={state.saving_expense}
                    class="bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-sm font-bold">
                    { if state.saving_expense { "Saving..." } else { "Add Expense" } }
                </button>
            </div>

            <div class="flex gap-3 items-end">
                <input type="text" placeholder="New Category" class={input_class}
                    value={state.new_category.clone()} oninput={edit_input(&state, Field::NewCategory)} />
                <button onclick={on_add_category} disabled={state.saving_category}
                    class="bg-[#B2CBDE] text-[#173E63] px-4 py-2 rounded-[10px] text-sm font-bold">
                    { if state.saving_category { "Saving..." } else { "Add Category" } }
                </button>
            </div>

            <div class="flex gap-3 items-end">
                <label class="flex flex-col text-[12px] font-bold text-muted-foreground">
                    {"From"}
                    <input type="date" class={input_class}
                        value={state.filter.from_date.clone()} oninput={edit_input(&state, Field::FromDate)} />
                </label>
                <label class="flex flex-col text-[12px] font-bold text-muted-foreground">
                    {"To"}
                    <input type="date" class={input_class}
                        value={state.filter.to_date.clone()} oninput={edit_input(&state, Field::ToDate)} />
                </label>
                <select class={input_class} onchange={edit_select(&state, Field::FilterCategory)}>
                    <option value="" selected={state.filter.category_id.is_empty()}>{"Category"}</option>
                    <option value={ALL_CATEGORIES} selected={state.filter.category_id == ALL_CATEGORIES}>{"All"}</option>
                    { for state.categories.iter().map(|cat| html! {
                        <option key={cat.id.clone()} value={cat.id.clone()} selected={cat.id == state.filter.category_id}>
                            { cat.name.clone() }
                        </option>
                    }) }
                </select>
                <button onclick={on_filter} disabled={state.filtering}
                    class="bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-sm font-bold">
                    {"Filter"}
                </button>
            </div>

            <ul class="divide-y divide-border">
                { for state.expenses.iter().enumerate().map(|(idx, expense)| html! {
                    <li key={idx} class="py-2 text-sm text-foreground">{ format::expense_line_local(expense) }</li>
                }) }
            </ul>
        </div>
    }
}
