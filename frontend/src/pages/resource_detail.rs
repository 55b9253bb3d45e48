use std::{cell::RefCell, rc::Rc};

use drag_admin_shared::{
    datetime::{format_date, format_date_time, offset_label},
    moderation::action_allowed,
    ActionKind, ActionTracker, ApiError, Notification, ResourceKind, ResourceRecord,
};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    api,
    components::{
        loading_spinner::{LoadingSpinner, SpinnerSize},
        notice_banner::NoticeStack,
    },
    pages::resource_list::action_label,
    router::Route,
    utils::{browser_offset, field_text, status_badge_class},
};

/// Fields that are shown in the header or carry no meaning for staff.
const HIDDEN_FIELDS: &[&str] = &["_id", "id", "__v", "password", "status", "isFeatured"];

/// Timestamp fields rendered as dates in the viewer's offset.
const DATE_FIELDS: &[&str] = &["createdAt", "updatedAt", "startDate", "dragAnniversary", "date"];

#[derive(Properties, PartialEq)]
pub struct ResourceDetailPageProps {
    pub kind: ResourceKind,
    pub id: String,
}

#[derive(Clone, PartialEq)]
enum Loaded {
    Pending,
    Record(ResourceRecord),
    Failed(ApiError),
}

struct DetailState {
    alive: bool,
    generation: u64,
    loaded: Loaded,
    actions: ActionTracker,
    notices: Vec<(u64, Notification)>,
    next_notice: u64,
}

impl DetailState {
    fn new() -> Self {
        Self {
            alive: true,
            generation: 0,
            loaded: Loaded::Pending,
            actions: ActionTracker::new(),
            notices: Vec::new(),
            next_notice: 0,
        }
    }

    fn notify(&mut self, notice: Notification) {
        self.next_notice += 1;
        self.notices.push((self.next_notice, notice));
    }
}

/// (Re)load the record. Only the newest load lands, and nothing lands or
/// starts once the page is gone.
fn load(kind: ResourceKind, id: String, state: Rc<RefCell<DetailState>>, rerender: Rc<dyn Fn()>) {
    let generation = {
        let mut s = state.borrow_mut();
        if !s.alive {
            return;
        }
        s.generation += 1;
        s.generation
    };

    wasm_bindgen_futures::spawn_local(async move {
        let result = api::fetch_resource_detail(kind, &id).await;
        {
            let mut s = state.borrow_mut();
            if !s.alive || s.generation != generation {
                return;
            }
            s.loaded = match result {
                Ok(record) => Loaded::Record(record),
                Err(err) => {
                    web_sys::console::error_1(&format!("Failed to load {kind} {id}: {err}").into());
                    Loaded::Failed(err)
                },
            };
        }
        rerender();
    });
}

fn render_fields(kind: ResourceKind, record: &ResourceRecord) -> Html {
    let offset = browser_offset();
    let Some(fields) = record.as_json().as_object() else {
        return Html::default();
    };

    html! {
        <dl class={classes!("grid", "grid-cols-1", "md:grid-cols-[12rem_1fr]", "gap-x-6", "gap-y-3", "text-sm")}>
            { for fields.iter().filter(|(key, _)| !HIDDEN_FIELDS.contains(&key.as_str())).map(|(key, value)| {
                let text = match value.as_str() {
                    Some(raw) if kind == ResourceKind::Event && key == kind.date_field() => {
                        format_date_time(raw, offset)
                    },
                    Some(raw) if DATE_FIELDS.contains(&key.as_str()) => format_date(raw, offset),
                    _ => field_text(value),
                };
                html! {
                    <>
                        <dt class={classes!("text-[var(--muted)]")}>{ key.clone() }</dt>
                        <dd class={classes!("break-words")}>{ text }</dd>
                    </>
                }
            }) }
        </dl>
    }
}

#[function_component(ResourceDetailPage)]
pub fn resource_detail_page(props: &ResourceDetailPageProps) -> Html {
    let kind = props.kind;
    let id = props.id.clone();
    let state = use_mut_ref(DetailState::new);
    let force = use_force_update();
    let rerender: Rc<dyn Fn()> = Rc::new(move || force.force_update());

    {
        let state = state.clone();
        let rerender = rerender.clone();
        let id = id.clone();
        use_effect_with((), move |_| {
            load(kind, id, state.clone(), rerender);
            move || state.borrow_mut().alive = false
        });
    }

    let on_retry = {
        let state = state.clone();
        let rerender = rerender.clone();
        let id = id.clone();
        Callback::from(move |_| {
            state.borrow_mut().loaded = Loaded::Pending;
            rerender();
            load(kind, id.clone(), state.clone(), rerender.clone());
        })
    };

    let on_action = {
        let state = state.clone();
        let rerender = rerender.clone();
        let id = id.clone();
        Callback::from(move |action: ActionKind| {
            {
                let mut s = state.borrow_mut();
                let allowed = match &s.loaded {
                    Loaded::Record(record) => action_allowed(kind, record, action),
                    _ => false,
                };
                if !allowed || !s.actions.begin(&id, action) {
                    return;
                }
            }
            rerender();

            let state = state.clone();
            let rerender = rerender.clone();
            let id = id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::run_action(kind, &id, action).await;
                {
                    let mut s = state.borrow_mut();
                    if !s.alive {
                        return;
                    }
                    s.actions.finish(&id);
                    match &result {
                        Ok(()) => s.notify(Notification::action_succeeded(kind, action)),
                        Err(err) => {
                            web_sys::console::error_1(&format!("{action} {id} failed: {err}").into());
                            s.notify(Notification::action_failed(kind, action, &id, err));
                        },
                    }
                }
                rerender();
                if result.is_ok() {
                    load(kind, id, state, rerender);
                }
            });
        })
    };

    let on_dismiss = {
        let state = state.clone();
        let rerender = rerender.clone();
        Callback::from(move |notice_id: u64| {
            state.borrow_mut().notices.retain(|(id, _)| *id != notice_id);
            rerender();
        })
    };

    let s = state.borrow();
    let busy = s.actions.busy_kind(&id);

    let body = match &s.loaded {
        Loaded::Pending => html! { <LoadingSpinner size={SpinnerSize::Medium} /> },
        Loaded::Failed(err) => html! {
            <div class={classes!("py-10", "text-center", "space-y-3")} role="alert">
                <p class={classes!("text-red-600", "dark:text-red-300")}>
                    { format!("Could not load this {}: {err}", kind.slug()) }
                </p>
                <button type="button" class={classes!("underline", "text-[var(--primary)]")} onclick={on_retry}>
                    { "Retry" }
                </button>
            </div>
        },
        Loaded::Record(record) => {
            let status = record.status();
            let mut actions = vec![ActionKind::Approve, ActionKind::Reject];
            if kind.supports_featuring() {
                actions.push(if record.is_featured() {
                    ActionKind::Unfeature
                } else {
                    ActionKind::Feature
                });
            }
            html! {
                <article class={classes!("space-y-6")}>
                    <header class={classes!("flex", "flex-wrap", "items-center", "gap-3")}>
                        <h1 class={classes!("text-2xl", "font-bold")}>{ record.display_name() }</h1>
                        <span class={status_badge_class(status)}>{ status.as_str() }</span>
                        if record.is_featured() {
                            <span class={classes!("text-xs", "font-semibold", "text-[var(--primary)]")}>{ "Featured" }</span>
                        }
                    </header>
                    <div class={classes!("flex", "gap-2", "flex-wrap")}>
                        { for actions.into_iter().map(|action| {
                            let onclick = {
                                let on_action = on_action.clone();
                                Callback::from(move |_| on_action.emit(action))
                            };
                            html! {
                                <button
                                    type="button"
                                    class={classes!(
                                        "inline-flex", "items-center", "justify-center", "min-w-[5.5rem]", "h-8", "px-3",
                                        "rounded-lg", "border", "border-[var(--border)]", "text-xs", "font-semibold",
                                        "disabled:opacity-50", "disabled:cursor-not-allowed"
                                    )}
                                    disabled={busy.is_some() || !action_allowed(kind, record, action)}
                                    aria-busy={(busy == Some(action)).to_string()}
                                    onclick={onclick}
                                >
                                    if busy == Some(action) {
                                        <LoadingSpinner size={SpinnerSize::Small} />
                                    } else {
                                        { action_label(action) }
                                    }
                                </button>
                            }
                        }) }
                    </div>
                    { render_fields(kind, record) }
                    <p class={classes!("text-xs", "text-[var(--muted)]")}>
                        { format!("Times shown in {}", offset_label(browser_offset())) }
                    </p>
                </article>
            }
        },
    };

    html! {
        <main class={classes!("py-6", "space-y-5")}>
            <NoticeStack notices={s.notices.clone()} on_dismiss={on_dismiss} />
            <Link<Route> to={Route::for_kind(kind)} classes={classes!("text-sm", "underline", "text-[var(--muted)]")}>
                { format!("Back to {}", kind.label().to_ascii_lowercase()) }
            </Link<Route>>
            { body }
        </main>
    }
}
