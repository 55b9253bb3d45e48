use chrono::FixedOffset;
use drag_admin_shared::{
    datetime::{format_date, format_date_time, offset_label},
    moderation::{action_allowed, action_supported},
    ActionKind, ListView, PageResult, ResourceKind, ResourceRecord,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    components::{
        loading_spinner::{LoadingSpinner, SpinnerSize},
        notice_banner::NoticeStack,
        pagination::Pagination,
    },
    hooks::{use_resource_list, ResourceListHandle},
    router::Route,
    utils::{browser_offset, status_badge_class},
};

#[derive(Properties, PartialEq)]
pub struct ResourceListPageProps {
    pub kind: ResourceKind,
}

pub fn action_label(action: ActionKind) -> &'static str {
    match action {
        ActionKind::Approve => "Approve",
        ActionKind::Reject => "Reject",
        ActionKind::Delete => "Delete",
        ActionKind::Feature => "Feature",
        ActionKind::Unfeature => "Unfeature",
    }
}

fn option_label(option: &str) -> String {
    let mut chars = option.chars();
    match chars.next() {
        Some(first) => format!("{}{}s", first.to_ascii_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

fn confirm_delete(kind: ResourceKind, name: &str) -> bool {
    web_sys::window()
        .and_then(|window| {
            window
                .confirm_with_message(&format!("Delete {} \"{name}\"? This cannot be undone.", kind.slug()))
                .ok()
        })
        .unwrap_or(false)
}

fn action_button(list: &ResourceListHandle, record: &ResourceRecord, id: &str, action: ActionKind) -> Html {
    let kind = list.kind;
    let busy = list.actions.is_busy(id);
    let busy_with = list.actions.is_busy_with(id, action);
    let disabled = busy || !action_allowed(kind, record, action);

    let onclick = {
        let on_action = list.on_action.clone();
        let id = id.to_string();
        let name = record.display_name();
        Callback::from(move |_| {
            if action == ActionKind::Delete && !confirm_delete(kind, &name) {
                return;
            }
            on_action.emit((id.clone(), action));
        })
    };

    let tone = match action {
        ActionKind::Approve | ActionKind::Feature => "hover:border-emerald-500 hover:text-emerald-600",
        ActionKind::Reject | ActionKind::Unfeature => "hover:border-amber-500 hover:text-amber-600",
        ActionKind::Delete => "hover:border-red-500 hover:text-red-600",
    };

    html! {
        <button
            type="button"
            class={classes!(
                "inline-flex",
                "items-center",
                "justify-center",
                "min-w-[5.5rem]",
                "h-8",
                "px-3",
                "rounded-lg",
                "border",
                "border-[var(--border)]",
                "text-xs",
                "font-semibold",
                "transition-colors",
                "disabled:opacity-50",
                "disabled:cursor-not-allowed",
                tone
            )}
            disabled={disabled}
            aria-busy={busy_with.to_string()}
            onclick={onclick}
        >
            if busy_with {
                <LoadingSpinner size={SpinnerSize::Small} />
            } else {
                { action_label(action) }
            }
        </button>
    }
}

fn render_rows(list: &ResourceListHandle, page: &PageResult, offset: FixedOffset) -> Html {
    let kind = list.kind;
    let featuring = kind.supports_featuring();
    let mut actions = vec![ActionKind::Approve, ActionKind::Reject];
    if action_supported(kind, ActionKind::Delete) {
        actions.push(ActionKind::Delete);
    }

    html! {
        <tbody>
            { for page.items.iter().map(|record| {
                let Some(id) = record.id() else {
                    return Html::default();
                };
                let status = record.status();
                let when = record.str_field(kind.date_field()).unwrap_or_default();
                let date = if kind == ResourceKind::Event {
                    format_date_time(when, offset)
                } else {
                    format_date(when, offset)
                };
                let feature_action = if record.is_featured() {
                    ActionKind::Unfeature
                } else {
                    ActionKind::Feature
                };

                html! {
                    <tr key={id.to_string()} class={classes!("border-t", "border-[var(--border)]")}>
                        <td class={classes!("py-2", "pr-3", "font-medium")}>
                            if kind.has_detail() {
                                <Link<Route>
                                    to={Route::detail(kind, id)}
                                    classes={classes!("hover:text-[var(--primary)]", "hover:underline")}
                                >
                                    { record.display_name() }
                                </Link<Route>>
                            } else {
                                { record.display_name() }
                            }
                        </td>
                        <td class={classes!("py-2", "pr-3")}>
                            <span class={status_badge_class(status)}>{ status.as_str() }</span>
                        </td>
                        <td class={classes!("py-2", "pr-3", "whitespace-nowrap")}>{ date }</td>
                        if featuring {
                            <td class={classes!("py-2", "pr-3")}>
                                { action_button(list, record, id, feature_action) }
                            </td>
                        }
                        <td class={classes!("py-2", "pr-3")}>
                            <div class={classes!("flex", "gap-2", "flex-wrap")}>
                                { for actions.iter().map(|action| action_button(list, record, id, *action)) }
                            </div>
                        </td>
                    </tr>
                }
            }) }
        </tbody>
    }
}

#[function_component(ResourceListPage)]
pub fn resource_list_page(props: &ResourceListPageProps) -> Html {
    let list = use_resource_list(props.kind);
    let kind = list.kind;
    let offset = *use_memo((), |_| browser_offset());
    let filter_draft = use_state(|| list.controller.filter().unwrap_or_default().to_string());

    let on_filter_input = {
        let filter_draft = filter_draft.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            filter_draft.set(input.value());
        })
    };

    let on_filter_submit = {
        let filter_draft = filter_draft.clone();
        let on_filter = list.on_filter.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_filter.emit((*filter_draft).clone());
        })
    };

    let on_filter_clear = {
        let filter_draft = filter_draft.clone();
        let on_filter = list.on_filter.clone();
        Callback::from(move |_| {
            filter_draft.set(String::new());
            on_filter.emit(String::new());
        })
    };

    let on_filter_select = {
        let filter_draft = filter_draft.clone();
        let on_filter = list.on_filter.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            let value = select.value();
            filter_draft.set(value.clone());
            on_filter.emit(value);
        })
    };

    let tabs = kind.tabs();
    let active_tab = list.controller.tab();

    let body = match list.query.view() {
        ListView::Idle | ListView::Loading => html! { <LoadingSpinner size={SpinnerSize::Medium} /> },
        ListView::Empty => html! {
            <p class={classes!("py-10", "text-center", "text-[var(--muted)]")}>
                { format!("No {} found.", kind.label().to_ascii_lowercase()) }
            </p>
        },
        ListView::Failed(err) => {
            let retry = {
                let on_retry = list.on_retry.clone();
                Callback::from(move |_| on_retry.emit(()))
            };
            html! {
                <div class={classes!("py-10", "text-center", "space-y-3")} role="alert">
                    <p class={classes!("text-red-600", "dark:text-red-300")}>
                        { format!("Could not load {}: {err}", kind.label().to_ascii_lowercase()) }
                    </p>
                    <button type="button" class={classes!("underline", "text-[var(--primary)]")} onclick={retry}>
                        { "Retry" }
                    </button>
                </div>
            }
        },
        ListView::Page {
            page,
            refreshing,
        } => html! {
            <div class={classes!("overflow-x-auto", "transition-opacity", if refreshing { "opacity-60" } else { "" })}>
                <table class={classes!("w-full", "text-sm")}>
                    <thead>
                        <tr class={classes!("text-left", "text-[var(--muted)]")}>
                            <th class={classes!("py-2", "pr-3")}>{ "Name" }</th>
                            <th class={classes!("py-2", "pr-3")}>{ "Status" }</th>
                            <th class={classes!("py-2", "pr-3")}>
                                { if kind == ResourceKind::Event { "Date" } else { "Submitted" } }
                            </th>
                            if kind.supports_featuring() {
                                <th class={classes!("py-2", "pr-3")}>{ "Featured" }</th>
                            }
                            <th class={classes!("py-2", "pr-3")}>{ "Actions" }</th>
                        </tr>
                    </thead>
                    { render_rows(&list, page, offset) }
                </table>
            </div>
        },
    };

    html! {
        <main class={classes!("py-6", "space-y-5")}>
            <NoticeStack notices={list.notices.clone()} on_dismiss={list.on_dismiss.clone()} />

            <header class={classes!("flex", "flex-wrap", "items-end", "justify-between", "gap-3")}>
                <div>
                    <h1 class={classes!("text-2xl", "font-bold")}>{ kind.label() }</h1>
                    <p class={classes!("text-xs", "text-[var(--muted)]")}>
                        { format!("Times shown in {}", offset_label(offset)) }
                    </p>
                </div>
                if !kind.filter_options().is_empty() {
                    <label class={classes!("flex", "items-center", "gap-2", "text-sm")}>
                        { "Submitted by" }
                        <select
                            class={classes!("h-9", "rounded-lg", "border", "border-[var(--border)]", "px-3", "text-sm")}
                            onchange={on_filter_select}
                        >
                            <option value="" selected={list.controller.filter().is_none()}>{ "Everyone" }</option>
                            { for kind.filter_options().iter().map(|option| html! {
                                <option
                                    value={*option}
                                    selected={list.controller.filter() == Some(*option)}
                                >
                                    { option_label(option) }
                                </option>
                            }) }
                        </select>
                    </label>
                } else if kind.filter_field().is_some() {
                    <form class={classes!("flex", "gap-2")} onsubmit={on_filter_submit}>
                        <input
                            type="search"
                            class={classes!("h-9", "rounded-lg", "border", "border-[var(--border)]", "px-3", "text-sm")}
                            placeholder="Filter by location"
                            value={(*filter_draft).clone()}
                            oninput={on_filter_input}
                        />
                        <button type="submit" class={classes!("h-9", "px-3", "rounded-lg", "bg-[var(--primary)]", "text-white", "text-sm")}>
                            { "Apply" }
                        </button>
                        if list.controller.filter().is_some() {
                            <button type="button" class={classes!("h-9", "px-3", "text-sm", "underline")} onclick={on_filter_clear}>
                                { "Clear" }
                            </button>
                        }
                    </form>
                }
            </header>

            if tabs.len() > 1 {
                <div class={classes!("flex", "gap-2", "border-b", "border-[var(--border)]")} role="tablist">
                    { for tabs.iter().map(|tab| {
                        let tab = *tab;
                        let selected = tab == active_tab;
                        let onclick = {
                            let on_tab = list.on_tab.clone();
                            Callback::from(move |_| on_tab.emit(tab))
                        };
                        html! {
                            <button
                                type="button"
                                role="tab"
                                aria-selected={selected.to_string()}
                                class={classes!(
                                    "px-4",
                                    "py-2",
                                    "text-sm",
                                    "font-semibold",
                                    "border-b-2",
                                    if selected { "border-[var(--primary)] text-[var(--primary)]" } else { "border-transparent text-[var(--muted)]" }
                                )}
                                onclick={onclick}
                            >
                                { tab.label() }
                            </button>
                        }
                    }) }
                </div>
            }

            { body }

            <Pagination
                current_page={list.controller.page()}
                total_pages={list.query.total_pages()}
                item_count={list.query.item_count()}
                loading={list.query.is_fetching()}
                on_page_change={list.on_page.clone()}
            />
        </main>
    }
}
