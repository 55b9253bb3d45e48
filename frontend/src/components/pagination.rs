use drag_admin_shared::{PageRequest, PageSlot, PaginationModel};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub current_page: u32,
    pub total_pages: u32,
    /// Records on the page being shown; an empty page never navigates.
    pub item_count: usize,
    /// While a read is in flight every control is disabled.
    #[prop_or(false)]
    pub loading: bool,
    pub on_page_change: Callback<u32>,
}

#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    let model = PaginationModel::new(
        props.current_page,
        props.total_pages,
        props.item_count,
        props.loading,
    );
    if model.is_hidden() {
        return Html::default();
    }

    let current_page = model.current_page();
    let slots = model.slots();
    let prev_disabled = !model.can_go_previous();
    let next_disabled = !model.can_go_next();

    let request = {
        let on_page_change = props.on_page_change.clone();
        move |request: PageRequest| {
            if let Some(page) = model.request(request) {
                on_page_change.emit(page);
            }
        }
    };

    let prev_onclick = {
        let request = request.clone();
        Callback::from(move |_| request(PageRequest::Previous))
    };

    let next_onclick = {
        let request = request.clone();
        Callback::from(move |_| request(PageRequest::Next))
    };

    let base_btn_classes = classes!(
        "inline-flex",
        "items-center",
        "justify-center",
        "min-w-[2.5rem]",
        "h-10",
        "px-3",
        "rounded-lg",
        "border",
        "border-[var(--border)]",
        "bg-[rgba(var(--surface-rgb),0.95)]",
        "text-[var(--text)]",
        "text-sm",
        "font-semibold",
        "ring-1",
        "ring-[rgba(15,23,42,0.08)]",
        "dark:ring-[rgba(255,255,255,0.08)]",
        "shadow-sm",
        "transition-all",
        "duration-200",
        "ease-[var(--ease-spring)]",
        "hover:-translate-y-[1px]",
        "hover:shadow-[var(--shadow)]",
        "hover:border-[var(--primary)]",
        "hover:text-[var(--primary)]",
        "disabled:opacity-50",
        "disabled:cursor-not-allowed",
        "disabled:hover:translate-y-0",
        "disabled:hover:shadow-none"
    );

    let prev_classes = classes!(base_btn_classes.clone(), "min-w-[2.75rem]");

    let next_classes = classes!(base_btn_classes.clone(), "min-w-[2.75rem]");

    html! {
        <nav class="flex flex-wrap items-center gap-3" aria-label="Pagination">
            <button
                type="button"
                class={prev_classes}
                disabled={prev_disabled}
                onclick={prev_onclick}
                aria-label="Previous page"
            >
                {"<"}
            </button>
            <div class={classes!("flex", "flex-wrap", "items-center", "gap-2")}>
                { for slots.into_iter().map(|slot| match slot {
                    PageSlot::Page(page) => {
                        let page_classes = classes!(
                            base_btn_classes.clone(),
                            "min-w-[2.75rem]",
                            if page == current_page {
                                "bg-[var(--primary)] text-white border-transparent ring-[rgba(var(--primary-rgb),0.45)] drop-shadow-[0_10px_25px_rgba(var(--primary-rgb),0.4)] cursor-default pointer-events-none"
                            } else {
                                ""
                            }
                        );
                        let onclick = {
                            let request = request.clone();
                            Callback::from(move |_| request(PageRequest::Page(page)))
                        };

                        html! {
                            <button
                                key={format!("page-{page}")}
                                type="button"
                                class={page_classes.clone()}
                                aria-label={format!("Go to page {page}")}
                                aria-current={if page == current_page {
                                    Some(AttrValue::from("page"))
                                } else {
                                    None
                                }}
                                disabled={page == current_page || props.loading}
                                onclick={onclick}
                            >
                                { page }
                            </button>
                        }
                    }
                    PageSlot::Ellipsis(id) => {
                        let ellipsis_classes = classes!(
                            base_btn_classes.clone(),
                            "select-none",
                            "cursor-default",
                            "opacity-60",
                            "pointer-events-none"
                        );
                        html! {
                            <span
                                key={format!("ellipsis-{id}-{current_page}")}
                                class={ellipsis_classes}
                                aria-hidden="true"
                            >
                                {"..."}
                            </span>
                        }
                    }
                }) }
            </div>
            <button
                type="button"
                class={next_classes}
                disabled={next_disabled}
                onclick={next_onclick}
                aria-label="Next page"
            >
                {">"}
            </button>
        </nav>
    }
}
