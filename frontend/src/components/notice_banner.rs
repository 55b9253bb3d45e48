use drag_admin_shared::{Notification, NotificationLevel};
use yew::prelude::*;
use yew::use_effect_with;
use yew_hooks::prelude::use_timeout;

#[derive(Properties, PartialEq)]
pub struct NoticeBannerProps {
    pub notice: Notification,
    #[prop_or_default]
    pub on_close: Option<Callback<()>>,
    #[prop_or(true)]
    pub auto_dismiss: bool,
}

#[function_component(NoticeBanner)]
pub fn notice_banner(props: &NoticeBannerProps) -> Html {
    let message = props.notice.message.clone();
    let is_error = props.notice.level == NotificationLevel::Error;
    let is_open = use_state(|| true);

    let dismiss = {
        let is_open = is_open.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_| {
            if !*is_open {
                return;
            }
            is_open.set(false);
            if let Some(cb) = on_close.as_ref() {
                cb.emit(());
            }
        })
    };

    let auto_timeout = {
        let dismiss = dismiss.clone();
        use_timeout(move || dismiss.emit(()), if props.auto_dismiss { 4000 } else { 0 })
    };

    {
        let is_open = is_open.clone();
        use_effect_with(message.clone(), move |_| {
            is_open.set(true);
        });
    }

    {
        let auto_timeout = auto_timeout.clone();
        use_effect_with(
            (*is_open, props.auto_dismiss, message.clone()),
            move |(visible, auto_dismiss, _message)| {
                if *auto_dismiss && *visible {
                    auto_timeout.reset();
                } else {
                    auto_timeout.cancel();
                }
            },
        );
    }

    if message.trim().is_empty() {
        return Html::default();
    }

    let mut wrapper_classes = classes!(
        "notice-banner",
        "flex",
        "items-start",
        "gap-3",
        "rounded-2xl",
        "px-5",
        "py-4",
        "text-sm",
        "shadow-xl",
        "transition-all",
        "duration-300",
        "ease-out",
        "overflow-hidden",
        "w-full",
        "max-w-2xl"
    );

    if is_error {
        wrapper_classes.push("bg-red-500/15");
        wrapper_classes.push("text-red-700");
        wrapper_classes.push("dark:text-red-200");
    } else {
        wrapper_classes.push("bg-emerald-500/15");
        wrapper_classes.push("text-emerald-700");
        wrapper_classes.push("dark:text-emerald-200");
    }

    if *is_open {
        wrapper_classes.push("opacity-100");
        wrapper_classes.push("translate-y-0");
        wrapper_classes.push("scale-100");
        wrapper_classes.push("max-h-48");
    } else {
        wrapper_classes.push("opacity-0");
        wrapper_classes.push("-translate-y-2");
        wrapper_classes.push("scale-95");
        wrapper_classes.push("pointer-events-none");
        wrapper_classes.push("max-h-0");
    }

    let close_button = {
        let dismiss = dismiss.clone();
        Callback::from(move |_| dismiss.emit(()))
    };

    html! {
        <div
            class={wrapper_classes}
            role={if is_error { "alert" } else { "status" }}
            aria-live={if is_error { "assertive" } else { "polite" }}
        >
            <span class="text-2xl" aria-hidden="true">{ if is_error { "⚠️" } else { "✓" } }</span>
            <div class="flex-1 space-y-1">
                <p class="font-semibold text-base">{ if is_error { "Something went wrong" } else { "Done" } }</p>
                <p>{ message }</p>
            </div>
            <button
                type="button"
                class={classes!(
                    "ml-4",
                    "inline-flex",
                    "h-8",
                    "w-8",
                    "items-center",
                    "justify-center",
                    "rounded-full",
                    "bg-transparent",
                    "text-lg",
                    "transition",
                    "duration-200",
                    "hover:bg-black/10",
                    "dark:hover:bg-white/15"
                )}
                aria-label="Dismiss notification"
                onclick={close_button}
            >
                {"×"}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeStackProps {
    pub notices: Vec<(u64, Notification)>,
    pub on_dismiss: Callback<u64>,
}

/// Newest notice last; each one dismisses itself after a few seconds.
#[function_component(NoticeStack)]
pub fn notice_stack(props: &NoticeStackProps) -> Html {
    if props.notices.is_empty() {
        return Html::default();
    }
    html! {
        <div class={classes!("fixed", "top-4", "right-4", "z-50", "flex", "flex-col", "gap-2")}>
            { for props.notices.iter().map(|(id, notice)| {
                let on_close = {
                    let on_dismiss = props.on_dismiss.clone();
                    let id = *id;
                    Callback::from(move |()| on_dismiss.emit(id))
                };
                html! {
                    <NoticeBanner key={*id} notice={notice.clone()} on_close={Some(on_close)} />
                }
            }) }
        </div>
    }
}
