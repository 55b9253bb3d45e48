use drag_admin_shared::ResourceKind;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

/// One link per moderated resource; the current one is highlighted.
#[function_component(SideNav)]
pub fn side_nav() -> Html {
    let route = use_route::<Route>();

    let link_classes = |active: bool| {
        let base = classes!(
            "block",
            "rounded-lg",
            "px-3",
            "py-2",
            "text-sm",
            "font-semibold",
            "transition-colors",
            "duration-200"
        );
        if active {
            classes!(base, "bg-[var(--primary)]", "text-white")
        } else {
            classes!(base, "text-[var(--text)]", "hover:bg-[var(--surface-alt)]", "hover:text-[var(--primary)]")
        }
    };

    html! {
        <nav
            class={classes!("w-56", "shrink-0", "border-r", "border-[var(--border)]", "p-4", "space-y-1")}
            aria-label="Admin sections"
        >
            <p class={classes!("mb-4", "text-xs", "uppercase", "tracking-[0.12em]", "text-[var(--muted)]")}>
                { "Moderation" }
            </p>
            { for ResourceKind::ALL.into_iter().map(|kind| {
                let target = Route::for_kind(kind);
                let active = route.as_ref() == Some(&target);
                html! {
                    <Link<Route> to={target} classes={link_classes(active)}>
                        { kind.label() }
                    </Link<Route>>
                }
            }) }
        </nav>
    }
}
