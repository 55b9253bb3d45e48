use std::str::FromStr;

use drag_admin_shared::ResourceKind;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{components::side_nav::SideNav, pages};

#[derive(Routable, Clone, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,

    /// `/performers`, `/venues`, `/events`, `/reviews`, `/media`.
    #[at("/:resource")]
    Resource { resource: String },

    /// `/venues/65f0...`: one record, for kinds with a detail endpoint.
    #[at("/:resource/:id")]
    Detail { resource: String, id: String },

    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub fn for_kind(kind: ResourceKind) -> Self {
        Route::Resource {
            resource: kind.label().to_ascii_lowercase(),
        }
    }

    pub fn detail(kind: ResourceKind, id: &str) -> Self {
        Route::Detail {
            resource: kind.label().to_ascii_lowercase(),
            id: id.to_string(),
        }
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Redirect<Route> to={Route::for_kind(ResourceKind::Performer)} /> },
        Route::Resource {
            resource,
        } => match ResourceKind::from_str(&resource) {
            // keyed so that switching resources remounts the page with fresh state
            Ok(kind) => html! { <pages::resource_list::ResourceListPage key={kind.slug()} kind={kind} /> },
            Err(_) => html! { <pages::not_found::NotFoundPage /> },
        },
        Route::Detail {
            resource,
            id,
        } => match ResourceKind::from_str(&resource) {
            Ok(kind) if kind.has_detail() => html! {
                <pages::resource_detail::ResourceDetailPage
                    key={format!("{}-{id}", kind.slug())}
                    kind={kind}
                    id={id.clone()}
                />
            },
            _ => html! { <pages::not_found::NotFoundPage /> },
        },
        Route::NotFound => html! { <pages::not_found::NotFoundPage /> },
    }
}

#[function_component(AppRouter)]
pub fn app_router() -> Html {
    html! {
        <BrowserRouter>
            <div class="flex bg-[var(--bg)]" style="min-height: 100vh; min-height: 100svh;">
                <SideNav />
                <div class="flex-1 px-[var(--space-md)] pt-[var(--space-sm)]">
                    <Switch<Route> render={switch} />
                </div>
            </div>
        </BrowserRouter>
    }
}
