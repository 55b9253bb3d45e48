//! Browser admin console for moderating drag listings.

mod api;
mod components;
mod config;
/// State hooks backing the resource list pages.
pub mod hooks;
mod pages;
mod router;
mod utils;

use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    html! {
        <>
            <router::AppRouter />
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
