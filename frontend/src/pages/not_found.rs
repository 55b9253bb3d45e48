use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <main>
            <h2>{"404 - Page not found"}</h2>
            <p>{"There is no admin screen at this address."}</p>
            <Link<Route> to={Route::Home}>{"Back to the dashboard"}</Link<Route>>
        </main>
    }
}
