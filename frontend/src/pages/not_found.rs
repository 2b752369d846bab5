use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="flex h-full items-center justify-center p-6">
            <div class="text-center">
                <h1 class="mb-2 text-6xl font-bold text-gray-600">{"404"}</h1>
                <p class="mb-6 text-lg text-gray-300">{"This page isn't available. Sorry about that."}</p>
                <Link<Route> to={Route::Home} classes="rounded-full bg-white px-5 py-2 text-sm font-semibold text-black hover:bg-gray-200">
                    {"Go to home"}
                </Link<Route>>
            </div>
        </div>
    }
}
