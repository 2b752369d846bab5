use crate::components::layout::{SidebarAction, SidebarContext};
use crate::env_variable_utils::get_app_name;
use crate::router::{HomeQuery, Route};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

/// Text the search box shows for the current `?q=`.
pub fn search_text(query: Option<HomeQuery>) -> String {
    query
        .and_then(|query| query.q)
        .map(|q| q.trim().to_string())
        .unwrap_or_default()
}

#[function_component(SearchBar)]
pub fn search_bar() -> Html {
    let navigator = use_navigator();
    let location = use_location();
    let url_text = search_text(location.and_then(|location| location.query::<HomeQuery>().ok()));
    let current_input = use_state(|| url_text.clone());

    // Back/forward navigation changes the query without remounting
    {
        let current_input = current_input.clone();
        use_effect_with(url_text, move |url_text| {
            current_input.set(url_text.clone());
            || ()
        });
    }

    let on_input = {
        let current_input = current_input.clone();
        Callback::from(move |e: InputEvent| {
            let input_value = e.target_unchecked_into::<HtmlInputElement>().value();
            current_input.set(input_value);
        })
    };

    let on_submit = {
        let current_input = current_input.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(navigator) = &navigator else {
                return;
            };
            let query = current_input.trim().to_string();
            let result = if query.is_empty() {
                navigator.push(&Route::Home);
                Ok(())
            } else {
                navigator.push_with_query(&Route::Home, &HomeQuery { q: Some(query) })
            };
            if let Err(e) = result {
                log::error!("Error navigating to search results: {e}");
            }
        })
    };

    html! {
        <form onsubmit={on_submit} class="mx-4 flex max-w-[640px] flex-1">
            <input
                type="text"
                class="flex-1 rounded-l-full border border-[#303030] bg-[#121212] px-4 py-2 text-white placeholder-gray-500 focus:border-blue-500 focus:outline-none"
                placeholder="Search"
                value={(*current_input).clone()}
                oninput={on_input}
            />
            <button type="submit" title="Search"
                class="rounded-r-full border border-l-0 border-[#303030] bg-[#222222] px-5 text-white hover:bg-[#303030]">
                {"🔍"}
            </button>
        </form>
    }
}

#[function_component(Header)]
pub fn header() -> Html {
    let sidebar = use_context::<SidebarContext>();
    let toggle = Callback::from(move |_: MouseEvent| {
        if let Some(sidebar) = &sidebar {
            sidebar.dispatch(SidebarAction::Toggle);
        }
    });

    html! {
        <header class="flex h-full w-full items-center justify-between bg-[#0f0f0f] px-6">
            <div class="flex items-center gap-4">
                <button type="button" onclick={toggle} title="Menu"
                    class="flex h-10 w-10 items-center justify-center rounded-full text-xl hover:bg-white/10">
                    {"☰"}
                </button>
                <Link<Route> to={Route::Home} classes="flex items-center gap-1 text-lg font-semibold tracking-tight">
                    <span class="rounded-md bg-red-600 px-1.5 text-sm">{"▶"}</span>
                    { get_app_name() }
                </Link<Route>>
            </div>
            <SearchBar />
            <div class="flex h-9 w-9 items-center justify-center rounded-full bg-purple-600 text-sm font-semibold">
                {"U"}
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_box_follows_the_url_query() {
        assert_eq!(search_text(None), "");
        assert_eq!(search_text(Some(HomeQuery { q: None })), "");
        assert_eq!(
            search_text(Some(HomeQuery { q: Some(" rust ".to_string()) })),
            "rust"
        );
    }
}
