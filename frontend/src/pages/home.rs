use crate::components::feed::VideoFeed;
use crate::config::HOME_LOAD_DELAY_MS;
use crate::data::api::load_all_videos;
use crate::data::utils::filter_videos;
use crate::hooks::use_request_guard;
use crate::models::Video;
use crate::router::HomeQuery;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let videos = use_state(Vec::<Video>::new);
    let loading = use_state(|| true);
    let guard = use_request_guard();
    let query = use_location()
        .and_then(|location| location.query::<HomeQuery>().ok())
        .and_then(|query| query.q)
        .unwrap_or_default();

    {
        let videos = videos.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            let ticket = guard.begin();
            wasm_bindgen_futures::spawn_local(async move {
                let all = load_all_videos().await;
                log::info!("Loaded {} videos", all.len());
                if ticket.is_current() {
                    videos.set(all);
                    loading.set(false);
                }
            });
            || ()
        });
    }

    let shown = filter_videos(&videos, &query);
    let empty_message = if query.trim().is_empty() {
        AttrValue::from("No videos found.")
    } else {
        AttrValue::from(format!("No results for \"{}\"", query.trim()))
    };

    html! {
        <div class="flex h-full flex-col">
            if !query.trim().is_empty() {
                <p class="px-5 pt-4 text-sm text-gray-400">{ format!("Results for \"{}\"", query.trim()) }</p>
            }
            <div class="min-h-0 flex-1">
                <VideoFeed
                    videos={shown}
                    loading={*loading}
                    load_delay_ms={HOME_LOAD_DELAY_MS}
                    empty_message={Some(empty_message)} />
            </div>
        </div>
    }
}
