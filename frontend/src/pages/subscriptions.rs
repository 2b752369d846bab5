use crate::components::feed::VideoFeed;
use crate::config::FEED_LOAD_DELAY_MS;
use crate::data::api::load_all_videos;
use crate::data::utils::assign_subscribed_channels;
use crate::hooks::{use_interactions, use_request_guard, use_subscription_revision};
use crate::models::Video;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(SubscriptionsPage)]
pub fn subscriptions_page() -> Html {
    let videos = use_state(Vec::<Video>::new);
    let subscribed = use_state(Vec::<String>::new);
    let loading = use_state(|| true);
    let interactions = use_interactions();
    let revision = use_subscription_revision();
    let guard = use_request_guard();

    {
        let videos = videos.clone();
        let subscribed = subscribed.clone();
        let loading = loading.clone();
        use_effect_with(revision, move |_| {
            let channels = interactions.subscribed_channels();
            subscribed.set(channels.clone());
            let ticket = guard.begin();

            if channels.is_empty() {
                videos.set(Vec::new());
                loading.set(false);
            } else {
                loading.set(true);
                wasm_bindgen_futures::spawn_local(async move {
                    let feed = assign_subscribed_channels(load_all_videos().await, &channels);
                    if ticket.is_current() {
                        videos.set(feed);
                        loading.set(false);
                    }
                });
            }
            || ()
        });
    }

    if !*loading && subscribed.is_empty() {
        return html! {
            <div class="flex h-full flex-col items-center justify-center gap-3 p-6 text-center">
                <span class="text-5xl">{"📺"}</span>
                <h2 class="text-xl font-semibold">{"No subscriptions yet"}</h2>
                <p class="max-w-sm text-sm text-gray-400">
                    {"Subscribe to channels from a video page and their latest uploads will show up here."}
                </p>
                <Link<Route> to={Route::Home} classes="mt-2 rounded-full bg-white px-4 py-2 text-sm font-semibold text-black hover:bg-gray-200">
                    {"Browse videos"}
                </Link<Route>>
            </div>
        };
    }

    html! {
        <div class="flex h-full flex-col">
            <div class="px-5 pt-4">
                <h1 class="text-2xl font-semibold">{"Subscriptions"}</h1>
                <p class="text-sm text-gray-400">{ format!("{} channels", subscribed.len()) }</p>
            </div>
            <div class="min-h-0 flex-1">
                <VideoFeed videos={(*videos).clone()} loading={*loading} load_delay_ms={FEED_LOAD_DELAY_MS} />
            </div>
        </div>
    }
}
