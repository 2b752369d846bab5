use crate::components::loaders::SpinnerLoader;
use crate::components::video_card::VerifiedBadge;
use crate::data::api::load_video_by_id;
use crate::data::utils::asset_url;
use crate::hooks::{use_request_guard, use_watch_history};
use crate::models::HistoryItem;
use crate::router::Route;
use crate::storage::group_by_day;
use crate::utils::{format_duration, format_views};
use chrono::{DateTime, Local, Utc};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(HistoryPage)]
pub fn history_page() -> Html {
    let history = use_watch_history();
    let items = use_state(Vec::<HistoryItem>::new);
    let loading = use_state(|| true);
    let paused = use_state(|| history.is_paused());
    let guard = use_request_guard();

    {
        let history = history.clone();
        let items = items.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            let ticket = guard.begin();
            wasm_bindgen_futures::spawn_local(async move {
                let loaded = history.with_details(load_video_by_id).await;
                if ticket.is_current() {
                    items.set(loaded);
                    loading.set(false);
                }
            });
            || ()
        });
    }

    let clear_all = {
        let history = history.clone();
        let items = items.clone();
        Callback::from(move |_: MouseEvent| {
            history.clear();
            items.set(Vec::new());
            log::info!("Watch history cleared");
        })
    };

    let toggle_pause = {
        let history = history.clone();
        let paused = paused.clone();
        Callback::from(move |_: MouseEvent| {
            let next = !*paused;
            history.set_paused(next);
            paused.set(next);
        })
    };

    let remove = {
        let history = history.clone();
        let items = items.clone();
        Callback::from(move |(video_id, watched_at): (String, DateTime<Utc>)| {
            history.remove(&video_id, &watched_at);
            let remaining = items
                .iter()
                .filter(|item| !(item.entry.video_id == video_id && item.entry.watched_at == watched_at))
                .cloned()
                .collect();
            items.set(remaining);
        })
    };

    let content = if *loading {
        html! { <SpinnerLoader text="Loading watch history..." /> }
    } else if items.is_empty() {
        html! {
            <div class="py-16 text-center">
                <p class="text-gray-400">{"No watch history yet"}</p>
                <p class="mt-1 text-sm text-gray-500">{"Videos you watch will show up here"}</p>
            </div>
        }
    } else {
        let groups = group_by_day(&items, &Local::now());
        html! {
            <div class="flex flex-col gap-8">
                { for groups.into_iter().map(|group| html! {
                    <section key={group.label.clone()}>
                        <h2 class="mb-4 text-xl font-semibold">{ &group.label }</h2>
                        <div class="flex flex-col gap-3">
                            { for group.items.iter().map(|item| html! {
                                <HistoryRow key={format!("{}-{}", item.entry.video_id, item.entry.watched_at)}
                                    item={item.clone()} on_remove={remove.clone()} />
                            })}
                        </div>
                    </section>
                })}
            </div>
        }
    };

    html! {
        <div class="custom-scrollbar mx-auto h-full w-full max-w-[1200px] overflow-y-auto p-5">
            <div class="mb-8 flex flex-col gap-5">
                <h1 class="text-3xl font-normal md:text-4xl">{"Watch history"}</h1>
                <div class="flex flex-wrap gap-3">
                    <button type="button" onclick={clear_all}
                        class="rounded-full bg-white/10 px-4 py-2 text-sm hover:bg-white/20">
                        {"🗑 Clear all watch history"}
                    </button>
                    <button type="button" onclick={toggle_pause}
                        class="rounded-full bg-white/10 px-4 py-2 text-sm hover:bg-white/20">
                        { if *paused { "▶ Resume watch history" } else { "⏸ Pause watch history" } }
                    </button>
                </div>
                if *paused {
                    <p class="text-sm text-yellow-300">{"Watch history is paused. New videos won't be recorded."}</p>
                }
            </div>
            { content }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HistoryRowProps {
    item: HistoryItem,
    on_remove: Callback<(String, DateTime<Utc>)>,
}

#[function_component(HistoryRow)]
fn history_row(props: &HistoryRowProps) -> Html {
    let HistoryItem { entry, video } = &props.item;
    let on_remove = {
        let on_remove = props.on_remove.clone();
        let video_id = entry.video_id.clone();
        let watched_at = entry.watched_at;
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_remove.emit((video_id.clone(), watched_at));
        })
    };
    let watched_at = entry.watched_at.with_timezone(&Local).format("%-I:%M %p").to_string();

    html! {
        <div class="group relative flex gap-4 rounded-xl p-2 hover:bg-white/5">
            <Link<Route> to={Route::Watch { id: entry.video_id.clone() }} classes="flex min-w-0 flex-1 gap-4">
                <div class="relative aspect-video w-[246px] shrink-0 overflow-hidden rounded-lg bg-gray-800">
                    if let Some(thumbnail) = &video.thumbnail {
                        <img src={asset_url(thumbnail)} alt={video.title.clone()} class="h-full w-full object-cover" />
                    }
                    if video.duration > 0.0 {
                        <span class="absolute bottom-1 right-1 rounded bg-black/80 px-1 text-xs">{ format_duration(video.duration) }</span>
                    }
                </div>
                <div class="min-w-0 flex-1">
                    <p class="mb-1 line-clamp-2 text-lg">{ &video.title }</p>
                    <div class="flex items-center gap-1 text-xs text-gray-400">
                        <span>{ &video.channel_name }</span>
                        <VerifiedBadge verified={video.is_verified} />
                        <span>{ format!("• {} views", format_views(video.views)) }</span>
                    </div>
                    <p class="mt-1 text-xs text-gray-500">{ format!("Watched at {watched_at}") }</p>
                    if let Some(description) = &video.description {
                        <p class="mt-2 line-clamp-2 text-xs text-gray-400">{ description }</p>
                    }
                </div>
            </Link<Route>>
            <button type="button" onclick={on_remove} title="Remove from watch history"
                class="h-9 w-9 shrink-0 rounded-full opacity-0 hover:bg-white/10 group-hover:opacity-100">
                {"✕"}
            </button>
        </div>
    }
}
