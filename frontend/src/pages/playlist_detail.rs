use crate::components::loaders::SpinnerLoader;
use crate::components::status::ErrorView;
use crate::data::api::{load_playlist, load_videos};
use crate::data::utils::asset_url;
use crate::hooks::{use_interactions, use_request_guard};
use crate::models::{Playlist, Video};
use crate::pages::playlists::play_playlist;
use crate::router::{PlaylistQuery, Route, WatchQuery};
use crate::utils::{format_duration, format_time_ago_now, format_views};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, PartialEq)]
enum DetailState {
    Loading,
    NotFound,
    Loaded(Playlist, Vec<Video>),
}

#[function_component(PlaylistDetailPage)]
pub fn playlist_detail_page() -> Html {
    let playlist_id = use_location()
        .and_then(|location| location.query::<PlaylistQuery>().ok())
        .and_then(|query| query.id);
    let state = use_state(|| DetailState::Loading);
    let interactions = use_interactions();
    let guard = use_request_guard();
    let navigator = use_navigator();

    {
        let state = state.clone();
        use_effect_with(playlist_id.clone(), move |playlist_id| {
            match playlist_id.clone() {
                Some(playlist_id) => {
                    state.set(DetailState::Loading);
                    let liked = interactions.liked_videos();
                    let ticket = guard.begin();
                    wasm_bindgen_futures::spawn_local(async move {
                        let next = match load_playlist(&playlist_id, &liked).await {
                            Some(playlist) => {
                                let videos = load_videos(&playlist.video_ids).await;
                                DetailState::Loaded(playlist, videos)
                            }
                            None => DetailState::NotFound,
                        };
                        if ticket.is_current() {
                            state.set(next);
                        }
                    });
                }
                None => state.set(DetailState::NotFound),
            }
            || ()
        });
    }

    let (playlist, videos) = match &*state {
        DetailState::Loading => return html! { <SpinnerLoader text="Loading playlist..." /> },
        DetailState::NotFound => {
            let to_playlists = navigator.clone().map(|navigator| {
                Callback::from(move |_: ()| navigator.push(&Route::Playlists))
            });
            return html! {
                <ErrorView title="Failed to load playlist" on_retry={to_playlists}
                    retry_label="Back to playlists" show_back=false />
            };
        }
        DetailState::Loaded(playlist, videos) => (playlist, videos),
    };

    let play_all = {
        let navigator = navigator.clone();
        let playlist_id = playlist.id.clone();
        let first = videos.first().map(|video| video.id.clone());
        Callback::from(move |_: MouseEvent| {
            if let (Some(navigator), Some(first)) = (&navigator, &first) {
                play_playlist(navigator, &playlist_id, first);
            }
        })
    };

    let cover = playlist
        .thumbnail
        .clone()
        .or_else(|| videos.first().and_then(|video| video.thumbnail.clone()));

    html! {
        <div class="custom-scrollbar flex h-full w-full flex-col gap-6 overflow-y-auto p-5 lg:flex-row">
            <aside class="w-full shrink-0 rounded-2xl bg-gradient-to-b from-gray-700 to-gray-900 p-6 lg:w-[360px]">
                <div class="mb-4 aspect-video w-full overflow-hidden rounded-xl bg-gray-800">
                    if let Some(cover) = cover {
                        <img src={asset_url(&cover)} alt={playlist.title.clone()} class="h-full w-full object-cover" />
                    }
                </div>
                <h1 class="mb-2 text-2xl font-bold">{ &playlist.title }</h1>
                <p class="text-sm text-gray-300">{ &playlist.status }</p>
                <p class="mb-4 text-sm text-gray-300">
                    { format!("{} videos", videos.len()) }
                    if playlist.last_time_update.is_some() {
                        { format!(" • Updated {}", format_time_ago_now(playlist.last_time_update.as_deref()).to_lowercase()) }
                    }
                </p>
                if let Some(description) = &playlist.description {
                    <p class="mb-4 text-sm text-gray-300">{ description }</p>
                }
                <button type="button" onclick={play_all} disabled={videos.is_empty()}
                    class="w-full rounded-full bg-white py-2 text-sm font-semibold text-black hover:bg-gray-200 disabled:opacity-50">
                    {"▶ Play all"}
                </button>
            </aside>
            <div class="min-w-0 flex-1">
                if videos.is_empty() {
                    <div class="py-16 text-center">
                        <p class="text-lg text-gray-400">{"No videos in this playlist yet"}</p>
                        <p class="text-sm text-gray-500">{"Videos you like will appear here"}</p>
                    </div>
                } else {
                    <div class="flex flex-col gap-2">
                        { for videos.iter().enumerate().map(|(index, video)| html! {
                            <Link<Route, WatchQuery>
                                key={video.id.clone()}
                                to={Route::Watch { id: video.id.clone() }}
                                query={Some(WatchQuery { playlist: Some(playlist.id.clone()) })}
                                classes="flex items-center gap-4 rounded-xl p-2 hover:bg-white/5">
                                <span class="w-6 text-center text-sm text-gray-400">{ index + 1 }</span>
                                <div class="relative aspect-video w-40 shrink-0 overflow-hidden rounded-lg bg-gray-800">
                                    if let Some(thumbnail) = &video.thumbnail {
                                        <img src={asset_url(thumbnail)} alt={video.title.clone()} class="h-full w-full object-cover" />
                                    }
                                    if video.duration > 0.0 {
                                        <span class="absolute bottom-1 right-1 rounded bg-black/80 px-1 text-xs">{ format_duration(video.duration) }</span>
                                    }
                                </div>
                                <div class="min-w-0 flex-1">
                                    <p class="line-clamp-2 text-base font-medium">{ &video.title }</p>
                                    <p class="text-sm text-gray-400">
                                        { format!("{} • {} views • {}", video.channel_name, format_views(video.views),
                                                  format_time_ago_now(video.upload_date.as_deref())) }
                                    </p>
                                </div>
                            </Link<Route, WatchQuery>>
                        })}
                    </div>
                }
            </div>
        </div>
    }
}
