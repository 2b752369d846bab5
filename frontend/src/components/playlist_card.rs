use crate::data::api::load_video_by_id;
use crate::data::utils::asset_url;
use crate::hooks::use_request_guard;
use crate::models::Playlist;
use crate::router::{PlaylistQuery, Route};
use crate::utils::format_time_ago_now;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PlaylistCardProps {
    pub playlist: Playlist,
    /// Only called for playlists that contain videos.
    pub on_open: Callback<Playlist>,
}

#[function_component(PlaylistCard)]
pub fn playlist_card(props: &PlaylistCardProps) -> Html {
    let playlist = &props.playlist;
    let fallback_thumbnail = use_state(|| None::<String>);
    let guard = use_request_guard();
    let navigator = use_navigator();
    let video_count = playlist.video_ids.len();

    // Without a cover image, borrow the first video's thumbnail
    {
        let fallback_thumbnail = fallback_thumbnail.clone();
        let first_video = playlist
            .thumbnail
            .is_none()
            .then(|| playlist.video_ids.first().cloned())
            .flatten();
        use_effect_with(first_video, move |first_video| {
            if let Some(video_id) = first_video.clone() {
                let ticket = guard.begin();
                wasm_bindgen_futures::spawn_local(async move {
                    let thumbnail = load_video_by_id(video_id).await.and_then(|video| video.thumbnail);
                    if ticket.is_current() {
                        fallback_thumbnail.set(thumbnail);
                    }
                });
            }
            || ()
        });
    }

    let open_detail = {
        let navigator = navigator.clone();
        let id = playlist.id.clone();
        move || {
            if let Some(navigator) = &navigator {
                let query = PlaylistQuery { id: Some(id.clone()) };
                if let Err(e) = navigator.push_with_query(&Route::Playlist, &query) {
                    log::error!("Error opening playlist '{id}': {e}");
                }
            }
        }
    };

    let onclick = {
        let on_open = props.on_open.clone();
        let playlist = playlist.clone();
        let open_detail = open_detail.clone();
        Callback::from(move |_: MouseEvent| {
            if playlist.video_ids.is_empty() {
                open_detail();
            } else {
                on_open.emit(playlist.clone());
            }
        })
    };

    let on_view_full = Callback::from(move |event: MouseEvent| {
        event.stop_propagation();
        open_detail();
    });

    let thumbnail = playlist
        .thumbnail
        .clone()
        .or_else(|| (*fallback_thumbnail).clone());

    html! {
        <div class="group w-full cursor-pointer" {onclick}>
            <div class="relative mb-3 aspect-video w-full overflow-hidden rounded-xl bg-gray-800">
                if let Some(thumbnail) = thumbnail {
                    <img src={asset_url(&thumbnail)} alt={playlist.title.clone()} class="h-full w-full object-cover" />
                }
                <div class="absolute bottom-0 right-0 top-0 flex w-2/5 flex-col items-center justify-center bg-black/75 text-white">
                    <span class="text-lg font-semibold">{ video_count }</span>
                    <span class="text-xs">{ if video_count == 1 { "video" } else { "videos" } }</span>
                </div>
                <div class="absolute inset-0 hidden items-center justify-center bg-black/60 text-sm font-semibold text-white group-hover:flex">
                    { if video_count > 0 { "▶ Play all" } else { "No videos" } }
                </div>
            </div>
            <p class="line-clamp-2 text-sm font-medium text-white">{ &playlist.title }</p>
            <p class="text-xs text-gray-400">
                { &playlist.status }
                if playlist.last_time_update.is_some() {
                    { format!(" • Updated {}", format_time_ago_now(playlist.last_time_update.as_deref()).to_lowercase()) }
                }
            </p>
            <button type="button" onclick={on_view_full}
                class="mt-1 text-xs font-semibold text-gray-400 hover:text-white">
                {"View full playlist"}
            </button>
        </div>
    }
}
