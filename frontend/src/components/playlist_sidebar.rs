use crate::components::loaders::CardLoader;
use crate::components::video_card::MiniVideoCard;
use crate::data::api::{load_playlist, load_videos};
use crate::hooks::{use_interactions, use_request_guard};
use crate::models::{Playlist, Video};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PlaylistSidebarProps {
    pub playlist_id: String,
    pub current_video_id: String,
}

#[derive(Clone, PartialEq)]
enum SidebarData {
    Loading,
    Missing,
    Loaded(Playlist, Vec<Video>),
}

#[function_component(PlaylistSidebar)]
pub fn playlist_sidebar(props: &PlaylistSidebarProps) -> Html {
    let data = use_state(|| SidebarData::Loading);
    let interactions = use_interactions();
    let guard = use_request_guard();

    {
        let data = data.clone();
        use_effect_with(props.playlist_id.clone(), move |playlist_id| {
            data.set(SidebarData::Loading);
            let playlist_id = playlist_id.clone();
            let liked = interactions.liked_videos();
            let ticket = guard.begin();
            wasm_bindgen_futures::spawn_local(async move {
                let next = match load_playlist(&playlist_id, &liked).await {
                    Some(playlist) => {
                        let videos = load_videos(&playlist.video_ids).await;
                        SidebarData::Loaded(playlist, videos)
                    }
                    None => SidebarData::Missing,
                };
                if ticket.is_current() {
                    data.set(next);
                }
            });
            || ()
        });
    }

    let (playlist, videos) = match &*data {
        SidebarData::Loading => {
            return html! {
                <div class="rounded-xl border border-gray-700 p-3">
                    <p class="mb-2 text-sm text-gray-400">{"Loading playlist..."}</p>
                    <CardLoader count={4} compact=true />
                </div>
            }
        }
        SidebarData::Missing => {
            return html! {
                <div class="rounded-xl border border-gray-700 p-4 text-sm text-gray-400">
                    {"Playlist not found"}
                </div>
            }
        }
        SidebarData::Loaded(playlist, videos) => (playlist, videos),
    };

    let position = videos
        .iter()
        .position(|video| video.id == props.current_video_id)
        .map(|index| index + 1);

    html! {
        <div class="flex max-h-[80vh] flex-col overflow-hidden rounded-xl border border-gray-700">
            <div class="border-b border-gray-700 bg-gray-900 p-4">
                <h3 class="mb-1 text-lg font-semibold text-white">{ &playlist.title }</h3>
                <p class="text-sm text-gray-400">
                    { &playlist.status }
                    { " • " }
                    { match position {
                        Some(position) => format!("{position} / {}", videos.len()),
                        None => format!("{} videos", videos.len()),
                    }}
                </p>
            </div>
            <div class="custom-scrollbar flex-1 overflow-y-auto p-2">
                if videos.is_empty() {
                    <div class="flex flex-col items-center gap-1 py-8">
                        <p class="text-sm text-gray-400">{"No videos in this playlist"}</p>
                        <p class="text-xs text-gray-500">{"Videos you add will show up here"}</p>
                    </div>
                } else {
                    { for videos.iter().enumerate().map(|(index, video)| html! {
                        <div key={video.id.clone()} class="flex items-center gap-1">
                            <span class="w-5 shrink-0 text-center text-xs text-gray-400">
                                { if video.id == props.current_video_id { "▶".to_string() } else { (index + 1).to_string() } }
                            </span>
                            <MiniVideoCard
                                video={video.clone()}
                                playlist={Some(playlist.id.clone())}
                                active={video.id == props.current_video_id} />
                        </div>
                    })}
                }
            </div>
        </div>
    }
}
