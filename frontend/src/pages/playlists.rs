use crate::components::loaders::SpinnerLoader;
use crate::components::playlist_card::PlaylistCard;
use crate::components::status::ErrorView;
use crate::data::api::load_playlists;
use crate::hooks::{use_interactions, use_request_guard};
use crate::models::Playlist;
use crate::router::{Route, WatchQuery};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, PartialEq)]
enum PlaylistsState {
    Loading,
    Failed,
    Loaded(Vec<Playlist>),
}

/// Starts the playlist at its first video, keeping the playlist in the URL.
pub fn play_playlist(navigator: &Navigator, playlist_id: &str, first_video: &str) {
    let route = Route::Watch {
        id: first_video.to_string(),
    };
    let query = WatchQuery {
        playlist: Some(playlist_id.to_string()),
    };
    if let Err(e) = navigator.push_with_query(&route, &query) {
        log::error!("Error opening playlist '{playlist_id}': {e}");
    }
}

#[function_component(PlaylistsPage)]
pub fn playlists_page() -> Html {
    let state = use_state(|| PlaylistsState::Loading);
    let attempt = use_state(|| 0u32);
    let interactions = use_interactions();
    let guard = use_request_guard();
    let navigator = use_navigator();

    {
        let state = state.clone();
        use_effect_with(*attempt, move |_| {
            state.set(PlaylistsState::Loading);
            let liked = interactions.liked_videos();
            let ticket = guard.begin();
            wasm_bindgen_futures::spawn_local(async move {
                let next = match load_playlists(&liked).await {
                    Some(playlists) => PlaylistsState::Loaded(playlists),
                    None => PlaylistsState::Failed,
                };
                if ticket.is_current() {
                    state.set(next);
                }
            });
            || ()
        });
    }

    let on_open = Callback::from(move |playlist: Playlist| {
        if let (Some(navigator), Some(first)) = (&navigator, playlist.video_ids.first()) {
            play_playlist(navigator, &playlist.id, first);
        }
    });

    let content = match &*state {
        PlaylistsState::Loading => html! { <SpinnerLoader text="Loading playlists..." /> },
        PlaylistsState::Failed => {
            let attempt = attempt.clone();
            let on_retry = Callback::from(move |_: ()| attempt.set(*attempt + 1));
            html! { <ErrorView title="Failed to load playlists" on_retry={Some(on_retry)} show_back=false /> }
        }
        PlaylistsState::Loaded(playlists) if playlists.is_empty() => html! {
            <p class="py-16 text-center text-gray-400">{"No playlists yet"}</p>
        },
        PlaylistsState::Loaded(playlists) => html! {
            <div class="grid grid-cols-1 gap-5 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4">
                { for playlists.iter().map(|playlist| html! {
                    <PlaylistCard key={playlist.id.clone()} playlist={playlist.clone()} on_open={on_open.clone()} />
                })}
            </div>
        },
    };

    html! {
        <div class="custom-scrollbar h-full w-full overflow-y-auto p-5">
            <h1 class="mb-6 text-3xl font-normal md:text-4xl">{"Playlists"}</h1>
            { content }
        </div>
    }
}
