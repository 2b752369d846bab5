use crate::pages::history::HistoryPage;
use crate::pages::home::HomePage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::playlist_detail::PlaylistDetailPage;
use crate::pages::playlists::PlaylistsPage;
use crate::pages::subscriptions::SubscriptionsPage;
use crate::pages::watch::WatchPage;
use serde::{Deserialize, Serialize};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/subscriptions")]
    Subscriptions,
    #[at("/history")]
    History,
    #[at("/playlists")]
    Playlists,
    #[at("/playlist")]
    Playlist,
    #[at("/watch/:id")]
    Watch { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct HomeQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct WatchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct PlaylistQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <HomePage /> },
        Route::Subscriptions => html! { <SubscriptionsPage /> },
        Route::History => html! { <HistoryPage /> },
        Route::Playlists => html! { <PlaylistsPage /> },
        Route::Playlist => html! { <PlaylistDetailPage /> },
        Route::Watch { id } => html! { <WatchPage {id} /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_resolve_from_paths() {
        assert_eq!(Route::recognize("/"), Some(Route::Home));
        assert_eq!(Route::recognize("/history"), Some(Route::History));
        assert_eq!(
            Route::recognize("/watch/12"),
            Some(Route::Watch { id: "12".to_string() })
        );
    }

    #[test]
    fn watch_route_renders_its_path() {
        let route = Route::Watch { id: "7".to_string() };
        assert_eq!(route.to_path(), "/watch/7");
    }
}
