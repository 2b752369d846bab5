use crate::components::layout::SidebarContext;
use crate::components::video_card::Avatar;
use crate::config::{LIKED_PLAYLIST_ID, SIDEBAR_VISIBLE_CHANNELS};
use crate::data::api::load_channel_list;
use crate::hooks::{use_interactions, use_request_guard, use_subscription_revision};
use crate::models::Channel;
use crate::router::{PlaylistQuery, Route};
use yew::prelude::*;
use yew_router::prelude::*;

/// The static channel list, or its first few entries.
pub fn visible_channels(channels: &[Channel], show_all: bool) -> &[Channel] {
    if show_all {
        channels
    } else {
        &channels[..channels.len().min(SIDEBAR_VISIBLE_CHANNELS)]
    }
}

#[derive(Properties, PartialEq)]
struct NavItemProps {
    icon: &'static str,
    label: &'static str,
    to: Route,
    #[prop_or_default]
    query: Option<PlaylistQuery>,
    collapsed: bool,
}

#[function_component(NavItem)]
fn nav_item(props: &NavItemProps) -> Html {
    let current = use_route::<Route>();
    let active = current.as_ref() == Some(&props.to) && props.query.is_none();

    let class = match (props.collapsed, active) {
        (true, true) => "flex w-full flex-col items-center rounded-lg bg-white/10 px-2 py-3 text-[10px]",
        (true, false) => "flex w-full flex-col items-center rounded-lg px-2 py-3 text-[10px] hover:bg-white/10",
        (false, true) => "flex w-full items-center gap-6 rounded-lg bg-white/10 px-3 py-2 text-sm",
        (false, false) => "flex w-full items-center gap-6 rounded-lg px-3 py-2 text-sm hover:bg-white/10",
    };

    html! {
        <Link<Route, PlaylistQuery> to={props.to.clone()} query={props.query.clone()} classes={class}>
            <span class="text-lg">{ props.icon }</span>
            <span>{ props.label }</span>
        </Link<Route, PlaylistQuery>>
    }
}

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let collapsed = use_context::<SidebarContext>().map_or(false, |sidebar| sidebar.collapsed);
    let channels = use_state(|| None::<Vec<Channel>>);
    let show_all = use_state(|| false);
    let interactions = use_interactions();
    let revision = use_subscription_revision();
    let guard = use_request_guard();

    {
        let channels = channels.clone();
        use_effect_with((), move |_| {
            let ticket = guard.begin();
            wasm_bindgen_futures::spawn_local(async move {
                let list = load_channel_list().await;
                if ticket.is_current() {
                    channels.set(Some(list));
                }
            });
            || ()
        });
    }

    // Re-read whenever a subscription changes, here or in another tab
    let subscribed = use_memo(revision, {
        let interactions = interactions.clone();
        move |_| interactions.subscribed_channels()
    });

    if collapsed {
        return html! {
            <nav class="custom-scrollbar flex h-full w-full flex-col gap-3 overflow-y-auto bg-[#0f0f0f] p-2">
                <NavItem icon="🏠" label="Home" to={Route::Home} collapsed=true />
                <NavItem icon="📺" label="Subscriptions" to={Route::Subscriptions} collapsed=true />
                <NavItem icon="🕘" label="History" to={Route::History} collapsed=true />
                <NavItem icon="📃" label="Playlists" to={Route::Playlists} collapsed=true />
            </nav>
        };
    }

    let toggle_show_all = {
        let show_all = show_all.clone();
        Callback::from(move |_: MouseEvent| show_all.set(!*show_all))
    };

    let channel_list = match &*channels {
        None => html! { <p class="px-3 py-2 text-sm text-gray-400">{"Loading subscriptions..."}</p> },
        Some(list) if list.is_empty() => html! {
            <p class="px-3 py-2 text-sm text-gray-400">{"No subscriptions"}</p>
        },
        Some(list) => html! {
            <>
                { for visible_channels(list, *show_all).iter().map(|channel| html! {
                    <div key={channel.name.clone()} class="flex items-center gap-3 rounded-lg px-3 py-2 text-sm hover:bg-white/10">
                        <Avatar name={channel.name.clone()} src={channel.avatar.clone()} size="h-6 w-6 text-xs" />
                        <span class="flex-1 truncate">{ &channel.name }</span>
                        if channel.is_live {
                            <span class="h-1.5 w-1.5 rounded-full bg-red-500" title="Live"></span>
                        }
                    </div>
                })}
                if list.len() > SIDEBAR_VISIBLE_CHANNELS {
                    <button type="button" onclick={toggle_show_all}
                        class="flex w-full items-center gap-6 rounded-lg px-3 py-2 text-left text-sm hover:bg-white/10">
                        <span>{ if *show_all { "▲" } else { "▼" } }</span>
                        <span>{ if *show_all { "Show less".to_string() } else { format!("Show {} more", list.len() - SIDEBAR_VISIBLE_CHANNELS) } }</span>
                    </button>
                }
            </>
        },
    };

    html! {
        <nav class="custom-scrollbar flex h-full w-full flex-col gap-1 overflow-y-auto bg-[#0f0f0f] p-3">
            <NavItem icon="🏠" label="Home" to={Route::Home} collapsed=false />
            <NavItem icon="📺" label="Subscriptions" to={Route::Subscriptions} collapsed=false />

            <hr class="my-3 border-[#323232]" />
            <p class="px-3 py-2 text-base font-medium">{"You"}</p>
            <NavItem icon="🕘" label="History" to={Route::History} collapsed=false />
            <NavItem icon="📃" label="Playlists" to={Route::Playlists} collapsed=false />
            <NavItem icon="👍" label="Liked videos" to={Route::Playlist}
                query={Some(PlaylistQuery { id: Some(LIKED_PLAYLIST_ID.to_string()) })} collapsed=false />

            <hr class="my-3 border-[#323232]" />
            <p class="px-3 py-2 text-base font-medium">{"Subscriptions"}</p>
            { channel_list }

            if !subscribed.is_empty() {
                <hr class="my-3 border-[#323232]" />
                <p class="px-3 py-2 text-base font-medium">{"Followed channels"}</p>
                { for subscribed.iter().map(|name| html! {
                    <div key={name.clone()} class="flex items-center gap-3 rounded-lg px-3 py-2 text-sm hover:bg-white/10">
                        <Avatar name={name.clone()} size="h-6 w-6 text-xs" />
                        <span class="flex-1 truncate">{ name }</span>
                    </div>
                })}
            }
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channels(count: usize) -> Vec<Channel> {
        (0..count)
            .map(|i| Channel {
                name: format!("Channel {i}"),
                ..Channel::default()
            })
            .collect()
    }

    #[test]
    fn collapsed_list_shows_first_channels_only() {
        let list = channels(9);
        assert_eq!(visible_channels(&list, false).len(), SIDEBAR_VISIBLE_CHANNELS);
        assert_eq!(visible_channels(&list, true).len(), 9);
    }

    #[test]
    fn short_list_is_shown_whole() {
        let list = channels(3);
        assert_eq!(visible_channels(&list, false).len(), 3);
    }
}
