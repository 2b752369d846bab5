use crate::data::utils::{asset_url, source_video_id};
use crate::models::Video;
use crate::router::{Route, WatchQuery};
use crate::utils::{format_duration, format_time_ago_now, format_views, initial};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AvatarProps {
    pub name: AttrValue,
    #[prop_or_default]
    pub src: Option<String>,
    #[prop_or(AttrValue::Static("h-8 w-8 text-sm"))]
    pub size: AttrValue,
}

/// Channel picture, or the channel's initial when there is none.
#[function_component(Avatar)]
pub fn avatar(props: &AvatarProps) -> Html {
    let failed = use_state(|| false);
    let onerror = {
        let failed = failed.clone();
        Callback::from(move |_: Event| failed.set(true))
    };

    match props.src.as_deref().filter(|_| !*failed) {
        Some(src) => html! {
            <img src={asset_url(src)} alt={props.name.clone()} {onerror}
                 class={classes!("shrink-0", "rounded-full", "object-cover", props.size.to_string())} />
        },
        None => html! {
            <div class={classes!("flex", "shrink-0", "items-center", "justify-center", "rounded-full",
                                 "bg-purple-600", "font-semibold", "text-white", props.size.to_string())}>
                { initial(&props.name) }
            </div>
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct VerifiedBadgeProps {
    pub verified: bool,
}

#[function_component(VerifiedBadge)]
pub fn verified_badge(props: &VerifiedBadgeProps) -> Html {
    if !props.verified {
        return html! {};
    }
    html! {
        <span class="flex h-3.5 w-3.5 items-center justify-center rounded-full bg-gray-500 text-[10px] text-white"
              title="Verified">{"✓"}</span>
    }
}

fn duration_badge(seconds: f64, class: &'static str) -> Html {
    if seconds > 0.0 {
        html! { <span {class}>{ format_duration(seconds) }</span> }
    } else {
        html! {}
    }
}

fn watch_route(video: &Video) -> Route {
    Route::Watch {
        id: source_video_id(&video.id).to_string(),
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoCardProps {
    pub video: Video,
}

#[function_component(VideoCard)]
pub fn video_card(props: &VideoCardProps) -> Html {
    let video = &props.video;
    let image_loaded = use_state(|| false);
    let onload = {
        let image_loaded = image_loaded.clone();
        Callback::from(move |_: Event| image_loaded.set(true))
    };
    let image_class = if *image_loaded { "opacity-100" } else { "opacity-0" };

    html! {
        <div class="group w-full cursor-pointer transition-transform duration-300 hover:-translate-y-0.5">
            <Link<Route> to={watch_route(video)} classes="block">
                <div class="relative mb-3 aspect-video w-full overflow-hidden rounded-xl bg-gray-800 shadow transition-transform duration-300 group-hover:scale-[1.02]">
                    if let Some(thumbnail) = &video.thumbnail {
                        <img src={asset_url(thumbnail)} alt={video.title.clone()} {onload}
                             class={classes!("h-full", "w-full", "object-cover", "transition-opacity", image_class)} />
                    }
                    { duration_badge(video.duration, "absolute bottom-2 right-2 rounded-md bg-black/85 px-1.5 py-0.5 text-xs font-semibold text-white") }
                </div>
            </Link<Route>>
            <div class="flex items-start gap-3">
                <Avatar name={video.channel_name.clone()} src={video.channel_avatar.clone()} />
                <div class="min-w-0 flex-1">
                    <Link<Route> to={watch_route(video)}
                        classes="mb-1 line-clamp-2 text-sm font-medium leading-5 text-white hover:text-gray-400">
                        { &video.title }
                    </Link<Route>>
                    <div class="mb-0.5 flex items-center gap-1">
                        <span class="truncate text-[13px] text-gray-400 hover:text-white">{ &video.channel_name }</span>
                        <VerifiedBadge verified={video.is_verified} />
                    </div>
                    <p class="truncate text-[13px] text-gray-400">
                        { format!("{} views • {}", format_views(video.views), format_time_ago_now(video.upload_date.as_deref())) }
                    </p>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MiniVideoCardProps {
    pub video: Video,
    /// Keeps the playlist context when navigating.
    #[prop_or_default]
    pub playlist: Option<String>,
    #[prop_or_default]
    pub active: bool,
}

#[function_component(MiniVideoCard)]
pub fn mini_video_card(props: &MiniVideoCardProps) -> Html {
    let video = &props.video;
    let query = props.playlist.clone().map(|playlist| WatchQuery {
        playlist: Some(playlist),
    });
    let class = if props.active {
        "flex h-[94px] w-full gap-3 rounded-xl bg-white/10 p-2"
    } else {
        "flex h-[94px] w-full gap-3 rounded-xl p-2 transition-transform hover:scale-[1.02]"
    };

    html! {
        <Link<Route, WatchQuery> to={watch_route(video)} {query} classes={class}>
            <div class="relative h-[94px] w-[168px] shrink-0 overflow-hidden rounded-xl bg-gray-800">
                if let Some(thumbnail) = &video.thumbnail {
                    <img src={asset_url(thumbnail)} alt={video.title.clone()} class="h-full w-full object-cover" />
                }
                { duration_badge(video.duration, "absolute bottom-1 right-1 rounded bg-black/80 px-1 text-xs font-medium text-white") }
            </div>
            <div class="flex min-w-0 flex-1 flex-col gap-1 overflow-hidden">
                <p class="line-clamp-2 text-sm font-medium leading-5 text-white">{ &video.title }</p>
                <div class="flex items-center gap-1">
                    <span class="truncate text-[13px] text-gray-400">{ &video.channel_name }</span>
                    <VerifiedBadge verified={video.is_verified} />
                </div>
                <p class="truncate text-[13px] text-gray-400">
                    { format!("{} views • {}", format_views(video.views), format_time_ago_now(video.upload_date.as_deref())) }
                </p>
            </div>
        </Link<Route, WatchQuery>>
    }
}
