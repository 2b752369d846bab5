use crate::components::comments::CommentSection;
use crate::components::playlist_sidebar::PlaylistSidebar;
use crate::components::side_recommendation::SideRecommendation;
use crate::components::status::{ErrorView, WarningBadge};
use crate::components::video_card::{Avatar, VerifiedBadge};
use crate::data::api::{load_comments, load_video_by_id};
use crate::data::utils::asset_url;
use crate::hooks::{use_interactions, use_request_guard, use_subscription_revision, use_watch_history};
use crate::models::{Comment, Video};
use crate::player::{VideoPlayer, HLS_MIME_TYPE};
use crate::router::WatchQuery;
use crate::utils::{format_iso8601_date, format_number, format_time_ago_now};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

#[derive(Clone, PartialEq)]
pub enum WatchState {
    Loading,
    NotFound,
    Unplayable(Video),
    Ready(Video),
}

impl WatchState {
    /// A loader miss is "not found"; a record without a stream can't play.
    pub fn from_lookup(video: Option<Video>) -> Self {
        match video {
            None => Self::NotFound,
            Some(video) if video.video_url.as_deref().map_or(true, |url| url.trim().is_empty()) => {
                Self::Unplayable(video)
            }
            Some(video) => Self::Ready(video),
        }
    }
}

/// What the watch page shows for the current id. Comments always belong to
/// the video being loaded or shown.
#[derive(Clone, PartialEq)]
pub struct WatchData {
    pub state: WatchState,
    pub comments: Vec<Comment>,
}

impl Default for WatchData {
    fn default() -> Self {
        Self {
            state: WatchState::Loading,
            comments: Vec::new(),
        }
    }
}

pub enum WatchAction {
    Begin,
    Found(Option<Video>),
    Comments(Vec<Comment>),
}

impl Reducible for WatchData {
    type Action = WatchAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            WatchAction::Begin => Rc::new(Self::default()),
            WatchAction::Found(video) => Rc::new(Self {
                state: WatchState::from_lookup(video),
                comments: self.comments.clone(),
            }),
            WatchAction::Comments(comments) => Rc::new(Self {
                state: self.state.clone(),
                comments,
            }),
        }
    }
}

/// Guesses the MIME type from the stream URL; HLS unless it looks like a
/// progressive file.
pub fn mime_type_for(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url).to_lowercase();
    if path.ends_with(".mp4") {
        "video/mp4"
    } else if path.ends_with(".webm") {
        "video/webm"
    } else {
        HLS_MIME_TYPE
    }
}

#[derive(Properties, PartialEq)]
pub struct WatchPageProps {
    pub id: String,
}

#[function_component(WatchPage)]
pub fn watch_page(props: &WatchPageProps) -> Html {
    let data = use_reducer(WatchData::default);
    let attempt = use_state(|| 0u32);
    let guard = use_request_guard();
    let playlist = use_location()
        .and_then(|location| location.query::<WatchQuery>().ok())
        .and_then(|query| query.playlist);

    {
        let dispatcher = data.dispatcher();
        use_effect_with((props.id.clone(), *attempt), move |(id, _)| {
            dispatcher.dispatch(WatchAction::Begin);
            let id = id.clone();
            let ticket = guard.begin();
            wasm_bindgen_futures::spawn_local(async move {
                let video = load_video_by_id(id.clone()).await;
                if !ticket.is_current() {
                    return;
                }
                if video.is_none() {
                    log::warn!("Video with ID {id} not found");
                }
                dispatcher.dispatch(WatchAction::Found(video));

                let loaded = load_comments(&id).await;
                if ticket.is_current() {
                    dispatcher.dispatch(WatchAction::Comments(loaded));
                }
            });
            || ()
        });
    }

    let retry = {
        let attempt = attempt.clone();
        Callback::from(move |_: ()| attempt.set(*attempt + 1))
    };

    let video = match &data.state {
        WatchState::Loading => {
            return html! {
                <div class="flex h-full items-center justify-center bg-black">
                    <div class="text-center">
                        <div class="mx-auto mb-4 h-12 w-12 animate-spin rounded-full border-4 border-gray-200 border-t-red-500"></div>
                        <p>{"Loading video..."}</p>
                    </div>
                </div>
            };
        }
        WatchState::NotFound => {
            return html! {
                <ErrorView
                    title={format!("Video with ID {} not found", props.id)}
                    message="Please check the video ID and try again."
                    on_retry={Some(retry)} />
            };
        }
        WatchState::Unplayable(video) => {
            return html! {
                <ErrorView
                    title="This video can't be played"
                    message={format!("\"{}\" has no video source.", video.title)}
                    on_retry={Some(retry)} />
            };
        }
        WatchState::Ready(video) => video.clone(),
    };

    let side_panel = match playlist {
        Some(playlist_id) => html! { <PlaylistSidebar {playlist_id} current_video_id={props.id.clone()} /> },
        None => html! { <SideRecommendation /> },
    };

    html! {
        <div class="custom-scrollbar flex h-full w-full flex-col gap-6 overflow-y-auto bg-black p-6 lg:flex-row">
            <div class="min-w-0 lg:w-3/4">
                <WatchDetails video={video} video_id={props.id.clone()} />
                <CommentSection comments={data.comments.clone()} />
            </div>
            <aside class="lg:w-1/4">
                { side_panel }
            </aside>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct WatchDetailsProps {
    video: Video,
    video_id: String,
}

#[function_component(WatchDetails)]
fn watch_details(props: &WatchDetailsProps) -> Html {
    let video = &props.video;
    let interactions = use_interactions();
    let history = use_watch_history();
    let revision = use_subscription_revision();
    let expanded = use_state(|| false);
    let reaction = use_state(|| (false, false));
    let subscribed = use_state(|| false);

    let channel_name = if video.channel_name.trim().is_empty() {
        "Unknown channel".to_string()
    } else {
        video.channel_name.clone()
    };

    {
        let interactions = interactions.clone();
        let reaction = reaction.clone();
        use_effect_with(props.video_id.clone(), move |video_id| {
            reaction.set((
                interactions.is_video_liked(video_id),
                interactions.is_video_disliked(video_id),
            ));
            || ()
        });
    }
    {
        let interactions = interactions.clone();
        let subscribed = subscribed.clone();
        use_effect_with((channel_name.clone(), revision), move |(channel, _)| {
            subscribed.set(interactions.is_channel_subscribed(channel));
            || ()
        });
    }

    let on_play = Callback::from(move |video_id: String| {
        history.add(&video_id);
    });

    let toggle_like = {
        let interactions = interactions.clone();
        let reaction = reaction.clone();
        let video_id = props.video_id.clone();
        Callback::from(move |_: MouseEvent| {
            interactions.toggle_like_video(&video_id);
            reaction.set((
                interactions.is_video_liked(&video_id),
                interactions.is_video_disliked(&video_id),
            ));
        })
    };

    let toggle_dislike = {
        let interactions = interactions.clone();
        let reaction = reaction.clone();
        let video_id = props.video_id.clone();
        Callback::from(move |_: MouseEvent| {
            interactions.toggle_dislike_video(&video_id);
            reaction.set((
                interactions.is_video_liked(&video_id),
                interactions.is_video_disliked(&video_id),
            ));
        })
    };

    let toggle_subscribe = {
        let subscribed = subscribed.clone();
        let channel_name = channel_name.clone();
        Callback::from(move |_: MouseEvent| {
            subscribed.set(interactions.toggle_subscribe_channel(&channel_name));
        })
    };

    let expand = {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| expanded.set(true))
    };
    let collapse = {
        let expanded = expanded.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            expanded.set(false);
        })
    };

    let (liked, disliked) = *reaction;
    let description = video
        .description
        .clone()
        .filter(|description| !description.trim().is_empty())
        .unwrap_or_else(|| "No description added by the channel owner.".to_string());
    let long_description = description.chars().count() > DESCRIPTION_PREVIEW_CHARS;
    let title = if video.title.trim().is_empty() {
        "Untitled video".to_string()
    } else {
        video.title.clone()
    };
    let src = asset_url(video.video_url.as_deref().unwrap_or_default());
    let mime_type = mime_type_for(&src).to_string();

    let pill = "flex h-9 items-center gap-2 px-3 text-sm hover:bg-gray-700";

    html! {
        <>
            <VideoPlayer {src} {mime_type} video_id={props.video_id.clone()} {on_play} />
            <div class="mt-4">
                <WarningBadge missing={video.missing_optional_fields()} />
                <h1 class="mb-3 text-xl font-semibold leading-tight">{ title }</h1>
                <div class="flex flex-wrap items-center justify-between gap-3">
                    <div class="flex items-center gap-3">
                        <Avatar name={channel_name.clone()} src={video.channel_avatar.clone()} size="h-10 w-10 text-base" />
                        <div>
                            <div class="flex items-center gap-1">
                                <span class="font-semibold">{ &channel_name }</span>
                                <VerifiedBadge verified={video.is_verified} />
                            </div>
                        </div>
                        <button type="button" onclick={toggle_subscribe}
                            class={if *subscribed {
                                "ml-4 h-9 rounded-full bg-gray-800 px-4 text-sm font-semibold text-white hover:bg-gray-700"
                            } else {
                                "ml-4 h-9 rounded-full bg-white px-4 text-sm font-semibold text-black hover:bg-gray-200"
                            }}>
                            { if *subscribed { "Subscribed" } else { "Subscribe" } }
                        </button>
                    </div>
                    <div class="flex overflow-hidden rounded-full bg-gray-800">
                        <button type="button" onclick={toggle_like} title="I like this"
                            class={classes!(pill, liked.then_some("text-blue-400"))}>
                            { if liked { "👍 Liked" } else { "👍 Like" } }
                        </button>
                        <span class="my-2 w-px bg-gray-600"></span>
                        <button type="button" onclick={toggle_dislike} title="I dislike this"
                            class={classes!(pill, disliked.then_some("text-blue-400"))}>
                            { if disliked { "👎 Disliked" } else { "👎" } }
                        </button>
                    </div>
                </div>
                <div onclick={expand}
                    class={classes!("relative", "mt-4", "overflow-hidden", "rounded-xl", "bg-gray-900", "p-3",
                                    (!*expanded).then_some("max-h-24 cursor-pointer hover:bg-gray-800"))}>
                    <p class="mb-2 text-sm font-semibold"
                        title={video.upload_date.as_deref().map(format_iso8601_date)}>
                        { format!("{} views • {}", format_number(video.views), format_time_ago_now(video.upload_date.as_deref())) }
                    </p>
                    <p class="whitespace-pre-wrap text-sm leading-snug text-gray-300">{ description }</p>
                    if *expanded && long_description {
                        <button type="button" onclick={collapse} class="mt-2 text-sm font-semibold">{"Show less"}</button>
                    } else if long_description {
                        <span class="absolute bottom-2 right-3 bg-gray-900 text-sm font-semibold">{"...more"}</span>
                    }
                </div>
            </div>
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_video_is_not_found() {
        assert!(matches!(WatchState::from_lookup(None), WatchState::NotFound));
    }

    #[test]
    fn video_without_stream_is_unplayable() {
        let video = Video {
            id: "3".to_string(),
            video_url: Some("  ".to_string()),
            ..Video::default()
        };
        assert!(matches!(WatchState::from_lookup(Some(video)), WatchState::Unplayable(_)));
        assert!(matches!(
            WatchState::from_lookup(Some(Video::default())),
            WatchState::Unplayable(_)
        ));
    }

    #[test]
    fn playable_video_is_ready() {
        let video = Video {
            video_url: Some("/videos/3/master.m3u8".to_string()),
            ..Video::default()
        };
        assert!(matches!(WatchState::from_lookup(Some(video)), WatchState::Ready(_)));
    }

    #[test]
    fn new_load_drops_previous_comments() {
        let shown = Rc::new(WatchData::default())
            .reduce(WatchAction::Found(Some(Video {
                video_url: Some("/videos/1/master.m3u8".to_string()),
                ..Video::default()
            })))
            .reduce(WatchAction::Comments(vec![Comment {
                id: "c1".to_string(),
                ..Comment::default()
            }]));
        assert_eq!(shown.comments.len(), 1);

        let next = shown.reduce(WatchAction::Begin);
        assert!(matches!(next.state, WatchState::Loading));
        assert!(next.comments.is_empty());
    }

    #[test]
    fn comments_keep_the_loaded_video() {
        let data = Rc::new(WatchData::default())
            .reduce(WatchAction::Found(None))
            .reduce(WatchAction::Comments(Vec::new()));
        assert!(matches!(data.state, WatchState::NotFound));
    }

    #[test]
    fn mime_type_follows_extension() {
        assert_eq!(mime_type_for("/videos/3/master.m3u8"), HLS_MIME_TYPE);
        assert_eq!(mime_type_for("/clips/intro.MP4?t=3"), "video/mp4");
        assert_eq!(mime_type_for("https://cdn.example.com/a.webm"), "video/webm");
    }
}
