//! Simulated infinite scrolling over an already fetched list of videos.

use crate::components::loaders::{CardLoader, SpinnerLoader};
use crate::components::video_card::VideoCard;
use crate::config::{SCROLL_THRESHOLD_PX, VIDEOS_PER_PAGE};
use crate::models::Video;
use gloo_timers::callback::Timeout;
use std::rc::Rc;
use web_sys::Element;
use yew::prelude::*;

/// Paging cursor that never fetches anything new: every further page
/// re-emits items of the source list, cycling, under rewritten ids
/// (`{id}-page-{page}-{index}`) so keys stay unique. The displayed list only
/// grows.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedCursor {
    source: Vec<Video>,
    displayed: Vec<Video>,
    page: usize,
    page_size: usize,
}

impl FeedCursor {
    pub fn new(source: Vec<Video>, page_size: usize) -> Self {
        let displayed = source.iter().take(page_size).cloned().collect();
        Self {
            source,
            displayed,
            page: 1,
            page_size,
        }
    }

    pub fn displayed(&self) -> &[Video] {
        &self.displayed
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Appends one page and returns how many items were added.
    pub fn load_more(&mut self) -> usize {
        if self.source.is_empty() || self.page_size == 0 {
            return 0;
        }
        let len = self.source.len();
        let start = (self.page * self.page_size) % len;
        let page = self.page;

        self.displayed.extend((0..self.page_size).map(|index| {
            let original = &self.source[(start + index) % len];
            Video {
                id: format!("{}-page-{page}-{index}", original.id),
                ..original.clone()
            }
        }));
        self.page += 1;
        self.page_size
    }
}

impl Default for FeedCursor {
    fn default() -> Self {
        Self::new(Vec::new(), VIDEOS_PER_PAGE)
    }
}

pub enum FeedAction {
    Reset(Vec<Video>),
    LoadMore,
}

impl Reducible for FeedCursor {
    type Action = FeedAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            FeedAction::Reset(source) => Rc::new(FeedCursor::new(source, self.page_size)),
            FeedAction::LoadMore => {
                let mut next = (*self).clone();
                next.load_more();
                Rc::new(next)
            }
        }
    }
}

pub fn near_bottom(scroll_top: i32, client_height: i32, scroll_height: i32) -> bool {
    scroll_top + client_height >= scroll_height - SCROLL_THRESHOLD_PX
}

#[derive(Properties, PartialEq)]
pub struct VideoFeedProps {
    pub videos: Vec<Video>,
    pub loading: bool,
    pub load_delay_ms: u32,
    #[prop_or_default]
    pub empty_message: Option<AttrValue>,
}

#[function_component(VideoFeed)]
pub fn video_feed(props: &VideoFeedProps) -> Html {
    let cursor = use_reducer(FeedCursor::default);
    let loading_more = use_state(|| false);
    let pending = use_mut_ref(|| None::<Timeout>);

    {
        let cursor = cursor.clone();
        use_effect_with(props.videos.clone(), move |videos| {
            cursor.dispatch(FeedAction::Reset(videos.clone()));
            || ()
        });
    }

    let onscroll = {
        let cursor = cursor.clone();
        let loading_more = loading_more.clone();
        let pending = pending.clone();
        let delay = props.load_delay_ms;
        let busy = props.loading || *loading_more || cursor.is_empty();
        Callback::from(move |event: Event| {
            if busy {
                return;
            }
            let container: Element = event.target_unchecked_into();
            if !near_bottom(
                container.scroll_top(),
                container.client_height(),
                container.scroll_height(),
            ) {
                return;
            }
            loading_more.set(true);
            let cursor = cursor.clone();
            let loading_more = loading_more.clone();
            *pending.borrow_mut() = Some(Timeout::new(delay, move || {
                cursor.dispatch(FeedAction::LoadMore);
                loading_more.set(false);
            }));
        })
    };

    let content = if props.loading {
        html! { <CardLoader count={VIDEOS_PER_PAGE} /> }
    } else if cursor.displayed().is_empty() {
        let message = props
            .empty_message
            .clone()
            .unwrap_or_else(|| AttrValue::from("No videos found."));
        html! { <p class="py-16 text-center text-gray-400">{ message }</p> }
    } else {
        html! {
            <div class="grid grid-cols-1 gap-5 md:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4">
                { for cursor.displayed().iter().map(|video| html! {
                    <VideoCard key={video.id.clone()} video={video.clone()} />
                })}
            </div>
        }
    };

    html! {
        <div class="custom-scrollbar h-full w-full overflow-y-auto p-5" {onscroll}>
            { content }
            if *loading_more {
                <SpinnerLoader text="Loading more videos..." />
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn videos(count: usize) -> Vec<Video> {
        (1..=count)
            .map(|i| Video {
                id: i.to_string(),
                title: format!("Video {i}"),
                ..Video::default()
            })
            .collect()
    }

    fn ids(cursor: &FeedCursor) -> Vec<&str> {
        cursor.displayed().iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn first_page_is_the_head_of_the_source() {
        let cursor = FeedCursor::new(videos(3), 2);
        assert_eq!(ids(&cursor), vec!["1", "2"]);
    }

    #[test]
    fn further_pages_cycle_with_rewritten_ids() {
        let mut cursor = FeedCursor::new(videos(3), 2);
        assert_eq!(cursor.load_more(), 2);
        assert_eq!(cursor.load_more(), 2);
        assert_eq!(
            ids(&cursor),
            vec!["1", "2", "3-page-1-0", "1-page-1-1", "2-page-2-0", "3-page-2-1"]
        );
        assert_eq!(cursor.displayed()[2].title, "Video 3");
    }

    #[test]
    fn displayed_count_never_shrinks() {
        let mut cursor = FeedCursor::new(videos(4), 3);
        let mut previous = cursor.displayed().len();
        for _ in 0..5 {
            cursor.load_more();
            assert!(cursor.displayed().len() > previous);
            previous = cursor.displayed().len();
        }
    }

    #[test]
    fn empty_source_loads_nothing() {
        let mut cursor = FeedCursor::new(Vec::new(), 10);
        assert_eq!(cursor.load_more(), 0);
        assert!(cursor.displayed().is_empty());
    }

    #[test]
    fn bottom_detection_uses_threshold() {
        assert!(near_bottom(900, 500, 1450));
        assert!(!near_bottom(800, 500, 1450));
    }
}
