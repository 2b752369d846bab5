use crate::components::feed::{near_bottom, FeedAction, FeedCursor};
use crate::components::loaders::{CardLoader, SpinnerLoader};
use crate::components::video_card::MiniVideoCard;
use crate::config::FEED_LOAD_DELAY_MS;
use crate::data::api::load_recommendations;
use crate::hooks::use_request_guard;
use gloo_timers::callback::Timeout;
use web_sys::Element;
use yew::prelude::*;

/// "Up next" list on the watch page, paged the same way as the home feed.
#[function_component(SideRecommendation)]
pub fn side_recommendation() -> Html {
    let cursor = use_reducer(FeedCursor::default);
    let loading = use_state(|| true);
    let loading_more = use_state(|| false);
    let pending = use_mut_ref(|| None::<Timeout>);
    let guard = use_request_guard();

    {
        let cursor = cursor.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            let ticket = guard.begin();
            wasm_bindgen_futures::spawn_local(async move {
                let videos = load_recommendations().await;
                if ticket.is_current() {
                    cursor.dispatch(FeedAction::Reset(videos));
                    loading.set(false);
                }
            });
            || ()
        });
    }

    let onscroll = {
        let cursor = cursor.clone();
        let loading_more = loading_more.clone();
        let busy = *loading || *loading_more || cursor.is_empty();
        Callback::from(move |event: Event| {
            if busy {
                return;
            }
            let container: Element = event.target_unchecked_into();
            if !near_bottom(container.scroll_top(), container.client_height(), container.scroll_height()) {
                return;
            }
            loading_more.set(true);
            let cursor = cursor.clone();
            let loading_more = loading_more.clone();
            *pending.borrow_mut() = Some(Timeout::new(FEED_LOAD_DELAY_MS, move || {
                cursor.dispatch(FeedAction::LoadMore);
                loading_more.set(false);
            }));
        })
    };

    html! {
        <div class="custom-scrollbar flex max-h-[80vh] flex-col gap-2 overflow-y-auto" {onscroll}>
            if *loading {
                <CardLoader count={6} compact=true />
            } else if cursor.displayed().is_empty() {
                <p class="py-6 text-center text-sm text-gray-400">{"No recommendations available"}</p>
            } else {
                { for cursor.displayed().iter().map(|video| html! {
                    <MiniVideoCard key={video.id.clone()} video={video.clone()} />
                })}
            }
            if *loading_more {
                <SpinnerLoader text="Loading more..." />
            }
        </div>
    }
}
