mod components;
mod config;
mod data;
mod env_variable_utils;
mod error;
mod hooks;
mod models;
mod pages;
mod player;
mod router;
mod storage;
mod utils;

use crate::components::layout::Layout;
use crate::env_variable_utils::{get_app_name, is_debug_mode, BASE_PATH};
use crate::hooks::InteractionContext;
use crate::router::{switch, Route};
use crate::storage::SUBSCRIBED_CHANNELS_KEY;
use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::StorageEvent;
use yew::prelude::*;
use yew_router::prelude::*;

/// Another tab changing the subscription set (or clearing storage) counts
/// as a local change.
fn is_subscription_change(key: Option<String>) -> bool {
    key.map_or(true, |key| key == SUBSCRIBED_CHANNELS_KEY)
}

#[function_component(App)]
pub fn app() -> Html {
    let context = use_memo((), |_| InteractionContext::new());

    {
        let notifier = context.notifier.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "storage", move |event| {
                    let Some(event) = event.dyn_ref::<StorageEvent>() else {
                        return;
                    };
                    if is_subscription_change(event.key()) {
                        log::debug!("Subscriptions changed in another tab");
                        notifier.notify();
                    }
                })
            });
            move || drop(listener)
        });
    }

    html! {
        <BrowserRouter>
            <ContextProvider<InteractionContext> context={(*context).clone()}>
                <Layout>
                    <Switch<Route> render={switch} />
                </Layout>
            </ContextProvider<InteractionContext>>
        </BrowserRouter>
    }
}

fn main() {
    let level = if is_debug_mode() {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));

    yew::Renderer::<App>::new().render();

    log::info!(
        "NAME: \"{}\", BASE: \"{}\" DEBUG: \"{}\"",
        get_app_name(),
        *BASE_PATH,
        is_debug_mode()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_events_that_touch_subscriptions() {
        assert!(is_subscription_change(Some(SUBSCRIBED_CHANNELS_KEY.to_string())));
        assert!(is_subscription_change(None));
        assert!(!is_subscription_change(Some("likedVideos".to_string())));
    }
}
