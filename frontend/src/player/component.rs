use super::bindings::{create_player, MediaSource, Player, PlayerOptions, QualityLevelList};
use super::layout::apply_control_layout;
use super::quality::{
    enabled_flags, quality_options, PopupAction, QualityChoice, QualityOption, QualityPopup,
};
use super::shortcuts::{apply_shortcut, is_text_entry, Shortcut};
use super::HLS_MIME_TYPE;
use crate::error::PlayerError;
use gloo_events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, Node};
use yew::prelude::*;

const SETTINGS_ICON: &str = r#"<svg viewBox="0 0 24 24" width="20" height="20" fill="currentColor"><path d="M19.4 13a7.5 7.5 0 0 0 0-2l2.1-1.6-2-3.5-2.5 1a7.6 7.6 0 0 0-1.7-1L15 3h-4l-.3 2.9a7.6 7.6 0 0 0-1.7 1l-2.5-1-2 3.5L6.6 11a7.5 7.5 0 0 0 0 2l-2.1 1.6 2 3.5 2.5-1a7.6 7.6 0 0 0 1.7 1L11 21h4l.3-2.9a7.6 7.6 0 0 0 1.7-1l2.5 1 2-3.5zM13 15.5a3.5 3.5 0 1 1 0-7 3.5 3.5 0 0 1 0 7z"/></svg>"#;

#[derive(Properties, PartialEq)]
pub struct VideoPlayerProps {
    pub src: String,
    #[prop_or_else(|| HLS_MIME_TYPE.to_string())]
    pub mime_type: String,
    pub video_id: String,
    /// Emitted once per video id, on its first playback.
    #[prop_or_default]
    pub on_play: Callback<String>,
}

/// Values the long-lived JS listeners read; refreshed on every render.
#[derive(Default)]
struct PlayerBridge {
    video_id: String,
    on_play: Callback<String>,
    recorded: Option<String>,
}

type Bridge = Rc<RefCell<PlayerBridge>>;

struct QualityButton {
    element: Element,
    _click: EventListener,
}

/// A mounted player plus every listener attached to it. Dropping it
/// disposes the player.
struct PlayerHandle {
    player: Player,
    quality_levels: Option<QualityLevelList>,
    _keyboard: EventListener,
    _callbacks: Vec<Closure<dyn FnMut()>>,
    _quality_button: Rc<RefCell<Option<QualityButton>>>,
}

fn document() -> Option<Document> {
    web_sys::window().and_then(|window| window.document())
}

fn dom_error(err: JsValue) -> PlayerError {
    PlayerError::Setup(format!("{err:?}"))
}

fn text_entry_focused(document: &Document) -> bool {
    document.active_element().map_or(false, |element| {
        let editable = element
            .dyn_ref::<HtmlElement>()
            .map_or(false, |html| html.is_content_editable());
        is_text_entry(&element.tag_name(), editable)
    })
}

fn keyboard_listener(document: &Document, player: Player) -> EventListener {
    let focus_source = document.clone();
    EventListener::new(document, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if text_entry_focused(&focus_source) {
            return;
        }
        if let Some(shortcut) = Shortcut::from_key(&event.key()) {
            event.prevent_default();
            apply_shortcut(&player, shortcut);
        }
    })
}

fn quality_button(document: &Document, on_click: Callback<()>) -> Result<QualityButton, PlayerError> {
    let element = document.create_element("button").map_err(dom_error)?;
    element.set_class_name("vjs-quality-button vjs-control vjs-button");
    element.set_attribute("type", "button").map_err(dom_error)?;
    element.set_attribute("title", "Quality").map_err(dom_error)?;
    element.set_inner_html(SETTINGS_ICON);

    // Kept away from the player so it doesn't toggle playback, and from the
    // document so the popup's outside-click handler ignores it
    let click = EventListener::new(&element, "click", move |event| {
        event.stop_propagation();
        on_click.emit(());
    });
    Ok(QualityButton {
        element,
        _click: click,
    })
}

impl PlayerHandle {
    fn mount(
        container: &Element,
        source: MediaSource,
        bridge: Bridge,
        on_quality_click: Callback<()>,
    ) -> Result<Self, PlayerError> {
        let document = document().ok_or_else(|| PlayerError::Setup("no document".to_string()))?;

        let video = document.create_element("video").map_err(dom_error)?;
        video.set_class_name("video-js vjs-big-play-centered");
        video.set_attribute("playsinline", "").map_err(dom_error)?;
        container.append_child(&video).map_err(dom_error)?;

        let is_hls = source.mime_type == HLS_MIME_TYPE;
        let player = create_player(&video, &PlayerOptions::new(source))?;
        let right_cluster: Rc<RefCell<Option<Element>>> = Rc::default();

        {
            let layout_player = player.clone();
            let right_cluster = right_cluster.clone();
            let on_ready = Closure::once_into_js(move || match apply_control_layout(&layout_player) {
                Ok(right) => *right_cluster.borrow_mut() = Some(right),
                Err(e) => log::warn!("Keeping default control layout: {e}"),
            });
            player.ready(&on_ready);
        }

        let mut callbacks = Vec::new();

        let on_playing = Closure::<dyn FnMut()>::new(move || {
            let (video_id, on_play) = {
                let mut bridge = bridge.borrow_mut();
                if bridge.recorded.as_deref() == Some(bridge.video_id.as_str()) {
                    return;
                }
                bridge.recorded = Some(bridge.video_id.clone());
                (bridge.video_id.clone(), bridge.on_play.clone())
            };
            log::debug!("First playback of '{video_id}'");
            on_play.emit(video_id);
        });
        player.on("playing", on_playing.as_ref().unchecked_ref());
        callbacks.push(on_playing);

        let quality_slot: Rc<RefCell<Option<QualityButton>>> = Rc::default();
        let mut quality_levels = None;

        if is_hls && player.has_quality_levels() {
            let levels = player.quality_levels();
            let on_level_added = {
                let levels = levels.clone();
                let slot = quality_slot.clone();
                let document = document.clone();
                Closure::<dyn FnMut()>::new(move || {
                    if levels.length() <= 1 || slot.borrow().is_some() {
                        return;
                    }
                    let Some(right) = right_cluster.borrow().clone() else {
                        log::debug!("Control layout not ready, quality button deferred");
                        return;
                    };
                    match quality_button(&document, on_quality_click.clone()) {
                        Ok(button) => {
                            if let Err(e) = right.append_child(&button.element) {
                                log::warn!("Could not place quality button: {e:?}");
                                return;
                            }
                            *slot.borrow_mut() = Some(button);
                        }
                        Err(e) => log::warn!("{e}"),
                    }
                })
            };
            levels.on("addqualitylevel", on_level_added.as_ref().unchecked_ref());
            callbacks.push(on_level_added);
            quality_levels = Some(levels);
        }

        let keyboard = keyboard_listener(&document, player.clone());

        log::info!("Player mounted");
        Ok(Self {
            player,
            quality_levels,
            _keyboard: keyboard,
            _callbacks: callbacks,
            _quality_button: quality_slot,
        })
    }

    fn repoint(&self, source: &MediaSource) {
        if let Err(e) = self.player.change_source(source) {
            log::error!("Error changing source to {}: {e}", source.src);
        }
    }

    fn quality_options(&self) -> Vec<QualityOption> {
        self.quality_levels
            .as_ref()
            .map(|levels| quality_options(&levels.renditions()))
            .unwrap_or_default()
    }

    fn select_quality(&self, choice: QualityChoice) {
        if let Some(levels) = &self.quality_levels {
            let flags = enabled_flags(&levels.renditions(), choice);
            levels.apply_flags(&flags);
        }
    }
}

impl Drop for PlayerHandle {
    fn drop(&mut self) {
        self.player.dispose();
        log::info!("Player disposed");
    }
}

#[function_component(VideoPlayer)]
pub fn video_player(props: &VideoPlayerProps) -> Html {
    let container_ref = use_node_ref();
    let menu_ref = use_node_ref();
    let handle = use_mut_ref(|| None::<PlayerHandle>);
    let bridge = use_mut_ref(PlayerBridge::default);
    let error = use_state(|| None::<String>);
    let popup = use_reducer(QualityPopup::default);

    {
        let mut bridge = bridge.borrow_mut();
        bridge.video_id = props.video_id.clone();
        bridge.on_play = props.on_play.clone();
    }

    {
        let handle = handle.clone();
        let container_ref = container_ref.clone();
        let bridge = bridge.clone();
        let error = error.clone();
        let dispatcher = popup.dispatcher();
        use_effect_with(
            (props.src.clone(), props.mime_type.clone()),
            move |(src, mime_type)| {
                let source = MediaSource {
                    src: src.clone(),
                    mime_type: mime_type.clone(),
                };
                let mounted = handle.borrow().is_some();
                if mounted {
                    if let Some(existing) = handle.borrow().as_ref() {
                        existing.repoint(&source);
                    }
                } else if let Some(container) = container_ref.cast::<Element>() {
                    let on_quality_click =
                        Callback::from(move |_| dispatcher.dispatch(PopupAction::Toggle));
                    match PlayerHandle::mount(&container, source, bridge, on_quality_click) {
                        Ok(mounted) => *handle.borrow_mut() = Some(mounted),
                        Err(e) => {
                            log::error!("Error creating player: {e}");
                            error.set(Some(e.to_string()));
                        }
                    }
                }
                || ()
            },
        );
    }

    {
        let handle = handle.clone();
        use_effect_with((), move |_| {
            move || {
                handle.borrow_mut().take();
            }
        });
    }

    // Close the popup on any click outside of it
    {
        let menu_ref = menu_ref.clone();
        let dispatcher = popup.dispatcher();
        use_effect_with(popup.open, move |open| {
            let listener = if *open {
                document().map(|document| {
                    EventListener::new(&document, "click", move |event| {
                        let inside = event
                            .target()
                            .and_then(|target| target.dyn_into::<Node>().ok())
                            .zip(menu_ref.get())
                            .map_or(false, |(target, menu)| menu.contains(Some(&target)));
                        if !inside {
                            dispatcher.dispatch(PopupAction::Close);
                        }
                    })
                })
            } else {
                None
            };
            move || drop(listener)
        });
    }

    let menu = if popup.open {
        let options = handle
            .borrow()
            .as_ref()
            .map(PlayerHandle::quality_options)
            .unwrap_or_default();

        html! {
            <div ref={menu_ref} class="absolute bottom-14 right-2 z-20 min-w-[120px] rounded bg-black/90 p-2 text-sm text-white shadow-lg">
                { for options.into_iter().enumerate().map(|(index, option)| {
                    let onclick = {
                        let handle = handle.clone();
                        let popup = popup.clone();
                        let choice = option.choice;
                        Callback::from(move |_: MouseEvent| {
                            if let Some(player) = handle.borrow().as_ref() {
                                player.select_quality(choice);
                            }
                            popup.dispatch(PopupAction::Close);
                        })
                    };
                    let class = if option.selected {
                        "block w-full px-3 py-1 text-left font-semibold text-red-500"
                    } else {
                        "block w-full px-3 py-1 text-left hover:bg-white/10"
                    };
                    html! {
                        <>
                            <button type="button" {class} {onclick}>{ option.label }</button>
                            if index == 0 {
                                <hr class="my-1 border-white/20" />
                            }
                        </>
                    }
                })}
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <div class="relative w-full overflow-hidden rounded-xl bg-black">
            <div ref={container_ref} class="w-full" />
            { menu }
            if let Some(message) = &*error {
                <div class="flex aspect-video w-full items-center justify-center text-gray-300">
                    <p>{ format!("Video player unavailable: {message}") }</p>
                </div>
            }
        </div>
    }
}
