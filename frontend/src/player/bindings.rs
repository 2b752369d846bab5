//! `wasm-bindgen` imports for the global video.js player and the
//! quality-levels plugin, both loaded as plain scripts by `index.html`.

use super::quality::Rendition;
use super::shortcuts::PlaybackControls;
use crate::error::PlayerError;
use js_sys::{Function, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    pub type Player;

    #[wasm_bindgen(catch, js_name = videojs)]
    fn videojs(element: &Element, options: &JsValue) -> Result<Player, JsValue>;

    #[wasm_bindgen(method, js_name = paused)]
    fn is_paused(this: &Player) -> bool;

    #[wasm_bindgen(method, js_name = play)]
    fn start(this: &Player) -> JsValue;

    #[wasm_bindgen(method, js_name = pause)]
    fn stop(this: &Player);

    #[wasm_bindgen(method, js_name = currentTime)]
    fn get_current_time(this: &Player) -> f64;

    #[wasm_bindgen(method, js_name = currentTime)]
    fn seek_to(this: &Player, seconds: f64);

    #[wasm_bindgen(method, js_name = duration)]
    fn get_duration(this: &Player) -> f64;

    #[wasm_bindgen(method, js_name = muted)]
    fn is_muted(this: &Player) -> bool;

    #[wasm_bindgen(method, js_name = muted)]
    fn mute(this: &Player, muted: bool);

    #[wasm_bindgen(method, js_name = isFullscreen)]
    fn in_fullscreen(this: &Player) -> bool;

    #[wasm_bindgen(method, js_name = requestFullscreen)]
    fn enter_fullscreen(this: &Player);

    #[wasm_bindgen(method, js_name = exitFullscreen)]
    fn leave_fullscreen(this: &Player);

    #[wasm_bindgen(method, js_name = src)]
    fn set_source(this: &Player, source: &JsValue);

    #[wasm_bindgen(method)]
    pub fn ready(this: &Player, callback: &JsValue);

    #[wasm_bindgen(method)]
    pub fn on(this: &Player, event: &str, callback: &Function);

    #[wasm_bindgen(method)]
    pub fn dispose(this: &Player);

    #[wasm_bindgen(method, getter, js_name = controlBar)]
    pub fn control_bar(this: &Player) -> Component;

    #[wasm_bindgen(method, js_name = qualityLevels)]
    pub fn quality_levels(this: &Player) -> QualityLevelList;

    /// Any video.js UI component (control bar, buttons, ...).
    #[derive(Debug, Clone)]
    pub type Component;

    #[wasm_bindgen(method, js_name = getChild)]
    pub fn get_child(this: &Component, name: &str) -> Option<Component>;

    #[wasm_bindgen(method)]
    pub fn el(this: &Component) -> Element;

    #[derive(Debug, Clone)]
    pub type QualityLevelList;

    #[wasm_bindgen(method, getter)]
    pub fn length(this: &QualityLevelList) -> u32;

    #[wasm_bindgen(method)]
    pub fn on(this: &QualityLevelList, event: &str, callback: &Function);

    #[derive(Debug, Clone)]
    pub type QualityLevel;

    #[wasm_bindgen(method, getter)]
    fn height(this: &QualityLevel) -> Option<f64>;

    #[wasm_bindgen(method, getter)]
    fn enabled(this: &QualityLevel) -> bool;

    #[wasm_bindgen(method, setter)]
    fn set_enabled(this: &QualityLevel, enabled: bool);
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MediaSource {
    pub src: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HlsOptions {
    pub override_native: bool,
    pub smooth_quality_change: bool,
    pub enable_low_initial_playlist: bool,
    pub handle_partial_data: bool,
    pub max_buffer_length: u32,
    pub max_max_buffer_length: u32,
    pub max_buffer_size: u64,
    pub max_buffer_hole: f64,
}

impl Default for HlsOptions {
    fn default() -> Self {
        Self {
            override_native: true,
            smooth_quality_change: true,
            enable_low_initial_playlist: true,
            handle_partial_data: true,
            max_buffer_length: 30,
            max_max_buffer_length: 600,
            max_buffer_size: 60 * 1000 * 1000,
            max_buffer_hole: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Html5Options {
    pub hls: HlsOptions,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerOptions {
    pub controls: bool,
    pub responsive: bool,
    pub fluid: bool,
    pub playback_rates: Vec<f64>,
    pub sources: Vec<MediaSource>,
    pub html5: Html5Options,
}

impl PlayerOptions {
    pub fn new(source: MediaSource) -> Self {
        Self {
            controls: true,
            responsive: true,
            fluid: true,
            playback_rates: vec![0.5, 1.0, 1.25, 1.5, 2.0],
            sources: vec![source],
            html5: Html5Options {
                hls: HlsOptions::default(),
            },
        }
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, PlayerError> {
    let json = serde_json::to_string(value).map_err(|e| PlayerError::Setup(e.to_string()))?;
    js_sys::JSON::parse(&json).map_err(|e| PlayerError::Setup(format!("{e:?}")))
}

fn global_function(name: &str) -> bool {
    web_sys::window()
        .and_then(|window| Reflect::get(&window, &name.into()).ok())
        .map_or(false, |value| value.is_function())
}

pub fn create_player(element: &Element, options: &PlayerOptions) -> Result<Player, PlayerError> {
    if !global_function("videojs") {
        return Err(PlayerError::Unavailable(
            "the videojs script is not loaded".to_string(),
        ));
    }
    let options = to_js(options)?;
    videojs(element, &options).map_err(|e| PlayerError::Setup(format!("{e:?}")))
}

impl Player {
    pub fn change_source(&self, source: &MediaSource) -> Result<(), PlayerError> {
        self.set_source(&to_js(source)?);
        Ok(())
    }

    /// Whether the quality-levels plugin registered itself on this player.
    pub fn has_quality_levels(&self) -> bool {
        Reflect::get(self, &"qualityLevels".into()).map_or(false, |value| value.is_function())
    }
}

impl PlaybackControls for Player {
    fn paused(&self) -> bool {
        self.is_paused()
    }

    fn play(&self) {
        // Rejected play promises (autoplay policy) surface in the console
        let _ = self.start();
    }

    fn pause(&self) {
        self.stop();
    }

    fn current_time(&self) -> f64 {
        self.get_current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.seek_to(seconds);
    }

    fn duration(&self) -> f64 {
        self.get_duration()
    }

    fn muted(&self) -> bool {
        self.is_muted()
    }

    fn set_muted(&self, muted: bool) {
        self.mute(muted);
    }

    fn is_fullscreen(&self) -> bool {
        self.in_fullscreen()
    }

    fn request_fullscreen(&self) {
        self.enter_fullscreen();
    }

    fn exit_fullscreen(&self) {
        self.leave_fullscreen();
    }
}

impl QualityLevelList {
    fn level(&self, index: u32) -> Option<QualityLevel> {
        Reflect::get_u32(self, index)
            .ok()
            .filter(|value| value.is_object())
            .map(JsCast::unchecked_into)
    }

    pub fn renditions(&self) -> Vec<Rendition> {
        (0..self.length())
            .filter_map(|index| self.level(index))
            .map(|level| Rendition {
                height: level.height().unwrap_or(0.0) as u32,
                enabled: level.enabled(),
            })
            .collect()
    }

    pub fn apply_flags(&self, flags: &[bool]) {
        for (index, enabled) in (0..self.length()).zip(flags) {
            if let Some(level) = self.level(index) {
                level.set_enabled(*enabled);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_serialize_to_videojs_names() {
        let options = PlayerOptions::new(MediaSource {
            src: "/videos/1/master.m3u8".to_string(),
            mime_type: "application/x-mpegURL".to_string(),
        });
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json["playbackRates"], serde_json::json!([0.5, 1.0, 1.25, 1.5, 2.0]));
        assert_eq!(json["sources"][0]["type"], "application/x-mpegURL");
        assert_eq!(json["html5"]["hls"]["overrideNative"], true);
        assert_eq!(json["html5"]["hls"]["maxBufferSize"], 60_000_000);
        assert_eq!(json["fluid"], true);
    }
}
