//! Rearranges the video.js control bar: progress bar on its own row, playback
//! controls on the left, settings on the right.

use super::bindings::Player;
use crate::error::PlayerError;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

pub const LEFT_CONTROLS: [&str; 5] = [
    "playToggle",
    "volumePanel",
    "currentTimeDisplay",
    "timeDivider",
    "durationDisplay",
];
pub const RIGHT_CONTROLS: [&str; 3] = [
    "playbackRateMenuButton",
    "pictureInPictureToggle",
    "fullscreenToggle",
];

/// Controls the default skin hides that the left cluster shows anyway.
pub const TIME_CONTROLS: [&str; 3] = ["currentTimeDisplay", "timeDivider", "durationDisplay"];

fn dom_error(err: wasm_bindgen::JsValue) -> PlayerError {
    PlayerError::Setup(format!("{err:?}"))
}

fn cluster(document: &Document, class: &str) -> Result<Element, PlayerError> {
    let element = document.create_element("div").map_err(dom_error)?;
    element.set_class_name(class);
    Ok(element)
}

fn move_children(player: &Player, names: &[&str], target: &Element) -> Result<(), PlayerError> {
    let control_bar = player.control_bar();
    for name in names {
        match control_bar.get_child(name) {
            Some(child) => {
                let element = child.el();
                if TIME_CONTROLS.contains(name) {
                    if let Some(html) = element.dyn_ref::<HtmlElement>() {
                        html.style().set_property("display", "block").map_err(dom_error)?;
                    }
                }
                target.append_child(&element).map_err(dom_error)?;
            }
            None => log::debug!("Control bar has no '{name}'"),
        }
    }
    Ok(())
}

/// Rebuilds the control bar as progress bar, left cluster, right cluster.
/// Controls not named in either cluster are dropped from the bar.
///
/// Returns the right cluster, where the quality button is appended later.
pub fn apply_control_layout(player: &Player) -> Result<Element, PlayerError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| PlayerError::Setup("no document".to_string()))?;

    let bar = player.control_bar().el();
    let progress = player
        .control_bar()
        .get_child("progressControl")
        .map(|progress| progress.el());
    let left = cluster(&document, "vjs-left-controls")?;
    let right = cluster(&document, "vjs-right-controls")?;

    move_children(player, &LEFT_CONTROLS, &left)?;
    move_children(player, &RIGHT_CONTROLS, &right)?;

    bar.set_inner_html("");
    if let Some(progress) = &progress {
        bar.append_child(progress).map_err(dom_error)?;
    }
    bar.append_child(&left).map_err(dom_error)?;
    bar.append_child(&right).map_err(dom_error)?;

    Ok(right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_controls_sit_in_the_left_cluster() {
        assert!(TIME_CONTROLS.iter().all(|name| LEFT_CONTROLS.contains(name)));
        assert!(TIME_CONTROLS.iter().all(|name| !RIGHT_CONTROLS.contains(name)));
    }

    #[test]
    fn clusters_do_not_share_controls() {
        assert!(LEFT_CONTROLS.iter().all(|name| !RIGHT_CONTROLS.contains(name)));
        assert!(!LEFT_CONTROLS.contains(&"progressControl"));
        assert!(!RIGHT_CONTROLS.contains(&"progressControl"));
    }
}
