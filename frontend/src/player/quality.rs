//! Quality selection over the renditions reported by the quality-levels plugin.

use std::rc::Rc;
use yew::Reducible;

/// Snapshot of one entry of the player's quality level list.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendition {
    /// Pixel height; 0 when the stream didn't report one.
    pub height: u32,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityChoice {
    Auto,
    Height(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualityOption {
    pub label: String,
    pub choice: QualityChoice,
    pub selected: bool,
}

/// Auto means the player is free to switch between every rendition.
pub fn is_auto(levels: &[Rendition]) -> bool {
    levels.iter().all(|level| level.enabled)
}

/// "Auto" followed by every distinct height, highest first.
pub fn quality_options(levels: &[Rendition]) -> Vec<QualityOption> {
    let auto = is_auto(levels);
    let mut heights: Vec<u32> = levels
        .iter()
        .map(|level| level.height)
        .filter(|height| *height > 0)
        .collect();
    heights.sort_unstable_by(|a, b| b.cmp(a));
    heights.dedup();

    let mut options = vec![QualityOption {
        label: "Auto".to_string(),
        choice: QualityChoice::Auto,
        selected: auto,
    }];
    options.extend(heights.into_iter().map(|height| QualityOption {
        label: format!("{height}p"),
        choice: QualityChoice::Height(height),
        selected: !auto
            && levels
                .iter()
                .any(|level| level.enabled && level.height == height),
    }));
    options
}

/// New `enabled` flag for every level, in list order.
///
/// A height enables exactly one level: the first one with that height. An
/// unknown height leaves the flags as they are.
pub fn enabled_flags(levels: &[Rendition], choice: QualityChoice) -> Vec<bool> {
    match choice {
        QualityChoice::Auto => vec![true; levels.len()],
        QualityChoice::Height(height) => {
            match levels.iter().position(|level| level.height == height) {
                Some(chosen) => (0..levels.len()).map(|index| index == chosen).collect(),
                None => {
                    log::warn!("No quality level with height {height}");
                    levels.iter().map(|level| level.enabled).collect()
                }
            }
        }
    }
}

/// Open/closed state of the quality popup. One player owns one popup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityPopup {
    pub open: bool,
}

pub enum PopupAction {
    Toggle,
    Close,
}

impl Reducible for QualityPopup {
    type Action = PopupAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let open = match action {
            PopupAction::Toggle => !self.open,
            PopupAction::Close => false,
        };
        if open == self.open {
            self
        } else {
            Rc::new(Self { open })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(height: u32, enabled: bool) -> Rendition {
        Rendition { height, enabled }
    }

    fn labels(options: &[QualityOption]) -> Vec<&str> {
        options.iter().map(|o| o.label.as_str()).collect()
    }

    #[test]
    fn options_are_auto_then_heights_descending() {
        let levels = vec![
            level(360, true),
            level(1080, true),
            level(720, true),
            level(720, true),
            level(0, true),
        ];
        let options = quality_options(&levels);
        assert_eq!(labels(&options), vec!["Auto", "1080p", "720p", "360p"]);
        assert!(options[0].selected);
        assert!(options[1..].iter().all(|o| !o.selected));
    }

    #[test]
    fn picking_a_height_enables_exactly_one_level() {
        let levels = vec![level(360, true), level(720, true), level(720, true)];
        let flags = enabled_flags(&levels, QualityChoice::Height(720));
        assert_eq!(flags, vec![false, true, false]);

        let levels: Vec<_> = levels
            .into_iter()
            .zip(flags)
            .map(|(l, enabled)| Rendition { enabled, ..l })
            .collect();
        let options = quality_options(&levels);
        let selected: Vec<_> = options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].choice, QualityChoice::Height(720));
    }

    #[test]
    fn auto_enables_everything() {
        let levels = vec![level(360, false), level(720, true)];
        assert_eq!(enabled_flags(&levels, QualityChoice::Auto), vec![true, true]);
    }

    #[test]
    fn unknown_height_keeps_current_flags() {
        let levels = vec![level(360, false), level(720, true)];
        assert_eq!(
            enabled_flags(&levels, QualityChoice::Height(480)),
            vec![false, true]
        );
    }

    #[test]
    fn popup_toggles_and_closes() {
        let popup = Rc::new(QualityPopup::default());
        let popup = popup.reduce(PopupAction::Toggle);
        assert!(popup.open);
        let popup = popup.reduce(PopupAction::Close);
        assert!(!popup.open);
        let popup = popup.reduce(PopupAction::Close);
        assert!(!popup.open);
    }
}
