//! YouTube-style keyboard shortcuts.

pub const SHORT_SEEK_SECONDS: f64 = 5.0;
pub const LONG_SEEK_SECONDS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shortcut {
    TogglePlay,
    ToggleFullscreen,
    /// Relative seek in seconds.
    Seek(f64),
    ToggleMute,
}

impl Shortcut {
    /// Maps a `KeyboardEvent.key` value to a shortcut, ignoring case.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            " " | "k" => Some(Self::TogglePlay),
            "f" => Some(Self::ToggleFullscreen),
            "arrowleft" => Some(Self::Seek(-SHORT_SEEK_SECONDS)),
            "arrowright" => Some(Self::Seek(SHORT_SEEK_SECONDS)),
            "j" => Some(Self::Seek(-LONG_SEEK_SECONDS)),
            "l" => Some(Self::Seek(LONG_SEEK_SECONDS)),
            "m" => Some(Self::ToggleMute),
            _ => None,
        }
    }
}

/// Shortcuts stay inactive while the user is typing somewhere.
pub fn is_text_entry(tag_name: &str, content_editable: bool) -> bool {
    content_editable
        || tag_name.eq_ignore_ascii_case("input")
        || tag_name.eq_ignore_ascii_case("textarea")
}

/// Clamps to `[0, duration]`; an unknown duration only clamps at zero.
pub fn seek_target(current: f64, delta: f64, duration: f64) -> f64 {
    let target = (current + delta).max(0.0);
    if duration.is_finite() && duration >= 0.0 {
        target.min(duration)
    } else {
        target
    }
}

pub trait PlaybackControls {
    fn paused(&self) -> bool;
    fn play(&self);
    fn pause(&self);
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    fn duration(&self) -> f64;
    fn muted(&self) -> bool;
    fn set_muted(&self, muted: bool);
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&self);
    fn exit_fullscreen(&self);
}

pub fn apply_shortcut<P: PlaybackControls + ?Sized>(player: &P, shortcut: Shortcut) {
    match shortcut {
        Shortcut::TogglePlay => {
            if player.paused() {
                player.play();
            } else {
                player.pause();
            }
        }
        Shortcut::ToggleFullscreen => {
            if player.is_fullscreen() {
                player.exit_fullscreen();
            } else {
                player.request_fullscreen();
            }
        }
        Shortcut::Seek(delta) => {
            let target = seek_target(player.current_time(), delta, player.duration());
            player.set_current_time(target);
        }
        Shortcut::ToggleMute => player.set_muted(!player.muted()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakePlayer {
        paused: Cell<bool>,
        time: Cell<f64>,
        duration: f64,
        muted: Cell<bool>,
        fullscreen: Cell<bool>,
    }

    impl FakePlayer {
        fn new(time: f64, duration: f64) -> Self {
            Self {
                paused: Cell::new(true),
                time: Cell::new(time),
                duration,
                muted: Cell::new(false),
                fullscreen: Cell::new(false),
            }
        }
    }

    impl PlaybackControls for FakePlayer {
        fn paused(&self) -> bool {
            self.paused.get()
        }
        fn play(&self) {
            self.paused.set(false);
        }
        fn pause(&self) {
            self.paused.set(true);
        }
        fn current_time(&self) -> f64 {
            self.time.get()
        }
        fn set_current_time(&self, seconds: f64) {
            self.time.set(seconds);
        }
        fn duration(&self) -> f64 {
            self.duration
        }
        fn muted(&self) -> bool {
            self.muted.get()
        }
        fn set_muted(&self, muted: bool) {
            self.muted.set(muted);
        }
        fn is_fullscreen(&self) -> bool {
            self.fullscreen.get()
        }
        fn request_fullscreen(&self) {
            self.fullscreen.set(true);
        }
        fn exit_fullscreen(&self) {
            self.fullscreen.set(false);
        }
    }

    #[test]
    fn key_mapping() {
        assert_eq!(Shortcut::from_key(" "), Some(Shortcut::TogglePlay));
        assert_eq!(Shortcut::from_key("K"), Some(Shortcut::TogglePlay));
        assert_eq!(Shortcut::from_key("ArrowLeft"), Some(Shortcut::Seek(-5.0)));
        assert_eq!(Shortcut::from_key("l"), Some(Shortcut::Seek(10.0)));
        assert_eq!(Shortcut::from_key("M"), Some(Shortcut::ToggleMute));
        assert_eq!(Shortcut::from_key("Enter"), None);
    }

    #[test]
    fn typing_disables_shortcuts() {
        assert!(is_text_entry("INPUT", false));
        assert!(is_text_entry("textarea", false));
        assert!(is_text_entry("DIV", true));
        assert!(!is_text_entry("BUTTON", false));
    }

    #[test]
    fn seeking_is_clamped() {
        assert_eq!(seek_target(3.0, -5.0, 100.0), 0.0);
        assert_eq!(seek_target(95.0, 10.0, 100.0), 100.0);
        assert_eq!(seek_target(40.0, 10.0, 100.0), 50.0);
        assert_eq!(seek_target(40.0, 10.0, f64::NAN), 50.0);
    }

    #[test]
    fn shortcuts_drive_the_player() {
        let player = FakePlayer::new(8.0, 12.0);

        apply_shortcut(&player, Shortcut::TogglePlay);
        assert!(!player.paused());
        apply_shortcut(&player, Shortcut::TogglePlay);
        assert!(player.paused());

        apply_shortcut(&player, Shortcut::Seek(10.0));
        assert_eq!(player.current_time(), 12.0);
        apply_shortcut(&player, Shortcut::Seek(-10.0));
        apply_shortcut(&player, Shortcut::Seek(-5.0));
        assert_eq!(player.current_time(), 0.0);

        apply_shortcut(&player, Shortcut::ToggleMute);
        assert!(player.muted());

        apply_shortcut(&player, Shortcut::ToggleFullscreen);
        assert!(player.is_fullscreen());
        apply_shortcut(&player, Shortcut::ToggleFullscreen);
        assert!(!player.is_fullscreen());
    }
}
