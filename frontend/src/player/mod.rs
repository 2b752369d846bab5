//! Media playback controller around the global `videojs` player.

pub mod bindings;
pub mod component;
pub mod layout;
pub mod quality;
pub mod shortcuts;

pub use component::VideoPlayer;

pub const HLS_MIME_TYPE: &str = "application/x-mpegURL";
