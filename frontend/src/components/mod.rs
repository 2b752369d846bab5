pub mod comments;
pub mod feed;
pub mod header;
pub mod layout;
pub mod loaders;
pub mod playlist_card;
pub mod playlist_sidebar;
pub mod side_recommendation;
pub mod sidebar;
pub mod status;
pub mod video_card;
