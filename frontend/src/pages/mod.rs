pub mod history;
pub mod home;
pub mod not_found;
pub mod playlist_detail;
pub mod playlists;
pub mod subscriptions;
pub mod watch;
