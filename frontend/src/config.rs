use lazy_static::lazy_static;

lazy_static! {
    pub static ref BUILD_BASE_PATH: String =
        normalize_base_path(option_env!("BASE_PATH").unwrap_or("/"));
}

pub const VIDEOS_PER_PAGE: usize = 10;
pub const HOME_LOAD_DELAY_MS: u32 = 2000;
pub const FEED_LOAD_DELAY_MS: u32 = 1000;
// Distance in px from the bottom of a scroll container that triggers loading
pub const SCROLL_THRESHOLD_PX: i32 = 100;
pub const SIDEBAR_VISIBLE_CHANNELS: usize = 6;
pub const LIKED_PLAYLIST_ID: &str = "liked-videos";

/// Strips the trailing slash so paths can be appended as `{base}/data/...`.
/// `/` becomes the empty string.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') || trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_base_path_is_empty() {
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path(""), "");
    }

    #[test]
    fn sub_path_loses_trailing_slash() {
        assert_eq!(normalize_base_path("/vidstream/"), "/vidstream");
        assert_eq!(normalize_base_path("vidstream"), "/vidstream");
        assert_eq!(
            normalize_base_path("https://cdn.example.com/app/"),
            "https://cdn.example.com/app"
        );
    }
}
