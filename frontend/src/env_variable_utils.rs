use crate::config::{normalize_base_path, BUILD_BASE_PATH};
use lazy_static::lazy_static;
use web_sys::window;

lazy_static! {
    pub static ref BASE_PATH: String = get_base_path();
}

/// Reads `window.ENV_CONFIG[key]` as a string, if the page defines it.
pub fn get_env_var(key: &str) -> Option<String> {
    let env_config = js_sys::Reflect::get(&window()?.into(), &"ENV_CONFIG".into()).ok()?;
    if env_config.is_undefined() {
        log::debug!("ENV_CONFIG is undefined - using build-time defaults");
        return None;
    }

    match js_sys::Reflect::get(&env_config, &key.into()) {
        Ok(value) if !value.is_undefined() => value.as_string(),
        _ => {
            log::debug!("Environment variable '{key}' is undefined");
            None
        }
    }
}

/// Runtime `BASE_PATH` wins over the value baked in at build time.
pub fn get_base_path() -> String {
    get_env_var("BASE_PATH")
        .map(|raw| normalize_base_path(&raw))
        .unwrap_or_else(|| BUILD_BASE_PATH.clone())
}

pub fn get_app_name() -> String {
    get_env_var("APP_NAME").unwrap_or_else(|| "VidStream".to_string())
}

pub fn is_debug_mode() -> bool {
    get_env_var("DEBUG_MODE")
        .unwrap_or_else(|| "false".to_string())
        .parse()
        .unwrap_or(false)
}
