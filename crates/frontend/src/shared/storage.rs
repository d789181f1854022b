use serde::de::DeserializeOwned;
use serde::Serialize;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Load a JSON value from localStorage, `None` when missing or unreadable
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = local_storage()?.get_item(key).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring stored {}: {}", key, e);
            None
        }
    }
}

/// Save a JSON value to localStorage
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    let Some(storage) = local_storage() else {
        return;
    };
    match serde_json::to_string(value) {
        Ok(raw) => {
            let _ = storage.set_item(key, &raw);
        }
        Err(e) => log::warn!("Cannot store {}: {}", key, e),
    }
}
