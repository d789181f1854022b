pub mod api_utils;
pub mod category_state;
pub mod components;
pub mod date_utils;
pub mod icons;
pub mod list_utils;
pub mod load_state;
pub mod request_guard;
pub mod storage;
