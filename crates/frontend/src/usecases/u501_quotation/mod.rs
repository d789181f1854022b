pub mod price_panel;
pub mod state;
pub mod view;
