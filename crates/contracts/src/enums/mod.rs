pub mod calculation_version;
pub mod cost_category;
