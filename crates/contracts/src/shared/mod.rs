pub mod api;
pub mod costing;
