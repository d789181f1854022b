pub mod chart;
pub mod lookup;
