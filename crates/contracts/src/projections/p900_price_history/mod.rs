pub mod dto;
pub mod series;
