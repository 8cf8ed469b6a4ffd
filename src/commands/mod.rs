pub mod average;
pub mod config;
pub mod dry;
