// src/math/mod.rs

pub mod filter;
pub mod one_euro;
pub mod error;

pub use filter::LowPassFilter;
pub use one_euro::OneEuroFilter;
pub use error::FilterError;
