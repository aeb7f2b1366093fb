//! 1€フィルタ (One Euro Filter)
//!
//! ノイズを含むリアルタイムのスカラー信号を、遅れを抑えつつ平滑化する。

pub mod config;
pub mod math;
pub mod replay;

pub use config::parameters::FilterParameters;
pub use math::{FilterError, LowPassFilter, OneEuroFilter};
