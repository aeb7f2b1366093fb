// src/replay/mod.rs

pub mod load_parameters;
pub mod csv;
pub mod framework;

use crate::math::OneEuroFilter;

/// 1行分の入力サンプル
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: Option<f64>,
    pub values: Vec<f64>, // チャンネルごとの値
}

/// リプレイの全体状態。チャンネルごとに独立したフィルタを持つ
#[derive(Debug, Clone)]
pub struct ReplayState {
    pub channels: Vec<String>,
    pub filters: Vec<OneEuroFilter>,
}
