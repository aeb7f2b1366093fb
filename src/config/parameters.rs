// src/config/parameters.rs

use serde::Deserialize;

/// 1€フィルタのパラメータ
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct FilterParameters {
    pub frequency: f64, // 信号の周波数 (Hz)
    #[serde(default = "default_min_cutoff")]
    pub min_cutoff: f64, // 最小カットオフ周波数 (Hz)
    #[serde(default)]
    pub beta: f64, // 遅れ低減係数
    #[serde(default = "default_derivative_cutoff")]
    pub derivative_cutoff: f64, // 微分値用カットオフ周波数 (Hz)
}

impl FilterParameters {
    pub fn with_frequency(frequency: f64) -> Self {
        FilterParameters {
            frequency,
            min_cutoff: default_min_cutoff(),
            beta: 0.0,
            derivative_cutoff: default_derivative_cutoff(),
        }
    }
}

impl Default for FilterParameters {
    fn default() -> Self {
        FilterParameters::with_frequency(120.0)
    }
}

fn default_min_cutoff() -> f64 {
    1.0
}

fn default_derivative_cutoff() -> f64 {
    1.0
}
