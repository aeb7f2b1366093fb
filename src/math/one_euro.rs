// src/math/one_euro.rs

use std::f64::consts::PI;

use log::{debug, trace};

use crate::config::parameters::FilterParameters;
use crate::math::error::FilterError;
use crate::math::filter::LowPassFilter;

/// 1€フィルタ
///
/// 信号の変化速度から毎回カットオフ周波数を決め直す適応型ローパスフィルタ。
/// 静止時はジッタを抑え、速い動きでは遅れを減らす。
#[derive(Debug, Clone, PartialEq)]
pub struct OneEuroFilter {
    frequency: f64,         // サンプリング周波数 (Hz)
    min_cutoff: f64,        // 最小カットオフ周波数 (Hz)
    beta: f64,              // 遅れ低減係数
    derivative_cutoff: f64, // 微分値用カットオフ周波数 (Hz)
    value_filter: LowPassFilter,
    derivative_filter: LowPassFilter,
    last_timestamp: Option<f64>,
}

impl OneEuroFilter {
    /// フィルタの生成
    ///
    /// # 引数
    /// - `frequency`: 信号の周波数の推定値 (Hz, > 0)。タイムスタンプが無い場合に使う
    /// - `min_cutoff`: 最小カットオフ周波数 (Hz, > 0)。小さいほどジッタを除去する
    /// - `beta`: 遅れ低減係数。符号は検証しない
    /// - `derivative_cutoff`: 微分値用カットオフ周波数 (Hz, > 0)
    pub fn new(
        frequency: f64,
        min_cutoff: f64,
        beta: f64,
        derivative_cutoff: f64,
    ) -> Result<Self, FilterError> {
        let frequency = FilterError::require_positive("frequency", frequency)?;
        let min_cutoff = FilterError::require_positive("min_cutoff", min_cutoff)?;
        let derivative_cutoff =
            FilterError::require_positive("derivative_cutoff", derivative_cutoff)?;

        let value_filter = LowPassFilter::new(smoothing_alpha(frequency, min_cutoff))?;
        let derivative_filter = LowPassFilter::new(smoothing_alpha(frequency, derivative_cutoff))?;

        Ok(OneEuroFilter {
            frequency,
            min_cutoff,
            beta,
            derivative_cutoff,
            value_filter,
            derivative_filter,
            last_timestamp: None,
        })
    }

    /// min_cutoff = 1.0, beta = 0.0, derivative_cutoff = 1.0 で生成する
    pub fn with_frequency(frequency: f64) -> Result<Self, FilterError> {
        Self::new(frequency, 1.0, 0.0, 1.0)
    }

    pub fn from_parameters(params: &FilterParameters) -> Result<Self, FilterError> {
        Self::new(
            params.frequency,
            params.min_cutoff,
            params.beta,
            params.derivative_cutoff,
        )
    }

    /// 現在のパラメータの写し
    pub fn parameters(&self) -> FilterParameters {
        FilterParameters {
            frequency: self.frequency,
            min_cutoff: self.min_cutoff,
            beta: self.beta,
            derivative_cutoff: self.derivative_cutoff,
        }
    }

    /// カットオフ周波数から現在のサンプリング周波数に対応する係数を求める
    fn alpha(&self, cutoff: f64) -> f64 {
        smoothing_alpha(self.frequency, cutoff)
    }

    /// ノイズを含む値をフィルタする
    ///
    /// # 引数
    /// - `x`: 入力値
    /// - `timestamp`: 秒単位のタイムスタンプ
    ///
    /// # 戻り値
    /// - フィルタ後の値
    /// - `set_beta` / `set_derivative_cutoff` で範囲外の値が設定され、係数が (0, 1] を
    ///   外れた場合は `FilterError::InvalidParameter`
    /// - NaN や桁あふれする入力はエラーにせず NaN を返す。以降の出力も `reset` まで NaN
    pub fn filter(&mut self, x: f64, timestamp: Option<f64>) -> Result<f64, FilterError> {
        // タイムスタンプからサンプリング周波数を推定
        if let (Some(last), Some(now)) = (self.last_timestamp, timestamp) {
            if now > last {
                self.frequency = 1.0 / (now - last);
                trace!("frequency re-estimated to {} Hz", self.frequency);
            } else {
                trace!("non-increasing timestamp {} (last {}) ignored", now, last);
            }
        }
        self.last_timestamp = timestamp;

        // 1秒あたりの変化量を推定
        let dx = match self.value_filter.last_filtered_value() {
            Some(previous) => (x - previous) * self.frequency,
            None => 0.0,
        };
        let alpha_d = self.alpha(self.derivative_cutoff);
        let edx = self.derivative_filter.apply_derived(dx, timestamp, alpha_d)?;

        let cutoff = self.min_cutoff + self.beta * edx.abs();
        let alpha = self.alpha(cutoff);
        self.value_filter.apply_derived(x, timestamp, alpha)
    }

    pub fn set_frequency(&mut self, frequency: f64) -> Result<(), FilterError> {
        self.frequency = FilterError::require_positive("frequency", frequency)?;
        Ok(())
    }

    pub fn set_min_cutoff(&mut self, min_cutoff: f64) -> Result<(), FilterError> {
        self.min_cutoff = FilterError::require_positive("min_cutoff", min_cutoff)?;
        Ok(())
    }

    pub fn set_beta(&mut self, beta: f64) {
        self.beta = beta;
    }

    /// 微分値用カットオフ周波数の設定
    ///
    /// 生成時と異なりここでは値を検証しない。0 以下を設定した場合、次の
    /// `filter` 呼び出しが `FilterError::InvalidParameter` を返す。
    pub fn set_derivative_cutoff(&mut self, derivative_cutoff: f64) {
        self.derivative_cutoff = derivative_cutoff;
    }

    /// 全パラメータの設定
    ///
    /// 各セッターを順に呼ぶだけで、まとめて巻き戻すことはしない。どれかが
    /// 失敗しても残りのフィールドは設定され、最初のエラーが返る。
    pub fn set_parameters(
        &mut self,
        frequency: f64,
        min_cutoff: f64,
        beta: f64,
        derivative_cutoff: f64,
    ) -> Result<(), FilterError> {
        let frequency_result = self.set_frequency(frequency);
        let min_cutoff_result = self.set_min_cutoff(min_cutoff);
        self.set_beta(beta);
        self.set_derivative_cutoff(derivative_cutoff);
        frequency_result.and(min_cutoff_result)
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn min_cutoff(&self) -> f64 {
        self.min_cutoff
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn derivative_cutoff(&self) -> f64 {
        self.derivative_cutoff
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    /// 内部状態のリセット
    pub fn reset(&mut self) {
        self.value_filter.reset();
        self.derivative_filter.reset();
        self.last_timestamp = None;
        debug!("one euro filter reset");
    }
}

/// te = 1/frequency, tau = 1/(2π·cutoff) としたときの 1/(1 + tau/te)
fn smoothing_alpha(frequency: f64, cutoff: f64) -> f64 {
    let te = 1.0 / frequency;
    let tau = 1.0 / (2.0 * PI * cutoff);
    1.0 / (1.0 + tau / te)
}
