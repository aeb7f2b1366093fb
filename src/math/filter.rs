// src/math/filter.rs

use crate::math::error::FilterError;

/// 一階ローパスフィルタ (指数平滑)
///
/// `last_raw` と `last_filtered` は常に同時に設定・解除される。
#[derive(Debug, Clone, PartialEq)]
pub struct LowPassFilter {
    alpha: f64,
    last_raw: Option<f64>,
    last_filtered: Option<f64>,
}

impl LowPassFilter {
    /// フィルタの生成
    ///
    /// # 引数
    /// - `alpha`: フィルタ係数 (0, 1]
    ///
    /// # 戻り値
    /// - 範囲外の係数の場合は `FilterError::InvalidParameter`
    pub fn new(alpha: f64) -> Result<Self, FilterError> {
        Ok(LowPassFilter {
            alpha: validate_alpha(alpha)?,
            last_raw: None,
            last_filtered: None,
        })
    }

    /// 一階ローパスフィルタの適用
    ///
    /// # 引数
    /// - `value`: 入力値
    /// - `_timestamp`: タイムスタンプ (このフィルタでは使用しない)
    /// - `alpha`: 指定された場合、適用前にフィルタ係数を置き換える
    ///
    /// # 戻り値
    /// - フィルタ後の値。初回 (またはリセット直後) は入力値そのもの
    pub fn apply(
        &mut self,
        value: f64,
        _timestamp: Option<f64>,
        alpha: Option<f64>,
    ) -> Result<f64, FilterError> {
        if let Some(alpha) = alpha {
            self.alpha = validate_alpha(alpha)?;
        }
        Ok(self.smooth(value))
    }

    /// 信号から導出した係数でのフィルタ適用
    ///
    /// 係数が 0 以下または 1 より大きい場合のみ拒否する。入力が NaN や無限大の
    /// ときに導出される NaN の係数はそのまま使い、NaN を出力する。
    pub(crate) fn apply_derived(
        &mut self,
        value: f64,
        _timestamp: Option<f64>,
        alpha: f64,
    ) -> Result<f64, FilterError> {
        if alpha <= 0.0 || alpha > 1.0 {
            return Err(alpha_error(alpha));
        }
        self.alpha = alpha;
        Ok(self.smooth(value))
    }

    fn smooth(&mut self, value: f64) -> f64 {
        let filtered = match self.last_filtered {
            Some(previous) => self.alpha * value + (1.0 - self.alpha) * previous,
            None => value,
        };
        self.last_raw = Some(value);
        self.last_filtered = Some(filtered);
        filtered
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// 直前の入力値 (未入力なら `None`)
    pub fn last_raw_value(&self) -> Option<f64> {
        self.last_raw
    }

    /// 直前の出力値 (未入力なら `None`)
    pub fn last_filtered_value(&self) -> Option<f64> {
        self.last_filtered
    }

    /// 入出力の履歴を消去する。係数はそのまま
    pub fn reset(&mut self) {
        self.last_raw = None;
        self.last_filtered = None;
    }
}

fn validate_alpha(alpha: f64) -> Result<f64, FilterError> {
    if alpha > 0.0 && alpha <= 1.0 {
        Ok(alpha)
    } else {
        Err(alpha_error(alpha))
    }
}

fn alpha_error(alpha: f64) -> FilterError {
    FilterError::InvalidParameter {
        name: "alpha",
        value: alpha,
        expected: "(0.0, 1.0]",
    }
}
