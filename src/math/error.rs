// src/math/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("パラメータ {name} ({value}) は {expected} の範囲である必要があります。")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

impl FilterError {
    /// 正の値でなければならないパラメータの検証
    pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, FilterError> {
        if value > 0.0 {
            Ok(value)
        } else {
            Err(FilterError::InvalidParameter {
                name,
                value,
                expected: "> 0",
            })
        }
    }
}
