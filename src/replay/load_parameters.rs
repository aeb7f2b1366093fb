// src/replay/load_parameters.rs

use std::error::Error;
use std::fs::File;
use std::path::Path;
use serde_yaml::{from_reader, from_str};

use crate::config::parameters::FilterParameters;

/// フィルタパラメータの読み込み
pub fn load_filter_parameters<P: AsRef<Path>>(path: P) -> Result<FilterParameters, Box<dyn Error>> {
    let file = File::open(path)?;
    let params: FilterParameters = from_reader(file)?;
    Ok(params)
}

/// YAML文字列からのフィルタパラメータの読み込み
pub fn parse_filter_parameters(yaml: &str) -> Result<FilterParameters, Box<dyn Error>> {
    let params: FilterParameters = from_str(yaml)?;
    Ok(params)
}
