// src/replay/framework.rs

use std::error::Error;
use std::io::Write;

use log::{debug, info};

use crate::config::parameters::FilterParameters;
use crate::math::{FilterError, OneEuroFilter};
use crate::replay::csv::{create_csv_row, CsvError};
use crate::replay::{ReplayState, Sample};

/// リプレイステートの初期化
pub fn initialize_replay_state(
    params: &FilterParameters,
    channels: Vec<String>,
) -> Result<ReplayState, FilterError> {
    let filters = channels
        .iter()
        .map(|_| OneEuroFilter::from_parameters(params))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("initialized {} channel(s) with {:?}", channels.len(), params);
    Ok(ReplayState { channels, filters })
}

/// リプレイステップの実行
///
/// # 戻り値
/// - チャンネルごとのフィルタ後の値
/// - サンプルの値の数がチャンネル数と異なる場合は `CsvError::ChannelCount`
pub fn execute_replay_step(
    state: &mut ReplayState,
    sample: &Sample,
) -> Result<Vec<f64>, Box<dyn Error>> {
    if sample.values.len() != state.filters.len() {
        return Err(CsvError::ChannelCount {
            expected: state.filters.len(),
            found: sample.values.len(),
        }
        .into());
    }

    let filtered = state
        .filters
        .iter_mut()
        .zip(&sample.values)
        .map(|(filter, x)| filter.filter(*x, sample.timestamp))
        .collect::<Result<Vec<f64>, FilterError>>()?;
    Ok(filtered)
}

/// 全サンプルをフィルタしてCSV行を書き出す
///
/// # 戻り値
/// - 書き出した行数
pub fn run_replay<W: Write + ?Sized>(
    state: &mut ReplayState,
    samples: &[Sample],
    writer: &mut W,
) -> Result<usize, Box<dyn Error>> {
    for sample in samples {
        let filtered = execute_replay_step(state, sample)?;
        let row = create_csv_row(sample.timestamp, &sample.values, &filtered);
        writer.write_all(row.as_bytes())?;
    }
    writer.flush()?;

    info!(
        "filtered {} sample(s) across {} channel(s)",
        samples.len(),
        state.channels.len()
    );
    Ok(samples.len())
}
