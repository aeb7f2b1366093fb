// src/replay/csv.rs

use std::error;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::replay::{ReplayState, Sample};

#[derive(Error, Debug, PartialEq)]
pub enum CsvError {
    #[error("CSVにヘッダー行がありません。")]
    MissingHeader,
    #[error("ヘッダーにはタイムスタンプ列と1つ以上の値の列が必要です。")]
    NoChannels,
    #[error("ヘッダーの {column} 列目のチャンネル名が空です。")]
    EmptyChannelName { column: usize },
    #[error("サンプルの値の数が {expected} ではなく {found} です。")]
    ChannelCount { expected: usize, found: usize },
    #[error("{line} 行目: 列数が {expected} ではなく {found} です。")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{line} 行目 {column} 列目: 数値に変換できません: {text:?}")]
    InvalidNumber {
        line: usize,
        column: usize,
        text: String,
    },
}

/// 入力CSVの読み込み
///
/// 1行目はヘッダー (`timestamp,<チャンネル名>...`)。タイムスタンプ列が空の行は
/// タイムスタンプ無しとして扱う。
///
/// # 戻り値
/// - チャンネル名の一覧
/// - サンプルの一覧
pub fn read_samples<R: BufRead>(reader: R) -> Result<(Vec<String>, Vec<Sample>), Box<dyn error::Error>> {
    let mut lines = reader.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break line;
                }
            }
            None => return Err(CsvError::MissingHeader.into()),
        }
    };
    let channels: Vec<String> = header
        .split(',')
        .skip(1)
        .map(|name| name.trim().to_string())
        .collect();
    if channels.is_empty() {
        return Err(CsvError::NoChannels.into());
    }
    if let Some(index) = channels.iter().position(|name| name.is_empty()) {
        return Err(CsvError::EmptyChannelName { column: index + 2 }.into());
    }

    let mut samples = Vec::new();
    for (index, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        samples.push(parse_row(&line, index + 1, channels.len())?);
    }

    Ok((channels, samples))
}

/// 1行分のサンプルの解析
fn parse_row(line: &str, line_number: usize, channel_count: usize) -> Result<Sample, CsvError> {
    let cells: Vec<&str> = line.split(',').map(str::trim).collect();
    if cells.len() != channel_count + 1 {
        return Err(CsvError::ColumnCount {
            line: line_number,
            expected: channel_count + 1,
            found: cells.len(),
        });
    }

    let timestamp = if cells[0].is_empty() {
        None
    } else {
        Some(parse_number(cells[0], line_number, 1)?)
    };
    let values = cells[1..]
        .iter()
        .enumerate()
        .map(|(i, cell)| parse_number(cell, line_number, i + 2))
        .collect::<Result<Vec<f64>, CsvError>>()?;

    Ok(Sample { timestamp, values })
}

fn parse_number(text: &str, line: usize, column: usize) -> Result<f64, CsvError> {
    text.parse().map_err(|_| CsvError::InvalidNumber {
        line,
        column,
        text: text.to_string(),
    })
}

/// CSV出力の設定とヘッダーの書き込み
///
/// `path` が無い場合は標準出力に書き出す。
pub fn setup_csv_output(
    path: Option<&Path>,
    state: &ReplayState,
) -> Result<Box<dyn Write>, Box<dyn error::Error>> {
    let mut writer: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    write_csv_header(&mut writer, state)?;
    Ok(writer)
}

/// CSVヘッダーの書き込み
///
/// チャンネルが1つの場合は `timestamp,noisy,filtered` とする。
pub fn write_csv_header<W: Write>(writer: &mut W, state: &ReplayState) -> Result<(), io::Error> {
    let mut header = String::from("timestamp");

    if let [_] = state.channels.as_slice() {
        header.push_str(",noisy,filtered");
    } else {
        for channel in &state.channels {
            header.push_str(&format!(",{0}_noisy,{0}_filtered", channel));
        }
    }

    header.push('\n');
    writer.write_all(header.as_bytes())?;
    Ok(())
}

/// CSV行の作成
pub fn create_csv_row(timestamp: Option<f64>, noisy: &[f64], filtered: &[f64]) -> String {
    let mut row = match timestamp {
        Some(t) => format!("{}", t),
        None => String::new(),
    };

    for (x, fx) in noisy.iter().zip(filtered) {
        row.push_str(&format!(",{},{}", x, fx));
    }

    row.push('\n');
    row
}
