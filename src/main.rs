// src/main.rs

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use log::info;
use structopt::StructOpt;

use one_euro_filter::replay::csv::{read_samples, setup_csv_output};
use one_euro_filter::replay::framework::{initialize_replay_state, run_replay};
use one_euro_filter::replay::load_parameters::load_filter_parameters;
use one_euro_filter::FilterParameters;

#[derive(StructOpt, Debug)]
#[structopt(name = "one_euro_filter", about = "CSVの信号を1€フィルタで平滑化する")]
struct Opt {
    /// フィルタパラメータのYAMLファイル (省略時は 120 Hz の既定値)
    #[structopt(short = "c", long = "config", parse(from_os_str))]
    config: Option<PathBuf>,

    /// 入力CSV (timestamp,<チャンネル>...)
    #[structopt(short = "i", long = "input", parse(from_os_str))]
    input: PathBuf,

    /// 出力CSV (省略時は標準出力)
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let opt = Opt::from_args();

    // パラメータの読み込み
    let params = match &opt.config {
        Some(path) => load_filter_parameters(path)?,
        None => FilterParameters::default(),
    };
    info!("filter parameters: {:?}", params);

    // 入力サンプルの読み込み
    let (channels, samples) = read_samples(BufReader::new(File::open(&opt.input)?))?;

    let mut state = initialize_replay_state(&params, channels)?;

    // CSV出力の設定
    let mut writer = setup_csv_output(opt.output.as_deref(), &state)?;

    run_replay(&mut state, &samples, &mut writer)?;

    Ok(())
}
