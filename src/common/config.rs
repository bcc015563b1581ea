//! コマンドライン設定
//!
//! 既定値は `constants` のものを使い、指定された項目だけ上書きする。

use super::constants::{VIEW_HEIGHT, VIEW_WIDTH};
use super::error::ViewerError;
use super::fractal::{FractalMode, IterationBudget};
use super::session::{AnimationClock, ExplorerState};
use super::viewport::Resolution;
use clap::{Parser, ValueEnum};
use num_complex::Complex;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "マンデルブロ集合・ジュリア集合ビューア")]
pub struct Options {
    /// 描画領域の幅 (ピクセル)
    #[arg(long, default_value_t = VIEW_WIDTH, value_parser = parse_dimension)]
    pub width: usize,

    /// 描画領域の高さ (ピクセル)
    #[arg(long, default_value_t = VIEW_HEIGHT, value_parser = parse_dimension)]
    pub height: usize,

    /// 初期モード
    #[arg(long, value_enum, default_value_t = ModeArg::Mandelbrot)]
    pub mode: ModeArg,

    /// ジュリア集合のシード "実部,虚部"
    #[arg(long, value_parser = parse_complex, allow_hyphen_values = true)]
    pub seed: Option<Complex<f64>>,

    /// 表示の中心 "実部,虚部"
    #[arg(long, value_parser = parse_complex, allow_hyphen_values = true)]
    pub center: Option<Complex<f64>>,

    /// 画面の高さに相当する複素平面上の幅 (> 0)
    #[arg(long, value_parser = parse_positive)]
    pub zoom: Option<f64>,

    /// 反復回数 (1..=2000 に丸められる)
    #[arg(long, allow_negative_numbers = true)]
    pub iterations: Option<i64>,

    /// 1フレームだけ描画して PNG に保存し、終了する
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// `--output` 時のパレット時刻 (秒)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub time: f64,

    /// パレットの時間変化を止める
    #[arg(long)]
    pub static_palette: bool,
}

/// `--mode` の値
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    Mandelbrot,
    Julia,
}

impl From<ModeArg> for FractalMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Mandelbrot => FractalMode::Mandelbrot,
            ModeArg::Julia => FractalMode::Julia,
        }
    }
}

impl Options {
    pub fn resolution(&self) -> Result<Resolution, ViewerError> {
        Resolution::new(self.width, self.height)
    }

    /// 指定された項目で初期状態を上書きする
    ///
    /// 反復回数の指定がなくズームだけ指定された場合は、ズーム深度から導出する。
    pub fn initial_state(&self) -> ExplorerState {
        let mut state = ExplorerState::new();
        state.mode = self.mode.into();
        if let Some(seed) = self.seed {
            state.julia_seed = seed;
        }
        if let Some(center) = self.center {
            state.viewport.center = center;
        }
        if let Some(zoom) = self.zoom {
            state.viewport.zoom = zoom;
            state.budget = IterationBudget::from_zoom(zoom);
        }
        if let Some(iterations) = self.iterations {
            state.budget = IterationBudget::new(iterations);
        }
        state
    }

    pub fn clock(&self) -> AnimationClock {
        if self.static_palette {
            AnimationClock::frozen()
        } else {
            AnimationClock::start()
        }
    }
}

/// 区切り文字で分けられた2つの値を取り出す
fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    let index = s.find(separator)?;
    match (T::from_str(s[..index].trim()), T::from_str(s[index + 1..].trim())) {
        (Ok(l), Ok(r)) => Some((l, r)),
        _ => None,
    }
}

/// "実部,虚部" 形式の複素数
pub fn parse_complex(s: &str) -> Result<Complex<f64>, String> {
    match parse_pair::<f64>(s, ',') {
        Some((re, im)) if re.is_finite() && im.is_finite() => Ok(Complex::new(re, im)),
        _ => Err(format!("\"実部,虚部\" の形式で指定してください: {}", s)),
    }
}

fn parse_positive(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(format!("正の数を指定してください: {}", s)),
    }
}

fn parse_dimension(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(format!("1以上の整数を指定してください: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Options {
        Options::try_parse_from(std::iter::once("fractal-explorer").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn no_arguments_gives_defaults() {
        let options = parse(&[]);
        assert_eq!(options.resolution().unwrap(), Resolution::new(800, 600).unwrap());
        assert_eq!(options.initial_state(), ExplorerState::new());
        assert!(options.output.is_none());
        assert!(!options.static_palette);
    }

    #[test]
    fn parse_pair_accepts_separator() {
        assert_eq!(parse_pair::<i32>("800x600", 'x'), Some((800, 600)));
        assert_eq!(parse_pair::<i32>("800", 'x'), None);
        assert_eq!(parse_pair::<i32>("a,1", ','), None);
    }

    #[test]
    fn negative_complex_values_are_accepted() {
        let options = parse(&["--mode", "julia", "--seed", "-0.7,0.27015", "--center", "-1.5,-0.25"]);
        let state = options.initial_state();
        assert_eq!(state.mode, FractalMode::Julia);
        assert_eq!(state.julia_seed, Complex::new(-0.7, 0.27015));
        assert_eq!(state.viewport.center, Complex::new(-1.5, -0.25));
    }

    #[test]
    fn zoom_without_iterations_derives_budget() {
        let state = parse(&["--zoom", "0.001"]).initial_state();
        assert_eq!(state.viewport.zoom, 0.001);
        assert_eq!(state.budget, IterationBudget::from_zoom(0.001));
    }

    #[test]
    fn explicit_iterations_are_clamped() {
        assert_eq!(parse(&["--iterations", "-5"]).initial_state().budget.get(), 1);
        assert_eq!(parse(&["--iterations", "999999"]).initial_state().budget.get(), 2000);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad = [
            vec!["--zoom", "0"],
            vec!["--zoom", "-1"],
            vec!["--width", "0"],
            vec!["--seed", "1.0"],
            vec!["--mode", "burning-ship"],
        ];
        for args in bad {
            let result =
                Options::try_parse_from(std::iter::once("fractal-explorer").chain(args.iter().copied()));
            assert!(result.is_err(), "{:?} は拒否されるべき", args);
        }
    }
}
