//! マンデルブロ集合・ジュリア集合インタラクティブビューア (CPU版)
//!
//! f64 + Rayon並列処理で1フレームずつ描画する。
//! パレットは時間とともにゆっくり変化する（`--static-palette` で停止）。
//!
//! `--output FILE` を指定するとウィンドウを開かずに1枚だけ保存する。

use clap::Parser;
use fractal_explorer::common::{
    config::Options,
    error::ViewerError,
    render::render_frame,
    session::FrameParams,
    viewer::{print_controls, render_to_file, Viewer},
};
use log::error;

fn run(options: Options) -> Result<(), ViewerError> {
    let resolution = options.resolution()?;
    let render = |frame: &FrameParams| Ok::<_, ViewerError>(render_frame(frame, resolution));

    if let Some(path) = &options.output {
        return render_to_file(&options.initial_state(), resolution, options.time, path, render);
    }

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║  フラクタルエクスプローラ (CPU版)                            ║");
    println!("║  🚀 f64 + 並列処理                                           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    print_controls();

    Viewer::new(&options, "CPU")?.run(render)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Options::parse()) {
        error!("{}", e);
        std::process::exit(1);
    }
}
