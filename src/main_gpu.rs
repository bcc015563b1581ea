//! マンデルブロ集合・ジュリア集合インタラクティブビューア (GPU版)
//!
//! wgpu のコンピュートシェーダーで全ピクセルを並列に計算する。
//! GPU は f32 で計算するため、CPU版より浅い拡大率で画質が粗くなる。
//!
//! `--output FILE` を指定するとウィンドウを開かずに1枚だけ保存する。

use clap::Parser;
use fractal_explorer::common::{
    config::Options,
    error::ViewerError,
    gpu::GpuContext,
    session::FrameParams,
    viewer::{print_controls, render_to_file, Viewer},
};
use log::{error, info};

fn run(options: Options) -> Result<(), ViewerError> {
    let resolution = options.resolution()?;

    info!("GPU を初期化中...");
    let gpu = GpuContext::new(resolution)?;
    info!("GPU 初期化完了");

    let render = |frame: &FrameParams| gpu.render(frame);

    if let Some(path) = &options.output {
        return render_to_file(&options.initial_state(), resolution, options.time, path, render);
    }

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║  フラクタルエクスプローラ (GPU版)                            ║");
    println!("║  🎮 wgpu コンピュートシェーダー (f32)                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    print_controls();

    Viewer::new(&options, "GPU")?.run(render)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Options::parse()) {
        error!("{}", e);
        std::process::exit(1);
    }
}
