//! CPU 描画と画像保存

use super::colors::{rgb_to_u32, u32_to_rgb};
use super::error::ViewerError;
use super::session::FrameParams;
use super::viewport::Resolution;
use image::{ImageBuffer, Rgb, RgbImage};
use rayon::prelude::*;
use std::path::Path;

/// フレームバッファの (列, 行) をフラグメント座標に変換
///
/// 行 0 が画面の最上段。フラグメント座標はピクセル中心・左下原点。
#[inline]
pub fn fragment_coord(col: usize, row: usize, resolution: Resolution) -> (f64, f64) {
    (
        col as f64 + 0.5,
        resolution.height as f64 - row as f64 - 0.5,
    )
}

/// 1フレーム分を Rayon で行単位に並列計算する（u32形式: 0xRRGGBB）
pub fn render_frame(params: &FrameParams, resolution: Resolution) -> Vec<u32> {
    let mut buffer = vec![0u32; resolution.len()];
    buffer
        .par_chunks_mut(resolution.width)
        .enumerate()
        .for_each(|(row, line)| {
            for (col, pixel) in line.iter_mut().enumerate() {
                let (x, y) = fragment_coord(col, row, resolution);
                *pixel = rgb_to_u32(params.color_at_pixel(x, y, resolution));
            }
        });
    buffer
}

/// フレームバッファを画像に変換
///
/// バッファの長さが解像度のピクセル数と異なる場合はエラー。
pub fn to_image(buffer: &[u32], resolution: Resolution) -> Result<RgbImage, ViewerError> {
    if buffer.len() != resolution.len() {
        return Err(ViewerError::BufferSize {
            expected: resolution.len(),
            actual: buffer.len(),
        });
    }
    Ok(ImageBuffer::from_fn(
        resolution.width as u32,
        resolution.height as u32,
        |x, y| Rgb(u32_to_rgb(buffer[(y as usize) * resolution.width + (x as usize)])),
    ))
}

/// フレームバッファを PNG として保存
pub fn save_png(buffer: &[u32], resolution: Resolution, path: &Path) -> Result<(), ViewerError> {
    to_image(buffer, resolution)?.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::session::ExplorerState;

    #[test]
    fn fragment_rows_count_up_from_the_bottom() {
        let res = Resolution::new(4, 3).unwrap();
        assert_eq!(fragment_coord(0, 0, res), (0.5, 2.5));
        assert_eq!(fragment_coord(3, 2, res), (3.5, 0.5));
    }

    #[test]
    fn frame_has_one_pixel_per_resolution_cell() {
        let res = Resolution::new(16, 9).unwrap();
        let frame = render_frame(&ExplorerState::new().snapshot(0.0), res);
        assert_eq!(frame.len(), 16 * 9);
    }

    #[test]
    fn default_view_center_is_black_and_corner_is_colored() {
        let res = Resolution::new(64, 48).unwrap();
        let frame = render_frame(&ExplorerState::new().snapshot(0.0), res);
        assert_eq!(frame[24 * 64 + 32], 0x000000);
        // 左上 ≈ (-2.5, 1.5) は2回目の反復で脱出する
        assert_ne!(frame[0], 0x000000);
    }

    #[test]
    fn image_conversion_keeps_channel_order() {
        let res = Resolution::new(2, 1).unwrap();
        let img = to_image(&[0xFF0000, 0x0000FF], res).unwrap();
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([0, 0, 255]));
    }

    #[test]
    fn image_conversion_rejects_mismatched_buffer() {
        let res = Resolution::new(4, 4).unwrap();
        match to_image(&[0u32; 15], res) {
            Err(ViewerError::BufferSize { expected, actual }) => {
                assert_eq!((expected, actual), (16, 15));
            }
            other => panic!("unexpected result: {:?}", other.map(|img| img.dimensions())),
        }
    }
}
