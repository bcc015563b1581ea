//! GPU (wgpu コンピュートシェーダー) による描画
//!
//! カーネルは `fractal.wgsl` に f32 で実装されている。CPU 版と同じ
//! 変換・反復・配色を行うが、拡大すると f64 より早く精度が尽きる。

use super::error::ViewerError;
use super::fractal::FractalMode;
use super::session::FrameParams;
use super::viewport::Resolution;
use bytemuck::{Pod, Zeroable};
use log::info;

/// ワークグループの一辺（シェーダーの `@workgroup_size` と一致させる）
const WORKGROUP_SIZE: u32 = 8;

/// GPU に渡すパラメータ構造体
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuParams {
    pub center_x: f32,
    pub center_y: f32,
    pub zoom: f32,
    pub time: f32,
    pub seed_x: f32,
    pub seed_y: f32,
    pub width: u32,
    pub height: u32,
    pub mode: u32,
    pub max_iter: u32,
    _padding: [u32; 2],
}

impl GpuParams {
    pub fn new(frame: &FrameParams, resolution: Resolution) -> Self {
        Self {
            center_x: frame.viewport.center.re as f32,
            center_y: frame.viewport.center.im as f32,
            zoom: frame.viewport.zoom as f32,
            time: frame.time as f32,
            seed_x: frame.julia_seed.re as f32,
            seed_y: frame.julia_seed.im as f32,
            width: resolution.width as u32,
            height: resolution.height as u32,
            mode: match frame.mode {
                FractalMode::Mandelbrot => 0,
                FractalMode::Julia => 1,
            },
            max_iter: frame.budget.get(),
            _padding: [0; 2],
        }
    }
}

/// GPU コンテキスト
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::ComputePipeline,
    params_buffer: wgpu::Buffer,
    output_buffer: wgpu::Buffer,
    staging_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    resolution: Resolution,
}

/// コンピュートシェーダーから見えるバッファのバインディング
fn buffer_binding(binding: u32, ty: wgpu::BufferBindingType) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

impl GpuContext {
    pub fn new(resolution: Resolution) -> Result<Self, ViewerError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or(ViewerError::NoAdapter)?;

        info!("GPU: {}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Fractal Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        ))?;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Fractal Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../fractal.wgsl").into()),
        });

        // binding 0: フレームのパラメータ, binding 1: 0xRRGGBB の出力
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Fractal Bind Group Layout"),
            entries: &[
                buffer_binding(0, wgpu::BufferBindingType::Uniform),
                buffer_binding(1, wgpu::BufferBindingType::Storage { read_only: false }),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Fractal Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Fractal Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        });

        // 出力とステージングは解像度ぶんの u32
        let buffer = |label: &str, size: u64, usage: wgpu::BufferUsages| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size,
                usage,
                mapped_at_creation: false,
            })
        };
        let frame_bytes = Self::output_size(resolution);
        let params_buffer = buffer(
            "Params Buffer",
            std::mem::size_of::<GpuParams>() as u64,
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );
        let output_buffer = buffer(
            "Output Buffer",
            frame_bytes,
            wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
        );
        let staging_buffer = buffer(
            "Staging Buffer",
            frame_bytes,
            wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        );

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Fractal Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: output_buffer.as_entire_binding(),
                },
            ],
        });

        Ok(Self {
            device,
            queue,
            pipeline,
            params_buffer,
            output_buffer,
            staging_buffer,
            bind_group,
            resolution,
        })
    }

    fn output_size(resolution: Resolution) -> u64 {
        (resolution.len() * std::mem::size_of::<u32>()) as u64
    }

    /// 1フレーム分を計算して読み戻す（u32形式: 0xRRGGBB）
    pub fn render(&self, frame: &FrameParams) -> Result<Vec<u32>, ViewerError> {
        let params = GpuParams::new(frame, self.resolution);
        self.queue
            .write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&params));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Fractal Encoder"),
            });

        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Fractal Compute Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            // 1ピクセル1スレッド、端数のワークグループはシェーダー側で範囲外を捨てる
            pass.dispatch_workgroups(
                params.width.div_ceil(WORKGROUP_SIZE),
                params.height.div_ceil(WORKGROUP_SIZE),
                1,
            );
        }

        encoder.copy_buffer_to_buffer(
            &self.output_buffer,
            0,
            &self.staging_buffer,
            0,
            Self::output_size(self.resolution),
        );
        self.queue.submit(Some(encoder.finish()));

        // マップ完了を待ってから読み出す
        let slice = self.staging_buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            sender.send(result).ok();
        });
        self.device.poll(wgpu::Maintain::Wait);
        receiver.recv().map_err(|_| ViewerError::ReadbackLost)??;

        let pixels = bytemuck::cast_slice::<u8, u32>(&slice.get_mapped_range()).to_vec();
        self.staging_buffer.unmap();

        Ok(pixels)
    }
}
