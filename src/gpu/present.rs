//! Window presentation: uploads the canvas and draws it over the whole
//! swapchain image.

use super::texture::CanvasTexture;
use crate::{
    error::FireworksError,
    surface::{PixelCanvas, RenderSurface},
};

/// Presents a [`PixelCanvas`] to a window surface every frame.
///
/// Holds the device, the configured surface and the blit pipeline. The
/// canvas texture follows the canvas size; the surface follows the window.
pub struct CanvasPresenter {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    texture: CanvasTexture,
    bind_group: wgpu::BindGroup,
}

fn gpu_error(stage: &str, e: &impl std::fmt::Display) -> FireworksError {
    FireworksError::Gpu(format!("{stage}: {e}"))
}

impl CanvasPresenter {
    /// Connect to a GPU through `window` and prepare to present `canvas`.
    /// Presentation is vsynced, which paces the animation at the display
    /// refresh rate.
    ///
    /// # Errors
    ///
    /// Returns [`FireworksError::Gpu`] if no surface, adapter or device is
    /// available, or the surface cannot be configured.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        canvas: &PixelCanvas,
    ) -> Result<Self, FireworksError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(|e| gpu_error("surface creation failed", &e))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::LowPower,
                ..Default::default()
            })
            .await
            .map_err(|e| gpu_error("no compatible adapter", &e))?;
        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?})", info.name, info.backend);

        // A 2D blit needs nothing beyond WebGL2.
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Fireworks Device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await
            .map_err(|e| gpu_error("device request failed", &e))?;

        let (width, height) = canvas.dimensions();
        let mut config = surface
            .get_default_config(&adapter, width.max(1), height.max(1))
            .ok_or_else(|| {
                FireworksError::Gpu("surface unsupported by adapter".into())
            })?;
        config.present_mode = wgpu::PresentMode::Fifo;
        surface.configure(&device, &config);

        let format = CanvasTexture::format_for(config.format);
        let texture = CanvasTexture::new(&device, width, height, format);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Canvas Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let layout = canvas_layout(&device);
        let bind_group =
            canvas_bind_group(&device, &layout, &texture, &sampler);
        let pipeline = blit_pipeline(&device, &layout, config.format);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            pipeline,
            layout,
            sampler,
            texture,
            bind_group,
        })
    }

    /// Reconfigure the surface for a new window size. Zero sizes are
    /// ignored while the window is minimized.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload `canvas` and present it, reallocating the canvas texture
    /// first if the canvas changed size.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if no swapchain image could be
    /// acquired. `Lost` and `Outdated` clear after a [`resize`](Self::resize).
    pub fn present(
        &mut self,
        canvas: &PixelCanvas,
    ) -> Result<(), wgpu::SurfaceError> {
        if !self.texture.matches(canvas) {
            let (width, height) = canvas.dimensions();
            self.texture = CanvasTexture::new(
                &self.device,
                width,
                height,
                self.texture.texture.format(),
            );
            self.bind_group = canvas_bind_group(
                &self.device,
                &self.layout,
                &self.texture,
                &self.sampler,
            );
        }
        self.texture.upload(&self.queue, canvas);

        let frame = self.surface.get_current_texture()?;
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Present Encoder"),
                });
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Present Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &target,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    ..Default::default()
                });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.draw(0..3, 0..1);
        }
        let _ = self.queue.submit([encoder.finish()]);
        frame.present();
        Ok(())
    }
}

/// Binding 0 is the canvas texture, binding 1 its sampler.
fn canvas_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Canvas Bind Group Layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float {
                        filterable: true,
                    },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(
                    wgpu::SamplerBindingType::Filtering,
                ),
                count: None,
            },
        ],
    })
}

fn canvas_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &CanvasTexture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Canvas Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

/// One oversized triangle from `present.wgsl`, no vertex buffers, opaque
/// output in the swapchain format.
fn blit_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Present Shader"),
        source: wgpu::ShaderSource::Wgsl(
            include_str!("../../assets/shaders/present.wgsl").into(),
        ),
    });
    let pipeline_layout =
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Present Pipeline Layout"),
            bind_group_layouts: &[layout],
            push_constant_ranges: &[],
        });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Present Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(format.into())],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
