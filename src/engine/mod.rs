//! The sphere render engine.
//!
//! [`SphereEngine`] ties the GPU context, depth target, Phong renderer and
//! options together. It is windowing-agnostic: anything that converts into
//! a [`wgpu::SurfaceTarget`] can host it, and key handling works on the
//! `KeyCode` debug strings used by
//! [`KeybindingOptions`](crate::options::KeybindingOptions).

use crate::{
    camera::Viewport,
    error::SphereError,
    gpu::{
        render_context::RenderContext, shader_composer::ShaderComposer,
        texture::DepthTarget,
    },
    input::KeyAction,
    mesh::SphereMesh,
    options::{MeshOptions, Options},
    renderer::PhongRenderer,
    util::frame_timing::FrameTiming,
};

/// Renders one Phong-lit sphere into a window surface.
///
/// # Frame loop
///
/// Each frame, call [`update`](Self::update) to push the current options
/// and viewport into the uniform block, then [`render`](Self::render) to
/// draw and present. Call [`resize`](Self::resize) when the window size
/// changes.
pub struct SphereEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    viewport: Viewport,
    depth: DepthTarget,
    renderer: PhongRenderer,
    options: Options,
    mesh: SphereMesh,
    /// Per-frame timing and FPS tracking.
    pub frame_timing: FrameTiming,
}

impl SphereEngine {
    /// Initialize the GPU, generate the sphere and build the renderer.
    ///
    /// # Errors
    ///
    /// Returns [`SphereError`] if GPU initialization, shader composition or
    /// uniform reflection fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, SphereError> {
        let context = RenderContext::new(window, size).await?;
        let viewport =
            Viewport::new(context.config.width, context.config.height);
        let depth = DepthTarget::new(
            &context.device,
            viewport.width(),
            viewport.height(),
        );

        let mut composer = ShaderComposer::new()?;
        let mesh = generate_mesh(&options);
        let renderer = PhongRenderer::new(&context, &mut composer, &mesh)?;
        let frame_timing = FrameTiming::new(options.display.target_fps);

        Ok(Self {
            context,
            viewport,
            depth,
            renderer,
            options,
            mesh,
            frame_timing,
        })
    }

    /// Resize the surface and depth target. Zero-sized dimensions are
    /// ignored (minimized windows).
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        if self.viewport.resize(width, height) {
            self.depth = DepthTarget::new(
                &self.context.device,
                self.viewport.width(),
                self.viewport.height(),
            );
        }
    }

    /// Recompute transforms and upload the uniform block.
    ///
    /// Does nothing while the frame limiter holds the next frame back, so no
    /// buffer writes are queued without a submit to follow them.
    ///
    /// # Errors
    ///
    /// Returns [`SphereError::Uniform`] if the shader's uniform block does
    /// not accept one of the values.
    pub fn update(&mut self) -> Result<(), SphereError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }
        self.renderer
            .update(&self.context.queue, &self.options, &self.viewport)
    }

    /// Clear, draw the sphere and present.
    ///
    /// Returns early without drawing when the frame limiter says it is too
    /// soon.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next swapchain texture cannot
    /// be acquired. `Outdated` and `Lost` are recovered by calling
    /// [`resize`](Self::resize) with the current window size.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Phong Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(
                                    self.options.display.wgpu_clear_color(),
                                ),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });
            self.renderer.draw(&mut render_pass);
        }
        self.context.submit(encoder);
        frame.present();

        if let Some(fps) = self.frame_timing.end_frame() {
            log::debug!("FPS: {fps:.1}");
        }
        Ok(())
    }

    /// Resolve a `KeyCode` debug string (`"Escape"`, `"KeyQ"`) through the
    /// configured keybindings.
    #[must_use]
    pub fn handle_key(&self, code: &str) -> Option<KeyAction> {
        self.options.keybindings.lookup(code)
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options. The sphere is regenerated when the tessellation
    /// changed; everything else takes effect on the next
    /// [`update`](Self::update).
    pub fn set_options(&mut self, options: Options) {
        for warning in options.validate_warnings() {
            log::warn!("{warning}");
        }
        if options.mesh != self.options.mesh {
            self.mesh = generate_mesh(&options);
            self.renderer.set_mesh(&self.context.device, &self.mesh);
        }
        self.frame_timing.set_target_fps(options.display.target_fps);
        self.options = options;
    }

    /// The CPU-side sphere currently on the GPU.
    #[must_use]
    pub fn mesh(&self) -> &SphereMesh {
        &self.mesh
    }

    /// Current surface size.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

fn generate_mesh(options: &Options) -> SphereMesh {
    let requested = &options.mesh;
    let m = if SphereMesh::fits_u32_indices(
        requested.width_segments,
        requested.height_segments,
    ) {
        requested.clone()
    } else {
        log::warn!(
            "sphere tessellation {}x{} exceeds u32 indices, using defaults",
            requested.width_segments,
            requested.height_segments
        );
        MeshOptions::default()
    };
    let mesh = SphereMesh::generate(m.width_segments, m.height_segments);
    log::info!(
        "Generated sphere {}x{}: {} vertices, {} triangles",
        m.width_segments,
        m.height_segments,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    mesh
}
