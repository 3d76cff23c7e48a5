//! Phong-lit mesh pass.
//!
//! Owns the pipeline, the uploaded sphere and the reflected uniform block.
//! Every frame the engine calls [`PhongRenderer::update`] with the current
//! options and viewport, then [`PhongRenderer::draw`] inside the main pass.

use crate::{
    camera::{Transforms, Viewport},
    error::SphereError,
    gpu::{
        mesh_buffer::{self, GpuMesh},
        pipeline_helpers,
        render_context::RenderContext,
        shader_composer::{ShaderComposer, PHONG_SHADER, PHONG_SHADER_PATH},
        uniform::{UniformBlock, UniformBuffer, UniformError, UniformLayout},
    },
    mesh::SphereMesh,
    options::Options,
};

/// Bind group and binding of the shader's uniform struct.
const UNIFORM_GROUP: u32 = 0;
const UNIFORM_BINDING: u32 = 0;

/// Renders a single mesh with per-fragment Phong lighting.
pub struct PhongRenderer {
    pipeline: wgpu::RenderPipeline,
    mesh: GpuMesh,
    uniforms: UniformBlock,
    uniform_buffer: UniformBuffer,
}

impl PhongRenderer {
    /// Compose the shader, reflect its uniform block, upload `mesh` and
    /// build the pipeline for the surface format.
    ///
    /// # Errors
    ///
    /// Returns [`SphereError::Shader`] if composition fails and
    /// [`SphereError::Uniform`] if the uniform struct cannot be reflected.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        mesh: &SphereMesh,
    ) -> Result<Self, SphereError> {
        let module = composer.compose_naga(PHONG_SHADER, PHONG_SHADER_PATH)?;
        let layout =
            UniformLayout::reflect(&module, UNIFORM_GROUP, UNIFORM_BINDING)?;
        log::debug!(
            "Phong uniform block: {} bytes, {} members",
            layout.size(),
            layout.len()
        );

        let uniforms = UniformBlock::new(layout);
        let uniform_buffer =
            UniformBuffer::new(&context.device, "Phong Uniforms", &uniforms);

        let shader = ShaderComposer::create_module(
            &context.device,
            "Phong Shader",
            module,
        );
        let pipeline =
            create_pipeline(context, &shader, &uniform_buffer.layout);

        log::info!(
            "Uploading sphere: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        let mesh = GpuMesh::upload(&context.device, mesh);

        Ok(Self {
            pipeline,
            mesh,
            uniforms,
            uniform_buffer,
        })
    }

    /// Recompute the transforms, write every shader input by name and
    /// upload the block if anything changed.
    ///
    /// # Errors
    ///
    /// Returns [`SphereError::Uniform`] if the shader no longer declares one
    /// of the expected members or declares it with a different type.
    pub fn update(
        &mut self,
        queue: &wgpu::Queue,
        options: &Options,
        viewport: &Viewport,
    ) -> Result<(), SphereError> {
        write_uniforms(&mut self.uniforms, options, viewport)?;
        self.uniform_buffer.flush(queue, &mut self.uniforms);
        Ok(())
    }

    /// Record the draw into an open render pass.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(
            UNIFORM_GROUP,
            &self.uniform_buffer.bind_group,
            &[],
        );
        self.mesh.draw(render_pass);
    }

    /// Replace the uploaded mesh, e.g. after a tessellation change.
    pub fn set_mesh(&mut self, device: &wgpu::Device, mesh: &SphereMesh) {
        log::info!(
            "Re-uploading sphere: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        self.mesh = GpuMesh::upload(device, mesh);
    }

    /// CPU-side copy of the uniform block.
    #[must_use]
    pub fn uniforms(&self) -> &UniformBlock {
        &self.uniforms
    }
}

/// Write every shader input for one frame into `u`.
fn write_uniforms(
    u: &mut UniformBlock,
    options: &Options,
    viewport: &Viewport,
) -> Result<(), UniformError> {
    let t = Transforms::from_options(options, viewport);
    let light = &options.lighting;
    let material = &options.material;

    u.set("model", t.model)?;
    u.set("view", t.view)?;
    u.set("projection", t.projection)?;
    u.set("normal_matrix", t.normal_matrix)?;
    u.set("light_pos", light.position)?;
    u.set("view_pos", t.eye)?;
    u.set("light_ambient", light.ambient)?;
    u.set("light_diffuse", light.diffuse)?;
    u.set("light_specular", light.specular)?;
    u.set("mat_ambient", material.ambient)?;
    u.set("mat_diffuse", material.diffuse)?;
    u.set("mat_specular", material.specular)?;
    u.set("shininess", material.shininess)?;
    u.set("gamma", options.display.gamma)
}

fn create_pipeline(
    context: &RenderContext,
    shader: &wgpu::ShaderModule,
    uniform_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let pipeline_layout = context.device.create_pipeline_layout(
        &wgpu::PipelineLayoutDescriptor {
            label: Some("Phong Pipeline Layout"),
            bind_group_layouts: &[uniform_layout],
            push_constant_ranges: &[],
        },
    );

    context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Phong Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &mesh_buffer::vertex_buffer_layouts(),
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &pipeline_helpers::color_target(context.format()),
                compilation_options: Default::default(),
            }),
            // Both faces are shaded; the sphere is closed so back faces are
            // always hidden by depth.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(pipeline_helpers::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
}
