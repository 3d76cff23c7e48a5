//! GPU-resident copy of a [`SphereMesh`].
//!
//! Positions and normals live in separate vertex buffers (slots 0 and 1)
//! so the generator's parallel arrays upload without interleaving.

use wgpu::util::DeviceExt;

use crate::mesh::SphereMesh;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x3];
const NORMAL_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![1 => Float32x3];

/// Vertex buffer layout for a tightly packed `vec3<f32>` stream.
fn vec3_stream_layout(
    attributes: &'static [wgpu::VertexAttribute],
) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<glam::Vec3>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

/// Buffer layouts matching [`GpuMesh::draw`]: positions at location 0,
/// normals at location 1.
#[must_use]
pub fn vertex_buffer_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    [
        vec3_stream_layout(&POSITION_ATTRIBUTES),
        vec3_stream_layout(&NORMAL_ATTRIBUTES),
    ]
}

/// Position, normal and index buffers for one mesh.
pub struct GpuMesh {
    positions: wgpu::Buffer,
    normals: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    /// Copy the mesh into immutable GPU buffers.
    #[must_use]
    pub fn upload(device: &wgpu::Device, mesh: &SphereMesh) -> Self {
        let positions =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Positions"),
                contents: bytemuck::cast_slice(mesh.positions()),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let normals =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Normals"),
                contents: bytemuck::cast_slice(mesh.normals()),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let indices =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Indices"),
                contents: bytemuck::cast_slice(mesh.indices()),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            positions,
            normals,
            indices,
            index_count: mesh.indices().len() as u32,
        }
    }

    /// Number of indices submitted per draw.
    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Bind the buffers and issue one indexed triangle-list draw.
    ///
    /// Caller must set the pipeline and bind groups before calling this.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.index_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.positions.slice(..));
        render_pass.set_vertex_buffer(1, self.normals.slice(..));
        render_pass.set_index_buffer(
            self.indices.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_shader_locations() {
        let layouts = vertex_buffer_layouts();
        for (slot, layout) in layouts.iter().enumerate() {
            assert_eq!(layout.array_stride, 12);
            assert_eq!(layout.attributes.len(), 1);
            assert_eq!(layout.attributes[0].shader_location, slot as u32);
            assert_eq!(
                layout.attributes[0].format,
                wgpu::VertexFormat::Float32x3
            );
        }
    }
}
