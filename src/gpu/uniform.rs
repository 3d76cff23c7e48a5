//! Uniform blocks addressed by member name.
//!
//! A shader's uniform struct is reflected once from the composed naga IR.
//! Per-frame code then writes values by the member names the WGSL source
//! uses (`"model"`, `"light_pos"`, ...) instead of hard-coding a Rust
//! mirror of the struct layout.

use std::fmt;

use glam::{Mat3, Mat4, Vec3, Vec4};
use rustc_hash::FxHashMap;

/// Largest member size, a `mat4x4<f32>`.
const MAX_MEMBER_SIZE: usize = 64;

/// WGSL types a reflected uniform member can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    /// `f32`
    F32,
    /// `vec3<f32>`
    Vec3,
    /// `vec4<f32>`
    Vec4,
    /// `mat3x3<f32>` (three 16-byte columns)
    Mat3,
    /// `mat4x4<f32>`
    Mat4,
}

impl UniformKind {
    /// Bytes the member occupies inside the block, padding included.
    #[must_use]
    pub fn size(self) -> usize {
        match self {
            Self::F32 => 4,
            Self::Vec3 => 12,
            Self::Vec4 => 16,
            Self::Mat3 => 48,
            Self::Mat4 => 64,
        }
    }

    fn from_naga(inner: &naga::TypeInner) -> Option<Self> {
        use naga::{Scalar, TypeInner, VectorSize};

        match *inner {
            TypeInner::Scalar(scalar) if scalar == Scalar::F32 => Some(Self::F32),
            TypeInner::Vector { size, scalar } if scalar == Scalar::F32 => {
                match size {
                    VectorSize::Tri => Some(Self::Vec3),
                    VectorSize::Quad => Some(Self::Vec4),
                    VectorSize::Bi => None,
                }
            }
            TypeInner::Matrix {
                columns,
                rows,
                scalar,
            } if scalar == Scalar::F32 => match (columns, rows) {
                (VectorSize::Tri, VectorSize::Tri) => Some(Self::Mat3),
                (VectorSize::Quad, VectorSize::Quad) => Some(Self::Mat4),
                _ => None,
            },
            _ => None,
        }
    }
}

/// A value that can be written into a uniform member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// Scalar float.
    F32(f32),
    /// 3-component vector.
    Vec3(Vec3),
    /// 4-component vector.
    Vec4(Vec4),
    /// 3x3 matrix.
    Mat3(Mat3),
    /// 4x4 matrix.
    Mat4(Mat4),
}

impl UniformValue {
    /// The member kind this value fits.
    #[must_use]
    pub fn kind(&self) -> UniformKind {
        match self {
            Self::F32(_) => UniformKind::F32,
            Self::Vec3(_) => UniformKind::Vec3,
            Self::Vec4(_) => UniformKind::Vec4,
            Self::Mat3(_) => UniformKind::Mat3,
            Self::Mat4(_) => UniformKind::Mat4,
        }
    }

    /// Write into `dst`, which is exactly `self.kind().size()` bytes.
    fn write(&self, dst: &mut [u8]) {
        match self {
            Self::F32(v) => dst.copy_from_slice(bytemuck::bytes_of(v)),
            Self::Vec3(v) => {
                dst.copy_from_slice(bytemuck::cast_slice(&v.to_array()));
            }
            Self::Vec4(v) => {
                dst.copy_from_slice(bytemuck::cast_slice(&v.to_array()));
            }
            Self::Mat3(m) => {
                // WGSL mat3x3 columns are vec3 with a 16-byte stride.
                for (col, chunk) in
                    m.to_cols_array_2d().iter().zip(dst.chunks_exact_mut(16))
                {
                    chunk[..12].copy_from_slice(bytemuck::cast_slice(col));
                }
            }
            Self::Mat4(m) => {
                dst.copy_from_slice(bytemuck::cast_slice(&m.to_cols_array()));
            }
        }
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<[f32; 3]> for UniformValue {
    fn from(v: [f32; 3]) -> Self {
        Self::Vec3(Vec3::from(v))
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        Self::Vec4(v)
    }
}

impl From<Mat3> for UniformValue {
    fn from(m: Mat3) -> Self {
        Self::Mat3(m)
    }
}

impl From<Mat4> for UniformValue {
    fn from(m: Mat4) -> Self {
        Self::Mat4(m)
    }
}

/// Errors from reflecting or writing a uniform block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniformError {
    /// No `var<uniform>` at the requested binding.
    MissingBinding {
        /// Bind group index.
        group: u32,
        /// Binding index within the group.
        binding: u32,
    },
    /// The uniform at the binding is not a struct.
    NotAStruct {
        /// Bind group index.
        group: u32,
        /// Binding index within the group.
        binding: u32,
    },
    /// The block has no member with this name.
    Unknown(String),
    /// The value does not match the member's type.
    KindMismatch {
        /// Member name.
        name: String,
        /// Reflected member kind.
        expected: UniformKind,
        /// Kind of the value that was passed.
        found: UniformKind,
    },
}

impl fmt::Display for UniformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBinding { group, binding } => write!(
                f,
                "no uniform variable at group {group} binding {binding}"
            ),
            Self::NotAStruct { group, binding } => write!(
                f,
                "uniform at group {group} binding {binding} is not a struct"
            ),
            Self::Unknown(name) => write!(f, "unknown uniform `{name}`"),
            Self::KindMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "uniform `{name}` is {expected:?}, got a {found:?} value"
            ),
        }
    }
}

impl std::error::Error for UniformError {}

/// Location of one member inside the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformField {
    /// Byte offset from the start of the block.
    pub offset: u32,
    /// Member type.
    pub kind: UniformKind,
}

/// Reflected layout of one uniform struct.
#[derive(Debug, Clone, Default)]
pub struct UniformLayout {
    fields: FxHashMap<String, UniformField>,
    size: u32,
}

impl UniformLayout {
    /// Reflect the uniform struct bound at `@group(group) @binding(binding)`.
    ///
    /// Members of unsupported types are skipped with a warning; they keep
    /// their zero bytes in the block.
    ///
    /// # Errors
    ///
    /// Returns [`UniformError::MissingBinding`] if no uniform variable sits at
    /// that binding and [`UniformError::NotAStruct`] if it is not a struct.
    pub fn reflect(
        module: &naga::Module,
        group: u32,
        binding: u32,
    ) -> Result<Self, UniformError> {
        let var = module
            .global_variables
            .iter()
            .map(|(_, var)| var)
            .find(|var| {
                var.space == naga::AddressSpace::Uniform
                    && var
                        .binding
                        .as_ref()
                        .is_some_and(|b| b.group == group && b.binding == binding)
            })
            .ok_or(UniformError::MissingBinding { group, binding })?;

        let naga::TypeInner::Struct { members, span } =
            &module.types[var.ty].inner
        else {
            return Err(UniformError::NotAStruct { group, binding });
        };

        let mut fields = FxHashMap::default();
        for member in members {
            let Some(name) = member.name.as_ref() else {
                continue;
            };
            match UniformKind::from_naga(&module.types[member.ty].inner) {
                Some(kind) => {
                    let _ = fields.insert(
                        name.clone(),
                        UniformField {
                            offset: member.offset,
                            kind,
                        },
                    );
                }
                None => {
                    log::warn!(
                        "uniform member `{name}` has an unsupported type, \
                         it cannot be set by name"
                    );
                }
            }
        }

        Ok(Self {
            fields,
            size: *span,
        })
    }

    /// Look up a member by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<UniformField> {
        self.fields.get(name).copied()
    }

    /// Block size in bytes.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of settable members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the layout has no settable members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Member names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// CPU-side image of a uniform block plus its reflected layout.
#[derive(Debug, Clone)]
pub struct UniformBlock {
    layout: UniformLayout,
    data: Vec<u8>,
    dirty: bool,
}

impl UniformBlock {
    /// Zero-filled block for `layout`.
    #[must_use]
    pub fn new(layout: UniformLayout) -> Self {
        let data = vec![0; layout.size() as usize];
        Self {
            layout,
            data,
            dirty: true,
        }
    }

    /// Write a member by name. The block is only marked dirty when the
    /// member's bytes actually change.
    ///
    /// # Errors
    ///
    /// Returns [`UniformError::Unknown`] for names the shader does not
    /// declare and [`UniformError::KindMismatch`] when the value's type
    /// differs from the member's.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<UniformValue>,
    ) -> Result<(), UniformError> {
        let value = value.into();
        let field = self
            .layout
            .field(name)
            .ok_or_else(|| UniformError::Unknown(name.to_owned()))?;
        if field.kind != value.kind() {
            return Err(UniformError::KindMismatch {
                name: name.to_owned(),
                expected: field.kind,
                found: value.kind(),
            });
        }

        let size = field.kind.size();
        let mut scratch = [0_u8; MAX_MEMBER_SIZE];
        value.write(&mut scratch[..size]);

        let start = field.offset as usize;
        let dst = &mut self.data[start..start + size];
        if *dst != scratch[..size] {
            dst.copy_from_slice(&scratch[..size]);
            self.dirty = true;
        }
        Ok(())
    }

    /// The reflected layout.
    #[must_use]
    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    /// Raw block bytes, ready for upload.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Whether anything changed since the last [`take_dirty`](Self::take_dirty).
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// GPU buffer and bind group backing a [`UniformBlock`].
pub struct UniformBuffer {
    buffer: wgpu::Buffer,
    /// Layout for the single uniform binding at binding 0.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group referencing the buffer.
    pub bind_group: wgpu::BindGroup,
}

impl UniformBuffer {
    /// Allocate a buffer sized for `block`, visible to both shader stages.
    #[must_use]
    pub fn new(device: &wgpu::Device, label: &str, block: &UniformBlock) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} Buffer")),
            size: u64::from(block.layout().size()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{label} Bind Group Layout")),
                entries: &[super::pipeline_helpers::uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX_FRAGMENT,
                )],
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Bind Group")),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            layout,
            bind_group,
        }
    }

    /// Upload the block if it changed since the last upload.
    pub fn flush(&self, queue: &wgpu::Queue, block: &mut UniformBlock) {
        if block.take_dirty() {
            queue.write_buffer(&self.buffer, 0, block.bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::shader_composer::{
        ShaderComposer, PHONG_SHADER, PHONG_SHADER_PATH,
    };

    fn phong_layout() -> UniformLayout {
        let mut composer = ShaderComposer::new().unwrap();
        let module =
            composer.compose_naga(PHONG_SHADER, PHONG_SHADER_PATH).unwrap();
        UniformLayout::reflect(&module, 0, 0).unwrap()
    }

    fn read_f32(bytes: &[u8], offset: usize) -> f32 {
        f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn phong_block_reflects_wgsl_offsets() {
        let layout = phong_layout();
        assert_eq!(layout.size(), 368);
        assert_eq!(layout.len(), 14);

        let expect = [
            ("model", 0, UniformKind::Mat4),
            ("view", 64, UniformKind::Mat4),
            ("projection", 128, UniformKind::Mat4),
            ("normal_matrix", 192, UniformKind::Mat3),
            ("light_pos", 240, UniformKind::Vec3),
            ("shininess", 252, UniformKind::F32),
            ("view_pos", 256, UniformKind::Vec3),
            ("gamma", 268, UniformKind::F32),
            ("light_ambient", 272, UniformKind::Vec3),
            ("mat_specular", 352, UniformKind::Vec3),
        ];
        for (name, offset, kind) in expect {
            assert_eq!(
                layout.field(name),
                Some(UniformField { offset, kind }),
                "{name}"
            );
        }
    }

    #[test]
    fn missing_binding_is_reported() {
        let mut composer = ShaderComposer::new().unwrap();
        let module =
            composer.compose_naga(PHONG_SHADER, PHONG_SHADER_PATH).unwrap();
        assert_eq!(
            UniformLayout::reflect(&module, 1, 0).unwrap_err(),
            UniformError::MissingBinding {
                group: 1,
                binding: 0
            }
        );
    }

    #[test]
    fn set_writes_at_reflected_offsets() {
        let mut block = UniformBlock::new(phong_layout());
        assert!(block.take_dirty());

        block.set("shininess", 32.0_f32).unwrap();
        block.set("light_pos", [-4.0_f32, 4.0, -3.0]).unwrap();
        assert!(block.is_dirty());

        let bytes = block.bytes();
        assert_eq!(read_f32(bytes, 252), 32.0);
        assert_eq!(read_f32(bytes, 240), -4.0);
        assert_eq!(read_f32(bytes, 244), 4.0);
        assert_eq!(read_f32(bytes, 248), -3.0);
    }

    #[test]
    fn rewriting_the_same_value_stays_clean() {
        let mut block = UniformBlock::new(phong_layout());
        block.set("gamma", 2.2_f32).unwrap();
        block.set("normal_matrix", Mat3::IDENTITY).unwrap();
        assert!(block.take_dirty());

        block.set("gamma", 2.2_f32).unwrap();
        block.set("normal_matrix", Mat3::IDENTITY).unwrap();
        assert!(!block.is_dirty());

        block.set("gamma", 1.8_f32).unwrap();
        assert!(block.is_dirty());
    }

    #[test]
    fn mat3_columns_are_padded() {
        let mut block = UniformBlock::new(phong_layout());
        let m = Mat3::from_cols(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        );
        block.set("normal_matrix", m).unwrap();

        let bytes = block.bytes();
        for col in 0..3 {
            let base = 192 + col * 16;
            for row in 0..3 {
                let expected = (col * 3 + row + 1) as f32;
                assert_eq!(read_f32(bytes, base + row * 4), expected);
            }
            assert_eq!(read_f32(bytes, base + 12), 0.0, "padding col {col}");
        }
    }

    #[test]
    fn mat4_is_column_major() {
        let mut block = UniformBlock::new(phong_layout());
        let m = Mat4::from_translation(Vec3::new(0.0, 0.0, -7.0));
        block.set("model", m).unwrap();
        // translation lives in the fourth column
        assert_eq!(read_f32(block.bytes(), 12 * 4 + 8), -7.0);
        assert_eq!(read_f32(block.bytes(), 0), 1.0);
    }

    #[test]
    fn unknown_and_mismatched_names_are_rejected() {
        let mut block = UniformBlock::new(phong_layout());
        let _ = block.take_dirty();

        assert_eq!(
            block.set("lightPos", Vec3::ONE).unwrap_err(),
            UniformError::Unknown("lightPos".into())
        );
        assert!(matches!(
            block.set("gamma", Vec3::ONE).unwrap_err(),
            UniformError::KindMismatch {
                expected: UniformKind::F32,
                found: UniformKind::Vec3,
                ..
            }
        ));
        assert!(!block.is_dirty());
    }
}
