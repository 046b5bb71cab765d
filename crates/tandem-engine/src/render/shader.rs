//! Textured-sprite shader program.
//!
//! A program is a vertex WGSL module plus a fragment WGSL module, loaded from
//! separate files, with CPU-side copies of its three matrix uniforms. The
//! sprite renderer uploads the matrices; this type only holds state.
//!
//! Interface the WGSL sources must provide:
//! - vertex entry `vs_main`, fragment entry `fs_main`
//! - `@location(0)` position (`vec2<f32>`), `@location(1)` texture coordinate (`vec2<f32>`)
//! - `@group(0) @binding(0)` camera uniform `{ projection, view }`
//! - `@group(0) @binding(1)` model uniform `{ model }`
//! - `@group(1) @binding(0)` `texture_2d<f32>`, `@group(1) @binding(1)` sampler

use std::path::Path;

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};

use crate::coords::Mat4;

/// Vertex attribute location of the quad position stream.
pub const POSITION_LOCATION: u32 = 0;

/// Vertex attribute location of the texture-coordinate stream.
pub const TEX_COORD_LOCATION: u32 = 1;

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct CameraUniform {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

#[derive(Debug, Clone)]
pub struct ShaderProgram {
    vertex_label: String,
    vertex_source: String,
    fragment_label: String,
    fragment_source: String,

    projection: Mat4,
    view: Mat4,
    model: Mat4,
}

impl ShaderProgram {
    /// Reads the vertex and fragment WGSL sources.
    pub fn load(vertex_path: &Path, fragment_path: &Path) -> Result<Self> {
        let vertex_source = std::fs::read_to_string(vertex_path)
            .with_context(|| format!("failed to read vertex shader {}", vertex_path.display()))?;
        let fragment_source = std::fs::read_to_string(fragment_path).with_context(|| {
            format!("failed to read fragment shader {}", fragment_path.display())
        })?;

        log::debug!(
            "loaded shader program ({}, {})",
            vertex_path.display(),
            fragment_path.display()
        );

        let mut program = Self::from_sources(vertex_source, fragment_source);
        program.vertex_label = vertex_path.display().to_string();
        program.fragment_label = fragment_path.display().to_string();
        Ok(program)
    }

    pub fn from_sources(vertex_source: impl Into<String>, fragment_source: impl Into<String>) -> Self {
        Self {
            vertex_label: "tandem vertex shader".to_string(),
            vertex_source: vertex_source.into(),
            fragment_label: "tandem fragment shader".to_string(),
            fragment_source: fragment_source.into(),
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
        }
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
    }

    pub fn set_model(&mut self, model: Mat4) {
        self.model = model;
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn model(&self) -> Mat4 {
        self.model
    }

    pub fn vertex_source(&self) -> &str {
        &self.vertex_source
    }

    pub fn fragment_source(&self) -> &str {
        &self.fragment_source
    }

    pub(crate) fn camera_uniform(&self) -> CameraUniform {
        CameraUniform {
            projection: self.projection.to_cols_array_2d(),
            view: self.view.to_cols_array_2d(),
        }
    }

    pub(crate) fn model_uniform(&self) -> ModelUniform {
        ModelUniform {
            model: self.model.to_cols_array_2d(),
        }
    }

    /// Compiles both WGSL sources. Validation errors surface through the
    /// device's error handler.
    pub(crate) fn create_modules(&self, device: &wgpu::Device) -> (wgpu::ShaderModule, wgpu::ShaderModule) {
        let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&self.vertex_label),
            source: wgpu::ShaderSource::Wgsl(self.vertex_source.as_str().into()),
        });
        let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&self.fragment_label),
            source: wgpu::ShaderSource::Wgsl(self.fragment_source.as_str().into()),
        });
        (vertex, fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec3;

    #[test]
    fn load_reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let vs = dir.path().join("v.wgsl");
        let fs = dir.path().join("f.wgsl");
        std::fs::write(&vs, "// vertex").unwrap();
        std::fs::write(&fs, "// fragment").unwrap();

        let program = ShaderProgram::load(&vs, &fs).unwrap();
        assert_eq!(program.vertex_source(), "// vertex");
        assert_eq!(program.fragment_source(), "// fragment");
    }

    #[test]
    fn missing_fragment_shader_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let vs = dir.path().join("v.wgsl");
        std::fs::write(&vs, "").unwrap();

        let err = ShaderProgram::load(&vs, &dir.path().join("missing.wgsl")).unwrap_err();
        assert!(format!("{err:#}").contains("fragment shader"));
    }

    #[test]
    fn matrices_default_to_identity_and_update() {
        let mut program = ShaderProgram::from_sources("", "");
        assert_eq!(program.model(), Mat4::IDENTITY);

        let p = Mat4::orthographic(-5.0, 5.0, -3.75, 3.75, -1.0, 1.0);
        let m = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        program.set_projection(p);
        program.set_model(m);

        assert_eq!(program.camera_uniform().projection, p.to_cols_array_2d());
        assert_eq!(program.camera_uniform().view, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(program.model_uniform().model, m.to_cols_array_2d());
    }
}
