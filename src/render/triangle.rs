//! The one thing this program draws: a single flat-shaded triangle.

use std::sync::Arc;

use anyhow::{Context, anyhow};
use glam::Vec3;

use crate::abs::{Mesh, ShaderProgram};

const VERTEX_SOURCE: &str = include_str!("shaders/triangle/vert.glsl");
const FRAGMENT_SOURCE: &str = include_str!("shaders/triangle/frag.glsl");

/// Top, bottom left, bottom right, in normalized device coordinates.
pub const TRIANGLE: [Vec3; 3] = [
    Vec3::new(0.0, 0.5, 0.0),
    Vec3::new(-0.5, -0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0),
];

/// Owns the linked program and the uploaded triangle.
pub struct TriangleRenderer {
    program: ShaderProgram,
    mesh: Mesh,
}

impl TriangleRenderer {
    /// Builds the shader program and uploads [`TRIANGLE`].
    ///
    /// A compile or link failure is returned rather than drawn around.
    pub fn new(gl: &Arc<glow::Context>) -> anyhow::Result<Self> {
        let program = ShaderProgram::from_sources(gl, VERTEX_SOURCE, FRAGMENT_SOURCE)
            .context("Failed to build the triangle shader program")?;
        let mesh = Mesh::new(gl, &TRIANGLE, glow::TRIANGLES)
            .map_err(|e| anyhow!(e))
            .context("Failed to upload the triangle")?;
        log::debug!("Uploaded {} vertices", mesh.vertex_count());

        Ok(Self { program, mesh })
    }

    pub fn draw(&self) {
        self.program.use_program();
        self.mesh.draw();
    }
}

#[cfg(test)]
mod tests {
    use glow::HasContext;

    use super::*;
    use crate::abs::{App, Shader, ShaderError, ShaderStage, vertex_bytes};
    use crate::config::{DISPLAY, DisplayConfig};

    const EXPECTED: [f32; 9] = [0.0, 0.5, 0.0, -0.5, -0.5, 0.0, 0.5, -0.5, 0.0];

    fn as_floats(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    #[test]
    fn test_triangle_upload_data() {
        let bytes = vertex_bytes(&TRIANGLE);
        assert_eq!(bytes.len(), 9 * size_of::<f32>());
        assert_eq!(as_floats(bytes), EXPECTED);
    }

    #[test]
    fn test_sources_target_core_460() {
        assert!(VERTEX_SOURCE.starts_with("#version 460 core"));
        assert!(FRAGMENT_SOURCE.starts_with("#version 460 core"));
    }

    // SDL can only be brought up from one thread per process, so every check that needs a live
    // context lives in this one test.
    #[test]
    #[ignore = "needs a display and an OpenGL 4.6 driver"]
    fn test_with_live_context() {
        let config = DisplayConfig {
            fullscreen: false,
            vsync: false,
            ..DISPLAY
        };
        let app = App::with_window(&config, |builder| builder.hidden()).unwrap();
        let gl = &app.gl;

        let renderer = TriangleRenderer::new(gl).unwrap();

        let broken = Shader::new(gl, ShaderStage::Vertex, "#version 460 core\nvoid main() { oops }");
        match broken {
            Err(ShaderError::Compile { stage, log }) => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert!(!log.is_empty());
            }
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("invalid source compiled"),
        }

        let mut bytes = [0u8; 36];
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(renderer.mesh.buffer()));
            gl.get_buffer_sub_data(glow::ARRAY_BUFFER, 0, &mut bytes);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
        assert_eq!(as_floats(&bytes), EXPECTED);

        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        renderer.draw();
        assert_eq!(unsafe { gl.get_error() }, glow::NO_ERROR);

        drop(renderer);
        assert_eq!(unsafe { gl.get_error() }, glow::NO_ERROR);
    }
}
