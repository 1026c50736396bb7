//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for vertex data uploaded once to the GPU.
//! Vertices should implement the [`Vertex`] trait.

use std::sync::Arc;

use glam::Vec3;
use glow::HasContext;

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex: Copy {
    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs(gl: &glow::Context);
}

/// A bare position, attribute location 0.
impl Vertex for Vec3 {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, size_of::<Vec3>() as i32, 0);
            gl.enable_vertex_attrib_array(0);
        }
    }
}

/// Views a vertex slice as the bytes that get uploaded.
pub fn vertex_bytes<V: Vertex>(vertices: &[V]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(vertices.as_ptr() as *const u8, size_of_val(vertices)) }
}

/// Represents a non-indexed mesh stored on the GPU side. The data is immutable once uploaded.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    vertex_count: usize,
}

impl Mesh {
    /// Creates a new mesh from the given vertices. Nothing is left bound afterwards.
    pub fn new<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        draw_mode: u32,
    ) -> Result<Self, String> {
        unsafe {
            let vao = gl.create_vertex_array()?;
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(e) => {
                    gl.delete_vertex_array(vao);
                    return Err(e);
                }
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, vertex_bytes(vertices), glow::STATIC_DRAW);

            V::vertex_attribs(gl);

            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_vertex_array(None);

            Ok(Self {
                gl: Arc::clone(gl),
                draw_mode,
                vao,
                vbo,
                vertex_count: vertices.len(),
            })
        }
    }

    /// Draws the mesh.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.draw_arrays(self.draw_mode, 0, self.vertex_count as i32);
            self.gl.bind_vertex_array(None);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[cfg(test)]
    pub fn buffer(&self) -> glow::Buffer {
        self.vbo
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_buffer(self.vbo);
        }
    }
}
