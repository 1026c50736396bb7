//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! Compilation and linking report failures as a [`ShaderError`] carrying the driver's info log.

use std::fmt;
use std::sync::Arc;

use glow::HasContext;

/// Upper bound on the length of an info log, in characters.
pub const INFO_LOG_LIMIT: usize = 512;

const EMPTY_LOG: &str = "(driver returned an empty info log)";

/// The programmable stages this renderer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Why a shader or program could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// The driver refused to hand out an object.
    Create(String),
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Create(e) => write!(f, "failed to create shader object: {e}"),
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader compilation failed:\n{log}")
            }
            ShaderError::Link { log } => write!(f, "shader program linking failed:\n{log}"),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Cuts a driver info log down to [`INFO_LOG_LIMIT`] characters.
///
/// Never returns an empty string, so a failure always has something to show.
pub fn bounded_log(log: &str) -> String {
    let log = log.trim_end();
    if log.is_empty() {
        return EMPTY_LOG.to_string();
    }
    log.chars().take(INFO_LOG_LIMIT).collect()
}

/// Represents an individual OpenGL shader.
///
/// The shader object is deleted when this is dropped, whether or not it ended up in a program.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    pub fn new(gl: &Arc<glow::Context>, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl
                .create_shader(stage.gl_enum())
                .map_err(ShaderError::Create)?;
            // Owned from here on, so the object is freed on every return path.
            let shader = Self {
                gl: Arc::clone(gl),
                id: shader,
            };
            gl.shader_source(shader.id, source);
            gl.compile_shader(shader.id);

            if !gl.get_shader_compile_status(shader.id) {
                let log = bounded_log(&gl.get_shader_info_log(shader.id));
                return Err(ShaderError::Compile { stage, log });
            }

            Ok(shader)
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl.create_program().map_err(ShaderError::Create)?;
            let program = Self {
                gl: Arc::clone(gl),
                id: program,
            };

            for shader in shaders {
                gl.attach_shader(program.id, shader.id);
            }

            gl.link_program(program.id);
            let linked = gl.get_program_link_status(program.id);

            for shader in shaders {
                gl.detach_shader(program.id, shader.id);
            }

            if !linked {
                let log = bounded_log(&gl.get_program_info_log(program.id));
                return Err(ShaderError::Link { log });
            }

            Ok(program)
        }
    }

    /// Compiles a vertex and a fragment stage and links them.
    ///
    /// Both stage objects are gone by the time this returns, linked or not.
    pub fn from_sources(
        gl: &Arc<glow::Context>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let vert = Shader::new(gl, ShaderStage::Vertex, vertex_source)?;
        let frag = Shader::new(gl, ShaderStage::Fragment, fragment_source)?;
        Self::new(gl, &[&vert, &frag])
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
