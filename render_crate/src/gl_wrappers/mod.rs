//! Standalone functions and modules to wrap the nitty-gritty of
//! OpenGL objects with Rust structs.
#[macro_use]
pub mod program;
pub mod buffer;
pub mod debug;
pub mod shader;

pub use buffer::*;
pub use debug::*;
pub use program::*;
pub use shader::*;

/// Safely update the OpenGL viewport.
///
/// Sizes beyond `i32::MAX` are clamped.
pub fn gl_upd_viewport(width: u32, height: u32) {
    let real_width: i32 = width.try_into().unwrap_or(i32::MAX);
    let real_height: i32 = height.try_into().unwrap_or(i32::MAX);
    // SAFETY:
    // gl::Viewport does not fail with non-negative values.
    unsafe {
        gl::Viewport(0, 0, real_width, real_height);
    }
}

/// Read a shader or program info log of `log_length` bytes (nul included)
/// through `fetch(capacity, written, buffer)`.
pub(crate) fn read_info_log(
    log_length: gl::types::GLint,
    fetch: impl FnOnce(gl::types::GLsizei, *mut gl::types::GLsizei, *mut gl::types::GLchar),
) -> String {
    let capacity = log_length.max(1);
    let mut infolog: Vec<u8> = vec![0; capacity as usize];
    let mut written = 0;
    fetch(capacity, &mut written, infolog.as_mut_ptr().cast());
    infolog.truncate(written.clamp(0, capacity) as usize);
    String::from_utf8_lossy(&infolog).trim_end().to_owned()
}
