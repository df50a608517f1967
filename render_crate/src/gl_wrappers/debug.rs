//! Routes OpenGL debug output into `tracing`.
use std::{
    ffi::{c_char, c_void, CStr},
    ptr::null,
};

use crate::RenderError;

/// How loudly a driver debug message gets logged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebugLevel {
    Error,
    Warn,
    Info,
    Trace,
}

/// Map a `GL_DEBUG_SEVERITY_*` value to a log level.
pub fn debug_level(severity: gl::types::GLenum) -> DebugLevel {
    match severity {
        gl::DEBUG_SEVERITY_HIGH => DebugLevel::Error,
        gl::DEBUG_SEVERITY_MEDIUM => DebugLevel::Warn,
        gl::DEBUG_SEVERITY_LOW => DebugLevel::Info,
        _ => DebugLevel::Trace,
    }
}

// void APIENTRY glDebugOutput(GLenum source, GLenum type, unsigned int id, GLenum severity,
//                            GLsizei length, const char *message, const void *userParam);
extern "system" fn gl_debug_output(
    source: gl::types::GLenum,
    output_type: gl::types::GLenum,
    id: gl::types::GLuint,
    severity: gl::types::GLenum,
    _length: gl::types::GLsizei,
    message: *const c_char,
    _user_param: *mut c_void,
) {
    if message.is_null() {
        return;
    }
    // SAFETY: the driver hands us a nul-terminated string valid for this call.
    let message = unsafe { CStr::from_ptr(message) }.to_string_lossy();
    match debug_level(severity) {
        DebugLevel::Error => tracing::error!(source, output_type, id, "GL: {message}"),
        DebugLevel::Warn => tracing::warn!(source, output_type, id, "GL: {message}"),
        DebugLevel::Info => tracing::info!(source, output_type, id, "GL: {message}"),
        DebugLevel::Trace => tracing::trace!(source, output_type, id, "GL: {message}"),
    }
}

/// Install the debug message callback. Needs a debug context of GL 4.3 or newer.
pub fn enable_debug_output() {
    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(gl_debug_output), null());
    }
    tracing::debug!("GL debug output enabled");
}

/// Upper bound on queued errors drained by [`check_gl_error`].
const MAX_QUEUED_ERRORS: usize = 32;

/// Drain the GL error queue, reporting the first error seen.
pub fn check_gl_error(context: &'static str) -> Result<(), RenderError> {
    let mut first = None;
    for _ in 0..MAX_QUEUED_ERRORS {
        let code = unsafe { gl::GetError() };
        if code == gl::NO_ERROR {
            break;
        }
        first.get_or_insert(code);
    }
    match first {
        Some(code) => Err(RenderError::Gl { code, context }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_maps_to_level() {
        assert_eq!(debug_level(gl::DEBUG_SEVERITY_HIGH), DebugLevel::Error);
        assert_eq!(debug_level(gl::DEBUG_SEVERITY_MEDIUM), DebugLevel::Warn);
        assert_eq!(debug_level(gl::DEBUG_SEVERITY_LOW), DebugLevel::Info);
        assert_eq!(
            debug_level(gl::DEBUG_SEVERITY_NOTIFICATION),
            DebugLevel::Trace
        );
    }

    #[test]
    fn gl_error_message_names_context() {
        let err = RenderError::Gl {
            code: gl::INVALID_OPERATION,
            context: "glDrawElements",
        };
        assert_eq!(
            err.to_string(),
            "OpenGL error 0x0502 after glDrawElements"
        );
    }
}
