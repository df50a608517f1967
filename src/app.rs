//! The application host: owns the window and GL context and drives an
//! [`Application`] through startup, update/draw every frame, and shutdown.
use std::{ffi::CStr, time::Instant};

use anyhow::{Context, Result};
use glam::Vec4;
use render::gl_wrappers::{enable_debug_output, gl_upd_viewport};
use sdl2::{
    event::{Event, WindowEvent},
    video::{self, SwapInterval},
};

use crate::{
    config::AppConfig,
    frame_clock::{FrameLimiter, FrameStats},
    input::Input,
};

const OPENGL_MAJOR_VER: u8 = 4;
const OPENGL_MINOR_VER: u8 = 3;

/// Lifecycle callbacks the host calls on the render thread.
pub trait Application {
    /// Called once the GL context is current. Upload resources here.
    fn startup(&mut self, host: &mut Host) -> Result<()>;
    /// Called every frame before [`Application::draw`].
    fn update(&mut self, host: &mut Host, delta_time: f32);
    /// Called every frame; the buffers are swapped afterwards.
    fn draw(&mut self, host: &mut Host) -> Result<()>;
    /// Called once before the GL context goes away. Release resources here.
    fn shutdown(&mut self, host: &mut Host);
}

/// What the host exposes to an [`Application`].
#[derive(Debug)]
pub struct Host {
    width: u32,
    height: u32,
    start: Instant,
    delta_time: f32,
    background: Vec4,
    should_quit: bool,
    input: Input,
}

impl Host {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            start: Instant::now(),
            delta_time: 0.0,
            background: Vec4::new(0.0, 0.0, 0.0, 1.0),
            should_quit: false,
            input: Input::new(),
        }
    }

    pub fn window_width(&self) -> u32 {
        self.width
    }

    pub fn window_height(&self) -> u32 {
        self.height
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Seconds since the host started.
    pub fn time(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    pub fn set_background_colour(&mut self, r: f32, g: f32, b: f32) {
        self.background = Vec4::new(r, g, b, 1.0);
    }

    /// Wipe the screen to the background colour.
    pub fn clear_screen(&self) {
        render::clear_screen(self.background);
    }

    /// Stop after the current frame.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    #[cfg(test)]
    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    fn handle_event(&mut self, event: &Event, main_id: u32, window: &video::Window) {
        match *event {
            Event::Quit { .. } => self.quit(),
            Event::KeyDown {
                keycode: Some(key), ..
            } => self.input.key_down(key),
            Event::KeyUp {
                keycode: Some(key), ..
            } => self.input.key_up(key),
            Event::Window {
                window_id,
                ref win_event,
                ..
            } if window_id == main_id => match win_event {
                WindowEvent::SizeChanged(..) | WindowEvent::Resized(..) => {
                    let (width, height) = window.drawable_size();
                    tracing::debug!(width, height, "window resized");
                    self.resize(width, height);
                }
                WindowEvent::FocusLost => self.input.release_all(),
                WindowEvent::Close => self.quit(),
                _ => {}
            },
            _ => {}
        }
    }
}

fn init_sdl(config: &AppConfig) -> Result<(sdl2::Sdl, sdl2::VideoSubsystem, video::Window)> {
    let sdl_ctx = sdl2::init().map_err(anyhow::Error::msg).context("initialising SDL")?;

    let video_ctx = sdl_ctx
        .video()
        .map_err(anyhow::Error::msg)
        .context("initialising SDL video")?;
    video_ctx
        .gl_load_library_default()
        .map_err(anyhow::Error::msg)
        .context("loading the OpenGL library")?;

    let gl_attr = video_ctx.gl_attr();
    let mut flags = gl_attr.set_context_flags();
    flags.forward_compatible();
    if config.gl_debug {
        flags.debug();
    }
    flags.set();
    gl_attr.set_context_major_version(OPENGL_MAJOR_VER);
    gl_attr.set_context_minor_version(OPENGL_MINOR_VER);
    gl_attr.set_context_profile(video::GLProfile::Core);
    gl_attr.set_depth_size(24);

    let mut builder = video_ctx.window(&config.title, config.width, config.height);
    builder.position_centered().opengl();
    if config.resizable {
        builder.resizable();
    }
    let window = builder.build().context("creating window")?;

    Ok((sdl_ctx, video_ctx, window))
}

fn gl_version() -> String {
    // SAFETY: GetString returns null or a static nul-terminated string.
    unsafe {
        let version = gl::GetString(gl::VERSION);
        if version.is_null() {
            return "unknown".to_owned();
        }
        CStr::from_ptr(version.cast()).to_string_lossy().into_owned()
    }
}

/// Open a window and run `app` until it quits or the window closes.
pub fn run<A: Application>(app: &mut A, config: &AppConfig) -> Result<()> {
    let (sdl_ctx, video_ctx, window) = init_sdl(config)?;
    let main_id = window.id();

    let _gl_ctx = window
        .gl_create_context()
        .map_err(anyhow::Error::msg)
        .context("creating OpenGL context")?;
    gl::load_with(|s| video_ctx.gl_get_proc_address(s).cast());
    tracing::info!(version = %gl_version(), "OpenGL context created");

    let interval = if config.vsync {
        SwapInterval::VSync
    } else {
        SwapInterval::Immediate
    };
    if let Err(err) = video_ctx.gl_set_swap_interval(interval) {
        tracing::warn!("could not set swap interval: {err}");
    }
    if config.gl_debug {
        enable_debug_output();
    }

    let mut event_pump = sdl_ctx
        .event_pump()
        .map_err(anyhow::Error::msg)
        .context("creating event pump")?;

    let (width, height) = window.drawable_size();
    let mut host = Host::new(width, height);
    gl_upd_viewport(width, height);

    if let Err(err) = app.startup(&mut host) {
        app.shutdown(&mut host);
        return Err(err.context("application startup failed"));
    }
    tracing::info!(width, height, "application started");

    let limiter = config.fps_cap.map(FrameLimiter::new);
    let mut stats = FrameStats::new(Instant::now());
    let mut last_frame = Instant::now();

    let result = loop {
        let instant_loop_start = Instant::now();
        host.delta_time = instant_loop_start
            .duration_since(last_frame)
            .as_secs_f32();
        last_frame = instant_loop_start;

        for event in event_pump.poll_iter() {
            host.handle_event(&event, main_id, &window);
        }
        if host.should_quit() {
            break Ok(());
        }

        let delta_time = host.delta_time;
        app.update(&mut host, delta_time);

        gl_upd_viewport(host.width, host.height);
        if let Err(err) = app.draw(&mut host) {
            break Err(err.context("drawing frame"));
        }
        window.gl_swap_window();

        if let Some(limiter) = limiter {
            limiter.wait(instant_loop_start);
        }

        let frametime = instant_loop_start.elapsed().as_secs_f64();
        if let Some(report) = stats.record(Instant::now(), frametime) {
            tracing::debug!(
                "frametime: {:0.8}, FPS: {:0.8}, frames counted: {:05}",
                report.average_frametime,
                report.fps,
                report.frames
            );
        }
    };

    app.shutdown(&mut host);
    tracing::info!("application shut down");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_defaults() {
        let host = Host::new(1280, 720);
        assert_eq!(host.window_width(), 1280);
        assert_eq!(host.window_height(), 720);
        assert!(!host.should_quit());
        assert_eq!(host.delta_time, 0.0);
        assert!(host.time() >= 0.0);
    }

    #[test]
    fn background_is_opaque() {
        let mut host = Host::new(1, 1);
        host.set_background_colour(0.25, 0.25, 0.25);
        assert_eq!(host.background, Vec4::new(0.25, 0.25, 0.25, 1.0));
    }

    #[test]
    fn quit_and_resize() {
        let mut host = Host::new(800, 600);
        host.resize(1024, 0);
        assert_eq!((host.window_width(), host.window_height()), (1024, 0));
        host.quit();
        assert!(host.should_quit());
    }
}
