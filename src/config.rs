//! Command-line configuration for the host window.
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cube_bootstrap", about = "Spinning-camera cube with a debug grid")]
pub struct Cli {
    /// Initial window width in pixels
    #[arg(long, default_value_t = 1280, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 720, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Window title
    #[arg(long, default_value = "Cube Bootstrap")]
    pub title: String,

    /// Soft frame rate cap, 0 to disable
    #[arg(long, default_value_t = 1000)]
    pub fps_cap: u64,

    /// Wait for vertical sync when swapping
    #[arg(long)]
    pub vsync: bool,

    /// Allow the window to be resized
    #[arg(long)]
    pub resizable: bool,

    /// Route OpenGL debug messages into the log
    #[arg(long)]
    pub gl_debug: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything the host needs to open a window and pace frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub fps_cap: Option<u64>,
    pub vsync: bool,
    pub resizable: bool,
    pub gl_debug: bool,
}

impl From<&Cli> for AppConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            width: cli.width,
            height: cli.height,
            title: cli.title.clone(),
            fps_cap: (cli.fps_cap > 0).then_some(cli.fps_cap),
            vsync: cli.vsync,
            resizable: cli.resizable,
            gl_debug: cli.gl_debug,
        }
    }
}
