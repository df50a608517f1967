//! The cube application: an orbiting camera looking at a half-transparent
//! cube sitting on a debug grid.
use anyhow::{Context, Result};
use glam::Vec3;
use render::{Gizmos, IndexedMesh, Render};
use sdl2::keyboard::Keycode;
use world::{spin_transform, Camera, Grid, CUBE_INDICES, CUBE_VERTICES};

use crate::app::{Application, Host};

/// Primitive budget handed to the gizmos.
const GIZMO_CAPACITY: usize = 10_000;

/// Where the spinning transform gizmo sits.
const SPIN_ORIGIN: Vec3 = Vec3::new(-2.0, 0.0, 0.0);

/// GL resources, alive between startup and shutdown.
struct Scene {
    mesh: IndexedMesh<u8>,
    render: Render,
    gizmos: Gizmos,
}

pub struct CubeApp {
    camera: Camera,
    grid: Grid,
    scene: Option<Scene>,
}

impl CubeApp {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            camera: Camera::new(width, height),
            grid: Grid::default(),
            scene: None,
        }
    }
}

impl Application for CubeApp {
    fn startup(&mut self, host: &mut Host) -> Result<()> {
        host.set_background_colour(0.25, 0.25, 0.25);

        let gizmos = Gizmos::create(GIZMO_CAPACITY, GIZMO_CAPACITY)
            .context("creating gizmos")?;
        let (width, height) = (host.window_width(), host.window_height());
        self.camera.update_projection(width, height);

        let render = Render::init().context("loading cube shader")?;
        let mesh = IndexedMesh::upload(&CUBE_VERTICES, &CUBE_INDICES)
            .context("uploading cube")?;
        tracing::info!(
            indices = mesh.index_count(),
            index_type = ?mesh.index_type(),
            "cube uploaded"
        );
        self.scene = Some(Scene {
            mesh,
            render,
            gizmos,
        });
        Ok(())
    }

    fn update(&mut self, host: &mut Host, _delta_time: f32) {
        let time = host.time();
        self.camera.orbit(time);

        if let Some(scene) = self.scene.as_mut() {
            scene.gizmos.clear();
            scene.gizmos.add_grid(&self.grid);
            let spin = spin_transform(time, SPIN_ORIGIN);
            scene.gizmos.add_transform(&spin, 1.0);
        }

        if host.input().is_key_down(Keycode::ESCAPE) {
            host.quit();
        }
    }

    fn draw(&mut self, host: &mut Host) -> Result<()> {
        host.clear_screen();

        // the window may have been resized
        let (width, height) = (host.window_width(), host.window_height());
        self.camera.update_projection(width, height);
        let projection_view = self.camera.projection_view();

        if let Some(scene) = self.scene.as_mut() {
            scene
                .render
                .draw_mesh(&scene.mesh, &projection_view)
                .context("drawing cube")?;
            let gizmos = &scene.gizmos;
            gizmos.draw(&projection_view).context("drawing gizmos")?;
        }
        Ok(())
    }

    fn shutdown(&mut self, _host: &mut Host) {
        // fields drop in declaration order: cube, then shader, then gizmos
        if self.scene.take().is_some() {
            tracing::info!("released cube, shader and gizmos");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_starts_from_window_size() {
        let app = CubeApp::new(1280, 720);
        let projection = app.camera.projection();
        assert!((projection.x_axis.x * 1280.0 / 720.0 - projection.y_axis.y).abs() < 1e-5);
    }

    #[test]
    fn update_without_gl_only_moves_camera() {
        let mut app = CubeApp::new(800, 600);
        let mut host = Host::new(800, 600);
        let before = app.camera.view();
        app.update(&mut host, 0.0);
        assert_ne!(app.camera.view(), before);
        assert!(!host.should_quit());
    }

    #[test]
    fn escape_quits() {
        let mut app = CubeApp::new(800, 600);
        let mut host = Host::new(800, 600);
        host.input_mut().key_down(Keycode::ESCAPE);
        app.update(&mut host, 0.0);
        assert!(host.should_quit());
    }

    #[test]
    fn shutdown_before_startup_is_harmless() {
        let mut app = CubeApp::new(800, 600);
        let mut host = Host::new(800, 600);
        app.shutdown(&mut host);
        assert!(app.scene.is_none());
    }
}
