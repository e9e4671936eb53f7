//! Main application module: wires the sampler thread to the render loop.

use crate::{
    camera::CameraSource,
    config::Config,
    error::Result,
    face_detection::HaarFaceLocator,
    filters::MotionFilter,
    position::{NormalizedPosition, SharedPosition},
    render::{FrameDisplay, FrameLimiter, HighguiWindow, MatCanvas, WindowEvent},
    sampler::{Sampler, SamplerReport},
    scene::Scene,
};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Per-tick state of the render loop: filter plus layout.
#[derive(Debug, Clone)]
pub struct Renderer {
    filter: MotionFilter,
    scene: Scene,
}

impl Renderer {
    pub fn new(filter: MotionFilter, scene: Scene) -> Self {
        Self { filter, scene }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(MotionFilter::from_config(&config.filter)?, Scene::from_config(config)))
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn smoothed(&self) -> NormalizedPosition {
        self.filter.state()
    }

    /// Advance the filter toward `raw` and draw the resulting frame.
    pub fn tick(&mut self, raw: NormalizedPosition, canvas: &mut MatCanvas) -> Result<NormalizedPosition> {
        let smoothed = self.filter.step(raw);
        canvas.render(&self.scene.compose(smoothed))?;
        Ok(smoothed)
    }
}

/// Raises the stop flag when dropped, including during unwinding.
struct StopOnDrop<'a>(&'a AtomicBool);

impl Drop for StopOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Main application struct
pub struct CatEyesApp {
    sampler: Sampler<CameraSource, HaarFaceLocator>,
    renderer: Renderer,
    canvas: MatCanvas,
    window: HighguiWindow,
    target_fps: u32,
}

impl CatEyesApp {
    /// Acquire every resource the loops need.
    ///
    /// Fails before anything runs if the model is missing or unloadable, the
    /// camera cannot be opened, or the window cannot be created.
    pub fn new(config: &Config) -> Result<Self> {
        info!("Initializing cat eyes application");
        config.validate()?;

        if let Ok(cwd) = std::env::current_dir() {
            debug!("Working directory: {}", cwd.display());
        }

        let model_path = config.resolve_model_path()?;
        let locator = HaarFaceLocator::from_config(&model_path, &config.detector)?;
        let camera = CameraSource::open(config.camera.device_index)?;

        let renderer = Renderer::from_config(config)?;
        let (width, height) = renderer.scene().size();
        let canvas = MatCanvas::new(width, height)?;
        let window = HighguiWindow::open(&config.display.window_title)?;

        Ok(Self {
            sampler: Sampler::new(camera, locator),
            renderer,
            canvas,
            window,
            target_fps: config.display.target_fps,
        })
    }

    /// Run until the window is closed.
    ///
    /// The sampler runs on its own thread and is stopped and joined before
    /// this returns, whatever way the render loop ends. The camera is released
    /// by the sampler thread, the window once both loops are done.
    pub fn run(self) -> Result<()> {
        let Self {
            sampler,
            mut renderer,
            mut canvas,
            mut window,
            target_fps,
        } = self;

        let position = SharedPosition::new(NormalizedPosition::CENTER);
        let stop = AtomicBool::new(false);

        let result = thread::scope(|s| -> Result<()> {
            let sampler_thread = thread::Builder::new()
                .name("sampler".to_string())
                .spawn_scoped(s, || sampler.run(&position, &stop))?;

            let result = {
                let _stop = StopOnDrop(&stop);
                render_loop(&mut renderer, &mut canvas, &mut window, &position, target_fps)
            };

            match sampler_thread.join() {
                Ok(report) => log_report(&report),
                Err(_) => warn!("Sampler thread panicked"),
            }
            result
        });

        drop(window);
        info!("Application shutting down");
        result
    }
}

/// Tick until the display asks to close. The frame drawn on the closing tick
/// is not presented.
fn render_loop<D: FrameDisplay>(
    renderer: &mut Renderer,
    canvas: &mut MatCanvas,
    window: &mut D,
    position: &SharedPosition,
    target_fps: u32,
) -> Result<()> {
    info!("Entering render loop at {} FPS", target_fps);
    let mut limiter = FrameLimiter::new(target_fps);
    let mut running = true;

    while running {
        for event in window.poll_events()? {
            match event {
                WindowEvent::CloseRequested => {
                    info!("Exit requested by user");
                    running = false;
                }
                WindowEvent::KeyPressed(key) => debug!("Ignoring key {}", key),
            }
        }

        renderer.tick(position.load(), canvas)?;

        if running {
            window.present(canvas.image())?;
        }
        limiter.tick();
    }

    Ok(())
}

fn log_report(report: &SamplerReport) {
    info!(
        "Sampler read {} frames, found faces in {}, {} failed captures",
        report.frames, report.detections, report.capture_failures
    );
}
