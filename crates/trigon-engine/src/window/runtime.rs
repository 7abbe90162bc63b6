use anyhow::{Context, Result, anyhow};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::frame::{FrameLoop, LoopEvent, LoopState, TRIANGLE};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputEvent, InputState, KeyState};
use crate::render::{GpuFrameTarget, GpuProgram, VertexStream};
use crate::shader::load_program;

use super::config::{RuntimeConfig, WindowConfig, centered_position};

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, builds the program, and runs the frame loop until
    /// it stops.
    ///
    /// Fails before any window exists if the windowing platform cannot be
    /// initialized. Window or context creation failures and fatal surface
    /// errors are returned after the event loop has shut down.
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to initialize the windowing platform")?;
        log::info!(
            "platform: winit on {} ({})",
            std::env::consts::OS,
            std::env::consts::ARCH
        );

        let mut state = AppState::new(config, gpu_init);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// GPU resources owned by the frame loop.
struct Scene {
    frame_loop: FrameLoop<GpuProgram>,
    stream: VertexStream,
}

/// Declared scene-first so the program is released before the context.
struct Live {
    scene: Scene,
    entry: WindowEntry,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,

    live: Option<Live>,
    window_id: Option<WindowId>,

    /// Events queued during dispatch, drained once per iteration.
    pending: Vec<LoopEvent>,
    input: InputState,

    error: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit) -> Self {
        Self {
            config,
            gpu_init,
            live: None,
            window_id: None,
            pending: Vec::new(),
            input: InputState::default(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn create_live(&self, event_loop: &ActiveEventLoop) -> Result<Live> {
        let window = event_loop
            .create_window(window_attributes(event_loop, &self.config.window))
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("failed to create graphics context")?;

        let scene = entry.with_gpu(|gpu| {
            log::info!("graphics context: {}", gpu.info());

            let program = load_program(&self.config.program)
                .map(|linked| GpuProgram::create(gpu.device(), gpu.surface_format(), &linked));

            Scene {
                frame_loop: FrameLoop::new(program, self.config.frame.clone()),
                stream: VertexStream::new(gpu.device(), TRIANGLE.len()),
            }
        });

        Ok(Live { scene, entry })
    }

    fn queue_window_event(&mut self, event: &WindowEvent) {
        if matches!(event, WindowEvent::CloseRequested | WindowEvent::Destroyed) {
            self.pending.push(LoopEvent::Quit);
        }

        if let Some(ev) = translate_window_event(event) {
            self.input.apply_event(&ev);
            if let InputEvent::Key { key, state: KeyState::Pressed, .. } = ev {
                self.pending.push(LoopEvent::KeyDown(key));
            }
        }
    }

    /// One loop iteration: drain queued events, then draw.
    fn iterate(&mut self, event_loop: &ActiveEventLoop) {
        let Some(Live { scene, entry }) = self.live.as_mut() else {
            return;
        };

        let events = std::mem::take(&mut self.pending);
        if scene.frame_loop.drain_events(events, &self.input) == LoopState::Stopped {
            event_loop.exit();
            return;
        }

        let action = entry.with_mut(|fields| match fields.gpu.begin_frame() {
            Ok(frame) => {
                fields.window.pre_present_notify();
                let mut target = GpuFrameTarget::new(fields.gpu, &scene.stream, frame);
                scene.frame_loop.draw(&mut target);
                None
            }
            Err(err) => {
                log::debug!("frame skipped: {err}");
                Some(fields.gpu.handle_surface_error(err))
            }
        });

        if action == Some(SurfaceErrorAction::Fatal) {
            scene.frame_loop.stop();
            self.fail(event_loop, anyhow!("graphics surface ran out of memory"));
        }
    }
}

fn window_attributes(
    event_loop: &ActiveEventLoop,
    config: &WindowConfig,
) -> winit::window::WindowAttributes {
    let mut attrs = Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(config.size)
        .with_resizable(config.resizable)
        .with_visible(true);

    if config.centered {
        if let Some(monitor) = event_loop.primary_monitor() {
            let position = centered_position(monitor.position(), monitor.size(), config.size);
            attrs = attrs.with_position(position);
        }
    }

    attrs
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.live.is_some() {
            return;
        }

        match self.create_live(event_loop) {
            Ok(live) => {
                self.window_id = Some(live.entry.with_window(|w| w.id()));
                self.live = Some(live);
                event_loop.set_control_flow(ControlFlow::Poll);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window_id != Some(window_id) {
            return;
        }

        if let WindowEvent::Resized(new_size) = event {
            if let Some(live) = self.live.as_mut() {
                live.entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }
        }

        self.queue_window_event(&event);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.iterate(event_loop);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.live.take().is_some() {
            log::debug!("graphics context released");
        }
    }
}
