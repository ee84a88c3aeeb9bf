use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{HostEvent, Key, Lifecycle};
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "drift".to_string(),
            initial_size: LogicalSize::new(480.0, 640.0),
        }
    }
}

/// Entry point for the windowed runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it asks to exit or the window closes.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = HostState {
            config,
            gpu_init,
            app,
            entry: None,
            suspended: false,
            failure: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,
    cursor: Option<(f32, f32)>,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct HostState<A: App + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    entry: Option<WindowEntry>,
    /// Set between winit `suspended` and the following `resumed`.
    suspended: bool,
    failure: Option<anyhow::Error>,
}

impl<A: App + 'static> HostState<A> {
    fn create_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            clock: FrameClock::new(),
            cursor: None,
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()?;

        entry.borrow_window().request_redraw();
        self.entry = Some(entry);
        Ok(())
    }

    /// Current logical size of the window as a resize event.
    fn logical_size(&self) -> Option<HostEvent> {
        let window = self.entry.as_ref()?.borrow_window();
        let logical = window.inner_size().to_logical::<f64>(window.scale_factor());
        Some(HostEvent::Resized { width: logical.width as f32, height: logical.height as f32 })
    }

    fn now(&self) -> f64 {
        self.entry.as_ref().map_or(0.0, |e| e.borrow_clock().elapsed())
    }

    /// Forwards `event` to the app; returns true when the app asked to exit.
    fn dispatch(&mut self, event: HostEvent) -> bool {
        let now = self.now();
        log::trace!("host event at {now:.3}s: {event:?}");
        let exit = self.app.on_event(event, now) == AppControl::Exit;
        if let Some(entry) = &self.entry {
            entry.borrow_window().request_redraw();
        }
        exit
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }
}

impl<A: App + 'static> ApplicationHandler for HostState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            if std::mem::take(&mut self.suspended) && self.dispatch(HostEvent::Lifecycle(Lifecycle::DidResume)) {
                event_loop.exit();
            }
            return;
        }

        if let Err(e) = self.create_entry(event_loop) {
            self.fail(event_loop, e.context("failed to create the main window"));
            return;
        }
        // The app sees its initial size before it appears.
        let initial = self.logical_size();
        if initial.is_some_and(|resized| self.dispatch(resized)) {
            event_loop.exit();
            return;
        }
        if self.dispatch(HostEvent::Lifecycle(Lifecycle::Appeared)) {
            event_loop.exit();
        }
    }

    fn suspended(&mut self, event_loop: &ActiveEventLoop) {
        self.suspended = true;
        if self.dispatch(HostEvent::Lifecycle(Lifecycle::WillSuspend)) {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        if self.suspended || !self.app.wants_continuous_redraw() {
            return;
        }
        if let Some(entry) = &self.entry {
            entry.borrow_window().request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let host_event = match &event {
            WindowEvent::CloseRequested => {
                self.dispatch(HostEvent::Lifecycle(Lifecycle::Disappearing));
                self.entry = None;
                event_loop.exit();
                return;
            }

            WindowEvent::Focused(true) | WindowEvent::Occluded(false) => {
                Some(HostEvent::Lifecycle(Lifecycle::DidResume))
            }
            WindowEvent::Focused(false) | WindowEvent::Occluded(true) => {
                Some(HostEvent::Lifecycle(Lifecycle::WillSuspend))
            }

            WindowEvent::Resized(size) => self.entry.as_mut().map(|entry| {
                entry.with_gpu_mut(|gpu| gpu.resize(*size));
                let scale = entry.borrow_window().scale_factor();
                let logical = size.to_logical::<f64>(scale);
                HostEvent::Resized { width: logical.width as f32, height: logical.height as f32 }
            }),

            WindowEvent::ScaleFactorChanged { .. } => self.entry.as_mut().map(|entry| {
                let size = entry.borrow_window().inner_size();
                entry.with_gpu_mut(|gpu| gpu.resize(size));
                let logical = size.to_logical::<f64>(entry.borrow_window().scale_factor());
                HostEvent::Resized { width: logical.width as f32, height: logical.height as f32 }
            }),

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let scale = entry.borrow_window().scale_factor();
                    let logical = position.to_logical::<f64>(scale);
                    entry.with_cursor_mut(|c| *c = Some((logical.x as f32, logical.y as f32)));
                }
                None
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_cursor_mut(|c| *c = None);
                }
                None
            }

            WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Left, .. } => self
                .entry
                .as_ref()
                .and_then(|e| *e.borrow_cursor())
                .map(|(x, y)| HostEvent::Click { x, y }),

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                Some(HostEvent::KeyPressed(map_key(event.physical_key)))
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                return;
            }

            _ => None,
        };

        if let Some(ev) = host_event {
            if self.dispatch(ev) {
                event_loop.exit();
            }
        }
    }
}

impl<A: App + 'static> HostState<A> {
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else { return };

        let mut control = AppControl::Continue;
        entry.with_mut(|fields| {
            let size = fields.window.inner_size();
            if size.width == 0 || size.height == 0 {
                return;
            }
            let mut ctx = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
                time: fields.clock.tick(),
            };
            control = app.on_frame(&mut ctx);
        });

        if control == AppControl::Exit {
            event_loop.exit();
        }
    }
}

fn map_key(key: PhysicalKey) -> Key {
    match key {
        PhysicalKey::Code(KeyCode::Space) => Key::Space,
        PhysicalKey::Code(KeyCode::Enter) => Key::Enter,
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::KeyP) => Key::P,
        PhysicalKey::Code(KeyCode::KeyS) => Key::S,
        PhysicalKey::Code(KeyCode::ArrowUp) => Key::Up,
        PhysicalKey::Code(KeyCode::ArrowDown) => Key::Down,
        _ => Key::Other,
    }
}
