//! Application event loop.
//!
//! Wires winit input to the orbit camera controller and drives the frame
//! renderer. One frame loop thread issues all GPU commands; there is no
//! background work.
//!
//! # Controls
//!
//! - Left drag turns the orbit (yaw)
//! - Mouse wheel zooms
//! - Arrow keys pan the look-at target
//! - `1`-`6` snap to the axis views, `Q`/`W`/`E` to the top diagonals and
//!   `A`/`S`/`D` to the bottom diagonals
//! - `[` / `]` shrink / grow the lattice within [1, 32]

use std::sync::Arc;

use cgmath::{Matrix4, SquareMatrix};
use instant::Instant;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use crate::{
    camera::{CameraController, OrbitCamera, Projection, ViewPreset},
    context::Context,
    data_structures::texture::Texture,
    render::GridRenderer,
    resources,
};

/// Application state bundle: GPU context, camera, and renderer.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    renderer: GridRenderer,
    camera: OrbitCamera,
    controller: CameraController,
    projection: Projection,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, texture_files: Vec<String>) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;
        let texture_array =
            resources::texture::load_texture_array(&texture_files, &ctx.device, &ctx.queue)
                .await?;
        let renderer = GridRenderer::new(&ctx, &texture_array);
        let projection = Projection::new(
            ctx.config.width.max(1),
            ctx.config.height.max(1),
            std::f32::consts::FRAC_PI_4,
            0.1,
            100.0,
        );
        Ok(Self {
            ctx,
            renderer,
            camera: OrbitCamera::default(),
            controller: CameraController::default(),
            projection,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        // The surface pretransform is a pass-through from the windowing
        // layer; plain desktop surfaces are never rotated.
        self.renderer.render(
            &self.ctx,
            &self.camera,
            &self.projection,
            Matrix4::identity(),
        )
    }
}

pub(crate) enum AppEvent {
    Initialized(Box<AppState>),
}

/// The winit application: owns the state once the async setup finishes.
pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<AppEvent>,
    state: Option<AppState>,
    // Consumed by the first `resumed`.
    texture_files: Option<Vec<String>>,
    pan_up: bool,
    pan_down: bool,
    pan_left: bool,
    pan_right: bool,
    last_time: Instant,
}

impl App {
    fn new(event_loop: &EventLoop<AppEvent>, texture_files: Vec<String>) -> Self {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new().unwrap();
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            state: None,
            texture_files: Some(texture_files),
            pan_up: false,
            pan_down: false,
            pan_left: false,
            pan_right: false,
            last_time: Instant::now(),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode, pressed: bool) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        match code {
            KeyCode::Escape if pressed => event_loop.exit(),
            KeyCode::ArrowUp => self.pan_up = pressed,
            KeyCode::ArrowDown => self.pan_down = pressed,
            KeyCode::ArrowLeft => self.pan_left = pressed,
            KeyCode::ArrowRight => self.pan_right = pressed,
            KeyCode::BracketLeft if pressed => {
                let grid_size = state.renderer.grid_size().saturating_sub(1);
                state.renderer.set_grid_size(grid_size);
            }
            KeyCode::BracketRight if pressed => {
                state.renderer.set_grid_size(state.renderer.grid_size() + 1);
            }
            _ if pressed => {
                if let Some(preset) = preset_for(code) {
                    state.controller.set_preset(preset);
                }
            }
            _ => (),
        }
        state
            .controller
            .pan(self.pan_up, self.pan_down, self.pan_left, self.pan_right);
    }
}

fn preset_for(code: KeyCode) -> Option<ViewPreset> {
    match code {
        KeyCode::Digit1 => Some(ViewPreset::Front),
        KeyCode::Digit2 => Some(ViewPreset::Back),
        KeyCode::Digit3 => Some(ViewPreset::Left),
        KeyCode::Digit4 => Some(ViewPreset::Right),
        KeyCode::Digit5 => Some(ViewPreset::Up),
        KeyCode::Digit6 => Some(ViewPreset::Down),
        KeyCode::KeyQ => Some(ViewPreset::FrontLeft),
        KeyCode::KeyW => Some(ViewPreset::TopRight),
        KeyCode::KeyE => Some(ViewPreset::FrontRight),
        KeyCode::KeyA => Some(ViewPreset::BottomLeft),
        KeyCode::KeyS => Some(ViewPreset::BottomFront),
        KeyCode::KeyD => Some(ViewPreset::BottomRight),
        _ => None,
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes();

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = wgpu::web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            let canvas = document.get_element_by_id(CANVAS_ID).unwrap_throw();
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());
        let texture_files = self.texture_files.take().unwrap_or_default();

        #[cfg(not(target_arch = "wasm32"))]
        {
            let state = self
                .async_runtime
                .block_on(AppState::new(window, texture_files));
            match state {
                Ok(state) => self.state = Some(state),
                Err(e) => panic!("App initialization failed: {}", e),
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let state = AppState::new(window, texture_files)
                    .await
                    .expect("App initialization failed");
                proxy
                    .send_event(AppEvent::Initialized(Box::new(state)))
                    .unwrap_or_else(|_| panic!("event loop closed during initialization"));
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::Initialized(state) => {
                self.state = Some(*state);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(state) = self.state.as_mut() {
                    state.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, code, key_state.is_pressed()),
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(state) = self.state.as_mut() {
                    state.controller.dragging = button_state == ElementState::Pressed;
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(state) = self.state.as_mut() {
                    state.controller.process_scroll(&delta);
                }
            }
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();
                let Some(state) = self.state.as_mut() else {
                    return;
                };
                state.controller.update_camera(&mut state.camera, dt);
                match state.render() {
                    Ok(()) => (),
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory, exiting");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("Surface error: {:?}", e),
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if let Some(state) = self.state.as_mut() {
                state.controller.process_mouse(dx, dy);
            }
        }
    }
}

/// Start the engine with the given texture-array source files.
///
/// Blocks until the window closes. The files must all decode to the same
/// dimensions; they become the layers the per-instance texture index selects
/// from.
pub fn run(texture_files: Vec<String>) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    #[cfg(target_arch = "wasm32")]
    console_log::init_with_level(log::Level::Info)?;

    let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;
    let mut app = App::new(&event_loop, texture_files);
    event_loop.run_app(&mut app)?;
    Ok(())
}
