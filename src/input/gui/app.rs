//! Main GUI application loop.

use crate::controllers::explorer::{ExplorerEngine, InputEvent, KeyPress, LoopSignal, RenderBridge};
use crate::core::data::colour::COLOUR_WHITE;
use crate::core::data::point::Point;
use crate::presenters::pixels::frame_sink::PixelsFrameSink;
use log::error;
use pixels::{Pixels, SurfaceTexture};
use std::time::{Duration, Instant};
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

const SCREEN_WIDTH: u32 = 1200;
const SCREEN_HEIGHT: u32 = 900;
const TARGET_FPS: u32 = 60;

/// Application state: the pixels framebuffer, the engine, and its bridge.
struct App {
    pixels: Pixels<'static>,
    engine: ExplorerEngine,
    bridge: RenderBridge,
    width: u32,
    height: u32,
    /// Last observed cursor position; clicks report no position of their
    /// own.
    cursor: Point,
}

impl App {
    /// Creates the app with a pixels surface tied to the window and an
    /// engine sized to the window's physical raster.
    fn new(window: &'static Window) -> Self {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)
            .expect("Failed to create pixels surface");

        // The home view spans two plane units vertically.
        let init_scale = 2.0 / f64::from(size.height);
        let engine = ExplorerEngine::new(size.width, size.height, init_scale)
            .expect("Failed to allocate the iteration field");
        let bridge = engine.render_bridge();

        // White background until the first row lands.
        for rgba in pixels.frame_mut().chunks_exact_mut(4) {
            rgba[0] = COLOUR_WHITE.r;
            rgba[1] = COLOUR_WHITE.g;
            rgba[2] = COLOUR_WHITE.b;
            rgba[3] = 255;
        }

        Self {
            pixels,
            engine,
            bridge,
            width: size.width,
            height: size.height,
            cursor: Point { x: 0, y: 0 },
        }
    }

    /// Repaints from the field if the redraw flag was up, then presents.
    fn redraw(&mut self) -> Result<(), pixels::Error> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        let mut sink = PixelsFrameSink::new(self.pixels.frame_mut(), self.width);
        if let Err(e) = self.bridge.consume_and_redraw(&mut sink) {
            error!("field projection failed: {}", e);
        }

        self.pixels.render()
    }

    /// The window is not resizable, but the surface still needs to track
    /// scale-factor changes. The framebuffer (and the field) stay at their
    /// startup size.
    fn resize_surface(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.pixels
                .resize_surface(width, height)
                .expect("Failed to resize surface");
        }
    }
}

/// Translates one winit event into the engine's input vocabulary.
fn translate_event(event: &WindowEvent, cursor: Point) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested => Some(InputEvent::Quit),
        WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
            let key = match event.physical_key {
                PhysicalKey::Code(KeyCode::Escape) => KeyPress::Escape,
                PhysicalKey::Code(KeyCode::Home) => KeyPress::Home,
                _ => KeyPress::Other,
            };
            Some(InputEvent::Key(key))
        }
        WindowEvent::MouseInput {
            state: ElementState::Released,
            button: MouseButton::Left,
            ..
        } => Some(InputEvent::Click(cursor)),
        _ => None,
    }
}

/// Runs the GUI application.
///
/// This function does not return until the window is closed.
pub fn run_gui() {
    let event_loop = EventLoop::new().expect("Failed to create event loop");

    // Leak the window to get a 'static reference for pixels
    let window: &'static Window = Box::leak(Box::new(
        WindowBuilder::new()
            .with_title("Mandelbrot Explorer")
            .with_inner_size(LogicalSize::new(
                f64::from(SCREEN_WIDTH),
                f64::from(SCREEN_HEIGHT),
            ))
            .with_resizable(false)
            .build(&event_loop)
            .expect("Failed to create window"),
    ));

    let mut app = App::new(window);
    app.engine.go_home().expect("home view is valid");
    window.set_title(&app.engine.caption());

    let frame_interval = Duration::from_secs(1) / TARGET_FPS;
    let mut next_frame = Instant::now() + frame_interval;

    event_loop
        .run(move |event, elwt| {
            match event {
                Event::WindowEvent {
                    ref event,
                    window_id,
                } if window_id == window.id() => match event {
                    WindowEvent::CursorMoved { position, .. } => {
                        app.cursor = Point {
                            x: position.x as i32,
                            y: position.y as i32,
                        };
                    }
                    WindowEvent::Resized(size) => {
                        app.resize_surface(size.width, size.height);
                    }
                    WindowEvent::RedrawRequested => {
                        if let Err(e) = app.redraw() {
                            error!("render error: {}", e);
                            elwt.exit();
                        }
                    }
                    _ => {
                        if let Some(input) = translate_event(event, app.cursor) {
                            let navigated = matches!(
                                input,
                                InputEvent::Key(KeyPress::Home) | InputEvent::Click(_)
                            );

                            match app.engine.on_event(input) {
                                LoopSignal::Quit => elwt.exit(),
                                LoopSignal::Continue => {
                                    if navigated {
                                        window.set_title(&app.engine.caption());
                                    }
                                }
                            }
                        }
                    }
                },
                Event::AboutToWait => {
                    let now = Instant::now();
                    if now >= next_frame {
                        next_frame = now + frame_interval;
                        if app.bridge.is_dirty() {
                            window.request_redraw();
                        }
                    }
                    elwt.set_control_flow(ControlFlow::WaitUntil(next_frame));
                }
                _ => {}
            }
        })
        .expect("Event loop error");
}
