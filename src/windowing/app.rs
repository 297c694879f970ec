use std::cell::RefCell;
use std::ffi::CString;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use speedy2d::dimen::Vector2;
use speedy2d::GLRenderer;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::{DisplayBuilder, GlWindow};

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::raw_window_handle::HasWindowHandle;
use winit::window::{Fullscreen, Window, WindowId};

use super::{FrameTimer, WindowHandler, WindowInfo};
use crate::logger::{info, LogEntry, PanicLogEntry};
use crate::{Graphics, PhysicalSize};

struct SynthWindow {
    window: Window,
    gl_context: glutin::context::PossiblyCurrentContext,
    gl_surface: glutin::surface::Surface<WindowSurface>,
    renderer: GLRenderer,
    size: PhysicalSize,
    handler: Rc<RefCell<dyn WindowHandler + 'static>>,
    graphics: RefCell<Graphics>,
}

pub(crate) struct App {
    info: Option<WindowInfo>,
    window: Option<SynthWindow>,
    timer: FrameTimer,
}

impl App {
    pub fn new(info: WindowInfo, interval: Duration) -> Self {
        Self { info: Some(info), window: None, timer: FrameTimer::new(interval, Instant::now()) }
    }

    fn create_window(event_loop: &ActiveEventLoop, info: WindowInfo) -> SynthWindow {
        for multisampling in &[16, 8, 4, 2, 1, 0] {
            let mut template = ConfigTemplateBuilder::new().with_transparency(true);

            if *multisampling > 1 {
                template = template.with_multisampling(*multisampling);
            }

            let display_builder = DisplayBuilder::new().with_window_attributes(Some(info.attributes.clone()));
            let result = display_builder.build(event_loop, template, |mut configs| {
                configs.next().log_message_and_panic("No GL configs available")
            });

            let (window, gl_config) = match result {
                Ok((Some(window), config)) => {
                    info!("Window created");
                    (window, config)
                }
                Ok((None, _)) => {
                    info!("Failed with null window");
                    continue;
                }
                Err(err) => {
                    info!("Failed with error: {err:?}");
                    continue;
                }
            };

            let gl_display = gl_config.display();

            let handle = match window.window_handle() {
                Ok(handle) => handle,
                Err(err) => {
                    info!("Failed to get window handle: {err:?}");
                    continue;
                }
            };
            let context_attributes = ContextAttributesBuilder::new()
                .with_context_api(ContextApi::OpenGl(Some(Version::new(2, 0))))
                .build(Some(handle.as_raw()));

            let context = match unsafe { gl_display.create_context(&gl_config, &context_attributes) } {
                Ok(context) => context,
                Err(err) => {
                    info!("Failed to create context with error: {err:?}");
                    continue;
                }
            };

            let attrs = match window.build_surface_attributes(SurfaceAttributesBuilder::default()) {
                Ok(attrs) => attrs,
                Err(err) => {
                    info!("Failed to build surface attributes: {err:?}");
                    continue;
                }
            };

            let gl_surface = match unsafe { gl_config.display().create_window_surface(&gl_config, &attrs) } {
                Ok(surface) => surface,
                Err(err) => {
                    info!("Failed to finalize surface with error: {err:?}");
                    continue;
                }
            };

            let gl_context = match context.make_current(&gl_surface) {
                Ok(context) => context,
                Err(err) => {
                    info!("Failed to make context current with error: {err:?}");
                    continue;
                }
            };

            let size = window.inner_size();
            let renderer = unsafe {
                GLRenderer::new_for_gl_context((size.width, size.height), |fn_name| match CString::new(fn_name) {
                    Ok(name) => gl_context.display().get_proc_address(name.as_c_str()) as *const _,
                    Err(_) => std::ptr::null(),
                })
            };
            let mut renderer = match renderer {
                Ok(renderer) => renderer,
                Err(err) => {
                    info!("Failed to create renderer with error: {err:?}");
                    continue;
                }
            };

            // Attach the widget now that there is something to draw into
            let mut window_graphics = Graphics::new();
            let scale = window.scale_factor() as f32;
            let size = PhysicalSize::new(size.width as f32, size.height as f32);
            {
                let mut handler = info.handler.borrow_mut();
                renderer.draw_frame(|graphics| {
                    unsafe {
                        window_graphics.set_frame(graphics, scale, size);
                    }
                    handler.on_init(&mut window_graphics);
                });
            }

            return SynthWindow {
                window,
                gl_context,
                gl_surface,
                renderer,
                size,
                handler: info.handler.clone(),
                graphics: RefCell::new(window_graphics),
            };
        }
        panic!("Unable to create window")
    }

    fn window_mut(&mut self, window_id: WindowId) -> Option<&mut SynthWindow> {
        self.window.as_mut().filter(|w| w.window.id() == window_id)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(mut info) = self.info.take() else {
            return;
        };

        if info.fullscreen {
            let monitor = event_loop.primary_monitor();
            info.attributes = info.attributes.with_fullscreen(Some(Fullscreen::Borderless(monitor)));
        }
        self.window = Some(Self::create_window(event_loop, info));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(window) = &self.window {
                    window.handler.borrow_mut().on_stop();
                }
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(window) = self.window_mut(window_id) {
                    window.size = PhysicalSize::new(physical_size.width as f32, physical_size.height as f32);

                    if let (Some(width), Some(height)) =
                        (NonZeroU32::new(physical_size.width.max(1)), NonZeroU32::new(physical_size.height.max(1)))
                    {
                        window.gl_surface.resize(&window.gl_context, width, height);
                    }
                    window.renderer.set_viewport_size_pixels(Vector2::new(physical_size.width, physical_size.height));
                    window.window.request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } | WindowEvent::Focused(true) => {
                if let Some(window) = self.window_mut(window_id) {
                    window.window.request_redraw()
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(window) = self.window_mut(window_id) {
                    let scale = window.window.scale_factor() as f32;
                    let size = window.size;
                    let mut handle = window.handler.borrow_mut();
                    let mut window_graphics = window.graphics.borrow_mut();

                    window.gl_context.make_current(&window.gl_surface).log("Unable to make context current");
                    window.renderer.draw_frame(|graphics| {
                        unsafe {
                            window_graphics.set_frame(graphics, scale, size);
                        }
                        handle.on_frame(&mut window_graphics);
                    });
                    window.gl_surface.swap_buffers(&window.gl_context).log("Unable to swap buffers");
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            if self.timer.poll(Instant::now()) {
                let mut handle = window.handler.borrow_mut();
                if !handle.on_fixed_update() {
                    info!("Frame timer stopped");
                    self.timer.stop();
                }
                self.timer.set_interval(handle.frame_interval());
                window.window.request_redraw();
            }
        }

        match self.timer.deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}
