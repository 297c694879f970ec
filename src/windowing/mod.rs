use crate::graphics::Graphics;
use crate::logger::PanicLogEntry;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use winit::event_loop::EventLoop;
use winit::window::WindowAttributes;

mod app;
mod timer;
pub use timer::FrameTimer;

pub(crate) trait WindowHandler {
    /// Called once the window and its GL context exist
    fn on_init(&mut self, graphics: &mut Graphics);

    /// Called by the frame timer. Returning `false` stops the timer for good
    fn on_fixed_update(&mut self) -> bool;

    fn on_frame(&mut self, graphics: &mut Graphics);

    /// Period of the frame timer, read again after every tick
    fn frame_interval(&self) -> Duration;

    fn on_stop(&mut self) {}
}

pub(crate) struct WindowInfo {
    handler: Rc<RefCell<dyn WindowHandler + 'static>>,
    attributes: WindowAttributes,
    fullscreen: bool,
}
impl WindowInfo {
    pub fn new(handler: Rc<RefCell<dyn WindowHandler + 'static>>, attributes: WindowAttributes, fullscreen: bool) -> WindowInfo {
        WindowInfo { handler, attributes, fullscreen }
    }
}

pub(crate) fn run_app(info: WindowInfo) {
    let el = EventLoop::new().log_message_and_panic("Unable to create event loop");

    let interval = info.handler.borrow().frame_interval();
    let mut app = app::App::new(info, interval);
    if let Err(e) = el.run_app(&mut app) {
        crate::logger::error!("Event loop exited with error {e:?}");
    }
}
