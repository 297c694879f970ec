use crate::graphics::Graphics;
use crate::logger::{info, LogEntry};
use crate::settings::{SettingNames, SettingsFile};
use crate::widgets::{SynthwaveBackground, Widget};
use crate::windowing::WindowHandler;
use speedy2d::color::Color;
use std::time::Duration;

/// Hosts the background widget in a window and keeps it in sync with the settings file
pub struct BackgroundWindow {
    widget: SynthwaveBackground,
    settings: SettingsFile,
}
impl BackgroundWindow {
    pub fn new(widget: SynthwaveBackground, settings: SettingsFile) -> BackgroundWindow {
        BackgroundWindow { widget, settings }
    }
}

impl WindowHandler for BackgroundWindow {
    fn on_init(&mut self, graphics: &mut Graphics) { self.widget.on_attach(graphics); }

    fn on_fixed_update(&mut self) -> bool {
        //Check for any updates to the settings file
        if crate::settings::update_settings(&mut self.settings).log("Unable to retrieve updated settings") {
            info!("Settings changed, reapplying");
            crate::logger::set_log_level(&self.settings.get_str(SettingNames::LoggingLevel));
            self.widget.apply_settings(&self.settings);
        }
        self.widget.update()
    }

    fn on_frame(&mut self, graphics: &mut Graphics) {
        graphics.clear(Color::BLACK);
        self.widget.render(graphics);
    }

    fn frame_interval(&self) -> Duration {
        let millis = self.settings.get_i32(SettingNames::FrameIntervalMs).max(1);
        Duration::from_millis(millis as u64)
    }

    fn on_stop(&mut self) { info!("Window closed, stopping"); }
}
