#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![allow(clippy::new_without_default)]
use std::cell::RefCell;
use std::rc::Rc;

const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

mod assets;
mod background_window;
mod draw;
mod graphics;
mod logger;
mod scene;
mod settings;
mod utils;
mod widgets;
mod windowing;

use background_window::BackgroundWindow;
use graphics::Graphics;
use settings::SettingNames;
use utils::{LogicalPosition, LogicalSize, PhysicalSize, Rect};
use widgets::SynthwaveBackground;
use winit::window::WindowAttributes;

const SETTINGS_FILE_PATH: &str = "./synthwave.settings";

fn main() {
    logger::init();
    log_panics::init();
    logger::info!("Starting synthwave {CARGO_PKG_VERSION}");

    let settings = match settings::load_settings(SETTINGS_FILE_PATH) {
        Ok(settings) => settings,
        Err(e) => {
            logger::error!("Unable to load settings: {e:?}");
            settings::SettingsFile::watching(SETTINGS_FILE_PATH)
        }
    };
    logger::set_log_level(&settings.get_str(SettingNames::LoggingLevel));

    let mut background = SynthwaveBackground::new();
    let seed = settings.get_i32(SettingNames::SceneSeed);
    if seed >= 0 {
        background = background.with_seed(seed as u64);
    }
    background.apply_settings(&settings);

    let handler = BackgroundWindow::new(background, settings);
    let attributes = WindowAttributes::default().with_title("Synthwave").with_visible(true);
    windowing::run_app(windowing::WindowInfo::new(Rc::new(RefCell::new(handler)), attributes, true));
}
