use crate::assets::{read_font, read_image, AssetSlot};
use crate::draw::DrawList;
use crate::graphics::Texture;
use crate::logger::warn;
use crate::scene::render::{render, RenderOptions};
use crate::scene::{RecyclePolicy, SceneConfig, SceneState, Viewport};
use crate::settings::{SettingNames, SettingsFile};
use crate::widgets::{UiElement, Widget};
use crate::{widget, Graphics};
use rand::rngs::StdRng;
use rand::SeedableRng;
use speedy2d::font::Font;

widget!(
    pub struct SynthwaveBackground {
        scene: SceneState = SceneState::new(),
        config: SceneConfig = SceneConfig::default(),
        options: RenderOptions = RenderOptions::default(),
        rng: StdRng = StdRng::from_entropy(),
        populated: bool = false,
        sprite_path: String = String::new(),
        sprite: AssetSlot<Texture> = AssetSlot::Failed,
        font_path: String = String::new(),
        font: AssetSlot<Font> = AssetSlot::Failed
    }
);

impl SynthwaveBackground {
    /// Makes skyline generation reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Copies tuning values out of the settings file. Safe to call again after a reload
    pub fn apply_settings(&mut self, settings: &SettingsFile) {
        let get = |name| widen(settings.get_f32(name));
        self.config.gradient_speed = get(SettingNames::GradientSpeed);
        self.config.building_speed = get(SettingNames::BuildingScrollSpeed);
        self.config.sprite_speed = get(SettingNames::SpriteScrollSpeed);
        self.config.sprite_period = get(SettingNames::SpriteTilePeriod);
        self.config.recycle = match settings.get_bool(SettingNames::RecycleResample) {
            true => RecyclePolicy::Resample,
            false => RecyclePolicy::KeepSize,
        };

        self.options.debug_overlay = settings.get_bool(SettingNames::DebugOverlay);
        self.options.scanlines = settings.get_bool(SettingNames::Scanlines);

        //Changing a path queues the asset to load again on the next frame
        let sprite_path = settings.get_str(SettingNames::SpritePath);
        if sprite_path != self.sprite_path {
            self.sprite = AssetSlot::new(&sprite_path);
            self.sprite_path = sprite_path;
        }
        let font_path = settings.get_str(SettingNames::FontPath);
        if font_path != self.font_path {
            self.font = AssetSlot::new(&font_path);
            self.font_path = font_path;
        }
    }

    fn viewport(&self) -> Viewport {
        let size = self.layout().size();
        Viewport::new(f64::from(size.x), f64::from(size.y))
    }

    /// Builds the skyline for the current layout. Only the first call does anything, resizes keep the same skyline
    fn populate(&mut self) {
        if !self.populated {
            self.scene.populate(&self.config, self.viewport(), &mut self.rng);
            self.populated = true;
        }
    }

    fn load_sprite(&mut self, graphics: &mut Graphics) {
        self.sprite.ensure_loaded(|path| {
            let raw = read_image(path)?;
            graphics.create_texture(&raw)
        });
    }

    fn draw_list(&self) -> DrawList {
        let sprite = self.sprite.get().map(Texture::size);
        render(&self.scene, self.viewport(), sprite, &self.options)
    }
}

/// `f64::from(0.4f32)` is 0.4000000059, going through the decimal form keeps the value that was written
fn widen(value: f32) -> f64 { value.to_string().parse().unwrap_or(f64::from(value)) }

impl Widget for SynthwaveBackground {
    fn on_attach(&mut self, graphics: &mut Graphics) {
        self.set_layout(graphics.bounds);
        self.populate();
        self.load_sprite(graphics);
        if self.sprite.is_failed() {
            warn!("Sprite strip unavailable, drawing placeholder instead");
        }
    }

    fn update(&mut self) -> bool {
        let width = self.viewport().width;
        self.scene.tick(&self.config, width, &mut self.rng);
        true
    }

    fn render(&mut self, graphics: &mut Graphics) {
        self.set_layout(graphics.bounds);
        self.load_sprite(graphics);
        if self.options.debug_overlay {
            self.font.ensure_loaded(read_font);
        }

        let list = self.draw_list();
        graphics.execute(&list, self.sprite.get(), self.font.get());
    }
}
