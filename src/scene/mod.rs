use rand::Rng;
use std::ops::RangeInclusive;

pub mod render;
mod skyline;
pub use skyline::generate_skyline;

/// Scenes are laid out for at least this much space even if the window is smaller
pub const MIN_VIEWPORT_WIDTH: f64 = 1280.;
pub const MIN_VIEWPORT_HEIGHT: f64 = 720.;

const DEGREES: f64 = 360.;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}
impl Viewport {
    pub fn new(width: f64, height: f64) -> Viewport { Viewport { width, height } }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Building {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// What happens to a building's size when it wraps back to the left edge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecyclePolicy {
    /// Only `x` moves, the skyline repeats exactly
    KeepSize,
    /// Width and height are sampled again the same way the skyline was generated
    Resample,
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Degrees per tick
    pub gradient_speed: f64,
    pub building_speed: f64,
    pub sprite_speed: f64,
    /// Horizontal period the sprite offset wraps at
    pub sprite_period: f64,
    pub building_width: RangeInclusive<f64>,
    pub building_height: RangeInclusive<f64>,
    pub building_spacing: RangeInclusive<f64>,
    pub recycle: RecyclePolicy,
}
impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            gradient_speed: 0.4,
            building_speed: 4.,
            sprite_speed: 17.,
            sprite_period: 910.,
            building_width: 70. ..=130.,
            building_height: 150. ..=400.,
            building_spacing: 200. ..=500.,
            recycle: RecyclePolicy::KeepSize,
        }
    }
}
impl SceneConfig {
    pub(crate) fn sample_size<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let width = sample(rng, &self.building_width);
        let height = sample(rng, &self.building_height);
        (width, height)
    }
}

/// Uniform sample that tolerates empty or single value ranges from settings
pub(crate) fn sample<R: Rng + ?Sized>(rng: &mut R, range: &RangeInclusive<f64>) -> f64 {
    let (min, max) = (*range.start(), *range.end());
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

fn wrap(value: f64, period: f64) -> f64 {
    if period <= 0. {
        return 0.;
    }
    if value >= period {
        value.rem_euclid(period)
    } else {
        value
    }
}

/// Everything that changes from frame to frame
#[derive(Clone, Debug, Default)]
pub struct SceneState {
    pub gradient_phase: f64,
    pub sprite_offset: f64,
    pub buildings: Vec<Building>,
}

impl SceneState {
    pub fn new() -> SceneState { SceneState::default() }

    /// Replaces the skyline with a freshly generated one for `viewport`
    pub fn populate<R: Rng + ?Sized>(&mut self, config: &SceneConfig, viewport: Viewport, rng: &mut R) {
        self.buildings = generate_skyline(config, viewport, rng);
    }

    /// Advances the scene by one fixed timestep
    pub fn tick<R: Rng + ?Sized>(&mut self, config: &SceneConfig, viewport_width: f64, rng: &mut R) {
        self.gradient_phase = wrap(self.gradient_phase + config.gradient_speed, DEGREES);
        self.sprite_offset = wrap(self.sprite_offset + config.sprite_speed, config.sprite_period);

        for building in self.buildings.iter_mut() {
            building.x += config.building_speed;
            if building.x > viewport_width {
                if config.recycle == RecyclePolicy::Resample {
                    let bottom = building.y + building.height;
                    let (width, height) = config.sample_size(rng);
                    building.width = width;
                    building.height = height;
                    building.y = bottom - height;
                }
                building.x = -building.width;
            }
        }
    }
}
