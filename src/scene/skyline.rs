use super::{sample, Building, SceneConfig, Viewport, MIN_VIEWPORT_HEIGHT, MIN_VIEWPORT_WIDTH};
use rand::Rng;

/// Lays buildings out right to left starting one viewport width off the left edge.
/// Generation stops once the cursor is a full extra screen (of at least `MIN_VIEWPORT_WIDTH`)
/// past that, so there is always something queued to scroll in.
pub fn generate_skyline<R: Rng + ?Sized>(config: &SceneConfig, viewport: Viewport, rng: &mut R) -> Vec<Building> {
    let width = viewport.width.max(MIN_VIEWPORT_WIDTH);
    let ground = viewport.height.max(MIN_VIEWPORT_HEIGHT);
    let limit = -(width + MIN_VIEWPORT_WIDTH);

    let mut buildings = vec![];
    let mut x = -viewport.width.max(0.);
    while x > limit {
        let (building_width, height) = config.sample_size(rng);
        let spacing = sample(rng, &config.building_spacing);

        buildings.push(Building { x, y: ground - height, width: building_width, height });
        x -= building_width + spacing;
    }

    crate::logger::info!("Generated skyline of {} buildings for {}x{}", buildings.len(), viewport.width, viewport.height);
    buildings
}
