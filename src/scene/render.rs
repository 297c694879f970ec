use super::{SceneState, Viewport};
use crate::draw::{DrawCommand, DrawList, GradientStop, LinearGradient};
use crate::utils::{LogicalPosition, Rect, Transparent};
use speedy2d::color::Color;
use std::fmt::Write;

const LETTERBOX_RATIO: f64 = 0.2;
const SCANLINE_HEIGHT: f64 = 2.;
const SCANLINE_ALPHA: u8 = 20;
/// Height of the band drawn where the sprite strip would be when it failed to load
pub const PLACEHOLDER_SPRITE_HEIGHT: f64 = 96.;
const DEBUG_TEXT_POSITION: LogicalPosition = LogicalPosition::new(20., 20.);
const DEBUG_TEXT_SIZE: f32 = 24.;

/// Pixel size of the loaded sprite strip
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub debug_overlay: bool,
    pub scanlines: bool,
}
impl Default for RenderOptions {
    fn default() -> Self { RenderOptions { debug_overlay: cfg!(debug_assertions), scanlines: true } }
}

pub fn letterbox_height(viewport: Viewport) -> f64 { viewport.height * LETTERBOX_RATIO }

fn channel(wave: f64) -> u8 { (wave * 127. + 128.) as u8 }

/// Colours of the two sky stops for `phase` degrees.
/// The first stop sits at the bottom of the sky and cycles red, the second at the top and cycles blue.
pub fn sky_colors(phase: f64) -> (Color, Color) {
    let radians = phase.to_radians();
    let first = Color::from_int_rgba(channel(radians.sin()), 0, 255, 255);
    let second = Color::from_int_rgba(255, 0, channel(radians.cos()), 255);
    (first, second)
}

/// X positions of every sprite tile needed to cover the viewport
pub fn sprite_tiles(offset: f64, image_width: f64, viewport_width: f64) -> Vec<f64> {
    if image_width <= 0. {
        return vec![];
    }

    let mut first = offset % image_width - image_width;
    if first < -image_width {
        first += image_width;
    }

    let mut tiles = vec![];
    let mut x = first;
    while x < viewport_width + image_width {
        tiles.push(x);
        x += image_width;
    }
    tiles
}

/// Paints one frame of `state`. Nothing here touches the scene
pub fn render(state: &SceneState, viewport: Viewport, sprite: Option<SpriteSize>, options: &RenderOptions) -> DrawList {
    let (width, height) = (viewport.width, viewport.height);
    let letterbox = letterbox_height(viewport);
    let mut list = DrawList::new();

    //Cinematic letterboxes
    list.push(DrawCommand::FillRect { rect: Rect::xywh(0., 0., width, letterbox), color: Color::BLACK });
    list.push(DrawCommand::FillRect {
        rect: Rect::xywh(0., height - letterbox, width, letterbox),
        color: Color::BLACK,
    });

    let (first, second) = sky_colors(state.gradient_phase);
    list.push(DrawCommand::FillGradient {
        rect: Rect::xywh(0., letterbox, width, height - 2. * letterbox),
        gradient: LinearGradient::new(1., 0., vec![GradientStop::new(0., first), GradientStop::new(1., second)]),
    });

    for building in &state.buildings {
        list.push(DrawCommand::FillRect {
            rect: Rect::xywh(building.x, building.y, building.width, building.height),
            color: Color::BLACK,
        });
    }

    match sprite {
        Some(size) if size.width > 0. => {
            let y = height - size.height - letterbox;
            for x in sprite_tiles(state.sprite_offset, size.width, width) {
                list.push(DrawCommand::Sprite { dest: Rect::xywh(x, y, size.width, size.height) });
            }
        }
        _ => {
            let y = height - PLACEHOLDER_SPRITE_HEIGHT - letterbox;
            list.push(DrawCommand::FillRect {
                rect: Rect::xywh(0., y, width, PLACEHOLDER_SPRITE_HEIGHT),
                color: Color::BLACK,
            });
        }
    }

    //Vignette
    let fade = |start: f32, end: f32| {
        LinearGradient::new(
            start,
            end,
            vec![GradientStop::new(0., Color::BLACK), GradientStop::new(1., Color::BLACK.with_alpha(0.))],
        )
    };
    list.push(DrawCommand::FillGradient { rect: Rect::xywh(0., letterbox, width, height * 0.8), gradient: fade(0., 0.2) });
    list.push(DrawCommand::FillGradient {
        rect: Rect::xywh(0., height * 0.2, width, height * 0.8),
        gradient: fade(0.75, 0.5),
    });

    if options.scanlines {
        let color = Color::from_int_rgba(0, 0, 0, SCANLINE_ALPHA);
        let mut y = letterbox;
        while y < height - letterbox {
            list.push(DrawCommand::FillRect { rect: Rect::xywh(0., y, width, SCANLINE_HEIGHT), color });
            y += SCANLINE_HEIGHT * 2.;
        }
    }

    if options.debug_overlay {
        list.push(DrawCommand::Text {
            position: DEBUG_TEXT_POSITION,
            size: DEBUG_TEXT_SIZE,
            color: Color::WHITE,
            text: debug_text(state),
        });
    }

    list
}

fn debug_text(state: &SceneState) -> String {
    let mut text = String::from("Buildings:\n");
    for b in &state.buildings {
        let _ = writeln!(text, "Position: ({:.2}, {:.2}), Width: {:.2}, Height: {:.2}", b.x, b.y, b.width, b.height);
    }
    let _ = writeln!(text, "Gradient phase: {:.2}", state.gradient_phase);
    let _ = write!(text, "Sprite offset: {:.2}", state.sprite_offset);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Building;

    const PALMS: SpriteSize = SpriteSize { width: 910., height: 200. };

    fn options(debug_overlay: bool) -> RenderOptions { RenderOptions { debug_overlay, scanlines: true } }

    fn scene() -> SceneState {
        SceneState {
            gradient_phase: 12.5,
            sprite_offset: 300.,
            buildings: vec![
                Building { x: 10., y: 500., width: 100., height: 220. },
                Building { x: -400., y: 420., width: 80., height: 300. },
            ],
        }
    }

    fn sprites(list: &DrawList) -> Vec<Rect> {
        list.iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { dest } => Some(*dest),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn sky_colors_follow_the_phase() {
        let (first, second) = sky_colors(0.);
        assert_eq!(first, Color::from_int_rgba(128, 0, 255, 255));
        assert_eq!(second, Color::from_int_rgba(255, 0, 255, 255));

        let (first, second) = sky_colors(90.);
        assert_eq!(first, Color::from_int_rgba(255, 0, 255, 255));
        assert_eq!(second, Color::from_int_rgba(255, 0, 128, 255));

        let (first, _) = sky_colors(270.);
        assert_eq!(first, Color::from_int_rgba(1, 0, 255, 255));
    }

    #[test]
    fn sprite_tiles_cover_the_viewport() {
        for offset in [0., 16.5, 455., 909.9] {
            let tiles = sprite_tiles(offset, 910., 1280.);
            assert!(tiles[0] <= 0.);
            assert!(tiles[0] >= -910.);
            assert!(tiles.last().unwrap() + 910. >= 1280.);
            for pair in tiles.windows(2) {
                assert!((pair[1] - pair[0] - 910.).abs() < 1e-9);
            }
        }
        assert_eq!(sprite_tiles(0., 910., 1280.), vec![-910., 0., 910., 1820.]);
        assert!(sprite_tiles(0., 0., 1280.).is_empty());
    }

    #[test]
    fn layers_are_back_to_front() {
        let list = render(&scene(), Viewport::new(1280., 720.), Some(PALMS), &options(false));

        assert_eq!(list[0], DrawCommand::FillRect { rect: Rect::xywh(0., 0., 1280., 144.), color: Color::BLACK });
        assert_eq!(list[1], DrawCommand::FillRect { rect: Rect::xywh(0., 576., 1280., 144.), color: Color::BLACK });
        match &list[2] {
            DrawCommand::FillGradient { rect, gradient } => {
                assert_eq!(*rect, Rect::xywh(0., 144., 1280., 432.));
                assert_eq!((gradient.start, gradient.end), (1., 0.));
            }
            other => panic!("expected sky gradient, got {other:?}"),
        }
        assert_eq!(list[3], DrawCommand::FillRect { rect: Rect::xywh(10., 500., 100., 220.), color: Color::BLACK });
        assert_eq!(list[4], DrawCommand::FillRect { rect: Rect::xywh(-400., 420., 80., 300.), color: Color::BLACK });
        assert!(matches!(list[5], DrawCommand::Sprite { .. }));

        let vignettes: Vec<_> = list
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillGradient { rect, gradient } if gradient.start != 1. => Some((*rect, gradient.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(vignettes.len(), 2);
        assert_eq!(vignettes[0].0, Rect::xywh(0., 144., 1280., 576.));
        assert_eq!((vignettes[0].1.start, vignettes[0].1.end), (0., 0.2));
        assert_eq!(vignettes[1].0, Rect::xywh(0., 144., 1280., 576.));
        assert_eq!((vignettes[1].1.start, vignettes[1].1.end), (0.75, 0.5));
    }

    #[test]
    fn overlays_draw_over_the_scene() {
        let list = render(&scene(), Viewport::new(1280., 720.), Some(PALMS), &options(true));
        let last_index = |f: &dyn Fn(&DrawCommand) -> bool| list.iter().rposition(f).unwrap();
        let first_index = |f: &dyn Fn(&DrawCommand) -> bool| list.iter().position(f).unwrap();

        let last_sprite = last_index(&|c| matches!(c, DrawCommand::Sprite { .. }));
        let top_vignette = first_index(&|c| matches!(c, DrawCommand::FillGradient { gradient, .. } if gradient.start == 0.));
        let bottom_vignette = first_index(&|c| matches!(c, DrawCommand::FillGradient { gradient, .. } if gradient.start == 0.75));
        let first_scanline = first_index(&|c| matches!(c, DrawCommand::FillRect { color, .. } if color.a() < 1.));
        let last_scanline = last_index(&|c| matches!(c, DrawCommand::FillRect { color, .. } if color.a() < 1.));
        let text = first_index(&|c| matches!(c, DrawCommand::Text { .. }));

        assert!(last_sprite < top_vignette);
        assert!(top_vignette < bottom_vignette);
        assert!(bottom_vignette < first_scanline);
        assert!(last_scanline < text);
        assert_eq!(text, list.len() - 1);
    }

    #[test]
    fn sprite_strip_is_seamless_across_the_wrap() {
        let strip_phase = |offset: f64| sprite_tiles(offset, 910., 1280.)[0].rem_euclid(910.);

        //Wrapping at the image width moves the strip by exactly one step
        let step = (strip_phase((900. + 17.) % 910.) - strip_phase(900.)).rem_euclid(910.);
        assert!((step - 17.).abs() < 1e-9);

        //Any other period makes it jump on the wrap
        let step = (strip_phase((790. + 17.) % 800.) - strip_phase(790.)).rem_euclid(910.);
        assert!((step - 17.).abs() > 1.);
    }

    #[test]
    fn sprites_sit_on_the_bottom_letterbox() {
        let list = render(&scene(), Viewport::new(1280., 720.), Some(PALMS), &options(false));
        let tiles = sprites(&list);

        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0].left(), -610.);
        assert!(tiles[0].left() <= 0.);
        assert!(tiles.last().unwrap().right() >= 1280.);
        assert!(tiles.iter().all(|t| t.top() == 376. && t.bottom() == 576.));
    }

    #[test]
    fn missing_sprite_draws_a_placeholder() {
        let list = render(&scene(), Viewport::new(1280., 720.), None, &options(false));
        assert!(sprites(&list).is_empty());
        assert!(list.contains(&DrawCommand::FillRect {
            rect: Rect::xywh(0., 576. - PLACEHOLDER_SPRITE_HEIGHT, 1280., PLACEHOLDER_SPRITE_HEIGHT),
            color: Color::BLACK,
        }));
    }

    #[test]
    fn letterbox_tracks_each_frames_viewport() {
        let state = scene();
        for height in [720., 1080., 333.] {
            let list = render(&state, Viewport::new(1280., height), Some(PALMS), &options(false));
            let letterbox = letterbox_height(Viewport::new(1280., height));
            assert_eq!(letterbox, height * 0.2);
            assert_eq!(list[0], DrawCommand::FillRect { rect: Rect::xywh(0., 0., 1280., letterbox), color: Color::BLACK });
        }
    }

    #[test]
    fn scanlines_stripe_the_playfield() {
        let list = render(&scene(), Viewport::new(1280., 720.), Some(PALMS), &options(false));
        let lines: Vec<_> = list
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color } if color.a() < 1. => Some(*rect),
                _ => None,
            })
            .collect();

        //432px playfield, one line every 4px
        assert_eq!(lines.len(), 108);
        assert_eq!(lines[0], Rect::xywh(0., 144., 1280., 2.));
        assert_eq!(lines[1].top(), 148.);
        assert!(lines.iter().all(|l| l.height() == 2. && l.top() < 576.));

        let plain = render(&scene(), Viewport::new(1280., 720.), Some(PALMS), &RenderOptions { debug_overlay: false, scanlines: false });
        assert!(plain.iter().all(|c| !matches!(c, DrawCommand::FillRect { color, .. } if color.a() < 1.)));
    }

    #[test]
    fn debug_overlay_is_optional() {
        let viewport = Viewport::new(1280., 720.);
        let hidden = render(&scene(), viewport, Some(PALMS), &options(false));
        assert!(!hidden.iter().any(|c| matches!(c, DrawCommand::Text { .. })));

        let shown = render(&scene(), viewport, Some(PALMS), &options(true));
        let Some(DrawCommand::Text { position, size, text, .. }) = shown.last() else {
            panic!("debug text should be drawn last");
        };
        assert_eq!(*position, LogicalPosition::new(20., 20.));
        assert_eq!(*size, 24.);
        assert_eq!(
            text,
            "Buildings:\n\
             Position: (10.00, 500.00), Width: 100.00, Height: 220.00\n\
             Position: (-400.00, 420.00), Width: 80.00, Height: 300.00\n\
             Gradient phase: 12.50\n\
             Sprite offset: 300.00"
        );
    }
}
