use crate::utils::{LogicalPosition, Rect};
use speedy2d::color::Color;

/// A single primitive the graphics backend knows how to paint
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    FillGradient { rect: Rect, gradient: LinearGradient },
    /// Draws the whole sprite strip image stretched to `dest`
    Sprite { dest: Rect },
    Text { position: LogicalPosition, size: f32, color: Color, text: String },
}

/// Commands in back to front order
pub type DrawList = Vec<DrawCommand>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}
impl GradientStop {
    pub fn new(offset: f32, color: Color) -> GradientStop { GradientStop { offset, color } }
}

/// Vertical linear gradient
///
/// `start` and `end` are relative to the height of the rect being filled, so `start: 1., end: 0.`
/// paints bottom up. Outside the start/end span the nearest stop colour is used.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub start: f32,
    pub end: f32,
    pub stops: Vec<GradientStop>,
}

/// Horizontal strip of a gradient fill that interpolates linearly from `top` to `bottom`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientBand {
    pub rect: Rect,
    pub top: Color,
    pub bottom: Color,
}

impl LinearGradient {
    pub fn new(start: f32, end: f32, stops: Vec<GradientStop>) -> LinearGradient { LinearGradient { start, end, stops } }

    /// Colour at position `t` along the start -> end axis
    pub fn color_at(&self, t: f32) -> Color {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Color::TRANSPARENT,
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.offset && t <= b.offset {
                let span = b.offset - a.offset;
                if span <= 0. {
                    return b.color;
                }
                return lerp_color(a.color, b.color, (t - a.offset) / span);
            }
        }
        last.color
    }

    fn absolute_span(&self, rect: &Rect) -> (f32, f32) {
        (rect.top() + self.start * rect.height(), rect.top() + self.end * rect.height())
    }

    fn color_at_y(&self, rect: &Rect, y: f32) -> Color {
        let (start, end) = self.absolute_span(rect);
        let length = end - start;
        let t = if length == 0. {
            if y < start { 0. } else { 1. }
        } else {
            (y - start) / length
        };
        self.color_at(t)
    }

    /// Splits `rect` into bands that can each be painted with a single vertical two colour blend.
    /// Band edges sit on every stop that falls inside the rect, so the result is exact.
    pub fn bands(&self, rect: &Rect) -> Vec<GradientBand> {
        if self.stops.is_empty() || rect.height() <= 0. {
            return vec![];
        }

        let (start, end) = self.absolute_span(rect);
        let mut edges = vec![rect.top(), rect.bottom()];
        for stop in &self.stops {
            let y = start + stop.offset * (end - start);
            if y > rect.top() && y < rect.bottom() {
                edges.push(y);
            }
        }
        edges.sort_by(|a, b| a.total_cmp(b));
        edges.dedup();

        edges
            .windows(2)
            .map(|pair| GradientBand {
                rect: Rect::from_tuples((rect.left(), pair[0]), (rect.right(), pair[1])),
                top: self.color_at_y(rect, pair[0]),
                bottom: self.color_at_y(rect, pair[1]),
            })
            .collect()
    }
}

fn lerp_color(from: Color, to: Color, amount: f32) -> Color {
    let lerp = |a: f32, b: f32| a + (b - a) * amount;
    Color::from_rgba(lerp(from.r(), to.r()), lerp(from.g(), to.g()), lerp(from.b(), to.b()), lerp(from.a(), to.a()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Transparent;

    fn close(a: Color, b: Color) -> bool {
        (a.r() - b.r()).abs() < 1e-4
            && (a.g() - b.g()).abs() < 1e-4
            && (a.b() - b.b()).abs() < 1e-4
            && (a.a() - b.a()).abs() < 1e-4
    }

    fn fade() -> LinearGradient {
        LinearGradient::new(
            0.,
            0.2,
            vec![GradientStop::new(0., Color::BLACK), GradientStop::new(1., Color::BLACK.with_alpha(0.))],
        )
    }

    #[test]
    fn colors_clamp_outside_the_stops() {
        let gradient = fade();
        assert_eq!(gradient.color_at(-1.), Color::BLACK);
        assert_eq!(gradient.color_at(2.), Color::BLACK.with_alpha(0.));
        assert!(close(gradient.color_at(0.5), Color::from_rgba(0., 0., 0., 0.5)));
    }

    #[test]
    fn bands_split_on_stops_inside_rect() {
        let rect = Rect::xywh(0., 100., 200., 500.);
        let bands = fade().bands(&rect);

        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].rect, Rect::from_tuples((0., 100.), (200., 200.)));
        assert_eq!(bands[0].top, Color::BLACK);
        assert_eq!(bands[0].bottom, Color::BLACK.with_alpha(0.));
        assert_eq!(bands[1].rect, Rect::from_tuples((0., 200.), (200., 600.)));
        assert_eq!(bands[1].top.a(), 0.);
        assert_eq!(bands[1].bottom.a(), 0.);
    }

    #[test]
    fn reversed_gradient_paints_bottom_up() {
        let bottom = Color::from_int_rgba(128, 0, 255, 255);
        let top = Color::from_int_rgba(255, 0, 255, 255);
        let gradient = LinearGradient::new(1., 0., vec![GradientStop::new(0., bottom), GradientStop::new(1., top)]);

        let bands = gradient.bands(&Rect::xywh(0., 0., 10., 10.));
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].top, top);
        assert_eq!(bands[0].bottom, bottom);
    }

    #[test]
    fn empty_gradient_or_rect_has_no_bands() {
        let empty = LinearGradient::new(0., 1., vec![]);
        assert!(empty.bands(&Rect::xywh(0., 0., 10., 10.)).is_empty());
        assert!(fade().bands(&Rect::xywh(0., 0., 10., 0.)).is_empty());
    }
}
