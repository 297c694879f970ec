use crate::{Graphics, Rect};

mod synthwave;
pub use synthwave::SynthwaveBackground;

pub trait UiElement {
    fn layout(&self) -> Rect;
    fn set_layout(&mut self, layout: Rect);
}

pub trait Widget: UiElement {
    /// Called once when the widget first becomes part of a visible window
    fn on_attach(&mut self, graphics: &mut Graphics);

    /// Advances the widget by one fixed timestep
    /// Returns `false` once the widget no longer wants ticks
    fn update(&mut self) -> bool;

    /// Draws the widget into its layout
    fn render(&mut self, graphics: &mut Graphics);
}

#[macro_export]
macro_rules! widget {
    (pub struct $name:ident {
        $($element:ident: $ty:ty = $value:expr),*
    }) => {
        pub struct $name {
            position: $crate::LogicalPosition,
            size: $crate::LogicalSize,
            $($element: $ty),*
        }
        impl $crate::widgets::UiElement for $name {
            fn layout(&self) -> $crate::Rect { $crate::Rect::point_and_size(self.position, self.size) }
            fn set_layout(&mut self, layout: $crate::Rect) {
                self.position = *layout.top_left();
                self.size = layout.size();
            }
        }
        impl $name {
            pub fn new() -> $name {
                $name {
                    position: $crate::LogicalPosition::new(0., 0.),
                    size: $crate::LogicalSize::new(0., 0.),
                    $($element: $value),*
                }
            }
        }
    };
}
