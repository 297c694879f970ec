use crate::assets::{AssetError, RawImage};
use crate::draw::{DrawCommand, LinearGradient};
use crate::scene::render::SpriteSize;
use crate::utils::PhysicalSize;
use crate::{LogicalPosition, Rect};
use speedy2d::color::Color;
use speedy2d::dimen::Vector2;
use speedy2d::font::{Font, TextLayout, TextOptions};
use speedy2d::image::{ImageDataType, ImageHandle, ImageSmoothingMode};

/// GPU copy of the sprite strip
pub struct Texture {
    image: ImageHandle,
}
impl Texture {
    pub fn size(&self) -> SpriteSize {
        let size = self.image.size();
        SpriteSize { width: f64::from(size.x), height: f64::from(size.y) }
    }
}

pub struct Graphics {
    pub graphics_ptr: *mut speedy2d::Graphics2D,
    pub scale_factor: f32,
    pub bounds: Rect,
}
impl Graphics {
    pub fn new() -> Graphics {
        Graphics { graphics_ptr: std::ptr::null_mut(), scale_factor: 1., bounds: Rect::from_tuples((0., 0.), (0., 0.)) }
    }

    /// # Safety
    /// `graphics` must outlive every draw call made until the next `set_frame`
    pub unsafe fn set_frame(&mut self, graphics: &mut speedy2d::Graphics2D, scale_factor: f32, size: PhysicalSize) {
        self.graphics_ptr = graphics;
        self.scale_factor = scale_factor;
        self.bounds = Rect::new(LogicalPosition::new(0., 0.), size.to_logical(scale_factor));
    }

    fn graphics(&mut self) -> &mut speedy2d::Graphics2D { unsafe { &mut *self.graphics_ptr } }

    pub fn clear(&mut self, color: Color) { self.graphics().clear_screen(color); }

    pub fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        let rect = rect.to_physical(self.scale_factor);
        self.graphics().draw_rectangle(rect, color);
    }

    pub fn draw_gradient(&mut self, rect: Rect, gradient: &LinearGradient) {
        let scale = self.scale_factor;
        for band in gradient.bands(&rect) {
            let r = band.rect.to_physical(scale);
            let (top_left, bottom_right) = (*r.top_left(), *r.bottom_right());
            let positions = [
                top_left,
                Vector2::new(bottom_right.x, top_left.y),
                bottom_right,
                Vector2::new(top_left.x, bottom_right.y),
            ];
            self.graphics().draw_quad_four_color(positions, [band.top, band.top, band.bottom, band.bottom]);
        }
    }

    pub fn draw_texture(&mut self, rect: Rect, texture: &Texture) {
        let rect = rect.to_physical(self.scale_factor);
        self.graphics().draw_rectangle_image(rect, &texture.image);
    }

    pub fn draw_text(&mut self, position: LogicalPosition, size: f32, color: Color, text: &str, font: &Font) {
        let text = font.layout_text(text, size * self.scale_factor, TextOptions::new());
        let position = position.to_physical(self.scale_factor);
        self.graphics().draw_text(position, color, &text);
    }

    pub fn create_texture(&mut self, raw: &RawImage) -> Result<Texture, AssetError> {
        let image = self
            .graphics()
            .create_image_from_raw_pixels(ImageDataType::RGBA, ImageSmoothingMode::Linear, raw.dimensions, &raw.data)
            .map_err(|e| AssetError::Invalid(format!("{e:?}")))?;
        Ok(Texture { image })
    }

    /// Paints a draw list in order. Sprite and text commands are dropped when their asset isn't available
    pub fn execute(&mut self, commands: &[DrawCommand], sprite: Option<&Texture>, font: Option<&Font>) {
        for command in commands {
            match command {
                DrawCommand::FillRect { rect, color } => self.draw_rectangle(*rect, *color),
                DrawCommand::FillGradient { rect, gradient } => self.draw_gradient(*rect, gradient),
                DrawCommand::Sprite { dest } => {
                    if let Some(texture) = sprite {
                        self.draw_texture(*dest, texture);
                    }
                }
                DrawCommand::Text { position, size, color, text } => {
                    if let Some(font) = font {
                        self.draw_text(*position, *size, *color, text, font);
                    }
                }
            }
        }
    }
}
