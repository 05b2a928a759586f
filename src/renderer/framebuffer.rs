//! In-memory Gray4 panel implementing `embedded_graphics::DrawTarget`.

use std::convert::Infallible;

use embedded_graphics::prelude::*;

use super::constants::BACKGROUND;
use crate::model::Colour;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    size: Size,
    pixels: Vec<Colour>,
}

impl Framebuffer {
    pub fn new(width: i32, height: i32) -> Self {
        let size = Size::new(width.max(1) as u32, height.max(1) as u32);
        Self {
            size,
            pixels: vec![BACKGROUND; (size.width * size.height) as usize],
        }
    }

    fn index(&self, point: Point) -> Option<usize> {
        self.bounding_box()
            .contains(point)
            .then(|| point.y as usize * self.size.width as usize + point.x as usize)
    }

    /// Colour at (x, y); background outside the panel.
    pub fn pixel(&self, x: i32, y: i32) -> Colour {
        self.index(Point::new(x, y)).map_or(BACKGROUND, |i| self.pixels[i])
    }

    /// Count of non-background pixels inside a rectangle.
    pub fn ink_in(&self, x: i32, y: i32, width: i32, height: i32) -> usize {
        (y..y + height)
            .flat_map(|py| (x..x + width).map(move |px| (px, py)))
            .filter(|&(px, py)| self.pixel(px, py) != BACKGROUND)
            .count()
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Framebuffer {
    type Color = Colour;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, colour) in pixels {
            if let Some(i) = self.index(point) {
                self.pixels[i] = colour;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn drawing_is_clipped_to_the_panel() {
        let mut fb = Framebuffer::new(8, 8);
        let ink = Colour::new(5);
        let drawn = Rectangle::new(Point::new(6, 6), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(ink))
            .draw(&mut fb);
        assert!(drawn.is_ok());
        assert_eq!(fb.pixel(7, 7), ink);
        assert_eq!(fb.pixel(5, 5), BACKGROUND);
        assert_eq!(fb.pixel(8, 8), BACKGROUND);
        assert_eq!(fb.ink_in(0, 0, 8, 8), 4);
    }
}
