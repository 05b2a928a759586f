//! SVG canvas: mirrors the panel's pixel operations into an SVG document.
//!
//! Useful for previewing the staff page on a desktop. The canvas is itself
//! an `embedded_graphics` draw target, so glyphs and fills go through the
//! same drawing code as the panel; every pixel run becomes a `<rect>` on a
//! black OLED background, scaled up by `pixel_size`. Text is kept as
//! `<text>` so previews stay readable and searchable.

use std::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::canvas::{draw_glyph_on, fill_on, infallible, Canvas};
use super::constants::BACKGROUND;
use super::glyphs::{char_advance, font_for_scale, Glyph};
use crate::model::Colour;

pub struct SvgCanvas {
    elements: Vec<String>,
    size: Size,
    pixel_size: f64,
    cursor: Point,
    presents: usize,
}

impl SvgCanvas {
    pub fn new(width: i32, height: i32, pixel_size: f64) -> Self {
        Self {
            elements: Vec::new(),
            size: Size::new(width.max(1) as u32, height.max(1) as u32),
            pixel_size: if pixel_size > 0.0 { pixel_size } else { 1.0 },
            cursor: Point::zero(),
            presents: 0,
        }
    }

    /// Number of `present` calls seen so far.
    pub fn presents(&self) -> usize {
        self.presents
    }

    pub fn build(self) -> String {
        let w = self.size.width as f64 * self.pixel_size;
        let h = self.size.height as f64 * self.pixel_size;
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}" shape-rendering="crispEdges">"#,
            w, h, w, h
        );
        svg.push('\n');
        svg.push_str(&format!(r#"  <rect x="0" y="0" width="{w}" height="{h}" fill="black"/>"#));
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    fn rect(&mut self, area: &Rectangle, colour: Colour) {
        let p = self.pixel_size;
        self.elements.push(format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            area.top_left.x as f64 * p,
            area.top_left.y as f64 * p,
            area.size.width as f64 * p,
            area.size.height as f64 * p,
            css(colour)
        ));
    }
}

fn css(colour: Colour) -> String {
    let rgb = Rgb888::from(colour);
    format!("#{:02x}{:02x}{:02x}", rgb.r(), rgb.g(), rgb.b())
}

impl OriginDimensions for SvgCanvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for SvgCanvas {
    type Color = Colour;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, colour) in pixels {
            if bounds.contains(point) {
                self.rect(&Rectangle::new(point, Size::new(1, 1)), colour);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, colour: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.size.width > 0 && area.size.height > 0 {
            self.rect(&area, colour);
        }
        Ok(())
    }
}

impl Canvas for SvgCanvas {
    fn size(&self) -> (i32, i32) {
        (self.size.width as i32, self.size.height as i32)
    }

    fn move_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn print(&mut self, text: &str, scale: u8, colour: Colour) {
        let origin = self.cursor;
        let advance = char_advance(scale);
        let cell_h = font_for_scale(scale).character_size.height as i32;
        let count = text.chars().count() as i32;
        infallible(fill_on(self, origin, advance * count, cell_h, BACKGROUND));
        let escaped = text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        let p = self.pixel_size;
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-family="monospace" font-size="{:.0}" fill="{}" xml:space="preserve">{}</text>"#,
            origin.x as f64 * p,
            (origin.y + cell_h - scale as i32) as f64 * p,
            cell_h as f64 * p,
            css(colour),
            escaped
        ));
        self.cursor.x += advance * count;
    }

    fn draw_glyph(&mut self, x: i32, y: i32, glyph: &Glyph, colour: Colour) {
        infallible(draw_glyph_on(self, Point::new(x, y), glyph, colour));
    }

    fn draw_hline(&mut self, x: i32, y: i32, width: i32, colour: Colour) {
        infallible(fill_on(self, Point::new(x, y), width, 1, colour));
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, colour: Colour) {
        infallible(fill_on(self, Point::new(x, y), width, height, colour));
    }

    fn present(&mut self) {
        self.presents += 1;
    }
}
