//! The drawing capability the renderers need from a display.
//!
//! `PanelCanvas` implements `Canvas` over any `embedded_graphics` draw
//! target with Gray4 pixels, which is how the real panel driver is plugged
//! in. `RecordingCanvas` is the same thing over an in-memory `Framebuffer`,
//! plus a log of every call, so draw sequences and touched pixels can be
//! asserted without hardware.

use std::convert::Infallible;

use embedded_graphics::image::Image;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::{BinaryColor, GrayColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use serde::{Serialize, Serializer};

use super::constants::BACKGROUND;
use super::framebuffer::Framebuffer;
use super::glyphs::{char_advance, font_for_scale, Glyph};
use crate::model::Colour;

/// Primitive display operations. Every call is synchronous and slow on the
/// real panel, so renderers keep both their number and area small.
pub trait Canvas {
    /// Panel size in pixels (width, height).
    fn size(&self) -> (i32, i32);

    fn move_cursor(&mut self, x: i32, y: i32);

    /// Print text at the cursor with an opaque background. Each character
    /// cell is 6×8 pixels at scale 1 and 12×16 at scale 2.
    fn print(&mut self, text: &str, scale: u8, colour: Colour);

    /// Blit a glyph with its top-left corner at (x, y). Only ink pixels are
    /// written.
    fn draw_glyph(&mut self, x: i32, y: i32, glyph: &Glyph, colour: Colour);

    fn draw_hline(&mut self, x: i32, y: i32, width: i32, colour: Colour);

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, colour: Colour);

    /// Flush pending drawing to the panel.
    fn present(&mut self);
}

// ═══════════════════════════════════════════════════════════════════════
// Drawing on embedded-graphics targets
// ═══════════════════════════════════════════════════════════════════════

/// Paints the set pixels of a 1-bit image in one colour and leaves the
/// clear ones untouched.
struct Ink<'a, D> {
    target: &'a mut D,
    colour: Colour,
}

impl<D: DrawTarget<Color = Colour>> Dimensions for Ink<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        self.target.bounding_box()
    }
}

impl<D: DrawTarget<Color = Colour>> DrawTarget for Ink<'_, D> {
    type Color = BinaryColor;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let colour = self.colour;
        self.target.draw_iter(
            pixels
                .into_iter()
                .filter(|Pixel(_, bit)| bit.is_on())
                .map(move |Pixel(point, _)| Pixel(point, colour)),
        )
    }
}

pub(super) fn draw_glyph_on<D: DrawTarget<Color = Colour>>(
    target: &mut D,
    top_left: Point,
    glyph: &Glyph,
    colour: Colour,
) -> Result<(), D::Error> {
    let image = glyph.image();
    Image::new(&image, top_left).draw(&mut Ink { target, colour })
}

pub(super) fn fill_on<D: DrawTarget<Color = Colour>>(
    target: &mut D,
    top_left: Point,
    width: i32,
    height: i32,
    colour: Colour,
) -> Result<(), D::Error> {
    if width <= 0 || height <= 0 {
        return Ok(());
    }
    Rectangle::new(top_left, Size::new(width as u32, height as u32))
        .into_styled(PrimitiveStyle::with_fill(colour))
        .draw(target)
}

pub(super) fn print_on<D: DrawTarget<Color = Colour>>(
    target: &mut D,
    top_left: Point,
    text: &str,
    scale: u8,
    colour: Colour,
) -> Result<(), D::Error> {
    let style = MonoTextStyleBuilder::new()
        .font(font_for_scale(scale))
        .text_color(colour)
        .background_color(BACKGROUND)
        .build();
    Text::with_baseline(text, top_left, style, Baseline::Top)
        .draw(target)
        .map(|_| ())
}

/// Result of drawing on a target that cannot fail.
pub(super) fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PanelCanvas
// ═══════════════════════════════════════════════════════════════════════

/// Flushes a display driver's buffer to the glass.
pub type FlushFn<D> = fn(&mut D) -> Result<(), <D as DrawTarget>::Error>;

/// `Canvas` over an embedded-graphics display.
pub struct PanelCanvas<D: DrawTarget<Color = Colour>> {
    target: D,
    cursor: Point,
    flush: Option<FlushFn<D>>,
    presents: usize,
    failures: usize,
}

impl<D: DrawTarget<Color = Colour>> PanelCanvas<D> {
    pub fn new(target: D) -> Self {
        Self { target, cursor: Point::zero(), flush: None, presents: 0, failures: 0 }
    }

    /// Like `new`, calling `flush` on every `present`.
    pub fn with_flush(target: D, flush: FlushFn<D>) -> Self {
        Self { flush: Some(flush), ..Self::new(target) }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    pub fn cursor(&self) -> (i32, i32) {
        (self.cursor.x, self.cursor.y)
    }

    pub fn presents(&self) -> usize {
        self.presents
    }

    /// Number of driver writes that reported an error.
    pub fn failures(&self) -> usize {
        self.failures
    }

    fn check(&mut self, result: Result<(), D::Error>, what: &str) {
        if result.is_err() {
            self.failures += 1;
            log::warn!("panel {what} failed");
        }
    }
}

impl<D: DrawTarget<Color = Colour>> Canvas for PanelCanvas<D> {
    fn size(&self) -> (i32, i32) {
        let size = self.target.bounding_box().size;
        (size.width as i32, size.height as i32)
    }

    fn move_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn print(&mut self, text: &str, scale: u8, colour: Colour) {
        let result = print_on(&mut self.target, self.cursor, text, scale, colour);
        self.check(result, "print");
        self.cursor.x += text.chars().count() as i32 * char_advance(scale);
    }

    fn draw_glyph(&mut self, x: i32, y: i32, glyph: &Glyph, colour: Colour) {
        let result = draw_glyph_on(&mut self.target, Point::new(x, y), glyph, colour);
        self.check(result, "glyph");
    }

    fn draw_hline(&mut self, x: i32, y: i32, width: i32, colour: Colour) {
        let result = fill_on(&mut self.target, Point::new(x, y), width, 1, colour);
        self.check(result, "line");
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, colour: Colour) {
        let result = fill_on(&mut self.target, Point::new(x, y), width, height, colour);
        self.check(result, "fill");
    }

    fn present(&mut self) {
        self.presents += 1;
        if let Some(flush) = self.flush {
            let result = flush(&mut self.target);
            self.check(result, "flush");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RecordingCanvas
// ═══════════════════════════════════════════════════════════════════════

fn luma<S: Serializer>(colour: &Colour, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(colour.luma())
}

/// One recorded `Canvas` call. Colours serialise as their grey level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    MoveCursor {
        x: i32,
        y: i32,
    },
    Print {
        text: String,
        scale: u8,
        #[serde(serialize_with = "luma")]
        colour: Colour,
    },
    Glyph {
        glyph: &'static str,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        #[serde(serialize_with = "luma")]
        colour: Colour,
    },
    HLine {
        x: i32,
        y: i32,
        width: i32,
        #[serde(serialize_with = "luma")]
        colour: Colour,
    },
    FillRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        #[serde(serialize_with = "luma")]
        colour: Colour,
    },
    Present,
}

impl DrawOp {
    /// Whether this operation changes pixels.
    pub fn is_draw(&self) -> bool {
        !matches!(self, DrawOp::MoveCursor { .. } | DrawOp::Present)
    }
}

pub struct RecordingCanvas {
    panel: PanelCanvas<Framebuffer>,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            panel: PanelCanvas::new(Framebuffer::new(width, height)),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Number of pixel-changing calls recorded.
    pub fn draw_count(&self) -> usize {
        self.ops.iter().filter(|op| op.is_draw()).count()
    }

    pub fn cursor(&self) -> (i32, i32) {
        self.panel.cursor()
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        self.panel.target()
    }

    /// Colour at (x, y); background outside the panel.
    pub fn pixel(&self, x: i32, y: i32) -> Colour {
        self.framebuffer().pixel(x, y)
    }

    /// Count of non-background pixels inside a rectangle.
    pub fn ink_in(&self, x: i32, y: i32, width: i32, height: i32) -> usize {
        self.framebuffer().ink_in(x, y, width, height)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.ops)
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (i32, i32) {
        self.panel.size()
    }

    fn move_cursor(&mut self, x: i32, y: i32) {
        self.panel.move_cursor(x, y);
        self.ops.push(DrawOp::MoveCursor { x, y });
    }

    fn print(&mut self, text: &str, scale: u8, colour: Colour) {
        self.panel.print(text, scale, colour);
        self.ops.push(DrawOp::Print { text: text.to_string(), scale, colour });
    }

    fn draw_glyph(&mut self, x: i32, y: i32, glyph: &Glyph, colour: Colour) {
        self.panel.draw_glyph(x, y, glyph, colour);
        self.ops.push(DrawOp::Glyph {
            glyph: glyph.name,
            x,
            y,
            width: glyph.width(),
            height: glyph.height(),
            colour,
        });
    }

    fn draw_hline(&mut self, x: i32, y: i32, width: i32, colour: Colour) {
        self.panel.draw_hline(x, y, width, colour);
        self.ops.push(DrawOp::HLine { x, y, width, colour });
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, colour: Colour) {
        self.panel.fill_rect(x, y, width, height, colour);
        self.ops.push(DrawOp::FillRect { x, y, width, height, colour });
    }

    fn present(&mut self) {
        self.panel.present();
        self.ops.push(DrawOp::Present);
    }
}
