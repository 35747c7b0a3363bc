use std::{
    io,
    ops::{Deref, DerefMut},
};

use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    White,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub foreground: Color,
    pub background: Color,
}

impl Colors {
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
        }
    }
}

/// Cell-addressed output surface the game renders into.
///
/// Implementors only provide positioned text output and colour state; block fills and single
/// cells are built on top of those. Every provided drawing method changes colours inside a
/// [`ColorScope`], so the colours in effect before the call are back in place afterwards.
pub trait Display {
    fn viewport_size(&self) -> io::Result<(u16, u16)>;

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    fn colors(&self) -> Colors;

    fn set_colors(&mut self, colors: Colors) -> io::Result<()>;

    /// Writes `text` starting at column `x` of row `y` in the current colours.
    fn print_at(&mut self, x: i32, y: i32, text: &str) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;

    fn set_cell_block_color(&mut self, rect: &Rect, color: Color) -> io::Result<()> {
        let mut scope = ColorScope::new(self);
        let foreground = scope.saved().foreground;
        scope.set_colors(Colors::new(foreground, color))?;
        let row = " ".repeat(rect.width() as usize);
        for y in rect.top()..rect.bottom() {
            scope.print_at(rect.left(), y, &row)?;
        }
        Ok(())
    }

    fn set_cell(&mut self, x: i32, y: i32, glyph: char, colors: Colors) -> io::Result<()> {
        let mut buf = [0; 4];
        self.write_text(x, y, glyph.encode_utf8(&mut buf), colors)
    }

    fn write_text(&mut self, x: i32, y: i32, text: &str, colors: Colors) -> io::Result<()> {
        let mut scope = ColorScope::new(self);
        scope.set_colors(colors)?;
        scope.print_at(x, y, text)
    }

    /// Paints the whole viewport with `color`.
    fn fill(&mut self, color: Color) -> io::Result<()> {
        let (width, height) = self.viewport_size()?;
        let viewport = Rect::new(0, 0, i32::from(width), i32::from(height));
        self.set_cell_block_color(&viewport, color)
    }
}

/// Restores the display's colours when dropped.
pub struct ColorScope<'a, D: Display + ?Sized> {
    display: &'a mut D,
    saved: Colors,
}

impl<'a, D: Display + ?Sized> ColorScope<'a, D> {
    pub fn new(display: &'a mut D) -> Self {
        let saved = display.colors();
        Self { display, saved }
    }

    pub fn saved(&self) -> Colors {
        self.saved
    }
}

impl<D: Display + ?Sized> Deref for ColorScope<'_, D> {
    type Target = D;

    fn deref(&self) -> &Self::Target {
        self.display
    }
}

impl<D: Display + ?Sized> DerefMut for ColorScope<'_, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.display
    }
}

impl<D: Display + ?Sized> Drop for ColorScope<'_, D> {
    fn drop(&mut self) {
        // a failed restore can't be reported from drop, the next draw sets colours again anyway.
        let _ = self.display.set_colors(self.saved);
    }
}
