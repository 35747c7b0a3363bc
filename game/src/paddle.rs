use std::io;

use crate::{
    display::{Color, Display},
    geometry::Rect,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PadColors {
    pub pad: Color,
    pub background: Color,
}

/// Something that can be shifted along its own axis.
pub trait Movable {
    /// Shifts by `delta` cells. Returns `false` and leaves the display untouched when the new
    /// position would leave the allowed range.
    fn move_by<D: Display + ?Sized>(&mut self, delta: i32, display: &mut D) -> io::Result<bool>;
}

/// Inclusive coordinate range a pad's moving edge has to stay in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Track {
    start: i32,
    end: i32,
}

impl Track {
    fn new(start: i32, end: i32, extent: i32) -> Option<Self> {
        if extent <= 0 || end - start < extent {
            return None;
        }
        Some(Self { start, end })
    }

    fn centered(&self, extent: i32) -> i32 {
        (self.start + self.end - extent) / 2
    }

    fn admits(&self, position: i32, extent: i32) -> bool {
        self.start <= position && position <= self.end - extent
    }
}

fn redraw_moved<D: Display + ?Sized>(
    rect: &mut Rect,
    colors: PadColors,
    display: &mut D,
    apply: impl FnOnce(&mut Rect),
) -> io::Result<()> {
    rect.draw(display, colors.background)?;
    apply(rect);
    rect.draw(display, colors.pad)
}

#[derive(Clone, Debug)]
pub struct VerticalPad {
    rect: Rect,
    track: Track,
    colors: PadColors,
}

impl VerticalPad {
    pub const THICKNESS: i32 = 2;

    /// Builds a pad at `column`, centered between the margins. `None` when the margins can't
    /// hold a pad of `height` cells.
    pub fn new(
        height: i32,
        column: i32,
        top_margin: i32,
        bottom_margin: i32,
        colors: PadColors,
    ) -> Option<Self> {
        let track = Track::new(top_margin, bottom_margin, height)?;
        Some(Self {
            rect: Rect::new(column, track.centered(height), Self::THICKNESS, height),
            track,
            colors,
        })
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn draw<D: Display + ?Sized>(&self, display: &mut D) -> io::Result<()> {
        self.rect.draw(display, self.colors.pad)
    }

    pub fn move_up<D: Display + ?Sized>(&mut self, display: &mut D) -> io::Result<bool> {
        self.move_by(-1, display)
    }

    pub fn move_down<D: Display + ?Sized>(&mut self, display: &mut D) -> io::Result<bool> {
        self.move_by(1, display)
    }
}

impl Movable for VerticalPad {
    fn move_by<D: Display + ?Sized>(&mut self, delta: i32, display: &mut D) -> io::Result<bool> {
        let top = self.rect.top() + delta;
        if !self.track.admits(top, self.rect.height()) {
            return Ok(false);
        }
        redraw_moved(&mut self.rect, self.colors, display, |rect| rect.set_top(top))?;
        Ok(true)
    }
}

#[derive(Clone, Debug)]
pub struct HorizontalPad {
    rect: Rect,
    track: Track,
    colors: PadColors,
}

impl HorizontalPad {
    pub const THICKNESS: i32 = 1;

    /// Builds a pad on `row`, centered between the margins. `None` when the margins can't hold
    /// a pad of `width` cells.
    pub fn new(
        width: i32,
        row: i32,
        left_margin: i32,
        right_margin: i32,
        colors: PadColors,
    ) -> Option<Self> {
        let track = Track::new(left_margin, right_margin, width)?;
        Some(Self {
            rect: Rect::new(track.centered(width), row, width, Self::THICKNESS),
            track,
            colors,
        })
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn draw<D: Display + ?Sized>(&self, display: &mut D) -> io::Result<()> {
        self.rect.draw(display, self.colors.pad)
    }

    pub fn move_left<D: Display + ?Sized>(&mut self, display: &mut D) -> io::Result<bool> {
        self.move_by(-1, display)
    }

    pub fn move_right<D: Display + ?Sized>(&mut self, display: &mut D) -> io::Result<bool> {
        self.move_by(1, display)
    }
}

impl Movable for HorizontalPad {
    fn move_by<D: Display + ?Sized>(&mut self, delta: i32, display: &mut D) -> io::Result<bool> {
        let left = self.rect.left() + delta;
        if !self.track.admits(left, self.rect.width()) {
            return Ok(false);
        }
        redraw_moved(&mut self.rect, self.colors, display, |rect| rect.set_left(left))?;
        Ok(true)
    }
}
