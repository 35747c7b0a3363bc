use std::io;

use crate::{
    config::GameConfig,
    display::Display,
    paddle::{HorizontalPad, Movable, VerticalPad},
    GameError,
};

/// Playing field, sized after the viewport once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arena {
    width: i32,
    height: i32,
}

impl Arena {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: i32::from(width),
            height: i32::from(height),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn center(&self) -> (i32, i32) {
        (self.width / 2, self.height / 2)
    }

    pub(crate) fn too_small(&self) -> GameError {
        GameError::ViewportTooSmall {
            width: self.width as u16,
            height: self.height as u16,
        }
    }

    /// Lays out the four pads: horizontal ones on the first and last row, vertical ones on the
    /// first and last two columns, each centered on its side and kept clear of the corners.
    pub fn pads(&self, config: &GameConfig) -> Result<Pads, GameError> {
        let horizontal = |row| {
            HorizontalPad::new(
                config.horizontal_pad_width,
                row,
                VerticalPad::THICKNESS,
                self.width - VerticalPad::THICKNESS,
                config.horizontal_pad_colors(),
            )
            .ok_or_else(|| self.too_small())
        };
        let vertical = |column| {
            VerticalPad::new(
                config.vertical_pad_height,
                column,
                HorizontalPad::THICKNESS,
                self.height - HorizontalPad::THICKNESS,
                config.vertical_pad_colors(),
            )
            .ok_or_else(|| self.too_small())
        };
        Ok(Pads {
            top: horizontal(0)?,
            bottom: horizontal(self.height - HorizontalPad::THICKNESS)?,
            left: vertical(0)?,
            right: vertical(self.width - VerticalPad::THICKNESS)?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Pads {
    pub top: HorizontalPad,
    pub bottom: HorizontalPad,
    pub left: VerticalPad,
    pub right: VerticalPad,
}

impl Pads {
    pub fn draw<D: Display + ?Sized>(&self, display: &mut D) -> io::Result<()> {
        self.top.draw(display)?;
        self.bottom.draw(display)?;
        self.left.draw(display)?;
        self.right.draw(display)
    }

    /// Moves the left and right pads together.
    pub fn move_vertical<D: Display + ?Sized>(
        &mut self,
        delta: i32,
        display: &mut D,
    ) -> io::Result<()> {
        self.left.move_by(delta, display)?;
        self.right.move_by(delta, display)?;
        Ok(())
    }

    /// Moves the top and bottom pads together.
    pub fn move_horizontal<D: Display + ?Sized>(
        &mut self,
        delta: i32,
        display: &mut D,
    ) -> io::Result<()> {
        self.top.move_by(delta, display)?;
        self.bottom.move_by(delta, display)?;
        Ok(())
    }
}
