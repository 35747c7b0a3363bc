use std::io;

use rand::Rng;
use tracing::{trace, warn};

use crate::{
    arena::Pads,
    display::{Colors, Display},
};

pub const GLYPH: char = 'O';

// two passes settle any corner, more only happen in arenas too small to build.
const MAX_REFLECTION_PASSES: usize = 4;

#[derive(Clone, Debug)]
pub struct Ball {
    left: i32,
    top: i32,
    dx: i32,
    dy: i32,
    colors: Colors,
}

impl Ball {
    /// Places a ball at `(left, top)` heading along one of the four diagonals, picked by `rng`.
    pub fn new<R: Rng + ?Sized>(left: i32, top: i32, colors: Colors, rng: &mut R) -> Self {
        let dx = if rng.gen_bool(0.5) { -1 } else { 1 };
        let dy = if rng.gen_bool(0.5) { -1 } else { 1 };
        Self {
            left,
            top,
            dx,
            dy,
            colors,
        }
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn dx(&self) -> i32 {
        self.dx
    }

    pub fn dy(&self) -> i32 {
        self.dy
    }

    pub fn draw<D: Display + ?Sized>(&self, display: &mut D) -> io::Result<()> {
        display.set_cell(self.left, self.top, GLYPH, self.colors)
    }

    pub fn erase<D: Display + ?Sized>(&self, display: &mut D) -> io::Result<()> {
        display.set_cell(self.left, self.top, ' ', self.colors)
    }

    /// Moves one cell along each axis, bouncing off any pad face in the way first. A ball that
    /// ends up dead is left erased.
    pub fn advance<D: Display + ?Sized>(
        &mut self,
        pads: &Pads,
        display: &mut D,
    ) -> io::Result<()> {
        self.reflect(pads);
        self.erase(display)?;
        self.left += self.dx;
        self.top += self.dy;
        if !self.is_dead(pads) {
            self.draw(display)?;
        }
        Ok(())
    }

    /// True once the ball has slipped past the inner edge of a side, outside every pad.
    pub fn is_dead(&self, pads: &Pads) -> bool {
        self.top < pads.top.rect().bottom()
            || self.top > pads.bottom.rect().top()
            || self.left < pads.left.rect().right()
            || self.left > pads.right.rect().left()
    }

    fn next_position(&self) -> (i32, i32) {
        (self.left + self.dx, self.top + self.dy)
    }

    fn reflect(&mut self, pads: &Pads) {
        let mut passes = 0;
        while self.reflect_off_horizontal(pads) || self.reflect_off_vertical(pads) {
            passes += 1;
            if passes == MAX_REFLECTION_PASSES {
                warn!(
                    left = self.left,
                    top = self.top,
                    "ball reflections did not settle"
                );
                break;
            }
        }
    }

    fn reflect_off_horizontal(&mut self, pads: &Pads) -> bool {
        let (left, top) = self.next_position();
        let top_pad = pads.top.rect();
        let bottom_pad = pads.bottom.rect();
        let hit = (top == top_pad.bottom() - 1
            && (top_pad.left()..=top_pad.right()).contains(&left))
            || (top == bottom_pad.top()
                && (bottom_pad.left()..=bottom_pad.right()).contains(&left));
        if hit {
            self.dy = -self.dy;
            trace!(
                left = self.left,
                top = self.top,
                dy = self.dy,
                "reflected off horizontal pad"
            );
        }
        hit
    }

    fn reflect_off_vertical(&mut self, pads: &Pads) -> bool {
        let (left, top) = self.next_position();
        let left_pad = pads.left.rect();
        let right_pad = pads.right.rect();
        let hit = (left == left_pad.right() - 1
            && (left_pad.top()..=left_pad.bottom()).contains(&top))
            || (left == right_pad.left()
                && (right_pad.top()..=right_pad.bottom()).contains(&top));
        if hit {
            self.dx = -self.dx;
            trace!(
                left = self.left,
                top = self.top,
                dx = self.dx,
                "reflected off vertical pad"
            );
        }
        hit
    }
}
