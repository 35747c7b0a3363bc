use std::io;

use crate::display::{Color, Display};

/// Axis-aligned block of cells. Position can change, size is fixed once built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    left: i32,
    top: i32,
    width: i32,
    height: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn set_left(&mut self, left: i32) {
        self.left = left;
    }

    pub fn set_top(&mut self, top: i32) {
        self.top = top;
    }

    pub fn draw<D: Display + ?Sized>(&self, display: &mut D, color: Color) -> io::Result<()> {
        display.set_cell_block_color(self, color)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        display::{testing::RecordingDisplay, Color},
        geometry::Rect,
    };

    #[test]
    fn edges_follow_position() {
        let mut rect = Rect::new(3, 4, 10, 2);
        assert_eq!((rect.right(), rect.bottom()), (13, 6));
        rect.set_left(7);
        rect.set_top(0);
        assert_eq!((rect.left(), rect.top()), (7, 0));
        assert_eq!((rect.right(), rect.bottom()), (17, 2));
        assert_eq!((rect.width(), rect.height()), (10, 2));
    }

    #[test]
    fn draw_fills_current_region() {
        let mut display = RecordingDisplay::new(20, 10);
        let mut rect = Rect::new(0, 1, 2, 3);
        rect.draw(&mut display, Color::Blue).unwrap();
        rect.set_top(5);
        rect.draw(&mut display, Color::Red).unwrap();
        assert_eq!(display.background_at(1, 3), Some(Color::Blue));
        assert_eq!(display.background_at(1, 5), Some(Color::Red));
        assert_eq!(display.background_at(0, 7), Some(Color::Red));
        assert_eq!(display.background_at(0, 8), None);
    }
}
