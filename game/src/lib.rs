use std::{error::Error, fmt::Display, io, time::Duration};

pub mod arena;
pub mod ball;
pub mod config;
pub mod display;
pub mod game;
pub mod geometry;
pub mod input;
pub mod paddle;
pub mod timer;

pub use game::{Game, Phase};

#[derive(Debug)]
pub enum GameError {
    ViewportTooSmall {
        width: u16,
        height: u16,
    },
    InvalidPace {
        pace: Duration,
        min: Duration,
        max: Duration,
    },
    Io(io::Error),
}

impl Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::ViewportTooSmall { width, height } => {
                write!(f, "viewport {width}x{height} is too small for the arena")
            }
            GameError::InvalidPace { pace, min, max } => write!(
                f,
                "invalid pace {}ms, expected a non-zero range {}ms..={}ms containing it",
                pace.as_millis(),
                min.as_millis(),
                max.as_millis(),
            ),
            GameError::Io(err) => Display::fmt(err, f),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GameError::ViewportTooSmall { .. } | GameError::InvalidPace { .. } => None,
            GameError::Io(source) => Some(source),
        }
    }
}

impl From<io::Error> for GameError {
    fn from(err: io::Error) -> Self {
        GameError::Io(err)
    }
}

#[cfg(test)]
#[macro_export]
macro_rules! assert_position {
    ($item:expr, ($left:expr, $top:expr) $(,)?) => {
        assert_eq!(($item.left(), $item.top()), ($left, $top))
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! assert_direction {
    ($ball:expr, ($dx:expr, $dy:expr) $(,)?) => {
        assert_eq!(($ball.dx(), $ball.dy()), ($dx, $dy))
    };
}
