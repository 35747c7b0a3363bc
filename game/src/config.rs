use std::time::Duration;

use tracing::info;

use crate::{
    display::{Color, Colors},
    paddle::PadColors,
    GameError,
};

/// Default tuning values.
pub struct Params;

impl Params {
    // pads
    pub const HORIZONTAL_PAD_WIDTH: i32 = 10;
    pub const VERTICAL_PAD_HEIGHT: i32 = 5;

    // pace
    pub const PACE: Duration = Duration::from_millis(200);
    pub const MIN_PACE: Duration = Duration::from_millis(50);
    pub const MAX_PACE: Duration = Duration::from_millis(800);

    // colours
    pub const BACKGROUND: Color = Color::Black;
    pub const HORIZONTAL_PAD: Color = Color::Red;
    pub const VERTICAL_PAD: Color = Color::Blue;
    pub const BALL: Color = Color::Green;
    pub const PROMPT: Colors = Colors::new(Color::White, Color::Red);
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub horizontal_pad_width: i32,
    pub vertical_pad_height: i32,
    pub pace: Duration,
    pub min_pace: Duration,
    pub max_pace: Duration,
    pub background: Color,
    pub horizontal_pad_color: Color,
    pub vertical_pad_color: Color,
    pub ball_color: Color,
    pub prompt_colors: Colors,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            horizontal_pad_width: Params::HORIZONTAL_PAD_WIDTH,
            vertical_pad_height: Params::VERTICAL_PAD_HEIGHT,
            pace: Params::PACE,
            min_pace: Params::MIN_PACE,
            max_pace: Params::MAX_PACE,
            background: Params::BACKGROUND,
            horizontal_pad_color: Params::HORIZONTAL_PAD,
            vertical_pad_color: Params::VERTICAL_PAD,
            ball_color: Params::BALL,
            prompt_colors: Params::PROMPT,
        }
    }
}

impl GameConfig {
    pub fn horizontal_pad_colors(&self) -> PadColors {
        PadColors {
            pad: self.horizontal_pad_color,
            background: self.background,
        }
    }

    pub fn vertical_pad_colors(&self) -> PadColors {
        PadColors {
            pad: self.vertical_pad_color,
            background: self.background,
        }
    }

    pub fn ball_colors(&self) -> Colors {
        Colors::new(self.ball_color, self.background)
    }

    pub fn to_pace(&self) -> Result<Pace, GameError> {
        Pace::new(self.pace, self.min_pace, self.max_pace)
    }
}

/// Time between two ball moves, kept between a floor and a ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pace {
    current: Duration,
    min: Duration,
    max: Duration,
}

impl Pace {
    pub fn new(current: Duration, min: Duration, max: Duration) -> Result<Self, GameError> {
        if min.is_zero() || min > current || current > max {
            return Err(GameError::InvalidPace {
                pace: current,
                min,
                max,
            });
        }
        Ok(Self { current, min, max })
    }

    pub fn current(&self) -> Duration {
        self.current
    }

    /// Halves the pace. Returns `false` when already at the floor.
    pub fn speed_up(&mut self) -> bool {
        self.set((self.current / 2).max(self.min))
    }

    /// Doubles the pace. Returns `false` when already at the ceiling.
    pub fn slow_down(&mut self) -> bool {
        self.set(self.current.saturating_mul(2).min(self.max))
    }

    fn set(&mut self, pace: Duration) -> bool {
        if pace == self.current {
            return false;
        }
        info!(
            from_ms = self.current.as_millis() as u64,
            to_ms = pace.as_millis() as u64,
            "pace changed"
        );
        self.current = pace;
        true
    }
}
