use std::io;

use rand::Rng;
use tracing::{debug, info};

use crate::{
    arena::{Arena, Pads},
    ball::Ball,
    config::{GameConfig, Pace},
    display::{Colors, Display},
    input::{Input, Key},
    timer::{Clock, Stopwatch},
    GameError,
};

pub const GAME_OVER_PROMPT: &str = "Game Over! Press R to reset.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// The ball left the arena. A reset starts a new round.
    GameOver,
    Stopped,
}

/// Owns the pads and the ball and drives them from a single loop.
pub struct Game<D, C, R> {
    display: D,
    stopwatch: Stopwatch<C>,
    rng: R,
    config: GameConfig,
    arena: Arena,
    pads: Pads,
    ball: Ball,
    pace: Pace,
    running: bool,
    prompt_shown: bool,
}

impl<D: Display, C: Clock, R: Rng> Game<D, C, R> {
    /// Sizes the arena after the display's viewport, draws the pads and launches the first
    /// ball.
    pub fn new(
        config: GameConfig,
        mut display: D,
        clock: C,
        mut rng: R,
    ) -> Result<Self, GameError> {
        let pace = config.to_pace()?;
        let (width, height) = display.viewport_size()?;
        let arena = Arena::new(width, height);
        if (GAME_OVER_PROMPT.len() as i32) > arena.width() {
            return Err(arena.too_small());
        }
        let pads = arena.pads(&config)?;
        display.set_cursor_visible(false)?;
        display.fill(config.background)?;
        pads.draw(&mut display)?;
        let ball = Self::new_ball(&arena, &config, &mut rng);
        let mut game = Self {
            display,
            stopwatch: Stopwatch::new(clock),
            rng,
            config,
            arena,
            pads,
            ball,
            pace,
            running: true,
            prompt_shown: false,
        };
        game.start_round()?;
        info!(width, height, "game started");
        Ok(game)
    }

    pub fn phase(&self) -> Phase {
        if !self.running {
            Phase::Stopped
        } else if self.ball.is_dead(&self.pads) {
            Phase::GameOver
        } else {
            Phase::Running
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn pads(&self) -> &Pads {
        &self.pads
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn pace(&self) -> &Pace {
        &self.pace
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Runs until escape is pressed. Each pass ticks the ball when due and handles at most one
    /// key.
    pub fn run<I: Input>(&mut self, input: &mut I) -> Result<(), GameError> {
        while self.running {
            self.update()?;
            if let Some(key) = input.poll_key()? {
                self.handle_key(key)?;
            }
            self.display.flush()?;
        }
        self.stopwatch.stop();
        self.display.set_cursor_visible(true)?;
        self.display.flush()?;
        Ok(())
    }

    /// Moves the ball if a full pace has passed since the last move and shows the prompt once
    /// it's dead.
    pub fn update(&mut self) -> io::Result<()> {
        if self.stopwatch.elapsed() >= self.pace.current() {
            self.stopwatch.restart();
            self.ball.advance(&self.pads, &mut self.display)?;
            if self.ball.is_dead(&self.pads) {
                debug!(
                    left = self.ball.left(),
                    top = self.ball.top(),
                    "ball left the arena"
                );
            }
        }
        if self.ball.is_dead(&self.pads) {
            self.stopwatch.stop();
            self.show_prompt()?;
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: Key) -> io::Result<()> {
        match key {
            Key::Up => self.pads.move_vertical(-1, &mut self.display)?,
            Key::Down => self.pads.move_vertical(1, &mut self.display)?,
            Key::Left => self.pads.move_horizontal(-1, &mut self.display)?,
            Key::Right => self.pads.move_horizontal(1, &mut self.display)?,
            Key::Reset => self.reset()?,
            Key::SpeedUp => {
                self.pace.speed_up();
            }
            Key::SlowDown => {
                self.pace.slow_down();
            }
            Key::Escape => self.stop(),
        }
        Ok(())
    }

    /// Replaces the ball with a fresh one at the arena's center.
    pub fn reset(&mut self) -> io::Result<()> {
        // a dead ball is already off screen.
        if !self.ball.is_dead(&self.pads) {
            self.ball.erase(&mut self.display)?;
        }
        if self.prompt_shown {
            self.clear_prompt()?;
        }
        self.ball = Self::new_ball(&self.arena, &self.config, &mut self.rng);
        self.start_round()
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.stopwatch.stop();
        info!("game stopped");
    }

    fn new_ball(arena: &Arena, config: &GameConfig, rng: &mut R) -> Ball {
        let (left, top) = arena.center();
        Ball::new(left, top, config.ball_colors(), rng)
    }

    fn start_round(&mut self) -> io::Result<()> {
        self.ball.draw(&mut self.display)?;
        self.stopwatch.restart();
        debug!(
            left = self.ball.left(),
            top = self.ball.top(),
            dx = self.ball.dx(),
            dy = self.ball.dy(),
            "ball launched"
        );
        Ok(())
    }

    fn prompt_position(&self) -> (i32, i32) {
        (
            (self.arena.width() - GAME_OVER_PROMPT.len() as i32) / 2,
            self.arena.height() / 2,
        )
    }

    fn show_prompt(&mut self) -> io::Result<()> {
        let (x, y) = self.prompt_position();
        self.display
            .write_text(x, y, GAME_OVER_PROMPT, self.config.prompt_colors)?;
        self.prompt_shown = true;
        Ok(())
    }

    fn clear_prompt(&mut self) -> io::Result<()> {
        let (x, y) = self.prompt_position();
        let blank = " ".repeat(GAME_OVER_PROMPT.len());
        let colors = Colors::new(self.config.prompt_colors.foreground, self.config.background);
        self.display.write_text(x, y, &blank, colors)?;
        self.prompt_shown = false;
        // the prompt can run over the side pads in narrow arenas.
        self.pads.draw(&mut self.display)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::rngs::mock::StepRng;

    use crate::{
        assert_direction, assert_position,
        ball::{testing::rng_for, GLYPH},
        config::GameConfig,
        display::{testing::RecordingDisplay, Color},
        game::{Game, Phase, GAME_OVER_PROMPT},
        input::{testing::ScriptedInput, Key},
        timer::testing::ManualClock,
        GameError,
    };

    type TestGame = Game<RecordingDisplay, ManualClock, StepRng>;

    const PACE: Duration = Duration::from_millis(200);

    fn new_game(direction: (i32, i32)) -> (TestGame, ManualClock) {
        let clock = ManualClock::new();
        let game = Game::new(
            GameConfig::default(),
            RecordingDisplay::new(80, 24),
            clock.clone(),
            rng_for(direction),
        )
        .unwrap();
        (game, clock)
    }

    fn tick(game: &mut TestGame, clock: &ManualClock) {
        clock.advance(game.pace().current());
        game.update().unwrap();
    }

    #[test]
    fn starts_with_ball_at_center() {
        let (game, _) = new_game((1, 1));
        assert_eq!(game.phase(), Phase::Running);
        assert_position!(game.ball(), (40, 12));
        assert!(!game.display().cursor_visible);
        assert_eq!(
            game.display().cell(40, 12).map(|(glyph, _)| glyph),
            Some(GLYPH)
        );
        assert_eq!(game.display().background_at(35, 0), Some(Color::Red));
        assert_eq!(game.display().background_at(79, 13), Some(Color::Blue));
        assert_eq!(game.display().background_at(20, 5), Some(Color::Black));
    }

    #[test]
    fn viewport_too_small() {
        let new = |width, height| {
            Game::new(
                GameConfig::default(),
                RecordingDisplay::new(width, height),
                ManualClock::new(),
                rng_for((1, 1)),
            )
        };
        assert!(matches!(
            new(20, 24),
            Err(GameError::ViewportTooSmall {
                width: 20,
                height: 24
            })
        ));
        assert!(matches!(
            new(80, 5),
            Err(GameError::ViewportTooSmall { .. })
        ));
        assert!(new(28, 7).is_ok());
    }

    #[test]
    fn invalid_pace_config() {
        let config = GameConfig {
            pace: Duration::from_millis(10),
            ..GameConfig::default()
        };
        let result = Game::new(
            config,
            RecordingDisplay::new(80, 24),
            ManualClock::new(),
            rng_for((1, 1)),
        );
        assert!(matches!(result, Err(GameError::InvalidPace { .. })));
    }

    #[test]
    fn ball_waits_for_pace() {
        let (mut game, clock) = new_game((1, 1));
        clock.advance(PACE - Duration::from_millis(1));
        game.update().unwrap();
        assert_position!(game.ball(), (40, 12));
        clock.advance(Duration::from_millis(1));
        game.update().unwrap();
        assert_position!(game.ball(), (41, 13));
        // the accumulator starts over after each move.
        game.update().unwrap();
        assert_position!(game.ball(), (41, 13));
    }

    #[test]
    fn late_ticks_are_not_caught_up() {
        let (mut game, clock) = new_game((1, 1));
        clock.advance(PACE * 5);
        game.update().unwrap();
        game.update().unwrap();
        assert_position!(game.ball(), (41, 13));
    }

    #[test]
    fn deterministic_trajectory() {
        let (mut game, clock) = new_game((1, 1));
        let mut positions = Vec::new();
        for _ in 0..5 {
            tick(&mut game, &clock);
            positions.push((game.ball().left(), game.ball().top()));
        }
        assert_eq!(
            positions,
            vec![(41, 13), (42, 14), (43, 15), (44, 16), (45, 17)]
        );
    }

    #[test]
    fn game_over_then_reset() {
        let (mut game, clock) = new_game((1, -1));
        // straight up and to the right, out through the gap beside the top pad.
        for _ in 0..12 {
            assert_eq!(game.phase(), Phase::Running);
            tick(&mut game, &clock);
        }
        assert_position!(game.ball(), (52, 0));
        assert_eq!(game.phase(), Phase::GameOver);
        assert!(game.display().row_text(12).contains(GAME_OVER_PROMPT));
        assert_eq!(game.display().background_at(26, 12), Some(Color::Red));

        // the round is frozen until reset.
        clock.advance(PACE * 10);
        game.update().unwrap();
        assert_position!(game.ball(), (52, 0));
        assert_eq!(game.phase(), Phase::GameOver);

        game.handle_key(Key::Reset).unwrap();
        assert_eq!(game.phase(), Phase::Running);
        assert_position!(game.ball(), (40, 12));
        assert!(!game.display().row_text(12).contains("Game Over"));
        assert_eq!(game.display().background_at(26, 12), Some(Color::Black));
        tick(&mut game, &clock);
        assert_eq!(game.phase(), Phase::Running);
        assert_ne!((game.ball().left(), game.ball().top()), (40, 12));
    }

    #[test]
    fn reset_erases_live_ball() {
        let (mut game, clock) = new_game((1, 1));
        tick(&mut game, &clock);
        game.handle_key(Key::Reset).unwrap();
        assert_eq!(game.display().cell(41, 13).map(|(glyph, _)| glyph), Some(' '));
        assert_eq!(game.display().cell(40, 12).map(|(glyph, _)| glyph), Some(GLYPH));
    }

    #[test]
    fn pace_keys() {
        let (mut game, clock) = new_game((1, 1));
        for _ in 0..5 {
            game.handle_key(Key::SpeedUp).unwrap();
        }
        assert_eq!(game.pace().current(), Duration::from_millis(50));
        clock.advance(Duration::from_millis(50));
        game.update().unwrap();
        assert_position!(game.ball(), (41, 13));
        for _ in 0..5 {
            game.handle_key(Key::SlowDown).unwrap();
        }
        assert_eq!(game.pace().current(), Duration::from_millis(800));
    }

    #[test]
    fn arrows_move_pad_pairs() {
        let (mut game, _) = new_game((1, 1));
        game.handle_key(Key::Up).unwrap();
        assert_position!(game.pads().left.rect(), (0, 8));
        assert_position!(game.pads().right.rect(), (78, 8));
        game.handle_key(Key::Down).unwrap();
        game.handle_key(Key::Down).unwrap();
        assert_position!(game.pads().left.rect(), (0, 10));
        game.handle_key(Key::Right).unwrap();
        assert_position!(game.pads().top.rect(), (36, 0));
        assert_position!(game.pads().bottom.rect(), (36, 23));
        game.handle_key(Key::Left).unwrap();
        game.handle_key(Key::Left).unwrap();
        assert_position!(game.pads().top.rect(), (34, 0));
        assert_direction!(game.ball(), (1, 1));
    }

    #[test]
    fn run_handles_one_key_per_pass() {
        let (mut game, _) = new_game((1, 1));
        let mut input = ScriptedInput::new([
            None,
            Some(Key::Right),
            Some(Key::Right),
            None,
            Some(Key::Escape),
            Some(Key::Right),
        ]);
        game.run(&mut input).unwrap();
        assert_eq!(game.phase(), Phase::Stopped);
        assert_position!(game.pads().top.rect(), (37, 0));
        // five passes plus the final flush.
        assert_eq!(game.display().flushes, 6);
        assert!(game.display().cursor_visible);
    }

    #[test]
    fn run_plays_a_round() {
        let (mut game, clock) = new_game((1, 1));
        clock.advance(PACE);
        let mut input = ScriptedInput::new([None, Some(Key::SpeedUp)]);
        game.run(&mut input).unwrap();
        assert_position!(game.ball(), (41, 13));
        assert_eq!(game.pace().current(), Duration::from_millis(100));
        assert_eq!(game.phase(), Phase::Stopped);
    }
}
