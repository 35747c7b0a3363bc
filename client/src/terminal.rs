use std::{
    io::{self, stdout, Write},
    time::Duration,
};

use crossterm::{
    cursor::{self, MoveTo},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Print, ResetColor, SetColors},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use game::{
    display::{Color, Colors, Display},
    input::{Input, Key},
};

/// Raw mode on the alternate screen for as long as it's alive.
pub struct Terminal;

impl Terminal {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // from here on dropping the guard puts the terminal back, even on error.
        let terminal = Self;
        execute!(stdout(), EnterAlternateScreen, cursor::Hide, MoveTo(0, 0))?;
        Ok(terminal)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(stdout(), ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

pub struct TerminalDisplay<W: Write> {
    out: W,
    colors: Colors,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, background: Color) -> io::Result<Self> {
        let mut display = Self {
            out,
            colors: Colors::new(Color::White, background),
        };
        display.set_colors(display.colors)?;
        Ok(display)
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn viewport_size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            queue!(self.out, cursor::Show)
        } else {
            queue!(self.out, cursor::Hide)
        }
    }

    fn colors(&self) -> Colors {
        self.colors
    }

    fn set_colors(&mut self, colors: Colors) -> io::Result<()> {
        queue!(
            self.out,
            SetColors(style::Colors::new(
                terminal_color(colors.foreground),
                terminal_color(colors.background),
            ))
        )?;
        self.colors = colors;
        Ok(())
    }

    fn print_at(&mut self, x: i32, y: i32, text: &str) -> io::Result<()> {
        // cells left or above the screen aren't drawable.
        let (Ok(column), Ok(row)) = (u16::try_from(x), u16::try_from(y)) else {
            return Ok(());
        };
        queue!(self.out, MoveTo(column, row), Print(text))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

fn terminal_color(color: Color) -> style::Color {
    match color {
        Color::Black => style::Color::Black,
        Color::Red => style::Color::Red,
        Color::Green => style::Color::Green,
        Color::Blue => style::Color::Blue,
        Color::Yellow => style::Color::Yellow,
        Color::Magenta => style::Color::Magenta,
        Color::Cyan => style::Color::Cyan,
        Color::White => style::Color::White,
    }
}

pub struct Keyboard {
    timeout: Duration,
}

impl Keyboard {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Input for Keyboard {
    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        if !event::poll(self.timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key_event) => Ok(map_key(key_event)),
            _ => Ok(None),
        }
    }
}

fn map_key(key_event: KeyEvent) -> Option<Key> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    if key_event.modifiers == KeyModifiers::CONTROL && key_event.code == KeyCode::Char('c') {
        return Some(Key::Escape);
    }
    match key_event.code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char('r' | 'R') => Some(Key::Reset),
        KeyCode::Char('z' | 'Z') => Some(Key::SlowDown),
        KeyCode::Char('a' | 'A') => Some(Key::SpeedUp),
        _ => None,
    }
}
