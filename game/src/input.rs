use std::io;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
    Reset,
    SlowDown,
    SpeedUp,
}

pub trait Input {
    /// Returns the next pending key without waiting for one.
    fn poll_key(&mut self) -> io::Result<Option<Key>>;
}
