use cubesnake_common::Direction;
use serde::{Deserialize, Serialize};

/// A high-level action any input source can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Change heading. Takes effect on the next move.
    Turn(Direction),
    /// Start a new game.
    Start,
    Pause,
    Resume,
    /// Nothing this frame.
    Noop,
}

impl Action {
    /// Map a script symbol to an action.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let action = match symbol.to_ascii_lowercase() {
            'u' => Action::Turn(Direction::Up),
            'd' => Action::Turn(Direction::Down),
            'l' => Action::Turn(Direction::Left),
            'r' => Action::Turn(Direction::Right),
            's' => Action::Start,
            'p' => Action::Pause,
            'c' => Action::Resume,
            '.' => Action::Noop,
            _ => return None,
        };
        Some(action)
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Turn(direction)
    }
}

/// Errors from parsing input scripts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("unknown input symbol {symbol:?} at position {position}")]
    UnknownSymbol { symbol: char, position: usize },
}

/// Parse a frame script: one action per symbol, whitespace ignored.
///
/// `u d l r` turn, `s` starts, `p` pauses, `c` continues, `.` is an idle frame.
pub fn parse_script(script: &str) -> Result<Vec<Action>, InputError> {
    let actions = script
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(position, symbol)| {
            Action::from_symbol(symbol).ok_or(InputError::UnknownSymbol { symbol, position })
        })
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(frames = actions.len(), "parsed input script");
    Ok(actions)
}
