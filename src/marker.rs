//! # Markers and Players
//!
//! A [`Marker`] is the token a player drops into the board. Exactly one value,
//! [`Marker::EMPTY`], means "no marker"; every other value identifies one
//! player for the lifetime of a game.
//!
//! The named colours of the legacy Connect X front-ends are available as
//! constants, and [`Marker::custom`] mints further identities for games with
//! more players than named colours.

use colored::{ColoredString, Colorize};
use std::fmt;

use crate::error::RulesError;

/// An opaque, copyable marker identity
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct Marker(u8);

/// Predefined markers: (marker, ASCII code, name)
const PREDEFINED: [(Marker, char, &str); 6] = [
    (Marker::WHITE, 'W', "white"),
    (Marker::BLACK, 'K', "black"),
    (Marker::GREEN, 'G', "green"),
    (Marker::RED, 'R', "red"),
    (Marker::YELLOW, 'Y', "yellow"),
    (Marker::BLUE, 'B', "blue"),
];

impl Marker {
    pub const EMPTY: Marker = Marker(0);
    pub const WHITE: Marker = Marker(1);
    pub const BLACK: Marker = Marker(2);
    pub const GREEN: Marker = Marker(3);
    pub const RED: Marker = Marker(4);
    pub const YELLOW: Marker = Marker(5);
    pub const BLUE: Marker = Marker(6);

    /// First identity not taken by a predefined colour
    const FIRST_CUSTOM: u8 = 7;

    /// Number of identities [`Marker::custom`] can mint
    pub const CUSTOM_COUNT: usize = (u8::MAX - Self::FIRST_CUSTOM) as usize + 1;

    /// Creates the `n`-th custom marker (0-based), distinct from every
    /// predefined colour and from [`Marker::EMPTY`].
    ///
    /// Returns `None` once the identity space is exhausted.
    pub fn custom(n: u8) -> Option<Marker> {
        n.checked_add(Self::FIRST_CUSTOM).map(Marker)
    }

    /// The raw identity, 0 for the empty marker
    pub fn id(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self == Marker::EMPTY
    }

    /// Single-character code used in board dumps
    pub fn ascii_code(self) -> char {
        if self.is_empty() {
            return '.';
        }
        PREDEFINED
            .iter()
            .find(|(m, _, _)| *m == self)
            .map(|(_, code, _)| *code)
            .unwrap_or_else(|| (b'a' + (self.0 - Self::FIRST_CUSTOM) % 26) as char)
    }

    /// Human readable name, e.g. "red" or "custom-3"
    pub fn name(self) -> String {
        if self.is_empty() {
            return "empty".to_string();
        }
        PREDEFINED
            .iter()
            .find(|(m, _, _)| *m == self)
            .map(|(_, _, name)| name.to_string())
            .unwrap_or_else(|| format!("custom-{}", self.0 - Self::FIRST_CUSTOM))
    }

    /// The ASCII code painted in the marker's terminal colour
    pub fn painted(self) -> ColoredString {
        let code = self.ascii_code().to_string();
        match self {
            Marker::EMPTY => code.dimmed(),
            Marker::WHITE => code.white().bold(),
            Marker::BLACK => code.bright_black().bold(),
            Marker::GREEN => code.green().bold(),
            Marker::RED => code.red().bold(),
            Marker::YELLOW => code.yellow().bold(),
            Marker::BLUE => code.blue().bold(),
            _ => code.magenta().bold(),
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ascii_code())
    }
}

/// A participant in the turn rotation.
///
/// The turn index of a player is its position in the game's player sequence.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Player {
    name: String,
    marker: Marker,
}

impl Player {
    /// Creates a player. The empty marker cannot belong to anyone.
    pub fn new(name: impl Into<String>, marker: Marker) -> Result<Self, RulesError> {
        if marker.is_empty() {
            return Err(RulesError::EmptyMarker);
        }
        Ok(Self {
            name: name.into(),
            marker,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_markers_are_distinct() {
        for (i, (a, _, _)) in PREDEFINED.iter().enumerate() {
            assert!(!a.is_empty());
            for (b, _, _) in PREDEFINED.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_ascii_codes() {
        assert_eq!(Marker::EMPTY.ascii_code(), '.');
        assert_eq!(Marker::RED.ascii_code(), 'R');
        assert_eq!(Marker::BLACK.ascii_code(), 'K');
        assert_eq!(Marker::custom(0).unwrap().ascii_code(), 'a');
        assert_eq!(Marker::YELLOW.to_string(), "Y");
    }

    #[test]
    fn test_custom_markers_never_collide_with_predefined() {
        let custom = Marker::custom(0).unwrap();
        assert!(PREDEFINED.iter().all(|(m, _, _)| *m != custom));
        assert_eq!(custom.name(), "custom-0");
        assert!(Marker::custom(249).is_none());
    }

    #[test]
    fn test_custom_identity_space() {
        let last = u8::try_from(Marker::CUSTOM_COUNT - 1).unwrap();
        assert_eq!(Marker::custom(last).map(Marker::id), Some(u8::MAX));
        assert!(Marker::custom(last + 1).is_none());
        assert_eq!(Marker::CUSTOM_COUNT, 249);
    }

    #[test]
    fn test_player_rejects_empty_marker() {
        assert_eq!(
            Player::new("Nobody", Marker::EMPTY),
            Err(RulesError::EmptyMarker)
        );
        let player = Player::new("First Player", Marker::BLACK).unwrap();
        assert_eq!(player.marker(), Marker::BLACK);
        assert_eq!(player.to_string(), "First Player (K)");
    }
}
