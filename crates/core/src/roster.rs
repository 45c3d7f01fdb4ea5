//! Roster module - validated, ordered list of bowlers
//!
//! A roster is fixed once a game starts. Turn order follows roster order.

use crate::error::RosterError;
use crate::types::{PlayerId, MAX_PLAYERS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Validate and build a roster.
    ///
    /// Names are trimmed. Fails on zero players, more than [`MAX_PLAYERS`],
    /// blank names, or the same name twice (compared case-insensitively).
    pub fn new<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.into().trim().to_string())
            .collect();

        if names.is_empty() {
            return Err(RosterError::Empty);
        }
        if names.len() > MAX_PLAYERS {
            return Err(RosterError::TooManyPlayers {
                count: names.len(),
                max: MAX_PLAYERS,
            });
        }

        for (position, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(RosterError::EmptyName { position });
            }
            if names[..position]
                .iter()
                .any(|prev| prev.eq_ignore_ascii_case(name))
            {
                return Err(RosterError::DuplicateName(name.clone()));
            }
        }

        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, player: PlayerId) -> Option<&str> {
        self.names.get(player.index()).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Player ids in turn order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        (0..self.names.len()).map(|i| PlayerId(i as u8))
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.names.len()
    }
}
