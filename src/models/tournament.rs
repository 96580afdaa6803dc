//! Tournament, TournamentState and TournamentError.

use crate::models::competitor::{Competitor, CompetitorId};
use crate::models::pairing::{Pairing, PairingId, RoundRecord};
use crate::models::roster::Roster;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Minimum roster size for a tournament to start.
pub const MIN_COMPETITORS: usize = 2;

/// Broad classification of a rejected command.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The input itself is malformed.
    InvalidInput,
    /// The input is fine but the tournament is not in a state that allows it.
    Precondition,
}

/// Errors that can occur during tournament operations. A rejected command leaves state unchanged.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    #[error("Competitor name must not be empty")]
    EmptyName,
    #[error("Rating must be a whole number (got {0:?})")]
    InvalidRating(String),
    #[error("Need at least {required} competitors to start (have {found})")]
    NotEnoughCompetitors { required: usize, found: usize },
    #[error("Invalid roster file: {0}")]
    InvalidImport(String),
    #[error("Tournament has already started")]
    AlreadyStarted,
    #[error("Tournament is not in progress")]
    NotInProgress,
    #[error("Not all pairings have a result")]
    IncompleteResults,
    #[error("Pairing not found")]
    PairingNotFound(PairingId),
    #[error("Competitor not found")]
    CompetitorNotFound(CompetitorId),
    #[error("Competitor is not playing in this pairing")]
    NotInPairing {
        pairing: PairingId,
        competitor: CompetitorId,
    },
    #[error("Result of this pairing is fixed and cannot be reported")]
    ResultFixed(PairingId),
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            EmptyName | InvalidRating(_) | NotEnoughCompetitors { .. } | InvalidImport(_) => {
                ErrorKind::InvalidInput
            }
            AlreadyStarted
            | NotInProgress
            | IncompleteResults
            | PairingNotFound(_)
            | CompetitorNotFound(_)
            | NotInPairing { .. }
            | ResultFixed(_) => ErrorKind::Precondition,
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Registering competitors; not started.
    #[default]
    NotStarted,
    /// Rounds are being played.
    InProgress,
    /// One competitor left; `active_pairings` holds the champion pairing.
    Complete,
}

/// Full tournament state: roster, current round, active pairings, and round history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub roster: Roster,
    pub state: TournamentState,
    /// Starts at 1; bumped each time a new round is formed.
    pub current_round: u32,
    /// Current round's pairings (the champion pairing once complete).
    pub active_pairings: Vec<Pairing>,
    /// Completed rounds, oldest first.
    pub history: Vec<RoundRecord>,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl Tournament {
    /// Create a new tournament with an empty roster.
    pub fn new() -> Self {
        Self::with_roster(Roster::new())
    }

    /// Create a tournament with competitors already registered. Still NotStarted.
    pub fn with_roster(roster: Roster) -> Self {
        Self {
            id: Uuid::new_v4(),
            roster,
            state: TournamentState::NotStarted,
            current_round: 1,
            active_pairings: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn is_started(&self) -> bool {
        self.state != TournamentState::NotStarted
    }

    /// Register a competitor (only before start).
    pub fn add_competitor(&mut self, name: &str, rating: &str) -> Result<CompetitorId, TournamentError> {
        if self.is_started() {
            return Err(TournamentError::AlreadyStarted);
        }
        self.roster.add(name, rating)
    }

    /// Remove a competitor by id (only before start).
    pub fn remove_competitor(&mut self, id: CompetitorId) -> Result<(), TournamentError> {
        if self.is_started() {
            return Err(TournamentError::AlreadyStarted);
        }
        self.roster.remove(id)?;
        Ok(())
    }

    /// True iff there is at least one active pairing and every one has a winner.
    pub fn all_decided(&self) -> bool {
        !self.active_pairings.is_empty() && self.active_pairings.iter().all(Pairing::is_decided)
    }

    pub fn is_champion_decided(&self) -> bool {
        matches!(self.active_pairings.as_slice(), [p] if p.champion)
    }

    /// The tournament winner, once complete.
    pub fn champion(&self) -> Option<&Competitor> {
        match self.active_pairings.as_slice() {
            [p] if p.champion => Some(&p.competitor_a),
            _ => None,
        }
    }

    pub fn get_pairing_mut(&mut self, id: PairingId) -> Option<&mut Pairing> {
        self.active_pairings.iter_mut().find(|p| p.id == id)
    }

    /// Back to NotStarted with the same roster. Pairings and history are discarded.
    pub fn reset_tournament(&mut self) {
        self.state = TournamentState::NotStarted;
        self.current_round = 1;
        self.active_pairings.clear();
        self.history.clear();
        log::info!("Tournament {} reset ({} competitors kept)", self.id, self.roster.len());
    }
}
