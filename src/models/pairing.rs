//! Pairing: one scheduled match (or bye) within a round, and the round record kept in history.

use crate::models::competitor::{Competitor, CompetitorId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a pairing.
pub type PairingId = Uuid;

/// A single pairing: competitor A against competitor B, or A alone (bye / champion).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub id: PairingId,
    pub competitor_a: Competitor,
    /// None for a bye or the champion pairing.
    pub competitor_b: Option<Competitor>,
    /// None while the match is pending.
    pub winner: Option<CompetitorId>,
    pub bye: bool,
    pub champion: bool,
}

impl Pairing {
    /// A match between two competitors, winner pending.
    pub fn new(competitor_a: Competitor, competitor_b: Competitor) -> Self {
        Self {
            id: Uuid::new_v4(),
            competitor_a,
            competitor_b: Some(competitor_b),
            winner: None,
            bye: false,
            champion: false,
        }
    }

    /// A bye: the competitor advances without playing.
    pub fn bye(competitor: Competitor) -> Self {
        Self {
            id: Uuid::new_v4(),
            winner: Some(competitor.id),
            competitor_a: competitor,
            competitor_b: None,
            bye: true,
            champion: false,
        }
    }

    /// The terminal pairing holding the tournament winner.
    pub fn champion(competitor: Competitor) -> Self {
        Self {
            id: Uuid::new_v4(),
            winner: Some(competitor.id),
            competitor_a: competitor,
            competitor_b: None,
            bye: false,
            champion: true,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Whether `id` is one of the competitors playing in this pairing.
    pub fn involves(&self, id: CompetitorId) -> bool {
        self.competitor_a.id == id || self.competitor_b.as_ref().is_some_and(|b| b.id == id)
    }

    /// The competitor matching `winner`, if decided.
    pub fn winner_competitor(&self) -> Option<&Competitor> {
        let winner = self.winner?;
        if self.competitor_a.id == winner {
            return Some(&self.competitor_a);
        }
        self.competitor_b.as_ref().filter(|b| b.id == winner)
    }

    /// The losing competitor of a decided two-competitor match.
    pub fn loser(&self) -> Option<&Competitor> {
        let winner = self.winner?;
        let b = self.competitor_b.as_ref()?;
        if winner == self.competitor_a.id {
            Some(b)
        } else {
            Some(&self.competitor_a)
        }
    }

    /// Absolute rating gap between the two competitors (None for a bye).
    pub fn rating_difference(&self) -> Option<u32> {
        self.competitor_b
            .as_ref()
            .map(|b| self.competitor_a.rating.abs_diff(b.rating))
    }

    /// One-line description of the result, e.g. for a history listing.
    pub fn outcome(&self) -> String {
        if self.bye {
            return format!("{} received a bye", self.competitor_a.name);
        }
        if self.champion {
            return format!("{} is the champion", self.competitor_a.name);
        }
        match (self.winner_competitor(), self.loser()) {
            (Some(w), Some(l)) => format!("{} defeated {}", w.name, l.name),
            _ => match &self.competitor_b {
                Some(b) => format!("{} vs {} (pending)", self.competitor_a.name, b.name),
                None => format!("{} (pending)", self.competitor_a.name),
            },
        }
    }
}

/// Snapshot of one completed round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub pairings: Vec<Pairing>,
    pub completed_at: DateTime<Utc>,
}
