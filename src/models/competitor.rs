//! Competitor and the rating bands used when displaying one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a competitor (used in pairings and lookups).
pub type CompetitorId = Uuid;

/// Rating bracket a competitor falls into (the renderer colours by this).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    SuperGrandmaster,
    EliteGrandmaster,
    Grandmaster,
    InternationalMaster,
    Club,
}

impl RatingBand {
    pub fn from_rating(rating: i32) -> Self {
        match rating {
            r if r >= 2800 => RatingBand::SuperGrandmaster,
            r if r >= 2700 => RatingBand::EliteGrandmaster,
            r if r >= 2600 => RatingBand::Grandmaster,
            r if r >= 2500 => RatingBand::InternationalMaster,
            _ => RatingBand::Club,
        }
    }
}

/// A registered competitor. Never mutated after creation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub name: String,
    pub rating: i32,
}

impl Competitor {
    /// Create a competitor with a fresh id.
    pub fn new(name: impl Into<String>, rating: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rating,
        }
    }

    pub fn rating_band(&self) -> RatingBand {
        RatingBand::from_rating(self.rating)
    }
}
