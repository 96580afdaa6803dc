//! Roster: competitors registered before the tournament starts.

use crate::models::competitor::{Competitor, CompetitorId};
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Validate a display name: trimmed, must not be empty.
pub fn parse_name(name: &str) -> Result<&str, TournamentError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::EmptyName);
    }
    Ok(trimmed)
}

/// Parse a rating typed as text. The whole (trimmed) input must be an integer.
pub fn parse_rating(rating: &str) -> Result<i32, TournamentError> {
    rating
        .trim()
        .parse::<i32>()
        .map_err(|_| TournamentError::InvalidRating(rating.to_string()))
}

/// Registered competitors in registration order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    competitors: Vec<Competitor>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn competitors(&self) -> &[Competitor] {
        &self.competitors
    }

    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }

    pub fn get(&self, id: CompetitorId) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.id == id)
    }

    /// Register a competitor from raw input. Returns the new competitor's id.
    pub fn add(&mut self, name: &str, rating: &str) -> Result<CompetitorId, TournamentError> {
        let name = parse_name(name)?;
        let rating = parse_rating(rating)?;
        let competitor = Competitor::new(name, rating);
        let id = competitor.id;
        self.competitors.push(competitor);
        Ok(id)
    }

    /// Append several already-validated competitors at once.
    pub fn extend(&mut self, competitors: impl IntoIterator<Item = Competitor>) {
        self.competitors.extend(competitors);
    }

    pub fn remove(&mut self, id: CompetitorId) -> Result<Competitor, TournamentError> {
        let idx = self
            .competitors
            .iter()
            .position(|c| c.id == id)
            .ok_or(TournamentError::CompetitorNotFound(id))?;
        Ok(self.competitors.remove(idx))
    }
}
