//! Display views of the tournament (for API / rendering): model data plus the derived values
//! the page shows, so nothing is recomputed client-side.

use crate::models::competitor::{Competitor, CompetitorId, RatingBand};
use crate::models::pairing::{Pairing, PairingId, RoundRecord};
use crate::models::tournament::{Tournament, TournamentId, TournamentState};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CompetitorView {
    pub id: CompetitorId,
    pub name: String,
    pub rating: i32,
    pub rating_band: RatingBand,
}

impl CompetitorView {
    pub fn from_competitor(c: &Competitor) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            rating: c.rating,
            rating_band: c.rating_band(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PairingView {
    pub id: PairingId,
    pub competitor_a: CompetitorView,
    pub competitor_b: Option<CompetitorView>,
    pub winner: Option<CompetitorId>,
    pub loser: Option<CompetitorId>,
    pub bye: bool,
    pub champion: bool,
    /// None for a bye or the champion pairing.
    pub rating_difference: Option<u32>,
    pub outcome: String,
}

impl PairingView {
    pub fn from_pairing(p: &Pairing) -> Self {
        Self {
            id: p.id,
            competitor_a: CompetitorView::from_competitor(&p.competitor_a),
            competitor_b: p.competitor_b.as_ref().map(CompetitorView::from_competitor),
            winner: p.winner,
            loser: p.loser().map(|c| c.id),
            bye: p.bye,
            champion: p.champion,
            rating_difference: p.rating_difference(),
            outcome: p.outcome(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RoundView {
    pub round: u32,
    pub completed_at: DateTime<Utc>,
    pub pairings: Vec<PairingView>,
}

impl RoundView {
    pub fn from_record(r: &RoundRecord) -> Self {
        Self {
            round: r.round,
            completed_at: r.completed_at,
            pairings: r.pairings.iter().map(PairingView::from_pairing).collect(),
        }
    }
}

/// Whole tournament as the page renders it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TournamentView {
    pub id: TournamentId,
    pub state: TournamentState,
    pub started: bool,
    pub current_round: u32,
    pub competitors: Vec<CompetitorView>,
    pub active_pairings: Vec<PairingView>,
    pub history: Vec<RoundView>,
    pub all_decided: bool,
    pub champion_decided: bool,
    pub champion: Option<CompetitorView>,
}

impl TournamentView {
    pub fn from_tournament(t: &Tournament) -> Self {
        Self {
            id: t.id,
            state: t.state,
            started: t.is_started(),
            current_round: t.current_round,
            competitors: t
                .roster
                .competitors()
                .iter()
                .map(CompetitorView::from_competitor)
                .collect(),
            active_pairings: t.active_pairings.iter().map(PairingView::from_pairing).collect(),
            history: t.history.iter().map(RoundView::from_record).collect(),
            all_decided: t.all_decided(),
            champion_decided: t.is_champion_decided(),
            champion: t.champion().map(CompetitorView::from_competitor),
        }
    }
}

impl Tournament {
    /// Current state as a display view.
    pub fn view(&self) -> TournamentView {
        TournamentView::from_tournament(self)
    }
}
