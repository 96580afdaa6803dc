//! Setup phase: start the tournament (NotStarted -> InProgress, round 1 paired).

use crate::logic::pairing::form_pairings;
use crate::models::{Tournament, TournamentError, TournamentState, MIN_COMPETITORS};

/// Start the tournament: require at least 2 competitors, then pair the whole roster for round 1.
pub fn start_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::NotStarted {
        return Err(TournamentError::AlreadyStarted);
    }
    let found = tournament.roster.len();
    if found < MIN_COMPETITORS {
        return Err(TournamentError::NotEnoughCompetitors {
            required: MIN_COMPETITORS,
            found,
        });
    }
    tournament.active_pairings = form_pairings(tournament.roster.competitors());
    tournament.current_round = 1;
    tournament.history.clear();
    tournament.state = TournamentState::InProgress;
    log::info!(
        "Tournament {} started with {} competitors ({} pairings in round 1)",
        tournament.id,
        found,
        tournament.active_pairings.len()
    );
    Ok(())
}
