//! Round controller: result reporting and advancement to the next round (or to a champion).

use crate::logic::pairing::form_pairings;
use crate::models::{
    Competitor, CompetitorId, Pairing, PairingId, RoundRecord, Tournament, TournamentError,
    TournamentState,
};
use chrono::Utc;

/// Record `winner_id` as the winner of an active pairing. Reporting again overwrites.
///
/// Rejected (state unchanged) when the pairing is not active, is a bye or the champion
/// pairing, or when `winner_id` is not one of its competitors.
pub fn report_result(
    tournament: &mut Tournament,
    pairing_id: PairingId,
    winner_id: CompetitorId,
) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::InProgress {
        return Err(TournamentError::NotInProgress);
    }
    let pairing = tournament
        .get_pairing_mut(pairing_id)
        .ok_or(TournamentError::PairingNotFound(pairing_id))?;
    if pairing.bye || pairing.champion {
        return Err(TournamentError::ResultFixed(pairing_id));
    }
    if !pairing.involves(winner_id) {
        return Err(TournamentError::NotInPairing {
            pairing: pairing_id,
            competitor: winner_id,
        });
    }
    pairing.winner = Some(winner_id);
    log::debug!("Pairing {} decided: {}", pairing_id, pairing.outcome());
    Ok(())
}

/// Close the current round: snapshot it into history, then either pair the winners for
/// the next round or, if only one is left, finish with a champion pairing.
pub fn advance_round(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::InProgress {
        return Err(TournamentError::NotInProgress);
    }
    if !tournament.all_decided() {
        return Err(TournamentError::IncompleteResults);
    }

    // all_decided guarantees every pairing resolves to a winner
    let winners: Vec<Competitor> = tournament
        .active_pairings
        .iter()
        .filter_map(Pairing::winner_competitor)
        .cloned()
        .collect();

    let pairings = std::mem::take(&mut tournament.active_pairings);
    tournament.history.push(RoundRecord {
        round: tournament.current_round,
        pairings,
        completed_at: Utc::now(),
    });

    match winners.as_slice() {
        [champion] => {
            log::info!(
                "Tournament {} complete after {} round(s): {} is champion",
                tournament.id,
                tournament.current_round,
                champion.name
            );
            tournament.active_pairings = vec![Pairing::champion(champion.clone())];
            tournament.state = TournamentState::Complete;
        }
        _ => {
            tournament.current_round += 1;
            tournament.active_pairings = form_pairings(&winners);
            log::info!(
                "Tournament {} advanced to round {} ({} competitors left)",
                tournament.id,
                tournament.current_round,
                winners.len()
            );
        }
    }
    Ok(())
}
