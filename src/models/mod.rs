//! Data structures for the knockout tournament: competitors, roster, pairings, tournament state.

mod competitor;
mod pairing;
mod roster;
mod tournament;
mod view;

pub use competitor::{Competitor, CompetitorId, RatingBand};
pub use pairing::{Pairing, PairingId, RoundRecord};
pub use roster::{parse_name, parse_rating, Roster};
pub use tournament::{
    ErrorKind, Tournament, TournamentError, TournamentId, TournamentState, MIN_COMPETITORS,
};
pub use view::{CompetitorView, PairingView, RoundView, TournamentView};
