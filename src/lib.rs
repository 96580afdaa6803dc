//! Knockout tournament organizer: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance_round, form_pairings, import_roster, read_roster_csv, report_result, start_tournament,
    write_history_csv,
};
pub use models::{
    parse_name, parse_rating, Competitor, CompetitorId, CompetitorView, ErrorKind, Pairing,
    PairingId, PairingView, RatingBand, RoundRecord, RoundView, Roster, Tournament,
    TournamentError, TournamentId, TournamentState, TournamentView, MIN_COMPETITORS,
};
