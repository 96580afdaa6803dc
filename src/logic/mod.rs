//! Tournament business logic: setup, pairing, rounds, roster import/export.

mod import;
mod pairing;
mod rounds;
mod setup;

pub use import::{import_roster, read_roster_csv, write_history_csv};
pub use pairing::form_pairings;
pub use rounds::{advance_round, report_result};
pub use setup::start_tournament;
