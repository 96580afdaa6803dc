//! CSV roster import (`name,rating`) and round history export.

use crate::models::{parse_name, parse_rating, Competitor, Tournament, TournamentError};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Deserialize)]
struct RosterRow {
    name: String,
    rating: String,
}

#[derive(Serialize)]
struct HistoryRow<'a> {
    round: u32,
    competitor_a: &'a str,
    competitor_b: &'a str,
    winner: &'a str,
    bye: bool,
}

/// Parse a roster CSV with a `name,rating` header. Any bad row fails the whole file.
pub fn read_roster_csv<R: Read>(reader: R) -> Result<Vec<Competitor>, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut competitors = Vec::new();
    for (i, row) in rdr.deserialize::<RosterRow>().enumerate() {
        // header is line 1
        let line = i + 2;
        let row = row.map_err(|e| TournamentError::InvalidImport(format!("line {}: {}", line, e)))?;
        let name = parse_name(&row.name)
            .map_err(|e| TournamentError::InvalidImport(format!("line {}: {}", line, e)))?;
        let rating = parse_rating(&row.rating)
            .map_err(|e| TournamentError::InvalidImport(format!("line {}: {}", line, e)))?;
        competitors.push(Competitor::new(name, rating));
    }
    Ok(competitors)
}

/// Register every competitor from a roster CSV (only before start). Nothing is added on error.
pub fn import_roster<R: Read>(tournament: &mut Tournament, reader: R) -> Result<usize, TournamentError> {
    if tournament.is_started() {
        return Err(TournamentError::AlreadyStarted);
    }
    let competitors = read_roster_csv(reader)?;
    let count = competitors.len();
    tournament.roster.extend(competitors);
    log::info!("Imported {} competitor(s) into tournament {}", count, tournament.id);
    Ok(count)
}

/// Write every completed round as CSV, one pairing per line.
pub fn write_history_csv<W: Write>(tournament: &Tournament, writer: W) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(["round", "competitor_a", "competitor_b", "winner", "bye"])?;
    for record in &tournament.history {
        for p in &record.pairings {
            wtr.serialize(HistoryRow {
                round: record.round,
                competitor_a: &p.competitor_a.name,
                competitor_b: p.competitor_b.as_ref().map_or("", |b| b.name.as_str()),
                winner: p.winner_competitor().map_or("", |w| w.name.as_str()),
                bye: p.bye,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}
