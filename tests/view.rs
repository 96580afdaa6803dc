//! Integration tests for the display view: derived values reach the serialized output.

use knockout_tournament::{
    advance_round, report_result, start_tournament, RatingBand, Tournament, TournamentState,
};

fn three_player_tournament() -> Tournament {
    let mut t = Tournament::new();
    t.add_competitor("Magnus", "2850").unwrap();
    t.add_competitor("Hikaru", "2700").unwrap();
    t.add_competitor("Levon", "2450").unwrap();
    t
}

#[test]
fn competitor_json_carries_rating_band() {
    let t = three_player_tournament();
    let json = serde_json::to_value(t.view()).unwrap();
    let competitors = json["competitors"].as_array().unwrap();
    assert_eq!(competitors.len(), 3);
    assert_eq!(competitors[0]["name"], "Magnus");
    assert_eq!(competitors[0]["rating_band"], "super_grandmaster");
    assert_eq!(competitors[1]["rating_band"], "elite_grandmaster");
    assert_eq!(competitors[2]["rating_band"], "club");
    assert_eq!(json["started"], false);
    assert_eq!(json["state"], "not_started");
}

#[test]
fn pairing_json_carries_gap_and_outcome() {
    let mut t = three_player_tournament();
    start_tournament(&mut t).unwrap();
    let json = serde_json::to_value(t.view()).unwrap();
    let pairings = json["active_pairings"].as_array().unwrap();

    assert_eq!(pairings[0]["rating_difference"], 150);
    assert_eq!(pairings[0]["outcome"], "Magnus vs Hikaru (pending)");
    assert!(pairings[0]["loser"].is_null());
    assert_eq!(pairings[0]["competitor_b"]["rating_band"], "elite_grandmaster");

    assert_eq!(pairings[1]["bye"], true);
    assert!(pairings[1]["rating_difference"].is_null());
    assert!(pairings[1]["competitor_b"].is_null());
    assert_eq!(pairings[1]["outcome"], "Levon received a bye");
}

#[test]
fn view_tracks_history_and_champion() {
    let mut t = three_player_tournament();
    start_tournament(&mut t).unwrap();
    let first = t.active_pairings[0].clone();
    let hikaru = first.competitor_b.as_ref().unwrap().id;
    report_result(&mut t, first.id, hikaru).unwrap();

    let view = t.view();
    assert!(view.all_decided);
    assert_eq!(view.active_pairings[0].loser, Some(first.competitor_a.id));
    assert_eq!(view.active_pairings[0].outcome, "Hikaru defeated Magnus");

    advance_round(&mut t).unwrap();
    let final_match = t.active_pairings[0].clone();
    report_result(&mut t, final_match.id, final_match.competitor_a.id).unwrap();
    advance_round(&mut t).unwrap();

    let view = t.view();
    assert_eq!(view.state, TournamentState::Complete);
    assert!(view.champion_decided);
    let champion = view.champion.as_ref().unwrap();
    assert_eq!(champion.name, "Hikaru");
    assert_eq!(champion.rating_band, RatingBand::EliteGrandmaster);
    assert_eq!(view.history.len(), 2);
    assert_eq!(view.history[0].round, 1);
    assert_eq!(view.history[0].pairings[0].outcome, "Hikaru defeated Magnus");
    assert_eq!(view.history[0].pairings[1].outcome, "Levon received a bye");
    assert_eq!(view.history[1].pairings[0].outcome, "Hikaru defeated Levon");
}
