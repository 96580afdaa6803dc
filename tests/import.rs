//! Integration tests for CSV roster import and history export.

use knockout_tournament::{
    advance_round, import_roster, read_roster_csv, report_result, start_tournament, Tournament,
    TournamentError,
};

const ROSTER: &str = "name,rating\nAlice, 2100\n  Bob ,1950\nCara,1800\n";

#[test]
fn reads_rows_in_order() {
    let competitors = read_roster_csv(ROSTER.as_bytes()).unwrap();
    let got: Vec<(&str, i32)> = competitors.iter().map(|c| (c.name.as_str(), c.rating)).collect();
    assert_eq!(got, vec![("Alice", 2100), ("Bob", 1950), ("Cara", 1800)]);
}

#[test]
fn bad_row_rejects_whole_import() {
    let mut t = Tournament::new();
    t.add_competitor("Existing", "1500").unwrap();
    let csv = "name,rating\nAlice,2100\nBob,strong\n";
    match import_roster(&mut t, csv.as_bytes()) {
        Err(TournamentError::InvalidImport(msg)) => assert!(msg.starts_with("line 3"), "{msg}"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(t.roster.len(), 1);

    let csv = "name,rating\n,2100\n";
    assert!(matches!(
        import_roster(&mut t, csv.as_bytes()),
        Err(TournamentError::InvalidImport(_))
    ));
    assert_eq!(t.roster.len(), 1);
}

#[test]
fn import_appends_and_is_blocked_after_start() {
    let mut t = Tournament::new();
    assert_eq!(import_roster(&mut t, ROSTER.as_bytes()).unwrap(), 3);
    assert_eq!(t.roster.len(), 3);

    start_tournament(&mut t).unwrap();
    assert_eq!(
        import_roster(&mut t, ROSTER.as_bytes()),
        Err(TournamentError::AlreadyStarted)
    );
    assert_eq!(t.roster.len(), 3);
}

#[test]
fn history_export_lists_each_pairing() {
    let mut t = Tournament::new();
    import_roster(&mut t, ROSTER.as_bytes()).unwrap();
    start_tournament(&mut t).unwrap();
    let first = t.active_pairings[0].clone();
    let bob = first.competitor_b.as_ref().unwrap().id;
    report_result(&mut t, first.id, bob).unwrap();
    advance_round(&mut t).unwrap();

    let mut out = Vec::new();
    knockout_tournament::write_history_csv(&t, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "round,competitor_a,competitor_b,winner,bye\n\
         1,Alice,Bob,Bob,false\n\
         1,Cara,,Cara,true\n"
    );
}

#[test]
fn empty_history_exports_header_only() {
    let t = Tournament::new();
    let mut out = Vec::new();
    knockout_tournament::write_history_csv(&t, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "round,competitor_a,competitor_b,winner,bye\n");
}
