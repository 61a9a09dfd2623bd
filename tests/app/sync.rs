use std::sync::Arc;

use app::persistence::games::{NewGame, create_game, delete_round_games, get_round_games};
use app::persistence::rounds::{count_round_games, get_round, upsert_round};
use app::persistence::tournaments::{get_tournament, upsert_tournament};
use app::sync::{ImportPolicy, PassOutcome, SyncReport};
use models::domains::sea_orm_active_enums::ImportStatus;
use tokio::sync::Notify;

use super::fake_source::{FakeSource, at, batch, game_pgn, round, tour};
use super::synchronizer;

fn completed(outcome: PassOutcome) -> SyncReport {
    match outcome {
        PassOutcome::Completed(report) => report,
        other => panic!("expected a completed pass, got {other:?}"),
    }
}

#[tokio::test]
async fn repeated_pass_with_identical_upstream_writes_nothing() {
    let source = FakeSource::new();
    source.put_tour(tour("t1"), vec![round("r1", true), round("r2", false)]);
    source.put_pgn(
        "r1",
        batch(&[game_pgn("Alpha", "Beta", "1.1"), game_pgn("Gamma", "Delta", "1.2")]),
    );
    let (sync, conn) = synchronizer(&source, ImportPolicy::AtMostOnce).await;

    let first = completed(sync.run_pass().await);
    assert_eq!(first.tournaments_written, 1);
    assert_eq!(first.rounds_written, 1);
    assert_eq!(first.rounds_skipped, 1);
    assert_eq!(first.games_created, 2);

    let second = completed(sync.run_pass().await);
    assert_eq!(second.writes(), 0);
    assert_eq!(second.rounds_imported, 0);
    assert_eq!(source.pgn_fetches("r1"), 1);
    assert_eq!(count_round_games(&conn, "r1").await.unwrap(), 2);
}

#[tokio::test]
async fn stored_fields_match_upstream_after_first_pass() {
    let source = FakeSource::new();
    let upstream_tour = tour("t1");
    let upstream_round = round("r1", true);
    source.put_tour(upstream_tour.clone(), vec![upstream_round.clone()]);
    source.put_pgn("r1", game_pgn("Alpha", "Beta", "1.1"));
    let (sync, conn) = synchronizer(&source, ImportPolicy::AtMostOnce).await;

    completed(sync.run_pass().await);

    let stored = get_tournament(&conn, "t1").await.unwrap().unwrap();
    assert_eq!(stored.name, upstream_tour.name);
    assert_eq!(stored.tier, Some(4));
    assert_eq!(stored.info, upstream_tour.info);
    assert_eq!(stored.dates, upstream_tour.dates);
    assert_eq!(stored.created_at, upstream_tour.created_at);

    let stored = get_round(&conn, "r1").await.unwrap().unwrap();
    assert_eq!(stored.tournament_id, "t1");
    assert!(stored.finished);
    assert_eq!(stored.finished_at, upstream_round.finished_at);
    assert_eq!(stored.starts_at, upstream_round.starts_at);

    let games = get_round_games(&conn, "r1").await.unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].white, "Alpha");
    assert_eq!(games[0].black, "Beta");
    assert_eq!(games[0].result, "1/2-1/2");
    assert_eq!(games[0].white_elo, Some(2700));
    assert_eq!(games[0].eco.as_deref(), Some("D37"));
    assert!(games[0].pgn.starts_with("[Event \"Test Open\"]"));
}

#[tokio::test]
async fn unfinished_round_is_never_stored() {
    let source = FakeSource::new();
    let mut unfinished = round("r1", false);
    unfinished.finished_at = Some(at(1_700_300_000_000));
    source.put_tour(tour("t1"), vec![unfinished]);
    source.put_pgn("r1", game_pgn("Alpha", "Beta", "1.1"));
    let (sync, conn) = synchronizer(&source, ImportPolicy::AtMostOnce).await;

    let report = completed(sync.run_pass().await);
    completed(sync.run_pass().await);

    assert_eq!(report.rounds_written, 0);
    assert_eq!(report.rounds_skipped, 1);
    assert!(get_round(&conn, "r1").await.unwrap().is_none());
    assert_eq!(count_round_games(&conn, "r1").await.unwrap(), 0);
    assert_eq!(source.pgn_fetches("r1"), 0);
}

#[tokio::test]
async fn round_is_written_and_imported_once_when_it_finishes() {
    let source = FakeSource::new();
    source.put_tour(tour("t1"), vec![round("r1", false)]);
    source.put_pgn("r1", game_pgn("Alpha", "Beta", "1.1"));
    let (sync, conn) = synchronizer(&source, ImportPolicy::AtMostOnce).await;

    let before = completed(sync.run_pass().await);
    assert_eq!(before.rounds_written, 0);

    source.put_tour(tour("t1"), vec![round("r1", true)]);
    let transition = completed(sync.run_pass().await);
    assert_eq!(transition.rounds_written, 1);
    assert_eq!(transition.rounds_imported, 1);
    assert_eq!(transition.games_created, 1);

    let after = completed(sync.run_pass().await);
    assert_eq!(after.writes(), 0);
    assert_eq!(source.pgn_fetches("r1"), 1);
    assert_eq!(count_round_games(&conn, "r1").await.unwrap(), 1);
}

#[tokio::test]
async fn duplicate_pairings_produce_a_single_game() {
    let source = FakeSource::new();
    source.put_tour(tour("t1"), vec![round("r1", true)]);
    source.put_pgn(
        "r1",
        batch(&[
            game_pgn("Alpha", "Beta", "1.1"),
            game_pgn("Alpha", "Beta", "1.1"),
            game_pgn("Beta", "Alpha", "1.1"),
        ]),
    );
    let (sync, conn) = synchronizer(&source, ImportPolicy::AtMostOnce).await;

    let first = completed(sync.run_pass().await);
    completed(sync.run_pass().await);

    assert_eq!(first.games_created, 2);
    assert_eq!(first.games_duplicate, 1);
    assert_eq!(count_round_games(&conn, "r1").await.unwrap(), 2);
}

#[tokio::test]
async fn changed_tournament_is_rewritten_but_drift_outside_compared_fields_is_not() {
    let source = FakeSource::new();
    source.put_tour(tour("t1"), vec![]);
    let (sync, conn) = synchronizer(&source, ImportPolicy::AtMostOnce).await;
    completed(sync.run_pass().await);

    let mut drifted = tour("t1");
    drifted.image = Some("https://example.org/banner.png".into());
    source.put_tour(drifted.clone(), vec![]);
    let report = completed(sync.run_pass().await);
    assert_eq!(report.tournaments_written, 0);
    assert_eq!(get_tournament(&conn, "t1").await.unwrap().unwrap().image, None);

    let mut renamed = drifted;
    renamed.name = "Renamed Open".into();
    source.put_tour(renamed, vec![]);
    let report = completed(sync.run_pass().await);
    assert_eq!(report.tournaments_written, 1);

    let stored = get_tournament(&conn, "t1").await.unwrap().unwrap();
    assert_eq!(stored.name, "Renamed Open");
    assert_eq!(stored.image.as_deref(), Some("https://example.org/banner.png"));
}

#[tokio::test]
async fn upstream_failure_aborts_the_rest_of_the_pass() {
    let source = FakeSource::new();
    source.put_tour(tour("t1"), vec![round("r1", true)]);
    source.put_tour(tour("t2"), vec![round("r2", true)]);
    source.fail_detail("t1", true);
    let (sync, conn) = synchronizer(&source, ImportPolicy::AtMostOnce).await;

    assert_eq!(sync.run_pass().await, PassOutcome::Failed);
    // Written before the failing fetch, so it stays.
    assert!(get_tournament(&conn, "t1").await.unwrap().is_some());
    assert!(get_round(&conn, "r1").await.unwrap().is_none());
    assert!(get_tournament(&conn, "t2").await.unwrap().is_none());
    assert!(!sync.is_running());

    source.fail_detail("t1", false);
    let report = completed(sync.run_pass().await);
    assert_eq!(report.tournaments_written, 1);
    assert_eq!(report.rounds_written, 2);
    assert!(get_round(&conn, "r2").await.unwrap().is_some());
}

/// Seeds a finished round holding one of its games, as left behind by an
/// import that died after the first insert.
async fn seed_partial_import(conn: &sea_orm::DatabaseConnection) {
    upsert_tournament(conn, &tour("t1")).await.unwrap();
    upsert_round(conn, "t1", &round("r1", true)).await.unwrap();
    create_game(
        conn,
        NewGame {
            round_id: "r1".into(),
            event: "Test Open".into(),
            site: "Somewhere".into(),
            date: "2024.05.01".into(),
            round: "1.1".into(),
            white: "Alpha".into(),
            black: "Beta".into(),
            result: "1/2-1/2".into(),
            white_team: None,
            black_team: None,
            white_fide_id: None,
            black_fide_id: None,
            white_title: None,
            black_title: None,
            white_elo: Some(2700),
            black_elo: Some(2650),
            variant: None,
            eco: Some("D37".into()),
            opening: None,
            pgn: game_pgn("Alpha", "Beta", "1.1"),
        },
    )
    .await
    .unwrap();
}

fn three_game_round(source: &FakeSource) {
    source.put_tour(tour("t1"), vec![round("r1", true)]);
    source.put_pgn(
        "r1",
        batch(&[
            game_pgn("Alpha", "Beta", "1.1"),
            game_pgn("Gamma", "Delta", "1.2"),
            game_pgn("Epsilon", "Zeta", "1.3"),
        ]),
    );
}

#[tokio::test]
async fn partial_import_is_left_alone_under_at_most_once() {
    let source = FakeSource::new();
    three_game_round(&source);
    let (sync, conn) = synchronizer(&source, ImportPolicy::AtMostOnce).await;
    seed_partial_import(&conn).await;

    let report = completed(sync.run_pass().await);

    assert_eq!(report.rounds_imported, 0);
    assert_eq!(source.pgn_fetches("r1"), 0);
    assert_eq!(count_round_games(&conn, "r1").await.unwrap(), 1);
}

#[tokio::test]
async fn partial_import_is_finished_under_until_complete() {
    let source = FakeSource::new();
    three_game_round(&source);
    let (sync, conn) = synchronizer(&source, ImportPolicy::UntilComplete).await;
    seed_partial_import(&conn).await;

    let report = completed(sync.run_pass().await);
    assert_eq!(report.games_created, 2);
    assert_eq!(report.games_duplicate, 1);
    assert_eq!(count_round_games(&conn, "r1").await.unwrap(), 3);
    assert_eq!(
        get_round(&conn, "r1").await.unwrap().unwrap().import_status,
        ImportStatus::Complete
    );

    completed(sync.run_pass().await);
    assert_eq!(source.pgn_fetches("r1"), 1);
}

#[tokio::test]
async fn failed_import_is_retried_under_until_complete() {
    let source = FakeSource::new();
    three_game_round(&source);
    source.fail_pgn("r1", true);
    let (sync, conn) = synchronizer(&source, ImportPolicy::UntilComplete).await;

    assert_eq!(sync.run_pass().await, PassOutcome::Failed);
    assert_eq!(
        get_round(&conn, "r1").await.unwrap().unwrap().import_status,
        ImportStatus::InProgress
    );

    source.fail_pgn("r1", false);
    let report = completed(sync.run_pass().await);
    assert_eq!(report.rounds_written, 0);
    assert_eq!(report.games_created, 3);
    assert_eq!(source.pgn_fetches("r1"), 2);
}

#[tokio::test]
async fn failed_import_is_not_retried_under_at_most_once() {
    let source = FakeSource::new();
    three_game_round(&source);
    source.fail_pgn("r1", true);
    let (sync, conn) = synchronizer(&source, ImportPolicy::AtMostOnce).await;

    assert_eq!(sync.run_pass().await, PassOutcome::Failed);
    assert!(get_round(&conn, "r1").await.unwrap().is_some());

    source.fail_pgn("r1", false);
    let report = completed(sync.run_pass().await);
    assert_eq!(report.writes(), 0);
    assert_eq!(report.rounds_imported, 0);
    assert_eq!(count_round_games(&conn, "r1").await.unwrap(), 0);
    assert_eq!(source.pgn_fetches("r1"), 1);
}

#[tokio::test]
async fn empty_export_is_fetched_once_under_at_most_once() {
    let source = FakeSource::new();
    source.put_tour(tour("t1"), vec![round("r1", true)]);
    source.put_pgn("r1", String::new());
    let (sync, conn) = synchronizer(&source, ImportPolicy::AtMostOnce).await;

    for _ in 0..3 {
        completed(sync.run_pass().await);
    }

    assert_eq!(source.pgn_fetches("r1"), 1);
    assert_eq!(count_round_games(&conn, "r1").await.unwrap(), 0);
}

#[tokio::test]
async fn deleted_games_stay_deleted_under_at_most_once() {
    let source = FakeSource::new();
    three_game_round(&source);
    let (sync, conn) = synchronizer(&source, ImportPolicy::AtMostOnce).await;

    completed(sync.run_pass().await);
    assert_eq!(delete_round_games(&conn, "r1").await.unwrap(), 3);

    let report = completed(sync.run_pass().await);
    assert_eq!(report.games_created, 0);
    assert_eq!(count_round_games(&conn, "r1").await.unwrap(), 0);
    assert_eq!(source.pgn_fetches("r1"), 1);
}

#[tokio::test]
async fn overlapping_pass_is_skipped() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let source = FakeSource::held(entered.clone(), release.clone());
    source.put_tour(tour("t1"), vec![]);
    let (sync, _conn) = synchronizer(&source, ImportPolicy::AtMostOnce).await;

    let first = tokio::spawn({
        let sync = sync.clone();
        async move { sync.run_pass().await }
    });
    entered.notified().await;

    assert!(sync.is_running());
    assert_eq!(sync.run_pass().await, PassOutcome::Skipped);

    release.notify_one();
    let outcome = first.await.unwrap();
    assert_eq!(completed(outcome).tournaments_written, 1);
    assert!(!sync.is_running());
    assert_eq!(source.list_calls(), 1);
}

#[tokio::test]
async fn stages_run_independently() {
    let source = FakeSource::new();
    source.put_pgn("r9", game_pgn("Alpha", "Beta", "9.1"));
    let (sync, conn) = synchronizer(&source, ImportPolicy::AtMostOnce).await;

    let mut report = SyncReport::default();
    sync.sync_tournament(&tour("t9"), &mut report).await.unwrap_err();
    assert_eq!(report.tournaments_written, 1);

    let mut report = SyncReport::default();
    sync.sync_round("t9", &round("r9", true), &mut report)
        .await
        .unwrap();
    assert_eq!(report.rounds_written, 1);
    assert_eq!(report.games_created, 1);
    assert_eq!(count_round_games(&conn, "r9").await.unwrap(), 1);
}
