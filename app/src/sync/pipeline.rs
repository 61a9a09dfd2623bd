use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use sea_orm::DatabaseConnection;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use models::domains::{rounds, sea_orm_active_enums::ImportStatus};
use models::schemas::broadcast::{BroadcastRound, BroadcastTour};

use super::{BroadcastSource, ChangeDetector, ImportPolicy};
use crate::error::SyncError;
use crate::persistence::games::{NewGame, create_game, find_game};
use crate::persistence::rounds::{count_round_games, get_round, set_import_status, upsert_round};
use crate::persistence::tournaments::{get_tournament, upsert_tournament};
use crate::pgn::{PgnRecord, parse_batch};

/// PGN placeholder for an unknown tag value.
const UNKNOWN: &str = "?";
/// PGN placeholder for a game without a result.
const NO_RESULT: &str = "*";

/// What a completed pass wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub tournaments_written: u64,
    pub rounds_written: u64,
    pub rounds_skipped: u64,
    pub rounds_imported: u64,
    pub games_created: u64,
    pub games_duplicate: u64,
}

impl SyncReport {
    pub fn writes(&self) -> u64 {
        self.tournaments_written + self.rounds_written + self.games_created
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    Completed(SyncReport),
    /// The pass hit an error and stopped; whatever it wrote before stays.
    Failed,
    /// Another pass was still running.
    Skipped,
}

/// Releases the run-lock when the pass ends, however it ends.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Fetches upstream state and persists it, one tournament, round and game
/// at a time.
pub struct Synchronizer<S> {
    source: Arc<S>,
    conn: DatabaseConnection,
    policy: ImportPolicy,
    running: AtomicBool,
}

impl<S: BroadcastSource + Send + Sync> Synchronizer<S> {
    pub fn new(source: Arc<S>, conn: DatabaseConnection, policy: ImportPolicy) -> Self {
        Self {
            source,
            conn,
            policy,
            running: AtomicBool::new(false),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn try_lock(&self) -> Option<RunGuard<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunGuard(&self.running))
    }

    /// Runs one full pass. Errors are logged and swallowed; a pass requested
    /// while another is in flight does nothing.
    pub async fn run_pass(&self) -> PassOutcome {
        let Some(_guard) = self.try_lock() else {
            warn!("Previous sync pass still running, skipping this one");
            return PassOutcome::Skipped;
        };

        info!(policy = %self.policy, "Fetching broadcasts...");
        let started = Instant::now();

        match self.sync_tournaments().await {
            Ok(report) => {
                info!(
                    tournaments_written = report.tournaments_written,
                    rounds_written = report.rounds_written,
                    rounds_skipped = report.rounds_skipped,
                    rounds_imported = report.rounds_imported,
                    games_created = report.games_created,
                    games_duplicate = report.games_duplicate,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Finished fetching and storing broadcasts"
                );
                PassOutcome::Completed(report)
            }
            Err(e) => {
                error!("Error fetching broadcasts: {}", e);
                PassOutcome::Failed
            }
        }
    }

    /// Stage one: every active tournament, in upstream order.
    pub async fn sync_tournaments(&self) -> Result<SyncReport, SyncError> {
        let mut report = SyncReport::default();

        let tours = self.source.active_tournaments().await?;
        debug!("{} active tournaments", tours.len());

        for tour in &tours {
            self.sync_tournament(tour, &mut report).await?;
        }

        Ok(report)
    }

    /// Stage two: one tournament and all of its rounds.
    pub async fn sync_tournament(
        &self,
        tour: &BroadcastTour,
        report: &mut SyncReport,
    ) -> Result<(), SyncError> {
        let stored = get_tournament(&self.conn, &tour.id).await?;

        if tour.needs_write(stored.as_ref()) {
            upsert_tournament(&self.conn, tour).await?;
            report.tournaments_written += 1;
            info!(tournament_id = %tour.id, "Stored tournament {}", tour.name);
        } else {
            debug!(tournament_id = %tour.id, "Tournament unchanged");
        }

        let detail = self.source.tournament_detail(&tour.id).await?;
        for round in &detail.rounds {
            self.sync_round(&tour.id, round, report).await?;
        }

        Ok(())
    }

    /// Stage three: one round and, if its gate opens, its games.
    /// Unfinished rounds are neither stored nor imported.
    pub async fn sync_round(
        &self,
        tournament_id: &str,
        round: &BroadcastRound,
        report: &mut SyncReport,
    ) -> Result<(), SyncError> {
        if !round.finished {
            info!("Skipping round {} as it's not finished yet", round.id);
            report.rounds_skipped += 1;
            return Ok(());
        }

        let stored = get_round(&self.conn, &round.id).await?;

        let written = round.needs_write(stored.as_ref());
        if written {
            upsert_round(&self.conn, tournament_id, round).await?;
            report.rounds_written += 1;
            info!(tournament_id, round_id = %round.id, "Stored round {}", round.name);
        } else {
            debug!(round_id = %round.id, "Round unchanged");
        }

        if self.should_import(written, stored.as_ref()).await? {
            self.import_round_games(&round.id, report).await?;
        }

        Ok(())
    }

    /// Import gate for a finished round, given whether this pass wrote it and
    /// what was stored before.
    ///
    /// Under `AtMostOnce` an unchanged round is never fetched again, so an
    /// empty export or a manual deletion of its games sticks.
    async fn should_import(
        &self,
        written: bool,
        stored: Option<&rounds::Model>,
    ) -> Result<bool, SyncError> {
        match (self.policy, stored) {
            (ImportPolicy::AtMostOnce, _) if !written => Ok(false),
            (_, None) => Ok(true),
            (ImportPolicy::AtMostOnce, Some(stored)) => {
                Ok(count_round_games(&self.conn, &stored.id).await? == 0)
            }
            (ImportPolicy::UntilComplete, Some(stored)) => {
                Ok(stored.import_status != ImportStatus::Complete)
            }
        }
    }

    /// Fetches the round's PGN export and stores every game not already
    /// present under the same pairing key.
    pub async fn import_round_games(
        &self,
        round_id: &str,
        report: &mut SyncReport,
    ) -> Result<(), SyncError> {
        info!("Fetching PGNs for round {}", round_id);

        let tracked = self.policy == ImportPolicy::UntilComplete;
        if tracked {
            set_import_status(&self.conn, round_id, ImportStatus::InProgress).await?;
        }

        let batch = self.source.round_pgn(round_id).await?;

        for record in parse_batch(&batch) {
            let game = new_game(round_id, &record);

            if find_game(&self.conn, game.key()).await?.is_some() {
                debug!(round_id, "Game {} vs {} already stored", game.white, game.black);
                report.games_duplicate += 1;
                continue;
            }

            info!("Storing new game: {} vs {}", game.white, game.black);
            create_game(&self.conn, game).await?;
            report.games_created += 1;
        }

        if tracked {
            set_import_status(&self.conn, round_id, ImportStatus::Complete).await?;
        }
        report.rounds_imported += 1;

        Ok(())
    }
}

fn new_game(round_id: &str, record: &PgnRecord) -> NewGame {
    let tag = |name: &str| record.tag(name).map(str::to_string);
    let tag_or = |name: &str, default: &str| tag(name).unwrap_or_else(|| default.to_string());
    let rating = |name: &str| record.tag(name).and_then(|v| v.trim().parse::<i32>().ok());

    NewGame {
        round_id: round_id.to_string(),
        event: tag_or("Event", UNKNOWN),
        site: tag_or("Site", UNKNOWN),
        date: tag_or("Date", UNKNOWN),
        round: tag_or("Round", UNKNOWN),
        white: tag_or("White", UNKNOWN),
        black: tag_or("Black", UNKNOWN),
        result: tag_or("Result", NO_RESULT),
        white_team: tag("WhiteTeam"),
        black_team: tag("BlackTeam"),
        white_fide_id: tag("WhiteFideId"),
        black_fide_id: tag("BlackFideId"),
        white_title: tag("WhiteTitle"),
        black_title: tag("BlackTitle"),
        white_elo: rating("WhiteElo"),
        black_elo: rating("BlackElo"),
        variant: tag("Variant"),
        eco: tag("ECO"),
        opening: tag("Opening"),
        pgn: record.text.clone(),
    }
}
