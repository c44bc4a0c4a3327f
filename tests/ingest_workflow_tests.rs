mod utils;

use futures::future::join_all;
use std::sync::Arc;

use utils::{share_text, EventBuilder, TestSetup};
use wordcade::{
    Attempts, IgnoreReason, IngestOutcome, IngestService, LeaderboardMetric, ResolvedStreakEntry,
    ResultRepository,
};

#[tokio::test]
async fn share_is_recorded_once_and_resubmission_is_ignored() {
    let setup = TestSetup::new();
    let event = EventBuilder::player("player-1")
        .says("Wordle 1,234 3/6\n🟩🟨⬜⬜⬜\n⬜🟩🟩⬜⬜\n🟩🟩🟩🟩🟩");

    let first = setup.ingest.handle(&event).await.unwrap();
    let stored = match first {
        IngestOutcome::Recorded(stored) => stored,
        other => panic!("expected Recorded, got {:?}", other),
    };
    assert_eq!(stored.puzzle_number, 1234);
    assert_eq!(stored.attempts, Attempts::Solved(3));
    assert_eq!(stored.guess_grid.as_ref().unwrap().row_count(), 3);

    let second = setup.ingest.handle(&event).await.unwrap();
    assert!(matches!(
        second,
        IngestOutcome::Ignored(IgnoreReason::Duplicate)
    ));
}

#[tokio::test]
async fn stored_result_round_trips_byte_for_byte() {
    let setup = TestSetup::new();
    let text = share_text(500, 4);
    let event = EventBuilder::player("player-1").says(&text);

    let recorded = match setup.ingest.handle(&event).await.unwrap() {
        IngestOutcome::Recorded(stored) => stored,
        other => panic!("expected Recorded, got {:?}", other),
    };

    let history = setup
        .repository
        .history("player-1", Some("guild-1"))
        .await
        .unwrap();

    assert_eq!(history, vec![recorded]);
    assert_eq!(history[0].raw_text, text);
    assert_eq!(history[0].submitted_at, event.sent_at);
}

#[tokio::test]
async fn concurrent_resubmissions_record_exactly_once() {
    let setup = TestSetup::new();
    let ingest = Arc::new(IngestService::new(setup.repository.clone()));
    let event = EventBuilder::player("player-1").shares_win(800, 3);

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let ingest = Arc::clone(&ingest);
            let event = event.clone();
            tokio::spawn(async move { ingest.handle(&event).await.unwrap() })
        })
        .collect();

    let outcomes = join_all(tasks).await;
    let recorded = outcomes
        .into_iter()
        .filter(|outcome| outcome.as_ref().unwrap().is_recorded())
        .count();

    assert_eq!(recorded, 1);
    assert_eq!(setup.repository.result_count(), 1);
}

#[tokio::test]
async fn stats_follow_a_player_through_a_week() {
    let setup = TestSetup::new();
    let alice = EventBuilder::player("alice").named("Alice");

    setup.ingest.handle(&alice.shares_win(100, 3)).await.unwrap();
    setup.ingest.handle(&alice.shares_win(101, 2)).await.unwrap();
    setup.ingest.handle(&alice.shares_fail(102)).await.unwrap();
    setup.ingest.handle(&alice.shares_win(103, 5)).await.unwrap();

    let snapshot = setup
        .stats
        .player_stats("alice", Some("guild-1"))
        .await
        .unwrap();

    assert_eq!(snapshot.total_games, 4);
    assert_eq!(snapshot.wins, 3);
    assert_eq!(snapshot.fails, 1);
    assert_eq!(snapshot.best_streak, 2);
    assert_eq!(snapshot.current_streak, 1);
    assert_eq!(snapshot.mean_attempts, Some(10.0 / 3.0));
    // 4 + 5 - 5 + 2 under default scoring
    assert_eq!(snapshot.points, 6);

    let card = setup.stats.player_card("alice", None).await.unwrap();
    assert_eq!(card.display_name, "Alice");
    assert_eq!(card.total_puzzles, 4);
}

#[tokio::test]
async fn ordinary_chatter_is_ignored_without_side_effects() {
    let setup = TestSetup::new();
    let events = [
        EventBuilder::player("alice").says("morning all"),
        EventBuilder::player("bob").says("Wordle was hard today"),
        EventBuilder::player("cal").says("Wordle 0 3/6\n🟩🟩🟩🟩🟩"),
    ];

    for event in &events {
        let outcome = setup.ingest.handle(event).await.unwrap();
        assert!(matches!(
            outcome,
            IngestOutcome::Ignored(IgnoreReason::NotAResult)
        ));
    }

    assert_eq!(setup.repository.result_count(), 0);
}

#[tokio::test]
async fn batch_import_tallies_scanned_and_recorded() {
    let setup = TestSetup::new();
    let events = vec![
        EventBuilder::player("alice").shares_win(100, 3),
        EventBuilder::player("bob").shares_win(100, 4),
        EventBuilder::player("alice").shares_win(100, 3), // repost
        EventBuilder::player("cal").says("nice work everyone"),
    ];

    let summary = setup.ingest.import_batch(&events).await.unwrap();

    assert_eq!(summary.scanned, 4);
    assert_eq!(summary.recorded, 2);
}

#[tokio::test]
async fn streak_summary_defers_then_imports_after_resolution() {
    let setup = TestSetup::new();
    let summary_text = "Your group is on a 5 day streak!\n3/6: @alice\nX/6: @bob";
    let relay = EventBuilder::player("relay-bot").says(summary_text);

    let outcome = setup.ingest.handle(&relay).await.unwrap();
    assert!(matches!(
        outcome,
        IngestOutcome::Ignored(IgnoreReason::StreakNeedsResolution)
    ));

    // The collaborator resolves mentions and pins the puzzle number.
    let entries = vec![
        ResolvedStreakEntry {
            player_id: "alice".to_string(),
            display_name: "Alice".to_string(),
            attempts: Attempts::Solved(3),
        },
        ResolvedStreakEntry {
            player_id: "bob".to_string(),
            display_name: "Bob".to_string(),
            attempts: Attempts::Failed,
        },
    ];
    let outcomes = setup
        .ingest
        .import_streak("guild-1", 700, relay.sent_at, summary_text, &entries)
        .await
        .unwrap();
    assert!(outcomes.iter().all(IngestOutcome::is_recorded));

    let bob = setup
        .stats
        .player_stats("bob", Some("guild-1"))
        .await
        .unwrap();
    assert_eq!(bob.fails, 1);

    // Alice's own share of the same puzzle arriving later is a duplicate.
    let alice_share = EventBuilder::player("alice").shares_win(700, 3);
    let outcome = setup.ingest.handle(&alice_share).await.unwrap();
    assert!(matches!(
        outcome,
        IngestOutcome::Ignored(IgnoreReason::Duplicate)
    ));
}

#[tokio::test]
async fn leaderboard_ranks_guild_and_stays_deterministic() {
    let setup = TestSetup::new();
    let alice = EventBuilder::player("alice");
    let bob = EventBuilder::player("bob");
    let outsider = EventBuilder::player("outsider").in_guild("guild-2");

    // alice: 3 wins in a row; bob: two wins and a fail; outsider plays in
    // another guild.
    for (puzzle, attempts) in [(100, 3), (101, 4), (102, 2)] {
        setup
            .ingest
            .handle(&alice.shares_win(puzzle, attempts))
            .await
            .unwrap();
    }
    setup.ingest.handle(&bob.shares_win(100, 2)).await.unwrap();
    setup.ingest.handle(&bob.shares_win(101, 2)).await.unwrap();
    setup.ingest.handle(&bob.shares_fail(102)).await.unwrap();
    setup
        .ingest
        .handle(&outsider.shares_win(100, 1))
        .await
        .unwrap();

    let by_streak = setup
        .leaderboard
        .rank("guild-1", LeaderboardMetric::CurrentStreak, 10)
        .await
        .unwrap();
    let order: Vec<&str> = by_streak.rows.iter().map(|r| r.player_id.as_str()).collect();
    assert_eq!(order, vec!["alice", "bob"]);

    let by_mean = setup
        .leaderboard
        .rank("guild-1", LeaderboardMetric::MeanAttempts, 10)
        .await
        .unwrap();
    let order: Vec<&str> = by_mean.rows.iter().map(|r| r.player_id.as_str()).collect();
    // bob mean 2.0 beats alice mean 3.0
    assert_eq!(order, vec!["bob", "alice"]);

    let rerun = setup
        .leaderboard
        .rank("guild-1", LeaderboardMetric::MeanAttempts, 10)
        .await
        .unwrap();
    let rerun_order: Vec<&str> = rerun.rows.iter().map(|r| r.player_id.as_str()).collect();
    assert_eq!(order, rerun_order);
}

#[tokio::test]
async fn cross_guild_play_keeps_guilds_isolated() {
    let setup = TestSetup::new();
    let home = EventBuilder::player("alice");
    let away = EventBuilder::player("alice").in_guild("guild-2");

    setup.ingest.handle(&home.shares_win(100, 3)).await.unwrap();
    setup.ingest.handle(&away.shares_win(100, 3)).await.unwrap();
    setup.ingest.handle(&away.shares_win(101, 4)).await.unwrap();

    let home_stats = setup
        .stats
        .player_stats("alice", Some("guild-1"))
        .await
        .unwrap();
    assert_eq!(home_stats.total_games, 1);

    let everywhere = setup.stats.player_stats("alice", None).await.unwrap();
    assert_eq!(everywhere.total_games, 3);

    let members = setup.repository.members("guild-2").await.unwrap();
    assert_eq!(members, vec!["alice".to_string()]);
}
