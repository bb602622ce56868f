//! Unit tests for round scoring pipelines and normalization

use crate::*;
use std::time::Duration;

/// Helper to build a player's score history in a fresh store
async fn store_with(player: &str, entries: &[(&str, f64)]) -> MemoryScoreStore {
    let store = MemoryScoreStore::new();
    for (item, score) in entries {
        store.set_score(player, item, *score).await;
    }
    store
}

fn scores(entries: &[(&str, f64)]) -> ScoreMap {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

/// Custom plugin: flat bonus for every appearance as winner
struct WinCounter(f64);

impl WeightPlugin for WinCounter {
    fn name(&self) -> &'static str {
        "win_counter"
    }

    fn apply(&self, mut scores: ScoreMap, choices: &[Choice]) -> Result<ScoreMap> {
        for choice in choices {
            *scores.entry(choice.picked.id.clone()).or_insert(0.0) += self.0;
        }
        Ok(scores)
    }
}

/// Custom plugin that always rejects the round
struct Rejecting;

impl WeightPlugin for Rejecting {
    fn name(&self) -> &'static str {
        "rejecting"
    }

    fn apply(&self, _scores: ScoreMap, _choices: &[Choice]) -> Result<ScoreMap> {
        Err(ScoringError::EmptyRound)
    }
}

#[test]
fn test_pipeline_order_is_significant() {
    let choices = vec![Choice::between("a", "b").with_delta(10.0)];

    let gladiator_first = RoundProcessor::default()
        .with_plugin(GladiatorPlugin::default())
        .with_plugin(DeltaPlugin::default())
        .process(&choices)
        .unwrap();
    let delta_first = RoundProcessor::default()
        .with_plugin(DeltaPlugin::default())
        .with_plugin(GladiatorPlugin::default())
        .process(&choices)
        .unwrap();

    assert_eq!(gladiator_first, scores(&[("a", 10_010.0), ("b", 2_010.0)]));
    // winner absorbs the 10 the loser picked up from the delta plugin
    assert_eq!(delta_first, scores(&[("a", 10_020.0), ("b", 2_010.0)]));
    assert_ne!(gladiator_first, delta_first);
}

#[test]
fn test_custom_plugin_in_pipeline() {
    let processor = RoundProcessor::new(vec![
        Box::new(WinCounter(1.0)),
        Box::new(GladiatorPlugin::new(GladiatorOptions {
            winner_bonus: 0.0,
            loser_bonus: 0.0,
            absorb_loser: true,
        })),
    ]);

    let result = processor
        .process(&[Choice::between("a", "b"), Choice::between("b", "c")])
        .unwrap();

    // b: won once (1), then absorbs c (0); a: won once (1), absorbs b's 1
    assert_eq!(result, scores(&[("a", 2.0), ("b", 1.0), ("c", 0.0)]));
}

#[test]
fn test_related_failure_aborts_round() {
    let processor = RoundProcessor::default()
        .with_plugin(GladiatorPlugin::default())
        .with_plugin(RelatedPlugin::default());

    let result = processor.process(&[Choice::between("a", "b")]);
    assert!(matches!(
        result,
        Err(ScoringError::MissingRelatedIds {
            index: 0,
            side: ChoiceSide::Picked
        })
    ));
}

#[test]
fn test_full_pipeline_with_related() {
    let choices = vec![Choice::new(
        ChoiceItem::new("a").with_related(["x"]),
        ChoiceItem::new("b").with_related(["y"]),
    )
    .with_delta(1.0)];

    let result = RoundProcessor::default()
        .with_plugin(RelatedPlugin::new(RelatedOptions {
            related_bonus_winner: 100.0,
            related_bonus_loser: 50.0,
        }))
        .with_plugin(DeltaPlugin::default())
        .with_plugin(GladiatorPlugin::default())
        .process(&choices)
        .unwrap();

    assert_eq!(
        result,
        scores(&[
            ("a", 1.0 + 10_000.0 + 1.0),
            ("b", 1.0 + 2_000.0),
            ("x", 100.0),
            ("y", 50.0),
        ])
    );
}

#[tokio::test]
async fn test_normalize_player_scores() {
    let store = store_with("p1", &[("a", 50.0), ("b", 100.0), ("c", 25.0)]).await;
    let normalizer = ScoreNormalizer::new(store.clone());

    let outcome = normalizer.normalize_player("p1").await.unwrap();
    assert_eq!(
        outcome,
        NormalizationOutcome::Normalized {
            max_score: 100.0,
            updated: 3
        }
    );
    assert_eq!(
        store.snapshot("p1").await,
        scores(&[("a", 0.5), ("b", 1.0), ("c", 0.25)])
    );

    // already normalized: max is 1, values unchanged
    normalizer.normalize_player("p1").await.unwrap();
    assert_eq!(
        store.snapshot("p1").await,
        scores(&[("a", 0.5), ("b", 1.0), ("c", 0.25)])
    );
}

#[tokio::test]
async fn test_normalize_degenerate_player_writes_nothing() {
    let store = store_with("p1", &[("a", 0.0), ("b", -4.0)]).await;
    let normalizer = ScoreNormalizer::new(store.clone());

    let outcome = normalizer.normalize_player("p1").await.unwrap();
    assert_eq!(
        outcome,
        NormalizationOutcome::Skipped(SkipReason::NonPositiveMax(0.0))
    );
    assert_eq!(store.snapshot("p1").await, scores(&[("a", 0.0), ("b", -4.0)]));

    let outcome = normalizer.normalize_player("nobody").await.unwrap();
    assert_eq!(outcome, NormalizationOutcome::Skipped(SkipReason::NoScores));
}

#[tokio::test]
async fn test_normalize_commit_failure_is_all_or_nothing() {
    let store = store_with("p1", &[("a", 50.0), ("b", 100.0)]).await;
    store.fail_next_commit();
    let normalizer = ScoreNormalizer::new(store.clone());

    let result = normalizer.normalize_player("p1").await;
    assert!(matches!(result, Err(ScoringError::Store(_))));
    assert_eq!(store.snapshot("p1").await, scores(&[("a", 50.0), ("b", 100.0)]));
}

#[tokio::test]
async fn test_normalize_several_players() {
    let store = store_with("p1", &[("a", 4.0), ("b", 2.0)]).await;
    store.set_score("p2", "a", 10.0).await;
    store.set_score("p3", "a", 0.0).await;
    let normalizer = ScoreNormalizer::new(store.clone());

    let players: Vec<PlayerId> = vec!["p1".into(), "p2".into(), "p3".into()];
    let results = normalizer.normalize_players(&players).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].0, "p1");
    assert!(matches!(
        results[2].1,
        Ok(NormalizationOutcome::Skipped(SkipReason::NonPositiveMax(_)))
    ));
    assert_eq!(store.snapshot("p1").await, scores(&[("a", 1.0), ("b", 0.5)]));
    assert_eq!(store.snapshot("p2").await, scores(&[("a", 1.0)]));
    assert_eq!(store.snapshot("p3").await, scores(&[("a", 0.0)]));
}

#[tokio::test]
async fn test_round_merge_waits_for_open_transaction() {
    let store = store_with("p1", &[("a", 10.0)]).await;

    let tx = store.begin().await.unwrap();

    let writer = store.clone();
    let merge = tokio::spawn(async move {
        writer
            .add_round_scores("p1", &scores(&[("a", 5.0)]))
            .await
            .unwrap();
    });

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!merge.is_finished(), "merge must block while a transaction is open");

    drop(tx);
    merge.await.unwrap();
    assert_eq!(store.snapshot("p1").await, scores(&[("a", 15.0)]));
}

#[tokio::test]
async fn test_engine_score_and_normalize() {
    let engine = ScoringEngine::new(PipelineConfig::default().build(), MemoryScoreStore::new());

    let round = engine
        .score_round("p1", &[Choice::between("a", "b").with_delta(10.0)])
        .await
        .unwrap();
    assert_eq!(round, scores(&[("a", 10_010.0), ("b", 2_010.0)]));

    engine
        .score_round("p1", &[Choice::between("b", "c")])
        .await
        .unwrap();
    // absorption only sees the round's own scores: b gains 10000 on top of 2010
    assert_eq!(
        engine.store().snapshot("p1").await,
        scores(&[("a", 10_010.0), ("b", 12_010.0), ("c", 2_000.0)])
    );

    let outcome = engine.normalize_player("p1").await.unwrap();
    assert_eq!(
        outcome,
        NormalizationOutcome::Normalized {
            max_score: 12_010.0,
            updated: 3
        }
    );
    let normalized = engine.store().snapshot("p1").await;
    assert_eq!(normalized["b"], 1.0);
    assert!(normalized.values().all(|&v| (0.0..=1.0).contains(&v)));
}

#[tokio::test]
async fn test_engine_failed_round_writes_nothing() {
    let engine = ScoringEngine::new(
        RoundProcessor::default()
            .with_plugin(DeltaPlugin::default())
            .with_plugin(Rejecting),
        MemoryScoreStore::new(),
    );

    let result = engine
        .score_round("p1", &[Choice::between("a", "b").with_delta(3.0)])
        .await;

    assert!(result.is_err());
    assert!(engine.store().snapshot("p1").await.is_empty());
}

#[test]
fn test_normalize_from_sync_context() {
    let store = MemoryScoreStore::new();
    let normalizer = ScoreNormalizer::new(store.clone());

    let outcome = tokio_test::block_on(async {
        store.set_score("p1", "a", 8.0).await;
        store.set_score("p1", "b", 2.0).await;
        normalizer.normalize_player("p1").await.unwrap()
    });

    assert_eq!(
        outcome,
        NormalizationOutcome::Normalized {
            max_score: 8.0,
            updated: 2
        }
    );
    let snapshot = tokio_test::block_on(store.snapshot("p1"));
    assert_eq!(snapshot, scores(&[("a", 1.0), ("b", 0.25)]));
}
