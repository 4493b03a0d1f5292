//! Focused unit tests covering rank configuration and output.

use super::helpers::{Workspace, rating, user};
use super::*;
use crate::rank::{RankArgs, RankConfig, execute_rank, run_rank_with};
use kindred_core::test_support::MemoryVectorStore;
use kindred_core::{CompatibilityScore, InterestCategory, InterestVector, VectorStore};
use rstest::{fixture, rstest};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("vector database is offline")]
struct Offline;

struct OfflineStore;

impl VectorStore for OfflineStore {
    type Error = Offline;

    fn load(&self, _user: &UserId) -> Result<Option<InterestVector>, Self::Error> {
        Err(Offline)
    }

    fn save(&self, _user: &UserId, _vector: &InterestVector) -> Result<(), Self::Error> {
        Err(Offline)
    }

    fn load_all(&self) -> Result<Vec<(UserId, InterestVector)>, Self::Error> {
        Err(Offline)
    }
}

fn config_for(id: &str, limit: Option<usize>) -> RankConfig {
    RankConfig {
        user_id: user(id),
        database: DEFAULT_DATABASE.into(),
        limit,
    }
}

fn candidates(ranked: &[CompatibilityScore]) -> Vec<&str> {
    ranked.iter().map(|entry| entry.candidate.as_str()).collect()
}

#[fixture]
fn hikers() -> MemoryVectorStore {
    MemoryVectorStore::with_vectors([
        (user("alice"), rating(InterestCategory::Hiking, 10)),
        (user("bob"), rating(InterestCategory::Hiking, 9)),
        (user("carol"), rating(InterestCategory::Hiking, 2)),
        (user("dave"), rating(InterestCategory::Hiking, 6)),
    ])
}

#[rstest]
fn converting_rank_without_user_errors() {
    let err = RankConfig::try_from(RankArgs::default()).expect_err("missing user should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_USER_ID);
            assert_eq!(env, ENV_RANK_USER_ID);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn rank_config_applies_defaults() {
    let args = RankArgs {
        user_id: Some("alice".to_owned()),
        ..RankArgs::default()
    };

    let config = RankConfig::try_from(args).expect("config should build");
    assert_eq!(config, config_for("alice", None));
}

#[rstest]
fn execute_rank_orders_best_match_first(hikers: MemoryVectorStore) {
    let ranked = execute_rank(&hikers, &config_for("alice", None)).expect("rank should succeed");
    assert_eq!(candidates(&ranked), vec!["bob", "dave", "carol"]);
}

#[rstest]
#[case(Some(0), vec![])]
#[case(Some(2), vec!["bob", "dave"])]
#[case(Some(10), vec!["bob", "dave", "carol"])]
fn execute_rank_applies_limit(
    hikers: MemoryVectorStore,
    #[case] limit: Option<usize>,
    #[case] expected: Vec<&str>,
) {
    let ranked = execute_rank(&hikers, &config_for("alice", limit)).expect("rank should succeed");
    assert_eq!(candidates(&ranked), expected);
}

#[rstest]
fn execute_rank_without_subject_yields_nothing(hikers: MemoryVectorStore) {
    let ranked =
        execute_rank(&hikers, &config_for("stranger", None)).expect("missing subject is not fatal");
    assert!(ranked.is_empty());
}

#[rstest]
fn execute_rank_reports_store_failures() {
    let err = execute_rank(&OfflineStore, &config_for("alice", None))
        .expect_err("store failure should surface");
    match err {
        CliError::Rank(source) => assert!(source.to_string().contains("offline")),
        other => panic!("expected Rank, found {other:?}"),
    }
}

#[rstest]
fn run_rank_with_prints_ranked_json() {
    let workspace = Workspace::new();
    workspace.seed(&[
        ("alice", rating(InterestCategory::Music, 8)),
        ("bob", rating(InterestCategory::Music, 8)),
        ("carol", rating(InterestCategory::Music, 1)),
    ]);
    let args = RankArgs {
        user_id: Some("alice".to_owned()),
        database: Some(workspace.database()),
        limit: None,
    };
    let mut stdout = Vec::new();

    run_rank_with(args, &mut stdout).expect("rank should succeed");

    let printed: serde_json::Value = serde_json::from_slice(&stdout).expect("JSON output");
    let ids: Vec<&str> = printed
        .as_array()
        .expect("array output")
        .iter()
        .filter_map(|entry| entry.get("userId").and_then(serde_json::Value::as_str))
        .collect();
    assert_eq!(ids, vec!["bob", "carol"]);
}

#[rstest]
fn run_rank_with_unknown_user_prints_empty_list() {
    let workspace = Workspace::new();
    let args = RankArgs {
        user_id: Some("nobody".to_owned()),
        database: Some(workspace.database()),
        limit: None,
    };
    let mut stdout = Vec::new();

    run_rank_with(args, &mut stdout).expect("rank should succeed");
    assert_eq!(stdout, b"[]\n");
}
