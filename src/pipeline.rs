use chrono::{DateTime, Utc};

use crate::github::Repository;

/// Ordering applied to the repository grid.
///
/// `Stars` is the only mode the original site could actually reach from its
/// UI; `Name` and `Updated` existed as dead code paths there and are exposed
/// here through the `SORT_MODE` configuration variable instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Stars,
    Name,
    Updated,
}

impl std::str::FromStr for SortMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stars" => Ok(SortMode::Stars),
            "name" => Ok(SortMode::Name),
            "updated" => Ok(SortMode::Updated),
            other => anyhow::bail!("unknown sort mode '{}' (expected stars, name or updated)", other),
        }
    }
}

/// Prepare repositories for display. Fixed order of steps:
///
/// 1. drop archived repositories;
/// 2. sort per `mode` (stars: descending star count, ties broken by most
///    recent push);
/// 3. stable partition so originals precede forks, preserving relative
///    order within each group.
pub fn prepare(mut repos: Vec<Repository>, mode: SortMode) -> Vec<Repository> {
    repos.retain(|r| !r.archived);

    match mode {
        SortMode::Stars => repos.sort_by(|a, b| {
            b.stargazers_count
                .cmp(&a.stargazers_count)
                .then_with(|| pushed_timestamp(b).cmp(&pushed_timestamp(a)))
        }),
        SortMode::Name => {
            repos.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        SortMode::Updated => {
            repos.sort_by(|a, b| pushed_timestamp(b).cmp(&pushed_timestamp(a)))
        }
    }

    // Originals first. Vec::sort_by_key is stable, so order within each
    // fork-state group is untouched.
    repos.sort_by_key(|r| r.fork);

    repos
}

/// Parsed push timestamp; unparseable or missing values order last among
/// equal-star entries (None < Some under Ord).
fn pushed_timestamp(repo: &Repository) -> Option<DateTime<Utc>> {
    repo.pushed_at
        .as_deref()
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== Helper Functions ====================

    fn repo(name: &str, stars: u32, fork: bool, archived: bool) -> Repository {
        Repository {
            name: name.to_string(),
            description: None,
            html_url: format!("https://github.com/testuser/{}", name),
            language: None,
            stargazers_count: stars,
            forks_count: 0,
            pushed_at: Some("2024-01-15T10:30:00Z".to_string()),
            archived,
            fork,
        }
    }

    fn repo_pushed(name: &str, stars: u32, pushed_at: &str) -> Repository {
        Repository {
            pushed_at: Some(pushed_at.to_string()),
            ..repo(name, stars, false, false)
        }
    }

    fn names(repos: &[Repository]) -> Vec<&str> {
        repos.iter().map(|r| r.name.as_str()).collect()
    }

    // ==================== SortMode Tests ====================

    #[test]
    fn test_sort_mode_parse() {
        assert_eq!("stars".parse::<SortMode>().unwrap(), SortMode::Stars);
        assert_eq!("Name".parse::<SortMode>().unwrap(), SortMode::Name);
        assert_eq!("UPDATED".parse::<SortMode>().unwrap(), SortMode::Updated);
    }

    #[test]
    fn test_sort_mode_parse_invalid() {
        let err = "popularity".parse::<SortMode>().unwrap_err();
        assert!(err.to_string().contains("popularity"));
    }

    #[test]
    fn test_sort_mode_default_is_stars() {
        assert_eq!(SortMode::default(), SortMode::Stars);
    }

    // ==================== Archived Filter Tests ====================

    #[test]
    fn test_archived_repos_removed() {
        let repos = vec![
            repo("live", 1, false, false),
            repo("dead", 100, false, true),
        ];

        let result = prepare(repos, SortMode::Stars);
        assert_eq!(names(&result), vec!["live"]);
    }

    #[test]
    fn test_all_archived_yields_empty() {
        let repos = vec![repo("a", 1, false, true), repo("b", 2, true, true)];
        assert!(prepare(repos, SortMode::Stars).is_empty());
    }

    // ==================== Stars Sort Tests ====================

    #[test]
    fn test_sort_by_stars_descending() {
        let repos = vec![
            repo("low", 1, false, false),
            repo("high", 10, false, false),
            repo("mid", 5, false, false),
        ];

        let result = prepare(repos, SortMode::Stars);
        assert_eq!(names(&result), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_star_ties_broken_by_push_time() {
        let repos = vec![
            repo_pushed("older", 5, "2023-01-01T00:00:00Z"),
            repo_pushed("newer", 5, "2024-06-01T00:00:00Z"),
        ];

        let result = prepare(repos, SortMode::Stars);
        assert_eq!(names(&result), vec!["newer", "older"]);
    }

    #[test]
    fn test_missing_push_time_sorts_last_among_ties() {
        let mut no_date = repo("undated", 5, false, false);
        no_date.pushed_at = None;
        let repos = vec![no_date, repo_pushed("dated", 5, "2024-06-01T00:00:00Z")];

        let result = prepare(repos, SortMode::Stars);
        assert_eq!(names(&result), vec!["dated", "undated"]);
    }

    #[test]
    fn test_unparseable_push_time_treated_as_missing() {
        let repos = vec![
            repo_pushed("garbage", 5, "not a timestamp"),
            repo_pushed("dated", 5, "2024-06-01T00:00:00Z"),
        ];

        let result = prepare(repos, SortMode::Stars);
        assert_eq!(names(&result), vec!["dated", "garbage"]);
    }

    // ==================== Fork Partition Tests ====================

    #[test]
    fn test_originals_precede_forks() {
        let repos = vec![
            repo("forked", 10, true, false),
            repo("original", 1, false, false),
        ];

        let result = prepare(repos, SortMode::Stars);
        assert_eq!(names(&result), vec!["original", "forked"]);
    }

    #[test]
    fn test_partition_preserves_order_within_groups() {
        let repos = vec![
            repo("fork-high", 9, true, false),
            repo("orig-high", 8, false, false),
            repo("fork-low", 2, true, false),
            repo("orig-low", 1, false, false),
        ];

        let result = prepare(repos, SortMode::Stars);
        assert_eq!(
            names(&result),
            vec!["orig-high", "orig-low", "fork-high", "fork-low"]
        );
    }

    #[test]
    fn test_spec_scenario_archived_sort_partition() {
        // a: 5 stars original, b: 10 stars fork, c: 10 stars archived.
        // Archived filter drops c, star sort gives [b, a], the fork
        // partition moves the original first: [a, b].
        let repos = vec![
            repo("a", 5, false, false),
            repo("b", 10, true, false),
            repo("c", 10, false, true),
        ];

        let result = prepare(repos, SortMode::Stars);
        assert_eq!(names(&result), vec!["a", "b"]);
    }

    // ==================== Name / Updated Mode Tests ====================

    #[test]
    fn test_name_sort_case_insensitive() {
        let repos = vec![
            repo("zeta", 1, false, false),
            repo("Alpha", 1, false, false),
            repo("beta", 1, false, false),
        ];

        let result = prepare(repos, SortMode::Name);
        assert_eq!(names(&result), vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_updated_sort_newest_first() {
        let repos = vec![
            repo_pushed("old", 100, "2022-01-01T00:00:00Z"),
            repo_pushed("new", 0, "2024-01-01T00:00:00Z"),
        ];

        let result = prepare(repos, SortMode::Updated);
        assert_eq!(names(&result), vec!["new", "old"]);
    }

    #[test]
    fn test_fork_partition_applies_in_all_modes() {
        let repos = vec![
            repo("aaa-fork", 1, true, false),
            repo("zzz-orig", 1, false, false),
        ];

        let result = prepare(repos, SortMode::Name);
        assert_eq!(names(&result), vec!["zzz-orig", "aaa-fork"]);
    }

    // ==================== Edge Cases ====================

    #[test]
    fn test_empty_input() {
        assert!(prepare(Vec::new(), SortMode::Stars).is_empty());
    }

    #[test]
    fn test_single_repo() {
        let result = prepare(vec![repo("only", 0, false, false)], SortMode::Stars);
        assert_eq!(names(&result), vec!["only"]);
    }

    // ==================== Property Tests ====================

    fn arb_repo() -> impl Strategy<Value = Repository> {
        (
            "[a-z]{1,8}",
            0u32..50,
            any::<bool>(),
            any::<bool>(),
            0i64..2_000_000_000,
        )
            .prop_map(|(name, stars, fork, archived, secs)| {
                let pushed = DateTime::from_timestamp(secs, 0).map(|dt| dt.to_rfc3339());
                Repository {
                    name: name.clone(),
                    description: None,
                    html_url: format!("https://github.com/testuser/{}", name),
                    language: None,
                    stargazers_count: stars,
                    forks_count: 0,
                    pushed_at: pushed,
                    archived,
                    fork,
                }
            })
    }

    proptest! {
        #[test]
        fn prop_archived_never_in_output(repos in proptest::collection::vec(arb_repo(), 0..30)) {
            let result = prepare(repos, SortMode::Stars);
            prop_assert!(result.iter().all(|r| !r.archived));
        }

        #[test]
        fn prop_originals_precede_forks(repos in proptest::collection::vec(arb_repo(), 0..30)) {
            let result = prepare(repos, SortMode::Stars);
            let first_fork = result.iter().position(|r| r.fork).unwrap_or(result.len());
            prop_assert!(result[first_fork..].iter().all(|r| r.fork));
        }

        #[test]
        fn prop_star_order_within_each_partition(repos in proptest::collection::vec(arb_repo(), 0..30)) {
            let result = prepare(repos, SortMode::Stars);
            for group in [false, true] {
                let stars: Vec<u32> = result
                    .iter()
                    .filter(|r| r.fork == group)
                    .map(|r| r.stargazers_count)
                    .collect();
                prop_assert!(stars.windows(2).all(|w| w[0] >= w[1]));
            }
        }

        #[test]
        fn prop_output_is_permutation_of_unarchived_input(repos in proptest::collection::vec(arb_repo(), 0..30)) {
            let mut expected: Vec<String> = repos
                .iter()
                .filter(|r| !r.archived)
                .map(|r| r.name.clone())
                .collect();
            let mut actual: Vec<String> =
                prepare(repos, SortMode::Stars).into_iter().map(|r| r.name).collect();
            expected.sort();
            actual.sort();
            prop_assert_eq!(expected, actual);
        }
    }
}
