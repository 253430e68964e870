// tests/git_client_test.rs
use std::path::Path;

use autover::error::AutoVersionError;
use autover::git::GitClient;
use tempfile::TempDir;

/// Creates a scratch repository with a configured committer identity.
fn init_repo() -> (TempDir, git2::Repository) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = git2::Repository::init(temp_dir.path()).expect("Could not init git repo");
    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }
    (temp_dir, repo)
}

/// Writes a file and commits it on HEAD, returning the commit OID.
fn commit_file(repo: &git2::Repository, content: &str, message: &str) -> git2::Oid {
    let workdir = repo.workdir().expect("repo has a workdir");
    std::fs::write(workdir.join("README.md"), content).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new("README.md"))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = repo.signature().expect("Could not get sig");

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Could not create commit")
}

fn tag(repo: &git2::Repository, name: &str, oid: git2::Oid) {
    repo.tag_lightweight(name, &repo.find_object(oid, None).unwrap(), false)
        .expect("Could not create tag");
}

#[test]
fn test_count_all_commits_matches_history_length() {
    let (dir, repo) = init_repo();
    for i in 0..4 {
        commit_file(&repo, &format!("content {}\n", i), &format!("commit {}", i));
    }

    let client = GitClient::new().in_dir(dir.path());
    assert_eq!(client.count_all_commits(), 4);
}

#[test]
fn test_count_all_commits_on_unborn_head_is_zero() {
    let (dir, _repo) = init_repo(); // no commits yet
    let client = GitClient::new().in_dir(dir.path());
    assert_eq!(client.count_all_commits(), 0);
}

#[test]
fn test_count_from_tag_without_matching_tags_equals_count_all() {
    let (dir, repo) = init_repo();
    for i in 0..3 {
        commit_file(&repo, &format!("content {}\n", i), &format!("commit {}", i));
    }

    let client = GitClient::new().in_dir(dir.path());
    assert_eq!(
        client.count_commits_from_tag("release-*").unwrap(),
        client.count_all_commits()
    );
}

#[test]
fn test_count_from_tag_nearest_match_wins() {
    let (dir, repo) = init_repo();
    let mut oids = Vec::new();
    for i in 0..8 {
        oids.push(commit_file(
            &repo,
            &format!("content {}\n", i),
            &format!("commit {}", i),
        ));
    }
    // v1.0 is 5 commits behind HEAD, v2.0 is 2 commits behind
    tag(&repo, "v1.0", oids[2]);
    tag(&repo, "v2.0", oids[5]);

    let client = GitClient::new().in_dir(dir.path());
    assert_eq!(client.count_commits_from_tag("v[0-9]*").unwrap(), 2);
}

#[test]
fn test_count_from_tag_at_head_is_zero() {
    let (dir, repo) = init_repo();
    let head = commit_file(&repo, "content\n", "commit");
    tag(&repo, "v1.0", head);

    let client = GitClient::new().in_dir(dir.path());
    assert_eq!(client.count_commits_from_tag("v[0-9]*").unwrap(), 0);
}

#[test]
fn test_commit_hash_lengths() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "content\n", "commit");

    let client = GitClient::new().in_dir(dir.path());
    let full = client.commit_hash(40, "HEAD").unwrap();
    assert_eq!(full.len(), 40);

    let short = client.commit_hash(7, "HEAD").unwrap();
    assert_eq!(short.len(), 7);
    assert!(full.starts_with(&short));

    for length in [0, 1, 12, 39, 40] {
        assert_eq!(client.commit_hash(length, "HEAD").unwrap(), full[..length]);
    }
}

#[test]
fn test_commit_hash_length_out_of_range() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "content\n", "commit");

    let client = GitClient::new().in_dir(dir.path());
    let err = client.commit_hash(41, "HEAD").unwrap_err();
    assert!(matches!(err, AutoVersionError::ArgumentRange(_)));
}

#[test]
fn test_commit_hash_of_named_ref() {
    let (dir, repo) = init_repo();
    let first = commit_file(&repo, "one\n", "first");
    commit_file(&repo, "two\n", "second");
    tag(&repo, "v1.0", first);

    let client = GitClient::new().in_dir(dir.path());
    assert_eq!(client.commit_hash(40, "v1.0").unwrap(), first.to_string());
}

#[test]
fn test_fallback_recovers_from_bad_configured_path() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "content\n", "commit");

    let client = GitClient::with_path("/no/such/git").in_dir(dir.path());
    // rev-list still succeeds through the default-path retry
    assert_eq!(client.count_all_commits(), 1);
}

#[test]
fn test_describe_failure_without_marker_is_malformed_output() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "content\n", "commit");

    // A matching tag on a commit unreachable from HEAD: `tag --list` finds
    // it, but `describe` fails and produces no distance marker.
    let workdir = repo.workdir().unwrap();
    std::fs::write(workdir.join("dangling.txt"), "x\n").unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("dangling.txt")).unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = repo.signature().unwrap();
    let dangling = repo
        .commit(None, &sig, &sig, "dangling root", &tree, &[])
        .unwrap();
    tag(&repo, "v9.9", dangling);

    let client = GitClient::new().in_dir(dir.path());
    let err = client.count_commits_from_tag("v[0-9]*").unwrap_err();
    assert!(matches!(err, AutoVersionError::MalformedOutput(_)));
}
