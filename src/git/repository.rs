//! Notes repository lifecycle.
//!
//! The notes root moves through three states:
//!
//! ```text
//! Absent -> Uninitialized directory -> Git repository
//! ```
//!
//! Every operation here first brings the root to the last state, so push,
//! pull and commit work on first use without a setup command.

use super::git_error;
use super::remote::RemoteManager;
use crate::context::branch_from_ref;
use crate::models::Author;
use crate::services::PathManager;
use crate::{Error, Result};
use git2::build::CheckoutBuilder;
use git2::{ErrorCode, IndexAddOption, Oid, Repository, Signature};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Signature used when no usable identity is configured.
const FALLBACK_NAME: &str = "gitnotes";
/// Email used when no usable identity is configured.
const FALLBACK_EMAIL: &str = "gitnotes@localhost";

/// Result of a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The branch was transferred (or the remote already had it).
    Pushed,
    /// The repository has no commits yet.
    NothingToPush,
}

/// Result of a pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    /// Local branch already contains the remote branch.
    UpToDate,
    /// Local branch was moved to the remote commit.
    FastForward,
    /// Local and remote histories were joined with a merge commit.
    Merged,
}

/// Git operations on the notes root.
#[derive(Debug, Clone)]
pub struct NotesRepository {
    /// Path to the notes root.
    root: PathBuf,
    /// Commit author.
    author: Author,
}

impl NotesRepository {
    /// Creates a handle for the notes root. Performs no I/O.
    #[must_use]
    pub fn new(root: impl AsRef<Path>, author: Author) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            author,
        }
    }

    /// Returns the notes root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensures the notes root exists and is a git repository.
    ///
    /// Idempotent: an existing repository is opened, never re-initialised.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be created or initialised.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn ensure_repository(&self) -> Result<()> {
        self.open_or_init().map(|_| ())
    }

    /// Opens the repository at the root, initialising it if necessary.
    fn open_or_init(&self) -> Result<Repository> {
        PathManager::new(&self.root).ensure_root()?;

        match Repository::open(&self.root) {
            Ok(repo) => Ok(repo),
            Err(e) if e.code() == ErrorCode::NotFound => {
                let repo = Repository::init(&self.root).map_err(|e| git_error("init", &e))?;
                info!(root = %self.root.display(), "initialized notes repository");
                Ok(repo)
            },
            Err(e) => Err(git_error("open_repository", &e)),
        }
    }

    /// Stages every change under the root and commits it.
    ///
    /// Uses `message`, or `Update notes - <local time>` when empty. Returns
    /// the new commit id, or `None` when there was nothing to commit.
    ///
    /// # Errors
    ///
    /// Returns an error if staging or committing fails.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn stage_and_commit(&self, message: Option<&str>) -> Result<Option<Oid>> {
        let repo = self.open_or_init()?;
        self.commit_all(&repo, message)
    }

    fn commit_all(&self, repo: &Repository, message: Option<&str>) -> Result<Option<Oid>> {
        let mut index = repo.index().map_err(|e| git_error("open_index", &e))?;
        index
            .add_all(["*"], IndexAddOption::DEFAULT, None)
            .map_err(|e| git_error("stage", &e))?;
        // Picks up deleted notes
        index
            .update_all(["*"], None)
            .map_err(|e| git_error("stage", &e))?;
        index.write().map_err(|e| git_error("write_index", &e))?;

        let tree_id = index.write_tree().map_err(|e| git_error("write_tree", &e))?;
        let parent = head_commit(repo)?;

        let unchanged = match &parent {
            Some(commit) => commit.tree_id() == tree_id,
            None => index.is_empty(),
        };
        if unchanged {
            info!("nothing to commit");
            return Ok(None);
        }

        let tree = repo
            .find_tree(tree_id)
            .map_err(|e| git_error("find_tree", &e))?;
        let sig = self.signature(repo)?;
        let message = message
            .filter(|m| !m.trim().is_empty())
            .map_or_else(default_commit_message, String::from);
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, &message, &tree, &parents)
            .map_err(|e| git_error("commit", &e))?;
        info!(commit = %oid, message = %message, "committed notes");
        Ok(Some(oid))
    }

    /// Registers `origin` with `url`, updating it if already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or the repository cannot be
    /// opened or configured.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn add_origin(&self, url: &str) -> Result<()> {
        let repo = self.open_or_init()?;
        RemoteManager::new(&repo).add(url)
    }

    /// Ensures `origin` exists, registering `url` if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRemoteConfigured`] if `origin` is missing and no
    /// URL is given.
    pub fn ensure_remote(&self, url: Option<&str>) -> Result<()> {
        let repo = self.open_or_init()?;
        origin(&repo, url).map(drop)
    }

    /// Commits pending changes and pushes the current branch to `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRemoteConfigured`] if there is no usable remote, or
    /// a transport error.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn push(&self, remote_url: Option<&str>) -> Result<PushOutcome> {
        let repo = self.open_or_init()?;
        self.commit_all(&repo, None)?;

        let remote = origin(&repo, remote_url)?;

        if head_commit(&repo)?.is_none() {
            info!("no commits yet, nothing to push");
            return Ok(PushOutcome::NothingToPush);
        }

        let branch_ref = head_branch_ref(&repo)?;
        remote.push(&branch_ref)?;
        info!(remote = %remote.name(), branch = %branch_ref, "pushed notes");
        Ok(PushOutcome::Pushed)
    }

    /// Fetches the current branch from `origin` and integrates it.
    ///
    /// Pending local changes are committed first so the checkout never
    /// overwrites them. When the current branch does not exist on the remote,
    /// the remote's default branch is pulled instead; an unborn local branch
    /// then switches to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRemoteConfigured`] if there is no usable remote, a
    /// transport error, or an error if the merge has conflicts.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn pull(&self, remote_url: Option<&str>) -> Result<PullOutcome> {
        let repo = self.open_or_init()?;

        let remote = origin(&repo, remote_url)?;
        self.commit_all(&repo, None)?;

        let local_ref = head_branch_ref(&repo)?;
        let Some((branch_ref, tracking_ref)) = fetch_upstream(&repo, &remote, &local_ref)? else {
            info!(branch = %local_ref, "nothing on the remote yet, already up to date");
            return Ok(PullOutcome::UpToDate);
        };

        let fetched = repo
            .find_reference(&tracking_ref)
            .map_err(|e| git_error("find_reference", &e))?;
        let incoming = repo
            .reference_to_annotated_commit(&fetched)
            .map_err(|e| git_error("annotate_commit", &e))?;

        let (analysis, _) = repo
            .merge_analysis(&[&incoming])
            .map_err(|e| git_error("merge_analysis", &e))?;

        if analysis.is_up_to_date() {
            info!("already up to date");
            Ok(PullOutcome::UpToDate)
        } else if analysis.is_unborn() || analysis.is_fast_forward() {
            fast_forward(&repo, &branch_ref, incoming.id())?;
            info!(commit = %incoming.id(), branch = %branch_ref, "fast-forwarded notes");
            Ok(PullOutcome::FastForward)
        } else {
            self.merge(&repo, &incoming, &tracking_ref)?;
            Ok(PullOutcome::Merged)
        }
    }

    fn merge(
        &self,
        repo: &Repository,
        incoming: &git2::AnnotatedCommit<'_>,
        tracking_ref: &str,
    ) -> Result<()> {
        repo.merge(&[incoming], None, None)
            .map_err(|e| git_error("merge", &e))?;

        let mut index = repo.index().map_err(|e| git_error("open_index", &e))?;
        if index.has_conflicts() {
            // Leave the conflicted files for the user but drop MERGE_HEAD
            let _ = repo.cleanup_state();
            return Err(Error::operation(
                "merge",
                "conflicting changes in notes; resolve them in the notes repository and commit",
            ));
        }

        let tree_id = index.write_tree().map_err(|e| git_error("write_tree", &e))?;
        let tree = repo
            .find_tree(tree_id)
            .map_err(|e| git_error("find_tree", &e))?;
        let local = head_commit(repo)?.ok_or_else(|| Error::operation("merge", "HEAD is unborn"))?;
        let remote = repo
            .find_commit(incoming.id())
            .map_err(|e| git_error("find_commit", &e))?;
        let sig = self.signature(repo)?;
        let message = format!("Merge {tracking_ref}");

        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, &message, &tree, &[&local, &remote])
            .map_err(|e| git_error("commit", &e))?;
        repo.cleanup_state()
            .map_err(|e| git_error("cleanup_state", &e))?;
        info!(commit = %oid, "merged remote notes");
        Ok(())
    }

    /// Builds the commit signature.
    ///
    /// libgit2 refuses empty names and emails, so missing parts fall back to
    /// the repository identity and then to a fixed placeholder.
    fn signature(&self, repo: &Repository) -> Result<Signature<'static>> {
        if self.author.is_complete() {
            return Signature::now(&self.author.name, &self.author.email)
                .map_err(|e| git_error("create_signature", &e));
        }

        let configured = repo.signature().ok();
        let configured = configured.as_ref();
        let name = pick(
            &self.author.name,
            configured.and_then(Signature::name),
            FALLBACK_NAME,
        );
        let email = pick(
            &self.author.email,
            configured.and_then(Signature::email),
            FALLBACK_EMAIL,
        );
        debug!(name = %name, email = %email, "using fallback commit identity");

        Signature::now(&name, &email).map_err(|e| git_error("create_signature", &e))
    }
}

/// Formats the default commit message with the local time.
#[must_use]
pub fn default_commit_message() -> String {
    format!(
        "Update notes - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

fn pick(preferred: &str, configured: Option<&str>, fallback: &str) -> String {
    [Some(preferred), configured]
        .into_iter()
        .flatten()
        .find(|v| !v.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Ensures `origin` is registered and returns its manager.
fn origin<'repo>(repo: &'repo Repository, url: Option<&str>) -> Result<RemoteManager<'repo>> {
    let remote = RemoteManager::new(repo);
    remote.ensure(url)?;
    Ok(remote)
}

/// Fetches the upstream of `local_ref`.
///
/// Falls back to the remote's default branch when `local_ref` is absent on
/// the remote. Returns the local branch to update and the fetched
/// remote-tracking reference, or `None` if there is nothing to pull.
fn fetch_upstream(
    repo: &Repository,
    remote: &RemoteManager<'_>,
    local_ref: &str,
) -> Result<Option<(String, String)>> {
    let tracking_ref = remote.fetch(short_branch(local_ref)?)?;
    if reference_exists(repo, &tracking_ref)? {
        return Ok(Some((local_ref.to_string(), tracking_ref)));
    }

    let Some(default_ref) = remote
        .default_branch()?
        .filter(|default_ref| default_ref != local_ref)
    else {
        return Ok(None);
    };
    let tracking_ref = remote.fetch(short_branch(&default_ref)?)?;
    if !reference_exists(repo, &tracking_ref)? {
        return Ok(None);
    }

    // Unborn: adopt the remote default. Otherwise merge it into the local branch.
    let branch_ref = if head_commit(repo)?.is_none() {
        default_ref
    } else {
        local_ref.to_string()
    };
    info!(
        upstream = %tracking_ref,
        branch = %branch_ref,
        "current branch not on remote, using its default branch"
    );
    Ok(Some((branch_ref, tracking_ref)))
}

fn short_branch(branch_ref: &str) -> Result<&str> {
    branch_from_ref(branch_ref).ok_or_else(|| Error::BadReference {
        reference: branch_ref.to_string(),
    })
}

fn reference_exists(repo: &Repository, name: &str) -> Result<bool> {
    match repo.find_reference(name) {
        Ok(_) => Ok(true),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
        Err(e) => Err(git_error("find_reference", &e)),
    }
}

/// Returns the commit HEAD points to, or `None` for an unborn branch.
fn head_commit(repo: &Repository) -> Result<Option<git2::Commit<'_>>> {
    match repo.head() {
        Ok(head) => head
            .peel_to_commit()
            .map(Some)
            .map_err(|e| git_error("peel_head", &e)),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
        Err(e) => Err(git_error("read_head", &e)),
    }
}

/// Returns the full reference HEAD points to, e.g. `refs/heads/main`.
fn head_branch_ref(repo: &Repository) -> Result<String> {
    let head = repo
        .find_reference("HEAD")
        .map_err(|e| git_error("read_head", &e))?;
    head.symbolic_target()
        .filter(|target| branch_from_ref(target).is_some())
        .map(String::from)
        .ok_or_else(|| Error::BadReference {
            reference: "notes repository HEAD is detached".to_string(),
        })
}

/// Moves `branch_ref` to `target` and checks it out.
fn fast_forward(repo: &Repository, branch_ref: &str, target: Oid) -> Result<()> {
    match repo.find_reference(branch_ref) {
        Ok(mut reference) => {
            reference
                .set_target(target, "pull: fast-forward")
                .map_err(|e| git_error("fast_forward", &e))?;
        },
        Err(e) if e.code() == ErrorCode::NotFound => {
            repo.reference(branch_ref, target, true, "pull: initial")
                .map_err(|e| git_error("create_branch", &e))?;
        },
        Err(e) => return Err(git_error("find_reference", &e)),
    }

    repo.set_head(branch_ref)
        .map_err(|e| git_error("set_head", &e))?;
    // Local changes were committed before fetching, so forcing is safe
    repo.checkout_head(Some(CheckoutBuilder::new().force()))
        .map_err(|e| git_error("checkout", &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_author() -> Author {
        Author::new("test", "test@test.com")
    }

    fn notes_repo(dir: &TempDir) -> NotesRepository {
        NotesRepository::new(dir.path().join("notes"), test_author())
    }

    fn commit_count(root: &Path) -> usize {
        let repo = Repository::open(root).unwrap();
        let mut walk = repo.revwalk().unwrap();
        if walk.push_head().is_err() {
            return 0;
        }
        walk.count()
    }

    #[test]
    fn test_ensure_repository_creates_root_and_repo() {
        let dir = TempDir::new().unwrap();
        let notes = notes_repo(&dir);

        notes.ensure_repository().unwrap();

        assert!(notes.root().join(".git").is_dir());
    }

    #[test]
    fn test_ensure_repository_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let notes = notes_repo(&dir);
        notes.ensure_repository().unwrap();

        std::fs::write(notes.root().join("note"), "content").unwrap();
        let first = notes.stage_and_commit(Some("first")).unwrap().unwrap();

        notes.ensure_repository().unwrap();
        notes.ensure_repository().unwrap();

        let repo = Repository::open(notes.root()).unwrap();
        assert_eq!(repo.head().unwrap().target(), Some(first));
        assert_eq!(commit_count(notes.root()), 1);
    }

    #[test]
    fn test_stage_and_commit_default_message() {
        let dir = TempDir::new().unwrap();
        let notes = notes_repo(&dir);
        notes.ensure_repository().unwrap();
        std::fs::create_dir_all(notes.root().join("proj")).unwrap();
        std::fs::write(notes.root().join("proj").join("main"), "todo").unwrap();

        let oid = notes.stage_and_commit(Some("")).unwrap().unwrap();

        let repo = Repository::open(notes.root()).unwrap();
        let commit = repo.find_commit(oid).unwrap();
        let message = commit.message().unwrap();
        assert!(message.starts_with("Update notes - "), "{message}");
        assert_eq!(commit.author().name(), Some("test"));
        assert_eq!(commit_count(notes.root()), 1);
    }

    #[test]
    fn test_default_commit_message_format() {
        let message = default_commit_message();
        let timestamp = message.strip_prefix("Update notes - ").unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn test_stage_and_commit_nothing_to_commit() {
        let dir = TempDir::new().unwrap();
        let notes = notes_repo(&dir);

        assert!(notes.stage_and_commit(None).unwrap().is_none());

        std::fs::write(notes.root().join("note"), "content").unwrap();
        assert!(notes.stage_and_commit(None).unwrap().is_some());
        assert!(notes.stage_and_commit(None).unwrap().is_none());
        assert_eq!(commit_count(notes.root()), 1);
    }

    #[test]
    fn test_stage_and_commit_records_deletions() {
        let dir = TempDir::new().unwrap();
        let notes = notes_repo(&dir);
        notes.ensure_repository().unwrap();
        let note = notes.root().join("note");
        std::fs::write(&note, "content").unwrap();
        notes.stage_and_commit(Some("add")).unwrap();

        std::fs::remove_file(&note).unwrap();
        let oid = notes.stage_and_commit(Some("remove")).unwrap().unwrap();

        let repo = Repository::open(notes.root()).unwrap();
        let tree = repo.find_commit(oid).unwrap().tree().unwrap();
        assert!(tree.get_name("note").is_none());
    }

    #[test]
    fn test_stage_and_commit_with_empty_author() {
        let dir = TempDir::new().unwrap();
        let notes = NotesRepository::new(dir.path().join("notes"), Author::default());
        notes.ensure_repository().unwrap();
        std::fs::write(notes.root().join("note"), "content").unwrap();

        // Accepted, with some non-empty identity
        let oid = notes.stage_and_commit(Some("anonymous")).unwrap().unwrap();
        let repo = Repository::open(notes.root()).unwrap();
        let commit = repo.find_commit(oid).unwrap();
        assert!(!commit.author().name().unwrap().is_empty());
    }

    #[test]
    fn test_pick_prefers_first_non_empty() {
        assert_eq!(pick("Alice", Some("Bob"), "x"), "Alice");
        assert_eq!(pick("", Some("Bob"), "x"), "Bob");
        assert_eq!(pick("", Some(""), "x"), "x");
        assert_eq!(pick(" ", None, "x"), "x");
    }

    #[test]
    fn test_push_without_remote_fails() {
        let dir = TempDir::new().unwrap();
        let notes = notes_repo(&dir);

        let result = notes.push(None);
        assert!(matches!(result, Err(Error::NoRemoteConfigured { .. })));
    }

    #[test]
    fn test_push_after_add_origin() {
        let dir = TempDir::new().unwrap();
        let remote_dir = TempDir::new().unwrap();
        let bare = Repository::init_bare(remote_dir.path()).unwrap();
        let notes = notes_repo(&dir);
        notes.ensure_repository().unwrap();
        std::fs::write(notes.root().join("note"), "content").unwrap();

        assert!(notes.push(None).unwrap_err().is_missing_remote());

        notes
            .add_origin(remote_dir.path().to_str().unwrap())
            .unwrap();
        assert_eq!(notes.push(None).unwrap(), PushOutcome::Pushed);

        // The failed push still committed the note
        let local = Repository::open(notes.root()).unwrap();
        let branch_ref = head_branch_ref(&local).unwrap();
        let local_head = local.head().unwrap().target().unwrap();
        assert_eq!(bare.refname_to_id(&branch_ref).unwrap(), local_head);

        // Up to date is not an error
        assert_eq!(notes.push(None).unwrap(), PushOutcome::Pushed);
    }

    #[test]
    fn test_push_with_url_registers_remote() {
        let dir = TempDir::new().unwrap();
        let remote_dir = TempDir::new().unwrap();
        Repository::init_bare(remote_dir.path()).unwrap();
        let notes = notes_repo(&dir);
        notes.ensure_repository().unwrap();
        std::fs::write(notes.root().join("note"), "content").unwrap();

        let url = remote_dir.path().to_str().unwrap();
        assert_eq!(notes.push(Some(url)).unwrap(), PushOutcome::Pushed);

        let repo = Repository::open(notes.root()).unwrap();
        assert_eq!(repo.find_remote("origin").unwrap().url(), Some(url));
    }

    #[test]
    fn test_push_empty_repository_is_noop() {
        let dir = TempDir::new().unwrap();
        let remote_dir = TempDir::new().unwrap();
        Repository::init_bare(remote_dir.path()).unwrap();
        let notes = notes_repo(&dir);

        let outcome = notes.push(remote_dir.path().to_str()).unwrap();
        assert_eq!(outcome, PushOutcome::NothingToPush);
    }

    #[test]
    fn test_pull_without_remote_fails() {
        let dir = TempDir::new().unwrap();
        let notes = notes_repo(&dir);

        assert!(notes.pull(None).unwrap_err().is_missing_remote());
    }

    #[test]
    fn test_pull_into_fresh_repository() {
        let remote_dir = TempDir::new().unwrap();
        Repository::init_bare(remote_dir.path()).unwrap();
        let url = remote_dir.path().to_str().unwrap();

        let first_dir = TempDir::new().unwrap();
        let first = notes_repo(&first_dir);
        first.ensure_repository().unwrap();
        std::fs::create_dir_all(first.root().join("proj")).unwrap();
        std::fs::write(first.root().join("proj").join("main"), "shared").unwrap();
        first.push(Some(url)).unwrap();

        let second_dir = TempDir::new().unwrap();
        let second = notes_repo(&second_dir);
        assert_eq!(second.pull(Some(url)).unwrap(), PullOutcome::FastForward);
        let content = std::fs::read_to_string(second.root().join("proj").join("main")).unwrap();
        assert_eq!(content, "shared");

        assert_eq!(second.pull(None).unwrap(), PullOutcome::UpToDate);
    }

    #[test]
    fn test_pull_unborn_branch_follows_remote_default() {
        let remote_dir = TempDir::new().unwrap();
        let bare = Repository::init_bare(remote_dir.path()).unwrap();
        let url = remote_dir.path().to_str().unwrap();

        let first_dir = TempDir::new().unwrap();
        let first = notes_repo(&first_dir);
        first.ensure_repository().unwrap();
        Repository::open(first.root())
            .unwrap()
            .set_head("refs/heads/trunk")
            .unwrap();
        std::fs::write(first.root().join("note"), "on trunk").unwrap();
        first.push(Some(url)).unwrap();
        bare.set_head("refs/heads/trunk").unwrap();

        let second_dir = TempDir::new().unwrap();
        let second = notes_repo(&second_dir);
        second.ensure_repository().unwrap();
        Repository::open(second.root())
            .unwrap()
            .set_head("refs/heads/local-only")
            .unwrap();

        assert_eq!(second.pull(Some(url)).unwrap(), PullOutcome::FastForward);
        assert_eq!(
            std::fs::read_to_string(second.root().join("note")).unwrap(),
            "on trunk"
        );
        let repo = Repository::open(second.root()).unwrap();
        assert_eq!(head_branch_ref(&repo).unwrap(), "refs/heads/trunk");

        assert_eq!(second.pull(None).unwrap(), PullOutcome::UpToDate);
    }

    #[test]
    fn test_ensure_remote() {
        let dir = TempDir::new().unwrap();
        let notes = notes_repo(&dir);

        assert!(notes.ensure_remote(None).unwrap_err().is_missing_remote());
        notes.ensure_remote(Some("https://example.com/notes.git")).unwrap();
        notes.ensure_remote(Some("https://example.com/other.git")).unwrap();
        notes.ensure_remote(None).unwrap();

        let repo = Repository::open(notes.root()).unwrap();
        assert_eq!(
            repo.find_remote("origin").unwrap().url(),
            Some("https://example.com/notes.git")
        );
    }

    #[test]
    fn test_pull_fast_forward_and_merge() {
        let remote_dir = TempDir::new().unwrap();
        Repository::init_bare(remote_dir.path()).unwrap();
        let url = remote_dir.path().to_str().unwrap();

        let first_dir = TempDir::new().unwrap();
        let first = notes_repo(&first_dir);
        first.ensure_repository().unwrap();
        std::fs::write(first.root().join("a"), "one").unwrap();
        first.push(Some(url)).unwrap();

        let second_dir = TempDir::new().unwrap();
        let second = notes_repo(&second_dir);
        second.pull(Some(url)).unwrap();

        // Remote moves ahead
        std::fs::write(first.root().join("a"), "two").unwrap();
        first.push(None).unwrap();
        assert_eq!(second.pull(None).unwrap(), PullOutcome::FastForward);
        assert_eq!(std::fs::read_to_string(second.root().join("a")).unwrap(), "two");

        // Both sides diverge on different files
        std::fs::write(first.root().join("b"), "from first").unwrap();
        first.push(None).unwrap();
        std::fs::write(second.root().join("c"), "from second").unwrap();
        assert_eq!(second.pull(None).unwrap(), PullOutcome::Merged);

        assert_eq!(
            std::fs::read_to_string(second.root().join("b")).unwrap(),
            "from first"
        );
        assert_eq!(
            std::fs::read_to_string(second.root().join("c")).unwrap(),
            "from second"
        );
        let repo = Repository::open(second.root()).unwrap();
        assert_eq!(repo.head().unwrap().peel_to_commit().unwrap().parent_count(), 2);
    }

    #[test]
    fn test_pull_branch_missing_on_remote() {
        let remote_dir = TempDir::new().unwrap();
        Repository::init_bare(remote_dir.path()).unwrap();

        let dir = TempDir::new().unwrap();
        let notes = notes_repo(&dir);

        let outcome = notes.pull(remote_dir.path().to_str()).unwrap();
        assert_eq!(outcome, PullOutcome::UpToDate);
    }
}
