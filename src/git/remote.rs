//! Git remote operations.

use super::git_error;
use crate::context::branch_from_ref;
use crate::{Error, Result};
use git2::{
    Cred, CredentialType, Direction, ErrorCode, FetchOptions, PushOptions, RemoteCallbacks,
    Repository,
};
use tracing::{debug, info};

/// Name of the remote the notes repository syncs with.
pub const DEFAULT_REMOTE: &str = "origin";

/// Upper bound on credential callback invocations per transfer.
///
/// libgit2 keeps asking while the callback returns credentials, so a wrong
/// password would otherwise loop forever.
const MAX_CREDENTIAL_ATTEMPTS: usize = 3;

/// Manages the remote of the notes repository.
pub struct RemoteManager<'repo> {
    /// The opened notes repository.
    repo: &'repo Repository,
    /// Remote name.
    name: String,
}

impl<'repo> RemoteManager<'repo> {
    /// Creates a remote manager for `origin`.
    #[must_use]
    pub fn new(repo: &'repo Repository) -> Self {
        Self {
            repo,
            name: DEFAULT_REMOTE.to_string(),
        }
    }

    /// Returns the remote name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the URL of the remote, or `None` if it is not registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository configuration cannot be read.
    pub fn url(&self) -> Result<Option<String>> {
        match self.repo.find_remote(&self.name) {
            Ok(remote) => Ok(remote.url().map(String::from)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(git_error("find_remote", &e)),
        }
    }

    /// Registers the remote, or updates its URL if it already exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadParameter`] for an empty URL, or an error if the
    /// repository configuration cannot be written.
    pub fn add(&self, url: &str) -> Result<()> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::BadParameter("remote URL is empty".to_string()));
        }

        if self.url()?.is_some() {
            self.repo
                .remote_set_url(&self.name, url)
                .map_err(|e| git_error("set_remote_url", &e))?;
            info!(remote = %self.name, url, "updated remote URL");
        } else {
            self.repo
                .remote(&self.name, url)
                .map_err(|e| git_error("add_remote", &e))?;
            info!(remote = %self.name, url, "added remote");
        }
        Ok(())
    }

    /// Ensures the remote is registered.
    ///
    /// If it is missing and `url` is given, registers it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRemoteConfigured`] if the remote is missing and no
    /// URL is available.
    pub fn ensure(&self, url: Option<&str>) -> Result<()> {
        if self.url()?.is_some() {
            return Ok(());
        }
        match url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => self.add(url),
            None => Err(Error::NoRemoteConfigured {
                remote: self.name.clone(),
            }),
        }
    }

    /// Pushes a local branch reference to the same name on the remote.
    ///
    /// An up-to-date remote is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer fails or the remote rejects the update.
    pub fn push(&self, branch_ref: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(&self.name)
            .map_err(|e| self.missing_or(e, "find_remote"))?;

        let mut callbacks = remote_callbacks(self.repo);
        callbacks.push_update_reference(|refname, status| match status {
            Some(message) => Err(git2::Error::from_str(&format!(
                "remote rejected {refname}: {message}"
            ))),
            None => Ok(()),
        });

        let mut push_opts = PushOptions::new();
        push_opts.remote_callbacks(callbacks);

        // Don't call connect() separately - push() handles the connection with callbacks
        let refspec = format!("{branch_ref}:{branch_ref}");
        debug!(remote = %self.name, refspec = %refspec, "pushing");
        remote
            .push(&[refspec.as_str()], Some(&mut push_opts))
            .map_err(|e| git_error("push", &e))
    }

    /// Fetches `branch` from the remote into `refs/remotes/<remote>/<branch>`.
    ///
    /// Returns the name of the remote-tracking reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer fails.
    pub fn fetch(&self, branch: &str) -> Result<String> {
        let mut remote = self
            .repo
            .find_remote(&self.name)
            .map_err(|e| self.missing_or(e, "find_remote"))?;

        let mut fetch_opts = FetchOptions::new();
        fetch_opts.remote_callbacks(remote_callbacks(self.repo));

        let tracking_ref = format!("refs/remotes/{}/{branch}", self.name);
        let refspec = format!("+refs/heads/{branch}:{tracking_ref}");
        debug!(remote = %self.name, refspec = %refspec, "fetching");
        remote
            .fetch(&[refspec.as_str()], Some(&mut fetch_opts), None)
            .map_err(|e| git_error("fetch", &e))?;

        Ok(tracking_ref)
    }

    /// Asks the remote which branch its HEAD points to.
    ///
    /// Returns the full reference, e.g. `refs/heads/main`, or `None` when the
    /// remote has no branches yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote cannot be reached.
    pub fn default_branch(&self) -> Result<Option<String>> {
        let mut remote = self
            .repo
            .find_remote(&self.name)
            .map_err(|e| self.missing_or(e, "find_remote"))?;

        let connection = remote
            .connect_auth(Direction::Fetch, Some(remote_callbacks(self.repo)), None)
            .map_err(|e| git_error("connect", &e))?;
        let default = match connection.default_branch() {
            Ok(name) => name
                .as_str()
                .filter(|name| branch_from_ref(name).is_some())
                .map(String::from),
            Err(e) if e.code() == ErrorCode::NotFound => None,
            Err(e) => return Err(git_error("default_branch", &e)),
        };
        debug!(remote = %self.name, default = ?default, "remote default branch");
        Ok(default)
    }

    fn missing_or(&self, e: git2::Error, operation: &str) -> Error {
        if e.code() == ErrorCode::NotFound {
            Error::NoRemoteConfigured {
                remote: self.name.clone(),
            }
        } else {
            git_error(operation, &e)
        }
    }
}

/// Builds transport callbacks that authenticate the way the git CLI would.
///
/// - SSH URLs use keys from the ssh agent
/// - HTTPS URLs use the configured credential helper
fn remote_callbacks(repo: &Repository) -> RemoteCallbacks<'static> {
    let config = repo
        .config()
        .or_else(|_| git2::Config::open_default())
        .ok();
    let mut attempts = 0;

    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |url, username_from_url, allowed| {
        attempts += 1;
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str(&format!(
                "authentication failed for {url}"
            )));
        }

        let user = username_from_url.unwrap_or("git");
        if allowed.contains(CredentialType::USERNAME) {
            return Cred::username(user);
        }
        if allowed.contains(CredentialType::SSH_KEY) {
            return Cred::ssh_key_from_agent(user);
        }
        if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
            if let Some(cfg) = &config {
                return Cred::credential_helper(cfg, url, username_from_url);
            }
        }
        Cred::default()
    });
    callbacks
}
