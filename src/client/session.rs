use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use tracing::{debug, warn};

use crate::model::user::User;

/// What the session store currently knows.
#[derive(Debug)]
enum SessionState {
    /// `load()` has not run yet; no redirect decision may be made.
    Loading,
    Ready(Option<User>),
}

/// Read view handed to the route guard.
#[derive(Debug, Clone, Copy)]
pub struct SessionSnapshot<'a> {
    pub loading: bool,
    pub user: Option<&'a User>,
}

/// Owns the current authenticated user and its durable record (one JSON
/// file). Created once at the application root and passed down explicitly;
/// there is no ambient global.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    state: SessionState,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: SessionState::Loading,
        }
    }

    /// Hydrates the session from the durable record. A missing or
    /// unparseable file means "no session", never an error.
    pub fn load(&mut self) {
        let user = match fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Discarding corrupt session record");
                    None
                }
            },
            Err(_) => None,
        };
        debug!(present = user.is_some(), "Session loaded");
        self.state = SessionState::Ready(user);
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        match &self.state {
            SessionState::Loading => SessionSnapshot {
                loading: true,
                user: None,
            },
            SessionState::Ready(user) => SessionSnapshot {
                loading: false,
                user: user.as_ref(),
            },
        }
    }

    /// Current user. Panics if called before `load()` — that is a
    /// programming error, not a runtime condition.
    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Loading => panic!("session accessed before load()"),
            SessionState::Ready(user) => user.as_ref(),
        }
    }

    /// Replaces the current user and syncs the durable record: a user is
    /// serialized to the file, `None` removes it. Synchronous and
    /// idempotent.
    pub fn set_user(&mut self, user: Option<User>) -> anyhow::Result<()> {
        match &user {
            Some(u) => {
                let serialized = serde_json::to_string(u).context("serializing session")?;
                fs::write(&self.path, serialized)
                    .with_context(|| format!("writing session file {}", self.path.display()))?;
            }
            None => {
                if let Err(e) = fs::remove_file(&self.path) {
                    if e.kind() != ErrorKind::NotFound {
                        return Err(e).with_context(|| {
                            format!("removing session file {}", self.path.display())
                        });
                    }
                }
            }
        }
        self.state = SessionState::Ready(user);
        Ok(())
    }
}
