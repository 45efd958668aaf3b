//! Session module state: user registry, live sessions, current login.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::error::StatehubError;
use crate::session::id::SessionId;
use crate::session::user::{Role, User};
use crate::store::StateModule;
use crate::Result;

/// Default session lifetime in hours.
pub const DEFAULT_TTL_HOURS: i64 = 3;

/// An authenticated session with an expiry deadline.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    user_id: Uuid,
    expire: DateTime<Utc>,
}

impl Session {
    fn new(user_id: Uuid, expire: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::new(),
            user_id,
            expire,
        }
    }

    /// The session's unique id.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Id of the user the session belongs to.
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// The expiry deadline.
    pub fn expire(&self) -> DateTime<Utc> {
        self.expire
    }

    /// Whether the expiry deadline has passed.
    pub fn expired(&self) -> bool {
        self.expire < Utc::now()
    }
}

/// State of the session module: registered users, live sessions, and
/// the current login.
///
/// Expired sessions are purged lazily: looking one up removes it and
/// reports it as not found.
pub struct SessionState {
    users: HashMap<Uuid, User>,
    sessions: HashMap<SessionId, Session>,
    current: Option<SessionId>,
    ttl: Duration,
    kdf_rounds: u32,
}

impl SessionState {
    /// Create an empty session module with the given session lifetime.
    pub fn new(ttl: Duration) -> Self {
        Self {
            users: HashMap::new(),
            sessions: HashMap::new(),
            current: None,
            ttl,
            kdf_rounds: crate::session::user::DEFAULT_KDF_ROUNDS,
        }
    }

    /// Override the PBKDF2 round count used for new accounts.
    pub fn with_kdf_rounds(mut self, rounds: u32) -> Self {
        self.kdf_rounds = rounds;
        self
    }

    /// Register a new user account. Rejects a taken username.
    pub fn register_user(&mut self, username: &str, password: &str, role: Role) -> Result<Uuid> {
        if !self.username_available(username) {
            return Err(StatehubError::UsernameTaken(username.into()));
        }

        let user = User::with_rounds(username, password, role, self.kdf_rounds);
        let id = user.id();
        self.users.insert(id, user);
        debug!(username, %role, "user registered");
        Ok(id)
    }

    /// Whether no registered user holds the username.
    pub fn username_available(&self, username: &str) -> bool {
        !self.users.values().any(|u| u.username() == username)
    }

    /// Look up a user by id.
    pub fn user_by_id(&self, id: Uuid) -> Result<&User> {
        self.users
            .get(&id)
            .ok_or_else(|| StatehubError::UserNotFound(id.to_string()))
    }

    /// Look up a user from the string form of its id.
    pub fn user_by_str(&self, id: &str) -> Result<&User> {
        let id = Uuid::parse_str(id).map_err(|_| StatehubError::InvalidId(id.into()))?;
        self.user_by_id(id)
    }

    /// Look up a user by username.
    pub fn user_by_username(&self, username: &str) -> Result<&User> {
        self.users
            .values()
            .find(|u| u.username() == username)
            .ok_or_else(|| StatehubError::UserNotFound(username.into()))
    }

    /// All users holding the given role.
    pub fn users_by_role(&self, role: Role) -> Vec<&User> {
        self.users.values().filter(|u| u.role() == role).collect()
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Create a session for the named user.
    ///
    /// `expire` defaults to the configured lifetime from now.
    pub fn new_session(
        &mut self,
        username: &str,
        expire: Option<DateTime<Utc>>,
    ) -> Result<SessionId> {
        let user_id = self.user_by_username(username)?.id();
        let expire = expire.unwrap_or_else(|| Utc::now() + self.ttl);

        let session = Session::new(user_id, expire);
        let id = session.id();
        self.sessions.insert(id, session);
        debug!(%id, username, "session created");
        Ok(id)
    }

    /// Look up a session by id.
    ///
    /// An expired session is removed on access and then reported as
    /// not found.
    pub fn session_by_id(&mut self, id: SessionId) -> Result<&Session> {
        let expired = match self.sessions.get(&id) {
            None => return Err(StatehubError::SessionNotFound(id.to_string())),
            Some(session) => session.expired(),
        };

        if expired {
            self.sessions.remove(&id);
            if self.current == Some(id) {
                self.current = None;
            }
            debug!(%id, "expired session purged");
            return Err(StatehubError::SessionNotFound(id.to_string()));
        }

        self.sessions
            .get(&id)
            .ok_or_else(|| StatehubError::SessionNotFound(id.to_string()))
    }

    /// Look up a session from its string form.
    pub fn session_by_str(&mut self, id: &str) -> Result<&Session> {
        let id: SessionId = id.parse()?;
        self.session_by_id(id)
    }

    /// Remove every expired session. Returns the number removed.
    pub fn purge_expired(&mut self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.expired());

        if let Some(current) = self.current {
            if !self.sessions.contains_key(&current) {
                self.current = None;
            }
        }

        let removed = before - self.sessions.len();
        if removed > 0 {
            debug!(removed, "expired sessions purged");
        }
        removed
    }

    /// Number of live sessions (including any not yet lazily purged).
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Verify credentials and open a new current session.
    pub fn login(&mut self, username: &str, password: &str) -> Result<SessionId> {
        let user = self.user_by_username(username)?;
        if !user.verify_password(password) {
            return Err(StatehubError::InvalidCredentials);
        }

        let id = self.new_session(username, None)?;
        self.current = Some(id);
        debug!(%id, username, "login");
        Ok(id)
    }

    /// Close the current session, if any. Returns its id.
    pub fn logout(&mut self) -> Option<SessionId> {
        let id = self.current.take()?;
        self.sessions.remove(&id);
        debug!(%id, "logout");
        Some(id)
    }

    /// The currently logged-in session, if it is still live.
    ///
    /// An expired current session is purged and the login cleared.
    pub fn current_session(&mut self) -> Option<&Session> {
        let id = self.current?;
        if self.session_by_id(id).is_err() {
            return None;
        }
        self.sessions.get(&id)
    }

    /// JSON view of a session, including its owning user.
    pub fn session_json(&self, session: &Session) -> Value {
        let user = self
            .users
            .get(&session.user_id())
            .map(User::to_json)
            .unwrap_or(Value::Null);

        json!({
            "id": session.id().to_string(),
            "user": user,
            "expire": session.expire().timestamp(),
        })
    }
}

impl StateModule for SessionState {
    const NAME: &'static str = "session";

    fn snapshot(&self) -> Value {
        let mut users: Vec<&User> = self.users.values().collect();
        users.sort_by(|a, b| a.username().cmp(b.username()));

        let mut sessions: Vec<&Session> = self.sessions.values().collect();
        sessions.sort_by_key(|s| s.id().to_string());

        json!({
            "users": users.iter().map(|u| u.to_json()).collect::<Vec<_>>(),
            "sessions": sessions
                .iter()
                .map(|s| self.session_json(s))
                .collect::<Vec<_>>(),
            "current": self.current.map(|id| id.to_string()),
        })
    }
}
