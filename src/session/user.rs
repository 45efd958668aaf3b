//! User accounts, roles, and password hashing.

use std::fmt;
use std::str::FromStr;

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use serde_json::{json, Value};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::StatehubError;

/// Default PBKDF2 rounds for password hashing.
pub const DEFAULT_KDF_ROUNDS: u32 = 100_000;

/// Byte length of password hashes and salts.
const DIGEST_LEN: usize = 32;

/// Access role attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Admin,
    #[default]
    Customer,
    Employee,
}

impl Role {
    /// All known roles.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Customer, Role::Employee];

    /// The lowercase name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
            Role::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = StatehubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "customer" => Ok(Role::Customer),
            "employee" => Ok(Role::Employee),
            other => Err(StatehubError::InvalidRole(other.into())),
        }
    }
}

/// A registered user account.
///
/// Passwords are stored as salted PBKDF2-HMAC-SHA256 hashes. The hash
/// and salt never leave this type; the public JSON view carries only
/// id, username, and role.
#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    username: String,
    hash: [u8; DIGEST_LEN],
    salt: [u8; DIGEST_LEN],
    rounds: u32,
    role: Role,
}

impl User {
    /// Create a user with a freshly salted password hash.
    pub fn new(username: impl Into<String>, password: &str, role: Role) -> Self {
        Self::with_rounds(username, password, role, DEFAULT_KDF_ROUNDS)
    }

    /// Create a user hashing the password with a specific round count.
    pub fn with_rounds(
        username: impl Into<String>,
        password: &str,
        role: Role,
        rounds: u32,
    ) -> Self {
        let mut salt = [0u8; DIGEST_LEN];
        OsRng.fill_bytes(&mut salt);

        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            hash: derive_hash(password, &salt, rounds),
            salt,
            rounds,
            role,
        }
    }

    /// Create a user with a caller-supplied id.
    pub fn with_id(id: Uuid, username: impl Into<String>, password: &str, role: Role) -> Self {
        Self {
            id,
            ..Self::new(username, password, role)
        }
    }

    /// The user's unique id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The user's unique username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The user's role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// PBKDF2 rounds the stored hash was derived with.
    pub fn kdf_rounds(&self) -> u32 {
        self.rounds
    }

    /// Check a password against the stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        derive_hash(password, &self.salt, self.rounds) == self.hash
    }

    /// Public JSON view of the account.
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id.to_string(),
            "username": self.username,
            "role": self.role.to_string(),
        })
    }
}

fn derive_hash(password: &str, salt: &[u8], rounds: u32) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, rounds, &mut out);
    out
}
