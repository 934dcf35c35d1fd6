//! User records: clients and administrators.
//!
//! The two roles share identity and credential fields but diverge in their
//! payload (clients carry a balance and membership level, admins a tier), so
//! [`User`] is a tagged sum rather than a struct with optional fields. Code
//! that only cares about shared fields goes through the accessors; everything
//! role-specific matches on the variant.

use chrono::NaiveDateTime;

use crate::ids::UserId;

/// Role discriminant for a [`User`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserRole {
    Client,
    Admin,
}

/// A member who funds an account and reserves equipment.
#[derive(Clone, Debug, PartialEq)]
pub struct Client {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub password: String,
    pub registered_at: NaiveDateTime,
    pub account_balance: f64,
    pub user_level: String,
}

impl Client {
    /// Membership level given to new registrations.
    pub const DEFAULT_LEVEL: &'static str = "STANDARD";

    /// New client with a zero balance and the default membership level,
    /// registered now.
    pub fn new(
        user_id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            email: email.into(),
            password: password.into(),
            registered_at: chrono::Local::now().naive_local(),
            account_balance: 0.0,
            user_level: Self::DEFAULT_LEVEL.to_owned(),
        }
    }

    /// Apply a signed delta to the balance and return the new value.
    ///
    /// Deposits are positive, charges negative. The balance is allowed to go
    /// negative; credit policy belongs to the caller.
    pub fn apply_balance_delta(&mut self, delta: f64) -> f64 {
        self.account_balance += delta;
        self.account_balance
    }
}

/// A staff account with administrative rights.
#[derive(Clone, Debug, PartialEq)]
pub struct Admin {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub password: String,
    pub registered_at: NaiveDateTime,
    pub admin_tier: String,
}

impl Admin {
    pub fn new(
        user_id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        admin_tier: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            email: email.into(),
            password: password.into(),
            registered_at: chrono::Local::now().naive_local(),
            admin_tier: admin_tier.into(),
        }
    }
}

/// Any registered user, tagged by role.
#[derive(Clone, Debug, PartialEq)]
pub enum User {
    Client(Client),
    Admin(Admin),
}

impl User {
    pub fn user_id(&self) -> &UserId {
        match self {
            Self::Client(c) => &c.user_id,
            Self::Admin(a) => &a.user_id,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Self::Client(c) => &c.username,
            Self::Admin(a) => &a.username,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Self::Client(c) => &c.email,
            Self::Admin(a) => &a.email,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        let email = email.into();
        match self {
            Self::Client(c) => c.email = email,
            Self::Admin(a) => a.email = email,
        }
    }

    pub fn password(&self) -> &str {
        match self {
            Self::Client(c) => &c.password,
            Self::Admin(a) => &a.password,
        }
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        let password = password.into();
        match self {
            Self::Client(c) => c.password = password,
            Self::Admin(a) => a.password = password,
        }
    }

    pub fn registered_at(&self) -> NaiveDateTime {
        match self {
            Self::Client(c) => c.registered_at,
            Self::Admin(a) => a.registered_at,
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            Self::Client(_) => UserRole::Client,
            Self::Admin(_) => UserRole::Admin,
        }
    }

    pub fn as_client(&self) -> Option<&Client> {
        match self {
            Self::Client(c) => Some(c),
            Self::Admin(_) => None,
        }
    }

    pub fn as_client_mut(&mut self) -> Option<&mut Client> {
        match self {
            Self::Client(c) => Some(c),
            Self::Admin(_) => None,
        }
    }

    pub fn as_admin(&self) -> Option<&Admin> {
        match self {
            Self::Admin(a) => Some(a),
            Self::Client(_) => None,
        }
    }
}

impl From<Client> for User {
    fn from(client: Client) -> Self {
        Self::Client(client)
    }
}

impl From<Admin> for User {
    fn from(admin: Admin) -> Self {
        Self::Admin(admin)
    }
}
