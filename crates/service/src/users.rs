//! Registration and account upkeep for users.

use std::collections::{HashMap, HashSet};

use makerspace_core::{Admin, Client, User, UserId};
use makerspace_store::EntityRepository;

use crate::error::{Result, ServiceError};
use crate::ids::{IdGenerator, RandomIdGenerator, unique_id};

const USER_PREFIX: &str = "USER";
const MIN_PASSWORD_LEN: usize = 6;

/// Registration, credentials, balances, and removal of users.
///
/// The service keeps the authoritative roster in memory and writes through
/// to its repository on every mutation. One instance is the single writer
/// for its backing file.
pub struct UserService {
    users: HashMap<UserId, User>,
    /// Ids deleted in this session; never handed out again.
    retired: HashSet<String>,
    repo: Box<dyn EntityRepository<User>>,
    ids: Box<dyn IdGenerator>,
}

impl UserService {
    /// Build over `repo` with random id generation, loading existing records.
    pub fn new(repo: impl EntityRepository<User> + 'static) -> Result<Self> {
        Self::with_id_generator(repo, RandomIdGenerator::new())
    }

    /// Build with a caller-chosen id generator.
    pub fn with_id_generator(
        repo: impl EntityRepository<User> + 'static,
        ids: impl IdGenerator + 'static,
    ) -> Result<Self> {
        let repo: Box<dyn EntityRepository<User>> = Box::new(repo);
        let users: HashMap<UserId, User> = repo
            .load_all()?
            .into_values()
            .map(|user| (user.user_id().clone(), user))
            .collect();
        tracing::debug!("Loaded {} users", users.len());

        Ok(Self {
            users,
            retired: HashSet::new(),
            repo,
            ids: Box::new(ids),
        })
    }

    /// Register a new client with a zero balance and the default level.
    pub fn register_client(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId> {
        self.validate_registration(username, email, password)?;
        let id = self.fresh_id()?;
        let user = User::from(Client::new(UserId::new(id), username, email, password));
        self.insert_new(user)
    }

    /// Register a new administrator at `admin_tier`.
    pub fn register_admin(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
        admin_tier: &str,
    ) -> Result<UserId> {
        self.validate_registration(username, email, password)?;
        let id = self.fresh_id()?;
        let user = User::from(Admin::new(
            UserId::new(id),
            username,
            email,
            password,
            admin_tier,
        ));
        self.insert_new(user)
    }

    fn insert_new(&mut self, user: User) -> Result<UserId> {
        self.repo.save(&user)?;
        let user_id = user.user_id().clone();
        tracing::info!("Registered {} as {}", user.username(), user_id);
        self.users.insert(user_id.clone(), user);
        Ok(user_id)
    }

    fn fresh_id(&mut self) -> Result<String> {
        let users = &self.users;
        let retired = &self.retired;
        unique_id(self.ids.as_mut(), USER_PREFIX, |candidate| {
            users.contains_key(&UserId::from(candidate)) || retired.contains(candidate)
        })
    }

    fn validate_registration(&self, username: &str, email: &str, password: &str) -> Result<()> {
        if username.trim().is_empty() {
            return Err(ServiceError::Validation(
                "username must not be empty".to_owned(),
            ));
        }
        validate_email(email)?;
        validate_password(password)?;
        if self.find_by_username(username).is_some() {
            return Err(ServiceError::UsernameTaken(username.to_owned()));
        }
        Ok(())
    }

    /// Look up one user by id.
    pub fn user(&self, id: &UserId) -> Result<&User> {
        self.users.get(id).ok_or_else(|| not_found(id))
    }

    /// All users, in no particular order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// All client-role users.
    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.users.values().filter_map(User::as_client)
    }

    /// Find a user by exact username.
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|user| user.username() == username)
    }

    /// Change a user's email after validation.
    pub fn update_email(&mut self, id: &UserId, email: &str) -> Result<()> {
        validate_email(email)?;
        let user = self.users.get_mut(id).ok_or_else(|| not_found(id))?;
        user.set_email(email);
        self.repo.update(user)?;
        tracing::info!("Updated email for {}", id);
        Ok(())
    }

    /// Change a user's password after validation.
    pub fn update_password(&mut self, id: &UserId, password: &str) -> Result<()> {
        validate_password(password)?;
        let user = self.users.get_mut(id).ok_or_else(|| not_found(id))?;
        user.set_password(password);
        self.repo.update(user)?;
        tracing::info!("Updated password for {}", id);
        Ok(())
    }

    /// Apply a signed delta to a client's balance and return the new value.
    ///
    /// Deposits are positive, charges negative. Admins carry no balance, so
    /// they are rejected.
    pub fn adjust_balance(&mut self, id: &UserId, delta: f64) -> Result<f64> {
        let user = self.users.get_mut(id).ok_or_else(|| not_found(id))?;
        let Some(client) = user.as_client_mut() else {
            return Err(ServiceError::NotAClient(id.to_string()));
        };
        let balance = client.apply_balance_delta(delta);
        self.repo.update(user)?;
        tracing::info!("Balance for {} is now {:.2}", id, balance);
        Ok(balance)
    }

    /// Change a client's membership level.
    pub fn set_user_level(&mut self, id: &UserId, level: &str) -> Result<()> {
        let user = self.users.get_mut(id).ok_or_else(|| not_found(id))?;
        let Some(client) = user.as_client_mut() else {
            return Err(ServiceError::NotAClient(id.to_string()));
        };
        client.user_level = level.to_owned();
        self.repo.update(user)?;
        tracing::info!("Set level {} for {}", level, id);
        Ok(())
    }

    /// Remove a user from the roster and the backing file.
    ///
    /// The id is retired for the rest of the session and never reissued.
    pub fn delete_user(&mut self, id: &UserId) -> Result<()> {
        if !self.users.contains_key(id) {
            return Err(not_found(id));
        }
        self.repo.delete(id.as_str())?;
        self.users.remove(id);
        self.retired.insert(id.as_str().to_owned());
        tracing::info!("Deleted user {}", id);
        Ok(())
    }
}

fn not_found(id: &UserId) -> ServiceError {
    ServiceError::NotFound {
        kind: "user",
        id: id.to_string(),
    }
}

fn validate_email(email: &str) -> Result<()> {
    if !email.contains('@') {
        return Err(ServiceError::Validation(
            "email must contain '@'".to_owned(),
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ServiceError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use makerspace_core::UserRole;
    use makerspace_store::InMemoryRepository;

    use crate::ids::SequentialIdGenerator;

    use super::*;

    /// Replays a fixed list of candidates, for steering collision paths.
    struct ScriptedIds(Vec<String>);

    impl IdGenerator for ScriptedIds {
        fn generate(&mut self, _prefix: &str) -> String {
            self.0.remove(0)
        }
    }

    fn service() -> UserService {
        UserService::with_id_generator(
            InMemoryRepository::new(),
            SequentialIdGenerator::new(),
        )
        .unwrap()
    }

    #[test]
    fn register_client_assigns_id_and_defaults() {
        let mut users = service();
        let id = users
            .register_client("ada", "ada@example.com", "hunter22")
            .unwrap();

        assert_eq!(id, UserId::new("USER_000001"));
        let client = users.user(&id).unwrap().as_client().unwrap();
        assert_eq!(client.account_balance, 0.0);
        assert_eq!(client.user_level, Client::DEFAULT_LEVEL);
    }

    #[test]
    fn register_admin_keeps_tier() {
        let mut users = service();
        let id = users
            .register_admin("grace", "grace@example.com", "s3cr3ts", "SUPER")
            .unwrap();

        let user = users.user(&id).unwrap();
        assert_eq!(user.role(), UserRole::Admin);
        assert_eq!(user.as_admin().unwrap().admin_tier, "SUPER");
    }

    #[test]
    fn registration_validates_inputs() {
        let mut users = service();

        assert!(matches!(
            users.register_client("   ", "a@example.com", "hunter22"),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            users.register_client("ada", "not-an-email", "hunter22"),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            users.register_client("ada", "a@example.com", "short"),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn usernames_are_unique_across_roles() {
        let mut users = service();
        users
            .register_client("ada", "ada@example.com", "hunter22")
            .unwrap();

        assert!(matches!(
            users.register_admin("ada", "other@example.com", "longenough", "T1"),
            Err(ServiceError::UsernameTaken(name)) if name == "ada"
        ));
    }

    #[test]
    fn clients_iterator_skips_admins() {
        let mut users = service();
        users
            .register_client("ada", "ada@example.com", "hunter22")
            .unwrap();
        users
            .register_admin("grace", "grace@example.com", "s3cr3ts", "T1")
            .unwrap();

        let names: Vec<&str> = users.clients().map(|c| c.username.as_str()).collect();
        assert_eq!(names, vec!["ada"]);
        assert_eq!(users.users().count(), 2);
    }

    #[test]
    fn adjust_balance_accumulates() {
        let mut users = service();
        let id = users
            .register_client("ada", "ada@example.com", "hunter22")
            .unwrap();

        assert_eq!(users.adjust_balance(&id, 100.0).unwrap(), 100.0);
        assert_eq!(users.adjust_balance(&id, -30.5).unwrap(), 69.5);

        let stored = users.user(&id).unwrap().as_client().unwrap();
        assert_eq!(stored.account_balance, 69.5);
    }

    #[test]
    fn balance_and_level_reject_admins() {
        let mut users = service();
        let id = users
            .register_admin("grace", "grace@example.com", "s3cr3ts", "T1")
            .unwrap();

        assert!(matches!(
            users.adjust_balance(&id, 10.0),
            Err(ServiceError::NotAClient(_))
        ));
        assert!(matches!(
            users.set_user_level(&id, "PREMIUM"),
            Err(ServiceError::NotAClient(_))
        ));
    }

    #[test]
    fn credential_updates_validate_and_stick() {
        let mut users = service();
        let id = users
            .register_client("ada", "ada@example.com", "hunter22")
            .unwrap();

        assert!(matches!(
            users.update_email(&id, "no-at-sign"),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            users.update_password(&id, "tiny"),
            Err(ServiceError::Validation(_))
        ));

        users.update_email(&id, "ada@lab.example.com").unwrap();
        users.update_password(&id, "much-better").unwrap();

        let user = users.user(&id).unwrap();
        assert_eq!(user.email(), "ada@lab.example.com");
        assert_eq!(user.password(), "much-better");
    }

    #[test]
    fn lookup_of_unknown_id_reports_not_found() {
        let users = service();
        assert!(matches!(
            users.user(&UserId::new("USER_999999")),
            Err(ServiceError::NotFound { kind: "user", .. })
        ));
    }

    #[test]
    fn delete_removes_and_retires_the_id() {
        let repo = InMemoryRepository::new();
        let scripted = ScriptedIds(vec![
            "USER_000001".to_owned(),
            "USER_000001".to_owned(),
            "USER_000002".to_owned(),
        ]);
        let mut users = UserService::with_id_generator(repo, scripted).unwrap();

        let first = users
            .register_client("ada", "ada@example.com", "hunter22")
            .unwrap();
        assert_eq!(first, UserId::new("USER_000001"));

        users.delete_user(&first).unwrap();
        assert!(users.user(&first).is_err());

        // The generator re-offers the retired id; it must be skipped.
        let second = users
            .register_client("bob", "bob@example.com", "hunter22")
            .unwrap();
        assert_eq!(second, UserId::new("USER_000002"));
    }

    #[test]
    fn delete_of_unknown_user_reports_not_found() {
        let mut users = service();
        assert!(users.delete_user(&UserId::new("USER_404404")).is_err());
    }
}
