/// Identity service
///
/// Manages user records, the session token, and the current-user cache.
/// All state lives in the injected store; the service itself only holds
/// configuration and the shared `SessionContext`.
///
/// Failed operations leave persisted state unchanged: nothing is written
/// until credentials are verified and input is validated.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tasklight::api::MockApi;
/// use tasklight::models::user::RegisterUser;
/// use tasklight::services::IdentityService;
/// use tasklight::session::SessionContext;
/// use tasklight::store::MemoryStore;
///
/// # async fn example() -> tasklight::error::ServiceResult<()> {
/// let identity = IdentityService::new(
///     Arc::new(MemoryStore::new()),
///     MockApi::default(),
///     SessionContext::new(),
///     "demo-secret-key-at-least-32-bytes-long",
/// );
///
/// identity
///     .register(RegisterUser {
///         name: "Alice".to_string(),
///         email: "a@x.com".to_string(),
///         password: "p1".to_string(),
///     })
///     .await?;
///
/// let login = identity.login("a@x.com", "p1").await?;
/// assert!(!login.data.token.is_empty());
/// # Ok(())
/// # }
/// ```
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use validator::Validate;

use crate::api::{MockApi, Response};
use crate::auth::{password, token};
use crate::error::{ServiceError, ServiceResult};
use crate::models::task::{CreateTask, Task, TaskStatus};
use crate::models::user::{RegisterUser, UpdateProfile, User};
use crate::session::SessionContext;
use crate::store::{self, keys, Store};

/// Successful login payload: the user plus the issued token
#[derive(Debug, Clone, Serialize)]
pub struct LoginData {
    /// The authenticated user
    pub user: User,

    /// The session token written to storage
    pub token: String,
}

/// Service managing users and the current session
#[derive(Clone)]
pub struct IdentityService {
    store: Arc<dyn Store>,
    api: MockApi,
    session: SessionContext,
    token_secret: String,
}

impl IdentityService {
    /// Creates a service over the given store and session context
    pub fn new(
        store: Arc<dyn Store>,
        api: MockApi,
        session: SessionContext,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            store,
            api,
            session,
            token_secret: token_secret.into(),
        }
    }

    /// The session context this service keeps in sync
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Authenticates a user by email and password
    ///
    /// Scans stored users for an exact (case-sensitive) email match and
    /// verifies the password against the stored hash. On success the
    /// session token and current-user cache are persisted and the shared
    /// session context is refreshed.
    ///
    /// # Errors
    ///
    /// `ServiceError::InvalidCredentials` when no user matches. The error
    /// arrives after the same simulated delay as a success.
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<Response<LoginData>> {
        let outcome = self.try_login(email, password);
        self.api.call(outcome).await
    }

    fn try_login(&self, email: &str, password_input: &str) -> ServiceResult<LoginData> {
        let users = self.read_users()?;

        let Some(user) = users.into_iter().find(|u| u.email == email) else {
            warn!(email, "login failed: unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        if !password::verify_password(password_input, &user.password_hash)? {
            warn!(user_id = %user.id, "login failed: wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = token::issue(&token::SessionClaims::new(&user), &self.token_secret)?;
        self.store.set(keys::TOKEN, &token)?;
        store::write_json(self.store.as_ref(), keys::CURRENT_USER, &user)?;
        self.session.set(user.clone());

        info!(user_id = %user.id, "login succeeded");
        Ok(LoginData { user, token })
    }

    /// Registers a new user
    ///
    /// Validates the input, rejects duplicate emails, hashes the
    /// password, and appends the user to the stored collection.
    /// Registration does not log the user in.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Validation` for malformed input
    /// - `ServiceError::EmailExists` when the email is already taken
    pub async fn register(&self, data: RegisterUser) -> ServiceResult<Response<User>> {
        let outcome = self.try_register(data);
        self.api.call(outcome).await
    }

    fn try_register(&self, data: RegisterUser) -> ServiceResult<User> {
        data.validate()?;

        let mut users = self.read_users()?;
        if users.iter().any(|u| u.email == data.email) {
            warn!(email = %data.email, "registration rejected: duplicate email");
            return Err(ServiceError::EmailExists);
        }

        let password_hash = password::hash_password(&data.password)?;
        let user = User::new(data.name, data.email, password_hash);

        users.push(user.clone());
        store::write_json(self.store.as_ref(), keys::USERS, &users)?;

        info!(user_id = %user.id, "registered user");
        Ok(user)
    }

    /// Ends the current session
    ///
    /// Removes the session token and the current-user cache and clears
    /// the shared session context. Completes synchronously; logging out
    /// twice is a no-op.
    pub fn logout(&self) -> ServiceResult<()> {
        self.store.remove(keys::TOKEN)?;
        self.store.remove(keys::CURRENT_USER)?;
        self.session.clear();
        info!("logged out");
        Ok(())
    }

    /// Reads the cached current user, if any
    ///
    /// Completes synchronously and performs no token validation. Also
    /// rehydrates the shared session context, so a collaborator calling
    /// this at startup restores the previous session.
    pub fn current_user(&self) -> ServiceResult<Option<User>> {
        let user: Option<User> = store::read_json(self.store.as_ref(), keys::CURRENT_USER)?;
        match &user {
            Some(u) => self.session.set(u.clone()),
            None => self.session.clear(),
        }
        Ok(user)
    }

    /// Applies a partial update to the current user's profile
    ///
    /// Shallow-merges `updates` into the cached current user, replaces
    /// the matching record in the users collection, and persists both.
    ///
    /// # Errors
    ///
    /// - `ServiceError::NoSession` when no current user is cached
    /// - `ServiceError::EmailExists` when the new email belongs to
    ///   another user
    pub async fn update_profile(&self, updates: UpdateProfile) -> ServiceResult<Response<User>> {
        let outcome = self.try_update_profile(updates);
        self.api.call(outcome).await
    }

    fn try_update_profile(&self, updates: UpdateProfile) -> ServiceResult<User> {
        let Some(mut user) = store::read_json::<User>(self.store.as_ref(), keys::CURRENT_USER)?
        else {
            return Err(ServiceError::NoSession);
        };

        updates.apply(&mut user);

        let mut users = self.read_users()?;
        if users
            .iter()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(ServiceError::EmailExists);
        }

        let Some(stored) = users.iter_mut().find(|u| u.id == user.id) else {
            return Err(ServiceError::UnknownUser(user.id));
        };
        *stored = user.clone();

        store::write_json(self.store.as_ref(), keys::USERS, &users)?;
        store::write_json(self.store.as_ref(), keys::CURRENT_USER, &user)?;
        self.session.set(user.clone());

        info!(user_id = %user.id, "profile updated");
        Ok(user)
    }

    /// Seeds demo data on first run
    ///
    /// When no users exist, creates one demo account
    /// (`demo@example.com` / `password123`) and three demo tasks.
    /// Idempotent: a non-empty users collection makes this a no-op, so
    /// calling it twice never duplicates demo data. Run once at process
    /// start before any other service call.
    pub fn seed(&self) -> ServiceResult<()> {
        if !self.read_users()?.is_empty() {
            return Ok(());
        }

        let password_hash = password::hash_password("password123")?;
        let demo = User::new(
            "Demo User".to_string(),
            "demo@example.com".to_string(),
            password_hash,
        );

        let demo_tasks: Vec<Task> = [
            (
                "Complete Project Architecture",
                "Define the core components and state management strategy.",
                TaskStatus::Completed,
            ),
            (
                "Implement Authentication",
                "Build login and registration flows with mock backend.",
                TaskStatus::InProgress,
            ),
            (
                "Design System Polish",
                "Fine-tune glassmorphism and animations for premium feel.",
                TaskStatus::Todo,
            ),
        ]
        .into_iter()
        .map(|(title, description, status)| {
            Task::new(CreateTask {
                user_id: demo.id,
                title: title.to_string(),
                description: description.to_string(),
                status,
            })
        })
        .collect();

        store::write_json(self.store.as_ref(), keys::USERS, &vec![demo.clone()])?;
        store::write_json(self.store.as_ref(), keys::TASKS, &demo_tasks)?;

        info!(user_id = %demo.id, "seeded demo data");
        Ok(())
    }

    fn read_users(&self) -> ServiceResult<Vec<User>> {
        Ok(store::read_json(self.store.as_ref(), keys::USERS)?.unwrap_or_default())
    }
}
