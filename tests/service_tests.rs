//! Integration tests for the tasklight persistence core
//!
//! These tests drive the identity and task services end to end against an
//! in-memory store:
//! - registration and login round-trips
//! - email uniqueness
//! - task create/update/delete lifecycle
//! - seeding idempotency
//! - uniform error delivery through the simulated delay
//!
//! All async tests run with paused time so the 800 ms simulated latency
//! resolves instantly.

use std::sync::Arc;

use tasklight::api::MockApi;
use tasklight::auth::token;
use tasklight::error::ServiceError;
use tasklight::models::task::{CreateTask, TaskStatus, UpdateTask};
use tasklight::models::user::{RegisterUser, UpdateProfile, User};
use tasklight::services::{IdentityService, TaskService};
use tasklight::session::SessionContext;
use tasklight::store::{keys, MemoryStore, Store};
use tokio::time::Instant;
use uuid::Uuid;

const SECRET: &str = "integration-test-secret-32-bytes-min";

struct TestContext {
    store: Arc<MemoryStore>,
    identity: IdentityService,
    tasks: TaskService,
    session: SessionContext,
}

impl TestContext {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let session = SessionContext::new();
        let api = MockApi::default();

        let identity = IdentityService::new(store.clone(), api.clone(), session.clone(), SECRET);
        let tasks = TaskService::new(store.clone(), api);

        Self {
            store,
            identity,
            tasks,
            session,
        }
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> User {
        self.identity
            .register(RegisterUser {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .expect("registration should succeed")
            .data
    }
}

#[tokio::test(start_paused = true)]
async fn test_register_then_login() {
    let ctx = TestContext::new();

    let registered = ctx.register("Alice", "a@x.com", "p1").await;
    assert!(!registered.id.is_nil());

    let login = ctx.identity.login("a@x.com", "p1").await.unwrap();
    assert_eq!(login.data.user.id, registered.id);
    assert!(!login.data.token.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_login_wrong_password_is_invalid_credentials() {
    let ctx = TestContext::new();
    ctx.register("Alice", "a@x.com", "p1").await;

    let result = ctx.identity.login("a@x.com", "wrong").await;
    assert!(matches!(result, Err(ServiceError::InvalidCredentials)));

    let result = ctx.identity.login("nobody@x.com", "p1").await;
    assert!(matches!(result, Err(ServiceError::InvalidCredentials)));
}

#[tokio::test(start_paused = true)]
async fn test_registration_does_not_log_in() {
    let ctx = TestContext::new();
    ctx.register("Alice", "a@x.com", "p1").await;

    assert!(ctx.identity.current_user().unwrap().is_none());
    assert!(!ctx.session.is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn test_email_uniqueness_survives_registration_sequence() {
    let ctx = TestContext::new();
    ctx.register("First", "dup@x.com", "one").await;

    let second = ctx
        .identity
        .register(RegisterUser {
            name: "Second".to_string(),
            email: "dup@x.com".to_string(),
            password: "two".to_string(),
        })
        .await;
    assert!(matches!(second, Err(ServiceError::EmailExists)));

    // Different email still goes through
    ctx.register("Third", "other@x.com", "three").await;
}

#[tokio::test(start_paused = true)]
async fn test_login_persists_token_and_current_user() {
    let ctx = TestContext::new();
    let user = ctx.register("Alice", "a@x.com", "p1").await;
    ctx.identity.login("a@x.com", "p1").await.unwrap();

    let stored_token = ctx.store.get(keys::TOKEN).unwrap().expect("token bucket");
    let claims = token::inspect(&stored_token, SECRET).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.exp - claims.iat, 24 * 3600);

    let cached = ctx.identity.current_user().unwrap().expect("cached user");
    assert_eq!(cached.id, user.id);
    assert_eq!(ctx.identity.session().user_id(), Some(user.id));
}

#[tokio::test(start_paused = true)]
async fn test_failures_take_the_same_simulated_delay() {
    let ctx = TestContext::new();

    let start = Instant::now();
    let result = ctx.identity.login("nobody@x.com", "p").await;
    assert!(matches!(result, Err(ServiceError::InvalidCredentials)));
    assert!(start.elapsed() >= MockApi::DEFAULT_DELAY);

    let start = Instant::now();
    let result = ctx.tasks.update(Uuid::new_v4(), UpdateTask::default()).await;
    assert!(matches!(result, Err(ServiceError::TaskNotFound)));
    assert!(start.elapsed() >= MockApi::DEFAULT_DELAY);
}

#[tokio::test(start_paused = true)]
async fn test_create_then_list_round_trip() {
    let ctx = TestContext::new();
    let user = ctx.register("Alice", "a@x.com", "p1").await;

    let created = ctx
        .tasks
        .create(CreateTask {
            user_id: user.id,
            title: "Write integration tests".to_string(),
            description: "Cover the service layer".to_string(),
            status: TaskStatus::InProgress,
        })
        .await
        .unwrap()
        .data;
    assert!(!created.id.is_nil());

    let listed = ctx.tasks.list(user.id).await.unwrap().data;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].title, "Write integration tests");
    assert_eq!(listed[0].description, "Cover the service layer");
    assert_eq!(listed[0].status, TaskStatus::InProgress);
    assert_eq!(listed[0].created_at, created.created_at);
}

#[tokio::test(start_paused = true)]
async fn test_list_is_scoped_to_user() {
    let ctx = TestContext::new();
    let alice = ctx.register("Alice", "a@x.com", "p1").await;
    let bob = ctx.register("Bob", "b@x.com", "p2").await;

    for (owner, title) in [(alice.id, "hers"), (bob.id, "his")] {
        ctx.tasks
            .create(CreateTask {
                user_id: owner,
                title: title.to_string(),
                description: String::new(),
                status: TaskStatus::Todo,
            })
            .await
            .unwrap();
    }

    let hers = ctx.tasks.list(alice.id).await.unwrap().data;
    assert_eq!(hers.len(), 1);
    assert_eq!(hers[0].title, "hers");
}

#[tokio::test(start_paused = true)]
async fn test_create_rejects_unknown_user() {
    let ctx = TestContext::new();
    let stranger = Uuid::new_v4();

    let result = ctx
        .tasks
        .create(CreateTask {
            user_id: stranger,
            title: "orphan".to_string(),
            description: String::new(),
            status: TaskStatus::Todo,
        })
        .await;

    assert!(matches!(result, Err(ServiceError::UnknownUser(id)) if id == stranger));
}

#[tokio::test(start_paused = true)]
async fn test_update_changes_only_given_fields() {
    let ctx = TestContext::new();
    let user = ctx.register("Alice", "a@x.com", "p1").await;

    let created = ctx
        .tasks
        .create(CreateTask {
            user_id: user.id,
            title: "Original title".to_string(),
            description: "Original description".to_string(),
            status: TaskStatus::Todo,
        })
        .await
        .unwrap()
        .data;

    ctx.tasks
        .update(
            created.id,
            UpdateTask {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let listed = ctx.tasks.list(user.id).await.unwrap().data;
    assert_eq!(listed[0].status, TaskStatus::Completed);
    assert_eq!(listed[0].title, "Original title");
    assert_eq!(listed[0].description, "Original description");
    assert_eq!(listed[0].created_at, created.created_at);
}

#[tokio::test(start_paused = true)]
async fn test_status_editing_is_free_form() {
    let ctx = TestContext::new();
    let user = ctx.register("Alice", "a@x.com", "p1").await;

    let created = ctx
        .tasks
        .create(CreateTask {
            user_id: user.id,
            title: "t".to_string(),
            description: String::new(),
            status: TaskStatus::Completed,
        })
        .await
        .unwrap()
        .data;

    // completed -> todo is allowed; there is no transition graph
    let updated = ctx
        .tasks
        .update(
            created.id,
            UpdateTask {
                status: Some(TaskStatus::Todo),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .data;
    assert_eq!(updated.status, TaskStatus::Todo);
}

#[tokio::test(start_paused = true)]
async fn test_delete_is_idempotent() {
    let ctx = TestContext::new();
    let user = ctx.register("Alice", "a@x.com", "p1").await;

    let created = ctx
        .tasks
        .create(CreateTask {
            user_id: user.id,
            title: "doomed".to_string(),
            description: String::new(),
            status: TaskStatus::Todo,
        })
        .await
        .unwrap()
        .data;

    ctx.tasks.delete(created.id).await.unwrap();
    assert!(ctx.tasks.list(user.id).await.unwrap().data.is_empty());

    // Second delete of the same id still succeeds
    ctx.tasks.delete(created.id).await.unwrap();
    assert!(ctx.tasks.list(user.id).await.unwrap().data.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_seed_is_idempotent() {
    let ctx = TestContext::new();

    ctx.identity.seed().unwrap();
    ctx.identity.seed().unwrap();

    let demo_login = ctx
        .identity
        .login("demo@example.com", "password123")
        .await
        .unwrap();
    let demo_tasks = ctx.tasks.list(demo_login.data.user.id).await.unwrap().data;
    assert_eq!(demo_tasks.len(), 3);

    let statuses: Vec<TaskStatus> = demo_tasks.iter().map(|t| t.status).collect();
    assert!(statuses.contains(&TaskStatus::Completed));
    assert!(statuses.contains(&TaskStatus::InProgress));
    assert!(statuses.contains(&TaskStatus::Todo));
}

#[tokio::test(start_paused = true)]
async fn test_seed_skips_populated_store() {
    let ctx = TestContext::new();
    ctx.register("Alice", "a@x.com", "p1").await;

    ctx.identity.seed().unwrap();

    let demo = ctx.identity.login("demo@example.com", "password123").await;
    assert!(matches!(demo, Err(ServiceError::InvalidCredentials)));
}

#[tokio::test(start_paused = true)]
async fn test_update_profile_without_session() {
    let ctx = TestContext::new();

    let result = ctx
        .identity
        .update_profile(UpdateProfile {
            name: Some("Ghost".to_string()),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(ServiceError::NoSession)));
}

#[tokio::test(start_paused = true)]
async fn test_update_profile_merges_and_persists() {
    let ctx = TestContext::new();
    let user = ctx.register("Alice", "a@x.com", "p1").await;
    ctx.identity.login("a@x.com", "p1").await.unwrap();

    let updated = ctx
        .identity
        .update_profile(UpdateProfile {
            name: Some("Alice B".to_string()),
            ..Default::default()
        })
        .await
        .unwrap()
        .data;

    assert_eq!(updated.id, user.id);
    assert_eq!(updated.name, "Alice B");
    assert_eq!(updated.email, "a@x.com");

    // The users collection, the cache, and the session all agree
    let cached = ctx.identity.current_user().unwrap().unwrap();
    assert_eq!(cached.name, "Alice B");
    assert_eq!(ctx.session.user().unwrap().name, "Alice B");

    // Re-login with the old password still works; the hash is untouched
    ctx.identity.logout().unwrap();
    let relogin = ctx.identity.login("a@x.com", "p1").await.unwrap();
    assert_eq!(relogin.data.user.name, "Alice B");
}

#[tokio::test(start_paused = true)]
async fn test_update_profile_rejects_taken_email() {
    let ctx = TestContext::new();
    ctx.register("Alice", "a@x.com", "p1").await;
    ctx.register("Bob", "b@x.com", "p2").await;
    ctx.identity.login("a@x.com", "p1").await.unwrap();

    let result = ctx
        .identity
        .update_profile(UpdateProfile {
            email: Some("b@x.com".to_string()),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(ServiceError::EmailExists)));

    // Nothing was persisted on failure
    let cached = ctx.identity.current_user().unwrap().unwrap();
    assert_eq!(cached.email, "a@x.com");
}

#[tokio::test(start_paused = true)]
async fn test_logout_clears_token_and_cache() {
    let ctx = TestContext::new();
    ctx.register("Alice", "a@x.com", "p1").await;
    ctx.identity.login("a@x.com", "p1").await.unwrap();

    ctx.identity.logout().unwrap();

    assert!(ctx.store.get(keys::TOKEN).unwrap().is_none());
    assert!(ctx.identity.current_user().unwrap().is_none());
    assert!(!ctx.session.is_authenticated());

    // Logging out twice is a no-op
    ctx.identity.logout().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_register_validates_input() {
    let ctx = TestContext::new();

    let result = ctx
        .identity
        .register(RegisterUser {
            name: "Alice".to_string(),
            email: "not-an-email".to_string(),
            password: "p1".to_string(),
        })
        .await;

    assert!(matches!(result, Err(ServiceError::Validation(_))));
}
