#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::web;
use async_trait::async_trait;
use hopigo::db::{DbPool, establish_connection_pool, run_migrations};
use hopigo::domain::catalog::{NewCategory, NewSubcategory};
use hopigo::domain::provider::{NewProvider, Provider};
use hopigo::domain::types::{FullName, ProviderName, SubcategoryId, UserEmail, UserRole};
use hopigo::domain::user::{NewUser, User};
use hopigo::mailer::{EmailProvider, MailerError, OutgoingEmail};
use hopigo::models::auth::{AuthenticatedUser, issue_token};
use hopigo::models::config::ServerConfig;
use hopigo::repository::{CatalogWriter, DieselRepository, ProviderWriter, UserWriter};
use hopigo::routes;
use hopigo::services::email::bundled_templates;
use hopigo::services::rate_limit::RateLimiter;
use tempfile::TempDir;

pub const JWT_SECRET: &str = "integration-secret";

/// SQLite database in a temporary directory with every migration applied.
/// The directory, and with it the database and its WAL files, is removed on drop.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");
        run_migrations(&pool).expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn seed_user(repo: &DieselRepository, email: &str, role: UserRole) -> User {
    let new_user = NewUser::new(
        UserEmail::new(email).unwrap(),
        FullName::new("Test User").unwrap(),
    )
    .role(role);
    repo.create_user(&new_user).unwrap()
}

/// Creates a "Home" category with a "Cleaning" subcategory.
pub fn seed_subcategory(repo: &DieselRepository) -> SubcategoryId {
    let category = repo
        .create_category(&NewCategory {
            name: "Home".to_string(),
            icon: Some("home".to_string()),
            sort_order: 1,
        })
        .unwrap();
    repo.create_subcategory(&NewSubcategory {
        category_id: category.id,
        name: "Cleaning".to_string(),
    })
    .unwrap()
    .id
}

pub fn seed_provider(
    repo: &DieselRepository,
    subcategory_id: SubcategoryId,
    name: &str,
    price_from_cents: i64,
) -> Provider {
    repo.create_provider(&NewProvider {
        subcategory_id,
        name: ProviderName::new(name).unwrap(),
        description: None,
        phone: None,
        price_from_cents,
    })
    .unwrap()
}

/// Email provider that records messages instead of sending them.
#[derive(Default)]
pub struct FakeProvider {
    pub fail: bool,
    pub sent: Mutex<Vec<OutgoingEmail>>,
    counter: AtomicUsize,
}

impl FakeProvider {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailProvider for FakeProvider {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailerError> {
        if self.fail {
            return Err(MailerError::Rejected {
                status: 422,
                body: "domain not verified".to_string(),
            });
        }
        self.sent.lock().unwrap().push(email.clone());
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("fake-{n}"))
    }
}

pub fn test_config(database_url: &str) -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 0,
        database_url: database_url.to_string(),
        templates_dir: "templates/**/*".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        email_api_url: "https://api.resend.com".to_string(),
        email_api_key: "re_test".to_string(),
        email_from: "HopiGo <noreply@hopigo.app>".to_string(),
        rate_limit_max_requests: 10,
        rate_limit_window_secs: 3600,
    }
}

/// Shared application state for `actix_web::test` services.
pub struct TestApp {
    pub db: TestDb,
    pub limiter: web::Data<RateLimiter>,
    pub provider: Arc<FakeProvider>,
}

impl TestApp {
    pub fn new(name: &str) -> Self {
        Self::with_provider(name, FakeProvider::default())
    }

    pub fn with_provider(name: &str, provider: FakeProvider) -> Self {
        Self {
            db: TestDb::new(name),
            limiter: web::Data::new(RateLimiter::new(10, Duration::from_secs(3600))),
            provider: Arc::new(provider),
        }
    }

    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        let provider: Arc<dyn EmailProvider> = self.provider.clone();
        cfg.app_data(web::Data::new(self.db.repo()))
            .app_data(web::Data::new(test_config(":memory:")))
            .app_data(web::Data::new(bundled_templates().unwrap()))
            .app_data(self.limiter.clone())
            .app_data(web::Data::from(provider));
        routes::configure(cfg);
    }
}

/// Bearer header value for `user`.
pub fn bearer(user: &User) -> String {
    let authenticated = AuthenticatedUser {
        id: user.id,
        email: user.email.as_str().to_string(),
        roles: vec![user.role.as_str().to_string()],
    };
    format!(
        "Bearer {}",
        issue_token(&authenticated, JWT_SECRET, 300).unwrap()
    )
}
