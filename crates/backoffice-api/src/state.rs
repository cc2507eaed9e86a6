//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use backoffice_auth::JwtDecoder;
use backoffice_core::config::AppConfig;
use backoffice_core::traits::IdentityResolver;
use backoffice_database::DatabasePool;
use backoffice_database::repositories::{
    AssignmentRepository, CategoryRepository, CustomerRepository, ProductRepository,
    UserRepository,
};
use backoffice_service::{
    AssignmentService, AuthService, BillingService, CategoryService, CustomerService,
    ExportService, ProductService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: Arc<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer credential resolver used by the `AuthUser` extractor
    pub identity: Arc<dyn IdentityResolver>,
    /// JWT decoder, used by the verify endpoint to echo claims
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Login service
    pub auth_service: Arc<AuthService>,
    /// Customer management
    pub customer_service: Arc<CustomerService>,
    /// Category management
    pub category_service: Arc<CategoryService>,
    /// Product management
    pub product_service: Arc<ProductService>,
    /// Assignment engine
    pub assignment_service: Arc<AssignmentService>,
    /// Billing view builder
    pub billing_service: Arc<BillingService>,
    /// Excel export
    pub export_service: Arc<ExportService>,
}

impl AppState {
    /// Wire repositories and services on top of an open pool.
    pub fn new(config: AppConfig, db: DatabasePool) -> Self {
        let db = Arc::new(db);
        let pool = db.pool().clone();

        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let customer_repo = Arc::new(CustomerRepository::new(pool.clone()));
        let category_repo = Arc::new(CategoryRepository::new(pool.clone()));
        let product_repo = Arc::new(ProductRepository::new(pool.clone()));
        let assignment_repo = Arc::new(AssignmentRepository::new(pool));

        let identity: Arc<dyn IdentityResolver> =
            Arc::new(backoffice_auth::JwtIdentityResolver::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let auth_service = Arc::new(AuthService::new(Arc::clone(&user_repo), &config.auth));
        let customer_service = Arc::new(CustomerService::new(Arc::clone(&customer_repo)));
        let category_service = Arc::new(CategoryService::new(Arc::clone(&db), category_repo));
        let product_service = Arc::new(ProductService::new(product_repo, &config.catalog));
        let assignment_service = Arc::new(AssignmentService::new(
            Arc::clone(&db),
            Arc::clone(&assignment_repo),
        ));
        let billing_service = Arc::new(BillingService::new(
            Arc::clone(&customer_repo),
            Arc::clone(&assignment_repo),
        ));
        let export_service = Arc::new(ExportService::new(
            customer_repo,
            assignment_repo,
            config.export.clone(),
        ));

        Self {
            config: Arc::new(config),
            db,
            identity,
            jwt_decoder,
            auth_service,
            customer_service,
            category_service,
            product_service,
            assignment_service,
            billing_service,
            export_service,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}
