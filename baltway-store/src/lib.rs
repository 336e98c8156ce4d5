pub mod app_config;
pub mod blog_repo;
pub mod database;
pub mod settings_repo;

pub use blog_repo::PgBlogRepository;
pub use database::DbClient;
pub use settings_repo::PgSettingsRepository;
