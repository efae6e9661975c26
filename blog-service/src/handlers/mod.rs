pub mod diagnostics;
pub mod health;
pub mod posts;
pub mod root;

pub use diagnostics::test_database;
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use posts::{create_post, list_posts};
pub use root::{hello, root};
