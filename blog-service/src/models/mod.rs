pub mod post;

pub use post::{Post, PostRecord, POST_COLLECTION};
