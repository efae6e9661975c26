pub mod diagnostics;
pub mod posts;

pub use diagnostics::{DatabaseStatus, DiagnosticsReport, Probe};
pub use posts::{
    CreatePostRequest, CreatePostResponse, PostListParams, PostListResponse, PostResponse,
};
