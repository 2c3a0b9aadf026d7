pub mod cache;
pub mod github;
