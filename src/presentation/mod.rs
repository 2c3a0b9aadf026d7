pub mod dto;
pub mod handlers;
pub mod markdown;
pub mod routes;
pub mod templates;
pub mod theme;
