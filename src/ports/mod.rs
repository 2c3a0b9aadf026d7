pub mod cache;
pub mod hosting;
