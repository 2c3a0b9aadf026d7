pub mod entities;
pub mod fallback;
pub mod readme;
pub mod value_objects;
