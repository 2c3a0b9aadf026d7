pub mod card;
pub mod catalog;
pub mod extractor;
pub mod pagination;
pub mod sorting;
