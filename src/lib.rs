pub mod amenities;
pub mod contact;
pub mod description;
pub mod dom;
pub mod error;
pub mod export;
pub mod extractor;
pub mod fetch;
pub mod locator;
pub mod models;
pub mod sanitizer;
pub mod template;
