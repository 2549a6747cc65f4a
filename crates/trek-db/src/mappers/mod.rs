//! Entity <-> model mappers

mod chat;
mod location;
mod relation;
mod user;

pub use location::location_type_to_str;
pub use relation::relation_type_to_str;
