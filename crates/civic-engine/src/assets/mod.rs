pub mod manifest;
pub mod procedural;
pub mod registry;
pub mod store;
