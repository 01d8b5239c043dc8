pub mod data;
pub mod health;
pub mod not_found;
pub mod version;
