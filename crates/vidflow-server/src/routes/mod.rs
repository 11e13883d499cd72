pub mod aspects;
pub mod health;
pub mod videos;
