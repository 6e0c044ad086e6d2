//! Storage layer: session lifecycle, schema, and repositories

pub mod migrations;
pub mod repos;
pub mod session;

pub use repos::TodoRepo;
pub use session::{DbError, Session, SessionManager, DEFAULT_MAX_CONNECTIONS};
