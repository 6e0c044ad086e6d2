//! Repositories, one per table

pub mod todos;

pub use todos::TodoRepo;
