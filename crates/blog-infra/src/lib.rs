//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//! Posts live in process memory only and are lost on restart.

pub mod posts;

pub use posts::InMemoryPostRepository;
