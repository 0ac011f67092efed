//! Git access: commit enumeration, messages and branch resolution.

pub mod repository;

pub use repository::GitRepository;

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 8;
