//! Data types and serialization.

pub mod check;
pub mod commit;
pub mod yaml;

pub use check::*;
pub use commit::RawCommit;
pub use yaml::*;
