//! Pure helpers for building and reading A2A types.
//!
//! Nothing in this module touches the network. The only fallible builder is
//! [`file_part`], which rejects files with neither bytes nor a URI.

pub mod artifact;
pub mod constants;
pub mod message;
pub mod parts;
pub mod task;

pub use artifact::*;
pub use constants::*;
pub use message::*;
pub use parts::*;
pub use task::*;
