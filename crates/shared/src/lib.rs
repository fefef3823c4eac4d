//! Wire and domain types shared by the recipe client crates.

pub mod domain;
pub mod error;
pub mod protocol;
