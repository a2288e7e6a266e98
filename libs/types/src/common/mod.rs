//! Shared support types

pub mod errors;
