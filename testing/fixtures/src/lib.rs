//! Shared schemas and seed stores for denorm integration tests.
//!
//! `marketing` models an ad platform: accounts own users, audiences target a
//! product and a list of build states, files point at their creator.
//! `library` is a small cyclic graph with a polymorphic `holder` union.

pub mod library;
pub mod marketing;
