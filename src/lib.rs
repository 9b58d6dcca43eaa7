//! Pokedex CLI Library
//!
//! An interactive explorer for PokeAPI. Responses are memoized in an
//! in-memory TTL cache that sits between the command layer and the network.

pub mod cache;
pub mod catch;
pub mod cli;
pub mod commands;
pub mod data;
pub mod logging;
pub mod repl;
pub mod session;
