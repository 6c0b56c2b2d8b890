//! # Bluff Duel
//!
//! Trains and evaluates small decision-making agents that play a
//! single-round, two-phase leader/follower betting game under uncertainty.
//! Agents are trained by coordinate-wise finite-difference ascent against a
//! roster of opponents (no backpropagation), and can be serialized to an
//! exact binary format so their state can cross a worker boundary or be
//! persisted to disk.
//!
//! ## Modules
//!
//! - [`game`] - Monte Carlo hand simulator and shared protocol types
//! - [`agents`] - Agent trait, concrete strategies, feedforward network
//! - [`codec`] - Binary agent (de)serialization
//! - [`split`] - Uniform random-variable splitter
//! - [`training`] - Self-play orchestrator, worker messages, offload layer
//! - [`store`] - On-disk roster of agent blobs and versioned options
//! - [`config`] - TOML configuration loading and validation
//! - [`error`] - Structured error types

pub mod agents;
pub mod codec;
pub mod config;
pub mod error;
pub mod game;
pub mod split;
pub mod store;
pub mod training;
