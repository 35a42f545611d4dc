//! Node lifecycle commands for a pocket network participant.
//!
//! `nodes stake | unstake | unjail` turn hand-typed arguments into a signed transaction
//! and submit it to a node. The pipeline is:
//!
//! - [`normalize`]: argument counts, numeric parsing, chain id clean-up ([`chain_ids`])
//!   and codec selection ([`codec`])
//! - [`builder`]: credential acquisition and signing through collaborator traits
//! - [`dispatch`]: serialization and a single submit call
//!
//! [`signer`] and [`rpc`] hold the keystore and HTTP implementations of those traits.

pub mod builder;
pub mod chain_ids;
pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod credential;
pub mod dispatch;
pub mod error;
pub mod normalize;
pub mod rpc;
pub mod signer;
pub mod types;

pub use error::{LifecycleError, LifecycleResult};
