//! Session Controller: the FRESH/ACTIVE/STOPPED state machine, the
//! request handlers an HTTP (or other) adapter would call, and the
//! crash recovery that ties the engine, entities, ledger, and
//! durability crates together.

#![warn(missing_docs)]

mod config;
mod controller;
mod error;

pub use config::SessionConfig;
pub use controller::SessionController;
pub use error::SessionError;
