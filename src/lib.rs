//! `duelrank` is a Bayesian pairwise-comparison ranking engine with
//! crash-safe durability: judges are repeatedly shown a pair of entities
//! and asked to pick a winner, and the engine maintains a posterior
//! over each entity's underlying strength using moment-matched Dirichlet
//! updates.
//!
//! This crate re-exports [`duelrank_session`]'s public API, which is the
//! single entry point applications embed.
//!
//! ```no_run
//! use duelrank::{EntityDraft, JudgeId, SessionConfig, SessionController};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = SessionController::open(SessionConfig::new("./data"))?;
//! controller.start(vec![
//!     EntityDraft { name: "Alpha".into(), link: String::new(), locator: String::new(), track: "No Track".into() },
//!     EntityDraft { name: "Beta".into(), link: String::new(), locator: String::new(), track: "No Track".into() },
//! ])?;
//!
//! let judge = JudgeId::from("judge-1");
//! let (a, b) = controller.get_pair(judge.clone(), false)?;
//! controller.submit(judge, a, b, a)?;
//!
//! for entity in controller.rankings()? {
//!     println!("{}", entity.name);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub use duelrank_core::{Clock, EntityId, JudgeId, LogEvent, LoggedEvent, MonotonicNanos, Sequence, SystemClock};
pub use duelrank_entities::{Entity, EntityDraft, EntityStore};
pub use duelrank_session::{SessionConfig, SessionController, SessionError};
