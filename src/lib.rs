//! tierkit: arena-backed intrusive containers and a multi-tier LRU cache.
//!
//! - [`ds`]: a [`LinkArena`](ds::LinkArena) whose slots carry a fixed number
//!   of link fields, plus the [`List`](ds::List), [`Dictionary`](ds::Dictionary)
//!   and [`HashSet`](ds::HashSet) views threaded through those fields.
//! - [`cache`]: [`TieredCache`](cache::TieredCache), built on the containers.
//!
//! See `DESIGN.md` for the layout of the crate.

pub mod builder;
pub mod cache;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

pub use crate::cache::{DefaultPolicy, FnPolicy, KeyValue, TieredCache};
pub use crate::ds::{Dictionary, HashSet, LinkArena, List, SlotId};
