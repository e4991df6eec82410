//! # Expirable Set
//!
//! A thread-safe set for Rust where each element may carry a time-to-live.
//!
//! ## Features
//!
//! - **Thread-safe**: every operation takes `&self`; share with `Arc`
//! - **TTL support**: elements can expire after a configurable duration
//! - **Lazy expiry**: no background task; expired elements are invisible
//!   to readers and swept by the next operation that scans the set
//! - **Set algebra**: union, intersection, symmetric difference, equality
//!   and subset checks, deadlock-free between concurrently used sets
//! - **Injectable clock**: drive expiry deterministically with [`ManualClock`]
//!
//! ## Quick Start
//!
//! ```rust
//! use expirable_set::ExpirableSet;
//! use std::time::Duration;
//!
//! let set = ExpirableSet::with_capacity(1_000);
//!
//! set.add("user:123");
//! set.add_with_expire("session:abc", Duration::from_secs(60));
//!
//! assert!(set.contains("user:123"));
//! assert!(set.get_elem_ttl("session:abc").is_ok());
//! assert_eq!(set.size(), 2);
//! ```
//!
//! ## Thread Safety
//!
//! Wrap the set in an `Arc` to share it across threads:
//!
//! ```rust
//! use expirable_set::ExpirableSet;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let set = Arc::new(ExpirableSet::new());
//!
//! let handles: Vec<_> = (0..4).map(|i| {
//!     let set = Arc::clone(&set);
//!     thread::spawn(move || {
//!         set.add(format!("worker_{}", i));
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(set.size(), 4);
//! ```
//!
//! `Clone` is a copy, not a shared handle: writes to a clone are not seen
//! by the original.

pub mod clock;
pub mod config;
pub mod error;
pub mod set;
pub mod stats;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{SetConfig, MIN_CAPACITY};
pub use error::{SetError, SetResult};
pub use set::{ExpirableSet, SetInfo};
pub use stats::{SetStats, StatsSnapshot};

// Internal modules - not part of public API
mod algebra;
pub(crate) mod entry;
pub(crate) mod storage;
