//! A concurrency-safe map whose entries carry an optional time-to-live
//!
//! This crate provides a `TtlMap` that binds keys to values which either
//! never expire or become invalid once their deadline passes. Expiration is
//! lazy: expired entries stay in the map until they are removed or updated,
//! and lookups report them as expired instead of handing out the value.
//!
//! ```
//! use std::time::Duration;
//! use ttl_map::{NEVER, TtlMap, TtlMapError};
//!
//! let map: TtlMap<&str, i32> = TtlMap::new();
//!
//! map.insert("a", 1, NEVER).unwrap();
//! assert_eq!(map.get(&"a"), Ok(1));
//! assert_eq!(map.insert("a", 2, NEVER), Err(TtlMapError::KeyAlreadyExists));
//!
//! map.update("a", 2, Duration::from_secs(60)).unwrap();
//! assert_eq!(map.get(&"a"), Ok(2));
//!
//! map.remove(&"a").unwrap();
//! assert_eq!(map.get(&"a"), Err(TtlMapError::ItemNotFound));
//! ```

pub mod clock;
mod entry;
pub mod error;
pub mod map;
pub mod ttl;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, TtlMapError};
pub use map::TtlMap;
pub use ttl::{NEVER, Ttl};
