//! # Park Testing
//!
//! Testing utilities for the park service.
//!
//! This crate provides:
//! - Deterministic implementations of the environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use park_testing::{test_clock, SequentialIdGenerator};
//!
//! #[tokio::test]
//! async fn sells_a_ticket() {
//!     let env = ParkEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIdGenerator::new("T")));
//!     let park = ParkService::new(env);
//!
//!     let sale = park.sell_tickets(&[TicketType::Adult], 100.0).await?;
//!     assert_eq!(sale.tickets[0].id.as_str(), "T0001");
//! }
//! ```

use chrono::{DateTime, Utc};
use park_core::environment::{Clock, IdGenerator};

/// Reducer test harness (Given-When-Then)
pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use park_testing::mocks::FixedClock;
    /// use park_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::from_timestamp(1_735_689_600, 0).unwrap_or_default())
    }

    /// Predictable id generator: `{prefix}0001`, `{prefix}0002`, ...
    ///
    /// Thread-safe, so it can back a store shared between tasks.
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        prefix: String,
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose ids start at `{prefix}0001`
        #[must_use]
        pub fn new(prefix: impl Into<String>) -> Self {
            Self {
                prefix: prefix.into(),
                next: AtomicU64::new(1),
            }
        }

        /// Number of ids handed out so far
        #[must_use]
        pub fn issued(&self) -> u64 {
            self.next.load(Ordering::Relaxed) - 1
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::Relaxed);
            format!("{}{n:04}", self.prefix)
        }
    }

    /// Id generator that replays a fixed script of tokens, then repeats the last one
    ///
    /// Useful for forcing collisions.
    #[derive(Debug)]
    pub struct ScriptedIdGenerator {
        script: Vec<String>,
        cursor: AtomicU64,
    }

    impl ScriptedIdGenerator {
        /// Create a generator replaying `script`
        #[must_use]
        pub fn new<I, T>(script: I) -> Self
        where
            I: IntoIterator<Item = T>,
            T: Into<String>,
        {
            Self {
                script: script.into_iter().map(Into::into).collect(),
                cursor: AtomicU64::new(0),
            }
        }
    }

    impl IdGenerator for ScriptedIdGenerator {
        fn next_id(&self) -> String {
            let at = usize::try_from(self.cursor.fetch_add(1, Ordering::Relaxed)).unwrap_or(usize::MAX);
            self.script
                .get(at)
                .or_else(|| self.script.last())
                .cloned()
                .unwrap_or_default()
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, ScriptedIdGenerator, SequentialIdGenerator, test_clock};
pub use reducer_test::{ReducerTest, assertions};
