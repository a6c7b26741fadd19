//! # Park Core
//!
//! Core traits and types shared by every crate of the park service.
//!
//! The service is built as a Reducer over a single state value:
//!
//! - **State**: the domain data owned by one store (attractions, tickets, revenue)
//! - **Action**: every input to the reducer (commands from operators, events to replay)
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a description of what the caller should observe, never the execution itself
//! - **Environment**: injected capabilities (clock, id generation)
//!
//! ## Example
//!
//! ```
//! use park_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Debug, Default)]
//! struct TurnstileState {
//!     passes: u64,
//! }
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum TurnstileAction {
//!     Push,
//!     Passed { total: u64 },
//! }
//!
//! struct TurnstileReducer;
//!
//! impl Reducer for TurnstileReducer {
//!     type State = TurnstileState;
//!     type Action = TurnstileAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut TurnstileState,
//!         action: TurnstileAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<TurnstileAction>; 4]> {
//!         match action {
//!             TurnstileAction::Push => {
//!                 state.passes += 1;
//!                 smallvec![Effect::Emit(TurnstileAction::Passed { total: state.passes })]
//!             }
//!             TurnstileAction::Passed { .. } => SmallVec::new(),
//!         }
//!     }
//! }
//!
//! let mut state = TurnstileState::default();
//! let effects = TurnstileReducer.reduce(&mut state, TurnstileAction::Push, &());
//! assert_eq!(state.passes, 1);
//! assert_eq!(effects.len(), 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - the core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// All validation and state transitions live here, so they are deterministic
/// and can be tested without a runtime.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Implementations validate the action, update `state` in place and
        /// return the effects the runtime should interpret. A rejected action
        /// must leave `state` untouched.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects are values returned by reducers. The store interprets them after
/// the reducer has finished and the state lock has been released.
pub mod effect {
    /// Effect type - describes what should happen after a reduction
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can carry back to callers
    #[derive(Debug, Clone, PartialEq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Hand an action back to whoever sent the triggering action.
        ///
        /// Reducers use this to report outcomes (an event on success, a
        /// rejection on failure). Emitted actions are delivered in order.
        Emit(Action),
    }

    impl<Action> Effect<Action> {
        /// Returns the emitted action, if this effect carries one
        #[must_use]
        pub const fn as_emitted(&self) -> Option<&Action> {
            match self {
                Effect::Emit(action) => Some(action),
                Effect::None => None,
            }
        }

        /// Consumes the effect and returns the emitted action, if any
        #[must_use]
        pub fn into_emitted(self) -> Option<Action> {
            match self {
                Effect::Emit(action) => Some(action),
                Effect::None => None,
            }
        }
    }
}

/// Environment module - dependency injection traits
///
/// All external capabilities are abstracted behind traits and injected via
/// the Environment parameter, so tests can supply deterministic versions.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// `IdGenerator` trait - produces opaque identifier tokens
    ///
    /// Implementations only need to be "random enough"; callers that require
    /// uniqueness check the token against what they already hold and draw
    /// again on collision.
    pub trait IdGenerator: Send + Sync {
        /// Produce the next identifier token
        fn next_id(&self) -> String;
    }
}
