//! Fluent Given-When-Then harness for reducers
//!
//! Runs a single reduction synchronously, without a store, and then hands the
//! resulting state and effects to the registered assertions.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use park_core::{effect::Effect, reducer::Reducer};

type StateAssertion<S> = Box<dyn FnOnce(&S)>;
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use park_testing::{assertions, ReducerTest};
///
/// ReducerTest::new(ParkReducer::new())
///     .with_env(test_environment())
///     .given_state(ParkState::new())
///     .when_action(ParkAction::CreateAttraction { name: "Carousel".into(), capacity: 4, open: true })
///     .then_state(|state| assert_eq!(state.attractions.len(), 1))
///     .then_effects(|effects| assertions::assert_effects_count(effects, 1))
///     .run();
/// ```
pub struct ReducerTest<R>
where
    R: Reducer,
{
    reducer: R,
    environment: Option<R::Environment>,
    initial_state: Option<R::State>,
    actions: Vec<R::Action>,
    state_assertions: Vec<StateAssertion<R::State>>,
    effect_assertions: Vec<EffectAssertion<R::Action>>,
}

impl<R> ReducerTest<R>
where
    R: Reducer,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: R::Environment) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: R::State) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Add an action to reduce (When)
    ///
    /// May be called several times; actions are reduced in order and only
    /// the effects of the last one reach `then_effects`.
    #[must_use]
    pub fn when_action(mut self, action: R::Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&R::State) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the effects of the last action (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<R::Action>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if the initial state or environment is not set, if no action
    /// was given, or if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");
        let env = self
            .environment
            .expect("Environment must be set with with_env()");
        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let mut effects = Vec::new();
        for action in self.actions {
            effects = self.reducer.reduce(&mut state, action, &env).into_vec();
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }
        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use park_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if any effect other than `Effect::None` is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(|e| matches!(e, Effect::None)),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that exactly one action was emitted and return it
    ///
    /// # Panics
    ///
    /// Panics unless the effects contain exactly one `Effect::Emit`.
    #[allow(clippy::panic)] // Test assertion
    pub fn single_emitted<A: std::fmt::Debug>(effects: &[Effect<A>]) -> &A {
        let emitted: Vec<&A> = effects.iter().filter_map(Effect::as_emitted).collect();
        match emitted.as_slice() {
            [action] => action,
            other => panic!("Expected exactly one emitted action, found {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use park_core::{SmallVec, smallvec};

    #[derive(Clone, Debug, PartialEq)]
    struct GateState {
        inside: u32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum GateAction {
        Admit,
        Admitted { inside: u32 },
    }

    struct GateReducer;

    impl Reducer for GateReducer {
        type State = GateState;
        type Action = GateAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut GateState,
            action: GateAction,
            _env: &(),
        ) -> SmallVec<[Effect<GateAction>; 4]> {
            match action {
                GateAction::Admit => {
                    state.inside += 1;
                    smallvec![Effect::Emit(GateAction::Admitted { inside: state.inside })]
                },
                GateAction::Admitted { .. } => smallvec![Effect::None],
            }
        }
    }

    #[test]
    fn runs_actions_in_order_and_checks_last_effects() {
        ReducerTest::new(GateReducer)
            .with_env(())
            .given_state(GateState { inside: 0 })
            .when_action(GateAction::Admit)
            .when_action(GateAction::Admit)
            .then_state(|state| assert_eq!(state.inside, 2))
            .then_effects(|effects| {
                assert_eq!(
                    assertions::single_emitted(effects),
                    &GateAction::Admitted { inside: 2 }
                );
            })
            .run();
    }

    #[test]
    fn no_effects_accepts_explicit_none() {
        assertions::assert_no_effects::<GateAction>(&[Effect::None]);
        assertions::assert_no_effects::<GateAction>(&[]);
        assertions::assert_effects_count(&[Effect::<GateAction>::None], 1);
    }
}
