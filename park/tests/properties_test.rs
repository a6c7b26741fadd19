//! Property tests for the park reducer.
//!
//! Random operation sequences are fed straight to `ParkReducer` and the
//! state is checked after every step.
//!
//! Run with: `cargo test --test properties_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::float_cmp)]

use park::{
    AttractionId, ParkAction, ParkEnvironment, ParkReducer, ParkState, TicketId, TicketType,
};
use park_core::reducer::Reducer;
use park_testing::{SequentialIdGenerator, test_clock};
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Clone, Debug)]
enum Op {
    Create { capacity: u32, open: bool },
    SetOpen { attraction: usize, open: bool },
    SetCapacity { attraction: usize, capacity: i64 },
    Sell { types: Vec<TicketType>, cash: f64 },
    Enter { ticket: usize, attraction: usize },
}

fn ticket_type() -> impl Strategy<Value = TicketType> {
    prop::sample::select(TicketType::ALL.to_vec())
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u32..5, any::<bool>()).prop_map(|(capacity, open)| Op::Create { capacity, open }),
        (0usize..8, any::<bool>()).prop_map(|(attraction, open)| Op::SetOpen { attraction, open }),
        (0usize..8, -3i64..6).prop_map(|(attraction, capacity)| Op::SetCapacity {
            attraction,
            capacity
        }),
        (prop::collection::vec(ticket_type(), 0..4), 0.0f64..200.0)
            .prop_map(|(types, cash)| Op::Sell { types, cash }),
        (0usize..12, 0usize..8).prop_map(|(ticket, attraction)| Op::Enter { ticket, attraction }),
    ]
}

fn env() -> ParkEnvironment {
    ParkEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(SequentialIdGenerator::new("P")),
    )
}

/// Resolves an index to an existing id, or one that does not exist
fn attraction_at(state: &ParkState, index: usize) -> AttractionId {
    state
        .attractions
        .keys()
        .nth(index)
        .copied()
        .unwrap_or_else(|| AttractionId::new(9_000 + u32::try_from(index).unwrap()))
}

fn ticket_at(state: &ParkState, index: usize) -> TicketId {
    state
        .tickets
        .keys()
        .nth(index)
        .cloned()
        .unwrap_or_else(|| TicketId::new(format!("MISSING{index}")))
}

fn to_action(state: &ParkState, op: Op) -> ParkAction {
    match op {
        Op::Create { capacity, open } => ParkAction::CreateAttraction {
            name: "Ride".to_string(),
            capacity,
            open,
        },
        Op::SetOpen { attraction, open } => ParkAction::SetOpen {
            id: attraction_at(state, attraction),
            open,
        },
        Op::SetCapacity {
            attraction,
            capacity,
        } => ParkAction::SetCapacity {
            id: attraction_at(state, attraction),
            capacity,
        },
        Op::Sell { types, cash } => ParkAction::SellTickets { types, cash },
        Op::Enter { ticket, attraction } => ParkAction::Enter {
            ticket_id: ticket_at(state, ticket),
            attraction_id: attraction_at(state, attraction),
        },
    }
}

proptest! {
    /// A sale creates every requested ticket and books the full total, or
    /// creates nothing and books nothing
    #[test]
    fn sales_are_all_or_nothing(
        types in prop::collection::vec(ticket_type(), 0..6),
        cash in 0.0f64..400.0,
    ) {
        let reducer = ParkReducer::new();
        let env = env();
        let mut state = ParkState::new();

        let effects = reducer.reduce(
            &mut state,
            ParkAction::SellTickets { types: types.clone(), cash },
            &env,
        );
        prop_assert_eq!(effects.len(), 1);

        let total = TicketType::total(&types);
        if !types.is_empty() && cash + 1e-9 >= total {
            prop_assert_eq!(state.ticket_count(), types.len());
            prop_assert_eq!(state.revenue, total);
        } else {
            prop_assert_eq!(state.ticket_count(), 0);
            prop_assert_eq!(state.revenue, 0.0);
        }
    }

    /// Revenue and entry counters never go down, admissions never push
    /// capacity below zero, and every admission spends exactly one slot
    #[test]
    fn counters_are_monotonic_across_any_sequence(ops in prop::collection::vec(op(), 1..60)) {
        let reducer = ParkReducer::new();
        let env = env();
        let mut state = ParkState::new();

        for op in ops {
            let before = state.clone();
            let action = to_action(&state, op);
            let effects = reducer.reduce(&mut state, action, &env);
            prop_assert_eq!(effects.len(), 1);

            prop_assert!(state.revenue >= before.revenue);
            prop_assert!(state.ticket_count() >= before.ticket_count());

            for (id, prior) in &before.attractions {
                let now = &state.attractions[id];
                prop_assert!(now.total_entries >= prior.total_entries);
            }

            let emitted = effects[0].as_emitted().cloned();
            match emitted {
                Some(ParkAction::Admitted { attraction_id, remaining, .. }) => {
                    let prior = &before.attractions[&attraction_id];
                    let now = &state.attractions[&attraction_id];
                    prop_assert!(prior.capacity > 0);
                    prop_assert_eq!(now.capacity, prior.capacity - 1);
                    prop_assert_eq!(now.capacity, remaining);
                    prop_assert_eq!(now.total_entries, prior.total_entries + 1);
                }
                Some(ParkAction::Rejected { .. }) => {
                    prop_assert_eq!(&state, &before);
                }
                _ => {}
            }
        }
    }

    /// Ticket ids stay pairwise distinct however many sales happen
    #[test]
    fn ticket_ids_never_repeat(baskets in prop::collection::vec(prop::collection::vec(ticket_type(), 1..4), 1..20)) {
        let reducer = ParkReducer::new();
        let env = env();
        let mut state = ParkState::new();
        let mut sold = 0;

        for types in baskets {
            let cash = TicketType::total(&types);
            sold += types.len();
            reducer.reduce(&mut state, ParkAction::SellTickets { types, cash }, &env);
        }

        // Tickets are keyed by id, so a repeat would shrink the map
        prop_assert_eq!(state.ticket_count(), sold);
    }
}
