//! Reducer logic for the park.
//!
//! Commands are validated, turned into an event, the event is applied to
//! state and then emitted so the sender learns the outcome. A command that
//! fails validation emits [`ParkAction::Rejected`] and changes nothing.

use crate::error::ParkError;
use crate::types::{
    Attraction, AttractionId, CASH_TOLERANCE, ParkAction, ParkState, Ticket, TicketId, TicketType,
};
use park_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, IdGenerator, SystemClock},
    reducer::Reducer,
    smallvec,
};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// Draws allowed per ticket before a sale gives up on finding a free id.
pub const MAX_TICKET_ID_ATTEMPTS: u32 = 32;

/// Length of production ticket tokens.
const TICKET_TOKEN_LEN: usize = 8;

/// Production ticket ids: the first 8 hex digits of a random v4 UUID, upper-cased
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokenGenerator;

impl IdGenerator for UuidTokenGenerator {
    fn next_id(&self) -> String {
        let mut token = Uuid::new_v4().simple().to_string();
        token.truncate(TICKET_TOKEN_LEN);
        token.make_ascii_uppercase();
        token
    }
}

/// Environment dependencies for the park reducer
#[derive(Clone)]
pub struct ParkEnvironment {
    /// Clock for sale timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of ticket tokens
    pub ids: Arc<dyn IdGenerator>,
}

impl ParkEnvironment {
    /// Creates a new `ParkEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System clock and random UUID-derived ticket tokens
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidTokenGenerator))
    }
}

/// Reducer for the park
#[derive(Clone, Debug, Default)]
pub struct ParkReducer;

impl ParkReducer {
    /// Creates a new `ParkReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn validate_attraction_exists(state: &ParkState, id: AttractionId) -> Result<(), ParkError> {
        if state.attraction(id).is_none() {
            return Err(ParkError::AttractionNotFound(id));
        }
        Ok(())
    }

    /// Validates a `SetCapacity` command, returning the capacity to store
    fn validate_set_capacity(
        state: &ParkState,
        id: AttractionId,
        capacity: i64,
    ) -> Result<u32, ParkError> {
        Self::validate_attraction_exists(state, id)?;
        u32::try_from(capacity).map_err(|_| ParkError::InvalidCapacity(capacity))
    }

    /// Validates a `SellTickets` command, returning the sale total
    fn validate_sale(types: &[TicketType], cash: f64) -> Result<f64, ParkError> {
        if types.is_empty() {
            return Err(ParkError::EmptySelection);
        }

        let total = TicketType::total(types);

        // Written as a negated `>=` so that NaN cash is refused.
        if !(cash + CASH_TOLERANCE >= total) {
            return Err(ParkError::InsufficientCash { total, cash });
        }

        Ok(total)
    }

    /// Draws `count` ticket ids that collide neither with sold tickets nor
    /// with each other
    fn issue_ticket_ids(
        state: &ParkState,
        env: &ParkEnvironment,
        count: usize,
    ) -> Result<Vec<TicketId>, ParkError> {
        let mut issued: Vec<TicketId> = Vec::with_capacity(count);
        let mut taken: HashSet<TicketId> = HashSet::with_capacity(count);

        for _ in 0..count {
            let mut attempts = 0;
            let id = loop {
                if attempts == MAX_TICKET_ID_ATTEMPTS {
                    return Err(ParkError::TicketIdExhausted(attempts));
                }
                attempts += 1;

                let candidate = TicketId::new(env.ids.next_id());
                if candidate.as_str().is_empty()
                    || state.tickets.contains_key(&candidate)
                    || taken.contains(&candidate)
                {
                    tracing::debug!(candidate = %candidate, attempts, "Ticket id collision, drawing again");
                    continue;
                }
                break candidate;
            };
            taken.insert(id.clone());
            issued.push(id);
        }

        Ok(issued)
    }

    /// Validates an `Enter` command
    ///
    /// Checks run in a fixed order and the first failure wins: ticket,
    /// attraction, open, slots, prior use.
    fn validate_entry(
        state: &ParkState,
        ticket_id: &TicketId,
        attraction_id: AttractionId,
    ) -> Result<u32, ParkError> {
        let Some(ticket) = state.ticket(ticket_id) else {
            return Err(ParkError::TicketNotFound(ticket_id.clone()));
        };
        let Some(attraction) = state.attraction(attraction_id) else {
            return Err(ParkError::AttractionNotFound(attraction_id));
        };
        if !attraction.open {
            return Err(ParkError::AttractionClosed(attraction_id));
        }
        if attraction.capacity == 0 {
            return Err(ParkError::NoCapacity(attraction_id));
        }
        if ticket.has_entered(attraction_id) {
            return Err(ParkError::AlreadyUsed {
                ticket_id: ticket_id.clone(),
                attraction_id,
            });
        }

        Ok(attraction.capacity - 1)
    }

    /// Applies an event to state
    fn apply_event(state: &mut ParkState, action: &ParkAction) {
        match action {
            ParkAction::AttractionCreated { attraction } => {
                state.attraction_seq = state.attraction_seq.max(attraction.id.get());
                state.attractions.insert(attraction.id, attraction.clone());
            },
            ParkAction::OpenChanged { id, open } => {
                if let Some(attraction) = state.attractions.get_mut(id) {
                    attraction.open = *open;
                }
            },
            ParkAction::CapacityChanged { id, capacity } => {
                if let Some(attraction) = state.attractions.get_mut(id) {
                    attraction.capacity = *capacity;
                }
            },
            ParkAction::TicketsSold { tickets, total, .. } => {
                for ticket in tickets {
                    state.tickets.insert(ticket.id.clone(), ticket.clone());
                }
                state.revenue += total;
            },
            ParkAction::Admitted {
                ticket_id,
                attraction_id,
                ..
            } => {
                // Capacity, entry count and used-set move together.
                let (Some(attraction), Some(ticket)) = (
                    state.attractions.get_mut(attraction_id),
                    state.tickets.get_mut(ticket_id),
                ) else {
                    return;
                };
                attraction.capacity = attraction.capacity.saturating_sub(1);
                attraction.total_entries += 1;
                ticket.used_attractions.insert(*attraction_id);
            },
            // Rejections and commands never touch state
            ParkAction::Rejected { .. }
            | ParkAction::CreateAttraction { .. }
            | ParkAction::SetOpen { .. }
            | ParkAction::SetCapacity { .. }
            | ParkAction::SellTickets { .. }
            | ParkAction::Enter { .. } => {},
        }
    }

    fn commit(state: &mut ParkState, event: ParkAction) -> SmallVec<[Effect<ParkAction>; 4]> {
        Self::apply_event(state, &event);
        smallvec![Effect::Emit(event)]
    }

    fn reject(error: ParkError) -> SmallVec<[Effect<ParkAction>; 4]> {
        tracing::warn!(kind = ?error.kind(), %error, "Command rejected");
        smallvec![Effect::Emit(ParkAction::Rejected { error })]
    }
}

impl Reducer for ParkReducer {
    type State = ParkState;
    type Action = ParkAction;
    type Environment = ParkEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            ParkAction::CreateAttraction { name, capacity, open } => {
                let Some(id) = state.next_attraction_id() else {
                    return Self::reject(ParkError::AttractionIdsExhausted(state.attraction_seq));
                };
                tracing::info!(attraction_id = %id, name = %name, capacity, open, "Attraction created");

                Self::commit(
                    state,
                    ParkAction::AttractionCreated {
                        attraction: Attraction::new(id, name, capacity, open),
                    },
                )
            },

            ParkAction::SetOpen { id, open } => {
                if let Err(error) = Self::validate_attraction_exists(state, id) {
                    return Self::reject(error);
                }
                tracing::info!(attraction_id = %id, open, "Attraction open state changed");

                Self::commit(state, ParkAction::OpenChanged { id, open })
            },

            ParkAction::SetCapacity { id, capacity } => {
                let capacity = match Self::validate_set_capacity(state, id, capacity) {
                    Ok(capacity) => capacity,
                    Err(error) => return Self::reject(error),
                };
                tracing::info!(attraction_id = %id, capacity, "Attraction capacity changed");

                Self::commit(state, ParkAction::CapacityChanged { id, capacity })
            },

            ParkAction::SellTickets { types, cash } => {
                let total = match Self::validate_sale(&types, cash) {
                    Ok(total) => total,
                    Err(error) => return Self::reject(error),
                };
                let ids = match Self::issue_ticket_ids(state, env, types.len()) {
                    Ok(ids) => ids,
                    Err(error) => return Self::reject(error),
                };

                let sold_at = env.clock.now();
                let tickets: Vec<Ticket> = ids
                    .into_iter()
                    .zip(types)
                    .map(|(id, ticket_type)| Ticket::new(id, ticket_type, sold_at))
                    .collect();
                let change = cash - total;
                tracing::info!(
                    count = tickets.len(),
                    total,
                    change,
                    "Tickets sold"
                );

                Self::commit(
                    state,
                    ParkAction::TicketsSold {
                        tickets,
                        total,
                        change,
                    },
                )
            },

            ParkAction::Enter {
                ticket_id,
                attraction_id,
            } => {
                let remaining = match Self::validate_entry(state, &ticket_id, attraction_id) {
                    Ok(remaining) => remaining,
                    Err(error) => return Self::reject(error),
                };
                let attraction_name = state
                    .attraction(attraction_id)
                    .map(|a| a.name.clone())
                    .unwrap_or_default();
                tracing::info!(
                    ticket_id = %ticket_id,
                    attraction_id = %attraction_id,
                    remaining,
                    "Ticket admitted"
                );

                Self::commit(
                    state,
                    ParkAction::Admitted {
                        ticket_id,
                        attraction_id,
                        attraction_name,
                        remaining,
                    },
                )
            },

            // ========== Events ==========
            // Events sent directly are being replayed: apply, emit nothing.
            ParkAction::AttractionCreated { .. }
            | ParkAction::OpenChanged { .. }
            | ParkAction::CapacityChanged { .. }
            | ParkAction::TicketsSold { .. }
            | ParkAction::Admitted { .. }
            | ParkAction::Rejected { .. } => {
                Self::apply_event(state, &action);
                SmallVec::new()
            },
        }
    }
}
