//! `ParkService`: the operator-facing API over the park store.
//!
//! Each method sends one command through the store and translates the
//! emitted outcome into a `Result`. Because the store reduces one action at a
//! time under its write lock, every method is atomic with respect to every
//! other caller of the same service, clones included.

use crate::config::ParkConfig;
use crate::error::ParkError;
use crate::reducer::{ParkEnvironment, ParkReducer};
use crate::report::ParkReport;
use crate::types::{
    Admission, Attraction, AttractionId, ParkAction, ParkState, Sale, Ticket, TicketId, TicketType,
};
use park_runtime::Store;

/// The store type backing a [`ParkService`]
pub type ParkStore = Store<ParkState, ParkAction, ParkEnvironment, ParkReducer>;

/// Attraction management, ticket sales and admissions for one park
#[derive(Clone)]
pub struct ParkService {
    store: ParkStore,
}

impl ParkService {
    /// Creates an empty park whose first attraction will be `101`
    #[must_use]
    pub fn new(env: ParkEnvironment) -> Self {
        Self::with_state(ParkState::new(), env)
    }

    /// Creates an empty park using the configured attraction id base
    #[must_use]
    pub fn with_config(config: &ParkConfig, env: ParkEnvironment) -> Self {
        Self::with_state(ParkState::with_id_base(config.attraction_id_base), env)
    }

    /// Creates a park starting from an existing state
    #[must_use]
    pub fn with_state(state: ParkState, env: ParkEnvironment) -> Self {
        Self {
            store: Store::new(state, ParkReducer::new(), env),
        }
    }

    /// Sends a command and returns the event it produced
    async fn dispatch(&self, command: ParkAction) -> Result<ParkAction, ParkError> {
        let emitted = self.store.send(command).await?;
        match emitted.into_iter().next() {
            Some(ParkAction::Rejected { error }) => Err(error),
            Some(event) if event.is_event() => Ok(event),
            _ => Err(ParkError::NoOutcome),
        }
    }

    // ========== Attraction management ==========

    /// Registers a new attraction and returns it
    ///
    /// # Errors
    ///
    /// [`ParkError::AttractionIdsExhausted`] once the id after the last one
    /// would overflow, [`ParkError::Unavailable`] after
    /// [`shutdown`](Self::shutdown).
    pub async fn create_attraction(
        &self,
        name: impl Into<String>,
        capacity: u32,
        open: bool,
    ) -> Result<Attraction, ParkError> {
        let command = ParkAction::CreateAttraction {
            name: name.into(),
            capacity,
            open,
        };
        match self.dispatch(command).await? {
            ParkAction::AttractionCreated { attraction } => Ok(attraction),
            _ => Err(ParkError::NoOutcome),
        }
    }

    /// Opens or closes an attraction
    ///
    /// # Errors
    ///
    /// [`ParkError::AttractionNotFound`] for an unknown id; nothing changes.
    pub async fn set_open(&self, id: AttractionId, open: bool) -> Result<(), ParkError> {
        match self.dispatch(ParkAction::SetOpen { id, open }).await? {
            ParkAction::OpenChanged { .. } => Ok(()),
            _ => Err(ParkError::NoOutcome),
        }
    }

    /// Replaces an attraction's remaining slots
    ///
    /// # Errors
    ///
    /// [`ParkError::AttractionNotFound`] for an unknown id,
    /// [`ParkError::InvalidCapacity`] for a negative value; nothing changes.
    pub async fn set_capacity(&self, id: AttractionId, capacity: i64) -> Result<(), ParkError> {
        match self.dispatch(ParkAction::SetCapacity { id, capacity }).await? {
            ParkAction::CapacityChanged { .. } => Ok(()),
            _ => Err(ParkError::NoOutcome),
        }
    }

    // ========== Sales & admission ==========

    /// Sells one ticket per entry of `types`, all or nothing
    ///
    /// # Errors
    ///
    /// [`ParkError::EmptySelection`] when `types` is empty,
    /// [`ParkError::InsufficientCash`] when `cash` does not cover the total.
    /// No ticket is created and revenue is unchanged in either case.
    pub async fn sell_tickets(&self, types: &[TicketType], cash: f64) -> Result<Sale, ParkError> {
        let command = ParkAction::SellTickets {
            types: types.to_vec(),
            cash,
        };
        match self.dispatch(command).await? {
            ParkAction::TicketsSold {
                tickets,
                total,
                change,
            } => Ok(Sale {
                tickets,
                total,
                change,
            }),
            _ => Err(ParkError::NoOutcome),
        }
    }

    /// Admits a ticket holder into an attraction
    ///
    /// # Errors
    ///
    /// The first failing check, in order: [`ParkError::TicketNotFound`],
    /// [`ParkError::AttractionNotFound`], [`ParkError::AttractionClosed`],
    /// [`ParkError::NoCapacity`], [`ParkError::AlreadyUsed`].
    pub async fn enter(
        &self,
        ticket_id: &TicketId,
        attraction_id: AttractionId,
    ) -> Result<Admission, ParkError> {
        let command = ParkAction::Enter {
            ticket_id: ticket_id.clone(),
            attraction_id,
        };
        match self.dispatch(command).await? {
            ParkAction::Admitted {
                ticket_id,
                attraction_id,
                attraction_name,
                remaining,
            } => Ok(Admission {
                ticket_id,
                attraction_id,
                attraction_name,
                remaining,
            }),
            _ => Err(ParkError::NoOutcome),
        }
    }

    // ========== Queries ==========

    /// All attractions in creation order
    pub async fn list_attractions(&self) -> Vec<Attraction> {
        self.store
            .state(|s| s.attractions.values().cloned().collect())
            .await
    }

    /// One attraction by id
    pub async fn attraction(&self, id: AttractionId) -> Option<Attraction> {
        self.store.state(|s| s.attraction(id).cloned()).await
    }

    /// One ticket by id
    pub async fn ticket(&self, id: &TicketId) -> Option<Ticket> {
        self.store.state(|s| s.ticket(id).cloned()).await
    }

    /// All tickets in sale order
    pub async fn tickets(&self) -> Vec<Ticket> {
        self.store.state(|s| s.tickets.values().cloned().collect()).await
    }

    /// Cash collected so far
    pub async fn revenue(&self) -> f64 {
        self.store.state(|s| s.revenue).await
    }

    /// Tickets sold so far
    pub async fn ticket_count(&self) -> usize {
        self.store.state(ParkState::ticket_count).await
    }

    /// Revenue, ticket count and per-attraction counters
    pub async fn report(&self) -> ParkReport {
        self.store.state(ParkReport::from_state).await
    }

    /// Stops accepting commands; queries keep working
    pub fn shutdown(&self) {
        self.store.shutdown();
    }
}
