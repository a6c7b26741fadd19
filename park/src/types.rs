//! Domain types for the park service.
//!
//! Attractions, tickets, the state that owns them, and the actions
//! (commands and events) the reducer understands.

use crate::error::ParkError;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Attraction ids are handed out above this value; the first attraction is `101`.
pub const ATTRACTION_ID_BASE: u32 = 100;

/// Slack allowed when comparing offered cash against a sale total.
pub const CASH_TOLERANCE: f64 = 1e-9;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for an attraction
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttractionId(u32);

impl AttractionId {
    /// Wraps a raw attraction number
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw attraction number
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for AttractionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for AttractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a ticket: a short alphanumeric token
///
/// Tokens are stored upper-case, so `TicketId::new("ab12cd34")` and
/// `TicketId::new("AB12CD34")` name the same ticket.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TicketId(String);

impl TicketId {
    /// Creates a ticket id from a token, trimming and upper-casing it
    #[must_use]
    pub fn new(token: impl AsRef<str>) -> Self {
        Self(token.as_ref().trim().to_uppercase())
    }

    /// Returns the normalized token
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TicketId {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Ticket types
// ============================================================================

/// Price tier of a ticket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketType {
    /// Adult admission (50.00)
    Adult,
    /// Child admission (30.00)
    Child,
    /// Senior admission (35.00)
    Senior,
}

impl TicketType {
    /// Every ticket type, in menu order
    pub const ALL: [Self; 3] = [Self::Adult, Self::Child, Self::Senior];

    /// Fixed price of this tier
    #[must_use]
    pub const fn price(self) -> f64 {
        match self {
            Self::Adult => 50.0,
            Self::Child => 30.0,
            Self::Senior => 35.0,
        }
    }

    /// Upper-case display name (`ADULT`, `CHILD`, `SENIOR`)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Adult => "ADULT",
            Self::Child => "CHILD",
            Self::Senior => "SENIOR",
        }
    }

    /// Sum of the prices of `types`
    #[must_use]
    pub fn total(types: &[Self]) -> f64 {
        types.iter().map(|t| t.price()).sum()
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TicketType {
    type Err = ParkError;

    /// Accepts the names case-insensitively, or the menu digits `1`/`2`/`3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1" | "ADULT" => Ok(Self::Adult),
            "2" | "CHILD" => Ok(Self::Child),
            "3" | "SENIOR" => Ok(Self::Senior),
            other => Err(ParkError::UnknownTicketType(other.to_string())),
        }
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A ride or exhibit
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attraction {
    /// Attraction identifier
    pub id: AttractionId,
    /// Display name
    pub name: String,
    /// Whether admissions are currently accepted
    pub open: bool,
    /// Remaining admission slots
    pub capacity: u32,
    /// Successful admissions so far
    pub total_entries: u64,
}

impl Attraction {
    /// Creates an attraction with no entries yet
    #[must_use]
    pub const fn new(id: AttractionId, name: String, capacity: u32, open: bool) -> Self {
        Self {
            id,
            name,
            open,
            capacity,
            total_entries: 0,
        }
    }

    /// `OPEN` or `CLOSED`
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.open { "OPEN" } else { "CLOSED" }
    }
}

impl fmt::Display for Attraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} | {} | {} | slots:{} | entries:{}",
            self.id,
            self.name,
            self.status_label(),
            self.capacity,
            self.total_entries
        )
    }
}

/// A sold admission right
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket identifier
    pub id: TicketId,
    /// Price tier
    pub ticket_type: TicketType,
    /// Attractions this ticket has already been admitted to
    pub used_attractions: BTreeSet<AttractionId>,
    /// When the ticket was sold
    pub sold_at: DateTime<Utc>,
}

impl Ticket {
    /// Creates an unused ticket
    #[must_use]
    pub const fn new(id: TicketId, ticket_type: TicketType, sold_at: DateTime<Utc>) -> Self {
        Self {
            id,
            ticket_type,
            used_attractions: BTreeSet::new(),
            sold_at,
        }
    }

    /// Whether this ticket was already admitted to `attraction`
    #[must_use]
    pub fn has_entered(&self, attraction: AttractionId) -> bool {
        self.used_attractions.contains(&attraction)
    }
}

// ============================================================================
// State
// ============================================================================

/// Everything one park owns
///
/// Both maps keep insertion order, so listings and reports come out in
/// creation order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParkState {
    /// Attractions by id
    pub attractions: IndexMap<AttractionId, Attraction>,
    /// Tickets by id
    pub tickets: IndexMap<TicketId, Ticket>,
    /// Cash collected from successful sales
    pub revenue: f64,
    /// Last attraction number handed out
    pub attraction_seq: u32,
}

impl ParkState {
    /// Creates an empty park whose first attraction will be `101`
    #[must_use]
    pub fn new() -> Self {
        Self::with_id_base(ATTRACTION_ID_BASE)
    }

    /// Creates an empty park whose first attraction will be `base + 1`
    #[must_use]
    pub fn with_id_base(base: u32) -> Self {
        Self {
            attractions: IndexMap::new(),
            tickets: IndexMap::new(),
            revenue: 0.0,
            attraction_seq: base,
        }
    }

    /// Id the next created attraction will receive, or `None` once the
    /// id space is used up
    #[must_use]
    pub const fn next_attraction_id(&self) -> Option<AttractionId> {
        match self.attraction_seq.checked_add(1) {
            Some(next) => Some(AttractionId(next)),
            None => None,
        }
    }

    /// Returns an attraction by id
    #[must_use]
    pub fn attraction(&self, id: AttractionId) -> Option<&Attraction> {
        self.attractions.get(&id)
    }

    /// Returns a ticket by id
    #[must_use]
    pub fn ticket(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.get(id)
    }

    /// Number of tickets ever sold
    #[must_use]
    pub fn ticket_count(&self) -> usize {
        self.tickets.len()
    }
}

impl Default for ParkState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// Result of a successful ticket sale
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Created tickets, in the order the types were requested
    pub tickets: Vec<Ticket>,
    /// Sum of the ticket prices
    pub total: f64,
    /// Cash returned to the buyer (`cash - total`)
    pub change: f64,
}

/// Result of a successful admission
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admission {
    /// Admitted ticket
    pub ticket_id: TicketId,
    /// Attraction entered
    pub attraction_id: AttractionId,
    /// Attraction name, for feedback
    pub attraction_name: String,
    /// Slots left after this entry
    pub remaining: u32,
}

// ============================================================================
// Actions
// ============================================================================

/// Actions for the park (commands and events)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParkAction {
    // ========== Commands ==========
    /// Register a new attraction
    CreateAttraction {
        /// Display name
        name: String,
        /// Initial slots
        capacity: u32,
        /// Whether it starts open
        open: bool,
    },

    /// Open or close an attraction
    SetOpen {
        /// Attraction to update
        id: AttractionId,
        /// New open flag
        open: bool,
    },

    /// Replace the remaining slots of an attraction
    ///
    /// Signed so that negative requests can be rejected rather than wrapped.
    SetCapacity {
        /// Attraction to update
        id: AttractionId,
        /// Requested slots
        capacity: i64,
    },

    /// Sell a batch of tickets for cash
    SellTickets {
        /// One entry per ticket, in order
        types: Vec<TicketType>,
        /// Cash offered for the whole batch
        cash: f64,
    },

    /// Admit a ticket holder into an attraction
    Enter {
        /// Ticket presented
        ticket_id: TicketId,
        /// Attraction requested
        attraction_id: AttractionId,
    },

    // ========== Events ==========
    /// An attraction was registered
    AttractionCreated {
        /// The new attraction
        attraction: Attraction,
    },

    /// An attraction was opened or closed
    OpenChanged {
        /// Attraction updated
        id: AttractionId,
        /// New open flag
        open: bool,
    },

    /// An attraction's remaining slots were replaced
    CapacityChanged {
        /// Attraction updated
        id: AttractionId,
        /// New slots
        capacity: u32,
    },

    /// A batch of tickets was sold
    TicketsSold {
        /// Created tickets, in request order
        tickets: Vec<Ticket>,
        /// Amount added to revenue
        total: f64,
        /// Cash returned to the buyer
        change: f64,
    },

    /// A ticket holder entered an attraction
    Admitted {
        /// Ticket used
        ticket_id: TicketId,
        /// Attraction entered
        attraction_id: AttractionId,
        /// Attraction name
        attraction_name: String,
        /// Slots left after the entry
        remaining: u32,
    },

    /// A command was refused; nothing changed
    Rejected {
        /// Why the command was refused
        error: ParkError,
    },
}

impl ParkAction {
    /// Whether this action is a command (a request that may be refused)
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::CreateAttraction { .. }
                | Self::SetOpen { .. }
                | Self::SetCapacity { .. }
                | Self::SellTickets { .. }
                | Self::Enter { .. }
        )
    }

    /// Whether this action is an event (a fact that already happened)
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }
}
