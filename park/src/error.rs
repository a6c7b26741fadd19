//! Error types for the park service.

use crate::types::{AttractionId, TicketId};
use park_runtime::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a park operation was refused
///
/// Every variant is a recoverable condition: the park state is left exactly
/// as it was before the refused call.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParkError {
    /// No ticket with this id was ever sold
    #[error("ticket {0} not found")]
    TicketNotFound(TicketId),

    /// No attraction with this id exists
    #[error("attraction {0} not found")]
    AttractionNotFound(AttractionId),

    /// Requested capacity is negative or too large
    #[error("invalid capacity {0}: must be between 0 and {max}", max = u32::MAX)]
    InvalidCapacity(i64),

    /// A sale was requested with no tickets
    #[error("no tickets selected")]
    EmptySelection,

    /// Text that does not name a ticket type
    #[error("unknown ticket type '{0}'")]
    UnknownTicketType(String),

    /// Offered cash does not cover the sale total
    #[error("insufficient cash: total {total:.2}, offered {cash:.2}")]
    InsufficientCash {
        /// Sum of the requested ticket prices
        total: f64,
        /// Cash offered
        cash: f64,
    },

    /// The attraction is not accepting entries
    #[error("attraction {0} is closed")]
    AttractionClosed(AttractionId),

    /// The attraction has no slots left
    #[error("attraction {0} has no slots left")]
    NoCapacity(AttractionId),

    /// The ticket was already admitted to this attraction
    #[error("ticket {ticket_id} already used at attraction {attraction_id}")]
    AlreadyUsed {
        /// Ticket presented
        ticket_id: TicketId,
        /// Attraction it was already admitted to
        attraction_id: AttractionId,
    },

    /// The id generator kept producing tokens that are already taken
    #[error("could not draw a unique ticket id after {0} attempts")]
    TicketIdExhausted(u32),

    /// Every attraction id above the configured base has been handed out
    #[error("no attraction ids left after {0}")]
    AttractionIdsExhausted(u32),

    /// The reducer produced no recognizable outcome for a command
    #[error("command produced no outcome")]
    NoOutcome,

    /// The park no longer accepts commands
    #[error("park service unavailable: {0}")]
    Unavailable(String),
}

/// Coarse classification of [`ParkError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Ticket or attraction id does not exist
    NotFound,
    /// Negative capacity, empty selection, unparsable input
    InvalidInput,
    /// Cash below the sale total
    InsufficientFunds,
    /// Entry attempted while closed
    AttractionClosed,
    /// Entry attempted with zero slots
    NoCapacity,
    /// Ticket already admitted to that attraction
    AlreadyUsed,
    /// Failure inside the service itself
    Internal,
    /// Service shut down
    Unavailable,
}

impl ParkError {
    /// Classifies the error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TicketNotFound(_) | Self::AttractionNotFound(_) => ErrorKind::NotFound,
            Self::InvalidCapacity(_) | Self::EmptySelection | Self::UnknownTicketType(_) => {
                ErrorKind::InvalidInput
            },
            Self::InsufficientCash { .. } => ErrorKind::InsufficientFunds,
            Self::AttractionClosed(_) => ErrorKind::AttractionClosed,
            Self::NoCapacity(_) => ErrorKind::NoCapacity,
            Self::AlreadyUsed { .. } => ErrorKind::AlreadyUsed,
            Self::TicketIdExhausted(_) | Self::AttractionIdsExhausted(_) | Self::NoOutcome => {
                ErrorKind::Internal
            },
            Self::Unavailable(_) => ErrorKind::Unavailable,
        }
    }
}

impl From<StoreError> for ParkError {
    fn from(error: StoreError) -> Self {
        Self::Unavailable(error.to_string())
    }
}
