//! # Park
//!
//! Ticketing and admission for a small amusement park: operators create
//! attractions, sell tickets for cash, and admit ticket holders while the
//! park tracks capacity and revenue.
//!
//! ## Architecture
//!
//! ```text
//! ParkService ──send──► Store (one RwLock) ──reduce──► ParkReducer
//!      ▲                                                  │
//!      └──────────── emitted event / Rejected ◄───────────┘
//! ```
//!
//! - [`ParkState`] owns every attraction and ticket, plus revenue
//! - [`ParkReducer`] validates commands and applies the resulting events
//! - [`ParkService`] turns emitted events into `Result`s for callers
//!
//! Every command runs under the store's write lock, so capacity checks and
//! decrements can never interleave between callers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use park::{seed, AttractionId, ParkEnvironment, ParkService, TicketType};
//!
//! # async fn example() -> Result<(), park::ParkError> {
//! let park = ParkService::new(ParkEnvironment::production());
//! seed(&park).await?;
//!
//! let sale = park.sell_tickets(&[TicketType::Adult], 100.0).await?;
//! assert_eq!(sale.change, 50.0);
//!
//! let admission = park.enter(&sale.tickets[0].id, AttractionId::new(102)).await?;
//! assert_eq!(admission.remaining, 7);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod reducer;
pub mod report;
pub mod seed;
pub mod service;
pub mod simulation;
pub mod types;

pub use config::ParkConfig;
pub use error::{ErrorKind, ParkError};
pub use reducer::{ParkEnvironment, ParkReducer, UuidTokenGenerator};
pub use report::{AttractionList, AttractionSummary, ParkReport};
pub use seed::{DEFAULT_ATTRACTIONS, seed};
pub use service::{ParkService, ParkStore};
pub use types::{
    ATTRACTION_ID_BASE, Admission, Attraction, AttractionId, CASH_TOLERANCE, ParkAction, ParkState,
    Sale, Ticket, TicketId, TicketType,
};
