//! Synthetic sale-and-entry workload.
//!
//! Each order is a random basket of 1 to 3 tickets (uniform over the ticket
//! types) paid with exact cash; the first ticket of every successful sale is
//! then presented at one fixed attraction. The RNG is seeded, so a given
//! seed always produces the same sequence of baskets.

use crate::error::ParkError;
use crate::service::ParkService;
use crate::types::{AttractionId, TicketType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used when none is given
pub const DEFAULT_RNG_SEED: u64 = 42;

/// Counters from one [`run_orders`] call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulationSummary {
    /// Orders attempted
    pub orders: usize,
    /// Tickets created across all sales
    pub tickets_sold: usize,
    /// Entries admitted
    pub admissions: usize,
    /// Entries refused (closed, full, ...)
    pub refused_entries: usize,
}

/// Draws one basket: 1 to 3 tickets of uniformly random type
pub fn random_basket<R: Rng>(rng: &mut R) -> Vec<TicketType> {
    let size = rng.gen_range(1..=3);
    (0..size)
        .map(|_| TicketType::ALL[rng.gen_range(0..TicketType::ALL.len())])
        .collect()
}

/// Runs `orders` sell-then-enter rounds against `park`
///
/// Refused entries are expected once the target attraction fills up and are
/// only counted.
///
/// # Errors
///
/// Returns the first sale error; with exact cash and a non-empty basket that
/// only happens when the park is shut down.
pub async fn run_orders(
    park: &ParkService,
    orders: usize,
    rng_seed: u64,
    target: AttractionId,
) -> Result<SimulationSummary, ParkError> {
    let mut rng = StdRng::seed_from_u64(rng_seed);
    let mut summary = SimulationSummary {
        orders,
        ..SimulationSummary::default()
    };

    for _ in 0..orders {
        let basket = random_basket(&mut rng);
        let sale = park.sell_tickets(&basket, TicketType::total(&basket)).await?;
        summary.tickets_sold += sale.tickets.len();

        let Some(first) = sale.tickets.first() else {
            continue;
        };
        match park.enter(&first.id, target).await {
            Ok(_) => summary.admissions += 1,
            Err(error) => {
                tracing::trace!(%error, "Simulated entry refused");
                summary.refused_entries += 1;
            },
        }
    }

    Ok(summary)
}
