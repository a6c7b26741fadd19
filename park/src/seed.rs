//! Demo attractions shared by the demo binary, the benchmark and tests.

use crate::error::ParkError;
use crate::service::ParkService;
use crate::types::Attraction;

/// `(name, capacity, open)` of the default attractions, in creation order
pub const DEFAULT_ATTRACTIONS: [(&str, u32, bool); 3] = [
    ("Montaña del Café", 10, true),
    ("Río Aventura", 8, true),
    ("Casa del Arriero (VR)", 5, false),
];

/// Creates the default attractions on `park`
///
/// With the default id base they get ids 101, 102 and 103.
///
/// # Errors
///
/// Propagates [`ParkError::Unavailable`] if the park was shut down.
pub async fn seed(park: &ParkService) -> Result<Vec<Attraction>, ParkError> {
    let mut created = Vec::with_capacity(DEFAULT_ATTRACTIONS.len());
    for (name, capacity, open) in DEFAULT_ATTRACTIONS {
        created.push(park.create_attraction(name, capacity, open).await?);
    }
    Ok(created)
}
