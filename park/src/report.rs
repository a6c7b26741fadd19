//! Read-only views of the park for operators.

use crate::types::{Attraction, ParkState};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-attraction line of a [`ParkReport`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttractionSummary {
    /// Attraction name
    pub name: String,
    /// Successful admissions
    pub total_entries: u64,
    /// Remaining slots
    pub capacity: u32,
    /// Whether it is open
    pub open: bool,
}

/// Revenue, tickets sold and per-attraction counters, in creation order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParkReport {
    /// Cash collected
    pub revenue: f64,
    /// Tickets sold
    pub tickets_sold: usize,
    /// One entry per attraction
    pub attractions: Vec<AttractionSummary>,
}

impl ParkReport {
    /// Builds a report from the current state
    #[must_use]
    pub fn from_state(state: &ParkState) -> Self {
        Self {
            revenue: state.revenue,
            tickets_sold: state.ticket_count(),
            attractions: state
                .attractions
                .values()
                .map(|a| AttractionSummary {
                    name: a.name.clone(),
                    total_entries: a.total_entries,
                    capacity: a.capacity,
                    open: a.open,
                })
                .collect(),
        }
    }
}

impl fmt::Display for ParkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== REPORT ===")?;
        writeln!(f, "Revenue: {:.2}", self.revenue)?;
        write!(f, "Tickets sold: {}", self.tickets_sold)?;
        for a in &self.attractions {
            write!(
                f,
                "\n - {}: {} entries | cap:{} | {}",
                a.name,
                a.total_entries,
                a.capacity,
                if a.open { "OPEN" } else { "CLOSED" }
            )?;
        }
        Ok(())
    }
}

/// Attraction listing, one line each, or a notice when there are none
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttractionList(pub Vec<Attraction>);

impl fmt::Display for AttractionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("No attractions.");
        }
        let mut lines = self.0.iter();
        if let Some(first) = lines.next() {
            write!(f, "{first}")?;
        }
        for attraction in lines {
            write!(f, "\n{attraction}")?;
        }
        Ok(())
    }
}
