//! State machine for one barcode scanning view.
//!
//! While a lookup is in flight further decode events are ignored. After a not-found result
//! the camera stays live, so the next decode starts a new lookup. Every accepted decode
//! gets a [`ScanTicket`]; a lookup result is applied only if its ticket is still the
//! current one and the view has not been closed, so a late result never resurrects a
//! closed scanner or overwrites a newer scan.

use crate::{
    core::barcode::{LookupOutcome, ProductLookup},
    models::{MealCandidate, NutritionRecord},
};
use tracing::{debug, info, instrument};

/// Message shown when a lookup comes back empty.
pub const NOT_FOUND_MESSAGE: &str = "Product not found. Try adding it manually.";

/// Identifies one accepted decode event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTicket(u64);

/// Where the scanning view currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanState {
    /// Camera is live and decode events are accepted
    Scanning,
    /// A lookup for `barcode` is in flight
    Loading {
        /// Barcode being looked up
        barcode: String,
        /// Ticket the result must carry
        ticket: ScanTicket,
    },
    /// Lookup succeeded and awaits confirmation
    Found(NutritionRecord),
    /// Lookup came back empty; the message is user-facing and decodes are still accepted
    Failed(String),
    /// View is gone; everything is ignored
    Closed,
}

/// One scanning view's lifecycle.
#[derive(Debug)]
pub struct ScanSession {
    state: ScanState,
    next_ticket: u64,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSession {
    /// Opens a session ready to scan.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ScanState::Scanning,
            next_ticket: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &ScanState {
        &self.state
    }

    /// Whether a lookup is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, ScanState::Loading { .. })
    }

    /// Accepts a decoded barcode if the camera is live.
    ///
    /// Returns the ticket the lookup result must be reported with, or `None` when the
    /// event is ignored (loading, showing a found product, or closed).
    #[instrument(skip(self))]
    pub fn on_decode(&mut self, barcode: &str) -> Option<ScanTicket> {
        if !matches!(self.state, ScanState::Scanning | ScanState::Failed(_)) {
            debug!("Ignoring decode event outside scanning state");
            return None;
        }

        let ticket = ScanTicket(self.next_ticket);
        self.next_ticket += 1;
        info!("Barcode detected");
        self.state = ScanState::Loading {
            barcode: barcode.to_string(),
            ticket,
        };
        Some(ticket)
    }

    /// Applies a lookup result. Returns `false` if it was discarded as stale.
    #[instrument(skip(self, outcome))]
    pub fn on_lookup_result(&mut self, ticket: ScanTicket, outcome: LookupOutcome) -> bool {
        match &self.state {
            ScanState::Loading { ticket: current, .. } if *current == ticket => {}
            _ => {
                debug!(?ticket, "Discarding stale lookup result");
                return false;
            }
        }

        self.state = match outcome {
            LookupOutcome::Found(record) => ScanState::Found(record),
            LookupOutcome::NotFound => ScanState::Failed(NOT_FOUND_MESSAGE.to_string()),
        };
        true
    }

    /// Confirms the found product and closes the view.
    pub fn confirm(&mut self) -> Option<MealCandidate> {
        let ScanState::Found(record) = &self.state else {
            return None;
        };
        let candidate = record.to_candidate();
        self.state = ScanState::Closed;
        Some(candidate)
    }

    /// Goes back to scanning after a result or a failure.
    pub fn rescan(&mut self) {
        if matches!(self.state, ScanState::Found(_) | ScanState::Failed(_)) {
            self.state = ScanState::Scanning;
        }
    }

    /// Closes the view; any in-flight result will be discarded.
    pub fn close(&mut self) {
        self.state = ScanState::Closed;
    }
}

/// Runs one decode-and-lookup cycle through `session`.
///
/// Returns the session's state after the result was applied, or `None` if the decode
/// was ignored.
pub async fn scan_barcode<L: ProductLookup>(
    session: &mut ScanSession,
    lookup: &L,
    barcode: &str,
) -> Option<ScanState> {
    let ticket = session.on_decode(barcode)?;
    let outcome = lookup.lookup(barcode).await;
    session.on_lookup_result(ticket, outcome);
    Some(session.state().clone())
}
