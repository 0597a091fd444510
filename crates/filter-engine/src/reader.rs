//! Host-side wiring around a selected geometry filter.

use finderscan_scan_model::{DetectionEvent, FinderRegion, GateState};

use crate::backend::{GeometryFilter, Verdict};

/// A filter bound to the caller's accept handler.
///
/// This is the callback a host registers with its scanning engine. It keeps
/// no gate state: the host passes the current finder and flags on every
/// detection.
pub struct BarcodeReader<'f, H>
where
    H: FnMut(&str),
{
    filter: &'f dyn GeometryFilter,
    on_accept: H,
}

impl<'f, H> BarcodeReader<'f, H>
where
    H: FnMut(&str),
{
    pub fn new(filter: &'f dyn GeometryFilter, on_accept: H) -> Self {
        Self { filter, on_accept }
    }

    /// Evaluate one detection; the handler runs iff the verdict is
    /// `Accepted`.
    pub fn on_barcode_read(
        &mut self,
        event: &DetectionEvent,
        finder: &FinderRegion,
        gate: GateState,
    ) -> Verdict {
        self.filter.evaluate(event, finder, gate, &mut self.on_accept)
    }

    pub fn filter(&self) -> &dyn GeometryFilter {
        self.filter
    }

    /// Give back the handler, e.g. to inspect what it collected.
    pub fn into_handler(self) -> H {
        self.on_accept
    }
}

/// Caller-side gate bookkeeping for a single-read scan screen.
///
/// Owns the finder and [`GateState`], and flips `already_read` after the
/// first accepted detection so later ones are suppressed until
/// [`ScanSession::reset`].
pub struct ScanSession<'f> {
    filter: &'f dyn GeometryFilter,
    finder: FinderRegion,
    gate: GateState,
}

impl<'f> ScanSession<'f> {
    pub fn new(filter: &'f dyn GeometryFilter, finder: FinderRegion) -> Self {
        Self {
            filter,
            finder,
            gate: GateState::open(),
        }
    }

    /// Evaluate one detection. Returns the payload when it was accepted.
    pub fn process(&mut self, event: &DetectionEvent) -> Option<String> {
        let mut accepted = None;
        let verdict = self
            .filter
            .evaluate(event, &self.finder, self.gate, &mut |data| {
                accepted = Some(data.to_string())
            });
        if verdict.is_accepted() {
            self.gate.already_read = true;
        }
        accepted
    }

    /// Update the finder, e.g. after the overlay was laid out again.
    pub fn set_finder(&mut self, finder: FinderRegion) {
        self.finder = finder;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.gate.is_focused = focused;
    }

    /// Allow the next detection to be read again.
    pub fn reset(&mut self) {
        self.gate.already_read = false;
    }

    pub fn gate(&self) -> GateState {
        self.gate
    }

    pub fn finder(&self) -> FinderRegion {
        self.finder
    }
}
