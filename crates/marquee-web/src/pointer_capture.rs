#![forbid(unsafe_code)]

//! Deterministic pointer-capture bookkeeping for JS hosts.
//!
//! The engine asks its host to capture and release pointers while a drag is
//! in progress. In the browser those calls are `setPointerCapture` /
//! `releasePointerCapture`, which the JS glue performs after draining the
//! queued [`CaptureOp`]s. The ledger tracks each pointer through:
//! - `Requested`: acquire queued, not yet confirmed by `gotpointercapture`,
//! - `Acquired`: confirmed by the host,
//! - `Lost`: the browser dropped capture on its own (`lostpointercapture`).
//!
//! Releasing a pointer the browser already dropped reports
//! [`CaptureError::AlreadyReleased`]; the engine swallows it.

use marquee_runtime::CaptureError;

/// Host command emitted for browser pointer-capture control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOp {
    Acquire { pointer_id: u32 },
    Release { pointer_id: u32 },
}

impl CaptureOp {
    #[must_use]
    pub const fn pointer_id(self) -> u32 {
        match self {
            Self::Acquire { pointer_id } | Self::Release { pointer_id } => pointer_id,
        }
    }

    /// Stable op name for JS payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Acquire { .. } => "acquire",
            Self::Release { .. } => "release",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Requested,
    Acquired,
    Lost,
}

/// Tracks captured pointers and queues capture commands for the host.
#[derive(Debug, Default, Clone)]
pub struct PointerCaptureLedger {
    pointers: Vec<(u32, CaptureState)>,
    pending: Vec<CaptureOp>,
}

impl PointerCaptureLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, pointer_id: u32) -> Option<usize> {
        self.pointers.iter().position(|(id, _)| *id == pointer_id)
    }

    /// Queue an acquire for `pointer_id`.
    ///
    /// Re-acquiring a pointer that is already requested or held is a no-op.
    pub fn acquire(&mut self, pointer_id: u32) -> Result<(), CaptureError> {
        match self.position(pointer_id) {
            Some(i) if self.pointers[i].1 != CaptureState::Lost => return Ok(()),
            Some(i) => self.pointers[i].1 = CaptureState::Requested,
            None => self.pointers.push((pointer_id, CaptureState::Requested)),
        }
        self.pending.push(CaptureOp::Acquire { pointer_id });
        Ok(())
    }

    /// Host confirmation (`gotpointercapture`). Returns `false` for pointers
    /// the ledger never requested.
    pub fn acknowledge(&mut self, pointer_id: u32) -> bool {
        match self.position(pointer_id) {
            Some(i) if self.pointers[i].1 == CaptureState::Requested => {
                self.pointers[i].1 = CaptureState::Acquired;
                true
            }
            _ => false,
        }
    }

    /// Queue a release for `pointer_id` and forget it.
    pub fn release(&mut self, pointer_id: u32) -> Result<(), CaptureError> {
        let Some(i) = self.position(pointer_id) else {
            return Err(CaptureError::UnknownPointer(pointer_id));
        };
        let (_, state) = self.pointers.remove(i);
        if state == CaptureState::Lost {
            return Err(CaptureError::AlreadyReleased(pointer_id));
        }
        self.pending.push(CaptureOp::Release { pointer_id });
        Ok(())
    }

    /// Queue releases for every pointer still requested or held, then
    /// forget all pointers. Returns how many releases were queued.
    pub fn release_all(&mut self) -> usize {
        let before = self.pending.len();
        for (pointer_id, state) in self.pointers.drain(..) {
            if state != CaptureState::Lost {
                self.pending.push(CaptureOp::Release { pointer_id });
            }
        }
        self.pending.len() - before
    }

    /// Browser dropped capture (`lostpointercapture`). Returns `true` when the
    /// pointer was still considered captured, meaning an in-flight drag
    /// should be cancelled.
    pub fn lost_capture(&mut self, pointer_id: u32) -> bool {
        match self.position(pointer_id) {
            Some(i) if self.pointers[i].1 != CaptureState::Lost => {
                self.pointers[i].1 = CaptureState::Lost;
                true
            }
            _ => false,
        }
    }

    /// Whether `pointer_id` is requested or held.
    #[must_use]
    pub fn is_captured(&self, pointer_id: u32) -> bool {
        self.position(pointer_id)
            .is_some_and(|i| self.pointers[i].1 != CaptureState::Lost)
    }

    /// Whether the host confirmed capture for `pointer_id`.
    #[must_use]
    pub fn is_acquired(&self, pointer_id: u32) -> bool {
        self.position(pointer_id)
            .is_some_and(|i| self.pointers[i].1 == CaptureState::Acquired)
    }

    /// Take queued capture commands in emission order.
    pub fn drain(&mut self) -> Vec<CaptureOp> {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn acquire_release_queues_commands() {
        let mut ledger = PointerCaptureLedger::new();
        ledger.acquire(3).unwrap();
        assert!(ledger.is_captured(3));
        assert!(!ledger.is_acquired(3));
        assert!(ledger.acknowledge(3));
        assert!(ledger.is_acquired(3));
        ledger.release(3).unwrap();
        assert!(!ledger.is_captured(3));
        assert_eq!(
            ledger.drain(),
            vec![
                CaptureOp::Acquire { pointer_id: 3 },
                CaptureOp::Release { pointer_id: 3 },
            ]
        );
        assert_eq!(ledger.pending_len(), 0);
    }

    #[test]
    fn reacquire_is_idempotent() {
        let mut ledger = PointerCaptureLedger::new();
        ledger.acquire(1).unwrap();
        ledger.acquire(1).unwrap();
        assert_eq!(ledger.drain().len(), 1);
    }

    #[test]
    fn release_after_loss_reports_already_released() {
        let mut ledger = PointerCaptureLedger::new();
        ledger.acquire(9).unwrap();
        assert!(ledger.lost_capture(9));
        assert!(!ledger.lost_capture(9), "second loss is stale");
        assert!(!ledger.is_captured(9));
        assert_eq!(ledger.release(9), Err(CaptureError::AlreadyReleased(9)));
        assert_eq!(ledger.release(9), Err(CaptureError::UnknownPointer(9)));
        assert_eq!(ledger.drain(), vec![CaptureOp::Acquire { pointer_id: 9 }]);
    }

    #[test]
    fn unknown_pointers_are_reported() {
        let mut ledger = PointerCaptureLedger::new();
        assert_eq!(ledger.release(4), Err(CaptureError::UnknownPointer(4)));
        assert!(!ledger.acknowledge(4));
        assert!(!ledger.lost_capture(4));
    }

    #[test]
    fn release_all_skips_lost_pointers() {
        let mut ledger = PointerCaptureLedger::new();
        ledger.acquire(1).unwrap();
        ledger.acquire(2).unwrap();
        ledger.lost_capture(2);
        ledger.drain();
        assert_eq!(ledger.release_all(), 1);
        assert_eq!(ledger.drain(), vec![CaptureOp::Release { pointer_id: 1 }]);
        assert!(!ledger.is_captured(1));
    }

    #[test]
    fn op_names_are_stable() {
        assert_eq!(CaptureOp::Acquire { pointer_id: 1 }.as_str(), "acquire");
        assert_eq!(CaptureOp::Release { pointer_id: 2 }.as_str(), "release");
        assert_eq!(CaptureOp::Release { pointer_id: 2 }.pointer_id(), 2);
    }
}
