/// Single-flight guard around the submit-and-refresh sequence.
///
/// Triggers that arrive while a submission is in flight are dropped, not
/// queued. The gate is plain owned state: every controller has its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmissionGate {
    in_flight: bool,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engage the gate. Returns `false` if it was already engaged.
    pub fn try_acquire(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn release(&mut self) {
        self.in_flight = false;
    }

    pub fn is_engaged(&self) -> bool {
        self.in_flight
    }
}
