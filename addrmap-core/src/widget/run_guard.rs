use parking_lot::Mutex;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

/// Admits at most one reconciliation run at a time.
#[derive(Debug, Default)]
pub struct RunGuard {
    state: Mutex<RunState>,
}

impl RunGuard {
    /// Starts a run if none is active.
    ///
    /// The returned ticket ends the run when it is finished or dropped.
    pub fn try_start(&self) -> Option<RunTicket<'_>> {
        let mut state = self.state.lock();
        match *state {
            RunState::Running => None,
            RunState::Idle => {
                *state = RunState::Running;
                Some(RunTicket { guard: self })
            }
        }
    }

    pub fn state(&self) -> RunState {
        *self.state.lock()
    }

    fn finish(&self) {
        *self.state.lock() = RunState::Idle;
    }
}

#[derive(Debug)]
#[must_use = "the run ends when the ticket is dropped"]
pub struct RunTicket<'a> {
    guard: &'a RunGuard,
}

impl RunTicket<'_> {
    pub fn finish(self) {}
}

impl Drop for RunTicket<'_> {
    fn drop(&mut self) {
        self.guard.finish();
    }
}
