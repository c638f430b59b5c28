use std::cell::Cell;
use std::rc::Rc;

/// Counter used to recognize responses that arrive after a newer request
/// (or after the view went away).
#[derive(Clone, Default)]
pub struct RequestGeneration {
    current: Rc<Cell<u64>>,
}

pub struct Ticket {
    current: Rc<Cell<u64>>,
    issued: u64,
}

impl RequestGeneration {
    pub fn issue(&self) -> Ticket {
        let issued = self.current.get().wrapping_add(1);
        self.current.set(issued);
        Ticket {
            current: Rc::clone(&self.current),
            issued,
        }
    }

    /// Makes every outstanding ticket stale.
    pub fn invalidate(&self) {
        self.current.set(self.current.get().wrapping_add(1));
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.current.get() == self.issued
    }
}

/// Per-form flag that rejects a submission while the previous one runs.
#[derive(Clone, Default)]
pub struct InFlight {
    busy: Rc<Cell<bool>>,
}

#[must_use = "the form is released as soon as the guard is dropped"]
pub struct InFlightGuard {
    busy: Rc<Cell<bool>>,
}

impl InFlight {
    pub fn try_begin(&self) -> Option<InFlightGuard> {
        if self.busy.replace(true) {
            return None;
        }
        Some(InFlightGuard {
            busy: Rc::clone(&self.busy),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}
