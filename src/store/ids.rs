use crate::domain::CardId;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

/// Hands out card ids that are unique and increasing for the life of the process.
///
/// Once `i64::MAX` has been issued or observed the allocator is exhausted and
/// [`IdAllocator::next_id`] returns `None` from then on.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicI64,
    exhausted: AtomicBool,
}

impl IdAllocator {
    pub fn new(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
            exhausted: AtomicBool::new(false),
        }
    }

    /// Starts one past `highest`, or at zero when nothing has been issued yet
    pub fn after(highest: Option<CardId>) -> Self {
        let ids = Self::new(0);
        if let Some(id) = highest {
            ids.observe(id);
        }
        ids
    }

    pub fn next_id(&self) -> Option<CardId> {
        loop {
            if self.exhausted.load(Ordering::SeqCst) {
                return None;
            }
            let current = self.next.load(Ordering::SeqCst);
            match current.checked_add(1) {
                Some(following) => {
                    if self
                        .next
                        .compare_exchange(current, following, Ordering::SeqCst, Ordering::SeqCst)
                        .is_ok()
                    {
                        return Some(CardId::new(current));
                    }
                }
                // Last id in the range: whoever flips the flag owns it
                None => {
                    return self
                        .exhausted
                        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                        .ok()
                        .map(|_| CardId::new(current));
                }
            }
        }
    }

    /// Records an id chosen elsewhere so it is never issued again
    pub fn observe(&self, id: CardId) {
        match id.value().checked_add(1) {
            Some(following) => {
                self.next.fetch_max(following, Ordering::SeqCst);
            }
            None => self.exhausted.store(true, Ordering::SeqCst),
        }
    }

    /// The id the next call to `next_id` would return
    pub fn peek(&self) -> Option<CardId> {
        if self.exhausted.load(Ordering::SeqCst) {
            None
        } else {
            Some(CardId::new(self.next.load(Ordering::SeqCst)))
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted.load(Ordering::SeqCst)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(0)
    }
}
