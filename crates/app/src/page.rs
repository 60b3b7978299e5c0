//! Page-local state for data fetched from the backend.
//!
//! Requests cannot be cancelled, so every fetch gets a [`Ticket`]. Only the
//! answer carrying the latest ticket is applied; answers for superseded or
//! discarded requests are dropped.

use core::fmt::Display;

/// Identifies one in-flight request for a [`Loadable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "pass the ticket back to `finish` with the response"]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
pub struct Loadable<T> {
    data: T,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T> Loadable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            data: initial,
            loading: false,
            error: None,
            generation: 0,
        }
    }

    /// Mark a request as started. Any earlier ticket becomes stale.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        Ticket(self.generation)
    }

    /// Apply a response. Returns `false` when the ticket is stale.
    ///
    /// On error the previous data is kept and the message recorded.
    pub fn finish<E: Display>(&mut self, ticket: Ticket, result: Result<T, E>) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!("dropping stale response");
            return false;
        }

        self.loading = false;
        match result {
            Ok(data) => self.data = data,
            Err(err) => self.error = Some(err.to_string()),
        }
        true
    }

    /// The page went away: whatever is in flight must not be applied.
    pub fn discard(&mut self) {
        self.generation += 1;
        self.loading = false;
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    /// Local edits, e.g. dropping a record the user just deleted.
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<T: Default> Default for Loadable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_latest_response() {
        let mut page: Loadable<Vec<u32>> = Loadable::default();
        let t = page.begin();
        assert!(page.is_loading());

        assert!(page.finish::<String>(t, Ok(vec![1, 2])));
        assert_eq!(page.data(), &vec![1, 2]);
        assert!(!page.is_loading());
        assert!(page.error().is_none());
    }

    #[test]
    fn error_keeps_previous_data() {
        let mut page = Loadable::new(vec![7u32]);
        let t = page.begin();
        page.finish(t, Err("failed to fetch weapons (HTTP 500)"));

        assert_eq!(page.data(), &vec![7]);
        assert_eq!(page.error(), Some("failed to fetch weapons (HTTP 500)"));
    }

    #[test]
    fn superseded_response_is_dropped() {
        let mut page: Loadable<Vec<u32>> = Loadable::default();
        let first = page.begin();
        let second = page.begin();

        assert!(page.finish::<String>(second, Ok(vec![2])));
        assert!(!page.finish::<String>(first, Ok(vec![1])));
        assert_eq!(page.data(), &vec![2]);
    }

    #[test]
    fn discarded_page_ignores_late_answers() {
        let mut page: Loadable<Vec<u32>> = Loadable::default();
        let t = page.begin();
        page.discard();

        assert!(!page.finish::<String>(t, Ok(vec![9])));
        assert!(page.data().is_empty());
        assert!(!page.is_loading());
    }
}
