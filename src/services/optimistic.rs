//! Optimistic local updates with rollback
//!
//! Local state changes before the server confirms. The command keeps the
//! last-known-good snapshot and restores it if the request fails.

use tracing::warn;

use crate::error::MonetaResult;

/// Local state updated ahead of server confirmation
#[derive(Debug, Clone)]
pub struct Optimistic<S: Clone> {
    state: S,
}

impl<S: Clone> Optimistic<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }

    /// Current (possibly tentative) state
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn into_state(self) -> S {
        self.state
    }

    /// Apply `change` immediately, then run `request`. If the request fails
    /// the state is restored to the snapshot taken before `change`.
    pub fn apply<R>(
        &mut self,
        change: impl FnOnce(&S) -> S,
        request: impl FnOnce(&S) -> MonetaResult<R>,
    ) -> MonetaResult<R> {
        let snapshot = self.state.clone();
        self.state = change(&snapshot);

        match request(&self.state) {
            Ok(result) => Ok(result),
            Err(err) => {
                warn!("request failed, rolling back local change: {}", err);
                self.state = snapshot;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MonetaError;

    #[test]
    fn test_keeps_change_on_success() {
        let mut list = Optimistic::new(vec![1, 2, 3]);
        let seen = list
            .apply(
                |items| items.iter().copied().filter(|i| *i != 2).collect(),
                |tentative| Ok(tentative.len()),
            )
            .unwrap();
        assert_eq!(seen, 2);
        assert_eq!(list.state(), &vec![1, 3]);
    }

    #[test]
    fn test_rolls_back_on_failure() {
        let mut list = Optimistic::new(vec![1, 2, 3]);
        let result: MonetaResult<()> = list.apply(
            |_| Vec::new(),
            |_| Err(MonetaError::Http("offline".into())),
        );
        assert!(result.is_err());
        assert_eq!(list.into_state(), vec![1, 2, 3]);
    }
}
