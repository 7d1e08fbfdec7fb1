//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::error::{EngineError, EngineResult};
use crate::store::RecordStore;

/// Shared application state.
///
/// Holds the record store handle. The handle is passed in explicitly rather
/// than opened per request.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RecordStore>,
}

impl AppState {
    /// Creates a new application state around a record store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Runs a store operation on the blocking thread pool.
    ///
    /// Store calls may wait on a lock or on disk, so they never run on an
    /// async worker thread. A task that panics or is cancelled surfaces as a
    /// storage error.
    pub async fn with_store<T, F>(&self, op: F) -> EngineResult<T>
    where
        F: FnOnce(&dyn RecordStore) -> EngineResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| EngineError::storage(format!("store task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeId, NewEmployee};
    use crate::store::InMemoryStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_clones_share_one_store() {
        let state = AppState::new(Arc::new(InMemoryStore::new()));
        let clone = state.clone();

        let id = state
            .with_store(|store| {
                store.create_employee(NewEmployee {
                    full_name: "Ana".to_string(),
                    role_title: "Cashier".to_string(),
                    hourly_rate: Decimal::from(15),
                    start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
                })
            })
            .await
            .unwrap();

        let found = clone
            .with_store(move |store| store.get_employee(id))
            .await
            .unwrap();
        assert_eq!(found.id, EmployeeId(1));
    }

    #[tokio::test]
    async fn test_panicking_operation_becomes_storage_error() {
        let state = AppState::new(Arc::new(InMemoryStore::new()));

        let err = state
            .with_store(|_store| -> EngineResult<()> { panic!("backend crashed") })
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::Storage { .. }));
    }
}
