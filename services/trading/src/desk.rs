//! Trading desk — thread-shareable front of the trading service
//!
//! Wraps a [`TradingService`] and its [`AccountRegistry`] behind one mutex.
//! Each trade or swap holds the lock for the whole call, so concurrent
//! callers are serialized and never observe a half-applied transfer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use types::errors::TradingError;
use types::transaction::Transaction;

use crate::registry::AccountRegistry;
use crate::trading::{SwapRequest, TradeRequest, TradingService};

/// State guarded by the desk lock
#[derive(Debug, Default)]
pub struct DeskState {
    pub service: TradingService,
    pub registry: AccountRegistry,
}

/// Cloneable handle; clones share the same state
#[derive(Debug, Clone, Default)]
pub struct TradingDesk {
    state: Arc<Mutex<DeskState>>,
}

impl TradingDesk {
    pub fn new(service: TradingService, registry: AccountRegistry) -> Self {
        Self {
            state: Arc::new(Mutex::new(DeskState { service, registry })),
        }
    }

    // Operations validate before mutating, so a panicked holder never
    // leaves a partial transfer behind and the poisoned state is usable.
    fn lock(&self) -> MutexGuard<'_, DeskState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn trade(&self, request: &TradeRequest, exchange: &str) -> Result<Transaction, TradingError> {
        let mut state = self.lock();
        let DeskState { service, registry } = &mut *state;
        service.trade_transaction(registry, request, exchange)
    }

    pub fn swap(&self, request: &SwapRequest, exchange: &str) -> Result<Transaction, TradingError> {
        let mut state = self.lock();
        let DeskState { service, registry } = &mut *state;
        service.swap_transaction(registry, request, exchange)
    }

    /// Read the state under the lock
    pub fn with_state<R>(&self, f: impl FnOnce(&DeskState) -> R) -> R {
        f(&*self.lock())
    }

    /// Mutate the state under the lock
    pub fn with_state_mut<R>(&self, f: impl FnOnce(&mut DeskState) -> R) -> R {
        f(&mut *self.lock())
    }
}
