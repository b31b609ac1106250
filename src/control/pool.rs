//! Bounded energy pool accumulator.
//!
//! Holds the pool quantity plus monotonically increasing inflow, consumed
//! and released counters.  Each counter carries a "previous" snapshot so
//! the log cadence can report windowed deltas.
//!
//! Clamping is silent: overflow and starvation are steady-state
//! conditions, not faults.

use log::debug;
use serde::Serialize;

/// Windowed deltas reported at the log cadence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolDeltas {
    /// Signed change of the quantity since the last snapshot.
    pub quantity: i64,
    pub inflow: u64,
    pub consumed: u64,
    pub released: u64,
}

#[derive(Debug, Clone)]
pub struct EnergyPool {
    capacity: u32,
    quantity: u32,
    previous_quantity: u32,
    total_inflow: u64,
    previous_inflow: u64,
    total_consumed: u64,
    previous_consumed: u64,
    total_released: u64,
    previous_released: u64,
}

impl EnergyPool {
    /// An empty pool.
    pub fn new(capacity: u32) -> Self {
        Self::with_quantity(capacity, 0)
    }

    /// A pool starting at `quantity` (clamped to `capacity`), with zeroed counters.
    pub fn with_quantity(capacity: u32, quantity: u32) -> Self {
        let quantity = quantity.min(capacity);
        Self {
            capacity,
            quantity,
            previous_quantity: quantity,
            total_inflow: 0,
            previous_inflow: 0,
            total_consumed: 0,
            previous_consumed: 0,
            total_released: 0,
            previous_released: 0,
        }
    }

    /// Add a measured amount plus a stochastic bonus, saturating at capacity.
    ///
    /// Returns the energy actually accepted.
    pub fn absorb_inflow(&mut self, measured: u32, stochastic_bonus: u32) -> u32 {
        let offered = measured.saturating_add(stochastic_bonus);
        let room = self.capacity - self.quantity;
        let accepted = offered.min(room);
        if accepted < offered {
            debug!("pool: inflow clamped at capacity ({} spilled)", offered - accepted);
        }
        self.quantity += accepted;
        self.total_inflow += u64::from(accepted);
        accepted
    }

    /// Subtract consumption and release, flooring at zero.
    ///
    /// Each counter grows by at most the quantity present before the
    /// subtraction, so neither can claim energy that never existed.
    pub fn absorb_outflow(&mut self, consumption_request: u32, release_request: u32) {
        let before = self.quantity;
        self.total_consumed += u64::from(before.min(consumption_request));
        self.total_released += u64::from(before.min(release_request));
        self.quantity = before.saturating_sub(consumption_request.saturating_add(release_request));
    }

    /// Report deltas since the previous snapshot and advance the snapshot.
    pub fn snapshot_deltas(&mut self) -> PoolDeltas {
        let deltas = PoolDeltas {
            quantity: i64::from(self.quantity) - i64::from(self.previous_quantity),
            inflow: self.total_inflow - self.previous_inflow,
            consumed: self.total_consumed - self.previous_consumed,
            released: self.total_released - self.previous_released,
        };
        self.previous_quantity = self.quantity;
        self.previous_inflow = self.total_inflow;
        self.previous_consumed = self.total_consumed;
        self.previous_released = self.total_released;
        deltas
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn previous_quantity(&self) -> u32 {
        self.previous_quantity
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn total_inflow(&self) -> u64 {
        self.total_inflow
    }

    pub fn total_consumed(&self) -> u64 {
        self.total_consumed
    }

    pub fn total_released(&self) -> u64 {
        self.total_released
    }
}
