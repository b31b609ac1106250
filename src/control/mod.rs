//! Control core: the pieces one admitted cycle runs through.
//!
//! | Module    | Role                                            |
//! |-----------|-------------------------------------------------|
//! | `gate`    | minimum inter-cycle interval                    |
//! | `pool`    | bounded energy accumulator and counters         |
//! | `level`   | six-band classification and net-rate signal     |
//! | `motor`   | speed / direction / low-power state machine     |
//! | `context` | the one mutable context all stages share        |

pub mod context;
pub mod gate;
pub mod level;
pub mod motor;
pub mod pool;
