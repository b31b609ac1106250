//! Entropy adapters for the stochastic inflow bonus.
//!
//! - [`HardwareEntropy`]: `esp_random()` on the ESP32 (true RNG while the
//!   radio or the bootloader entropy source is enabled); on the host, a
//!   `RandomState`-seeded xorshift.
//! - [`XorShiftEntropy`]: seeded xorshift32, reproducible across runs.

use crate::app::ports::EntropySource;

/// Marsaglia xorshift32.  Never yields zero for a non-zero seed.
#[derive(Debug, Clone)]
pub struct XorShiftEntropy {
    state: u32,
}

impl XorShiftEntropy {
    /// A zero seed would lock the generator at zero; it is replaced.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }
}

impl EntropySource for XorShiftEntropy {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

/// Platform random source.
pub struct HardwareEntropy {
    #[cfg(not(feature = "espidf"))]
    fallback: XorShiftEntropy,
}

impl Default for HardwareEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareEntropy {
    #[cfg(feature = "espidf")]
    pub fn new() -> Self {
        Self {}
    }

    #[cfg(not(feature = "espidf"))]
    pub fn new() -> Self {
        use std::hash::{BuildHasher, RandomState};
        let seed = RandomState::new().hash_one(0u32) as u32;
        Self {
            fallback: XorShiftEntropy::new(seed),
        }
    }
}

impl EntropySource for HardwareEntropy {
    #[cfg(feature = "espidf")]
    fn next_u32(&mut self) -> u32 {
        unsafe { esp_idf_svc::sys::esp_random() }
    }

    #[cfg(not(feature = "espidf"))]
    fn next_u32(&mut self) -> u32 {
        self.fallback.next_u32()
    }
}
