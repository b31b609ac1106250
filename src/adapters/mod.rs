//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements         | Connects to                      |
//! |-------------|--------------------|----------------------------------|
//! | `hardware`  | SensorPort         | ADC channels, button GPIOs       |
//! |             | ActuatorPort       | H-bridge, tone PWM, LEDs         |
//! | `log_sink`  | EventSink          | `log` facade / serial console    |
//! | `json_sink` | EventSink          | any `core::fmt::Write`, JSON lines |
//! | `time`      | Clock              | ESP high-res timer / manual      |
//! | `entropy`   | EntropySource      | ESP hardware RNG / xorshift      |

pub mod entropy;
pub mod hardware;
pub mod json_sink;
pub mod log_sink;
pub mod time;
