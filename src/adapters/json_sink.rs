//! JSON-lines event sink.
//!
//! Serialises each [`AppEvent`] with `serde_json` and appends it, plus a
//! newline, to any [`core::fmt::Write`] target: a `String` on the host,
//! a UART writer on the device.

use core::fmt::Write;

use log::warn;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

pub struct JsonLineSink<W> {
    out: W,
    written: u32,
}

impl<W: Write> JsonLineSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Lines successfully written, modulo 2^32.
    pub fn written(&self) -> u32 {
        self.written
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for JsonLineSink<W> {
    fn emit(&mut self, event: &AppEvent) {
        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                warn!("event serialisation failed: {e}");
                return;
            }
        };
        if writeln!(self.out, "{line}").is_err() {
            warn!("event sink write failed");
            return;
        }
        self.written = self.written.wrapping_add(1);
    }
}
