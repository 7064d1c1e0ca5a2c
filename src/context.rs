//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload leads from backend - read
    pub refresh_trigger: ReadSignal<u32>,
    /// Trigger to reload leads from backend - write
    set_refresh_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(refresh_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            refresh_trigger: refresh_trigger.0,
            set_refresh_trigger: refresh_trigger.1,
        }
    }

    /// Trigger a manual refresh of the lead snapshot
    pub fn refresh(&self) {
        self.set_refresh_trigger.update(|v| *v += 1);
    }
}
