//! Fire-and-forget analytics sinks.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;

use crate::error::AnalyticsError;

pub type Properties = BTreeMap<String, String>;

/// Receives named analytics events. Failures are reported to the caller,
/// which logs and moves on.
pub trait AnalyticsSink: Send + Sync {
    fn log_event(&self, name: &str, properties: &Properties) -> Result<(), AnalyticsError>;
}

/// Writes events to the tracing log, or to a buffer when one is given.
#[derive(Default)]
pub struct LogAnalytics {
    buffer: Option<Arc<Mutex<Vec<String>>>>,
}

impl LogAnalytics {
    pub fn new() -> Self {
        LogAnalytics { buffer: None }
    }

    pub fn with_buffer(buffer: Arc<Mutex<Vec<String>>>) -> Self {
        LogAnalytics {
            buffer: Some(buffer),
        }
    }
}

impl AnalyticsSink for LogAnalytics {
    fn log_event(&self, name: &str, properties: &Properties) -> Result<(), AnalyticsError> {
        let payload = serde_json::to_string(properties)
            .map_err(|err| AnalyticsError::Rejected(err.to_string()))?;
        match &self.buffer {
            Some(buffer) => {
                let mut buffer = buffer.lock().map_err(|_| AnalyticsError::BufferPoisoned)?;
                buffer.push(format!("[ANALYTICS] {} {}", name, payload));
            }
            None => tracing::info!(event = name, properties = %payload, "analytics"),
        }
        Ok(())
    }
}

/// Re-emits events on an [`EventEmitter`] with the properties as a JSON string.
#[cfg(feature = "emitter")]
pub struct EmitterAnalytics {
    emitter: Mutex<EventEmitter>,
}

#[cfg(feature = "emitter")]
impl Default for EmitterAnalytics {
    fn default() -> Self {
        Self::new(EventEmitter::new())
    }
}

#[cfg(feature = "emitter")]
impl EmitterAnalytics {
    pub fn new(emitter: EventEmitter) -> Self {
        EmitterAnalytics {
            emitter: Mutex::new(emitter),
        }
    }

    /// Registers a listener; it runs on the emitter's own thread.
    pub fn on<F>(&self, event: &str, listener: F) -> Result<(), AnalyticsError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| AnalyticsError::BufferPoisoned)?;
        emitter.on(event, listener);
        Ok(())
    }
}

#[cfg(feature = "emitter")]
impl AnalyticsSink for EmitterAnalytics {
    fn log_event(&self, name: &str, properties: &Properties) -> Result<(), AnalyticsError> {
        let payload = serde_json::to_string(properties)
            .map_err(|err| AnalyticsError::Rejected(err.to_string()))?;
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| AnalyticsError::BufferPoisoned)?;
        emitter.emit(name, payload);
        Ok(())
    }
}
