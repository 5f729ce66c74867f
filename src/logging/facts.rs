use log::Level;
use serde_json::Value;

/// Receives structured facts (one JSON object per event).
pub trait FactsEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value);
}

/// Receives human-oriented progress lines.
pub trait AuditSink {
    fn log(&self, level: Level, msg: &str);
}

/// Forwards facts and audit lines to the `log` facade, one JSON object per line.
///
/// Facts go to the `linkstate::facts` target so they can be filtered apart from
/// the audit lines on `linkstate::audit`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonlSink;

impl FactsEmitter for JsonlSink {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value) {
        let level = match decision {
            "failure" => Level::Warn,
            _ => Level::Debug,
        };
        log::log!(target: "linkstate::facts", level, "{subsystem} {event} {fields}");
    }
}

impl AuditSink for JsonlSink {
    fn log(&self, level: Level, msg: &str) {
        log::log!(target: "linkstate::audit", level, "{msg}");
    }
}
