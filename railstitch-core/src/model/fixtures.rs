//! Raw element builders and log capture shared by unit tests

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::loading::{RawElement, RawMember};
use crate::{NodeId, WayId};

/// Approximate length of one degree of latitude
pub(crate) const METERS_PER_DEGREE: f64 = 111_195.0;

pub(crate) fn node(id: NodeId, lat: f64, lon: f64) -> RawElement {
    RawElement::Node { id, lat, lon }
}

pub(crate) fn way(id: WayId, nodes: &[NodeId]) -> RawElement {
    RawElement::Way {
        id,
        nodes: nodes.to_vec(),
    }
}

pub(crate) fn relation_with_stops(id: i64, stops: &[NodeId]) -> RawElement {
    RawElement::Relation {
        id,
        members: stops
            .iter()
            .map(|&reference| RawMember {
                member_type: "node".to_string(),
                reference,
                role: "stop".to_string(),
            })
            .collect(),
    }
}

/// Latitude `meters` north of `lat`
pub(crate) fn north_of(lat: f64, meters: f64) -> f64 {
    lat + meters / METERS_PER_DEGREE
}

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Records log output per thread, so parallel tests see only their own records
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|c| c.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Runs `f` and returns its result with the log records it emitted
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });

    CAPTURED.with(|c| c.borrow_mut().clear());
    let result = f();
    let records = CAPTURED.with(|c| c.borrow_mut().drain(..).collect());
    (result, records)
}
