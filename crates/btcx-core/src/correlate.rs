use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::{MoveEvent, PricePoint, SeverityColor};

/// Price point paired with the event detected on its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorrelatedPoint<'a> {
    pub point: &'a PricePoint,
    pub event: &'a MoveEvent,
}

/// Joins a price series with events on the date key.
///
/// Output keeps series order. When several events share a date the last one
/// in `events` wins.
pub fn correlate<'a>(
    series: &'a [PricePoint],
    events: &'a [MoveEvent],
) -> Vec<CorrelatedPoint<'a>> {
    let mut by_date: HashMap<&str, &MoveEvent> = HashMap::with_capacity(events.len());
    for event in events {
        if let Some(previous) = by_date.insert(event.date.as_str(), event) {
            debug!(
                date = %event.date,
                dropped = previous.id,
                kept = event.id,
                "events share a date, keeping the later one"
            );
        }
    }

    series
        .iter()
        .filter_map(|point| {
            by_date
                .get(point.date.as_str())
                .copied()
                .map(|event| CorrelatedPoint { point, event })
        })
        .collect()
}

/// Clickable chart marker for a correlated point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub date: String,
    pub close: f64,
    pub event_id: i64,
    pub severity: i64,
    pub color: SeverityColor,
    pub fill: &'static str,
}

impl From<CorrelatedPoint<'_>> for Marker {
    fn from(pair: CorrelatedPoint<'_>) -> Self {
        let color = pair.event.color();
        Self {
            date: pair.point.date.clone(),
            close: pair.point.close_value(),
            event_id: pair.event.id,
            severity: pair.event.severity,
            color,
            fill: color.hex(),
        }
    }
}

pub fn markers(series: &[PricePoint], events: &[MoveEvent]) -> Vec<Marker> {
    correlate(series, events)
        .into_iter()
        .map(Marker::from)
        .collect()
}
