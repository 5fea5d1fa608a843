use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::decimal::deserialize_decimal;
use crate::value::{parse_decimal, to_fixed};
use crate::ValidationError;

/// Direction of a detected move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "DOWN")]
    Down,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }

    /// Past-tense verb used in narrative text.
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Up => "rose",
            Self::Down => "fell",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "UP" => Ok(Self::Up),
            "DOWN" => Ok(Self::Down),
            other => Err(ValidationError::InvalidDirection {
                value: other.to_owned(),
            }),
        }
    }
}

/// Day flagged upstream as an unusually large move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveEvent {
    pub id: i64,
    pub date: String,
    pub direction: Direction,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub pct_change: String,
    pub severity: i64,
}

impl MoveEvent {
    pub fn pct_value(&self) -> f64 {
        parse_decimal(&self.pct_change)
    }

    pub const fn color(&self) -> SeverityColor {
        SeverityColor::for_severity(self.severity)
    }
}

/// Marker color for a severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityColor {
    DeepRed,
    Red,
    Amber,
    Green,
}

impl SeverityColor {
    pub const fn for_severity(severity: i64) -> Self {
        match severity {
            4 => Self::DeepRed,
            3 => Self::Red,
            2 => Self::Amber,
            _ => Self::Green,
        }
    }

    pub const fn hex(self) -> &'static str {
        match self {
            Self::DeepRed => "#b42318",
            Self::Red => "#d92d20",
            Self::Amber => "#f59e0b",
            Self::Green => "#22c55e",
        }
    }
}

/// Whether a move reads as a gain or a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveClass {
    Up,
    Down,
}

impl MoveClass {
    pub fn of(pct: f64) -> Self {
        if pct >= 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }
}

/// One row of the event list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRow {
    pub id: i64,
    pub date: String,
    pub direction: Direction,
    pub severity: i64,
    pub pct_label: String,
    pub move_class: MoveClass,
    pub color: SeverityColor,
}

impl From<&MoveEvent> for EventRow {
    fn from(event: &MoveEvent) -> Self {
        let pct = event.pct_value();
        Self {
            id: event.id,
            date: event.date.clone(),
            direction: event.direction,
            severity: event.severity,
            pct_label: format!("{}%", to_fixed(pct, 2)),
            move_class: MoveClass::of(pct),
            color: event.color(),
        }
    }
}

/// Builds list rows, newest date first. Events on the same date keep their
/// input order.
pub fn event_rows(events: &[MoveEvent]) -> Vec<EventRow> {
    let mut ordered = events.iter().collect::<Vec<_>>();
    ordered.sort_by(|left, right| right.date.cmp(&left.date));
    ordered.into_iter().map(EventRow::from).collect()
}
