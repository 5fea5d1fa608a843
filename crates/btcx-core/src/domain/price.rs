use serde::{Deserialize, Serialize};
use tracing::warn;

use super::decimal::deserialize_decimal;
use crate::value::parse_decimal;
use crate::{DayKey, ValidationError};

/// Daily OHLC point as served by the chart endpoint.
///
/// Prices stay in their transported string form and are only parsed when a
/// numeric reading is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub open: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub high: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub low: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub close: String,
}

impl PricePoint {
    pub fn new(
        date: impl Into<String>,
        open: impl Into<String>,
        high: impl Into<String>,
        low: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            open: open.into(),
            high: high.into(),
            low: low.into(),
            close: close.into(),
        }
    }

    pub fn day(&self) -> Result<DayKey, ValidationError> {
        DayKey::parse(&self.date)
    }

    pub fn close_value(&self) -> f64 {
        parse_decimal(&self.close)
    }
}

/// Point of the close-price line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosePoint {
    pub date: String,
    pub close: f64,
}

/// Projects the series onto `(date, close)` pairs for plotting.
pub fn close_series(points: &[PricePoint]) -> Vec<ClosePoint> {
    points
        .iter()
        .map(|point| ClosePoint {
            date: point.date.clone(),
            close: point.close_value(),
        })
        .collect()
}

/// First defect found in a chart series' date column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesIssue {
    BadDate { index: usize, value: String },
    OutOfOrder { index: usize, previous: DayKey, current: DayKey },
}

impl SeriesIssue {
    pub fn message(&self) -> String {
        match self {
            Self::BadDate { index, value } => {
                format!("chart point {index} has an unreadable date '{value}'")
            }
            Self::OutOfOrder {
                index,
                previous,
                current,
            } => format!(
                "chart point {index} ({current}) does not follow {previous}; the series is not \
strictly ascending"
            ),
        }
    }
}

/// Checks that every point carries a calendar day and that days strictly
/// ascend. Returns the first issue found.
pub fn check_series(points: &[PricePoint]) -> Option<SeriesIssue> {
    let mut previous: Option<DayKey> = None;
    for (index, point) in points.iter().enumerate() {
        let Ok(current) = point.day() else {
            let issue = SeriesIssue::BadDate {
                index,
                value: point.date.clone(),
            };
            warn!(index, date = %point.date, "chart point date is unreadable");
            return Some(issue);
        };
        if let Some(previous) = previous.filter(|previous| *previous >= current) {
            warn!(index, %previous, %current, "chart series is out of order");
            return Some(SeriesIssue::OutOfOrder {
                index,
                previous,
                current,
            });
        }
        previous = Some(current);
    }
    None
}
