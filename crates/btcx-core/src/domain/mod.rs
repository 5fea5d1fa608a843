mod date;
mod decimal;
mod event;
mod explanation;
mod price;

pub use date::DayKey;
pub use event::{event_rows, Direction, EventRow, MoveClass, MoveEvent, SeverityColor};
pub use explanation::{
    find_factor, parse_factors, Explanation, Factor, FactorsIssue, ParsedFactors,
};
pub use price::{check_series, close_series, ClosePoint, PricePoint, SeriesIssue};
