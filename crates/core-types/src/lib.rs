pub mod builder;
pub mod calendar;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use builder::{BuildReport, PriceSeriesBuilder, RawSample};
pub use calendar::{Calendar, UtcCalendar};
pub use enums::InvalidPricePolicy;
pub use error::{CoreError, ErrorKind};
pub use structs::{PricePoint, PriceSample, PriceSeries, ReturnPoint, ReturnSeries};
