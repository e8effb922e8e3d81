//! Domain entities - Objects with identity and lifecycle

mod daily_forecast;
mod session_state;

pub use daily_forecast::{DailyEntry, DailyForecast};
pub use session_state::{SessionState, SessionUpdate};
