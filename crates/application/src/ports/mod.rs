//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod session_store;
mod weather_port;

#[cfg(test)]
pub use session_store::MockSessionStorePort;
pub use session_store::SessionStorePort;
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::WeatherPort;
