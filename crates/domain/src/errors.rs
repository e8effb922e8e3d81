//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Daily series of a forecast do not share the same length
    #[error(
        "Misaligned daily series: {dates} dates, {weather_codes} weather codes, \
         {temperature_max} max temperatures, {temperature_min} min temperatures"
    )]
    MisalignedSeries {
        dates: usize,
        weather_codes: usize,
        temperature_max: usize,
        temperature_min: usize,
    },

    /// Coordinates outside the valid range
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misaligned_series_message_lists_lengths() {
        let err = DomainError::MisalignedSeries {
            dates: 2,
            weather_codes: 1,
            temperature_max: 2,
            temperature_min: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("2 dates"));
        assert!(msg.contains("1 weather codes"));
    }

    #[test]
    fn invalid_coordinates_message() {
        let err = DomainError::InvalidCoordinates;
        assert!(err.to_string().contains("latitude"));
        assert!(err.to_string().contains("longitude"));
    }
}
