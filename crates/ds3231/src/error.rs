//! Error types for the driver.

/// Errors that can occur when talking to the DS3231.
///
/// Generic over the bus error type to preserve the specific error
/// reported by the I2C implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error<E> {
    /// I2C bus error.
    ///
    /// Wraps the underlying error from the `embedded_hal::i2c::I2c`
    /// implementation.
    I2c(E),
    /// A register snapshot decoded to an out-of-range calendar value, or
    /// a caller-supplied date/time cannot be represented by the chip.
    ///
    /// The DS3231 stores years as a two-digit BCD offset from 2000 plus
    /// a century flag, so only 2000..=2199 is representable.
    InvalidDateTime,
}

impl<E> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(_) => write!(f, "I2C bus error"),
            Error::InvalidDateTime => write!(f, "invalid date/time"),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {}
