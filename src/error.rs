//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! ## Example
//!
//! ```
//! use epd_term::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(1000, 500); // Too large
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Maximum gate outputs (rows) supported by this controller class
///
/// SSD168x-class controllers drive up to 296 gate outputs.
///
/// NOTE: Most panels wire fewer gates; configure [`crate::Dimensions`] accordingly.
pub const MAX_GATE_OUTPUTS: u16 = 296;

/// Maximum source outputs (columns) supported by this controller class
///
/// SSD168x-class controllers drive up to 176 source outputs.
///
/// NOTE: Most panels wire fewer sources; configure [`crate::Dimensions`] accordingly.
pub const MAX_SOURCE_OUTPUTS: u16 = 176;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO/busy timeout)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// The transport could not be claimed during [`init`](crate::display::Display::init)
    ///
    /// Wraps the acquire failure. Fatal to the operation; the caller decides
    /// whether to retry init or give up.
    BusUnavailable(I::Error),
    /// Operation attempted while the controller is uninitialized or sleeping
    ///
    /// Only [`init`](crate::display::Display::init) is legal in those states.
    /// No bus writes are issued when this is returned.
    NotInitialized,
    /// Buffer is too small for the addressed region
    ///
    /// The provided buffer must hold at least the packed byte size of the
    /// region being written.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::BusUnavailable(_) => write!(f, "Transport could not be acquired"),
            Self::NotInitialized => write!(f, "Display not initialized"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of rows (height) requested
        rows: u16,
        /// Number of columns (width) requested
        cols: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { rows, cols } => write!(
                f,
                "Invalid dimensions {rows}x{cols} (max {MAX_GATE_OUTPUTS}x{MAX_SOURCE_OUTPUTS}, cols must be multiple of 8)"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
