//! E-paper terminal display driver
//!
//! Drives a terminal on a bistable e-paper panel: text is rasterized
//! into a packed 1-bit frame, diffed against the previously shown frame,
//! and only the changed byte-aligned band is streamed to the display
//! controller over a command/data bus.
//!
//! ## Features
//!
//! - `no_std` compatible; rendering and diffing require `alloc`
//! - `embedded-hal` v1.0 bus, pins and delays
//! - full and partial refresh waveforms with region updates
//! - damage-tracked updates: identical content costs zero bus writes
//! - `embedded-graphics` integration (with the `graphics` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use epd_term::{Builder, Dimensions, Display, Interface, Region};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let busy = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc, rst, busy);
//! let dims = match Dimensions::new(250, 128) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.init(&mut delay);
//!
//! // stream an 8x8 black square into the top-left corner
//! let buffer = [0x00u8; 8];
//! let _ = display.draw_region(&buffer, Region::new(0, 0, 8, 8), &mut delay);
//! let _ = display.sleep(&mut delay);
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// 1-bit color for monochrome panels
pub mod color;
/// Controller command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Waveform tables for refresh modes
pub mod lut;

/// Frame differencing (requires `alloc` feature)
#[cfg(any(test, feature = "alloc"))]
pub mod diff;
/// Packed 1-bit frame buffer (requires `alloc` feature)
#[cfg(any(test, feature = "alloc"))]
pub mod framebuffer;
/// Text rasterization (requires `alloc` feature)
#[cfg(any(test, feature = "alloc"))]
pub mod render;
/// Whole-frame orientation transforms (requires `alloc` feature)
#[cfg(any(test, feature = "alloc"))]
pub mod rotation;
/// Event-driven update loop (requires `alloc` feature)
#[cfg(any(test, feature = "alloc"))]
pub mod terminal;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use color::Color;
pub use config::{
    Builder, Config, Dimensions, MAX_GATE_OUTPUTS, MAX_SOURCE_OUTPUTS, PartialActivation,
};
pub use display::{Display, RefreshMode, Region};
pub use error::{BuilderError, Error};
pub use interface::{DEFAULT_BUSY_TIMEOUT_MS, DisplayInterface, Interface, InterfaceError};

#[cfg(any(test, feature = "alloc"))]
pub use diff::{Rect, diff};
#[cfg(any(test, feature = "alloc"))]
pub use framebuffer::Frame;
#[cfg(any(test, feature = "alloc"))]
pub use render::{Cursor, CursorStyle, RenderConfig, TextFont, render};
#[cfg(any(test, feature = "alloc"))]
pub use rotation::Orientation;
#[cfg(any(test, feature = "alloc"))]
pub use terminal::{Event, Status, Terminal};
