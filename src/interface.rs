//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for communicating with the display controller over SPI.
//!
//! ## Hardware Requirements
//!
//! The controller requires:
//! - SPI bus (MOSI + SCK)
//! - 3 GPIO pins:
//!   - **DC**: Data/Command select (output)
//!   - **RST**: Reset (output, active low)
//!   - **BUSY**: Busy status (input, active high)
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use epd_term::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! # let mut delay = MockDelay;
//! // Create interface with SPI and GPIO pins
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin);
//!
//! // Send command
//! let _ = interface.send_command(0x12); // Soft reset
//!
//! // Send data
//! let _ = interface.send_data(&[0xFF, 0x00, 0xFF]);
//!
//! // Wait for display ready
//! let _ = interface.busy_wait(&mut delay);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the command/data bus to the display controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// SPI + GPIO implementation that satisfies embedded-hal traits.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If you need
/// custom behavior (e.g., different pin polarities, additional CS control),
/// implement this trait on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Claim exclusive access to the physical transport
    ///
    /// Called once at [`Display::init`](crate::display::Display::init).
    /// An SPI device shared through embedded-hal's `SpiDevice` is already
    /// arbitrated per transaction, so the default implementation succeeds
    /// unconditionally; override when the transport needs explicit setup.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be claimed.
    fn acquire(&mut self) -> InterfaceResult<(), Self::Error> {
        Ok(())
    }

    /// Release the transport claimed by [`acquire`](Self::acquire)
    ///
    /// Called at the end of [`Display::sleep`](crate::display::Display::sleep).
    fn release(&mut self) {}

    /// Send a command byte to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin low (command mode)
    /// 2. Send the command byte over SPI
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin high (data mode)
    /// 2. Send the data bytes over SPI
    ///
    /// # Arguments
    ///
    /// * `data` - Slice of bytes to send
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Perform a full hardware reset
    ///
    /// The implementation must drive the RST pin high for
    /// [`RESET_ASSERT_MS`], low for [`RESET_LOW_MS`], then high again for
    /// [`RESET_ASSERT_MS`] before the controller accepts commands.
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay implementation for timing
    fn reset<D: DelayNs>(&mut self, delay: &mut D);

    /// Pulse the reset pin briefly without a full panel reset
    ///
    /// Used before reprogramming the partial waveform: RST low for
    /// [`PARTIAL_RESET_PULSE_MS`], then high. Register state survives.
    fn reset_pulse<D: DelayNs>(&mut self, delay: &mut D);

    /// Wait for busy pin to go low (with timeout)
    ///
    /// Polls the BUSY pin every [`BUSY_POLL_INTERVAL_MS`] until it goes low
    /// (display ready) or the safety timeout expires. BUSY is active high -
    /// when high, the display is processing a command. The hardware contract
    /// has no timeout; the cap exists only to convert an indefinite hang into
    /// a reportable failure.
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay implementation for polling interval
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError::BusyTimeout`] if BUSY doesn't go low within
    /// the implementation-specific timeout period.
    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
    /// Safety timeout expired while polling the busy pin
    ///
    /// Distinct from a transport failure: the bus itself is healthy, the
    /// controller simply never released the busy line.
    BusyTimeout,
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::BusyTimeout => write!(f, "Timeout waiting for busy release"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Reset pin hold time for the full reset train, in milliseconds
pub const RESET_ASSERT_MS: u32 = 20;

/// Reset pin low time within the full reset train, in milliseconds
pub const RESET_LOW_MS: u32 = 2;

/// Reset pulse length before partial-LUT reprogramming, in milliseconds
pub const PARTIAL_RESET_PULSE_MS: u32 = 1;

/// Busy line polling interval in milliseconds
pub const BUSY_POLL_INTERVAL_MS: u32 = 10;

/// Default safety timeout for busy-wait in milliseconds
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

/// Hardware interface implementation over embedded-hal v1.0
///
/// Implements [`DisplayInterface`] for embedded-hal SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `BUSY` - Busy pin implementing [`InputPin`]
pub struct Interface<SPI, DC, RST, BUSY> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
    /// Busy pin (active high)
    busy: BUSY,
    /// Safety timeout for busy-wait in milliseconds
    busy_timeout_ms: u32,
}

impl<SPI, DC, RST, BUSY> Interface<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    /// * `busy` - Busy pin (input, active high)
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY) -> Self {
        Self {
            spi,
            dc,
            rst,
            busy,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// Set the busy-wait safety timeout in milliseconds
    ///
    /// Default is 5,000ms. Set to 0 to disable the cap and trust the
    /// hardware contract unconditionally.
    pub fn set_busy_timeout(&mut self, timeout_ms: u32) -> &mut Self {
        self.busy_timeout_ms = timeout_ms;
        self
    }

    /// Get the current busy-wait timeout in milliseconds
    pub fn busy_timeout(&self) -> u32 {
        self.busy_timeout_ms
    }
}

impl<SPI, DC, RST, BUSY, PinErr> DisplayInterface for Interface<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        // Reset train: HIGH 20ms -> LOW 2ms -> HIGH 20ms
        let _ = self.rst.set_high();
        delay.delay_ms(RESET_ASSERT_MS);
        let _ = self.rst.set_low();
        delay.delay_ms(RESET_LOW_MS);
        let _ = self.rst.set_high();
        delay.delay_ms(RESET_ASSERT_MS);
    }

    fn reset_pulse<D: DelayNs>(&mut self, delay: &mut D) {
        let _ = self.rst.set_low();
        delay.delay_ms(PARTIAL_RESET_PULSE_MS);
        let _ = self.rst.set_high();
    }

    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        log::debug!("e-paper busy");
        let mut waited_ms = 0u32;
        let timeout_ms = self.busy_timeout_ms;

        loop {
            let is_busy = match self.busy.is_high() {
                Ok(value) => value,
                Err(e) => return Err(InterfaceError::Pin(e)),
            };

            if !is_busy {
                log::debug!("e-paper busy release");
                return Ok(());
            }

            delay.delay_ms(BUSY_POLL_INTERVAL_MS);
            waited_ms = waited_ms.saturating_add(BUSY_POLL_INTERVAL_MS);
            if timeout_ms > 0 && waited_ms >= timeout_ms {
                // Log distinctly from transport failures: the bus is fine,
                // the controller never released the busy line.
                log::error!("busy line stuck for {timeout_ms}ms, giving up");
                return Err(InterfaceError::BusyTimeout);
            }
        }
    }
}
