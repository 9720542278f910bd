//! Controller command definitions
//!
//! This module defines the command bytes used to drive SSD168x-class
//! e-paper display controllers. Commands are sent over SPI with the DC pin
//! low for commands and high for data.
//!
//! ## Command Structure
//!
//! All commands follow the pattern:
//! 1. Assert CS (Chip Select)
//! 2. Set DC low (command mode)
//! 3. Send command byte
//! 4. Set DC high (data mode)
//! 5. Send data bytes (if any)
//! 6. Deassert CS
//!
//! ## Example
//!
//! ```rust,no_run
//! use epd_term::{command, DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::{InputPin, OutputPin};
//! # use embedded_hal::spi::{Operation, SpiDevice};
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
//! # let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin);
//! # let pixel_data = [0xFFu8; 4];
//! // Soft reset
//! let _ = interface.send_command(command::SOFT_RESET);
//!
//! // Write packed image data to RAM
//! let _ = interface.send_command(command::WRITE_RAM);
//! let _ = interface.send_data(&pixel_data);
//! ```

// System control commands

/// Soft reset command (0x12)
///
/// Resets the controller to default state. Must wait for BUSY low after issuing.
pub const SOFT_RESET: u8 = 0x12;

/// Driver output control command (0x01)
///
/// Sets the number of gate outputs (rows) and scanning direction.
/// Requires 3 bytes: [rows-1 (LSB), rows-1 (MSB), scanning mode]
pub const DRIVER_OUTPUT_CONTROL: u8 = 0x01;

/// Border waveform control command (0x3C)
///
/// Controls the border color and transition behavior.
/// Requires 1 byte: [`BORDER_FULL`] for full refresh, [`BORDER_PARTIAL`]
/// for the partial-refresh waveform.
pub const BORDER_WAVEFORM: u8 = 0x3C;

/// Temperature sensor control command (0x18)
///
/// Selects internal or external temperature sensor for refresh timing.
/// Requires 1 byte: 0x80 = internal, 0x48 = external
pub const TEMP_SENSOR_CONTROL: u8 = 0x18;

// RAM and data commands

/// Data entry mode command (0x11)
///
/// Controls the address counter auto-increment direction.
/// Requires 1 byte:
/// - Bit 0 (ID0): X direction (0=decrement, 1=increment)
/// - Bit 1 (ID1): Y direction (0=decrement, 1=increment)
/// - Bit 2 (AM): Address counter direction (0=X, 1=Y)
pub const DATA_ENTRY_MODE: u8 = 0x11;

/// Set RAM X address range command (0x44)
///
/// Sets the X (column) address range for RAM access. The controller
/// addresses X in 8-pixel units, so both bytes are pixel values shifted
/// right by 3 bits: [x_start >> 3, x_end >> 3]
pub const SET_RAM_X_RANGE: u8 = 0x44;

/// Set RAM Y address range command (0x45)
///
/// Sets the Y (row) address range for RAM access.
/// Requires 4 bytes: [start_LSB, start_MSB, end_LSB, end_MSB]
pub const SET_RAM_Y_RANGE: u8 = 0x45;

/// Set RAM X address counter command (0x4E)
///
/// Positions the X address counter. Requires 1 byte: the pixel X shifted
/// right by 3 bits (8-pixel granularity; the low 3 bits are ignored by
/// the controller).
pub const SET_RAM_X_COUNTER: u8 = 0x4E;

/// Set RAM Y address counter command (0x4F)
///
/// Positions the Y address counter.
/// Requires 2 bytes: [address_LSB, address_MSB]
pub const SET_RAM_Y_COUNTER: u8 = 0x4F;

/// Write RAM (image data) command (0x24)
///
/// Writes packed 1-bit pixel data to the current frame buffer.
/// Bit=0: Black, Bit=1: White.
/// Requires pixel data bytes (ceil(width / 8) * height).
pub const WRITE_RAM: u8 = 0x24;

/// Write RAM secondary/base buffer command (0x26)
///
/// Writes to the second RAM bank, used by the controller as the "previous
/// frame" reference during partial updates.
pub const WRITE_RAM_BASE: u8 = 0x26;

// Display update commands

/// Display update control command (0x21)
///
/// Controls which RAM sources participate in the update.
/// Requires 2 bytes.
pub const DISPLAY_UPDATE_CTRL: u8 = 0x21;

/// Display update sequence option command (0x22)
///
/// Selects the update sequence that [`MASTER_ACTIVATION`] runs.
/// Requires 1 byte; see [`UPDATE_FULL`], [`UPDATE_REGION`],
/// [`UPDATE_PARTIAL_QUALITY`], [`UPDATE_PARTIAL_FAST`], [`UPDATE_MODE_LOAD`].
pub const DISPLAY_UPDATE_SEQUENCE: u8 = 0x22;

/// Master activation command (0x20)
///
/// Triggers the configured display update sequence. BUSY goes high until
/// the waveform completes.
pub const MASTER_ACTIVATION: u8 = 0x20;

/// No-op command (0xFF)
///
/// Terminates frame data after a region activation.
pub const NOP: u8 = 0xFF;

// Power and LUT commands

/// Write LUT register command (0x32)
///
/// Loads the waveform table driving pixel transitions.
/// Requires [`crate::lut::LUT_DATA_SIZE`] (153) bytes; the trailing
/// configuration bytes of a [`crate::lut`] table go to [`LUT_END_OPTION`],
/// [`GATE_VOLTAGE`], [`SOURCE_VOLTAGE`] and [`WRITE_VCOM`].
pub const WRITE_LUT: u8 = 0x32;

/// LUT end option command (0x3F)
///
/// Frame-rate/ending configuration byte that trails the LUT proper.
/// Requires 1 byte (byte 153 of a waveform table).
pub const LUT_END_OPTION: u8 = 0x3F;

/// Gate voltage command (0x03)
///
/// Sets the gate driving voltage (VGH).
/// Requires 1 byte (byte 154 of a waveform table).
pub const GATE_VOLTAGE: u8 = 0x03;

/// Source voltage command (0x04)
///
/// Sets the source driving voltages (VSH1, VSH2, VSL).
/// Requires 3 bytes (bytes 155..158 of a waveform table).
pub const SOURCE_VOLTAGE: u8 = 0x04;

/// Write VCOM command (0x2C)
///
/// Sets the VCOM voltage for the common electrode.
/// Requires 1 byte (byte 158 of a waveform table).
pub const WRITE_VCOM: u8 = 0x2C;

/// Partial-mode display window parameters command (0x37)
///
/// Configures the display-option register for partial waveform updates.
/// Requires 10 fixed bytes; see [`crate::config::Config`].
pub const PARTIAL_WINDOW_OPTION: u8 = 0x37;

// Power management commands

/// Deep sleep command (0x10)
///
/// Enters ultra-low power mode. Only a hardware reset + init can wake.
/// Requires 1 byte (mode).
pub const DEEP_SLEEP: u8 = 0x10;

// Well-known data bytes for the commands above

/// Full-quality update sequence for [`DISPLAY_UPDATE_SEQUENCE`]
pub const UPDATE_FULL: u8 = 0xC7;

/// Region update sequence used after streaming a sub-frame
pub const UPDATE_REGION: u8 = 0xC4;

/// Quality partial update sequence (slower of the partial variants)
pub const UPDATE_PARTIAL_QUALITY: u8 = 0x0F;

/// Fast partial update sequence
pub const UPDATE_PARTIAL_FAST: u8 = 0x0C;

/// Alternate partial update sequence seen on some panel revisions
pub const UPDATE_PARTIAL_ALT: u8 = 0xCF;

/// Clock/analog enable sequence run before reprogramming the partial LUT
pub const UPDATE_MODE_LOAD: u8 = 0xC0;

/// Border waveform byte for full refresh
pub const BORDER_FULL: u8 = 0x05;

/// Border waveform byte for partial refresh
pub const BORDER_PARTIAL: u8 = 0x80;
