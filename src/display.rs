//! Core display operations
//!
//! [`Display`] owns the protocol state machine that sequences register
//! writes, waveform programming, window/cursor addressing and busy-line
//! synchronization. Every public operation is an ordered command script;
//! the scripts are testable against a mock [`DisplayInterface`] without
//! hardware.

use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::command::{
    BORDER_WAVEFORM, DATA_ENTRY_MODE, DEEP_SLEEP, DISPLAY_UPDATE_CTRL, DISPLAY_UPDATE_SEQUENCE,
    DRIVER_OUTPUT_CONTROL, GATE_VOLTAGE, LUT_END_OPTION, MASTER_ACTIVATION, NOP,
    PARTIAL_WINDOW_OPTION, SET_RAM_X_COUNTER, SET_RAM_X_RANGE, SET_RAM_Y_COUNTER, SET_RAM_Y_RANGE,
    SOFT_RESET, SOURCE_VOLTAGE, TEMP_SENSOR_CONTROL, UPDATE_MODE_LOAD, WRITE_LUT, WRITE_RAM,
    WRITE_VCOM,
};
use crate::config::Config;
use crate::error::{Error, MAX_SOURCE_OUTPUTS};
use crate::interface::DisplayInterface;
use crate::lut::{
    LUT_DATA_SIZE, LUT_FULL, LUT_PARTIAL, OFFSET_END_OPTION, OFFSET_GATE_VOLTAGE, OFFSET_VCOM,
    OFFSET_SOURCE_VOLTAGE,
};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Settle delay after issuing the deep sleep command, in milliseconds
pub const DEEP_SLEEP_SETTLE_MS: u32 = 2_000;

/// Region specification for sub-frame updates
///
/// Coordinates are pixels. `x` and `w` should be multiples of 8; the
/// controller addresses RAM in whole bytes and [`Display::draw_region`]
/// masks unaligned values down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    /// X coordinate in pixels
    pub x: u16,
    /// Y coordinate in pixels
    pub y: u16,
    /// Width in pixels
    pub w: u16,
    /// Height in pixels
    pub h: u16,
}

impl Region {
    /// Create a new region
    #[allow(clippy::many_single_char_names)]
    pub fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Calculate the packed buffer size in bytes for this region
    pub fn buffer_size(&self) -> usize {
        (self.w as usize / 8) * self.h as usize
    }

    /// Mask X and width down to byte granularity and clamp to panel bounds
    ///
    /// Returns `None` when nothing of the region remains on the panel;
    /// callers treat that as a no-op rather than an error. Extents are
    /// widened to `u32` before clamping so a width or height near
    /// `u16::MAX` clips cleanly instead of wrapping.
    fn clipped(self, cols: u16, rows: u16) -> Option<Self> {
        let x = self.x & !7;
        let w = self.w & !7;
        if w == 0 || self.h == 0 || x >= cols || self.y >= rows {
            return None;
        }
        let x_end = (u32::from(x) + u32::from(w) - 1).min(u32::from(cols) - 1) as u16;
        let y_end = (u32::from(self.y) + u32::from(self.h) - 1).min(u32::from(rows) - 1) as u16;
        Some(Self {
            x,
            y: self.y,
            w: x_end - x + 1,
            h: y_end - self.y + 1,
        })
    }
}

/// Refresh mode the panel is currently configured for
///
/// Tracks which waveform table was programmed last.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RefreshMode {
    /// Full refresh waveform (slowest, best quality, no ghosting)
    #[default]
    Full,
    /// Partial refresh waveform (fast, limited to sub-regions, may ghost)
    Partial,
}

/// Protocol state of the controller
///
/// The reset and LUT-programming phases inside [`Display::init`] are
/// transient and never observable from outside.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum State {
    /// No init has run yet
    #[default]
    Uninitialized,
    /// Initialized; the contained mode names the active waveform
    Ready(RefreshMode),
    /// Deep sleep; terminal until the next init
    Sleeping,
}

/// Core display driver
///
/// Owns the bus-pin state and the protocol state machine. All operations
/// are synchronous and blocking; access must be serialized by a single
/// owner (see [`crate::terminal::Terminal`]).
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Protocol state
    state: State,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// The controller starts `Uninitialized`; call [`init`](Self::init)
    /// before any drawing operation.
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            state: State::Uninitialized,
        }
    }

    /// Initialize the controller
    ///
    /// Acquires the transport, runs the hardware reset train, soft-resets,
    /// configures driver output / data entry / window / border / update
    /// control registers and programs the full-refresh waveform table.
    /// Legal from any state, including `Sleeping`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BusUnavailable`] when the transport cannot be
    /// claimed, or [`Error::Interface`] on any bus failure.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.acquire().map_err(Error::BusUnavailable)?;
        log::debug!("initializing e-paper controller");

        self.interface.reset(delay);
        self.busy_wait(delay)?;
        self.send_command(SOFT_RESET)?;
        self.busy_wait(delay)?;

        let rows = self.config.dimensions.rows;
        self.send_command(DRIVER_OUTPUT_CONTROL)?;
        self.send_data(&[
            ((rows - 1) & 0xFF) as u8,
            ((rows - 1) >> 8) as u8,
            self.config.gate_scanning,
        ])?;

        self.send_command(DATA_ENTRY_MODE)?;
        self.send_data(&[self.config.data_entry_mode])?;

        self.window_full_panel()?;
        self.set_ram_counter(0, 0, delay)?;

        self.send_command(BORDER_WAVEFORM)?;
        self.send_data(&[self.config.border_full])?;

        self.send_command(DISPLAY_UPDATE_CTRL)?;
        let update_ctrl = self.config.update_ctrl;
        self.send_data(&update_ctrl)?;

        self.send_command(TEMP_SENSOR_CONTROL)?;
        self.send_data(&[self.config.temp_sensor_control])?;

        self.busy_wait(delay)?;

        self.program_lut(&LUT_FULL, delay)?;

        self.state = State::Ready(RefreshMode::Full);
        Ok(())
    }

    /// Set the RAM window registers and move the address counter to the
    /// window origin
    ///
    /// Bounds are inclusive pixel coordinates. X registers are written in
    /// 8-pixel units (the values are shifted right by 3 bits); Y is split
    /// 16-bit little-endian.
    pub fn set_window<D: DelayNs>(
        &mut self,
        x_start: u16,
        y_start: u16,
        x_end: u16,
        y_end: u16,
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.ensure_ready()?;
        self.set_ram_window(x_start, y_start, x_end, y_end)?;
        self.set_ram_counter(x_start, y_start, delay)
    }

    /// Position the RAM address counter
    ///
    /// The X register takes the pixel coordinate shifted right by 3 bits;
    /// ends with a busy-wait as the controller requires.
    pub fn set_cursor<D: DelayNs>(&mut self, x: u16, y: u16, delay: &mut D) -> DisplayResult<I> {
        self.ensure_ready()?;
        self.set_ram_counter(x, y, delay)
    }

    /// Stream a packed sub-frame and activate a region update
    ///
    /// `buffer` holds the region's rows packed 8 pixels per byte, MSB
    /// first. `region.x`/`region.w` are masked down to byte granularity
    /// and the region is clamped to panel bounds; a region entirely
    /// outside the panel is a no-op. When the partial waveform is active
    /// the write+activate pass runs twice so both RAM banks converge.
    /// Blocks until the busy line releases. Leaves the state `Ready(Full)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] unless the state is `Ready`, or
    /// [`Error::BufferTooSmall`] when `buffer` cannot cover the clipped
    /// region.
    pub fn draw_region<D: DelayNs>(
        &mut self,
        buffer: &[u8],
        region: Region,
        delay: &mut D,
    ) -> DisplayResult<I> {
        let mode = self.ensure_ready()?;
        let dims = self.config.dimensions;
        let Some(clipped) = region.clipped(dims.cols, dims.rows) else {
            return Ok(());
        };

        let required = clipped.buffer_size();
        if buffer.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: buffer.len(),
            });
        }

        self.write_region(&buffer[..required], clipped, delay)?;
        if mode == RefreshMode::Partial {
            // The partial LUT refreshes from the delta of the two RAM
            // banks; a second pass brings the base bank up to date.
            self.write_region(&buffer[..required], clipped, delay)?;
        }

        self.state = State::Ready(RefreshMode::Full);
        Ok(())
    }

    /// Activate a full-quality refresh of the panel from RAM
    ///
    /// Blocks until the busy line releases.
    pub fn full_refresh<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.ensure_ready()?;
        self.activate(self.config.update_full, delay)?;
        self.state = State::Ready(RefreshMode::Full);
        Ok(())
    }

    /// Stream a packed sub-frame and refresh it with the partial waveform
    ///
    /// Pulses the reset pin briefly, reprograms the partial waveform table
    /// (different border-waveform and update-control bytes than full
    /// refresh), then streams and activates the region with the configured
    /// partial activation code. Leaves the state `Ready(Partial)`.
    pub fn partial_refresh<D: DelayNs>(
        &mut self,
        buffer: &[u8],
        region: Region,
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.ensure_ready()?;
        let dims = self.config.dimensions;
        let Some(clipped) = region.clipped(dims.cols, dims.rows) else {
            return Ok(());
        };

        let required = clipped.buffer_size();
        if buffer.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: buffer.len(),
            });
        }

        log::debug!(
            "partial refresh of {}x{} region at ({}, {})",
            clipped.w,
            clipped.h,
            clipped.x,
            clipped.y
        );

        self.interface.reset_pulse(delay);
        self.program_lut(&LUT_PARTIAL, delay)?;

        self.send_command(PARTIAL_WINDOW_OPTION)?;
        let option = self.config.partial_window_option;
        self.send_data(&option)?;

        self.send_command(BORDER_WAVEFORM)?;
        self.send_data(&[self.config.border_partial])?;

        self.activate(UPDATE_MODE_LOAD, delay)?;

        self.set_ram_window(
            clipped.x,
            clipped.y,
            clipped.x + clipped.w - 1,
            clipped.y + clipped.h - 1,
        )?;
        self.set_ram_counter(clipped.x, clipped.y, delay)?;

        self.send_command(WRITE_RAM)?;
        self.send_data(&buffer[..required])?;

        self.activate(self.config.partial_activation as u8, delay)?;

        self.state = State::Ready(RefreshMode::Partial);
        Ok(())
    }

    /// Fill the entire panel with a solid color and run a full refresh
    ///
    /// Some panels need this twice (once black, once white) to drain
    /// residual charge; see [`scrub`](Self::scrub).
    pub fn clear<D: DelayNs>(&mut self, color: Color, delay: &mut D) -> DisplayResult<I> {
        self.ensure_ready()?;
        let dims = self.config.dimensions;

        self.window_full_panel()?;
        self.set_ram_counter(0, 0, delay)?;

        self.send_command(WRITE_RAM)?;
        let fill = [color.byte(); MAX_SOURCE_OUTPUTS as usize / 8];
        let row = &fill[..dims.bytes_per_row()];
        for _ in 0..dims.rows {
            self.send_data(row)?;
        }

        self.activate(self.config.update_full, delay)?;
        self.state = State::Ready(RefreshMode::Full);
        Ok(())
    }

    /// Blank the panel with a black pass followed by a white pass
    ///
    /// The double clear is a hardware quirk of some panels, required to
    /// fully reset residual charge. Two independent full-refresh passes
    /// are issued.
    pub fn scrub<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.clear(Color::Black, delay)?;
        self.clear(Color::White, delay)
    }

    /// Enter deep sleep and release the transport
    ///
    /// After this, every operation except [`init`](Self::init) fails with
    /// [`Error::NotInitialized`].
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.ensure_ready()?;

        self.send_command(DEEP_SLEEP)?;
        self.send_data(&[self.config.deep_sleep_mode])?;
        delay.delay_ms(DEEP_SLEEP_SETTLE_MS);

        self.interface.release();
        self.state = State::Sleeping;
        Ok(())
    }

    /// The active refresh mode, or `None` before init / after sleep
    pub fn mode(&self) -> Option<RefreshMode> {
        match self.state {
            State::Ready(mode) => Some(mode),
            _ => None,
        }
    }

    /// Whether the controller is in deep sleep
    pub fn is_sleeping(&self) -> bool {
        self.state == State::Sleeping
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &crate::config::Dimensions {
        &self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn interface_ref(&self) -> &I {
        &self.interface
    }

    fn ensure_ready(&self) -> core::result::Result<RefreshMode, Error<I>> {
        match self.state {
            State::Ready(mode) => Ok(mode),
            State::Uninitialized | State::Sleeping => Err(Error::NotInitialized),
        }
    }

    /// Window + cursor + RAM write + region activation for one pass
    fn write_region<D: DelayNs>(
        &mut self,
        bytes: &[u8],
        region: Region,
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.set_ram_window(
            region.x,
            region.y,
            region.x + region.w - 1,
            region.y + region.h - 1,
        )?;
        self.set_ram_counter(region.x, region.y, delay)?;

        self.send_command(WRITE_RAM)?;
        self.send_data(bytes)?;

        self.send_command(DISPLAY_UPDATE_SEQUENCE)?;
        self.send_data(&[self.config.update_region])?;
        self.send_command(MASTER_ACTIVATION)?;
        self.send_command(NOP)?;
        self.busy_wait(delay)
    }

    /// Run one update sequence and wait for the busy line
    fn activate<D: DelayNs>(&mut self, sequence: u8, delay: &mut D) -> DisplayResult<I> {
        self.send_command(DISPLAY_UPDATE_SEQUENCE)?;
        self.send_data(&[sequence])?;
        self.send_command(MASTER_ACTIVATION)?;
        self.busy_wait(delay)
    }

    /// Stream a waveform table: 153 LUT bytes, then the positional
    /// frame-rate/voltage trailer
    fn program_lut<D: DelayNs>(
        &mut self,
        table: &[u8; crate::lut::LUT_SIZE],
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.send_command(WRITE_LUT)?;
        self.send_data(&table[..LUT_DATA_SIZE])?;
        self.busy_wait(delay)?;

        self.send_command(LUT_END_OPTION)?;
        self.send_data(&[table[OFFSET_END_OPTION]])?;
        self.send_command(GATE_VOLTAGE)?;
        self.send_data(&[table[OFFSET_GATE_VOLTAGE]])?;
        self.send_command(SOURCE_VOLTAGE)?;
        self.send_data(&table[OFFSET_SOURCE_VOLTAGE..OFFSET_VCOM])?;
        self.send_command(WRITE_VCOM)?;
        self.send_data(&[table[OFFSET_VCOM]])?;
        Ok(())
    }

    fn window_full_panel(&mut self) -> DisplayResult<I> {
        let dims = self.config.dimensions;
        self.set_ram_window(0, 0, dims.cols - 1, dims.rows - 1)
    }

    fn set_ram_window(
        &mut self,
        x_start: u16,
        y_start: u16,
        x_end: u16,
        y_end: u16,
    ) -> DisplayResult<I> {
        // X registers address 8-pixel units; the low 3 bits are dropped.
        self.send_command(SET_RAM_X_RANGE)?;
        self.send_data(&[(x_start >> 3) as u8, (x_end >> 3) as u8])?;

        self.send_command(SET_RAM_Y_RANGE)?;
        self.send_data(&[
            (y_start & 0xFF) as u8,
            (y_start >> 8) as u8,
            (y_end & 0xFF) as u8,
            (y_end >> 8) as u8,
        ])?;
        Ok(())
    }

    fn set_ram_counter<D: DelayNs>(&mut self, x: u16, y: u16, delay: &mut D) -> DisplayResult<I> {
        self.send_command(SET_RAM_X_COUNTER)?;
        self.send_data(&[(x >> 3) as u8])?;

        self.send_command(SET_RAM_Y_COUNTER)?;
        self.send_data(&[(y & 0xFF) as u8, (y >> 8) as u8])?;
        self.busy_wait(delay)
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }

    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.busy_wait(delay).map_err(Error::Interface)
    }
}
