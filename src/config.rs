//! Display configuration types and builder

use crate::command;

pub use crate::error::{BuilderError, MAX_GATE_OUTPUTS, MAX_SOURCE_OUTPUTS};

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Number of rows (height in pixels, corresponds to gate outputs)
    pub rows: u16,
    /// Number of columns (width in pixels, corresponds to source outputs)
    pub cols: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - rows == 0 or rows > MAX_GATE_OUTPUTS
    /// - cols == 0 or cols > MAX_SOURCE_OUTPUTS
    /// - cols % 8 != 0 (RAM addressing granularity is one byte = 8 pixels)
    pub fn new(rows: u16, cols: u16) -> Result<Self, BuilderError> {
        if rows == 0 || rows > MAX_GATE_OUTPUTS {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        if cols == 0 || cols > MAX_SOURCE_OUTPUTS || cols % 8 != 0 {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Number of bytes per packed pixel row, ceil(cols / 8)
    pub fn bytes_per_row(&self) -> usize {
        (self.cols as usize).div_ceil(8)
    }

    /// Calculate required buffer size in bytes for a full frame
    pub fn buffer_size(&self) -> usize {
        self.bytes_per_row() * self.rows as usize
    }
}

/// Activation code variant for partial refresh
///
/// The controller accepts several update-sequence codes for partial
/// activation; which one a panel needs depends on its hardware revision,
/// so all are kept as configuration rather than collapsed to one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(u8)]
pub enum PartialActivation {
    /// Quality partial update (0x0F) - slower of the partial variants
    #[default]
    Quality = command::UPDATE_PARTIAL_QUALITY,
    /// Fast partial update (0x0C)
    Fast = command::UPDATE_PARTIAL_FAST,
    /// Alternate sequence (0xCF) seen on some panel revisions
    Alternate = command::UPDATE_PARTIAL_ALT,
}

/// Display configuration
///
/// This struct holds all configurable parameters for the controller.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Gate scanning direction byte (third byte of driver output control)
    pub gate_scanning: u8,
    /// Data entry mode byte
    pub data_entry_mode: u8,
    /// Border waveform byte for full refresh
    pub border_full: u8,
    /// Border waveform byte for partial refresh
    pub border_partial: u8,
    /// Display update control bytes (command 0x21)
    pub update_ctrl: [u8; 2],
    /// Update sequence code for full refresh
    pub update_full: u8,
    /// Update sequence code after streaming a sub-frame region
    pub update_region: u8,
    /// Activation code used by partial refresh
    pub partial_activation: PartialActivation,
    /// Partial-mode display window parameter block (command 0x37)
    pub partial_window_option: [u8; 10],
    /// Temperature sensor control byte
    pub temp_sensor_control: u8,
    /// Deep sleep mode confirmation byte
    pub deep_sleep_mode: u8,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use epd_term::{Builder, Dimensions};
///
/// let dims = match Dimensions::new(250, 128) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Gate scanning direction byte
    gate_scanning: u8,
    /// Data entry mode byte
    data_entry_mode: u8,
    /// Border waveform byte for full refresh
    border_full: u8,
    /// Border waveform byte for partial refresh
    border_partial: u8,
    /// Display update control bytes
    update_ctrl: [u8; 2],
    /// Update sequence code for full refresh
    update_full: u8,
    /// Update sequence code for region updates
    update_region: u8,
    /// Activation code used by partial refresh
    partial_activation: PartialActivation,
    /// Partial-mode window parameter block
    partial_window_option: [u8; 10],
    /// Temperature sensor control byte
    temp_sensor_control: u8,
    /// Deep sleep mode confirmation byte
    deep_sleep_mode: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            // Default gate scanning (panel-specific, override as needed)
            gate_scanning: 0x00,
            // X and Y increment
            data_entry_mode: 0x03,
            border_full: command::BORDER_FULL,
            border_partial: command::BORDER_PARTIAL,
            // Enable secondary RAM bank comparison
            update_ctrl: [0x00, 0x80],
            update_full: command::UPDATE_FULL,
            update_region: command::UPDATE_REGION,
            partial_activation: PartialActivation::Quality,
            // Fixed display-option block for the partial waveform (datasheet values)
            partial_window_option: [
                0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0x00,
            ],
            // Internal temperature sensor
            temp_sensor_control: 0x80,
            deep_sleep_mode: 0x01,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set gate scanning direction
    pub fn gate_scanning(mut self, value: u8) -> Self {
        self.gate_scanning = value;
        self
    }

    /// Set data entry mode
    pub fn data_entry_mode(mut self, value: u8) -> Self {
        self.data_entry_mode = value;
        self
    }

    /// Set the border waveform byte for full refresh
    pub fn border_full(mut self, value: u8) -> Self {
        self.border_full = value;
        self
    }

    /// Set the border waveform byte for partial refresh
    pub fn border_partial(mut self, value: u8) -> Self {
        self.border_partial = value;
        self
    }

    /// Set the display update control bytes (command 0x21)
    pub fn update_ctrl(mut self, value: [u8; 2]) -> Self {
        self.update_ctrl = value;
        self
    }

    /// Set the update sequence code for full refresh
    pub fn update_full(mut self, value: u8) -> Self {
        self.update_full = value;
        self
    }

    /// Set the update sequence code for region updates
    pub fn update_region(mut self, value: u8) -> Self {
        self.update_region = value;
        self
    }

    /// Set the partial refresh activation variant
    pub fn partial_activation(mut self, value: PartialActivation) -> Self {
        self.partial_activation = value;
        self
    }

    /// Set the partial-mode display window parameter block
    pub fn partial_window_option(mut self, value: [u8; 10]) -> Self {
        self.partial_window_option = value;
        self
    }

    /// Set temperature sensor control
    pub fn temp_sensor_control(mut self, value: u8) -> Self {
        self.temp_sensor_control = value;
        self
    }

    /// Set the deep sleep mode confirmation byte
    pub fn deep_sleep_mode(mut self, value: u8) -> Self {
        self.deep_sleep_mode = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            gate_scanning: self.gate_scanning,
            data_entry_mode: self.data_entry_mode,
            border_full: self.border_full,
            border_partial: self.border_partial,
            update_ctrl: self.update_ctrl,
            update_full: self.update_full,
            update_region: self.update_region,
            partial_activation: self.partial_activation,
            partial_window_option: self.partial_window_option,
            temp_sensor_control: self.temp_sensor_control,
            deep_sleep_mode: self.deep_sleep_mode,
        })
    }
}
