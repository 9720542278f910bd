//! Look-Up Tables for refresh modes
//!
//! A waveform table (LUT) is the controller-internal voltage/timing sequence
//! that governs how pixels transition during a refresh. One must be
//! programmed before any refresh can run.
//!
//! Each table is exactly [`LUT_SIZE`] (159) bytes: the first
//! [`LUT_DATA_SIZE`] (153) bytes stream to the LUT register (0x32), and the
//! trailing 6 bytes are positional configuration consumed by separate
//! registers:
//!
//! | Index    | Register | Meaning                     |
//! |----------|----------|-----------------------------|
//! | 153      | 0x3F     | LUT end option / frame rate |
//! | 154      | 0x03     | Gate voltage (VGH)          |
//! | 155..158 | 0x04     | Source voltages (VSH1, VSH2, VSL) |
//! | 158      | 0x2C     | VCOM                        |
//!
//! Two variants exist: [`LUT_FULL`] for full-quality refreshes and
//! [`LUT_PARTIAL`] for the faster, lower-quality partial refresh. Both are
//! immutable panel-calibrated constants; do not edit them without waveform
//! documentation for the target panel.

/// Total length of a waveform table, LUT bytes plus trailing configuration
pub const LUT_SIZE: usize = 159;

/// Number of leading bytes streamed to the LUT register (0x32)
pub const LUT_DATA_SIZE: usize = 153;

/// Waveform table for full refresh (slow, best quality, clears ghosting)
pub const LUT_FULL: [u8; LUT_SIZE] = [
    0x80, 0x4A, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x40, 0x4A, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x80, 0x4A, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x40, 0x4A, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x0F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x0F, 0x00, 0x00, 0x0F, 0x00, 0x00, 0x02, //
    0x0F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x22, 0x22, 0x22, 0x22, 0x22, 0x22, 0x00, 0x00, 0x00, //
    0x22, 0x17, 0x41, 0x00, 0x32, 0x36, //
];

/// Waveform table for partial refresh (fast, may leave slight ghosting)
pub const LUT_PARTIAL: [u8; LUT_SIZE] = [
    0x00, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x80, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x40, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x22, 0x22, 0x22, 0x22, 0x22, 0x22, 0x00, 0x00, 0x00, //
    0x22, 0x17, 0x41, 0x00, 0x32, 0x36, //
];

/// Byte offset of the LUT end option (register 0x3F) within a table
pub const OFFSET_END_OPTION: usize = 153;
/// Byte offset of the gate voltage (register 0x03) within a table
pub const OFFSET_GATE_VOLTAGE: usize = 154;
/// Byte offset of the three source voltages (register 0x04) within a table
pub const OFFSET_SOURCE_VOLTAGE: usize = 155;
/// Byte offset of the VCOM value (register 0x2C) within a table
pub const OFFSET_VCOM: usize = 158;
