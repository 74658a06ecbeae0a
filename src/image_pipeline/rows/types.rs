//! Pixel record types

/// Color plane a record contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Maps the stored channel code (0, 1, 2) to a plane.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Channel::Red),
            1 => Some(Channel::Green),
            2 => Some(Channel::Blue),
            _ => None,
        }
    }

    /// Offset of this plane inside an interleaved RGB pixel.
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// One row of a query result: `(x, y, z, channel, value)`
///
/// Fields are kept as the store returns them; range checks happen when the
/// records are reconstructed into an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRecord {
    /// Column index
    pub x: i64,
    /// Row index
    pub y: i64,
    /// Reserved, ignored by reconstruction
    pub z: i64,
    /// Channel code, 0 = red, 1 = green, 2 = blue
    pub channel: i64,
    /// Intensity, nominally 0-255
    pub value: i64,
}

impl PixelRecord {
    pub fn new(x: i64, y: i64, channel: i64, value: i64) -> Self {
        Self {
            x,
            y,
            z: 0,
            channel,
            value,
        }
    }
}
