//! Payloads the authoritative peer streams so remote peers can animate bodies
//! they don't simulate.
//!
//! Every field is a little-endian `f32`, in declaration order.

use crate::{TexError, WheelId, consts::tex::NUM_WHEELS};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Cursor, Read, Write};

pub trait SyncPayload: Sized {
    /// Encoded size in bytes
    const SIZE: usize;

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()>;
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self>;

    #[must_use]
    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::SIZE);
        // Writing into a Vec can't fail
        let _ = self.write_to(&mut bytes);
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, TexError> {
        if bytes.len() != Self::SIZE {
            return Err(TexError::Snapshot(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected {} bytes, got {}", Self::SIZE, bytes.len()),
            )));
        }

        Ok(Self::read_from(&mut Cursor::new(bytes))?)
    }
}

fn read_f32s<R: Read, const N: usize>(reader: &mut R) -> io::Result<[f32; N]> {
    let mut values = [0.0; N];
    reader.read_f32_into::<LittleEndian>(&mut values)?;
    Ok(values)
}

/// Wheel spin and steering, as last seen by the authoritative peer
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TexAnimationSync {
    /// Indexed by [`WheelId::index`]
    pub wheel_rpms: [f32; NUM_WHEELS],
    /// In [`WheelId::STEERABLE`] order
    pub steer_angles: [f32; 4],
}

impl TexAnimationSync {
    #[must_use]
    pub fn steer_angle(&self, wheel: WheelId) -> f32 {
        WheelId::STEERABLE
            .iter()
            .position(|&w| w == wheel)
            .map_or(0.0, |i| self.steer_angles[i])
    }
}

impl SyncPayload for TexAnimationSync {
    const SIZE: usize = (NUM_WHEELS + 4) * size_of::<f32>();

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for value in self.wheel_rpms.iter().chain(&self.steer_angles) {
            writer.write_f32::<LittleEndian>(*value)?;
        }
        Ok(())
    }

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            wheel_rpms: read_f32s(reader)?,
            steer_angles: read_f32s(reader)?,
        })
    }
}

/// Rate-limited flight commands of the navigator chair
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChairSync {
    pub current_forward: f32,
    pub current_turning: f32,
}

impl SyncPayload for ChairSync {
    const SIZE: usize = 2 * size_of::<f32>();

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_f32::<LittleEndian>(self.current_forward)?;
        writer.write_f32::<LittleEndian>(self.current_turning)
    }

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            current_forward: reader.read_f32::<LittleEndian>()?,
            current_turning: reader.read_f32::<LittleEndian>()?,
        })
    }
}
