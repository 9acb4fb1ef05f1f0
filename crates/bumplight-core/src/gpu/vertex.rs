//! VertexRecord: a tile corner packed into the 32-byte list record.

use core::f32::consts::TAU;

use bumplight_hal::Record;

use crate::math::fixed::{pack_argb, wrap_to_u8};
use crate::render::Vertex;

/// One vertex as the GPU reads it.
///
/// Word order: `[flags, x, y, z, u, v, argb, oargb]`. Positions are the
/// transformed, undivided coordinates; `oargb` carries the bump parameter in
/// the bump pass and is zero otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexRecord {
    pub flags: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub u: f32,
    pub v: f32,
    pub argb: u32,
    pub oargb: u32,
}

impl VertexRecord {
    /// Pack a vertex using its transformed position and current lit color.
    pub fn from_vertex(vertex: &Vertex) -> Self {
        let p = vertex.transformed;
        let c = vertex.color;
        Self {
            flags: vertex.flag.command_word(),
            x: p.x,
            y: p.y,
            z: p.z,
            u: vertex.uv.x,
            v: vertex.uv.y,
            argb: pack_argb(1.0, c.x, c.y, c.z),
            oargb: vertex.offset_color,
        }
    }

    pub fn to_record(&self) -> Record {
        Record([
            self.flags,
            self.x.to_bits(),
            self.y.to_bits(),
            self.z.to_bits(),
            self.u.to_bits(),
            self.v.to_bits(),
            self.argb,
            self.oargb,
        ])
    }

    /// Inverse of [`VertexRecord::to_record`].
    pub fn from_record(record: &Record) -> Self {
        let w = &record.0;
        Self {
            flags: w[0],
            x: f32::from_bits(w[1]),
            y: f32::from_bits(w[2]),
            z: f32::from_bits(w[3]),
            u: f32::from_bits(w[4]),
            v: f32::from_bits(w[5]),
            argb: w[6],
            oargb: w[7],
        }
    }
}

impl From<&Vertex> for VertexRecord {
    fn from(vertex: &Vertex) -> Self {
        Self::from_vertex(vertex)
    }
}

/// Pack bumpiness `h`, elevation term `t` and azimuth `q` into the hardware
/// bump parameter word.
///
/// `k1 = !hp`, `k2 = hp·sin t`, `k3 = hp·cos t`, `qp = q/2π · 255`. Negative
/// or oversized terms wrap to their low 8 bits.
pub fn pack_bump(h: f32, t: f32, q: f32) -> u32 {
    let hp = wrap_to_u8(h * 255.0);
    let k1 = !hp;
    let k2 = wrap_to_u8(hp as f32 * libm::sinf(t));
    let k3 = wrap_to_u8(hp as f32 * libm::cosf(t));
    let qp = wrap_to_u8((q / TAU) * 255.0);
    ((k1 as u32) << 24) | ((k2 as u32) << 16) | ((k3 as u32) << 8) | qp as u32
}
