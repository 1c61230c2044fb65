// Packs a frame snapshot into GPU quad instances.
//
// Pure data transformation with no web dependencies, so it is tested on the host.

use crate::constants::*;
use glam::Vec3;
use link_core::{Beam, ParticleInstance, BEAM_VISIBILITY_THRESHOLD};

/// One camera-facing quad: centered, rotated about Z, sized, colored (linear RGBA).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadInstance {
    pub center: [f32; 3],
    pub angle: f32,
    pub size: [f32; 2],
    pub color: [f32; 4],
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
pub fn linear_rgba(srgb: [f32; 3], alpha: f32) -> [f32; 4] {
    [
        srgb_to_linear(srgb[0]),
        srgb_to_linear(srgb[1]),
        srgb_to_linear(srgb[2]),
        alpha,
    ]
}

/// Append one quad per particle, in particle order.
pub fn pack_particles(particles: &[ParticleInstance], out: &mut Vec<QuadInstance>) {
    out.extend(particles.iter().map(|p| QuadInstance {
        center: p.position,
        angle: 0.0,
        size: [p.scale[0] * PARTICLE_QUAD_W, p.scale[1] * PARTICLE_QUAD_H],
        color: linear_rgba(p.color, PARTICLE_OPACITY),
    }));
}

/// Append `BEAM_SEGMENTS` quads along the arc of every beam that is still
/// visible. Returns the number of beams drawn.
pub fn pack_beams(beams: &[Beam], out: &mut Vec<QuadInstance>) -> usize {
    let mut drawn = 0;
    for beam in beams
        .iter()
        .filter(|b| b.is_visible(BEAM_VISIBILITY_THRESHOLD))
    {
        let color = linear_rgba(BEAM_COLOR_SRGB, beam.opacity());
        let path = beam.path(BEAM_SEGMENTS);
        out.extend(path.windows(2).map(|w| segment_quad(w[0], w[1], color)));
        drawn += 1;
    }
    drawn
}

fn segment_quad(a: Vec3, b: Vec3, color: [f32; 4]) -> QuadInstance {
    let d = b - a;
    QuadInstance {
        center: ((a + b) * 0.5).to_array(),
        angle: d.y.atan2(d.x),
        size: [d.truncate().length(), 2.0 * BEAM_RADIUS],
        color,
    }
}
