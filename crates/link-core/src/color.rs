use crate::constants::*;

/// Convert HSL (all components in 0..1) to sRGB.
///
/// Hue wraps modulo 1; saturation and lightness are clamped.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }
    let hi = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let lo = 2.0 * l - hi;
    // f32 rounding in the ramps can land a hair outside [0, 1]
    [
        hue_channel(lo, hi, h + 1.0 / 3.0).clamp(0.0, 1.0),
        hue_channel(lo, hi, h).clamp(0.0, 1.0),
        hue_channel(lo, hi, h - 1.0 / 3.0).clamp(0.0, 1.0),
    ]
}

#[inline]
fn hue_channel(lo: f32, hi: f32, t: f32) -> f32 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        lo + (hi - lo) * 6.0 * t
    } else if t < 0.5 {
        hi
    } else if t < 2.0 / 3.0 {
        lo + (hi - lo) * 6.0 * (2.0 / 3.0 - t)
    } else {
        lo
    }
}

/// HSL triple for a particle at the given pressure.
///
/// Two regimes: up to `ALERT_THRESHOLD` the hue is pinned to the calm band
/// and only lightness rises; past it the hue sweeps from magenta toward red
/// while lightness approaches its maximum.
pub fn pressure_hsl(pressure: f32) -> [f32; 3] {
    let p = pressure.clamp(0.0, 1.0);
    if p > ALERT_THRESHOLD {
        let u = ((p - ALERT_THRESHOLD) / (1.0 - ALERT_THRESHOLD)).clamp(0.0, 1.0);
        let hue = ALERT_HUE_START + (ALERT_HUE_END - ALERT_HUE_START) * u;
        [hue, 1.0, ALERT_LIGHTNESS_BASE + ALERT_LIGHTNESS_SPAN * p]
    } else {
        [CALM_HUE, 1.0, CALM_LIGHTNESS_BASE + p]
    }
}

/// sRGB particle color at the given pressure.
#[inline]
pub fn pressure_color(pressure: f32) -> [f32; 3] {
    let [h, s, l] = pressure_hsl(pressure);
    hsl_to_rgb(h, s, l)
}
