//! RGBA colors and their HLS/HSV views.

use std::fmt;

/// An immutable 8-bit RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Scale a unit value to a channel byte, truncating and clamping.
fn channel(value: f64) -> u8 {
    (255.0 * value).clamp(0.0, 255.0) as u8
}

/// Hue helper for HLS to RGB conversion.
fn hls_value(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Build from unit-interval channels.
    pub fn from_unit(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color::new(channel(r), channel(g), channel(b), channel(a))
    }

    /// Build from hue, luminance, saturation and alpha, each in `0..=1`.
    pub fn from_hls(h: f64, l: f64, s: f64, a: f64) -> Self {
        if s == 0.0 {
            return Self::from_unit(l, l, l, a);
        }
        let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let m1 = 2.0 * l - m2;
        Self::from_unit(
            hls_value(m1, m2, h + 1.0 / 3.0),
            hls_value(m1, m2, h),
            hls_value(m1, m2, h - 1.0 / 3.0),
            a,
        )
    }

    /// Build from hue, saturation, value and alpha, each in `0..=1`.
    pub fn from_hsv(h: f64, s: f64, v: f64, a: f64) -> Self {
        if s == 0.0 {
            return Self::from_unit(v, v, v, a);
        }
        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match (sector as i64).rem_euclid(6) {
            0 => Self::from_unit(v, t, p, a),
            1 => Self::from_unit(q, v, p, a),
            2 => Self::from_unit(p, v, t, a),
            3 => Self::from_unit(p, q, v, a),
            4 => Self::from_unit(t, p, v, a),
            _ => Self::from_unit(v, p, q, a),
        }
    }

    /// Channel by index, counting from the end for negative indices.
    pub fn channel(self, index: i64) -> Option<u8> {
        let index = if index < 0 { index + 4 } else { index };
        match index {
            0 => Some(self.r),
            1 => Some(self.g),
            2 => Some(self.b),
            3 => Some(self.a),
            _ => None,
        }
    }

    pub fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    fn unit_rgb(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    fn hue(r: f64, g: f64, b: f64, maxc: f64, minc: f64) -> f64 {
        let span = maxc - minc;
        let rc = (maxc - r) / span;
        let gc = (maxc - g) / span;
        let bc = (maxc - b) / span;
        let h = if r == maxc {
            bc - gc
        } else if g == maxc {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };
        (h / 6.0).rem_euclid(1.0)
    }

    /// `(hue, luminance, saturation)` in `0..=1`.
    pub fn hls(self) -> [f64; 3] {
        let (r, g, b) = self.unit_rgb();
        let maxc = r.max(g).max(b);
        let minc = r.min(g).min(b);
        let l = (minc + maxc) / 2.0;
        if minc == maxc {
            return [0.0, l, 0.0];
        }
        let s = if l <= 0.5 {
            (maxc - minc) / (maxc + minc)
        } else {
            (maxc - minc) / (2.0 - maxc - minc)
        };
        [Self::hue(r, g, b, maxc, minc), l, s]
    }

    /// `(hue, saturation, value)` in `0..=1`.
    pub fn hsv(self) -> [f64; 3] {
        let (r, g, b) = self.unit_rgb();
        let maxc = r.max(g).max(b);
        let minc = r.min(g).min(b);
        if minc == maxc {
            return [0.0, 0.0, maxc];
        }
        [Self::hue(r, g, b, maxc, minc), (maxc - minc) / maxc, maxc]
    }

    pub fn alpha_unit(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    pub fn lum(self) -> f64 {
        self.hls()[1]
    }

    #[must_use]
    pub fn with_alpha(self, a: u8) -> Self {
        Color { a, ..self }
    }

    /// Same hue and saturation with a different luminance.
    #[must_use]
    pub fn with_lum(self, lum: f64) -> Self {
        let [h, _, s] = self.hls();
        Self::from_hls(h, lum, s, self.alpha_unit())
    }

    /// Hex form: `#rgb`, `#rrggbb`, `#rgba` or `#rrggbbaa`.
    ///
    /// Alpha is omitted when opaque; the short form is used only when every
    /// emitted channel has two equal hex digits.
    pub fn repr(self) -> String {
        let channels: &[u8] = if self.a == 255 {
            &[self.r, self.g, self.b]
        } else {
            &[self.r, self.g, self.b, self.a]
        };
        let short = channels.iter().all(|c| c >> 4 == c & 0xf);
        let mut out = String::from("#");
        for c in channels {
            if short {
                out.push_str(&format!("{:x}", c & 0xf));
            } else {
                out.push_str(&format!("{c:02x}"));
            }
        }
        out
    }
}

impl fmt::Display for Color {
    /// CSS form: the hex repr when opaque, else `rgba(r, g, b, alpha)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            f.write_str(&self.repr())
        } else {
            write!(
                f,
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                self.alpha_unit()
            )
        }
    }
}
