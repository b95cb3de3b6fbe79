//! Color and viewport types shared by the simulations and their hosts

use serde::{Deserialize, Serialize};

/// RGBA color with linear channels in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channels and a float alpha, as written in CSS `rgba()`
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Opaque color from hue, saturation and lightness, all in [0, 1].
    /// Hue wraps around.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::new(l, l, l, 1.0);
        }

        let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let q = 2.0 * l - p;
        Self::new(
            hue_to_channel(q, p, h + 1.0 / 3.0),
            hue_to_channel(q, p, h),
            hue_to_channel(q, p, h - 1.0 / 3.0),
            1.0,
        )
    }

    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn rgb(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// CSS `rgba(r, g, b, a)` string for 2D canvas fill styles
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            channel_u8(self.r),
            channel_u8(self.g),
            channel_u8(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

fn hue_to_channel(q: f32, p: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return q + (p - q) * 6.0 * t;
    }
    if t < 0.5 {
        return p;
    }
    if t < 2.0 / 3.0 {
        return q + (p - q) * 6.0 * (2.0 / 3.0 - t);
    }
    q
}

fn channel_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Hue/saturation/lightness triple, used as a gradient stop
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    pub fn to_color(&self) -> Color {
        Color::from_hsl(self.h, self.s, self.l)
    }
}

/// Host viewport in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Physical pixels per CSS pixel
    #[serde(default = "default_pixel_ratio")]
    pub device_pixel_ratio: f32,
}

fn default_pixel_ratio() -> f32 {
    1.0
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    pub fn with_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Width over height; 1.0 for a degenerate viewport
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Device pixel ratio capped at `max`
    pub fn capped_pixel_ratio(&self, max: f32) -> f32 {
        self.device_pixel_ratio.min(max).max(0.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_color_from_rgba8() {
        let c = Color::from_rgba8(255, 201, 217, 0.8);
        assert!(close(c.r, 1.0));
        assert!(close(c.g, 201.0 / 255.0));
        assert!(close(c.a, 0.8));
    }

    #[test]
    fn test_hsl_primaries() {
        let red = Color::from_hsl(0.0, 1.0, 0.5);
        assert!(close(red.r, 1.0) && close(red.g, 0.0) && close(red.b, 0.0));

        let green = Color::from_hsl(1.0 / 3.0, 1.0, 0.5);
        assert!(close(green.r, 0.0) && close(green.g, 1.0) && close(green.b, 0.0));

        let wrapped = Color::from_hsl(1.0, 1.0, 0.5);
        assert!(close(wrapped.r, 1.0) && close(wrapped.b, 0.0));
    }

    #[test]
    fn test_hsl_grey_when_unsaturated() {
        let grey = Color::from_hsl(0.42, 0.0, 0.3);
        assert!(close(grey.r, 0.3) && close(grey.g, 0.3) && close(grey.b, 0.3));
    }

    #[test]
    fn test_pink_hue_is_red_dominant() {
        let pink = Color::from_hsl(0.92, 0.7, 0.8);
        assert!(pink.r > pink.b && pink.b > pink.g);
    }

    #[test]
    fn test_css_string() {
        let c = Color::from_rgba8(255, 229, 236, 0.8);
        assert_eq!(c.to_css(), "rgba(255, 229, 236, 0.8)");
    }

    #[test]
    fn test_viewport_aspect_and_ratio() {
        let vp = Viewport::new(1920.0, 1080.0).with_pixel_ratio(3.0);
        assert!(close(vp.aspect(), 1920.0 / 1080.0));
        assert!(close(vp.capped_pixel_ratio(2.0), 2.0));
        assert!(close(Viewport::new(10.0, 0.0).aspect(), 1.0));
    }
}
