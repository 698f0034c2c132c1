// Simple color struct, created from an unsigned 32 representing RRGGBBAA,
// and the two 4-entry palettes the field is drawn with

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // Same color with alpha taken from an opacity in [0, 1], truncated like
    // the canvas hex encoding does
    pub fn with_opacity(self, opacity: f32) -> Color {
        Color {
            a: alpha_byte(opacity),
            ..self
        }
    }

    // "#rrggbbaa", the form a canvas fillStyle accepts
    pub fn to_css_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    // Source-over blend of `src` on top of `self`, straight (non premultiplied) alpha
    pub fn blend_over(&mut self, src: Color) {
        let src_a = src.a as f32 / 255.0;
        let dst_a = self.a as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            *self = Color::from_u32(0);
            return;
        }
        let mix = |s: u8, d: u8| -> u8 {
            let v = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
            v.round().max(0.0).min(255.0) as u8
        };

        self.r = mix(src.r, self.r);
        self.g = mix(src.g, self.g);
        self.b = mix(src.b, self.b);
        self.a = (out_a * 255.0).round() as u8;
    }
}

pub fn alpha_byte(opacity: f32) -> u8 {
    (opacity.max(0.0).min(1.0) * 255.0).floor() as u8
}

pub const PALETTE_SIZE: usize = 4;

pub type Palette = [Color; PALETTE_SIZE];

pub const LIGHT_PALETTE: Palette = [
    Color::from_u32(0x2563ebff),
    Color::from_u32(0x3b82f6ff),
    Color::from_u32(0x60a5faff),
    Color::from_u32(0x1d4ed8ff),
];

pub const DARK_PALETTE: Palette = [
    Color::from_u32(0x0ea5e9ff),
    Color::from_u32(0x38bdf8ff),
    Color::from_u32(0x7dd3fcff),
    Color::from_u32(0x0284c7ff),
];

pub fn palette_for(dark_mode: bool) -> &'static Palette {
    if dark_mode {
        &DARK_PALETTE
    } else {
        &LIGHT_PALETTE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_hex_carries_truncated_alpha() {
        let c = LIGHT_PALETTE[0].with_opacity(0.8);
        // floor(0.8 * 255) = 204
        assert_eq!(c.to_css_hex(), "#2563ebcc");

        let faint = DARK_PALETTE[3].with_opacity(0.04);
        assert_eq!(faint.to_css_hex(), "#0284c70a");
    }

    #[test]
    fn palettes_follow_theme_flag() {
        assert_eq!(palette_for(false)[1], Color::from_u32(0x3b82f6ff));
        assert_eq!(palette_for(true)[2], Color::from_u32(0x7dd3fcff));
    }

    #[test]
    fn blending_onto_transparent_keeps_source() {
        let mut dst = Color::from_u32(0);
        let src = DARK_PALETTE[0].with_opacity(0.5);
        dst.blend_over(src);
        assert_eq!((dst.r, dst.g, dst.b), (src.r, src.g, src.b));
        assert_eq!(dst.a, src.a);
    }

    #[test]
    fn opaque_source_replaces_destination() {
        let mut dst = Color::from_u32(0xff0000ff);
        dst.blend_over(LIGHT_PALETTE[3]);
        assert_eq!(dst, LIGHT_PALETTE[3]);
    }
}
