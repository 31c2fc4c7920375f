// Simple color struct, created from an unsigned 32 representing RRGGBBAA.
// Knows how to format itself as the CSS strings the 2D canvas expects.

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

    // `rgba(r, g, b, alpha)`, alpha taken from the caller rather than `self.a`
    pub fn css_rgba(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }

    // `#RRGGBBAA` where AA is floor(alpha * 255)
    pub fn css_hex(&self, alpha: f64) -> String {
        format!(
            "#{:02X}{:02X}{:02X}{:02x}",
            self.r,
            self.g,
            self.b,
            alpha_byte(alpha)
        )
    }
}

pub fn alpha_byte(alpha: f64) -> u8 {
    (alpha.max(0.0).min(1.0) * 255.0).floor() as u8
}

pub const BACKGROUND: Color = Color::from_u32(0x111827ff);
pub const LINK: Color = Color::from_u32(0x60a5faff);

pub const PALETTE: [Color; 3] = [
    Color::from_u32(0x60a5faff),
    Color::from_u32(0x818cf8ff),
    Color::from_u32(0xa78bfaff),
];
