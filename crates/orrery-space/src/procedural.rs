//! Stand-in textures generated in memory, used when a texture file is missing.
//!
//! Both generators write equirectangular RGBA8 images laid out the same way
//! the planet shader samples them: column `u = θ / 360`, row `v = φ / 180`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// An RGBA8 image ready for upload.
#[derive(Clone, Debug, PartialEq)]
pub struct ProceduralTexture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ProceduralTexture {
    fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let rgba = std::iter::repeat_n([rgb[0], rgb[1], rgb[2], 255], (width * height) as usize)
            .flatten()
            .collect();
        Self { width, height, rgba }
    }

    /// Additively blend `rgb` (0..1) into pixel (x, y), wrapping x horizontally.
    fn add(&mut self, x: i64, y: i64, rgb: [f32; 3]) {
        if y < 0 || y >= self.height as i64 {
            return;
        }
        let x = x.rem_euclid(self.width as i64) as usize;
        let idx = (y as usize * self.width as usize + x) * 4;
        for (c, value) in rgb.iter().enumerate() {
            let add = (value.clamp(0.0, 1.0) * 255.0) as u16;
            self.rgba[idx + c] = (self.rgba[idx + c] as u16 + add).min(255) as u8;
        }
    }
}

/// Deterministic star scatter on the sky sphere.
pub struct StarfieldGenerator {
    seed: u64,
    star_count: u32,
}

impl StarfieldGenerator {
    pub fn new(seed: u64, star_count: u32) -> Self {
        Self { seed, star_count }
    }

    /// Render the stars into a `width × height` equirectangular image.
    pub fn render(&self, width: u32, height: u32) -> ProceduralTexture {
        let mut texture = ProceduralTexture::filled(width, height, [0, 0, 0]);
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        for _ in 0..self.star_count {
            let theta = rng.random::<f32>() * 360.0;
            // Uniform over the sphere, not over φ.
            let phi = (1.0 - 2.0 * rng.random::<f32>()).acos().to_degrees();
            let brightness = rng.random::<f32>().powf(4.0);
            let color = blackbody_to_rgb(2000.0 + brightness * 28000.0);

            let x = (theta / 360.0 * width as f32) as i64;
            let y = ((phi / 180.0 * height as f32) as i64).min(height as i64 - 1);
            let b = brightness * 8.0 + 0.4;
            texture.add(x, y, color.map(|c| c * b));

            if brightness > 0.3 {
                let glow = brightness * 0.6;
                for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                    texture.add(x + dx, y + dy, color.map(|c| c * glow));
                }
            }
        }
        texture
    }
}

/// A solid colour with soft latitude bands and a darker prime meridian so
/// spin and tilt stay visible without real imagery.
pub fn banded_texture(width: u32, height: u32, base: [u8; 3]) -> ProceduralTexture {
    let mut texture = ProceduralTexture::filled(width, height, base);
    for y in 0..height {
        let latitude = (y as f32 + 0.5) / height as f32 * std::f32::consts::PI;
        let band = 0.85 + 0.15 * (latitude * 9.0).cos();
        for x in 0..width {
            let meridian = if x < width.div_ceil(64) { 0.6 } else { 1.0 };
            let idx = ((y * width + x) * 4) as usize;
            for c in 0..3 {
                texture.rgba[idx + c] = (base[c] as f32 * band * meridian).min(255.0) as u8;
            }
        }
    }
    texture
}

/// Approximate sRGB colour of a black body at `temperature_k` (Tanner Helland fit).
pub fn blackbody_to_rgb(temperature_k: f32) -> [f32; 3] {
    let t = temperature_k / 100.0;
    if t <= 66.0 {
        let g = (99.470_8 * t.ln() - 161.119_57).clamp(0.0, 255.0) / 255.0;
        let b = if t <= 19.0 {
            0.0
        } else {
            (138.517_73 * (t - 10.0).ln() - 305.044_8).clamp(0.0, 255.0) / 255.0
        };
        [1.0, g, b]
    } else {
        let r = (329.698_73 * (t - 60.0).powf(-0.133_204_76) / 255.0).clamp(0.0, 1.0);
        let g = (288.122_17 * (t - 60.0).powf(-0.075_514_85) / 255.0).clamp(0.0, 1.0);
        [r, g, 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starfield_dimensions() {
        let tex = StarfieldGenerator::new(7, 100).render(64, 32);
        assert_eq!(tex.rgba.len(), 64 * 32 * 4);
        assert!(tex.rgba.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_starfield_deterministic() {
        let a = StarfieldGenerator::new(42, 500).render(128, 64);
        let b = StarfieldGenerator::new(42, 500).render(128, 64);
        assert_eq!(a, b);
        let c = StarfieldGenerator::new(43, 500).render(128, 64);
        assert_ne!(a, c);
    }

    #[test]
    fn test_starfield_has_lit_pixels() {
        let tex = StarfieldGenerator::new(1, 200).render(128, 64);
        let lit = tex.rgba.chunks_exact(4).filter(|p| p[0] > 0 || p[1] > 0 || p[2] > 0).count();
        assert!(lit > 50, "only {lit} lit pixels");
    }

    #[test]
    fn test_zero_stars_is_black() {
        let tex = StarfieldGenerator::new(1, 0).render(8, 4);
        assert!(tex.rgba.chunks_exact(4).all(|p| p[..3] == [0, 0, 0]));
    }

    #[test]
    fn test_banded_texture_keeps_hue() {
        let tex = banded_texture(64, 32, [200, 100, 0]);
        assert_eq!(tex.rgba.len(), 64 * 32 * 4);
        for p in tex.rgba.chunks_exact(4) {
            assert!(p[0] >= p[1]);
            assert_eq!(p[2], 0);
            assert_eq!(p[3], 255);
        }
    }

    #[test]
    fn test_banded_texture_marks_meridian() {
        let tex = banded_texture(64, 32, [200, 200, 200]);
        let row = 16 * 64 * 4;
        assert!(tex.rgba[row] < tex.rgba[row + 32 * 4]);
    }

    #[test]
    fn test_blackbody_extremes() {
        let cool = blackbody_to_rgb(2000.0);
        let hot = blackbody_to_rgb(30000.0);
        assert!(cool[0] > cool[2], "cool stars are red");
        assert!(hot[2] > hot[0], "hot stars are blue");
    }
}
