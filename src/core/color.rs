use nalgebra::{Vector3, Vector4};

/// Linear RGBA color, each channel nominally in [0, 1].
pub type Rgba = Vector4<f32>;

/// Packs an RGB triple into an opaque RGBA color (alpha = 1.0).
pub fn opaque(rgb: Vector3<f32>) -> Rgba {
    Vector4::new(rgb.x, rgb.y, rgb.z, 1.0)
}

/// Quantizes a [0, 1] channel to 8 bits, rounding to nearest.
pub fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Drops alpha and quantizes RGB to 8 bits per channel.
pub fn rgb_to_u8(color: &Rgba) -> [u8; 3] {
    [
        channel_to_u8(color.x),
        channel_to_u8(color.y),
        channel_to_u8(color.z),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_sets_alpha() {
        let c = opaque(Vector3::new(0.1, 0.2, 0.3));
        assert_eq!(c.w, 1.0);
        assert_eq!(c.xyz(), Vector3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_quantization() {
        assert_eq!(channel_to_u8(0.0), 0);
        assert_eq!(channel_to_u8(1.0), 255);
        assert_eq!(channel_to_u8(0.5), 128);
        // Out-of-range values saturate.
        assert_eq!(channel_to_u8(-0.2), 0);
        assert_eq!(channel_to_u8(7.0), 255);
        assert_eq!(rgb_to_u8(&Vector4::new(1.0, 0.0, 0.5, 1.0)), [255, 0, 128]);
    }
}
