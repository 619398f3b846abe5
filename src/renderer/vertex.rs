//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex with texture coordinates and a colour multiplier
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }

    /// Untextured vertex (samples the blank white texel)
    pub const fn solid(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self::new(x, y, 0.0, 0.0, color)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    // After position and uv
                    offset: (std::mem::size_of::<[f32; 2]>() * 2) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
///
/// The surface is sRGB, so colours are stored linear.
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.30, 0.64, 0.70, 1.0];

    /// Linear RGBA from an sRGB `0xRRGGBB` value
    pub fn hex(rgb: u32) -> [f32; 4] {
        let channel = |shift: u32| srgb_to_linear(((rgb >> shift) & 0xff) as f32 / 255.0);
        [channel(16), channel(8), channel(0), 1.0]
    }

    fn srgb_to_linear(c: f32) -> f32 {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_hex_extremes() {
            assert_eq!(hex(0x000000), [0.0, 0.0, 0.0, 1.0]);
            let white = hex(0xffffff);
            for c in &white[..3] {
                assert!((c - 1.0).abs() < 1e-6);
            }
        }

        #[test]
        fn test_hex_channel_order() {
            let red = hex(0xff0000);
            assert!(red[0] > 0.99 && red[1] == 0.0 && red[2] == 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_offsets_match_layout() {
        let desc = Vertex::desc();
        assert_eq!(desc.array_stride, std::mem::size_of::<Vertex>() as u64);
        let offsets: Vec<u64> = desc.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(
            offsets,
            vec![
                std::mem::offset_of!(Vertex, position) as u64,
                std::mem::offset_of!(Vertex, uv) as u64,
                std::mem::offset_of!(Vertex, color) as u64,
            ]
        );
    }
}
