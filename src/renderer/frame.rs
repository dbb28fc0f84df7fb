//! Frame assembly: turns drawing calls into GPU triangles and text labels

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::draw::{Color, Surface, TextStyle};
use crate::sim::Rect;

/// Triangles per circle
pub const CIRCLE_SEGMENTS: u32 = 24;

/// 2D vertex with position (court units until uploaded) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    fn at(pos: Vec2, color: Color) -> Self {
        Self::new(pos.x, pos.y, color)
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
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Text the GPU pass does not draw; the frontend lays it over the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub pos: Vec2,
    pub style: TextStyle,
}

/// A [`Surface`] that records one frame for the render pipeline
#[derive(Debug, Default)]
pub struct FrameBuilder {
    vertices: Vec<Vertex>,
    labels: Vec<TextLabel>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame, keeping allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.labels.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }
}

impl Surface for FrameBuilder {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (l, r, t, b) = (rect.left(), rect.right(), rect.top(), rect.bottom());
        self.vertices.extend_from_slice(&[
            Vertex::new(l, t, color),
            Vertex::new(l, b, color),
            Vertex::new(r, t, color),
            Vertex::new(r, t, color),
            Vertex::new(l, b, color),
            Vertex::new(r, b, color),
        ]);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices.reserve((CIRCLE_SEGMENTS * 3) as usize);
        for i in 0..CIRCLE_SEGMENTS {
            let theta1 = (i as f32 / CIRCLE_SEGMENTS as f32) * TAU;
            let theta2 = ((i + 1) as f32 / CIRCLE_SEGMENTS as f32) * TAU;

            // Fan triangle from the centre to the rim
            self.vertices.push(Vertex::at(center, color));
            self.vertices
                .push(Vertex::at(center + Vec2::from_angle(theta1) * radius, color));
            self.vertices
                .push(Vertex::at(center + Vec2::from_angle(theta2) * radius, color));
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.labels.push(TextLabel {
            text: text.to_string(),
            pos,
            style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{TextAnchor, TextSize, colors, draw_match};
    use crate::settings::Settings;
    use crate::sim::MatchState;

    #[test]
    fn test_rect_is_two_triangles_covering_corners() {
        let mut frame = FrameBuilder::new();
        frame.fill_rect(Rect::new(10.0, 20.0, 30.0, 40.0), colors::LINE);

        let v = frame.vertices();
        assert_eq!(v.len(), 6);
        for corner in [[10.0, 20.0], [40.0, 20.0], [10.0, 60.0], [40.0, 60.0]] {
            assert!(v.iter().any(|vertex| vertex.position == corner));
        }
    }

    #[test]
    fn test_circle_rim_at_radius() {
        let mut frame = FrameBuilder::new();
        let center = Vec2::new(100.0, 100.0);
        frame.fill_circle(center, 6.0, colors::SHUTTLE);

        let v = frame.vertices();
        assert_eq!(v.len(), (CIRCLE_SEGMENTS * 3) as usize);
        for tri in v.chunks(3) {
            assert_eq!(tri[0].position, [100.0, 100.0]);
            let rim = Vec2::from(tri[1].position);
            assert!((rim.distance(center) - 6.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_text_becomes_labels() {
        let mut frame = FrameBuilder::new();
        let style = TextStyle::new(TextSize::Small, TextAnchor::End);
        frame.draw_text("Right: 3", Vec2::new(860.0, 12.0), style);

        assert!(frame.vertices().is_empty());
        assert_eq!(frame.labels()[0].text, "Right: 3");
        assert_eq!(frame.labels()[0].style, style);
    }

    #[test]
    fn test_full_match_frame_and_clear() {
        let state = MatchState::new(5);
        let mut frame = FrameBuilder::new();
        draw_match(&state, &Settings::default(), &mut frame);

        // Court, baseline, net, two rackets, one shuttle
        assert_eq!(frame.vertices().len(), 5 * 6 + (CIRCLE_SEGMENTS * 3) as usize);
        assert_eq!(frame.labels().len(), 3);

        frame.clear();
        assert!(frame.vertices().is_empty());
        assert!(frame.labels().is_empty());
    }
}
