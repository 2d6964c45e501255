//! Renderer boundary
//!
//! Games never draw. After each frame the runner asks the game for a
//! [`Frame`] (a flat list of 2D draw commands or a 3D scene description) and
//! hands it to whatever [`Renderer`] the host provides. Nothing flows back.

pub mod canvas;
pub mod scene;

use glam::{Mat4, Quat, Vec2, Vec3};
use serde::Serialize;

/// Linear RGBA
pub type Color = [f32; 4];

/// Convert a `0xRRGGBB` colour
pub fn hex(rgb: u32) -> Color {
    let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0), 1.0]
}

/// HSL (degrees, 0..1, 0..1) to RGBA
pub fn hsl(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Color {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    [r + m, g + m, b + m, alpha]
}

/// One 2D drawing primitive in canvas pixels (y down)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCmd {
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: Color,
    },
}

/// A full 2D frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Canvas {
    pub size: Vec2,
    pub clear: Option<Color>,
    pub commands: Vec<DrawCmd>,
}

impl Canvas {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            clear: None,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Shape {
    Cube,
    Sphere,
    Cone,
    Cylinder,
}

/// A mesh instance in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneObject {
    pub shape: Shape,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub color: Color,
}

impl SceneObject {
    pub fn new(shape: Shape, position: Vec3, scale: Vec3, color: Color) -> Self {
        Self {
            shape,
            position,
            rotation: Quat::IDENTITY,
            scale,
            color,
        }
    }

    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f32,
    },
    Directional {
        position: Vec3,
        color: Color,
        intensity: f32,
    },
    Point {
        position: Vec3,
        color: Color,
        intensity: f32,
        range: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }
}

/// A full 3D frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub sky: Color,
    pub camera: Camera,
    pub projection: Mat4,
    pub lights: Vec<Light>,
    pub objects: Vec<SceneObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Frame {
    Canvas(Canvas),
    Scene(Scene),
}

/// Output surface dimensions and the matching projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    projection: Mat4,
}

impl Viewport {
    pub const FOV_Y_DEGREES: f32 = 75.0;
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 1000.0;

    pub fn new(width: u32, height: u32) -> Self {
        let mut viewport = Self {
            width: 1,
            height: 1,
            projection: Mat4::IDENTITY,
        };
        viewport.resize(width, height);
        viewport
    }

    /// Zero-sized resizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.projection = Mat4::perspective_rh_gl(
            Self::FOV_Y_DEGREES.to_radians(),
            self.aspect(),
            Self::NEAR,
            Self::FAR,
        );
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// A drawing backend
pub trait Renderer {
    fn resize(&mut self, width: u32, height: u32);
    fn render(&mut self, frame: &Frame);
}

/// Keeps the last frame; used by the headless runner and tests
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: u64,
    pub last: Option<Frame>,
    pub size: (u32, u32),
}

impl Renderer for RecordingRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.size = (width, height);
        }
    }

    fn render(&mut self, frame: &Frame) {
        self.frames += 1;
        self.last = Some(frame.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colors() {
        assert_eq!(hex(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex(0x0000ff), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_hsl_primaries() {
        let cyan = hsl(180.0, 1.0, 0.5, 1.0);
        assert!((cyan[0]).abs() < 1e-6);
        assert!((cyan[1] - 1.0).abs() < 1e-6 && (cyan[2] - 1.0).abs() < 1e-6);
        let red = hsl(0.0, 1.0, 0.5, 0.5);
        assert_eq!(red, [1.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_viewport_resize() {
        let mut viewport = Viewport::new(800, 600);
        let before = viewport.projection();
        viewport.resize(1200, 600);
        assert_eq!(viewport.aspect(), 2.0);
        assert_ne!(viewport.projection(), before);
        viewport.resize(0, 600);
        assert_eq!(viewport.width, 1200);
    }

    #[test]
    fn test_recording_renderer_keeps_last() {
        let mut renderer = RecordingRenderer::default();
        renderer.render(&Frame::Canvas(Canvas::new(Vec2::new(10.0, 10.0))));
        renderer.resize(640, 480);
        assert_eq!(renderer.frames, 1);
        assert_eq!(renderer.size, (640, 480));
        assert!(matches!(renderer.last, Some(Frame::Canvas(_))));
    }
}
