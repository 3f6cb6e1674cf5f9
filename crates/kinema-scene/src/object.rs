use std::cell::RefCell;
use std::rc::Rc;

use kinema_core::{Color, Transform, Vec3};

/// Anything the scene can animate and hand to a render sink.
pub trait Drawable {
    fn transform(&self) -> &Transform;
    fn transform_mut(&mut self) -> &mut Transform;
    fn color(&self) -> Color;
    fn color_mut(&mut self) -> &mut Color;
    /// World-space vertices reflecting the current transform.
    fn vertices(&self) -> Vec<Vec3>;
}

/// Shared, single-threaded handle to a drawable object.
///
/// The scene holds one of these per member; animations only keep a weak
/// reference to the same allocation.
pub type SharedObject = Rc<RefCell<dyn Drawable>>;

/// Wrap an object so it can be added to a scene and targeted by animations.
pub fn shared<D: Drawable>(object: D) -> Rc<RefCell<D>> {
    Rc::new(RefCell::new(object))
}

/// A triangle with local-space vertices, a fill color, and a transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    local: [Vec3; 3],
    color: Color,
    transform: Transform,
}

impl Triangle {
    pub fn new(vertices: [Vec3; 3], color: Color) -> Self {
        Self {
            local: vertices,
            color,
            transform: Transform::identity(),
        }
    }

    /// Equilateral triangle centered on its centroid, apex up.
    pub fn equilateral(side: f32, color: Color) -> Self {
        let height = side * 3f32.sqrt() / 2.0;
        Self::new(
            [
                Vec3::new(0.0, height * 2.0 / 3.0, 0.0),
                Vec3::new(-side / 2.0, -height / 3.0, 0.0),
                Vec3::new(side / 2.0, -height / 3.0, 0.0),
            ],
            color,
        )
    }

    /// `width` by `height` triangle on a horizontal base with its apex
    /// above the base's midpoint.
    pub fn right_triangle(width: f32, height: f32, color: Color) -> Self {
        Self::new(
            [
                Vec3::new(0.0, height / 2.0, 0.0),
                Vec3::new(-width / 2.0, -height / 2.0, 0.0),
                Vec3::new(width / 2.0, -height / 2.0, 0.0),
            ],
            color,
        )
    }

    pub fn local_vertices(&self) -> &[Vec3; 3] {
        &self.local
    }

    pub fn set_vertices(&mut self, vertices: [Vec3; 3]) -> &mut Self {
        self.local = vertices;
        self
    }

    pub fn set_color(&mut self, color: impl Into<Color>) -> &mut Self {
        self.color = color.into();
        self
    }

    /// Place the triangle at an absolute position.
    pub fn move_to(&mut self, position: impl Into<Vec3>) -> &mut Self {
        self.transform.set_position(position);
        self
    }

    /// Move the triangle by a relative offset.
    pub fn shift(&mut self, delta: impl Into<Vec3>) -> &mut Self {
        self.transform.translate(delta);
        self
    }

    pub fn rotate(&mut self, angle: f32) -> &mut Self {
        self.transform.rotate(angle);
        self
    }

    pub fn scale(&mut self, factor: f32) -> &mut Self {
        self.transform.scale_by(factor);
        self
    }
}

impl Default for Triangle {
    /// Unit triangle pointing up, filled red.
    fn default() -> Self {
        Self::new(
            [
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
            ],
            Color::RED,
        )
    }
}

impl Drawable for Triangle {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn color(&self) -> Color {
        self.color
    }

    fn color_mut(&mut self) -> &mut Color {
        &mut self.color
    }

    fn vertices(&self) -> Vec<Vec3> {
        let matrix = self.transform.matrix();
        self.local.iter().map(|&v| matrix.transform_point(v)).collect()
    }
}
