use kinema_core::{Color, Value, Vec3};

use crate::object::Drawable;

/// Identifies the attribute of a drawable that an animation writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Position,
    Rotation,
    Scale,
    Color,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Channel {
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Position => "position",
            Channel::Rotation => "rotation",
            Channel::Scale => "scale",
            Channel::Color => "color",
        }
    }

    /// Whether this channel lives on the object's transform.
    pub fn is_transform(&self) -> bool {
        !matches!(self, Channel::Color)
    }

    /// Snapshot the channel's current value. The result never aliases the
    /// live object state.
    pub fn read(&self, target: &dyn Drawable) -> Value {
        let transform = target.transform();
        match self {
            Channel::Position => Value::Vector(transform.position),
            Channel::Rotation => Value::Scalar(transform.rotation),
            Channel::Scale => Value::Vector(transform.scale),
            Channel::Color => Value::Color(target.color()),
        }
    }

    /// Coerce a loosely typed value into the kind this channel stores.
    ///
    /// Three-element tuples become vectors (or colors), a one-element
    /// tuple becomes a rotation scalar. Anything else is returned as is.
    pub fn normalize(&self, value: Value) -> Value {
        match (self, value) {
            (Channel::Position | Channel::Scale, Value::Tuple(t)) if t.len() == 3 => {
                Value::Vector(Vec3::new(t[0], t[1], t[2]))
            }
            (Channel::Color, Value::Tuple(t)) if t.len() == 3 => {
                Value::Color(Color::rgb(t[0], t[1], t[2]))
            }
            (Channel::Rotation, Value::Tuple(t)) if t.len() == 1 => Value::Scalar(t[0]),
            (_, value) => value,
        }
    }

    /// Store `value` into the channel. Returns `false`, leaving the target
    /// untouched, when the value kind does not fit the channel.
    pub fn write(&self, target: &mut dyn Drawable, value: &Value) -> bool {
        match (self, value) {
            (Channel::Position, Value::Vector(v)) => {
                target.transform_mut().position = *v;
                true
            }
            (Channel::Rotation, Value::Scalar(r)) => {
                target.transform_mut().rotation = *r;
                true
            }
            (Channel::Scale, Value::Vector(v)) => {
                target.transform_mut().scale = *v;
                true
            }
            (Channel::Color, Value::Color(c)) => {
                *target.color_mut() = *c;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Triangle;

    #[test]
    fn test_read_is_a_snapshot() {
        let mut tri = Triangle::default();
        tri.move_to((1.0, 2.0));
        let before = Channel::Position.read(&tri);
        tri.move_to((9.0, 9.0));
        assert_eq!(before, Value::Vector(Vec3::new(1.0, 2.0, 0.0)));
    }

    #[test]
    fn test_write_each_channel() {
        let mut tri = Triangle::default();
        assert!(Channel::Position.write(&mut tri, &Value::Vector(Vec3::new(1.0, 0.0, 0.0))));
        assert!(Channel::Rotation.write(&mut tri, &Value::Scalar(0.5)));
        assert!(Channel::Scale.write(&mut tri, &Value::Vector(Vec3::splat(2.0))));
        assert!(Channel::Color.write(&mut tri, &Value::Color(Color::BLUE)));

        assert_eq!(tri.transform().position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tri.transform().rotation, 0.5);
        assert_eq!(tri.transform().scale, Vec3::splat(2.0));
        assert_eq!(tri.color(), Color::BLUE);
    }

    #[test]
    fn test_write_rejects_wrong_kind() {
        let mut tri = Triangle::default();
        assert!(!Channel::Rotation.write(&mut tri, &Value::Vector(Vec3::ONE)));
        assert!(!Channel::Color.write(&mut tri, &Value::Scalar(1.0)));
        assert_eq!(tri, Triangle::default());
    }

    #[test]
    fn test_normalize_tuples() {
        assert_eq!(
            Channel::Scale.normalize(Value::Tuple(vec![1.0, 2.0, 3.0])),
            Value::Vector(Vec3::new(1.0, 2.0, 3.0))
        );
        assert_eq!(
            Channel::Color.normalize(Value::Tuple(vec![0.0, 1.0, 0.0])),
            Value::Color(Color::GREEN)
        );
        assert_eq!(
            Channel::Rotation.normalize(Value::Tuple(vec![1.5])),
            Value::Scalar(1.5)
        );
        assert_eq!(
            Channel::Position.normalize(Value::Tuple(vec![1.0, 2.0])),
            Value::Tuple(vec![1.0, 2.0])
        );
    }
}
