//! Shared object capability and the closed set of scene object kinds.

use std::fmt;

use glam::{Vec2, Vec4};
use tableau_engine::coords::{self, Rect};

use crate::circle::GradientCircle;
use crate::sprite::AnimatedSprite;

/// Store-unique handle assigned when an object is created.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ObjectId(pub(crate) u64);

impl ObjectId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capability shared by every scene object: a position and a bounding test.
///
/// Position is `(x, y, z, w)` in logical pixels; `x`/`y` locate the top-left
/// corner, `z`/`w` are carried through moves untouched.
pub trait SceneObject {
    fn id(&self) -> ObjectId;

    fn position(&self) -> Vec4;

    fn set_position(&mut self, position: Vec4);

    /// Width and height in logical pixels.
    fn size(&self) -> Vec2;

    fn bounds(&self) -> Rect {
        let p = self.position();
        let s = self.size();
        Rect::new(p.x, p.y, s.x, s.y)
    }

    /// Half-open bounding test: `[x, x + w) × [y, y + h)`.
    fn contains(&self, x: f32, y: f32) -> bool {
        self.bounds().contains(coords::Vec2::new(x, y))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ObjectKind {
    Sprite,
    Circle,
}

/// Borrowed view of any scene object.
#[derive(Debug, Copy, Clone)]
pub enum SceneObjectRef<'a> {
    Sprite(&'a AnimatedSprite),
    Circle(&'a GradientCircle),
}

/// Mutable view of any scene object.
#[derive(Debug)]
pub enum SceneObjectMut<'a> {
    Sprite(&'a mut AnimatedSprite),
    Circle(&'a mut GradientCircle),
}

/// Owned scene object, as handed back by removal.
#[derive(Debug, Clone)]
pub enum AnyObject {
    Sprite(AnimatedSprite),
    Circle(GradientCircle),
}

impl<'a> SceneObjectRef<'a> {
    pub fn kind(&self) -> ObjectKind {
        match self {
            SceneObjectRef::Sprite(_) => ObjectKind::Sprite,
            SceneObjectRef::Circle(_) => ObjectKind::Circle,
        }
    }

    pub fn as_object(&self) -> &'a dyn SceneObject {
        match *self {
            SceneObjectRef::Sprite(s) => s,
            SceneObjectRef::Circle(c) => c,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.as_object().id()
    }

    pub fn position(&self) -> Vec4 {
        self.as_object().position()
    }

    pub fn size(&self) -> Vec2 {
        self.as_object().size()
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.as_object().contains(x, y)
    }
}

impl SceneObjectMut<'_> {
    pub fn as_object_mut(&mut self) -> &mut dyn SceneObject {
        match self {
            SceneObjectMut::Sprite(s) => &mut **s,
            SceneObjectMut::Circle(c) => &mut **c,
        }
    }

    pub fn position(&self) -> Vec4 {
        match self {
            SceneObjectMut::Sprite(s) => s.position(),
            SceneObjectMut::Circle(c) => c.position(),
        }
    }

    pub fn set_position(&mut self, position: Vec4) {
        self.as_object_mut().set_position(position);
    }
}

impl AnyObject {
    pub fn as_object_ref(&self) -> SceneObjectRef<'_> {
        match self {
            AnyObject::Sprite(s) => SceneObjectRef::Sprite(s),
            AnyObject::Circle(c) => SceneObjectRef::Circle(c),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.as_object_ref().id()
    }

    pub fn kind(&self) -> ObjectKind {
        self.as_object_ref().kind()
    }
}
