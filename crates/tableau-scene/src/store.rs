//! Owner of every scene object.

use crate::circle::GradientCircle;
use crate::object::{AnyObject, ObjectId, SceneObject, SceneObjectMut, SceneObjectRef};
use crate::sprite::AnimatedSprite;

/// Scene objects partitioned by kind, each bucket in insertion order.
///
/// The visible set is sprites followed by circles. That order is both the
/// draw order and the picking priority: later objects sit on top.
#[derive(Debug, Default)]
pub struct SceneStore {
    sprites: Vec<AnimatedSprite>,
    circles: Vec<GradientCircle>,
    next_id: u64,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh handle. Handles are never reused.
    pub fn next_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add_sprite(&mut self, sprite: AnimatedSprite) -> ObjectId {
        let id = sprite.id();
        debug_assert!(self.get(id).is_none(), "duplicate object id {id}");
        self.sprites.push(sprite);
        id
    }

    pub fn add_circle(&mut self, circle: GradientCircle) -> ObjectId {
        let id = circle.id();
        debug_assert!(self.get(id).is_none(), "duplicate object id {id}");
        self.circles.push(circle);
        id
    }

    /// Removes the object with `id`, keeping the order of the rest.
    ///
    /// Returns `None` when no such object exists.
    pub fn remove(&mut self, id: ObjectId) -> Option<AnyObject> {
        if let Some(i) = self.sprites.iter().position(|s| s.id() == id) {
            return Some(AnyObject::Sprite(self.sprites.remove(i)));
        }
        if let Some(i) = self.circles.iter().position(|c| c.id() == id) {
            return Some(AnyObject::Circle(self.circles.remove(i)));
        }
        None
    }

    /// Current objects in z-order (sprites, then circles).
    ///
    /// Rebuilt from the buckets on every call; iterate in reverse for
    /// topmost-first.
    pub fn visible_set(&self) -> impl DoubleEndedIterator<Item = SceneObjectRef<'_>> + '_ {
        self.sprites
            .iter()
            .map(SceneObjectRef::Sprite)
            .chain(self.circles.iter().map(SceneObjectRef::Circle))
    }

    /// Advances every sprite's animation. Circles are static.
    pub fn update(&mut self, delta_ms: f32) {
        for sprite in &mut self.sprites {
            sprite.update(delta_ms);
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<SceneObjectRef<'_>> {
        self.visible_set().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<SceneObjectMut<'_>> {
        if let Some(s) = self.sprites.iter_mut().find(|s| s.id() == id) {
            return Some(SceneObjectMut::Sprite(s));
        }
        self.circles
            .iter_mut()
            .find(|c| c.id() == id)
            .map(SceneObjectMut::Circle)
    }

    pub fn sprites(&self) -> &[AnimatedSprite] {
        &self.sprites
    }

    pub fn circles(&self) -> &[GradientCircle] {
        &self.circles
    }

    pub fn count(&self) -> usize {
        self.sprites.len() + self.circles.len()
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Drops every object. Handle allocation continues where it was.
    pub fn clear(&mut self) {
        self.sprites.clear();
        self.circles.clear();
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec4};

    use super::*;
    use crate::object::ObjectKind;
    use crate::sprite::SpriteCatalog;

    fn circle(store: &mut SceneStore, x: f32) -> ObjectId {
        let id = store.next_id();
        store.add_circle(GradientCircle::new(id, Vec2::splat(10.0), 0).with_position(Vec4::new(x, 0.0, 0.0, 1.0)))
    }

    fn sprite(store: &mut SceneStore) -> ObjectId {
        let ty = SpriteCatalog::builtin().get("multi_color_block").unwrap();
        let id = store.next_id();
        store.add_sprite(AnimatedSprite::new(id, ty, "FORWARD").unwrap())
    }

    #[test]
    fn visible_set_lists_sprites_before_circles() {
        let mut store = SceneStore::new();
        let c0 = circle(&mut store, 0.0);
        let s0 = sprite(&mut store);
        let c1 = circle(&mut store, 5.0);
        let s1 = sprite(&mut store);

        let order: Vec<ObjectId> = store.visible_set().map(|o| o.id()).collect();
        assert_eq!(order, vec![s0, s1, c0, c1]);

        let kinds: Vec<ObjectKind> = store.visible_set().map(|o| o.kind()).collect();
        assert_eq!(kinds[..2], [ObjectKind::Sprite, ObjectKind::Sprite]);
    }

    #[test]
    fn remove_keeps_order_and_is_idempotent() {
        let mut store = SceneStore::new();
        let a = circle(&mut store, 0.0);
        let b = circle(&mut store, 0.0);
        let c = circle(&mut store, 0.0);

        // Same coordinates everywhere; removal goes by handle only.
        let removed = store.remove(b).expect("present");
        assert_eq!(removed.id(), b);
        assert_eq!(removed.kind(), ObjectKind::Circle);
        assert!(store.remove(b).is_none());

        let order: Vec<ObjectId> = store.visible_set().map(|o| o.id()).collect();
        assert_eq!(order, vec![a, c]);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut store = SceneStore::new();
        let a = circle(&mut store, 0.0);
        store.remove(a);
        store.clear();
        let b = circle(&mut store, 0.0);
        assert_ne!(a, b);
    }

    #[test]
    fn counts_per_bucket() {
        let mut store = SceneStore::new();
        sprite(&mut store);
        circle(&mut store, 0.0);
        circle(&mut store, 1.0);
        assert_eq!((store.count(), store.sprite_count(), store.circle_count()), (3, 1, 2));

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn update_steps_sprites() {
        let mut store = SceneStore::new();
        let id = sprite(&mut store);
        store.update(160.0);

        let Some(SceneObjectRef::Sprite(s)) = store.get(id) else { panic!("sprite missing") };
        assert_eq!(s.animation_frame_index(), 1);
    }

    #[test]
    fn get_mut_moves_the_object() {
        let mut store = SceneStore::new();
        let id = circle(&mut store, 0.0);
        store
            .get_mut(id)
            .unwrap()
            .set_position(Vec4::new(7.0, 8.0, 0.0, 1.0));
        assert_eq!(store.get(id).unwrap().position(), Vec4::new(7.0, 8.0, 0.0, 1.0));
    }
}
