//! Point-to-object queries.

use crate::object::{ObjectId, SceneObjectRef};
use crate::store::SceneStore;

/// Topmost object whose bounds contain `(x, y)`, if any.
///
/// Scans the visible set back to front; the first hit wins.
pub fn pick_at(store: &SceneStore, x: f32, y: f32) -> Option<SceneObjectRef<'_>> {
    store.visible_set().rev().find(|obj| obj.contains(x, y))
}

/// Handle of the topmost object at `(x, y)`.
pub fn pick_id_at(store: &SceneStore, x: f32, y: f32) -> Option<ObjectId> {
    pick_at(store, x, y).map(|obj| obj.id())
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec4};

    use super::*;
    use crate::circle::GradientCircle;
    use crate::sprite::{AnimatedSprite, SpriteCatalog};

    fn add_circle(store: &mut SceneStore, x: f32, y: f32) -> ObjectId {
        let id = store.next_id();
        store.add_circle(GradientCircle::new(id, Vec2::splat(50.0), 0).with_position(Vec4::new(x, y, 0.0, 1.0)))
    }

    #[test]
    fn later_object_wins_overlap() {
        let mut store = SceneStore::new();
        let _a = add_circle(&mut store, 0.0, 0.0);
        let b = add_circle(&mut store, 20.0, 20.0);
        assert_eq!(pick_id_at(&store, 30.0, 30.0), Some(b));
    }

    #[test]
    fn circles_sit_above_sprites() {
        let mut store = SceneStore::new();
        let c = add_circle(&mut store, 0.0, 0.0);

        // Added later, but sprites are below every circle.
        let ty = SpriteCatalog::builtin().get("red_circle_man").unwrap();
        let id = store.next_id();
        let s = store.add_sprite(AnimatedSprite::new(id, ty, "FORWARD").unwrap());

        assert_eq!(pick_id_at(&store, 10.0, 10.0), Some(c));
        assert_eq!(pick_id_at(&store, 80.0, 80.0), Some(s));
    }

    #[test]
    fn empty_space_picks_nothing() {
        let mut store = SceneStore::new();
        assert!(pick_at(&store, 0.0, 0.0).is_none());
        add_circle(&mut store, 0.0, 0.0);
        assert!(pick_at(&store, 50.0, 10.0).is_none());
    }
}
