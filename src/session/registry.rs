//! Typed association between source objects and the collision objects made for them.

use crate::mesh::ObjectId;
use hashbrown::HashMap;

/// Which kind of collision object a source owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionKind {
    /// Multi-hull collision from convex decomposition.
    Decomposition,
    /// Single oriented bounding box.
    Obb,
}

/// Collision objects owned by one source object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionLinks {
    pub collision: Option<ObjectId>,
    pub obb: Option<ObjectId>,
}

impl CollisionLinks {
    pub const fn get(&self, kind: CollisionKind) -> Option<ObjectId> {
        match kind {
            CollisionKind::Decomposition => self.collision,
            CollisionKind::Obb => self.obb,
        }
    }

    fn slot(&mut self, kind: CollisionKind) -> &mut Option<ObjectId> {
        match kind {
            CollisionKind::Decomposition => &mut self.collision,
            CollisionKind::Obb => &mut self.obb,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CollisionRegistry {
    links: HashMap<ObjectId, CollisionLinks>,
    outputs: HashMap<ObjectId, (ObjectId, CollisionKind)>,
}

impl CollisionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `output` as the `kind` collision of `source`, returning the
    /// output it replaces, if any.
    pub fn link(
        &mut self,
        source: ObjectId,
        output: ObjectId,
        kind: CollisionKind,
    ) -> Option<ObjectId> {
        let previous = self.links.entry(source).or_default().slot(kind).replace(output);
        if let Some(old) = previous {
            self.outputs.remove(&old);
        }
        self.outputs.insert(output, (source, kind));
        previous
    }

    pub fn links(&self, source: ObjectId) -> Option<&CollisionLinks> {
        self.links.get(&source)
    }

    /// True when `id` was produced by this registry's session as a collision object.
    pub fn is_collision_output(&self, id: ObjectId) -> bool {
        self.outputs.contains_key(&id)
    }

    pub fn source_of(&self, output: ObjectId) -> Option<(ObjectId, CollisionKind)> {
        self.outputs.get(&output).copied()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relinking_replaces_output() {
        let mut registry = CollisionRegistry::new();
        let source = ObjectId(1);
        assert_eq!(registry.link(source, ObjectId(10), CollisionKind::Obb), None);
        assert_eq!(
            registry.link(source, ObjectId(11), CollisionKind::Obb),
            Some(ObjectId(10))
        );
        assert!(!registry.is_collision_output(ObjectId(10)));
        assert_eq!(
            registry.source_of(ObjectId(11)),
            Some((source, CollisionKind::Obb))
        );
        assert_eq!(registry.links(source).and_then(|l| l.collision), None);
    }
}
