use glam::{Mat4, Vec3};

use crate::graph::NodeId;

/// A rotation/translation pair placed relative to an optional parent node.
///
/// Local-to-parent is `rotation * translation`: the node is first pushed out
/// along its translation, then swung around the parent's origin. Orbits fall
/// out of this ordering for free.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformNode {
    translation: Mat4,
    rotation: Mat4,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl TransformNode {
    /// Create an unattached node at `translation` with no rotation.
    pub fn new(translation: Vec3) -> Self {
        Self {
            translation: Mat4::from_translation(translation),
            rotation: Mat4::IDENTITY,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Local-to-parent matrix.
    pub fn compose_to_parent(&self) -> Mat4 {
        self.rotation * self.translation
    }

    /// Left-multiply `delta` onto the rotation accumulator.
    pub fn accumulate_rotation(&mut self, delta: Mat4) {
        self.rotation = delta * self.rotation;
    }

    /// Left-multiply a translation by `delta` onto the stored translation.
    pub fn translate_by_delta(&mut self, delta: Vec3) {
        self.translation = Mat4::from_translation(delta) * self.translation;
    }

    pub fn translation(&self) -> Mat4 {
        self.translation
    }

    pub fn rotation(&self) -> Mat4 {
        self.rotation
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
