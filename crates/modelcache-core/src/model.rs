//! Model kind and model instance definitions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of entity model kinds a client knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Player-shaped model, also the default for anything unrecognised
    Humanoid,
    Chicken,
    Creeper,
    Pig,
    Sheep,
    Skeleton,
    Spider,
    Zombie,
    /// Generic model for entities that look like a block
    Block,
}

impl ModelKind {
    /// Every kind, in declaration order
    pub const ALL: [ModelKind; 9] = [
        ModelKind::Humanoid,
        ModelKind::Chicken,
        ModelKind::Creeper,
        ModelKind::Pig,
        ModelKind::Sheep,
        ModelKind::Skeleton,
        ModelKind::Spider,
        ModelKind::Zombie,
        ModelKind::Block,
    ];

    /// Kind used when a requested name cannot be resolved
    pub const FALLBACK: ModelKind = ModelKind::Humanoid;

    /// Canonical name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Humanoid => "humanoid",
            ModelKind::Chicken => "chicken",
            ModelKind::Creeper => "creeper",
            ModelKind::Pig => "pig",
            ModelKind::Sheep => "sheep",
            ModelKind::Skeleton => "skeleton",
            ModelKind::Spider => "spider",
            ModelKind::Zombie => "zombie",
            ModelKind::Block => "block",
        }
    }

    /// Whether this is the fallback kind
    pub fn is_fallback(&self) -> bool {
        *self == Self::FALLBACK
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A renderable model instance
///
/// Instances own whatever render resources they allocated when built and give
/// them back in `dispose`. The cache calls `dispose` exactly once per instance.
pub trait Model {
    /// Identifier assigned when the instance was built
    fn id(&self) -> Uuid;

    /// Kind of entity this model draws
    fn kind(&self) -> ModelKind;

    /// Release the render resources held by this instance
    fn dispose(&mut self);

    /// Whether `dispose` has already run
    fn is_disposed(&self) -> bool;
}

impl std::fmt::Debug for dyn Model + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id())
            .field("kind", &self.kind())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
        }
        assert_eq!(ModelKind::Block.as_str(), "block");
        assert_eq!(ModelKind::Skeleton.as_str(), "skeleton");
    }

    #[test]
    fn test_fallback_kind() {
        assert!(ModelKind::Humanoid.is_fallback());
        assert!(!ModelKind::Block.is_fallback());
        assert_eq!(ModelKind::FALLBACK.to_string(), "humanoid");
    }

    #[test]
    fn test_kind_serde() {
        let json = serde_json::to_string(&ModelKind::Skeleton).unwrap();
        assert_eq!(json, "\"skeleton\"");
        let kind: ModelKind = serde_json::from_str("\"creeper\"").unwrap();
        assert_eq!(kind, ModelKind::Creeper);
    }
}
