//! Headless rendering backend
//!
//! Models built here hold one mesh handle each against a `HeadlessContext`,
//! which only keeps count of what is live. Used by the CLI and by tests that
//! need to observe allocation and release without a window.

use modelcache_core::{Model, ModelCacheError, ModelCacheResult, ModelKind};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::debug;
use uuid::Uuid;

use crate::traits::ModelFactory;

#[derive(Debug, Default)]
struct Ledger {
    next_id: u32,
    live: HashSet<u32>,
    allocated: u64,
    released: u64,
}

/// Render context that tracks resource handles instead of talking to a GPU
///
/// Clones share the same ledger.
#[derive(Debug, Clone, Default)]
pub struct HeadlessContext {
    ledger: Rc<RefCell<Ledger>>,
    /// Maximum number of simultaneously live handles
    capacity: Option<usize>,
}

impl HeadlessContext {
    /// Create a context with no handle limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context that refuses allocations past `capacity` live handles
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ledger: Rc::default(),
            capacity: Some(capacity),
        }
    }

    /// Allocate a resource handle
    pub fn allocate(&self, label: impl Into<String>) -> ModelCacheResult<ResourceHandle> {
        let label = label.into();
        let mut ledger = self.ledger.borrow_mut();

        if let Some(capacity) = self.capacity {
            if ledger.live.len() >= capacity {
                return Err(ModelCacheError::Render(format!(
                    "Out of resource handles allocating {}: {} live, capacity {}",
                    label,
                    ledger.live.len(),
                    capacity
                )));
            }
        }

        let id = ledger.next_id;
        ledger.next_id += 1;
        ledger.live.insert(id);
        ledger.allocated += 1;

        debug!(handle = id, label = %label, "Allocated resource handle");

        Ok(ResourceHandle {
            id,
            label,
            ledger: Rc::clone(&self.ledger),
        })
    }

    /// Number of handles currently live
    pub fn live_count(&self) -> usize {
        self.ledger.borrow().live.len()
    }

    /// Total number of handles ever allocated
    pub fn allocated_count(&self) -> u64 {
        self.ledger.borrow().allocated
    }

    /// Total number of handles released
    pub fn released_count(&self) -> u64 {
        self.ledger.borrow().released
    }
}

/// A live resource owned by a model
#[derive(Debug)]
pub struct ResourceHandle {
    id: u32,
    label: String,
    ledger: Rc<RefCell<Ledger>>,
}

impl ResourceHandle {
    /// Handle identifier, unique within its context
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Label given at allocation
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Give the handle back to its context
    pub fn release(self) {
        let mut ledger = self.ledger.borrow_mut();
        if ledger.live.remove(&self.id) {
            ledger.released += 1;
            debug!(handle = self.id, label = %self.label, "Released resource handle");
        }
    }
}

/// Model holding a single mesh handle
#[derive(Debug)]
pub struct HeadlessModel {
    id: Uuid,
    kind: ModelKind,
    mesh: Option<ResourceHandle>,
}

impl HeadlessModel {
    /// Build a model of `kind`, allocating its mesh from `context`
    pub fn new(kind: ModelKind, context: &HeadlessContext) -> ModelCacheResult<Self> {
        let mesh = context
            .allocate(format!("{}-mesh", kind))
            .map_err(|e| ModelCacheError::construction(kind, e.to_string()))?;

        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            mesh: Some(mesh),
        })
    }

    /// Mesh handle, if not yet disposed
    pub fn mesh(&self) -> Option<&ResourceHandle> {
        self.mesh.as_ref()
    }
}

impl Model for HeadlessModel {
    fn id(&self) -> Uuid {
        self.id
    }

    fn kind(&self) -> ModelKind {
        self.kind
    }

    fn dispose(&mut self) {
        if let Some(mesh) = self.mesh.take() {
            mesh.release();
        }
    }

    fn is_disposed(&self) -> bool {
        self.mesh.is_none()
    }
}

/// Factory building `HeadlessModel`s
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessFactory;

impl HeadlessFactory {
    /// Create a new headless factory
    pub fn new() -> Self {
        Self
    }
}

impl ModelFactory for HeadlessFactory {
    type Context = HeadlessContext;

    fn create(
        &self,
        kind: ModelKind,
        context: &HeadlessContext,
    ) -> ModelCacheResult<Box<dyn Model>> {
        let model = HeadlessModel::new(kind, context)?;
        debug!(
            kind = %kind,
            id = %model.id,
            mesh = ?model.mesh().map(ResourceHandle::id),
            "Built headless model"
        );
        Ok(Box::new(model))
    }

    fn name(&self) -> &'static str {
        "headless"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_release() {
        let context = HeadlessContext::new();
        let handle = context.allocate("test").unwrap();
        assert_eq!(handle.label(), "test");
        assert_eq!(context.live_count(), 1);

        handle.release();
        assert_eq!(context.live_count(), 0);
        assert_eq!(context.allocated_count(), 1);
        assert_eq!(context.released_count(), 1);
    }

    #[test]
    fn test_handle_ids_are_unique() {
        let context = HeadlessContext::new();
        let first = HeadlessModel::new(ModelKind::Chicken, &context).unwrap();
        let second = HeadlessModel::new(ModelKind::Chicken, &context).unwrap();

        let first_mesh = first.mesh().unwrap().id();
        let second_mesh = second.mesh().unwrap().id();
        assert_ne!(first_mesh, second_mesh);
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_capacity_exhausted() {
        let context = HeadlessContext::with_capacity(1);
        let _first = context.allocate("first").unwrap();

        let result = context.allocate("second");
        assert!(matches!(result, Err(ModelCacheError::Render(_))));
        assert_eq!(context.allocated_count(), 1);
    }

    #[test]
    fn test_clones_share_ledger() {
        let context = HeadlessContext::new();
        let other = context.clone();
        let _handle = other.allocate("shared").unwrap();
        assert_eq!(context.live_count(), 1);
    }

    #[test]
    fn test_factory_builds_requested_kind() {
        let context = HeadlessContext::new();
        let factory = HeadlessFactory::new();

        let model = factory.create(ModelKind::Spider, &context).unwrap();
        assert_eq!(model.kind(), ModelKind::Spider);
        assert!(!model.is_disposed());
        assert_eq!(context.live_count(), 1);
        assert_eq!(factory.name(), "headless");
    }

    #[test]
    fn test_dispose_releases_mesh_once() {
        let context = HeadlessContext::new();
        let mut model = HeadlessModel::new(ModelKind::Pig, &context).unwrap();
        assert_eq!(model.mesh().unwrap().label(), "pig-mesh");

        model.dispose();
        model.dispose();
        assert!(model.is_disposed());
        assert_eq!(context.released_count(), 1);
        assert_eq!(context.live_count(), 0);
    }

    #[test]
    fn test_failed_allocation_is_construction_error() {
        let context = HeadlessContext::with_capacity(0);
        let result = HeadlessModel::new(ModelKind::Zombie, &context);
        assert!(matches!(
            result,
            Err(ModelCacheError::Construction {
                kind: ModelKind::Zombie,
                ..
            })
        ));
    }
}
