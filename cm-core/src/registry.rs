//! Process-wide object registry
//!
//! Printer objects (such as the chamber's controller fan) are registered by
//! name so other subsystems can look them up. A name can be taken once; a
//! second registration is a configuration conflict.

use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{ChamberError, Result};

/// A registered object, shared with whoever looks it up
pub type SharedObject = Arc<dyn Any + Send + Sync>;

lazy_static! {
    static ref GLOBAL_REGISTRY: ObjectRegistry = ObjectRegistry::new();
}

/// Name → object map with check-and-insert registration
#[derive(Default)]
pub struct ObjectRegistry {
    objects: RwLock<HashMap<String, SharedObject>>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by the whole process
    pub fn global() -> &'static ObjectRegistry {
        &GLOBAL_REGISTRY
    }

    /// Register `object` under `name`; fails if the name is taken
    pub fn add_object(&self, name: &str, object: SharedObject) -> Result<()> {
        let mut objects = self.objects.write();
        match objects.entry(name.to_string()) {
            Entry::Occupied(_) => Err(ChamberError::DuplicateObject(name.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(object);
                info!("Registered printer object '{}'", name);
                Ok(())
            }
        }
    }

    /// Look up an object and downcast it to `T`
    ///
    /// Returns `None` if the name is unknown or holds a different type.
    pub fn lookup<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        let object = self.objects.read().get(name).cloned()?;
        match object.downcast::<T>() {
            Ok(typed) => Some(typed),
            Err(_) => {
                debug!("Printer object '{}' is not of the requested type", name);
                None
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.read().contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.objects.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Drop every registration
    pub fn clear(&self) {
        self.objects.write().clear();
    }
}

impl std::fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_add_and_lookup() {
        let registry = ObjectRegistry::new();
        registry.add_object("controller_fan", Arc::new(42u32)).unwrap();

        assert!(registry.contains("controller_fan"));
        assert_eq!(registry.lookup::<u32>("controller_fan").as_deref(), Some(&42));
        assert!(registry.lookup::<String>("controller_fan").is_none());
        assert!(registry.lookup::<u32>("heaters").is_none());
    }

    #[test]
    fn test_duplicate_rejected_and_first_kept() {
        let registry = ObjectRegistry::new();
        registry.add_object("controller_fan", Arc::new(1u32)).unwrap();
        let err = registry
            .add_object("controller_fan", Arc::new(2u32))
            .unwrap_err();

        assert!(matches!(err, ChamberError::DuplicateObject(ref name) if name == "controller_fan"));
        assert_eq!(registry.lookup::<u32>("controller_fan").as_deref(), Some(&1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_sorted() {
        let registry = ObjectRegistry::new();
        assert!(registry.is_empty());
        registry.add_object("b", Arc::new(())).unwrap();
        registry.add_object("a", Arc::new(())).unwrap();
        assert_eq!(registry.names(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    #[serial]
    fn test_global_is_shared() {
        ObjectRegistry::global().clear();
        ObjectRegistry::global()
            .add_object("registry_test_object", Arc::new("x"))
            .unwrap();
        assert!(ObjectRegistry::global().contains("registry_test_object"));
        ObjectRegistry::global().clear();
        assert!(!ObjectRegistry::global().contains("registry_test_object"));
    }
}
