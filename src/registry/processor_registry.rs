// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Process-wide registry of custom processor factories and live instances.
//!
//! Implementations register a constructor under a string identifier at startup.
//! Stages resolve identifiers to instances; the first resolution of an identifier
//! constructs and initializes the processor, every later one gets the same
//! instance back.
//!
//! # Locking
//!
//! Instances live in per-identifier slots. Each slot holds a `OnceCell`, so at most
//! one thread constructs a given identifier while racing resolvers of the same
//! identifier wait for it. The slot map itself is behind an `RwLock`: cached
//! lookups only take the read lock, and the write lock is held just long enough to
//! insert or remove a slot, never while a processor is being constructed. Work on
//! different identifiers therefore never waits on another identifier's construction.
//!
//! A failed construction leaves the slot empty and, once no resolver holds it,
//! removes it, so the next resolution simply tries again. A factory or
//! `initialize` that panics counts as a failed construction: the panic surfaces as
//! a `LoadError` or `InitError` and the resolver's claim on the slot is given back.
//!
//! # Ownership
//!
//! Every successful `resolve` counts as one owner and must be paired with a
//! `release`. When the last owner releases, the instance is evicted and its
//! `cleanup` runs exactly once. `shutdown` cleans up whatever is still cached.
//!
//! Eviction happens under the map lock but `cleanup` runs after it is dropped, so
//! a slow cleanup never stalls other identifiers. A `resolve` that races the final
//! `release` of an identifier may therefore construct and initialize a fresh
//! instance while the evicted one is still in its `cleanup`. Processors that hold
//! an exclusive external resource must tolerate that overlap.

use once_cell::sync::{Lazy, OnceCell};
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Instant;

use crate::backends::local::LocalProcessorFactory;
use crate::config::ProcessorConfig;
use crate::errors::{InitError, LoadError, StageError};
use crate::observability::messages::registry::{
    FactoryRegistered, ProcessorCleanedUp, ProcessorConfigIgnored, ProcessorConstructed,
    ProcessorReleased, ProcessorResolutionFailed, ProcessorReused,
};
use crate::observability::messages::StructuredLog;
use crate::registry::ProcessorInstance;
use crate::traits::CustomProcessor;

/// Constructor registered under a processor identifier.
pub type ProcessorFactory =
    Arc<dyn Fn() -> Result<Box<dyn CustomProcessor>, LoadError> + Send + Sync>;

#[derive(Default)]
struct Slot {
    cell: OnceCell<Arc<ProcessorInstance>>,
    owners: AtomicUsize,
}

impl Slot {
    fn holds(&self, instance: &Arc<ProcessorInstance>) -> bool {
        self.cell
            .get()
            .map_or(false, |cached| Arc::ptr_eq(cached, instance))
    }
}

pub struct ProcessorRegistry {
    factories: RwLock<HashMap<String, ProcessorFactory>>,
    slots: RwLock<HashMap<String, Arc<Slot>>>,
    constructions: Mutex<HashMap<String, usize>>,
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessorRegistry {
    /// Create an empty registry with no factories.
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
            slots: RwLock::new(HashMap::new()),
            constructions: Mutex::new(HashMap::new()),
        }
    }

    /// Create a registry with every built-in processor registered.
    pub fn with_builtin_processors() -> Arc<Self> {
        let registry = Arc::new(Self::new());
        LocalProcessorFactory::register_all(&registry);
        registry
    }

    /// Register a constructor under `identifier`, replacing any previous one.
    ///
    /// Instances already constructed from a replaced factory stay cached until released.
    pub fn register<F>(&self, identifier: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn CustomProcessor>, LoadError> + Send + Sync + 'static,
    {
        let identifier = identifier.into();
        let replaced = self
            .factories
            .write()
            .expect("processor registry poisoned")
            .insert(identifier.clone(), Arc::new(factory))
            .is_some();

        FactoryRegistered {
            identifier: &identifier,
            replaced,
        }
        .log();
    }

    pub fn is_registered(&self, identifier: &str) -> bool {
        self.factories
            .read()
            .expect("processor registry poisoned")
            .contains_key(identifier)
    }

    /// All registered identifiers, sorted.
    pub fn registered_identifiers(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self
            .factories
            .read()
            .expect("processor registry poisoned")
            .keys()
            .cloned()
            .collect();
        identifiers.sort();
        identifiers
    }

    /// Resolve `identifier` to its shared instance, constructing and initializing
    /// it with `config` if no live instance exists.
    ///
    /// Later resolvers get the existing instance; their `config` is not applied.
    /// Each success must be paired with a [`release`](Self::release).
    ///
    /// # Errors
    /// * `LoadError` - no factory is registered, or the factory failed
    /// * `InitError` - the processor rejected `config`
    pub fn resolve(
        &self,
        identifier: &str,
        config: &ProcessorConfig,
    ) -> Result<Arc<ProcessorInstance>, StageError> {
        let claim = self.claim_slot(identifier);
        let mut constructed = false;

        let outcome = claim
            .slot
            .cell
            .get_or_try_init(|| {
                constructed = true;
                self.construct(identifier, config)
            })
            .map(Arc::clone);

        match outcome {
            Ok(instance) => {
                if !constructed {
                    if instance.init_config() != config {
                        ProcessorConfigIgnored { identifier }.log();
                    }
                    ProcessorReused {
                        identifier,
                        owners: claim.slot.owners.load(Ordering::SeqCst),
                    }
                    .log();
                }
                claim.keep();
                Ok(instance)
            }
            Err(error) => {
                drop(claim);
                ProcessorResolutionFailed {
                    identifier,
                    error: &error,
                }
                .log();
                Err(error)
            }
        }
    }

    /// Give up one ownership of `instance`.
    ///
    /// The last release evicts the instance and runs its cleanup. Releasing an
    /// instance that is no longer cached (already evicted or shut down) does nothing.
    pub fn release(&self, instance: &Arc<ProcessorInstance>) {
        let identifier = instance.identifier();

        let evicted = {
            let mut slots = self.slots.write().expect("processor registry poisoned");
            let remaining = match slots.get(identifier) {
                Some(slot) if slot.holds(instance) => {
                    let previous = slot.owners.fetch_sub(1, Ordering::SeqCst);
                    previous.saturating_sub(1)
                }
                _ => return,
            };

            ProcessorReleased {
                identifier,
                remaining_owners: remaining,
            }
            .log();

            if remaining == 0 {
                slots.remove(identifier);
                true
            } else {
                false
            }
        };

        if evicted && instance.cleanup() {
            ProcessorCleanedUp {
                identifier,
                processor_name: instance.name(),
            }
            .log();
        }
    }

    /// Clean up and evict every cached instance. Returns how many were cleaned up.
    pub fn shutdown(&self) -> usize {
        let drained: Vec<Arc<Slot>> = {
            let mut slots = self.slots.write().expect("processor registry poisoned");
            slots.drain().map(|(_, slot)| slot).collect()
        };

        let mut cleaned = 0;
        for slot in drained {
            if let Some(instance) = slot.cell.get() {
                if instance.cleanup() {
                    ProcessorCleanedUp {
                        identifier: instance.identifier(),
                        processor_name: instance.name(),
                    }
                    .log();
                    cleaned += 1;
                }
            }
        }
        cleaned
    }

    /// Identifiers with a live instance, sorted.
    pub fn cached_identifiers(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self
            .slots
            .read()
            .expect("processor registry poisoned")
            .iter()
            .filter(|(_, slot)| slot.cell.get().is_some())
            .map(|(identifier, _)| identifier.clone())
            .collect();
        identifiers.sort();
        identifiers
    }

    /// Current owners of the live instance for `identifier` (0 if none).
    pub fn owner_count(&self, identifier: &str) -> usize {
        self.slots
            .read()
            .expect("processor registry poisoned")
            .get(identifier)
            .filter(|slot| slot.cell.get().is_some())
            .map_or(0, |slot| slot.owners.load(Ordering::SeqCst))
    }

    /// How many times a processor has been successfully constructed for `identifier`.
    pub fn construction_count(&self, identifier: &str) -> usize {
        self.constructions
            .lock()
            .expect("processor registry poisoned")
            .get(identifier)
            .copied()
            .unwrap_or(0)
    }

    /// Find or create the slot for `identifier` and count the caller as an owner.
    ///
    /// The owner count is bumped while a map lock is held so a concurrent final
    /// `release` cannot evict the slot in between. The claim is given back when it
    /// drops unless the resolution kept it.
    fn claim_slot<'a>(&'a self, identifier: &'a str) -> SlotClaim<'a> {
        let slot = {
            let slots = self.slots.read().expect("processor registry poisoned");
            slots.get(identifier).map(|slot| {
                slot.owners.fetch_add(1, Ordering::SeqCst);
                Arc::clone(slot)
            })
        };

        let slot = slot.unwrap_or_else(|| {
            let mut slots = self.slots.write().expect("processor registry poisoned");
            let slot = slots.entry(identifier.to_string()).or_default();
            slot.owners.fetch_add(1, Ordering::SeqCst);
            Arc::clone(slot)
        });

        SlotClaim {
            registry: self,
            identifier,
            slot,
            kept: false,
        }
    }

    /// Undo `claim_slot` after a failed resolution.
    fn abandon_slot(&self, identifier: &str, slot: &Arc<Slot>) {
        let mut slots = self.slots.write().expect("processor registry poisoned");
        let previous = slot.owners.fetch_sub(1, Ordering::SeqCst);
        let is_current = slots
            .get(identifier)
            .map_or(false, |current| Arc::ptr_eq(current, slot));

        if previous <= 1 && is_current && slot.cell.get().is_none() {
            slots.remove(identifier);
        }
    }

    fn construct(
        &self,
        identifier: &str,
        config: &ProcessorConfig,
    ) -> Result<Arc<ProcessorInstance>, StageError> {
        let factory = self
            .factories
            .read()
            .expect("processor registry poisoned")
            .get(identifier)
            .cloned()
            .ok_or_else(|| LoadError::NotRegistered(identifier.to_string()))?;

        let started = Instant::now();
        let mut processor = panic::catch_unwind(AssertUnwindSafe(|| factory())).map_err(
            |payload| LoadError::ConstructionFailed {
                identifier: identifier.to_string(),
                reason: panic_reason(&*payload),
            },
        )??;
        *self
            .constructions
            .lock()
            .expect("processor registry poisoned")
            .entry(identifier.to_string())
            .or_insert(0) += 1;

        let name = processor.name();
        panic::catch_unwind(AssertUnwindSafe(|| processor.initialize(config)))
            .map_err(|payload| InitError::new(name, panic_reason(&*payload)))??;

        let instance = Arc::new(ProcessorInstance::new(
            identifier,
            processor,
            config.clone(),
        ));

        ProcessorConstructed {
            identifier,
            processor_name: instance.name(),
            duration: started.elapsed(),
        }
        .log();

        Ok(instance)
    }
}

/// An owner counted on a slot by `claim_slot`, given back on drop unless kept.
struct SlotClaim<'a> {
    registry: &'a ProcessorRegistry,
    identifier: &'a str,
    slot: Arc<Slot>,
    kept: bool,
}

impl SlotClaim<'_> {
    fn keep(mut self) {
        self.kept = true;
    }
}

impl Drop for SlotClaim<'_> {
    fn drop(&mut self) {
        if !self.kept {
            self.registry.abandon_slot(self.identifier, &self.slot);
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    let message = payload
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned());
    match message {
        Some(message) => format!("processor panicked: {}", message),
        None => "processor panicked".to_string(),
    }
}

/// Accessor for the process-wide processor registry, pre-loaded with the built-ins.
pub fn global() -> &'static Arc<ProcessorRegistry> {
    static REGISTRY: Lazy<Arc<ProcessorRegistry>> =
        Lazy::new(ProcessorRegistry::with_builtin_processors);
    &REGISTRY
}
