//! Environments for the CSE machine.
//!
//! Each environment is an immutable snapshot: `create` copies every binding
//! of its base and overlays the new ones, so lookup never walks a parent
//! chain. Frames are reference counted; the store keeps only weak entries
//! for id lookup, and a frame is reclaimed once no stack entry, closure or
//! pending marker holds it.

use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use rpal_ir::{ensure_sufficient_stack, EnvId, Name};

use crate::Value;

/// Number of creations between sweeps of dead weak entries.
const PRUNE_INTERVAL: usize = 256;

struct Frame {
    id: EnvId,
    bindings: FxHashMap<Name, Value>,
}

impl Drop for Frame {
    fn drop(&mut self) {
        // A binding can hold the last reference to a closure whose frame
        // holds the last reference to another closure, and so on.
        let bindings = std::mem::take(&mut self.bindings);
        ensure_sufficient_stack(move || drop(bindings));
    }
}

/// Shared handle to one environment.
#[derive(Clone)]
pub struct Env(Rc<Frame>);

impl Env {
    #[inline]
    pub fn id(&self) -> EnvId {
        self.0.id
    }

    /// Binding of `name` in this environment.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.0.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.bindings.is_empty()
    }
}

impl PartialEq for Env {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bindings can hold closures over other environments; the id is
        // enough to tell frames apart.
        f.debug_tuple("Env").field(&self.0.id).finish()
    }
}

/// Store of every environment a machine has created.
pub struct Environments {
    root: Env,
    next_id: u64,
    frames: FxHashMap<EnvId, Weak<Frame>>,
    since_prune: usize,
}

impl Environments {
    /// A store holding only the empty root environment `e0`.
    pub fn new() -> Self {
        let root = Env(Rc::new(Frame {
            id: EnvId::ROOT,
            bindings: FxHashMap::default(),
        }));
        let mut frames = FxHashMap::default();
        frames.insert(EnvId::ROOT, Rc::downgrade(&root.0));
        Environments {
            root,
            next_id: 1,
            frames,
            since_prune: 0,
        }
    }

    #[inline]
    pub fn root(&self) -> &Env {
        &self.root
    }

    /// Snapshot `base` and overlay `bindings` under a fresh id.
    pub fn create(&mut self, base: &Env, bindings: impl IntoIterator<Item = (Name, Value)>) -> Env {
        let id = EnvId::new(self.next_id);
        self.next_id += 1;

        let mut map = base.0.bindings.clone();
        map.extend(bindings);
        let env = Env(Rc::new(Frame { id, bindings: map }));

        self.frames.insert(id, Rc::downgrade(&env.0));
        self.since_prune += 1;
        if self.since_prune >= PRUNE_INTERVAL {
            self.prune();
        }
        env
    }

    /// The environment with this id, if it is still alive.
    pub fn get(&self, id: EnvId) -> Option<Env> {
        self.frames.get(&id).and_then(Weak::upgrade).map(Env)
    }

    /// Resolve `name` in the environment `id`.
    pub fn lookup(&self, id: EnvId, name: &str) -> Option<Value> {
        self.get(id)?.lookup(name).cloned()
    }

    /// Number of environments still reachable, the root included.
    pub fn live_count(&self) -> usize {
        self.frames
            .values()
            .filter(|frame| frame.strong_count() > 0)
            .count()
    }

    /// Number of environments created so far, the root included.
    pub fn created(&self) -> u64 {
        self.next_id
    }

    fn prune(&mut self) {
        self.frames.retain(|_, frame| frame.strong_count() > 0);
        self.since_prune = 0;
        tracing::trace!(live = self.frames.len(), "pruned environment table");
    }
}

impl Default for Environments {
    fn default() -> Self {
        Self::new()
    }
}
