// SPDX-License-Identifier: MPL-2.0
//! Keyboard ownership arbitration for scrub controls and the lightbox.
//!
//! Several scrub-control instances and the lightbox viewer can be alive at
//! once, but a global arrow chord must be processed by exactly one of them.
//! The registry is an explicit object owned by `App` and threaded through
//! component construction — no static mutable state — so tests construct
//! their own and reset deterministically.
//!
//! Direct interaction with a control's own widget surface never goes through
//! the registry; arbitration applies only to the global key listener.

/// Opaque handle identifying a registered instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(u64);

impl HandleId {
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Navigation keys recognized by the global dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
}

/// A global key chord: a navigation key, optionally modified (Ctrl/Cmd).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chord {
    pub key: NavKey,
    pub modified: bool,
}

/// Which chords an instance watches. Scrub controls watch the modified
/// chord; the lightbox watches the plain one. The scopes are disjoint, so
/// both kinds of instance coexist without interfering regardless of
/// ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordScope {
    Plain,
    Modified,
}

impl ChordScope {
    #[must_use]
    pub fn watches(self, chord: Chord) -> bool {
        match self {
            ChordScope::Plain => !chord.modified,
            ChordScope::Modified => chord.modified,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    id: HandleId,
    scope: ChordScope,
}

/// Registry of live instances, in registration order, with one active owner.
#[derive(Debug, Default)]
pub struct OwnershipRegistry {
    entries: Vec<Entry>,
    active: Option<HandleId>,
    next_id: u64,
}

impl OwnershipRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new instance and makes it the active owner — the control
    /// that just mounted is the one the user is interacting with.
    pub fn register(&mut self, scope: ChordScope) -> HandleId {
        let id = HandleId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, scope });
        self.active = Some(id);
        id
    }

    /// Removes an instance. If it was active, the most recently registered
    /// survivor is promoted (or no one, when the registry empties).
    pub fn deregister(&mut self, handle: HandleId) {
        self.entries.retain(|entry| entry.id != handle);
        if self.active == Some(handle) {
            self.active = self.entries.last().map(|entry| entry.id);
        }
    }

    /// Explicit ownership transfer on direct interaction (click/focus).
    /// Unconditional among registered handles, regardless of order.
    pub fn claim(&mut self, handle: HandleId) {
        if self.is_registered(handle) {
            self.active = Some(handle);
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<HandleId> {
        self.active
    }

    #[must_use]
    pub fn is_registered(&self, handle: HandleId) -> bool {
        self.entries.iter().any(|entry| entry.id == handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves which instance processes a global chord: exactly one, or
    /// none.
    ///
    /// While an editable element is focused no one processes navigation
    /// chords — typing must not be hijacked. Otherwise the active owner
    /// handles the chord when its scope watches it; if the owner watches a
    /// disjoint scope, the most recently registered instance watching this
    /// chord handles it instead.
    #[must_use]
    pub fn route(&self, chord: Chord, editing: bool) -> Option<HandleId> {
        if editing {
            return None;
        }
        let watchers: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|entry| entry.scope.watches(chord))
            .collect();
        if let Some(active) = self.active {
            if watchers.iter().any(|entry| entry.id == active) {
                return Some(active);
            }
        }
        watchers.last().map(|entry| entry.id)
    }
}
