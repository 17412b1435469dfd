//! Module contract
//!
//! Every action handler implements [`Module`]: an identity (name + trigger verbs)
//! and a `run` operation. Concrete modules bind each verb to a handler through a
//! [`VerbTable`] instead of branching on the verb string.

use crate::config::Settings;
use std::collections::{BTreeSet, HashMap};

/// Identity of a module: its unique name and the verbs it answers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    pub name: String,
    pub verbs: BTreeSet<String>,
}

/// Trait for action handlers routed to by the switch
pub trait Module: Send {
    /// Name and verb set, fixed after construction
    fn identify(&self) -> ModuleInfo;

    /// Execute the action bound to `verb` with `noun` as its argument.
    ///
    /// Returns `false` when the verb was recognised but the action could not
    /// complete. Implementations log the cause and never panic or propagate.
    fn run(&mut self, settings: &Settings, verb: &str, noun: &str) -> bool;
}

/// Handler bound to a verb: receives the module, settings and noun
pub type Handler<M> = fn(&mut M, &Settings, &str) -> bool;

/// Verb → handler mapping for a concrete module type
pub struct VerbTable<M> {
    handlers: HashMap<&'static str, Handler<M>>,
}

impl<M> Default for VerbTable<M> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<M> VerbTable<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `verb` to `handler` (builder style)
    pub fn on(mut self, verb: &'static str, handler: Handler<M>) -> Self {
        self.handlers.insert(verb, handler);
        self
    }

    /// Look up the handler for `verb`
    pub fn get(&self, verb: &str) -> Option<Handler<M>> {
        self.handlers.get(verb).copied()
    }

    /// All bound verbs
    pub fn verbs(&self) -> BTreeSet<String> {
        self.handlers.keys().map(|v| v.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<M> std::fmt::Debug for VerbTable<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}
