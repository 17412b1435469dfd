//! Switch
//!
//! Holds every registered module and routes a message to the module owning
//! the first recognised verb.

use crate::config::Settings;
use crate::error::RegistrationError;
use crate::module::Module;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// A message resolved to a verb and its argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Name of the module owning the verb
    pub module: String,
    pub verb: String,
    /// Remainder of the message after the verb, trimmed
    pub noun: String,
}

/// Module registry and verb router
pub struct Switch {
    settings: Arc<Settings>,
    /// Module name → module
    modules: HashMap<String, Box<dyn Module>>,
    /// Verb → owning module name
    verbs: HashMap<String, String>,
}

impl Switch {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            settings,
            modules: HashMap::new(),
            verbs: HashMap::new(),
        }
    }

    /// Build a switch from an explicit module list, failing on the first collision
    pub fn with_modules(
        settings: Arc<Settings>,
        modules: Vec<Box<dyn Module>>,
    ) -> Result<Self, RegistrationError> {
        let mut switch = Self::new(settings);
        for module in modules {
            switch.register(module)?;
        }
        Ok(switch)
    }

    /// Register a module.
    ///
    /// Rejected (registry unchanged) when the name is taken, the verb set is
    /// empty, or any verb is already owned by another module.
    pub fn register(&mut self, module: Box<dyn Module>) -> Result<(), RegistrationError> {
        let info = module.identify();

        if self.modules.contains_key(&info.name) {
            return Err(RegistrationError::DuplicateModule(info.name));
        }
        if info.verbs.is_empty() {
            return Err(RegistrationError::NoVerbs(info.name));
        }
        if let Some((verb, owner)) = info
            .verbs
            .iter()
            .find_map(|v| self.verbs.get(v).map(|owner| (v, owner)))
        {
            return Err(RegistrationError::VerbCollision {
                verb: verb.clone(),
                owner: owner.clone(),
                incoming: info.name,
            });
        }

        for verb in &info.verbs {
            self.verbs.insert(verb.clone(), info.name.clone());
        }
        info!(
            "🧩 Registered module {} ({})",
            info.name,
            info.verbs.iter().cloned().collect::<Vec<_>>().join(", ")
        );
        self.modules.insert(info.name, module);
        Ok(())
    }

    /// Find the first token of `message` that is a registered verb
    pub fn resolve(&self, message: &str) -> Option<Command> {
        for (start, token) in tokens(message) {
            let word = token.trim_matches(|c: char| !c.is_alphanumeric());
            if let Some(owner) = self.verbs.get(word) {
                let noun = message[start + token.len()..].trim();
                return Some(Command {
                    module: owner.clone(),
                    verb: word.to_string(),
                    noun: noun.to_string(),
                });
            }
        }
        None
    }

    /// Route `message` to its module and return the module's result unchanged.
    ///
    /// `false` when no verb matched (a false positive) or the module failed.
    pub fn run(&mut self, message: &str) -> bool {
        let Some(command) = self.resolve(message) else {
            info!("🤷 No module matched: '{}'", message);
            return false;
        };

        let Some(module) = self.modules.get_mut(&command.module) else {
            return false;
        };

        debug!(
            "🎯 {} <- verb '{}', noun '{}'",
            command.module, command.verb, command.noun
        );
        module.run(&self.settings, &command.verb, &command.noun)
    }

    /// Module owning `verb`, if any
    pub fn owner_of(&self, verb: &str) -> Option<&str> {
        self.verbs.get(verb).map(String::as_str)
    }

    /// Registered module names, sorted
    pub fn module_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Whitespace-separated tokens with their byte offsets
fn tokens(message: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut pos = 0;
    std::iter::from_fn(move || {
        let start = pos + message[pos..].find(|c: char| !c.is_whitespace())?;
        let end = message[start..]
            .find(char::is_whitespace)
            .map_or(message.len(), |len| start + len);
        pos = end;
        Some((start, &message[start..end]))
    })
}
