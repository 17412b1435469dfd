#![allow(dead_code)]

pub mod mock_listener;
pub mod mock_player;

use mock_listener::MockListener;
use mock_player::MockPlayer;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use unison::brain::Brain;
use unison::config::{Cue, Settings};
use unison::feedback::Feedback;
use unison::module::{Module, ModuleInfo};
use unison::switch::Switch;

pub const SUCCESS_CUE: &str = "/cues/beep.mp3";
pub const FAILURE_CUE: &str = "/cues/d_beep.mp3";

/// Settings with recognisable cue paths and no audit log
pub fn test_settings() -> Settings {
    Settings {
        keyword: "computer".to_string(),
        success_cue: Cue {
            audio: Some(PathBuf::from(SUCCESS_CUE)),
            visual: String::new(),
        },
        failure_cue: Cue {
            audio: Some(PathBuf::from(FAILURE_CUE)),
            visual: String::new(),
        },
        audit_log: None,
        ..Settings::default()
    }
}

/// Invocations seen by a `ScriptedModule`: (verb, noun)
pub type Calls = Arc<Mutex<Vec<(String, String)>>>;

/// Module answering fixed verbs with a fixed result
pub struct ScriptedModule {
    pub name: &'static str,
    pub verbs: &'static [&'static str],
    pub result: bool,
    pub calls: Calls,
}

impl ScriptedModule {
    pub fn new(name: &'static str, verbs: &'static [&'static str], result: bool) -> Self {
        Self {
            name,
            verbs,
            result,
            calls: Arc::default(),
        }
    }
}

impl Module for ScriptedModule {
    fn identify(&self) -> ModuleInfo {
        ModuleInfo {
            name: self.name.to_string(),
            verbs: self.verbs.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn run(&mut self, _settings: &Settings, verb: &str, noun: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push((verb.to_string(), noun.to_string()));
        self.result
    }
}

/// A brain wired to mocks, plus handles to inspect them
pub struct TestContext {
    pub brain: Brain,
    pub played: Arc<Mutex<Vec<PathBuf>>>,
}

impl TestContext {
    pub fn new(settings: Settings, listener: MockListener, modules: Vec<Box<dyn Module>>) -> Self {
        Self::with_player(settings, listener, modules, MockPlayer::new())
    }

    pub fn with_player(
        settings: Settings,
        listener: MockListener,
        modules: Vec<Box<dyn Module>>,
        player: MockPlayer,
    ) -> Self {
        let settings = Arc::new(settings);
        let played = player.played.clone();
        let switch =
            Switch::with_modules(settings.clone(), modules).expect("Failed to register modules");
        let brain = Brain::new(
            settings,
            Box::new(listener),
            Feedback::new(Arc::new(player)),
            switch,
        );
        Self { brain, played }
    }

    pub fn count(&self, cue: &str) -> usize {
        self.played
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_path() == Path::new(cue))
            .count()
    }

    pub fn clear_played(&self) {
        self.played.lock().unwrap().clear();
    }
}
