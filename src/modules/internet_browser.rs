//! Internet browser module
//!
//! Launches and exits the user's browser and opens search or site tabs in it.
//! The browser command comes from the `internet_browser` settings value and may
//! carry arguments (`"flatpak run org.mozilla.firefox"`).

use crate::config::{Settings, INTERNET_BROWSER_KEY};
use crate::module::{Module, ModuleInfo, VerbTable};
use std::process::{Child, Command, Stdio};
use tracing::{debug, info, warn};

pub const NAME: &str = "InternetBrowser";

const SEARCH_URL: &str = "https://www.google.ca/#q=";

/// Google search URL for `query`
pub fn search_url(query: &str) -> String {
    format!("{}{}", SEARCH_URL, urlencoding::encode(query.trim()))
}

/// Direct site URL for a spoken site name (`"reddit.com"` → `"www.reddit.com"`)
pub fn site_url(site: &str) -> String {
    format!("www.{}", site.split_whitespace().collect::<String>())
}

/// Controls a browser process owned by this module
pub struct InternetBrowser {
    verbs: VerbTable<InternetBrowser>,
    /// Browser launched by `internet`; absent until launched
    process: Option<Child>,
}

impl Default for InternetBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl InternetBrowser {
    pub fn new() -> Self {
        Self {
            verbs: VerbTable::<Self>::new()
                .on("internet", Self::toggle)
                .on("google", Self::search_internet)
                .on("browse", Self::browse_site),
            process: None,
        }
    }

    /// Whether a launched browser is still running.
    ///
    /// A browser that exited on its own is forgotten here.
    pub fn is_active(&mut self) -> bool {
        let Some(child) = self.process.as_mut() else {
            return false;
        };

        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                info!("🌐 Browser exited on its own ({})", status);
                self.process = None;
                false
            }
            Err(e) => {
                warn!("⚠️ Could not query browser process: {}", e);
                self.process = None;
                false
            }
        }
    }

    /// `internet`: launch the browser, or exit it when already running
    fn toggle(&mut self, settings: &Settings, _noun: &str) -> bool {
        if self.is_active() {
            self.exit_browser()
        } else {
            self.launch_browser(settings)
        }
    }

    /// `google`: open a search tab for `query`
    fn search_internet(&mut self, settings: &Settings, query: &str) -> bool {
        if query.trim().is_empty() {
            warn!("⚠️ Nothing to search for");
            return false;
        }
        self.open_tab(settings, &search_url(query))
    }

    /// `browse`: open a tab on the site named by `site`
    fn browse_site(&mut self, settings: &Settings, site: &str) -> bool {
        if site.trim().is_empty() {
            warn!("⚠️ No site to browse to");
            return false;
        }
        self.open_tab(settings, &site_url(site))
    }

    fn launch_browser(&mut self, settings: &Settings) -> bool {
        let Some(mut command) = browser_command(settings) else {
            return false;
        };

        match command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => {
                info!("🌐 Browser launched (pid {})", child.id());
                self.process = Some(child);
                true
            }
            Err(e) => {
                warn!("❌ Could not launch browser: {}", e);
                false
            }
        }
    }

    fn exit_browser(&mut self) -> bool {
        let Some(mut child) = self.process.take() else {
            return false;
        };

        // kill() fails if the process already exited; wait() reaps it either way
        if let Err(e) = child.kill() {
            debug!("Browser kill: {}", e);
        }
        match child.wait() {
            Ok(status) => {
                info!("🌐 Browser exited ({})", status);
                true
            }
            Err(e) => {
                warn!("⚠️ Could not reap browser process: {}", e);
                false
            }
        }
    }

    /// Hand `url` to the running browser, which opens it in a new tab
    fn open_tab(&mut self, settings: &Settings, url: &str) -> bool {
        if !self.is_active() {
            warn!("⚠️ Browser is not running, say 'internet' first");
            return false;
        }
        let Some(mut command) = browser_command(settings) else {
            return false;
        };

        match command
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(mut helper) => {
                info!("🌐 Opening {}", url);
                // The helper hands the URL over to the running instance and exits
                std::thread::spawn(move || {
                    let _ = helper.wait();
                });
                true
            }
            Err(e) => {
                warn!("❌ Could not open {}: {}", url, e);
                false
            }
        }
    }
}

/// Command for the configured browser, `None` (logged) when not configured
fn browser_command(settings: &Settings) -> Option<Command> {
    let Some(value) = settings.module_value(INTERNET_BROWSER_KEY) else {
        warn!(
            "⚠️ No browser configured (settings key '{}')",
            INTERNET_BROWSER_KEY
        );
        return None;
    };

    let mut parts = value.split_whitespace();
    let mut command = Command::new(parts.next()?);
    command.args(parts);
    Some(command)
}

impl Module for InternetBrowser {
    fn identify(&self) -> ModuleInfo {
        ModuleInfo {
            name: NAME.to_string(),
            verbs: self.verbs.verbs(),
        }
    }

    fn run(&mut self, settings: &Settings, verb: &str, noun: &str) -> bool {
        match self.verbs.get(verb) {
            Some(handler) => handler(self, settings, noun),
            None => {
                warn!("⚠️ {} has no verb '{}'", NAME, verb);
                false
            }
        }
    }
}
