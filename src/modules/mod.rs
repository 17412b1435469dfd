//! Built-in modules

pub mod internet_browser;

pub use internet_browser::InternetBrowser;

use crate::module::Module;

/// Every built-in module, in registration order
pub fn default_modules() -> Vec<Box<dyn Module>> {
    vec![Box::new(InternetBrowser::new())]
}
