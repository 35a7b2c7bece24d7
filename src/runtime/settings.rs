use std::path::Path;

use crate::config;

pub fn load_settings(explicit: Option<&Path>) -> config::Settings {
    // Logging is not up yet, so problems go straight to stderr.
    match config::Settings::load(explicit) {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("spindle: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("spindle: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
