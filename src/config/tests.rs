use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_spindle_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SPINDLE_CONFIG_PATH", "/tmp/spindle-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/spindle-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("spindle")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("spindle")
            .join("config.toml")
    );
}

#[test]
fn defaults_are_valid() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.controls.quit, vec!["q".to_string()]);
    assert_eq!(s.controls.toggle, vec!["space".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
}

#[test]
fn settings_load_from_explicit_config_file() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("SPINDLE__AUDIO__VOLUME");

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
volume = 0.5
volume_step = 0.25
tick_ms = 20

[controls]
quit = ["x", "esc"]
next = ["l"]
event_capacity = 8

[library]
extensions = ["mp3"]
recursive = true
include_hidden = true
follow_links = false
display_fields = ["filename"]
display_separator = "::"

[log]
level = "debug"
"#,
    )
    .unwrap();

    let s = Settings::load(Some(&cfg_path)).unwrap();
    assert_eq!(s.audio.volume, 0.5);
    assert_eq!(s.audio.volume_step, 0.25);
    assert_eq!(s.audio.tick_ms, 20);
    assert_eq!(s.controls.quit, vec!["x".to_string(), "esc".to_string()]);
    assert_eq!(s.controls.next, vec!["l".to_string()]);
    // Unset keys keep their defaults.
    assert_eq!(s.controls.toggle, vec!["space".to_string()]);
    assert_eq!(s.controls.event_capacity, 8);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.display_separator, "::");
    assert!(matches!(s.library.display_fields[0], TrackDisplayField::Filename));
    assert_eq!(s.log.level, "debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_missing_explicit_config_file_is_an_error() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(Settings::load(Some(&missing)).is_err());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
tick_ms = 25
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SPINDLE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SPINDLE__AUDIO__TICK_MS", "5");

    let s = Settings::load(None).unwrap();
    assert_eq!(s.audio.tick_ms, 5);
}

#[test]
fn schema_parses_plain_toml() {
    let s: Settings = toml::from_str(
        r#"
[controls]
stop = ["S"]
"#,
    )
    .unwrap();
    assert_eq!(s.controls.stop, vec!["S".to_string()]);
    assert_eq!(s.audio.tick_ms, AudioSettings::default().tick_ms);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.audio.volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume_step = 0.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.event_capacity = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.log.level = "chatty".into();
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_unknown_key_names() {
    let mut s = Settings::default();
    s.controls.next = vec!["pagedown-ish".into()];
    let err = s.validate().unwrap_err();
    assert!(err.contains("controls.next"), "{err}");
}

#[test]
fn validate_rejects_keys_bound_to_two_actions() {
    let mut s = Settings::default();
    s.controls.stop = vec!["n".into()];
    let err = s.validate().unwrap_err();
    assert!(err.contains("controls.next"), "{err}");
    assert!(err.contains("controls.stop"), "{err}");
}
