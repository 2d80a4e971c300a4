//! Light/dark theme preference.
//!
//! The preference is either an explicit `light`/`dark` override or unset,
//! meaning "follow the system". Toggling always produces an explicit value:
//!
//! ```text
//! Unset ──toggle──▶ opposite of system
//! Light ──toggle──▶ Dark
//! Dark  ──toggle──▶ Light
//! ```
//!
//! Persistence goes through [`PreferenceStore`], a single string slot under
//! the key [`STORAGE_KEY`]. The CLI uses [`FileStore`]; the page script keeps
//! the same key in `localStorage`. A persisted override is baked into
//! generated pages as `data-theme` on the root element.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Storage key of the preference (also the `localStorage` key in pages).
pub const STORAGE_KEY: &str = "theme";

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Toggle icon shown while this theme is active.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "☀️",
            Theme::Dark => "🌙",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single durable string slot.
pub trait PreferenceStore {
    fn get(&self) -> Result<Option<String>, ThemeError>;
    fn set(&self, value: &str) -> Result<(), ThemeError>;
    fn clear(&self) -> Result<(), ThemeError>;
}

/// Preference kept in a small text file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self) -> Result<Option<String>, ThemeError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, value: &str) -> Result<(), ThemeError> {
        std::fs::write(&self.path, format!("{value}\n"))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), ThemeError> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-process store.
#[derive(Default)]
pub struct MemoryStore(Mutex<Option<String>>);

impl MemoryStore {
    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self) -> Result<Option<String>, ThemeError> {
        Ok(self.slot().clone())
    }

    fn set(&self, value: &str) -> Result<(), ThemeError> {
        *self.slot() = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ThemeError> {
        *self.slot() = None;
        Ok(())
    }
}

pub struct ThemeController<S: PreferenceStore> {
    store: S,
    preference: Option<Theme>,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Read the persisted preference. Unrecognized values count as unset.
    pub fn init(store: S) -> Result<Self, ThemeError> {
        let preference = match store.get()? {
            Some(raw) => {
                let parsed = Theme::parse(&raw);
                if parsed.is_none() {
                    log::warn!("ignoring unknown theme preference '{raw}'");
                }
                parsed
            }
            None => None,
        };
        Ok(Self { store, preference })
    }

    /// The explicit override, if any.
    pub fn preference(&self) -> Option<Theme> {
        self.preference
    }

    /// The theme in effect given the system preference.
    pub fn active(&self, system: Theme) -> Theme {
        self.preference.unwrap_or(system)
    }

    /// Switch to the opposite of the active theme, persist it, and return
    /// the icon for the newly active theme.
    pub fn toggle(&mut self, system: Theme) -> Result<&'static str, ThemeError> {
        let next = self.active(system).opposite();
        self.store.set(next.as_str())?;
        self.preference = Some(next);
        log::debug!("theme set to {next}");
        Ok(next.icon())
    }

    /// Drop the override and follow the system again.
    pub fn clear(&mut self) -> Result<(), ThemeError> {
        self.store.clear()?;
        self.preference = None;
        Ok(())
    }

    #[cfg(test)]
    fn store(&self) -> &S {
        &self.store
    }
}
