use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::editor::SpanPolicy;
use crate::storage::DEFAULT_SLOT;

/// Flags that can come from the command line or a flags file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub storage: Option<PathBuf>,
    pub slot: Option<String>,
    pub fixed_spans: bool,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge with `other` taking precedence for valued options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            storage: other.storage.clone().or_else(|| self.storage.clone()),
            slot: other.slot.clone().or_else(|| self.slot.clone()),
            fixed_spans: self.fixed_spans || other.fixed_spans,
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.storage.clone().unwrap_or_else(default_storage_path)
    }

    pub fn slot_name(&self) -> &str {
        self.slot.as_deref().unwrap_or(DEFAULT_SLOT)
    }

    pub const fn span_policy(&self) -> SpanPolicy {
        if self.fixed_spans {
            SpanPolicy::FixedSpan
        } else {
            SpanPolicy::MatchLength
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("blockpad").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("blockpad")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("blockpad").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("blockpad")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".blockpadrc")
}

/// Where the slot store lives when `--storage` is not given.
pub fn default_storage_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("LOCALAPPDATA") {
            return PathBuf::from(appdata).join("blockpad").join("storage.json");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("blockpad")
                .join("storage.json");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("blockpad").join("storage.json");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("blockpad")
                .join("storage.json");
        }
    }

    PathBuf::from("blockpad-storage.json")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# blockpad defaults (saved with --save)".to_string()];
    if let Some(storage) = &flags.storage {
        lines.push(format!("--storage {}", storage.display()));
    }
    if let Some(slot) = &flags.slot {
        lines.push(format!("--slot {slot}"));
    }
    if flags.fixed_spans {
        lines.push("--fixed-spans".to_string());
    }
    if let Some(log_file) = &flags.log_file {
        lines.push(format!("--log-file {}", log_file.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from raw tokens, ignoring everything else.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        let mut value = || {
            inline_value.map(ToOwned::to_owned).or_else(|| {
                let next = tokens.get(i + 1).cloned();
                if next.is_some() {
                    i += 1;
                }
                next
            })
        };
        match name {
            "--fixed-spans" => flags.fixed_spans = true,
            "--storage" => flags.storage = value().map(PathBuf::from),
            "--slot" => flags.slot = value(),
            "--log-file" => flags.log_file = value().map(PathBuf::from),
            _ => {}
        }
        i += 1;
    }
    flags
}
