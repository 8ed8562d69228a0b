//! Configuration file discovery and loading.
//!
//! Built-in settings are always the base layer. A YAML file, when one is
//! found, overrides individual keys on top of them.

use crate::config::schema::{ConfigFile, FamilyOverride};
use crate::config::validator::validate;
use crate::config::{FamilySettings, InstallerArtifact, InstallerConfig};
use crate::error::{InstallerError, Result};
use semver::Version;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up next to the running executable.
pub const CONFIG_FILE_NAME: &str = "runtime-installer.yml";

/// Find the config file to load.
///
/// An explicit path must exist. Without one, `runtime-installer.yml` next to
/// the executable is used when present.
pub fn discover_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(InstallerError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        return Ok(Some(path.to_path_buf()));
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
        .filter(|path| path.is_file());
    Ok(beside_exe)
}

/// Parse YAML content into a [`ConfigFile`].
pub fn parse_config(content: &str, path: &Path) -> Result<ConfigFile> {
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(content).map_err(|e| InstallerError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read and parse a config file.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|_| InstallerError::ConfigNotFound {
        path: path.to_path_buf(),
    })?;
    parse_config(&content, path)
}

/// Load the effective configuration: built-ins, then the discovered file.
pub fn load_config(explicit: Option<&Path>) -> Result<InstallerConfig> {
    let mut config = InstallerConfig::default();

    if let Some(path) = discover_config_path(explicit)? {
        tracing::debug!("Loading config from {}", path.display());
        let file = load_config_file(&path)?;
        apply_file(&mut config, file)?;
    }

    validate(&config)?;
    Ok(config)
}

/// Apply a parsed file on top of an existing configuration.
pub fn apply_file(config: &mut InstallerConfig, file: ConfigFile) -> Result<()> {
    if let Some(secs) = file.install_timeout_secs {
        config.install_timeout = Duration::from_secs(secs);
    }
    if let Some(switch) = file.silent_switch {
        config.silent_switch = switch;
    }
    if let Some(dir) = file.download_dir {
        config.download_dir = Some(dir);
    }
    if let Some(root) = file.dotnet_root {
        config.dotnet_root = Some(root);
    }
    if let Some(desktop) = file.desktop {
        apply_family(&mut config.desktop, desktop)?;
    }
    if let Some(web) = file.web {
        apply_family(&mut config.web, web)?;
    }
    Ok(())
}

fn apply_family(settings: &mut FamilySettings, over: FamilyOverride) -> Result<()> {
    if let Some(name) = over.application_name {
        settings.application_name = name;
    }
    if let Some(raw) = over.min_version {
        settings.min_version =
            Version::parse(raw.trim()).map_err(|e| InstallerError::ConfigValidationError {
                message: format!(
                    "{}.min_version '{}' is not a major.minor.patch version: {}",
                    settings.family, raw, e
                ),
            })?;
    }
    if let Some(allow) = over.allow_prerelease {
        settings.allow_prerelease = allow;
    }

    // A new URL without a digest drops the built-in digest, which belongs to the old file.
    if let Some(url) = over.download_url_x64 {
        settings.x64 = InstallerArtifact::new(url, over.sha512_x64.as_deref());
    } else if let Some(sha) = over.sha512_x64 {
        settings.x64 = InstallerArtifact::new(settings.x64.url.clone(), Some(&sha));
    }

    if let Some(url) = over.download_url_arm64 {
        settings.arm64 = Some(InstallerArtifact::new(url, over.sha512_arm64.as_deref()));
    } else if let Some(sha) = over.sha512_arm64 {
        let url = settings
            .arm64
            .as_ref()
            .map(|a| a.url.clone())
            .unwrap_or_else(|| settings.x64.url.clone());
        settings.arm64 = Some(InstallerArtifact::new(url, Some(&sha)));
    }

    if let Some(page) = over.manual_download_page {
        settings.manual_download_page = page;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_missing_path_is_config_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");
        let err = discover_config_path(Some(&missing)).unwrap_err();
        assert!(matches!(err, InstallerError::ConfigNotFound { .. }));
    }

    #[test]
    fn explicit_existing_path_is_used() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cfg.yml");
        fs::write(&path, "install_timeout_secs: 5").unwrap();
        assert_eq!(discover_config_path(Some(&path)).unwrap(), Some(path));
    }

    #[test]
    fn load_config_applies_overrides() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cfg.yml");
        fs::write(
            &path,
            r#"
install_timeout_secs: 30
silent_switch: /passive
dotnet_root: /opt/dotnet
web:
  application_name: Intranet
  min_version: 8.0.11
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.install_timeout, Duration::from_secs(30));
        assert_eq!(config.silent_switch, "/passive");
        assert_eq!(config.dotnet_root, Some(PathBuf::from("/opt/dotnet")));
        assert_eq!(config.web.application_name, "Intranet");
        assert_eq!(config.web.min_version, Version::new(8, 0, 11));
        assert_eq!(config.desktop, FamilySettings::desktop_defaults());
    }

    #[test]
    fn largest_timeout_is_accepted() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cfg.yml");
        fs::write(&path, "install_timeout_secs: 18446744073709551615\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.install_timeout, Duration::from_secs(u64::MAX));
    }

    #[test]
    fn empty_file_keeps_builtins() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cfg.yml");
        fs::write(&path, "").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config, InstallerConfig::default());
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cfg.yml");
        fs::write(&path, "desktop: [unclosed").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, InstallerError::ConfigParseError { .. }));
    }

    #[test]
    fn bad_min_version_is_validation_error() {
        let mut config = InstallerConfig::default();
        let file = ConfigFile {
            desktop: Some(FamilyOverride {
                min_version: Some("10.0".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = apply_file(&mut config, file).unwrap_err();
        assert!(err.to_string().contains("desktop.min_version"));
    }

    #[test]
    fn new_url_without_digest_disables_check() {
        let mut config = InstallerConfig::default();
        let file = ConfigFile {
            desktop: Some(FamilyOverride {
                download_url_x64: Some("https://mirror.example.com/rt.exe".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        apply_file(&mut config, file).unwrap();
        assert_eq!(config.desktop.x64.url, "https://mirror.example.com/rt.exe");
        assert!(config.desktop.x64.sha512.is_none());
    }

    #[test]
    fn empty_digest_override_disables_check() {
        let mut config = InstallerConfig::default();
        let file = ConfigFile {
            web: Some(FamilyOverride {
                sha512_x64: Some(String::new()),
                ..Default::default()
            }),
            ..Default::default()
        };
        apply_file(&mut config, file).unwrap();
        assert!(config.web.x64.sha512.is_none());
        assert_eq!(config.web.x64.url, FamilySettings::web_defaults().x64.url);
    }

    #[test]
    fn arm64_digest_override_without_variant_reuses_x64_url() {
        let mut config = InstallerConfig::default();
        let digest = "ab".repeat(64);
        let file = ConfigFile {
            web: Some(FamilyOverride {
                sha512_arm64: Some(digest.clone()),
                ..Default::default()
            }),
            ..Default::default()
        };
        apply_file(&mut config, file).unwrap();
        let arm64 = config.web.arm64.unwrap();
        assert_eq!(arm64.url, config.web.x64.url);
        assert_eq!(arm64.sha512, Some(digest));
    }
}
