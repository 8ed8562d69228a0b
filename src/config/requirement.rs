//! Runtime families, architectures and the built-in requirement catalog.
//!
//! A [`FamilySettings`] holds everything configured for one runtime family
//! (all architectures). Resolving it for the machine's [`Architecture`]
//! produces the immutable [`RuntimeRequirement`] the pipeline works with.

use semver::Version;
use std::fmt;
use std::path::{Path, PathBuf};

/// Placeholder in manual download page templates replaced by the architecture.
pub const ARCH_PLACEHOLDER: &str = "{arch}";

/// A managed runtime component with its own install root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeFamily {
    /// The .NET Desktop Runtime (WPF / WinForms applications).
    #[default]
    Desktop,
    /// The ASP.NET Core Windows Hosting Bundle (IIS-hosted web applications).
    Web,
}

impl RuntimeFamily {
    /// Short identifier used in config files and logs.
    pub fn name(&self) -> &'static str {
        match self {
            RuntimeFamily::Desktop => "desktop",
            RuntimeFamily::Web => "web",
        }
    }

    /// Human-readable runtime name used in console output.
    pub fn display_name(&self) -> &'static str {
        match self {
            RuntimeFamily::Desktop => ".NET Desktop Runtime",
            RuntimeFamily::Web => ".NET Windows Hosting Bundle",
        }
    }

    /// Name of the shared framework folder that holds installed versions.
    pub fn shared_framework(&self) -> &'static str {
        match self {
            RuntimeFamily::Desktop => "Microsoft.WindowsDesktop.App",
            RuntimeFamily::Web => "Microsoft.AspNetCore.App",
        }
    }

    /// Install root for this family below a dotnet root directory.
    pub fn install_root(&self, dotnet_root: &Path) -> PathBuf {
        dotnet_root.join("shared").join(self.shared_framework())
    }
}

impl fmt::Display for RuntimeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// CPU architecture of the machine, used to pick the installer variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Architecture {
    #[default]
    X64,
    Arm64,
}

impl Architecture {
    /// Identifier used in download URLs and page templates.
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X64 => "x64",
            Architecture::Arm64 => "arm64",
        }
    }

    /// Parse an architecture name as reported by an OS or toolchain.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "x64" | "amd64" | "x86_64" => Some(Architecture::X64),
            "arm64" | "aarch64" => Some(Architecture::Arm64),
            _ => None,
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A downloadable installer and its optional SHA-512 digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerArtifact {
    /// Direct download URL.
    pub url: String,
    /// Expected SHA-512 digest as hex. `None` disables the integrity check.
    pub sha512: Option<String>,
}

impl InstallerArtifact {
    /// Create an artifact, treating an empty digest as "not configured".
    pub fn new(url: impl Into<String>, sha512: Option<&str>) -> Self {
        Self {
            url: url.into(),
            sha512: sha512
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
        }
    }
}

/// Configuration for one runtime family across all architectures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilySettings {
    /// Which family these settings describe.
    pub family: RuntimeFamily,
    /// Name of the application that needs the runtime (used in prompts).
    pub application_name: String,
    /// Minimum acceptable installed version.
    pub min_version: Version,
    /// Whether pre-release installs (e.g. `10.0.0-rc.2`) satisfy the requirement.
    pub allow_prerelease: bool,
    /// Installer for x64 machines.
    pub x64: InstallerArtifact,
    /// Installer for ARM64 machines. Falls back to `x64` when absent.
    pub arm64: Option<InstallerArtifact>,
    /// Manual download page. `{arch}` is replaced with the architecture.
    pub manual_download_page: String,
}

impl FamilySettings {
    /// Built-in settings for the .NET Desktop Runtime.
    pub fn desktop_defaults() -> Self {
        Self {
            family: RuntimeFamily::Desktop,
            application_name: "Markdown Monster".to_string(),
            min_version: Version::new(10, 0, 0),
            allow_prerelease: false,
            x64: InstallerArtifact::new(
                "https://builds.dotnet.microsoft.com/dotnet/WindowsDesktop/10.0.0/windowsdesktop-runtime-10.0.0-win-x64.exe",
                Some("5c6dd5616f8365cc618087916bf9e0470f5fe61242010df040ce7a688acc0598797bce0a62d3915d8951dc70f89deb1e30223c1dc0918f05af92c88658f4b3ec"),
            ),
            arm64: Some(InstallerArtifact::new(
                "https://builds.dotnet.microsoft.com/dotnet/WindowsDesktop/10.0.0/windowsdesktop-runtime-10.0.0-win-arm64.exe",
                Some("6c8b3c89a43aed39cbb19968b6a9727c2cc5d15cca1b68c8486cb355df76fcaaa1209a0ad06cb431b226bc561f06e521098934c96cea7d11d6322a6a48fcc422"),
            )),
            manual_download_page: "https://dotnet.microsoft.com/download/dotnet/10.0/runtime?cid=getdotnetcore&runtime=desktop&os=windows&arch={arch}".to_string(),
        }
    }

    /// Built-in settings for the ASP.NET Core Windows Hosting Bundle.
    ///
    /// The hosting bundle ships a single installer for all architectures.
    pub fn web_defaults() -> Self {
        let url = "https://builds.dotnet.microsoft.com/dotnet/aspnetcore/Runtime/10.0.0/dotnet-hosting-10.0.0-win.exe";
        Self {
            family: RuntimeFamily::Web,
            application_name: "West Wind Web Connection".to_string(),
            min_version: Version::new(10, 0, 0),
            allow_prerelease: false,
            x64: InstallerArtifact::new(
                url,
                Some("47e0c900d3a7da4aed8d6e5c37d8c54513fa9d6b3b269827acbe4bbc9c8f0ff107761f06a09f9fe2f69f16cdda98ab998251d29e1e605fc0982bb557e27a6728"),
            ),
            arm64: None,
            manual_download_page: url.to_string(),
        }
    }

    /// Built-in settings for a family.
    pub fn defaults_for(family: RuntimeFamily) -> Self {
        match family {
            RuntimeFamily::Desktop => Self::desktop_defaults(),
            RuntimeFamily::Web => Self::web_defaults(),
        }
    }

    /// The installer to use on the given architecture.
    pub fn artifact_for(&self, arch: Architecture) -> &InstallerArtifact {
        match arch {
            Architecture::X64 => &self.x64,
            Architecture::Arm64 => self.arm64.as_ref().unwrap_or(&self.x64),
        }
    }

    /// Resolve these settings into the requirement for one architecture.
    pub fn requirement(&self, arch: Architecture) -> RuntimeRequirement {
        let artifact = self.artifact_for(arch);
        RuntimeRequirement {
            family: self.family,
            application_name: self.application_name.clone(),
            min_version: self.min_version.clone(),
            allow_prerelease: self.allow_prerelease,
            architecture: arch,
            download_url: artifact.url.clone(),
            expected_digest: artifact.sha512.clone(),
            manual_download_page: self
                .manual_download_page
                .replace(ARCH_PLACEHOLDER, arch.as_str()),
        }
    }
}

/// Everything the pipeline needs to know about the runtime to check for.
///
/// Built once at startup and passed by reference; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeRequirement {
    pub family: RuntimeFamily,
    pub application_name: String,
    pub min_version: Version,
    pub allow_prerelease: bool,
    pub architecture: Architecture,
    pub download_url: String,
    pub expected_digest: Option<String>,
    pub manual_download_page: String,
}

impl RuntimeRequirement {
    /// Human-readable runtime name, e.g. ".NET Desktop Runtime".
    pub fn display_name(&self) -> &'static str {
        self.family.display_name()
    }

    /// "<runtime> v<min>" as shown in status lines.
    pub fn describe(&self) -> String {
        format!("{} v{}", self.display_name(), self.min_version)
    }
}
