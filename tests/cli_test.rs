//! Integration tests for the runtime-installer binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ABC_SHA512: &str = "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f";

fn write_config(dir: &Path, yaml: &str) -> std::path::PathBuf {
    let path = dir.join("runtime-installer.yml");
    fs::write(&path, yaml).unwrap();
    path
}

fn installer() -> Command {
    let mut cmd = Command::new(cargo_bin("runtime-installer"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    installer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--silent"))
        .stdout(predicate::str::contains("--web"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    installer()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_installed_runtime_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dotnet = temp.path().join("dotnet");
    fs::create_dir_all(dotnet.join("shared/Microsoft.WindowsDesktop.App/10.0.2"))?;
    let config = write_config(
        temp.path(),
        &format!("dotnet_root: '{}'\n", dotnet.display()),
    );

    installer()
        .arg("-silent")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("already installed"));
    Ok(())
}

fn installed_desktop_config(temp: &TempDir) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
    let dotnet = temp.path().join("dotnet");
    fs::create_dir_all(dotnet.join("shared/Microsoft.WindowsDesktop.App/10.0.2"))?;
    Ok(write_config(
        temp.path(),
        &format!("dotnet_root: '{}'\n", dotnet.display()),
    ))
}

#[test]
fn cli_repeated_silent_flag_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = installed_desktop_config(&temp)?;

    installer()
        .args(["-silent", "-silent", "--config"])
        .arg(&config)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("already installed"));
    Ok(())
}

#[test]
fn cli_unknown_switches_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = installed_desktop_config(&temp)?;

    installer()
        .args(["-silent", "-SomeInstallerFlag", "/norestart", "--config"])
        .arg(&config)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("already installed"));
    Ok(())
}

#[test]
fn cli_usage_error_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    installer()
        .args(["-silent", "--config"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--config"));
    Ok(())
}

#[test]
fn cli_web_flag_checks_hosting_bundle() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dotnet = temp.path().join("dotnet");
    fs::create_dir_all(dotnet.join("shared/Microsoft.AspNetCore.App/10.0.0"))?;
    let config = write_config(
        temp.path(),
        &format!("dotnet_root: '{}'\n", dotnet.display()),
    );

    installer()
        .args(["/SILENT", "-desktop", "-web", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hosting Bundle"));
    Ok(())
}

#[test]
fn cli_missing_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    installer()
        .arg("--silent")
        .arg("--config")
        .arg(temp.path().join("missing.yml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn cli_invalid_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = write_config(temp.path(), "desktop:\n  sha512_x64: not-a-digest\n");
    installer()
        .arg("--silent")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid configuration"));
    Ok(())
}

#[test]
fn cli_download_failure_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/runtime-10.0.0-win-x64.exe");
        then.status(404).body("Not Found");
    });

    let temp = TempDir::new()?;
    let url = server.url("/runtime-10.0.0-win-x64.exe");
    let config = write_config(
        temp.path(),
        &format!(
            "dotnet_root: '{root}'\ndownload_dir: '{dl}'\ndesktop:\n  download_url_x64: '{url}'\n  download_url_arm64: '{url}'\n",
            root = temp.path().join("dotnet").display(),
            dl = temp.path().join("downloads").display(),
            url = url,
        ),
    );

    installer()
        .arg("-silent")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Download failed"))
        .stderr(predicate::str::contains("404"));
    Ok(())
}

#[test]
fn cli_digest_mismatch_keeps_file_and_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/runtime-10.0.0-win-x64.exe");
        then.status(200).body("tampered");
    });

    let temp = TempDir::new()?;
    let url = server.url("/runtime-10.0.0-win-x64.exe");
    let downloads = temp.path().join("downloads");
    let config = write_config(
        temp.path(),
        &format!(
            "dotnet_root: '{root}'\ndownload_dir: '{dl}'\ndesktop:\n  download_url_x64: '{url}'\n  sha512_x64: '{sha}'\n  download_url_arm64: '{url}'\n  sha512_arm64: '{sha}'\n",
            root = temp.path().join("dotnet").display(),
            dl = downloads.display(),
            url = url,
            sha = ABC_SHA512,
        ),
    );

    installer()
        .arg("-silent")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File integrity check failed"))
        .stderr(predicate::str::contains(ABC_SHA512));

    assert!(downloads.join("runtime-10.0.0-win-x64.exe").is_file());
    Ok(())
}
