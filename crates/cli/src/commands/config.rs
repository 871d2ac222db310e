//! Configuration commands
//!
//! `config init` creates the configuration file, prompting on stdin for any
//! value not given as a flag (the first-run flow). `config show` prints the
//! active configuration with the secret redacted; `config path` prints the
//! file location.

use std::io::Write;

use clap::Subcommand;
use serde::Serialize;

use bucketit_core::{Config, ConfigManager};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Create the configuration file
    Init(InitArgs),

    /// Show the current configuration (secret redacted)
    Show,

    /// Print the configuration file path
    Path,
}

/// Arguments for the `config init` command
#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// S3 endpoint URL (e.g., "http://localhost:9000")
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Access key ID
    #[arg(long)]
    pub access_key: Option<String>,

    /// Secret access key
    #[arg(long)]
    pub secret_key: Option<String>,

    /// Default bucket used when `put` is invoked without --bucket
    #[arg(long)]
    pub default_bucket: Option<String>,

    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Configuration as printed by `config show` (no secret)
#[derive(Serialize)]
struct ConfigInfo {
    endpoint_url: String,
    access_key: String,
    secret_key: &'static str,
    region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_bucket: Option<String>,
}

/// Execute a config subcommand
pub fn execute(cmd: ConfigCommands, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let manager = match ConfigManager::new() {
        Ok(m) => m,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    match cmd {
        ConfigCommands::Init(args) => init(args, &manager, &formatter),
        ConfigCommands::Show => show(&manager, &formatter),
        ConfigCommands::Path => {
            formatter.println(&manager.config_path().display().to_string());
            ExitCode::Success
        }
    }
}

fn init(args: InitArgs, manager: &ConfigManager, formatter: &Formatter) -> ExitCode {
    if manager.exists() && !args.force {
        formatter.error(&format!(
            "Configuration already exists at {}. Use --force to overwrite.",
            manager.config_path().display()
        ));
        return ExitCode::UsageError;
    }

    let endpoint = match value_or_prompt(args.endpoint, "Endpoint URL") {
        Ok(v) => v,
        Err(e) => {
            formatter.error(&format!("Failed to read input: {e}"));
            return ExitCode::GeneralError;
        }
    };
    let access_key = match value_or_prompt(args.access_key, "Access key") {
        Ok(v) => v,
        Err(e) => {
            formatter.error(&format!("Failed to read input: {e}"));
            return ExitCode::GeneralError;
        }
    };
    let secret_key = match value_or_prompt(args.secret_key, "Secret key") {
        Ok(v) => v,
        Err(e) => {
            formatter.error(&format!("Failed to read input: {e}"));
            return ExitCode::GeneralError;
        }
    };
    let default_bucket = match args.default_bucket {
        Some(b) => Some(b),
        None => match prompt("Default bucket (optional - press Enter to skip)") {
            Ok(v) if v.is_empty() => None,
            Ok(v) => Some(v),
            Err(e) => {
                formatter.error(&format!("Failed to read input: {e}"));
                return ExitCode::GeneralError;
            }
        },
    };

    let config = Config::new(endpoint, access_key, secret_key, default_bucket);
    if let Err(e) = config.validate() {
        formatter.error(&e.to_string());
        return ExitCode::from(&e);
    }

    match manager.save(&config) {
        Ok(()) => {
            formatter.success(&format!(
                "Configuration written to {}",
                manager.config_path().display()
            ));
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to save configuration: {e}"));
            ExitCode::from(&e)
        }
    }
}

fn show(manager: &ConfigManager, formatter: &Formatter) -> ExitCode {
    let config = match manager.load() {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    let info = ConfigInfo {
        endpoint_url: config.endpoint_url,
        access_key: config.access_key,
        secret_key: "********",
        region: config.region,
        default_bucket: config.default_bucket,
    };

    if formatter.is_json() {
        formatter.json(&info);
    } else {
        formatter.println(&format!("endpoint_url:   {}", info.endpoint_url));
        formatter.println(&format!("access_key:     {}", info.access_key));
        formatter.println(&format!("secret_key:     {}", info.secret_key));
        formatter.println(&format!("region:         {}", info.region));
        formatter.println(&format!(
            "default_bucket: {}",
            info.default_bucket.as_deref().unwrap_or("(none)")
        ));
    }

    ExitCode::Success
}

/// Use the flag value if present, otherwise prompt for it
fn value_or_prompt(value: Option<String>, label: &str) -> std::io::Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt(label),
    }
}

/// Read one trimmed line from stdin after printing a label
fn prompt(label: &str) -> std::io::Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketit_core::ConfigManager;
    use tempfile::TempDir;

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let manager = ConfigManager::with_path(path);

        let existing = Config::new("http://localhost:9000", "ak", "sk", None);
        manager.save(&existing).unwrap();

        let args = InitArgs {
            endpoint: Some("http://other:9000".to_string()),
            access_key: Some("ak2".to_string()),
            secret_key: Some("sk2".to_string()),
            default_bucket: None,
            force: false,
        };
        let formatter = Formatter::default();

        assert_eq!(init(args, &manager, &formatter), ExitCode::UsageError);
        assert_eq!(manager.load().unwrap().endpoint_url, "http://localhost:9000");
    }

    #[test]
    fn test_init_with_flags_writes_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let manager = ConfigManager::with_path(path);

        let args = InitArgs {
            endpoint: Some("http://localhost:9000".to_string()),
            access_key: Some("ak".to_string()),
            secret_key: Some("sk".to_string()),
            default_bucket: Some("uploads".to_string()),
            force: false,
        };
        let formatter = Formatter::new(OutputConfig {
            quiet: true,
            ..Default::default()
        });

        assert_eq!(init(args, &manager, &formatter), ExitCode::Success);

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.endpoint_url, "http://localhost:9000");
        assert_eq!(loaded.default_bucket.as_deref(), Some("uploads"));
    }

    #[test]
    fn test_init_rejects_invalid_endpoint() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let manager = ConfigManager::with_path(path);

        let args = InitArgs {
            endpoint: Some("not a url".to_string()),
            access_key: Some("ak".to_string()),
            secret_key: Some("sk".to_string()),
            default_bucket: None,
            force: false,
        };
        let formatter = Formatter::new(OutputConfig {
            quiet: true,
            ..Default::default()
        });

        assert_eq!(init(args, &manager, &formatter), ExitCode::UsageError);
        assert!(!manager.exists());
    }
}
