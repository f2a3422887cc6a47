//! Startup configuration: defaults, then `breeds.toml`, then environment,
//! then command-line flags.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use breed_core::{DEFAULT_BREEDS_URL, DEFAULT_REQUEST_TIMEOUT};
use clap::Parser;
use serde::Deserialize;
use url::Url;

const CONFIG_FILE_NAME: &str = "breeds.toml";
const APP_DIR_NAME: &str = "cat_breeds";

#[derive(Parser, Debug, Default)]
#[command(name = "cat-breeds", about = "Browse and edit cat breeds fetched from a public API")]
pub struct Args {
    /// Path to a TOML config file.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub api_url: Option<String>,
    #[arg(long)]
    pub api_key: Option<String>,
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub api_url: Url,
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
}

impl StartupConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_url: Option<String>,
    api_key: Option<String>,
    request_timeout_secs: Option<u64>,
}

pub fn load_startup_config(args: &Args) -> anyhow::Result<StartupConfig> {
    let file = match resolve_config_path(args.config.as_deref()) {
        Some(path) => {
            tracing::info!(path = %path.display(), "reading config file");
            Some(read_config_file(&path)?)
        }
        None => None,
    };
    resolve(file, |name| std::env::var(name).ok(), args)
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

fn read_config_file(path: &Path) -> anyhow::Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config file '{}'", path.display()))
}

fn resolve(
    file: Option<FileConfig>,
    env: impl Fn(&str) -> Option<String>,
    args: &Args,
) -> anyhow::Result<StartupConfig> {
    let file = file.unwrap_or_default();
    let mut api_url = DEFAULT_BREEDS_URL.to_string();
    let mut api_key = None;
    let mut request_timeout_secs = DEFAULT_REQUEST_TIMEOUT.as_secs();

    if let Some(v) = file.api_url {
        api_url = v;
    }
    if let Some(v) = file.api_key {
        api_key = Some(v);
    }
    if let Some(v) = file.request_timeout_secs {
        request_timeout_secs = v;
    }

    if let Some(v) = non_empty(env("BREEDS_API_URL")) {
        api_url = v;
    }
    if let Some(v) = non_empty(env("APP__API_URL")) {
        api_url = v;
    }
    if let Some(v) = non_empty(env("BREEDS_API_KEY")) {
        api_key = Some(v);
    }
    if let Some(v) = non_empty(env("APP__API_KEY")) {
        api_key = Some(v);
    }
    if let Some(v) = non_empty(env("APP__REQUEST_TIMEOUT_SECS")) {
        request_timeout_secs = v
            .parse()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_SECS is not a number: '{v}'"))?;
    }

    if let Some(v) = &args.api_url {
        api_url = v.clone();
    }
    if let Some(v) = &args.api_key {
        api_key = Some(v.clone());
    }
    if let Some(v) = args.timeout_secs {
        request_timeout_secs = v;
    }

    let api_url =
        Url::parse(api_url.trim()).with_context(|| format!("invalid breeds api url '{api_url}'"))?;
    if request_timeout_secs == 0 {
        anyhow::bail!("request timeout must be at least one second");
    }

    Ok(StartupConfig {
        api_url,
        api_key: non_empty(api_key),
        request_timeout_secs,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_point_at_public_breeds_endpoint() {
        let config = resolve(None, env_from(&[]), &Args::default()).expect("config");

        assert_eq!(config.api_url.as_str(), "https://api.thecatapi.com/v1/breeds");
        assert_eq!(config.api_key, None);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn env_overrides_file_and_args_override_env() {
        let file = FileConfig {
            api_url: Some("http://file.example/breeds".to_string()),
            api_key: Some("file-key".to_string()),
            request_timeout_secs: Some(5),
        };
        let env = env_from(&[
            ("BREEDS_API_URL", "http://env.example/breeds"),
            ("APP__REQUEST_TIMEOUT_SECS", "12"),
        ]);
        let args = Args {
            api_key: Some("cli-key".to_string()),
            ..Args::default()
        };

        let config = resolve(Some(file), env, &args).expect("config");

        assert_eq!(config.api_url.as_str(), "http://env.example/breeds");
        assert_eq!(config.api_key.as_deref(), Some("cli-key"));
        assert_eq!(config.request_timeout_secs, 12);
    }

    #[test]
    fn app_prefixed_env_wins_over_legacy_name() {
        let env = env_from(&[
            ("BREEDS_API_URL", "http://legacy.example/breeds"),
            ("APP__API_URL", "http://app.example/breeds"),
            ("BREEDS_API_KEY", "   "),
        ]);

        let config = resolve(None, env, &Args::default()).expect("config");

        assert_eq!(config.api_url.as_str(), "http://app.example/breeds");
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn rejects_invalid_url_and_zero_timeout() {
        let bad_url = Args {
            api_url: Some("not a url".to_string()),
            ..Args::default()
        };
        assert!(resolve(None, env_from(&[]), &bad_url).is_err());

        let zero_timeout = Args {
            timeout_secs: Some(0),
            ..Args::default()
        };
        assert!(resolve(None, env_from(&[]), &zero_timeout).is_err());

        let bad_env = env_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]);
        assert!(resolve(None, bad_env, &Args::default()).is_err());
    }

    #[test]
    fn reads_toml_config_file() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let temp_root = env::temp_dir().join(format!("cat_breeds_config_test_{suffix}"));
        fs::create_dir_all(&temp_root).expect("temp root");
        let path = temp_root.join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "api_url = \"http://127.0.0.1:9000/v1/breeds\"\nrequest_timeout_secs = 3\n",
        )
        .expect("write config");

        let file = read_config_file(&path).expect("parse");
        let config = resolve(Some(file), env_from(&[]), &Args::default()).expect("config");

        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:9000/v1/breeds");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(resolve_config_path(Some(&path)), Some(path.clone()));

        fs::remove_dir_all(temp_root).expect("cleanup");
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let args = Args {
            config: Some(PathBuf::from("/definitely/not/here/breeds.toml")),
            ..Args::default()
        };

        let err = load_startup_config(&args).expect_err("missing file");

        assert!(err.to_string().contains("failed to read config file"));
    }
}
