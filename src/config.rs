use crate::types::DEFAULT_REMOTE_CLI_URL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const DEFAULT_RPC_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Config {
    pub node: Option<NodeConfig>,
    pub keystore: Option<KeystoreConfig>,
    pub rpc: Option<RpcConfig>,
    #[serde(skip)]
    pub path: PathBuf,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct NodeConfig {
    pub datadir: Option<PathBuf>,
    pub remote_cli_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct KeystoreConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct RpcConfig {
    pub timeout_ms: Option<u64>,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self {
                path,
                ..Self::default()
            });
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.path = path;
        Ok(config)
    }

    /// Fold global command-line flags over the file values. Flags win.
    pub fn with_overrides(mut self, datadir: Option<&Path>, remote_cli_url: Option<&str>) -> Self {
        if datadir.is_none() && remote_cli_url.is_none() {
            return self;
        }
        let node = self.node.get_or_insert_with(NodeConfig::default);
        if let Some(datadir) = datadir {
            node.datadir = Some(datadir.to_path_buf());
        }
        if let Some(url) = remote_cli_url {
            node.remote_cli_url = Some(url.to_string());
        }
        self
    }

    pub fn datadir(&self) -> PathBuf {
        self.node
            .as_ref()
            .and_then(|node| node.datadir.clone())
            .unwrap_or_else(default_datadir)
    }

    pub fn keystore_dir(&self) -> PathBuf {
        self.keystore
            .as_ref()
            .and_then(|keystore| keystore.dir.clone())
            .unwrap_or_else(|| self.datadir().join("keystore"))
    }

    pub fn remote_cli_url(&self) -> Result<Url> {
        let raw = self
            .node
            .as_ref()
            .and_then(|node| node.remote_cli_url.as_deref())
            .unwrap_or(DEFAULT_REMOTE_CLI_URL);
        Url::parse(raw).with_context(|| format!("invalid remote cli url {raw}"))
    }

    pub fn rpc_timeout(&self) -> Duration {
        let ms = self
            .rpc
            .as_ref()
            .and_then(|rpc| rpc.timeout_ms)
            .unwrap_or(DEFAULT_RPC_TIMEOUT_MS);
        Duration::from_millis(ms)
    }
}

fn default_config_path() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        return dir.join("pocket-nodes").join("config.toml");
    }
    PathBuf::from("./config.toml")
}

fn default_datadir() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        return home.join(".pocket");
    }
    PathBuf::from("./.pocket")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.path, path);
        assert_eq!(
            config.remote_cli_url().unwrap().as_str(),
            "http://localhost:8081/"
        );
        assert_eq!(config.rpc_timeout(), Duration::from_secs(30));
        assert!(config.keystore_dir().ends_with(".pocket/keystore"));
    }

    #[test]
    fn reads_all_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[node]
datadir = "/srv/pocket"
remote_cli_url = "https://node.example:8081"

[keystore]
dir = "/secure/keys"

[rpc]
timeout_ms = 1500
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.datadir(), PathBuf::from("/srv/pocket"));
        assert_eq!(config.keystore_dir(), PathBuf::from("/secure/keys"));
        assert_eq!(
            config.remote_cli_url().unwrap().as_str(),
            "https://node.example:8081/"
        );
        assert_eq!(config.rpc_timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn keystore_follows_datadir() {
        let config =
            Config::default().with_overrides(Some(Path::new("/data/pocket")), None);
        assert_eq!(config.keystore_dir(), PathBuf::from("/data/pocket/keystore"));
    }

    #[test]
    fn flags_override_file_values() {
        let config = Config {
            node: Some(NodeConfig {
                datadir: Some(PathBuf::from("/from/file")),
                remote_cli_url: Some("http://file:8081".to_string()),
            }),
            ..Config::default()
        }
        .with_overrides(None, Some("http://flag:9000"));

        assert_eq!(config.datadir(), PathBuf::from("/from/file"));
        assert_eq!(config.remote_cli_url().unwrap().as_str(), "http://flag:9000/");
    }

    #[test]
    fn bad_url_and_bad_toml_are_errors() {
        let config = Config::default().with_overrides(None, Some("not a url"));
        assert!(config.remote_cli_url().is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[node\ndatadir = 1").unwrap();
        assert!(Config::load(Some(file.path())).is_err());
    }
}
