pub mod toml_config;

pub use toml_config::AppConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

/// Command line overrides shared by the server and the one-shot binary.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Notes JSON file ({"notes": [...]})
    #[arg(long)]
    pub data_path: Option<String>,

    /// Directory for generated Tiptap JSON files
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Chat completions base URL (OpenAI compatible)
    #[arg(long)]
    pub llm_base_url: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigArgs {
    /// 載入 TOML (若有指定) 再套用命令列覆蓋
    pub fn load(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(data_path) = &self.data_path {
            config.store.data_path = data_path.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output.directory = output_dir.clone();
        }
        if let Some(base_url) = &self.llm_base_url {
            config.llm.base_url = base_url.clone();
        }
        if self.json_logs {
            config.logging.json = true;
        }

        Ok(config)
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "sticky-notes")]
#[command(about = "Sticky notes processing API backed by an LLM")]
pub struct CliConfig {
    #[command(flatten)]
    pub args: ConfigArgs,
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_defaults() {
        let cli = CliConfig::parse_from([
            "sticky-notes",
            "--port",
            "9000",
            "--output-dir",
            "/tmp/out",
            "--json-logs",
        ]);

        let config = cli.args.load().unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.output.directory, "/tmp/out");
        assert!(config.logging.json);
        assert_eq!(config.store.data_path, "data.json");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = CliConfig::parse_from(["sticky-notes", "--config", "/definitely/not/here.toml"]);
        assert!(cli.args.load().is_err());
    }
}
