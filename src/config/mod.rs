//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`SHELLIDE_BASE_URL`, `SHELLIDE_AUTH_TOKEN`,
//!    `SHELLIDE_PROJECT_ID`, `SHELLIDE_TIMEOUT_SECS`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./shellide.toml in the current directory
//! 4. $XDG_CONFIG_HOME/shellide/shellide.toml (or ~/.config/shellide/shellide.toml)
//! 5. Built-in defaults
//!
//! CLI flags are applied on top by the binary.

use crate::error::ConfigError;
use crate::project::ProjectRef;
use std::path::{Path, PathBuf};

mod defaults;
mod env;
mod sources;
mod types;

use defaults::DEFAULT_SHELLIDE_CONFIG_TEMPLATE;
use env::apply_runtime_env_overrides;
pub use sources::config_root_dir;
use sources::{read_config_text_with_sources, ConfigSource};
pub use types::{
    BackendConfig, Config, DisplayConfig, LoggingConfig, ProjectConfig, TerminalConfig,
};

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

/// The annotated default config file.
pub fn default_config_template() -> &'static str {
    DEFAULT_SHELLIDE_CONFIG_TEMPLATE
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    match &source {
        ConfigSource::Explicit(path) | ConfigSource::Global(path) => {
            tracing::debug!(path = %path.display(), "loaded config file")
        }
        ConfigSource::Local => tracing::debug!("loaded ./shellide.toml"),
        ConfigSource::BuiltInDefaults => tracing::debug!("no config file found; using defaults"),
    }

    let parsed: Config = toml::from_str(&config_text)?;
    let mut config = resolve_config(parsed, &env_lookup)?;
    apply_runtime_env_overrides(&mut config, &env_lookup)?;
    Ok(config)
}

/// Validate a parsed file and resolve indirect values.
fn resolve_config<FEnv>(mut config: Config, env_lookup: &FEnv) -> Result<Config, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    config.backend.auth_token = resolve_auth_token(&config.backend, env_lookup)?;
    config.backend.base_url = normalized_string(&config.backend.base_url)
        .unwrap_or_else(|| defaults::DEFAULT_BASE_URL.to_string());
    config.backend.timeout_secs = config.backend.timeout_secs.max(1);

    if config.terminal.history_limit == 0 {
        return Err(ConfigError::Invalid(
            "terminal.history_limit must be at least 1".to_string(),
        ));
    }
    if normalized_string(&config.terminal.prompt_symbol).is_none() {
        config.terminal.prompt_symbol = defaults::DEFAULT_PROMPT_SYMBOL.to_string();
    }
    config.terminal.completions.retain(|c| !c.trim().is_empty());

    config.project.id = normalized_option(&config.project.id);
    config.project.name = normalized_option(&config.project.name);
    config.project.directory = normalized_option(&config.project.directory);
    config.terminal.working_directory = normalized_option(&config.terminal.working_directory);
    Ok(config)
}

fn resolve_auth_token<FEnv>(backend: &BackendConfig, env_lookup: &FEnv) -> Result<String, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    let literal = normalized_string(&backend.auth_token);
    let env_name = normalized_option(&backend.auth_token_env);
    match (literal, env_name) {
        (Some(_), Some(_)) => Err(ConfigError::Invalid(
            "only one of backend.auth_token and backend.auth_token_env may be set".to_string(),
        )),
        (Some(token), None) => Ok(token),
        (None, Some(name)) => Ok(env::non_empty_env(env_lookup, &name).unwrap_or_default()),
        (None, None) => Ok(String::new()),
    }
}

impl Config {
    /// Project the pane starts attached to, if an id is configured.
    pub fn project_ref(&self) -> Option<ProjectRef> {
        let id = self.project.id.clone()?;
        Some(ProjectRef {
            name: self.project.name.clone().unwrap_or_else(|| id.clone()),
            id,
            directory: self.project.directory.clone(),
        })
    }
}

fn normalized_option(value: &Option<String>) -> Option<String> {
    value.as_deref().and_then(normalized_string)
}

fn normalized_string(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;
    use std::collections::HashMap;

    fn parse_file_config_for_test(toml: &str) -> Result<Config, ConfigError> {
        parse_with_env(toml, &[])
    }

    fn parse_with_env(toml: &str, vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let text = toml.to_string();
        load_config_from_sources(
            Some("/virtual/shellide.toml"),
            move |_| Ok(text.clone()),
            move |name| env.get(name).cloned(),
            || None,
        )
    }

    #[test]
    fn defaults_are_sensible() {
        let c = Config::default();
        assert_eq!(c.backend.base_url, "http://localhost:8000");
        assert_eq!(c.backend.timeout_secs, 310);
        assert_eq!(c.terminal.prompt_symbol, "$");
        assert_eq!(c.terminal.history_limit, 100);
        assert!(c.terminal.banner);
        assert_eq!(
            c.terminal.quick_commands,
            vec!["ls -la", "pwd", "git status", "npm install"]
        );
        assert!(c.display.color);
        assert_eq!(c.logging.filter, None);
        assert_eq!(c.project_ref(), None);
    }

    #[test]
    fn shipped_template_parses_to_defaults() {
        let c = parse_file_config_for_test(default_config_template()).unwrap();
        assert_eq!(c, Config::default());
    }

    #[test]
    fn parse_partial_toml() {
        let toml = r#"
            [backend]
            base_url = "https://ide.example.com/"
            timeout_secs = 45

            [project]
            id = "42"
            directory = "/projects/demo"

            [terminal]
            history_limit = 10
            quick_commands = ["make"]
        "#;
        let c = parse_file_config_for_test(toml).unwrap();
        assert_eq!(c.backend.base_url, "https://ide.example.com/");
        assert_eq!(c.backend.timeout_secs, 45);
        assert_eq!(c.terminal.history_limit, 10);
        assert_eq!(c.terminal.quick_commands, vec!["make"]);
        assert!(c.terminal.banner);

        let project = c.project_ref().expect("project");
        assert_eq!(project.id, "42");
        assert_eq!(project.name, "42");
        assert_eq!(project.directory.as_deref(), Some("/projects/demo"));
    }

    #[test]
    fn zero_history_limit_is_invalid() {
        let err = parse_file_config_for_test("[terminal]\nhistory_limit = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("history_limit"));
    }

    #[test]
    fn zero_timeout_in_file_is_clamped() {
        let c = parse_file_config_for_test("[backend]\ntimeout_secs = 0\n").unwrap();
        assert_eq!(c.backend.timeout_secs, 1);
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = parse_file_config_for_test("[backend\nbase_url = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn auth_token_env_is_resolved() {
        let toml = "[backend]\nauth_token_env = \"IDE_TOKEN\"\n";
        let c = parse_with_env(toml, &[("IDE_TOKEN", " secret \n")]).unwrap();
        assert_eq!(c.backend.auth_token, "secret");

        let missing = parse_with_env(toml, &[]).unwrap();
        assert_eq!(missing.backend.auth_token, "");
    }

    #[test]
    fn auth_token_sources_are_exclusive() {
        let toml = "[backend]\nauth_token = \"a\"\nauth_token_env = \"IDE_TOKEN\"\n";
        let err = parse_file_config_for_test(toml).unwrap_err();
        assert!(err.to_string().contains("only one of"));
    }

    #[test]
    fn env_overrides_beat_file_values() {
        let toml = r#"
            [backend]
            base_url = "http://file:1"
            auth_token = "file-token"
            [project]
            id = "1"
        "#;
        let c = parse_with_env(
            toml,
            &[
                ("SHELLIDE_BASE_URL", "http://env:2"),
                ("SHELLIDE_AUTH_TOKEN", "env-token"),
                ("SHELLIDE_PROJECT_ID", "7"),
                ("SHELLIDE_TIMEOUT_SECS", "0"),
            ],
        )
        .unwrap();
        assert_eq!(c.backend.base_url, "http://env:2");
        assert_eq!(c.backend.auth_token, "env-token");
        assert_eq!(c.project.id.as_deref(), Some("7"));
        assert_eq!(c.backend.timeout_secs, 1);
    }

    #[test]
    fn invalid_timeout_env_is_rejected() {
        let err = parse_with_env("", &[("SHELLIDE_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("SHELLIDE_TIMEOUT_SECS"));
    }

    #[test]
    fn local_file_beats_global_file() {
        let global_root = PathBuf::from("/home/u/.config");
        let global_path = global_root.join("shellide").join("shellide.toml");
        let read = |path: &Path| {
            if path == Path::new("shellide.toml") {
                Ok("[display]\ncolor = false\n".to_string())
            } else if path == global_path {
                Ok("[terminal]\nbanner = false\n".to_string())
            } else {
                Err(std::io::Error::from(std::io::ErrorKind::NotFound))
            }
        };
        let c = load_config_from_sources(None, read, |_| None, || Some(global_root.clone())).unwrap();
        assert!(!c.display.color);
        assert!(c.terminal.banner);
    }

    #[test]
    fn global_file_used_when_no_local_file() {
        let fixture = TestTempDir::new("config");
        fixture.write_text("shellide/shellide.toml", "[terminal]\nbanner = false\n");
        let root = fixture.path().to_path_buf();
        let c = load_config_from_sources(
            None,
            |path| {
                if path == Path::new("shellide.toml") {
                    Err(std::io::Error::from(std::io::ErrorKind::NotFound))
                } else {
                    std::fs::read_to_string(path)
                }
            },
            |_| None,
            || Some(root.clone()),
        )
        .unwrap();
        assert!(!c.terminal.banner);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config_from_sources(
            Some("/nope/shellide.toml"),
            |_| Err(std::io::Error::from(std::io::ErrorKind::NotFound)),
            |_| None,
            || None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn no_files_yield_defaults() {
        let c = load_config_from_sources(
            None,
            |_| Err(std::io::Error::from(std::io::ErrorKind::NotFound)),
            |_| None,
            || None,
        )
        .unwrap();
        assert_eq!(c, Config::default());
    }

    #[test]
    fn named_project_keeps_its_name() {
        let c = parse_file_config_for_test("[project]\nid = \"3\"\nname = \" demo \"\n").unwrap();
        assert_eq!(c.project_ref().map(|p| p.name).as_deref(), Some("demo"));
    }
}
