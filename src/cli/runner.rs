//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::http::{Client, RequestOptions};
use crate::status::StatusChecker;
use crate::types::Method;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = Arc::new(self.client()?);
        debug!("Using endpoint {}", client.config().api_endpoint);

        match &self.cli.command {
            Commands::Root => {
                let data = client.root().await?;
                self.print(&data)
            }
            Commands::Get {
                path,
                params,
                accept,
            } => {
                let mut options = parse_params(params)?;
                options.accept.clone_from(accept);
                let data = client.get(path, options).await?;
                self.print(&data)
            }
            Commands::Head { path } => {
                let response = client
                    .send(Method::HEAD, path, RequestOptions::new())
                    .await?;
                let headers: serde_json::Map<String, Value> = response
                    .headers
                    .iter()
                    .filter_map(|(k, v)| Some((k.to_string(), json!(v.to_str().ok()?))))
                    .collect();
                self.print(&json!({
                    "status": response.status,
                    "url": response.url,
                    "headers": headers,
                }))
            }
            Commands::Paginate { path, params } => {
                let data = client.paginate(path, parse_params(params)?).await?;
                self.print(&data)
            }
            Commands::RateLimit => {
                let rate_limit = client.refresh_rate_limit().await?;
                self.print(&json!({
                    "limit": rate_limit.limit,
                    "remaining": rate_limit.remaining,
                    "resets_at": rate_limit.resets_at,
                    "resets_in": rate_limit.resets_in(),
                }))
            }
            Commands::Status => {
                let report = StatusChecker::new(client).check().await;
                self.print(&report)
            }
            Commands::Serve { port } => crate::cli::serve(client, *port).await,
        }
    }

    /// Options file first, then command-line overrides
    pub fn options(&self) -> Result<ClientOptions> {
        let base = match &self.cli.config {
            Some(path) => ClientOptions::from_file(path)?,
            None => ClientOptions::new(),
        };

        let overrides = ClientOptions {
            api_endpoint: self.cli.endpoint.clone(),
            user_agent: self.cli.user_agent.clone(),
            default_media_type: self.cli.media_type.clone(),
            api_token: self.cli.token.clone(),
            auto_paginate: self.cli.auto_paginate,
            per_page: self.cli.per_page,
            proxy: self.cli.proxy.clone(),
            ..ClientOptions::default()
        };

        Ok(base.merge(overrides))
    }

    fn client(&self) -> Result<Client> {
        Client::new(self.options()?)
    }

    fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{rendered}");
        Ok(())
    }
}

/// Parse `key=value` pairs into request fields
pub fn parse_params(params: &[String]) -> Result<RequestOptions> {
    let mut options = RequestOptions::new();
    for param in params {
        let (key, value) = param.split_once('=').ok_or_else(|| {
            Error::invalid_value("param", format!("expected key=value, got '{param}'"))
        })?;
        options = options.field(key.trim(), value);
    }
    Ok(options)
}

#[cfg(test)]
mod runner_tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_parse_params() {
        let options =
            parse_params(&["keyword=food".to_string(), "page = 2".to_string()]).unwrap();
        assert_eq!(options.fields.get("keyword"), Some(&json!("food")));
        assert_eq!(options.fields.get("page"), Some(&json!(" 2")));

        let options = parse_params(&["q=a=b".to_string()]).unwrap();
        assert_eq!(options.fields.get("q"), Some(&json!("a=b")));

        assert!(parse_params(&["novalue".to_string()]).is_err());
    }

    #[test]
    fn test_options_from_flags() {
        let cli = Cli::parse_from([
            "ohanakapa",
            "--endpoint",
            "https://api.test",
            "--token",
            "secret",
            "--auto-paginate",
            "true",
            "--per-page",
            "25",
            "root",
        ]);
        let options = Runner::new(cli).options().unwrap();

        assert_eq!(options.api_endpoint.as_deref(), Some("https://api.test"));
        assert_eq!(options.api_token.unwrap().expose(), "secret");
        assert_eq!(options.auto_paginate, Some(true));
        assert_eq!(options.per_page, Some(25));
        assert!(options.proxy.is_none());
    }

    #[test]
    fn test_cli_debug_masks_token() {
        let token = "0123456789abcdef0123456789abcdefghijTAIL";
        let cli = Cli::parse_from(["ohanakapa", "--token", token, "root"]);
        let rendered = format!("{cli:?}");

        assert!(!rendered.contains(&token[..32]));
        assert!(rendered.contains("TAIL"));
        assert_eq!(cli.token.unwrap().expose(), token);
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api_endpoint: https://file.test\nper_page: 10\nuser_agent: from-file"
        )
        .unwrap();

        let cli = Cli::parse_from([
            "ohanakapa",
            "--config",
            file.path().to_str().unwrap(),
            "--per-page",
            "30",
            "status",
        ]);
        let options = Runner::new(cli).options().unwrap();

        assert_eq!(options.api_endpoint.as_deref(), Some("https://file.test"));
        assert_eq!(options.user_agent.as_deref(), Some("from-file"));
        assert_eq!(options.per_page, Some(30));
    }

    #[test]
    fn test_get_command_parses() {
        let cli = Cli::parse_from([
            "ohanakapa", "get", "search", "-p", "keyword=food", "--accept", "text/csv",
        ]);
        match cli.command {
            Commands::Get {
                path,
                params,
                accept,
            } => {
                assert_eq!(path, "search");
                assert_eq!(params, vec!["keyword=food"]);
                assert_eq!(accept.as_deref(), Some("text/csv"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
