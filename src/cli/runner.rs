//! CLI runner - executes commands

use crate::auth::Credentials;
use crate::cli::commands::{Cli, Commands};
use crate::client::EventsClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::output::{OutputFormat, RecordWriter};
use crate::query::{parse_filter, parse_timestamp, QueryParameters};
use crate::types::Region;
use serde_json::json;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

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
        match &self.cli.command {
            Commands::Fetch {
                domain,
                region,
                begin,
                end,
                filters,
                field,
                format,
                output,
            } => {
                self.fetch(
                    domain.as_deref(),
                    *region,
                    begin,
                    end,
                    filters,
                    field.as_deref(),
                    *format,
                    output.as_deref(),
                )
                .await
            }
            Commands::Validate => self.validate(),
        }
    }

    /// Resolve configuration: file, then environment, then flags
    fn load_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::load(self.cli.config.as_deref())?.with_env();
        if let Some(key) = &self.cli.api_key {
            config.api_key = Some(key.clone());
        }
        Ok(config)
    }

    /// Fetch events and write them out
    #[allow(clippy::too_many_arguments)]
    async fn fetch(
        &self,
        domain: Option<&str>,
        region: Option<Region>,
        begin: &str,
        end: &str,
        filters: &[String],
        field: Option<&str>,
        format: OutputFormat,
        output: Option<&Path>,
    ) -> Result<()> {
        let config = self.load_config()?;
        let api_key = config.api_key()?;
        let domain = domain
            .map(String::from)
            .or_else(|| config.domain.clone())
            .ok_or_else(|| Error::missing_field("domain"))?;
        let region = region.unwrap_or(config.region);

        let mut parameters =
            QueryParameters::between(parse_timestamp(begin)?, parse_timestamp(end)?);
        if !filters.is_empty() {
            parameters = parameters.with_filter(parse_filter(filters)?);
        }

        let transport = HttpClient::with_config(config.http_config())?;
        let client = EventsClient::new(Arc::new(transport), Credentials::new(api_key))
            .with_endpoints(config.endpoints());

        let start = Instant::now();
        let events = config
            .retry_policy()
            .run(|| client.get(region, &domain, parameters.clone()))
            .await?;

        let sink: Box<dyn Write> = match output {
            Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
                Error::output(format!("Failed to create {}: {e}", path.display()))
            })?)),
            None => Box::new(io::stdout().lock()),
        };

        let mut writer = RecordWriter::new(sink, format);
        if let Some(field) = field {
            writer = writer.with_field(field);
        }
        let written = writer.write_all(&events)?;

        info!(
            "Wrote {} events for {} ({}) in {:?}",
            written,
            domain,
            region,
            start.elapsed()
        );

        Ok(())
    }

    /// Validate configuration and print the resolved settings
    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;
        config.validate()?;
        let endpoints = config.endpoints();
        let has_key = config.api_key().is_ok();

        println!(
            "{}",
            json!({
                "type": "CONFIG",
                "config": {
                    "api_key": if has_key { "<redacted>" } else { "<missing>" },
                    "region": config.region,
                    "domain": config.domain,
                    "endpoints": { "eu": endpoints.eu, "us": endpoints.us },
                    "timeout_secs": config.timeout_secs,
                    "rate_limit": config.rate_limit,
                    "retry": config.retry,
                }
            })
        );

        config.api_key().map(|_| ())
    }
}
