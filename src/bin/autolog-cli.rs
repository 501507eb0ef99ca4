use clap::{Parser, Subcommand};
use reqwest::Method;
use std::path::PathBuf;

use http_autolog::config::{load_config, AutologConfig};
use http_autolog::http::{BodyParameter, ReqwestTransport, Request};
use http_autolog::observability::logging::init_logging;
use http_autolog::AutologClient;

#[derive(Parser)]
#[command(name = "autolog-cli")]
#[command(about = "Send HTTP requests with structured call logging", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Perform one request and log it
    Send {
        /// Absolute URL
        url: String,

        #[arg(short = 'X', long, default_value = "GET")]
        method: String,

        /// `Name: value`, repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// JSON request body
        #[arg(short, long)]
        data: Option<String>,

        /// Extra field names to mask in the logged request body
        #[arg(short, long)]
        mask: Vec<String>,

        /// Properties to drop from this call's log event
        #[arg(long)]
        ignore: Vec<String>,
    },
    /// Validate the configuration file and print it
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AutologConfig::default(),
    };

    match cli.command {
        Commands::Check => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
        Commands::Send {
            url,
            method,
            headers,
            data,
            mask,
            ignore,
        } => {
            let logger = config.logger.take().unwrap_or_default();
            init_logging(&logger);
            config.mask_fields.extend(mask);

            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;
            let mut request = Request::new(method, url);
            for header in &headers {
                let (name, value) = header
                    .split_once(':')
                    .ok_or_else(|| format!("Header '{}' is not in 'Name: value' form", header))?;
                request = request.header(name.trim(), value.trim());
            }
            if let Some(data) = data {
                request = request.body(BodyParameter::text("application/json", data));
            }
            if !ignore.is_empty() {
                let names: Vec<&str> = ignore.iter().map(String::as_str).collect();
                request = request.log_ignored(&names);
            }

            let client = AutologClient::with_configuration(ReqwestTransport::new(), config);
            let response = client.execute(&request).await?;

            if !response.is_successful() {
                eprintln!(
                    "Error: {} {}",
                    response.status_code,
                    response
                        .error_message
                        .as_deref()
                        .or(response.status_description.as_deref())
                        .unwrap_or_default()
                );
            }
            if let Some(content) = &response.content {
                println!("{}", content);
            }
        }
    }

    Ok(())
}
