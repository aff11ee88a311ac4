use anyhow::{bail, Result};
use proxy_generator::cli::{self, Command};
use proxy_generator::config::Config;
use proxy_generator::{pipeline, proxies};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("proxy_generator=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match cli::parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    // Load configuration from environment
    let config = Config::from_env()?;

    match command {
        Command::Microsoft {
            source_file,
            config_file,
        } => {
            info!("Generating Excel bindings");
            let summary =
                pipeline::generate_microsoft(&config, proxies::modules(), &source_file, &config_file)
                    .await?;
            info!(
                "Generated {} functions for {} classes",
                summary.functions, summary.classes
            );
        }
        Command::Google { .. } => bail!("Google Sheets generation is not implemented"),
    }

    Ok(())
}
