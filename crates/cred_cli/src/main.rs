use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use cred_core::{AnalysisInput, AnalysisResult, Determination, Error, Result};
use cred_inference::{create_model, GatewayConfig};
use cred_web::AppState;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(
        long,
        default_value = "heuristic",
        help = "Engine to use for analysis. Available engines: heuristic (default), gateway"
    )]
    model: String,
    /// API key for the gateway engine
    #[arg(long, env = "CRED_API_KEY")]
    api_key: Option<String>,
    /// Base URL of the gateway (OpenAI-compatible chat completions)
    #[arg(long)]
    base_url: Option<String>,
    /// Upstream model identifier for the gateway engine
    #[arg(long)]
    model_name: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Analyze article text or a URL
    Analyze {
        /// Article text. Reads stdin when omitted and no --file/--url is given.
        text: Option<String>,
        /// Read the article text from a file
        #[arg(long, conflicts_with = "url")]
        file: Option<PathBuf>,
        /// Fetch the article from a URL
        #[arg(long)]
        url: Option<String>,
        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },
    /// Run the HTTP analysis API
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

fn gateway_config(cli: &Cli) -> GatewayConfig {
    let defaults = GatewayConfig::default();
    GatewayConfig {
        api_key: cli.api_key.clone(),
        base_url: cli.base_url.clone().unwrap_or(defaults.base_url),
        model_name: cli.model_name.clone().unwrap_or(defaults.model_name),
    }
}

async fn build_input(
    engine: &str,
    text: Option<String>,
    file: Option<PathBuf>,
    url: Option<String>,
) -> Result<AnalysisInput> {
    if let Some(text) = text {
        return Ok(AnalysisInput::from_text(text));
    }
    if let Some(path) = file {
        let text = std::fs::read_to_string(&path)?;
        return Ok(AnalysisInput::from_text(text));
    }
    if let Some(url) = url {
        // The gateway forwards the URL upstream; the heuristic engine needs
        // the page text, so fetch and extract it here.
        if engine == "heuristic" {
            let article = cred_extract::fetch_article(&url).await?;
            info!("📰 Extracted \"{}\" ({} chars)", article.title, article.text.len());
            return Ok(AnalysisInput {
                article_text: Some(article.text),
                article_url: Some(url),
            });
        }
        return Ok(AnalysisInput::from_url(url));
    }

    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    if text.trim().is_empty() {
        return Err(Error::InvalidInput(
            "no article text given on stdin".to_string(),
        ));
    }
    Ok(AnalysisInput::from_text(text))
}

fn print_result(result: &AnalysisResult) {
    let emoji = match result.determination {
        Determination::Credible => "✅",
        Determination::Questionable => "⚠️",
        Determination::Fake => "❌",
    };
    println!(
        "{} {} — credibility {}/100",
        emoji, result.determination, result.credibility_score
    );
    println!();
    println!("{}", result.summary);
    println!();
    println!("{}", result.explanation);
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let model = create_model(&cli.model, gateway_config(&cli), None)?;
    info!("🧠 Analysis engine initialized successfully (using {})", model.name());

    match cli.command {
        Commands::Analyze {
            text,
            file,
            url,
            json,
        } => {
            let input = build_input(model.name(), text, file, url).await?;
            let result = model.analyze(&input).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
        }
        Commands::Serve { host, port } => {
            let state = AppState::new(model);
            cred_web::serve(state, &host, port).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_args() {
        let cli = Cli::parse_from(["cred", "analyze", "some text", "--json"]);
        match cli.command {
            Commands::Analyze { text, json, .. } => {
                assert_eq!(text.as_deref(), Some("some text"));
                assert!(json);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::parse_from(["cred", "--model", "gateway", "serve"]);
        assert_eq!(cli.model, "gateway");
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8080);
            }
            _ => panic!("expected serve command"),
        }
    }
}
