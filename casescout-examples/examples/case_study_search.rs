//! Example: find case studies for a project description with OpenAI and Tavily.
//!
//! Reads `TAVILY_API_KEY`, `OPENAI_API_KEY` and optional `OPENAI_MODEL` from the
//! environment, `.env`, or `~/.config/casescout/config.toml` (`[env]` table).
//! Prints the generated query and the raw results as JSON.
//!
//! Run: `cargo run -p casescout-examples --example case_study_search -- "A mobile app for tracking daily water intake"`
//!
//! Set `RUST_LOG=casescout=debug` to see node timings and request logs.

use std::env;
use std::process::ExitCode;

use casescout::{build_case_study_runner, CaseStudyConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = match CaseStudyConfig::load(None) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let description = env::args()
        .nth(1)
        .unwrap_or_else(|| "A mobile app for tracking daily water intake".to_string());

    let runner = match build_case_study_runner(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runner.invoke(description.as_str()).await {
        Ok(state) => {
            println!("query: {}", state.query.unwrap_or_default());
            match serde_json::to_string_pretty(&state.case_studies) {
                Ok(js) => println!("{}", js),
                Err(e) => eprintln!("error: {}", e),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
