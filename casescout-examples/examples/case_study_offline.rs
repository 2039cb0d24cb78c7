//! Example: the case-study graph with mock clients, printing stream events.
//!
//! No keys or network needed. Shows the node order and the per-node updates.
//!
//! Run: `cargo run -p casescout-examples --example case_study_offline -- "a budgeting app for students"`

use std::env;
use std::sync::Arc;

use casescout::{CaseStudy, CaseStudyRunner, MockLlm, MockSearch, StreamEvent};
use tokio_stream::StreamExt;

#[tokio::main]
async fn main() {
    let description = env::args()
        .nth(1)
        .unwrap_or_else(|| "a budgeting app for students".to_string());

    let llm = Arc::new(MockLlm::new(
        r#"{"query": "student budgeting app case study"}"#,
    ));
    let search = Arc::new(MockSearch::new(vec![
        CaseStudy::new(
            "How a campus finance app reached 50k students",
            "https://example.com/campus-finance",
            "Launch, growth channels and retention numbers.",
        ),
        CaseStudy::new(
            "Budgeting app post-mortem",
            "https://example.com/budget-postmortem",
            "Why the app shut down after two years.",
        ),
    ]));

    let runner = match CaseStudyRunner::new(llm, search) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {}", e);
            return;
        }
    };
    let mut stream = match runner.stream(description.as_str()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            return;
        }
    };

    while let Some(event) = stream.next().await {
        match event {
            StreamEvent::TaskStart { node_id } => println!("[{}] start", node_id),
            StreamEvent::Updates { node_id, update } => println!("[{}] update: {:?}", node_id, update),
            StreamEvent::Values(state) => {
                println!("  query: {:?}, results: {}", state.query, state.case_studies.len())
            }
            StreamEvent::TaskEnd { node_id, result } => match result {
                Ok(()) => println!("[{}] done", node_id),
                Err(e) => println!("[{}] failed: {}", node_id, e),
            },
        }
    }
}
