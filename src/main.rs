//! Interactive entry point.

use std::sync::Arc;

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use devflow::agent::Agent;
use devflow::config::LlmConfig;
use devflow::llm::create_llm_provider;
use devflow::tools::ToolRegistry;

#[derive(Parser, Debug)]
#[command(name = "devflow", about = "Agentic development assistant", version)]
struct Cli {
    /// Model used for step-loop completions.
    #[arg(long, env = "DEVFLOW_MODEL")]
    model: Option<String>,

    /// Model used for scenario classification.
    #[arg(long, env = "DEVFLOW_SELECTOR_MODEL")]
    selector_model: Option<String>,

    /// Base URL of the OpenAI-compatible API.
    #[arg(long, env = "DEVFLOW_BASE_URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("devflow=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = LlmConfig::from_env();
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    if let Some(selector_model) = cli.selector_model {
        config = config.with_selector_model(selector_model);
    }
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    let llm = create_llm_provider(&config)?;
    let registry = Arc::new(ToolRegistry::builtin());
    let agent = Agent::new(llm, registry, config.selector_model.clone());

    println!("AI Development Assistant");
    println!("Workflow: ANALYZE -> THINK -> ACTION -> RESULT -> OBSERVE -> OUTPUT");
    println!("Type 'tools' to list available tools, 'quit' to exit.");

    let mut editor = DefaultEditor::new()?;
    let mut history = Vec::new();

    loop {
        let line = match editor.readline("\n> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        editor.add_history_entry(query)?;

        match query.to_lowercase().as_str() {
            "quit" | "exit" | "q" => break,
            "tools" => {
                println!("Available tools:");
                for (name, description) in agent.tool_descriptions() {
                    println!("  {} - {}", name, description);
                }
                continue;
            }
            _ => {}
        }

        println!("Processing: {}", query);
        let outcome = agent.run_query(query, history).await;
        history = outcome.history;

        if outcome.completed {
            println!("\nTask completed.");
            println!("{}", server_instructions(query));
        } else {
            println!("\nTask did not complete. You can rephrase and try again.");
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Run instructions keyed on query keywords, shown after a completed task.
fn server_instructions(query: &str) -> &'static str {
    let query = query.to_lowercase();
    let matches = |words: &[&str]| words.iter().any(|w| query.contains(w));

    if matches(&["react", "frontend", "ui", "component", "todo"]) {
        "Your React app is ready! To run it:\n\
         1. Navigate to your project directory\n\
         2. Run: npm install (if not already done)\n\
         3. Run: npm start\n\
         4. Open http://localhost:3000 in your browser"
    } else if matches(&["fastapi", "api", "backend"]) {
        "Your FastAPI backend is ready! To run it:\n\
         1. Navigate to your project directory\n\
         2. Run: pip install fastapi uvicorn\n\
         3. Run: uvicorn main:app --reload\n\
         4. Open http://localhost:8000 in your browser\n\
         5. API docs at http://localhost:8000/docs"
    } else if matches(&["django", "admin"]) {
        "Your Django project is ready! To run it:\n\
         1. Navigate to your project directory\n\
         2. Run: pip install django\n\
         3. Run: python manage.py migrate\n\
         4. Run: python manage.py runserver\n\
         5. Open http://localhost:8000 in your browser"
    } else if matches(&["node", "express", "javascript"]) {
        "Your Node.js project is ready! To run it:\n\
         1. Navigate to your project directory\n\
         2. Run: npm install\n\
         3. Run: npm start (or node app.js)\n\
         4. Check the console output for the server URL"
    } else if matches(&["fullstack", "full-stack", "both frontend and backend"]) {
        "Your full-stack app is ready! To run it:\n\
         1. Backend: Navigate to backend directory and run the server\n\
         2. Frontend: Navigate to frontend directory and run npm start\n\
         3. Check the console output for server URLs"
    } else if matches(&["python", "script", "calculator"]) {
        "Your Python script is ready! To run it:\n\
         1. Navigate to your project directory\n\
         2. Run: python your_script.py\n\
         3. Check the console output for results"
    } else {
        "Your project is ready! Check the files created above and run the \
         appropriate commands to start your application."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_instructions_keyed_on_keywords() {
        assert!(server_instructions("build a react todo app").contains("npm start"));
        assert!(server_instructions("make a fastapi backend").contains("uvicorn"));
        assert!(server_instructions("django admin panel").contains("manage.py"));
        assert!(server_instructions("an express server").contains("node app.js"));
        assert!(server_instructions("a python calculator").contains("python your_script.py"));
        assert!(server_instructions("something else entirely").contains("Your project is ready"));
    }

    #[test]
    fn test_keyword_priority_order() {
        // "react api" matches the react arm first, as the source did.
        assert!(server_instructions("react api client").contains("React app"));
    }
}
