use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::sync::Arc;

use career_graph::career::chat::chat_loop;
use career_graph::career::config::Config;
use career_graph::career::graph::{GraphStore, MemoryGraphStore, Neo4jStore};
use career_graph::career::render::render_reply;
use career_graph::career::server;
use career_graph::career::workflow::{Pipeline, PlaceholderTranslator, WorkflowInput};
use career_graph::llm::model::gemini::GeminiModel;
use career_graph::llm::TextGenerator;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Keep the graph in memory instead of connecting to Neo4j
    #[arg(long, global = true)]
    memory_graph: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the workflow once
    Run {
        /// Career query, e.g. "I want to be a data engineer"
        #[arg(short, long)]
        query: String,

        /// Follow-up question, e.g. "What skills are required?"
        #[arg(short, long, default_value = "")]
        followup: String,

        /// Print the full final state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive prompt loop; each line is one workflow run
    Chat,
    /// Serve the workflow over HTTP
    Serve {
        #[arg(short, long, default_value_t = 7860)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = Config::from_env()?;

    log::info!("Using Gemini model: {}", config.gemini_model);
    let model = GeminiModel::new(config.google_api_key.clone(), config.gemini_model.clone())?;
    let generator = TextGenerator::new(Arc::new(model), config.generation.clone());

    let store: Arc<dyn GraphStore> = if args.memory_graph {
        log::info!("Using in-memory graph store");
        Arc::new(MemoryGraphStore::new())
    } else {
        let neo4j = Neo4jStore::connect(&config.neo4j)
            .await
            .context("Failed to connect to Neo4j")?;
        neo4j.ensure_schema().await?;
        Arc::new(neo4j)
    };

    let pipeline = Arc::new(Pipeline::career(
        generator,
        store,
        Arc::new(PlaceholderTranslator),
    ));
    log::info!("Workflow steps: {:?}", pipeline.step_names());

    let result = match args.command {
        Commands::Run {
            query,
            followup,
            json,
        } => run_once(&pipeline, query, followup, json).await,
        Commands::Chat => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            chat_loop(&pipeline, stdin, tokio::io::stdout())
                .await
                .map_err(anyhow::Error::from)
        }
        Commands::Serve { port } => server::serve(pipeline.clone(), port)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e)),
    };

    pipeline.shutdown().await?;
    result
}

async fn run_once(
    pipeline: &Pipeline,
    user_text: String,
    followup_question: String,
    json: bool,
) -> anyhow::Result<()> {
    let input = WorkflowInput {
        user_text,
        followup_question,
    };
    match pipeline.invoke(input).await {
        Ok(state) if json => println!("{}", serde_json::to_string_pretty(&state.to_json())?),
        Ok(state) => println!("{}", render_reply(&state)),
        Err(e) => println!("Error running workflow: {}", e),
    }
    Ok(())
}
