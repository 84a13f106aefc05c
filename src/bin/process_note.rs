use clap::Parser;
use sticky_notes::app;
use sticky_notes::core::store::DEFAULT_RECENT_LIMIT;
use sticky_notes::core::Command;
use sticky_notes::utils::{logger, validation::Validate};
use sticky_notes::ConfigArgs;

#[derive(Parser)]
#[command(name = "process-note")]
#[command(about = "Run one note through the LLM and save the Tiptap document")]
struct Args {
    /// Note ID to process (ignored for profile_insight)
    #[arg(long)]
    note_id: Option<String>,

    /// summarize | enlarge | format | profile_insight
    #[arg(long)]
    command: String,

    /// How many recent notes feed profile_insight
    #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
    limit: usize,

    #[command(flatten)]
    config: ConfigArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = args.config.load()?;
    logger::init_logger(args.config.verbose, config.logging.json);

    let command: Command = args.command.parse()?;

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let pipeline = app::build_pipeline(&config)?;

    // 有 note_id 走單筆流程，profile_insight 沒給 id 則彙整最近的筆記
    let result = match (&args.note_id, command) {
        (Some(note_id), _) => pipeline
            .run(note_id, command)
            .await
            .and_then(|outcome| Ok(serde_json::to_string_pretty(&outcome)?)),
        (None, Command::ProfileInsight) => pipeline
            .run_profile_insight(args.limit)
            .await
            .and_then(|outcome| Ok(serde_json::to_string_pretty(&outcome)?)),
        (None, _) => {
            eprintln!("❌ --note-id is required for '{}'", command);
            std::process::exit(2);
        }
    };

    match result {
        Ok(json) => {
            println!("{}", json);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Processing failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
