use std::error::Error;

use clap::{Parser, Subcommand};
use redmark_rs::{CorrectionEngine, CorrectionSet, StaticEngine, highlight};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "redmark", about = "Check text and review corrections", version)]
pub struct Cli {
    /// Emit JSON instead of human-readable tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run text through the correction engine and show flagged spans.
    Check {
        /// Text to check; multiple arguments are joined with spaces.
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Look up chemistry-domain suggestions for a single word.
    Suggest {
        /// Word to search the chemistry dictionary for.
        word: String,
    },
    /// Start the web front-end.
    #[cfg(feature = "web")]
    Serve {
        /// Address to bind, e.g. 127.0.0.1:8080.
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: std::net::SocketAddr,
        /// Page theme: tailwind or bootstrap.
        #[arg(long, default_value = "tailwind")]
        theme: String,
        /// Public base URL used for canonical links.
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        base_url: String,
    },
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Check { text } => handle_check(text.join(" "), cli.json),
        Command::Suggest { word } => handle_suggest(word, cli.json),
        #[cfg(feature = "web")]
        Command::Serve {
            addr,
            theme,
            base_url,
        } => handle_serve(addr, theme, base_url),
    }
}

fn handle_check(text: String, as_json: bool) -> Result<(), Box<dyn Error>> {
    let engine = StaticEngine::new();
    let check = engine.correct_grammar(&text)?;
    let highlighted = highlight(&text, &check);

    if as_json {
        let payload = json!({
            "original_text": text,
            "highlighted_text": highlighted,
            "mistake_count": check.mistake_count,
            "corrections": CorrectionSet::from_check(&check),
            "real_word_errors": check.real_word_errors,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if check.mistake_count == 0 {
        println!("No mistakes found.");
        return Ok(());
    }
    println!("{} flagged span(s):", check.mistake_count);
    print_correction_table(&check.corrections);
    if let Some(highlighted) = highlighted {
        println!("\nHighlighted:");
        println!("{highlighted}");
    }
    Ok(())
}

fn handle_suggest(word: String, as_json: bool) -> Result<(), Box<dyn Error>> {
    let engine = StaticEngine::new();
    let suggestions = engine.chemistry_suggestions(&word)?;

    if as_json {
        let payload = json!({ "word": word, "suggestions": suggestions });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("No suggestions for \"{word}\".");
    } else {
        println!("Suggestions for \"{word}\":");
        for suggestion in suggestions {
            println!("- {suggestion}");
        }
    }
    Ok(())
}

fn print_correction_table(corrections: &[redmark_rs::Correction]) {
    let width = corrections
        .iter()
        .map(|c| c.original.len())
        .max()
        .unwrap_or(4)
        .max("WORD".len());
    println!("{:<width$}  {}", "WORD", "SUGGESTIONS", width = width);
    println!("{:-<width$}  {}", "", "-----------", width = width);
    for correction in corrections {
        println!(
            "{:<width$}  {}",
            correction.original,
            correction.suggestions.join(", "),
            width = width
        );
    }
}

#[cfg(feature = "web")]
fn handle_serve(
    addr: std::net::SocketAddr,
    theme: String,
    base_url: String,
) -> Result<(), Box<dyn Error>> {
    use redmark_rs::web::{WebConfig, WebTheme, serve};
    use std::sync::Arc;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let theme = match theme.as_str() {
        "tailwind" => WebTheme::Tailwind,
        "bootstrap" => WebTheme::Bootstrap,
        other => return Err(format!("Unknown theme {other:?}").into()),
    };
    let config = WebConfig {
        addr,
        theme,
        base_url,
    };
    let engine = Arc::new(StaticEngine::new());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(config, engine))?;
    Ok(())
}
