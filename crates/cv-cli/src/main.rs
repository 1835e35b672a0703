//! Political Claim Verifier CLI

mod render;

use clap::{Parser, Subcommand};
use cv_core::{ClaimForm, ClientConfig, FormStatus, HttpVerifier, Verifier};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "claim-verifier")]
#[command(about = "Check political claims against the verification service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verification service base URL, e.g. http://localhost:8000
    #[arg(long, global = true, env = "CLAIM_VERIFIER_API_BASE_URL")]
    api_base_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a single claim
    Verify {
        /// Claim text (several words are joined with spaces)
        #[arg(required = true)]
        claim: Vec<String>,
    },

    /// Read claims from stdin, one per line
    Interactive,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let config = match ClientConfig::from_optional(cli.api_base_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };
    info!("Using verification endpoint {}", config.endpoint());

    let verifier = HttpVerifier::new(&config);

    let succeeded = match cli.command {
        Commands::Verify { claim } => cmd_verify(&verifier, claim.join(" ")).await,
        Commands::Interactive => cmd_interactive(&verifier).await,
    };

    if !succeeded {
        std::process::exit(1);
    }
}

async fn cmd_verify(verifier: &HttpVerifier, claim: String) -> bool {
    let mut form = ClaimForm::new();
    form.set_input(claim);
    submit(&mut form, verifier).await;

    print!("{}", render::render(&form.view()));
    matches!(form.status(), FormStatus::Succeeded(_))
}

async fn cmd_interactive(verifier: &HttpVerifier) -> bool {
    println!("Enter a political claim per line ('quit' to exit).");

    let mut form = ClaimForm::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if let Err(e) = render::write_prompt(&mut std::io::stdout()) {
            error!("Failed to write prompt: {}", e);
            return false;
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                return false;
            }
        };

        if matches!(line.trim(), "quit" | "exit") {
            break;
        }

        form.set_input(line);
        submit(&mut form, verifier).await;
        print!("{}", render::render(&form.view()));
    }

    true
}

/// Drive one submission, echoing the in-progress label while it runs.
async fn submit(form: &mut ClaimForm, verifier: &HttpVerifier) {
    let Some(pending) = form.begin_submit() else {
        return;
    };

    eprintln!("{}", form.view().submit_label);
    let outcome = verifier.verify(&pending.claim).await;
    form.settle(pending.attempt, outcome);
}
