use certifier::agents::{GeminiAgent, OfflineSource, RelayAgent, TextSource};
use certifier::certificate::CertificateRequest;
use certifier::config::Config;
use certifier::pdf::Composer;
use certifier::routes;
use certifier::state::AppState;
use certifier::storage;
use certifier::submission::{submit, Trigger};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the web form and the text generation endpoint (default)
    Serve,
    /// Generate one certificate and save it to OUTPUT_FOLDER
    Issue(IssueArgs),
}

#[derive(Args, Debug)]
struct IssueArgs {
    /// Student name, printed upper-cased
    #[arg(long)]
    name: String,
    #[arg(long)]
    institution: String,
    /// Course the student is taking at the institution
    #[arg(long)]
    institution_course: String,
    /// Course completed on the platform
    #[arg(long)]
    course: String,
    #[arg(long)]
    manager: String,
    /// Completion date, YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// Fetch the paragraph through a generate-text endpoint instead of Gemini
    #[arg(long, env = "CERTIFIER_RELAY_URL", conflicts_with = "offline")]
    relay: Option<String>,
    /// Use the fallback paragraph without calling any service
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "certifier=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Issue(args) => issue(config, args).await,
    }
}

async fn serve(config: Config) -> Result<(), BoxError> {
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; text generation requests will fail");
    }
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::from_config(config)?);
    let app = routes::create_router(state);

    tracing::info!("Certifier listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn issue(config: Config, args: IssueArgs) -> Result<(), BoxError> {
    let request = CertificateRequest {
        name: args.name,
        institution_name: args.institution,
        institution_course: args.institution_course,
        platform_course: args.course,
        manager_name: args.manager,
        completion_date: args.date,
    };

    let source: Box<dyn TextSource> = if args.offline {
        Box::new(OfflineSource)
    } else if let Some(url) = args.relay {
        Box::new(RelayAgent::new(url, config.generation_timeout)?)
    } else {
        Box::new(GeminiAgent::new(
            config.gemini_api_url.clone(),
            config.gemini_api_key.clone(),
            config.generation_timeout,
        )?)
    };

    let composer = Composer::new(config.template_path.clone(), config.font_dir.clone());
    let mut trigger = Trigger::new();
    let certificate = submit(&mut trigger, source.as_ref(), &composer, request).await?;

    let path = storage::save(&config.output_folder, &certificate)?;
    println!("{}", path.display());
    Ok(())
}
