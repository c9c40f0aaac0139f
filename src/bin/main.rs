use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinematch_rs::config::Config;
use cinematch_rs::web::GridState;

#[derive(Parser, Debug)]
#[command(name = "cinematch-server")]
#[command(about = "Movie discovery and recommendation server", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "cinematch.yaml")]
    config: String,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Print the detail page for a title.
    Lookup {
        title: String,
        #[arg(long)]
        json: bool,
    },
    /// List popular movies for one or more genre ids.
    Discover {
        #[arg(value_delimiter = ',', required = true)]
        genres: Vec<u32>,
    },
}

fn init_tracing(config: &Config) {
    let default_filter = if config.debug_logs {
        "cinematch_rs=debug,tower_http=debug"
    } else {
        "cinematch_rs=info,tower_http=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logformat == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::from_file(&args.config)?;
    config.debug_logs = args.debug;
    init_tracing(&config);

    tracing::info!("Using config file: {}", args.config);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => cinematch_rs::serve(config).await?,
        Command::Lookup { title, json } => {
            let page = cinematch_rs::lookup(&config, &title).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print!("{}", page);
            }
        }
        Command::Discover { genres } => match cinematch_rs::discover(&config, &genres).await? {
            GridState::Populated { movies } => {
                for movie in movies {
                    println!("{:>8}  {}", movie.id, movie.title);
                }
            }
            GridState::Error { message } => eprintln!("Error: {}", message),
            GridState::Empty | GridState::Loading => println!("No movies found."),
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
