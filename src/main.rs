mod document;
mod error;
mod generate;
mod layout;
mod session;
mod store;
mod tui;

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};

use crate::{generate::OutlineGenerator, session::Session, store::MapStore};

#[derive(Parser)]
#[command(name = "mindmap-tui")]
#[command(about = "Terminal mind-map viewer with tidy and radial layouts")]
struct Cli {
    /// Directory holding stored maps (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a map from an outline file (or stdin) and store it
    Import { file: Option<PathBuf> },
    /// Open a stored map in the viewer
    View { id: String },
    /// List stored map ids
    List,
    /// Delete a stored map
    Delete { id: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(MapStore::default_dir);

    // The viewer owns the terminal, so logs go to a file next to the maps.
    init_tracing(&data_dir);

    let store = MapStore::new(&data_dir);
    let result = match cli.command {
        Commands::Import { file } => import(file, store),
        Commands::View { id } => view(&id, store).await,
        Commands::List => list(&store),
        Commands::Delete { id } => store.delete(&id),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(data_dir: &Path) {
    let _ = std::fs::create_dir_all(data_dir);
    let Ok(log_file) = std::fs::File::create(data_dir.join("mindmap-tui.log")) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mindmap_tui=info".parse().unwrap()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(false)
        .init();
}

fn import(file: Option<PathBuf>, store: MapStore) -> error::Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let session = Session::from_text(&text, OutlineGenerator, Some(store))?;
    println!("{}", session.id());
    Ok(())
}

async fn view(id: &str, store: MapStore) -> error::Result<()> {
    let session = Session::load(id, OutlineGenerator, store)?;
    tui::run(session).await
}

fn list(store: &MapStore) -> error::Result<()> {
    for id in store.list()? {
        println!("{id}");
    }
    Ok(())
}
