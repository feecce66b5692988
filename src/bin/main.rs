use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use speedread_core::recent::RecentTexts;
use speedread_host::{
    network::{ContentServiceConfig, DEFAULT_API_URL},
    storage::FileStore,
};

use reading::{ReadOptions, TextSource};

#[path = "main/reading.rs"]
mod reading;
#[path = "main/settings_sync.rs"]
mod settings_sync;

const SETTINGS_SAVE_DEBOUNCE_MS: u64 = 1_500;
const DATA_DIR_NAME: &str = "speedread";

#[derive(Debug, Parser)]
#[command(name = "speedread", version, about = "RSVP speed reading in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read a text one word at a time.
    Read {
        /// Plain text file to read.
        #[arg(
            required_unless_present_any = ["recent", "shared"],
            conflicts_with_all = ["recent", "shared"]
        )]
        file: Option<PathBuf>,
        /// Reopen a recently read text by id.
        #[arg(long, conflicts_with = "shared")]
        recent: Option<String>,
        /// Open a text shared through a content service, by uuid.
        #[arg(long)]
        shared: Option<String>,
        /// Content service used by `--shared`.
        #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,
        /// Reading speed for this session.
        #[arg(long)]
        wpm: Option<u32>,
        /// Words shown together for this session.
        #[arg(long)]
        chunk_size: Option<usize>,
        #[arg(long, env = "SPEEDREAD_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },
    /// List recently read texts.
    Recent {
        #[arg(long, env = "SPEEDREAD_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },
    /// Run the shared-content HTTP service.
    Serve {
        /// Overrides `PORT`.
        #[arg(long)]
        port: Option<u16>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Read {
            file,
            recent,
            shared,
            api_url,
            wpm,
            chunk_size,
            data_dir,
        } => {
            let source = match (file, recent, shared) {
                (Some(path), _, _) => TextSource::File(path),
                (None, Some(id), _) => TextSource::Recent(id),
                (None, None, Some(id)) => TextSource::Shared { id, api_url },
                (None, None, None) => {
                    anyhow::bail!("nothing to read: pass a file, --recent <ID> or --shared <UUID>")
                }
            };
            reading::run(ReadOptions {
                source,
                wpm,
                chunk_size,
                data_dir: resolve_data_dir(data_dir),
            })
        }
        Command::Recent { data_dir } => list_recent(resolve_data_dir(data_dir)),
        Command::Serve { port } => serve(port),
    }
}

fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| dirs::data_dir().map(|dir| dir.join(DATA_DIR_NAME)))
        .unwrap_or_else(|| PathBuf::from(".").join(DATA_DIR_NAME))
}

fn list_recent(data_dir: PathBuf) -> Result<()> {
    let store = FileStore::open(&data_dir)
        .with_context(|| format!("opening data dir {}", data_dir.display()))?;
    let recent = RecentTexts::load(store);

    if recent.is_empty() {
        println!("No recent texts.");
        return Ok(());
    }
    for entry in recent.entries() {
        let created = chrono::DateTime::from_timestamp_millis(entry.created_at as i64)
            .map(|at| at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "{}  {}  {:>6} words  {}",
            entry.id, created, entry.word_count, entry.preview
        );
    }
    Ok(())
}

fn serve(port: Option<u16>) -> Result<()> {
    let mut config = ContentServiceConfig::from_env().context("reading content service config")?;
    if let Some(port) = port {
        config = config.with_port(port);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    runtime
        .block_on(speedread_host::network::serve(config))
        .context("content service failed")
}
