use std::{
    fs, io,
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use log::info;
use speedread_core::{
    app::{InputOutcome, Reader},
    content::Document,
    recent::RecentTexts,
    settings::{ReaderSettings, SettingsCache},
};
use speedread_host::{
    input::{KeyboardInput, RawModeGuard},
    network::ContentClient,
    render::TerminalRenderer,
    storage::FileStore,
};

use crate::settings_sync::SettingsSyncState;

// Upper bound on how long input can wait while a token is on screen.
const INPUT_POLL_MS: u64 = 20;
const HELP: &str = "keys: space play/pause  left/right back/forward 5  up/down speed preset  \
[ ] sentence  { } paragraph  r restart  q/esc quit";

pub(crate) enum TextSource {
    File(PathBuf),
    Recent(String),
    Shared { id: String, api_url: String },
}

pub(crate) struct ReadOptions {
    pub(crate) source: TextSource,
    pub(crate) wpm: Option<u32>,
    pub(crate) chunk_size: Option<usize>,
    pub(crate) data_dir: PathBuf,
}

pub(crate) fn run(options: ReadOptions) -> Result<()> {
    let store = FileStore::open(&options.data_dir)
        .with_context(|| format!("opening data dir {}", options.data_dir.display()))?;
    let mut settings_cache = SettingsCache::new(store.clone());
    let mut recent = RecentTexts::load(store);

    let text = match &options.source {
        TextSource::File(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            recent.add_text(&text, wall_clock_ms());
            text
        }
        TextSource::Recent(id) => recent
            .get_text(id)
            .with_context(|| format!("no stored text with id {id}"))?,
        TextSource::Shared { id, api_url } => fetch_shared(id, api_url)?,
    };

    let settings = session_settings(settings_cache.settings().clone(), &options);
    let document = Document::parse(&text);
    if document.is_empty() {
        println!("Nothing to read.");
        return Ok(());
    }

    let started = Instant::now();
    let now_ms = || started.elapsed().as_millis() as u64;

    let mut reader = Reader::new(settings.clone());
    reader.load(document.tokens_for(settings.chunk_size), now_ms());
    let mut sync = SettingsSyncState::new(reader.wpm());

    info!(
        "reader: loaded words={} tokens={} wpm={} chunk_size={}",
        document.word_count(),
        reader.tokens().len(),
        reader.wpm(),
        settings.chunk_size
    );
    println!("{HELP}");

    let raw_mode = RawModeGuard::enable().context("switching terminal to raw mode")?;
    let mut input = KeyboardInput::terminal();
    let renderer = TerminalRenderer::default();
    let mut stdout = io::stdout();
    let mut last_frame = None;

    reader.play(now_ms());
    loop {
        let now = now_ms();
        if reader.process_inputs(&mut input, now) == InputOutcome::Exit {
            break;
        }
        reader.tick(now);

        let frame = (reader.current_index(), reader.status(), reader.wpm());
        if last_frame != Some(frame) {
            renderer.render(&reader.view(), &mut stdout)?;
            last_frame = Some(frame);
        }

        sync.track_current(reader.wpm(), now);
        sync.flush_if_due(&mut settings_cache, now);

        let wait = reader
            .next_deadline_ms()
            .map_or(INPUT_POLL_MS, |due| due.saturating_sub(now))
            .clamp(1, INPUT_POLL_MS);
        thread::sleep(Duration::from_millis(wait));
    }

    sync.flush(&mut settings_cache, now_ms());
    drop(raw_mode);
    println!();
    info!(
        "reader: exit position={}/{} status={}",
        reader.current_index() + 1,
        reader.tokens().len(),
        reader.status().as_str()
    );
    Ok(())
}

/// Stored settings with this session's command-line overrides.
fn session_settings(stored: ReaderSettings, options: &ReadOptions) -> ReaderSettings {
    let mut settings = stored;
    if let Some(wpm) = options.wpm {
        settings.wpm = wpm.min(u16::MAX as u32) as u16;
    }
    if let Some(chunk_size) = options.chunk_size {
        settings.chunk_size = chunk_size;
    }
    settings.sanitized()
}

fn fetch_shared(id: &str, api_url: &str) -> Result<String> {
    let client = ContentClient::new(api_url);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let content = runtime
        .block_on(client.fetch(id))
        .with_context(|| format!("opening shared text {id} from {}", client.base_url()))?;
    Ok(content.text)
}

fn wall_clock_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}
