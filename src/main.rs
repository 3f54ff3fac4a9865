use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

use typeline::{
    app::{App, Command, Flow},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    language::Language,
    logging::setup_logging,
    runtime::{CrosstermEventSource, EventSource, Runner, TerminalEvent},
    word_generator::{WordGenConfig, WordGenerator},
};

/// minimal typing speed trainer with live wpm, cpm and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// number of words in each prompt
    #[clap(short = 'w', long, value_parser = parse_word_count)]
    number_of_words: Option<usize>,

    /// word list to draw prompts from
    #[clap(short = 'l', long)]
    word_list: Option<String>,

    /// custom prompt to type instead of random words
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// log filter written to the log file (overridden by TYPELINE_LOG)
    #[clap(long)]
    log_level: Option<String>,

    /// persist the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

fn parse_word_count(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Cli {
    /// Flags given on the command line win over stored settings.
    fn apply(&self, stored: Config) -> Config {
        Config {
            number_of_words: self.number_of_words.unwrap_or(stored.number_of_words),
            word_list: self.word_list.clone().unwrap_or(stored.word_list),
            log_level: self.log_level.clone().unwrap_or(stored.log_level),
        }
    }

    fn to_word_gen_config(&self, config: &Config) -> WordGenConfig {
        WordGenConfig {
            number_of_words: config.number_of_words,
            custom_prompt: self.prompt.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let (stored, load_error) = load_stored(&store);
    let config = cli.apply(stored);
    if cli.save_config {
        store.save(&config)?;
    }

    setup_logging(&AppDirs::log_path(), &config.log_level)?;
    if let Some(e) = load_error {
        tracing::warn!(path = %store.path().display(), error = %e, "ignoring unreadable config");
    }

    let language = Language::new(&config.word_list).inspect_err(|e| {
        tracing::error!(error = %e, available = ?Language::available(), "cannot load word list")
    })?;
    tracing::info!(
        word_list = %language.name,
        words = config.number_of_words,
        custom_prompt = cli.prompt.is_some(),
        config = %store.path().display(),
        "starting"
    );
    let mut app = App::new(WordGenerator::new(cli.to_word_gen_config(&config), language));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new());
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    result
}

/// Stored settings, falling back to defaults. The load error is handed back
/// because the logger is configured from these settings and does not exist yet.
fn load_stored(store: &FileConfigStore) -> (Config, Option<typeline::Error>) {
    match store.try_load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

fn start_tui<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while let Some(event) = runner.step() {
        let command = match event {
            TerminalEvent::Key(key) => Command::from_key(key),
            TerminalEvent::Resize(width, height) => Some(Command::Resize { width, height }),
        };
        let Some(command) = command else {
            continue;
        };

        if app.dispatch(command) == Flow::Quit {
            break;
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}
