use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use hyperpix::{
    app::App,
    app_dirs::AppDirs,
    catalog::Catalog,
    config::{Config, ConfigStore, FileConfigStore},
    error::CatalogError,
    game::Game,
    logging,
    provision::{build_provisioner, Selection},
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
};

/// guess the picture before the pixels clear
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal picture guessing game. Each of ten levels hides an image behind a mosaic that sharpens after every wrong guess; fewer guesses earn more points."
)]
pub struct Cli {
    /// built-in image catalog to play with (pexels, classic)
    #[clap(short = 'c', long)]
    catalog: Option<String>,

    /// load the image catalog from a JSON file instead
    #[clap(long, value_name = "PATH", conflicts_with = "catalog")]
    catalog_file: Option<PathBuf>,

    /// how session images are drawn from the catalog
    #[clap(long, value_enum)]
    selection: Option<Selection>,

    /// order images from easy to hard (same as --selection balanced)
    #[clap(short = 'b', long, conflicts_with = "selection")]
    balance: bool,

    /// seed for a reproducible image order
    #[clap(long)]
    seed: Option<u64>,

    /// dismiss the level summary automatically after this many milliseconds
    #[clap(long, value_name = "MS")]
    auto_continue_ms: Option<u64>,

    /// disable the letter hint
    #[clap(long)]
    no_hints: bool,

    /// validate the catalog, print a report and exit
    #[clap(long)]
    check_catalog: bool,

    /// persist the given options as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Layer command line options over the stored preferences
    fn apply(&self, mut config: Config) -> Config {
        if let Some(catalog) = &self.catalog {
            config.catalog = catalog.clone();
        }
        if let Some(selection) = self.selection {
            config.selection = selection;
        }
        if self.balance {
            config.selection = Selection::Balanced;
        }
        if self.auto_continue_ms.is_some() {
            config.auto_continue_ms = self.auto_continue_ms;
        }
        if self.no_hints {
            config.hints = false;
        }
        config
    }

    fn load_catalog(&self, config: &Config) -> Result<Catalog, CatalogError> {
        match &self.catalog_file {
            Some(path) => Catalog::from_path(path),
            None => Catalog::builtin(&config.catalog),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = AppDirs::log_path() {
        // the game is playable without a log file
        let _ = logging::init_file_logging(&path);
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    let catalog = cli.load_catalog(&config)?;

    if cli.check_catalog {
        return check_catalog(&catalog);
    }

    if cli.save_config {
        store.save(&config)?;
        tracing::info!(path = %store.path().display(), "saved config");
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    tracing::info!(
        catalog = catalog.name(),
        images = catalog.len(),
        selection = %config.selection,
        "starting hyperpix"
    );

    let provisioner = build_provisioner(config.selection, catalog, cli.seed);
    let game = match cli.seed {
        Some(seed) => Game::with_hint_seed(provisioner, seed),
        None => Game::new(provisioner),
    };
    let mut app = App::new(game, config);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    while !app.should_quit {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            GameEvent::Key(key) => app.on_key(key),
            GameEvent::Paste(text) => app.on_paste(&text),
            GameEvent::Resize => {}
            GameEvent::Tick => app.on_tick(Instant::now()),
        }
    }

    tracing::info!(score = app.game.state().score, "quit");
    Ok(())
}

fn check_catalog(catalog: &Catalog) -> Result<(), Box<dyn Error>> {
    let report = catalog.validate();

    println!("catalog `{}`: {} images", catalog.name(), report.total_images);
    for (difficulty, count) in &report.difficulty_distribution {
        println!("  difficulty {difficulty}: {count}");
    }
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    for error in &report.errors {
        println!("error: {error}");
    }

    if report.is_valid {
        Ok(())
    } else {
        Err(format!("catalog `{}` failed validation", catalog.name()).into())
    }
}
