use formula_tui::app::App;
use formula_tui::cli::{
    handle_eval_command, handle_help_command, handle_version_command, parse_args, CliCommand,
};
use formula_tui::logging;
use formula_tui::startup::AppConfig;
use formula_tui::terminal::{setup_panic_hook, TerminalManager};
use formula_tui::ui;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind, MouseButton, MouseEventKind};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::time::Duration;

/// Event loop tick: drives cache housekeeping.
const TICK: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    // Handle flags before any terminal or runtime setup
    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("formula: {}", e);
            eprintln!("Run 'formula --help' for usage.");
            std::process::exit(2);
        }
    };

    let options = match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => handle_help_command(),
        CliCommand::Eval {
            expression,
            options,
        } => {
            let config = load_config()?;
            handle_eval_command(&expression, &options.apply(config))
        }
        CliCommand::Run(options) => options,
    };

    let config = options.apply(load_config()?);

    color_eyre::install()?;
    setup_panic_hook();
    let log_path = logging::init(&config);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), log = ?log_path, "formula starting");

    let runtime = tokio::runtime::Runtime::new()?;
    let mut app = App::from_config(&config)?;

    let mut manager = TerminalManager::new()?;
    let result = runtime.block_on(run_app(manager.terminal(), &mut app));
    manager.restore();

    // Abort outstanding fetches inside the runtime
    runtime.block_on(async move { drop(app) });

    if let Err(ref e) = result {
        tracing::error!(error = %e, "event loop failed");
    }
    tracing::info!("formula exiting");
    result
}

/// Defaults overlaid with the environment. Bad values are reported before the
/// terminal is touched.
fn load_config() -> Result<AppConfig> {
    match AppConfig::from_env() {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!("formula: {}", e);
            std::process::exit(2);
        }
    }
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let Some(mut message_rx) = app.message_rx.take() else {
        return Err(color_eyre::eyre::eyre!("message receiver already taken"));
    };

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, &mut *app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = tokio::time::sleep(TICK) => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(event)) => handle_event(app, event),
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }

            Some(msg) = message_rx.recv() => {
                app.handle_message(msg);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Resize(_, _) => app.mark_dirty(),
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            app.mark_dirty();
            app.handle_key(key);
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                app.handle_click(mouse.column, mouse.row);
            }
            MouseEventKind::Moved => {
                app.handle_mouse_move(mouse.column, mouse.row);
            }
            _ => {}
        },
        Event::Paste(text) => app.handle_paste(&text),
        _ => {}
    }
}
