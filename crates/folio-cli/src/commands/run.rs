use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{info, warn};

use folio_core::AppConfig;
use folio_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    widgets,
};

pub async fn run(config: Arc<AppConfig>, content: Option<PathBuf>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Malformed content refuses to start before the terminal is touched
    let catalog = super::load_catalog(&config, content.as_deref())?;
    catalog.validate()?;
    let mut app = App::new(config.clone(), catalog)?;
    info!(items = app.catalog.items().len(), "starting folio");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Folio"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &keymap);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, keymap: &Keymap) -> Result<()> {
    // Create event handler with animation FPS support
    let event_handler =
        EventHandler::with_animation_fps(app.config.ui.tick_rate_ms, app.config.ui.scroll.animation_fps);

    // Checked at the end of each iteration to pick the next poll timeout
    let mut needs_fast_update = false;
    // Idle ticks with nothing new skip the draw
    let mut dirty = true;
    let mut last_frame = Instant::now();

    loop {
        let now = Instant::now();
        app.tick(now.duration_since(last_frame));
        last_frame = now;

        let progressed = app.take_progress_changes();
        if dirty || needs_fast_update || progressed {
            terminal.draw(|frame| widgets::draw(frame, app))?;
        }
        dirty = false;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            dirty = !matches!(event, AppEvent::Tick);
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    app.handle_action(action);
                }
                AppEvent::Mouse(mouse) => app.on_mouse(mouse),
                AppEvent::Resize(width, height) => app.resize(width, height),
                AppEvent::Tick => {}
            }
        }

        if let Some(url) = app.take_open_request() {
            open_media(app, &url);
            dirty = true;
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Hand a media URL to the system browser or player
fn open_media(app: &mut App, url: &str) {
    match open::that(url) {
        Ok(()) => {
            info!(url, "opened media");
            app.set_status(format!("Opened {}", url));
        }
        Err(e) => {
            warn!(url, error = %e, "failed to open media");
            app.set_status(format!("Failed to open media: {}", e));
        }
    }
}
