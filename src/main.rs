//! Terminal lifecycle, event loop, and cleanup for the chat widget.

mod actions;
mod backend;
mod config;
mod error;
mod events;
mod state;
mod ui;
mod widget;

use std::fs::OpenOptions;
use std::io;
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::{info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use backend::HttpBackend;
use config::WidgetConfig;
use events::{key_to_action, mouse_to_action, TICK_RATE};
use ui::{layout, Theme};
use widget::ChatWidget;

/// The widget owns the terminal, so logs go to a file or nowhere.
fn init_logging(log_file: Option<String>) -> Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::sink),
    };
    // RUST_LOG controls the filter.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("chat_widget=info".parse()?))
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging(std::env::var(config::ENV_LOG_FILE).ok().filter(|p| !p.trim().is_empty()))?;

    let config = WidgetConfig::from_env();
    let theme = Theme::from_primary(config.primary.as_deref());
    let backend = Arc::new(HttpBackend::new(config.endpoint.clone(), config.timeout)?);
    info!(endpoint = %config.endpoint, lang = %config.lang, "starting chat widget");

    let health = Arc::clone(&backend);
    thread::spawn(move || {
        if health.health_check() {
            info!(endpoint = health.endpoint(), "backend reachable");
        } else {
            warn!(endpoint = health.endpoint(), "backend health check failed");
        }
    });

    // Set up the terminal in raw / alternate-screen mode.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut widget = ChatWidget::new(backend, config.lang.clone());
    widget.mount();

    let result = run_loop(&mut terminal, &mut widget, &theme);
    info!(failures = widget.diagnostics().len(), "chat widget closing");
    widget.unmount();

    // Always restore the terminal, even on error.
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture);
    let _ = terminal.show_cursor();

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    widget: &mut ChatWidget,
    theme: &Theme,
) -> Result<()> {
    loop {
        widget.tick = widget.tick.wrapping_add(1);
        widget.poll_replies();

        if widget.should_quit {
            return Ok(());
        }

        let size = terminal.size()?;
        let root = Rect::new(0, 0, size.width, size.height);
        let regions = layout::compute(root);
        widget.set_viewport(regions.messages.width, regions.messages.height);

        let tick = widget.tick;
        terminal.draw(|frame| ui::render(frame, root, widget, theme, tick))?;

        if event::poll(TICK_RATE)? {
            let action = match event::read()? {
                Event::Key(key) => key_to_action(&key, widget.state.popup_open),
                Event::Mouse(mouse) => mouse_to_action(&mouse, &regions, widget.state.popup_open),
                _ => None,
            };
            if let Some(a) = action {
                widget.dispatch(a);
                if widget.should_quit {
                    return Ok(());
                }
            }
        }
    }
}
