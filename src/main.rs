//! A 12-column grid of items in the terminal.
//!
//! Drag an item's body to reorder it; drag the `┃` handle on its right edge
//! to resize it.  Widths snap to whole grid columns.

use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use tracing_subscriber::EnvFilter;

use col_grid::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use col_grid::config::AppConfig;
use col_grid::core::GridModel;
use col_grid::ui::{grid_widget::GridWidget, layout::AppLayout, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Drag-to-reorder, drag-to-resize 12-column grid")]
struct Cli {
    /// Number of items to start with (overrides the config file).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=64))]
    items: Option<u32>,

    /// Initial column span of every item, 1-12 (overrides the config file).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
    span: Option<u8>,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    // Only emits anything when RUST_LOG is set.
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut config = AppConfig::load();
    if let Some(items) = cli.items {
        config.initial_items = items;
    }
    if let Some(span) = cli.span {
        config.initial_span = span;
    }
    let grid = GridModel::with_uniform(config.initial_items, config.initial_span);
    tracing::info!(items = grid.len(), span = config.initial_span, "starting");
    let mut state = AppState::new(grid, config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(Duration::from_millis(100));

    // ── event loop ────────────────────────────────────────────
    // One event is fully applied before the next draw, so the renderer always
    // sees the model right after each mutation.
    loop {
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            let layout = AppLayout::from_area(frame.area());

            let grid_block = AppLayout::grid_block()
                .title(" grid ")
                .title_style(Theme::title_style())
                .border_style(Theme::border_style());
            let grid_widget = GridWidget::new(&state.grid)
                .selected(state.selected)
                .block(grid_block);
            frame.render_widget(grid_widget, layout.grid_area);

            let status = match state.status_message {
                Some(ref message) => {
                    Paragraph::new(message.as_str()).style(Theme::error_status_style())
                }
                None => {
                    let hint = state.config.status_bar_hint();
                    let text = match handler::selection_summary(&state) {
                        Some(summary) => format!("{summary} | {hint}"),
                        None => hint,
                    };
                    Paragraph::new(text).style(Theme::status_bar_style())
                }
            };
            frame.render_widget(status, layout.status_area);
        })?;

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(&mut state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
            AppEvent::Resize(w, h) => {
                state.terminal_area = ratatui::layout::Rect::new(0, 0, w, h);
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
