//! TUI for viewing and editing mind maps.

pub mod app;
mod draw;

use std::{io::stdout, time::Duration};

use app::App;
use crossterm::{
    event::EventStream,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::time::sleep;

use crate::{
    error::Result, generate::OutlineGenerator, layout::worker::LayoutWorker, session::Session,
};

/// World-space size of the layout surface. Fixed so pan/zoom state stays
/// meaningful across terminal resizes.
pub const SURFACE_WIDTH: f64 = 600.0;
pub const SURFACE_HEIGHT: f64 = 400.0;

pub async fn run(session: Session<OutlineGenerator>) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut worker = LayoutWorker::spawn();
    let mut app = App::new(session);
    let mut event_stream = EventStream::new();

    while !app.should_exit {
        if app.take_needs_layout() {
            let snapshot = serde_json::to_value(app.session.tree())?;
            worker.request(app.epoch, snapshot, app.mode, SURFACE_WIDTH, SURFACE_HEIGHT);
        }
        terminal.draw(|frame| draw::draw_ui(frame, &app))?;

        tokio::select! {
            Some(response) = worker.rx.recv() => {
                app.apply_response(response);
            }
            Some(Ok(event)) = event_stream.next() => {
                app.handle_event(&event);
            }
            () = sleep(Duration::from_millis(50)) => {}
        }
    }

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
