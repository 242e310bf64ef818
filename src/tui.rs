use std::io;
use std::sync::mpsc;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::app::App;
use crate::dispatch;
use crate::error::Error;
use crate::session::{Status, SubmitOutcome};
use crate::timer::TimerEvent;

pub fn run_tui(
    app: &mut App,
    timer_rx: &mpsc::Receiver<TimerEvent>,
    submit_rx: &mpsc::Receiver<SubmitOutcome>,
) -> Result<(), Error> {
    enable_raw_mode().map_err(Error::Terminal)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(Error::Terminal)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(Error::Terminal)?;

    let result = main_loop(&mut terminal, app, timer_rx, submit_rx);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    timer_rx: &mpsc::Receiver<TimerEvent>,
    submit_rx: &mpsc::Receiver<SubmitOutcome>,
) -> Result<(), Error> {
    loop {
        terminal
            .draw(|f| crate::ui::draw(f, app))
            .map_err(Error::Terminal)?;

        if app.should_quit {
            if app.session.status() != Status::Submitted {
                info!(status = ?app.session.status(), "quit without a completed submission");
            }
            break;
        }

        // Poll for input events
        if event::poll(Duration::from_millis(100)).map_err(Error::Terminal)? {
            if let Event::Key(key) = event::read().map_err(Error::Terminal)? {
                if let Some(action) = dispatch::action_for_key(key, app) {
                    debug!(?action, "key dispatched");
                    dispatch::apply(action, app);
                }
            }
        }

        // Handle timer events
        while let Ok(TimerEvent::Tick) = timer_rx.try_recv() {
            if app.session.is_countdown_running() {
                app.session.tick();
            }
        }

        // Handle gateway outcomes
        while let Ok(outcome) = submit_rx.try_recv() {
            app.session.finish_submit(outcome);
        }
    }

    Ok(())
}
