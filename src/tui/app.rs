use std::io;
use std::time::Duration;

use tokio::task::JoinHandle;

use crossterm::{
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};

use crate::{
    core::router::{Flow, FocusRouter, InputEvent},
    domain::error::{RowdeskError, RowdeskResult},
};
use super::{
    event::{event_channel, spawn_blink_ticker, spawn_terminal_reader, EventQueue},
    ui::draw_ui,
    widgets::styles::Palette,
};

pub struct App {
    router: FocusRouter,
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    palette: Palette,
    blink_interval: Duration,
}

impl App {
    pub fn new(router: FocusRouter, palette: Palette, blink_interval: Duration) -> Result<Self, RowdeskError> {
        // Setup terminal
        enable_raw_mode().map_err(|e| RowdeskError::Tui(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| RowdeskError::Tui(e.to_string()))?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)
            .map_err(|e| RowdeskError::Tui(e.to_string()))?;

        Ok(Self {
            router,
            terminal,
            palette,
            blink_interval,
        })
    }

    pub async fn run(&mut self) -> Result<(), RowdeskError> {
        let (tx, mut queue) = event_channel();
        let mut reader = spawn_terminal_reader(tx.clone());
        let ticker = spawn_blink_ticker(tx, self.blink_interval);

        let result = self.event_loop(&mut queue, &mut reader).await;

        ticker.abort();
        // Closing the queue stops the reader at its next poll
        drop(queue);
        match result {
            Ok(()) => {
                if let Ok(Err(e)) = reader.await {
                    tracing::warn!("terminal reader failed during shutdown: {}", e);
                }
                tracing::info!("event loop finished");
                Ok(())
            }
            Err(e) => {
                tracing::error!("event loop aborted: {}", e);
                Err(e)
            }
        }
    }

    async fn event_loop(
        &mut self,
        queue: &mut EventQueue,
        reader: &mut JoinHandle<RowdeskResult<()>>,
    ) -> Result<(), RowdeskError> {
        // Size the layout before the first frame
        let (width, height) = terminal::size().map_err(|e| RowdeskError::Tui(e.to_string()))?;
        self.router.handle(InputEvent::Resize { width, height });
        self.draw()?;

        loop {
            let event = queue.next_from(reader).await?;
            if self.router.handle(event) == Flow::Quit {
                return Ok(());
            }
            self.draw()?;
        }
    }

    fn draw(&mut self) -> Result<(), RowdeskError> {
        let router = &self.router;
        let palette = &self.palette;
        self.terminal
            .draw(|f| draw_ui(f, router, palette))
            .map_err(|e| RowdeskError::Tui(e.to_string()))?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}
