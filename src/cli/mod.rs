//! Terminal dashboard (Ratatui + Crossterm)
//! - Reads through the same services as the HTTP API
//! - Bound to one owner for the whole session

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{backend::CrosstermBackend, Terminal};
use sqlx::{Pool, Sqlite};

use crate::database::db::queries::users;

pub mod input;
pub mod state;
pub mod ui;

pub async fn run(pool: Pool<Sqlite>, user_id: i64) -> Result<()> {
    if users::get_user(&pool, user_id).await?.is_none() {
        anyhow::bail!("user {user_id} does not exist");
    }

    let mut app = state::App::new(pool, user_id, chrono::Utc::now());
    app.refresh().await?;

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    result
}

async fn event_loop(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut state::App) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = app.handle_key(key).await {
                    app.status = format!("Error: {e}");
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.quit {
            return Ok(());
        }
    }
}
