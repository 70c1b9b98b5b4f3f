use std::{io, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};

use crate::app::{BranchPicker, Confirmation, KindMenu};

/// A prompt that can be drawn and driven by key presses until it is done.
pub trait Screen {
    fn draw(&self, frame: &mut Frame<'_>);
    fn handle_key(&mut self, key: KeyEvent);
    fn is_done(&self) -> bool;
}

type TerminalBackend = CrosstermBackend<io::Stdout>;

/// Run `screen` on the alternate screen until it reports done. The terminal
/// is restored even when drawing or reading input fails.
pub fn run<S: Screen>(screen: &mut S) -> Result<()> {
    enable_raw_mode().context("failed to enable raw terminal mode")?;
    let mut stdout = io::stdout();
    or_restore(execute!(stdout, EnterAlternateScreen), || {
        let _ = disable_raw_mode();
    })
    .context("failed to enter the alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = or_restore(Terminal::new(backend), || {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    })
    .context("failed to set up the terminal")?;

    let result = event_loop(&mut terminal, screen);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Run `restore` before handing back a failed setup step.
fn or_restore<T, E>(result: Result<T, E>, restore: impl FnOnce()) -> Result<T, E> {
    if result.is_err() {
        restore();
    }
    result
}

fn event_loop<S: Screen>(terminal: &mut Terminal<TerminalBackend>, screen: &mut S) -> Result<()> {
    terminal.clear()?;
    loop {
        terminal.draw(|frame| screen.draw(frame))?;

        if screen.is_done() {
            return Ok(());
        }

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    screen.handle_key(key);
                }
            }
        }
    }
}

impl Screen for KindMenu {
    fn draw(&self, frame: &mut Frame<'_>) {
        crate::ui::draw_kind_menu(frame, self);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.cancel(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Enter => self.confirm(),
            _ => {}
        }
    }

    fn is_done(&self) -> bool {
        KindMenu::is_done(self)
    }
}

impl Screen for BranchPicker {
    fn draw(&self, frame: &mut Frame<'_>) {
        crate::ui::draw_picker(frame, self);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.cancel(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Char(' ') => {
                self.toggle_current();
                self.clear_message();
            }
            KeyCode::Char('a') => {
                self.toggle_all();
                self.clear_message();
            }
            KeyCode::Enter => self.confirm(),
            _ => {}
        }
    }

    fn is_done(&self) -> bool {
        self.should_quit()
    }
}

impl Screen for Confirmation {
    fn draw(&self, frame: &mut Frame<'_>) {
        crate::ui::draw_confirmation(frame, self);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.answer_yes(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') | KeyCode::Esc => {
                self.answer_no()
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.toggle()
            }
            KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    fn is_done(&self) -> bool {
        Confirmation::is_done(self)
    }
}
