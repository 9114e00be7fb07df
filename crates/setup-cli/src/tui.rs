//! Terminal event loop.

use std::io::{IsTerminal, stdin, stdout};

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;
use setup_tools::{InjectionResult, Installer, run_batch};

use crate::app::{Command, Input, Session};
use crate::error::{CliError, Result};
use crate::ui;

/// Run the interactive session until the user quits. Returns the results of
/// the batch, or an empty list when nothing was installed.
///
/// Fails with [`CliError::NotATerminal`] when stdin or stdout is redirected.
/// The terminal is restored before returning, on error as well.
pub fn run(mut session: Session, installer: &Installer) -> Result<Vec<InjectionResult>> {
    if !stdin().is_terminal() || !stdout().is_terminal() {
        return Err(CliError::NotATerminal);
    }

    let mut terminal = match ratatui::try_init() {
        Ok(terminal) => terminal,
        Err(e) => {
            // Undo whatever part of the setup succeeded
            ratatui::restore();
            return Err(e.into());
        }
    };
    let outcome = execute!(stdout(), EnableBracketedPaste)
        .map_err(Into::into)
        .and_then(|()| event_loop(&mut terminal, &mut session, installer));

    if let Err(e) = execute!(stdout(), DisableBracketedPaste) {
        tracing::warn!(error = %e, "Failed to disable bracketed paste");
    }
    ratatui::restore();

    outcome.map(|()| session.results().to_vec())
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    session: &mut Session,
    installer: &Installer,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, session))?;

        let event = event::read()?;
        let Some(input) = Input::from_event(&event) else {
            continue;
        };

        match session.handle(input) {
            Command::None => {}
            Command::Quit => {
                tracing::debug!(view = ?session.view(), "User quit");
                return Ok(());
            }
            Command::RunBatch(request) => {
                // Show the installing view while the batch blocks the loop
                terminal.draw(|frame| ui::render(frame, session))?;
                let results = run_batch(
                    installer,
                    &request.targets,
                    request.scope,
                    &request.credentials,
                );
                session.finish_batch(results);
            }
        }
    }
}
