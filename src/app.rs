use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::session::Session;
use crate::word_generator::WordGenerator;

/// Every input the app reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Input(char),
    Backspace,
    Restart,
    Quit,
    Resize { width: u16, height: u16 },
}

impl Command {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('c') if ctrl => Some(Command::Quit),
            KeyCode::Char('r') if ctrl => Some(Command::Restart),
            KeyCode::Backspace => Some(Command::Backspace),
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => None,
            KeyCode::Char(c) => Some(Command::Input(c)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    generator: WordGenerator,
}

impl App {
    pub fn new(generator: WordGenerator) -> Self {
        let session = Session::new(generator.generate_prompt());
        Self { session, generator }
    }

    pub fn dispatch(&mut self, command: Command) -> Flow {
        match command {
            Command::Input(c) => {
                let was_complete = self.session.is_complete();
                self.session.apply_keystroke(c);
                tracing::trace!(key = ?c, typed = self.session.typed().len(), "keystroke");
                if !was_complete && self.session.is_complete() {
                    let m = self.session.metrics_snapshot();
                    tracing::info!(
                        wpm = m.words_per_minute,
                        cpm = m.characters_per_minute,
                        accuracy = m.accuracy_percent,
                        mistakes = m.mistakes,
                        elapsed = m.elapsed_seconds,
                        "prompt complete"
                    );
                }
            }
            Command::Backspace => {
                self.session.backspace();
                tracing::trace!(typed = self.session.typed().len(), "backspace");
            }
            Command::Restart => {
                self.session.reset(self.generator.generate_prompt());
                tracing::debug!(len = self.session.prompt().len(), "session restarted");
            }
            // redraw happens after every dispatch
            Command::Resize { width, height } => tracing::trace!(width, height, "resize"),
            Command::Quit => {
                tracing::debug!("quit requested");
                return Flow::Quit;
            }
        }
        Flow::Continue
    }
}
