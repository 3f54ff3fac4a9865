use std::sync::mpsc::{self, Receiver};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Terminal events consumed by the app runner
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block until the next event. `None` once the source is exhausted.
    fn recv(&self) -> Option<TerminalEvent>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TerminalEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => TerminalEvent::Key(key),
                Ok(CtEvent::Resize(w, h)) => TerminalEvent::Resize(w, h),
                Ok(_) => continue,
                Err(e) => {
                    tracing::error!(error = %e, "terminal event reader stopped");
                    break;
                }
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv(&self) -> Option<TerminalEvent> {
        self.rx.recv().ok()
    }
}

/// Test event source fed from a channel
pub struct TestEventSource {
    rx: Receiver<TerminalEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TerminalEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv(&self) -> Option<TerminalEvent> {
        self.rx.recv().ok()
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: EventSource> {
    event_source: E,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    pub fn step(&self) -> Option<TerminalEvent> {
        self.event_source.recv()
    }
}
