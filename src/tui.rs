//! # Terminal
//!
//! Owns the crossterm terminal and turns its input into [`Event`]s.
//!
//! ```text
//! ┌──────────────────┐  Key / Mouse / Paste  ┌──────────────┐
//! │ crossterm stream │──────────────────────▶│              │
//! └──────────────────┘                       │  event_tx    │──▶ App::run
//! ┌──────────────────┐  Tick / Render        │  (unbounded) │
//! │ tokio intervals  │──────────────────────▶│              │
//! └──────────────────┘                       └──────────────┘
//! ```
//!
//! The reader runs on a tokio task and stops when its
//! [`CancellationToken`] is cancelled. Tests use [`TestTui`], which draws
//! into a ratatui `TestBackend` and never reads input.

use std::{
    io::{Stderr, stderr},
    ops::{Deref, DerefMut},
    time::Duration,
};

use color_eyre::eyre::{Result, eyre};
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use futures::{FutureExt, StreamExt};
use ratatui::{
    Frame,
    backend::{CrosstermBackend, TestBackend},
    crossterm::{
        cursor,
        event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
        terminal::{EnterAlternateScreen, LeaveAlternateScreen},
    },
};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

#[derive(Clone, Debug)]
pub enum Event {
    Init,
    /// The input stream failed.
    Error,
    /// Advances animations.
    Tick,
    Render,
    FocusGained,
    FocusLost,
    Paste(String),
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

impl Event {
    /// The terminal event the widgets understand, if this is one.
    pub fn as_crossterm(&self) -> Option<CrosstermEvent> {
        match self {
            Event::Key(key) => Some(CrosstermEvent::Key(*key)),
            Event::Mouse(mouse) => Some(CrosstermEvent::Mouse(*mouse)),
            Event::Paste(text) => Some(CrosstermEvent::Paste(text.clone())),
            _ => None,
        }
    }
}

impl From<KeyCode> for Event {
    fn from(value: KeyCode) -> Self {
        Event::Key(KeyEvent::new(value, KeyModifiers::NONE))
    }
}
impl From<char> for Event {
    fn from(value: char) -> Self {
        Event::Key(KeyEvent::new(KeyCode::Char(value), KeyModifiers::NONE))
    }
}

/// Either a real terminal or an in-memory one.
pub enum TuiEnum {
    Crossterm(Tui),
    Test(TestTui),
}

impl From<Tui> for TuiEnum {
    fn from(tui: Tui) -> Self {
        TuiEnum::Crossterm(tui)
    }
}
impl From<TestTui> for TuiEnum {
    fn from(tui: TestTui) -> Self {
        TuiEnum::Test(tui)
    }
}

impl TuiEnum {
    pub fn enter(&mut self) -> Result<()> {
        match self {
            TuiEnum::Crossterm(tui) => tui.enter(),
            TuiEnum::Test(_) => Ok(()),
        }
    }

    pub fn exit(&mut self) -> Result<()> {
        match self {
            TuiEnum::Crossterm(tui) => tui.exit(),
            TuiEnum::Test(_) => Ok(()),
        }
    }

    pub async fn next(&mut self) -> Result<Event> {
        match self {
            TuiEnum::Crossterm(tui) => tui.next().await,
            TuiEnum::Test(_) => Ok(Event::Tick),
        }
    }

    pub fn draw(&mut self, f: impl FnOnce(&mut Frame)) -> Result<()> {
        match self {
            TuiEnum::Crossterm(tui) => tui.draw(f).map(|_| ()).map_err(Into::into),
            TuiEnum::Test(tui) => tui.draw(f).map(|_| ()).map_err(Into::into),
        }
    }

    pub fn suspend(&mut self) -> Result<()> {
        match self {
            TuiEnum::Crossterm(tui) => tui.suspend(),
            TuiEnum::Test(_) => Ok(()),
        }
    }
}

pub struct Tui {
    pub terminal: ratatui::Terminal<CrosstermBackend<Stderr>>,
    task: Option<JoinHandle<()>>,
    cancellation_token: CancellationToken,
    event_rx: UnboundedReceiver<Event>,
    event_tx: UnboundedSender<Event>,
    /// Frames per second.
    pub frame_rate: f64,
    /// Ticks per second.
    pub tick_rate: f64,
    pub mouse: bool,
    pub paste: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = ratatui::Terminal::new(CrosstermBackend::new(stderr()))?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal,
            task: None,
            cancellation_token: CancellationToken::new(),
            event_rx,
            event_tx,
            frame_rate: 60.0,
            tick_rate: 4.0,
            mouse: true,
            paste: true,
        })
    }

    pub fn tick_rate(mut self, tick_rate: f64) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    fn start(&mut self) {
        self.cancel();
        self.cancellation_token = CancellationToken::new();
        let tick_delay = Duration::from_secs_f64(1.0 / self.tick_rate);
        let render_delay = Duration::from_secs_f64(1.0 / self.frame_rate);
        self.task = Some(tokio::spawn(read_events(
            self.event_tx.clone(),
            self.cancellation_token.clone(),
            tick_delay,
            render_delay,
        )));
    }

    fn stop(&mut self) {
        self.cancel();
        let Some(task) = self.task.take() else {
            return;
        };
        let mut waited = 0;
        while !task.is_finished() {
            std::thread::sleep(Duration::from_millis(1));
            waited += 1;
            if waited == 50 {
                task.abort();
            }
            if waited > 100 {
                error!("event reader did not stop within 100ms");
                break;
            }
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(stderr(), EnterAlternateScreen, cursor::Hide)?;
        if self.mouse {
            crossterm::execute!(stderr(), EnableMouseCapture)?;
        }
        if self.paste {
            crossterm::execute!(stderr(), EnableBracketedPaste)?;
        }
        self.start();
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stop();
        if crossterm::terminal::is_raw_mode_enabled()? {
            self.flush()?;
            if self.paste {
                crossterm::execute!(stderr(), DisableBracketedPaste)?;
            }
            if self.mouse {
                crossterm::execute!(stderr(), DisableMouseCapture)?;
            }
            crossterm::execute!(stderr(), LeaveAlternateScreen, cursor::Show)?;
            crossterm::terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    /// Gives the terminal back and stops the process (`SIGTSTP`, unix only).
    pub fn suspend(&mut self) -> Result<()> {
        self.exit()?;
        #[cfg(not(windows))]
        signal_hook::low_level::raise(signal_hook::consts::signal::SIGTSTP)?;
        // execution continues here once the shell resumes us
        self.enter()
    }

    pub async fn next(&mut self) -> Result<Event> {
        self.event_rx
            .recv()
            .await
            .ok_or_else(|| eyre!("event channel closed"))
    }
}

async fn read_events(
    event_tx: UnboundedSender<Event>,
    token: CancellationToken,
    tick_delay: Duration,
    render_delay: Duration,
) {
    let mut reader = crossterm::event::EventStream::new();
    let mut tick_interval = tokio::time::interval(tick_delay);
    let mut render_interval = tokio::time::interval(render_delay);
    if event_tx.send(Event::Init).is_err() {
        return;
    }
    loop {
        let event = tokio::select! {
            _ = token.cancelled() => break,
            _ = tick_interval.tick() => Event::Tick,
            _ = render_interval.tick() => Event::Render,
            next = reader.next().fuse() => match next {
                Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => Event::Key(key),
                Some(Ok(CrosstermEvent::Key(_))) => continue,
                Some(Ok(CrosstermEvent::Mouse(mouse))) => Event::Mouse(mouse),
                Some(Ok(CrosstermEvent::Resize(x, y))) => Event::Resize(x, y),
                Some(Ok(CrosstermEvent::FocusLost)) => Event::FocusLost,
                Some(Ok(CrosstermEvent::FocusGained)) => Event::FocusGained,
                Some(Ok(CrosstermEvent::Paste(text))) => Event::Paste(text),
                Some(Err(_)) => Event::Error,
                None => continue,
            },
        };
        if event_tx.send(event).is_err() {
            debug!("event receiver dropped, stopping reader");
            break;
        }
    }
}

impl Deref for Tui {
    type Target = ratatui::Terminal<CrosstermBackend<Stderr>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(err) = self.exit() {
            error!("failed to restore terminal: {err:?}");
        }
    }
}

/// Puts the terminal back into cooked mode without an owning [`Tui`].
///
/// Used from the panic hook, where the `Tui` may be unreachable.
pub fn restore() -> Result<()> {
    if crossterm::terminal::is_raw_mode_enabled()? {
        crossterm::execute!(
            stderr(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            cursor::Show
        )?;
        crossterm::terminal::disable_raw_mode()?;
    }
    Ok(())
}

/// In-memory terminal for tests.
pub struct TestTui {
    pub terminal: ratatui::Terminal<TestBackend>,
}

impl TestTui {
    #[cfg(test)]
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = ratatui::Terminal::new(TestBackend::new(width, height))
            .expect("test backend never fails");
        Self { terminal }
    }
}

impl Deref for TestTui {
    type Target = ratatui::Terminal<TestBackend>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TestTui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

#[cfg(test)]
impl TuiEnum {
    pub fn backend(&self) -> &TestBackend {
        match self {
            TuiEnum::Crossterm(_) => panic!("Not a test backend"),
            TuiEnum::Test(tui) => tui.backend(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_input_reaches_widgets() {
        assert_eq!(
            Event::from('a').as_crossterm(),
            Some(CrosstermEvent::Key(KeyEvent::new(
                KeyCode::Char('a'),
                KeyModifiers::NONE
            )))
        );
        assert_eq!(
            Event::Paste("hi".into()).as_crossterm(),
            Some(CrosstermEvent::Paste("hi".into()))
        );
        assert_eq!(Event::Resize(80, 24).as_crossterm(), None);
        assert_eq!(Event::Tick.as_crossterm(), None);
    }
}
