use color_eyre::eyre::{Context, Result};
use crossterm::event::{KeyCode, KeyModifiers};
use formkit::EventHandlingStatus;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::{
    actions::Action,
    config::Config,
    page::{Layer, gallery::Gallery},
    tui::{Event, TuiEnum},
};

pub(crate) mod crossfade;

pub struct App {
    layer: Box<dyn Layer>,
    tui: TuiEnum,
    action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config, tui: TuiEnum) -> Self {
        let (action_tx, action_rx) = tokio::sync::mpsc::unbounded_channel();
        let mut layer: Box<dyn Layer> =
            Box::new(Gallery::new(action_tx.clone().into(), &config.gallery));
        layer.init();
        Self {
            layer,
            tui,
            action_tx,
            action_rx,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        loop {
            let event = self.tui.next().await?;
            self.handle_event(event)?;

            while let Ok(action) = self.action_rx.try_recv() {
                self.perform_action(action)?;
            }

            if self.should_quit {
                break;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    /// App-wide events first, then the page; quit and suspend keys only
    /// apply when the page left the key alone.
    fn handle_event(&self, event: Event) -> Result<()> {
        let tx = &self.action_tx;
        match event {
            Event::Tick => tx.send(Action::Tick)?,
            Event::Render => tx.send(Action::Render)?,
            Event::Error => {
                warn!("terminal input failed, quitting");
                tx.send(Action::Quit)?
            }
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                tx.send(Action::Render)?
            }
            Event::Init | Event::FocusGained | Event::FocusLost => {}
            event => {
                if self.layer.handle_events(&event) == EventHandlingStatus::NotConsumed {
                    if let Event::Key(key) = event {
                        match (key.code, key.modifiers.contains(KeyModifiers::CONTROL)) {
                            (KeyCode::Char('q'), false) | (KeyCode::Char('c'), true) => {
                                tx.send(Action::Quit)?
                            }
                            (KeyCode::Char('z'), true) => tx.send(Action::Suspend)?,
                            _ => {}
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// The only place state changes.
    fn perform_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                info!("quitting");
                self.should_quit = true;
            }
            Action::Suspend => {
                self.tui.suspend().context("Failed to suspend")?;
                self.action_tx.send(Action::Render)?;
            }
            Action::Render => {
                let layer = &mut self.layer;
                self.tui
                    .draw(|f| layer.render(f, f.area()))
                    .context("Failed to draw")?;
            }
            action => self.layer.update(action),
        }
        Ok(())
    }
}
