use color_eyre::eyre::Context;

use crate::page::gallery::GalleryAction;

#[derive(Clone, Debug)]
pub enum Action {
    Tick,
    Render,
    Quit,
    Suspend,

    Gallery(GalleryAction),
}

#[derive(Clone, Debug)]
pub struct ActionSender(pub tokio::sync::mpsc::UnboundedSender<Action>);

impl ActionSender {
    pub fn send<T: Into<Action>>(&self, action: T) {
        self.0
            .send(action.into())
            .with_context(|| "Action receiver is closed, which should not happen while the app is running.")
            .unwrap();
    }
}

impl From<tokio::sync::mpsc::UnboundedSender<Action>> for ActionSender {
    fn from(value: tokio::sync::mpsc::UnboundedSender<Action>) -> Self {
        ActionSender(value)
    }
}
