//! Sign-up form showing every widget of the kit.
//!
//! The page is the "caller" of the widgets: it owns the field values, the
//! loading flag and the overlay flag, and rebuilds the widgets from them on
//! every frame.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formkit::{
    ActionButton, EventHandlingStatus, InputEdit, KeyboardVariant, LabeledInput, LoadingOverlay,
    Node, RenderCx,
    view::SpinnerNode,
    widget::spinner::SpinnerKind,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};
use strum::Display;
use tracing::{debug, info};

use super::{EventLoopParticipant, Layer, WidgetExt};
use crate::{
    actions::{Action, ActionSender},
    app::crossfade::Crossfade,
    config::GalleryConfig,
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub(crate) enum Focus {
    Username,
    Email,
    Submit,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Username => Focus::Email,
            Focus::Email => Focus::Submit,
            Focus::Submit => Focus::Username,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Username => Focus::Submit,
            Focus::Email => Focus::Username,
            Focus::Submit => Focus::Email,
        }
    }

    fn is_field(self) -> bool {
        matches!(self, Focus::Username | Focus::Email)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub(crate) enum FieldId {
    Username,
    Email,
}

#[derive(Debug, Clone, Default)]
struct FieldState {
    value: String,
    cursor: usize,
}

#[derive(Clone, Debug)]
pub(crate) enum GalleryAction {
    Edit(FieldId, InputEdit),
    Focus(Option<Focus>),
    Submit,
    SubmitFinished,
    ToggleOverlay,
    ToggleSpinner,
}

impl From<GalleryAction> for Action {
    fn from(value: GalleryAction) -> Self {
        Action::Gallery(value)
    }
}

pub(crate) struct Gallery {
    tx: ActionSender,

    username: FieldState,
    email: FieldState,
    focus: Option<Focus>,

    loading: bool,
    overlay_visible: bool,
    custom_spinner: bool,
    spinner_size: u16,
    submit_delay: Duration,
    submissions: u32,

    tick: u64,
    crossfade: Crossfade,
    button_area: Rect,
}

fn hourglass() -> Node {
    Node::Spinner(SpinnerNode::new(Color::Yellow).kind(SpinnerKind::Hourglass))
}

impl Gallery {
    pub(crate) fn new(tx: ActionSender, config: &GalleryConfig) -> Self {
        Self {
            tx,
            username: FieldState::default(),
            email: FieldState::default(),
            focus: None,
            loading: false,
            overlay_visible: false,
            custom_spinner: config.custom_spinner,
            spinner_size: config.spinner_size,
            submit_delay: Duration::from_millis(config.submit_delay_ms),
            submissions: 0,
            tick: 0,
            crossfade: Crossfade::default(),
            button_area: Rect::default(),
        }
    }

    fn username_error(&self) -> Option<String> {
        self.username
            .value
            .is_empty()
            .then(|| "Username is required".to_string())
    }

    fn email_error(&self) -> Option<String> {
        let email = &self.email.value;
        (!email.is_empty() && !email.contains('@')).then(|| "Email must contain @".to_string())
    }

    fn cursor_of(&self, focus: Focus, field: &FieldState) -> Option<usize> {
        (self.focus == Some(focus)).then_some(field.cursor)
    }

    fn username_input(&self) -> LabeledInput<'_> {
        LabeledInput::new("Username", &self.username.value)
            .placeholder("Enter your username")
            .error(self.username_error())
            .cursor(self.cursor_of(Focus::Username, &self.username))
    }

    fn email_input(&self) -> LabeledInput<'_> {
        LabeledInput::new("Email", &self.email.value)
            .placeholder("Enter your email")
            .keyboard(KeyboardVariant::Email)
            .error(self.email_error())
            .cursor(self.cursor_of(Focus::Email, &self.email))
    }

    fn submit_button<'a>(&self, on_activate: impl FnMut() + 'a) -> ActionButton<'a> {
        ActionButton::new("Submit", on_activate, self.loading)
            .focused(self.focus == Some(Focus::Submit))
            .hit_area(self.button_area)
    }

    fn overlay(&self) -> LoadingOverlay<'static> {
        let overlay = LoadingOverlay::new(self.overlay_visible).spinner_size(self.spinner_size);
        if self.custom_spinner {
            overlay.custom_spinner(hourglass)
        } else {
            overlay
        }
    }

    fn help_msg(&self) -> HelpMsg {
        let mut msg: HelpMsg = vec![
            HelpEntry::new(KeyCode::Tab, "Next"),
            HelpEntry::new(KeyCode::BackTab, "Previous"),
        ]
        .into();
        match self.focus {
            Some(Focus::Submit) => msg.push(HelpEntry::new(KeyCode::Enter, "Submit")),
            Some(_) => msg.push(HelpEntry::new(KeyCode::Esc, "Leave field")),
            None => msg.push(HelpEntry::new('q', "Quit")),
        }
        msg.push(HelpEntry::new(
            KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL),
            "Toggle overlay",
        ));
        msg.push(HelpEntry::new(
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
            "Switch spinner",
        ));
        msg
    }

    fn status_line(&self) -> String {
        if self.loading {
            "Submitting...".to_string()
        } else if self.submissions > 0 {
            format!("Submitted {} time(s)", self.submissions)
        } else {
            String::new()
        }
    }

    fn schedule_finish(&self) {
        let tx = self.tx.clone();
        let delay = self.submit_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send(GalleryAction::SubmitFinished);
        });
    }

    fn apply(&mut self, action: GalleryAction) {
        match action {
            GalleryAction::Edit(field, edit) => {
                debug!(%field, cursor = edit.cursor, "field edited");
                let state = match field {
                    FieldId::Username => &mut self.username,
                    FieldId::Email => &mut self.email,
                };
                state.value = edit.value;
                state.cursor = edit.cursor;
            }
            GalleryAction::Focus(focus) => {
                debug!(?focus, "focus moved");
                self.focus = focus;
            }
            GalleryAction::Submit => {
                if self.loading {
                    debug!("submit ignored, already loading");
                    return;
                }
                info!(username = %self.username.value, "submitting form");
                self.loading = true;
                self.overlay_visible = true;
                self.schedule_finish();
            }
            GalleryAction::SubmitFinished => {
                self.loading = false;
                self.overlay_visible = false;
                self.submissions += 1;
                info!(submissions = self.submissions, "submit finished");
            }
            GalleryAction::ToggleOverlay => {
                self.overlay_visible = !self.overlay_visible;
                info!(visible = self.overlay_visible, "overlay toggled");
            }
            GalleryAction::ToggleSpinner => {
                self.custom_spinner = !self.custom_spinner;
                info!(custom = self.custom_spinner, "spinner switched");
            }
        }
    }
}

impl EventLoopParticipant for Gallery {
    fn handle_events(&self, event: &Event) -> EventHandlingStatus {
        if let Event::Key(key) = event {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match key.code {
                    KeyCode::Char('o') => {
                        self.tx.send(GalleryAction::ToggleOverlay);
                        return EventHandlingStatus::Consumed;
                    }
                    KeyCode::Char('s') => {
                        self.tx.send(GalleryAction::ToggleSpinner);
                        return EventHandlingStatus::Consumed;
                    }
                    _ => {}
                }
            }
        }

        // the form sits behind the overlay's barrier; keys typed at a
        // focused field stop here
        if self.overlay_visible {
            let typing = match event {
                Event::Key(key) => !key.modifiers.contains(KeyModifiers::CONTROL),
                Event::Paste(_) => true,
                _ => false,
            };
            return if typing && self.focus.is_some_and(Focus::is_field) {
                EventHandlingStatus::Consumed
            } else {
                EventHandlingStatus::NotConsumed
            };
        }

        if let Event::Key(key) = event {
            let focus = self.focus.unwrap_or(Focus::Submit);
            let next = match key.code {
                KeyCode::Tab => Some(Some(focus.next())),
                KeyCode::BackTab => Some(Some(focus.prev())),
                KeyCode::Enter if focus.is_field() && self.focus.is_some() => {
                    Some(Some(focus.next()))
                }
                KeyCode::Esc if self.focus.is_some() => Some(None),
                _ => None,
            };
            if let Some(next) = next {
                self.tx.send(GalleryAction::Focus(next));
                return EventHandlingStatus::Consumed;
            }
        }

        let Some(event) = event.as_crossterm() else {
            return EventHandlingStatus::NotConsumed;
        };

        let edit = match self.focus {
            Some(Focus::Username) => self
                .username_input()
                .handle_event(&event)
                .map(|edit| (FieldId::Username, edit)),
            Some(Focus::Email) => self
                .email_input()
                .handle_event(&event)
                .map(|edit| (FieldId::Email, edit)),
            _ => None,
        };
        if let Some((field, edit)) = edit {
            self.tx.send(GalleryAction::Edit(field, edit));
            return EventHandlingStatus::Consumed;
        }

        let tx = self.tx.clone();
        let mut button = self.submit_button(move || tx.send(GalleryAction::Submit));
        button.handle_event(&event)
    }

    fn update(&mut self, action: Action) {
        match action {
            Action::Tick => self.tick = self.tick.wrapping_add(1),
            Action::Gallery(action) => self.apply(action),
            _ => {}
        }
    }
}

impl WidgetExt for Gallery {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let cx = RenderCx::at_tick(self.tick);
        let username = self.username_input().view();
        let email = self.email_input().view();

        let [body, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(area);
        let [column] = Layout::horizontal([Constraint::Max(50)])
            .flex(Flex::Center)
            .areas(body);
        let [title_area, username_area, email_area, _, button_area, status_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(username.height()),
                Constraint::Length(email.height()),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .areas(column);

        frame.render_widget(
            Paragraph::new(Line::from("formkit gallery").centered())
                .style(Style::new().add_modifier(Modifier::BOLD)),
            title_area,
        );
        frame.render_widget(username.painted(cx), username_area);
        frame.render_widget(email.painted(cx), email_area);

        self.button_area = button_area;
        let button = self.submit_button(|| {}).view();
        frame.render_widget(button.painted(cx), button_area);

        frame.render_widget(
            Paragraph::new(Line::from(self.status_line()).centered())
                .style(Style::new().fg(Color::Green)),
            status_area,
        );
        self.help_msg().render(frame, help_area);

        let overlay = self.overlay().view();
        if let Some((tree, progress)) = self.crossfade.observe(overlay, Instant::now()) {
            frame.render_widget(
                tree.painted(RenderCx {
                    tick: self.tick,
                    progress,
                }),
                area,
            );
        }
    }
}

impl Layer for Gallery {
    fn init(&mut self) {
        self.tx.send(GalleryAction::Focus(Some(Focus::Username)));
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
    use insta::assert_snapshot;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    use super::*;

    fn get_page(config: GalleryConfig) -> (Gallery, UnboundedReceiver<Action>) {
        let (tx, mut rx) = unbounded_channel();
        let mut page = Gallery::new(tx.into(), &config);
        page.init();
        while let Ok(action) = rx.try_recv() {
            page.update(action);
        }
        (page, rx)
    }

    fn default_page() -> (Gallery, UnboundedReceiver<Action>) {
        get_page(GalleryConfig::default())
    }

    fn type_str(page: &mut Gallery, rx: &mut UnboundedReceiver<Action>, text: &str) {
        for c in text.chars() {
            let status = page.event_loop_once(rx, c.into());
            assert_eq!(status, EventHandlingStatus::Consumed);
        }
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn starts_on_username() {
        let (page, _rx) = default_page();
        assert_eq!(page.focus, Some(Focus::Username));
        assert_eq!(page.username_error().as_deref(), Some("Username is required"));
        assert_eq!(page.email_error(), None);
    }

    #[test]
    fn typing_edits_focused_field() {
        let (mut page, mut rx) = default_page();
        type_str(&mut page, &mut rx, "alice");
        assert_eq!(page.username.value, "alice");
        assert_eq!(page.username_error(), None);

        let _ = page.event_loop_once(&mut rx, KeyCode::Tab.into());
        assert_eq!(page.focus, Some(Focus::Email));
        type_str(&mut page, &mut rx, "alice");
        assert_eq!(page.email.value, "alice");
        assert_eq!(page.email_error().as_deref(), Some("Email must contain @"));

        let _ = page.event_loop_once(&mut rx, KeyCode::Left.into());
        type_str(&mut page, &mut rx, "@x");
        assert_eq!(page.email.value, "alic@xe");
        assert_eq!(page.email_error(), None);
        assert_eq!(page.username.value, "alice");
    }

    #[test]
    fn paste_goes_into_field() {
        let (mut page, mut rx) = default_page();
        let status = page.event_loop_once(&mut rx, Event::Paste("bob smith".into()));
        assert_eq!(status, EventHandlingStatus::Consumed);
        assert_eq!(page.username.value, "bob smith");
    }

    #[test]
    fn focus_cycles() {
        let (mut page, mut rx) = default_page();
        let mut seen = vec![];
        for _ in 0..3 {
            let _ = page.event_loop_once(&mut rx, KeyCode::Tab.into());
            seen.push(page.focus);
        }
        assert_eq!(
            seen,
            [Some(Focus::Email), Some(Focus::Submit), Some(Focus::Username)]
        );
        let _ = page.event_loop_once(&mut rx, KeyCode::BackTab.into());
        assert_eq!(page.focus, Some(Focus::Submit));
    }

    #[test]
    fn enter_in_field_moves_on() {
        let (mut page, mut rx) = default_page();
        let _ = page.event_loop_once(&mut rx, KeyCode::Enter.into());
        assert_eq!(page.focus, Some(Focus::Email));
    }

    #[test]
    fn esc_leaves_field_and_frees_keys() {
        let (mut page, mut rx) = default_page();
        let _ = page.event_loop_once(&mut rx, KeyCode::Esc.into());
        assert_eq!(page.focus, None);
        let status = page.event_loop_once(&mut rx, 'q'.into());
        assert_eq!(status, EventHandlingStatus::NotConsumed);
        assert_eq!(page.username.value, "");
    }

    #[test]
    fn overlay_blocks_form() {
        let (mut page, mut rx) = default_page();
        let status = page.event_loop_once(&mut rx, ctrl('o'));
        assert_eq!(status, EventHandlingStatus::Consumed);
        assert!(page.overlay_visible);

        let status = page.event_loop_once(&mut rx, 'a'.into());
        assert_eq!(status, EventHandlingStatus::Consumed);
        let status = page.event_loop_once(&mut rx, Event::Paste("bob".into()));
        assert_eq!(status, EventHandlingStatus::Consumed);
        let _ = page.event_loop_once(&mut rx, KeyCode::Tab.into());
        assert_eq!(page.username.value, "");
        assert_eq!(page.focus, Some(Focus::Username));

        let status = page.event_loop_once(&mut rx, ctrl('c'));
        assert_eq!(status, EventHandlingStatus::NotConsumed);

        let _ = page.event_loop_once(&mut rx, ctrl('o'));
        assert!(!page.overlay_visible);
        type_str(&mut page, &mut rx, "a");
        assert_eq!(page.username.value, "a");
    }

    #[test]
    fn spinner_switch() {
        let (mut page, mut rx) = default_page();
        let _ = page.event_loop_once(&mut rx, ctrl('o'));
        assert_eq!(page.overlay().view().unwrap().spinners().next().unwrap().kind, SpinnerKind::Ring);
        let _ = page.event_loop_once(&mut rx, ctrl('s'));
        let tree = page.overlay().view().unwrap();
        assert_eq!(tree.spinners().next().unwrap().kind, SpinnerKind::Hourglass);
    }

    #[tokio::test]
    async fn submit_shows_overlay_until_finished() {
        let (mut page, mut rx) = get_page(GalleryConfig {
            submit_delay_ms: 0,
            ..Default::default()
        });
        let _ = page.event_loop_once(&mut rx, KeyCode::BackTab.into());
        let status = page.event_loop_once(&mut rx, KeyCode::Enter.into());
        assert_eq!(status, EventHandlingStatus::Consumed);
        assert!(page.loading);
        assert!(page.overlay_visible);
        assert_eq!(page.status_line(), "Submitting...");

        let action = rx.recv().await.unwrap();
        assert!(matches!(action, Action::Gallery(GalleryAction::SubmitFinished)));
        page.update(action);
        assert!(!page.loading);
        assert!(!page.overlay_visible);
        assert_eq!(page.submissions, 1);
    }

    #[tokio::test]
    async fn submit_while_loading_is_dropped() {
        let (mut page, mut rx) = get_page(GalleryConfig {
            submit_delay_ms: 0,
            ..Default::default()
        });
        page.update(GalleryAction::Submit.into());
        page.update(GalleryAction::Submit.into());

        let action = rx.recv().await.unwrap();
        page.update(action);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(page.submissions, 1);
    }

    #[tokio::test]
    async fn click_on_button_submits() {
        let (mut page, mut rx) = default_page();
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|f| page.render(f, f.area())).unwrap();
        let area = page.button_area;
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: area.x + 1,
            row: area.y + 1,
            modifiers: KeyModifiers::NONE,
        });
        let status = page.event_loop_once(&mut rx, click);
        assert_eq!(status, EventHandlingStatus::Consumed);
        assert!(page.loading);
    }

    #[test]
    fn overlay_without_field_focus_passes_keys_on() {
        let (mut page, mut rx) = default_page();
        let _ = page.event_loop_once(&mut rx, KeyCode::Esc.into());
        let _ = page.event_loop_once(&mut rx, ctrl('o'));
        let status = page.event_loop_once(&mut rx, 'q'.into());
        assert_eq!(status, EventHandlingStatus::NotConsumed);
    }

    #[test]
    fn renders_form() {
        let (mut page, _rx) = default_page();
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|f| page.render(f, f.area())).unwrap();
        assert_snapshot!(terminal.backend(), @r#"
        "                      formkit gallery                       "
        "                                                            "
        "     Username                                               "
        "     ╭────────────────────────────────────────────────╮     "
        "     │Enter your username                             │     "
        "     ╰────────────────────────────────────────────────╯     "
        "     Username is required                                   "
        "     Email                                                  "
        "     ╭────────────────────────────────────────────────╮     "
        "     │Enter your email                                │     "
        "     ╰───────────────────────────────────────────────@╯     "
        "                                                            "
        "     ╭────────────────────────────────────────────────╮     "
        "     │                     Submit                     │     "
        "     ╰────────────────────────────────────────────────╯     "
        "                                                            "
        "                                                            "
        "                                                            "
        "                                                            "
        "                                                            "
        "                                                            "
        "╭──────────────────────────────────────────────────────────╮"
        "│ Next: tab | Previous: shift-tab | Leave field: esc |     │"
        "╰──────────────────────────────────────────────────────────╯"
        "#);
    }

    #[test]
    fn renders_overlay_over_form() {
        let (mut page, mut rx) = default_page();
        let _ = page.event_loop_once(&mut rx, ctrl('o'));
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|f| page.render(f, f.area())).unwrap();
        assert_snapshot!(terminal.backend(), @r#"
        "                      formkit gallery                       "
        "                                                            "
        "     Username                                               "
        "     ╭────────────────────────────────────────────────╮     "
        "     │Enter your username                             │     "
        "     ╰────────────────────────────────────────────────╯     "
        "     Username is required                                   "
        "     Email                                                  "
        "     ╭────────────────────────────────────────────────╮     "
        "     │Enter your email                                │     "
        "     ╰───────────────────────────────────────────────@╯     "
        "                          ●·······                          "
        "     ╭────────────────────•──────·────────────────────╮     "
        "     │                    •·······                    │     "
        "     ╰────────────────────────────────────────────────╯     "
        "                                                            "
        "                                                            "
        "                                                            "
        "                                                            "
        "                                                            "
        "                                                            "
        "╭──────────────────────────────────────────────────────────╮"
        "│ Next: tab | Previous: shift-tab | Leave field: esc |     │"
        "╰──────────────────────────────────────────────────────────╯"
        "#);
        assert!(terminal.backend().buffer()[(0, 0)].modifier.contains(Modifier::DIM));
    }
}
