//! # formkit
//!
//! Stateless form widgets for [ratatui](https://ratatui.rs/).
//!
//! Every widget is a plain value built fresh for each frame. It reads the
//! values its caller owns, produces a render tree ([`view::Node`]) and, for
//! interactive widgets, turns terminal events into callbacks or edit events.
//! Nothing is retained between renders.
//!
//! | Widget | What it shows |
//! |---|---|
//! | [`ActionButton`] | a label, or a spinner while loading |
//! | [`LabeledInput`] | a caption, a single-line field and an optional error |
//! | [`LoadingOverlay`] | a translucent barrier with a centered spinner, or nothing |
//!
//! ```text
//! caller state ──▶ widget::view() ──▶ Node tree ──▶ render::paint() ──▶ Buffer
//!      ▲                                                                  │
//!      └──────── InputEdit / on_activate ◀── handle_event(Event) ◀────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use formkit::{LabeledInput, LoadingOverlay};
//! use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
//!
//! let mut name = String::new();
//! let area = Rect::new(0, 0, 40, 12);
//! let mut buf = Buffer::empty(area);
//!
//! let input = LabeledInput::new("Username", &name)
//!     .placeholder("Enter your username")
//!     .error(name.is_empty().then(|| "Username is required".to_string()));
//! input.view().render(area, &mut buf);
//!
//! let edit = input.edit("alice");
//! name = edit.value;
//!
//! LoadingOverlay::new(true).render(area, &mut buf);
//! # let _ = name;
//! ```

pub mod render;
pub mod theme;
pub mod view;
pub mod widget;

pub use render::RenderCx;
pub use view::Node;
pub use widget::{
    EventHandlingStatus,
    button::{ActionButton, CornerRadius},
    labeled_input::{InputEdit, KeyboardVariant, LabeledInput},
    overlay::{LoadingOverlay, SpinnerFactory},
};
