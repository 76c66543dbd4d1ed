use std::time::Instant;

use formkit::{Node, theme, view::Transition};
use tracing::debug;

/// Plays the fade a widget declares when its tree appears or disappears.
///
/// The widget only says *that* it fades; this keeps the clock, and keeps the
/// last tree alive while it fades out.
#[derive(Debug, Default)]
pub(crate) struct Crossfade {
    visible: bool,
    changed_at: Option<Instant>,
    /// Opacity at the moment of the last change.
    from: f32,
    last: Option<Node>,
}

impl Crossfade {
    /// Feeds this frame's tree. Returns what to paint and the eased
    /// opacity to paint it with.
    ///
    /// A change in the middle of a fade starts from the current opacity, so
    /// hiding a half-faded overlay never jumps back to fully opaque.
    pub(crate) fn observe(&mut self, tree: Option<Node>, now: Instant) -> Option<(Node, f32)> {
        let transition = tree
            .as_ref()
            .or(self.last.as_ref())
            .and_then(Node::transition)
            .unwrap_or_else(|| Transition::fade(theme::FADE_DURATION));

        let visible = tree.is_some();
        if visible != self.visible {
            self.from = self.opacity(transition, now);
            debug!(visible, from = self.from, "crossfade started");
            self.visible = visible;
            self.changed_at = Some(now);
        }

        let progress = self.progress(transition, now);
        let opacity = self.opacity(transition, now);
        match tree {
            Some(tree) => {
                self.last = Some(tree.clone());
                Some((tree, opacity))
            }
            None if progress < 1.0 => self.last.clone().map(|last| (last, opacity)),
            None => {
                self.last = None;
                None
            }
        }
    }

    fn opacity(&self, transition: Transition, now: Instant) -> f32 {
        if self.changed_at.is_none() {
            return if self.visible { 1.0 } else { 0.0 };
        }
        let progress = self.progress(transition, now);
        if self.visible {
            self.from + (1.0 - self.from) * progress
        } else {
            self.from * (1.0 - progress)
        }
    }

    fn progress(&self, transition: Transition, now: Instant) -> f32 {
        let Some(changed_at) = self.changed_at else {
            return 1.0;
        };
        let duration = transition.duration.as_secs_f32();
        if duration <= 0.0 {
            return 1.0;
        }
        let linear = now.saturating_duration_since(changed_at).as_secs_f32() / duration;
        transition.easing.apply(linear)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use formkit::LoadingOverlay;

    use super::*;

    fn overlay() -> Option<Node> {
        LoadingOverlay::new(true).view()
    }

    #[test]
    fn stays_empty_while_hidden() {
        let mut fade = Crossfade::default();
        assert!(fade.observe(None, Instant::now()).is_none());
    }

    #[test]
    fn fades_in() {
        let mut fade = Crossfade::default();
        let start = Instant::now();
        let (_, opacity) = fade.observe(overlay(), start).unwrap();
        assert_eq!(opacity, 0.0);

        let (_, opacity) = fade.observe(overlay(), start + theme::FADE_DURATION / 2).unwrap();
        assert!((opacity - 0.5).abs() < 1e-3);

        let (_, opacity) = fade.observe(overlay(), start + theme::FADE_DURATION).unwrap();
        assert_eq!(opacity, 1.0);

        let (_, opacity) = fade
            .observe(overlay(), start + Duration::from_secs(10))
            .unwrap();
        assert_eq!(opacity, 1.0);
    }

    #[test]
    fn keeps_last_tree_while_fading_out() {
        let mut fade = Crossfade::default();
        let start = Instant::now();
        fade.observe(overlay(), start);
        let hide = start + Duration::from_secs(1);

        let (tree, opacity) = fade.observe(None, hide).unwrap();
        assert_eq!(Some(tree), overlay());
        assert_eq!(opacity, 1.0);

        let (_, opacity) = fade.observe(None, hide + theme::FADE_DURATION / 4).unwrap();
        assert!(opacity > 0.5 && opacity < 1.0);

        assert!(fade.observe(None, hide + theme::FADE_DURATION).is_none());
        assert!(fade.observe(None, hide + theme::FADE_DURATION * 2).is_none());
    }

    #[test]
    fn reappearing_restarts_fade_in() {
        let mut fade = Crossfade::default();
        let start = Instant::now();
        fade.observe(overlay(), start);
        fade.observe(None, start + Duration::from_secs(1));
        let again = start + Duration::from_secs(2);
        let (_, opacity) = fade.observe(overlay(), again).unwrap();
        assert_eq!(opacity, 0.0);
    }

    #[test]
    fn hiding_mid_fade_in_starts_from_current_opacity() {
        let mut fade = Crossfade::default();
        let start = Instant::now();
        fade.observe(overlay(), start);
        let hide = start + theme::FADE_DURATION / 2;

        let (_, at_hide) = fade.observe(None, hide).unwrap();
        assert!((at_hide - 0.5).abs() < 1e-3);

        let (_, later) = fade.observe(None, hide + theme::FADE_DURATION / 4).unwrap();
        assert!(later < at_hide);
        assert!(later > 0.0);

        assert!(fade.observe(None, hide + theme::FADE_DURATION).is_none());
    }

    #[test]
    fn showing_mid_fade_out_starts_from_current_opacity() {
        let mut fade = Crossfade::default();
        let start = Instant::now();
        fade.observe(overlay(), start);
        let hide = start + Duration::from_secs(1);
        fade.observe(None, hide);

        let again = hide + theme::FADE_DURATION / 2;
        let (_, opacity) = fade.observe(overlay(), again).unwrap();
        assert!((opacity - 0.5).abs() < 1e-3);
        let (_, opacity) = fade.observe(overlay(), again + theme::FADE_DURATION).unwrap();
        assert_eq!(opacity, 1.0);
    }
}
