//! Terminal progress indicator shown while the model is running.
//!
//! A thin lifecycle wrapper over an indicatif spinner. indicatif's steady
//! ticker redraws the line every [`FRAME_INTERVAL`]; [`Spinner::stop`] joins
//! the ticker and clears the line before returning, so nothing printed
//! afterwards can be overwritten by a late frame.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressFinish, ProgressStyle};

use crate::error::SpinnerError;

/// Braille frames drawn in order and wrapped. indicatif shows the last entry
/// only once the bar is finished, and the bar is always cleared on finish.
pub const TICK_STRINGS: [&str; 11] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

/// Delay between frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Line layout: thinking emoji, rotating glyph, label.
pub const TEMPLATE: &str = "🤔 {spinner} {msg}";

enum State {
    Idle(ProgressBar),
    Running(ProgressBar),
    Stopped,
}

/// A one-shot spinner: `idle -> running -> stopped`.
pub struct Spinner {
    state: State,
}

impl Spinner {
    /// Create a spinner that draws on stderr.
    ///
    /// indicatif draws nothing when stderr is not a terminal, so piped output
    /// stays free of escape codes.
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// Spinner with the same lifecycle that draws nothing.
    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    /// Create a spinner drawing to an arbitrary indicatif target.
    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        // A running spinner that is dropped clears its line as well.
        let bar = ProgressBar::with_draw_target(None, target).with_finish(ProgressFinish::AndClear);
        Self {
            state: State::Idle(bar),
        }
    }

    /// Start animating with `label` next to the glyph.
    ///
    /// A spinner can only be started once.
    pub fn start(&mut self, label: impl Into<String>) -> Result<(), SpinnerError> {
        let bar = match std::mem::replace(&mut self.state, State::Stopped) {
            State::Idle(bar) => bar,
            other => {
                self.state = other;
                return Err(SpinnerError::AlreadyStarted);
            }
        };

        bar.set_style(style());
        bar.set_message(label.into());
        bar.enable_steady_tick(FRAME_INTERVAL);
        self.state = State::Running(bar);
        Ok(())
    }

    /// Stop the animation and wait until the line has been cleared.
    ///
    /// Does nothing if the spinner is not running.
    pub fn stop(&mut self) {
        match std::mem::replace(&mut self.state, State::Stopped) {
            State::Running(bar) => {
                // Joins the ticker thread, so no frame can follow the clear.
                bar.disable_steady_tick();
                bar.finish_and_clear();
            }
            idle @ State::Idle(_) => self.state = idle,
            State::Stopped => {}
        }
    }

    /// True between a successful `start` and the matching `stop`.
    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    /// True once the spinner has been started and stopped; it cannot be
    /// started again.
    pub fn is_stopped(&self) -> bool {
        matches!(self.state, State::Stopped)
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

fn style() -> ProgressStyle {
    ProgressStyle::with_template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&TICK_STRINGS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::InMemoryTerm;
    use std::collections::HashSet;
    use std::thread::sleep;

    const LABEL: &str = "Thinking with llama3.1 model...";

    fn in_memory() -> (InMemoryTerm, Spinner) {
        let term = InMemoryTerm::new(4, 80);
        let spinner =
            Spinner::with_draw_target(ProgressDrawTarget::term_like(Box::new(term.clone())));
        (term, spinner)
    }

    /// The glyph currently on screen, if the line has the expected layout.
    fn current_frame(term: &InMemoryTerm, label: &str) -> Option<String> {
        let line = term.contents();
        let glyph = line.strip_prefix("🤔 ")?.strip_suffix(label)?.strip_suffix(' ')?;
        Some(glyph.to_string())
    }

    #[test]
    fn test_template_parses() {
        assert!(ProgressStyle::with_template(TEMPLATE).is_ok());
    }

    #[test]
    fn test_running_spinner_shows_emoji_frame_and_label() {
        let (term, mut spinner) = in_memory();

        spinner.start(LABEL).unwrap();
        sleep(FRAME_INTERVAL * 3);

        let frame = current_frame(&term, LABEL)
            .unwrap_or_else(|| panic!("unexpected line: {:?}", term.contents()));
        assert!(TICK_STRINGS[..10].contains(&frame.as_str()), "frame: {:?}", frame);

        spinner.stop();
    }

    #[test]
    fn test_frames_advance_while_running() {
        let (term, mut spinner) = in_memory();

        spinner.start("x").unwrap();
        let mut seen = HashSet::new();
        for _ in 0..15 {
            sleep(Duration::from_millis(40));
            if let Some(frame) = current_frame(&term, "x") {
                seen.insert(frame);
            }
        }
        spinner.stop();

        assert!(seen.len() >= 2, "frames seen: {:?}", seen);
    }

    #[test]
    fn test_stop_clears_line_before_returning() {
        let (term, mut spinner) = in_memory();

        spinner.start("label").unwrap();
        sleep(FRAME_INTERVAL * 2);
        spinner.stop();

        assert_eq!(term.contents(), "");
        assert!(spinner.is_stopped());

        // Nothing is drawn once stop has returned.
        sleep(FRAME_INTERVAL * 3);
        assert_eq!(term.contents(), "");
    }

    #[test]
    fn test_stop_immediately_after_start_still_clears() {
        let (term, mut spinner) = in_memory();

        spinner.start("label").unwrap();
        spinner.stop();

        assert_eq!(term.contents(), "");
    }

    #[test]
    fn test_second_start_is_rejected() {
        let mut spinner = Spinner::hidden();

        spinner.start("one").unwrap();
        assert_eq!(spinner.start("two"), Err(SpinnerError::AlreadyStarted));
        assert!(spinner.is_running());

        spinner.stop();
        assert_eq!(spinner.start("three"), Err(SpinnerError::AlreadyStarted));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut spinner = Spinner::hidden();

        // Stopping an idle spinner leaves it startable.
        spinner.stop();
        assert!(!spinner.is_stopped());

        spinner.start("label").unwrap();
        spinner.stop();
        spinner.stop();
        assert!(spinner.is_stopped());
    }

    #[test]
    fn test_dropping_running_spinner_clears_line() {
        let (term, mut spinner) = in_memory();

        spinner.start("label").unwrap();
        sleep(FRAME_INTERVAL * 2);
        assert_ne!(term.contents(), "");
        drop(spinner);

        assert_eq!(term.contents(), "");
    }

    #[test]
    fn test_repeated_cycles_leave_no_running_loop() {
        let term = InMemoryTerm::new(4, 80);

        for i in 0..20 {
            let mut spinner =
                Spinner::with_draw_target(ProgressDrawTarget::term_like(Box::new(term.clone())));
            spinner.start(format!("cycle {}", i)).unwrap();
            sleep(Duration::from_millis(30));
            spinner.stop();
            assert!(spinner.is_stopped());
            assert_eq!(term.contents(), "");
        }

        // If any ticker were still alive it would redraw the line.
        sleep(FRAME_INTERVAL * 3);
        assert_eq!(term.contents(), "");
    }
}
