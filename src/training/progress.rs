//! Progress reporting seam
//!
//! Trainers narrate their milestones through a sink instead of printing,
//! so the CLI decides how lines render and tests can capture or drop them.

/// Receives human-readable progress lines during a training run.
pub trait ProgressSink {
    fn message(&self, text: &str);
}

/// Any closure over `&str` works as a sink.
impl<F: Fn(&str)> ProgressSink for F {
    fn message(&self, text: &str) {
        self(text)
    }
}

/// Sink that discards everything. Used for JSON output mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ProgressSink for Silent {
    fn message(&self, _text: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_closure_sink_receives_messages() {
        let seen = RefCell::new(Vec::new());
        let sink = |text: &str| seen.borrow_mut().push(text.to_string());
        sink.message("Loading training data from ./data...");
        sink.message("Saving model to out.mfmodel...");
        assert_eq!(seen.borrow().len(), 2, "sink should capture every line");
        assert!(seen.borrow()[0].starts_with("Loading training data"));
    }

    #[test]
    fn test_silent_sink_discards() {
        Silent.message("never rendered");
    }
}
