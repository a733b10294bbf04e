//! Transient notice shown above the transcript.
//!
//! Each notice gets a sequence number. A dismissal timer only clears the notice it
//! was started for, so a newer notice is never cut short by an older timer.

/// How long a notice stays on screen.
pub const NOTICE_MILLIS: u32 = 3_000;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notices {
    seq: u64,
    current: Option<(u64, String)>,
}

impl Notices {
    /// Replaces the visible notice and returns the sequence number to dismiss it with.
    pub fn show(&mut self, text: impl Into<String>) -> u64 {
        self.seq += 1;
        self.current = Some((self.seq, text.into()));
        self.seq
    }

    /// Clears the notice if `seq` is still the one on screen.
    pub fn dismiss(&mut self, seq: u64) -> bool {
        match &self.current {
            Some((current, _)) if *current == seq => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|(_, text)| text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_clears_the_notice_it_was_started_for() {
        let mut notices = Notices::default();
        let seq = notices.show("Answer saved to your Bookmarks.");
        assert_eq!(notices.text(), Some("Answer saved to your Bookmarks."));
        assert!(notices.dismiss(seq));
        assert_eq!(notices.text(), None);
    }

    #[test]
    fn stale_timer_leaves_newer_notice_alone() {
        let mut notices = Notices::default();
        let first = notices.show("Answer saved to your Bookmarks.");
        let second = notices.show("Answer unsaved.");
        assert!(!notices.dismiss(first));
        assert_eq!(notices.text(), Some("Answer unsaved."));
        assert!(notices.dismiss(second));
        assert_eq!(notices.text(), None);
    }

    #[test]
    fn dismiss_after_clear_is_a_no_op() {
        let mut notices = Notices::default();
        let seq = notices.show("Answer unsaved.");
        notices.clear();
        assert!(!notices.dismiss(seq));
        assert_eq!(notices.text(), None);
    }
}
