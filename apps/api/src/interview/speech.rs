/// Accumulates recognized speech fragments until the candidate stops recording.
#[derive(Debug, Default, Clone)]
pub struct TranscriptBuffer {
    pending: String,
}

impl TranscriptBuffer {
    /// Appends a fragment, separated from earlier ones by a single space.
    pub fn push(&mut self, fragment: &str) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        if !self.pending.is_empty() {
            self.pending.push(' ');
        }
        self.pending.push_str(fragment);
    }

    /// What has been heard so far; shown as the in-progress answer.
    pub fn preview(&self) -> &str {
        &self.pending
    }

    /// Drains the buffer. `None` when nothing was heard.
    pub fn take(&mut self) -> Option<String> {
        let text = std::mem::take(&mut self.pending);
        (!text.is_empty()).then_some(text)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
