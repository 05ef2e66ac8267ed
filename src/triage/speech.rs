//! Accumulates speech-recognition results into the text shown while the
//! patient is talking.

/// One recognition result as delivered by the recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechSegment {
    pub text: String,
    pub is_final: bool,
}

impl SpeechSegment {
    pub fn interim(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_final: false,
        }
    }

    pub fn finalized(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_final: true,
        }
    }
}

/// Final segments joined with spaces, followed by the interim tail.
pub fn current_speech(segments: &[SpeechSegment]) -> String {
    let mut finals = String::new();
    let mut interim = String::new();

    for segment in segments {
        if segment.is_final {
            finals.push_str(&segment.text);
            finals.push(' ');
        } else {
            interim.push_str(&segment.text);
        }
    }

    format!("{finals}{interim}").trim().to_string()
}

/// Running transcript for one listening session.
#[derive(Debug, Clone, Default)]
pub struct TranscriptBuffer {
    segments: Vec<SpeechSegment>,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace results from `result_index` onward with `results`.
    pub fn apply(&mut self, result_index: usize, results: Vec<SpeechSegment>) {
        self.segments.truncate(result_index);
        self.segments.extend(results);
    }

    /// Text to display, or `None` while nothing has been heard.
    pub fn current(&self) -> Option<String> {
        Some(current_speech(&self.segments)).filter(|s| !s.is_empty())
    }

    /// Only the finalized part, for triage.
    pub fn finalized(&self) -> String {
        let finals: Vec<SpeechSegment> =
            self.segments.iter().filter(|s| s.is_final).cloned().collect();
        current_speech(&finals)
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finals_then_interim() {
        let text = current_speech(&[
            SpeechSegment::finalized("my chest"),
            SpeechSegment::interim("hurts a"),
            SpeechSegment::finalized("lot"),
        ]);
        assert_eq!(text, "my chest lot hurts a");
    }

    #[test]
    fn whitespace_only_is_none() {
        let mut buffer = TranscriptBuffer::new();
        assert!(buffer.current().is_none());
        buffer.apply(0, vec![SpeechSegment::interim("   ")]);
        assert!(buffer.current().is_none());
    }

    #[test]
    fn later_results_replace_interim() {
        let mut buffer = TranscriptBuffer::new();
        buffer.apply(0, vec![SpeechSegment::interim("chest")]);
        assert_eq!(buffer.current().as_deref(), Some("chest"));

        buffer.apply(0, vec![SpeechSegment::finalized("chest pain")]);
        buffer.apply(1, vec![SpeechSegment::interim("since")]);
        assert_eq!(buffer.current().as_deref(), Some("chest pain since"));
        assert_eq!(buffer.finalized(), "chest pain");

        buffer.clear();
        assert!(buffer.current().is_none());
    }
}
