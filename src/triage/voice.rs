//! Contract with the third-party voice-call widget.
//!
//! The widget itself is external: we hand it an assistant id plus a
//! metadata bag at call start, ask it to stop, and react to the named
//! events it emits. Events carry no reply.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::EmergencyRecord;

#[derive(Error, Debug, PartialEq)]
pub enum VoiceError {
    #[error("Invalid {event} payload: {reason}")]
    InvalidPayload { event: &'static str, reason: String },

    #[error("Voice call failed to start: {0}")]
    StartFailed(String),
}

// ═══════════════════════════════════════════════════════════
// Call metadata
// ═══════════════════════════════════════════════════════════

/// Emergency context passed to the voice assistant at call start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallMetadata {
    pub patient_name: String,
    pub emergency_type: String,
    /// Symptoms joined with ", ".
    pub symptoms: String,
    pub severity: String,
    pub location: String,
    /// "lat, lng".
    pub coordinates: String,
    /// Vital signs serialized as a JSON string.
    pub vital_signs: String,
    pub ai_assessment: String,
    pub timestamp: String,
}

impl CallMetadata {
    pub fn from_record(record: &EmergencyRecord) -> Self {
        Self {
            patient_name: record.patient_info.name.clone(),
            emergency_type: record.emergency.kind.to_string(),
            symptoms: record.emergency.symptoms.join(", "),
            severity: record.emergency.severity.to_string(),
            location: record.location.address.clone(),
            coordinates: record.location.coordinates(),
            vital_signs: serde_json::to_string(&record.vital_signs).unwrap_or_default(),
            ai_assessment: record.ai_assessment.clone(),
            timestamp: record.emergency.timestamp.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOptions {
    pub metadata: CallMetadata,
}

/// The external widget. Implementations wrap whatever SDK is in use.
pub trait VoiceCallWidget {
    fn start(&mut self, assistant_id: &str, options: &CallOptions) -> Result<(), VoiceError>;
    fn stop(&mut self);
}

// ═══════════════════════════════════════════════════════════
// Events
// ═══════════════════════════════════════════════════════════

/// Payload of a `message` event. Only final transcripts are displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub transcript_type: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VoiceCallEvent {
    CallStart,
    CallEnd,
    SpeechStart,
    SpeechEnd,
    Message(VoiceMessage),
    Error(String),
    /// Any other widget notification (volume levels and the like), kept by name.
    Other(String),
}

impl VoiceCallEvent {
    /// Decode a named widget event and its optional payload.
    pub fn from_named(name: &str, payload: Option<&serde_json::Value>) -> Result<Self, VoiceError> {
        match name {
            "call-start" => Ok(Self::CallStart),
            "call-end" => Ok(Self::CallEnd),
            "speech-start" => Ok(Self::SpeechStart),
            "speech-end" => Ok(Self::SpeechEnd),
            "message" => {
                let payload = payload.cloned().unwrap_or(serde_json::Value::Null);
                serde_json::from_value(payload)
                    .map(Self::Message)
                    .map_err(|e| VoiceError::InvalidPayload {
                        event: "message",
                        reason: e.to_string(),
                    })
            }
            "error" => {
                let message = payload
                    .and_then(|p| p.get("message").and_then(|m| m.as_str()).or_else(|| p.as_str()))
                    .unwrap_or("Unknown error");
                Ok(Self::Error(message.to_string()))
            }
            other => Ok(Self::Other(other.to_string())),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// CallSession
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Idle,
    Connecting,
    Connected,
    Ended,
    Error,
}

/// Tracks one voice triage call and the status line shown to the patient.
pub struct CallSession<W: VoiceCallWidget> {
    widget: W,
    assistant_id: String,
    status: CallStatus,
    transcript: String,
}

impl<W: VoiceCallWidget> CallSession<W> {
    pub fn new(widget: W, assistant_id: &str) -> Self {
        Self {
            widget,
            assistant_id: assistant_id.to_string(),
            status: CallStatus::Idle,
            transcript: String::new(),
        }
    }

    pub fn status(&self) -> CallStatus {
        self.status
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Start a call carrying the record's context.
    pub fn start(&mut self, record: &EmergencyRecord) -> Result<(), VoiceError> {
        self.status = CallStatus::Connecting;
        self.transcript = "AI Medical Triage Agent is connecting...".into();

        let options = CallOptions {
            metadata: CallMetadata::from_record(record),
        };
        tracing::info!(assistant_id = %self.assistant_id, "Starting voice triage call");

        if let Err(e) = self.widget.start(&self.assistant_id, &options) {
            tracing::error!(error = %e, "Voice triage call failed to start");
            self.status = CallStatus::Error;
            self.transcript = format!("Error: {e}");
            return Err(e);
        }
        Ok(())
    }

    /// Apply a widget event.
    pub fn handle_event(&mut self, event: VoiceCallEvent) {
        match event {
            VoiceCallEvent::CallStart => {
                self.status = CallStatus::Connected;
                self.transcript =
                    "AI Agent connected! Speak naturally, the AI will guide you.".into();
            }
            VoiceCallEvent::CallEnd => {
                self.status = CallStatus::Ended;
                self.transcript = "Call completed. Emergency services dispatched.".into();
            }
            VoiceCallEvent::SpeechStart => {
                self.transcript = "You are speaking...".into();
            }
            VoiceCallEvent::SpeechEnd => {
                self.transcript = "AI is responding...".into();
            }
            VoiceCallEvent::Error(message) => {
                tracing::warn!(%message, "Voice call error");
                self.status = CallStatus::Error;
                self.transcript = format!("Error: {message}");
            }
            VoiceCallEvent::Message(message) => self.apply_message(&message),
            VoiceCallEvent::Other(name) => {
                tracing::trace!(event = %name, "Ignoring voice call notification");
            }
        }
    }

    /// End the call from our side.
    pub fn stop(&mut self) {
        if matches!(self.status, CallStatus::Idle | CallStatus::Ended) {
            return;
        }
        tracing::info!("Ending voice triage call");
        self.widget.stop();
        self.status = CallStatus::Ended;
        self.transcript = "AI conversation ended. Emergency services have been notified.".into();
    }

    fn apply_message(&mut self, message: &VoiceMessage) {
        if message.kind != "transcript" || message.transcript_type.as_deref() != Some("final") {
            return;
        }
        let Some(text) = message.transcript.as_deref() else {
            return;
        };
        match message.role.as_deref() {
            Some("assistant") => self.transcript = format!("AI: {text}"),
            Some("user") => self.transcript = format!("You: {text}"),
            _ => {}
        }
    }
}
