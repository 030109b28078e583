use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    #[default]
    Hidden,
    Hint,
    Dialog,
}

/// One line of NPC dialog, optionally paired with a voice cue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogLine {
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
}

impl DialogLine {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
        }
    }

    pub fn voiced(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: Some(voice.into()),
        }
    }
}

impl From<&str> for DialogLine {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for DialogLine {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

/// Hint/dialog box state. Every mutation overwrites the whole state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextWindow {
    mode: WindowMode,
    text: String,
    source_object_id: Option<String>,
    voice_path: Option<String>,
}

impl TextWindow {
    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_object_id(&self) -> Option<&str> {
        self.source_object_id.as_deref()
    }

    pub fn voice_path(&self) -> Option<&str> {
        self.voice_path.as_deref()
    }

    pub fn is_hint(&self) -> bool {
        self.mode == WindowMode::Hint
    }

    pub fn is_dialog(&self) -> bool {
        self.mode == WindowMode::Dialog
    }

    pub(crate) fn show_hint(&mut self, text: &str, source_id: &str) {
        *self = Self {
            mode: WindowMode::Hint,
            text: text.to_string(),
            source_object_id: Some(source_id.to_string()),
            voice_path: None,
        };
    }

    pub(crate) fn show_dialog(&mut self, line: &DialogLine, source_id: &str) {
        *self = Self {
            mode: WindowMode::Dialog,
            text: line.text.clone(),
            source_object_id: Some(source_id.to_string()),
            voice_path: line.voice.clone(),
        };
    }

    pub(crate) fn hide(&mut self) {
        *self = Self::default();
    }
}
