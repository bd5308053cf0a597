//! Single-line text input state for modal prompts.

use crossterm::event::{KeyCode, KeyEvent};

/// What a key press did to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Buffer changed or the key was ignored; keep editing.
    Editing,
    /// Operator pressed Enter.
    Submitted,
    /// Operator pressed Esc.
    Cancelled,
}

/// Buffer backing a modal line prompt, optionally masked.
#[derive(Debug, Clone)]
pub struct LineInput {
    buffer: String,
    masked: bool,
}

impl LineInput {
    /// Empty input; `masked` renders every character as `*`.
    #[must_use]
    pub fn new(masked: bool) -> Self {
        Self {
            buffer: String::new(),
            masked,
        }
    }

    /// Raw buffer contents.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.buffer
    }

    /// Take the buffer, leaving the input empty.
    #[must_use]
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    /// Text to render: masked inputs show one `*` per character.
    #[must_use]
    pub fn display(&self) -> String {
        if self.masked {
            "*".repeat(self.buffer.chars().count())
        } else {
            self.buffer.clone()
        }
    }

    /// Apply a key press to the buffer.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputEvent {
        match key.code {
            KeyCode::Enter => InputEvent::Submitted,
            KeyCode::Esc => InputEvent::Cancelled,
            KeyCode::Backspace => {
                self.buffer.pop();
                InputEvent::Editing
            }
            KeyCode::Char(c) => {
                self.buffer.push(c);
                InputEvent::Editing
            }
            _ => InputEvent::Editing,
        }
    }
}
