//! Single-line input shown in the status bar

/// What the entered text will be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// File name for an outline that has never been saved
    SaveAs(AfterSave),
    /// "Save first (Y/N)?" before discarding a dirty outline
    SaveFirst(AfterSave),
    /// New title for the current outline
    Title,
    /// Title for a brand new outline
    NewOutline,
}

/// What happens once a pending save has been dealt with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterSave {
    Nothing,
    Quit,
    NewOutline,
}

#[derive(Debug, Clone)]
pub struct Prompt {
    pub kind: PromptKind,
    pub label: String,
    input: Vec<char>,
    cursor: usize,
}

impl Prompt {
    pub fn new(kind: PromptKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            input: Vec::new(),
            cursor: 0,
        }
    }

    /// Pre-fill the input, cursor at the end
    pub fn with_input(mut self, text: &str) -> Self {
        self.input = text.chars().collect();
        self.cursor = self.input.len();
        self
    }

    pub fn value(&self) -> String {
        self.input.iter().collect()
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.input.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.input.len() {
            self.input.remove(self.cursor);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.input.len();
    }
}
