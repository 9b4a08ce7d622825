/// Single-line text editor for dashboard forms. `cursor` counts chars, not bytes.
#[derive(Default, Clone)]
pub struct LineEdit {
    pub value: String,
    pub cursor: usize,
}

impl LineEdit {
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn set(&mut self, s: impl Into<String>) {
        self.value = s.into();
        self.cursor = self.char_len();
    }
    pub fn push(&mut self, ch: char) {
        let at = self.byte_index();
        self.value.insert(at, ch);
        self.cursor += 1;
    }
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.value.remove(at);
        }
    }
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index();
            self.value.remove(at);
        }
    }
    pub fn left(&mut self) {
        if self.cursor > 0 { self.cursor -= 1; }
    }
    pub fn right(&mut self) {
        if self.cursor < self.char_len() { self.cursor += 1; }
    }
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
    /// Value with a `|` at the cursor.
    pub fn rendered(&self) -> String {
        let at = self.byte_index();
        format!("{}|{}", &self.value[..at], &self.value[at..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_at_the_cursor() {
        let mut e = LineEdit::default();
        e.set("5000");
        e.left();
        e.left();
        e.push(',');
        assert_eq!(e.value, "50,00");
        e.backspace();
        e.delete();
        assert_eq!(e.value, "500");
        assert_eq!(e.rendered(), "50|0");
    }

    #[test]
    fn multibyte_input_is_safe() {
        let mut e = LineEdit::default();
        e.set("5만원");
        e.backspace();
        assert_eq!(e.value, "5만");
        e.left();
        e.push('0');
        assert_eq!(e.value, "50만");
        e.clear();
        assert_eq!(e.rendered(), "|");
    }
}
