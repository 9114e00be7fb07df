use setup_tools::{Credentials, is_url_like};

/// Single-line text input with a character cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    /// Cursor position in characters, `0..=len`.
    cursor: usize,
}

impl TextField {
    /// A field holding `value` with the cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let mut field = Self::default();
        field.insert_str(&value.into());
        field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Insert text at the cursor. Line breaks and other control characters
    /// are dropped, so a pasted multi-line value lands on one line.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            self.insert_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    /// Delete the word before the cursor, along with any whitespace between
    /// it and the cursor.
    pub fn delete_word(&mut self) {
        let chars: Vec<char> = self.value.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let from = self.byte_index(start);
        let to = self.byte_index(self.cursor);
        self.value.replace_range(from..to, "");
        self.cursor = start;
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }
}

/// The three credential fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BaseUrl,
    Username,
    Password,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::BaseUrl, Field::Username, Field::Password];

    pub fn label(self) -> &'static str {
        match self {
            Field::BaseUrl => "Jira base URL",
            Field::Username => "Username",
            Field::Password => "Password / API token",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Field::BaseUrl => Field::Username,
            Field::Username => Field::Password,
            Field::Password => Field::BaseUrl,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::BaseUrl => Field::Password,
            Field::Username => Field::BaseUrl,
            Field::Password => Field::Username,
        }
    }
}

/// Credentials form state: three fields and the focused one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsForm {
    base_url: TextField,
    username: TextField,
    password: TextField,
    focus: Field,
}

impl CredentialsForm {
    /// An empty form, optionally with the base URL filled in.
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            base_url: base_url.map(TextField::with_value).unwrap_or_default(),
            username: TextField::default(),
            password: TextField::default(),
            focus: Field::BaseUrl,
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn set_focus(&mut self, field: Field) {
        self.focus = field;
    }

    pub fn field(&self, field: Field) -> &TextField {
        match field {
            Field::BaseUrl => &self.base_url,
            Field::Username => &self.username,
            Field::Password => &self.password,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut TextField {
        match field {
            Field::BaseUrl => &mut self.base_url,
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        self.field_mut(self.focus)
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.base_url.value(),
            self.username.value(),
            self.password.value(),
        )
    }

    /// The first field that blocks submission: an empty field, or a base URL
    /// that does not look like an http(s) URL.
    pub fn first_invalid(&self) -> Option<Field> {
        Field::ALL.into_iter().find(|&field| {
            let value = self.field(field).value();
            value.trim().is_empty() || (field == Field::BaseUrl && !is_url_like(value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_insert_at_cursor() {
        let mut field = TextField::with_value("jra");
        field.move_left();
        field.move_left();
        field.insert_char('i');
        assert_eq!(field.value(), "jira");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_backspace_and_delete_at_bounds() {
        let mut field = TextField::with_value("ab");
        field.delete();
        assert_eq!(field.value(), "ab");
        field.move_home();
        field.backspace();
        assert_eq!(field.value(), "ab");
        field.delete();
        assert_eq!(field.value(), "b");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut field = TextField::with_value("héllo");
        field.move_left();
        field.move_left();
        field.move_left();
        field.backspace();
        assert_eq!(field.value(), "hllo");
        assert_eq!(field.cursor(), 1);
    }

    #[test]
    fn test_paste_strips_line_breaks() {
        let mut field = TextField::default();
        field.insert_str("https://jira.example.com\r\n");
        assert_eq!(field.value(), "https://jira.example.com");
        assert_eq!(field.cursor(), 24);
    }

    #[test]
    fn test_delete_word() {
        let mut field = TextField::with_value("alice smith  ");
        field.delete_word();
        assert_eq!(field.value(), "alice ");
        field.delete_word();
        assert_eq!(field.value(), "");
        field.delete_word();
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn test_delete_word_mid_value_keeps_tail() {
        let mut field = TextField::with_value("one two");
        for _ in 0..4 {
            field.move_left();
        }
        field.delete_word();
        assert_eq!(field.value(), " two");
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn test_focus_cycles() {
        let mut form = CredentialsForm::new(None);
        form.focus_prev();
        assert_eq!(form.focus(), Field::Password);
        form.focus_next();
        assert_eq!(form.focus(), Field::BaseUrl);
    }

    #[test]
    fn test_first_invalid() {
        let mut form = CredentialsForm::new(Some("jira.example.com"));
        assert_eq!(form.first_invalid(), Some(Field::BaseUrl));

        form.field_mut(Field::BaseUrl).clear();
        form.field_mut(Field::BaseUrl).insert_str("https://jira.example.com");
        assert_eq!(form.first_invalid(), Some(Field::Username));

        form.field_mut(Field::Username).insert_str("alice");
        form.field_mut(Field::Password).insert_str("   ");
        assert_eq!(form.first_invalid(), Some(Field::Password));

        form.field_mut(Field::Password).insert_str("token");
        assert_eq!(form.first_invalid(), None);
        assert_eq!(form.credentials().username, "alice");
    }

    proptest! {
        #[test]
        fn prop_cursor_stays_in_bounds(
            ops in proptest::collection::vec(0u8..9, 0..64),
            text in "\\PC{0,8}",
        ) {
            let mut field = TextField::default();
            for op in ops {
                match op {
                    0 => field.insert_str(&text),
                    1 => field.backspace(),
                    2 => field.delete(),
                    3 => field.delete_word(),
                    4 => field.move_left(),
                    5 => field.move_right(),
                    6 => field.move_home(),
                    7 => field.move_end(),
                    _ => field.insert_char('x'),
                }
                prop_assert!(field.cursor() <= field.len());
            }
        }
    }
}
