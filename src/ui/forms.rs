use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Pending title/subtitle text composed in the form block.
#[derive(Default, Clone)]
pub(crate) struct EntryForm {
    pub(crate) title: String,
    pub(crate) subtitle: String,
    pub(crate) active: EntryField,
}

/// Fields available within the entry form.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum EntryField {
    #[default]
    Title,
    Subtitle,
}

impl EntryField {
    pub(crate) fn label(self) -> &'static str {
        match self {
            EntryField::Title => "Title",
            EntryField::Subtitle => "Subtitle",
        }
    }
}

impl EntryForm {
    /// Switch focus to a particular field.
    pub(crate) fn focus(&mut self, field: EntryField) {
        self.active = field;
    }

    /// Append a character to the active field. Control characters are ignored.
    pub(crate) fn push_char(&mut self, ch: char) {
        if !ch.is_control() {
            self.value_mut(self.active).push(ch);
        }
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        self.value_mut(self.active).pop();
    }

    /// Empty both fields and return focus to the title.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Both fields hold something other than whitespace. Insert is only
    /// allowed when this holds; the raw (untrimmed) text is what gets stored.
    pub(crate) fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.subtitle.trim().is_empty()
    }

    pub(crate) fn value(&self, field: EntryField) -> &str {
        match field {
            EntryField::Title => &self.title,
            EntryField::Subtitle => &self.subtitle,
        }
    }

    fn value_mut(&mut self, field: EntryField) -> &mut String {
        match field {
            EntryField::Title => &mut self.title,
            EntryField::Subtitle => &mut self.subtitle,
        }
    }

    /// Render a single line for the form widget. `focused` is false while the
    /// list owns keyboard focus, so no field is highlighted then.
    pub(crate) fn build_line(&self, field: EntryField, focused: bool) -> Line<'static> {
        let value = self.value(field);
        let is_active = focused && self.active == field;

        let display = if value.is_empty() {
            "<empty>".to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: EntryField) -> usize {
        self.value(field).chars().count()
    }
}
