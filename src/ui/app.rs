use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use log::{debug, info};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::db::{delete_all_entries, fetch_entries, insert_entry, update_entry};
use crate::models::Entry;

use super::forms::{EntryField, EntryForm};
use super::helpers::centered_rect;

/// Header space for the application title.
const HEADER_HEIGHT: u16 = 3;
/// Form block: two field lines plus the selection line and borders.
const FORM_HEIGHT: u16 = 5;
/// Footer space reserved for key instructions.
const FOOTER_HEIGHT: u16 = 3;

/// Which part of the screen receives plain keystrokes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Focus {
    Form,
    List,
}

/// Fine-grained modes layered on top of the main screen.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Mode {
    Normal,
    ConfirmDeleteAll,
}

/// Central application state: the storage handle, the last snapshot of the
/// table, the pending form and the row the next update targets.
pub struct App {
    conn: Connection,
    entries: Vec<Entry>,
    form: EntryForm,
    selected_id: Option<i64>,
    cursor: usize,
    focus: Focus,
    mode: Mode,
}

impl App {
    /// Take ownership of an initialized connection and load the current rows.
    pub fn new(conn: Connection) -> Result<Self> {
        let entries = fetch_entries(&conn)?;
        Ok(Self {
            conn,
            entries,
            form: EntryForm::default(),
            selected_id: None,
            cursor: 0,
            focus: Focus::Form,
            mode: Mode::Normal,
        })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected_id
    }

    /// Current `(title, subtitle)` text in the form.
    pub fn pending(&self) -> (&str, &str) {
        (&self.form.title, &self.form.subtitle)
    }

    /// Insert the pending text as a new entry. Blank fields make this a silent
    /// no-op.
    pub fn add_entry(&mut self) -> Result<()> {
        if !self.form.is_complete() {
            debug!("event=add_skipped reason=blank_field");
            return Ok(());
        }
        insert_entry(&self.conn, &self.form.title, &self.form.subtitle)?;
        self.reload()?;
        self.reset_pending();
        Ok(())
    }

    /// Overwrite the selected entry with the pending text. Without a selection
    /// nothing happens beyond a log line.
    pub fn update_selected(&mut self) -> Result<()> {
        let Some(id) = self.selected_id else {
            info!("event=update_skipped reason=no_selection");
            return Ok(());
        };
        update_entry(&self.conn, id, &self.form.title, &self.form.subtitle)?;
        self.reload()?;
        self.reset_pending();
        Ok(())
    }

    /// Wipe the table.
    pub fn delete_all(&mut self) -> Result<()> {
        delete_all_entries(&self.conn)?;
        self.reload()?;
        self.reset_pending();
        Ok(())
    }

    /// Replace the in-memory list with a fresh snapshot. Selection and form
    /// text are left alone.
    pub fn reload(&mut self) -> Result<()> {
        self.entries = fetch_entries(&self.conn)?;
        if self.cursor >= self.entries.len() {
            self.cursor = self.entries.len().saturating_sub(1);
        }
        Ok(())
    }

    /// Mark the highlighted row as the update target. The form keeps whatever
    /// text it already holds; it is not filled from the row.
    pub fn select_highlighted(&mut self) {
        if let Some(entry) = self.entries.get(self.cursor) {
            self.selected_id = Some(entry.id);
            info!(
                "event=entry_selected id={} title={:?} subtitle={:?}",
                entry.id, entry.title, entry.subtitle
            );
        }
    }

    /// Move the list cursor by `offset` rows, clamped to the list bounds.
    pub fn move_cursor(&mut self, offset: isize) {
        if self.entries.is_empty() {
            self.cursor = 0;
            return;
        }
        let last = self.entries.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(offset).min(last);
    }

    /// Handle a keystroke without modifiers. Returns `true` when the
    /// application should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::ConfirmDeleteAll => self.handle_confirm_delete_all(code)?,
        };

        Ok(exit)
    }

    /// Handle a `Ctrl+<ch>` chord. Returns `true` when the application should
    /// exit.
    pub fn handle_ctrl(&mut self, ch: char) -> Result<bool> {
        if ch == 'c' {
            return Ok(true);
        }
        if self.mode != Mode::Normal {
            return Ok(false);
        }

        match ch {
            'a' => self.add_entry()?,
            'u' => self.update_selected()?,
            'd' => self.mode = Mode::ConfirmDeleteAll,
            'r' => self.reload()?,
            _ => {}
        }
        Ok(false)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Esc => *exit = true,
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            _ => match self.focus {
                Focus::Form => self.handle_form_key(code)?,
                Focus::List => self.handle_list_key(code, exit),
            },
        }
        Ok(Mode::Normal)
    }

    fn handle_form_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Up => self.form.focus(EntryField::Title),
            KeyCode::Down => self.form.focus(EntryField::Subtitle),
            KeyCode::Enter => match self.form.active {
                EntryField::Title => self.form.focus(EntryField::Subtitle),
                EntryField::Subtitle => self.add_entry()?,
            },
            KeyCode::Char(ch) => self.form.push_char(ch),
            _ => {}
        }
        Ok(())
    }

    fn handle_list_key(&mut self, code: KeyCode, exit: &mut bool) {
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-5),
            KeyCode::PageDown => self.move_cursor(5),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.entries.len().saturating_sub(1),
            KeyCode::Enter | KeyCode::Char(' ') => self.select_highlighted(),
            _ => {}
        }
    }

    fn handle_confirm_delete_all(&mut self, code: KeyCode) -> Result<Mode> {
        match code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.delete_all()?;
                Ok(Mode::Normal)
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Ok(Mode::Normal),
            _ => Ok(Mode::ConfirmDeleteAll),
        }
    }

    /// Title -> Subtitle -> List -> Title, or the reverse.
    fn cycle_focus(&mut self, forward: bool) {
        let (focus, field) = match (self.focus, self.form.active, forward) {
            (Focus::Form, EntryField::Title, true) => (Focus::Form, EntryField::Subtitle),
            (Focus::Form, EntryField::Subtitle, true) => (Focus::List, EntryField::Subtitle),
            (Focus::List, _, true) => (Focus::Form, EntryField::Title),
            (Focus::Form, EntryField::Title, false) => (Focus::List, EntryField::Title),
            (Focus::Form, EntryField::Subtitle, false) => (Focus::Form, EntryField::Title),
            (Focus::List, _, false) => (Focus::Form, EntryField::Subtitle),
        };
        self.focus = focus;
        self.form.focus(field);
    }

    fn reset_pending(&mut self) {
        self.form.clear();
        self.selected_id = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(FORM_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        self.draw_form(frame, chunks[1]);
        self.draw_entry_list(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);

        if self.mode == Mode::ConfirmDeleteAll {
            self.draw_confirm_delete_all(frame, area);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                "Database CRUD Application",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  •  {} entries", self.entries.len())),
        ]))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Form;
        let mut block = Block::default().title("Entry").borders(Borders::ALL);
        if focused {
            block = block.border_style(Style::default().fg(Color::Yellow));
        }
        let inner = block.inner(area);

        let selection = match self.selected_id {
            Some(id) => Span::styled(
                format!("Selected ID: {id}"),
                Style::default().fg(Color::Cyan),
            ),
            None => Span::styled("No entry selected", Style::default().fg(Color::DarkGray)),
        };

        let lines = vec![
            self.form.build_line(EntryField::Title, focused),
            self.form.build_line(EntryField::Subtitle, focused),
            Line::from(selection),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);

        if focused && inner.height >= 2 {
            let field = self.form.active;
            let prefix = format!("{}: ", field.label()).len();
            let row = match field {
                EntryField::Title => 0,
                EntryField::Subtitle => 1,
            };
            let offset = (prefix + self.form.value_len(field))
                .min(inner.width.saturating_sub(1) as usize) as u16;
            frame.set_cursor_position((inner.x + offset, inner.y + row));
        }
    }

    fn draw_entry_list(&self, frame: &mut Frame, area: Rect) {
        let mut block = Block::default().title("Entries").borders(Borders::ALL);
        if self.focus == Focus::List {
            block = block.border_style(Style::default().fg(Color::Yellow));
        }

        if self.entries.is_empty() {
            let message = Paragraph::new("No entries yet. Fill the form and press Ctrl+A.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let marker = if Some(entry.id) == self.selected_id {
                    "* "
                } else {
                    "  "
                };
                ListItem::new(format!("{marker}{entry}"))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let paragraph = Paragraph::new(self.footer_instructions()).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (self.mode, self.focus) {
            (Mode::ConfirmDeleteAll, _) => Line::from(vec![
                Span::styled("[Y]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[N/Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Mode::Normal, Focus::List) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Select   "),
                Span::styled("[^U]", key_style),
                Span::raw(" Update   "),
                Span::styled("[^D]", key_style),
                Span::raw(" Delete All   "),
                Span::styled("[^R]", key_style),
                Span::raw(" Reload   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Form   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            (Mode::Normal, Focus::Form) => Line::from(vec![
                Span::styled("[^A]", key_style),
                Span::raw(" Add   "),
                Span::styled("[^U]", key_style),
                Span::raw(" Update   "),
                Span::styled("[^D]", key_style),
                Span::raw(" Delete All   "),
                Span::styled("[^R]", key_style),
                Span::raw(" Reload   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_confirm_delete_all(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Delete All")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete all {} entries?", self.entries.len())),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}
