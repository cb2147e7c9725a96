//! Examination count entry form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{ExamCounts, ExamField, FIELDS};
use crate::tui::styles::ClinicalTheme;

/// Longest accepted entry; keeps every value well inside `u32`.
pub const MAX_DIGITS: usize = 6;

/// Box titles, in `FIELDS` order.
const TITLES: [&str; 10] = [
    "S1-2 · ICDAS 1-2 surfaces",
    "S3-4 · ICDAS 3-4 surfaces",
    "S5-6 · ICDAS 5-6 surfaces",
    "NMc ant · caries loss",
    "NMc post · caries loss",
    "NF1 · 1-surface fillings",
    "NF2-3 · 2-3 surface fillings",
    "NF4+ · 4+ fillings/crowns",
    "NMnc ant · other loss",
    "NMnc post · other loss",
];

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub field: ExamField,
    pub title: &'static str,
    pub value: String,
}

/// Exam form state
pub struct ExamFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
}

impl Default for ExamFormState {
    fn default() -> Self {
        Self {
            fields: FIELDS
                .iter()
                .zip(TITLES)
                .map(|(field, title)| FormField {
                    field: *field,
                    title,
                    value: String::new(),
                })
                .collect(),
            selected_field: 0,
        }
    }
}

impl ExamFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Append a digit to the current field. Returns whether the value changed.
    pub fn input_char(&mut self, c: char) -> bool {
        let value = &mut self.fields[self.selected_field].value;
        if c.is_ascii_digit() && value.len() < MAX_DIGITS {
            value.push(c);
            true
        } else {
            false
        }
    }

    /// Delete the last character. Returns whether the value changed.
    pub fn delete_char(&mut self) -> bool {
        self.fields[self.selected_field].value.pop().is_some()
    }

    /// Clear the current field. Returns whether the value changed.
    pub fn clear_field(&mut self) -> bool {
        let value = &mut self.fields[self.selected_field].value;
        let changed = !value.is_empty();
        value.zeroize();
        changed
    }

    /// Wipe every field buffer and return to the first field.
    pub fn reset(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.zeroize();
        }
        self.selected_field = 0;
    }

    /// Full label of the focused field.
    #[must_use]
    pub fn selected_label(&self) -> &'static str {
        self.fields[self.selected_field].field.label
    }

    /// Parse the form into counts. Empty fields count as 0.
    ///
    /// # Errors
    /// Returns a message naming the first field that is not a non-negative integer.
    pub fn to_exam_counts(&self) -> Result<ExamCounts, String> {
        let mut values = Vec::with_capacity(self.fields.len());

        for field in self.fields.iter() {
            let value = if field.value.is_empty() {
                0
            } else {
                field
                    .value
                    .parse::<u32>()
                    .map_err(|_| format!("{}: Invalid count", field.field.code))?
            };
            values.push(value);
        }

        ExamCounts::from_vec(&values)
    }

    /// Load the textbook example (7.03% SACI-total).
    pub fn load_sample_data(&mut self) {
        let sample = [
            "4", // S1_2
            "2", // S3_4
            "1", // S5_6
            "0", // NMc_ant
            "0", // NMc_post
            "3", // NF1
            "0", // NF2_3
            "0", // NF4_plus
            "0", // NMnc_ant
            "0", // NMnc_post
        ];
        for (field, val) in self.fields.iter_mut().zip(sample) {
            field.value = val.to_string();
        }
    }
}

/// Render the entry form
pub fn render_exam_form(f: &mut Frame, area: Rect, state: &ExamFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Fields
            Constraint::Length(2), // Focused field label
        ])
        .split(area);

    render_form_fields(f, chunks[0], state);

    let label = Paragraph::new(Line::from(vec![
        Span::styled(" ▸ ", ClinicalTheme::focused()),
        Span::styled(state.selected_label(), ClinicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicalTheme::border()),
    );
    f.render_widget(label, chunks[1]);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &ExamFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (ClinicalTheme::border_focused(), ClinicalTheme::focused())
        } else {
            (ClinicalTheme::border(), ClinicalTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.title), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        // Empty reads as the default count.
        let value_display = if field.value.is_empty() {
            Span::styled("0", ClinicalTheme::text_muted())
        } else {
            Span::styled(field.value.as_str(), ClinicalTheme::text())
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected {
                Span::styled("▌", ClinicalTheme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[i]);
    }
}
