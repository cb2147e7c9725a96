//! UI module: View components for the TUI.

pub mod about;
pub mod exam_form;
pub mod results;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::ScoreView;
use crate::tui::styles::ClinicalTheme;

pub fn render_header(f: &mut Frame, area: Rect, view: ScoreView) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ClinicalTheme::text()),
        Span::styled("SACI Calculator", ClinicalTheme::title()),
        Span::styled(" │ ", ClinicalTheme::text_muted()),
        Span::styled(
            "Severity-Adjusted Caries Index",
            ClinicalTheme::text_secondary(),
        ),
        Span::styled(" │ ", ClinicalTheme::text_muted()),
        Span::styled(format!("{view} view"), ClinicalTheme::focused()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(header, area);
}

pub fn render_key_hints(f: &mut Frame, area: Rect) {
    let hints = [
        ("[↑↓] ", "Navigate "),
        ("[0-9] ", "Edit "),
        ("[Del] ", "Clear "),
        ("[S] ", "Sample "),
        ("[R] ", "Reset "),
        ("[V] ", "View "),
        ("[?] ", "About "),
        ("[Q] ", "Quit"),
    ];
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(*key, ClinicalTheme::key_hint()),
                Span::styled(*desc, ClinicalTheme::key_desc()),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(footer, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "DISCLAIMER: Indicative index for clinical record-keeping; it does not replace a professional dental examination.",
        ClinicalTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(ClinicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
