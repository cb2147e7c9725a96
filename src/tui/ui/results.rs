//! Live SACI readout panel.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{format_percent, format_score, SaciAssessment, SaciScores, ScoreView};
use crate::tui::styles::ClinicalTheme;

/// What the results panel shows: a fresh assessment, or why there is none.
#[derive(Debug, Clone)]
pub enum ResultsState {
    Assessed(SaciAssessment),
    InputError(String),
}

/// Render component scores and the SACI percentages.
pub fn render_results(f: &mut Frame, area: Rect, state: &ResultsState, view: ScoreView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Component scores
            Constraint::Min(0),    // SACI scores
        ])
        .split(area);

    match state {
        ResultsState::Assessed(assessment) => {
            render_components(f, chunks[0], assessment);
            match assessment.scores() {
                Ok(scores) => render_scores(f, chunks[1], &scores, view),
                Err(e) => render_message(f, chunks[1], &e.to_string()),
            }
        }
        ResultsState::InputError(message) => {
            render_message(f, area, message);
        }
    }
}

fn render_components(f: &mut Frame, area: Rect, assessment: &SaciAssessment) {
    let c = &assessment.components;
    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, ClinicalTheme::text_secondary()),
            Span::styled(value, ClinicalTheme::text()),
        ])
    };

    let surfaces_style = if c.total_surfaces > 0 {
        ClinicalTheme::text()
    } else {
        ClinicalTheme::danger()
    };

    let lines = vec![
        row(" Active caries (Dₐ):    ", format_score(c.da_score)),
        row(" Missing, caries (M_c): ", format_score(c.mc_score)),
        row(" Restored (F_c):        ", format_score(c.fc_score)),
        Line::from(vec![
            Span::styled(" Surfaces (S_total):    ", ClinicalTheme::text_secondary()),
            Span::styled(c.total_surfaces.to_string(), surfaces_style),
        ]),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Component Scores ", ClinicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(ClinicalTheme::border()),
    );
    f.render_widget(panel, area);
}

fn render_scores(f: &mut Frame, area: Rect, scores: &SaciScores, view: ScoreView) {
    let block = Block::default()
        .title(Span::styled(
            format!(" SACI Scores · {view} "),
            ClinicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(ClinicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let readouts = view.readouts(scores);
    let constraints: Vec<Constraint> = readouts
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, (label, value)) in readouts.into_iter().enumerate() {
        // The gauge saturates; the label carries the exact figure.
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(Span::styled(format!(" {label} "), ClinicalTheme::text_secondary()))
                    .borders(Borders::ALL)
                    .border_style(ClinicalTheme::border()),
            )
            .gauge_style(ClinicalTheme::info())
            .ratio((value / 100.0).clamp(0.0, 1.0))
            .label(format_percent(value));
        f.render_widget(gauge, rows[i]);
    }
}

fn render_message(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Not scored", ClinicalTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, ClinicalTheme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(" SACI Scores ", ClinicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(ClinicalTheme::danger()),
    );

    f.render_widget(content, area);
}
