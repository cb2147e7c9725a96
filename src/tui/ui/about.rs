//! Reference screen: terms and weights behind the index.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::ClinicalTheme;

const TERMS: [(&str, &str); 3] = [
    (
        "ICDAS",
        "International Caries Detection and Assessment System; grades caries severity per tooth surface from 1 to 6.",
    ),
    (
        "SACI",
        "Severity-Adjusted Caries Index; weighted caries burden as a percentage of scorable surfaces.",
    ),
    (
        "Surface",
        "A scorable face of a tooth. A full dentition has 128; each tooth lost for non-caries reasons removes 4 (anterior) or 5 (posterior).",
    ),
];

const WEIGHTS: [&str; 4] = [
    "Dₐ  = 0.5·S1-2 + 1.0·S3-4 + 2.0·S5-6",
    "M_c = 4·NMc_ant + 5·NMc_post",
    "F_c = 1·NF1 + 2·NF2-3 + 3·NF4+",
    "S_total = 128 − 4·NMnc_ant − 5·NMnc_post",
];

pub fn render_about(f: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from(Span::styled("Terms", ClinicalTheme::subtitle()))];
    for (term, meaning) in TERMS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {term}: "), ClinicalTheme::focused()),
            Span::styled(meaning, ClinicalTheme::text()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Formula", ClinicalTheme::subtitle())));
    lines.extend(
        WEIGHTS
            .iter()
            .map(|w| Line::from(Span::styled(format!("  {w}"), ClinicalTheme::text()))),
    );
    lines.push(Line::from(Span::styled(
        "  SACI-x = numerator / S_total × 100, defined only when S_total > 0",
        ClinicalTheme::text(),
    )));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Integrates active lesions, caries-related tooth loss, and restorations, with a submodel breakdown for granular analysis.",
        ClinicalTheme::text_muted(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[Esc] ", ClinicalTheme::key_hint()),
        Span::styled("Back", ClinicalTheme::key_desc()),
    ]));

    let about = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(" About SACI ", ClinicalTheme::title()))
            .borders(Borders::ALL)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(about, area);
}
