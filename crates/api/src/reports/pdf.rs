//! PDF rendering with `printpdf` builtin fonts.
//!
//! Documents are built as a list of [`Line`]s first, then laid out onto A4
//! pages. Builtin fonts only cover Latin-1, so text is reduced to printable
//! ASCII before it is placed.

use chrono::Utc;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use tathya_core::risk::RiskAssessment;
use tathya_db::models::case::Case;
use tathya_db::models::legal_notice::LegalNotice;

use crate::error::{AppError, AppResult};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 5.5;
const BODY_SIZE: f32 = 10.0;
const HEADING_SIZE: f32 = 13.0;
const TITLE_SIZE: f32 = 16.0;
/// Characters per body line at 10pt Helvetica inside the margins.
const WRAP_WIDTH: usize = 90;

#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Heading(String),
    Text(String),
    Blank,
}

impl Line {
    fn field(label: &str, value: &str) -> Line {
        Line::Text(format!("{label}: {value}"))
    }
}

/// Replace anything outside printable ASCII.
pub fn ascii(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{20B9}' => 'R',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => ' ',
        })
        .collect()
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word);
            word = rest;
        }
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn pdf_err<E: std::fmt::Debug>(e: E) -> AppError {
    AppError::InternalError(format!("PDF rendering failed: {e:?}"))
}

/// Lay out `lines` under `title` and return the encoded PDF.
pub fn render(title: &str, lines: &[Line]) -> AppResult<Vec<u8>> {
    let title = ascii(title);
    let (doc, first_page, first_layer) =
        PdfDocument::new(title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT - MARGIN;
    layer.use_text(title.as_str(), TITLE_SIZE, Mm(MARGIN), Mm(y), &bold);
    y -= LINE_HEIGHT * 2.0;

    let mut page_count = 1;
    for line in lines {
        let rows: Vec<(String, f32, bool)> = match line {
            Line::Heading(text) => vec![(ascii(text), HEADING_SIZE, true)],
            Line::Text(text) => {
                let text = ascii(text);
                let wrapped = wrap(&text, WRAP_WIDTH);
                if wrapped.is_empty() {
                    vec![(String::new(), BODY_SIZE, false)]
                } else {
                    wrapped
                        .into_iter()
                        .map(|row| (row, BODY_SIZE, false))
                        .collect()
                }
            }
            Line::Blank => vec![(String::new(), BODY_SIZE, false)],
        };

        for (text, size, is_bold) in rows {
            if y < MARGIN {
                page_count += 1;
                let (page, page_layer) = doc.add_page(
                    Mm(PAGE_WIDTH),
                    Mm(PAGE_HEIGHT),
                    format!("Layer {page_count}"),
                );
                layer = doc.get_page(page).get_layer(page_layer);
                y = PAGE_HEIGHT - MARGIN;
            }
            if !text.is_empty() {
                let font = if is_bold { &bold } else { &regular };
                layer.use_text(text, size, Mm(MARGIN), Mm(y), font);
            }
            y -= if is_bold { LINE_HEIGHT * 1.5 } else { LINE_HEIGHT };
        }
    }

    doc.save_to_bytes().map_err(pdf_err)
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Content of the fraud risk assessment report.
pub fn risk_report_lines(case: &Case, assessment: &RiskAssessment) -> Vec<Line> {
    let mut lines = vec![
        Line::field(
            "Generated",
            &Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        ),
        Line::Blank,
        Line::Heading("Case Details".into()),
    ];
    lines.extend(
        super::case_fields(case)
            .into_iter()
            .map(|(label, value)| Line::field(label, &value)),
    );

    lines.push(Line::Blank);
    lines.push(Line::Heading("Risk Components".into()));
    for (label, score, weight) in assessment.component_scores.labelled() {
        lines.push(Line::Text(format!(
            "{label}: {score:.1} / 100 (weight {weight:.0}%)"
        )));
    }

    lines.push(Line::Blank);
    lines.push(Line::Heading("Assessment".into()));
    lines.push(Line::field(
        "Overall Risk Score",
        &format!("{:.1} / 100", assessment.risk_score),
    ));
    lines.push(Line::field(
        "Risk Category",
        assessment.risk_category.as_str(),
    ));
    lines.push(Line::field("Recommendation", assessment.recommendation));
    lines
}

/// Content of a legal notice PDF.
pub fn notice_lines(notice: &LegalNotice) -> Vec<Line> {
    let mut lines = vec![
        Line::field("Reference", &notice.reference_number),
        Line::field("Case ID", &notice.case_id),
        Line::field("Status", &notice.status),
    ];
    if let Some(deadline) = notice.response_deadline {
        lines.push(Line::field("Response Deadline", &deadline.to_string()));
    }
    lines.push(Line::Blank);

    for raw in notice.content.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            lines.push(Line::Blank);
        } else if let Some(heading) = trimmed
            .strip_prefix("**")
            .and_then(|rest| rest.strip_suffix("**"))
        {
            lines.push(Line::Heading(heading.to_string()));
        } else {
            lines.push(Line::Text(trimmed.replace("**", "")));
        }
    }
    lines
}
