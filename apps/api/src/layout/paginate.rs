//! Pagination: lays the report's section model out onto fixed-size pages.
//!
//! Every paragraph is word-wrapped with the static font metrics, then lines are
//! poured onto pages in order. Sections are separated by one blank spacer line.
//!
//! # Rules
//! - A heading never occupies the last slot of a page; it moves to the next page.
//! - Spacer lines never start a page and never end one.
//! - Page numbers start at 1. An empty section list yields no pages.

use serde::Serialize;

use crate::layout::font_metrics::{get_metrics, PageConfig};
use crate::render::ReportSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Heading,
    Body,
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLine {
    pub kind: LineKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub number: usize,
    pub lines: Vec<PageLine>,
}

/// Wraps every section into a flat run of lines, spacer between sections.
fn layout_lines(sections: &[ReportSection], config: &PageConfig) -> Vec<PageLine> {
    let metrics = get_metrics(config.font);
    let mut lines = Vec::new();

    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            lines.push(PageLine {
                kind: LineKind::Spacer,
                text: String::new(),
            });
        }
        lines.extend(
            metrics
                .wrap(&section.title.to_uppercase(), config.text_width_em)
                .into_iter()
                .map(|text| PageLine {
                    kind: LineKind::Heading,
                    text,
                }),
        );
        for paragraph in &section.lines {
            lines.extend(
                metrics
                    .wrap(paragraph, config.text_width_em)
                    .into_iter()
                    .map(|text| PageLine {
                        kind: LineKind::Body,
                        text,
                    }),
            );
        }
    }

    lines
}

pub fn paginate(sections: &[ReportSection], config: &PageConfig) -> Vec<Page> {
    let capacity = config.lines_per_page.max(1);
    let mut pages: Vec<Page> = Vec::new();
    let mut current: Vec<PageLine> = Vec::new();

    for line in layout_lines(sections, config) {
        match line.kind {
            LineKind::Spacer if current.is_empty() => continue,
            LineKind::Spacer if current.len() + 1 >= capacity => {
                // A spacer in the last slot would end the page; break here instead.
                break_page(&mut pages, &mut current);
                continue;
            }
            LineKind::Heading if !current.is_empty() && current.len() + 1 >= capacity => {
                break_page(&mut pages, &mut current);
            }
            _ if current.len() >= capacity => {
                break_page(&mut pages, &mut current);
            }
            _ => {}
        }
        current.push(line);
    }

    close_page(&mut pages, &mut current);
    pages
}

/// Closes the current page. Headings trailing its last body line are carried
/// over to open the next page.
fn break_page(pages: &mut Vec<Page>, current: &mut Vec<PageLine>) {
    let keep = current
        .iter()
        .rposition(|l| l.kind == LineKind::Body)
        .map_or(current.len(), |i| i + 1);
    let mut carried = current.split_off(keep);
    close_page(pages, current);

    let start = carried
        .iter()
        .position(|l| l.kind != LineKind::Spacer)
        .unwrap_or(carried.len());
    *current = carried.split_off(start);
}

fn close_page(pages: &mut Vec<Page>, current: &mut Vec<PageLine>) {
    while current.last().is_some_and(|l| l.kind == LineKind::Spacer) {
        current.pop();
    }
    if current.is_empty() {
        return;
    }
    pages.push(Page {
        number: pages.len() + 1,
        lines: std::mem::take(current),
    });
}
