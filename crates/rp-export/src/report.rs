//! Paginated plain-text reports.
//!
//! A report is a list of pages of lines. Rendering separates pages with a form
//! feed so the output prints one page per sheet.

use crate::comparison::{ComparisonItem, check_comparison};
use crate::format::{area_m2, grouped, percent};
use crate::{ExportResult, SUBTITLE, TITLE};
use rp_solver::CalculationResult;
use std::path::Path;

pub const LINES_PER_PAGE: usize = 56;

const UNITS_HEADER: &str = "Type            WxD (m)     Area (m²)   Units";
const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub pages: Vec<Vec<String>>,
}

impl Report {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flatten().map(String::as_str)
    }

    pub fn render(&self) -> String {
        self.pages
            .iter()
            .map(|page| {
                let mut text = page.join("\n");
                text.push('\n');
                text
            })
            .collect::<Vec<_>>()
            .join("\u{000C}")
    }

    pub fn write_to(&self, path: &Path) -> ExportResult<()> {
        std::fs::write(path, self.render())?;
        Ok(())
    }
}

struct PageBuilder {
    lines_per_page: usize,
    pages: Vec<Vec<String>>,
    current: Vec<String>,
    /// Repeated at the top of a page that continues a table
    carry_header: Option<String>,
}

impl PageBuilder {
    fn new(lines_per_page: usize) -> Self {
        Self {
            lines_per_page: lines_per_page.max(2),
            pages: Vec::new(),
            current: Vec::new(),
            carry_header: None,
        }
    }

    fn line(&mut self, text: impl Into<String>) {
        if self.current.len() >= self.lines_per_page {
            self.pages.push(std::mem::take(&mut self.current));
            if let Some(header) = &self.carry_header {
                self.current.push(header.clone());
            }
        }
        self.current.push(text.into());
    }

    fn blank(&mut self) {
        self.line(String::new());
    }

    fn heading(&mut self, title: &str) {
        // keep a heading together with its first line
        if self.current.len() + 2 > self.lines_per_page {
            self.pages.push(std::mem::take(&mut self.current));
        }
        self.line(title);
    }

    fn finish(mut self) -> Report {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        Report { pages: self.pages }
    }
}

pub fn scenario_report(result: &CalculationResult) -> Report {
    scenario_report_paged(result, LINES_PER_PAGE)
}

pub(crate) fn scenario_report_paged(result: &CalculationResult, lines_per_page: usize) -> Report {
    let mut b = PageBuilder::new(lines_per_page);
    b.line(TITLE);
    b.line(SUBTITLE);
    b.blank();

    let a = &result.areas;
    b.heading("Areas (m²):");
    b.line(format!("{INDENT}Gross: {}", area_m2(a.gross_m2)));
    b.line(format!("{INDENT}Sellable Lots: {}", area_m2(a.lots_m2)));
    b.line(format!("{INDENT}Roads: {}", area_m2(a.roads_m2)));
    b.line(format!("{INDENT}Open Space + Amenities: {}", area_m2(a.open_space_m2())));
    b.line(format!("{INDENT}Non-sellable Total: {}", area_m2(a.non_sellable_m2)));
    b.blank();

    let e = &result.efficiency;
    b.heading("Efficiency (% of Gross):");
    b.line(format!("{INDENT}Sellable Area: {}", percent(e.net_lot_to_gross_pct)));
    b.line(format!("{INDENT}Roads: {}", percent(e.road_pct)));
    b.line(format!("{INDENT}Non-sellables: {}", percent(e.non_sellable_pct)));
    b.blank();

    b.heading("Units:");
    let header = format!("{INDENT}{UNITS_HEADER}");
    b.line(header.clone());
    b.carry_header = Some(header);
    for u in &result.units {
        b.line(format!(
            "{INDENT}{:<15} {:.1}x{:.1}     {:>7.1}   {:>5}",
            u.name, u.width_m, u.depth_m, u.lot_area_m2, u.count
        ));
    }
    b.carry_header = None;
    b.line(format!("{INDENT}Total units: {}", result.total_units()));
    b.blank();

    let s = &result.assumptions;
    b.heading("Assumptions:");
    b.line(format!("{INDENT}ROW Width: {:.2} m", s.row_width_m));
    b.line(format!(
        "{INDENT}Road Coefficient k: {:.2} (0.85-1.25 typical)",
        s.road_coeff_k
    ));
    b.line(format!("{INDENT}Rounding: {}", s.rounding_method));

    if !result.warnings.is_empty() {
        b.blank();
        b.heading("Warnings:");
        for w in &result.warnings {
            b.line(format!("{INDENT}- {w}"));
        }
    }

    b.finish()
}

const METRIC_WIDTH: usize = 30;
const COLUMN_WIDTH: usize = 22;

pub fn comparison_report(items: &[ComparisonItem]) -> ExportResult<Report> {
    check_comparison(items)?;

    let mut b = PageBuilder::new(LINES_PER_PAGE);
    b.line(format!("{TITLE} - Comparison"));
    b.line(SUBTITLE);
    b.blank();
    b.line(column_row("Metric", items, |i| truncate(&i.name, COLUMN_WIDTH - 1)));
    b.line(column_row("Gross (m²)", items, |i| area_m2(i.gross_m2)));
    b.line(column_row("Sellable Lots (m²)", items, |i| area_m2(i.lots_m2)));
    b.line(column_row("Roads (m²)", items, |i| area_m2(i.roads_m2)));
    b.line(column_row("Open Space + Amenities (m²)", items, |i| {
        area_m2(i.open_space_m2())
    }));
    b.line(column_row("Sellable Area (%)", items, |i| {
        percent(i.net_lot_to_gross_pct)
    }));
    b.line(column_row("Roads (%)", items, |i| percent(i.road_pct)));
    b.line(column_row("Total Units", items, |i| grouped(i.units as f64)));

    Ok(b.finish())
}

fn column_row(
    label: &str,
    items: &[ComparisonItem],
    value: impl Fn(&ComparisonItem) -> String,
) -> String {
    let mut line = format!("{label:<METRIC_WIDTH$}");
    for item in items {
        line.push_str(&format!("{:>COLUMN_WIDTH$}", value(item)));
    }
    line
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
