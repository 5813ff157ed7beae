//! Spreadsheet-shaped export model.

use crate::comparison::{ComparisonItem, check_comparison};
use crate::format::round2;
use crate::{ExportResult, SUBTITLE, TITLE};
use rp_solver::CalculationResult;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<u64> for Cell {
    fn from(v: u64) -> Self {
        Cell::Number(v as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, C>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn blank_row(mut self) -> Self {
        self.rows.push(Vec::new());
        self
    }

    /// Cell at `(row, col)`, if present.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Workbook for a single scenario result.
pub fn scenario_workbook(result: &CalculationResult) -> Workbook {
    let summary = Sheet::new("Summary").row([TITLE]).row([SUBTITLE]);

    let mut units = Sheet::new("Units").row(["Type", "Width (m)", "Depth (m)", "Lot Area (m²)", "Units"]);
    for u in &result.units {
        units = units.row([
            Cell::from(u.name.as_str()),
            u.width_m.into(),
            u.depth_m.into(),
            u.lot_area_m2.into(),
            u.count.into(),
        ]);
    }

    let a = &result.areas;
    let areas = Sheet::new("Areas")
        .row(["Metric", "m²"])
        .row([Cell::from("Gross"), a.gross_m2.into()])
        .row([Cell::from("Sellable Lots"), a.lots_m2.into()])
        .row([Cell::from("Roads"), a.roads_m2.into()])
        .row([Cell::from("Open Space + Amenities"), a.open_space_m2().into()])
        .row([Cell::from("Non-sellable Total"), a.non_sellable_m2.into()]);

    let e = &result.efficiency;
    let efficiency = Sheet::new("Efficiency")
        .row(["Metric", "%"])
        .row([Cell::from("Sellable Area"), e.net_lot_to_gross_pct.into()])
        .row([Cell::from("Roads"), e.road_pct.into()])
        .row([Cell::from("Non-sellables"), e.non_sellable_pct.into()]);

    let s = &result.assumptions;
    let ordering: Vec<&str> = s.non_sellable_ordering.iter().map(|c| c.as_str()).collect();
    let mut assumptions = Sheet::new("Assumptions")
        .row(["Assumption", "Value"])
        .row([Cell::from("ROW Width (m)"), s.row_width_m.into()])
        .row([Cell::from("Road Coefficient k"), s.road_coeff_k.into()])
        .row(["Rounding Method", s.rounding_method.as_str()])
        .row([Cell::from("Non-sellable Order"), ordering.join(" -> ").into()])
        .blank_row()
        .row(["Type", "Normalized %"]);
    for m in &s.normalized_mix {
        assumptions = assumptions.row([Cell::from(m.name.as_str()), (m.mix * 100.0).into()]);
    }

    Workbook {
        sheets: vec![summary, units, areas, efficiency, assumptions],
    }
}

/// Single-sheet workbook with one column per scenario.
pub fn comparison_workbook(items: &[ComparisonItem]) -> ExportResult<Workbook> {
    check_comparison(items)?;

    let mut sheet = Sheet::new("Comparison")
        .row([format!("{TITLE} - Comparison")])
        .row([SUBTITLE])
        .blank_row();
    sheet.rows.push(
        std::iter::once(Cell::from("Metric"))
            .chain(items.iter().map(|i| Cell::from(i.name.as_str())))
            .collect(),
    );
    sheet.rows.extend([
        metric_row("Gross (m²)", items, |i| i.gross_m2.round()),
        metric_row("Sellable Lots (m²)", items, |i| i.lots_m2.round()),
        metric_row("Roads (m²)", items, |i| i.roads_m2.round()),
        metric_row("Open Space + Amenities (m²)", items, |i| {
            i.open_space_m2().round()
        }),
        metric_row("Sellable Area (%)", items, |i| round2(i.net_lot_to_gross_pct)),
        metric_row("Roads (%)", items, |i| round2(i.road_pct)),
        metric_row("Total Units", items, |i| i.units as f64),
    ]);

    Ok(Workbook {
        sheets: vec![sheet],
    })
}

fn metric_row(
    label: &str,
    items: &[ComparisonItem],
    value: impl Fn(&ComparisonItem) -> f64,
) -> Vec<Cell> {
    std::iter::once(Cell::from(label))
        .chain(items.iter().map(|i| Cell::Number(value(i))))
        .collect()
}

pub fn to_json(workbook: &Workbook) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(workbook)?)
}
