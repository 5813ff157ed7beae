use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rp_export::*;
use rp_solver::{CalculationResult, NonSellables, ProductType, SiteInput, solve};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn base_result() -> CalculationResult {
    solve(&SiteInput {
        gross_area_ha: 3.0,
        row_width_m: 8.0,
        road_coeff_k: Some(1.0),
        products: vec![
            ProductType::new("p1", "Type A", 6.0, 15.0, 50.0),
            ProductType::new("p2", "Type B", 7.0, 15.0, 50.0),
        ],
        non_sellables: None,
    })
}

fn parked_result() -> CalculationResult {
    solve(&SiteInput {
        gross_area_ha: 3.0,
        row_width_m: 8.0,
        road_coeff_k: Some(1.0),
        products: vec![ProductType::new("p1", "Type A, corner", 8.0, 20.0, 100.0)],
        non_sellables: Some(NonSellables {
            buffers_m2: Some(1_500.0),
            amenities_m2: Some(2_500.0),
            easements_m2: None,
        }),
    })
}

#[test]
fn scenario_workbook_has_expected_sheets() {
    let wb = scenario_workbook(&base_result());
    assert_eq!(
        wb.sheet_names(),
        vec!["Summary", "Units", "Areas", "Efficiency", "Assumptions"]
    );

    let units = wb.sheet("Units").unwrap();
    assert_eq!(units.rows.len(), 3);
    assert_eq!(units.cell(1, 0), Some(&Cell::Text("Type A".to_string())));
    assert_eq!(units.cell(1, 4), Some(&Cell::Number(100.0)));

    let areas = wb.sheet("Areas").unwrap();
    assert_eq!(areas.cell(1, 1), Some(&Cell::Number(30_000.0)));
    assert_eq!(areas.cell(2, 1), Some(&Cell::Number(19_500.0)));
    assert_eq!(areas.cell(3, 1), Some(&Cell::Number(10_400.0)));

    let assumptions = wb.sheet("Assumptions").unwrap();
    assert_eq!(
        assumptions.cell(4, 1),
        Some(&Cell::Text("roads -> buffers -> amenities -> easements".to_string()))
    );
    assert!(assumptions.rows[5].is_empty());
    assert_eq!(assumptions.cell(7, 1), Some(&Cell::Number(50.0)));
}

#[test]
fn open_space_combines_buffers_and_amenities() {
    let wb = scenario_workbook(&parked_result());
    let areas = wb.sheet("Areas").unwrap();
    assert_eq!(areas.cell(4, 1), Some(&Cell::Number(4_000.0)));
}

#[test]
fn csv_dir_writes_one_file_per_sheet() {
    let dir = unique_temp_dir("rp_export_csv");
    let wb = scenario_workbook(&parked_result());

    let written = write_csv_dir(&wb, &dir).unwrap();
    assert_eq!(written.len(), 5);
    assert!(dir.join("Summary.csv").exists());

    let units = fs::read_to_string(dir.join("Units.csv")).unwrap();
    let mut lines = units.split("\r\n");
    assert_eq!(lines.next(), Some("Type,Width (m),Depth (m),Lot Area (m²),Units"));
    assert!(lines.next().unwrap().starts_with("\"Type A, corner\",8,20,160,"));
}

#[test]
fn json_export_is_parseable() {
    let wb = scenario_workbook(&base_result());
    let json = to_json(&wb).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["sheets"][0]["name"], "Summary");
    assert_eq!(value["sheets"][1]["rows"][1][4], 100.0);
}

#[test]
fn comparison_workbook_rounds_values() {
    let items = vec![
        ComparisonItem::from_result("a", "Base", &base_result()),
        ComparisonItem::from_result("b", "Parked", &parked_result()),
    ];
    let wb = comparison_workbook(&items).unwrap();
    let sheet = wb.sheet("Comparison").unwrap();

    assert_eq!(sheet.cell(3, 1), Some(&Cell::Text("Base".to_string())));
    assert_eq!(sheet.cell(3, 2), Some(&Cell::Text("Parked".to_string())));
    assert_eq!(sheet.cell(4, 1), Some(&Cell::Number(30_000.0)));
    assert_eq!(sheet.cell(7, 2), Some(&Cell::Number(4_000.0)));
    assert_eq!(sheet.cell(8, 1), Some(&Cell::Number(65.0)));
    assert_eq!(sheet.cell(10, 1), Some(&Cell::Number(200.0)));
    for row in &sheet.rows[3..] {
        assert_eq!(row.len(), 3);
    }
}

#[test]
fn comparison_rejects_four_scenarios() {
    let item = ComparisonItem::from_result("a", "Base", &base_result());
    let items = vec![item.clone(), item.clone(), item.clone(), item];
    assert!(comparison_workbook(&items).is_err());
    assert!(comparison_report(&items).is_err());
}

#[test]
fn scenario_report_sections() {
    let report = scenario_report(&base_result());
    assert_eq!(report.page_count(), 1);

    let text = report.render();
    assert!(text.starts_with(TITLE));
    assert!(text.contains("Areas (m²):\n  Gross: 30,000 m²\n  Sellable Lots: 19,500 m²\n  Roads: 10,400 m²"));
    assert!(text.contains("  Sellable Area: 65.00%"));
    assert!(text.contains("  Type A          6.0x15.0        90.0     100"));
    assert!(text.contains("  ROW Width: 8.00 m"));
    assert!(text.contains("  Rounding: largest-remainder"));
    assert!(!text.contains("Warnings:"));
}

#[test]
fn scenario_report_lists_warnings() {
    let result = solve(&SiteInput {
        gross_area_ha: 1.0,
        row_width_m: 3.0,
        road_coeff_k: None,
        products: vec![ProductType::new("p1", "Type A", 6.0, 15.0, 100.0)],
        non_sellables: None,
    });
    let text = scenario_report(&result).render();
    assert!(text.contains("Warnings:\n  - ROW width 3m below minimum 4m. Using 4m."));
}

#[test]
fn comparison_report_aligns_columns() {
    let items = vec![
        ComparisonItem::from_result("a", "Base", &base_result()),
        ComparisonItem::from_result("b", "Parked", &parked_result()),
    ];
    let report = comparison_report(&items).unwrap();
    let total = report
        .lines()
        .find(|l| l.starts_with("Total Units"))
        .unwrap()
        .to_string();
    assert_eq!(total.chars().count(), 30 + 2 * 22);
    let units = format::grouped(items[1].units as f64);
    assert!(total.ends_with(&format!("{units:>22}")));
}
