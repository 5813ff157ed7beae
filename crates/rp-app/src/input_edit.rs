//! Editing helpers for product lists.
//!
//! These mirror what an input form does: keep the mix at 100% while one share
//! changes, add a product with the next free ID, reorder and remove rows.

use rp_core::{RpError, finite_or_zero};
use rp_solver::{ProductType, SiteInput};
use std::collections::HashSet;

use crate::error::AppResult;

/// Site used when nothing has been entered yet.
pub fn default_site_input() -> SiteInput {
    SiteInput {
        gross_area_ha: 3.0,
        row_width_m: 8.0,
        road_coeff_k: Some(1.0),
        products: vec![
            ProductType::new("p1", "Type A", 6.0, 15.0, 50.0),
            ProductType::new("p2", "Type B", 7.0, 15.0, 50.0),
        ],
        non_sellables: None,
    }
}

fn share(p: &ProductType) -> f64 {
    finite_or_zero(p.mix_pct).max(0.0)
}

fn check_index(products: &[ProductType], index: usize) -> AppResult<()> {
    if index >= products.len() {
        return Err(RpError::IndexOob {
            what: "product",
            index,
            len: products.len(),
        }
        .into());
    }
    Ok(())
}

/// Set one product's share and rescale the others so the mix totals 100.
///
/// The new share is clamped to `[0, ∞)`; non-finite values become 0. The
/// other products split `max(0, 100 - share)` in proportion to their previous
/// shares, or evenly when those were all zero.
pub fn set_mix_keep_total(products: &mut [ProductType], index: usize, mix_pct: f64) -> AppResult<()> {
    check_index(products, index)?;

    let clamped = finite_or_zero(mix_pct).max(0.0);
    let others_total: f64 = products
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, p)| share(p))
        .sum();
    let others = products.len() - 1;
    let remainder = (100.0 - clamped).max(0.0);

    for i in 0..products.len() {
        if i == index {
            products[i].mix_pct = clamped;
        } else if others_total <= 0.0 {
            products[i].mix_pct = remainder / others as f64;
        } else {
            products[i].mix_pct = remainder * share(&products[i]) / others_total;
        }
    }
    Ok(())
}

/// Append a 6 x 15 m product with zero share and return it.
///
/// The ID is `p{n}` for the first `n` past the current count that is not
/// taken; the name is `Type {letter}` by position (A, B, ..., Z, AA, ...).
pub fn add_product(products: &mut Vec<ProductType>) -> &ProductType {
    let taken: HashSet<&str> = products.iter().map(|p| p.id.as_str()).collect();
    let mut n = products.len() + 1;
    while taken.contains(format!("p{n}").as_str()) {
        n += 1;
    }
    let id = format!("p{n}");
    let name = format!("Type {}", column_letters(products.len()));
    products.push(ProductType::new(id, name, 6.0, 15.0, 0.0));
    &products[products.len() - 1]
}

/// Zero-based index to spreadsheet-style letters: 0 -> A, 25 -> Z, 26 -> AA.
fn column_letters(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Swap a product with its neighbour. Returns `false` at either end.
pub fn move_product(
    products: &mut [ProductType],
    index: usize,
    direction: MoveDirection,
) -> AppResult<bool> {
    check_index(products, index)?;
    let target = match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => Some(index + 1).filter(|&t| t < products.len()),
    };
    match target {
        Some(t) => {
            products.swap(index, t);
            Ok(true)
        }
        None => Ok(false),
    }
}

pub fn remove_product(products: &mut Vec<ProductType>, index: usize) -> AppResult<ProductType> {
    check_index(products, index)?;
    Ok(products.remove(index))
}
