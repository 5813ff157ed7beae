//! Integer apportionment of a unit total across product types.

use crate::types::NormalizedProduct;

/// Split `total` units across products by the largest-remainder method.
///
/// Each product first receives the floor of its ideal share `total * mix`.
/// The shortfall is handed out one unit at a time in descending order of the
/// fractional remainders, cycling through the list if it is longer than the
/// product count. Equal remainders keep their input order.
///
/// The returned counts are index-aligned with `products` and sum to `total`
/// whenever `products` is non-empty. An empty slice yields no counts.
pub fn distribute_largest_remainder(total: u64, products: &[NormalizedProduct]) -> Vec<u64> {
    if products.is_empty() {
        return Vec::new();
    }

    let n = total as f64;
    let ideal: Vec<f64> = products.iter().map(|p| n * p.mix).collect();
    let mut counts: Vec<u64> = ideal.iter().map(|v| v.floor() as u64).collect();
    let remainders: Vec<f64> = ideal
        .iter()
        .zip(&counts)
        .map(|(v, &c)| v - c as f64)
        .collect();

    // Stable: equal remainders stay in product order.
    let mut order: Vec<usize> = (0..products.len()).collect();
    order.sort_by(|&a, &b| remainders[b].total_cmp(&remainders[a]));

    let assigned = counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c));
    if assigned < total {
        let shortfall = total - assigned;
        let len = order.len() as u64;
        let full_rounds = shortfall / len;
        let extra = (shortfall % len) as usize;
        if full_rounds > 0 {
            for c in &mut counts {
                *c += full_rounds;
            }
        }
        for &i in order.iter().take(extra) {
            counts[i] += 1;
        }
    } else if assigned > total {
        // Only reachable when `total` is beyond f64 integer precision.
        take_back(&mut counts, &order, assigned - total);
    }

    counts
}

/// Remove `excess` units starting from the smallest remainders.
fn take_back(counts: &mut [u64], order: &[usize], mut excess: u64) {
    while excess > 0 {
        let mut removed_any = false;
        for &i in order.iter().rev() {
            if excess == 0 {
                break;
            }
            if counts[i] > 0 {
                counts[i] -= 1;
                excess -= 1;
                removed_any = true;
            }
        }
        if !removed_any {
            break;
        }
    }
}
