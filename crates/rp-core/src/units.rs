// rp-core/src/units.rs

use uom::si::f64::{Area as UomArea, Length as UomLength};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Length = UomLength;

/// Square meters in one hectare.
pub const M2_PER_HA: f64 = 10_000.0;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

/// Plain square meters of an area.
#[inline]
pub fn in_m2(a: Area) -> f64 {
    use uom::si::area::square_meter;
    a.get::<square_meter>()
}

/// Hectares to square meters. Plain multiplication, no rounding.
#[inline]
pub fn ha_to_m2(v: f64) -> f64 {
    v * M2_PER_HA
}
