//! Leaf-region detection.
//!
//! Source tables interleave subtotal rows (federal districts and the national
//! total) with per-region rows. Only leaf regions are aggregated.

/// Substring that marks a federal-district subtotal row.
pub const FEDERAL_DISTRICT_MARKER: &str = "ФО";

/// Label of the national total row.
pub const NATIONAL_TOTAL_LABEL: &str = "Российская Федерация";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Region,
    Unnamed,
    FederalDistrict,
    NationalTotal,
}

impl RowKind {
    pub fn is_region(self) -> bool {
        self == RowKind::Region
    }
}

pub fn classify_region_name(name: &str) -> RowKind {
    if name.is_empty() {
        RowKind::Unnamed
    } else if name.contains(FEDERAL_DISTRICT_MARKER) {
        RowKind::FederalDistrict
    } else if name == NATIONAL_TOTAL_LABEL {
        RowKind::NationalTotal
    } else {
        RowKind::Region
    }
}
