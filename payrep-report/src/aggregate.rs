//! Cost-center aggregation
//!
//! Regroups derived employee rows by COA code and directorate and sums the
//! fixed 15-component subset per group. Component names must match the
//! derived row keys exactly; the subset is part of the report contract and
//! includes names with no counterpart in a given batch (those sum to 0).

use crate::derive::derive_coa;
use payrep_common::{FieldMap, Scalar};
use std::collections::{BTreeMap, BTreeSet};

/// Salary components carried by the cost-center report, in row order.
pub const COST_CENTER_COMPONENTS: &[&str] = &[
    "Total Basic Salary",
    "Total Tunjangan Jabatan",
    "Uang Makan",
    "Total Uang Transport",
    "Lemburan",
    "Total Uang pisah",
    "Total Insentif",
    "Tunjangan Volta",
    "Insentif Volta",
    "Total Bonus paket",
    "Tunjangan Operasional Dibayar Payroll",
    "Total BPJS TK",
    "Total BPJS Kes",
    "THR",
    "BHR Mitra",
];

/// One (COA, directorate) group.
#[derive(Debug, Clone)]
pub struct DirectorateSummary {
    pub name: String,
    pub employee_count: usize,
    /// Component name to summed value, keyed by `COST_CENTER_COMPONENTS`.
    pub components: BTreeMap<String, f64>,
}

impl DirectorateSummary {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            employee_count: 0,
            components: COST_CENTER_COMPONENTS
                .iter()
                .map(|c| (c.to_string(), 0.0))
                .collect(),
        }
    }

    /// Sum across all components for this group.
    pub fn combined_total(&self) -> f64 {
        self.components.values().sum()
    }
}

/// All directorate groups under one COA code.
#[derive(Debug, Clone)]
pub struct CoaSection {
    pub code: &'static str,
    pub label: &'static str,
    /// Sorted by directorate name.
    pub directorates: Vec<DirectorateSummary>,
    pub total_employees: usize,
}

impl CoaSection {
    fn new(code: &'static str, label: &'static str) -> Self {
        Self {
            code,
            label,
            directorates: Vec::new(),
            total_employees: 0,
        }
    }

    pub fn directorate(&self, name: &str) -> Option<&DirectorateSummary> {
        self.directorates.iter().find(|d| d.name == name)
    }
}

/// Aggregated cost-center report over one batch.
#[derive(Debug, Clone)]
pub struct CostCenterReport {
    pub coa_600: CoaSection,
    pub coa_500: CoaSection,
    pub grand_total_employees: usize,
    pub grand_total_components: BTreeMap<String, f64>,
}

impl CostCenterReport {
    /// Union of directorate names across both codes, sorted.
    pub fn all_directorates(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for section in [&self.coa_600, &self.coa_500] {
            names.extend(section.directorates.iter().map(|d| d.name.clone()));
        }
        names.into_iter().collect()
    }
}

/// Aggregate derived rows into the cost-center report.
///
/// COA comes from the `Cost Center` value per row; directorate is trimmed
/// with empty mapping to "Unknown".
pub fn aggregate(rows: &[FieldMap]) -> CostCenterReport {
    tracing::debug!(rows = rows.len(), "Aggregating cost-center data");

    let mut groups: BTreeMap<(&'static str, String), DirectorateSummary> = BTreeMap::new();
    for row in rows {
        let cost_center = row
            .get("Cost Center")
            .map(Scalar::display)
            .unwrap_or_default();
        let coa = derive_coa(&cost_center);
        let directorate = row
            .get("Directorate")
            .map(Scalar::display)
            .unwrap_or_default();
        let directorate = directorate.trim();
        let directorate = if directorate.is_empty() {
            "Unknown"
        } else {
            directorate
        };

        let group = groups
            .entry((coa, directorate.to_string()))
            .or_insert_with(|| DirectorateSummary::new(directorate));
        group.employee_count += 1;
        for component in COST_CENTER_COMPONENTS {
            let value = row.get(*component).and_then(Scalar::as_number).unwrap_or(0.0);
            if let Some(sum) = group.components.get_mut(*component) {
                *sum += value;
            }
        }
    }

    let mut coa_600 = CoaSection::new("600", "Kantor Pusat");
    let mut coa_500 = CoaSection::new("500", "Cabang");
    for ((coa, _), summary) in groups {
        let section = if coa == "600" { &mut coa_600 } else { &mut coa_500 };
        section.total_employees += summary.employee_count;
        section.directorates.push(summary);
    }

    let mut grand_total_components: BTreeMap<String, f64> = COST_CENTER_COMPONENTS
        .iter()
        .map(|c| (c.to_string(), 0.0))
        .collect();
    for section in [&coa_600, &coa_500] {
        for dir in &section.directorates {
            for (component, value) in &dir.components {
                if let Some(sum) = grand_total_components.get_mut(component) {
                    *sum += value;
                }
            }
        }
    }

    CostCenterReport {
        grand_total_employees: coa_600.total_employees + coa_500.total_employees,
        coa_600,
        coa_500,
        grand_total_components,
    }
}
