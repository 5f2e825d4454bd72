//! Field classification into storage buckets
//!
//! Three-tier precedence: the component registry is authoritative; registry
//! misses fall through an ordered keyword rule list; everything else is
//! Neutral. The rule order is load-bearing — several BPJS names match both
//! an allowance pattern and a deduction pattern, and the tier that runs
//! first wins. Do not reorder.

use payrep_common::{Bucket, ComponentRegistry};

/// Metadata columns with dedicated record fields. These bypass
/// classification and are mirrored into the neutral map.
pub const DEDICATED_FIELDS: &[&str] = &[
    "No",
    "Name",
    "Employee No",
    "Gender",
    "No KTP",
    "Gov. Tax File No.",
    "Position",
    "Directorate",
    "Org Unit",
    "Grade",
    "Employment Status",
    "Join Date",
    "Terminate Date",
    "Length of Service",
    "Tax Status",
];

pub fn is_dedicated(field_name: &str) -> bool {
    DEDICATED_FIELDS.contains(&field_name)
}

/// Exact names routed to Salary ahead of the keyword scan.
const SALARY_EXACT: &[&str] = &[
    "Basic Salary",
    "Basic Salary Tambahan",
    "Rapel Salary",
    "Additional Salary",
];

/// Exact names routed to Allowance ahead of the keyword scan.
const ALLOWANCE_EXACT: &[&str] = &[
    "Tunjangan Jabatan",
    "Tunjangan Jabatan PJS",
    "Tunjangan Jabatan Gross",
    "Uang Makan",
    "Uang Transport",
    "Tunjangan Transport Commercial",
    "Lemburan",
    "Additional Lemburan",
    "Insentif",
    "Additional Insentif",
    "Additional Uang Pisah",
    "Sisa Cuti Dibayarkan",
    "Additional Reward",
    "Additional Tunjangan Relokasi",
    "Additional Refund Loan",
    "Target Paket",
    "Insentif Per Paket",
    "Tunjangan Operasional",
    "Insentif Mitra",
    "Additional Insentif Mitra",
    "Target Paket OS",
    "Bonus Per Paket OS",
    "Insentif OS",
    "Insentif Mitra Sorter",
    "Additional Insentif Sorter Mitra",
    "Claim Rawat Jalan",
    "Claim Frame",
    "Santunan Maternity Normal",
    "Santunan Maternity Caesar",
    "Target Paket Mitra",
    "Insentif Per Paket Mitra",
    "Rapel Bonus Paket Mitra",
    "Rapel Insentif Mitra",
    "Claim Rawat Inap",
    "Additional Bonus KPI",
    "Additional Target Paket",
    "Additional Target Paket Mitra",
    "Tunjangan Pph 21 OS",
    "Additional Insentif Mitra Lain",
    "Additional Komisi Karyawan",
    "Insentif Pembawaan Mitra 10 Kg",
];

const ALLOWANCE_KEYWORDS: &[&str] = &[
    "tunjangan",
    "allowance",
    "insentif",
    "bonus",
    "uang",
    "claim",
    "santunan",
    "rapel",
    "reward",
    "lemburan",
];

/// Exact names routed to Deduction ahead of the keyword scan.
const DEDUCTION_EXACT: &[&str] = &[
    "Tax Allowance",
    "Tax Borne",
    "Tax Penalty Borne",
    "BPJS JHT",
    "BPJS Kesehatan",
    "BPJS Pensiun",
    "Pot. Kasbon",
    "Potongan Hutang Cuti",
    "Pot. Lain",
    "Pot. Barang Hilang",
    "Pot. Own Risk",
    "Pot. Audit",
    "Potongan Pph 21 OS",
    "Total Deduction",
    "Tax",
    "Tax Penalty",
];

const DEDUCTION_KEYWORDS: &[&str] = &[
    "potongan",
    "pot.",
    "deduction",
    "potbrg",
    "potlain",
    "potownrisk",
];

/// Classify a field name into its storage bucket.
///
/// Pure and total: unclassifiable input always resolves to Neutral.
pub fn classify(field_name: &str, registry: &ComponentRegistry) -> Bucket {
    if let Some(bucket) = registry.lookup(field_name) {
        return bucket;
    }

    let lower = field_name.to_lowercase();

    // Tier 1: salary
    if SALARY_EXACT.contains(&field_name) || lower.contains("salary") || lower.contains("gaji") {
        return Bucket::Salary;
    }

    // Tier 2: allowance. The employer-contribution BPJS rule must run before
    // the deduction BPJS rule below.
    if ALLOWANCE_EXACT.contains(&field_name)
        || (field_name.starts_with("BPJS") && field_name.contains("Pemberi Kerja"))
        || ALLOWANCE_KEYWORDS.iter().any(|k| lower.contains(k))
    {
        return Bucket::Allowance;
    }

    // Tier 3: deduction. "tax" matches except for the tax-status and
    // tax-location metadata columns.
    if DEDUCTION_EXACT.contains(&field_name)
        || (field_name.starts_with("BPJS")
            && (field_name.contains("Gross") || field_name.contains("Kemitraan")))
        || DEDUCTION_KEYWORDS.iter().any(|k| lower.contains(k))
        || (lower.contains("tax") && !lower.contains("tax status") && !lower.contains("tax location"))
    {
        return Bucket::Deduction;
    }

    Bucket::Neutral
}

#[cfg(test)]
mod tests {
    use super::*;
    use payrep_common::ComponentEntry;

    fn registry_with(name: &str, bucket: Bucket) -> ComponentRegistry {
        ComponentRegistry::from_entries(vec![ComponentEntry {
            code: "C1".into(),
            name: name.into(),
            bucket,
            active: true,
        }])
        .unwrap()
    }

    #[test]
    fn registry_type_wins_over_keywords() {
        // Name that the keyword tiers would call Allowance.
        let registry = registry_with("Tunjangan Khusus", Bucket::Deduction);
        assert_eq!(classify("Tunjangan Khusus", &registry), Bucket::Deduction);
    }

    #[test]
    fn salary_keywords() {
        let registry = ComponentRegistry::default();
        assert_eq!(classify("Basic Salary", &registry), Bucket::Salary);
        assert_eq!(classify("Gaji Pokok", &registry), Bucket::Salary);
        assert_eq!(classify("Rapel Salary Gross", &registry), Bucket::Salary);
    }

    #[test]
    fn bpjs_employer_contribution_is_allowance_before_deduction_rule() {
        let registry = ComponentRegistry::default();
        // Contains "Gross" too, which the deduction tier would match; the
        // allowance tier runs first.
        assert_eq!(
            classify("BPJS JKK (Pemberi Kerja) Gross", &registry),
            Bucket::Allowance
        );
        assert_eq!(classify("BPJS JHT Gross", &registry), Bucket::Deduction);
        assert_eq!(classify("BPJS JKK (Kemitraan)", &registry), Bucket::Deduction);
    }

    #[test]
    fn tax_rule_excludes_metadata_columns() {
        let registry = ComponentRegistry::default();
        assert_eq!(classify("Tax Penalty Borne", &registry), Bucket::Deduction);
        assert_eq!(classify("Tax Status Flag", &registry), Bucket::Neutral);
        assert_eq!(classify("Tax Location Name 2", &registry), Bucket::Neutral);
    }

    #[test]
    fn unmatched_defaults_to_neutral() {
        let registry = ComponentRegistry::default();
        assert_eq!(classify("Hari Kerja", &registry), Bucket::Neutral);
        assert_eq!(classify("", &registry), Bucket::Neutral);
        assert_eq!(classify("?!@#", &registry), Bucket::Neutral);
    }

    #[test]
    fn allowance_keyword_scan() {
        let registry = ComponentRegistry::default();
        assert_eq!(classify("Uang Kerajinan", &registry), Bucket::Allowance);
        assert_eq!(classify("Bonus Volta", &registry), Bucket::Allowance);
        assert_eq!(classify("Reward Be A Star", &registry), Bucket::Allowance);
    }

    #[test]
    fn deduction_keyword_scan() {
        let registry = ComponentRegistry::default();
        assert_eq!(classify("Pot. Denda", &registry), Bucket::Deduction);
        assert_eq!(classify("Deposit Potongan COD", &registry), Bucket::Deduction);
    }
}
