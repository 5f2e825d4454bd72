//! Derivation and totals engine
//!
//! Pure functions over a merged employee row map. Derivations add
//! organizational attributes (COA, cost center by function, seniority level,
//! tax/bank passthroughs); totals reproduce the fixed spreadsheet column-range
//! sums. Each total has an exact, explicit member list — the membership is the
//! contract, and trimming or reordering it is a correctness bug.

use once_cell::sync::Lazy;
use payrep_common::{FieldMap, Scalar};
use regex::Regex;

static LEADING_EIGHT_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{8})").unwrap_or_else(|e| panic!("invalid regex: {e}")));

/// Grade title to seniority level, most senior first. Containment lookups
/// scan in this order, so broader titles ("manager") sit after their
/// qualified forms where the reference placed them.
const GRADE_LEVELS: &[(&str, i64)] = &[
    ("ceo", 13),
    ("chief", 12),
    ("direktur", 12),
    ("vice president", 11),
    ("general manager", 10),
    ("general manager pjs", 9),
    ("senior manager", 9),
    ("senior manager pjs", 9),
    ("manager", 8),
    ("manager pjs", 7),
    ("junior manager", 7),
    ("junior manager pjs", 7),
    ("assistant manager", 6),
    ("assistant manager pjs", 6),
    ("senior supervisor", 5),
    ("senior supervisor pjs", 5),
    ("supervisor", 4),
    ("supervisor pjs", 4),
    ("senior staff", 3),
    ("senior staff pjs", 3),
    ("staff", 2),
    ("junior staff", 1),
    ("non-staff", 0),
];

/// Cost Center By Function from the job-status and cost-center codes.
///
/// An 8-digit numeric prefix of the job-status code wins outright. A
/// `CAB_` prefix takes the first two letters of the cost-center code,
/// uppercased, or the code as-is when it has no two leading letters.
/// Otherwise the job-status code passes through, falling back to the
/// cost-center code.
pub fn derive_cost_center_by_function(job_status_code: &str, cost_center_code: &str) -> String {
    let job_status = job_status_code.trim();
    let cost_center = cost_center_code.trim();
    if job_status.is_empty() && cost_center.is_empty() {
        return String::new();
    }

    if let Some(caps) = LEADING_EIGHT_DIGITS.captures(job_status) {
        return caps[1].to_string();
    }

    if job_status.to_uppercase().starts_with("CAB_") {
        if cost_center.len() >= 2
            && cost_center
                .chars()
                .take(2)
                .all(|c| c.is_ascii_alphabetic())
        {
            return cost_center[..2].to_uppercase();
        }
        return cost_center.to_string();
    }

    if job_status.is_empty() {
        cost_center.to_string()
    } else {
        job_status.to_string()
    }
}

/// COA organizational code from the cost-center label: head office ("kantor
/// pusat") is "600", everything else including absent input is "500".
pub fn derive_coa(cost_center: &str) -> &'static str {
    if cost_center.to_lowercase().contains("kantor pusat") {
        "600"
    } else {
        "500"
    }
}

/// Seniority level from a grade title. Exact match against the table first,
/// then containment in table order. No match yields `None`.
pub fn derive_level(grade: &str) -> Option<i64> {
    let grade = grade.to_lowercase();
    let grade = grade.trim();
    if grade.is_empty() {
        return None;
    }
    if let Some((_, level)) = GRADE_LEVELS.iter().find(|(title, _)| *title == grade) {
        return Some(*level);
    }
    GRADE_LEVELS
        .iter()
        .find(|(title, _)| grade.contains(title))
        .map(|(_, level)| *level)
}

/// One fixed-membership "Total X" definition.
pub struct TotalDef {
    pub name: &'static str,
    pub members: &'static [&'static str],
}

pub const TOTAL_BASIC_SALARY: TotalDef = TotalDef {
    name: "Total Basic Salary",
    members: &[
        "Basic Salary",
        "Basic Salary Tambahan",
        "Additional Salary",
        "Additional Salary Gross",
        "Rapel Salary",
        "Rapel Salary Gross",
    ],
};

pub const TOTAL_UANG_MAKAN: TotalDef = TotalDef {
    name: "Total Uang Makan",
    members: &["Uang Makan", "Additional Uang Makan"],
};

pub const TOTAL_UANG_TRANSPORT: TotalDef = TotalDef {
    name: "Total Uang Transport",
    members: &[
        "Uang Transport",
        "Additional Uang Transport",
        "Rapel Uang Transport",
        "Tunjangan Transport Commercial",
        "Additional Tunjangan Transport Commercial",
    ],
};

pub const TOTAL_TUNJANGAN_JABATAN: TotalDef = TotalDef {
    name: "Total Tunjangan Jabatan",
    members: &[
        "Tunjangan Jabatan",
        "Additional Tunjangan Jabatan",
        "Rapel Tunjangan Jabatan",
        "Tunjangan Jabatan Gross",
        "Additional Tunjangan Jabatan Gross",
        "Rapel Tunjangan Jabatan Gross",
        "Tunjangan Jabatan PJS",
    ],
};

pub const TOTAL_INSENTIF_INHOUSE: TotalDef = TotalDef {
    name: "Total Insentif Inhouse",
    members: &[
        "Insentif",
        "Insentif Gross",
        "Rapel Insentif",
        "Additional Insentif",
        "Additional Tunjangan Relokasi",
        "Additional Refund Loan",
        "Tunjangan Tempat Tinggal",
        "Reward",
        "Additional Reward",
    ],
};

pub const TOTAL_SISA_CUTI: TotalDef = TotalDef {
    name: "Total Sisa Cuti",
    members: &[
        "Sisa Cuti Dibayarkan",
        "Additional Sisa Cuti Dibayarkan",
        "Sisa Cuti Dibayarkan Gross",
        "Additional Sisa Cuti Dibayarkan Gross",
    ],
};

pub const TOTAL_UANG_PISAH: TotalDef = TotalDef {
    name: "Total Uang Pisah",
    members: &["Tunjangan Uang Pisah", "Uang Pisah Gross", "Additional Uang Pisah"],
};

pub const TOTAL_TUNJANGAN_OPERASIONAL: TotalDef = TotalDef {
    name: "Total Tunjangan Operasional",
    members: &[
        "Tunjangan Operasional",
        "Additional Tunjangan Operational",
        "Rapel Tunjangan Operational",
    ],
};

pub const TOTAL_KOMISI_KARYAWAN: TotalDef = TotalDef {
    name: "Total Komisi Karyawan",
    members: &["Komisi Karyawan", "Additional Komisi Karyawan"],
};

pub const TOTAL_INSENTIF_MITRA: TotalDef = TotalDef {
    name: "Total Insentif Mitra",
    members: &[
        "Insentif Per Paket Mitra",
        "Insentif Perbantuan",
        "Additional Insentif Perbantuan",
        "Insentif Volta",
        "Target Paket",
        "Additional Target Paket",
        "Rapel Target Paket",
        "Additional Insentif Kerajinan Mitra",
        "Additional Insentif Sorter MItra",
        "Insentif Hari Minggu",
        "Rapel Insentif Hari Minggu",
        "Insentif Hari Minggu Mitra",
        "Insentif Kehadiran",
        "Insentif Kerajinan Mitra",
        "Insentif Mitra",
        "Additional Insentif Mitra",
        "Rapel Insentif Mitra",
        "Insentif Mitra Lain",
        "Additional Insentif Mitra Lain",
        "Rapel Insentif Mitra Lain",
        "Insentif Mitra Sorter",
        "Rapel Insentif Mitra Sorter",
        "Insentif Pembawaan Mitra 10 Kg",
        "Additional Insentif Per Paket Mitra",
        "Insentif Perbantuan Mitra",
        "Insentif Produktifitas Mitra",
        "Rapel Insentif Produktifitas Mitra",
        "Target Paket Mitra",
        "Additional Target Paket Mitra",
        "Rapel Target Paket Mitra",
    ],
};

pub const TOTAL_BONUS_INHOUSE: TotalDef = TotalDef {
    name: "Total Bonus Inhouse",
    members: &[
        "Bonus",
        "Additional Bonus Carrot And Stick",
        "Additional Bonus CPP",
        "Additional Bonus Paket",
        "Rapel Bonus Paket",
        "Bonus First & Last",
        "Bonus KPI",
        "Additional Bonus KPI",
        "Bonus COD",
        "Rapel Bonus COD",
    ],
};

pub const TOTAL_BONUS_MITRA: TotalDef = TotalDef {
    name: "Total Bonus Mitra",
    members: &[
        "Bonus COD Mitra",
        "Additional Bonus COD Mitra",
        "Rapel Bonus COD Mitra",
        "Rapel Bonus Paket Mitra",
        "Rapel Bonus Per Paket",
        "Rapel Bonus Per Paket Mitra",
        "Bonus Mitra",
        "Additional Bonus Mitra",
        "Bonus Paket Coordinator",
        "Bonus Per Coli Mitra",
        "Bonus Volta",
    ],
};

pub const TOTAL_LEMBUR: TotalDef = TotalDef {
    name: "Total Lembur",
    members: &["Lembur - Line Haul", "Lembur Harian", "Lemburan", "Additional Lemburan"],
};

pub const TOTAL_PERJALANAN_DINAS: TotalDef = TotalDef {
    name: "Total Perjalanan Dinas",
    members: &["Uang Makan Perdin", "Uang Saku Perdin"],
};

pub const TOTAL_BIAYA_PENGOBATAN: TotalDef = TotalDef {
    name: "Total Biaya Pengobatan Karyawan",
    members: &[
        "Claim Frame",
        "Claim Lensa",
        "Claim Rawat Inap",
        "Additional Claim Rawat Inap",
        "Claim Rawat Jalan",
        "Additional Claim Rawat Jalan",
        "Santunan Maternity Caesar",
        "Santunan Maternity Miscarriage",
        "Santunan Maternity Normal",
        "Additional Maternity",
    ],
};

pub const TOTAL_THR: TotalDef = TotalDef {
    name: "Total THR",
    members: &["THR", "Additional THR", "Rapel THR"],
};

pub const TOTAL_BPJS_TK: TotalDef = TotalDef {
    name: "Total BPJS TK",
    members: &[
        "BPJS JKK (Pemberi Kerja)",
        "BPJS JKK (Pemberi Kerja) Gross",
        "BPJS JKM (Pemberi Kerja)",
        "BPJS JKM (Pemberi Kerja) Gross",
        "BPJS JHT (Pemberi Kerja)",
        "BPJS JHT (Pemberi Kerja) Gross",
        "BPJS Pensiun (Pemberi Kerja)",
        "BPJS Pensiun (Pemberi Kerja) Gross",
    ],
};

pub const TOTAL_BPJS_KES: TotalDef = TotalDef {
    name: "Total BPJS Kes",
    members: &[
        "BPJS Kesehatan (Pemberi Kerja)",
        "BPJS Kesehatan (Pemberi Kerja) Gross",
    ],
};

pub const TOTAL_DEDUCTION: TotalDef = TotalDef {
    name: "Total Deduction",
    members: &[
        "Deduction Bensin Harian",
        "Deduction Makan Harian",
        "Deduction Pulsa Harian",
        "Tunjangan Operational Dibayar Kas",
        "Uang Jalan - Line Haul (D)",
        "Deduction Komisi Karyawan",
        "Reward (D)",
        "Lembur - Line Haul (D)",
        "Lembur Harian (D)",
        "Uang Makan Perdin (D)",
        "Uang Saku Perdin (D)",
        "Potongan Hutang Cuti",
        "Pot. Own Risk",
        "Pot. Audit",
        "Pot. Barang Hilang",
        "Pot. Denda",
        "Pot. Handphone",
        "Pot. Kasbon",
        "Pot. Kasbon Harian",
        "Pot. Kerusakan Volta",
        "Pot. Lain",
        "Pot. Lain Gross",
        "Pot. Volta SEI",
        "Pot. Volta T-FAS",
        "Potongan COD",
        "Potongan Uang Penalti",
        "Deposit Atribut",
        "BPJS JKK (Kemitraan)",
        "BPJS JKM (Kemitraan)",
        "BPJS JHT",
        "BPJS JHT Gross",
        "BPJS Pensiun",
        "BPJS Pensiun Gross",
        "BPJS Kesehatan",
        "BPJS Kesehatan Gross",
    ],
};

/// All totals in canonical application order.
pub const TOTALS: &[&TotalDef] = &[
    &TOTAL_BASIC_SALARY,
    &TOTAL_UANG_MAKAN,
    &TOTAL_UANG_TRANSPORT,
    &TOTAL_TUNJANGAN_JABATAN,
    &TOTAL_INSENTIF_INHOUSE,
    &TOTAL_SISA_CUTI,
    &TOTAL_UANG_PISAH,
    &TOTAL_TUNJANGAN_OPERASIONAL,
    &TOTAL_KOMISI_KARYAWAN,
    &TOTAL_INSENTIF_MITRA,
    &TOTAL_BONUS_INHOUSE,
    &TOTAL_BONUS_MITRA,
    &TOTAL_LEMBUR,
    &TOTAL_PERJALANAN_DINAS,
    &TOTAL_BIAYA_PENGOBATAN,
    &TOTAL_THR,
    &TOTAL_BPJS_TK,
    &TOTAL_BPJS_KES,
    &TOTAL_DEDUCTION,
];

impl TotalDef {
    /// Sum of the member fields, treating missing or non-numeric as 0.
    pub fn sum(&self, row: &FieldMap) -> f64 {
        self.members.iter().map(|member| number_of(row, member)).sum()
    }
}

fn number_of(row: &FieldMap, key: &str) -> f64 {
    row.get(key).and_then(Scalar::as_number).unwrap_or(0.0)
}

fn text_of(row: &FieldMap, key: &str) -> String {
    row.get(key).map(Scalar::display).unwrap_or_default()
}

/// Extend a merged row map with all derived attributes and totals.
///
/// Source keys are never re-typed; derived keys are written fresh on every
/// call so rendering stays idempotent.
pub fn apply_derivations(row: &mut FieldMap) {
    let ccbf = derive_cost_center_by_function(
        &text_of(row, "Jobstatus Code"),
        &text_of(row, "Cost Center Code"),
    );
    row.insert("Cost Center By Function".into(), Scalar::from(ccbf.as_str()));
    row.insert(
        "Coa".into(),
        Scalar::Text(derive_coa(&text_of(row, "Cost Center")).to_string()),
    );
    row.insert(
        "Department".into(),
        Scalar::from(text_of(row, "Org Unit").as_str()),
    );
    let tax_location = text_of(row, "Tax Location");
    row.insert("Tax Location Code".into(), Scalar::from(tax_location.as_str()));
    row.insert("Tax Location Name".into(), Scalar::from(tax_location.as_str()));
    row.insert(
        "Bank Account".into(),
        Scalar::from(text_of(row, "Account Name").as_str()),
    );
    row.insert(
        "Level".into(),
        match derive_level(&text_of(row, "Grade")) {
            Some(level) => Scalar::Number(level as f64),
            None => Scalar::Empty,
        },
    );

    for total in TOTALS {
        row.insert(total.name.into(), Scalar::Number(total.sum(row)));
    }
}
