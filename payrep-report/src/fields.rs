//! Canonical output field order
//!
//! `OUTPUT_FIELDS` is the complete export contract: every column the flat
//! report can carry, in its exact order, including fields a given batch may
//! not have (those render as empty columns). `HEADCOUNT_FIELDS` is the
//! demographic subset used by the headcount layout.

/// Complete ordered output column list.
pub const OUTPUT_FIELDS: &[&str] = &[
    // Basic info
    "No",
    "Name",
    "Employee No",
    "No KTP",
    "Gov. Tax File No.",
    "Position",
    "Department",
    "Directorate",
    "Directorate 2",
    "Tax Location Code",
    "Cost Center By Function",
    "Jobstatus Code",
    "Jobstatus Name",
    "Work Location Code",
    "Work Location",
    "Cost Center Code",
    "Tax Location Name",
    "Cost Center",
    "Coa",
    "Level",
    "Grade",
    "Gender",
    "Employment Status",
    "Join Date",
    "Terminate Date",
    "Length Of Service",
    "Tax Status",
    "Company Bank Account",
    "Company Account Name",
    "Company Bank Name",
    "Bank Account",
    "Account Name",
    "Bank Name",
    "Birth Date",
    "Insurance No BPJSKT",
    "Insurance No BPJSKES",
    // Salary
    "Basic Salary",
    "Basic Salary Tambahan",
    "Additional Salary",
    "Additional Salary Gross",
    "Rapel Salary",
    "Rapel Salary Gross",
    "Rapel Mitra Sudah Dibayar",
    "Total Basic Salary",
    // Uang makan
    "Uang Makan",
    "Additional Uang Makan",
    "Total Uang Makan",
    "Uang Makan & Transport",
    "Uang Makan Bulanan",
    // Uang transport
    "Uang Transport",
    "Additional Uang Transport",
    "Rapel Uang Transport",
    "Tunjangan Transport Commercial",
    "Additional Tunjangan Transport Commercial",
    "Total Uang Transport",
    // Tunjangan jabatan
    "Tunjangan Jabatan",
    "Additional Tunjangan Jabatan",
    "Rapel Tunjangan Jabatan",
    "Tunjangan Jabatan Gross",
    "Additional Tunjangan Jabatan Gross",
    "Rapel Tunjangan Jabatan Gross",
    "Tunjangan Jabatan PJS",
    "Total Tunjangan Jabatan",
    // Insentif inhouse
    "Insentif",
    "Insentif Gross",
    "Rapel Insentif",
    "Additional Insentif",
    "Additional Tunjangan Relokasi",
    "Additional Refund Loan",
    "Tunjangan Tempat Tinggal",
    "Reward",
    "Additional Reward",
    "Total Insentif Inhouse",
    // Sisa cuti
    "Sisa Cuti Dibayarkan",
    "Additional Sisa Cuti Dibayarkan",
    "Sisa Cuti Dibayarkan Gross",
    "Additional Sisa Cuti Dibayarkan Gross",
    "Total Sisa Cuti",
    // Uang pisah
    "Tunjangan Uang Pisah",
    "Uang Pisah Gross",
    "Additional Uang Pisah",
    "Total Uang Pisah",
    // Tunjangan operasional
    "Netral Operasional dibayar Payroll",
    "Tunjangan Operasional",
    "Additional Tunjangan Operational",
    "Rapel Tunjangan Operational",
    "Total Tunjangan Operasional",
    // Komisi
    "Komisi Karyawan",
    "Additional Komisi Karyawan",
    "Total Komisi Karyawan",
    // Other tunjangan
    "Tunjangan Pendidikan",
    "Tunjangan Bensin Harian",
    "Tunjangan Makan Harian",
    "Tunjangan Operasional Harian",
    "Tunjangan Pulsa Harian",
    "Tunjangan Volta",
    "Uang Jalan - Line Haul",
    "Uang Kerajinan",
    "Service Motor",
    "Severence",
    "Insentif Per Paket",
    // Insentif mitra
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
    "Total Insentif Mitra",
    // Reward mitra
    "Additional Loyalty Fee Mitra",
    "Loyalty Fee Mitra",
    "Additional Reward Mitra",
    "Additional Reward Mitra Semester",
    "Reward Be A Star",
    "Reward Bulanan Mitra",
    "Reward Semester Mitra",
    "Rewards",
    // Bonus inhouse
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
    "Total Bonus Inhouse",
    // Bonus mitra
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
    "Total Bonus Mitra",
    // Lembur
    "Lembur - Line Haul",
    "Lembur Harian",
    "Lemburan",
    "Additional Lemburan",
    "Total Lembur",
    // Perjalanan dinas
    "Uang Makan Perdin",
    "Uang Saku Perdin",
    "Total Perjalanan Dinas",
    // Klaim pengobatan
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
    "Total Biaya Pengobatan Karyawan",
    // Loan (allowance side)
    "Pengembalian Potongan Volta TEI",
    "BHR Mitra",
    // THR
    "THR",
    "Additional THR",
    "Rapel THR",
    "THR Gross",
    "Total THR",
    // BPJS employer contributions
    "BPJS JKK (Pemberi Kerja)",
    "BPJS JKK (Pemberi Kerja) Gross",
    "BPJS JKM (Pemberi Kerja)",
    "BPJS JKM (Pemberi Kerja) Gross",
    "BPJS JHT (Pemberi Kerja)",
    "BPJS JHT (Pemberi Kerja) Gross",
    "BPJS Pensiun (Pemberi Kerja)",
    "BPJS Pensiun (Pemberi Kerja) Gross",
    "Total BPJS TK",
    "BPJS Kesehatan (Pemberi Kerja)",
    "BPJS Kesehatan (Pemberi Kerja) Gross",
    "Total BPJS Kes",
    // Deduction - tunjangan
    "Deduction Bensin Harian",
    "Deduction Makan Harian",
    "Deduction Pulsa Harian",
    "Tunjangan Operational Dibayar Kas",
    "Uang Jalan - Line Haul (D)",
    // Deduction - insentif/reward
    "Deduction Komisi Karyawan",
    "Reward (D)",
    // Deduction - lembur
    "Lembur - Line Haul (D)",
    "Lembur Harian (D)",
    // Deduction - perjalanan dinas
    "Uang Makan Perdin (D)",
    "Uang Saku Perdin (D)",
    // Deduction - cuti
    "Potongan Hutang Cuti",
    // Deduction - own risk
    "Pot. Own Risk",
    // Deduction - loan
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
    // Deduction - BPJS
    "BPJS JKK (Kemitraan)",
    "BPJS JKM (Kemitraan)",
    "BPJS JHT",
    "BPJS JHT Gross",
    "BPJS Pensiun",
    "BPJS Pensiun Gross",
    "BPJS Kesehatan",
    "BPJS Kesehatan Gross",
    // Deduction - tax
    "Tax",
    "Tax Penalty Borne",
    // Total deduction
    "Total Deduction",
    // THP balance
    "THP Balancing",
    // Netral - salary references
    "Basic Salary Full",
    "Tunjangan Jabatan Full",
    "Tunjangan Jabatan Full Gross",
    "Prorate Base",
    "Basic Jabatan",
    "Basic Jabatan PJS",
    // Netral - tunjangan references
    "Tunjangan Jabatan PJS Full",
    "Basic Tunjangan Operasional",
    "Netral Tunjangan Pendidikan",
    "Neutral Check Get Kerajinan",
    // Netral - cuti
    "Jumlah Sisa Cuti",
    // Netral - insentif
    "Nilai Insentif Kelipatan",
    "Nilai Insentif Kelipatan Mitra",
    "Pencapaian Target Paket",
    "Target Paket Bulanan",
    "Target Paket Bulanan Mitra",
    // Netral - bonus
    "Bonus Kelipatan (Coli)",
    "Bonus Kelipatan (Coli) Mitra",
    "Bonus Per Coli",
    "Bonus Per Coli Mitra",
    "Bonus Utama",
    "Bonus Utama Mitra",
    "Zero Bonus Paket",
    // Netral - lembur
    "Ovt Hari Raya (Natal/Idul Fitri)",
    "Ovt OFF Value",
    "Ovt WeekDay Value",
    // Netral - loan balances
    "Potongan Barang Hilang Salary Deduction Only",
    "Potongan Denda Salary Deduction Only",
    "Potongan Own Risk Salary Deduction Only",
    "KASBON (Saldo Piutang Awal)",
    "POTAUDIT (Saldo Piutang Awal)",
    "POTBRGHILANG (Saldo Piutang Awal)",
    "POTDENDA (Saldo Piutang Awal)",
    "POTHP (Saldo Piutang Awal)",
    "POTKERUSAKANVOLTA (Saldo Piutang Awal)",
    "POTLAIN (Saldo Piutang Awal)",
    "POTOWNRISK (Saldo Piutang Awal)",
    "POTVOLTA (Saldo Piutang Awal)",
    "POTVOLTASEI (Saldo Piutang Awal)",
    // Netral - jurnal
    "Neutral Jurnal Balance Checker",
    // Netral - THR
    "Dasar Perhitungan THR",
    "Total Bulan Prorate THR",
    "Dasar Tunjangan Jabatan THR",
    "Dasar Tunjangan Jabatan PJS THR",
    // Netral - BPJS basis
    "Dasar BPJS JP",
    "Dasar BPJS KS",
    "Dasar BPJS TK",
    // Netral - flagging
    "Periode Dirumahkan (Month)",
    "Flag Per Paket",
    "Flag Per Paket Mitra",
    "Is Freelance",
    "Persentase Dirumahkan",
    "Persentase Gaji Sakit Berkepanjangan",
    "PJS Flag",
    // Netral - cost center
    "Office Cost Center",
    // Netral - hari kerja
    "Hari Kerja",
    "Hari Kerja Realisasi",
    "HK Payment",
    "Prorate Active Employee",
    "Total Hari Pembagi",
    "Total Pembawaan Paket",
];

/// Demographic columns for the headcount layout.
pub const HEADCOUNT_FIELDS: &[&str] = &[
    "No",
    "Name",
    "Employee No",
    "No KTP",
    "Gov. Tax File No.",
    "Position",
    "Department",
    "Directorate",
    "Directorate 2",
    "Tax Location",
    "Cost Center By Function",
    "Jobstatus Code",
    "Jobstatus Name",
    "Work Location Code",
    "Work Location",
    "Cost Center Code",
    "Tax Location Name",
    "Cost Center",
    "Coa",
    "Level",
    "Grade",
    "Gender",
    "Employment Status",
    "Join Date",
    "Terminate Date",
];

pub fn is_output_field(field_name: &str) -> bool {
    OUTPUT_FIELDS.contains(&field_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn output_field_count_is_stable() {
        assert_eq!(OUTPUT_FIELDS.len(), 301);
        // One known duplicate carried from the source contract: the column
        // appears in both the bonus-mitra and netral-bonus bands.
        let set: BTreeSet<_> = OUTPUT_FIELDS.iter().collect();
        assert_eq!(set.len(), OUTPUT_FIELDS.len() - 1);
    }

    #[test]
    fn headcount_is_a_demographic_subset() {
        assert_eq!(HEADCOUNT_FIELDS.len(), 25);
        assert!(!HEADCOUNT_FIELDS.contains(&"Basic Salary"));
        assert!(HEADCOUNT_FIELDS.contains(&"Grade"));
    }

    #[test]
    fn every_total_is_an_output_column() {
        for total in crate::derive::TOTALS {
            assert!(is_output_field(total.name), "{} missing", total.name);
        }
    }
}
