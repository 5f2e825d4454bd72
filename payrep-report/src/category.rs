//! Presentation categorizer
//!
//! Maps every output column name to its three-level header label path. This
//! is purely a display grouping and is independent of the storage-bucket
//! classifier: a field may present under a different band than the bucket it
//! was stored in. The rule table is ordered and first-match-wins; several
//! rules shadow later ones on purpose (e.g. anything containing "uang makan"
//! bands under Tunjangan even when it is a perdin or deduction variant), so
//! the order must stay as-is.

/// Header label path for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPath {
    pub level1: &'static str,
    pub level2: &'static str,
    pub level3: &'static str,
}

const fn path(level1: &'static str, level2: &'static str, level3: &'static str) -> CategoryPath {
    CategoryPath {
        level1,
        level2,
        level3,
    }
}

/// Column names that band under Basic Info, compared case-insensitively.
const BASIC_INFO_FIELDS: &[&str] = &[
    "no",
    "name",
    "employee no",
    "no ktp",
    "gov. tax file no.",
    "position",
    "department",
    "directorate",
    "directorate 2",
    "tax location code",
    "cost center by function",
    "jobstatus code",
    "jobstatus name",
    "work location code",
    "work location",
    "cost center code",
    "tax location name",
    "cost center",
    "coa",
    "level",
    "grade",
    "gender",
    "employment status",
    "join date",
    "terminate date",
    "length of service",
    "tax status",
    "company bank account",
    "company account name",
    "company bank name",
    "bank account",
    "account name",
    "bank name",
    "birth date",
    "insurance no bpjskt",
    "insurance no bpjskes",
];

/// Label path for a column name. Total and deterministic; the last resort is
/// `(Netral, Netral, Netral)`.
pub fn categorize(field_name: &str) -> CategoryPath {
    let f = field_name.to_lowercase();
    let has = |needle: &str| f.contains(needle);

    if BASIC_INFO_FIELDS.iter().any(|b| f == *b) {
        return path("Basic Info", "Basic Info", "Basic Info");
    }

    // Allowance bands.
    if has("basic salary") || has("rapel salary") || has("additional salary")
        || f == "total basic salary"
    {
        return path("Allowance", "Salary", "Salary");
    }
    if has("uang makan") || has("uang transport") || has("transport commercial")
        || f == "uang makan & transport"
    {
        return path("Allowance", "Tunjangan", "Tunjangan");
    }
    if has("tunjangan jabatan") {
        return path("Allowance", "Tunjangan", "Tunjangan");
    }
    if has("sisa cuti dibayarkan") || has("uang pisah") || has("tunjangan relokasi")
        || has("refund loan")
    {
        return path(
            "Allowance",
            "Tunjangan Tidak Tetap",
            "Tunjangan Tidak Tetap",
        );
    }
    if has("tunjangan operasional") || has("netral operasional") || has("komisi karyawan") {
        return path("Allowance", "Tunjangan", "Tunjangan");
    }
    if has("tunjangan pendidikan")
        || has("tunjangan bensin harian")
        || has("tunjangan makan harian")
        || has("tunjangan operasional harian")
        || has("tunjangan pulsa harian")
        || has("tunjangan volta")
    {
        return path("Allowance", "Tunjangan", "Tunjangan");
    }
    if has("insentif") || has("target paket") {
        return path("Allowance", "Insentif", "Insentif");
    }
    if has("bpjs") && has("pemberi kerja") {
        return path("Allowance", "BPJS", "BPJS");
    }
    if has("bonus") {
        return path("Allowance", "Bonus", "Bonus");
    }
    if has("reward") && !has("(d)") {
        return path("Allowance", "Reward", "Reward");
    }
    if (has("lembur") || has("lemburan")) && !has("(d)") {
        return path("Allowance", "Lembur", "Lembur");
    }
    if (has("uang makan perdin") || has("uang saku perdin") || has("perjalanan dinas"))
        && !has("(d)")
    {
        return path("Allowance", "Perjalanan Dinas", "Perjalanan Dinas");
    }
    if has("claim") || has("santunan") || has("maternity") {
        return path("Allowance", "Klaim Pengobatan", "Klaim Pengobatan");
    }
    if has("bhr mitra") || has("pengembalian potongan volta") {
        return path("Allowance", "Loan", "Loan");
    }
    if has("thr") && !has("dasar") {
        return path("Allowance", "THR", "THR");
    }
    if has("uang jalan") || has("uang kerajinan") || has("service motor") || has("severence")
        || has("loyalty fee")
    {
        return path("Allowance", "Tunjangan", "Tunjangan");
    }

    // Deduction bands.
    if has("deduction bensin") || has("deduction makan") || has("deduction pulsa")
        || has("deduction komisi") || has("operasional dibayar kas")
    {
        return path("Deduction", "Tunjangan", "Tunjangan");
    }
    if has("reward (d)") || (has("lembur") && has("(d)")) {
        return path("Deduction", "Reward", "Reward");
    }
    if has("uang makan perdin (d)") || has("uang saku perdin (d)")
        || (has("uang jalan") && has("(d)"))
    {
        return path("Deduction", "Perjalanan Dinas", "Perjalanan Dinas");
    }
    if has("potongan hutang cuti") || has("potongan cuti") {
        return path("Deduction", "Cuti", "Cuti");
    }
    if has("own risk") || has("potownrisk") {
        return path("Deduction", "Own Risk", "Own Risk");
    }
    if has("pot. kasbon")
        || has("pot. audit")
        || has("pot. barang hilang")
        || has("pot. denda")
        || has("pot. handphone")
        || has("pot. kerusakan volta")
        || has("pot. lain")
        || has("pot. volta")
        || has("potongan cod")
        || has("potongan uang penalti")
        || has("deposit atribut")
        || has("kasbon (saldo")
        || has("potaudit")
        || has("potbrghilang")
        || has("potdenda")
        || has("pothp")
        || has("potkerusakanvolta")
        || has("potlain")
        || has("potvolta")
    {
        return path("Deduction", "Loan", "Loan");
    }
    if has("bpjs") && (has("kemitraan") || has("gross") || !has("pemberi kerja")) {
        return path("Deduction", "BPJS", "BPJS");
    }

    if f == "thp balancing" || f == "total deduction" {
        return path("THP Balance", "THP Balance", "THP Balance");
    }

    // Netral bands.
    if has("basic salary full") || has("prorate base") || has("basic jabatan") {
        return path("Netral", "Salary", "Salary");
    }
    if has("tunjangan jabatan full") || (has("tunjangan operasional") && has("basic"))
        || has("netral tunjangan")
    {
        return path("Netral", "Tunjangan", "Tunjangan");
    }
    if has("hari kerja") || has("hk payment") {
        return path("Netral", "Hari Kerja", "Hari Kerja");
    }
    if has("nilai insentif kelipatan") || has("pencapaian target") || has("target paket bulanan")
        || has("neutral check get")
    {
        return path("Netral", "Insentif", "Insentif");
    }
    if has("bonus kelipatan") || has("bonus per coli") || has("bonus utama") || has("zero bonus") {
        return path("Netral", "Bonus", "Bonus");
    }
    if has("ovt hari raya") || has("ovt off value") || has("ovt weekday") {
        return path("Netral", "Lembur", "Lembur");
    }
    if has("potongan") && has("salary deduction only") {
        return path("Netral", "Loan", "Loan");
    }
    if has("neutral jurnal") || has("jurnal balance") {
        return path("Netral", "Jurnal", "Jurnal");
    }
    if has("dasar perhitungan thr") || has("total bulan prorate thr")
        || has("dasar tunjangan jabatan thr")
    {
        return path("Netral", "THR", "THR");
    }
    if has("dasar bpjs") {
        return path("Netral", "BPJS", "BPJS");
    }
    if has("periode dirumahkan") || has("flag per paket") || has("is freelance")
        || has("persentase dirumahkan") || has("persentase gaji sakit") || has("pjs flag")
    {
        return path("Netral", "Flagging", "Flagging");
    }
    if has("office cost center") {
        return path("Netral", "Cost Center", "Cost Center");
    }
    if has("total hari pembagi") || has("total pembawaan paket")
        || has("prorate active employee") || has("jumlah sisa cuti")
    {
        return path("Netral", "Hari Kerja", "Hari Kerja");
    }

    // Generic fallbacks by keyword, then the last resort.
    if has("tunjangan") || has("allowance") {
        return path("Allowance", "Tunjangan", "Tunjangan");
    }
    if has("potongan") || has("deduction") {
        return path("Deduction", "Loan", "Loan");
    }

    path("Netral", "Netral", "Netral")
}
