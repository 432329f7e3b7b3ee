//! Writes `Data_Pembukuan_SAKTI_Dummy.xlsx`, a deterministic dummy ledger
//! the dashboard opens by default.

use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// Excel serial for 2024-01-01.
const START_SERIAL: f64 = 45292.0;
const DAYS: u32 = 182;

/// (account code, description, expense type, typical amount)
const ACCOUNTS: [(&str, &str, &str, f64); 8] = [
    ("511111", "Belanja Gaji Pokok PNS", "Belanja Pegawai", 45_000_000.0),
    ("521111", "Belanja Operasional Perkantoran", "Belanja Barang", 3_500_000.0),
    ("521211", "Belanja Bahan", "Belanja Barang", 1_750_000.0),
    ("522111", "Belanja Langganan Listrik", "Belanja Jasa", 6_200_000.0),
    ("522151", "Belanja Jasa Profesi", "Belanja Jasa", 4_000_000.0),
    ("524111", "Belanja Perjalanan Dinas Biasa", "Belanja Perjalanan Dinas", 2_800_000.0),
    ("524113", "Belanja Perjalanan Dinas Dalam Kota", "Belanja Perjalanan Dinas", 650_000.0),
    ("532111", "Belanja Modal Peralatan dan Mesin", "Belanja Modal", 25_000_000.0),
];

/// splitmix64, enough for reproducible dummy data.
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

fn main() -> Result<(), XlsxError> {
    let mut rng = Rng(2024);
    let output_path = "Data_Pembukuan_SAKTI_Dummy.xlsx";

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Pembukuan")?;

    let header = Format::new().set_bold();
    let datetime = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    let money = Format::new().set_num_format("#,##0");

    let columns = [
        "No",
        "Tanggal Transaksi",
        "Akun Belanja",
        "Uraian",
        "Jenis Belanja",
        "Nilai Transaksi",
    ];
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    let mut row: u32 = 0;
    for day in 0..DAYS {
        // Weekdays only; 2024-01-01 was a Monday.
        if day % 7 >= 5 {
            continue;
        }
        let n_transactions = 1 + rng.below(4);
        for _ in 0..n_transactions {
            row += 1;
            let (account, description, expense_type, typical) =
                ACCOUNTS[rng.below(ACCOUNTS.len())];
            // Office hours, so the loader has a time-of-day to drop.
            let time_of_day = (8.0 + rng.next_f64() * 8.0) / 24.0;
            let amount = (typical * (0.5 + rng.next_f64())).round();

            let serial = START_SERIAL + day as f64 + time_of_day;

            sheet.write_number(row, 0, row)?;
            sheet.write_number_with_format(row, 1, serial, &datetime)?;
            sheet.write_number(row, 2, account.parse::<f64>().unwrap_or_default())?;
            sheet.write_string(row, 3, description)?;
            sheet.write_string(row, 4, expense_type)?;
            sheet.write_number_with_format(row, 5, amount, &money)?;
        }
    }

    sheet.set_column_width(1, 20)?;
    sheet.set_column_width(3, 36)?;
    sheet.set_column_width(4, 26)?;
    sheet.set_column_width(5, 18)?;
    workbook.save(output_path)?;

    println!("Wrote {row} transactions over {DAYS} days to {output_path}");
    Ok(())
}
