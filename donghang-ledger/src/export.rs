//! CSV export of ledger rows.

use anyhow::Result;
use std::io::Write;

use crate::record::ExpenseRecord;

pub fn write_csv<W: Write>(records: &[ExpenseRecord], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["date", "category", "amount", "merchant", "memo", "synced"])?;
    for r in records {
        wtr.write_record([
            r.transaction_date.to_string(),
            r.category.label().to_string(),
            r.amount.to_string(),
            r.merchant_name.clone(),
            r.memo.clone(),
            r.synced.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(records: &[ExpenseRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
