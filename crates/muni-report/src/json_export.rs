use std::io::Write;

use muni_model::IndicatorTable;

use crate::error::Result;

/// Pretty-printed JSON of the whole table, unavailable reasons included.
pub fn write_indicator_json<W: Write>(table: &IndicatorTable, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, table)?;
    writer.write_all(b"\n").map_err(serde_json::Error::io)?;
    writer.flush().map_err(serde_json::Error::io)?;
    Ok(())
}
