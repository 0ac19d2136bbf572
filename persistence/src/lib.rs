use std::path::{Path, PathBuf};

use job_scraper::{ListingRow, ListingTable};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("CSV error: '{0}'")]
    Csv(#[from] csv::Error),
    #[error("File error: '{0}'")]
    Io(#[from] std::io::Error),
    #[error("Column '{column}' missing in {path}")]
    MissingColumn { column: &'static str, path: PathBuf },
}

pub const HEADERS: [&str; 5] = ["职位名称", "公司名称", "位置", "工资", "职位链接"];
const LINK_COLUMN: &str = "职位链接";

/// `{job}_{city}.csv`
pub fn listing_filename(job: &str, city_name: &str) -> String {
    format!("{}_{}.csv", job, city_name)
}

/// Write the table with a header row, replacing any existing file.
/// An empty table still gets its header.
pub fn write_table(path: &Path, table: &[ListingRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(HEADERS)?;
    for row in table {
        writer.serialize(row)?;
    }
    writer.flush()?;
    log::info!("{} saved ({} rows)", path.display(), table.len());
    Ok(())
}

pub fn read_table(path: &Path) -> Result<ListingTable> {
    let mut reader = csv::Reader::from_path(path)?;
    let table = reader
        .deserialize::<ListingRow>()
        .collect::<std::result::Result<ListingTable, csv::Error>>()?;
    Ok(table)
}

/// The link column of a listing file, in file order. Empty cells are skipped.
pub fn read_links(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)?;
    let column = reader
        .headers()?
        .iter()
        .position(|h| h == LINK_COLUMN)
        .ok_or_else(|| Error::MissingColumn {
            column: LINK_COLUMN,
            path: path.to_owned(),
        })?;
    let mut links = Vec::new();
    for record in reader.records() {
        let record = record?;
        match record.get(column) {
            Some(link) if !link.is_empty() => links.push(link.to_owned()),
            _ => log::warn!("skipping row without link in {}", path.display()),
        }
    }
    Ok(links)
}
