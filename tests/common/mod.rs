use std::path::PathBuf;
use tempfile::TempDir;

pub const HEADER: &str = concat!(
    "Entity,Code,Year,GDP per capita,Government expenditure (% of GDP),",
    "Trade as a Share of GDP,\"Inflation, consumer prices (annual %)\""
);

/// One source row; `None` becomes an empty CSV field.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub entity: &'static str,
    pub year: i64,
    pub gdp: Option<f64>,
    pub gov: Option<f64>,
    pub trade: Option<f64>,
    pub inflation: Option<f64>,
}

impl RawRow {
    pub fn full(
        entity: &'static str,
        year: i64,
        gdp: f64,
        gov: f64,
        trade: f64,
        inflation: f64,
    ) -> Self {
        Self {
            entity,
            year,
            gdp: Some(gdp),
            gov: Some(gov),
            trade: Some(trade),
            inflation: Some(inflation),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.gdp.is_some()
            && self.gov.is_some()
            && self.trade.is_some()
            && self.inflation.is_some()
    }
}

fn field(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Write rows as CSV into a fresh temp dir.
pub fn write_csv(rows: &[RawRow]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gdp_per_capita.csv");

    let mut content = format!("{HEADER}\n");
    for r in rows {
        content.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            r.entity,
            "XXX",
            r.year,
            field(r.gdp),
            field(r.gov),
            field(r.trade),
            field(r.inflation),
        ));
    }
    std::fs::write(&path, content).unwrap();

    (dir, path)
}

/// A mixed dataset: rows before and after 1990, some with gaps.
pub fn mixed_rows() -> Vec<RawRow> {
    let entities = ["Turkey", "Germany", "United States", "Chile"];
    let mut rows = Vec::new();
    for (e, &entity) in entities.iter().enumerate() {
        for year in (1980..2010).step_by(3) {
            let k = (e as i64 * 31 + year) as f64;
            let mut row = RawRow::full(
                entity,
                year,
                1000.0 + (k * 7.0) % 900.0,
                10.0 + (k * 3.0) % 40.0,
                20.0 + (k * 11.0) % 150.0,
                (k * 13.0) % 25.0 - 2.0,
            );
            match (year + e as i64) % 7 {
                0 => row.gdp = None,
                3 => row.trade = None,
                5 => row.inflation = None,
                _ => {}
            }
            if (year + e as i64) % 11 == 0 {
                row.gov = None;
            }
            rows.push(row);
        }
    }
    rows
}
