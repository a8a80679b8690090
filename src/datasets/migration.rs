//! In-migration: arrivals per event month by sex, age band, origin and
//! residential quarter.

use crate::aggregate::{finite_sum, group_sum, unique_count};
use crate::chart::{
    DrawList, Series, SurfaceSize, draw_horizontal_bars, draw_multi_line_chart, draw_vertical_bars,
};
use crate::dashboard::{Dashboard, Kpi, PassContext};
use crate::data::RawRecord;
use crate::dataset::{Dataset, FacetDef};
use crate::datasets::{count, hex, text, year_of};
use crate::facet::CategoryOrder;
use crate::format::share;

const TOTAL_COLOR: &str = "#152022";
const SWISS_COLOR: &str = "#0f7a6d";
const FOREIGN_COLOR: &str = "#e26f2f";
const QUARTER_COLOR: &str = "#2f5be2";
const AGE_COLOR: &str = "#0f7a6d";

const TOP_QUARTERS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Swiss,
    Foreign,
    Other,
}

impl Origin {
    /// Classify an origin label such as `Schweiz` or `Ausland`.
    pub fn classify(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("ausl") {
            Origin::Foreign
        } else if lower.contains("schweiz") {
            Origin::Swiss
        } else {
            Origin::Other
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MigrationRow {
    pub year: i32,
    pub month: u32,
    pub sex: String,
    /// Twenty-year age band
    pub age: String,
    pub origin: String,
    pub kreis: String,
    pub quarter: String,
    pub arrivals: f64,
}

impl MigrationRow {
    pub fn origin_kind(&self) -> Origin {
        Origin::classify(&self.origin)
    }
}

fn sex(row: &MigrationRow) -> &str {
    &row.sex
}

fn origin(row: &MigrationRow) -> &str {
    &row.origin
}

fn age(row: &MigrationRow) -> &str {
    &row.age
}

fn kreis(row: &MigrationRow) -> &str {
    &row.kreis
}

fn quarter(row: &MigrationRow) -> &str {
    &row.quarter
}

#[derive(Debug, Clone)]
pub struct Migration {
    facets: Vec<FacetDef<MigrationRow>>,
}

impl Default for Migration {
    fn default() -> Self {
        Self::new()
    }
}

impl Migration {
    pub fn new() -> Self {
        let lexical = CategoryOrder::Lexical;
        Self {
            facets: vec![
                FacetDef::required("sex", "Sex", sex).ordered(lexical),
                FacetDef::required("origin", "Origin", origin).ordered(lexical),
                FacetDef::required("age", "Age", age).ordered(lexical),
                FacetDef::optional("kreis", "District", kreis).ordered(lexical),
                FacetDef::optional("quarter", "Quarter", quarter).ordered(lexical),
            ],
        }
    }
}

impl Dataset for Migration {
    type Row = MigrationRow;

    fn name(&self) -> &str {
        "migration"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &["EreignisDatJahr", "EreignisDatMM"]
    }

    fn normalize(&self, record: &RawRecord) -> Option<MigrationRow> {
        let month = record.number("EreignisDatMM")?;
        if month.fract() != 0.0 || !(1.0..=12.0).contains(&month) {
            return None;
        }
        Some(MigrationRow {
            year: year_of(record, "EreignisDatJahr")?,
            month: month as u32,
            sex: text(record, "SexLang"),
            age: text(record, "AlterV20ueber80Kurz_noDM"),
            origin: text(record, "HerkunftLang"),
            kreis: text(record, "KreisLang"),
            quarter: text(record, "QuarLang"),
            arrivals: count(record, "AnzZuzuWir"),
        })
    }

    fn temporal(&self, row: &MigrationRow) -> i32 {
        row.year
    }

    fn facets(&self) -> &[FacetDef<MigrationRow>] {
        &self.facets
    }
}

/// Year with the most arrivals, first year on ties.
fn peak_year<'a>(rows: impl IntoIterator<Item = &'a MigrationRow>) -> Option<(i32, f64)> {
    let per_year = group_sum(rows, |r| r.year, |r| r.arrivals);
    per_year.max_entry().map(|(y, v)| (*y, v))
}

impl Dashboard for Migration {
    fn chart_ids(&self) -> &'static [&'static str] {
        &["trend", "quarters", "age_profile"]
    }

    fn kpis(&self, ctx: &PassContext<'_, MigrationRow>) -> Vec<Kpi> {
        let fmt = ctx.format;
        let total = finite_sum(ctx.iter().map(|r| r.arrivals));
        let foreign = finite_sum(
            ctx.iter()
                .filter(|r| r.origin_kind() == Origin::Foreign)
                .map(|r| r.arrivals),
        );
        let peak = match peak_year(ctx.iter()).filter(|(_, n)| *n > 0.0) {
            Some((year, n)) => format!("{} ({})", year, fmt.format_count(n)),
            None => format!("{} ({})", fmt.placeholder, fmt.format_count(0.0)),
        };
        let quarters = unique_count(ctx.iter(), |r| r.quarter.as_str());

        vec![
            Kpi::new("Total Arrivals", fmt.format_count(total)),
            Kpi::new("Peak Year", peak),
            Kpi::new("Foreign Share", fmt.format_percent(share(foreign, total))),
            Kpi::new("Active Quarters", fmt.format_count(quarters as f64)),
        ]
    }

    fn draw(
        &self,
        chart: &str,
        size: SurfaceSize,
        ctx: &PassContext<'_, MigrationRow>,
    ) -> Option<DrawList> {
        let list = match chart {
            "trend" => {
                let years = ctx.visible_years();
                let total = group_sum(ctx.iter(), |r| r.year, |r| r.arrivals);
                let swiss = group_sum(
                    ctx.iter().filter(|r| r.origin_kind() == Origin::Swiss),
                    |r| r.year,
                    |r| r.arrivals,
                );
                let foreign = group_sum(
                    ctx.iter().filter(|r| r.origin_kind() == Origin::Foreign),
                    |r| r.year,
                    |r| r.arrivals,
                );
                let series = [
                    Series::new("Total", hex(TOTAL_COLOR), total.reindex(&years)).with_width(3.0),
                    Series::new("Swiss", hex(SWISS_COLOR), swiss.reindex(&years)).with_width(2.0),
                    Series::new("Foreign", hex(FOREIGN_COLOR), foreign.reindex(&years))
                        .with_width(2.0),
                ];
                draw_multi_line_chart(size, &ctx.year_labels(), &series, &ctx.chart)
            }
            "quarters" => {
                let per_quarter = group_sum(ctx.iter(), |r| r.quarter.clone(), |r| r.arrivals);
                draw_horizontal_bars(
                    size,
                    &per_quarter.top_n(TOP_QUARTERS),
                    hex(QUARTER_COLOR),
                    &ctx.chart,
                )
            }
            "age_profile" => {
                let bands = match peak_year(ctx.iter()) {
                    Some((year, _)) => group_sum(
                        ctx.iter().filter(|r| r.year == year),
                        |r| r.age.clone(),
                        |r| r.arrivals,
                    )
                    .reindex_present(ctx.categories.get("age")),
                    None => Vec::new(),
                };
                draw_vertical_bars(size, &bands, hex(AGE_COLOR), &ctx.chart)
            }
            _ => return None,
        };
        Some(list)
    }

    fn highlights(&self, ctx: &PassContext<'_, MigrationRow>) -> Vec<String> {
        if ctx.rows.is_empty() {
            return vec!["No arrivals match the current filters.".to_string()];
        }

        let fmt = ctx.format;
        let total = finite_sum(ctx.iter().map(|r| r.arrivals));
        let mut lines = vec![format!("{} arrivals in the current selection.", fmt.format_count(total))];

        let mut per_year = group_sum(ctx.iter(), |r| r.year, |r| r.arrivals).into_entries();
        per_year.sort_by_key(|(year, _)| *year);
        if let (Some(&(first_year, first)), Some(&(last_year, last))) = (per_year.first(), per_year.last()) {
            if first_year != last_year && first > 0.0 {
                lines.push(format!(
                    "Change {} to {}: {}.",
                    first_year,
                    last_year,
                    fmt.format_percent((last - first) / first * 100.0)
                ));
            }
        }

        let by_sex = group_sum(ctx.iter(), |r| r.sex.as_str(), |r| r.arrivals);
        if let Some((sex, n)) = by_sex.max_entry() {
            lines.push(format!("Largest group by sex: {} ({}).", sex, fmt.format_count(n)));
        }
        let by_kreis = group_sum(ctx.iter(), |r| r.kreis.as_str(), |r| r.arrivals);
        if let Some((kreis, n)) = by_kreis.max_entry() {
            lines.push(format!("Top district: {} ({}).", kreis, fmt.format_count(n)));
        }

        lines
    }
}
