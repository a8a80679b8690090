//! Dog register: registered dogs per reference year, with owner and dog
//! attributes.

use crate::aggregate::{finite_sum, group_sum, is_blank_label, unique_count, weighted_average};
use crate::chart::{
    DrawList, Series, SurfaceSize, draw_horizontal_bars, draw_line_chart, draw_vertical_bars,
};
use crate::dashboard::{Dashboard, Kpi, PassContext};
use crate::data::RawRecord;
use crate::data::text::repair_mojibake;
use crate::dataset::{Dataset, FacetDef};
use crate::datasets::{count, hex, text, year_of};
use crate::facet::CategoryOrder;
use crate::format::share;
use once_cell::sync::Lazy;
use regex::Regex;

const TREND_COLOR: &str = "#1956c8";
const BREED_COLOR: &str = "#14795a";
const OWNER_AGE_COLOR: &str = "#d97a12";

const UNKNOWN: &str = "Unbekannt";
const TOP_BREEDS: usize = 10;

static NUMBERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

/// One register entry.
#[derive(Clone, Debug, PartialEq)]
pub struct DogRow {
    pub year: i32,
    /// Owner id
    pub hid: String,
    pub owner_sex: String,
    /// Ten-year owner age band, e.g. `40- bis 49-Jährige`
    pub owner_age: String,
    pub kreis: String,
    pub quarter: String,
    pub breed: String,
    pub dog_type: String,
    pub dog_sex: String,
    /// Dog age in years; NaN when not recorded
    pub dog_age: f64,
    pub count: f64,
}

/// Representative age of an owner age band.
///
/// Bands with two bounds map to their midpoint. "unter N" maps to N/2 and
/// open-ended top bands (80, 90, 100 and over) to N+5. Unknown bands and
/// labels without digits are NaN so they drop out of averages.
pub fn owner_age_mid(label: &str) -> f64 {
    let lower = label.to_lowercase();
    if lower.contains("unbek") {
        return f64::NAN;
    }
    let numbers: Vec<f64> = NUMBERS
        .find_iter(&lower)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    match numbers.as_slice() {
        [] => f64::NAN,
        [n] if lower.contains("unter") => n / 2.0,
        [n] if ["80", "90", "100"].iter().any(|t| lower.contains(t)) => n + 5.0,
        [n] => *n,
        [a, b, ..] => (a + b) / 2.0,
    }
}

fn owner_sex(row: &DogRow) -> &str {
    &row.owner_sex
}

fn owner_age(row: &DogRow) -> &str {
    &row.owner_age
}

fn dog_type(row: &DogRow) -> &str {
    &row.dog_type
}

fn dog_sex(row: &DogRow) -> &str {
    &row.dog_sex
}

fn kreis(row: &DogRow) -> &str {
    &row.kreis
}

fn quarter(row: &DogRow) -> &str {
    &row.quarter
}

/// Dog register dashboard.
#[derive(Debug, Clone)]
pub struct Dogs {
    facets: Vec<FacetDef<DogRow>>,
}

impl Default for Dogs {
    fn default() -> Self {
        Self::new()
    }
}

impl Dogs {
    pub fn new() -> Self {
        Self {
            facets: vec![
                FacetDef::required("owner_sex", "Owner sex", owner_sex),
                FacetDef::required("dog_sex", "Dog sex", dog_sex),
                FacetDef::optional("owner_age", "Owner age", owner_age)
                    .ordered(CategoryOrder::LeadingNumber),
                FacetDef::optional("dog_type", "Breed type", dog_type),
                FacetDef::optional("kreis", "District", kreis),
                FacetDef::optional("quarter", "Quarter", quarter),
            ],
        }
    }
}

impl Dataset for Dogs {
    type Row = DogRow;

    fn name(&self) -> &str {
        "dogs"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &["StichtagDatJahr"]
    }

    fn normalize(&self, record: &RawRecord) -> Option<DogRow> {
        Some(DogRow {
            year: year_of(record, "StichtagDatJahr")?,
            hid: text(record, "HID"),
            owner_sex: text(record, "SexLang"),
            owner_age: text(record, "AlterV10Lang"),
            kreis: text(record, "KreisLang"),
            quarter: text(record, "QuarLang"),
            breed: repair_mojibake(record.field_or("Rasse1Text", UNKNOWN)),
            dog_type: repair_mojibake(record.field_or("Rassetyp1Lang", UNKNOWN)),
            dog_sex: text(record, "SexHundLang"),
            dog_age: record.number("AlterVHundNum").unwrap_or(f64::NAN),
            count: count(record, "AnzHunde"),
        })
    }

    fn temporal(&self, row: &DogRow) -> i32 {
        row.year
    }

    fn facets(&self) -> &[FacetDef<DogRow>] {
        &self.facets
    }
}

/// Year with the most dogs; `None` when nothing positive was counted.
fn peak_year<'a>(rows: impl IntoIterator<Item = &'a DogRow>) -> Option<(i32, f64)> {
    let per_year = group_sum(rows, |r| r.year, |r| r.count);
    per_year
        .max_entry()
        .filter(|(_, v)| *v > 0.0)
        .map(|(y, v)| (*y, v))
}

impl Dashboard for Dogs {
    fn chart_ids(&self) -> &'static [&'static str] {
        &["trend", "breeds", "owner_age"]
    }

    fn kpis(&self, ctx: &PassContext<'_, DogRow>) -> Vec<Kpi> {
        let fmt = ctx.format;
        let total = finite_sum(ctx.iter().map(|r| r.count));
        let owners = unique_count(ctx.iter(), |r| r.hid.as_str());
        let dog_age = weighted_average(ctx.iter(), |r| r.dog_age, |r| r.count);
        let owner_age = weighted_average(ctx.iter(), |r| owner_age_mid(&r.owner_age), |r| r.count);
        let peak = match peak_year(ctx.iter()) {
            Some((year, n)) => format!("{} ({})", year, fmt.format_count(n)),
            None => format!("{} ({})", fmt.placeholder, fmt.format_count(0.0)),
        };

        vec![
            Kpi::new("Dogs (Visible)", fmt.format_count(total)),
            Kpi::new("Unique HIDs", fmt.format_count(owners as f64)),
            Kpi::new("Avg Dog Age", fmt.format_average(dog_age, " yrs")),
            Kpi::new("Avg Owner Age", fmt.format_average(owner_age, " yrs")),
            Kpi::new("Peak Year", peak),
        ]
    }

    fn draw(&self, chart: &str, size: SurfaceSize, ctx: &PassContext<'_, DogRow>) -> Option<DrawList> {
        let list = match chart {
            "trend" => {
                let years = ctx.visible_years();
                let per_year = group_sum(ctx.iter(), |r| r.year, |r| r.count);
                let series = Series::new("Dogs", hex(TREND_COLOR), per_year.reindex(&years));
                draw_line_chart(size, &ctx.year_labels(), &series, &ctx.chart)
            }
            "breeds" => {
                let per_breed = group_sum(ctx.iter(), |r| r.breed.clone(), |r| r.count);
                let top = per_breed.top_n_excluding(TOP_BREEDS, is_blank_label);
                draw_horizontal_bars(size, &top, hex(BREED_COLOR), &ctx.chart)
            }
            "owner_age" => {
                let per_band = group_sum(ctx.iter(), |r| r.owner_age.clone(), |r| r.count);
                let bands = per_band.reindex_present(ctx.categories.get("owner_age"));
                draw_vertical_bars(size, &bands, hex(OWNER_AGE_COLOR), &ctx.chart)
            }
            _ => return None,
        };
        Some(list)
    }

    fn highlights(&self, ctx: &PassContext<'_, DogRow>) -> Vec<String> {
        if ctx.rows.is_empty() {
            return vec!["No dogs match the current filters.".to_string()];
        }

        let fmt = ctx.format;
        let total = finite_sum(ctx.iter().map(|r| r.count));
        let mut lines = vec![format!("{} dogs in the current selection.", fmt.format_count(total))];

        let leaders = [
            ("district", group_sum(ctx.iter(), |r| r.kreis.as_str(), |r| r.count)),
            ("quarter", group_sum(ctx.iter(), |r| r.quarter.as_str(), |r| r.count)),
            ("breed", group_sum(ctx.iter(), |r| r.breed.as_str(), |r| r.count)),
        ];
        for (what, series) in &leaders {
            if let Some((name, n)) = series.max_entry() {
                lines.push(format!("Top {}: {} ({}).", what, name, fmt.format_count(n)));
            }
        }

        let last_year = ctx.filters.years.max;
        let in_last_year: Vec<&DogRow> = ctx.iter().filter(|r| r.year == last_year).collect();
        let by_sex = group_sum(in_last_year.iter().copied(), |r| dog_sex_kind(&r.dog_sex), |r| r.count);
        let female = by_sex.get(&Some(DogSex::Female)).unwrap_or(0.0);
        let male = by_sex.get(&Some(DogSex::Male)).unwrap_or(0.0);
        if female + male > 0.0 {
            lines.push(format!(
                "Female dogs in {}: {}.",
                last_year,
                fmt.format_percent(share(female, female + male))
            ));
        }

        lines
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum DogSex {
    Female,
    Male,
}

fn dog_sex_kind(label: &str) -> Option<DogSex> {
    match label.to_lowercase().as_str() {
        "weiblich" => Some(DogSex::Female),
        "männlich" | "maennlich" => Some(DogSex::Male),
        _ => None,
    }
}
