//! Pedestrian counts: hourly sensor counts along Bahnhofstrasse with the
//! weather at the time of counting.

use crate::aggregate::{Average, finite_sum, group_sum, mean, unique_count};
use crate::chart::{DrawList, Series, SurfaceSize, draw_horizontal_bars, draw_line_chart};
use crate::dashboard::{Dashboard, Kpi, PassContext};
use crate::data::RawRecord;
use crate::data::text::normalize_for_match;
use crate::dataset::{Dataset, FacetDef};
use crate::datasets::{count, hex, text};
use crate::facet::{CategoryOrder, plausible_year};
use crate::format::share;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

const MONTHLY_COLOR: &str = "#1d43c7";
const HOURLY_COLOR: &str = "#0e8b6f";
const SEGMENT_COLOR: &str = "#0c6b8f";

/// Only segments whose name contains this are kept
const STREET: &str = "bahnhofstrasse";
const UNKNOWN_WEATHER: &str = "unknown";

const DAY_TYPES: &[&str] = &["Weekday", "Weekend"];

/// Temperature from which an hour counts as warm, in °C
const WARM_FROM: f64 = 20.0;
/// Temperature below which an hour counts as cold, in °C
const COLD_BELOW: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub fn of(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sat | Weekday::Sun => DayType::Weekend,
            _ => DayType::Weekday,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::Weekend => "Weekend",
        }
    }
}

/// One hourly count of one street segment.
#[derive(Clone, Debug, PartialEq)]
pub struct PedestrianRow {
    /// Start of the counted hour, UTC
    pub timestamp: NaiveDateTime,
    pub year: i32,
    /// `YYYY-MM`
    pub month_key: String,
    pub hour: u32,
    pub day_type: DayType,
    pub segment: String,
    pub weather: String,
    /// °C; `None` when not recorded
    pub temperature: Option<f64>,
    pub count: f64,
    /// Counted by a sensor rather than estimated
    pub measured: bool,
    pub unverified: bool,
}

/// Naive date-time layouts, read as UTC
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a timestamp into UTC.
///
/// Accepts RFC 3339 with an offset, a naive ISO date-time (read as UTC) and a
/// bare date (midnight UTC). Years outside the accepted domain yield `None`.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    let parsed = DateTime::parse_from_rfc3339(value)
        .map(|t| t.naive_utc())
        .ok()
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    plausible_year(parsed.year()).then_some(parsed)
}

/// Lowercased weather label with accents folded and dashes as spaces;
/// `unknown` when blank.
pub fn weather_label(value: &str) -> String {
    let label = normalize_for_match(value);
    if label.is_empty() {
        UNKNOWN_WEATHER.to_string()
    } else {
        label
    }
}

fn segment(row: &PedestrianRow) -> &str {
    &row.segment
}

fn weather(row: &PedestrianRow) -> &str {
    &row.weather
}

fn day_type(row: &PedestrianRow) -> &str {
    row.day_type.as_str()
}

/// Bahnhofstrasse pedestrian dashboard.
#[derive(Debug, Clone)]
pub struct Pedestrians {
    facets: Vec<FacetDef<PedestrianRow>>,
}

impl Default for Pedestrians {
    fn default() -> Self {
        Self::new()
    }
}

impl Pedestrians {
    pub fn new() -> Self {
        let lexical = CategoryOrder::Lexical;
        Self {
            facets: vec![
                FacetDef::optional("segment", "Segment", segment).ordered(lexical),
                FacetDef::optional("weather", "Weather", weather).ordered(lexical),
                FacetDef::required("day_type", "Day type", day_type)
                    .ordered(CategoryOrder::Fixed(DAY_TYPES)),
            ],
        }
    }
}

impl Dataset for Pedestrians {
    type Row = PedestrianRow;

    fn name(&self) -> &str {
        "pedestrians"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &["timestamp", "location_name"]
    }

    fn normalize(&self, record: &RawRecord) -> Option<PedestrianRow> {
        let timestamp = parse_timestamp(record.field("timestamp"))?;
        let segment = text(record, "location_name");
        if !normalize_for_match(&segment).contains(STREET) {
            return None;
        }
        Some(PedestrianRow {
            timestamp,
            year: timestamp.year(),
            month_key: timestamp.format("%Y-%m").to_string(),
            hour: timestamp.hour(),
            day_type: DayType::of(timestamp.weekday()),
            segment,
            weather: weather_label(record.field("weather_condition")),
            temperature: record.number("temperature"),
            count: count(record, "pedestrians_count"),
            measured: normalize_for_match(record.field("collection_type")) == "measured",
            unverified: record.field("unverified").trim().eq_ignore_ascii_case("true"),
        })
    }

    fn temporal(&self, row: &PedestrianRow) -> i32 {
        row.year
    }

    fn facets(&self) -> &[FacetDef<PedestrianRow>] {
        &self.facets
    }
}

/// Mean count per hour of day, `00` to `23`.
pub fn hourly_profile(rows: &[&PedestrianRow]) -> Vec<Average> {
    (0..24)
        .map(|hour| mean(rows.iter().filter(|r| r.hour == hour).map(|r| r.count)))
        .collect()
}

/// Mean count of the rows whose temperature satisfies `band`.
fn temperature_average(rows: &[&PedestrianRow], band: impl Fn(f64) -> bool) -> Average {
    mean(
        rows.iter()
            .filter(|r| r.temperature.is_some_and(&band))
            .map(|r| r.count),
    )
}

impl Dashboard for Pedestrians {
    fn chart_ids(&self) -> &'static [&'static str] {
        &["monthly", "hourly", "segments"]
    }

    fn kpis(&self, ctx: &PassContext<'_, PedestrianRow>) -> Vec<Kpi> {
        let fmt = ctx.format;
        let hours = ctx.rows.len() as f64;
        let total = finite_sum(ctx.iter().map(|r| r.count));
        let per_hour = if hours > 0.0 { total / hours } else { 0.0 };
        let measured = ctx.iter().filter(|r| r.measured).count() as f64;
        let days = unique_count(ctx.iter(), |r| r.timestamp.date());

        // first row with the strictly highest count
        let peak = ctx
            .iter()
            .fold(None::<&PedestrianRow>, |best, r| match best {
                Some(b) if r.count <= b.count => Some(b),
                _ => Some(r),
            })
            .map_or(fmt.placeholder.clone(), |r| {
                format!("{} ({})", r.timestamp.format("%Y-%m-%dT%H:00"), fmt.format_count(r.count))
            });
        let latest = ctx
            .iter()
            .map(|r| r.timestamp)
            .max()
            .map_or(fmt.placeholder.clone(), |t| t.format("%Y-%m-%d %H:%M UTC").to_string());

        vec![
            Kpi::new("Total Pedestrians", fmt.format_count(total)),
            Kpi::new("Avg per Hour", fmt.format_count(per_hour)),
            Kpi::new("Observed Hours", fmt.format_count(hours)),
            Kpi::new("Unique Days", fmt.format_count(days as f64)),
            Kpi::new("Measured Rows", fmt.format_percent(share(measured, hours))),
            Kpi::new("Peak Hour", peak),
            Kpi::new("Latest Timestamp", latest),
        ]
    }

    fn draw(
        &self,
        chart: &str,
        size: SurfaceSize,
        ctx: &PassContext<'_, PedestrianRow>,
    ) -> Option<DrawList> {
        let list = match chart {
            "monthly" => {
                let mut months = group_sum(ctx.iter(), |r| r.month_key.clone(), |r| r.count)
                    .into_entries();
                months.sort_by(|a, b| a.0.cmp(&b.0));
                let (labels, values): (Vec<String>, Vec<f64>) = months.into_iter().unzip();
                let series = Series::new("Pedestrians", hex(MONTHLY_COLOR), values);
                draw_line_chart(size, &labels, &series, &ctx.chart)
            }
            "hourly" => {
                let labels: Vec<String> = (0..24).map(|h| format!("{:02}", h)).collect();
                // hours without rows sit on the baseline
                let values = hourly_profile(ctx.rows)
                    .into_iter()
                    .map(|avg| avg.value().unwrap_or(0.0))
                    .collect();
                let series = Series::new("Avg per hour", hex(HOURLY_COLOR), values).with_width(2.5);
                draw_line_chart(size, &labels, &series, &ctx.chart)
            }
            "segments" => {
                let per_segment = group_sum(ctx.iter(), |r| r.segment.clone(), |r| r.count);
                draw_horizontal_bars(
                    size,
                    &per_segment.top_n(per_segment.len()),
                    hex(SEGMENT_COLOR),
                    &ctx.chart,
                )
            }
            _ => return None,
        };
        Some(list)
    }

    fn highlights(&self, ctx: &PassContext<'_, PedestrianRow>) -> Vec<String> {
        if ctx.rows.is_empty() {
            return vec!["No data for this filter.".to_string()];
        }

        let fmt = ctx.format;
        let mut lines = Vec::new();
        let by_segment = group_sum(ctx.iter(), |r| r.segment.as_str(), |r| r.count);
        if let Some((name, n)) = by_segment.max_entry() {
            lines.push(format!(
                "Most active segment: {} ({} pedestrians).",
                name,
                fmt.format_count(n)
            ));
        }
        let by_hour = group_sum(ctx.iter(), |r| r.hour, |r| r.count);
        if let Some((hour, n)) = by_hour.max_entry() {
            lines.push(format!("Busiest hour: {:02}:00 ({}).", hour, fmt.format_count(n)));
        }

        let shown = |avg: Average| avg.value().map_or(fmt.placeholder.clone(), |v| fmt.format_count(v));
        lines.push(format!(
            "Average hourly count at {} C or warmer: {}.",
            WARM_FROM,
            shown(temperature_average(ctx.rows, |t| t >= WARM_FROM))
        ));
        lines.push(format!(
            "Average hourly count below {} C: {}.",
            COLD_BELOW,
            shown(temperature_average(ctx.rows, |t| t < COLD_BELOW))
        ));

        if let (Some(first), Some(last)) = (ctx.years.first(), ctx.years.last()) {
            lines.push(format!("Loaded data spans {} to {}.", first, last));
        }
        lines
    }
}
