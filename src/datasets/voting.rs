//! Voter turnout: running turnout reports per vote date, from the first
//! build-up update to the final count.

use crate::aggregate::{mean, rank_top_n, unique_count};
use crate::chart::{
    DrawList, Series, SurfaceSize, ValueAxis, draw_horizontal_bars, draw_line_chart,
};
use crate::dashboard::{Dashboard, Kpi, PassContext};
use crate::data::RawRecord;
use crate::dataset::{Dataset, FacetDef};
use crate::datasets::{date_of, hex};
use crate::facet::CategoryOrder;
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use std::collections::hash_map::Entry;

const FINAL_COLOR: &str = "#1948bb";
const BUILD_UP_COLOR: &str = "#0e6c7d";
const TOP_DATES_COLOR: &str = "#d2721e";

/// Build-up chart keeps this many of the earliest reporting distances
const BUILD_UP_DAYS: usize = 20;
const TOP_DATES: usize = 8;

const PHASES: &[&str] = &["final", "build-up"];

/// Reporting phase of a turnout update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Reported on the vote date itself
    Final,
    /// Reported before the vote date, or without an update date
    BuildUp,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Final => "final",
            Phase::BuildUp => "build-up",
        }
    }
}

/// One turnout report.
#[derive(Clone, Debug, PartialEq)]
pub struct VoteRow {
    pub vote_date: NaiveDate,
    /// Vote date as `YYYY-MM-DD`
    pub vote_label: String,
    pub update_date: Option<NaiveDate>,
    pub year: i32,
    /// Turnout in percent
    pub turnout: f64,
    /// Whole days between update and vote; negative for late updates
    pub days_before: Option<i64>,
    pub phase: Phase,
    /// Latest update of its vote date
    pub is_final: bool,
}

/// `2024-03-03` → `24-03-03`.
pub fn short_date(label: &str) -> &str {
    label.get(2..).unwrap_or(label)
}

fn vote_date(row: &VoteRow) -> &str {
    &row.vote_label
}

fn phase(row: &VoteRow) -> &str {
    row.phase.as_str()
}

/// Turnout dashboard.
#[derive(Debug, Clone)]
pub struct Voting {
    facets: Vec<FacetDef<VoteRow>>,
}

impl Default for Voting {
    fn default() -> Self {
        Self::new()
    }
}

impl Voting {
    pub fn new() -> Self {
        Self {
            facets: vec![
                FacetDef::optional("vote_date", "Vote date", vote_date)
                    .ordered(CategoryOrder::Lexical),
                FacetDef::required("phase", "Phase", phase).ordered(CategoryOrder::Fixed(PHASES)),
            ],
        }
    }
}

impl Dataset for Voting {
    type Row = VoteRow;

    fn name(&self) -> &str {
        "voting"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &["Abstimmungs_Datum", "Stimmbeteiligung_Prozent"]
    }

    fn normalize(&self, record: &RawRecord) -> Option<VoteRow> {
        let vote_date = date_of(record, "Abstimmungs_Datum")?;
        let turnout = record.number("Stimmbeteiligung_Prozent")?;
        let update_date = date_of(record, "Aktualisierungs_Datum");
        let days_before = update_date.map(|u| (vote_date - u).num_days());
        let phase = if days_before == Some(0) {
            Phase::Final
        } else {
            Phase::BuildUp
        };
        Some(VoteRow {
            vote_date,
            vote_label: vote_date.format("%Y-%m-%d").to_string(),
            update_date,
            year: vote_date.year(),
            turnout,
            days_before,
            phase,
            is_final: false,
        })
    }

    /// Marks the latest update of each vote date. The first row wins ties
    /// and rows without an update date lose to any dated row.
    fn finish_rows(&self, mut rows: Vec<VoteRow>) -> Vec<VoteRow> {
        let mut latest: HashMap<NaiveDate, usize> = HashMap::new();
        for (i, row) in rows.iter().enumerate() {
            match latest.entry(row.vote_date) {
                Entry::Vacant(slot) => {
                    slot.insert(i);
                }
                Entry::Occupied(mut slot) => {
                    if row.update_date > rows[*slot.get()].update_date {
                        slot.insert(i);
                    }
                }
            }
        }
        for i in latest.into_values() {
            rows[i].is_final = true;
        }
        rows
    }

    fn temporal(&self, row: &VoteRow) -> i32 {
        row.year
    }

    fn facets(&self) -> &[FacetDef<VoteRow>] {
        &self.facets
    }
}

/// Final reports among `rows`, oldest vote first.
fn final_rows<'a>(rows: impl IntoIterator<Item = &'a VoteRow>) -> Vec<&'a VoteRow> {
    let mut finals: Vec<&VoteRow> = rows.into_iter().filter(|r| r.is_final).collect();
    finals.sort_by_key(|r| r.vote_date);
    finals
}

/// First row with the strictly highest (or lowest) turnout.
fn extreme<'a>(rows: &[&'a VoteRow], highest: bool) -> Option<&'a VoteRow> {
    rows.iter().copied().fold(None, |best, row| match best {
        Some(b) if highest && row.turnout <= b.turnout => Some(b),
        Some(b) if !highest && row.turnout >= b.turnout => Some(b),
        _ => Some(row),
    })
}

/// Average build-up turnout per reporting distance in days, ascending.
/// Only the [`BUILD_UP_DAYS`] largest distances are kept.
pub fn build_up_profile<'a>(rows: impl IntoIterator<Item = &'a VoteRow>) -> Vec<(i64, f64)> {
    let mut by_day: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for row in rows.into_iter().filter(|r| !r.is_final) {
        if let Some(days) = row.days_before.filter(|d| *d >= 0) {
            by_day.entry(days).or_default().push(row.turnout);
        }
    }
    let skip = by_day.len().saturating_sub(BUILD_UP_DAYS);
    by_day
        .into_iter()
        .skip(skip)
        .filter_map(|(days, values)| mean(values).value().map(|avg| (days, avg)))
        .collect()
}

impl Dashboard for Voting {
    fn chart_ids(&self) -> &'static [&'static str] {
        &["final_trend", "build_up", "top_dates"]
    }

    fn kpis(&self, ctx: &PassContext<'_, VoteRow>) -> Vec<Kpi> {
        let fmt = ctx.format;
        let finals = final_rows(ctx.iter());
        let vote_dates = unique_count(finals.iter().copied(), |r| r.vote_date);
        let avg = mean(finals.iter().map(|r| r.turnout));
        let labelled = |row: Option<&VoteRow>| match row {
            Some(r) => format!("{} ({})", r.vote_label, fmt.format_percent(r.turnout)),
            None => fmt.placeholder.clone(),
        };

        vec![
            Kpi::new("Rows in View", fmt.format_count(ctx.rows.len() as f64)),
            Kpi::new("Vote Dates", fmt.format_count(vote_dates as f64)),
            Kpi::new("Avg Final Turnout", fmt.format_average(avg, "%")),
            Kpi::new("Highest Final", labelled(extreme(&finals, true))),
            Kpi::new("Latest Vote", labelled(finals.last().copied())),
        ]
    }

    fn draw(&self, chart: &str, size: SurfaceSize, ctx: &PassContext<'_, VoteRow>) -> Option<DrawList> {
        let list = match chart {
            "final_trend" => {
                let finals = final_rows(ctx.iter());
                let labels: Vec<String> = finals
                    .iter()
                    .map(|r| short_date(&r.vote_label).to_string())
                    .collect();
                let series = Series::new(
                    "Final turnout",
                    hex(FINAL_COLOR),
                    finals.iter().map(|r| r.turnout).collect(),
                );
                draw_line_chart(size, &labels, &series, &ctx.chart.with_axis(ValueAxis::percent()))
            }
            "build_up" => {
                let profile = build_up_profile(ctx.iter());
                let labels: Vec<String> = profile.iter().map(|(d, _)| format!("-{}d", d)).collect();
                let series = Series::new(
                    "Build-up turnout",
                    hex(BUILD_UP_COLOR),
                    profile.iter().map(|(_, v)| *v).collect(),
                );
                draw_line_chart(size, &labels, &series, &ctx.chart.with_axis(ValueAxis::percent()))
            }
            "top_dates" => {
                let finals = final_rows(ctx.iter());
                let top = rank_top_n(
                    finals
                        .iter()
                        .map(|r| (short_date(&r.vote_label).to_string(), r.turnout)),
                    TOP_DATES,
                    |_, _| false,
                );
                draw_horizontal_bars(
                    size,
                    &top,
                    hex(TOP_DATES_COLOR),
                    &ctx.chart.with_axis(ValueAxis::decimal("%")),
                )
            }
            _ => return None,
        };
        Some(list)
    }

    fn highlights(&self, ctx: &PassContext<'_, VoteRow>) -> Vec<String> {
        let finals = final_rows(ctx.iter());
        let (Some(first), Some(last)) = (finals.first(), finals.last()) else {
            return vec!["No final turnout rows in this filter.".to_string()];
        };

        let fmt = ctx.format;
        let mut lines = vec![format!(
            "Final turnout changed by {} from {} to {}.",
            fmt.format_decimal(last.turnout - first.turnout, " pp"),
            first.vote_label,
            last.vote_label
        )];
        if let Some(high) = extreme(&finals, true) {
            lines.push(format!(
                "Highest final turnout: {} ({}).",
                high.vote_label,
                fmt.format_percent(high.turnout)
            ));
        }
        if let Some(low) = extreme(&finals, false) {
            lines.push(format!(
                "Lowest final turnout: {} ({}).",
                low.vote_label,
                fmt.format_percent(low.turnout)
            ));
        }
        lines.push(format!(
            "Average final turnout in view: {}.",
            fmt.format_average(mean(finals.iter().map(|r| r.turnout)), "%")
        ));
        lines
    }
}
