//! Party voting recommendations per ballot issue.
//!
//! Every row is one party's recommendation (JA, NEIN, free vote) on one
//! ballot issue. Issues are identified by date and title, classified into a
//! small set of topics by keyword score, and mined for frequent words.

use crate::aggregate::{
    GroupedSeries, count_by, cross_tabulate, dedupe_by_key, unique_count,
};
use crate::chart::{
    DrawList, Rgba, Series, SurfaceSize, draw_heatmap, draw_horizontal_bars, draw_multi_line_chart,
};
use crate::dashboard::{Dashboard, Kpi, PassContext};
use crate::data::RawRecord;
use crate::data::text::{normalize_for_match, repair_mojibake, tokenize};
use crate::dataset::{Dataset, FacetDef};
use crate::datasets::{date_of, hex};
use crate::facet::CategoryOrder;
use crate::format::{share, truncate};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

const HEATMAP_COLOR: Rgba = Rgba::rgb(24, 86, 201);
const HEATMAP_CAPTION: &str = "Darker cells = more party positions";
const KEYWORD_COLOR: &str = "#6a2ea6";

const HEATMAP_MAX_PARTIES: usize = 10;
const TREND_TOPICS: usize = 3;
/// Keyword chart shows the ranked words as bars rather than a word cloud;
/// hosts wanting a cloud take the full ranking from [`keyword_counts`]
const TOP_KEYWORDS: usize = 12;
const MIN_KEYWORD_CHARS: usize = 4;
const EXAMPLE_MAX_PARTIES: usize = 6;
const EXAMPLE_TEXT_CHARS: usize = 180;

/// Stance facet domain, always listed in this order
pub const STANCES: &[&str] = &["JA", "NEIN", "FREI", "OTHER"];

/// Words that carry no topic signal, in matching form
const STOPWORDS: &[&str] = &[
    "und", "oder", "der", "die", "das", "den", "dem", "ein", "eine", "einer", "eines", "im", "in",
    "am", "an", "zu", "mit", "von", "auf", "fuer", "fur", "zur", "zum", "des", "ist", "wird",
    "als", "bei", "durch", "aus", "stadt", "zuerich", "zurich", "objektkredit", "millionen",
    "franken",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Stance {
    Ja,
    Nein,
    Frei,
    Other,
}

impl Stance {
    pub fn as_str(self) -> &'static str {
        match self {
            Stance::Ja => "JA",
            Stance::Nein => "NEIN",
            Stance::Frei => "FREI",
            Stance::Other => "OTHER",
        }
    }
}

/// Classify a free-text recommendation.
pub fn normalize_stance(raw: &str) -> Stance {
    let value = normalize_for_match(raw);
    if value.contains("ja") {
        Stance::Ja
    } else if value.contains("nein") {
        Stance::Nein
    } else if value.contains("stimmfreigabe") || value.contains("leer") {
        Stance::Frei
    } else {
        Stance::Other
    }
}

/// Canonical party label.
///
/// Known spellings are unified, all-caps acronyms are kept and everything
/// else is title-cased word by word. Returns an empty string for values that
/// are not a party at all.
pub fn normalize_party(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return String::new();
    }
    match normalize_for_match(value).as_str() {
        "glp" => return "GLP".to_string(),
        "grune" | "gruene" => return "Gruene".to_string(),
        "ja" => return String::new(),
        _ => {}
    }
    if value == value.to_uppercase() {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}

/// Keyword-scored issue topic.
#[derive(Debug, PartialEq, Serialize)]
pub struct Topic {
    pub key: &'static str,
    pub label: &'static str,
    pub color: Rgba,
    #[serde(skip)]
    pub words: &'static [&'static str],
}

pub static TOPICS: [Topic; 6] = [
    Topic {
        key: "housing",
        label: "Housing",
        color: Rgba::rgb(0x18, 0x56, 0xc9),
        words: &["wohn", "miete", "wohnungen", "siedlung", "areal", "quartier", "genossenschaft"],
    },
    Topic {
        key: "mobility",
        label: "Mobility",
        color: Rgba::rgb(0x0c, 0x8a, 0x72),
        words: &["verkehr", "tram", "bus", "velo", "strasse", "mobil", "park", "tunnel"],
    },
    Topic {
        key: "climate",
        label: "Climate",
        color: Rgba::rgb(0x2f, 0x9b, 0x46),
        words: &["klima", "energie", "solar", "co2", "oekolog", "umwelt", "heizung", "emission"],
    },
    Topic {
        key: "finance",
        label: "Finance",
        color: Rgba::rgb(0xc6, 0x77, 0x18),
        words: &["kredit", "million", "franken", "steuer", "budget", "finanz", "investition", "beitrag"],
    },
    Topic {
        key: "social",
        label: "Social",
        color: Rgba::rgb(0x8b, 0x3c, 0xc5),
        words: &["schule", "kinder", "gesund", "pflege", "sozial", "famil", "jugend", "betreuung"],
    },
    Topic {
        key: "governance",
        label: "Governance",
        color: Rgba::rgb(0xcd, 0x4d, 0x6e),
        words: &["initiative", "gemeindeordnung", "stadtrat", "gemeinderat", "reform", "verfassung", "gesetz"],
    },
];

/// Fallback for issues no topic word matches
pub static OTHER_TOPIC: Topic = Topic {
    key: "other",
    label: "Other",
    color: Rgba::rgb(0x4c, 0x5a, 0x6d),
    words: &[],
};

/// Topic whose words occur most often in the issue title and text.
///
/// Each word counts once. Ties go to the earlier topic; no match at all
/// yields [`OTHER_TOPIC`].
pub fn semantic_topic(title: &str, text: &str) -> &'static Topic {
    let haystack = normalize_for_match(&format!("{} {}", title, text));
    let mut best: &'static Topic = &OTHER_TOPIC;
    let mut best_score = 0;
    for topic in &TOPICS {
        let score = topic.words.iter().filter(|w| haystack.contains(*w)).count();
        if score > best_score {
            best = topic;
            best_score = score;
        }
    }
    best
}

fn topic_by_key(key: &str) -> &'static Topic {
    TOPICS.iter().find(|t| t.key == key).unwrap_or(&OTHER_TOPIC)
}

/// One party's recommendation on one issue.
#[derive(Clone, Debug, PartialEq)]
pub struct SloganRow {
    pub date: NaiveDate,
    pub year: i32,
    pub title: String,
    pub text: String,
    /// `date|title` as found in the file
    pub issue_id: String,
    pub party: String,
    pub stance: Stance,
    pub topic: &'static Topic,
}

fn party(row: &SloganRow) -> &str {
    &row.party
}

fn stance(row: &SloganRow) -> &str {
    row.stance.as_str()
}

/// Occurrences of content words over the given issues.
///
/// Words shorter than four chars and stopwords are skipped. Every occurrence
/// counts, so a word repeated within one issue counts repeatedly.
pub fn keyword_counts<'a, I>(issues: I) -> GroupedSeries<String>
where
    I: IntoIterator<Item = &'a SloganRow>,
{
    let mut counts = GroupedSeries::new();
    for issue in issues {
        for word in tokenize(&format!("{} {}", issue.title, issue.text)) {
            if word.chars().count() >= MIN_KEYWORD_CHARS && !STOPWORDS.contains(&word.as_str()) {
                counts.add(word, 1.0);
            }
        }
    }
    counts
}

/// Summary of one issue for the example list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IssueExample {
    pub issue_id: String,
    pub date: NaiveDate,
    pub title: String,
    pub text: String,
    pub topic: &'static str,
    /// Recommendations recorded for the issue
    pub positions: usize,
    pub ja: usize,
    pub nein: usize,
    pub frei: usize,
    /// Up to six parties, sorted
    pub parties: Vec<String>,
}

/// The `n` issues with the most recommendations, newest first on ties.
pub fn issue_examples(rows: &[&SloganRow], n: usize) -> Vec<IssueExample> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut examples: Vec<(IssueExample, BTreeSet<&str>)> = Vec::new();

    for row in rows {
        let i = *index.entry(row.issue_id.as_str()).or_insert_with(|| {
            examples.push((
                IssueExample {
                    issue_id: row.issue_id.clone(),
                    date: row.date,
                    title: row.title.clone(),
                    text: truncate(&row.text, EXAMPLE_TEXT_CHARS),
                    topic: row.topic.label,
                    positions: 0,
                    ja: 0,
                    nein: 0,
                    frei: 0,
                    parties: Vec::new(),
                },
                BTreeSet::new(),
            ));
            examples.len() - 1
        });
        let (example, parties) = &mut examples[i];
        example.positions += 1;
        match row.stance {
            Stance::Ja => example.ja += 1,
            Stance::Nein => example.nein += 1,
            Stance::Frei => example.frei += 1,
            Stance::Other => {}
        }
        parties.insert(row.party.as_str());
    }

    let mut out: Vec<IssueExample> = examples
        .into_iter()
        .map(|(mut example, parties)| {
            example.parties = parties
                .into_iter()
                .take(EXAMPLE_MAX_PARTIES)
                .map(str::to_string)
                .collect();
            example
        })
        .collect();
    out.sort_by(|a, b| b.positions.cmp(&a.positions).then(b.date.cmp(&a.date)));
    out.truncate(n);
    out
}

#[derive(Debug, Clone)]
pub struct Slogans {
    facets: Vec<FacetDef<SloganRow>>,
}

impl Default for Slogans {
    fn default() -> Self {
        Self::new()
    }
}

impl Slogans {
    pub fn new() -> Self {
        Self {
            facets: vec![
                FacetDef::optional("party", "Party", party).ordered(CategoryOrder::Lexical),
                FacetDef::required("stance", "Recommendation", stance)
                    .ordered(CategoryOrder::Fixed(STANCES)),
            ],
        }
    }

    /// Parties shown in the heatmap: the selected ones, or all, capped.
    fn heatmap_parties<'a>(&self, ctx: &'a PassContext<'_, SloganRow>) -> Vec<&'a str> {
        let selected = ctx
            .filters
            .selection("party")
            .map(|s| &s.selected)
            .filter(|s| !s.is_empty());
        ctx.categories
            .get("party")
            .iter()
            .filter(|p| selected.is_none_or(|s| s.contains(p.as_str())))
            .take(HEATMAP_MAX_PARTIES)
            .map(String::as_str)
            .collect()
    }
}

impl Dataset for Slogans {
    type Row = SloganRow;

    fn name(&self) -> &str {
        "slogans"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &["datum", "partei", "parole"]
    }

    fn normalize(&self, record: &RawRecord) -> Option<SloganRow> {
        let raw_date = record.field("datum").trim();
        let date = date_of(record, "datum")?;
        let party = normalize_party(&repair_mojibake(record.field("partei")));
        if party.is_empty() || party == "Unknown" {
            return None;
        }
        let title = repair_mojibake(record.field("titel"));
        let text = repair_mojibake(record.field("abstimmungstext"));

        Some(SloganRow {
            date,
            year: date.year(),
            issue_id: format!("{}|{}", raw_date, title),
            topic: semantic_topic(&title, &text),
            stance: normalize_stance(&repair_mojibake(record.field("parole"))),
            title,
            text,
            party,
        })
    }

    fn temporal(&self, row: &SloganRow) -> i32 {
        row.year
    }

    fn facets(&self) -> &[FacetDef<SloganRow>] {
        &self.facets
    }
}

impl Dashboard for Slogans {
    fn chart_ids(&self) -> &'static [&'static str] {
        &["representation", "topics", "keywords"]
    }

    fn kpis(&self, ctx: &PassContext<'_, SloganRow>) -> Vec<Kpi> {
        let fmt = ctx.format;
        let rows = ctx.rows.len() as f64;
        let per_stance = count_by(ctx.iter(), |r| r.stance);
        let ja = per_stance.get(&Stance::Ja).unwrap_or(0.0);
        let nein = per_stance.get(&Stance::Nein).unwrap_or(0.0);
        let per_party = count_by(ctx.iter(), |r| r.party.as_str());
        let top_party = match per_party.max_entry() {
            Some((p, n)) => format!("{} ({})", p, fmt.format_count(n)),
            None => fmt.placeholder.clone(),
        };

        vec![
            Kpi::new("Parole Rows", fmt.format_count(rows)),
            Kpi::new(
                "Distinct Issues",
                fmt.format_count(unique_count(ctx.iter(), |r| r.issue_id.as_str()) as f64),
            ),
            Kpi::new("Active Parties", fmt.format_count(per_party.len() as f64)),
            Kpi::new(
                "JA vs NEIN",
                format!(
                    "{} / {}",
                    fmt.format_percent(share(ja, rows)),
                    fmt.format_percent(share(nein, rows))
                ),
            ),
            Kpi::new("Most Present Party", top_party),
        ]
    }

    fn draw(
        &self,
        chart: &str,
        size: SurfaceSize,
        ctx: &PassContext<'_, SloganRow>,
    ) -> Option<DrawList> {
        let list = match chart {
            "representation" => {
                let parties = self.heatmap_parties(ctx);
                let years = ctx.visible_years();
                let matrix = cross_tabulate(
                    ctx.iter(),
                    &parties,
                    &years,
                    |r| r.party.as_str(),
                    |r| r.year,
                );
                draw_heatmap(size, &matrix, HEATMAP_COLOR, Some(HEATMAP_CAPTION), &ctx.chart)
            }
            "topics" => {
                let issues = dedupe_by_key(ctx.iter(), |r| r.issue_id.as_str());
                let years = ctx.visible_years();
                let series: Vec<Series> = count_by(issues.iter().copied(), |r| r.topic.key)
                    .top_n(TREND_TOPICS)
                    .into_iter()
                    .map(|(key, _)| {
                        let topic = topic_by_key(key);
                        let per_year = count_by(
                            issues.iter().copied().filter(|r| r.topic.key == key),
                            |r| r.year,
                        );
                        Series::new(topic.label, topic.color, per_year.reindex(&years))
                    })
                    .collect();
                draw_multi_line_chart(size, &ctx.year_labels(), &series, &ctx.chart)
            }
            "keywords" => {
                let issues = dedupe_by_key(ctx.iter(), |r| r.issue_id.as_str());
                let top = keyword_counts(issues).top_n(TOP_KEYWORDS);
                draw_horizontal_bars(size, &top, hex(KEYWORD_COLOR), &ctx.chart)
            }
            _ => return None,
        };
        Some(list)
    }

    fn highlights(&self, ctx: &PassContext<'_, SloganRow>) -> Vec<String> {
        if ctx.rows.is_empty() {
            return vec!["No recommendations match the current filters.".to_string()];
        }

        let fmt = ctx.format;
        let issues = dedupe_by_key(ctx.iter(), |r| r.issue_id.as_str());
        let mut lines = vec![format!(
            "{} ballot issues in the current selection.",
            fmt.format_count(issues.len() as f64)
        )];

        if let Some((key, n)) = count_by(issues.iter().copied(), |r| r.topic.key).max_entry() {
            lines.push(format!(
                "Most common topic: {} ({} issues).",
                topic_by_key(key).label,
                fmt.format_count(n)
            ));
        }
        if let Some((party, n)) = count_by(ctx.iter(), |r| r.party.as_str()).max_entry() {
            lines.push(format!(
                "Most represented party: {} ({} positions).",
                party,
                fmt.format_count(n)
            ));
        }

        let mut per_year = count_by(issues.iter().copied(), |r| r.year).into_entries();
        per_year.sort_by_key(|(year, _)| *year);
        if let (Some(&(first_year, first)), Some(&(last_year, last))) = (per_year.first(), per_year.last()) {
            if first_year != last_year {
                lines.push(format!(
                    "Issues {} vs {}: {} vs {}.",
                    first_year,
                    last_year,
                    fmt.format_count(first),
                    fmt.format_count(last)
                ));
            }
        }

        if let Some(example) = issue_examples(ctx.rows, 1).first() {
            lines.push(format!(
                "Most discussed: {} ({} JA, {} NEIN).",
                example.title, example.ja, example.nein
            ));
        }

        lines
    }
}
