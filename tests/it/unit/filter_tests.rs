//! Unit tests for facet selection semantics and session filter controls.

use crate::helpers::{Lcg, dogs_session, migration_session};
use civicboard::facet::{FacetSelection, FilterState, SelectionMode, YearRange, filter_rows};
use civicboard::{Dataset, FacetDef};
use std::collections::BTreeSet;

#[derive(Debug)]
struct Row {
    year: i32,
    sex: String,
}

fn sex(r: &Row) -> &str {
    &r.sex
}

fn rows() -> Vec<Row> {
    vec![
        Row { year: 2019, sex: "w".into() },
        Row { year: 2020, sex: "m".into() },
        Row { year: 2021, sex: "w".into() },
    ]
}

#[test]
fn test_absent_facet_applies_no_predicate() {
    let rows = rows();
    let facets = [FacetDef::required("sex", "Sex", sex as fn(&Row) -> &str)];
    let state = FilterState::new(YearRange::new(2019, 2021));
    assert_eq!(filter_rows(&rows, |r| r.year, &facets, &state).len(), 3);
}

#[test]
fn test_required_empty_rejects_and_optional_empty_accepts() {
    let rows = rows();
    let facets = [FacetDef::required("sex", "Sex", sex as fn(&Row) -> &str)];

    let required = FilterState::new(YearRange::new(2019, 2021))
        .with_facet("sex", FacetSelection::new(SelectionMode::Required));
    assert!(filter_rows(&rows, |r| r.year, &facets, &required).is_empty());

    let optional = FilterState::new(YearRange::new(2019, 2021))
        .with_facet("sex", FacetSelection::new(SelectionMode::Optional));
    assert_eq!(filter_rows(&rows, |r| r.year, &facets, &optional).len(), 3);
}

#[test]
fn test_inverted_year_range_matches_nothing() {
    let rows = rows();
    let facets: [FacetDef<Row>; 0] = [];
    let state = FilterState::new(YearRange::new(2021, 2019));
    assert!(filter_rows(&rows, |r| r.year, &facets, &state).is_empty());
}

#[test]
fn test_filtered_rows_keep_input_order() {
    let rows = rows();
    let facets = [FacetDef::required("sex", "Sex", sex as fn(&Row) -> &str)];
    let state = FilterState::new(YearRange::new(2019, 2021))
        .with_facet("sex", FacetSelection::with_values(SelectionMode::Required, ["w"]));
    let years: Vec<i32> = filter_rows(&rows, |r| r.year, &facets, &state)
        .iter()
        .map(|r| r.year)
        .collect();
    assert_eq!(years, [2019, 2021]);
}

#[test]
fn test_default_filters_select_required_categories() {
    let session = dogs_session();
    let filters = session.filters();
    assert_eq!(filters.years, YearRange::new(2019, 2021));

    let owner_sex = filters.selection("owner_sex").unwrap();
    assert_eq!(owner_sex.mode, SelectionMode::Required);
    assert_eq!(owner_sex.selected.len(), 2);

    let kreis = filters.selection("kreis").unwrap();
    assert_eq!(kreis.mode, SelectionMode::Optional);
    assert!(kreis.selected.is_empty());
    assert_eq!(session.filtered().len(), session.rows().len());
}

#[test]
fn test_toggle_required_value() {
    let mut session = dogs_session();
    assert!(session.toggle("owner_sex", "männlich"));
    assert!(session.filtered().iter().all(|r| r.owner_sex == "weiblich"));
    assert!(session.toggle("owner_sex", "männlich"));
    assert_eq!(session.filtered().len(), session.rows().len());
}

#[test]
fn test_unknown_facet_is_rejected() {
    let mut session = dogs_session();
    assert!(!session.select("colour", ["brown"]));
    assert!(!session.toggle("colour", "brown"));
}

#[test]
fn test_year_bounds_clamp_and_never_cross() {
    let mut session = migration_session();
    session.set_year_min(1990);
    assert_eq!(session.filters().years.min, 2018);

    session.set_year_max(2019);
    session.set_year_min(2020);
    assert_eq!(session.filters().years, YearRange::new(2019, 2019));

    session.set_year_max(2000);
    assert_eq!(session.filters().years, YearRange::new(2019, 2019));
}

#[test]
fn test_raw_year_range_may_invert() {
    let mut session = migration_session();
    session.set_year_range(2020, 2018);
    assert!(session.filtered().is_empty());

    session.reset_filters();
    assert_eq!(session.filtered().len(), 5);
}

#[test]
fn test_optional_selection_narrows() {
    let mut session = migration_session();
    session.select("kreis", ["Kreis 5"]);
    let rows = session.filtered();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| session.dataset().temporal(r) == 2019));
}

const SEXES: [&str; 3] = ["w", "m", "x"];
const KREISE: [&str; 4] = ["Kreis 1", "Kreis 2", "Kreis 3", "Kreis 4"];

#[derive(Debug)]
struct GenRow {
    id: usize,
    year: i32,
    sex: &'static str,
    kreis: &'static str,
}

fn gen_sex(r: &GenRow) -> &str {
    r.sex
}

fn gen_kreis(r: &GenRow) -> &str {
    r.kreis
}

fn generated_rows(seed: u64, n: usize) -> Vec<GenRow> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|id| GenRow {
            id,
            year: 2015 + rng.below(8) as i32,
            sex: SEXES[rng.below(3) as usize],
            kreis: KREISE[rng.below(4) as usize],
        })
        .collect()
}

fn gen_state(years: YearRange, sexes: &[&str], kreise: &[&str]) -> FilterState {
    FilterState::new(years)
        .with_facet(
            "sex",
            FacetSelection::with_values(SelectionMode::Required, sexes.iter().copied()),
        )
        .with_facet(
            "kreis",
            FacetSelection::with_values(SelectionMode::Optional, kreise.iter().copied()),
        )
}

fn passing_ids(rows: &[GenRow], state: &FilterState) -> BTreeSet<usize> {
    let facets = [
        FacetDef::required("sex", "Sex", gen_sex as fn(&GenRow) -> &str),
        FacetDef::optional("kreis", "Kreis", gen_kreis as fn(&GenRow) -> &str),
    ];
    filter_rows(rows, |r| r.year, &facets, state)
        .iter()
        .map(|r| r.id)
        .collect()
}

#[test]
fn test_widening_a_filter_only_adds_rows() {
    let ranges = [(2017, 2018), (2015, 2015), (2019, 2022), (2020, 2016)];
    let sex_choices: [&[&str]; 3] = [&[], &["w"], &["w", "m"]];
    // a non-empty optional selection; an empty one already admits everything
    let kreis_choices: [&[&str]; 2] = [&["Kreis 2"], &["Kreis 1", "Kreis 3"]];
    let mut grew = false;

    for seed in [1, 7, 42, 2024, 9001] {
        let rows = generated_rows(seed, 200);
        for (min, max) in ranges {
            let narrow = YearRange::new(min, max);
            for sexes in sex_choices {
                for kreise in kreis_choices {
                    let base = passing_ids(&rows, &gen_state(narrow, sexes, kreise));

                    let wide = YearRange::new(min - 1, max + 2);
                    let mut widened = vec![passing_ids(&rows, &gen_state(wide, sexes, kreise))];
                    for extra in SEXES {
                        let mut more = sexes.to_vec();
                        more.push(extra);
                        widened.push(passing_ids(&rows, &gen_state(narrow, &more, kreise)));
                    }
                    for extra in KREISE {
                        let mut more = kreise.to_vec();
                        more.push(extra);
                        widened.push(passing_ids(&rows, &gen_state(narrow, sexes, &more)));
                    }

                    for wider in &widened {
                        assert!(
                            base.is_subset(wider),
                            "seed {seed}, years {min}..={max}, sex {sexes:?}, kreis {kreise:?}"
                        );
                        grew |= wider.len() > base.len();
                    }
                }
            }
        }
    }
    assert!(grew);
}
