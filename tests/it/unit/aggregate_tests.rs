//! Unit tests for the aggregation engine over dataset rows.

use crate::helpers::{Lcg, dogs_session, slogans_session};
use civicboard::aggregate::{
    Average, count_by, cross_tabulate, dedupe_by_key, finite_sum, group_sum, is_blank_label, mean,
    unique_count, weighted_average,
};
use civicboard::datasets::dogs::{DogRow, owner_age_mid};

#[test]
fn test_group_sum_reindexes_missing_years_as_zero() {
    let session = dogs_session();
    let per_year = group_sum(session.rows(), |r| r.year, |r| r.count);
    assert_eq!(per_year.reindex(&[2018, 2019, 2020, 2021, 2022]), [0.0, 2.0, 3.0, 2.0, 0.0]);
}

#[test]
fn test_group_sum_keeps_first_seen_order() {
    let session = dogs_session();
    let per_kreis = group_sum(session.rows(), |r| r.kreis.as_str(), |r| r.count);
    let keys: Vec<&str> = per_kreis.keys().copied().collect();
    assert_eq!(keys, ["Kreis 3", "Kreis 7", "Kreis 11"]);
}

#[test]
fn test_weighted_average_skips_missing_values() {
    let session = dogs_session();
    let avg = weighted_average(session.rows(), |r| r.dog_age, |r| r.count);
    // (2 + 9 + 3 + 1·2 + 4) / 6
    assert_eq!(avg, Average::Defined(20.0 / 6.0));
}

#[test]
fn test_weighted_average_undefined_without_weight() {
    let rows: Vec<DogRow> = Vec::new();
    assert_eq!(weighted_average(&rows, |r| r.dog_age, |r| r.count), Average::Undefined);
    assert_eq!(mean([f64::NAN]), Average::Undefined);
    assert_eq!(mean([1.0, 2.0, f64::INFINITY]), Average::Defined(1.5));
}

#[test]
fn test_owner_age_midpoints_feed_average() {
    let session = dogs_session();
    let avg = weighted_average(session.rows(), |r| owner_age_mid(&r.owner_age), |r| r.count);
    // 34.5, 64.5, 34.5, 10·2, 84.5; the unknown band drops out
    assert_eq!(avg.value(), Some((34.5 + 64.5 + 34.5 + 20.0 + 84.5) / 6.0));
}

#[test]
fn test_top_n_excludes_blank_labels() {
    let session = dogs_session();
    let mut rows: Vec<DogRow> = session.rows().to_vec();
    rows[0].breed = "  ".to_string();
    let per_breed = group_sum(&rows, |r| r.breed.clone(), |r| r.count);
    let top = per_breed.top_n_excluding(2, is_blank_label);
    assert_eq!(top, [("Chihuahua".to_string(), 2.0), ("Mischling".to_string(), 2.0)]);
}

#[test]
fn test_finite_sum_ignores_nan() {
    assert_eq!(finite_sum([1.0, f64::NAN, 2.5]), 3.5);
}

#[test]
fn test_dedupe_and_unique_count() {
    let session = slogans_session();
    let issues = dedupe_by_key(session.rows(), |r| r.issue_id.as_str());
    assert_eq!(issues.len(), 3);
    assert_eq!(issues[0].party, "SP");
    assert_eq!(unique_count(session.rows(), |r| r.party.as_str()), 5);
}

#[test]
fn test_cross_tabulate_counts_within_domains() {
    let session = slogans_session();
    let parties = ["SP", "FDP"];
    let years = [2022, 2023];
    let matrix = cross_tabulate(session.rows(), &parties, &years, |r| r.party.as_str(), |r| r.year);
    assert_eq!(matrix.rows(), 2);
    assert_eq!(matrix.cols(), 2);
    assert_eq!(matrix.row(0), [1.0, 2.0]);
    assert_eq!(matrix.row(1), [1.0, 0.0]);
    assert_eq!(matrix.max_value(), Some(2.0));
    assert_eq!(matrix.col_labels(), ["2022", "2023"]);
}

#[test]
fn test_count_by_stance() {
    let session = slogans_session();
    let per_stance = count_by(session.rows(), |r| r.stance.as_str());
    assert_eq!(per_stance.get(&"JA"), Some(4.0));
    assert_eq!(per_stance.get(&"NEIN"), Some(2.0));
    assert_eq!(per_stance.get(&"FREI"), Some(1.0));
    assert!(!per_stance.contains(&"OTHER"));
}

fn generated_counts(seed: u64, n: usize) -> Vec<(u32, f64)> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|i| {
            let value = match i % 13 {
                0 => f64::NAN,
                7 => f64::INFINITY,
                _ => rng.below(1000) as f64 / 4.0,
            };
            (rng.below(50) as u32, value)
        })
        .collect()
}

#[test]
fn test_group_sum_conserves_total_for_any_key() {
    let keys: [fn(&(u32, f64)) -> u32; 4] = [
        |r| r.0,
        |r| r.0 % 3,
        |_| 0,
        |r| r.0 * 7 % 11,
    ];
    for seed in [3, 11, 99, 512, 4096] {
        let rows = generated_counts(seed, 150);
        let total = finite_sum(rows.iter().map(|r| r.1));
        for key in keys {
            let grouped = group_sum(&rows, |r| key(r), |r| r.1);
            assert!(
                (grouped.total() - total).abs() < 1e-9,
                "seed {seed}: {} != {}",
                grouped.total(),
                total
            );
        }
    }
}
