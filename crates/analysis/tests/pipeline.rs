use chrono::NaiveDate;
use listing_analysis::{aggregate, classify, AnalysisEngine, PriceAccumulator, PriceProfile};
use listing_core::config::SourceConfig;
use listing_core::{Config, Listing, ListingKey, Price};
use listing_ingestion::{ListingGenerator, SkipRule};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 19).unwrap()
}

fn generated(seed: u64) -> ListingGenerator<StdRng> {
    ListingGenerator::seeded(SourceConfig::default(), as_of(), seed).unwrap()
}

#[test]
fn test_default_pipeline_invariants() {
    let engine = AnalysisEngine::new(&Config::default()).unwrap();
    let report = engine.run(generated(11), as_of()).unwrap();

    assert_eq!(report.listings, 500);

    let stats = report.statistics;
    assert!(stats.min <= stats.max);
    assert!(stats.min as f64 <= stats.mean && stats.mean <= stats.max as f64);
    assert!(stats.stddev >= 0.0);
    assert!(stats.min >= 500_000 && stats.max < 2_500_000);

    let outliers = report.outliers.unwrap();
    assert_eq!(outliers.normal_count + outliers.outlier_count, 500);

    // Only listings from the last 60 of 120 months are grouped
    let grouped: usize = report.groups.values().sum();
    assert!(grouped <= 500);
    assert!(report.groups.keys().all(|k| SourceConfig::default().categories.contains(k)));
}

#[test]
fn test_skip_rule_on_generated_source() {
    let rule = SkipRule::new(10, ListingKey::Brand, "Mazda").unwrap();

    let raw: Vec<Listing> = generated(5).take(2_000).collect();
    let filtered: Vec<Listing> = rule.apply(raw.clone().into_iter()).collect();

    let raw_mazda = raw.iter().filter(|l| l.brand == "Mazda").count();
    let kept_mazda = filtered.iter().filter(|l| l.brand == "Mazda").count();
    assert!(raw_mazda >= 10);
    assert_eq!(kept_mazda, raw_mazda - 10);
    assert_eq!(filtered.len(), raw.len() - 10);

    // Everything after the tenth Mazda passes through untouched
    let tenth = raw
        .iter()
        .enumerate()
        .filter(|(_, l)| l.brand == "Mazda")
        .nth(9)
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(&filtered[tenth + 1 - 10..], &raw[tenth + 1..]);
}

#[test]
fn test_reports_are_permutation_invariant() {
    let mut prices: Vec<Price> = generated(23).take(500).map(|l| l.price).collect();
    let stats = aggregate(prices.iter().copied());
    let outliers = classify(&prices).unwrap();

    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..5 {
        prices.shuffle(&mut rng);
        let shuffled_stats = aggregate(prices.iter().copied());
        assert_eq!(shuffled_stats.mean.to_bits(), stats.mean.to_bits());
        assert_eq!(shuffled_stats.stddev.to_bits(), stats.stddev.to_bits());
        assert_eq!(classify(&prices).unwrap(), outliers);
    }
}

#[test]
fn test_chunked_aggregation_matches() {
    let prices: Vec<Price> = generated(8).take(1_000).map(|l| l.price).collect();
    let whole = aggregate(prices.iter().copied());

    let merged = prices
        .chunks(37)
        .map(|chunk| chunk.iter().copied().collect::<PriceAccumulator>())
        .rev()
        .fold(PriceAccumulator::new(), PriceAccumulator::merge);

    assert_eq!(merged.finish(), whole);
}

#[test]
fn test_profile_matches_free_functions() {
    let listings: Vec<Listing> = generated(3).take(250).collect();
    let prices: Vec<Price> = listings.iter().map(|l| l.price).collect();
    let profile = PriceProfile::from_listings(&listings);

    assert_eq!(profile.statistics(), aggregate(prices.iter().copied()));
    assert_eq!(
        profile.outliers(&Default::default()).unwrap(),
        classify(&prices).unwrap()
    );
}
