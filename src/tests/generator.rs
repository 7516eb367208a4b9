use rand::{SeedableRng, rngs::StdRng};
use time::{Date, Month, PrimitiveDateTime};

use crate::{
    Decoder, ParseOutcome, Status, Validation,
    driver::run,
    generator::{Generator, Sample},
};

fn start() -> PrimitiveDateTime {
    Date::from_calendar_date(2013, Month::July, 2)
        .unwrap()
        .with_hms(10, 26, 42)
        .unwrap()
}

fn samples(seed: u64, count: usize) -> Vec<Sample> {
    Generator::new(StdRng::seed_from_u64(seed), start())
        .take(count)
        .collect()
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{actual} is not within {tolerance} of {expected}"
    );
}

#[test]
fn test_generated_sentences_decode() {
    for sample in samples(42, 300) {
        let outcome = Decoder::default().decode(&sample.sentence);

        let fix = match (sample.fix.status, outcome) {
            (Status::Void, ParseOutcome::NoFix) => continue,
            (Status::Active, ParseOutcome::FixObtained(fix)) => fix,
            (_, outcome) => panic!("{}: unexpected {outcome:?}", sample.sentence),
        };

        let expected = sample.fix;
        assert_eq!(
            (fix.hour, fix.minute, fix.second),
            (expected.hour, expected.minute, expected.second)
        );
        assert_eq!(
            (fix.day, fix.month, fix.year),
            (expected.day, expected.month, expected.year)
        );
        assert_close(fix.latitude, expected.latitude, 1e-7);
        assert_close(fix.longitude, expected.longitude, 1e-7);
        assert_close(fix.ground_speed, expected.ground_speed, 6e-4);
        assert_close(fix.heading, expected.heading, 6e-5);
        assert_close(fix.magnetic_variation, expected.magnetic_variation, 6e-3);
    }
}

#[test]
fn test_generated_sentences_in_range() {
    let strict = Decoder::new(Validation::Strict);

    for sample in samples(7, 300) {
        assert!(
            !strict.decode(&sample.sentence).is_malformed(),
            "{}",
            sample.sentence
        );
    }
}

#[test]
fn test_void_ratio() {
    let void = samples(1234, 300)
        .iter()
        .filter(|sample| sample.fix.status == Status::Void)
        .count();

    assert!((30..=90).contains(&void), "{void} void sentences");
}

#[test]
fn test_seed_is_reproducible() {
    let first: Vec<String> = samples(99, 20).into_iter().map(|s| s.sentence).collect();
    let second: Vec<String> = samples(99, 20).into_iter().map(|s| s.sentence).collect();

    assert_eq!(first, second);
}

#[test]
fn test_clock_advances() {
    let start = Date::from_calendar_date(2013, Month::July, 2)
        .unwrap()
        .with_hms(23, 59, 55)
        .unwrap();
    let mut generator = Generator::new(StdRng::seed_from_u64(3), start);

    let first = generator.next().unwrap();
    assert!(first.sentence.starts_with("$GPRMC,235955.00,"));
    assert!(first.sentence.contains(",020713,"));

    let second = generator.next().unwrap();
    assert!(second.sentence.starts_with("$GPRMC,000000.00,"));
    assert!(second.sentence.contains(",030713,"));
}

#[test]
fn test_run_over_generated_input() {
    let samples = samples(5, 300);
    let active = samples
        .iter()
        .filter(|sample| sample.fix.status == Status::Active)
        .count();

    let input: String = samples
        .iter()
        .map(|sample| format!("{}\r\n", sample.sentence))
        .collect();

    let mut output = Vec::new();
    let summary = run(input.as_bytes(), &mut output, &Decoder::default(), None).unwrap();

    assert_eq!(summary.sentences, 300);
    assert_eq!(summary.fixes, active);
    assert_eq!(summary.no_fix, 300 - active);
    assert_eq!(summary.malformed, 0);
    assert_eq!(
        String::from_utf8(output).unwrap().lines().count(),
        active
    );
}
