use crate::{Decoder, Error, Field, ParseOutcome, Validation};

const STRICT: Decoder = Decoder::new(Validation::Strict);

#[test]
fn test_strict_accepts_valid() {
    let sentence =
        "$GPRMC,102642.03,A,4813.7943164,S,01621.5693035,W,7.158,156.6705,020713,020.32,E*51";
    assert!(STRICT.decode(sentence).is_fix());
    assert_eq!(STRICT.decode(sentence), Decoder::default().decode(sentence));
}

#[test]
fn test_strict_accepts_limits() {
    let sentence = "$GPRMC,235959.99,A,9000.0000,S,18000.0000,W,0.0,359.9999,311299,180.0,W*73";
    let fix = *STRICT.decode(sentence).fix().unwrap();

    assert_eq!(fix.latitude, -90.0);
    assert_eq!(fix.longitude, -180.0);
    assert_eq!(fix.magnetic_variation, -180.0);
}

#[test]
fn test_strict_rejects_out_of_range() {
    let cases = [
        (
            "$GPRMC,242642.03,A,4813.7943164,N,01621.5693035,E,7.158,156.6705,020713,020.32,E*59",
            Field::Time,
        ),
        ("$GPRMC,102672.03,V,,,,,,,,,*1C", Field::Time),
        (
            "$GPRMC,102642.03,A,4861.0000,N,01621.5693035,E,7.158,156.6705,020713,020.32,E*61",
            Field::Latitude,
        ),
        (
            "$GPRMC,102642.03,A,9130.0000,N,01621.5693035,E,7.158,156.6705,020713,020.32,E*61",
            Field::Latitude,
        ),
        (
            "$GPRMC,102642.03,A,4813.7943164,N,18100.0000,W,7.158,156.6705,020713,020.32,E*7F",
            Field::Longitude,
        ),
        (
            "$GPRMC,102642.03,A,4813.7943164,N,01621.5693035,E,7.158,360.0,020713,020.32,E*6D",
            Field::Heading,
        ),
        (
            "$GPRMC,102642.03,A,4813.7943164,N,01621.5693035,E,7.158,156.6705,000713,020.32,E*5C",
            Field::Date,
        ),
        (
            "$GPRMC,102642.03,A,4813.7943164,N,01621.5693035,E,7.158,156.6705,021313,020.32,E*5B",
            Field::Date,
        ),
        (
            "$GPRMC,102642.03,A,4813.7943164,N,01621.5693035,E,7.158,156.6705,020713,181.0,W*77",
            Field::MagneticVariation,
        ),
    ];

    for (sentence, field) in cases {
        assert_eq!(
            STRICT.try_decode(sentence),
            Err(Error::OutOfRange(field)),
            "sentence: {sentence}"
        );
        assert_eq!(STRICT.decode(sentence), ParseOutcome::Malformed);
        assert!(!Decoder::default().decode(sentence).is_malformed());
    }
}

#[test]
fn test_strict_keeps_syntax_errors() {
    let sentence =
        "$GPRMC,102642.03,A,4813.7943164,I,01621.5693035,E,7.158,156.6705,020713,020.32,E*59";
    assert_eq!(
        STRICT.try_decode(sentence),
        Err(Error::DirectionInvalid(Field::LatitudeDirection))
    );
}
