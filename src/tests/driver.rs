use log::LevelFilter;

use crate::{
    Decoder, Validation,
    driver::{Summary, read_sentence, run},
};

fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Error)
        .filter(Some("nmea0183_rmc"), LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

const INPUT: &str = concat!(
    "$GPRMC,102642.03,A,4813.7943164,S,01621.5693035,W,7.158,156.6705,020713,020.32,E*51\n",
    "$GPRMC,102642.03,V,4813.7943164,N,01621.5693035,E,7.158,156.6705,020713,020.32,E*49\n",
    "$GPRMC,102642.03,V,4813.7943164,N,01621.5693035,E,7.158,156.6705,020713,020.32,E*5E\n",
    "\n",
    "$GPRMC,102642.03,A,4813.7943164,N,01621.5693035,E,7.158,156.6705,020713,020.32,E*5E\r\n",
    "$GPRMC,102642.03,A,4813.7943164,I,01621.5693035,E,7.158,156.6705,020713,020.32,E*59",
);

#[test]
fn test_run() {
    init_logger();

    let mut output = Vec::new();
    let summary = run(INPUT.as_bytes(), &mut output, &Decoder::default(), None).unwrap();

    assert_eq!(
        summary,
        Summary {
            sentences: 5,
            fixes: 2,
            no_fix: 1,
            malformed: 2,
        }
    );
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "10:26:42, -48.229905, -16.359488\n10:26:42, 48.229905, 16.359488\n"
    );
}

#[test]
fn test_run_max_fixes() {
    init_logger();

    let mut output = Vec::new();
    let summary = run(INPUT.as_bytes(), &mut output, &Decoder::default(), Some(1)).unwrap();

    assert_eq!(summary.sentences, 1);
    assert_eq!(summary.fixes, 1);
    assert_eq!(output.iter().filter(|&&b| b == b'\n').count(), 1);

    let mut output = Vec::new();
    let summary = run(INPUT.as_bytes(), &mut output, &Decoder::default(), Some(0)).unwrap();

    assert_eq!(summary, Summary::default());
    assert!(output.is_empty());
}

#[test]
fn test_run_strict() {
    init_logger();

    let input = "$GPRMC,242642.03,A,4813.7943164,N,01621.5693035,E,7.158,156.6705,020713,020.32,E*59\n";

    let mut output = Vec::new();
    let summary = run(input.as_bytes(), &mut output, &Decoder::default(), None).unwrap();
    assert_eq!(summary.fixes, 1);

    let mut output = Vec::new();
    let decoder = Decoder::new(Validation::Strict);
    let summary = run(input.as_bytes(), &mut output, &decoder, None).unwrap();
    assert_eq!(summary.malformed, 1);
    assert!(output.is_empty());
}

#[test]
fn test_read_sentence_keeps_last_character() {
    let mut buf = Vec::new();

    let mut input = &b"$GPRMC*51"[..];
    assert_eq!(
        read_sentence(&mut input, &mut buf).unwrap(),
        Some(&b"$GPRMC*51"[..])
    );

    let mut input = &b"$GPRMC*51\n"[..];
    assert_eq!(
        read_sentence(&mut input, &mut buf).unwrap(),
        Some(&b"$GPRMC*51"[..])
    );

    let mut input = &b"\r\n"[..];
    assert_eq!(read_sentence(&mut input, &mut buf).unwrap(), Some(&b""[..]));

    // a lone carriage return is not a terminator
    let mut input = &b"$GPRMC*51\r"[..];
    assert_eq!(
        read_sentence(&mut input, &mut buf).unwrap(),
        Some(&b"$GPRMC*51\r"[..])
    );

    let mut input = &b""[..];
    assert_eq!(read_sentence(&mut input, &mut buf).unwrap(), None);
}
