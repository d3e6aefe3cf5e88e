//! End-to-end conversion tests over the psalm fixture.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use usfm_prism_engine::{Format, transform};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn psalm_usj() -> Value {
    let usj = transform(&fixture("psalm.usfm"), Format::Usfm, Format::Usj).unwrap();
    serde_json::from_str(&usj).unwrap()
}

#[test]
fn usfm_deserializes_with_version_and_book() {
    let json = psalm_usj();
    assert_eq!(json["type"], "USJ");
    assert_eq!(json["version"], "3.0");
    assert_eq!(json["content"][0]["code"], "PSA");
    assert_eq!(json["content"][2]["marker"], "sts");
}

#[test]
fn usfm_word_level_attributes_survive() {
    let json = psalm_usj();
    // \w man|Man\w* in the first quoted line
    assert_eq!(json["content"][11]["content"][2]["default"], "Man");
    // \bd \+it does not\+it* ... nested char content
    assert_eq!(
        json["content"][11]["content"][4]["content"][0]["content"][0],
        "does not"
    );
    // \zaln-s milestone attributes in the alignment line
    assert_eq!(json["content"][13]["content"][6]["x-occurrence"], "1");
}

#[test]
fn verse_sids_are_stamped_on_the_way_out() {
    let json = psalm_usj();
    assert_eq!(json["content"][8]["sid"], "PSA 1");
    assert_eq!(json["content"][11]["content"][0]["sid"], "PSA 1:1");
}

#[test]
fn usfm_to_usx_contains_the_expected_elements() {
    let usx = transform(&fixture("psalm.usfm"), Format::Usfm, Format::Usx).unwrap();
    assert!(usx.starts_with("<usx version=\"3.0\">"));
    assert!(usx.contains(r#"<book code="PSA" style="id">unfoldingWord Literal Text</book>"#));
    assert!(usx.contains(r#"<para style="toc1">The Book of Psalms</para>"#));
    assert!(usx.contains(r#"<chapter number="1" style="c" sid="PSA 1"/>"#));
    assert!(usx.contains(r#"<char style="w" default="Man">man</char>"#));
    assert!(usx.contains(r#"<ms style="zaln-s" x-strong="G5043""#));
}

#[test]
fn usfm_round_trip_is_a_fixpoint() {
    let once = transform(&fixture("psalm.usfm"), Format::Usfm, Format::Usfm).unwrap();
    let twice = transform(&once, Format::Usfm, Format::Usfm).unwrap();
    assert_eq!(twice, once);
}

/// Converting through an intermediate format must preserve the USJ form.
#[rstest]
#[case(Format::Usx)]
#[case(Format::Usfm)]
#[case(Format::Usj)]
fn usj_survives_a_cycle_through(#[case] via: Format) {
    let usj = transform(&fixture("psalm.usfm"), Format::Usfm, Format::Usj).unwrap();
    let via_text = transform(&usj, Format::Usj, via).unwrap();
    let back = transform(&via_text, via, Format::Usj).unwrap();
    assert_eq!(back, usj);
}

#[test]
fn unsupported_conversions_fail_loudly() {
    let result = transform("not xml at all", Format::Usx, Format::Usj);
    assert!(result.is_err());
}
