//! Tests for text positioning, measurement, showing, and labels.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use escriba_core::content::{Content, LabelOptions, TextAlign, TextOptions, Underline};
use escriba_core::error::PdfError;
use escriba_core::font::{FontRef, SimpleFont};
use escriba_core::model::color::ColorSpec;
use escriba_core::model::objects::ObjRef;
use escriba_core::model::state::TextStatePatch;

const EPS: f64 = 1e-9;

/// 500/1000 em per glyph, zero-width space, explicit underline metrics.
fn metrics_font() -> FontRef {
    Rc::new(
        SimpleFont::new("F1", ObjRef::new(7, 0))
            .with_default_width(500.0)
            .with_width(' ', 0.0)
            .with_underline(-100.0, 50.0),
    )
}

#[test]
fn test_advancewidth_of_empty_text_is_zero() {
    let mut content = Content::new();
    content.font(metrics_font(), 10.0).unwrap();
    assert_eq!(content.advancewidth("").unwrap(), 0.0);
}

#[test]
fn test_advancewidth_of_lone_space_is_the_wordspace() {
    let mut content = Content::new();
    content.font(metrics_font(), 10.0).unwrap();
    content.wordspace(4.0);
    // Zero glyph width, one space, no inter-character gap.
    assert!((content.advancewidth(" ").unwrap() - 4.0).abs() < EPS);
}

#[test]
fn test_advancewidth_combines_spacing_terms() {
    let mut content = Content::new();
    content.font(metrics_font(), 10.0).unwrap();
    content.charspace(1.0).wordspace(2.0).hscale(50.0);
    // "a b": glyphs 2*5 + space 0, wordspace 2, charspace 2*1, halved.
    let width = content.advancewidth("a b").unwrap();
    assert!((width - (10.0 + 2.0 + 2.0) * 0.5).abs() < EPS);
}

#[test]
fn test_advancewidth_overrides() {
    let mut content = Content::new();
    content.font(metrics_font(), 10.0).unwrap();
    let width = content
        .advancewidth_with(
            "ab",
            &TextStatePatch {
                font: Some((metrics_font(), 20.0)),
                ..TextStatePatch::default()
            },
        )
        .unwrap();
    assert!((width - 20.0).abs() < EPS);
}

#[test]
fn test_text_advances_and_returns_width() {
    let mut content = Content::new();
    content.textstart();
    content.font(metrics_font(), 10.0).unwrap();
    content.translate(100.0, 700.0);
    let width = content.text("ab").unwrap();
    assert!((width - 10.0).abs() < EPS);
    let (x, y) = content.textpos();
    assert!((x - 110.0).abs() < EPS);
    assert!((y - 700.0).abs() < EPS);
}

#[test]
fn test_distance_and_line_advances() {
    let mut content = Content::new();
    content.leading(12.0);
    content.distance(20.0, -5.0);
    assert_eq!(content.textpos(), (20.0, -5.0));

    // Plain line advance drops the leading.
    content.cr(None);
    assert_eq!(content.textpos(), (0.0, -17.0));

    // Zero offset returns to the line start: overprint.
    content.cr(Some(0.0));
    assert_eq!(content.textpos(), (0.0, -17.0));

    // Explicit offset ignores the leading.
    content.cr(Some(-3.0));
    assert_eq!(content.textpos(), (0.0, -20.0));
}

#[test]
fn test_cr_operator_forms() {
    let mut content = Content::new();
    content.leading(12.0);
    content.cr(None).cr(Some(0.0)).cr(Some(-8.0));
    assert_eq!(content.stream(), "12 TL T* 0 0 Td 0 -8 Td ");
}

#[test]
fn test_nl_indent_is_in_hundredths() {
    let mut content = Content::new();
    content.nl(4.0);
    assert_eq!(content.stream(), "T* [-40] TJ ");
}

#[test]
fn test_text_indent_writes_compensating_kern() {
    let mut content = Content::new();
    content.textstart();
    content.font(metrics_font(), 10.0).unwrap();
    let width = content
        .text_with(
            "ab",
            &TextOptions {
                indent: Some(5.0),
                ..TextOptions::default()
            },
        )
        .unwrap();
    // Advance includes the indent; the kern is -indent in thousandths.
    assert!((width - 15.0).abs() < EPS);
    assert!(content.stream().contains("[-500 (ab)] TJ"));
    assert!((content.textpos().0 - 15.0).abs() < EPS);
}

#[test]
fn test_underline_is_stroked_after_the_text_object() {
    let mut content = Content::new();
    content.textstart();
    content.font(metrics_font(), 10.0).unwrap();
    content
        .text_with(
            "ab",
            &TextOptions {
                underline: Some(Underline::auto()),
                ..TextOptions::default()
            },
        )
        .unwrap();

    // Underline metrics scale with the font size: -100/1000 * 10 below
    // the baseline, 50/1000 * 10 thick.
    assert!(!content.stream().contains(" m "));
    let post = content.post_stream().to_string();
    assert!(post.contains("0 G"));
    assert!(post.contains("0.5 w"));
    assert!(post.contains("0 -1 m"));
    assert!(post.contains("10 -1 l"));
    assert!(post.ends_with("S Q "));

    content.textend();
    assert!(content.stream().contains("ET q 0 G 0.5 w 0 -1 m 10 -1 l S Q "));
    assert_eq!(content.post_stream(), "");
}

#[test]
fn test_stacked_underlines_spread_out() {
    let mut content = Content::new();
    content.textstart();
    content.font(metrics_font(), 10.0).unwrap();
    content
        .text_with(
            "ab",
            &TextOptions {
                underline: Some(Underline {
                    bands: vec![Default::default(), Default::default()],
                }),
                ..TextOptions::default()
            },
        )
        .unwrap();
    let post = content.post_stream();
    assert!(post.contains("0 -1 m"));
    assert!(post.contains("0 -2 m"));
}

#[test]
fn test_explicit_underline_band() {
    let mut content = Content::new();
    content.textstart();
    content.font(metrics_font(), 10.0).unwrap();
    content
        .text_with(
            "ab",
            &TextOptions {
                underline: Some(Underline::single(2.0, 0.25)),
                ..TextOptions::default()
            },
        )
        .unwrap();
    let post = content.post_stream();
    assert!(post.contains("0.25 w"));
    assert!(post.contains("0 -2 m"));
}

#[test]
fn test_text_errors_without_font() {
    let mut content = Content::new();
    content.textstart();
    assert!(matches!(content.text("x"), Err(PdfError::FontNotSet)));
    assert!(matches!(content.advancewidth("x"), Err(PdfError::FontNotSet)));
    assert!(matches!(
        content.font(metrics_font(), f64::NAN),
        Err(PdfError::MissingFontSize)
    ));
}

#[test]
fn test_text_center_and_right_shift_by_width() {
    let mut content = Content::new();
    content.textstart();
    content.font(metrics_font(), 10.0).unwrap();
    content.text_center("ab").unwrap();
    assert!(content.stream().contains("[500 (ab)] TJ"));

    let mut content = Content::new();
    content.textstart();
    content.font(metrics_font(), 10.0).unwrap();
    content.text_right("ab").unwrap();
    assert!(content.stream().contains("[1000 (ab)] TJ"));
}

#[test]
fn test_textlabel_is_self_contained() {
    let mut content = Content::new();
    content.charspace(1.5);
    let width = content
        .textlabel(
            (100.0, 200.0),
            metrics_font(),
            12.0,
            "hi",
            &LabelOptions::default(),
        )
        .unwrap();
    assert!(width > 0.0);

    let stream = content.stream();
    assert!(stream.contains("q BT "));
    assert!(stream.contains("1 0 0 1 100 200 Tm "));
    assert!(stream.contains("/F1 12 Tf "));
    assert!(stream.contains("(hi) Tj "));
    assert!(stream.contains("ET Q "));
    // The pre-label character spacing is reinstated after the label.
    assert!(stream.ends_with("1.5 Tc 0 Tw 100 Tz 0 TL 0 Ts 0 Tr "));
    assert_eq!(content.text_state().charspace, 1.5);
}

#[test]
fn test_textlabel_rotation_and_alignment() {
    let mut content = Content::new();
    content
        .textlabel(
            (50.0, 50.0),
            metrics_font(),
            10.0,
            "ab",
            &LabelOptions {
                rotate: 90.0,
                align: TextAlign::Center,
                color: Some(ColorSpec::Rgb(1.0, 0.0, 0.0)),
                ..LabelOptions::default()
            },
        )
        .unwrap();
    let stream = content.stream();
    assert!(stream.contains("0 1 -1 0 50 50 Tm "));
    assert!(stream.contains("1 0 0 rg "));
    assert!(stream.contains("[500 (ab)] TJ"));
}
