//! Tests for the content builder: buffers, modes, state mirror, and
//! finalization.

use std::io::Read;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use escriba_core::content::Content;
use escriba_core::encoder::{Compression, StreamFilter};
use escriba_core::font::SimpleFont;
use escriba_core::geometry::Transform;
use escriba_core::model::objects::{NamedObject, ObjRef};
use escriba_core::model::state::DashPattern;
use escriba_core::resources::{ResourceCategory, ResourceTable};

fn test_font() -> Rc<SimpleFont> {
    Rc::new(SimpleFont::new("F1", ObjRef::new(7, 0)))
}

#[test]
fn test_empty_stream_finishes_empty() {
    let encoded = Content::new().finish().unwrap();
    assert_eq!(encoded.data, b"");
    assert_eq!(encoded.filter, None);
}

#[test]
fn test_simple_page_scenario() {
    let mut content = Content::new();
    content
        .save()
        .linewidth(2.0)
        .strokecolor(0.5)
        .unwrap()
        .rect(72.0, 72.0, 100.0, 50.0)
        .stroke()
        .restore();
    assert_eq!(
        content.stream(),
        "q 2 w 0.5 G 72 72 100 50 re S Q "
    );
}

#[test]
fn test_absolute_transform_discards_history() {
    let mut content = Content::new();
    content.translate(10.0, 10.0).translate(10.0, 10.0);
    // Two absolute translations both write the same offset.
    assert_eq!(content.stream(), "1 0 0 1 10 10 cm 1 0 0 1 10 10 cm ");
    assert_eq!(content.transform_parts().translate, (10.0, 10.0));
}

#[test]
fn test_relative_transform_composes_with_history() {
    let mut content = Content::new();
    let step = Transform {
        translate: Some((10.0, 10.0)),
        ..Transform::default()
    };
    content.transform(step).transform_rel(step);
    assert_eq!(content.transform_parts().translate, (20.0, 20.0));
    assert_eq!(content.current_matrix().4, 20.0);
}

#[test]
fn test_relative_scale_multiplies() {
    let mut content = Content::new();
    content.scale(2.0, 2.0);
    content.transform_rel(Transform {
        scale: Some((3.0, 0.5)),
        rotate: Some(15.0),
        ..Transform::default()
    });
    assert_eq!(content.transform_parts().scale, (6.0, 1.0));
    assert_eq!(content.transform_parts().rotate, 15.0);
}

#[test]
fn test_transform_readback_round_trips() {
    let mut content = Content::new();
    content.transform(Transform {
        skew: Some((5.0, 0.0)),
        rotate: Some(30.0),
        translate: Some((7.0, 8.0)),
        ..Transform::default()
    });
    let parts = content.transform_parts();
    assert_eq!(parts.skew, (5.0, 0.0));
    assert_eq!(parts.rotate, 30.0);
    assert_eq!(parts.translate, (7.0, 8.0));
    // Omitted components read back as their identity values.
    assert_eq!(parts.scale, (1.0, 1.0));
}

#[test]
fn test_reads_never_write() {
    let mut content = Content::new();
    content.linewidth(3.0).linedash(DashPattern::equal(2.0));
    let before = content.stream().to_string();

    let _ = content.graphics_state();
    let _ = content.text_state();
    let _ = content.transform_parts();
    let _ = content.current_matrix();
    let _ = content.current_point();
    let _ = content.textpos();
    let _ = content.in_text();

    assert_eq!(content.stream(), before);
}

#[test]
fn test_text_object_defers_paths_until_close() {
    let mut content = Content::new();
    content.textstart();
    content.move_to(0.0, -2.0).line_to(50.0, -2.0).stroke();
    content.textend();
    assert_eq!(content.stream(), "BT ET 0 -2 m 50 -2 l S ");
}

#[test]
fn test_textstart_resets_text_scalars() {
    let mut content = Content::new();
    content
        .charspace(2.0)
        .wordspace(1.0)
        .hscale(50.0)
        .leading(14.0)
        .rise(4.0)
        .render(3);
    content.textstart().textend();
    content.textstart();
    let state = content.text_state();
    assert_eq!(state.charspace, 0.0);
    assert_eq!(state.wordspace, 0.0);
    assert_eq!(state.hscale, 100.0);
    assert_eq!(state.leading, 0.0);
    assert_eq!(state.rise, 0.0);
    assert_eq!(state.render, 0);
}

#[test]
fn test_mode_transitions_are_idempotent() {
    let mut content = Content::new();
    content.textend();
    assert_eq!(content.stream(), "");
    content.textstart().textstart();
    content.textend().textend();
    assert_eq!(content.stream(), "BT ET ");
}

#[test]
fn test_failed_operation_appends_nothing() {
    let mut content = Content::new();
    content.linewidth(1.5);
    let before = content.stream().to_string();

    assert!(content.circle((0.0, 0.0), 0.0).is_err());
    assert!(content.arc((0.0, 0.0), 5.0, 5.0, 90.0, 90.0, true).is_err());
    assert!(content.font(test_font(), 0.0).is_err());
    assert!(content.text("hello").is_err());

    assert_eq!(content.stream(), before);
    assert_eq!(content.post_stream(), "");
}

#[test]
fn test_shared_resources_across_streams() {
    let shared = ResourceTable::shared();
    let mut under = Content::with_resources(shared.clone());
    let mut over = Content::with_resources(shared.clone());

    under.font(test_font(), 12.0).unwrap();
    over.egstate(&NamedObject::new("GS1", ObjRef::new(12, 0)));

    let table = shared.borrow();
    assert!(table.contains(ResourceCategory::Font, "F1"));
    assert!(table.contains(ResourceCategory::ExtGState, "GS1"));
}

#[test]
fn test_first_registration_wins_by_default() {
    let shared = ResourceTable::shared();
    shared.borrow_mut().register(
        ResourceCategory::Font,
        "F1",
        escriba_core::model::objects::ResourceObject::Ref(ObjRef::new(1, 0)),
    );

    let mut content = Content::with_resources(shared.clone());
    content.font(test_font(), 12.0).unwrap();

    // The font op re-registers under the same name; the earlier entry stays.
    let table = shared.borrow();
    let Some(entry) = table.get(ResourceCategory::Font, "F1") else {
        panic!("font entry missing");
    };
    assert_eq!(
        entry,
        &escriba_core::model::objects::ResourceObject::Ref(ObjRef::new(1, 0))
    );
}

#[test]
fn test_finish_flate_round_trips() {
    let mut content = Content::new().with_compression(Compression::Flate);
    for i in 0..50 {
        content.move_to(f64::from(i), 0.0).line_to(f64::from(i), 100.0);
    }
    content.stroke();
    let expected = {
        let mut plain = Content::new();
        for i in 0..50 {
            plain.move_to(f64::from(i), 0.0).line_to(f64::from(i), 100.0);
        }
        plain.stroke();
        plain.stream().to_string()
    };

    let encoded = content.finish().unwrap();
    assert_eq!(encoded.filter, Some(StreamFilter::FlateDecode));
    assert!(encoded.data.len() < expected.len());

    let mut decoder = flate2::read::ZlibDecoder::new(&encoded.data[..]);
    let mut decompressed = String::new();
    decoder.read_to_string(&mut decompressed).unwrap();
    assert_eq!(decompressed, expected);
}

#[test]
fn test_finish_closes_text_and_flushes_underpaint() {
    let mut content = Content::new();
    content.textstart();
    content.rect(0.0, 0.0, 10.0, 10.0).fill(false);
    let encoded = content.finish().unwrap();
    assert_eq!(encoded.data, b"BT ET 0 0 10 10 re f ");
}
