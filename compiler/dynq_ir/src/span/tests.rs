use super::*;

#[test]
fn merge_covers_both() {
    let merged = Span::new(4, 9).merge(Span::new(2, 6));
    assert_eq!(merged, Span::new(2, 9));
    assert_eq!(merged.len(), 7);
}

#[test]
fn point_is_empty() {
    assert!(Span::point(3).is_empty());
    assert!(!Span::new(3, 4).is_empty());
}

#[test]
fn try_from_range_rejects_huge_offsets() {
    let large = u32::MAX as usize + 1;
    assert_eq!(
        Span::try_from_range(large..large + 1),
        Err(SpanError::StartTooLarge(large))
    );
    assert_eq!(
        Span::try_from_range(0..large),
        Err(SpanError::EndTooLarge(large))
    );
    assert_eq!(Span::try_from_range(1..5), Ok(Span::new(1, 5)));
}

#[test]
fn slice_returns_covered_text() {
    let source = "Name == 'x'";
    assert_eq!(Span::new(0, 4).slice(source), "Name");
    assert_eq!(Span::new(8, 11).slice(source), "'x'");
    assert_eq!(Span::new(40, 44).slice(source), "");
}

#[test]
fn char_offset_counts_characters_not_bytes() {
    let source = "Größe > 1";
    // 'ö' and 'ß' are two bytes each, so '>' sits at byte 8 but char 6.
    let gt = source.find('>').map_or(0, |i| i as u32);
    assert_eq!(gt, 8);
    assert_eq!(Span::point(gt).char_offset(source), 6);
    assert_eq!(Span::point(0).char_offset(source), 0);
}
