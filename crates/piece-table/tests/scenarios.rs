//! Concrete editing scenarios and boundary behaviour.

use piece_table::{Document, DocumentConfig, Error};
use pretty_assertions::assert_eq;

fn text(doc: &Document) -> String {
    String::from_utf8(doc.to_bytes()).expect("utf-8")
}

#[test]
fn test_hello_world_edit_undo_redo() {
    let mut doc = Document::from_text("hello world");
    assert_eq!(doc.len(), 11);

    doc.insert(5, b",").unwrap();
    assert_eq!(text(&doc), "hello, world");
    assert_eq!(doc.len(), 12);

    doc.delete(0, 6).unwrap();
    assert_eq!(text(&doc), " world");
    assert_eq!(doc.len(), 6);

    assert!(doc.undo());
    assert_eq!(text(&doc), "hello, world");
    assert!(doc.undo());
    assert_eq!(text(&doc), "hello world");
    assert_eq!(doc.len(), 11);

    assert!(doc.redo());
    assert!(doc.redo());
    assert_eq!(text(&doc), " world");
    assert_eq!(doc.len(), 6);
    doc.check_invariants();
}

#[test]
fn test_typing_into_empty_document() {
    let mut doc = Document::new();
    doc.insert(0, b"ab").unwrap();
    doc.insert(2, b"cd").unwrap();
    doc.insert(1, b"XY").unwrap();
    assert_eq!(text(&doc), "aXYbcd");
    doc.check_invariants();
}

#[test]
fn test_typing_into_empty_document_without_coalescing() {
    let config = DocumentConfig::default().with_coalesce_appends(false);
    let mut doc = Document::with_config(config);
    doc.insert(0, b"ab").unwrap();
    doc.insert(2, b"cd").unwrap();
    doc.insert(1, b"XY").unwrap();
    assert_eq!(text(&doc), "aXYbcd");
    assert_eq!(doc.piece_count(), 4);
    doc.check_invariants();
}

#[test]
fn test_insert_at_end_appends() {
    let mut doc = Document::from_text("abc");
    doc.insert(doc.len(), b"def").unwrap();
    assert_eq!(text(&doc), "abcdef");
    assert_eq!(doc.len(), 6);
}

#[test]
fn test_insert_at_start() {
    let mut doc = Document::from_text("World");
    doc.insert(0, b"Hello, ").unwrap();
    assert_eq!(text(&doc), "Hello, World");
}

#[test]
fn test_first_insert_into_empty_document_is_one_piece() {
    let mut doc = Document::new();
    doc.insert(0, b"only").unwrap();
    assert_eq!(doc.piece_count(), 1);
    assert_eq!(text(&doc), "only");
}

#[test]
fn test_delete_whole_document() {
    let mut doc = Document::from_text("Hello, World");
    doc.insert(5, b"!!").unwrap();
    doc.delete(0, doc.len()).unwrap();
    assert!(doc.is_empty());
    assert_eq!(doc.len(), 0);
    assert_eq!(doc.to_bytes(), b"");
    doc.check_invariants();

    // The emptied document accepts new text.
    doc.insert(0, b"again").unwrap();
    assert_eq!(text(&doc), "again");
}

#[test]
fn test_delete_at_start_middle_end() {
    let mut doc = Document::from_text("Hello, World");
    doc.delete(5, 2).unwrap();
    assert_eq!(text(&doc), "HelloWorld");
    doc.delete(0, 1).unwrap();
    assert_eq!(text(&doc), "elloWorld");
    doc.delete(8, 1).unwrap();
    assert_eq!(text(&doc), "elloWorl");
    doc.check_invariants();
}

#[test]
fn test_multiple_operations() {
    let mut doc = Document::from_text("Hello");
    doc.insert(5, b" World").unwrap();
    doc.insert(5, b",").unwrap();
    doc.delete(0, 7).unwrap();
    doc.insert(0, b"Hi, ").unwrap();
    assert_eq!(text(&doc), "Hi, World");
    doc.check_invariants();
}

#[test]
fn test_failed_edits_leave_document_untouched() {
    let mut doc = Document::from_text("abc");
    doc.insert(1, b"x").unwrap();
    let before = doc.to_bytes();

    assert!(matches!(doc.insert(5, b"y"), Err(Error::OutOfRange { .. })));
    assert!(matches!(doc.delete(2, 3), Err(Error::OutOfRange { .. })));

    assert_eq!(doc.to_bytes(), before);
    assert_eq!(doc.undo_depth(), 1);
    assert_eq!(doc.redo_depth(), 0);
    doc.check_invariants();
}

#[test]
fn test_deleted_text_stays_in_add_store() {
    let mut doc = Document::from_text("abc");
    doc.insert(3, b"12345").unwrap();
    let add_len = doc.add_store_len();
    doc.delete(3, 5).unwrap();
    assert_eq!(doc.add_store_len(), add_len);
    assert_eq!(text(&doc), "abc");
}

#[test]
fn test_span_traversal_matches_content() {
    let mut doc = Document::from_text("0123456789");
    doc.insert(4, b"ab").unwrap();
    doc.delete(1, 2).unwrap();

    let mut rebuilt = Vec::new();
    for span in doc.spans() {
        rebuilt.extend_from_slice(doc.stores().read(span.store, span.offset, span.len));
    }
    assert_eq!(rebuilt, doc.to_bytes());
    assert_eq!(doc.spans().map(|s| s.len).sum::<usize>(), doc.len());
}
