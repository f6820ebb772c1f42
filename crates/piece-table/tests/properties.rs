//! Model-based properties: every operation sequence must agree with a flat
//! byte vector.

use piece_table::{Document, DocumentConfig};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert { at: usize, bytes: Vec<u8> },
    Delete { at: usize, len: usize },
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<usize>(), prop::collection::vec(any::<u8>(), 0..8))
            .prop_map(|(at, bytes)| Op::Insert { at, bytes }),
        3 => (any::<usize>(), 0usize..12).prop_map(|(at, len)| Op::Delete { at, len }),
        2 => Just(Op::Undo),
        1 => Just(Op::Redo),
    ]
}

/// Reference model with snapshot-based history.
#[derive(Default)]
struct Model {
    bytes: Vec<u8>,
    undo: Vec<Vec<u8>>,
    redo: Vec<Vec<u8>>,
}

impl Model {
    fn commit(&mut self, next: Vec<u8>) {
        self.undo.push(std::mem::replace(&mut self.bytes, next));
        self.redo.clear();
    }
}

fn run(initial: &[u8], ops: &[Op], config: DocumentConfig) -> Result<(), TestCaseError> {
    let mut doc = Document::from_bytes_with_config(initial.to_vec(), config);
    let mut model = Model {
        bytes: initial.to_vec(),
        ..Model::default()
    };

    for op in ops {
        match op {
            Op::Insert { at, bytes } => {
                // Map onto a valid offset most of the time; one in eight is
                // deliberately out of range.
                let offset = if at % 8 == 0 {
                    model.bytes.len() + 1 + at % 3
                } else {
                    at % (model.bytes.len() + 1)
                };
                let result = doc.insert(offset, bytes);
                if bytes.is_empty() {
                    prop_assert!(result.is_ok());
                } else if offset > model.bytes.len() {
                    prop_assert!(result.is_err());
                } else {
                    prop_assert!(result.is_ok());
                    let mut next = model.bytes.clone();
                    next.splice(offset..offset, bytes.iter().copied());
                    model.commit(next);
                }
            }
            Op::Delete { at, len } => {
                let offset = at % (model.bytes.len() + 2);
                let result = doc.delete(offset, *len);
                if *len == 0 {
                    prop_assert!(result.is_ok());
                } else if offset + len > model.bytes.len() {
                    prop_assert!(result.is_err());
                } else {
                    prop_assert!(result.is_ok());
                    let mut next = model.bytes.clone();
                    next.drain(offset..offset + len);
                    model.commit(next);
                }
            }
            Op::Undo => {
                let changed = doc.undo();
                prop_assert_eq!(changed, !model.undo.is_empty());
                if let Some(previous) = model.undo.pop() {
                    model.redo.push(std::mem::replace(&mut model.bytes, previous));
                }
            }
            Op::Redo => {
                let changed = doc.redo();
                prop_assert_eq!(changed, !model.redo.is_empty());
                if let Some(next) = model.redo.pop() {
                    model.undo.push(std::mem::replace(&mut model.bytes, next));
                }
            }
        }

        prop_assert_eq!(doc.to_bytes(), model.bytes.clone());
        prop_assert_eq!(doc.len(), model.bytes.len());
        prop_assert_eq!(doc.spans().map(|s| s.len).sum::<usize>(), doc.len());
        prop_assert_eq!(doc.is_empty(), model.bytes.is_empty());
        prop_assert_eq!(doc.undo_depth(), model.undo.len());
        prop_assert_eq!(doc.redo_depth(), model.redo.len());
    }

    doc.check_invariants();
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_matches_flat_model(
        initial in prop::collection::vec(any::<u8>(), 0..32),
        ops in prop::collection::vec(op_strategy(), 0..48),
    ) {
        run(&initial, &ops, DocumentConfig::default())?;
    }

    #[test]
    fn prop_matches_flat_model_without_coalescing(
        initial in prop::collection::vec(any::<u8>(), 0..32),
        ops in prop::collection::vec(op_strategy(), 0..48),
    ) {
        run(&initial, &ops, DocumentConfig::default().with_coalesce_appends(false))?;
    }

    #[test]
    fn prop_point_reads_match_flat_model(
        initial in prop::collection::vec(any::<u8>(), 1..32),
        inserts in prop::collection::vec((any::<usize>(), prop::collection::vec(any::<u8>(), 1..6)), 0..12),
    ) {
        let mut doc = Document::from_bytes(initial.clone());
        let mut model = initial;
        for (at, bytes) in inserts {
            let offset = at % (model.len() + 1);
            doc.insert(offset, &bytes).unwrap();
            model.splice(offset..offset, bytes);
        }
        for (offset, byte) in model.iter().enumerate() {
            prop_assert_eq!(doc.byte_at(offset).unwrap(), *byte);
        }
        let mid = model.len() / 2;
        prop_assert_eq!(doc.read_range(mid, model.len() - mid).unwrap(), model[mid..].to_vec());
    }
}
