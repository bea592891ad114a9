use composer_core::{
    default_resume, Document, DragGesture, ReorderEngine, ReorderPlan, Section, SectionId,
    SectionKind,
};
use std::collections::BTreeSet;

fn id(value: &str) -> SectionId {
    SectionId::new(value).unwrap()
}

fn numbered(count: usize) -> Document {
    Document::new(
        (0..count)
            .map(|index| {
                Section::new(
                    format!("s{index}"),
                    format!("Section {index}"),
                    SectionKind::Other,
                    format!("<p>{index}</p>"),
                )
                .unwrap()
            })
            .collect(),
    )
    .unwrap()
}

fn ids(document: &Document) -> Vec<String> {
    document.order().iter().map(|id| id.to_string()).collect()
}

/// Small deterministic generator so sequences are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next_index(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}

#[test]
fn reorder_sequences_preserve_id_set() {
    let original = numbered(7);
    let expected: BTreeSet<String> = ids(&original).into_iter().collect();
    let mut rng = Lcg(42);
    let mut document = original.clone();

    for _ in 0..500 {
        let source = format!("s{}", rng.next_index(8));
        let target = format!("s{}", rng.next_index(8));
        document = document.reorder(&source, &target);

        let current = ids(&document);
        assert_eq!(current.len(), expected.len());
        let set: BTreeSet<String> = current.into_iter().collect();
        assert_eq!(set, expected);
    }
    assert_eq!(ids(&original), ["s0", "s1", "s2", "s3", "s4", "s5", "s6"]);
}

#[test]
fn reorder_matches_remove_then_insert_for_every_pair() {
    let document = numbered(5);
    let base = ids(&document);

    for from in 0..base.len() {
        for to in 0..base.len() {
            if from == to {
                continue;
            }
            let mut expected = base.clone();
            let moved = expected.remove(from);
            expected.insert(to, moved);

            let next = document.reorder(&base[from], &base[to]);
            assert_eq!(ids(&next), expected, "move {from} -> {to}");
        }
    }
}

#[test]
fn move_shifts_intervening_sections_instead_of_swapping() {
    let document = numbered(5);
    let next = document.reorder("s0", "s3");
    assert_eq!(ids(&next), ["s1", "s2", "s3", "s0", "s4"]);
}

#[test]
fn reorder_guards_return_unchanged_document() {
    let document = default_resume();
    for (source, target) in [
        ("header", "header"),
        ("missing", "skills"),
        ("skills", "missing"),
        ("", "skills"),
    ] {
        let next = document.reorder(source, target);
        assert!(next.ptr_eq(&document), "{source} -> {target}");
        assert_eq!(next, document);
    }
}

#[test]
fn engine_uses_final_drop_target_only() {
    let engine = ReorderEngine::new();
    let document = default_resume();

    let gesture = DragGesture::new(id("skills"), Some(id("header")));
    let plan = engine.plan(&document, &gesture);
    assert!(plan.is_move());
    let next = engine.apply(&document, &plan);
    assert_eq!(ids(&next), ["skills", "header", "experience", "education"]);

    let cancelled = engine.plan(&document, &DragGesture::new(id("skills"), None));
    assert!(matches!(cancelled, ReorderPlan::NoOp(_)));
    assert!(engine.apply(&document, &cancelled).ptr_eq(&document));
}
