use layered_bionlp::{DependencyGraph, Sentence, TokenInterval};
use layered_bionlp_document::{labels, Document, Mention, MentionId, MentionStore};

use crate::{flip_label, EventError, PolarityResolver};

/// One regulation over a parsed sentence: protein at `controller`, protein
/// at `controlled`, trigger at `trigger`.
fn regulation(
    words: &[&str],
    lemmas: &[&str],
    edges: Vec<(usize, usize, &str)>,
    label: &str,
    (controller, trigger, controlled): (usize, usize, usize),
) -> (MentionStore, MentionId) {
    let graph = DependencyGraph::from_edges(words.len(), edges).unwrap();
    let sentence = Sentence::new(words.iter().copied())
        .with_lemmas(lemmas.iter().copied())
        .with_dependencies(graph);
    let mut store = MentionStore::new(Document::new(vec![sentence]));

    let protein = store.labels_for(labels::GENE_OR_GENE_PRODUCT);
    let controller = store.insert(Mention::text_bound(
        protein.clone(),
        0,
        TokenInterval::singleton(controller),
        "ner",
    ));
    let controlled = store.insert(Mention::text_bound(
        protein,
        0,
        TokenInterval::singleton(controlled),
        "ner",
    ));
    let chain = store.labels_for(label);
    let trigger = store.insert(Mention::text_bound(
        chain.clone(),
        0,
        TokenInterval::singleton(trigger),
        "rule",
    ));
    let event = store.insert(
        Mention::event(chain, 0, TokenInterval::new(0, words.len()), trigger, "rule")
            .with_argument("controller", vec![controller])
            .with_argument("controlled", vec![controlled]),
    );
    (store, event)
}

#[test]
fn flip_is_an_involution() {
    for label in ["Positive_regulation", "Negative_activation", "Positive_", "Negative_x_y"] {
        assert_eq!(flip_label(&flip_label(label).unwrap()).unwrap(), label);
    }
}

#[test]
fn flip_requires_prefix() {
    for label in ["Regulation", "positive_regulation", ""] {
        assert!(matches!(
            flip_label(label),
            Err(EventError::MalformedLabel { .. })
        ));
    }
}

#[test]
fn negative_trigger_with_negated_controller_becomes_positive() {
    // "decreased MEK inhibits ERK"
    let (mut store, event) = regulation(
        &["decreased", "MEK", "inhibits", "ERK"],
        &["decrease", "MEK", "inhibit", "ERK"],
        vec![(2, 1, "nsubj"), (2, 3, "dobj"), (1, 0, "amod")],
        labels::NEGATIVE_REGULATION,
        (1, 2, 3),
    );

    let resolver = PolarityResolver::new();
    // "inhibits" is the trigger itself and does not count
    assert_eq!(resolver.negative_count(&store, event), 1);
    let resolved = resolver.resolve(&mut store, event).unwrap();

    assert_eq!(store[resolved].label(), labels::POSITIVE_REGULATION);
}

#[test]
fn even_negatives_keep_the_label() {
    // "reduced MEK increases degraded ERK"
    let (mut store, event) = regulation(
        &["reduced", "MEK", "increases", "degraded", "ERK"],
        &["reduce", "MEK", "increase", "degrade", "ERK"],
        vec![
            (2, 1, "nsubj"),
            (2, 4, "dobj"),
            (1, 0, "amod"),
            (4, 3, "amod"),
        ],
        labels::POSITIVE_REGULATION,
        (1, 2, 4),
    );

    let resolver = PolarityResolver::new();
    assert_eq!(resolver.negative_count(&store, event), 2);
    assert_eq!(resolver.resolve(&mut store, event).unwrap(), event);
}

#[test]
fn tied_paths_resolve_the_same_way_every_time() {
    // Two equally short routes from the trigger (0) to ERK (3): through
    // "blocks" (1) or through "via" (2).
    let (store, event) = regulation(
        &["activates", "blocks", "via", "ERK", "MEK"],
        &["activate", "block", "via", "ERK", "MEK"],
        vec![
            (0, 1, "dep"),
            (0, 2, "dep"),
            (1, 3, "dep"),
            (2, 3, "dep"),
            (0, 4, "nsubj"),
        ],
        labels::POSITIVE_ACTIVATION,
        (4, 0, 3),
    );

    let resolver = PolarityResolver::new();
    let first = resolver.negative_count(&store, event);
    for _ in 0..50 {
        assert_eq!(resolver.negative_count(&store, event), first);
    }
}

#[test]
fn unprefixed_label_with_odd_count_is_fatal() {
    let (mut store, event) = regulation(
        &["decreased", "MEK", "regulates", "ERK"],
        &["decrease", "MEK", "regulate", "ERK"],
        vec![(2, 1, "nsubj"), (2, 3, "dobj"), (1, 0, "amod")],
        labels::REGULATION,
        (1, 2, 3),
    );

    assert_eq!(
        PolarityResolver::new().resolve(&mut store, event),
        Err(EventError::MalformedLabel {
            label: labels::REGULATION.to_string()
        })
    );
}

#[test]
fn argument_in_another_sentence_counts_no_negatives() {
    // "MEK increases . decreased ERK", ERK reached through coreference
    let first = Sentence::new(["MEK", "increases"])
        .with_lemmas(["MEK", "increase"])
        .with_dependencies(DependencyGraph::from_edges(2, vec![(1, 0, "nsubj")]).unwrap());
    let second = Sentence::new(["decreased", "ERK"])
        .with_lemmas(["decrease", "ERK"])
        .with_dependencies(DependencyGraph::from_edges(2, vec![(1, 0, "amod")]).unwrap());
    let mut store = MentionStore::new(Document::new(vec![first, second]));

    let protein = store.labels_for(labels::GENE_OR_GENE_PRODUCT);
    let mek = store.insert(Mention::text_bound(
        protein.clone(),
        0,
        TokenInterval::singleton(0),
        "ner",
    ));
    let erk = store.insert(Mention::text_bound(protein, 1, TokenInterval::singleton(1), "coref"));
    let chain = store.labels_for(labels::POSITIVE_REGULATION);
    let trigger = store.insert(Mention::text_bound(
        chain.clone(),
        0,
        TokenInterval::singleton(1),
        "rule",
    ));
    let event = store.insert(
        Mention::event(chain, 0, TokenInterval::new(0, 2), trigger, "rule")
            .with_argument("controller", vec![mek])
            .with_argument("controlled", vec![erk]),
    );

    let resolver = PolarityResolver::new();
    assert_eq!(resolver.negative_count(&store, event), 0);
    assert_eq!(resolver.resolve(&mut store, event).unwrap(), event);
}
