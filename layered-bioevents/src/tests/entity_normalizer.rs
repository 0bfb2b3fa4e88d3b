use std::thread;

use layered_bionlp::TokenInterval;
use layered_bionlp_document::{
    labels, Document, Mention, MentionId, MentionStore, Modification, Ptm, PtmKind,
};

use crate::EntityNormalizer;

/// ERK, its phosphorylation, and `chain` nested regulations around it with
/// the outermost label first. Returns the store, ERK, and the outermost id.
fn nested(chain: &[&str]) -> (MentionStore, MentionId, MentionId) {
    let mut store = MentionStore::new(Document::from_text("MEK regulates ERK phosphorylation"));
    let protein = store.labels_for(labels::GENE_OR_GENE_PRODUCT);
    let mek = store.insert(Mention::text_bound(
        protein.clone(),
        0,
        TokenInterval::singleton(0),
        "ner",
    ));
    let erk = store.insert(Mention::text_bound(protein, 0, TokenInterval::singleton(2), "ner"));
    let phosphorylation = store.labels_for("Phosphorylation");
    let trigger = store.insert(Mention::text_bound(
        phosphorylation.clone(),
        0,
        TokenInterval::singleton(3),
        "rule",
    ));
    let mut current = store.insert(
        Mention::event(phosphorylation, 0, TokenInterval::new(2, 4), trigger, "rule")
            .with_argument("theme", vec![erk]),
    );

    for label in chain.iter().rev() {
        let labels = store.labels_for(label);
        current = store.insert(
            Mention::relation(labels, 0, TokenInterval::new(0, 4), "rule")
                .with_argument("controller", vec![mek])
                .with_argument("controlled", vec![current]),
        );
    }
    (store, erk, current)
}

fn negated(chain: &[&str]) -> bool {
    let (store, erk, outer) = nested(chain);
    let entity = EntityNormalizer::new()
        .convert_event_to_entity(&store, outer, true, false)
        .unwrap();

    assert_eq!(entity.tokens(), store[erk].tokens());
    let ptm = entity.modifications().ptms().next().unwrap();
    assert_eq!(ptm.kind, PtmKind::Phosphorylation);
    ptm.negated
}

#[test]
fn negative_anywhere_in_the_chain_negates() {
    let n = labels::NEGATIVE_REGULATION;
    let p = labels::POSITIVE_REGULATION;

    assert!(negated(&[n, p, n]));
    assert!(!negated(&[p, p, p]));
    assert!(negated(&[p, n, p]));
    assert!(negated(&[p, p, n]));
}

#[test]
fn event_ptm_replaces_existing_ptm_of_same_kind() {
    let (mut store, erk, outer) = nested(&[labels::NEGATIVE_REGULATION]);
    if let Some(erk) = store.get_mut(erk) {
        erk.modifications_mut()
            .insert(Modification::Ptm(Ptm::new(PtmKind::Phosphorylation)));
    }
    let phosphorylation = store[outer].argument("controlled")[0];
    let trigger = store[phosphorylation].trigger();

    let entity = EntityNormalizer::new()
        .convert_event_to_entity(&store, outer, true, false)
        .unwrap();

    let ptms: Vec<_> = entity.modifications().ptms().collect();
    assert_eq!(ptms.len(), 1);
    assert!(ptms[0].negated);
    assert_eq!(ptms[0].evidence, trigger);
    // The stored theme keeps its own PTM
    let stored: Vec<_> = store[erk].modifications().ptms().collect();
    assert!(!stored[0].negated);
}

#[test]
fn input_view_reaches_the_controller() {
    let (store, _, outer) = nested(&[labels::POSITIVE_REGULATION]);
    let entity = EntityNormalizer::new()
        .convert_event_to_entity(&store, outer, false, false)
        .unwrap();

    assert_eq!(store.document().text(0, entity.tokens()), "MEK");
    assert!(entity.modifications().is_empty());
}

#[test]
fn deep_chains_do_not_exhaust_the_stack() {
    let chain = vec![labels::POSITIVE_REGULATION; 5000];
    let (store, erk, outer) = nested(&chain);

    let entity = EntityNormalizer::new()
        .convert_event_to_entity(&store, outer, true, false)
        .unwrap();

    assert_eq!(entity.tokens(), store[erk].tokens());
}

#[test]
fn concurrent_conversions_match_sequential() {
    let (store, _, outer) = nested(&[
        labels::POSITIVE_REGULATION,
        labels::NEGATIVE_REGULATION,
        labels::POSITIVE_ACTIVATION,
    ]);
    let ids: Vec<MentionId> = store.ids().collect();
    let normalizer = EntityNormalizer::new();

    let sequential: Vec<_> = ids
        .iter()
        .map(|id| normalizer.convert_event_to_entity(&store, *id, true, false))
        .collect();

    let concurrent: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = ids
            .iter()
            .map(|id| {
                let store = &store;
                scope.spawn(move || normalizer.convert_event_to_entity(store, *id, true, false))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(sequential, concurrent);
    assert!(sequential.iter().any(|result| result.is_ok()));
    assert!(ids.contains(&outer));
}
