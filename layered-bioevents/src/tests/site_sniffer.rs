use layered_bionlp::TokenInterval;
use layered_bionlp_document::{labels, Document, Mention, MentionId, MentionStore, StoreDisplay};

use crate::{EventPipeline, PipelineConfig, SiteSniffer, Stage};

struct Sites {
    store: MentionStore,
    erk: MentionId,
    t202: MentionId,
    y204: MentionId,
    relation: MentionId,
    event: MentionId,
}

/// "ERK is phosphorylated at T202 and Y204", with the sites attached to ERK
/// by an EventSite relation.
fn sites() -> Sites {
    let mut store = MentionStore::new(Document::from_text("ERK is phosphorylated at T202 and Y204"));
    let protein = store.labels_for(labels::GENE_OR_GENE_PRODUCT);
    let erk = store.insert(Mention::text_bound(protein, 0, TokenInterval::singleton(0), "ner"));
    let site = store.labels_for(labels::SITE);
    let t202 = store.insert(Mention::text_bound(
        site.clone(),
        0,
        TokenInterval::singleton(4),
        "ner",
    ));
    let y204 = store.insert(Mention::text_bound(site, 0, TokenInterval::singleton(6), "ner"));
    let event_site = store.labels_for(labels::EVENT_SITE);
    let relation = store.insert(
        Mention::relation(event_site, 0, TokenInterval::new(0, 7), "site_rule")
            .with_argument("entity", vec![erk])
            .with_argument("site", vec![t202, y204]),
    );
    let phospho = store.labels_for("Phosphorylation");
    let trigger = store.insert(Mention::text_bound(
        phospho.clone(),
        0,
        TokenInterval::singleton(2),
        "rule",
    ));
    let event = store.insert(
        Mention::event(phospho, 0, TokenInterval::new(0, 7), trigger, "rule")
            .with_argument("theme", vec![erk]),
    );
    Sites {
        store,
        erk,
        t202,
        y204,
        relation,
        event,
    }
}

fn sniff_pipeline() -> EventPipeline {
    EventPipeline::from_config(
        &PipelineConfig::standard().with_stages(vec![Stage::StoreAttachments, Stage::SniffSites]),
    )
}

#[test]
fn two_sites_two_events() {
    let Sites {
        mut store,
        erk,
        t202,
        y204,
        relation,
        event,
    } = sites();

    let output = sniff_pipeline()
        .run(&mut store, &[erk, t202, y204, relation, event])
        .unwrap();

    assert_eq!(output.len(), 5);
    assert_eq!(&output[..3], &[erk, t202, y204]);
    let (first, second) = (output[3], output[4]);
    assert_eq!(store[first].argument("site"), &[t202]);
    assert_eq!(store[second].argument("site"), &[y204]);
    assert_eq!(store[first].argument("theme"), &[erk]);
    assert_eq!(store[second].argument("theme"), &[erk]);
    // Promoted sites are consumed from the entity
    assert!(store[erk].modifications().event_sites().is_empty());
    // The source event is not rewritten
    assert!(store[event].argument("site").is_empty());

    let display = StoreDisplay::new(&store, 0)
        .with(erk)
        .with(t202)
        .with(y204)
        .with_arguments(first)
        .with_arguments(second);

    insta::assert_snapshot!(display, @r###"
    ERK  is  phosphorylated  at  T202  and  Y204
    ╰─╯[A] Gene_or_gene_product
                                 ╰──╯[B] Site
                                            ╰──╯[C] Site
    ╰──────────────────────────────────────────╯Phosphorylation
      └─site─>[B]
      └─theme─>[A]
    ╰──────────────────────────────────────────╯Phosphorylation
      └─site─>[C]
      └─theme─>[A]
    "###);
}

#[test]
fn shared_entity_donates_sites_once() {
    let Sites {
        mut store,
        erk,
        t202,
        y204,
        relation,
        event,
    } = sites();
    let twin = store[event].clone();
    let twin = store.insert(twin);

    let output = sniff_pipeline()
        .run(&mut store, &[erk, t202, y204, relation, event, twin])
        .unwrap();

    // The second event sees ERK after its sites were consumed
    assert_eq!(output.len(), 6);
    assert_eq!(output[5], twin);
}

#[test]
fn non_simple_events_are_untouched() {
    let Sites {
        mut store,
        erk,
        relation,
        ..
    } = sites();
    crate::AttachmentStore::new().run(&mut store, &[relation]);

    let output = SiteSniffer::new().sniff(&mut store, &[erk]);

    assert_eq!(output, vec![erk]);
    assert_eq!(store[erk].modifications().event_sites().len(), 2);
}
