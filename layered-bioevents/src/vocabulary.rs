//! Process-wide lexical tables.

use layered_bionlp_document::PtmKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// Lemma stems that reverse the sense of a regulation when they sit on the
/// path between trigger and argument.
static SEMANTIC_NEGATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:attenu|block|deactiv|decreas|degrad|delet|diminish|disrupt|impair|imped|inhibit|knockdown|knockout|limit|loss|lower|negat|reduc|reliev|repress|restrict|revers|silenc|slow|starv|suppress|supress)",
    )
    .expect("Invalid semantic negative regex")
});

/// Lemmas that negate the event they depend on or govern.
const NEGATION_WORDS: &[&str] = &[
    "not", "no", "n't", "never", "neither", "nor", "none", "fail", "lack", "absence", "without",
];

/// Lemmas that mark an event as speculative.
const HEDGE_WORDS: &[&str] = &[
    "may",
    "might",
    "could",
    "can",
    "suggest",
    "hypothesize",
    "hypothesis",
    "propose",
    "possible",
    "possibly",
    "potential",
    "potentially",
    "whether",
    "likely",
    "unknown",
];

/// Modification stems, "de-" forms listed before their bare counterparts.
const PTM_STEMS: &[(&str, PtmKind)] = &[
    ("deacetylat", PtmKind::Deacetylation),
    ("acetylat", PtmKind::Acetylation),
    ("defarnesylat", PtmKind::Defarnesylation),
    ("farnesylat", PtmKind::Farnesylation),
    ("deglycosylat", PtmKind::Deglycosylation),
    ("glycosylat", PtmKind::Glycosylation),
    ("dehydrolys", PtmKind::Dehydrolysis),
    ("hydrolys", PtmKind::Hydrolysis),
    ("dehydroxylat", PtmKind::Dehydroxylation),
    ("hydroxylat", PtmKind::Hydroxylation),
    ("demethylat", PtmKind::Demethylation),
    ("methylat", PtmKind::Methylation),
    ("dephosphorylat", PtmKind::Dephosphorylation),
    ("phosphorylat", PtmKind::Phosphorylation),
    ("deribosylat", PtmKind::Deribosylation),
    ("ribosylat", PtmKind::Ribosylation),
    ("desumoylat", PtmKind::Desumoylation),
    ("sumoylat", PtmKind::Sumoylation),
    ("deubiquitinat", PtmKind::Deubiquitination),
    ("ubiquitinat", PtmKind::Ubiquitination),
];

pub fn is_semantic_negative(lemma: &str) -> bool {
    SEMANTIC_NEGATIVE.is_match(lemma)
}

pub fn is_negation_word(lemma: &str) -> bool {
    NEGATION_WORDS.iter().any(|w| w.eq_ignore_ascii_case(lemma))
}

pub fn is_hedge_word(lemma: &str) -> bool {
    HEDGE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(lemma))
}

/// Modification kind named by free text ("phosphorylated", "de-ubiquitination").
/// `None` when the text names no known modification.
pub fn ptm_kind_from_text(text: &str) -> Option<PtmKind> {
    let normalized = text.to_lowercase().replace('-', "");
    PTM_STEMS
        .iter()
        .find(|(stem, _)| normalized.contains(stem))
        .map(|(_, kind)| kind.clone())
}

/// Modification kind for an event label; labels outside the vocabulary
/// (e.g. "Translocation") are carried through as [`PtmKind::Other`].
pub fn ptm_kind_for_label(label: &str) -> PtmKind {
    ptm_kind_from_text(label).unwrap_or_else(|| PtmKind::Other(label.to_string()))
}

pub fn is_ubiquitin(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("ubiquitin")
}
