use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use layered_bionlp::TokenInterval;
use unicode_width::UnicodeWidthStr;

use crate::{MentionId, MentionStore};

/// Convert a zero-based index to a base-26 label: A, B, ..., Z, AA, AB, ..., AZ, BA, ...
/// Similar to Excel column naming.
fn index_to_base26_label(mut n: usize) -> String {
    let mut result = String::new();
    loop {
        let remainder = n % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Internal representation of an included mention for display.
struct IncludedMention {
    range: (usize, usize),
    value: String,
    /// `(role, target token range)` pairs
    arguments: Vec<(String, (usize, usize))>,
    show_arguments: bool,
}

/// Text rendering of the mentions of one sentence, used by snapshot tests.
///
/// ```text
/// MEK  phosphorylates  ERK
/// ╰─╯[A] Gene_or_gene_product
///                      ╰─╯[B] Gene_or_gene_product
/// ╰──────────────────────╯Phosphorylation
///   └─cause─>[A]
///   └─theme─>[B]
/// ```
pub struct StoreDisplay<'a> {
    store: &'a MentionStore,
    sentence: usize,
    include_mentions: Vec<IncludedMention>,
}

impl<'a> std::fmt::Display for StoreDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SPACE_PADDING: usize = 2;
        let words = self
            .store
            .sentence(self.sentence)
            .map(|s| s.words())
            .unwrap_or(&[]);

        let mut token_idx_to_start_display_char_idx = Vec::new();
        let mut token_idx_to_end_display_char_idx = Vec::new();
        // write opening display text
        let mut opening_line = String::new();
        for (idx, word) in words.iter().enumerate() {
            if idx > 0 {
                opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
            }
            token_idx_to_start_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
            opening_line.push_str(word);
            token_idx_to_end_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
        }

        f.write_str(&opening_line)?;

        let span_labels = self.build_span_labels();

        for included in self.include_mentions.iter() {
            let (start, end) = included.range;
            // mentions past the end of the sentence are not drawable
            if end == 0 || end > words.len() || start >= end {
                continue;
            }
            f.write_char('\n')?;

            let start_char_idx = token_idx_to_start_display_char_idx[start];
            for _ in 0..start_char_idx {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;

            let end_char_idx = token_idx_to_end_display_char_idx[end - 1];
            let char_len = end_char_idx - start_char_idx;
            for _ in (start_char_idx + 1)..end_char_idx.saturating_sub(1) {
                f.write_char('─')?;
            }

            if char_len > 1 {
                f.write_char('╯')?;
            }

            if let Some(label) = span_labels.get(&included.range) {
                write!(f, "{} ", label)?;
            }

            f.write_str(&included.value)?;

            if included.show_arguments {
                for (role, target) in &included.arguments {
                    f.write_char('\n')?;
                    for _ in 0..start_char_idx + 2 {
                        f.write_char(' ')?;
                    }
                    let target_str = match span_labels.get(target) {
                        Some(label) => label.clone(),
                        None => format!("[{}..{}]", target.0, target.1),
                    };
                    write!(f, "└─{}─>{}", role, target_str)?;
                }
            }
        }

        Ok(())
    }
}

impl<'a> StoreDisplay<'a> {
    pub fn new(store: &'a MentionStore, sentence: usize) -> Self {
        StoreDisplay {
            store,
            sentence,
            include_mentions: Vec::new(),
        }
    }

    /// Build a map from included ranges to labels like "[A]", "[B]", etc.
    /// Only ranges that are targets of shown arguments get labels.
    fn build_span_labels(&self) -> HashMap<(usize, usize), String> {
        let mut target_ranges: Vec<(usize, usize)> = self
            .include_mentions
            .iter()
            .filter(|included| included.show_arguments)
            .flat_map(|included| included.arguments.iter().map(|(_, range)| *range))
            .collect();

        let included_ranges: HashSet<(usize, usize)> =
            self.include_mentions.iter().map(|included| included.range).collect();
        target_ranges.retain(|range| included_ranges.contains(range));

        target_ranges.sort();
        target_ranges.dedup();

        target_ranges
            .into_iter()
            .enumerate()
            .map(|(i, range)| (range, format!("[{}]", index_to_base26_label(i))))
            .collect()
    }

    fn push(&mut self, id: MentionId, show_arguments: bool) {
        let mention = match self.store.get(id) {
            Some(mention) if mention.sentence() == self.sentence => mention,
            _ => return,
        };

        let mut value = mention.label().to_string();
        for modification in mention.modifications() {
            value.push(' ');
            value.push_str(&modification.tag());
        }

        let arguments = mention
            .arguments()
            .iter()
            .flat_map(|(role, ids)| ids.iter().map(move |arg| (role, *arg)))
            .filter_map(|(role, arg)| {
                let target = self.store.get(arg)?;
                Some((role.clone(), range_of(target.tokens())))
            })
            .collect();

        self.include_mentions.push(IncludedMention {
            range: range_of(mention.tokens()),
            value,
            arguments,
            show_arguments,
        });
    }

    pub fn include(&mut self, id: MentionId) {
        self.push(id, false);
    }

    /// Include a mention and render its arguments as arrows below it.
    pub fn include_with_arguments(&mut self, id: MentionId) {
        self.push(id, true);
    }

    /// Takes self
    pub fn with(mut self, id: MentionId) -> Self {
        self.include(id);
        self
    }

    /// Takes self, includes arguments
    pub fn with_arguments(mut self, id: MentionId) -> Self {
        self.include_with_arguments(id);
        self
    }
}

fn range_of(tokens: TokenInterval) -> (usize, usize) {
    (tokens.start(), tokens.end())
}
