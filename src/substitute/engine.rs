//! Paragraph and document traversal for placeholder substitution.

use tracing::{debug, trace};

use super::map::{Entry, ReplacementMap};
use crate::ooxml::docx::{MutableDocument, MutableParagraph, MutableRun};

/// How placeholders are matched against run text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Replace only inside runs that contain the whole placeholder.
    ///
    /// A placeholder split across runs (for example `"[IP-ser"` + `"vidor]"`)
    /// is left in place.
    #[default]
    PerRun,
    /// Replace every occurrence in the paragraph text, including ones that
    /// straddle run boundaries.
    ///
    /// The replacement goes into the first touched run after its prefix,
    /// fully covered runs are emptied and the last touched run keeps only its
    /// suffix. Run count, order and formatting stay the same.
    AcrossRuns,
}

/// Counts of paragraphs whose text changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
    /// Paragraphs directly in the document body
    pub body_paragraphs: usize,
    /// Paragraphs inside cells of body-level tables
    pub table_paragraphs: usize,
}

impl SubstitutionReport {
    pub fn total(&self) -> usize {
        self.body_paragraphs + self.table_paragraphs
    }
}

/// Applies a [`ReplacementMap`] to paragraphs and documents.
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionEngine<'a> {
    map: &'a ReplacementMap,
    mode: MatchMode,
}

impl<'a> SubstitutionEngine<'a> {
    /// Create an engine in [`MatchMode::PerRun`].
    pub fn new(map: &'a ReplacementMap) -> Self {
        Self {
            map,
            mode: MatchMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Apply every placeholder, in map order, to one paragraph.
    ///
    /// Returns whether the paragraph text changed.
    pub fn apply_to_paragraph(&self, paragraph: &mut MutableParagraph) -> bool {
        let before = paragraph.text();
        match self.mode {
            MatchMode::PerRun => {
                for entry in self.map.entries() {
                    apply_per_run(paragraph, entry);
                }
            },
            MatchMode::AcrossRuns => apply_across_runs(paragraph, self.map.entries()),
        }
        paragraph.text() != before
    }

    /// Apply the map to every body paragraph and every paragraph of every
    /// body-level table cell. Tables nested inside cells are not visited.
    pub fn apply_to_document(&self, document: &mut MutableDocument) -> SubstitutionReport {
        let mut report = SubstitutionReport::default();

        for paragraph in document.paragraphs_mut() {
            if self.apply_to_paragraph(paragraph) {
                report.body_paragraphs += 1;
            }
        }

        for table in document.tables_mut() {
            for row in table.rows_mut() {
                for cell in row.cells_mut() {
                    for paragraph in cell.paragraphs_mut() {
                        if self.apply_to_paragraph(paragraph) {
                            report.table_paragraphs += 1;
                        }
                    }
                }
            }
        }

        debug!(
            mode = ?self.mode,
            placeholders = self.map.len(),
            body = report.body_paragraphs,
            tables = report.table_paragraphs,
            "applied replacements"
        );
        report
    }
}

fn apply_per_run(paragraph: &mut MutableParagraph, entry: &Entry) {
    if !entry.occurs_in(&paragraph.text()) {
        return;
    }

    let mut runs = 0usize;
    for run in paragraph.runs_mut() {
        let text = run.text();
        if entry.occurs_in(&text) {
            run.set_text(&text.replace(&entry.placeholder, &entry.replacement));
            runs += 1;
        }
    }

    if runs == 0 {
        trace!(placeholder = %entry.placeholder, "placeholder split across runs, left unchanged");
    } else {
        trace!(placeholder = %entry.placeholder, runs, "replaced placeholder");
    }
}

fn apply_across_runs(paragraph: &mut MutableParagraph, entries: &[Entry]) {
    let original: Vec<String> = paragraph.runs().map(MutableRun::text).collect();
    let mut texts = original.clone();

    for entry in entries {
        if !entry.occurs_in(&texts.concat()) {
            continue;
        }
        let count = replace_across(&mut texts, entry);
        trace!(placeholder = %entry.placeholder, occurrences = count, "replaced placeholder");
    }

    for ((run, new), old) in paragraph.runs_mut().zip(&texts).zip(&original) {
        if new != old {
            run.set_text(new);
        }
    }
}

/// Replace every occurrence of the entry's placeholder in the concatenation
/// of `texts`, editing the individual pieces. Returns the occurrence count.
fn replace_across(texts: &mut [String], entry: &Entry) -> usize {
    let placeholder_len = entry.placeholder.len();
    let mut count = 0;
    let mut from = 0;

    loop {
        let joined = texts.concat();
        let Some(found) = joined
            .get(from..)
            .and_then(|rest| entry.finder.find(rest.as_bytes()))
        else {
            break;
        };
        let start = from + found;
        let end = start + placeholder_len;

        // (run index, offset within run) of the first and last touched runs
        let mut first = None;
        let mut last = None;
        let mut offset = 0;
        for (idx, text) in texts.iter().enumerate() {
            let run_end = offset + text.len();
            if first.is_none() && start < run_end {
                first = Some((idx, start - offset));
            }
            if end <= run_end {
                last = Some((idx, end - offset));
                break;
            }
            offset = run_end;
        }
        let (Some((first_idx, head)), Some((last_idx, tail))) = (first, last) else {
            break;
        };

        if first_idx == last_idx {
            texts[first_idx].replace_range(head..tail, &entry.replacement);
        } else {
            texts[first_idx].replace_range(head.., &entry.replacement);
            for text in &mut texts[first_idx + 1..last_idx] {
                text.clear();
            }
            texts[last_idx].replace_range(..tail, "");
        }

        count += 1;
        from = start + entry.replacement.len();
    }
    count
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn paragraph(pieces: &[String]) -> MutableParagraph {
        MutableParagraph::from_runs(pieces.iter().map(|text| MutableRun::with_text(text)))
    }

    fn mode_strategy() -> impl Strategy<Value = MatchMode> {
        prop_oneof![Just(MatchMode::PerRun), Just(MatchMode::AcrossRuns)]
    }

    /// Run texts mixing placeholder characters with brackets
    fn bracketed_runs() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[abcx\\[\\] ]{0,10}", 1..5)
    }

    /// Maps over `[a]`, `[b]`, `[c]` whose replacements cannot form a key
    fn key_map_strategy() -> impl Strategy<Value = ReplacementMap> {
        prop::collection::vec("[A-Z0-9]{1,6}", 3).prop_map(|values| {
            ReplacementMap::from_pairs(["[a]", "[b]", "[c]"].into_iter().zip(values)).unwrap()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_absent_keys_leave_paragraph_unchanged(
            pieces in prop::collection::vec("[a-z ]{0,12}", 0..5),
            map in key_map_strategy(),
            mode in mode_strategy(),
        ) {
            let mut para = paragraph(&pieces);
            let before = para.clone();
            let modified = SubstitutionEngine::new(&map).with_mode(mode).apply_to_paragraph(&mut para);
            prop_assert!(!modified);
            prop_assert_eq!(para, before);
        }

        #[test]
        fn prop_runs_without_placeholder_are_untouched(pieces in bracketed_runs()) {
            let map = ReplacementMap::from_pairs([("[a]", "Z")]).unwrap();
            let mut para = paragraph(&pieces);
            let before: Vec<MutableRun> = para.runs().cloned().collect();

            SubstitutionEngine::new(&map).apply_to_paragraph(&mut para);

            for (old, new) in before.iter().zip(para.runs()) {
                if !old.text().contains("[a]") {
                    prop_assert_eq!(old, new);
                }
            }
        }

        #[test]
        fn prop_substitution_is_idempotent(
            pieces in bracketed_runs(),
            map in key_map_strategy(),
            mode in mode_strategy(),
        ) {
            let engine = SubstitutionEngine::new(&map).with_mode(mode);
            let mut once = paragraph(&pieces);
            engine.apply_to_paragraph(&mut once);
            let mut twice = once.clone();
            let modified = engine.apply_to_paragraph(&mut twice);
            prop_assert!(!modified);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_across_runs_matches_plain_text_replace(pieces in bracketed_runs()) {
            let map = ReplacementMap::from_pairs([("[a]", "Z")]).unwrap();
            let mut para = paragraph(&pieces);
            let expected = para.text().replace("[a]", "Z");

            SubstitutionEngine::new(&map)
                .with_mode(MatchMode::AcrossRuns)
                .apply_to_paragraph(&mut para);

            prop_assert_eq!(para.text(), expected);
            prop_assert_eq!(para.run_count(), pieces.len());
        }
    }
}
