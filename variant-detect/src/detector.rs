use std::collections::HashSet;

use variant_dict::CharMaps;
use variant_model::Candidate;

/// Characters of context kept on each side of a flagged character.
pub const CONTEXT_RADIUS: usize = 15;

/// Characters the caller does not want reported at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet(HashSet<char>);

impl IgnoreSet {
    pub fn new() -> Self { Self::default() }

    /// Every character of `chars` is ignored; whitespace included.
    pub fn from_chars(chars: &str) -> Self {
        chars.chars().collect()
    }

    pub fn contains(&self, c: char) -> bool { self.0.contains(&c) }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl FromIterator<char> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Scans paragraphs against one pair of tables and one ignore set.
#[derive(Debug, Clone, Copy)]
pub struct Detector<'a> {
    maps: &'a CharMaps,
    ignore: &'a IgnoreSet,
}

impl<'a> Detector<'a> {
    pub fn new(maps: &'a CharMaps, ignore: &'a IgnoreSet) -> Self {
        Self { maps, ignore }
    }

    /// Flag every character whose simplified form has several traditional variants.
    ///
    /// Single left-to-right pass. The context window is `[i - 15, i + 15)` clipped to the text.
    pub fn detect(&self, text: &str, chapter: &str, link: &str, paragraph_id: &str) -> Vec<Candidate> {
        let chars: Vec<char> = text.chars().collect();
        let mut out = Vec::new();
        for (i, &c) in chars.iter().enumerate() {
            if self.ignore.contains(c) {
                continue;
            }
            let Some(variants) = self.maps.ambiguous_variants(c) else { continue };
            let start = i.saturating_sub(CONTEXT_RADIUS);
            let end = (i + CONTEXT_RADIUS).min(chars.len());
            out.push(Candidate {
                character: c,
                variants: variants.to_string(),
                context: fold_lines(&chars[start..end]),
                chapter: chapter.to_string(),
                link: link.to_string(),
                paragraph_id: paragraph_id.to_string(),
            });
        }
        out
    }
}

/// Free-function form of [`Detector::detect`].
pub fn detect(
    maps: &CharMaps,
    text: &str,
    chapter: &str,
    link: &str,
    paragraph_id: &str,
    ignore: &IgnoreSet,
) -> Vec<Candidate> {
    Detector::new(maps, ignore).detect(text, chapter, link, paragraph_id)
}

fn fold_lines(window: &[char]) -> String {
    window
        .iter()
        .map(|&c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}
