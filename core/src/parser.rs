//! `SegmentParser` — Positional template matching with signed distances
//!
//! The parser holds an ordered segment sequence and a name→index position
//! map built once at construction. Matching compares a candidate segment
//! vector position-by-position and reports a signed distance; parsing reads
//! raw values out of the candidate at the recorded positions.
//!
//! # Distance convention
//!
//! - `0` — exact length-and-literal match
//! - `> 0` — the candidate over-matches: every template position agrees and
//!   the distance counts the extra trailing candidate segments
//! - `< 0` — under-match or literal mismatch: a literal disagreeing at index
//!   `i` short-circuits to `i - template_len`; a candidate that is merely
//!   shorter reports `candidate_len - template_len`

use crate::{Segment, TemplateError, SEPARATOR};
use std::collections::BTreeMap;

/// Matches and parses candidate segment vectors against one template.
///
/// Immutable after construction; safe to share across threads without
/// synchronization.
///
/// # Example
///
/// ```
/// use trail::{tokenize, split_segments, SegmentParser};
///
/// let parser = SegmentParser::new(
///     tokenize("/my/:name/parsable/url/:number"),
///     ["name".to_string(), "number".to_string()],
/// )?;
///
/// assert_eq!(parser.match_path(&split_segments("/my/pontus/parsable/url/1234")), 0);
/// assert_eq!(parser.match_path(&split_segments("/my")), -4);
/// # Ok::<(), trail::TemplateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SegmentParser {
    segments: Vec<Segment>,
    positions: BTreeMap<String, usize>,
}

impl SegmentParser {
    /// Build a parser over tokenized template segments for the given
    /// placeholder names.
    ///
    /// Every requested name must appear as a placeholder segment. The check
    /// runs eagerly at construction; the first name without a placeholder is
    /// reported (historical single-miss policy — later misses surface once
    /// earlier ones are fixed).
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingPlaceholder`] naming the first
    /// requested key with no `:key` segment.
    pub fn new(
        segments: Vec<Segment>,
        keys: impl IntoIterator<Item = String>,
    ) -> Result<Self, TemplateError> {
        let mut positions = BTreeMap::new();
        for key in keys {
            let position = segments
                .iter()
                .position(|segment| segment.param_name() == Some(key.as_str()));
            match position {
                Some(index) => {
                    positions.insert(key, index);
                }
                None => {
                    return Err(TemplateError::MissingPlaceholder {
                        key,
                        template: render(&segments),
                    });
                }
            }
        }
        Ok(Self {
            segments,
            positions,
        })
    }

    /// The template segments, in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The recorded position of a registered placeholder name.
    ///
    /// Never misses for names accepted at construction.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Compare a candidate segment vector against the template.
    ///
    /// Scans the overlapping prefix left to right. A literal segment that
    /// disagrees with the candidate at its index short-circuits to
    /// `index - template_len`; placeholders match anything. If the scan
    /// completes, the distance is `candidate_len - template_len` — zero for
    /// an exact match, positive for extra trailing candidate segments,
    /// negative for a candidate that ran short.
    #[must_use]
    pub fn match_path(&self, candidate: &[String]) -> isize {
        let template_len = self.segments.len() as isize;
        for (index, segment) in self.segments.iter().take(candidate.len()).enumerate() {
            if let Segment::Literal(literal) = segment {
                if *literal != candidate[index] {
                    return index as isize - template_len;
                }
            }
        }
        candidate.len() as isize - template_len
    }

    /// Read the raw value of every registered placeholder out of a
    /// candidate segment vector, by position.
    ///
    /// A position beyond the candidate's length yields `None` — a legal
    /// outcome for callers that parse without matching first.
    #[must_use]
    pub fn parse_path(&self, candidate: &[String]) -> BTreeMap<String, Option<String>> {
        self.positions
            .iter()
            .map(|(key, &index)| (key.clone(), candidate.get(index).cloned()))
            .collect()
    }
}

/// Render segments back into normalized template syntax, for diagnostics.
fn render(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return SEPARATOR.to_string();
    }
    let mut out = String::new();
    for segment in segments {
        out.push(SEPARATOR);
        out.push_str(&segment.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{split_segments, tokenize};

    fn parser() -> SegmentParser {
        SegmentParser::new(
            tokenize("/my/:name/parsable/url/:number"),
            ["name".to_string(), "number".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn construction_rejects_missing_placeholder() {
        let err = SegmentParser::new(
            tokenize("/my/:name/parsable/url/:number"),
            ["name".to_string(), "notavailable".to_string()],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TemplateError::MissingPlaceholder {
                key: "notavailable".into(),
                template: "/my/:name/parsable/url/:number".into(),
            }
        );
    }

    #[test]
    fn exact_match_is_zero() {
        let parser = parser();
        assert_eq!(
            parser.match_path(&split_segments("/my/pontus/parsable/url/1234")),
            0
        );
        assert_eq!(
            parser.match_path(&split_segments("/my/burger/parsable/url/fm83")),
            0
        );
    }

    #[test]
    fn over_match_counts_extra_trailing_segments() {
        let parser = parser();
        assert_eq!(
            parser.match_path(&split_segments("/my/foo/parsable/url/bar/a")),
            1
        );
        assert_eq!(
            parser.match_path(&split_segments("/my/foo/parsable/url/bar/a/b")),
            2
        );
        assert_eq!(
            parser.match_path(&split_segments("/my/foo/parsable/url/bar/a/b/c")),
            3
        );
        assert_eq!(
            parser.match_path(&split_segments("/my/foo/parsable/url/bar/and/four/more/parts")),
            4
        );
    }

    #[test]
    fn literal_mismatch_short_circuits() {
        let parser = parser();
        assert_eq!(
            parser.match_path(&split_segments("/your/foo/parsable/url/bar")),
            -5
        );
        assert_eq!(
            parser.match_path(&split_segments("/my/foo/nonparsable/url/bar")),
            -3
        );
        // short candidate with an early literal mismatch reports the
        // mismatch, not the length difference
        assert_eq!(parser.match_path(&split_segments("/your")), -5);
    }

    #[test]
    fn under_match_reports_length_difference() {
        let parser = parser();
        assert_eq!(parser.match_path(&split_segments("/my")), -4);
        assert_eq!(parser.match_path(&split_segments("/my/foo")), -3);
        assert_eq!(parser.match_path(&split_segments("/my/foo/parsable")), -2);
        assert_eq!(parser.match_path(&split_segments("/my/foo/parsable/url")), -1);
        assert_eq!(
            parser.match_path(&split_segments("/my/foo/parsable/url/bar")),
            0
        );
    }

    #[test]
    fn parse_reads_positionally_without_matching() {
        let parser = parser();

        let values = parser.parse_path(&split_segments("/a/pontus/b/c/1234"));
        assert_eq!(values["name"], Some("pontus".to_string()));
        assert_eq!(values["number"], Some("1234".to_string()));

        let values = parser.parse_path(&split_segments("/quack/pontus/pluck/truck/1234"));
        assert_eq!(values["name"], Some("pontus".to_string()));
        assert_eq!(values["number"], Some("1234".to_string()));
    }

    #[test]
    fn parse_yields_none_past_candidate_end() {
        let parser = parser();

        let values = parser.parse_path(&split_segments("/"));
        assert_eq!(values["name"], None);
        assert_eq!(values["number"], None);

        let values = parser.parse_path(&split_segments("/quack/pontus/pluck/truck"));
        assert_eq!(values["name"], Some("pontus".to_string()));
        assert_eq!(values["number"], None);
    }

    #[test]
    fn positions_never_miss_for_registered_keys() {
        let parser = parser();
        assert_eq!(parser.position("name"), Some(1));
        assert_eq!(parser.position("number"), Some(4));
        assert_eq!(parser.position("other"), None);
    }
}
