//! Deterministic local stand-ins for the remote agents.
//!
//! Used whenever a remote call fails so that a run always completes with
//! results of the same shape. Nothing here touches the network or any
//! shared state.

use std::collections::BTreeMap;

use crate::analysis::{AnalysisResult, Sentiment, SummaryResult};
use crate::config::FallbackConfig;
use crate::sanitize;

/// Returned when no rule matches and the document is too short to quote.
pub const DEFAULT_ANSWER: &str = "I couldn't find an answer to that in the document. \
Try asking about revenue, the team, clients or the technology used.";

/// One keyword rule for question answering.
struct AnswerRule {
    topic: &'static str,
    /// Whole words (an `s` plural also counts), matched case-insensitively
    /// against the question.
    keywords: &'static [&'static str],
    /// A document sentence mentioning these is quoted as the answer.
    evidence: &'static [&'static str],
    /// Rank sentences that carry a number above those that don't.
    figures: bool,
    canned: &'static str,
}

/// Answer rules in priority order. The first rule whose keywords appear in
/// the question wins, so the order here is part of the behavior.
const ANSWER_RULES: &[AnswerRule] = &[
    AnswerRule {
        topic: "financial",
        keywords: &[
            "revenue",
            "financial",
            "finance",
            "income",
            "profit",
            "profitable",
            "sales",
            "earning",
            "money",
        ],
        evidence: &["revenue", "profit", "income", "earning", "$", "million"],
        figures: true,
        canned: "The document reports strong financial results, with revenue of \
$12.5 million, up 45% year over year.",
    },
    AnswerRule {
        topic: "team",
        keywords: &[
            "team",
            "who",
            "ceo",
            "cto",
            "founder",
            "staff",
            "employee",
            "people",
            "leader",
            "leadership",
        ],
        evidence: &["team", "ceo", "cto", "founder", "director", "manager"],
        figures: false,
        canned: "The company is led by John Smith (CEO) and Jane Doe (CTO).",
    },
    AnswerRule {
        topic: "clients",
        keywords: &["client", "customer", "partner", "how many"],
        evidence: &["client", "customer", "partner"],
        figures: true,
        canned: "The company serves more than 50 enterprise clients.",
    },
    AnswerRule {
        topic: "technology",
        keywords: &[
            "technology",
            "tech",
            "platform",
            "tool",
            "framework",
            "model",
            "stack",
        ],
        evidence: &["technology", "platform", "stack", "model", "ocr", "llm"],
        figures: false,
        canned: "The product is built on the ERNIE large language model, \
PaddleOCR-VL for document recognition and CAMEL-AI for agent coordination.",
    },
    AnswerRule {
        topic: "overview",
        keywords: &[
            "what is",
            "what's",
            "about",
            "summary",
            "summarize",
            "overview",
            "main point",
            "tell me",
        ],
        evidence: &[],
        figures: false,
        canned: "This document is an annual business report covering financial \
performance, the leadership team, the client base and the technology behind \
the product.",
    },
];

/// Fixed analysis, summary and keyword-based answers.
#[derive(Debug, Clone)]
pub struct FallbackProvider {
    excerpt_length: usize,
    min_document_length: usize,
}

impl Default for FallbackProvider {
    fn default() -> Self {
        Self::from_config(&FallbackConfig::default())
    }
}

impl FallbackProvider {
    pub fn from_config(config: &FallbackConfig) -> Self {
        Self {
            excerpt_length: config.excerpt_length,
            min_document_length: config.min_document_length,
        }
    }

    pub fn analysis(&self) -> AnalysisResult {
        let mut entities = BTreeMap::new();
        entities.insert(
            "persons".to_string(),
            vec!["John Smith (CEO)".to_string(), "Jane Doe (CTO)".to_string()],
        );
        entities.insert("organizations".to_string(), vec!["DocuMind".to_string()]);
        entities.insert("amounts".to_string(), vec!["$12.5 million".to_string()]);
        entities.insert("dates".to_string(), vec!["2024".to_string()]);

        AnalysisResult {
            document_type: Some("Business Report".to_string()),
            language: Some("English".to_string()),
            sentiment: Some(Sentiment::Positive),
            key_entities: Some(entities),
            key_points: Some(vec![
                "Revenue grew 45% to $12.5 million".to_string(),
                "More than 50 enterprise clients".to_string(),
                "Built on ERNIE, PaddleOCR-VL and CAMEL-AI".to_string(),
            ]),
            summary: Some(
                "An annual report describing strong revenue growth and an expanding \
enterprise client base."
                    .to_string(),
            ),
            raw_analysis: None,
        }
    }

    pub fn summary(&self) -> SummaryResult {
        SummaryResult::Bullets(vec![
            "Revenue reached $12.5 million, up 45% year over year".to_string(),
            "Leadership: John Smith (CEO) and Jane Doe (CTO)".to_string(),
            "Serves more than 50 enterprise clients".to_string(),
            "Technology: ERNIE LLM, PaddleOCR-VL and CAMEL-AI".to_string(),
        ])
    }

    /// Answers `question` from the rule table, quoting `document` where it can.
    pub fn answer(&self, question: &str, document: &str) -> String {
        if let Some(rule) = matching_rule(question) {
            return match find_evidence(document, rule) {
                Some(passage) => format!(
                    "According to the document: {}",
                    self.quote(&passage, rule)
                ),
                None => rule.canned.to_string(),
            };
        }

        let trimmed = document.trim();
        if trimmed.chars().count() > self.min_document_length {
            return format!("Based on the document: {}", self.excerpt(trimmed));
        }

        DEFAULT_ANSWER.to_string()
    }

    /// Topic of the rule that would answer `question`, if any.
    pub fn matched_topic(&self, question: &str) -> Option<&'static str> {
        matching_rule(question).map(|rule| rule.topic)
    }

    fn excerpt(&self, text: &str) -> String {
        let cut = sanitize::truncate_chars(text, self.excerpt_length);
        if cut.len() < text.len() {
            format!("{}...", cut.trim_end())
        } else {
            cut.to_string()
        }
    }

    /// Quotes `passage`, or the window of it densest in evidence when it is
    /// longer than the excerpt length.
    fn quote(&self, passage: &Passage<'_>, rule: &AnswerRule) -> String {
        let len = passage.chars.len();
        if len <= self.excerpt_length {
            return passage.text.to_string();
        }

        let reach = (self.excerpt_length / 2).max(1);
        let anchor = passage
            .cue_positions(rule.evidence)
            .into_iter()
            .max_by_key(|&pos| {
                // Ties go to the earliest anchor.
                (passage.window_score(pos, reach, rule), std::cmp::Reverse(pos))
            })
            .unwrap_or(0);

        let end = (anchor.saturating_sub(self.excerpt_length / 4) + self.excerpt_length).min(len);
        let start = end.saturating_sub(self.excerpt_length);
        let window: String = passage.chars[start..end].iter().collect();

        format!(
            "{}{}{}",
            if start > 0 { "..." } else { "" },
            window.trim(),
            if end < len { "..." } else { "" }
        )
    }
}

fn matching_rule(question: &str) -> Option<&'static AnswerRule> {
    let question = question.to_lowercase();
    ANSWER_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| mentions_word(&question, k)))
}

/// `keyword` appears in `text` as a whole word, or followed by a plural `s`.
fn mentions_word(text: &str, keyword: &str) -> bool {
    let is_boundary = |c: Option<char>| c.map_or(true, |c| !c.is_alphanumeric());

    text.match_indices(keyword).any(|(idx, _)| {
        let before = text[..idx].chars().next_back();
        let rest = &text[idx + keyword.len()..];
        let after = match rest.strip_prefix('s') {
            Some(plural) if is_boundary(plural.chars().next()) => plural,
            _ => rest,
        };
        is_boundary(before) && is_boundary(after.chars().next())
    })
}

/// One sentence of a document, with a char-for-char lowercase copy so cue
/// positions line up with the original text.
struct Passage<'a> {
    text: &'a str,
    chars: Vec<char>,
    lower: Vec<char>,
}

impl<'a> Passage<'a> {
    fn new(text: &'a str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let lower = chars
            .iter()
            .map(|c| c.to_lowercase().next().unwrap_or(*c))
            .collect();
        Self { text, chars, lower }
    }

    fn has_cue_at(&self, pos: usize, cue: &str) -> bool {
        let mut cue_chars = cue.chars();
        let mut i = pos;
        loop {
            match cue_chars.next() {
                None => return true,
                Some(c) if self.lower.get(i) == Some(&c) => i += 1,
                Some(_) => return false,
            }
        }
    }

    /// Char positions of every cue occurrence, in text order.
    fn cue_positions(&self, cues: &[&str]) -> Vec<usize> {
        (0..self.lower.len())
            .filter(|&pos| cues.iter().any(|cue| self.has_cue_at(pos, cue)))
            .collect()
    }

    fn has_figure(&self, range: std::ops::Range<usize>) -> bool {
        self.chars[range].iter().any(char::is_ascii_digit)
    }

    /// How strongly the whole sentence answers `rule`: whether it carries a
    /// number (for rules that want one), then how many distinct cues it has.
    fn score(&self, rule: &AnswerRule) -> (bool, usize) {
        let distinct = rule
            .evidence
            .iter()
            .filter(|cue| (0..self.lower.len()).any(|pos| self.has_cue_at(pos, cue)))
            .count();
        (rule.figures && self.has_figure(0..self.chars.len()), distinct)
    }

    /// Same ranking, limited to `reach` chars starting at `pos`.
    fn window_score(&self, pos: usize, reach: usize, rule: &AnswerRule) -> (bool, usize) {
        let end = (pos + reach).min(self.lower.len());
        let hits = self
            .cue_positions(rule.evidence)
            .into_iter()
            .filter(|p| (pos..end).contains(p))
            .count();
        (rule.figures && self.has_figure(pos..end), hits)
    }
}

/// Splits `document` into trimmed, non-empty sentences: one per line, with
/// lines further cut after `.`, `!` or `?` followed by whitespace.
fn sentences(document: &str) -> Vec<&str> {
    let mut out = Vec::new();
    for line in document.lines() {
        let mut start = 0;
        let mut chars = line.char_indices().peekable();
        while let Some((idx, c)) = chars.next() {
            let ends_sentence = matches!(c, '.' | '!' | '?')
                && chars.peek().is_some_and(|(_, next)| next.is_whitespace());
            if ends_sentence {
                let end = idx + c.len_utf8();
                out.push(line[start..end].trim());
                start = end;
            }
        }
        out.push(line[start..].trim());
    }
    out.retain(|s| !s.is_empty());
    out
}

/// The sentence of `document` that best matches `rule`'s evidence cues.
/// Earlier sentences win ties.
fn find_evidence<'a>(document: &'a str, rule: &AnswerRule) -> Option<Passage<'a>> {
    if rule.evidence.is_empty() {
        return None;
    }

    let mut best: Option<((bool, usize), Passage<'a>)> = None;
    for sentence in sentences(document) {
        let passage = Passage::new(sentence);
        let score = passage.score(rule);
        if score.1 == 0 {
            continue;
        }
        if best.as_ref().map_or(true, |(top, _)| score > *top) {
            best = Some((score, passage));
        }
    }
    best.map(|(_, passage)| passage)
}
