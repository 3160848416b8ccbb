//! Token-based citation recognizer.
//!
//! The text is split on whitespace into tokens (with surrounding brackets, quotes and
//! clause punctuation peeled off), then two passes run over the token stream:
//!
//! 1. volume / reporter / page triples, including multi-token reporters such as
//!    `F. Supp. 2d`, and `YEAR WL NUMBER` Westlaw cites;
//! 2. case names around a `v.` token, with capitalized party runs on both sides.

use tracing::debug;

use super::error::ExtractionError;
use super::types::{CitationKind, CitationMatch};

/// Default cap on tokens accepted by the structured recognizer.
pub const DEFAULT_TOKEN_LIMIT: usize = 1_000_000;

/// Longest reporter abbreviation, in tokens (`F. Supp. 2d` written as `F. Supp. 2 d`).
const MAX_REPORTER_TOKENS: usize = 4;

/// Longest party name kept on either side of `v.`.
const MAX_PARTY_TOKENS: usize = 8;

/// Compact reporter spelling (spaces removed) → corrected form.
const REPORTERS: &[(&str, &str, CitationKind)] = &[
    ("U.S.", "U.S.", CitationKind::UsReports),
    ("S.Ct.", "S. Ct.", CitationKind::SupremeCourtReporter),
    ("L.Ed.", "L. Ed.", CitationKind::LawyersEdition),
    ("L.Ed.2d", "L. Ed. 2d", CitationKind::LawyersEdition),
    ("F.", "F.", CitationKind::FederalReporter),
    ("F.2d", "F.2d", CitationKind::FederalReporter),
    ("F.3d", "F.3d", CitationKind::FederalReporter),
    ("F.4th", "F.4th", CitationKind::FederalReporter),
    ("F.Supp.", "F. Supp.", CitationKind::FederalSupplement),
    ("F.Supp.2d", "F. Supp. 2d", CitationKind::FederalSupplement),
    ("F.Supp.3d", "F. Supp. 3d", CitationKind::FederalSupplement),
    ("F.App'x", "F. App'x", CitationKind::FederalAppendix),
    ("F.Appx", "F. App'x", CitationKind::FederalAppendix),
    ("F.R.D.", "F.R.D.", CitationKind::FederalRulesDecisions),
    ("B.R.", "B.R.", CitationKind::BankruptcyReporter),
];

/// Introductory signals that precede a case name but are not part of it.
const SIGNALS: &[&str] = &[
    "See", "Cf", "In", "But", "Accord", "Compare", "Also", "And", "Under", "As", "Although",
    "While", "Contra", "Like", "Unlike", "Per", "Following", "Citing", "Quoting", "Because",
    "Since", "When", "Here", "Thus", "Similarly",
];

/// Articles dropped from the front of a party name.
const ARTICLES: &[&str] = &["The", "A", "An"];

/// Lowercase words allowed inside a party name ("Board of Education").
const CONNECTORS: &[&str] = &[
    "of", "the", "and", "&", "for", "de", "del", "la", "ex", "rel.", "von", "van", "du",
];

/// Period-terminated words that do not end a party name.
const ABBREVIATIONS: &[&str] = &[
    "Inc.", "Co.", "Corp.", "Ltd.", "Bros.", "Assn.", "Dept.", "Univ.", "St.", "Mfg.", "Bd.",
    "Educ.", "Cnty.", "Cty.", "Sch.", "Dist.", "Ins.", "Natl.", "Intl.", "Auth.", "Comm.",
    "Hosp.", "Mut.", "Sec.", "Servs.", "Sys.", "Tech.", "Twp.", "Transp.", "Am.", "Fed.",
];

/// Entity suffixes written after a comma ("Yahoo!, Inc.").
const CORPORATE_SUFFIXES: &[&str] = &[
    "Inc.", "Co.", "Corp.", "Ltd.", "LLC", "L.L.C.", "LLP", "L.L.P.", "L.P.", "N.A.", "P.C.",
    "P.A.", "S.A.", "PLC",
];

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    start: usize,
    /// A comma, semicolon, colon or closing bracket followed the token.
    ends_clause: bool,
}

/// Tokenizing recognizer for reporter citations and case names.
#[derive(Debug, Clone)]
pub struct StructuredExtractor {
    token_limit: usize,
}

impl Default for StructuredExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuredExtractor {
    pub fn new() -> Self {
        Self {
            token_limit: DEFAULT_TOKEN_LIMIT,
        }
    }

    /// Sets the maximum number of tokens accepted before giving up.
    pub fn with_token_limit(mut self, token_limit: usize) -> Self {
        self.token_limit = token_limit;
        self
    }

    pub fn token_limit(&self) -> usize {
        self.token_limit
    }

    /// Returns every recognized citation with its byte offset, in no particular order.
    pub fn extract_matches(&self, text: &str) -> Result<Vec<CitationMatch>, ExtractionError> {
        let tokens = tokenize(text);
        if tokens.len() > self.token_limit {
            return Err(ExtractionError::TokenBudgetExceeded {
                tokens: tokens.len(),
                limit: self.token_limit,
            });
        }

        let mut matches = reporter_matches(&tokens);
        matches.extend(case_name_matches(&tokens));

        debug!(
            tokens = tokens.len(),
            matches = matches.len(),
            "Structured extraction finished"
        );
        Ok(matches)
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word_start = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(start) = word_start.take() {
                push_token(&mut tokens, &text[start..idx], start);
            }
        } else if word_start.is_none() {
            word_start = Some(idx);
        }
    }
    if let Some(start) = word_start {
        push_token(&mut tokens, &text[start..], start);
    }

    tokens
}

fn push_token<'a>(tokens: &mut Vec<Token<'a>>, raw: &'a str, start: usize) {
    let leading = raw.trim_start_matches(['(', '[', '"', '\u{201c}', '\'']);
    let start = start + (raw.len() - leading.len());
    let body = leading.trim_end_matches([',', ';', ':', ')', ']', '"', '\u{201d}']);
    if body.is_empty() {
        return;
    }
    tokens.push(Token {
        text: body,
        start,
        ends_clause: body.len() != leading.len(),
    });
}

fn number(token: &str) -> Option<&str> {
    let digits = token.trim_end_matches('.');
    (!digits.is_empty() && digits.len() <= 5 && digits.bytes().all(|b| b.is_ascii_digit()))
        .then_some(digits)
}

fn reporter_for(tokens: &[Token<'_>]) -> Option<(&'static str, CitationKind)> {
    let compact: String = tokens
        .iter()
        .map(|t| t.text.replace('\u{2019}', "'"))
        .collect();
    REPORTERS
        .iter()
        .find(|(spelling, _, _)| *spelling == compact)
        .map(|(_, corrected, kind)| (*corrected, *kind))
}

fn reporter_matches(tokens: &[Token<'_>]) -> Vec<CitationMatch> {
    let mut matches = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if let Some((found, consumed)) =
            westlaw_at(tokens, i).or_else(|| reporter_at(tokens, i))
        {
            matches.push(found);
            i += consumed;
        } else {
            i += 1;
        }
    }

    matches
}

fn westlaw_at(tokens: &[Token<'_>], i: usize) -> Option<(CitationMatch, usize)> {
    let year = tokens.get(i)?;
    let marker = tokens.get(i + 1)?;
    let doc = tokens.get(i + 2)?;

    if year.text.len() != 4 || !year.text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if marker.text != "WL" || year.ends_clause {
        return None;
    }
    let doc_number = doc.text.trim_end_matches('.');
    if doc_number.is_empty() || !doc_number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let citation = format!("{} WL {}", year.text, doc_number);
    Some((
        CitationMatch::new(citation, CitationKind::Westlaw, year.start),
        3,
    ))
}

fn reporter_at(tokens: &[Token<'_>], i: usize) -> Option<(CitationMatch, usize)> {
    let volume_token = tokens.get(i)?;
    if volume_token.ends_clause {
        return None;
    }
    let volume = number(volume_token.text).filter(|v| v.len() <= 4)?;

    for width in (1..=MAX_REPORTER_TOKENS).rev() {
        let page_idx = i + 1 + width;
        let Some(page_token) = tokens.get(page_idx) else {
            continue;
        };
        let reporter_tokens = &tokens[i + 1..page_idx];
        if reporter_tokens[..width - 1].iter().any(|t| t.ends_clause) {
            continue;
        }
        if let Some((reporter, kind)) = reporter_for(reporter_tokens)
            && let Some(page) = number(page_token.text)
        {
            let citation = format!("{volume} {reporter} {page}");
            return Some((
                CitationMatch::new(citation, kind, volume_token.start),
                width + 2,
            ));
        }
    }

    None
}

fn is_versus(word: &str) -> bool {
    matches!(word, "v" | "v." | "vs" | "vs.")
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_uppercase())
}

fn is_connector(word: &str) -> bool {
    CONNECTORS.contains(&word)
}

fn is_abbreviation(word: &str) -> bool {
    if ABBREVIATIONS.iter().any(|a| a.eq_ignore_ascii_case(word)) {
        return true;
    }
    let stem = word.trim_end_matches('.');
    // Initials ("A.") and dotted acronyms ("N.A.", "U.S.").
    stem.contains('.') || (stem.chars().count() == 1 && is_capitalized(stem))
}

fn is_corporate_suffix(word: &str) -> bool {
    CORPORATE_SUFFIXES.iter().any(|s| s.eq_ignore_ascii_case(word))
}

/// A period at the end of a non-abbreviation closes the sentence.
fn ends_sentence(word: &str) -> bool {
    word.ends_with('.') && !is_abbreviation(word)
}

fn clean_word(word: &str) -> &str {
    if ends_sentence(word) {
        word.trim_end_matches('.')
    } else {
        word
    }
}

fn is_signal(word: &str) -> bool {
    SIGNALS.contains(&word.trim_end_matches(['.', ',']))
}

fn is_article(word: &str) -> bool {
    ARTICLES.contains(&word)
}

fn left_party(tokens: &[Token<'_>], versus_idx: usize) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut j = versus_idx;

    while j > 0 && words.len() < MAX_PARTY_TOKENS {
        let token = &tokens[j - 1];
        if ends_sentence(token.text) {
            break;
        }
        // "Acme, Inc. v. ..." keeps the comma before the suffix.
        let text = if token.ends_clause {
            if !words.last().is_some_and(|w| is_corporate_suffix(w)) {
                break;
            }
            format!("{},", token.text)
        } else {
            token.text.to_string()
        };
        if is_capitalized(token.text) || (is_connector(token.text) && !words.is_empty()) {
            words.push(text);
        } else {
            break;
        }
        j -= 1;
    }

    words.reverse();
    while words
        .first()
        .is_some_and(|w| is_connector(w) || is_signal(w) || is_article(w))
    {
        words.remove(0);
    }
    words
}

fn right_party(tokens: &[Token<'_>], versus_idx: usize) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut rest = tokens.iter().skip(versus_idx + 1).take(MAX_PARTY_TOKENS).peekable();

    while let Some(token) = rest.next() {
        let first = words.is_empty();
        if !(is_capitalized(token.text) || (!first && is_connector(token.text))) {
            break;
        }
        if first && is_article(token.text) {
            continue;
        }
        if token.ends_clause {
            if rest.peek().is_some_and(|next| is_corporate_suffix(next.text)) {
                words.push(format!("{},", token.text));
                continue;
            }
            words.push(clean_word(token.text).to_string());
            break;
        }
        words.push(clean_word(token.text).to_string());
        if ends_sentence(token.text) {
            break;
        }
    }

    while words.last().is_some_and(|w| is_connector(w)) {
        words.pop();
    }
    words
}

fn case_name_matches(tokens: &[Token<'_>]) -> Vec<CitationMatch> {
    let mut matches = Vec::new();

    for (idx, token) in tokens.iter().enumerate() {
        if idx == 0 || !is_versus(token.text) || token.ends_clause {
            continue;
        }

        let left = left_party(tokens, idx);
        let right = right_party(tokens, idx);
        if left.is_empty() || right.is_empty() {
            continue;
        }

        // Offset of the first kept left-hand word.
        let start = tokens[..idx]
            .iter()
            .rev()
            .nth(left.len() - 1)
            .map(|t| t.start)
            .unwrap_or(token.start);

        let citation = format!("{} v. {}", left.join(" "), right.join(" "));
        matches.push(CitationMatch::new(citation, CitationKind::CaseName, start));
    }

    matches
}
