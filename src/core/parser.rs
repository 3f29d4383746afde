// src/core/parser.rs

use regex::Regex;
use std::sync::LazyLock;

/// Marks the start of a question block: "Question 1:", "Question 2." etc.
static QUESTION_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Question \d+[:.]").unwrap());

/// Option lines look like "A) Paris" or "1) Paris".
static OPTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([a-d]\)|\d\))").unwrap());

/// Strips the leading option marker, including the "A." spelling.
static OPTION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-d\d][).]\s*").unwrap());

/// Blocks with fewer lines are dropped: one question line, up to four
/// option lines, and an answer line is the expected minimum shape.
const MIN_BLOCK_LINES: usize = 5;

/// Fragments kept by the blank-line fallback must be longer than this.
const MIN_FRAGMENT_LEN: usize = 10;

/// A parsed-but-not-yet-persisted question extracted from document text.
///
/// Only emitted when the text is non-empty, at least two options were
/// collected, and a non-empty correct answer was resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub marks: i64,
}

/// Parses extracted document text into question candidates.
///
/// Pure function; never errors. Malformed blocks are silently dropped, so
/// an empty result is the caller's signal that no valid questions were
/// found; the caller decides whether that is an error.
pub fn parse_questions(text: &str) -> Vec<ParsedQuestion> {
    segment_blocks(text)
        .into_iter()
        .filter_map(|block| parse_block(&block))
        .collect()
}

/// Splits text into question blocks at "Question N:" markers, degrading
/// to blank-line boundaries when no marker is present.
///
/// The marker stays with its block: question text keeps its
/// "Question 1:" prefix verbatim, which downstream display relies on.
fn segment_blocks(text: &str) -> Vec<String> {
    let starts: Vec<usize> = QUESTION_DELIMITER
        .find_iter(text)
        .map(|m| m.start())
        .collect();

    if !starts.is_empty() {
        let mut blocks = Vec::new();
        if !text[..starts[0]].trim().is_empty() {
            blocks.push(text[..starts[0]].to_string());
        }
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            if !text[start..end].trim().is_empty() {
                blocks.push(text[start..end].to_string());
            }
        }
        return blocks;
    }

    // Degraded-mode segmentation: blank-line boundaries, short fragments
    // discarded. A heuristic fallback, not a second parser.
    text.split("\n\n")
        .filter(|b| b.trim().len() > MIN_FRAGMENT_LEN)
        .map(|b| b.to_string())
        .collect()
}

/// Parses one block into a candidate, or None when the block is malformed.
fn parse_block(block: &str) -> Option<ParsedQuestion> {
    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() < MIN_BLOCK_LINES {
        return None;
    }

    // Line 0 is the question text verbatim, prefix and all.
    let text = lines[0].to_string();
    let mut options = Vec::new();
    let mut correct_answer = String::new();
    let mut marks = 1;

    for (i, line) in lines.iter().enumerate().skip(1) {
        let lower = line.to_lowercase();
        if OPTION_MARKER.is_match(line) {
            options.push(strip_option_marker(line));
        } else if lower.starts_with("answer:") {
            let token = line.split(':').nth(1).unwrap_or("").trim();
            // Only lines already collected take part in the text-search
            // fallback; the answer line must not match itself.
            correct_answer = resolve_answer(token, &options, &lines[..i]);
        } else if lower.starts_with("marks:") {
            let token = line.split(':').nth(1).unwrap_or("").trim();
            marks = parse_marks(token);
        }
    }

    if !text.is_empty() && options.len() >= 2 && !correct_answer.is_empty() {
        Some(ParsedQuestion {
            text,
            options,
            correct_answer,
            marks,
        })
    } else {
        None
    }
}

fn strip_option_marker(line: &str) -> String {
    OPTION_PREFIX.replace(line, "").to_string()
}

/// Resolves the raw "Answer:" token against the options collected so far.
///
/// Ordered strategies, first success wins:
/// 1. letter index: "B" selects the second collected option;
/// 2. text search: the first block line containing the raw token, with
///    its option marker stripped;
/// 3. verbatim: the uppercased token itself. This last resort may not
///    match any option; it is accepted lossy behavior, kept intact so
///    imported documents degrade the same way the format always has.
fn resolve_answer(token: &str, options: &[String], lines: &[&str]) -> String {
    let upper = token.to_uppercase();

    if let Some(by_index) = resolve_by_letter_index(&upper, options) {
        return by_index;
    }
    if let Some(by_text) = resolve_by_text_search(token, lines) {
        return by_text;
    }
    upper
}

/// Interprets the token's first letter as an index into the options
/// collected so far: A selects options[0], B options[1], and so on.
fn resolve_by_letter_index(upper_token: &str, options: &[String]) -> Option<String> {
    let first = upper_token.chars().next()?;
    let index = (first as i64) - ('A' as i64);
    if index >= 0 && (index as usize) < options.len() {
        Some(options[index as usize].clone())
    } else {
        None
    }
}

/// Finds the first block line containing the raw token and strips its
/// option marker, so "Answer: Paris" resolves against a "B) Paris" line.
fn resolve_by_text_search(token: &str, lines: &[&str]) -> Option<String> {
    if token.is_empty() {
        return None;
    }
    lines
        .iter()
        .find(|l| l.contains(token))
        .map(|l| strip_option_marker(l))
}

/// Parses the leading integer of a "Marks:" token, defaulting to 1 when
/// it is missing, unparsable, or non-positive.
fn parse_marks(token: &str) -> i64 {
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits
        .parse::<i64>()
        .ok()
        .filter(|&m| m > 0)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Question 1: What is the capital of France?\n\
        A) London\n\
        B) Paris\n\
        C) Rome\n\
        D) Berlin\n\
        Answer: B\n\
        Marks: 1\n\
        \n\
        Question 2: Which planet is known as the Red Planet?\n\
        A) Venus\n\
        B) Mars\n\
        C) Jupiter\n\
        D) Saturn\n\
        Answer: B\n\
        Marks: 2\n";

    #[test]
    fn parses_well_formed_blocks() {
        let parsed = parse_questions(SAMPLE);

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].text, "Question 1: What is the capital of France?");
        assert_eq!(parsed[0].options, vec!["London", "Paris", "Rome", "Berlin"]);
        assert_eq!(parsed[0].correct_answer, "Paris");
        assert_eq!(parsed[0].marks, 1);

        assert_eq!(
            parsed[1].text,
            "Question 2: Which planet is known as the Red Planet?"
        );
        assert_eq!(parsed[1].correct_answer, "Mars");
        assert_eq!(parsed[1].marks, 2);
    }

    #[test]
    fn letter_answer_maps_to_option_by_index() {
        let text = "Question 1: Capital of France?\n\
            A) London\nB) Paris\nC) Rome\nD) Berlin\nAnswer: B\n";
        let parsed = parse_questions(text);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].correct_answer, "Paris");
    }

    #[test]
    fn full_text_answer_resolves_via_text_search() {
        let text = "Question 1: Capital of France?\n\
            A) London\nB) Paris\nC) Rome\nD) Berlin\nAnswer: Paris\n";
        let parsed = parse_questions(text);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].correct_answer, "Paris");
    }

    #[test]
    fn unresolvable_answer_falls_back_to_verbatim_token() {
        let text = "Question 1: Capital of France?\n\
            A) London\nB) Paris\nC) Rome\nD) Berlin\nAnswer: Zebra\n";
        let parsed = parse_questions(text);

        // Accepted lossy behavior: the token is kept uppercased even
        // though it matches no option.
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].correct_answer, "ZEBRA");
    }

    #[test]
    fn block_with_four_lines_is_dropped() {
        let text = "Question 1: Capital of France?\n\
            A) London\nB) Paris\nAnswer: B\n";
        assert!(parse_questions(text).is_empty());
    }

    #[test]
    fn block_with_too_few_options_is_dropped() {
        let text = "Question 1: Capital of France?\n\
            A) London\nSome commentary here\nMore commentary here\nAnswer: A\n";
        assert!(parse_questions(text).is_empty());
    }

    #[test]
    fn blank_line_fallback_segments_unnumbered_text() {
        let text = "What is 2 + 2 equal to?\n\
            A) 3\nB) 4\nC) 5\nD) 6\nAnswer: B\n\
            \n\
            short\n";
        let parsed = parse_questions(text);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].text, "What is 2 + 2 equal to?");
        assert_eq!(parsed[0].correct_answer, "4");
    }

    #[test]
    fn numeric_option_markers_are_accepted() {
        let text = "Question 1: Pick one\n\
            1) alpha\n2) beta\n3) gamma\n4) delta\nAnswer: A\n";
        let parsed = parse_questions(text);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].options, vec!["alpha", "beta", "gamma", "delta"]);
        assert_eq!(parsed[0].correct_answer, "alpha");
    }

    #[test]
    fn marks_default_to_one_when_unparsable() {
        let text = "Question 1: Pick one\n\
            A) a\nB) b\nC) c\nAnswer: A\nMarks: lots\n";
        let parsed = parse_questions(text);

        assert_eq!(parsed[0].marks, 1);
    }

    #[test]
    fn marks_parse_leading_integer() {
        let text = "Question 1: Pick one\n\
            A) a\nB) b\nC) c\nAnswer: A\nMarks: 3 points\n";
        let parsed = parse_questions(text);

        assert_eq!(parsed[0].marks, 3);
    }

    #[test]
    fn empty_text_yields_no_candidates() {
        assert!(parse_questions("").is_empty());
        assert!(parse_questions("   \n\n  ").is_empty());
    }
}
