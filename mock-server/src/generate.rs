//! Content "generation": cheap deterministic transforms of the input text
//! that produce the same JSON shapes as the model-backed service.

use serde::{Deserialize, Serialize};

const MAX_TOPICS: usize = 8;
const MAX_SLIDES: usize = 8;
const MAX_BULLETS: usize = 4;
const MAX_TITLE_CHARS: usize = 60;
const BLANK: &str = "_____";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub bullet_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: String,
}

/// Up to eight heading-like lines.
pub fn topics(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().trim_start_matches('#').trim())
        .filter(|line| !line.is_empty())
        .take(MAX_TOPICS)
        .map(truncate_title)
        .collect()
}

/// One slide per paragraph, bullets from its sentences.
pub fn slides(text: &str) -> Vec<Slide> {
    let paragraphs: Vec<&str> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .take(MAX_SLIDES)
        .collect();
    let total = paragraphs.len();
    paragraphs
        .iter()
        .enumerate()
        .map(|(i, paragraph)| {
            let (first, rest) = paragraph.split_once('\n').unwrap_or((paragraph, paragraph));
            Slide {
                title: truncate_title(first.trim().trim_start_matches('#').trim()),
                subtitle: format!("Part {} of {total}", i + 1),
                bullet_points: sentences(rest).into_iter().take(MAX_BULLETS).collect(),
                image_base64: None,
            }
        })
        .collect()
}

/// Fill-in-the-blank questions: the longest word of each sentence is blanked
/// out and becomes the answer; longest words of other sentences are the
/// distractors.
pub fn questions(text: &str, limit: usize) -> Vec<QuizItem> {
    let sentences = sentences(text);
    let keywords: Vec<Option<&str>> = sentences.iter().map(|s| longest_word(s)).collect();

    sentences
        .iter()
        .zip(&keywords)
        .filter_map(|(sentence, keyword)| keyword.map(|k| (sentence, k)))
        .take(limit)
        .map(|(sentence, answer)| {
            let mut options: Vec<String> = vec![answer.to_string()];
            for distractor in keywords.iter().flatten() {
                if options.len() == 4 {
                    break;
                }
                if !options.iter().any(|o| o.eq_ignore_ascii_case(distractor)) {
                    options.push(distractor.to_string());
                }
            }
            options.sort();
            QuizItem {
                question: sentence.replacen(answer, BLANK, 1),
                options,
                answer: answer.to_string(),
                explanation: format!("The text states: \"{sentence}.\""),
            }
        })
        .collect()
}

pub fn announcement(text: &str) -> String {
    match sentences(text).first() {
        Some(first) => format!("Coming up next: {first}! Get ready to dive in."),
        None => "Coming up next: a brand new lesson! Get ready to dive in.".to_string(),
    }
}

fn sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|s| !s.is_empty())
        .collect()
}

fn longest_word(sentence: &str) -> Option<&str> {
    sentence
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| w.chars().count() > 3)
        .fold(None, |best: Option<&str>, w| match best {
            Some(b) if b.chars().count() >= w.chars().count() => Some(b),
            _ => Some(w),
        })
}

fn truncate_title(line: &str) -> String {
    line.chars().take(MAX_TITLE_CHARS).collect()
}
