//! Line classification.
//!
//! Each line is matched against a fixed, ordered list of rules; the first rule
//! whose predicate holds decides the tag. Lines no rule claims are paragraph
//! fragments, so classification never fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ClassifiedLine, Tag};

use super::options::HeadingWindow;

/// Harvested contents lines must be shorter than this.
const CONTENTS_ENTRY_MAX_LEN: usize = 50;

const OPENING_QUOTES: [char; 4] = ['"', '“', '«', '„'];
const CLOSING_QUOTES: [char; 3] = ['"', '”', '»'];

static CONTENTS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^sumário$").expect("valid contents regex"));

static PART_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i:parte)\s+(?:(?i:um|dois|três|tres|quatro|cinco|seis|sete|oito|nove|dez)|[IVXLC]+)\b",
    )
    .expect("valid part regex")
});

static CHAPTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:cap[íi]tulo)\s+\d+\b").expect("valid chapter regex"));

static NAMED_SECTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:introdução|notas|referências|bibliografia)$")
        .expect("valid named section regex")
});

static SUBSECTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{Lu}[\p{L}\s,'’-]*:$").expect("valid subsection regex")
});

static NUMBERED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s").expect("valid numbered list regex"));

static FOOTNOTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\s+(.+)$").expect("valid footnote regex"));

static BULLET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[•·▪▫◦‣⁃●○■-]\s+(.*)$").expect("valid bullet regex")
});

static CONTENTS_NUMBERED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s+\w+").expect("valid contents entry regex"));

static CONTENTS_CAPS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Lu}{2,}").expect("valid contents caps regex"));

/// What a rule sees: the line, the next kept line, and the heading bounds.
#[derive(Debug, Clone, Copy)]
pub struct LineInput<'a> {
    /// Normalized line text
    pub text: &'a str,
    /// Next kept line, if any
    pub next: Option<&'a str>,
    /// Heading length bounds
    pub window: &'a HeadingWindow,
}

/// A classification rule: predicate plus the line it produces.
struct Rule {
    name: &'static str,
    matches: fn(&LineInput<'_>) -> bool,
    build: fn(&LineInput<'_>) -> ClassifiedLine,
}

/// Rules in precedence order. The first match wins.
const RULES: &[Rule] = &[
    Rule {
        name: "contents",
        matches: is_contents,
        build: contents,
    },
    Rule {
        name: "part",
        matches: is_part,
        build: part,
    },
    Rule {
        name: "chapter",
        matches: is_chapter,
        build: chapter,
    },
    Rule {
        name: "named section",
        matches: is_named_section,
        build: named_section,
    },
    Rule {
        name: "all-caps section",
        matches: is_all_caps,
        build: caps_section,
    },
    Rule {
        name: "confirmed title",
        matches: is_confirmed_title,
        build: titled_section,
    },
    Rule {
        name: "subsection",
        matches: is_subsection,
        build: subsection,
    },
    Rule {
        name: "quote",
        matches: is_quote,
        build: quote,
    },
    Rule {
        name: "footnote",
        matches: is_footnote,
        build: footnote,
    },
    Rule {
        name: "numbered list",
        matches: is_numbered,
        build: numbered,
    },
    Rule {
        name: "bullet list",
        matches: is_bullet,
        build: bullet,
    },
    Rule {
        name: "blank",
        matches: is_blank,
        build: blank,
    },
    Rule {
        name: "noise",
        matches: is_noise,
        build: noise,
    },
];

/// Maps normalized lines to semantic tags.
#[derive(Debug, Clone, Default)]
pub struct LineClassifier {
    window: HeadingWindow,
}

impl LineClassifier {
    /// Create a classifier with the given heading bounds.
    pub fn new(window: HeadingWindow) -> Self {
        Self { window }
    }

    /// Classify a normalized line, peeking at the next kept line.
    pub fn classify(&self, text: &str, next: Option<&str>) -> ClassifiedLine {
        let input = LineInput {
            text,
            next,
            window: &self.window,
        };
        RULES
            .iter()
            .find(|rule| (rule.matches)(&input))
            .map(|rule| (rule.build)(&input))
            .unwrap_or_else(|| ClassifiedLine::new(Tag::Paragraph, text))
    }

    /// Name of the rule that claims the line, or `"paragraph"` for the fallback.
    pub fn rule_for(&self, text: &str, next: Option<&str>) -> &'static str {
        let input = LineInput {
            text,
            next,
            window: &self.window,
        };
        RULES
            .iter()
            .find(|rule| (rule.matches)(&input))
            .map_or("paragraph", |rule| rule.name)
    }

    /// Rule names in precedence order.
    pub fn rule_names() -> impl Iterator<Item = &'static str> {
        RULES.iter().map(|rule| rule.name)
    }
}

/// Collect table-of-contents lines following a `SUMÁRIO` marker.
///
/// Only the first `limit` lines are scanned. Lines that start with a number
/// followed by a word, or with two uppercase letters (and are short), count.
pub fn harvest_contents<S: AsRef<str>>(lines: &[S], limit: usize) -> Vec<String> {
    lines
        .iter()
        .take(limit)
        .map(|line| line.as_ref().trim())
        .filter(|line| is_contents_entry(line))
        .map(str::to_string)
        .collect()
}

/// Length of the contents block right after a `SUMÁRIO` marker: the leading
/// run of entries and blank lines, scanning at most `limit` lines.
pub fn contents_block_len<S: AsRef<str>>(lines: &[S], limit: usize) -> usize {
    lines
        .iter()
        .take(limit)
        .map(|line| line.as_ref().trim())
        .take_while(|line| line.is_empty() || is_contents_entry(line))
        .count()
}

fn is_contents_entry(line: &str) -> bool {
    CONTENTS_NUMBERED_REGEX.is_match(line)
        || (CONTENTS_CAPS_REGEX.is_match(line) && char_len(line) < CONTENTS_ENTRY_MAX_LEN)
}

/// Title-case a line: the first letter of every word upper, the rest lower.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }
    result
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn is_contents(line: &LineInput<'_>) -> bool {
    CONTENTS_REGEX.is_match(line.text)
}

fn contents(line: &LineInput<'_>) -> ClassifiedLine {
    ClassifiedLine::new(Tag::Contents, line.text)
}

fn is_part(line: &LineInput<'_>) -> bool {
    PART_REGEX.is_match(line.text)
}

fn part(line: &LineInput<'_>) -> ClassifiedLine {
    ClassifiedLine::heading(Tag::Part, line.text, 2)
}

fn is_chapter(line: &LineInput<'_>) -> bool {
    CHAPTER_REGEX.is_match(line.text)
}

fn chapter(line: &LineInput<'_>) -> ClassifiedLine {
    ClassifiedLine::heading(Tag::Chapter, line.text, 2)
}

fn is_named_section(line: &LineInput<'_>) -> bool {
    NAMED_SECTION_REGEX.is_match(line.text)
}

fn named_section(line: &LineInput<'_>) -> ClassifiedLine {
    ClassifiedLine::heading(Tag::NamedSection, title_case(line.text), 2)
}

fn is_all_caps(line: &LineInput<'_>) -> bool {
    let len = char_len(line.text);
    len > line.window.caps_min_len
        && len < line.window.max_len
        && line.text.chars().any(char::is_alphabetic)
        && line.text.chars().all(|c| {
            (c.is_alphabetic() && c.is_uppercase()) || matches!(c, ' ' | '-' | '\'' | '’')
        })
}

fn caps_section(line: &LineInput<'_>) -> ClassifiedLine {
    ClassifiedLine::heading(Tag::Section, title_case(line.text), 3)
}

fn is_confirmed_title(line: &LineInput<'_>) -> bool {
    let mut chars = line.text.chars();
    let starts_like_title = match (chars.next(), chars.next()) {
        (Some(first), Some(second)) => first.is_uppercase() && second.is_lowercase(),
        _ => false,
    };
    let ends_in_word = line.text.chars().last().is_some_and(char::is_lowercase);

    starts_like_title
        && ends_in_word
        && line.window.contains(char_len(line.text))
        && line
            .next
            .is_some_and(|next| char_len(next.trim()) > line.window.confirm_len)
}

fn titled_section(line: &LineInput<'_>) -> ClassifiedLine {
    ClassifiedLine::heading(Tag::Section, line.text, 3)
}

fn is_subsection(line: &LineInput<'_>) -> bool {
    char_len(line.text) < line.window.max_len && SUBSECTION_REGEX.is_match(line.text)
}

fn subsection(line: &LineInput<'_>) -> ClassifiedLine {
    ClassifiedLine::heading(Tag::Subsection, line.text, 4)
}

fn is_quote(line: &LineInput<'_>) -> bool {
    let Some(first) = line.text.chars().next() else {
        return false;
    };
    if !OPENING_QUOTES.contains(&first) {
        return false;
    }
    let rest = &line.text[first.len_utf8()..];
    let Some(close) = rest.find(|c: char| CLOSING_QUOTES.contains(&c)) else {
        return false;
    };
    let attribution = &rest[close..];
    attribution.contains('–') || attribution.contains('—') || attribution.contains(" - ")
}

fn quote(line: &LineInput<'_>) -> ClassifiedLine {
    ClassifiedLine::new(Tag::Quote, line.text)
}

fn is_footnote(line: &LineInput<'_>) -> bool {
    FOOTNOTE_REGEX.is_match(line.text)
}

fn footnote(line: &LineInput<'_>) -> ClassifiedLine {
    let note = FOOTNOTE_REGEX
        .captures(line.text)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str());
    ClassifiedLine::new(Tag::Footnote, note)
}

fn is_numbered(line: &LineInput<'_>) -> bool {
    NUMBERED_REGEX.is_match(line.text)
}

fn numbered(line: &LineInput<'_>) -> ClassifiedLine {
    ClassifiedLine::new(Tag::NumberedListItem, line.text)
}

fn is_bullet(line: &LineInput<'_>) -> bool {
    BULLET_REGEX.is_match(line.text)
}

fn bullet(line: &LineInput<'_>) -> ClassifiedLine {
    let item = BULLET_REGEX
        .captures(line.text)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str());
    ClassifiedLine::new(Tag::BulletListItem, format!("- {}", item))
}

fn is_blank(line: &LineInput<'_>) -> bool {
    line.text.trim().is_empty()
}

fn blank(_line: &LineInput<'_>) -> ClassifiedLine {
    ClassifiedLine::blank()
}

fn is_noise(line: &LineInput<'_>) -> bool {
    char_len(line.text.trim()) == 1
}

fn noise(line: &LineInput<'_>) -> ClassifiedLine {
    ClassifiedLine::new(Tag::Noise, line.text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_LINE: &str =
        "Este é um parágrafo de teste com mais de cinquenta caracteres para passar o filtro.";

    fn classify(text: &str) -> ClassifiedLine {
        LineClassifier::default().classify(text, None)
    }

    #[test]
    fn test_rule_order_is_fixed() {
        let names: Vec<_> = LineClassifier::rule_names().collect();
        assert_eq!(
            names,
            vec![
                "contents",
                "part",
                "chapter",
                "named section",
                "all-caps section",
                "confirmed title",
                "subsection",
                "quote",
                "footnote",
                "numbered list",
                "bullet list",
                "blank",
                "noise",
            ]
        );
    }

    #[test]
    fn test_contents_marker() {
        assert_eq!(classify("SUMÁRIO").tag, Tag::Contents);
        assert_eq!(classify("Sumário").tag, Tag::Contents);
        assert_eq!(classify("Sumário executivo").tag, Tag::Paragraph);
    }

    #[test]
    fn test_part_marker() {
        let line = classify("PARTE UM");
        assert_eq!(line.tag, Tag::Part);
        assert_eq!(line.level, Some(2));
        assert_eq!(line.text, "PARTE UM");

        assert_eq!(classify("PARTE III").tag, Tag::Part);
        assert_eq!(classify("Parte três").tag, Tag::Part);
        assert_eq!(classify("Parte civil do contrato").tag, Tag::Paragraph);
        assert_eq!(classify("Parte dos leitores").tag, Tag::Paragraph);
    }

    #[test]
    fn test_chapter_marker() {
        let line = classify("Capítulo 7");
        assert_eq!(line.tag, Tag::Chapter);
        assert_eq!(line.level, Some(2));
        assert_eq!(classify("CAPÍTULO 12").tag, Tag::Chapter);
        assert_eq!(classify("Capítulo sete").tag, Tag::Paragraph);
    }

    #[test]
    fn test_named_sections_are_level_two() {
        for (text, expected) in [
            ("INTRODUÇÃO", "Introdução"),
            ("Introdução", "Introdução"),
            ("NOTAS", "Notas"),
            ("Notas", "Notas"),
            ("Referências", "Referências"),
            ("BIBLIOGRAFIA", "Bibliografia"),
        ] {
            let line = classify(text);
            assert_eq!(line.tag, Tag::NamedSection, "{}", text);
            assert_eq!(line.level, Some(2));
            assert_eq!(line.text, expected);
        }
        assert_eq!(classify("Notas de campo").tag, Tag::Paragraph);
    }

    #[test]
    fn test_footnote() {
        let line = classify("* Pesquisa publicada em 2017.");
        assert_eq!(line.tag, Tag::Footnote);
        assert_eq!(line.text, "Pesquisa publicada em 2017.");
        assert_eq!(classify("*ênfase* no texto").tag, Tag::Paragraph);
    }

    #[test]
    fn test_all_caps_section() {
        let line = classify("ONDE TUDO COMEÇOU");
        assert_eq!(line.tag, Tag::Section);
        assert_eq!(line.level, Some(3));
        assert_eq!(line.text, "Onde Tudo Começou");
    }

    #[test]
    fn test_all_caps_length_bounds() {
        // Five characters or fewer is too short
        assert_eq!(classify("FIM").tag, Tag::Paragraph);
        assert_eq!(classify("TEMPO").tag, Tag::Paragraph);
        assert_eq!(classify("AGORA!").tag, Tag::Paragraph);

        let long = "UMA LINHA TODA EM MAIÚSCULAS QUE É LONGA DEMAIS PARA SER TÍTULO";
        assert_ne!(classify(long).tag, Tag::Section);
    }

    #[test]
    fn test_confirmed_title_requires_long_next_line() {
        let classifier = LineClassifier::default();

        let confirmed = classifier.classify("Como funciona a memória", Some(LONG_LINE));
        assert_eq!(confirmed.tag, Tag::Section);
        assert_eq!(confirmed.level, Some(3));
        assert_eq!(confirmed.text, "Como funciona a memória");

        let unconfirmed = classifier.classify("Como funciona a memória", Some("Curta."));
        assert_eq!(unconfirmed.tag, Tag::Paragraph);

        let last_line = classifier.classify("Como funciona a memória", None);
        assert_eq!(last_line.tag, Tag::Paragraph);
    }

    #[test]
    fn test_confirmed_title_window() {
        let classifier = LineClassifier::default();
        // Too short for the window
        assert_eq!(classifier.classify("Resumo", Some(LONG_LINE)).tag, Tag::Paragraph);
        // Ends with punctuation
        assert_eq!(
            classifier.classify("Como funciona a memória.", Some(LONG_LINE)).tag,
            Tag::Paragraph
        );
    }

    #[test]
    fn test_subsection() {
        let line = classify("Entendendo o método:");
        assert_eq!(line.tag, Tag::Subsection);
        assert_eq!(line.level, Some(4));
        assert_eq!(classify("Ele disse: venha.").tag, Tag::Paragraph);
    }

    #[test]
    fn test_quote() {
        let text = "\"A vida começa no fim da sua zona de conforto.\" – Autor X";
        let line = classify(text);
        assert_eq!(line.tag, Tag::Quote);
        assert_eq!(line.text, text);

        assert_eq!(classify("“Menos é mais.” — Mies").tag, Tag::Quote);
        assert_eq!(classify("\"Sem atribuição.\"").tag, Tag::Paragraph);
        assert_eq!(classify("\"Sem fechamento – Autor").tag, Tag::Paragraph);
    }

    #[test]
    fn test_numbered_list() {
        let line = classify("1. Capturar o que ressoa");
        assert_eq!(line.tag, Tag::NumberedListItem);
        assert_eq!(line.text, "1. Capturar o que ressoa");
        assert_eq!(classify("2) Organizar").tag, Tag::NumberedListItem);
        assert_eq!(classify("1.5 milhão de leitores").tag, Tag::Paragraph);
    }

    #[test]
    fn test_bullet_list() {
        assert_eq!(classify("• Projetos").text, "- Projetos");
        assert_eq!(classify("▪ Áreas").text, "- Áreas");
        assert_eq!(classify("◦ Recursos").text, "- Recursos");
        assert_eq!(classify("- Arquivos").tag, Tag::BulletListItem);
    }

    #[test]
    fn test_blank_and_noise() {
        assert_eq!(classify("").tag, Tag::Blank);
        assert_eq!(classify("   ").tag, Tag::Blank);
        assert_eq!(classify("•").tag, Tag::Noise);
        assert_eq!(classify("a").tag, Tag::Noise);
    }

    #[test]
    fn test_fallback_is_paragraph() {
        let line = classify("Texto normal.");
        assert_eq!(line.tag, Tag::Paragraph);
        assert_eq!(line.text, "Texto normal.");
        assert_eq!(line.level, None);
    }

    #[test]
    fn test_precedence_part_before_caps() {
        // Also all-caps, but the part rule comes first
        assert_eq!(classify("PARTE DOIS").tag, Tag::Part);
        assert_eq!(
            LineClassifier::default().rule_for("PARTE DOIS", None),
            "part"
        );
        assert_eq!(
            LineClassifier::default().rule_for("qualquer coisa", None),
            "paragraph"
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = LineClassifier::default();
        for text in ["PARTE UM", "", "ONDE TUDO COMEÇOU", "• item", "x", LONG_LINE] {
            let first = classifier.classify(text, Some(LONG_LINE));
            for _ in 0..5 {
                assert_eq!(classifier.classify(text, Some(LONG_LINE)), first);
            }
        }
    }

    #[test]
    fn test_harvest_contents() {
        let lines = vec![
            "PARTE UM",
            "1 Onde tudo começou",
            "uma linha qualquer",
            "INTRODUÇÃO",
            "2 O que é um Segundo Cérebro",
        ];
        let contents = harvest_contents(&lines, 50);
        assert_eq!(
            contents,
            vec![
                "PARTE UM",
                "1 Onde tudo começou",
                "INTRODUÇÃO",
                "2 O que é um Segundo Cérebro",
            ]
        );

        assert_eq!(harvest_contents(&lines, 2).len(), 2);
    }

    #[test]
    fn test_contents_block_stops_at_prose() {
        let lines = vec![
            "1 Onde tudo começou",
            "",
            "PARTE UM",
            "Uma linha de texto corrido depois do sumário.",
            "2 Outra entrada",
        ];
        assert_eq!(contents_block_len(&lines, 50), 3);
        assert_eq!(contents_block_len(&lines, 1), 1);
        assert_eq!(contents_block_len(&["Texto corrido."], 50), 0);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("ONDE TUDO COMEÇOU"), "Onde Tudo Começou");
        assert_eq!(title_case("D'ÁGUA E SAL"), "D'Água E Sal");
        assert_eq!(title_case("AUTO-AJUDA"), "Auto-Ajuda");
    }
}
