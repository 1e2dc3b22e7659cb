/*!
 * Language utilities for ISO language code handling.
 *
 * MKVToolNix reports track languages as ISO 639-2/B codes ("jpn", "eng",
 * "fre", "ger"). Configured target languages are validated here and brought
 * into that form so the classifier can compare codes verbatim.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

// (bibliographic, terminologic) pairs where the two ISO 639-2 forms differ
const PART2B_TO_PART2T: [(&str, &str); 18] = [
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    PART2B_TO_PART2T.iter().find(|(b, _)| *b == code).map(|(_, t)| *t)
}

fn part2t_to_part2b(code: &str) -> Option<&'static str> {
    PART2B_TO_PART2T.iter().find(|(_, t)| *t == code).map(|(b, _)| *b)
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part1);
        }
    } else if normalized_code.len() == 3 {
        // 639-2/B takes precedence so "fre" is never reported as 639-3
        if part2b_to_part2t(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part2B);
        }
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part2T);
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to the ISO 639-2/B form used in Matroska track headers
///
/// Two-letter codes are widened ("ja" → "jpn"), terminologic codes with a
/// distinct bibliographic form are mapped ("fra" → "fre").
pub fn normalize_to_part2b(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    let part2t = match validate_language_code(&normalized_code)? {
        LanguageCodeType::Part2B => return Ok(normalized_code),
        LanguageCodeType::Part2T => normalized_code,
        LanguageCodeType::Part1 => Language::from_639_1(&normalized_code)
            .map(|lang| lang.to_639_3().to_string())
            .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?,
    };

    Ok(part2t_to_part2b(&part2t)
        .map(str::to_string)
        .unwrap_or(part2t))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    let lang = match validate_language_code(&normalized_code)? {
        LanguageCodeType::Part1 => Language::from_639_1(&normalized_code),
        LanguageCodeType::Part2T => Language::from_639_3(&normalized_code),
        LanguageCodeType::Part2B => {
            part2b_to_part2t(&normalized_code).and_then(Language::from_639_3)
        }
    }
    .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}
