//! Canonicalisation du texte brut avant résolution des cellules.
//!
//! Le braille n'a pas de glyphes numériques : `0`..`9` réutilisent les lettres
//! `a`..`j`, et chaque suite de chiffres est précédée d'un indicateur `#`.

use bg_core::config::UnknownPolicy;
use bg_core::error::BrailleError;
use bg_core::table::LookupTable;

/// Indicateur numérique inséré une fois par suite de chiffres.
pub const NUMBER_SIGN: char = '#';

/// Map a single-digit token to its braille letter (`"0"` → `'a'`, …, `"9"` → `'j'`).
///
/// # Errors
/// Returns [`BrailleError::InvalidNumeral`] unless `token` is exactly one ASCII digit.
///
/// # Example
/// ```
/// use bg_braille::normalize::numeral_to_letter;
/// assert_eq!(numeral_to_letter("0").unwrap(), 'a');
/// assert_eq!(numeral_to_letter("9").unwrap(), 'j');
/// assert!(numeral_to_letter("12").is_err());
/// assert!(numeral_to_letter("x").is_err());
/// ```
pub fn numeral_to_letter(token: &str) -> Result<char, BrailleError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => digit_to_letter(c),
        _ => Err(BrailleError::InvalidNumeral {
            token: token.to_string(),
        }),
    }
}

#[inline]
fn digit_to_letter(c: char) -> Result<char, BrailleError> {
    if c.is_ascii_digit() {
        Ok(char::from(c as u8 - b'0' + b'a'))
    } else {
        Err(BrailleError::InvalidNumeral {
            token: c.to_string(),
        })
    }
}

/// Lowercase, filter (lenient policy only), then re-encode digit runs.
///
/// # Errors
/// Propagates [`BrailleError::InvalidNumeral`]; unreachable for well-formed digit runs.
///
/// # Example
/// ```
/// use bg_braille::normalize::normalize;
/// use bg_core::{LookupTable, UnknownPolicy};
/// let table = LookupTable::builtin().unwrap();
/// assert_eq!(normalize("test123!", &table, UnknownPolicy::Strict).unwrap(), "test#bcd!");
/// ```
pub fn normalize(text: &str, table: &LookupTable, policy: UnknownPolicy) -> Result<String, BrailleError> {
    let lowered = text.to_lowercase();

    let kept = match policy {
        UnknownPolicy::Strict => lowered,
        UnknownPolicy::Lenient => {
            let (kept, dropped): (String, String) = lowered.chars().partition(|&c| table.knows(c));
            if !dropped.is_empty() {
                log::warn!("Caractères non pris en charge ignorés : {dropped:?} ; texte filtré : {kept:?}");
                log::debug!(
                    "Alphabet connu : {:?}",
                    table.alphabet().into_iter().collect::<String>()
                );
            }
            kept
        }
    };

    encode_numerals(&kept)
}

fn encode_numerals(text: &str) -> Result<String, BrailleError> {
    let mut out = String::with_capacity(text.len() + 4);
    let mut in_run = false;
    for c in text.chars() {
        if c.is_ascii_digit() {
            if !in_run {
                out.push(NUMBER_SIGN);
                in_run = true;
            }
            out.push(digit_to_letter(c)?);
        } else {
            in_run = false;
            out.push(c);
        }
    }
    Ok(out)
}
