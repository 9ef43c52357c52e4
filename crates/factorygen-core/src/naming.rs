//! Identifier helpers used to derive model and factory names from tables.
//!
//! Singularization follows common English heuristics. Irregular plurals and
//! singular words ending in `s` that are not listed below go through the
//! suffix rules and may come out wrong (`octopi`, `cactus`); callers treat
//! that as a naming limitation.

const UNCOUNTABLE: &[&str] = &[
    "audio",
    "data",
    "deer",
    "equipment",
    "feedback",
    "fish",
    "information",
    "knowledge",
    "media",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "software",
    "species",
    "staff",
    "traffic",
];

/// Singular words ending in `s`. Their `-es` plurals map back to them.
const SINGULAR_S: &[&str] = &[
    "alias",
    "analysis",
    "atlas",
    "axis",
    "basis",
    "bonus",
    "bus",
    "campus",
    "canvas",
    "census",
    "corpus",
    "crisis",
    "diagnosis",
    "focus",
    "gas",
    "genus",
    "lens",
    "radius",
    "status",
    "synopsis",
    "thesis",
    "virus",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("children", "child"),
    ("cookies", "cookie"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("diagnoses", "diagnosis"),
    ("echoes", "echo"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("halves", "half"),
    ("heroes", "hero"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("mosquitoes", "mosquito"),
    ("movies", "movie"),
    ("oxen", "ox"),
    ("people", "person"),
    ("potatoes", "potato"),
    ("quizzes", "quiz"),
    ("shelves", "shelf"),
    ("synopses", "synopsis"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("tomatoes", "tomato"),
    ("torpedoes", "torpedo"),
    ("vertices", "vertex"),
    ("vetoes", "veto"),
    ("volcanoes", "volcano"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// Upper-case the first character, leaving the rest untouched.
pub fn ucfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert `snake_case` or `kebab-case` into `StudlyCase`.
///
/// Only the first letter of every word is touched, so `API_keys` becomes
/// `APIKeys`.
pub fn studly(value: &str) -> String {
    value
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(ucfirst)
        .collect()
}

/// Model name for a table: camel-cased with a leading capital.
pub fn model_name(table: &str) -> String {
    ucfirst(&studly(table))
}

/// Factory class/file stem for a table, e.g. `user_profiles` → `UserProfileFactory`.
pub fn factory_name(table: &str) -> String {
    format!("{}Factory", singular(&model_name(table)))
}

/// Singularize the last word of an identifier, keeping its casing.
pub fn singular(value: &str) -> String {
    let split = last_word_start(value);
    let (head, word) = value.split_at(split);
    if word.is_empty() {
        return value.to_string();
    }

    let lower = word.to_lowercase();
    let base = singular_word(&lower);
    format!("{head}{}", match_case(word, &base))
}

fn last_word_start(value: &str) -> usize {
    let chars: Vec<(usize, char)> = value.char_indices().collect();
    let mut start = 0;
    for (pos, &(idx, ch)) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            start = idx + ch.len_utf8();
            continue;
        }
        if pos == 0 || !ch.is_uppercase() {
            continue;
        }
        let prev = chars[pos - 1].1;
        let next = chars.get(pos + 1).map(|&(_, next)| next);
        // `UserProfiles` splits before `P`, `APIKeys` before `K`.
        if prev.is_lowercase()
            || prev.is_ascii_digit()
            || (prev.is_uppercase() && next.is_some_and(char::is_lowercase))
        {
            start = idx;
        }
    }
    start
}

fn singular_word(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return (*singular).to_string();
    }

    if SINGULAR_S.contains(&word) {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("es") {
        if SINGULAR_S.contains(&stem) {
            return stem.to_string();
        }
    }

    if word.len() > 3 {
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{stem}y");
        }
    }

    if let Some(stem) = word.strip_suffix("sses") {
        return format!("{stem}ss");
    }

    for suffix in ["xes", "ches", "shes", "zzes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    if word.ends_with("ss") {
        return word.to_string();
    }

    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => word.to_string(),
    }
}

fn match_case(original: &str, value: &str) -> String {
    let letters: Vec<char> = original.chars().filter(|ch| ch.is_alphabetic()).collect();
    if letters.len() > 1 && letters.iter().all(|ch| ch.is_uppercase()) {
        return value.to_uppercase();
    }

    match original.chars().next() {
        Some(first) if first.is_uppercase() => ucfirst(value),
        _ => value.to_string(),
    }
}
