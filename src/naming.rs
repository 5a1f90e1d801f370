//! Naming - Symbol Derivation
//!
//! File base name -> words -> PascalCase + suffix.
//! The exported symbol and the file stem are always the same string.

/// Suffix appended to every derived symbol unless configured otherwise
pub const DEFAULT_SYMBOL_SUFFIX: &str = "Icon";

/// Last path segment, accepting both `/` and `\` separators
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Base name with its final extension removed; `.svg` alone has an empty stem
pub fn file_stem(path: &str) -> &str {
    let base = base_name(path);
    match base.rfind('.') {
        Some(idx) => &base[..idx],
        None => base,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
}

fn classify(c: char) -> CharClass {
    if c.is_numeric() {
        CharClass::Digit
    } else if c.is_uppercase() {
        CharClass::Upper
    } else {
        CharClass::Lower
    }
}

/// Split a name into words.
///
/// Non-alphanumeric characters separate words. Inside an alphanumeric run a
/// new word starts at a lower->upper transition (`arrowLeft`), before the
/// last capital of an acronym followed by lowercase (`XMLHttp` -> `XML`,
/// `Http`), and at every letter/digit boundary (`icon2x` -> `icon`, `2`, `x`).
/// Apostrophes are dropped rather than treated as separators.
pub fn split_words(name: &str) -> Vec<String> {
    let cleaned: String = name.chars().filter(|c| *c != '\'' && *c != '\u{2019}').collect();
    let mut words = vec![];

    for run in cleaned.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = run.chars().collect();
        let mut current = String::new();

        for (i, &c) in chars.iter().enumerate() {
            if i > 0 {
                let prev = classify(chars[i - 1]);
                let cur = classify(c);
                let next = chars.get(i + 1).map(|n| classify(*n));

                let boundary = match (prev, cur) {
                    (CharClass::Lower, CharClass::Upper) => true,
                    (CharClass::Upper, CharClass::Upper) => next == Some(CharClass::Lower),
                    (CharClass::Digit, CharClass::Digit) => false,
                    (CharClass::Digit, _) | (_, CharClass::Digit) => true,
                    _ => false,
                };

                if boundary && !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }

        if !current.is_empty() {
            words.push(current);
        }
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `"arrow-left"` -> `"ArrowLeft"`
pub fn pascal_case(name: &str) -> String {
    split_words(name).iter().map(|w| capitalize(w)).collect()
}

/// Symbol for an image path: PascalCase of the file stem plus `suffix`
pub fn symbol_name(path: &str, suffix: &str) -> String {
    format!("{}{}", pascal_case(file_stem(path)), suffix)
}

/// Whether `name` can be used as an exported identifier in generated TSX
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}
