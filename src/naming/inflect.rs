//! Word inflection and identifier helpers

use regex::Regex;
use std::sync::LazyLock;

/// Maximum number of candidates tried when disambiguating a name
pub const MAX_NAME_ATTEMPTS: usize = 1000;

/// Words with identical singular and plural forms
const UNCOUNTABLE: &[&str] = &[
    "adulthood",
    "advice",
    "agenda",
    "aid",
    "aircraft",
    "alcohol",
    "ammo",
    "analytics",
    "anime",
    "athletics",
    "audio",
    "bison",
    "blood",
    "bream",
    "buffalo",
    "butter",
    "carp",
    "cash",
    "chassis",
    "chess",
    "clothing",
    "cod",
    "commerce",
    "cooperation",
    "corps",
    "debris",
    "diabetes",
    "digestion",
    "elk",
    "energy",
    "equipment",
    "excretion",
    "expertise",
    "firmware",
    "flounder",
    "fun",
    "gallows",
    "garbage",
    "graffiti",
    "hardware",
    "headquarters",
    "health",
    "herpes",
    "highjinks",
    "homework",
    "housework",
    "information",
    "jeans",
    "justice",
    "kudos",
    "labour",
    "literature",
    "machinery",
    "mackerel",
    "mail",
    "media",
    "mews",
    "moose",
    "music",
    "mud",
    "manga",
    "news",
    "only",
    "personnel",
    "pike",
    "plankton",
    "pliers",
    "police",
    "pollution",
    "premises",
    "rain",
    "research",
    "rice",
    "salmon",
    "scissors",
    "series",
    "sewage",
    "shambles",
    "shrimp",
    "software",
    "species",
    "staff",
    "swine",
    "tennis",
    "traffic",
    "transportation",
    "trout",
    "tuna",
    "wealth",
    "welfare",
    "whiting",
    "wildebeest",
    "wildlife",
    "you",
];

/// Irregular `(singular, plural)` pairs; for a shared plural the last pair wins
const IRREGULAR: &[(&str, &str)] = &[
    // Pronouns
    ("i", "we"),
    ("me", "us"),
    ("he", "they"),
    ("she", "they"),
    ("them", "them"),
    ("myself", "ourselves"),
    ("yourself", "yourselves"),
    ("itself", "themselves"),
    ("herself", "themselves"),
    ("himself", "themselves"),
    ("themself", "themselves"),
    ("is", "are"),
    ("was", "were"),
    ("has", "have"),
    ("this", "these"),
    ("that", "those"),
    // Consonant followed by `o`
    ("echo", "echoes"),
    ("dingo", "dingoes"),
    ("volcano", "volcanoes"),
    ("tornado", "tornadoes"),
    ("torpedo", "torpedoes"),
    // Ending in `us`
    ("genus", "genera"),
    ("viscus", "viscera"),
    // Ending in `ma`
    ("stigma", "stigmata"),
    ("stoma", "stomata"),
    ("dogma", "dogmata"),
    ("lemma", "lemmata"),
    ("schema", "schemata"),
    ("anathema", "anathemata"),
    // Other
    ("ox", "oxen"),
    ("axe", "axes"),
    ("die", "dice"),
    ("yes", "yeses"),
    ("foot", "feet"),
    ("eave", "eaves"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("quiz", "quizzes"),
    ("human", "humans"),
    ("proof", "proofs"),
    ("carve", "carves"),
    ("valve", "valves"),
    ("looey", "looies"),
    ("thief", "thieves"),
    ("groove", "grooves"),
    ("pickaxe", "pickaxes"),
    ("passerby", "passersby"),
    ("canvas", "canvases"),
];

/// Singular suffix rules, highest priority first
static SINGULAR_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // Uncountable patterns keep the word unchanged
        (r"(?i)pok[eé]mon$", "${0}"),
        (r"(?i)[^aeiou]ese$", "${0}"),
        (r"(?i)deer$", "${0}"),
        (r"(?i)fish$", "${0}"),
        (r"(?i)measles$", "${0}"),
        (r"(?i)o[iu]s$", "${0}"),
        (r"(?i)pox$", "${0}"),
        (r"(?i)sheep$", "${0}"),
        (r"(?i)men$", "man"),
        (r"(?i)(eau)x?$", "${1}"),
        (r"(?i)(child)ren$", "${1}"),
        (r"(?i)(pe)(rson|ople)$", "${1}rson"),
        (r"(?i)(matr|append)ices$", "${1}ix"),
        (r"(?i)(cod|mur|sil|vert|ind)ices$", "${1}ex"),
        (r"(?i)(alumn|alg|vertebr)(?:a|ae)$", "${1}a"),
        (
            r"(?i)(apheli|hyperbat|periheli|asyndet|noumen|phenomen|criteri|organ|prolegomen|hedr|automat)(?:a|on)$",
            "${1}on",
        ),
        (
            r"(?i)(agend|addend|millenni|dat|extrem|bacteri|desiderat|strat|candelabr|errat|ov|symposi|curricul|quor)a$",
            "${1}um",
        ),
        (
            r"(?i)(alumn|syllab|vir|radi|nucle|fung|cact|stimul|termin|bacill|foc|uter|loc|strat)(?:us|i)$",
            "${1}us",
        ),
        (r"(?i)(test)(?:is|es)$", "${1}is"),
        (r"(?i)(movie|twelve|abuse|e[mn]u)s$", "${1}"),
        (
            r"(?i)(analy|diagno|parenthe|progno|synop|the|empha|cri|ne)(?:sis|ses)$",
            "${1}sis",
        ),
        (
            r"(?i)(x|ch|ss|sh|zz|tto|go|cho|alias|[^aou]us|t[lm]as|gas|(?:her|at|gr)o|[aeiou]ris)(?:es)?$",
            "${1}",
        ),
        (r"(?i)(seraph|cherub)im$", "${1}"),
        (r"(?i)\b((?:tit)?m|l)ice$", "${1}ouse"),
        (r"(?i)\b(mon|smil)ies$", "${1}ey"),
        (
            r"(?i)\b(l|(?:neck|cross|hog|aun)?t|coll|faer|food|gen|goon|group|hipp|junk|vegg|(?:pork)?p|charl|calor|cut)ies$",
            "${1}ie",
        ),
        (
            r"(?i)(dg|ss|ois|lk|ok|wn|mb|th|ch|ec|oal|is|ck|ix|sser|ts|wb)ies$",
            "${1}ie",
        ),
        (r"(?i)ies$", "y"),
        (r"(?i)(ar|(?:wo|[ae])l|[eo][ao])ves$", "${1}f"),
        (
            r"(?i)(wi|kni|(?:after|half|high|low|mid|non|night|[^\w]|^)li)ves$",
            "${1}fe",
        ),
        (r"(?i)(ss)$", "${1}"),
        (r"(?i)s$", ""),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

static TYPE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*$").unwrap());

static KEY_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap());

// ============================================================================
// Singularization
// ============================================================================

/// Convert a plural word to its singular form
///
/// The case of the replaced part is restored from the original word, so
/// `"UserAccounts"` becomes `"UserAccount"`.
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let token = word.to_lowercase();
    if IRREGULAR.iter().any(|(singular, _)| *singular == token) {
        return restore_case(word, &token);
    }
    if let Some((singular, _)) = IRREGULAR.iter().rev().find(|(_, plural)| *plural == token) {
        return restore_case(word, singular);
    }
    if UNCOUNTABLE.contains(&token.as_str()) {
        return word.to_string();
    }

    for (re, replacement) in SINGULAR_RULES.iter() {
        if let Some(caps) = re.captures(word) {
            let Some(matched) = caps.get(0) else {
                continue;
            };
            let mut replaced = String::new();
            caps.expand(replacement, &mut replaced);

            let mut out = String::with_capacity(word.len());
            out.push_str(&word[..matched.start()]);
            if matched.as_str().is_empty() {
                out.push_str(&replaced);
            } else {
                out.push_str(&restore_case(matched.as_str(), &replaced));
            }
            out.push_str(&word[matched.end()..]);
            return out;
        }
    }

    word.to_string()
}

/// Apply the casing of `word` to `token`
fn restore_case(word: &str, token: &str) -> String {
    if word == token {
        return token.to_string();
    }
    if word == word.to_lowercase() {
        return token.to_lowercase();
    }
    if word == word.to_uppercase() {
        return token.to_uppercase();
    }
    if word.chars().next().is_some_and(char::is_uppercase) {
        return capitalize(&token.to_lowercase());
    }
    token.to_lowercase()
}

// ============================================================================
// Casing
// ============================================================================

/// Upper-case the first character
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split text into words at separators, case humps and letter/digit boundaries
pub fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();

    for chunk in s.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut current = String::new();

        for (i, &c) in chars.iter().enumerate() {
            if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
                let next = chars.get(i + 1).copied();
                let boundary = (prev.is_lowercase() && c.is_uppercase())
                    || (prev.is_alphabetic() && c.is_numeric())
                    || (prev.is_numeric() && c.is_alphabetic())
                    || (prev.is_uppercase()
                        && c.is_uppercase()
                        && next.is_some_and(char::is_lowercase));
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

/// Fold Latin-1 and Latin Extended-A letters to basic Latin and drop combining marks
pub fn deburr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if is_combining_mark(c) {
            continue;
        }
        match fold_latin(c) {
            Some(folded) => out.push_str(folded),
            None => out.push(c),
        }
    }
    out
}

fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036f}' | '\u{fe20}'..='\u{fe2f}' | '\u{20d0}'..='\u{20ff}')
}

fn fold_latin(c: char) -> Option<&'static str> {
    let folded = match c {
        'À'..='Å' | 'Ā' | 'Ă' | 'Ą' => "A",
        'à'..='å' | 'ā' | 'ă' | 'ą' => "a",
        'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => "C",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'Ð' | 'Ď' | 'Đ' => "D",
        'ð' | 'ď' | 'đ' => "d",
        'È'..='Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => "E",
        'è'..='ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => "G",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'Ĥ' | 'Ħ' => "H",
        'ĥ' | 'ħ' => "h",
        'Ì'..='Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => "I",
        'ì'..='ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'Ĵ' => "J",
        'ĵ' => "j",
        'Ķ' => "K",
        'ķ' | 'ĸ' => "k",
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => "L",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' | 'Ŋ' => "N",
        'ñ' | 'ń' | 'ņ' | 'ň' | 'ŋ' => "n",
        'Ò'..='Ö' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => "O",
        'ò'..='ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'Ŕ' | 'Ŗ' | 'Ř' => "R",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => "S",
        'ś' | 'ŝ' | 'ş' | 'š' | 'ſ' => "s",
        'Ţ' | 'Ť' | 'Ŧ' => "T",
        'ţ' | 'ť' | 'ŧ' => "t",
        'Ù'..='Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => "U",
        'ù'..='ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'Ŵ' => "W",
        'ŵ' => "w",
        'Ý' | 'Ŷ' | 'Ÿ' => "Y",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'Ź' | 'Ż' | 'Ž' => "Z",
        'ź' | 'ż' | 'ž' => "z",
        'Æ' => "Ae",
        'æ' => "ae",
        'Þ' => "Th",
        'þ' => "th",
        'ß' => "ss",
        'Ĳ' => "IJ",
        'ĳ' => "ij",
        'Œ' => "Oe",
        'œ' => "oe",
        'ŉ' => "'n",
        _ => return None,
    };
    Some(folded)
}

/// Convert a key to camel case (`first_name` → `firstName`)
///
/// Accents are folded and apostrophes dropped before splitting, so
/// `user's name` becomes `usersName`.
pub fn camel_case(s: &str) -> String {
    let cleaned = deburr(s).replace(|c: char| c == '\'' || c == '\u{2019}', "");
    split_words(&cleaned)
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i == 0 {
                lower
            } else {
                capitalize(&lower)
            }
        })
        .collect()
}

/// Capitalize each whitespace-separated segment and concatenate them
pub fn pascal_case(s: &str) -> String {
    s.split_whitespace().map(capitalize).collect()
}

// ============================================================================
// Identifiers
// ============================================================================

/// Strip characters that are not allowed in a type name
pub fn normalize_type_name(name: &str) -> String {
    if TYPE_NAME_REGEX.is_match(name) {
        return name.to_string();
    }

    let stripped: String = name.chars().filter(char::is_ascii_alphanumeric).collect();
    if stripped.starts_with(|c: char| c.is_ascii_alphabetic()) {
        stripped
    } else {
        format!("_{stripped}")
    }
}

/// Check if a key can be written without quotes
pub fn is_valid_key(key: &str) -> bool {
    KEY_NAME_REGEX.is_match(key)
}

/// Pick `name`, or `name2`, `name3`, ... whichever is not yet taken
pub fn unique_by_increment(name: &str, is_taken: impl Fn(&str) -> bool) -> Option<String> {
    (0..MAX_NAME_ATTEMPTS)
        .map(|i| {
            if i == 0 {
                name.to_string()
            } else {
                format!("{name}{}", i + 1)
            }
        })
        .find(|candidate| !is_taken(candidate))
}
