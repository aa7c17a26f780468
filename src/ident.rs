//! Identifier parsing and case conversion for GraphQL field names.
//!
//! Rust field identifiers (`database_id`) and MixedCaps type-style
//! identifiers (`DatabaseID`) both resolve to the lowerCamelCase name a
//! GraphQL server expects (`databaseId`).

/// Initialisms recognised when splitting a run of capitals into words.
const INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
    "IP", "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS",
    "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF", "XSS",
];

/// An identifier split into words, plus any leading non-letter prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Name {
    prefix: String,
    words: Vec<String>,
}

impl Name {
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Joins the words as lowerCamelCase: the first word fully lower-cased,
    /// each following word with a leading capital.
    pub fn to_lower_camel_case(&self) -> String {
        let mut out = self.prefix.clone();
        for (i, word) in self.words.iter().enumerate() {
            if i == 0 {
                out.push_str(&word.to_lowercase());
                continue;
            }
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(&chars.as_str().to_lowercase());
            }
        }
        out
    }
}

/// Splits `ident` into words.
///
/// Words break at lower→Upper and digit→Upper transitions, before the last
/// capital of an acronym run that is followed by a lower-case letter
/// (`HTTPServer` → `HTTP`, `Server`), and at underscores. The plural `IDs`
/// stays a single word. Leading characters that are not letters are kept
/// as a prefix, so `__typename` passes through untouched.
pub fn parse_mixed_caps(ident: &str) -> Name {
    let body_start = ident
        .char_indices()
        .find(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| i)
        .unwrap_or(ident.len());
    let (prefix, body) = ident.split_at(body_start);

    let mut words = Vec::new();
    for segment in body.split('_').filter(|s| !s.is_empty()) {
        split_segment(segment, &mut words);
    }

    Name {
        prefix: prefix.to_string(),
        words,
    }
}

/// Converts an identifier to its lowerCamelCase GraphQL field name.
pub fn to_lower_camel_case(ident: &str) -> String {
    parse_mixed_caps(ident).to_lower_camel_case()
}

fn split_segment(segment: &str, words: &mut Vec<String>) {
    let runes: Vec<char> = segment.chars().collect();
    let mut start = 0;

    for i in 0..runes.len() {
        let end_of_word = if i + 1 == runes.len() {
            true
        } else if (runes[i].is_lowercase() || runes[i].is_numeric()) && runes[i + 1].is_uppercase()
        {
            true
        } else if i + 2 < runes.len()
            && runes[i].is_uppercase()
            && runes[i + 1].is_uppercase()
            && runes[i + 2].is_lowercase()
        {
            // "IDs" is the plural of an initialism, not "I" + "Ds".
            runes[i..i + 3] != ['I', 'D', 's']
        } else {
            false
        };

        if !end_of_word {
            continue;
        }

        let word: String = runes[start..=i].iter().collect();
        match split_two_initialisms(&word) {
            Some((first, second)) => {
                words.push(first);
                words.push(second);
            }
            None => words.push(word),
        }
        start = i + 1;
    }
}

/// Splits an all-capitals word such as `HTTPURL` made of two initialisms.
fn split_two_initialisms(word: &str) -> Option<(String, String)> {
    if !word.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return None;
    }
    // Shortest initialism is two characters long.
    (2..=word.len().saturating_sub(2)).find_map(|i| {
        let (head, tail) = word.split_at(i);
        (INITIALISMS.contains(&head) && INITIALISMS.contains(&tail))
            .then(|| (head.to_string(), tail.to_string()))
    })
}
