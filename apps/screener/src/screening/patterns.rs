//! Pattern library — static keyword tables and compiled regexes shared by the
//! bias, redaction, and ranking analyzers.
//!
//! The lists are tuning data. Scores are only comparable across deployments
//! while these tables stay byte-for-byte the same, so edit them deliberately.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    // Every pattern in this file is a literal checked by the tests below.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| compile(p)).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Bias detection
// ────────────────────────────────────────────────────────────────────────────

pub const MALE_TERMS: &[&str] = &[
    "he", "him", "his", "man", "men", "boy", "boys", "male", "masculine", "gentleman", "mr", "sir",
];

pub const FEMALE_TERMS: &[&str] = &[
    "she", "her", "hers", "woman", "women", "girl", "girls", "female", "feminine", "lady", "ms",
    "mrs", "miss",
];

pub const NEUTRAL_TERMS: &[&str] = &[
    "they",
    "them",
    "their",
    "person",
    "people",
    "individual",
    "candidate",
    "applicant",
];

pub static AGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"(?i)\b\d{1,2}\s*(?:years?|yrs?|yo)\b",
        r"(?i)\b(?:young|old|senior|junior|experienced|inexperienced)\b",
        r"(?i)\b(?:fresh|recent|new)\s*(?:graduate|grad)\b",
        r"(?i)\b(?:mid|late|early)\s*\d{1,2}s\b",
    ])
});

pub const AGE_TERMS: &[&str] = &[
    "young",
    "old",
    "senior",
    "junior",
    "experienced",
    "inexperienced",
    "fresh graduate",
];

pub const LOCATION_TERMS: &[&str] = &[
    "international",
    "domestic",
    "local",
    "foreign",
    "overseas",
    "immigrant",
    "migrant",
    "expat",
    "native",
    "citizen",
];

pub static LOCATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"(?i)\b(?:from|in|at)\s+(?:[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\b",
        r"(?i)\b(?:asian|african|european|american|middle eastern)\b",
    ])
});

pub const EDUCATION_TERMS: &[&str] = &[
    "ivy league",
    "top-tier",
    "prestigious",
    "elite",
    "ivy",
    "harvard",
    "stanford",
    "mit",
    "oxford",
    "cambridge",
];

pub static PRESTIGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"(?i)\b(?:ranked|top|best|leading|premier)\s+(?:university|college|school|institution)\b",
        r"(?i)\b(?:tier|elite|prestigious|ivy)\b",
    ])
});

// ────────────────────────────────────────────────────────────────────────────
// Redaction
// ────────────────────────────────────────────────────────────────────────────

/// Name shapes, applied in this order: First Last, First M. Last, First Middle Last.
pub static NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"\b[A-Z][a-z]+\s+[A-Z][a-z]+\b",
        r"\b[A-Z][a-z]+\s+[A-Z]\.\s*[A-Z][a-z]+\b",
        r"\b[A-Z][a-z]+\s+[A-Z][a-z]+\s+[A-Z][a-z]+\b",
    ])
});

/// Capitalized word pairs that are never names.
pub const NAME_DENY_LIST: &[&str] = &["This Is", "That Is", "It Is"];

/// Label and salutation words that commonly precede a name. A name match
/// starting with one of these is retried from the following word.
pub const NAME_LEAD_WORDS: &[&str] = &[
    "Contact", "Email", "Phone", "Call", "Name", "Candidate", "Applicant", "Resume", "Dear",
    "Hello", "Hi", "Mr", "Mrs", "Ms", "Miss", "Dr", "Prof",
];

pub static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b"));

/// Optional country code, then 3-3-4 digit groups with flexible separators.
/// A parenthesised area code is part of the match, parentheses included.
pub static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?:(?:\+|\b)1[-.\s]?)?(?:\(([0-9]{3})\)|\b([0-9]{3}))[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})\b",
    )
});

/// Any number followed by word/number tokens. Spans lines.
pub static ADDRESS_PERMISSIVE_PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(r"\b\d+\s+[A-Za-z0-9\s,.-]+\b"));

/// A house number, up to four name tokens, and a street suffix on one line.
pub static ADDRESS_STRICT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"\b\d+[ \t]+(?:[A-Za-z0-9.'-]+[ \t]+){0,4}(?i:street|st|avenue|ave|road|rd|boulevard|blvd|lane|ln|drive|dr|court|ct|way|place|pl)\b\.?",
    )
});

/// Permissive matches with more whitespace tokens than this are addresses.
pub const ADDRESS_MIN_TOKENS_EXCLUSIVE: usize = 3;

pub const NAME_PLACEHOLDER: &str = "[NAME REMOVED]";
pub const EMAIL_PLACEHOLDER: &str = "[EMAIL REMOVED]";
pub const PHONE_PLACEHOLDER: &str = "[PHONE REMOVED]";
pub const ADDRESS_PLACEHOLDER: &str = "[ADDRESS REMOVED]";

// ────────────────────────────────────────────────────────────────────────────
// Ranking
// ────────────────────────────────────────────────────────────────────────────

pub const LEADERSHIP_KEYWORDS: &[&str] = &[
    "lead", "manage", "direct", "supervise", "mentor", "guide", "influence",
];
pub const COLLABORATION_KEYWORDS: &[&str] = &[
    "team",
    "collaborate",
    "cooperate",
    "partnership",
    "together",
    "group",
    "collective",
];
pub const INNOVATION_KEYWORDS: &[&str] = &[
    "innovate",
    "creative",
    "innovative",
    "research",
    "develop",
    "design",
    "pioneer",
];
pub const EXCELLENCE_KEYWORDS: &[&str] = &[
    "quality",
    "excellence",
    "best",
    "superior",
    "outstanding",
    "exceptional",
    "premium",
];
pub const INTEGRITY_KEYWORDS: &[&str] = &[
    "ethical",
    "honest",
    "transparent",
    "responsible",
    "accountable",
    "trustworthy",
];
pub const GROWTH_KEYWORDS: &[&str] = &[
    "learn", "grow", "develop", "improve", "advance", "progress", "evolve",
];

pub static RAPID_GROWTH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"(?i)promoted?\s+within\s+\d+\s+(?:year|month)s?",
        r"(?i)advanced\s+quickly",
        r"(?i)fast\s+track",
        r"(?i)accelerated\s+career",
    ])
});

pub static STEADY_PROGRESSION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"(?i)promoted?\s+(?:\d+\s+times?|multiple\s+times?)",
        r"(?i)steady\s+advancement",
        r"(?i)consistent\s+growth",
    ])
});

pub static LEADERSHIP_POTENTIAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"(?i)led\s+teams?",
        r"(?i)managed\s+projects?",
        r"(?i)supervised\s+staff",
        r"(?i)mentored\s+(?:team|staff)",
    ])
});

pub const TECHNICAL_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "sql",
    "aws",
    "docker",
    "kubernetes",
    "react",
    "node.js",
];
pub const SOFT_SKILLS: &[&str] = &[
    "communication",
    "leadership",
    "problem solving",
    "teamwork",
    "adaptability",
];
pub const DOMAIN_SKILLS: &[&str] = &[
    "machine learning",
    "data science",
    "cybersecurity",
    "cloud computing",
    "devops",
];

/// Lines introducing requirements in a job description.
pub static REQUIREMENT_LINE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"(?im)(?:requirements?|qualifications?|skills?|experience?)\s*:\s*(.*?)(?:\n|$)",
        r"(?im)(?:must\s+have|required|essential)\s+(.*?)(?:\n|$)",
    ])
});

pub static REQUIREMENT_SPLIT_PATTERN: Lazy<Regex> = Lazy::new(|| compile(r"[•·\-*\n]"));

pub const REQUIREMENT_STOP_WORDS: &[&str] = &["and", "or", "the", "with"];

// ────────────────────────────────────────────────────────────────────────────
// Profile links
// ────────────────────────────────────────────────────────────────────────────

pub static LINKEDIN_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(r"https?://(?:www\.)?linkedin\.com/in/[A-Za-z0-9_-]+"));

pub static GITHUB_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(r"https?://(?:www\.)?github\.com/[A-Za-z0-9_-]+"));

/// Counts non-overlapping occurrences of `term` in `text`.
pub fn occurrences(text: &str, term: &str) -> usize {
    text.matches(term).count()
}

/// Counts how many of `terms` appear at least once in `text`.
pub fn distinct_hits(text: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|term| text.contains(*term)).count()
}

/// Sums match counts of every pattern against `text`.
pub fn match_count(text: &str, patterns: &[Regex]) -> usize {
    patterns.iter().map(|re| re.find_iter(text).count()).sum()
}

/// Counts how many of `patterns` match `text` at least once.
pub fn patterns_hit(text: &str, patterns: &[Regex]) -> usize {
    patterns.iter().filter(|re| re.is_match(text)).count()
}
