//! Blind-resume redaction.
//!
//! Redaction is a left fold over [`PASS_ORDER`]. Each pass receives the text
//! produced by the previous one, so a later pass never sees spans an earlier
//! pass already replaced. Changing the order changes the output.

use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::screening::patterns::{
    ADDRESS_MIN_TOKENS_EXCLUSIVE, ADDRESS_PERMISSIVE_PATTERN, ADDRESS_PLACEHOLDER,
    ADDRESS_STRICT_PATTERN, EMAIL_PATTERN, EMAIL_PLACEHOLDER, NAME_DENY_LIST, NAME_LEAD_WORDS,
    NAME_PATTERNS, NAME_PLACEHOLDER, PHONE_PATTERN, PHONE_PLACEHOLDER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionPass {
    Name,
    Email,
    Phone,
    Address,
}

pub const PASS_ORDER: [RedactionPass; 4] = [
    RedactionPass::Name,
    RedactionPass::Email,
    RedactionPass::Phone,
    RedactionPass::Address,
];

/// How eagerly the address pass fires.
///
/// `Permissive` treats any number followed by more than three tokens as an
/// address, which also swallows phrases like "5 years of experience in Rust".
/// `Strict` needs a street suffix (Street, Ave, Rd, ...) on the same line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressStrictness {
    #[default]
    Permissive,
    Strict,
}

#[derive(Debug, Error)]
#[error("unknown address strictness '{0}' (expected 'permissive' or 'strict')")]
pub struct UnknownStrictness(String);

impl FromStr for AddressStrictness {
    type Err = UnknownStrictness;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            _ => Err(UnknownStrictness(s.to_string())),
        }
    }
}

/// Literal spans removed by each pass, in match order.
///
/// Phones are recorded as their concatenated digit groups ("5551234567"),
/// not the formatted span that was replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedInfo {
    pub names: Vec<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub addresses: Vec<String>,
}

impl RemovedInfo {
    fn record(mut self, pass: RedactionPass, spans: Vec<String>) -> Self {
        let bucket = match pass {
            RedactionPass::Name => &mut self.names,
            RedactionPass::Email => &mut self.emails,
            RedactionPass::Phone => &mut self.phones,
            RedactionPass::Address => &mut self.addresses,
        };
        bucket.extend(spans);
        self
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
            && self.emails.is_empty()
            && self.phones.is_empty()
            && self.addresses.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionResult {
    pub blind_text: String,
    pub removed: RemovedInfo,
}

/// Output of a single pass: the rewritten text and what it recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutput {
    pub text: String,
    pub recorded: Vec<String>,
}

/// Produces a blind copy of `text` with names, emails, phones, and addresses
/// replaced by placeholders.
pub fn create_blind_version(text: &str, strictness: AddressStrictness) -> RedactionResult {
    let (blind_text, removed) = PASS_ORDER.iter().fold(
        (text.to_string(), RemovedInfo::default()),
        |(current, removed), &pass| {
            let output = run_pass(pass, &current, strictness);
            (output.text, removed.record(pass, output.recorded))
        },
    );

    RedactionResult {
        blind_text,
        removed,
    }
}

/// Runs one pass over `text` without touching any other pass's state.
pub fn run_pass(pass: RedactionPass, text: &str, strictness: AddressStrictness) -> PassOutput {
    match pass {
        RedactionPass::Name => redact_names(text),
        RedactionPass::Email => redact_emails(text),
        RedactionPass::Phone => redact_phones(text),
        RedactionPass::Address => redact_addresses(text, strictness),
    }
}

fn replace_each(text: &str, spans: &[String], placeholder: &str) -> String {
    spans.iter().fold(text.to_string(), |current, span| {
        current.replace(span.as_str(), placeholder)
    })
}

fn redact_names(text: &str) -> PassOutput {
    let mut current = text.to_string();
    let mut recorded = Vec::new();

    for pattern in NAME_PATTERNS.iter() {
        let names = find_names(pattern, &current);
        current = replace_each(&current, &names, NAME_PLACEHOLDER);
        recorded.extend(names);
    }

    PassOutput {
        text: current,
        recorded,
    }
}

/// Non-overlapping name matches. A match opening with a lead word such as
/// "Contact" or "Dear" is retried from its second word.
fn find_names(pattern: &Regex, text: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut pos = 0;

    while pos <= text.len() {
        let Some(m) = pattern.find_at(text, pos) else {
            break;
        };
        let matched = m.as_str();

        if let Some(rest) = strip_lead_word(matched) {
            pos = m.start() + (matched.len() - rest.len());
            continue;
        }

        if !NAME_DENY_LIST.contains(&matched) {
            names.push(matched.to_string());
        }
        pos = m.end();
    }

    names
}

fn strip_lead_word(matched: &str) -> Option<&str> {
    let first = matched.split_whitespace().next()?;
    if NAME_LEAD_WORDS.contains(&first) {
        Some(matched[first.len()..].trim_start())
    } else {
        None
    }
}

fn redact_emails(text: &str) -> PassOutput {
    let emails: Vec<String> = EMAIL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    PassOutput {
        text: replace_each(text, &emails, EMAIL_PLACEHOLDER),
        recorded: emails,
    }
}

fn redact_phones(text: &str) -> PassOutput {
    let mut spans = Vec::new();
    let mut recorded = Vec::new();

    for caps in PHONE_PATTERN.captures_iter(text) {
        let digits: String = (1..=4)
            .filter_map(|i| caps.get(i))
            .map(|g| g.as_str())
            .collect();
        if let Some(full) = caps.get(0) {
            spans.push(full.as_str().to_string());
        }
        recorded.push(digits);
    }

    // Recorded digits can also sit inside longer tokens the pattern skips.
    let text = replace_each(text, &spans, PHONE_PLACEHOLDER);
    PassOutput {
        text: replace_each(&text, &recorded, PHONE_PLACEHOLDER),
        recorded,
    }
}

fn redact_addresses(text: &str, strictness: AddressStrictness) -> PassOutput {
    let addresses: Vec<String> = match strictness {
        AddressStrictness::Permissive => ADDRESS_PERMISSIVE_PATTERN
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|candidate| candidate.split_whitespace().count() > ADDRESS_MIN_TOKENS_EXCLUSIVE)
            .map(String::from)
            .collect(),
        AddressStrictness::Strict => ADDRESS_STRICT_PATTERN
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect(),
    };

    PassOutput {
        text: replace_each(text, &addresses, ADDRESS_PLACEHOLDER),
        recorded: addresses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blind(text: &str) -> RedactionResult {
        create_blind_version(text, AddressStrictness::Permissive)
    }

    #[test]
    fn test_contact_line_is_fully_redacted() {
        let result = blind("Contact John Smith at john.smith@example.com or 555-123-4567.");

        assert_eq!(result.removed.names, vec!["John Smith"]);
        assert_eq!(result.removed.emails, vec!["john.smith@example.com"]);
        assert_eq!(result.removed.phones, vec!["5551234567"]);
        assert!(result.removed.addresses.is_empty());
        assert_eq!(
            result.blind_text,
            "Contact [NAME REMOVED] at [EMAIL REMOVED] or [PHONE REMOVED]."
        );
    }

    /// The phone is recorded as bare digits while the formatted span is what
    /// gets replaced. Both halves of that behavior are pinned here.
    #[test]
    fn test_phone_recorded_as_digits_but_formatted_span_replaced() {
        let result = blind("Phone: 555.123.4567");
        assert_eq!(result.removed.phones, vec!["5551234567"]);
        assert!(!result.blind_text.contains("555.123.4567"));
        assert!(result.blind_text.contains(PHONE_PLACEHOLDER));
    }

    #[test]
    fn test_email_and_phone_redaction_is_idempotent() {
        let first = blind("Reach me: jane.doe@mail.org, +1 (555) 987-6543 or 555 222 3333");
        for pass in [RedactionPass::Email, RedactionPass::Phone] {
            let again = run_pass(pass, &first.blind_text, AddressStrictness::Permissive);
            assert!(again.recorded.is_empty(), "{pass:?} matched twice");
            assert_eq!(again.text, first.blind_text);
        }
    }

    #[test]
    fn test_blind_text_never_contains_recorded_emails_or_phones() {
        let samples = [
            "a@b.co a@b.co",
            "call 5551234567 or 555-123-4567",
            "Contact: ops@corp.example.com; 1-800-555-0199",
            "Call 555-123-4567. Ref A5551234567.",
            "",
        ];
        for sample in samples {
            let result = blind(sample);
            for span in result.removed.emails.iter().chain(&result.removed.phones) {
                assert!(!result.blind_text.contains(span.as_str()), "{span} leaked");
            }
        }
    }

    #[test]
    fn test_parenthesised_area_code_fully_replaced() {
        let result = blind("Phone: (555) 123-4567 and +1 (555) 987-6543");
        assert_eq!(result.removed.phones, vec!["5551234567", "5559876543"]);
        assert_eq!(result.blind_text, "Phone: [PHONE REMOVED] and [PHONE REMOVED]");
    }

    #[test]
    fn test_recorded_digits_removed_inside_longer_tokens() {
        let result = blind("Call 555-123-4567. Ref A5551234567.");
        assert_eq!(result.removed.phones, vec!["5551234567"]);
        assert_eq!(
            result.blind_text,
            "Call [PHONE REMOVED]. Ref A[PHONE REMOVED]."
        );
    }

    #[test]
    fn test_duplicate_emails_recorded_per_match() {
        let result = blind("john@x.io and john@x.io");
        assert_eq!(result.removed.emails.len(), 2);
        assert!(!result.blind_text.contains('@'));
    }

    #[test]
    fn test_deny_listed_phrases_are_kept() {
        let result = blind("This Is a test.");
        assert!(result.removed.names.is_empty());
        assert_eq!(result.blind_text, "This Is a test.");
    }

    #[test]
    fn test_two_word_pattern_runs_before_three_word_pattern() {
        let result = blind("Mary Ann Jones");
        assert_eq!(result.removed.names, vec!["Mary Ann"]);
        assert_eq!(result.blind_text, "[NAME REMOVED] Jones");
    }

    #[test]
    fn test_middle_initial_name() {
        let result = blind("Jane Q. Public wrote code");
        assert_eq!(result.removed.names, vec!["Jane Q. Public"]);
        assert_eq!(result.blind_text, "[NAME REMOVED] wrote code");
    }

    #[test]
    fn test_permissive_address_overmatches_experience_phrase() {
        let result = blind("I have 5 years of experience in Python");
        assert_eq!(
            result.removed.addresses,
            vec!["5 years of experience in Python"]
        );
        assert_eq!(result.blind_text, "I have [ADDRESS REMOVED]");
    }

    #[test]
    fn test_strict_address_requires_street_suffix() {
        let result =
            create_blind_version("I have 5 years of experience in Python", AddressStrictness::Strict);
        assert!(result.removed.addresses.is_empty());

        let result = create_blind_version(
            "Mailing address: 221 baker street, apt 2",
            AddressStrictness::Strict,
        );
        assert_eq!(result.removed.addresses, vec!["221 baker street"]);
        assert_eq!(
            result.blind_text,
            "Mailing address: [ADDRESS REMOVED], apt 2"
        );
    }

    #[test]
    fn test_permissive_address_takes_whole_tail() {
        let result = blind("Mailing address: 221 baker street, apt 2");
        assert_eq!(result.removed.addresses, vec!["221 baker street, apt 2"]);
    }

    #[test]
    fn test_pass_order_is_name_email_phone_address() {
        assert_eq!(
            PASS_ORDER,
            [
                RedactionPass::Name,
                RedactionPass::Email,
                RedactionPass::Phone,
                RedactionPass::Address
            ]
        );
    }

    #[test]
    fn test_empty_text() {
        let result = blind("");
        assert_eq!(result.blind_text, "");
        assert!(result.removed.is_empty());
    }

    #[test]
    fn test_strictness_from_str() {
        assert_eq!(
            "STRICT".parse::<AddressStrictness>().unwrap(),
            AddressStrictness::Strict
        );
        assert_eq!(
            " permissive ".parse::<AddressStrictness>().unwrap(),
            AddressStrictness::Permissive
        );
        assert!("loose".parse::<AddressStrictness>().is_err());
    }
}
