use tracing::debug;

use crate::plan::{Captures, Plan};
use crate::rules::{Recognizer, RuleTable};

/// Trims surrounding whitespace. Case is folded by the case-insensitive
/// variants, so captured names reach SQL exactly as the user typed them.
pub fn normalize(raw: &str) -> &str {
    raw.trim()
}

#[derive(Debug)]
pub struct Match<'r> {
    pub recognizer: &'r Recognizer,
    /// Index of the variant that matched within its recognizer.
    pub variant: usize,
    pub captures: Captures,
    pub plan: Plan,
}

impl Match<'_> {
    pub fn description(&self) -> &'static str {
        self.recognizer.description()
    }
    pub fn sql(&self) -> &str {
        self.plan.sql()
    }
    /// Source text of the regular expression that matched.
    pub fn pattern(&self) -> &str {
        self.recognizer.variants()[self.variant].as_str()
    }
}

#[derive(Debug)]
pub enum MatchResult<'r> {
    Matched(Match<'r>),
    NotMatched,
}

impl<'r> MatchResult<'r> {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }
    pub fn matched(self) -> Option<Match<'r>> {
        match self {
            MatchResult::Matched(m) => Some(m),
            MatchResult::NotMatched => None,
        }
    }
}

/// First match wins, in table order and then in variant order.
pub fn find_match<'r>(rules: &'r RuleTable, raw: &str) -> MatchResult<'r> {
    let text = normalize(raw);
    for recognizer in rules.iter() {
        for (variant, regex) in recognizer.variants().iter().enumerate() {
            if let Some(found) = regex.captures(text) {
                let captures = Captures::from_regex(&found);
                let plan = recognizer.plan(&captures);
                debug!(recognizer = recognizer.name(), variant, groups = ?captures.groups(), %plan, "matched");
                return MatchResult::Matched(Match { recognizer, variant, captures, plan });
            }
        }
    }
    debug!(query = text, "no recognizer matched");
    MatchResult::NotMatched
}
