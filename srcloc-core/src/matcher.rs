//! Definition matching on raw file text
//!
//! A file "defines" a symbol when any [`DefinitionRule`] matches its text.
//! Rules are plain word-boundary regexes, not a parser: they also match
//! inside comments and strings, and they ignore class components, typed
//! const bindings and re-exports. New definition forms are added by
//! appending to [`DEFINITION_RULES`].

use regex::RegexSet;

use crate::symbol::SymbolName;

/// One recognized definition form
#[derive(Debug, Clone, Copy)]
pub struct DefinitionRule {
    /// Short label used in logs
    pub kind: &'static str,
    /// Builds the pattern for an already-escaped symbol name
    pub template: fn(&str) -> String,
}

/// Recognized definition forms, in evaluation order
pub const DEFINITION_RULES: &[DefinitionRule] = &[
    DefinitionRule {
        kind: "function",
        template: |name| format!(r"\bfunction\s+{name}\b"),
    },
    DefinitionRule {
        kind: "const",
        template: |name| format!(r"\bconst\s+{name}\s*="),
    },
    DefinitionRule {
        kind: "export-function",
        template: |name| format!(r"\bexport\s+(?:default\s+)?function\s+{name}\b"),
    },
];

/// Compiled rules for a single symbol
#[derive(Debug, Clone)]
pub struct SymbolMatcher {
    symbol: SymbolName,
    rules: &'static [DefinitionRule],
    set: RegexSet,
}

impl SymbolMatcher {
    /// Compile the default rule set for `symbol`.
    pub fn new(symbol: &SymbolName) -> Self {
        Self::with_rules(symbol, DEFINITION_RULES)
    }

    /// Compile a custom rule set for `symbol`.
    pub fn with_rules(symbol: &SymbolName, rules: &'static [DefinitionRule]) -> Self {
        let escaped = regex::escape(symbol.as_str());
        let patterns = rules.iter().map(|rule| (rule.template)(&escaped));
        // Rule templates are static and the name is escaped, so this cannot fail.
        let set = RegexSet::new(patterns).expect("definition rule produced an invalid regex");

        Self {
            symbol: symbol.clone(),
            rules,
            set,
        }
    }

    pub fn symbol(&self) -> &SymbolName {
        &self.symbol
    }

    /// True if `text` defines the symbol.
    pub fn is_definition(&self, text: &str) -> bool {
        self.set.is_match(text)
    }

    /// Kind of the first rule that matches `text`, if any.
    pub fn matched_rule(&self, text: &str) -> Option<&'static str> {
        self.set
            .matches(text)
            .iter()
            .next()
            .map(|idx| self.rules[idx].kind)
    }
}
