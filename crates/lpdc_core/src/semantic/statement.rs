//! Graph statements and the set algebra used by the delta merge.
//!
//! Terms are `oxigraph` model values. A statement is a quad whose subject
//! and graph are named nodes.
//!
//! # Invariants
//! - Equality is exact on subject, predicate, object and graph.
//! - `xsd:string` typed literals equal plain literals.
//! - Language tags are kept lower-case.

use oxigraph::model::NamedNode;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

pub use oxigraph::model::{Literal, Term};

/// Named-node object of `term`, if any.
pub fn term_iri(term: &Term) -> Option<&NamedNode> {
    match term {
        Term::NamedNode(node) => Some(node),
        _ => None,
    }
}

/// Literal object of `term`, if any.
pub fn term_literal(term: &Term) -> Option<&Literal> {
    match term {
        Term::Literal(literal) => Some(literal),
        _ => None,
    }
}

/// Plain literal tagged with a lower-cased `language`.
pub fn language_literal(value: impl Into<String>, language: &str) -> Literal {
    Literal::new_language_tagged_literal_unchecked(value, language.to_ascii_lowercase())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    pub subject: NamedNode,
    pub predicate: NamedNode,
    pub object: Term,
    pub graph: NamedNode,
}

impl Statement {
    pub fn new(
        subject: impl Into<NamedNode>,
        predicate: impl Into<NamedNode>,
        object: impl Into<Term>,
        graph: impl Into<NamedNode>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            graph: graph.into(),
        }
    }
}

/// N-Triples line of the statement; the graph is not written.
impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Duplicate-free collection of statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementSet {
    statements: HashSet<Statement>,
}

impl StatementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the statement was already present.
    pub fn insert(&mut self, statement: Statement) -> bool {
        self.statements.insert(statement)
    }

    pub fn contains(&self, statement: &Statement) -> bool {
        self.statements.contains(statement)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Statements of `self` not present in `other`.
    pub fn difference(&self, other: &StatementSet) -> StatementSet {
        self.statements
            .difference(&other.statements)
            .cloned()
            .collect()
    }

    pub fn union(&self, other: &StatementSet) -> StatementSet {
        self.statements.union(&other.statements).cloned().collect()
    }

    /// `(self - removals) ∪ additions`.
    pub fn merge(&self, removals: &StatementSet, additions: &StatementSet) -> StatementSet {
        self.difference(removals).union(additions)
    }

    /// Statements in their N-Triples order, for stable output.
    pub fn sorted(&self) -> Vec<&Statement> {
        let mut statements = self.statements.iter().collect::<Vec<_>>();
        statements.sort_by_cached_key(|statement| statement.to_string());
        statements
    }
}

impl FromIterator<Statement> for StatementSet {
    fn from_iter<T: IntoIterator<Item = Statement>>(iter: T) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}

impl Extend<Statement> for StatementSet {
    fn extend<T: IntoIterator<Item = Statement>>(&mut self, iter: T) {
        self.statements.extend(iter);
    }
}

impl IntoIterator for StatementSet {
    type Item = Statement;
    type IntoIter = std::collections::hash_set::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a StatementSet {
    type Item = &'a Statement;
    type IntoIter = std::collections::hash_set::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{language_literal, Literal, Statement, StatementSet};
    use crate::model::iri::Iri;
    use crate::semantic::vocab;
    use oxigraph::model::vocab::xsd;

    fn iri(value: &str) -> Iri {
        Iri::new(value).unwrap()
    }

    fn title(value: &str) -> Statement {
        Statement::new(
            &iri("http://data.lblod.info/id/public-service/1"),
            &iri(vocab::DCT_TITLE),
            language_literal(value, "nl-be-x-formal"),
            &iri("http://mu.semte.ch/graphs/test"),
        )
    }

    #[test]
    fn merge_removes_then_adds() {
        let current = [title("oud"), title("blijft")].into_iter().collect::<StatementSet>();
        let removals = [title("oud"), title("onbekend")].into_iter().collect::<StatementSet>();
        let additions = [title("nieuw")].into_iter().collect::<StatementSet>();

        let merged = current.merge(&removals, &additions);
        assert_eq!(merged.len(), 2);
        assert!(merged.contains(&title("blijft")));
        assert!(merged.contains(&title("nieuw")));
        assert!(!merged.contains(&title("oud")));
    }

    #[test]
    fn re_adding_a_removed_statement_keeps_it() {
        let current = [title("zelfde")].into_iter().collect::<StatementSet>();
        let delta = [title("zelfde")].into_iter().collect::<StatementSet>();
        assert_eq!(current.merge(&delta, &delta), current);
    }

    #[test]
    fn graph_is_part_of_equality() {
        let mut other_graph = title("x");
        other_graph.graph = (&iri("http://mu.semte.ch/graphs/other")).into();
        let current = [title("x")].into_iter().collect::<StatementSet>();
        let removals = [other_graph].into_iter().collect::<StatementSet>();
        assert_eq!(current.difference(&removals).len(), 1);
    }

    #[test]
    fn xsd_string_literal_equals_plain_literal() {
        assert_eq!(
            Literal::new_typed_literal("abc", xsd::STRING),
            Literal::new_simple_literal("abc")
        );
    }

    #[test]
    fn language_tags_are_lower_cased() {
        assert_eq!(
            language_literal("x", "NL-BE-X-Formal").language(),
            Some("nl-be-x-formal")
        );
    }

    #[test]
    fn display_escapes_literals() {
        let statement = Statement::new(
            &iri("http://x/s"),
            &iri("http://x/p"),
            Literal::new_simple_literal("a \"b\"\n"),
            &iri("http://x/g"),
        );
        assert_eq!(
            statement.to_string(),
            "<http://x/s> <http://x/p> \"a \\\"b\\\"\\n\" ."
        );
    }
}
