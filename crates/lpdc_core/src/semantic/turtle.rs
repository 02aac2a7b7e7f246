//! Turtle fragments used for partial edits.
//!
//! # Responsibility
//! - Parse removal/addition fragments into statements of one graph.
//! - Serialize statements back as N-Triples lines.
//!
//! # Invariants
//! - Fragments are Turtle, so N-Triples documents parse unchanged.
//! - Blank nodes are rejected; every subject is an IRI.

use crate::model::iri::Iri;
use crate::semantic::statement::{language_literal, Statement, StatementSet, Term};
use oxigraph::io::{RdfFormat, RdfParseError, RdfParser};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Malformed fragment. `line` is 1-based when the parser reports a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementParseError {
    pub line: Option<u64>,
    pub reason: String,
}

impl StatementParseError {
    fn unsupported(reason: &str) -> Self {
        Self {
            line: None,
            reason: reason.to_string(),
        }
    }
}

impl Display for StatementParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "invalid statement on line {line}: {}", self.reason),
            None => write!(f, "invalid statement: {}", self.reason),
        }
    }
}

impl Error for StatementParseError {}

impl From<RdfParseError> for StatementParseError {
    fn from(value: RdfParseError) -> Self {
        match value {
            RdfParseError::Syntax(err) => Self {
                line: err.location().map(|range| range.start.line + 1),
                reason: err.to_string(),
            },
            RdfParseError::Io(err) => Self {
                line: None,
                reason: err.to_string(),
            },
        }
    }
}

/// Parses the Turtle `document`, placing every statement in `graph`.
///
/// # Errors
/// - Returns `StatementParseError` for the first syntax error or blank node.
pub fn parse_statements(document: &str, graph: &Iri) -> Result<StatementSet, StatementParseError> {
    let mut statements = StatementSet::new();
    // Lenient: register tags such as `nl-be-x-generated-formal` exceed the
    // eight characters BCP 47 allows per private-use subtag.
    let parser = RdfParser::from_format(RdfFormat::Turtle).lenient();
    for quad in parser.for_reader(document.as_bytes()) {
        let quad = quad?;
        let subject = match Term::from(quad.subject) {
            Term::NamedNode(node) => node,
            _ => return Err(StatementParseError::unsupported("blank nodes are not supported")),
        };
        let object = match quad.object {
            Term::NamedNode(node) => Term::NamedNode(node),
            Term::Literal(literal) => match literal.language() {
                Some(language) => Term::Literal(language_literal(literal.value(), language)),
                None => Term::Literal(literal),
            },
            _ => return Err(StatementParseError::unsupported("blank nodes are not supported")),
        };
        statements.insert(Statement::new(subject, quad.predicate, object, graph));
    }
    Ok(statements)
}

/// One N-Triples line per statement, sorted.
pub fn serialize_statements(statements: &StatementSet) -> String {
    let mut out = String::new();
    for statement in statements.sorted() {
        out.push_str(&statement.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{parse_statements, serialize_statements};
    use crate::model::iri::Iri;
    use crate::semantic::statement::{term_literal, Term};

    fn graph() -> Iri {
        Iri::new("http://mu.semte.ch/graphs/test").unwrap()
    }

    #[test]
    fn parses_iris_and_literal_kinds() {
        let document = r#"
# header comment
<http://x/s> <http://x/p> <http://x/o> .
<http://x/s> <http://x/title> "Titel"@NL-BE-X-FORMAL .
<http://x/s> <http://x/date> "2024-01-02T10:00:00Z"^^<http://www.w3.org/2001/XMLSchema#dateTime> .
<http://x/s> <http://x/plain> "a \"quoted\" é" . # trailing comment
<http://x/s> <http://x/escapes> "tab\tback\bspace" .
<http://x/s> <http://x/generated> "Titel"@nl-be-x-generated-informal .
"#;
        let statements = parse_statements(document, &graph()).unwrap();
        assert_eq!(statements.len(), 6);

        let literals = statements
            .iter()
            .filter_map(|statement| term_literal(&statement.object))
            .collect::<Vec<_>>();
        assert!(literals
            .iter()
            .any(|literal| literal.language() == Some("nl-be-x-formal")));
        assert!(literals
            .iter()
            .any(|literal| literal.language() == Some("nl-be-x-generated-informal")));
        assert!(literals
            .iter()
            .any(|literal| literal.value() == "a \"quoted\" é"));
        assert!(literals
            .iter()
            .any(|literal| literal.value() == "tab\tback\u{8}space"));
        assert!(statements
            .iter()
            .all(|statement| statement.graph.as_str() == graph().as_str()));
        assert!(statements
            .iter()
            .any(|statement| matches!(statement.object, Term::NamedNode(_))));
    }

    #[test]
    fn accepts_turtle_prefixes_and_predicate_lists() {
        let document = r#"
@prefix dct: <http://purl.org/dc/terms/> .
<http://x/s> dct:title "Titel"@nl-be-x-formal ;
    dct:description "Beschrijving"@nl-be-x-formal .
"#;
        let statements = parse_statements(document, &graph()).unwrap();
        let expected = "<http://x/s> <http://purl.org/dc/terms/description> \"Beschrijving\"@nl-be-x-formal .\n\
                        <http://x/s> <http://purl.org/dc/terms/title> \"Titel\"@nl-be-x-formal .\n";
        assert_eq!(serialize_statements(&statements), expected);
    }

    #[test]
    fn reports_the_failing_line() {
        let document = "<http://x/s> <http://x/p> <http://x/o> .\n<http://x/s> broken .";
        let err = parse_statements(document, &graph()).unwrap_err();
        assert_eq!(err.line, Some(2));
    }

    #[test]
    fn rejects_blank_nodes() {
        let err = parse_statements("_:b0 <http://x/p> \"v\" .", &graph()).unwrap_err();
        assert_eq!(err.reason, "blank nodes are not supported");
        let err = parse_statements("<http://x/s> <http://x/p> [] .", &graph()).unwrap_err();
        assert_eq!(err.reason, "blank nodes are not supported");
    }

    #[test]
    fn serialized_document_parses_back_to_the_same_set() {
        let document = "<http://x/s> <http://x/p> \"line\\nbreak\"@en .\n";
        let statements = parse_statements(document, &graph()).unwrap();
        let serialized = serialize_statements(&statements);
        assert_eq!(serialized, document);
        assert_eq!(parse_statements(&serialized, &graph()).unwrap(), statements);
    }
}
