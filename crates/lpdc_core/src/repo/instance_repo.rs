//! Instance persistence on top of the statement store.
//!
//! # Responsibility
//! - Store each instance as the statement projection of the mapper, scoped to
//!   the owning authority's graph.
//! - Guard updates with the `dateModified` version token.
//!
//! # Invariants
//! - `update` checks the token and writes inside one IMMEDIATE transaction.
//! - Only statements that changed are deleted or inserted.
//! - An instance is only stored in the graph of the authority that created it.

use crate::model::authority::Bestuurseenheid;
use crate::model::date::FormatPreservingDate;
use crate::model::instance::Instance;
use crate::model::invariant::InvariantError;
use crate::model::iri::Iri;
use crate::repo::error::{
    ensure_connection_ready, parse_iri, ConcurrentUpdateError, RepoError, RepoResult,
};
use crate::semantic::statement::{language_literal, Literal, Statement, StatementSet, Term};
use crate::semantic::vocab::{DCT_SOURCE, PAV_CREATED_BY, SCHEMA_DATE_MODIFIED};
use crate::semantic::{InstanceStatementMapper, SemanticFormsMapper};
use oxigraph::model::NamedNode;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const KIND: &str = "instance";

/// Instance of some authority linked to a concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceReference {
    pub bestuurseenheid_id: Iri,
    pub instance_id: Iri,
}

/// Persistence contract for instances.
pub trait InstanceRepository {
    fn find_by_id(&self, bestuurseenheid: &Bestuurseenheid, id: &Iri) -> RepoResult<Instance>;

    fn exists(&self, bestuurseenheid: &Bestuurseenheid, id: &Iri) -> RepoResult<bool>;

    /// Stores a new instance; fails when the id is taken.
    fn save(&self, bestuurseenheid: &Bestuurseenheid, instance: &Instance) -> RepoResult<()>;

    /// Replaces the stored instance when its `dateModified` is still
    /// `expected_version`.
    ///
    /// # Errors
    /// - `ConcurrentUpdate` when the stored token differs.
    /// - `NotFound` when the instance does not exist.
    fn update(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
        expected_version: &FormatPreservingDate,
    ) -> RepoResult<()>;

    fn delete(&self, bestuurseenheid: &Bestuurseenheid, id: &Iri) -> RepoResult<()>;

    fn find_ids_for_authority(&self, bestuurseenheid: &Bestuurseenheid) -> RepoResult<Vec<Iri>>;

    fn find_ids_linked_to_concept(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        concept_id: &Iri,
    ) -> RepoResult<Vec<Iri>>;

    /// Every instance, of any authority, linked to `concept_id`.
    fn find_all_linked_to_concept(&self, concept_id: &Iri) -> RepoResult<Vec<InstanceReference>>;
}

/// SQLite-backed instance repository.
pub struct SqliteInstanceRepository<'conn> {
    conn: &'conn Connection,
    mapper: InstanceStatementMapper,
}

impl<'conn> SqliteInstanceRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["statements"])?;
        Ok(Self {
            conn,
            mapper: InstanceStatementMapper,
        })
    }

    fn statements_of(
        &self,
        conn: &Connection,
        graph: &Iri,
        root: &Iri,
    ) -> RepoResult<StatementSet> {
        let mut stmt = conn.prepare(
            "SELECT subject, predicate, object_kind, object_value, object_language, object_datatype
             FROM statements
             WHERE graph = ?1 AND root = ?2;",
        )?;
        let mut rows = stmt.query(params![graph.as_str(), root.as_str()])?;
        let mut statements = StatementSet::new();
        while let Some(row) = rows.next()? {
            statements.insert(statement_from_row(row, graph)?);
        }
        Ok(statements)
    }

    fn ensure_owned_by(
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
    ) -> RepoResult<Iri> {
        if &instance.created_by != bestuurseenheid.id() {
            return Err(InvariantError::new(
                "instance is not created by the given bestuurseenheid",
            )
            .into());
        }
        Ok(bestuurseenheid.user_graph()?)
    }
}

impl InstanceRepository for SqliteInstanceRepository<'_> {
    fn find_by_id(&self, bestuurseenheid: &Bestuurseenheid, id: &Iri) -> RepoResult<Instance> {
        let graph = bestuurseenheid.user_graph()?;
        let statements = self.statements_of(self.conn, &graph, id)?;
        if statements.is_empty() {
            return Err(RepoError::not_found(KIND, id));
        }
        Ok(self
            .mapper
            .from_statements(bestuurseenheid, id, &statements)?)
    }

    fn exists(&self, bestuurseenheid: &Bestuurseenheid, id: &Iri) -> RepoResult<bool> {
        let graph = bestuurseenheid.user_graph()?;
        root_exists(self.conn, &graph, id)
    }

    fn save(&self, bestuurseenheid: &Bestuurseenheid, instance: &Instance) -> RepoResult<()> {
        instance.validate()?;
        let graph = Self::ensure_owned_by(bestuurseenheid, instance)?;
        let statements = self.mapper.to_statements(bestuurseenheid, instance)?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if root_exists(&tx, &graph, &instance.id)? {
            return Err(RepoError::AlreadyExists {
                kind: KIND,
                id: instance.id.to_string(),
            });
        }
        insert_statements(&tx, &instance.id, &statements)?;
        tx.commit()?;
        Ok(())
    }

    fn update(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
        expected_version: &FormatPreservingDate,
    ) -> RepoResult<()> {
        instance.validate()?;
        let graph = Self::ensure_owned_by(bestuurseenheid, instance)?;
        let new_statements = self.mapper.to_statements(bestuurseenheid, instance)?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let stored_version = stored_date_modified(&tx, &graph, &instance.id)?
            .ok_or_else(|| RepoError::not_found(KIND, &instance.id))?;
        if FormatPreservingDate::is_functionally_changed(
            Some(expected_version),
            Some(&stored_version),
        ) {
            return Err(ConcurrentUpdateError {
                instance_id: instance.id.clone(),
                expected_version: expected_version.value().to_string(),
                stored_version: stored_version.value().to_string(),
            }
            .into());
        }

        let old_statements = self.statements_of(&tx, &graph, &instance.id)?;
        delete_statements(
            &tx,
            &instance.id,
            &old_statements.difference(&new_statements),
        )?;
        insert_statements(
            &tx,
            &instance.id,
            &new_statements.difference(&old_statements),
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete(&self, bestuurseenheid: &Bestuurseenheid, id: &Iri) -> RepoResult<()> {
        let graph = bestuurseenheid.user_graph()?;
        let deleted = self.conn.execute(
            "DELETE FROM statements WHERE graph = ?1 AND root = ?2;",
            params![graph.as_str(), id.as_str()],
        )?;
        if deleted == 0 {
            return Err(RepoError::not_found(KIND, id));
        }
        Ok(())
    }

    fn find_ids_for_authority(&self, bestuurseenheid: &Bestuurseenheid) -> RepoResult<Vec<Iri>> {
        let graph = bestuurseenheid.user_graph()?;
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT root
             FROM statements
             WHERE graph = ?1
             ORDER BY root ASC;",
        )?;
        let mut rows = stmt.query([graph.as_str()])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            ids.push(parse_iri(row.get(0)?, "statements.root")?);
        }
        Ok(ids)
    }

    fn find_ids_linked_to_concept(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        concept_id: &Iri,
    ) -> RepoResult<Vec<Iri>> {
        let graph = bestuurseenheid.user_graph()?;
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT root
             FROM statements
             WHERE graph = ?1
               AND subject = root
               AND predicate = ?2
               AND object_kind = 'iri'
               AND object_value = ?3
             ORDER BY root ASC;",
        )?;
        let mut rows = stmt.query(params![graph.as_str(), DCT_SOURCE, concept_id.as_str()])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            ids.push(parse_iri(row.get(0)?, "statements.root")?);
        }
        Ok(ids)
    }

    fn find_all_linked_to_concept(&self, concept_id: &Iri) -> RepoResult<Vec<InstanceReference>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT source.root, creator.object_value
             FROM statements source
             INNER JOIN statements creator
                ON creator.graph = source.graph
               AND creator.root = source.root
               AND creator.subject = source.root
               AND creator.predicate = ?1
             WHERE source.subject = source.root
               AND source.predicate = ?2
               AND source.object_kind = 'iri'
               AND source.object_value = ?3
             ORDER BY source.root ASC;",
        )?;
        let mut rows = stmt.query(params![PAV_CREATED_BY, DCT_SOURCE, concept_id.as_str()])?;
        let mut references = Vec::new();
        while let Some(row) = rows.next()? {
            references.push(InstanceReference {
                instance_id: parse_iri(row.get(0)?, "statements.root")?,
                bestuurseenheid_id: parse_iri(row.get(1)?, "statements.object_value")?,
            });
        }
        Ok(references)
    }
}

fn root_exists(conn: &Connection, graph: &Iri, root: &Iri) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM statements WHERE graph = ?1 AND root = ?2
        );",
        params![graph.as_str(), root.as_str()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn stored_date_modified(
    conn: &Connection,
    graph: &Iri,
    root: &Iri,
) -> RepoResult<Option<FormatPreservingDate>> {
    let mut stmt = conn.prepare(
        "SELECT object_value
         FROM statements
         WHERE graph = ?1 AND root = ?2 AND subject = ?2 AND predicate = ?3;",
    )?;
    let mut rows = stmt.query(params![graph.as_str(), root.as_str(), SCHEMA_DATE_MODIFIED])?;
    match rows.next()? {
        Some(row) => {
            let value: String = row.get(0)?;
            FormatPreservingDate::of(value)
                .map(Some)
                .map_err(|err| RepoError::InvalidData(format!("stored date modified: {err}")))
        }
        None => Ok(None),
    }
}

fn insert_statements(conn: &Connection, root: &Iri, statements: &StatementSet) -> RepoResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO statements (
            graph, root, subject, predicate,
            object_kind, object_value, object_language, object_datatype
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
    )?;
    for statement in statements {
        let (kind, value, language, datatype) = object_columns(&statement.object);
        stmt.execute(params![
            statement.graph.as_str(),
            root.as_str(),
            statement.subject.as_str(),
            statement.predicate.as_str(),
            kind,
            value,
            language,
            datatype,
        ])?;
    }
    Ok(())
}

fn delete_statements(conn: &Connection, root: &Iri, statements: &StatementSet) -> RepoResult<()> {
    let mut stmt = conn.prepare(
        "DELETE FROM statements
         WHERE graph = ?1 AND root = ?2 AND subject = ?3 AND predicate = ?4
           AND object_kind = ?5 AND object_value = ?6
           AND object_language = ?7 AND object_datatype = ?8;",
    )?;
    for statement in statements {
        let (kind, value, language, datatype) = object_columns(&statement.object);
        stmt.execute(params![
            statement.graph.as_str(),
            root.as_str(),
            statement.subject.as_str(),
            statement.predicate.as_str(),
            kind,
            value,
            language,
            datatype,
        ])?;
    }
    Ok(())
}

/// Plain and language-tagged literals store no datatype.
fn object_columns(term: &Term) -> (&'static str, &str, &str, &str) {
    match term {
        Term::NamedNode(node) => ("iri", node.as_str(), "", ""),
        Term::Literal(literal) => (
            "literal",
            literal.value(),
            literal.language().unwrap_or_default(),
            if literal.is_plain() {
                ""
            } else {
                literal.datatype().as_str()
            },
        ),
        // Rejected by the object_kind check.
        _ => ("blank", "", "", ""),
    }
}

fn statement_from_row(row: &Row<'_>, graph: &Iri) -> RepoResult<Statement> {
    let subject = parse_node(row.get("subject")?, "statements.subject")?;
    let predicate = parse_node(row.get("predicate")?, "statements.predicate")?;
    let kind: String = row.get("object_kind")?;
    let value: String = row.get("object_value")?;
    let language: String = row.get("object_language")?;
    let datatype: String = row.get("object_datatype")?;
    let object = match kind.as_str() {
        "iri" => Term::NamedNode(parse_node(value, "statements.object_value")?),
        "literal" if !language.is_empty() => Term::Literal(language_literal(value, &language)),
        "literal" if !datatype.is_empty() => Term::Literal(Literal::new_typed_literal(
            value,
            parse_node(datatype, "statements.object_datatype")?,
        )),
        "literal" => Term::Literal(Literal::new_simple_literal(value)),
        other => {
            return Err(RepoError::InvalidData(format!(
                "unknown object kind `{other}` in statements.object_kind"
            )))
        }
    };
    Ok(Statement::new(subject, predicate, object, graph))
}

fn parse_node(value: String, column: &str) -> RepoResult<NamedNode> {
    NamedNode::new(value)
        .map_err(|err| RepoError::InvalidData(format!("{column}: {err}")))
}
