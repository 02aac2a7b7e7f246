//! Projection of instances onto graph statements and back.
//!
//! # Responsibility
//! - Produce the canonical statement set of an instance, children included.
//! - Rebuild a validated instance from a statement set.
//! - Apply removal/addition fragments to an instance (`merge_instance`).
//!
//! # Invariants
//! - Only statements in the authority's user graph are read.
//! - Registers map to language tags; dates keep their literal bytes.
//! - Code lists and IRI sets are read back in canonical order; children are
//!   read back sorted by `order`.

use crate::model::authority::Bestuurseenheid;
use crate::model::children::{
    Address, ContactPoint, Cost, Evidence, FinancialAdvantage, LegalResource, Procedure,
    Requirement, Website,
};
use crate::model::codes::Code;
use crate::model::content::PublicServiceContent;
use crate::model::date::FormatPreservingDate;
use crate::model::instance::Instance;
use crate::model::invariant::InvariantError;
use crate::model::iri::Iri;
use crate::model::language::{Language, LanguageString};
use crate::semantic::statement::{
    language_literal, term_iri, term_literal, Literal, Statement, StatementSet, Term,
};
use crate::semantic::turtle::parse_statements;
use crate::semantic::vocab::*;
use crate::semantic::SemanticError;
use oxigraph::model::vocab::xsd;
use oxigraph::model::NamedNode;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type MappingResult<T> = Result<T, StatementMappingError>;

/// Statement set that does not describe a valid instance.
#[derive(Debug)]
pub enum StatementMappingError {
    MissingValue {
        subject: String,
        predicate: String,
    },
    MultipleValues {
        subject: String,
        predicate: String,
    },
    UnexpectedTerm {
        subject: String,
        predicate: String,
        expected: &'static str,
    },
    UnknownLanguage {
        subject: String,
        predicate: String,
        tag: String,
    },
    UnknownCode {
        subject: String,
        predicate: String,
        value: String,
    },
    InvalidValue {
        subject: String,
        predicate: String,
        reason: String,
    },
    Invariant(InvariantError),
}

impl Display for StatementMappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingValue { subject, predicate } => {
                write!(f, "<{subject}> has no value for <{predicate}>")
            }
            Self::MultipleValues { subject, predicate } => {
                write!(f, "<{subject}> has more than one value for <{predicate}>")
            }
            Self::UnexpectedTerm {
                subject,
                predicate,
                expected,
            } => write!(f, "<{subject}> <{predicate}> should be {expected}"),
            Self::UnknownLanguage {
                subject,
                predicate,
                tag,
            } => write!(f, "<{subject}> <{predicate}> uses unknown language `{tag}`"),
            Self::UnknownCode {
                subject,
                predicate,
                value,
            } => write!(f, "<{subject}> <{predicate}> uses unknown code <{value}>"),
            Self::InvalidValue {
                subject,
                predicate,
                reason,
            } => write!(f, "<{subject}> <{predicate}> is invalid: {reason}"),
            Self::Invariant(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StatementMappingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invariant(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvariantError> for StatementMappingError {
    fn from(value: InvariantError) -> Self {
        Self::Invariant(value)
    }
}

/// Marshaling contract between instances and statements.
pub trait SemanticFormsMapper {
    fn to_statements(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
    ) -> MappingResult<StatementSet>;

    fn from_statements(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        id: &Iri,
        statements: &StatementSet,
    ) -> MappingResult<Instance>;

    /// `(to_statements(instance) - removals) ∪ additions`, read back.
    ///
    /// Both documents are Turtle fragments placed in the
    /// authority's user graph.
    fn merge_instance(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
        removals: &str,
        additions: &str,
    ) -> Result<Instance, SemanticError>;
}

/// Default mapper onto the public service vocabularies.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstanceStatementMapper;

impl SemanticFormsMapper for InstanceStatementMapper {
    fn to_statements(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
    ) -> MappingResult<StatementSet> {
        let mut writer = StatementWriter::new(bestuurseenheid.user_graph()?);
        writer.instance(instance);
        Ok(writer.statements)
    }

    fn from_statements(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        id: &Iri,
        statements: &StatementSet,
    ) -> MappingResult<Instance> {
        let graph = bestuurseenheid.user_graph()?;
        StatementReader::new(statements, &graph).instance(id)
    }

    fn merge_instance(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
        removals: &str,
        additions: &str,
    ) -> Result<Instance, SemanticError> {
        let graph = bestuurseenheid
            .user_graph()
            .map_err(StatementMappingError::from)?;
        let removals = parse_statements(removals, &graph)?;
        let additions = parse_statements(additions, &graph)?;
        let current = self.to_statements(bestuurseenheid, instance)?;
        let merged = current.merge(&removals, &additions);
        Ok(self.from_statements(bestuurseenheid, &instance.id, &merged)?)
    }
}

struct StatementWriter {
    graph: Iri,
    statements: StatementSet,
}

impl StatementWriter {
    fn new(graph: Iri) -> Self {
        Self {
            graph,
            statements: StatementSet::new(),
        }
    }

    fn push(&mut self, subject: &Iri, predicate: &str, object: impl Into<Term>) {
        self.statements.insert(Statement::new(
            subject,
            NamedNode::new_unchecked(predicate),
            object,
            &self.graph,
        ));
    }

    fn iri(&mut self, subject: &Iri, predicate: &str, object: &Iri) {
        self.push(subject, predicate, object.clone());
    }

    fn iris(&mut self, subject: &Iri, predicate: &str, objects: &[Iri]) {
        for object in objects {
            self.iri(subject, predicate, object);
        }
    }

    fn optional_iri(&mut self, subject: &Iri, predicate: &str, object: Option<&Iri>) {
        if let Some(object) = object {
            self.iri(subject, predicate, object);
        }
    }

    fn class(&mut self, subject: &Iri, class: &str) {
        self.push(subject, RDF_TYPE, NamedNode::new_unchecked(class));
    }

    fn code<C: Code>(&mut self, subject: &Iri, predicate: &str, code: C) {
        self.push(subject, predicate, NamedNode::new_unchecked(code.code_iri()));
    }

    fn codes<C: Code>(&mut self, subject: &Iri, predicate: &str, codes: &[C]) {
        for code in codes {
            self.code(subject, predicate, *code);
        }
    }

    fn text(&mut self, subject: &Iri, predicate: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.push(subject, predicate, Literal::new_simple_literal(value));
        }
    }

    fn language_string(&mut self, subject: &Iri, predicate: &str, value: Option<&LanguageString>) {
        let Some(value) = value else {
            return;
        };
        for language in value.defined_languages() {
            if let Some(text) = value.get(language) {
                self.push(subject, predicate, language_literal(text, language.tag()));
            }
        }
    }

    fn date(&mut self, subject: &Iri, predicate: &str, value: Option<&FormatPreservingDate>) {
        if let Some(value) = value {
            self.push(
                subject,
                predicate,
                Literal::new_typed_literal(value.value(), xsd::DATE_TIME),
            );
        }
    }

    fn integer(&mut self, subject: &Iri, predicate: &str, value: i64) {
        self.push(
            subject,
            predicate,
            Literal::new_typed_literal(value.to_string(), xsd::INTEGER),
        );
    }

    fn boolean(&mut self, subject: &Iri, predicate: &str, value: bool) {
        self.push(
            subject,
            predicate,
            Literal::new_typed_literal(value.to_string(), xsd::BOOLEAN),
        );
    }

    fn titled(
        &mut self,
        subject: &Iri,
        uuid: &str,
        title: Option<&LanguageString>,
        description: Option<&LanguageString>,
        source: Option<&Iri>,
    ) {
        self.text(subject, MU_UUID, Some(uuid));
        self.language_string(subject, DCT_TITLE, title);
        self.language_string(subject, DCT_DESCRIPTION, description);
        self.optional_iri(subject, DCT_SOURCE, source);
    }

    fn instance(&mut self, instance: &Instance) {
        let id = &instance.id;
        self.class(id, CLASS_INSTANCE);
        self.text(id, MU_UUID, Some(&instance.uuid));
        self.iri(id, PAV_CREATED_BY, &instance.created_by);
        self.content(id, &instance.content);
        for contact_point in &instance.contact_points {
            self.iri(id, M8G_HAS_CONTACT_POINT, &contact_point.id);
            self.contact_point(contact_point);
        }
        self.optional_iri(id, DCT_SOURCE, instance.concept_id.as_ref());
        self.optional_iri(
            id,
            EXT_HAS_VERSIONED_SOURCE,
            instance.concept_snapshot_id.as_ref(),
        );
        self.text(id, SCHEMA_PRODUCT_ID, instance.product_id.as_deref());
        self.codes(id, DCT_LANGUAGE, &instance.languages);
        self.text(
            id,
            LPDC_DUTCH_LANGUAGE_VARIANT,
            Some(instance.dutch_language_variant.tag()),
        );
        self.boolean(
            id,
            LPDC_NEEDS_CONVERSION,
            instance.needs_conversion_from_formal_to_informal,
        );
        self.date(id, SCHEMA_DATE_CREATED, Some(&instance.date_created));
        self.date(id, SCHEMA_DATE_MODIFIED, Some(&instance.date_modified));
        self.date(id, SCHEMA_DATE_SENT, instance.date_sent.as_ref());
        self.date(id, SCHEMA_DATE_PUBLISHED, instance.date_published.as_ref());
        self.code(id, ADMS_STATUS, instance.status);
        if let Some(review_status) = instance.review_status {
            self.code(id, EXT_REVIEW_STATUS, review_status);
        }
        if let Some(publication_status) = instance.publication_status {
            self.code(id, EXT_PUBLICATION_STATUS, publication_status);
        }
        self.iris(id, DCT_SPATIAL, &instance.spatials);
        self.boolean(
            id,
            LPDC_FOR_MUNICIPALITY_MERGER,
            instance.for_municipality_merger,
        );
        self.optional_iri(id, LPDC_COPY_OF, instance.copy_of.as_ref());
    }

    fn content(&mut self, id: &Iri, content: &PublicServiceContent) {
        self.language_string(id, DCT_TITLE, content.title.as_ref());
        self.language_string(id, DCT_DESCRIPTION, content.description.as_ref());
        self.language_string(
            id,
            LPDC_ADDITIONAL_DESCRIPTION,
            content.additional_description.as_ref(),
        );
        self.language_string(id, LPDC_EXCEPTION, content.exception.as_ref());
        self.language_string(id, LPDC_REGULATION, content.regulation.as_ref());
        self.date(id, SCHEMA_START_DATE, content.start_date.as_ref());
        self.date(id, SCHEMA_END_DATE, content.end_date.as_ref());
        if let Some(product_type) = content.product_type {
            self.code(id, DCT_TYPE, product_type);
        }
        self.codes(id, LPDC_TARGET_AUDIENCE, &content.target_audiences);
        self.codes(id, M8G_THEMATIC_AREA, &content.themes);
        self.codes(
            id,
            LPDC_COMPETENT_AUTHORITY_LEVEL,
            &content.competent_authority_levels,
        );
        self.iris(id, M8G_HAS_COMPETENT_AUTHORITY, &content.competent_authorities);
        self.codes(
            id,
            LPDC_EXECUTING_AUTHORITY_LEVEL,
            &content.executing_authority_levels,
        );
        self.iris(id, LPDC_HAS_EXECUTING_AUTHORITY, &content.executing_authorities);
        self.codes(id, LPDC_PUBLICATION_MEDIUM, &content.publication_media);
        self.iris(id, LPDC_YOUR_EUROPE_CATEGORY, &content.your_europe_categories);
        for keyword in &content.keywords {
            self.language_string(id, DCAT_KEYWORD, Some(keyword));
        }
        for requirement in &content.requirements {
            self.iri(id, PS_HAS_REQUIREMENT, &requirement.id);
            self.requirement(requirement);
        }
        for procedure in &content.procedures {
            self.iri(id, CPSV_FOLLOWS, &procedure.id);
            self.procedure(procedure);
        }
        for website in &content.websites {
            self.iri(id, RDFS_SEE_ALSO, &website.id);
            self.website(website);
        }
        for cost in &content.costs {
            self.iri(id, M8G_HAS_COST, &cost.id);
            self.class(&cost.id, CLASS_COST);
            self.titled(
                &cost.id,
                &cost.uuid,
                cost.title.as_ref(),
                cost.description.as_ref(),
                cost.concept_source_id.as_ref(),
            );
            self.integer(&cost.id, SH_ORDER, cost.order);
        }
        for advantage in &content.financial_advantages {
            self.iri(id, CPSV_PRODUCES, &advantage.id);
            self.class(&advantage.id, CLASS_FINANCIAL_ADVANTAGE);
            self.titled(
                &advantage.id,
                &advantage.uuid,
                advantage.title.as_ref(),
                advantage.description.as_ref(),
                advantage.concept_source_id.as_ref(),
            );
            self.integer(&advantage.id, SH_ORDER, advantage.order);
        }
        for resource in &content.legal_resources {
            self.iri(id, M8G_HAS_LEGAL_RESOURCE, &resource.id);
            self.class(&resource.id, CLASS_LEGAL_RESOURCE);
            self.titled(
                &resource.id,
                &resource.uuid,
                resource.title.as_ref(),
                resource.description.as_ref(),
                resource.concept_source_id.as_ref(),
            );
            self.text(&resource.id, SCHEMA_URL, resource.url.as_deref());
            self.integer(&resource.id, SH_ORDER, resource.order);
        }
    }

    fn requirement(&mut self, requirement: &Requirement) {
        let id = &requirement.id;
        self.class(id, CLASS_REQUIREMENT);
        self.titled(
            id,
            &requirement.uuid,
            requirement.title.as_ref(),
            requirement.description.as_ref(),
            requirement.concept_source_id.as_ref(),
        );
        self.integer(id, SH_ORDER, requirement.order);
        if let Some(evidence) = &requirement.evidence {
            self.iri(id, M8G_HAS_SUPPORTING_EVIDENCE, &evidence.id);
            self.class(&evidence.id, CLASS_EVIDENCE);
            self.titled(
                &evidence.id,
                &evidence.uuid,
                evidence.title.as_ref(),
                evidence.description.as_ref(),
                evidence.concept_source_id.as_ref(),
            );
        }
    }

    fn procedure(&mut self, procedure: &Procedure) {
        let id = &procedure.id;
        self.class(id, CLASS_PROCEDURE);
        self.titled(
            id,
            &procedure.uuid,
            procedure.title.as_ref(),
            procedure.description.as_ref(),
            procedure.concept_source_id.as_ref(),
        );
        self.integer(id, SH_ORDER, procedure.order);
        for website in &procedure.websites {
            self.iri(id, LPDC_HAS_WEBSITE, &website.id);
            self.website(website);
        }
    }

    fn website(&mut self, website: &Website) {
        let id = &website.id;
        self.class(id, CLASS_WEBSITE);
        self.titled(
            id,
            &website.uuid,
            website.title.as_ref(),
            website.description.as_ref(),
            website.concept_source_id.as_ref(),
        );
        self.text(id, SCHEMA_URL, website.url.as_deref());
        self.integer(id, SH_ORDER, website.order);
    }

    fn contact_point(&mut self, contact_point: &ContactPoint) {
        let id = &contact_point.id;
        self.class(id, CLASS_CONTACT_POINT);
        self.text(id, MU_UUID, Some(&contact_point.uuid));
        self.text(id, SCHEMA_URL, contact_point.url.as_deref());
        self.text(id, SCHEMA_EMAIL, contact_point.email.as_deref());
        self.text(id, SCHEMA_TELEPHONE, contact_point.telephone.as_deref());
        self.text(id, SCHEMA_OPENING_HOURS, contact_point.opening_hours.as_deref());
        self.integer(id, SH_ORDER, contact_point.order);
        if let Some(address) = &contact_point.address {
            self.iri(id, LPDC_ADDRESS, &address.id);
            self.address(address);
        }
    }

    fn address(&mut self, address: &Address) {
        let id = &address.id;
        self.class(id, CLASS_ADDRESS);
        self.text(id, MU_UUID, Some(&address.uuid));
        self.language_string(id, ADRES_GEMEENTENAAM, address.municipality.as_ref());
        self.language_string(id, ADRES_STRAATNAAM, address.street.as_ref());
        self.text(id, ADRES_HUISNUMMER, address.house_number.as_deref());
        self.text(id, ADRES_BUSNUMMER, address.box_number.as_deref());
        self.text(id, ADRES_POSTCODE, address.postcode.as_deref());
        self.language_string(id, ADRES_LAND, address.country.as_ref());
        self.integer(id, SH_ORDER, address.order);
        self.optional_iri(id, ADRES_VERWIJST_NAAR, address.register_id.as_ref());
    }
}

/// Objects by subject, then by predicate.
struct StatementReader<'a> {
    index: HashMap<&'a str, HashMap<&'a str, Vec<&'a Term>>>,
}

impl<'a> StatementReader<'a> {
    fn new(statements: &'a StatementSet, graph: &Iri) -> Self {
        let mut index: HashMap<&'a str, HashMap<&'a str, Vec<&'a Term>>> = HashMap::new();
        for statement in statements
            .iter()
            .filter(|statement| statement.graph.as_str() == graph.as_str())
        {
            index
                .entry(statement.subject.as_str())
                .or_default()
                .entry(statement.predicate.as_str())
                .or_default()
                .push(&statement.object);
        }
        Self { index }
    }

    fn objects(&self, subject: &Iri, predicate: &str) -> &[&'a Term] {
        self.index
            .get(subject.as_str())
            .and_then(|predicates| predicates.get(predicate))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn iris(&self, subject: &Iri, predicate: &str) -> MappingResult<Vec<Iri>> {
        let mut iris = self
            .objects(subject, predicate)
            .iter()
            .map(|term| {
                let node = term_iri(term).ok_or_else(|| unexpected(subject, predicate, "an iri"))?;
                Iri::try_from(node).map_err(|err| invalid(subject, predicate, err.to_string()))
            })
            .collect::<MappingResult<Vec<_>>>()?;
        iris.sort();
        Ok(iris)
    }

    fn optional_iri(&self, subject: &Iri, predicate: &str) -> MappingResult<Option<Iri>> {
        let mut iris = self.iris(subject, predicate)?;
        if iris.len() > 1 {
            return Err(multiple(subject, predicate));
        }
        Ok(iris.pop())
    }

    fn literals(&self, subject: &Iri, predicate: &str) -> MappingResult<Vec<&'a Literal>> {
        self.objects(subject, predicate)
            .iter()
            .map(|term| {
                term_literal(term)
                    .ok_or_else(|| unexpected(subject, predicate, "a literal"))
            })
            .collect()
    }

    fn optional_literal(&self, subject: &Iri, predicate: &str) -> MappingResult<Option<&'a Literal>> {
        let mut literals = self.literals(subject, predicate)?;
        if literals.len() > 1 {
            return Err(multiple(subject, predicate));
        }
        Ok(literals.pop())
    }

    fn optional_text(&self, subject: &Iri, predicate: &str) -> MappingResult<Option<String>> {
        Ok(self
            .optional_literal(subject, predicate)?
            .map(|literal| literal.value().to_string()))
    }

    fn required_text(&self, subject: &Iri, predicate: &str) -> MappingResult<String> {
        self.optional_text(subject, predicate)?
            .ok_or_else(|| missing(subject, predicate))
    }

    fn language_of(&self, subject: &Iri, predicate: &str, literal: &Literal) -> MappingResult<Language> {
        let tag = literal.language().unwrap_or_default();
        Language::from_tag(tag).ok_or_else(|| StatementMappingError::UnknownLanguage {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            tag: tag.to_string(),
        })
    }

    fn language_string(
        &self,
        subject: &Iri,
        predicate: &str,
    ) -> MappingResult<Option<LanguageString>> {
        let mut value = LanguageString::default();
        for literal in self.literals(subject, predicate)? {
            let language = self.language_of(subject, predicate, literal)?;
            if value.get(language).is_some() {
                return Err(multiple(subject, predicate));
            }
            value = value.with_value(language, Some(literal.value().to_string()));
        }
        Ok((!value.is_empty()).then_some(value))
    }

    /// Every keyword literal is its own single-register value.
    fn keywords(&self, subject: &Iri) -> MappingResult<Vec<LanguageString>> {
        let mut keywords = self
            .literals(subject, DCAT_KEYWORD)?
            .into_iter()
            .map(|literal| {
                let language = self.language_of(subject, DCAT_KEYWORD, literal)?;
                Ok(LanguageString::of_value_in_language(literal.value(), language))
            })
            .collect::<MappingResult<Vec<_>>>()?;
        keywords.sort_by(|left, right| {
            Language::ALL
                .map(|language| left.get(language))
                .cmp(&Language::ALL.map(|language| right.get(language)))
        });
        Ok(keywords)
    }

    fn optional_date(
        &self,
        subject: &Iri,
        predicate: &str,
    ) -> MappingResult<Option<FormatPreservingDate>> {
        self.optional_literal(subject, predicate)?
            .map(|literal| {
                FormatPreservingDate::of(literal.value())
                    .map_err(|err| invalid(subject, predicate, err.to_string()))
            })
            .transpose()
    }

    fn required_date(&self, subject: &Iri, predicate: &str) -> MappingResult<FormatPreservingDate> {
        self.optional_date(subject, predicate)?
            .ok_or_else(|| missing(subject, predicate))
    }

    fn order(&self, subject: &Iri) -> MappingResult<i64> {
        let value = self.required_text(subject, SH_ORDER)?;
        value
            .trim()
            .parse::<i64>()
            .map_err(|err| invalid(subject, SH_ORDER, err.to_string()))
    }

    /// Absent means `false`.
    fn boolean(&self, subject: &Iri, predicate: &str) -> MappingResult<bool> {
        match self.optional_text(subject, predicate)?.as_deref() {
            None | Some("false") | Some("0") => Ok(false),
            Some("true") | Some("1") => Ok(true),
            Some(other) => Err(invalid(
                subject,
                predicate,
                format!("`{other}` is not a boolean"),
            )),
        }
    }

    fn codes<C: Code>(&self, subject: &Iri, predicate: &str) -> MappingResult<Vec<C>> {
        let mut found = Vec::new();
        for iri in self.iris(subject, predicate)? {
            let code = C::parse_iri(iri.as_str()).ok_or_else(|| {
                StatementMappingError::UnknownCode {
                    subject: subject.to_string(),
                    predicate: predicate.to_string(),
                    value: iri.to_string(),
                }
            })?;
            found.push(code);
        }
        Ok(C::all()
            .iter()
            .copied()
            .filter(|code| found.contains(code))
            .collect())
    }

    fn optional_code<C: Code>(&self, subject: &Iri, predicate: &str) -> MappingResult<Option<C>> {
        let mut codes = self.codes::<C>(subject, predicate)?;
        if codes.len() > 1 {
            return Err(multiple(subject, predicate));
        }
        Ok(codes.pop())
    }

    fn children<T>(
        &self,
        subject: &Iri,
        predicate: &str,
        read: impl Fn(&Self, &Iri) -> MappingResult<T>,
        order: impl Fn(&T) -> i64,
    ) -> MappingResult<Vec<T>> {
        let mut children = self
            .iris(subject, predicate)?
            .iter()
            .map(|id| read(self, id))
            .collect::<MappingResult<Vec<_>>>()?;
        children.sort_by_key(|child| order(child));
        Ok(children)
    }

    fn instance(&self, id: &Iri) -> MappingResult<Instance> {
        if !self
            .iris(id, RDF_TYPE)?
            .iter()
            .any(|class| class.as_str() == CLASS_INSTANCE)
        {
            return Err(missing(id, RDF_TYPE));
        }
        let variant_tag = self.required_text(id, LPDC_DUTCH_LANGUAGE_VARIANT)?;
        let dutch_language_variant = Language::from_tag(&variant_tag).ok_or_else(|| {
            StatementMappingError::UnknownLanguage {
                subject: id.to_string(),
                predicate: LPDC_DUTCH_LANGUAGE_VARIANT.to_string(),
                tag: variant_tag.clone(),
            }
        })?;
        let instance = Instance {
            id: id.clone(),
            uuid: self.required_text(id, MU_UUID)?,
            created_by: self
                .optional_iri(id, PAV_CREATED_BY)?
                .ok_or_else(|| missing(id, PAV_CREATED_BY))?,
            content: self.content(id)?,
            contact_points: self.children(
                id,
                M8G_HAS_CONTACT_POINT,
                Self::contact_point,
                |item| item.order,
            )?,
            concept_id: self.optional_iri(id, DCT_SOURCE)?,
            concept_snapshot_id: self.optional_iri(id, EXT_HAS_VERSIONED_SOURCE)?,
            product_id: self.optional_text(id, SCHEMA_PRODUCT_ID)?,
            languages: self.codes(id, DCT_LANGUAGE)?,
            dutch_language_variant,
            needs_conversion_from_formal_to_informal: self.boolean(id, LPDC_NEEDS_CONVERSION)?,
            date_created: self.required_date(id, SCHEMA_DATE_CREATED)?,
            date_modified: self.required_date(id, SCHEMA_DATE_MODIFIED)?,
            date_sent: self.optional_date(id, SCHEMA_DATE_SENT)?,
            date_published: self.optional_date(id, SCHEMA_DATE_PUBLISHED)?,
            status: self
                .optional_code(id, ADMS_STATUS)?
                .ok_or_else(|| missing(id, ADMS_STATUS))?,
            review_status: self.optional_code(id, EXT_REVIEW_STATUS)?,
            publication_status: self.optional_code(id, EXT_PUBLICATION_STATUS)?,
            spatials: self.iris(id, DCT_SPATIAL)?,
            for_municipality_merger: self.boolean(id, LPDC_FOR_MUNICIPALITY_MERGER)?,
            copy_of: self.optional_iri(id, LPDC_COPY_OF)?,
        };
        Ok(instance.validated()?)
    }

    fn content(&self, id: &Iri) -> MappingResult<PublicServiceContent> {
        Ok(PublicServiceContent {
            title: self.language_string(id, DCT_TITLE)?,
            description: self.language_string(id, DCT_DESCRIPTION)?,
            additional_description: self.language_string(id, LPDC_ADDITIONAL_DESCRIPTION)?,
            exception: self.language_string(id, LPDC_EXCEPTION)?,
            regulation: self.language_string(id, LPDC_REGULATION)?,
            start_date: self.optional_date(id, SCHEMA_START_DATE)?,
            end_date: self.optional_date(id, SCHEMA_END_DATE)?,
            product_type: self.optional_code(id, DCT_TYPE)?,
            target_audiences: self.codes(id, LPDC_TARGET_AUDIENCE)?,
            themes: self.codes(id, M8G_THEMATIC_AREA)?,
            competent_authority_levels: self.codes(id, LPDC_COMPETENT_AUTHORITY_LEVEL)?,
            competent_authorities: self.iris(id, M8G_HAS_COMPETENT_AUTHORITY)?,
            executing_authority_levels: self.codes(id, LPDC_EXECUTING_AUTHORITY_LEVEL)?,
            executing_authorities: self.iris(id, LPDC_HAS_EXECUTING_AUTHORITY)?,
            publication_media: self.codes(id, LPDC_PUBLICATION_MEDIUM)?,
            your_europe_categories: self.iris(id, LPDC_YOUR_EUROPE_CATEGORY)?,
            keywords: self.keywords(id)?,
            requirements: self.children(id, PS_HAS_REQUIREMENT, Self::requirement, |item| {
                item.order
            })?,
            procedures: self.children(id, CPSV_FOLLOWS, Self::procedure, |item| item.order)?,
            websites: self.children(id, RDFS_SEE_ALSO, Self::website, |item| item.order)?,
            costs: self.children(id, M8G_HAS_COST, Self::cost, |item| item.order)?,
            financial_advantages: self.children(
                id,
                CPSV_PRODUCES,
                Self::financial_advantage,
                |item| item.order,
            )?,
            legal_resources: self.children(
                id,
                M8G_HAS_LEGAL_RESOURCE,
                Self::legal_resource,
                |item| item.order,
            )?,
        })
    }

    fn requirement(&self, id: &Iri) -> MappingResult<Requirement> {
        let evidence = self
            .optional_iri(id, M8G_HAS_SUPPORTING_EVIDENCE)?
            .map(|evidence_id| {
                Ok::<_, StatementMappingError>(Evidence {
                    uuid: self.required_text(&evidence_id, MU_UUID)?,
                    title: self.language_string(&evidence_id, DCT_TITLE)?,
                    description: self.language_string(&evidence_id, DCT_DESCRIPTION)?,
                    concept_source_id: self.optional_iri(&evidence_id, DCT_SOURCE)?,
                    id: evidence_id,
                })
            })
            .transpose()?;
        Ok(Requirement {
            id: id.clone(),
            uuid: self.required_text(id, MU_UUID)?,
            title: self.language_string(id, DCT_TITLE)?,
            description: self.language_string(id, DCT_DESCRIPTION)?,
            order: self.order(id)?,
            evidence,
            concept_source_id: self.optional_iri(id, DCT_SOURCE)?,
        })
    }

    fn procedure(&self, id: &Iri) -> MappingResult<Procedure> {
        Ok(Procedure {
            id: id.clone(),
            uuid: self.required_text(id, MU_UUID)?,
            title: self.language_string(id, DCT_TITLE)?,
            description: self.language_string(id, DCT_DESCRIPTION)?,
            order: self.order(id)?,
            websites: self.children(id, LPDC_HAS_WEBSITE, Self::website, |item| item.order)?,
            concept_source_id: self.optional_iri(id, DCT_SOURCE)?,
        })
    }

    fn website(&self, id: &Iri) -> MappingResult<Website> {
        Ok(Website {
            id: id.clone(),
            uuid: self.required_text(id, MU_UUID)?,
            title: self.language_string(id, DCT_TITLE)?,
            description: self.language_string(id, DCT_DESCRIPTION)?,
            order: self.order(id)?,
            url: self.optional_text(id, SCHEMA_URL)?,
            concept_source_id: self.optional_iri(id, DCT_SOURCE)?,
        })
    }

    fn cost(&self, id: &Iri) -> MappingResult<Cost> {
        Ok(Cost {
            id: id.clone(),
            uuid: self.required_text(id, MU_UUID)?,
            title: self.language_string(id, DCT_TITLE)?,
            description: self.language_string(id, DCT_DESCRIPTION)?,
            order: self.order(id)?,
            concept_source_id: self.optional_iri(id, DCT_SOURCE)?,
        })
    }

    fn financial_advantage(&self, id: &Iri) -> MappingResult<FinancialAdvantage> {
        Ok(FinancialAdvantage {
            id: id.clone(),
            uuid: self.required_text(id, MU_UUID)?,
            title: self.language_string(id, DCT_TITLE)?,
            description: self.language_string(id, DCT_DESCRIPTION)?,
            order: self.order(id)?,
            concept_source_id: self.optional_iri(id, DCT_SOURCE)?,
        })
    }

    fn legal_resource(&self, id: &Iri) -> MappingResult<LegalResource> {
        Ok(LegalResource {
            id: id.clone(),
            uuid: self.required_text(id, MU_UUID)?,
            title: self.language_string(id, DCT_TITLE)?,
            description: self.language_string(id, DCT_DESCRIPTION)?,
            url: self.optional_text(id, SCHEMA_URL)?,
            order: self.order(id)?,
            concept_source_id: self.optional_iri(id, DCT_SOURCE)?,
        })
    }

    fn contact_point(&self, id: &Iri) -> MappingResult<ContactPoint> {
        let address = self
            .optional_iri(id, LPDC_ADDRESS)?
            .map(|address_id| self.address(&address_id))
            .transpose()?;
        Ok(ContactPoint {
            id: id.clone(),
            uuid: self.required_text(id, MU_UUID)?,
            url: self.optional_text(id, SCHEMA_URL)?,
            email: self.optional_text(id, SCHEMA_EMAIL)?,
            telephone: self.optional_text(id, SCHEMA_TELEPHONE)?,
            opening_hours: self.optional_text(id, SCHEMA_OPENING_HOURS)?,
            order: self.order(id)?,
            address,
        })
    }

    fn address(&self, id: &Iri) -> MappingResult<Address> {
        Ok(Address {
            id: id.clone(),
            uuid: self.required_text(id, MU_UUID)?,
            municipality: self.language_string(id, ADRES_GEMEENTENAAM)?,
            street: self.language_string(id, ADRES_STRAATNAAM)?,
            house_number: self.optional_text(id, ADRES_HUISNUMMER)?,
            box_number: self.optional_text(id, ADRES_BUSNUMMER)?,
            postcode: self.optional_text(id, ADRES_POSTCODE)?,
            country: self.language_string(id, ADRES_LAND)?,
            order: self.order(id)?,
            register_id: self.optional_iri(id, ADRES_VERWIJST_NAAR)?,
        })
    }
}

fn missing(subject: &Iri, predicate: &str) -> StatementMappingError {
    StatementMappingError::MissingValue {
        subject: subject.to_string(),
        predicate: predicate.to_string(),
    }
}

fn multiple(subject: &Iri, predicate: &str) -> StatementMappingError {
    StatementMappingError::MultipleValues {
        subject: subject.to_string(),
        predicate: predicate.to_string(),
    }
}

fn unexpected(subject: &Iri, predicate: &str, expected: &'static str) -> StatementMappingError {
    StatementMappingError::UnexpectedTerm {
        subject: subject.to_string(),
        predicate: predicate.to_string(),
        expected,
    }
}

fn invalid(subject: &Iri, predicate: &str, reason: String) -> StatementMappingError {
    StatementMappingError::InvalidValue {
        subject: subject.to_string(),
        predicate: predicate.to_string(),
        reason,
    }
}
