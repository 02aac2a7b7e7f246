//! IRIs of the vocabularies instances are projected onto.

// Classes
pub const CLASS_INSTANCE: &str =
    "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#InstancePublicService";
pub const CLASS_REQUIREMENT: &str = "http://data.europa.eu/m8g/Requirement";
pub const CLASS_EVIDENCE: &str = "http://data.europa.eu/m8g/Evidence";
pub const CLASS_PROCEDURE: &str = "http://purl.org/vocab/cpsv#Rule";
pub const CLASS_WEBSITE: &str = "http://schema.org/WebSite";
pub const CLASS_COST: &str = "http://data.europa.eu/m8g/Cost";
pub const CLASS_FINANCIAL_ADVANTAGE: &str =
    "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#FinancialAdvantage";
pub const CLASS_LEGAL_RESOURCE: &str = "http://data.europa.eu/eli/ontology#LegalResource";
pub const CLASS_CONTACT_POINT: &str = "http://schema.org/ContactPoint";
pub const CLASS_ADDRESS: &str = "http://www.w3.org/ns/locn#Address";

// Generic properties
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const MU_UUID: &str = "http://mu.semte.ch/vocabularies/core/uuid";
pub const DCT_TITLE: &str = "http://purl.org/dc/terms/title";
pub const DCT_DESCRIPTION: &str = "http://purl.org/dc/terms/description";
pub const DCT_SOURCE: &str = "http://purl.org/dc/terms/source";
pub const DCT_TYPE: &str = "http://purl.org/dc/terms/type";
pub const DCT_LANGUAGE: &str = "http://purl.org/dc/terms/language";
pub const DCT_SPATIAL: &str = "http://purl.org/dc/terms/spatial";
pub const SH_ORDER: &str = "http://www.w3.org/ns/shacl#order";
pub const SCHEMA_URL: &str = "http://schema.org/url";

// Instance properties
pub const PAV_CREATED_BY: &str = "http://purl.org/pav/createdBy";
pub const LPDC_ADDITIONAL_DESCRIPTION: &str =
    "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#additionalDescription";
pub const LPDC_EXCEPTION: &str =
    "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#exception";
pub const LPDC_REGULATION: &str =
    "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#regulation";
pub const SCHEMA_START_DATE: &str = "http://schema.org/startDate";
pub const SCHEMA_END_DATE: &str = "http://schema.org/endDate";
pub const LPDC_TARGET_AUDIENCE: &str =
    "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#targetAudience";
pub const M8G_THEMATIC_AREA: &str = "http://data.europa.eu/m8g/thematicArea";
pub const LPDC_COMPETENT_AUTHORITY_LEVEL: &str =
    "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#competentAuthorityLevel";
pub const M8G_HAS_COMPETENT_AUTHORITY: &str = "http://data.europa.eu/m8g/hasCompetentAuthority";
pub const LPDC_EXECUTING_AUTHORITY_LEVEL: &str =
    "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#executingAuthorityLevel";
pub const LPDC_HAS_EXECUTING_AUTHORITY: &str =
    "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#hasExecutingAuthority";
pub const LPDC_PUBLICATION_MEDIUM: &str =
    "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#publicationMedium";
pub const LPDC_YOUR_EUROPE_CATEGORY: &str =
    "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#yourEuropeCategory";
pub const DCAT_KEYWORD: &str = "http://www.w3.org/ns/dcat#keyword";
pub const PS_HAS_REQUIREMENT: &str = "http://vocab.belgif.be/ns/publicservice#hasRequirement";
pub const M8G_HAS_SUPPORTING_EVIDENCE: &str = "http://data.europa.eu/m8g/hasSupportingEvidence";
pub const CPSV_FOLLOWS: &str = "http://purl.org/vocab/cpsv#follows";
pub const LPDC_HAS_WEBSITE: &str =
    "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#hasWebsite";
pub const RDFS_SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
pub const M8G_HAS_COST: &str = "http://data.europa.eu/m8g/hasCost";
pub const CPSV_PRODUCES: &str = "http://purl.org/vocab/cpsv#produces";
pub const M8G_HAS_LEGAL_RESOURCE: &str = "http://data.europa.eu/m8g/hasLegalResource";
pub const M8G_HAS_CONTACT_POINT: &str = "http://data.europa.eu/m8g/hasContactPoint";
pub const SCHEMA_PRODUCT_ID: &str = "http://schema.org/productID";
pub const EXT_HAS_VERSIONED_SOURCE: &str = "http://mu.semte.ch/vocabularies/ext/hasVersionedSource";
pub const LPDC_DUTCH_LANGUAGE_VARIANT: &str =
    "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#dutchLanguageVariant";
pub const LPDC_NEEDS_CONVERSION: &str =
    "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#needsConversionFromFormalToInformal";
pub const SCHEMA_DATE_CREATED: &str = "http://schema.org/dateCreated";
pub const SCHEMA_DATE_MODIFIED: &str = "http://schema.org/dateModified";
pub const SCHEMA_DATE_SENT: &str = "http://schema.org/dateSent";
pub const SCHEMA_DATE_PUBLISHED: &str = "http://schema.org/datePublished";
pub const ADMS_STATUS: &str = "http://www.w3.org/ns/adms#status";
pub const EXT_REVIEW_STATUS: &str = "http://mu.semte.ch/vocabularies/ext/reviewStatus";
pub const EXT_PUBLICATION_STATUS: &str = "http://mu.semte.ch/vocabularies/ext/publicationStatus";
pub const LPDC_FOR_MUNICIPALITY_MERGER: &str =
    "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#forMunicipalityMerger";
pub const LPDC_COPY_OF: &str = "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#copyOf";

// Contact point and address properties
pub const SCHEMA_EMAIL: &str = "http://schema.org/email";
pub const SCHEMA_TELEPHONE: &str = "http://schema.org/telephone";
pub const SCHEMA_OPENING_HOURS: &str = "http://schema.org/openingHours";
pub const LPDC_ADDRESS: &str = "https://productencatalogus.data.vlaanderen.be/ns/ipdc-lpdc#address";
pub const ADRES_GEMEENTENAAM: &str = "https://data.vlaanderen.be/ns/adres#gemeentenaam";
pub const ADRES_STRAATNAAM: &str = "https://data.vlaanderen.be/ns/adres#Straatnaam";
pub const ADRES_HUISNUMMER: &str = "https://data.vlaanderen.be/ns/adres#Adresvoorstelling.huisnummer";
pub const ADRES_BUSNUMMER: &str = "https://data.vlaanderen.be/ns/adres#Adresvoorstelling.busnummer";
pub const ADRES_POSTCODE: &str = "https://data.vlaanderen.be/ns/adres#postcode";
pub const ADRES_LAND: &str = "https://data.vlaanderen.be/ns/adres#land";
pub const ADRES_VERWIJST_NAAR: &str = "https://data.vlaanderen.be/ns/adres#verwijstNaar";
