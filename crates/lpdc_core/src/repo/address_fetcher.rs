//! Address register lookup used when contact points move between
//! authorities.

use crate::model::iri::Iri;
use crate::repo::error::RepoResult;

/// Canonical register entry for a postal address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressMatch {
    pub register_id: Iri,
    pub municipality: String,
    pub street: String,
    pub house_number: String,
    pub box_number: Option<String>,
    pub postcode: String,
}

pub trait AddressFetcher {
    /// Register entry matching the given address parts, if any.
    fn find_address_match(
        &self,
        municipality: &str,
        street: &str,
        house_number: &str,
        box_number: Option<&str>,
    ) -> RepoResult<Option<AddressMatch>>;
}

/// Address register held in memory; matching is case-insensitive.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAddressRegister {
    entries: Vec<AddressMatch>,
}

impl InMemoryAddressRegister {
    pub fn new(entries: Vec<AddressMatch>) -> Self {
        Self { entries }
    }

    pub fn insert(&mut self, entry: AddressMatch) {
        self.entries.push(entry);
    }
}

impl AddressFetcher for InMemoryAddressRegister {
    fn find_address_match(
        &self,
        municipality: &str,
        street: &str,
        house_number: &str,
        box_number: Option<&str>,
    ) -> RepoResult<Option<AddressMatch>> {
        let same = |left: &str, right: &str| left.trim().eq_ignore_ascii_case(right.trim());
        Ok(self
            .entries
            .iter()
            .find(|entry| {
                same(&entry.municipality, municipality)
                    && same(&entry.street, street)
                    && same(&entry.house_number, house_number)
                    && match (entry.box_number.as_deref(), box_number) {
                        (None, None) => true,
                        (Some(left), Some(right)) => same(left, right),
                        _ => false,
                    }
            })
            .cloned())
    }
}
