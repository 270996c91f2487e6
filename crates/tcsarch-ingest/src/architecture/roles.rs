//! Domain role tables
//!
//! Pfam families that make up the histidine kinase core and the response
//! regulator receiver. Everything else in a two-component protein is treated
//! as a sensor or output domain.

use std::collections::BTreeSet;

/// Dimerization and histidine phosphotransfer families (Pfam 31)
pub const DIMERIZATION_DOMAINS: [&str; 5] =
    ["HisKA", "HisKA_2", "HisKA_3", "H-kinase_dim", "His_kinase"];

/// Catalytic and ATP-binding families (Pfam 31)
pub const CATALYTIC_DOMAINS: [&str; 4] = ["HATPase_c", "HATPase_c_2", "HATPase_c_5", "HWE_HK"];

/// Receiver families (Pfam 31)
pub const RESPONSE_REGULATOR_DOMAINS: [&str; 2] = ["Response_reg", "FleQ"];

/// Read-only classification of domain families
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTables {
    dimerization: BTreeSet<String>,
    catalytic: BTreeSet<String>,
    response_regulator: BTreeSet<String>,
}

impl Default for RoleTables {
    fn default() -> Self {
        Self::new(
            DIMERIZATION_DOMAINS,
            CATALYTIC_DOMAINS,
            RESPONSE_REGULATOR_DOMAINS,
        )
    }
}

impl RoleTables {
    pub fn new<D, C, R>(dimerization: D, catalytic: C, response_regulator: R) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            dimerization: dimerization.into_iter().map(Into::into).collect(),
            catalytic: catalytic.into_iter().map(Into::into).collect(),
            response_regulator: response_regulator.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_dimerization(&self, name: &str) -> bool {
        self.dimerization.contains(name)
    }

    pub fn is_catalytic(&self, name: &str) -> bool {
        self.catalytic.contains(name)
    }

    pub fn is_response_regulator(&self, name: &str) -> bool {
        self.response_regulator.contains(name)
    }

    /// True for families belonging to the kinase core or the receiver
    pub fn is_core(&self, name: &str) -> bool {
        self.is_dimerization(name) || self.is_catalytic(name) || self.is_response_regulator(name)
    }
}
