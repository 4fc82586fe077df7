//! Built-in broker table.
//!
//! Entry order matters: lookups return the first entry whose domain is
//! contained in the hostname.

use crate::definition::{BrokerCategory, BrokerInfo, RemovalDifficulty, Severity};
use spectral_core::DataCategory::{
    self, Address, Age, Assets, Background, Criminal, Education, Email, Employment, Friends,
    Name, Phone, Photos, Posts, Relatives, ReputationScore, Skills, Social,
};

/// Build the default broker table.
#[must_use]
pub fn builtin_brokers() -> Vec<BrokerInfo> {
    vec![
        entry(
            "spokeo.com",
            "Spokeo",
            BrokerCategory::PeopleSearch,
            Severity::High,
            RemovalDifficulty::Easy,
            "https://www.spokeo.com/optout",
            &[Name, Address, Phone, Email, Relatives, Age],
            15,
        ),
        entry(
            "whitepages.com",
            "Whitepages",
            BrokerCategory::PeopleSearch,
            Severity::High,
            RemovalDifficulty::Medium,
            "https://www.whitepages.com/suppression-requests",
            &[Name, Address, Phone, Relatives],
            15,
        ),
        entry(
            "beenverified.com",
            "BeenVerified",
            BrokerCategory::BackgroundCheck,
            Severity::Critical,
            RemovalDifficulty::Medium,
            "https://www.beenverified.com/f/optout/search",
            &[Name, Address, Phone, Criminal, Assets],
            20,
        ),
        entry(
            "radaris.com",
            "Radaris",
            BrokerCategory::PeopleSearch,
            Severity::High,
            RemovalDifficulty::Hard,
            "https://radaris.com/control/privacy",
            &[Name, Address, Phone, Social, Photos],
            18,
        ),
        entry(
            "fastpeoplesearch.com",
            "Fast People Search",
            BrokerCategory::PeopleSearch,
            Severity::High,
            RemovalDifficulty::Easy,
            "https://www.fastpeoplesearch.com/removal",
            &[Name, Address, Phone, Relatives],
            12,
        ),
        entry(
            "truepeoplesearch.com",
            "True People Search",
            BrokerCategory::PeopleSearch,
            Severity::High,
            RemovalDifficulty::Easy,
            "https://www.truepeoplesearch.com/removal",
            &[Name, Address, Phone, Relatives],
            12,
        ),
        entry(
            "linkedin.com",
            "LinkedIn",
            BrokerCategory::SocialProfessional,
            Severity::Medium,
            RemovalDifficulty::Easy,
            "https://www.linkedin.com/help/linkedin/answer/a1342443",
            &[Name, Employment, Education, Skills],
            8,
        ),
        entry(
            "facebook.com",
            "Facebook",
            BrokerCategory::Social,
            Severity::Medium,
            RemovalDifficulty::Easy,
            "https://www.facebook.com/help/delete_account",
            &[Name, Photos, Friends, Posts],
            10,
        ),
        entry(
            "intelius.com",
            "Intelius",
            BrokerCategory::BackgroundCheck,
            Severity::Critical,
            RemovalDifficulty::Hard,
            "https://www.intelius.com/opt-out",
            &[Name, Address, Phone, Criminal, Assets, Relatives],
            20,
        ),
        entry(
            "mylife.com",
            "MyLife",
            BrokerCategory::Reputation,
            Severity::Critical,
            RemovalDifficulty::Hard,
            "https://www.mylife.com/ccpa/index.pubview",
            &[Name, Address, ReputationScore, Background],
            22,
        ),
        entry(
            "instantcheckmate.com",
            "Instant Checkmate",
            BrokerCategory::BackgroundCheck,
            Severity::Critical,
            RemovalDifficulty::Medium,
            "https://www.instantcheckmate.com/opt-out/",
            &[Name, Address, Phone, Criminal, Assets],
            18,
        ),
        entry(
            "peoplefinder.com",
            "PeopleFinder",
            BrokerCategory::PeopleSearch,
            Severity::High,
            RemovalDifficulty::Medium,
            "https://www.peoplefinder.com/optout.php",
            &[Name, Address, Phone, Relatives],
            12,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn entry(
    domain: &str,
    name: &str,
    category: BrokerCategory,
    severity: Severity,
    removal_difficulty: RemovalDifficulty,
    removal_url: &str,
    data_types: &[DataCategory],
    weight: u32,
) -> BrokerInfo {
    BrokerInfo {
        domain: domain.to_string(),
        name: name.to_string(),
        category,
        severity,
        removal_difficulty,
        removal_url: removal_url.to_string(),
        data_types: data_types.to_vec(),
        weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_entries_are_valid() {
        for info in builtin_brokers() {
            info.validate()
                .unwrap_or_else(|e| panic!("{} failed validation: {e}", info.domain));
        }
    }

    #[test]
    fn test_builtin_domains_unique() {
        let brokers = builtin_brokers();
        let domains: HashSet<_> = brokers.iter().map(|b| b.domain.as_str()).collect();
        assert_eq!(domains.len(), brokers.len());
        assert_eq!(brokers.len(), 12);
    }

    #[test]
    fn test_builtin_critical_sites() {
        let critical: Vec<_> = builtin_brokers()
            .into_iter()
            .filter(|b| b.severity == Severity::Critical)
            .map(|b| b.domain)
            .collect();
        assert_eq!(
            critical,
            vec![
                "beenverified.com",
                "intelius.com",
                "mylife.com",
                "instantcheckmate.com"
            ]
        );
    }
}
