//! Gate — who may issue commands and who receives periodic reports.

/// Chat id the transport attaches to every inbound message.
pub type Identity = i64;

/// Identities configured at startup, in configuration order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    ids: Vec<Identity>,
}

impl AllowList {
    /// Parse a comma-separated list. Blank and non-numeric entries are dropped.
    pub fn parse(raw: &str) -> Self {
        let mut ids = Vec::new();
        for part in raw.split(',') {
            let Ok(id) = part.trim().parse::<Identity>() else {
                continue;
            };
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Self { ids }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: Identity) -> bool {
        self.ids.contains(&id)
    }

    pub fn as_slice(&self) -> &[Identity] {
        &self.ids
    }
}

impl From<Vec<Identity>> for AllowList {
    fn from(ids: Vec<Identity>) -> Self {
        let mut list = Self::default();
        for id in ids {
            if !list.ids.contains(&id) {
                list.ids.push(id);
            }
        }
        list
    }
}

/// Authorization decisions over a fixed [`AllowList`].
///
/// An empty list is open access for commands but an empty recipient set for
/// periodic reports: broadcasting needs explicit recipients.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationGate {
    allow: AllowList,
}

impl AuthorizationGate {
    pub fn new(allow: AllowList) -> Self {
        Self { allow }
    }

    pub fn is_allowed(&self, identity: Identity) -> bool {
        self.allow.is_empty() || self.allow.contains(identity)
    }

    pub fn is_open(&self) -> bool {
        self.allow.is_empty()
    }

    pub fn recipients(&self) -> &[Identity] {
        self.allow.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drops_blank_and_non_numeric() {
        let list = AllowList::parse(" 12345, ,abc,67890,,12x");
        assert_eq!(list.as_slice(), &[12345, 67890]);
    }

    #[test]
    fn test_parse_keeps_negative_group_ids() {
        let list = AllowList::parse("-1001234567890,42");
        assert!(list.contains(-1001234567890));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_parse_deduplicates_in_order() {
        let list = AllowList::parse("3,1,3,2,1");
        assert_eq!(list.as_slice(), &[3, 1, 2]);
    }

    #[test]
    fn test_parse_empty_string() {
        assert!(AllowList::parse("").is_empty());
        assert!(AllowList::parse(" , ,").is_empty());
    }

    #[test]
    fn test_non_member_denied() {
        let gate = AuthorizationGate::new(AllowList::from(vec![111]));
        assert!(gate.is_allowed(111));
        for id in [0, 1, 110, 112, 222, -111, i64::MAX] {
            assert!(!gate.is_allowed(id), "{} should be denied", id);
        }
    }

    #[test]
    fn test_empty_list_allows_everyone() {
        let gate = AuthorizationGate::new(AllowList::default());
        assert!(gate.is_open());
        for id in [0, 1, 111, -42, i64::MIN, i64::MAX] {
            assert!(gate.is_allowed(id));
        }
    }

    #[test]
    fn test_empty_list_has_no_recipients() {
        let gate = AuthorizationGate::new(AllowList::parse("junk"));
        assert!(gate.recipients().is_empty());
    }

    #[test]
    fn test_recipients_follow_config_order() {
        let gate = AuthorizationGate::new(AllowList::parse("222,111"));
        assert_eq!(gate.recipients(), &[222, 111]);
    }
}
