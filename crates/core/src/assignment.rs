//! User-to-project assignment sets.

use serde::Deserialize;

use crate::types::UserId;

/// User ids as sent by clients: either a bare id or a list of ids.
///
/// `5` and `[5]` mean the same thing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UserIds {
    One(UserId),
    Many(Vec<UserId>),
}

impl UserIds {
    /// Flatten into a list with duplicates removed, keeping first-seen order.
    pub fn normalize(&self) -> Vec<UserId> {
        match self {
            Self::One(id) => vec![*id],
            Self::Many(ids) => dedup_user_ids(ids),
        }
    }
}

/// Remove repeated ids while keeping the order in which they first appear.
pub fn dedup_user_ids(ids: &[UserId]) -> Vec<UserId> {
    let mut out = Vec::with_capacity(ids.len());
    for &id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn bare_integer_deserializes_as_one() {
        let ids: UserIds = serde_json::from_str("5").unwrap();
        assert_matches!(ids, UserIds::One(5));
    }

    #[test]
    fn array_deserializes_as_many() {
        let ids: UserIds = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(ids, UserIds::Many(vec![1, 2, 3]));
    }

    #[test]
    fn bare_integer_normalizes_like_single_element_list() {
        assert_eq!(UserIds::One(5).normalize(), UserIds::Many(vec![5]).normalize());
    }

    #[test]
    fn duplicates_are_dropped_in_first_seen_order() {
        let ids = UserIds::Many(vec![3, 1, 3, 2, 1]);
        assert_eq!(ids.normalize(), vec![3, 1, 2]);
    }

    #[test]
    fn empty_list_stays_empty() {
        assert!(UserIds::Many(Vec::new()).normalize().is_empty());
    }

    #[test]
    fn strings_are_rejected() {
        assert!(serde_json::from_str::<UserIds>(r#""7""#).is_err());
        assert!(serde_json::from_str::<UserIds>(r#"["7"]"#).is_err());
    }
}
