use crate::dto::MedicalInstitution;

/// Case-insensitive substring match against name or code.
///
/// `needle` must already be lowercased.
fn matches(institution: &MedicalInstitution, needle: &str) -> bool {
    institution.institution_name.to_lowercase().contains(needle)
        || institution.institution_code.to_lowercase().contains(needle)
}

/// Projects the collection onto the records matching `query`, keeping
/// backend order. An empty query returns everything.
pub fn filter_institutions(
    institutions: &[MedicalInstitution],
    query: &str,
) -> Vec<MedicalInstitution> {
    if query.is_empty() {
        return institutions.to_vec();
    }
    let needle = query.to_lowercase();
    institutions
        .iter()
        .filter(|i| matches(i, &needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn institution(id: i64, code: &str, name: &str) -> MedicalInstitution {
        MedicalInstitution {
            id,
            institution_code: code.into(),
            institution_name: name.into(),
            status: "ACTIVE".into(),
            ..MedicalInstitution::default()
        }
    }

    #[test]
    fn matches_name_prefix_case_insensitively() {
        let list = vec![institution(1, "H001", "Tokyo General")];
        assert_eq!(filter_institutions(&list, "tok"), list);
        assert!(filter_institutions(&list, "zzz").is_empty());
    }

    #[test]
    fn matches_code() {
        let list = vec![
            institution(1, "H001", "Tokyo General"),
            institution(2, "C002", "Aoyama Clinic"),
        ];
        let ids: Vec<i64> = filter_institutions(&list, "c00").iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn keeps_backend_order() {
        let list = vec![
            institution(3, "H003", "Shinjuku Hospital"),
            institution(1, "H001", "Tokyo Hospital"),
            institution(2, "P002", "Ginza Pharmacy"),
        ];
        let ids: Vec<i64> = filter_institutions(&list, "hospital")
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![3, 1]);
    }

    fn arb_institution() -> impl Strategy<Value = MedicalInstitution> {
        (any::<i64>(), "[A-Za-z0-9]{0,6}", "[A-Za-z ]{0,12}")
            .prop_map(|(id, code, name)| institution(id, &code, &name))
    }

    proptest! {
        #[test]
        fn result_is_exactly_the_matching_records(
            list in prop::collection::vec(arb_institution(), 0..20),
            query in "[A-Za-z0-9]{0,3}",
        ) {
            let filtered = filter_institutions(&list, &query);
            let needle = query.to_lowercase();
            let expected: Vec<MedicalInstitution> = list
                .iter()
                .filter(|i| {
                    i.institution_name.to_lowercase().contains(&needle)
                        || i.institution_code.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect();
            prop_assert_eq!(filtered, expected);
        }

        #[test]
        fn empty_query_is_identity(list in prop::collection::vec(arb_institution(), 0..20)) {
            prop_assert_eq!(filter_institutions(&list, ""), list);
        }

        #[test]
        fn filtering_is_idempotent(
            list in prop::collection::vec(arb_institution(), 0..20),
            query in "[A-Za-z]{0,2}",
        ) {
            let once = filter_institutions(&list, &query);
            let twice = filter_institutions(&once, &query);
            prop_assert_eq!(once, twice);
        }
    }
}
