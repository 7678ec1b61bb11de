use crate::models::{Category, CollegeResult, Gender, InstitutionRecord, SearchFilters};
use std::collections::HashMap;

/// Whether a rank is at or better than the record's cutoff for the segment.
/// A missing cutoff means that segment admitted nobody, never eligibility.
pub fn is_eligible(
    college: &InstitutionRecord,
    rank: u32,
    category: Category,
    gender: Gender,
) -> bool {
    match college.cutoff_rank(category, gender) {
        Some(cutoff) => rank <= cutoff,
        None => false,
    }
}

/// Search the dataset for a query.
///
/// Rows are grouped into logical institutions by (INSTCODE, name). Within
/// each group the fee and college-type filters drop rows, then the row with
/// the lowest non-null cutoff for the queried segment becomes the group's
/// representative; a strict comparison keeps the first row in input order on
/// ties. Groups with no surviving cutoff produce nothing.
///
/// Results are sorted eligible-first, then ascending by cutoff rank. The
/// sort is stable and groups are visited in first-encounter order, so the
/// output is deterministic for a given input sequence.
pub fn search_colleges(
    colleges: &[InstitutionRecord],
    filters: &SearchFilters,
) -> Vec<CollegeResult> {
    // Group rows by institution
    let mut group_order: Vec<(String, String)> = Vec::new();
    let mut groups: HashMap<(String, String), Vec<&InstitutionRecord>> = HashMap::new();
    for college in colleges {
        let key = (college.inst_code.clone(), college.name.clone());
        if !groups.contains_key(&key) {
            group_order.push(key.clone());
        }
        groups.entry(key).or_insert_with(Vec::new).push(college);
    }

    let mut results = Vec::new();
    for key in &group_order {
        let mut best: Option<(&InstitutionRecord, u32)> = None;

        for &college in &groups[key] {
            // Apply filters; rows with no fee always pass the fee filter
            if let Some(max_fee) = filters.max_fee {
                if let Some(fee) = college.fee {
                    if fee > max_fee {
                        continue;
                    }
                }
            }
            if let Some(wanted) = filters.coed {
                if college.coed != wanted {
                    continue;
                }
            }

            // Keep the best (lowest) cutoff for this institution
            if let Some(cutoff) = college.cutoff_rank(filters.category, filters.gender) {
                let better = match best {
                    None => true,
                    Some((_, best_cutoff)) => cutoff < best_cutoff,
                };
                if better {
                    best = Some((college, cutoff));
                }
            }
        }

        if let Some((college, cutoff)) = best {
            results.push(CollegeResult {
                college: college.clone(),
                cutoff_rank: Some(cutoff),
                eligible: filters.rank <= cutoff,
            });
        }
    }

    // Eligible colleges first, then by cutoff rank. The sort is stable, so
    // equal cutoffs keep their first-encounter order.
    results.sort_by(|a, b| {
        b.eligible
            .cmp(&a.eligible)
            .then_with(|| a.cutoff_rank.cmp(&b.cutoff_rank))
    });

    results
}

/// Minimum and maximum of all known, strictly positive fees in the dataset.
/// Returns (0.0, 0.0) when no such fee exists.
pub fn fee_range(colleges: &[InstitutionRecord]) -> (f64, f64) {
    let fees: Vec<f64> = colleges
        .iter()
        .filter_map(|college| college.fee)
        .filter(|fee| *fee > 0.0)
        .collect();

    if fees.is_empty() {
        return (0.0, 0.0);
    }

    let min = fees.iter().copied().fold(f64::INFINITY, f64::min);
    let max = fees.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

/// Sorted, deduplicated list of places appearing in the dataset.
pub fn unique_places(colleges: &[InstitutionRecord]) -> Vec<String> {
    let mut places: Vec<String> = colleges.iter().map(|college| college.place.clone()).collect();
    places.sort();
    places.dedup();
    places
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdmissionType;

    fn make_college(
        code: &str,
        name: &str,
        oc_boys: Option<u32>,
        fee: Option<f64>,
        coed: AdmissionType,
    ) -> InstitutionRecord {
        InstitutionRecord {
            inst_code: code.to_string(),
            name: name.to_string(),
            place: "HYDERABAD".to_string(),
            coed,
            estd: 1998,
            oc_boys,
            oc_girls: None,
            sc_boys: None,
            sc_girls: None,
            st_boys: None,
            st_girls: None,
            bca_boys: None,
            bca_girls: None,
            bcb_boys: None,
            bcb_girls: None,
            bcc_boys: None,
            bcc_girls: None,
            bcd_boys: None,
            bcd_girls: None,
            bce_boys: None,
            bce_girls: None,
            oc_ews_boys: None,
            oc_ews_girls: None,
            fee,
        }
    }

    fn oc_boys_filters(rank: u32) -> SearchFilters {
        SearchFilters {
            rank,
            category: Category::Oc,
            gender: Gender::Boys,
            max_fee: None,
            coed: None,
        }
    }

    #[test]
    fn test_rank_within_cutoff_is_eligible() {
        let colleges = vec![make_college(
            "1001",
            "SAMPLE ENGINEERING COLLEGE",
            Some(5000),
            Some(50000.0),
            AdmissionType::Boys,
        )];
        let results = search_colleges(&colleges, &oc_boys_filters(4000));
        assert_eq!(results.len(), 1);
        assert!(results[0].eligible);
        assert_eq!(results[0].cutoff_rank, Some(5000));
    }

    #[test]
    fn test_rank_beyond_cutoff_is_not_eligible() {
        let colleges = vec![make_college(
            "1001",
            "SAMPLE ENGINEERING COLLEGE",
            Some(5000),
            Some(50000.0),
            AdmissionType::Boys,
        )];
        let results = search_colleges(&colleges, &oc_boys_filters(6000));
        assert_eq!(results.len(), 1);
        assert!(!results[0].eligible);
        assert_eq!(results[0].cutoff_rank, Some(5000));
    }

    #[test]
    fn test_rank_equal_to_cutoff_is_eligible() {
        let colleges = vec![make_college("1001", "A", Some(5000), None, AdmissionType::Coed)];
        let results = search_colleges(&colleges, &oc_boys_filters(5000));
        assert!(results[0].eligible);
    }

    #[test]
    fn test_max_fee_filter_drops_expensive_rows() {
        let colleges = vec![make_college(
            "1001",
            "SAMPLE ENGINEERING COLLEGE",
            Some(5000),
            Some(50000.0),
            AdmissionType::Boys,
        )];
        let mut filters = oc_boys_filters(4000);
        filters.max_fee = Some(30000.0);
        let results = search_colleges(&colleges, &filters);
        assert!(results.is_empty());
    }

    #[test]
    fn test_rows_without_fee_pass_the_fee_filter() {
        let colleges = vec![make_college("1001", "A", Some(5000), None, AdmissionType::Coed)];
        let mut filters = oc_boys_filters(4000);
        filters.max_fee = Some(30000.0);
        let results = search_colleges(&colleges, &filters);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_college_type_filter() {
        let colleges = vec![
            make_college("1001", "A", Some(5000), None, AdmissionType::Boys),
            make_college("1002", "B", Some(4000), None, AdmissionType::Coed),
        ];
        let mut filters = oc_boys_filters(4000);
        filters.coed = Some(AdmissionType::Coed);
        let results = search_colleges(&colleges, &filters);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].college.inst_code, "1002");
    }

    #[test]
    fn test_rows_sharing_code_and_name_fold_into_one_result() {
        // Second row has no cutoff for the segment but passes all filters;
        // it must never displace the sibling that has one.
        let colleges = vec![
            make_college("1001", "SAME COLLEGE", Some(5000), Some(60000.0), AdmissionType::Boys),
            make_college("1001", "SAME COLLEGE", None, Some(35000.0), AdmissionType::Coed),
        ];
        let results = search_colleges(&colleges, &oc_boys_filters(4000));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].cutoff_rank, Some(5000));
        assert_eq!(results[0].college.coed, AdmissionType::Boys);
    }

    #[test]
    fn test_group_with_only_null_cutoffs_produces_nothing() {
        let colleges = vec![
            make_college("1001", "A", None, Some(40000.0), AdmissionType::Coed),
            make_college("1001", "A", None, Some(42000.0), AdmissionType::Coed),
        ];
        let results = search_colleges(&colleges, &oc_boys_filters(4000));
        assert!(results.is_empty());
    }

    #[test]
    fn test_lowest_cutoff_row_represents_the_group() {
        let colleges = vec![
            make_college("1001", "A", Some(8000), Some(50000.0), AdmissionType::Coed),
            make_college("1001", "A", Some(3000), Some(70000.0), AdmissionType::Coed),
        ];
        let results = search_colleges(&colleges, &oc_boys_filters(4000));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].cutoff_rank, Some(3000));
        assert_eq!(results[0].college.fee, Some(70000.0));
    }

    #[test]
    fn test_equal_cutoffs_within_group_keep_first_row() {
        let colleges = vec![
            make_college("1001", "A", Some(5000), Some(10000.0), AdmissionType::Coed),
            make_college("1001", "A", Some(5000), Some(90000.0), AdmissionType::Coed),
        ];
        let results = search_colleges(&colleges, &oc_boys_filters(4000));
        assert_eq!(results[0].college.fee, Some(10000.0));
    }

    #[test]
    fn test_empty_dataset_returns_no_results() {
        let results = search_colleges(&[], &oc_boys_filters(4000));
        assert!(results.is_empty());
    }

    #[test]
    fn test_sort_puts_eligible_first_then_ascending_cutoff() {
        let colleges = vec![
            make_college("1001", "A", Some(2000), None, AdmissionType::Coed),
            make_college("1002", "B", Some(9000), None, AdmissionType::Coed),
            make_college("1003", "C", Some(5000), None, AdmissionType::Coed),
            make_college("1004", "D", Some(1000), None, AdmissionType::Coed),
        ];
        let results = search_colleges(&colleges, &oc_boys_filters(4500));

        let codes: Vec<&str> = results.iter().map(|r| r.college.inst_code.as_str()).collect();
        // Eligible (5000, 9000 ascending), then missed (1000, 2000 ascending)
        assert_eq!(codes, vec!["1003", "1002", "1004", "1001"]);

        for pair in results.windows(2) {
            let ok = (pair[0].eligible && !pair[1].eligible)
                || (pair[0].eligible == pair[1].eligible
                    && pair[0].cutoff_rank <= pair[1].cutoff_rank);
            assert!(ok, "sort contract violated: {:?}", codes);
        }
    }

    #[test]
    fn test_equal_cutoffs_across_groups_keep_input_order() {
        let colleges = vec![
            make_college("1002", "B", Some(5000), None, AdmissionType::Coed),
            make_college("1001", "A", Some(5000), None, AdmissionType::Coed),
        ];
        let results = search_colleges(&colleges, &oc_boys_filters(4000));
        assert_eq!(results[0].college.inst_code, "1002");
        assert_eq!(results[1].college.inst_code, "1001");
    }

    #[test]
    fn test_rank_only_flips_eligibility_never_membership() {
        let colleges = vec![
            make_college("1001", "A", Some(2000), None, AdmissionType::Coed),
            make_college("1002", "B", Some(5000), None, AdmissionType::Coed),
            make_college("1003", "C", Some(9000), None, AdmissionType::Coed),
        ];
        let near = search_colleges(&colleges, &oc_boys_filters(1500));
        let far = search_colleges(&colleges, &oc_boys_filters(6000));

        let mut near_codes: Vec<&str> = near.iter().map(|r| r.college.inst_code.as_str()).collect();
        let mut far_codes: Vec<&str> = far.iter().map(|r| r.college.inst_code.as_str()).collect();
        near_codes.sort();
        far_codes.sort();
        assert_eq!(near_codes, far_codes);

        // A better rank can only gain eligibility, never lose it
        for result in &far {
            if result.eligible {
                let same = near
                    .iter()
                    .find(|r| r.college.inst_code == result.college.inst_code)
                    .unwrap();
                assert!(same.eligible);
            }
        }
    }

    #[test]
    fn test_search_is_idempotent() {
        let colleges = vec![
            make_college("1001", "A", Some(2000), Some(30000.0), AdmissionType::Coed),
            make_college("1002", "B", Some(7000), None, AdmissionType::Boys),
        ];
        let filters = oc_boys_filters(4000);
        assert_eq!(
            search_colleges(&colleges, &filters),
            search_colleges(&colleges, &filters)
        );
    }

    #[test]
    fn test_is_eligible_null_cutoff_is_never_eligible() {
        let college = make_college("1001", "A", None, None, AdmissionType::Coed);
        assert!(!is_eligible(&college, 1, Category::Oc, Gender::Boys));
        let college = make_college("1001", "A", Some(100), None, AdmissionType::Coed);
        assert!(is_eligible(&college, 100, Category::Oc, Gender::Boys));
        assert!(!is_eligible(&college, 101, Category::Oc, Gender::Boys));
    }

    #[test]
    fn test_fee_range_ignores_null_and_zero_fees() {
        let colleges = vec![
            make_college("1001", "A", None, Some(35000.0), AdmissionType::Coed),
            make_college("1002", "B", None, None, AdmissionType::Coed),
            make_college("1003", "C", None, Some(0.0), AdmissionType::Coed),
            make_college("1004", "D", None, Some(120000.0), AdmissionType::Coed),
        ];
        assert_eq!(fee_range(&colleges), (35000.0, 120000.0));
    }

    #[test]
    fn test_fee_range_of_empty_dataset_is_zero() {
        assert_eq!(fee_range(&[]), (0.0, 0.0));
        let colleges = vec![make_college("1001", "A", None, None, AdmissionType::Coed)];
        assert_eq!(fee_range(&colleges), (0.0, 0.0));
    }

    #[test]
    fn test_unique_places_sorted_and_deduplicated() {
        let mut a = make_college("1001", "A", None, None, AdmissionType::Coed);
        a.place = "WARANGAL".to_string();
        let b = make_college("1002", "B", None, None, AdmissionType::Coed);
        let mut c = make_college("1003", "C", None, None, AdmissionType::Coed);
        c.place = "WARANGAL".to_string();
        let colleges = vec![a, b, c];
        assert_eq!(unique_places(&colleges), vec!["HYDERABAD", "WARANGAL"]);
    }
}
