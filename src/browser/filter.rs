//! Text filter over one searchable column

use super::column::Accessor;
use super::value::Record;

/// Indices of the records whose accessor value contains `search_text`,
/// compared case-insensitively on the default string form.
///
/// An empty search keeps every record in its original order.
pub fn filter<R: Record>(records: &[R], search_text: &str, accessor: &Accessor<R>) -> Vec<usize> {
    if search_text.is_empty() {
        return (0..records.len()).collect();
    }

    let needle = search_text.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            accessor
                .resolve(record)
                .to_string()
                .to_lowercase()
                .contains(&needle)
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::column::tests::{item, Item};
    use crate::browser::value::Value;

    fn records() -> Vec<Item> {
        vec![
            item("Steel Bolt", Some(10)),
            item("brass nut", Some(250)),
            item("Washer", None),
            item("BOLT CUTTER", Some(1)),
        ]
    }

    #[test]
    fn empty_search_is_identity() {
        let records = records();
        let rows = filter(&records, "", &Accessor::field("name"));
        assert_eq!(rows, vec![0, 1, 2, 3]);
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        let records = records();
        let rows = filter(&records, "bOlT", &Accessor::field("name"));
        assert_eq!(rows, vec![0, 3]);
    }

    #[test]
    fn numbers_are_stringified() {
        let records = records();
        let rows = filter(&records, "25", &Accessor::field("qty"));
        assert_eq!(rows, vec![1]);
    }

    #[test]
    fn null_values_never_match_non_empty_search() {
        let records = records();
        let accessor: Accessor<Item> = Accessor::computed(|r: &Item| match r.qty {
            Some(q) => Value::Int(q),
            None => Value::Null,
        });
        let rows = filter(&records, "1", &accessor);
        assert_eq!(rows, vec![0, 3]);
    }

    #[test]
    fn no_match_gives_empty_result() {
        let records = records();
        assert!(filter(&records, "abc", &Accessor::field("name")).is_empty());
    }

    #[test]
    fn result_is_subset_in_original_order() {
        let records = records();
        for query in ["", "o", "t", "zz", "1"] {
            let rows = filter(&records, query, &Accessor::field("name"));
            assert!(rows.windows(2).all(|w| w[0] < w[1]));
            assert!(rows.iter().all(|&i| i < records.len()));
        }
    }
}
