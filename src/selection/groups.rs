//! Per-gene grouping of matched records.

use super::GenePattern;
use anyhow::Result;
use noodles::fasta;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Records grouped by the gene name they matched, in first-match order.
///
/// Groups are created lazily, so a gene without any matching record never
/// appears. Within a group records keep the order in which they were read.
#[derive(Debug, Default)]
pub struct MatchGroups {
    groups: Vec<(String, Vec<fasta::Record>)>,
    index: HashMap<String, usize>,
}

impl MatchGroups {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` to the group for `gene`, creating the group if needed.
    pub fn push(&mut self, gene: &str, record: fasta::Record) {
        match self.index.get(gene) {
            Some(&i) => self.groups[i].1.push(record),
            None => {
                self.index.insert(gene.to_string(), self.groups.len());
                self.groups.push((gene.to_string(), vec![record]));
            }
        }
    }

    /// Records matched for `gene`, if any.
    pub fn get(&self, gene: &str) -> Option<&[fasta::Record]> {
        self.index.get(gene).map(|&i| self.groups[i].1.as_slice())
    }

    /// Number of gene groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates over `(gene, records)` pairs in group order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[fasta::Record])> {
        self.groups
            .iter()
            .map(|(gene, records)| (gene.as_str(), records.as_slice()))
    }

    /// All grouped records, group by group.
    pub fn records(&self) -> impl Iterator<Item = &fasta::Record> {
        self.groups.iter().flat_map(|(_, records)| records.iter())
    }

    /// Total number of records across all groups.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|(_, records)| records.len()).sum()
    }

    /// Reduces every group to its longest record.
    ///
    /// Length is the number of sequence symbols. When several records share the
    /// maximum length the one read first is kept.
    pub fn retain_longest(&mut self) {
        for (_, records) in &mut self.groups {
            // min_by_key keeps the first of equal keys, max_by_key the last
            let Some(longest) = records
                .iter()
                .enumerate()
                .min_by_key(|(_, record)| Reverse(record.sequence().len()))
                .map(|(i, _)| i)
            else {
                continue;
            };

            let record = records.swap_remove(longest);
            records.clear();
            records.push(record);
        }
    }
}

/// Streams `records` through `patterns`, grouping every record under each gene it matches.
///
/// Every record is tested against every pattern. Returns the groups and the
/// number of records consumed. The first read error aborts grouping.
pub fn group_records<I>(records: I, patterns: &[GenePattern]) -> Result<(MatchGroups, usize)>
where
    I: IntoIterator<Item = Result<fasta::Record>>,
{
    let mut groups = MatchGroups::new();
    let mut scanned = 0;

    for record in records {
        let record = record?;
        scanned += 1;

        let matched: Vec<&GenePattern> = patterns
            .iter()
            .filter(|pattern| pattern.is_match(record.name()))
            .collect();

        if let Some((last, rest)) = matched.split_last() {
            for pattern in rest {
                groups.push(pattern.name(), record.clone());
            }
            groups.push(last.name(), record);
        }
    }

    Ok((groups, scanned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::compile_patterns;

    fn record(name: &str, sequence: &[u8]) -> fasta::Record {
        fasta::Record::new(
            fasta::record::Definition::new(name, None),
            fasta::record::Sequence::from(sequence.to_vec()),
        )
    }

    fn names(records: &[fasta::Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| String::from_utf8_lossy(r.name()).to_string())
            .collect()
    }

    fn patterns(genes: &[&str]) -> Vec<GenePattern> {
        let genes: Vec<String> = genes.iter().map(|g| g.to_string()).collect();
        compile_patterns(&genes).unwrap()
    }

    fn scenario() -> Vec<Result<fasta::Record>> {
        vec![
            Ok(record("G1.1", b"ACGT")),
            Ok(record("G1.2", b"ACGTAC")),
            Ok(record("G2", b"TTT")),
        ]
    }

    #[test]
    fn test_groups_scenario() {
        let (groups, scanned) = group_records(scenario(), &patterns(&["G1", "G2"])).unwrap();

        assert_eq!(scanned, 3);
        assert_eq!(groups.len(), 2);
        assert_eq!(names(groups.get("G1").unwrap()), vec!["G1.1", "G1.2"]);
        assert_eq!(names(groups.get("G2").unwrap()), vec!["G2"]);
        assert_eq!(groups.record_count(), 3);
    }

    #[test]
    fn test_group_order_follows_first_match() {
        let records = vec![
            Ok(record("B.1", b"A")),
            Ok(record("A", b"C")),
            Ok(record("B.2", b"G")),
        ];
        let (groups, _) = group_records(records, &patterns(&["A", "B"])).unwrap();

        let order: Vec<&str> = groups.iter().map(|(gene, _)| gene).collect();
        assert_eq!(order, vec!["B", "A"]);

        let all: Vec<fasta::Record> = groups.records().cloned().collect();
        assert_eq!(names(&all), vec!["B.1", "B.2", "A"]);
    }

    #[test]
    fn test_unmatched_gene_absent() {
        let (groups, _) = group_records(scenario(), &patterns(&["G1", "G3"])).unwrap();

        assert!(groups.get("G3").is_none());
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_suffix_without_dot_not_grouped() {
        let records = vec![Ok(record("G1X", b"ACGT")), Ok(record("G10", b"ACGT"))];
        let (groups, scanned) = group_records(records, &patterns(&["G1"])).unwrap();

        assert_eq!(scanned, 2);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_record_matching_two_genes() {
        let records = vec![Ok(record("NM_1.2", b"ACGT"))];
        let (groups, _) = group_records(records, &patterns(&["NM_1", "NM_1.2"])).unwrap();

        assert_eq!(names(groups.get("NM_1").unwrap()), vec!["NM_1.2"]);
        assert_eq!(names(groups.get("NM_1.2").unwrap()), vec!["NM_1.2"]);
    }

    #[test]
    fn test_duplicate_gene_names_do_not_duplicate_records() {
        let (groups, _) = group_records(scenario(), &patterns(&["G2", "G2"])).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(names(groups.get("G2").unwrap()), vec!["G2"]);
    }

    #[test]
    fn test_read_error_aborts() {
        let records = vec![
            Ok(record("G1", b"ACGT")),
            Err(anyhow::anyhow!("truncated record")),
        ];
        let result = group_records(records, &patterns(&["G1"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_retain_longest() {
        let (mut groups, _) = group_records(scenario(), &patterns(&["G1", "G2"])).unwrap();
        groups.retain_longest();

        assert_eq!(names(groups.get("G1").unwrap()), vec!["G1.2"]);
        assert_eq!(names(groups.get("G2").unwrap()), vec!["G2"]);
        assert!(groups.iter().all(|(_, records)| records.len() == 1));
    }

    #[test]
    fn test_retain_longest_keeps_first_tie() {
        let records = vec![
            Ok(record("G1.1", b"AC")),
            Ok(record("G1.2", b"ACGT")),
            Ok(record("G1.3", b"TTTT")),
            Ok(record("G1.4", b"GGG")),
        ];
        let (mut groups, _) = group_records(records, &patterns(&["G1"])).unwrap();
        groups.retain_longest();

        assert_eq!(names(groups.get("G1").unwrap()), vec!["G1.2"]);
    }
}
