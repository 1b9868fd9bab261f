//! Wordlist partitioning.

/// Splits `words` into `worker_count` assignments, round-robin by line index.
///
/// Every line lands in exactly one partition (`index % worker_count`), and
/// relative order is preserved inside each partition. A zero worker count is
/// treated as one.
pub fn partition_words(words: &[String], worker_count: usize) -> Vec<Vec<String>> {
    let buckets = worker_count.max(1);
    let mut partitions = vec![Vec::new(); buckets];
    for (index, word) in words.iter().enumerate() {
        partitions[index % buckets].push(word.clone());
    }
    partitions
}
