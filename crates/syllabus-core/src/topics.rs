use serde::Serialize;

/// Ordered mapping from a category heading to its topic phrases.
///
/// Headings are whatever the source document uses, so this is an open,
/// insertion-ordered map rather than a fixed record. Re-inserting a heading
/// replaces its phrases but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicMap {
    entries: Vec<(String, Vec<String>)>,
}

impl TopicMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, heading: impl Into<String>, topics: Vec<String>) {
        let heading = heading.into();
        match self.entries.iter_mut().find(|(h, _)| *h == heading) {
            Some((_, existing)) => *existing = topics,
            None => self.entries.push((heading, topics)),
        }
    }

    pub fn get(&self, heading: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(h, _)| h == heading)
            .map(|(_, t)| t.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(h, t)| (h.as_str(), t.as_slice()))
    }

    pub fn headings(&self) -> Vec<String> {
        self.entries.iter().map(|(h, _)| h.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for TopicMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut map = TopicMap::new();
        for (heading, topics) in iter {
            map.insert(heading, topics);
        }
        map
    }
}

impl Serialize for TopicMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(h, t)| (h, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut map = TopicMap::new();
        map.insert("A", strings(&["x"]));
        map.insert("B", strings(&["y"]));
        map.insert("A", strings(&["z"]));

        assert_eq!(map.headings(), vec!["A", "B"]);
        assert_eq!(map.get("A").unwrap(), &["z".to_string()]);
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let map: TopicMap = vec![
            ("Zeta".to_string(), strings(&["one"])),
            ("Alpha".to_string(), strings(&["two", "three"])),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"Zeta":["one"],"Alpha":["two","three"]}"#);
    }
}
