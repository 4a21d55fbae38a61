use serde::{ser::SerializeMap, Serialize, Serializer};

/// The fixed vocabulary of resume section headers, in canonical document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionHeader {
    Contact,
    Summary,
    Skills,
    Projects,
    Experience,
    Education,
}

impl SectionHeader {
    pub const ALL: [SectionHeader; 6] = [
        SectionHeader::Contact,
        SectionHeader::Summary,
        SectionHeader::Skills,
        SectionHeader::Projects,
        SectionHeader::Experience,
        SectionHeader::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionHeader::Contact => "CONTACT",
            SectionHeader::Summary => "SUMMARY",
            SectionHeader::Skills => "SKILLS",
            SectionHeader::Projects => "PROJECTS",
            SectionHeader::Experience => "EXPERIENCE",
            SectionHeader::Education => "EDUCATION",
        }
    }

    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn parse(word: &str) -> Option<Self> {
        let word = word.trim();
        Self::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(word))
    }
}

/// Ordered header → body mapping built from generated resume text.
///
/// Entries keep first-appearance order; inserting an existing header replaces
/// its body in place. Serializes as a JSON object keyed by uppercase header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    entries: Vec<(SectionHeader, String)>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding all of `body` under one header.
    pub fn single(header: SectionHeader, body: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.insert(header, body);
        map
    }

    pub fn insert(&mut self, header: SectionHeader, body: impl Into<String>) {
        let body = body.into();
        match self.entries.iter_mut().find(|(h, _)| *h == header) {
            Some(entry) => entry.1 = body,
            None => self.entries.push((header, body)),
        }
    }

    pub fn get(&self, header: SectionHeader) -> Option<&str> {
        self.entries
            .iter()
            .find(|(h, _)| *h == header)
            .map(|(_, body)| body.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionHeader, &str)> {
        self.entries.iter().map(|(h, body)| (*h, body.as_str()))
    }

    /// Entries in canonical document order (CONTACT first, EDUCATION last).
    pub fn in_document_order(&self) -> impl Iterator<Item = (SectionHeader, &str)> {
        SectionHeader::ALL
            .into_iter()
            .filter_map(move |h| self.get(h).map(|body| (h, body)))
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (header, body) in &self.entries {
            map.serialize_entry(header.as_str(), body)?;
        }
        map.end()
    }
}
