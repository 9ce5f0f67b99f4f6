use crate::model::Document;
use crc32fast::Hasher;

/// Derive a short, stable seed from a session name using CRC32
pub fn session_seed(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for builder entities within one session
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(session_name: &str) -> Self {
        Self {
            seed: session_seed(session_name),
            count: 0,
        }
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential id, e.g. `1a2b3c4d-funnel-3`
    pub fn new_id(&mut self, kind: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}", self.seed, kind, self.count)
    }

    /// Generate an id that does not already occur anywhere in `doc`
    pub fn fresh_id(&mut self, kind: &str, doc: &Document) -> String {
        loop {
            let id = self.new_id(kind);
            if !doc.contains_id(&id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
