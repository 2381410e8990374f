use serde::{Deserialize, Serialize};
use survey_cache::{Atom, intern_filename};

/// Defines stimuli shown inside a choice trial
pub trait Stimulus: Clone + Send + Sync + std::fmt::Debug {
    fn cache_id(&self) -> usize;
}

/// One lamp image, addressed by its path relative to the image host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageStimulus {
    #[serde(with = "atom_str")]
    pub filename: Atom,
}

impl ImageStimulus {
    pub fn new(filename: &str) -> Self {
        Self {
            filename: Atom::from(filename),
        }
    }

    /// Absolute URL under the given host prefix
    pub fn url(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.filename)
    }
}

impl Stimulus for ImageStimulus {
    fn cache_id(&self) -> usize {
        intern_filename(&self.filename)
    }
}

mod atom_str {
    use super::Atom;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(atom: &Atom, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(atom)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Atom, D::Error> {
        let s = String::deserialize(d)?;
        Ok(Atom::from(s))
    }
}
