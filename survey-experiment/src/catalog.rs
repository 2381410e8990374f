//! Static lamp-image filename lists.
//!
//! Both lists ship as text assets, one filename per line, and are parsed once
//! into an immutable [`Catalog`]. Nothing here mutates the lists; pools handed
//! to the sampler are fresh, sanitised copies.

use crate::cohort::Cohort;
use lazy_static::lazy_static;
use survey_cache::Atom;
use survey_core::ImageStimulus;
use thiserror::Error;

const TRAIN_FILENAMES: &str = include_str!("../../assets/train_filenames.txt");
const ALL_FILENAMES: &str = include_str!("../../assets/all_filenames.txt");

lazy_static! {
    static ref BUILTIN: Catalog = Catalog::from_lists(TRAIN_FILENAMES, ALL_FILENAMES);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("cohort {cohort} needs entries {start}..{end} but the catalog has {len}")]
    CohortOutOfRange {
        cohort: u32,
        start: usize,
        end: usize,
        len: usize,
    },
}

#[derive(Debug, Clone)]
pub struct Catalog {
    training: Vec<Atom>,
    main: Vec<Atom>,
}

impl Catalog {
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn from_lists(training: &str, main: &str) -> Self {
        Self {
            training: parse_list(training),
            main: parse_list(main),
        }
    }

    pub fn training_len(&self) -> usize {
        self.training.len()
    }

    /// Sanitised training images
    pub fn training_pool(&self) -> Vec<ImageStimulus> {
        to_stimuli(&self.training)
    }

    /// Sanitised images of one cohort's contiguous slice
    pub fn cohort_pool(
        &self,
        cohort: Cohort,
        cohort_size: usize,
    ) -> Result<Vec<ImageStimulus>, CatalogError> {
        let range = cohort.range(cohort_size);
        let slice = self
            .main
            .get(range.clone())
            .ok_or(CatalogError::CohortOutOfRange {
                cohort: cohort.index(),
                start: range.start,
                end: range.end,
                len: self.main.len(),
            })?;
        Ok(to_stimuli(slice))
    }
}

fn parse_list(raw: &str) -> Vec<Atom> {
    raw.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(Atom::from)
        .collect()
}

fn to_stimuli(names: &[Atom]) -> Vec<ImageStimulus> {
    names
        .iter()
        .map(|name| ImageStimulus::new(&sanitize_filename(name)))
        .collect()
}

/// Replaces whitespace, commas and parentheses with underscores, matching
/// the names the images are hosted under.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_whitespace() || matches!(c, ',' | '(' | ')') {
                '_'
            } else {
                c
            }
        })
        .collect()
}
