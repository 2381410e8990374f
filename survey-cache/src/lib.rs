use lazy_static::lazy_static;
use std::sync::RwLock;
pub use string_cache::DefaultAtom as Atom;

lazy_static! {
    static ref FILENAME_INTERNER: RwLock<Vec<Atom>> = RwLock::new(Vec::new());
}

/// Intern an image filename and return its stable ID
pub fn intern_filename(s: &str) -> usize {
    let atom = Atom::from(s);
    if let Some(idx) = lookup(&atom) {
        return idx;
    }
    let mut v = FILENAME_INTERNER
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    // another writer may have won the race since the read lock was dropped
    match v.iter().position(|a| *a == atom) {
        Some(idx) => idx,
        None => {
            v.push(atom);
            v.len() - 1
        }
    }
}

fn lookup(atom: &Atom) -> Option<usize> {
    FILENAME_INTERNER
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .iter()
        .position(|a| a == atom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let a = intern_filename("folder_1/interning_is_idempotent.png");
        let b = intern_filename("folder_1/interning_is_idempotent.png");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_names_get_distinct_ids() {
        let a = intern_filename("folder_2/distinct_a.jpg");
        let b = intern_filename("folder_2/distinct_b.jpg");
        assert_ne!(a, b);
        assert_eq!(intern_filename("folder_2/distinct_a.jpg"), a);
    }
}
