use std::collections::{BTreeMap, HashMap};

use crate::Word;

/// Resolves an architectural register name to its current value.
///
/// Names arrive without the `$` sigil. Returning `None` means the name is
/// not a register of the machine being inspected.
pub trait RegisterLookup {
    fn lookup(&self, name: &str) -> Option<Word>;
}

impl<T: RegisterLookup + ?Sized> RegisterLookup for &T {
    fn lookup(&self, name: &str) -> Option<Word> {
        (**self).lookup(name)
    }
}

impl RegisterLookup for BTreeMap<String, Word> {
    fn lookup(&self, name: &str) -> Option<Word> {
        self.get(name).copied()
    }
}

impl RegisterLookup for HashMap<String, Word> {
    fn lookup(&self, name: &str) -> Option<Word> {
        self.get(name).copied()
    }
}

/// A machine with no registers. Every lookup fails.
impl RegisterLookup for () {
    fn lookup(&self, _name: &str) -> Option<Word> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_lookup() {
        let mut regs = BTreeMap::new();
        regs.insert("sp".to_string(), 0x8000_1000);
        assert_eq!(regs.lookup("sp"), Some(0x8000_1000));
        assert_eq!(regs.lookup("ra"), None);
    }

    #[test]
    fn test_reference_forwards() {
        let mut regs = HashMap::new();
        regs.insert("a0".to_string(), 7);
        let by_ref: &dyn RegisterLookup = &regs;
        assert_eq!((&by_ref).lookup("a0"), Some(7));
    }

    #[test]
    fn test_unit_has_no_registers() {
        assert_eq!(().lookup("pc"), None);
    }
}
