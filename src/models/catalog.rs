use std::collections::BTreeMap;

/// Static mapping from municipal magnitude code to a pollutant display
/// name. Not exhaustive: codes outside the catalog stay fully usable in
/// every query, they just render without a name.
#[derive(Debug, Clone)]
pub struct MagnitudeCatalog {
    entries: BTreeMap<u16, String>,
}

impl MagnitudeCatalog {
    /// Catalog seeded with the codes the municipal network publishes
    pub fn municipal() -> Self {
        let mut catalog = Self::empty();
        catalog.insert(1, "Sulphur dioxide (SO2)");
        catalog.insert(6, "Carbon monoxide (CO)");
        catalog.insert(7, "Nitrogen monoxide (NO)");
        catalog.insert(8, "Nitrogen dioxide (NO2)");
        catalog.insert(9, "Particulates < 10 um (PM10)");
        catalog.insert(10, "Nitrogen oxides (NOx)");
        catalog.insert(12, "Ozone (O3)");
        catalog.insert(14, "Total hydrocarbons (TCH)");
        catalog
    }

    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, code: u16, name: &str) {
        self.entries.insert(code, name.to_string());
    }

    pub fn name(&self, code: u16) -> Option<&str> {
        self.entries.get(&code).map(String::as_str)
    }

    /// Display label for a code: the catalog name, or the bare code for
    /// unmapped magnitudes
    pub fn label(&self, code: u16) -> String {
        match self.name(code) {
            Some(name) => format!("{} [{}]", name, code),
            None => format!("magnitude {}", code),
        }
    }
}

impl Default for MagnitudeCatalog {
    fn default() -> Self {
        Self::municipal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_codes() {
        let catalog = MagnitudeCatalog::municipal();
        assert_eq!(catalog.name(8), Some("Nitrogen dioxide (NO2)"));
        assert_eq!(catalog.name(99), None);
        assert_eq!(catalog.label(99), "magnitude 99");
    }

    #[test]
    fn test_caller_extension() {
        let mut catalog = MagnitudeCatalog::municipal();
        catalog.insert(20, "Toluene (TOL)");
        assert_eq!(catalog.name(20), Some("Toluene (TOL)"));
    }
}
