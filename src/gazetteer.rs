use once_cell::sync::Lazy;
use regex::Regex;

/// Officially recognized barangays, in match-precedence order
const BASE_AREAS: &[&str] = &[
    "AGUSAN",
    "BAIKINGON",
    "BALUBAL",
    "BALULANG",
    "BAYABAS",
    "BAYANGA",
    "BESIGAN",
    "BONBON",
    "BUGO",
    "BUHUAWEN",
    "BULUA",
    "CAMAMAN-AN",
    "CANITOAN",
    "CARMEN",
    "CONSOLACION",
    "CUGMAN",
    "DANSOLIHON",
    "F.S. CATANICO",
    "GUSA",
    "INDAHAG",
    "IPONAN",
    "KAUSWAGAN",
    "LAPASAN",
    "LUMBAMBIA",
    "LUMBIA",
    "MACABALAN",
    "MACASANDIG",
    "MAGSAYSAY",
    "MAMBUAYA",
    "NAZARETH",
    "PAGALUNGAN",
    "PAGATPAT",
    "PATAG",
    "PIGSAG-AN",
    "PUERTO",
    "PUNTOD",
    "SAN SIMON",
    "TABLON",
    "TAGLIMAO",
    "TAGPANGI",
    "TIGNAPOLOAN",
    "TUBURAN",
    "TUMPAGON",
];

/// Poblacion barangays are numbered rather than named
const NUMBERED_AREA_PREFIX: &str = "BARANGAY";
const NUMBERED_AREA_COUNT: usize = 40;

/// Sitios and subdivisions mapped to the barangay they belong to
const SUB_AREA_ALIASES: &[(&str, &str)] = &[
    ("CALAANAN", "CANITOAN"),
    ("PASIL", "KAUSWAGAN"),
    ("AGORA", "LAPASAN"),
    ("MACANHAN", "CARMEN"),
    ("ORO HABITAT", "CANITOAN"),
];

/// Built-in gazetteer, compiled on first use
pub static GAZETTEER: Lazy<Gazetteer> = Lazy::new(Gazetteer::builtin);

/// A place name together with its compiled whole-word matcher
#[derive(Debug, Clone)]
pub struct PlaceName {
    name: String,
    pattern: Regex,
}

impl PlaceName {
    fn new(name: &str) -> Self {
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(name)))
            .expect("escaped literal is a valid pattern");
        Self {
            name: name.to_string(),
            pattern,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the name occurs in `text` bounded by non-word characters
    pub fn occurs_in(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Alias entry: an informal locality and its canonical parent area
#[derive(Debug, Clone)]
pub struct SubAreaAlias {
    alias: PlaceName,
    parent: String,
}

impl SubAreaAlias {
    pub fn alias(&self) -> &PlaceName {
        &self.alias
    }

    pub fn parent(&self) -> &str {
        &self.parent
    }
}

/// Ordered canonical areas plus ordered alias mapping. Read-only once built.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    areas: Vec<PlaceName>,
    aliases: Vec<SubAreaAlias>,
}

impl Gazetteer {
    /// Build a gazetteer from canonical names and `(alias, parent)` pairs,
    /// both in precedence order
    pub fn from_parts<S: AsRef<str>>(areas: &[S], aliases: &[(&str, &str)]) -> Self {
        let gazetteer = Self {
            areas: areas.iter().map(|a| PlaceName::new(a.as_ref())).collect(),
            aliases: aliases
                .iter()
                .map(|(alias, parent)| SubAreaAlias {
                    alias: PlaceName::new(alias),
                    parent: parent.to_string(),
                })
                .collect(),
        };
        debug_assert!(
            gazetteer.aliases().all(|a| gazetteer.is_canonical(a.parent())),
            "every alias parent must be a canonical area"
        );
        gazetteer
    }

    /// The Cagayan de Oro barangay list with numbered barangays appended
    pub fn builtin() -> Self {
        let mut areas: Vec<String> = BASE_AREAS.iter().map(|a| a.to_string()).collect();
        areas.extend(
            (1..=NUMBERED_AREA_COUNT).map(|i| format!("{} {}", NUMBERED_AREA_PREFIX, i)),
        );
        Self::from_parts(areas.as_slice(), SUB_AREA_ALIASES)
    }

    pub fn areas(&self) -> impl Iterator<Item = &PlaceName> {
        self.areas.iter()
    }

    pub fn aliases(&self) -> impl Iterator<Item = &SubAreaAlias> {
        self.aliases.iter()
    }

    /// Canonical parent of an exact alias name
    #[allow(dead_code)]
    pub fn parent_of(&self, alias: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|a| a.alias.name() == alias)
            .map(|a| a.parent())
    }

    /// Whether `name` is exactly one of the canonical areas
    pub fn is_canonical(&self, name: &str) -> bool {
        self.areas.iter().any(|a| a.name() == name)
    }
}
