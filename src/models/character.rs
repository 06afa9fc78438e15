use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;

const PROJECT_SUFFIX: &str = "_pq.proj.ini";
const UI_PREFIX: &str = "UI_";
const SPELLSETS_SUFFIX: &str = "_spellsets.ini";

/// Kind of per-character file tracked by the manager.
///
/// Variants are declared in the order every operation reports its results:
/// UI, Config, Spellsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileCategory {
    /// `UI_<name>_pq.proj.ini` - window and hotbar layout
    Ui,
    /// `<name>_pq.proj.ini` - general client configuration
    Config,
    /// `<name>_spellsets.ini` - saved spell sets
    Spellsets,
}

impl FileCategory {
    /// All categories in result order.
    pub const ALL: [FileCategory; 3] = [FileCategory::Ui, FileCategory::Config, FileCategory::Spellsets];

    /// Canonical filename of this category for a character.
    ///
    /// The name is used verbatim; no escaping is performed.
    pub fn file_name(self, character: &str) -> String {
        match self {
            FileCategory::Ui => format!("{UI_PREFIX}{character}{PROJECT_SUFFIX}"),
            FileCategory::Config => format!("{character}{PROJECT_SUFFIX}"),
            FileCategory::Spellsets => format!("{character}{SPELLSETS_SUFFIX}"),
        }
    }

    /// Canonical path of this category for a character inside `directory`.
    pub fn path_in(self, directory: &Utf8Path, character: &str) -> Utf8PathBuf {
        directory.join(self.file_name(character))
    }

    /// Extract the character name from a filename matching this category's template.
    ///
    /// Matching is a plain prefix/suffix strip, so names may contain underscores.
    /// A config match rejects anything starting with `UI_`, which belongs to the UI
    /// template. Empty names never match.
    pub fn character_name(self, file_name: &str) -> Option<&str> {
        let name = match self {
            FileCategory::Ui => file_name
                .strip_prefix(UI_PREFIX)
                .and_then(|rest| rest.strip_suffix(PROJECT_SUFFIX)),
            FileCategory::Config => {
                if file_name.starts_with(UI_PREFIX) {
                    None
                } else {
                    file_name.strip_suffix(PROJECT_SUFFIX)
                }
            }
            FileCategory::Spellsets => file_name.strip_suffix(SPELLSETS_SUFFIX),
        }?;

        if name.is_empty() { None } else { Some(name) }
    }

    /// Short label used in prompts and listings.
    pub fn label(self) -> &'static str {
        match self {
            FileCategory::Ui => "UI",
            FileCategory::Config => "Config",
            FileCategory::Spellsets => "Spellsets",
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which categories a copy or export should touch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorySelection {
    pub ui: bool,
    pub config: bool,
    pub spellsets: bool,
}

impl CategorySelection {
    pub fn new(ui: bool, config: bool, spellsets: bool) -> Self {
        Self {
            ui,
            config,
            spellsets,
        }
    }

    pub fn all() -> Self {
        Self::new(true, true, true)
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        !(self.ui || self.config || self.spellsets)
    }

    pub fn contains(&self, category: FileCategory) -> bool {
        match category {
            FileCategory::Ui => self.ui,
            FileCategory::Config => self.config,
            FileCategory::Spellsets => self.spellsets,
        }
    }

    /// Selected categories in result order.
    pub fn categories(&self) -> impl Iterator<Item = FileCategory> + '_ {
        FileCategory::ALL
            .into_iter()
            .filter(move |category| self.contains(*category))
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.categories().map(FileCategory::label).collect()
    }
}

/// One character's known files, as verified at scan time.
///
/// Invariant: at least one path is present. Records are built by the scanner and
/// never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    pub name: String,
    pub config_path: Option<Utf8PathBuf>,
    pub ui_path: Option<Utf8PathBuf>,
    pub spellsets_path: Option<Utf8PathBuf>,
}

impl CharacterRecord {
    pub fn path(&self, category: FileCategory) -> Option<&Utf8Path> {
        match category {
            FileCategory::Ui => self.ui_path.as_deref(),
            FileCategory::Config => self.config_path.as_deref(),
            FileCategory::Spellsets => self.spellsets_path.as_deref(),
        }
    }

    /// Categories this character has a file for, in result order.
    pub fn categories(&self) -> impl Iterator<Item = FileCategory> + '_ {
        FileCategory::ALL
            .into_iter()
            .filter(move |category| self.path(*category).is_some())
    }

    pub fn has_any_file(&self) -> bool {
        self.categories().next().is_some()
    }
}

/// Result of one directory scan, keyed by character name.
///
/// The map is ordered, so iteration is case-sensitive lexicographic by name.
/// A snapshot goes stale as soon as the directory changes; callers re-scan
/// after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSnapshot {
    directory: Utf8PathBuf,
    characters: BTreeMap<String, CharacterRecord>,
}

impl CharacterSnapshot {
    pub fn new(directory: Utf8PathBuf, characters: BTreeMap<String, CharacterRecord>) -> Self {
        Self {
            directory,
            characters,
        }
    }

    /// Directory the snapshot was taken from.
    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    pub fn get(&self, name: &str) -> Option<&CharacterRecord> {
        self.characters.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.characters.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.characters.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &CharacterRecord> {
        self.characters.values()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_templates() {
        assert_eq!(FileCategory::Config.file_name("Foo"), "Foo_pq.proj.ini");
        assert_eq!(FileCategory::Ui.file_name("Foo"), "UI_Foo_pq.proj.ini");
        assert_eq!(FileCategory::Spellsets.file_name("Foo"), "Foo_spellsets.ini");
    }

    #[test]
    fn test_config_match_rejects_ui_files() {
        assert_eq!(FileCategory::Config.character_name("Foo_pq.proj.ini"), Some("Foo"));
        assert_eq!(FileCategory::Config.character_name("UI_Foo_pq.proj.ini"), None);
        assert_eq!(FileCategory::Ui.character_name("UI_Foo_pq.proj.ini"), Some("Foo"));
        assert_eq!(FileCategory::Ui.character_name("Foo_pq.proj.ini"), None);
    }

    #[test]
    fn test_names_keep_underscores() {
        assert_eq!(FileCategory::Config.character_name("A_B_pq.proj.ini"), Some("A_B"));
        assert_eq!(FileCategory::Ui.character_name("UI_A_B_pq.proj.ini"), Some("A_B"));
        assert_eq!(
            FileCategory::Spellsets.character_name("A_B_spellsets.ini"),
            Some("A_B")
        );
    }

    #[test]
    fn test_unrelated_and_empty_names() {
        assert_eq!(FileCategory::Config.character_name("eqclient.ini"), None);
        assert_eq!(FileCategory::Spellsets.character_name("Foo_spellsets.ini.bak"), None);
        assert_eq!(FileCategory::Config.character_name("_pq.proj.ini"), None);
        assert_eq!(FileCategory::Ui.character_name("UI__pq.proj.ini"), None);
        assert_eq!(FileCategory::Spellsets.character_name("_spellsets.ini"), None);
    }

    #[test]
    fn test_selection_order_and_labels() {
        let selection = CategorySelection::new(false, true, true);
        assert_eq!(
            selection.categories().collect::<Vec<_>>(),
            vec![FileCategory::Config, FileCategory::Spellsets]
        );
        assert_eq!(CategorySelection::all().labels(), vec!["UI", "Config", "Spellsets"]);
        assert!(CategorySelection::none().is_empty());
        assert!(!selection.is_empty());
    }

    #[test]
    fn test_record_categories() {
        let record = CharacterRecord {
            name: "Foo".to_string(),
            config_path: Some(Utf8PathBuf::from("/q/Foo_pq.proj.ini")),
            ui_path: None,
            spellsets_path: Some(Utf8PathBuf::from("/q/Foo_spellsets.ini")),
        };

        assert_eq!(
            record.categories().collect::<Vec<_>>(),
            vec![FileCategory::Config, FileCategory::Spellsets]
        );
        assert!(record.has_any_file());
        assert_eq!(record.path(FileCategory::Ui), None);
    }
}
