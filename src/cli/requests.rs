//! Caller-side checks for copy and export requests.
//!
//! The services accept any combination of names and categories. These rules
//! (no self copy, no clobbering an existing name through `--new`, at least one
//! file type) belong to the user-facing layer and are enforced here before any
//! service call.

use crate::models::{CategorySelection, CharacterSnapshot};
use thiserror::Error;

/// A request rejected before reaching the services.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("Please select a source character.")]
    NoSource,

    #[error("Character '{0}' was not found in the selected directory.")]
    UnknownSource(String),

    #[error("Please select a target character or enter a new character name.")]
    NoTarget,

    #[error("Please either select a target character OR enter a new character name, not both.")]
    ConflictingTarget,

    #[error(
        "Cannot copy to the same character. The new character name matches the source character."
    )]
    NewNameMatchesSource,

    #[error(
        "Character '{0}' already exists. Please select it with --to or choose a different name."
    )]
    NewNameExists(String),

    #[error("Cannot copy to the same character. Please select a different target character.")]
    TargetIsSource,

    #[error("Character '{0}' was not found. Use --new to create files for a new character.")]
    UnknownTarget(String),

    #[error("Please select at least one file type to {0}.")]
    NoCategorySelected(&'static str),

    #[error("Please select at least one character to export.")]
    NoCharactersSelected,
}

/// Where copied files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyTarget {
    /// A character already present in the scan
    Existing(String),
    /// A name with no files yet
    New(String),
}

impl CopyTarget {
    pub fn name(&self) -> &str {
        match self {
            CopyTarget::Existing(name) | CopyTarget::New(name) => name,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, CopyTarget::New(_))
    }
}

/// A validated copy request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    pub source: String,
    pub target: CopyTarget,
    pub selection: CategorySelection,
}

impl CopyRequest {
    /// Validates raw user input against the current scan.
    ///
    /// Blank target and new-name values count as absent; the new name is trimmed.
    pub fn new(
        source: &str,
        target: Option<&str>,
        new_name: Option<&str>,
        selection: CategorySelection,
        snapshot: &CharacterSnapshot,
    ) -> Result<Self, RequestError> {
        if source.is_empty() {
            return Err(RequestError::NoSource);
        }
        if !snapshot.contains(source) {
            return Err(RequestError::UnknownSource(source.to_string()));
        }

        let target = target.filter(|name| !name.is_empty());
        let new_name = new_name.map(str::trim).filter(|name| !name.is_empty());

        let target = match (target, new_name) {
            (None, None) => return Err(RequestError::NoTarget),
            (Some(_), Some(_)) => return Err(RequestError::ConflictingTarget),
            (None, Some(new_name)) => {
                if new_name.eq_ignore_ascii_case(source) {
                    return Err(RequestError::NewNameMatchesSource);
                }
                if snapshot.contains(new_name) {
                    return Err(RequestError::NewNameExists(new_name.to_string()));
                }
                CopyTarget::New(new_name.to_string())
            }
            (Some(target), None) => {
                if target == source {
                    return Err(RequestError::TargetIsSource);
                }
                if !snapshot.contains(target) {
                    return Err(RequestError::UnknownTarget(target.to_string()));
                }
                CopyTarget::Existing(target.to_string())
            }
        };

        if selection.is_empty() {
            return Err(RequestError::NoCategorySelected("copy"));
        }

        Ok(Self {
            source: source.to_string(),
            target,
            selection,
        })
    }

    /// Text shown before copying.
    ///
    /// `pending_overwrite` is the result of
    /// [`files_pending_overwrite`](crate::services::files_pending_overwrite) for
    /// this request; it is ignored for new characters.
    pub fn confirmation_message(&self, pending_overwrite: &[String]) -> String {
        let labels = self.selection.labels().join(", ");

        if self.target.is_new() {
            return format!(
                "Are you sure you want to create {} file(s) for new character '{}' from '{}'?",
                labels,
                self.target.name(),
                self.source
            );
        }

        let mut message = format!(
            "Are you sure you want to overwrite files for '{}' from '{}'?\n\n",
            self.target.name(),
            self.source
        );
        message.push_str("This will overwrite the following existing file(s):\n");
        if pending_overwrite.is_empty() {
            message.push_str(&format!(
                "  • {} file(s) (will be created if they don't exist)\n",
                labels
            ));
        } else {
            for file in pending_overwrite {
                message.push_str(&format!("  • {}\n", file));
            }
        }
        message.push_str(&format!("\nSelected file types: {}", labels));
        message
    }
}

/// A validated export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub names: Vec<String>,
    pub selection: CategorySelection,
}

impl ExportRequest {
    /// With `all_characters`, every name in the scan is exported and `names` is ignored.
    pub fn new(
        names: &[String],
        all_characters: bool,
        selection: CategorySelection,
        snapshot: &CharacterSnapshot,
    ) -> Result<Self, RequestError> {
        let names: Vec<String> = if all_characters {
            snapshot.names().map(str::to_string).collect()
        } else {
            names.to_vec()
        };

        if names.is_empty() {
            return Err(RequestError::NoCharactersSelected);
        }
        if selection.is_empty() {
            return Err(RequestError::NoCategorySelected("export"));
        }

        Ok(Self { names, selection })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CharacterRecord;
    use camino::Utf8PathBuf;
    use std::collections::BTreeMap;

    fn snapshot(names: &[&str]) -> CharacterSnapshot {
        let characters = names
            .iter()
            .map(|name| {
                let record = CharacterRecord {
                    name: name.to_string(),
                    config_path: Some(Utf8PathBuf::from(format!("/q/{name}_pq.proj.ini"))),
                    ui_path: None,
                    spellsets_path: None,
                };
                (name.to_string(), record)
            })
            .collect::<BTreeMap<_, _>>();
        CharacterSnapshot::new(Utf8PathBuf::from("/q"), characters)
    }

    #[test]
    fn test_copy_to_existing_character() {
        let snap = snapshot(&["Alpha", "Beta"]);
        let request =
            CopyRequest::new("Alpha", Some("Beta"), None, CategorySelection::all(), &snap).unwrap();

        assert_eq!(request.target, CopyTarget::Existing("Beta".to_string()));
        assert!(!request.target.is_new());
    }

    #[test]
    fn test_copy_to_new_character_is_trimmed() {
        let snap = snapshot(&["Alpha"]);
        let request =
            CopyRequest::new("Alpha", None, Some("  Gamma "), CategorySelection::all(), &snap)
                .unwrap();

        assert_eq!(request.target, CopyTarget::New("Gamma".to_string()));
    }

    #[test]
    fn test_copy_rejections() {
        let snap = snapshot(&["Alpha", "Beta"]);
        let all = CategorySelection::all();

        assert_eq!(
            CopyRequest::new("", Some("Beta"), None, all, &snap),
            Err(RequestError::NoSource)
        );
        assert_eq!(
            CopyRequest::new("Ghost", Some("Beta"), None, all, &snap),
            Err(RequestError::UnknownSource("Ghost".to_string()))
        );
        assert_eq!(
            CopyRequest::new("Alpha", None, Some("   "), all, &snap),
            Err(RequestError::NoTarget)
        );
        assert_eq!(
            CopyRequest::new("Alpha", Some("Beta"), Some("Gamma"), all, &snap),
            Err(RequestError::ConflictingTarget)
        );
        assert_eq!(
            CopyRequest::new("Alpha", None, Some("alpha"), all, &snap),
            Err(RequestError::NewNameMatchesSource)
        );
        assert_eq!(
            CopyRequest::new("Alpha", None, Some("Beta"), all, &snap),
            Err(RequestError::NewNameExists("Beta".to_string()))
        );
        assert_eq!(
            CopyRequest::new("Alpha", Some("Alpha"), None, all, &snap),
            Err(RequestError::TargetIsSource)
        );
        assert_eq!(
            CopyRequest::new("Alpha", Some("Gamma"), None, all, &snap),
            Err(RequestError::UnknownTarget("Gamma".to_string()))
        );
        assert_eq!(
            CopyRequest::new("Alpha", Some("Beta"), None, CategorySelection::none(), &snap),
            Err(RequestError::NoCategorySelected("copy"))
        );
    }

    #[test]
    fn test_confirmation_lists_pending_files() {
        let snap = snapshot(&["Alpha", "Beta"]);
        let request = CopyRequest::new(
            "Alpha",
            Some("Beta"),
            None,
            CategorySelection::new(true, true, false),
            &snap,
        )
        .unwrap();

        let message = request.confirmation_message(&["Beta_pq.proj.ini".to_string()]);
        assert!(message.contains("overwrite files for 'Beta' from 'Alpha'"));
        assert!(message.contains("  • Beta_pq.proj.ini\n"));
        assert!(message.ends_with("Selected file types: UI, Config"));

        let nothing_pending = request.confirmation_message(&[]);
        assert!(nothing_pending.contains("UI, Config file(s) (will be created if they don't exist)"));
    }

    #[test]
    fn test_confirmation_for_new_character() {
        let snap = snapshot(&["Alpha"]);
        let request = CopyRequest::new(
            "Alpha",
            None,
            Some("Gamma"),
            CategorySelection::new(false, false, true),
            &snap,
        )
        .unwrap();

        assert_eq!(
            request.confirmation_message(&[]),
            "Are you sure you want to create Spellsets file(s) for new character 'Gamma' from 'Alpha'?"
        );
    }

    #[test]
    fn test_export_request() {
        let snap = snapshot(&["Beta", "Alpha"]);
        let all = CategorySelection::all();

        let request = ExportRequest::new(&[], true, all, &snap).unwrap();
        assert_eq!(request.names, vec!["Alpha", "Beta"]);

        assert_eq!(
            ExportRequest::new(&[], false, all, &snap),
            Err(RequestError::NoCharactersSelected)
        );
        assert_eq!(
            ExportRequest::new(&["Alpha".to_string()], false, CategorySelection::none(), &snap),
            Err(RequestError::NoCategorySelected("export"))
        );
    }
}
